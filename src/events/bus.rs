//! # Broadcast channel for lifecycle events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]. The queue
//! publishes from its submission path and from every operation task; any
//! number of observers may subscribe.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never suspends and never fails.
//! - **Bounded capacity**: one ring buffer holds the most recent events.
//! - **Lag handling**: a slow receiver observes `RecvError::Lagged(n)` and
//!   skips the `n` oldest items.
//! - **No persistence**: with no active receiver, events are dropped at send.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for [`Event`]s.
///
/// Cheap to clone (the sender is `Arc`-backed); clones publish into the same
/// ring buffer.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus with the given ring-buffer capacity (clamped to ≥ 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all current subscribers.
    ///
    /// Returns immediately; if nobody is subscribed the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates an independent receiver observing events published after this
    /// call. A receiver that falls more than the bus capacity behind gets
    /// `RecvError::Lagged(n)` and skips the missed items.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
