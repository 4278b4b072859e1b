//! # SubscriberSet: non-blocking fan-out over multiple subscribers.
//!
//! Distributes each [`Event`] to every registered [`Subscribe`]r without
//! awaiting their processing.
//!
//! ## Guarantees
//! - [`SubscriberSet::emit`] returns immediately.
//! - Per-subscriber FIFO (queue order).
//! - A panicking subscriber is caught and reported; others are unaffected.
//!
//! ## Non-guarantees
//! - No global ordering across different subscribers.
//! - No retry on queue overflow; the event is dropped for that subscriber.

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event};

use super::Subscribe;

/// Per-subscriber channel with metadata.
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Composite fan-out with per-subscriber bounded queues and worker tasks.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use taskserial::{SerialQueue, Subscribe, SubscriberSet};
/// use tokio_util::sync::CancellationToken;
///
/// # struct Metrics;
/// # #[async_trait::async_trait]
/// # impl Subscribe for Metrics {
/// #     async fn on_event(&self, _event: &taskserial::Event) {}
/// # }
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let queue = SerialQueue::default();
///     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(Metrics)];
///     let set = SubscriberSet::new(subs);
///
///     let stop = CancellationToken::new();
///     let listener = set.listen(queue.bus(), stop.clone());
///
///     // ... submit operations ...
///
///     stop.cancel();
///     listener.await.unwrap();
/// }
/// ```
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
}

impl SubscriberSet {
    /// Creates a set and spawns one worker per subscriber.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(sub.queue_capacity().max(1));

            let worker = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());
                    if let Err(panic) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        eprintln!("[taskserial] subscriber '{}' panicked: {panic:?}", sub.name());
                    }
                }
            });

            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(worker);
        }

        Self { channels, workers }
    }

    /// Fans one event out to all subscribers without blocking.
    ///
    /// If a subscriber's queue is full or its worker is gone, the event is
    /// dropped for that subscriber and a warning is printed.
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&ev)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    eprintln!(
                        "[taskserial] subscriber '{}' dropped event: queue full",
                        channel.name
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    eprintln!(
                        "[taskserial] subscriber '{}' dropped event: worker closed",
                        channel.name
                    );
                }
            }
        }
    }

    /// Pumps a bus into this set until `stop` fires, then drains the workers.
    ///
    /// Lagged receivers skip the missed events and keep going; the pump also
    /// ends if the bus is dropped.
    pub fn listen(self, bus: &Bus, stop: CancellationToken) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = stop.cancelled() => break,
                    received = rx.recv() => match received {
                        Ok(ev) => self.emit(&ev),
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
            self.shutdown().await;
        })
    }

    /// Graceful shutdown: closes all queues and awaits worker completion.
    pub async fn shutdown(self) {
        drop(self.channels);
        for worker in self.workers {
            let _ = worker.await;
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }
}
