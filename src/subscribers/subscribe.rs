//! # Subscriber trait.
//!
//! `Subscribe` is the extension point for reacting to queue lifecycle events:
//! logging, metrics, progress reporting. Each subscriber is driven by its own
//! worker loop fed from a bounded queue owned by the
//! [`SubscriberSet`](crate::SubscriberSet).
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching); they never block the queue
//!   or other subscribers.
//! - Each subscriber declares its queue capacity via
//!   [`Subscribe::queue_capacity`]; on overflow, events for that subscriber
//!   are dropped with a warning.

use async_trait::async_trait;

use crate::events::Event;

/// Contract for queue-event observers.
///
/// Called from a subscriber-dedicated worker task; prefer async I/O and
/// cooperative waits over blocking the runtime.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use taskserial::{Event, EventKind, Subscribe};
///
/// struct FailureCounter;
///
/// #[async_trait]
/// impl Subscribe for FailureCounter {
///     async fn on_event(&self, event: &Event) {
///         if event.kind == EventKind::OpFailed {
///             // increment a counter...
///         }
///     }
///
///     fn name(&self) -> &'static str {
///         "failure-counter"
///     }
/// }
/// ```
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles a single event.
    async fn on_event(&self, event: &Event);

    /// Human-readable name, used in warnings about this subscriber.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Capacity of this subscriber's queue (events beyond it are dropped).
    fn queue_capacity(&self) -> usize {
        1024
    }
}
