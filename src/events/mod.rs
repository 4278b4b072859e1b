//! # Lifecycle events emitted by a queue.
//!
//! Every operation walks the same state machine, and each transition is
//! published as an [`Event`] on the queue's [`Bus`]:
//!
//! ```text
//! OpScheduled ──► OpWaiting ──┬─► OpStarted ──┬─► OpCompleted
//!                             │               └─► OpFailed
//!                             └─► OpCancelled
//!
//! CancelRequested is published against the *predecessor* when a successor
//! is submitted on a CancelPrevious queue.
//! ```
//!
//! Publishing is fire-and-forget: the queue never blocks on observers, and
//! events are dropped when nobody is subscribed.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
