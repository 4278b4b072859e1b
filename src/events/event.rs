//! # Event records for the per-operation state machine.
//!
//! [`EventKind`] classifies the transition; [`Event`] carries the operation id,
//! a wall-clock timestamp, and a globally monotonic sequence number.
//!
//! ## Ordering guarantees
//! `seq` increases monotonically across all queues in the process. Use it to
//! restore the exact publish order if events are observed out of order.
//!
//! ## Example
//! ```rust
//! use taskserial::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::OpStarted, 7);
//! assert_eq!(ev.kind, EventKind::OpStarted);
//! assert_eq!(ev.op, 7);
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of operation lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Operation accepted and linked behind its predecessor.
    ///
    /// Published synchronously inside `execute`, before the operation's task
    /// has run. Sets: `op`, `at`, `seq`.
    OpScheduled,

    /// A successor asked this operation to stop.
    ///
    /// Only published on `CancelPrevious` queues; `op` names the
    /// *predecessor* receiving the request. Sets: `op`, `at`, `seq`.
    CancelRequested,

    /// Operation is waiting for its predecessor to reach a terminal state.
    ///
    /// Published even for the first operation on a queue, whose wait is a
    /// no-op. Sets: `op`, `at`, `seq`.
    OpWaiting,

    /// The predecessor terminated and the operation's body is starting.
    ///
    /// Sets: `op`, `at`, `seq`.
    OpStarted,

    /// The body finished successfully. Terminal. Sets: `op`, `at`, `seq`.
    OpCompleted,

    /// The body ran and returned an error. Terminal. Sets: `op`, `at`, `seq`.
    OpFailed,

    /// The operation was cancelled before its body started. Terminal.
    ///
    /// Sets: `op`, `at`, `seq`.
    OpCancelled,
}

/// One lifecycle transition of one operation.
#[derive(Debug, Clone)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Queue-local operation id (assigned in submission order, starting at 0).
    pub op: u64,
    /// Wall-clock timestamp taken at publish time.
    pub at: SystemTime,
    /// Globally monotonic sequence number.
    pub seq: u64,
}

impl Event {
    /// Creates an event stamped with the current time and the next global
    /// sequence number.
    pub fn new(kind: EventKind, op: u64) -> Self {
        Self {
            kind,
            op,
            at: SystemTime::now(),
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_are_monotonic() {
        let a = Event::new(EventKind::OpScheduled, 0);
        let b = Event::new(EventKind::OpWaiting, 0);
        let c = Event::new(EventKind::OpStarted, 0);
        assert!(a.seq < b.seq);
        assert!(b.seq < c.seq);
    }

    #[test]
    fn test_event_carries_operation_id() {
        let ev = Event::new(EventKind::OpCompleted, 9);
        assert_eq!(ev.op, 9);
        assert_eq!(ev.kind, EventKind::OpCompleted);
    }
}
