//! # Type-erased view of one scheduled operation.
//!
//! The queue must hold "the most recently scheduled operation" across calls
//! whose result types differ, so [`OperationHandle`] exposes exactly the two
//! capabilities the chain needs and nothing about the operation's `(T, E)`:
//!
//! - [`OperationHandle::await_completion`] — suspend until the operation has
//!   reached *any* terminal state (completed, failed, or cancelled). Never
//!   fails; the outcome value is discarded. This is a synchronization signal,
//!   not a value channel.
//! - [`OperationHandle::request_cancellation`] — idempotent, non-blocking,
//!   advisory.
//!
//! Both are built on [`CancellationToken`]: one token carries the cancellation
//! request into the operation's task, the other acts as a one-shot completion
//! latch tripped by a [`DropGuard`] the task holds for its entire body. Every
//! exit path (success, failure, cancellation, even a panic) drops the guard
//! and releases waiters, so a successor can never wedge behind a dead
//! predecessor.

use tokio_util::sync::{CancellationToken, DropGuard};

/// Completion/cancellation capabilities of one queued operation.
///
/// Cloning is cheap (both tokens are `Arc`-backed); all clones observe the
/// same operation.
#[derive(Clone, Debug)]
pub(crate) struct OperationHandle {
    /// Queue-local operation id, used for event reporting.
    op: u64,
    /// Cancellation request channel into the operation's task.
    cancel: CancellationToken,
    /// Completion latch: "cancelled" here means "reached a terminal state".
    done: CancellationToken,
}

impl OperationHandle {
    /// Creates the handle for a new operation around its cancellation token.
    pub(crate) fn new(op: u64, cancel: CancellationToken) -> Self {
        Self {
            op,
            cancel,
            done: CancellationToken::new(),
        }
    }

    /// The operation id this handle refers to.
    pub(crate) fn op(&self) -> u64 {
        self.op
    }

    /// Requests cooperative cancellation of the operation.
    ///
    /// Safe to call any number of times, including after the operation has
    /// already terminated; late or repeated requests are no-ops.
    pub(crate) fn request_cancellation(&self) {
        self.cancel.cancel();
    }

    /// Suspends until the operation reaches a terminal state.
    ///
    /// Returns immediately if it already has. The operation's outcome (value,
    /// error, or cancellation) is not observable through the handle.
    pub(crate) async fn await_completion(&self) {
        self.done.cancelled().await;
    }

    /// Arms the completion latch.
    ///
    /// The operation's task must hold the returned guard for its whole body:
    /// dropping it, on any exit path, releases everyone blocked in
    /// [`await_completion`](Self::await_completion).
    pub(crate) fn completion_guard(&self) -> DropGuard {
        self.done.clone().drop_guard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time;

    #[tokio::test]
    async fn test_completion_fires_when_guard_drops() {
        let handle = OperationHandle::new(0, CancellationToken::new());
        let guard = handle.completion_guard();

        let waiter = {
            let handle = handle.clone();
            tokio::spawn(async move { handle.await_completion().await })
        };

        time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_await_completion_after_terminal_state_returns_immediately() {
        let handle = OperationHandle::new(0, CancellationToken::new());
        drop(handle.completion_guard());
        handle.await_completion().await;
        handle.await_completion().await;
    }

    #[tokio::test]
    async fn test_request_cancellation_is_idempotent() {
        let token = CancellationToken::new();
        let handle = OperationHandle::new(0, token.clone());

        handle.request_cancellation();
        handle.request_cancellation();
        assert!(token.is_cancelled());

        // Still a no-op on an operation that already terminated.
        drop(handle.completion_guard());
        handle.request_cancellation();
    }

    #[tokio::test]
    async fn test_multiple_waiters_are_all_released() {
        let handle = OperationHandle::new(0, CancellationToken::new());
        let guard = handle.completion_guard();

        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let handle = handle.clone();
                tokio::spawn(async move { handle.await_completion().await })
            })
            .collect();

        drop(guard);
        for w in waiters {
            w.await.unwrap();
        }
    }
}
