//! # SerialQueue: submission-ordered execution of async operations.
//!
//! Each call to [`SerialQueue::execute`] links a new operation behind the one
//! submitted before it. Operation bodies start in strict submission order and
//! never overlap on the same queue, yet submitting never blocks: the chain
//! lives in spawned tasks, and a caller only suspends while awaiting its own
//! outcome.
//!
//! ## Architecture
//! ```text
//! caller A ── execute ──► swap(last) ── spawn ──► [op A task]
//! caller B ── execute ──► swap(last) ── spawn ──► [op B task] ── waits on A
//! caller C ── execute ──► swap(last) ── spawn ──► [op C task] ── waits on B
//!
//! op task:
//!   ├─► CancelPrevious? ──► predecessor.request_cancellation()
//!   ├─► predecessor.await_completion()     (the only framework suspension)
//!   ├─► own token cancelled? ──► Cancelled (body never runs)
//!   └─► action(token) ──► Completed | Failed
//! ```
//!
//! ## Rules
//! - The handle swap is the **single serialization point**: it is guarded by a
//!   mutex held only for the swap itself, never while any operation runs.
//! - A predecessor's outcome is **fully swallowed** at the completion wait; a
//!   failed or cancelled predecessor neither delays nor fails its successor.
//! - Cancellation is **advisory and cooperative**: it is observed before the
//!   body starts, and inside the body only if the action checks its token.
//! - Dropping the future returned by `execute` forwards a cancellation request
//!   into the operation; the chain ordering is unaffected.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

use crate::error::ExecuteError;
use crate::events::{Bus, Event, EventKind};
use crate::policies::CancelPolicy;

use super::config::QueueConfig;
use super::handle::OperationHandle;

/// Executes async operations one at a time, in submission order.
///
/// The queue holds no business data and does no I/O; it is pure coordination.
/// Operations submitted to different queue instances have no ordering
/// relationship.
///
/// Dropping the queue detaches silently: operations already submitted run to
/// their natural terminal state, but nothing waits for them.
///
/// # Example
/// ```
/// use taskserial::SerialQueue;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let queue = SerialQueue::default();
///
///     let value = queue
///         .execute(|_ctx| async move { Ok::<_, std::convert::Infallible>(21 * 2) })
///         .await
///         .unwrap();
///
///     assert_eq!(value, 42);
/// }
/// ```
#[derive(Debug)]
pub struct SerialQueue {
    /// How a new submission treats its in-flight predecessor.
    policy: CancelPolicy,
    /// Lifecycle event channel owned by this queue.
    bus: Bus,
    /// The most recently scheduled operation; replaced on every submission.
    last: Mutex<Option<OperationHandle>>,
    /// Monotonic operation id counter (submission order, starting at 0).
    next_op: AtomicU64,
}

impl SerialQueue {
    /// Creates a queue with the given policy and default bus capacity.
    pub fn new(policy: CancelPolicy) -> Self {
        Self::with_config(QueueConfig {
            policy,
            ..QueueConfig::default()
        })
    }

    /// Creates a queue from a full [`QueueConfig`].
    pub fn with_config(cfg: QueueConfig) -> Self {
        Self {
            policy: cfg.policy,
            bus: Bus::new(cfg.bus_capacity_clamped()),
            last: Mutex::new(None),
            next_op: AtomicU64::new(0),
        }
    }

    /// The policy this queue was constructed with.
    pub fn policy(&self) -> CancelPolicy {
        self.policy
    }

    /// The queue's event bus.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Subscribes to this queue's lifecycle events.
    ///
    /// Shorthand for `queue.bus().subscribe()`.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Submits an operation and returns a future resolving to its outcome.
    ///
    /// Submission happens here, synchronously: the operation is linked behind
    /// the current chain tail and its task is spawned before this function
    /// returns. Call order therefore defines execution order. The returned
    /// future only awaits the outcome; callers that await later (or never)
    /// do not delay the chain.
    ///
    /// The action receives this operation's [`CancellationToken`] so its body
    /// can cooperate with cancellation; bodies that ignore it simply run to
    /// completion once started.
    ///
    /// # Outcome
    /// - `Ok(value)` — the action ran and succeeded.
    /// - `Err(ExecuteError::Action(e))` — the action ran and failed; `e` is
    ///   its own error, passed through unchanged.
    /// - `Err(ExecuteError::Cancelled)` — cancellation was requested before
    ///   the body started, or the caller stopped awaiting the outcome.
    ///
    /// A panicking action resumes its panic on the awaiting caller; the chain
    /// itself is unaffected and the successor starts normally.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime; panics otherwise.
    ///
    /// # Example
    /// ```
    /// use taskserial::{ExecuteError, SerialQueue};
    ///
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() {
    ///     let queue = SerialQueue::default();
    ///
    ///     let ok = queue.execute(|_ctx| async move { Ok::<_, &str>("ready") });
    ///     let failed = queue.execute(|_ctx| async move { Err::<(), _>("boom") });
    ///
    ///     assert_eq!(ok.await.unwrap(), "ready");
    ///     assert_eq!(failed.await, Err(ExecuteError::Action("boom")));
    /// }
    /// ```
    pub fn execute<F, Fut, T, E>(
        &self,
        action: F,
    ) -> impl Future<Output = Result<T, ExecuteError<E>>> + Send + 'static
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let op = self.next_op.fetch_add(1, AtomicOrdering::Relaxed);
        let token = CancellationToken::new();
        let handle = OperationHandle::new(op, token.clone());
        let completion = handle.completion_guard();

        // The single serialization point: take the predecessor, install the
        // new tail. Held only for the swap; a panic cannot occur while the
        // guard is live, so a poisoned lock still holds a well-formed slot.
        let previous = {
            let mut last = match self.last.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            last.replace(handle)
        };

        self.bus.publish(Event::new(EventKind::OpScheduled, op));

        let policy = self.policy;
        let bus = self.bus.clone();
        let run_token = token.clone();
        let join = tokio::spawn(async move {
            // Held for the whole body: every exit path trips the completion
            // latch, so a successor can never wedge behind this operation.
            let _completion = completion;

            if let Some(prev) = &previous {
                if policy == CancelPolicy::CancelPrevious {
                    bus.publish(Event::new(EventKind::CancelRequested, prev.op()));
                    prev.request_cancellation();
                }
            }

            bus.publish(Event::new(EventKind::OpWaiting, op));
            if let Some(prev) = &previous {
                prev.await_completion().await;
            }
            // Release the chain link as soon as the predecessor is terminal.
            drop(previous);

            if run_token.is_cancelled() {
                bus.publish(Event::new(EventKind::OpCancelled, op));
                return Err(ExecuteError::Cancelled);
            }

            bus.publish(Event::new(EventKind::OpStarted, op));
            match action(run_token).await {
                Ok(value) => {
                    bus.publish(Event::new(EventKind::OpCompleted, op));
                    Ok(value)
                }
                Err(err) => {
                    bus.publish(Event::new(EventKind::OpFailed, op));
                    Err(ExecuteError::Action(err))
                }
            }
        });

        // Forwards caller-side cancellation inward: dropping the returned
        // future before the outcome arrives requests cancellation of the
        // operation.
        let forward = token.drop_guard();
        async move {
            let joined = join.await;
            // The operation is terminal; stop forwarding.
            let _ = forward.disarm();
            match joined {
                Ok(outcome) => outcome,
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(_) => Err(ExecuteError::Cancelled),
            }
        }
    }
}

impl Default for SerialQueue {
    /// Returns a queue with [`CancelPolicy::WaitOnPrevious`] and the default
    /// bus capacity.
    fn default() -> Self {
        Self::with_config(QueueConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::time;

    /// True if the two entries for `id` sit next to each other in the log.
    fn are_adjacent(log: &[u32], id: u32) -> bool {
        match log.iter().position(|&x| x == id) {
            Some(i) => log.get(i + 1) == Some(&id),
            None => false,
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_operations_run_in_submission_order_without_interleaving() {
        let queue = SerialQueue::default();
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut outcomes = Vec::new();
        for (id, delay_ms) in [(1u32, 50u64), (2, 20), (3, 5), (4, 1)] {
            let log = Arc::clone(&log);
            outcomes.push(queue.execute(move |_ctx| async move {
                log.lock().unwrap().push(id);
                time::sleep(Duration::from_millis(delay_ms)).await;
                log.lock().unwrap().push(id);
                Ok::<_, Infallible>(id)
            }));
        }

        let results = futures::future::join_all(outcomes).await;
        for (i, result) in results.into_iter().enumerate() {
            assert_eq!(result.unwrap(), i as u32 + 1);
        }

        // Strict submission order, bodies never overlapping: each id's two
        // entries are adjacent and the pairs appear in submission order.
        assert_eq!(*log.lock().unwrap(), vec![1, 1, 2, 2, 3, 3, 4, 4]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reentrant_baseline_interleaves_under_same_timing() {
        // Same timing profile as the serialized test, but raw spawns: the
        // slowest task's entries must be split apart by the faster ones,
        // falsifying "the serialized test passes by accident of timing".
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut joins = Vec::new();
        for (id, delay_ms) in [(1u32, 50u64), (2, 20), (3, 5), (4, 1)] {
            let log = Arc::clone(&log);
            joins.push(tokio::spawn(async move {
                log.lock().unwrap().push(id);
                time::sleep(Duration::from_millis(delay_ms)).await;
                log.lock().unwrap().push(id);
            }));
        }
        for join in joins {
            join.await.unwrap();
        }

        let log = log.lock().unwrap();
        assert!(
            !are_adjacent(&log, 1),
            "expected interleaving without a queue, got {:?}",
            *log
        );
    }

    #[tokio::test]
    async fn test_values_propagate_across_heterogeneous_types() {
        let queue = SerialQueue::default();

        let number = queue.execute(|_ctx| async move { Ok::<_, Infallible>(42u32) });
        let text = queue.execute(|_ctx| async move { Ok::<_, Infallible>(String::from("done")) });

        let (number, text) = tokio::join!(number, text);
        assert_eq!(number.unwrap(), 42);
        assert_eq!(text.unwrap(), "done");
    }

    #[tokio::test]
    async fn test_predecessor_failure_is_invisible_to_successor() {
        let queue = SerialQueue::default();

        let failing = queue.execute(|_ctx| async move { Err::<(), _>("boom") });
        let succeeding = queue.execute(|_ctx| async move { Ok::<_, &str>(7) });

        let (failed, succeeded) = tokio::join!(failing, succeeding);
        assert_eq!(failed, Err(ExecuteError::Action("boom")));
        assert_eq!(succeeded.unwrap(), 7);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_cancel_previous_keeps_only_the_last_submission() {
        let queue = SerialQueue::new(CancelPolicy::CancelPrevious);

        let mut outcomes = Vec::new();
        for id in 0u32..4 {
            outcomes.push(queue.execute(move |ctx| async move {
                tokio::select! {
                    _ = ctx.cancelled() => Err("stopped mid-body"),
                    _ = time::sleep(Duration::from_millis(200)) => Ok(id),
                }
            }));
        }

        let results = futures::future::join_all(outcomes).await;
        let successes: Vec<u32> = results
            .iter()
            .filter_map(|r| r.as_ref().ok().copied())
            .collect();

        // Every submission with a successor is cancelled; only the final one
        // runs its body to completion.
        assert_eq!(successes, vec![3]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_mid_chain_caller_drop_does_not_break_successors() {
        let queue = SerialQueue::default();
        let log = Arc::new(Mutex::new(Vec::new()));

        let record = |id: u32, delay_ms: u64| {
            let log = Arc::clone(&log);
            move |_ctx: CancellationToken| async move {
                log.lock().unwrap().push(id);
                time::sleep(Duration::from_millis(delay_ms)).await;
                log.lock().unwrap().push(id);
                Ok::<_, Infallible>(id)
            }
        };

        let first = queue.execute(record(1, 50));
        let abandoned = queue.execute(record(2, 50));
        let third = queue.execute(record(3, 5));

        // The caller walks away before ever polling: its operation must be
        // cancelled without blocking or corrupting the rest of the chain.
        drop(abandoned);

        let (first, third) = tokio::join!(first, third);
        assert_eq!(first.unwrap(), 1);
        assert_eq!(third.unwrap(), 3);
        assert_eq!(*log.lock().unwrap(), vec![1, 1, 3, 3]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_caller_abort_mid_wait_cancels_operation() {
        let queue = SerialQueue::default();
        let log = Arc::new(Mutex::new(Vec::new()));

        let record = |id: u32, delay_ms: u64| {
            let log = Arc::clone(&log);
            move |_ctx: CancellationToken| async move {
                log.lock().unwrap().push(id);
                time::sleep(Duration::from_millis(delay_ms)).await;
                log.lock().unwrap().push(id);
                Ok::<_, Infallible>(id)
            }
        };

        let first = queue.execute(record(1, 50));
        let aborted = tokio::spawn(queue.execute(record(2, 50)));
        let third = queue.execute(record(3, 5));

        // Let the second operation park on its predecessor, then cancel its
        // caller while it is suspended there.
        time::sleep(Duration::from_millis(10)).await;
        aborted.abort();

        let (first, third) = tokio::join!(first, third);
        assert_eq!(first.unwrap(), 1);
        assert_eq!(third.unwrap(), 3);
        assert_eq!(*log.lock().unwrap(), vec![1, 1, 3, 3]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_independent_queues_do_not_serialize_each_other() {
        let q1 = SerialQueue::default();
        let q2 = SerialQueue::default();
        let log = Arc::new(Mutex::new(Vec::new()));
        let (started_tx, started_rx) = tokio::sync::oneshot::channel::<()>();

        let slow = {
            let log = Arc::clone(&log);
            q1.execute(move |_ctx| async move {
                log.lock().unwrap().push(1u32);
                let _ = started_tx.send(());
                time::sleep(Duration::from_millis(100)).await;
                log.lock().unwrap().push(1);
                Ok::<_, Infallible>(())
            })
        };
        let fast = {
            let log = Arc::clone(&log);
            q2.execute(move |_ctx| async move {
                let _ = started_rx.await;
                log.lock().unwrap().push(2u32);
                log.lock().unwrap().push(2);
                Ok::<_, Infallible>(())
            })
        };

        let (slow, fast) = tokio::join!(slow, fast);
        slow.unwrap();
        fast.unwrap();

        // The second queue's operation ran entirely inside the first queue's
        // operation; the same pair on one queue would have produced 1,1,2,2.
        assert_eq!(*log.lock().unwrap(), vec![1, 2, 2, 1]);
    }

    #[tokio::test]
    async fn test_event_stream_follows_state_machine() {
        let queue = SerialQueue::default();
        let mut rx = queue.subscribe();

        queue
            .execute(|_ctx| async move { Ok::<_, Infallible>(()) })
            .await
            .unwrap();

        let mut kinds = Vec::new();
        let mut seqs = Vec::new();
        for _ in 0..4 {
            let ev = rx.recv().await.unwrap();
            assert_eq!(ev.op, 0);
            kinds.push(ev.kind);
            seqs.push(ev.seq);
        }
        assert_eq!(
            kinds,
            vec![
                EventKind::OpScheduled,
                EventKind::OpWaiting,
                EventKind::OpStarted,
                EventKind::OpCompleted,
            ]
        );
        assert!(seqs.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancel_previous_publishes_cancel_requested_for_predecessor() {
        let queue = SerialQueue::new(CancelPolicy::CancelPrevious);
        let mut rx = queue.subscribe();

        let first = queue.execute(|ctx| async move {
            ctx.cancelled().await;
            Err::<(), _>("stopped")
        });
        let second = queue.execute(|_ctx| async move { Ok::<_, &str>(1) });

        let (_first, second) = tokio::join!(first, second);
        assert_eq!(second.unwrap(), 1);

        let mut saw_cancel_requested = false;
        while let Ok(ev) = rx.try_recv() {
            if ev.kind == EventKind::CancelRequested {
                assert_eq!(ev.op, 0);
                saw_cancel_requested = true;
            }
        }
        assert!(saw_cancel_requested);
    }

    #[tokio::test]
    async fn test_operation_ids_increase_with_submissions() {
        let queue = SerialQueue::default();
        let mut rx = queue.subscribe();

        queue
            .execute(|_ctx| async move { Ok::<_, Infallible>(()) })
            .await
            .unwrap();
        queue
            .execute(|_ctx| async move { Ok::<_, Infallible>(()) })
            .await
            .unwrap();

        let mut scheduled = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            if ev.kind == EventKind::OpScheduled {
                scheduled.push(ev.op);
            }
        }
        assert_eq!(scheduled, vec![0, 1]);
    }
}
