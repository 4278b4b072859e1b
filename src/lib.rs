//! # taskserial
//!
//! **taskserial** serializes asynchronous operations: everything submitted to
//! one [`SerialQueue`] begins execution one at a time, in submission order,
//! without ever blocking a worker thread while waiting.
//!
//! Use it to make an otherwise-reentrant async object behave as if every
//! operation routed through the queue ran under a single mutual-exclusion
//! lock. A typical case: a struct whose methods suspend mid-body (awaiting
//! I/O or another service) and must not interleave with each other.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  caller 1          caller 2          caller N
//!     │ execute(a)      │ execute(b)      │ execute(c)
//!     ▼                 ▼                 ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  SerialQueue                                              │
//! │  - CancelPolicy (WaitOnPrevious / CancelPrevious)         │
//! │  - last operation slot (the single serialization point)   │
//! │  - Bus (lifecycle events)                                 │
//! └──────┬──────────────────┬──────────────────┬──────────────┘
//!        ▼                  ▼                  ▼
//!   [op a task] ◄─waits── [op b task] ◄─waits── [op c task]
//!        │                  │                  │
//!        └── publishes ─────┴── publishes ─────┘
//!                           ▼
//!                    Bus ──► SubscriberSet ──► LogWriter / custom
//! ```
//!
//! ### Operation lifecycle
//! ```text
//! execute(action)
//!   ├─► swap the queue's last-operation handle   (synchronous, linearizable)
//!   ├─► spawn the operation task:
//!   │     ├─► CancelPrevious? ─► request predecessor's cancellation
//!   │     ├─► await predecessor's completion     (outcome swallowed)
//!   │     ├─► own cancellation requested? ─► Cancelled, body never runs
//!   │     └─► run action(token) ─► Completed | Failed
//!   └─► return a future that awaits the outcome
//!         └─► dropping it forwards cancellation into the operation
//! ```
//!
//! ## Features
//! | Area          | Description                                              | Key types                        |
//! |---------------|----------------------------------------------------------|----------------------------------|
//! | **Queue**     | Submission-ordered, non-overlapping execution.           | [`SerialQueue`], [`QueueConfig`] |
//! | **Policies**  | What a new submission does to its in-flight predecessor. | [`CancelPolicy`]                 |
//! | **Errors**    | Action failures passed through; cancellation surfaced.   | [`ExecuteError`]                 |
//! | **Events**    | Per-operation state machine, broadcast fire-and-forget.  | [`Event`], [`EventKind`], [`Bus`]|
//! | **Observers** | Pluggable, isolated, non-blocking event handlers.        | [`Subscribe`], [`SubscriberSet`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use taskserial::SerialQueue;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let queue = SerialQueue::default();
//!     let log = Arc::new(Mutex::new(Vec::new()));
//!
//!     // Submitted concurrently, executed one at a time, in order.
//!     let first = {
//!         let log = Arc::clone(&log);
//!         queue.execute(move |_ctx| async move {
//!             log.lock().unwrap().push("first");
//!             Ok::<_, std::convert::Infallible>(1)
//!         })
//!     };
//!     let second = {
//!         let log = Arc::clone(&log);
//!         queue.execute(move |_ctx| async move {
//!             log.lock().unwrap().push("second");
//!             Ok::<_, std::convert::Infallible>(2)
//!         })
//!     };
//!
//!     let (a, b) = tokio::join!(first, second);
//!     assert_eq!(a.unwrap(), 1);
//!     assert_eq!(b.unwrap(), 2);
//!     assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
//! }
//! ```

mod error;
mod events;
mod policies;
mod queue;
mod subscribers;

// ---- Public re-exports ----

pub use error::ExecuteError;
pub use events::{Bus, Event, EventKind};
pub use policies::CancelPolicy;
pub use queue::{QueueConfig, SerialQueue};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
