//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints queue events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [scheduled] op=3
//! [cancel-requested] op=2
//! [waiting] op=3
//! [started] op=3
//! [completed] op=3
//! [failed] op=4
//! [cancelled] op=5
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Stdout logging subscriber.
///
/// Enabled via the `logging` feature; intended for development and demos.
/// Implement a custom [`Subscribe`] for structured logging or metrics.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, event: &Event) {
        let tag = match event.kind {
            EventKind::OpScheduled => "scheduled",
            EventKind::CancelRequested => "cancel-requested",
            EventKind::OpWaiting => "waiting",
            EventKind::OpStarted => "started",
            EventKind::OpCompleted => "completed",
            EventKind::OpFailed => "failed",
            EventKind::OpCancelled => "cancelled",
        };
        println!("[{tag}] op={}", event.op);
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
