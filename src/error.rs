//! Error type surfaced by [`SerialQueue::execute`](crate::SerialQueue::execute).
//!
//! The queue itself is purely a sequencer, so only two kinds of failure can
//! reach a caller:
//!
//! - [`ExecuteError::Action`] — the failure produced by the caller's own action,
//!   passed through unchanged.
//! - [`ExecuteError::Cancelled`] — the operation was cancelled before its body
//!   ran, or the caller stopped awaiting the outcome.
//!
//! A predecessor's failure is never visible here: each `execute` call observes
//! only its own action and its own cancellation history.

use std::fmt;

use thiserror::Error;

/// # Outcome errors for a single queued operation.
///
/// `E` is the error type of the caller's action for that specific call; it may
/// differ between calls on the same queue.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecuteError<E> {
    /// The operation was cancelled before it produced an outcome.
    ///
    /// Raised either because cancellation was requested before the action body
    /// started (e.g. a successor under
    /// [`CancelPolicy::CancelPrevious`](crate::CancelPolicy::CancelPrevious)),
    /// or because the caller stopped awaiting the result.
    #[error("operation cancelled before it could complete")]
    Cancelled,

    /// The action ran and failed with its own error.
    #[error("action failed: {0}")]
    Action(E),
}

impl<E> ExecuteError<E> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskserial::ExecuteError;
    ///
    /// let err: ExecuteError<&str> = ExecuteError::Cancelled;
    /// assert_eq!(err.as_label(), "op_cancelled");
    ///
    /// let err = ExecuteError::Action("boom");
    /// assert_eq!(err.as_label(), "op_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ExecuteError::Cancelled => "op_cancelled",
            ExecuteError::Action(_) => "op_failed",
        }
    }

    /// Returns `true` if the operation never ran to an outcome.
    ///
    /// # Example
    /// ```
    /// use taskserial::ExecuteError;
    ///
    /// assert!(ExecuteError::<&str>::Cancelled.is_cancelled());
    /// assert!(!ExecuteError::Action("boom").is_cancelled());
    /// ```
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExecuteError::Cancelled)
    }

    /// Extracts the action's own error, if there is one.
    ///
    /// # Example
    /// ```
    /// use taskserial::ExecuteError;
    ///
    /// assert_eq!(ExecuteError::Action("boom").into_action(), Some("boom"));
    /// assert_eq!(ExecuteError::<&str>::Cancelled.into_action(), None);
    /// ```
    pub fn into_action(self) -> Option<E> {
        match self {
            ExecuteError::Cancelled => None,
            ExecuteError::Action(e) => Some(e),
        }
    }
}

impl<E: fmt::Display> ExecuteError<E> {
    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ExecuteError::Cancelled => "cancelled".to_string(),
            ExecuteError::Action(e) => format!("error: {e}"),
        }
    }
}
