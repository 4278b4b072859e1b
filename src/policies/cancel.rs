//! # Cancellation policy applied to the predecessor of a new submission.
//!
//! [`CancelPolicy`] is fixed at queue construction and evaluated once per
//! operation, right before the operation waits on its predecessor.
//!
//! | Policy | Action on predecessor when successor is submitted |
//! |---|---|
//! | `WaitOnPrevious` | none; just wait for natural completion |
//! | `CancelPrevious` | request cancellation immediately, then still wait for termination |
//!
//! Even under `CancelPrevious` the successor waits for the predecessor's actual
//! termination, not merely for the request to be issued: cancellation is
//! cooperative, and a predecessor that has not yet observed the request may
//! still be running its body.

/// Policy controlling how a new operation treats the one in flight before it.
///
/// # Example
/// ```
/// use taskserial::CancelPolicy;
///
/// let policy = CancelPolicy::default();
/// assert_eq!(policy, CancelPolicy::WaitOnPrevious);
/// assert_eq!(CancelPolicy::CancelPrevious.as_label(), "cancel_previous");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelPolicy {
    /// The predecessor runs to completion (or to its own cancellation) before
    /// the successor's body starts.
    WaitOnPrevious,
    /// The predecessor receives a cancellation request the moment the successor
    /// is submitted; the successor then waits for its actual termination.
    ///
    /// Under rapid resubmission only the latest operation survives to run its
    /// body, which suits "only the latest request matters" workloads.
    CancelPrevious,
}

impl Default for CancelPolicy {
    /// Returns [`CancelPolicy::WaitOnPrevious`].
    fn default() -> Self {
        CancelPolicy::WaitOnPrevious
    }
}

impl CancelPolicy {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            CancelPolicy::WaitOnPrevious => "wait_on_previous",
            CancelPolicy::CancelPrevious => "cancel_previous",
        }
    }
}
