//! Predecessor-handling policy.
//!
//! A queue is constructed with one [`CancelPolicy`] that governs what a newly
//! submitted operation does about the operation in flight before it:
//!
//! - [`CancelPolicy::WaitOnPrevious`] lets the predecessor finish naturally (default);
//! - [`CancelPolicy::CancelPrevious`] requests the predecessor's cancellation first,
//!   then still waits for it to actually terminate.

mod cancel;

pub use cancel::CancelPolicy;
