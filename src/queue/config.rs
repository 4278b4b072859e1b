//! # Queue construction settings.
//!
//! [`QueueConfig`] bundles the two knobs a [`SerialQueue`](crate::SerialQueue)
//! is built with: the predecessor [`CancelPolicy`] and the event-bus capacity.
//!
//! ## Sentinel values
//! - `bus_capacity` is clamped to a minimum of 1 by
//!   [`QueueConfig::bus_capacity_clamped`]; the bus cannot be constructed with
//!   a zero-sized ring buffer.

use crate::policies::CancelPolicy;

/// Construction-time configuration for a queue.
///
/// # Example
/// ```
/// use taskserial::{CancelPolicy, QueueConfig, SerialQueue};
///
/// let cfg = QueueConfig {
///     policy: CancelPolicy::CancelPrevious,
///     bus_capacity: 64,
/// };
/// let queue = SerialQueue::with_config(cfg);
/// assert_eq!(queue.policy(), CancelPolicy::CancelPrevious);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct QueueConfig {
    /// How a new submission treats its in-flight predecessor.
    pub policy: CancelPolicy,

    /// Capacity of the event bus ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` events
    /// observe `Lagged` and skip the oldest items. Minimum value is 1.
    pub bus_capacity: usize,
}

impl QueueConfig {
    /// Returns the bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for QueueConfig {
    /// Default configuration:
    ///
    /// - `policy = CancelPolicy::WaitOnPrevious`
    /// - `bus_capacity = 256`
    fn default() -> Self {
        Self {
            policy: CancelPolicy::default(),
            bus_capacity: 256,
        }
    }
}
