//! # Event subscribers.
//!
//! Observers plug into a queue's event stream through the [`Subscribe`] trait
//! and the [`SubscriberSet`] fan-out:
//!
//! ```text
//! SerialQueue ── publish(Event) ──► Bus ──► SubscriberSet::listen
//!                                               │ (per-subscriber queue + worker)
//!                                 ┌─────────────┼─────────────┐
//!                                 ▼             ▼             ▼
//!                            sub1.on_event  sub2.on_event  subN.on_event
//! ```
//!
//! Subscribers never slow the queue down: publishing is fire-and-forget, each
//! subscriber has its own bounded queue, and a panicking subscriber is
//! isolated from the rest.

mod set;
mod subscribe;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogWriter;
