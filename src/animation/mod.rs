//! Timing primitives: easing, the fixed-step frame scheduler and the scroll throttle.

/// Easing curves.
pub mod ease;
/// Fixed-step accumulator scheduler.
pub mod scheduler;
/// Leading-edge rate limiter.
pub mod throttle;
