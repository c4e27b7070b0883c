//! Ports - seams to the outside world.
//!
//! The classifier is pure apart from reading the current time, so the clock
//! is the only port.

pub mod clock;

pub use self::clock::{Clock, FixedClock, SystemClock};
