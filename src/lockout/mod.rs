//! Lockout countdown.
//!
//! After too many failed unlock attempts the UI shows how long until the
//! next try is allowed. The value is recomputed from the absolute end time
//! on every tick, so a slow or skipped tick never drifts the countdown.

mod timer;

pub use timer::{remaining_seconds, LockoutTimer, LOCKOUT_DURATION, TICK_INTERVAL};
