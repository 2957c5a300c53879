//! Controllable reference clocks for testing.

use chrono::{DateTime, Duration, FixedOffset};
use std::sync::{Arc, Mutex};

use crate::traits::ReferenceClock;

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<FixedOffset>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Parse an RFC 3339 timestamp; panics on bad input (tests only).
    pub fn at(rfc3339: &str) -> Self {
        Self::new(DateTime::parse_from_rfc3339(rfc3339).unwrap())
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl ReferenceClock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap()
    }
}

/// A wall clock driven by `tokio::time`, so paused-time tests that call
/// `tokio::time::advance` move it too.
#[derive(Debug, Clone)]
pub struct InstantClock {
    base: DateTime<FixedOffset>,
    started: tokio::time::Instant,
}

impl InstantClock {
    pub fn new(base: DateTime<FixedOffset>) -> Self {
        Self {
            base,
            started: tokio::time::Instant::now(),
        }
    }
}

impl ReferenceClock for InstantClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let elapsed = tokio::time::Instant::now().duration_since(self.started);
        // Test runs never approach chrono's range limits
        self.base + Duration::from_std(elapsed).unwrap_or_else(|_| Duration::zero())
    }
}
