//! Time-of-day buckets and their tolerances.

use chrono::Duration;
use std::fmt;

/// Part of the day a scheduled intake falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    /// [06:00, 12:00)
    Morning,
    /// [12:00, 18:00)
    Afternoon,
    /// Everything else, wrapping midnight
    Evening,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 3] = [DayPeriod::Morning, DayPeriod::Afternoon, DayPeriod::Evening];

    /// Bucket an hour of day (0..=23). Hours outside the morning and
    /// afternoon ranges are evening.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => DayPeriod::Morning,
            12..=17 => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        }
    }

    /// Start hour (inclusive) and end hour (exclusive). Evening wraps.
    pub fn hours(&self) -> (u32, u32) {
        match self {
            DayPeriod::Morning => (6, 12),
            DayPeriod::Afternoon => (12, 18),
            DayPeriod::Evening => (18, 6),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the tolerance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToleranceWindow {
    pub period: DayPeriod,
    pub start_hour: u32,
    pub end_hour: u32,
    pub tolerance: Duration,
}

/// How late an intake may be, per period, before it counts as overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToleranceTable {
    morning: Duration,
    afternoon: Duration,
    evening: Duration,
}

impl Default for ToleranceTable {
    fn default() -> Self {
        Self::uniform(Duration::hours(1))
    }
}

impl ToleranceTable {
    /// The same tolerance for every period.
    pub fn uniform(tolerance: Duration) -> Self {
        Self {
            morning: tolerance,
            afternoon: tolerance,
            evening: tolerance,
        }
    }

    /// Override one period. Negative values are clamped to zero.
    pub fn with_tolerance(mut self, period: DayPeriod, tolerance: Duration) -> Self {
        let tolerance = tolerance.max(Duration::zero());
        match period {
            DayPeriod::Morning => self.morning = tolerance,
            DayPeriod::Afternoon => self.afternoon = tolerance,
            DayPeriod::Evening => self.evening = tolerance,
        }
        self
    }

    pub fn tolerance_for(&self, period: DayPeriod) -> Duration {
        match period {
            DayPeriod::Morning => self.morning,
            DayPeriod::Afternoon => self.afternoon,
            DayPeriod::Evening => self.evening,
        }
    }

    pub fn window(&self, period: DayPeriod) -> ToleranceWindow {
        let (start_hour, end_hour) = period.hours();
        ToleranceWindow {
            period,
            start_hour,
            end_hour,
            tolerance: self.tolerance_for(period),
        }
    }

    pub fn windows(&self) -> [ToleranceWindow; 3] {
        DayPeriod::ALL.map(|period| self.window(period))
    }
}
