//! Overdue evaluation against the reference clock.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Timelike, Utc};
use std::sync::Arc;

use super::tolerance::{DayPeriod, ToleranceTable};
use crate::traits::ReferenceClock;

/// Where a scheduled intake stands relative to the reference "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeStatus {
    /// Scheduled in the future.
    Upcoming { starts_in: Duration },
    /// Past its time but within tolerance.
    Due { grace_remaining: Duration },
    /// Tolerance exceeded.
    Overdue { late_by: Duration },
}

impl IntakeStatus {
    pub fn is_overdue(&self) -> bool {
        matches!(self, IntakeStatus::Overdue { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntakeStatus::Upcoming { .. } => "upcoming",
            IntakeStatus::Due { .. } => "due",
            IntakeStatus::Overdue { .. } => "overdue",
        }
    }
}

/// Decides whether scheduled intakes are overdue.
///
/// Both "now" and the scheduled hour-of-day are read in the clock's
/// reference offset, so two devices in different timezones always agree.
#[derive(Clone)]
pub struct OverdueEvaluator {
    clock: Arc<dyn ReferenceClock>,
    table: ToleranceTable,
}

impl OverdueEvaluator {
    pub fn new(clock: Arc<dyn ReferenceClock>) -> Self {
        Self {
            clock,
            table: ToleranceTable::default(),
        }
    }

    pub fn with_table(mut self, table: ToleranceTable) -> Self {
        self.table = table;
        self
    }

    pub fn table(&self) -> &ToleranceTable {
        &self.table
    }

    /// The bucket of `scheduled`, by its hour in the reference timezone
    /// on that date.
    pub fn period_of<Tz: TimeZone>(&self, scheduled: &DateTime<Tz>) -> DayPeriod {
        let instant = scheduled.with_timezone(&Utc);
        let local = instant.with_timezone(&self.clock.offset_at(instant));
        DayPeriod::from_hour(local.hour())
    }

    /// True iff the time since `scheduled` strictly exceeds its period's
    /// tolerance. Future schedules are never overdue.
    pub fn is_overdue<Tz: TimeZone>(&self, scheduled: &DateTime<Tz>) -> bool {
        self.status(scheduled).is_overdue()
    }

    /// [`is_overdue`](Self::is_overdue) for a wall-clock time without an
    /// offset, read in the reference timezone.
    pub fn is_overdue_naive(&self, scheduled: NaiveDateTime) -> bool {
        self.clock
            .localize(scheduled)
            .is_some_and(|scheduled| self.is_overdue(&scheduled))
    }

    pub fn status<Tz: TimeZone>(&self, scheduled: &DateTime<Tz>) -> IntakeStatus {
        let now = self.clock.now();
        let elapsed = now.signed_duration_since(scheduled.clone());
        let tolerance = self.table.tolerance_for(self.period_of(scheduled));

        if elapsed < Duration::zero() {
            IntakeStatus::Upcoming { starts_in: -elapsed }
        } else if elapsed > tolerance {
            IntakeStatus::Overdue {
                late_by: elapsed - tolerance,
            }
        } else {
            IntakeStatus::Due {
                grace_remaining: tolerance - elapsed,
            }
        }
    }
}

impl std::fmt::Debug for OverdueEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverdueEvaluator")
            .field("offset", &self.clock.offset())
            .field("table", &self.table)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::ManualClock;
    use chrono::{FixedOffset, NaiveDate};

    fn evaluator(now: &str) -> OverdueEvaluator {
        OverdueEvaluator::new(Arc::new(ManualClock::at(now)))
    }

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn test_within_tolerance_is_not_overdue() {
        let scheduled = at("2024-03-01T08:00:00Z");
        assert!(!evaluator("2024-03-01T08:30:00Z").is_overdue(&scheduled));
        assert!(!evaluator("2024-03-01T09:00:00Z").is_overdue(&scheduled));
    }

    #[test]
    fn test_past_tolerance_is_overdue() {
        let scheduled = at("2024-03-01T08:00:00Z");
        assert!(evaluator("2024-03-01T09:00:01Z").is_overdue(&scheduled));
        assert!(evaluator("2024-03-01T09:01:00Z").is_overdue(&scheduled));
        assert!(evaluator("2024-03-01T09:30:00Z").is_overdue(&scheduled));
    }

    #[test]
    fn test_future_schedule_is_not_overdue() {
        let eval = evaluator("2024-03-01T08:00:00Z");
        let scheduled = at("2024-03-01T20:00:00Z");
        assert!(!eval.is_overdue(&scheduled));
        assert_eq!(
            eval.status(&scheduled),
            IntakeStatus::Upcoming {
                starts_in: Duration::hours(12)
            }
        );
    }

    #[test]
    fn test_bucket_edges_use_their_own_tolerance() {
        let table = ToleranceTable::default()
            .with_tolerance(DayPeriod::Morning, Duration::minutes(30))
            .with_tolerance(DayPeriod::Afternoon, Duration::hours(2));
        let eval = evaluator("2024-03-01T13:00:00Z").with_table(table);

        // 11:59 is morning: 61 minutes late against a 30 minute tolerance
        let late_morning = at("2024-03-01T11:59:00Z");
        assert_eq!(eval.period_of(&late_morning), DayPeriod::Morning);
        assert!(eval.is_overdue(&late_morning));

        // 12:00 is afternoon: 60 minutes late against a 2 hour tolerance
        let noon = at("2024-03-01T12:00:00Z");
        assert_eq!(eval.period_of(&noon), DayPeriod::Afternoon);
        assert!(!eval.is_overdue(&noon));
    }

    #[test]
    fn test_status_reports_grace_and_lateness() {
        let scheduled = at("2024-03-01T08:00:00Z");

        assert_eq!(
            evaluator("2024-03-01T08:20:00Z").status(&scheduled),
            IntakeStatus::Due {
                grace_remaining: Duration::minutes(40)
            }
        );
        assert_eq!(
            evaluator("2024-03-01T09:30:00Z").status(&scheduled),
            IntakeStatus::Overdue {
                late_by: Duration::minutes(30)
            }
        );
    }

    #[test]
    fn test_result_does_not_depend_on_input_offset() {
        // Same instant, written in three offsets
        let eval = evaluator("2024-03-01T09:30:00+01:00");
        for scheduled in [
            "2024-03-01T08:00:00+01:00",
            "2024-03-01T07:00:00Z",
            "2024-03-01T02:00:00-05:00",
        ] {
            assert!(eval.is_overdue(&at(scheduled)), "{}", scheduled);
            assert_eq!(eval.period_of(&at(scheduled)), DayPeriod::Morning);
        }
    }

    #[test]
    fn test_bucket_uses_reference_hour_not_input_hour() {
        // 05:30 in New York is 11:30 in the reference offset (+01:00): morning
        let eval = evaluator("2024-03-01T12:00:00+01:00");
        let scheduled = at("2024-03-01T05:30:00-05:00");
        assert_eq!(eval.period_of(&scheduled), DayPeriod::Morning);
    }

    #[test]
    fn test_naive_schedule_is_read_in_reference_offset() {
        let eval = evaluator("2024-03-01T09:30:00+02:00");
        let eight = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let nine = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        assert!(eval.is_overdue_naive(eight));
        assert!(!eval.is_overdue_naive(nine));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(
            IntakeStatus::Due {
                grace_remaining: Duration::zero()
            }
            .label(),
            "due"
        );
        assert!(IntakeStatus::Overdue {
            late_by: Duration::seconds(1)
        }
        .is_overdue());
    }
}
