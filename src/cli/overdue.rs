//! Intake status command.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Utc};
use color_eyre::Result;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::intake::{IntakeStatus, OverdueEvaluator};
use crate::traits::ReferenceClock;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a scheduled time. Values without an offset are read in the
/// clock's reference timezone.
pub fn parse_schedule(
    raw: &str,
    clock: &dyn ReferenceClock,
) -> Result<DateTime<FixedOffset>, SessionError> {
    let raw = raw.trim();
    if let Ok(scheduled) = DateTime::parse_from_rfc3339(raw) {
        return Ok(scheduled);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| clock.localize(naive))
        .ok_or_else(|| {
            SessionError::invalid_input(format!(
                "Cannot parse '{}' as a time (expected RFC 3339 or YYYY-MM-DDTHH:MM)",
                raw
            ))
        })
}

/// Compact `1h 05m` / `12m` / `40s` rendering.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().abs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", seconds)
    }
}

/// One-line description of an intake status.
pub fn describe_status(status: &IntakeStatus) -> String {
    match status {
        IntakeStatus::Upcoming { starts_in } => format!("upcoming, in {}", format_duration(*starts_in)),
        IntakeStatus::Due { grace_remaining } => {
            format!("due, {} of grace left", format_duration(*grace_remaining))
        }
        IntakeStatus::Overdue { late_by } => {
            format!("overdue by {}", format_duration(*late_by))
        }
    }
}

/// Handle the --overdue command.
pub fn handle_overdue_command(config: &SessionConfig, raw: &str) -> Result<()> {
    let clock = config.reference_clock();
    let scheduled = parse_schedule(raw, clock.as_ref())?;
    let local_offset = clock.offset_at(scheduled.with_timezone(&Utc));
    let evaluator = OverdueEvaluator::new(clock);

    let status = evaluator.status(&scheduled);
    println!(
        "{} ({}): {}",
        scheduled.with_timezone(&local_offset).format("%Y-%m-%d %H:%M %:z"),
        evaluator.period_of(&scheduled),
        describe_status(&status)
    );
    Ok(())
}
