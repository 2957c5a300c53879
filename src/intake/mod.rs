//! Intake overdue evaluation.
//!
//! A scheduled intake is bucketed by its hour of day into morning
//! `[6, 12)`, afternoon `[12, 18)` or evening (everything else). It is
//! overdue once the time since it was scheduled strictly exceeds its
//! bucket's tolerance.

mod overdue;
mod tolerance;

pub use overdue::{IntakeStatus, OverdueEvaluator};
pub use tolerance::{DayPeriod, ToleranceTable, ToleranceWindow};
