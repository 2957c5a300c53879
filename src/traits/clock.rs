//! Reference clock abstraction.
//!
//! Overdue and lockout computations must agree across devices, so they
//! read "now" from a single canonical timezone instead of the device
//! locale.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// Source of the canonical, timezone-anchored current time.
pub trait ReferenceClock: Send + Sync {
    /// Current time expressed in the reference timezone.
    fn now(&self) -> DateTime<FixedOffset>;

    /// The reference timezone offset in effect now.
    fn offset(&self) -> FixedOffset {
        *self.now().offset()
    }

    /// The reference timezone offset in effect at `instant`. Differs from
    /// [`offset`](Self::offset) across a daylight-saving change.
    fn offset_at(&self, _instant: DateTime<Utc>) -> FixedOffset {
        self.offset()
    }

    /// Read a wall-clock time in the reference timezone. `None` when the
    /// time does not exist there (skipped by a forward DST change).
    fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        naive.and_local_timezone(self.offset()).single()
    }

    /// Current time as UTC.
    fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }
}
