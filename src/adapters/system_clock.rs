//! Wall-clock [`ReferenceClock`]s: one pinned to a fixed UTC offset, one
//! following an IANA timezone through its daylight-saving changes.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::traits::ReferenceClock;

/// Reads the system clock and expresses it in one configured offset,
/// ignoring the device locale entirely.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetClock {
    offset: FixedOffset,
}

impl FixedOffsetClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(utc_offset())
    }
}

impl Default for FixedOffsetClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl ReferenceClock for FixedOffsetClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Reads the system clock in a named timezone.
///
/// The offset is resolved per instant, so a 08:00 dose in `Europe/Paris`
/// stays a morning dose in both winter (+01:00) and summer (+02:00).
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock {
    zone: Tz,
}

impl ZonedClock {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }
}

impl ReferenceClock for ZonedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Utc::now();
        now.with_timezone(&self.offset_at(now))
    }

    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        self.zone.offset_from_utc_datetime(&instant.naive_utc()).fix()
    }

    /// Ambiguous times (repeated by a backward DST change) resolve to the
    /// earlier instant.
    fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        self.zone
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&local.offset().fix()))
    }
}

/// Parse an IANA timezone name such as `Europe/Paris`.
pub fn parse_zone(raw: &str) -> Option<Tz> {
    raw.trim().parse().ok()
}

/// The zero offset.
pub(crate) fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Parse `+HH:MM`, `-HH:MM`, `+HHMM` or `Z`.
pub fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Some(utc_offset());
    }

    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
