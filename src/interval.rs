//! Parsed PostgreSQL INTERVAL value.

use serde::{Deserialize, Serialize};

/// A PostgreSQL INTERVAL decoded from the server's default text output.
///
/// The value is three magnitudes with separately stored signs:
///
/// - a year count with its own sign flag,
/// - a signed hour total combining months (at 30 days each), days and the
///   hour digits of the time-of-day segment,
/// - the sub-hour remainder (minutes, seconds, fractional seconds) in
///   microseconds, whose sign is the time-of-day segment's sign flag.
///
/// The time segment's sign is kept as a flag rather than folded into the
/// magnitudes because `hours == 0` is sign-ambiguous: `"-00:15:30"` must
/// still read back as negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub(crate) years: u32,
    pub(crate) years_negative: bool,
    pub(crate) hours: i32,
    pub(crate) sub_hour_micros: u32,
    pub(crate) time_negative: bool,
}

impl Interval {
    /// Signed number of years.
    pub fn years(&self) -> i64 {
        if self.years_negative {
            -i64::from(self.years)
        } else {
            i64::from(self.years)
        }
    }

    /// Signed hour total: months and days normalized to hours, plus the hour
    /// digits of the time-of-day segment.
    pub fn hours(&self) -> i32 {
        self.hours
    }

    /// Sub-hour portion (minutes, seconds, fractional seconds) in signed
    /// microseconds. The sign is the time-of-day segment's own sign, which
    /// is preserved even when the hour digits are zero.
    pub fn microseconds(&self) -> i64 {
        if self.time_negative {
            -i64::from(self.sub_hour_micros)
        } else {
            i64::from(self.sub_hour_micros)
        }
    }

    /// Whether the years component carried a minus sign.
    pub fn is_years_negative(&self) -> bool {
        self.years_negative
    }

    /// Whether the time-of-day segment carried a minus sign.
    pub fn is_time_negative(&self) -> bool {
        self.time_negative
    }
}
