//! Civil date/time fields and UTC-to-local conversion.
//!
//! A "civil" time is the calendar/clock fields (year, month, day, hour,
//! minute, second), as opposed to an absolute instant. The feeder schedule
//! is expressed in local civil time, while the synchronized wall clock
//! reports UTC, so the conversion here is the bridge between the two.
//!
//! The conversion goes through epoch seconds using the standard
//! days-from-civil calendar algorithm (proleptic Gregorian), so offsets
//! that cross a midnight or a month boundary roll the date correctly.
//!
//! # Zone rule
//!
//! [`ZoneRule`] approximates daylight saving by UTC calendar month: months
//! March through November use the daylight offset, the rest use the
//! standard offset. Real DST transitions happen mid-March and early
//! November, so the rule is wrong by up to a couple of weeks at each end.
//! This is a deliberate simplification: the feed time only needs to land
//! within the right hour, and a month-granularity rule keeps the
//! conversion a pure function of the UTC fields.

use core::fmt;

/// A calendar date (year, month, day).
///
/// Used by the feeding ledger to detect a calendar-date change, which is
/// what arms the once-per-day guard again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CivilDate {
    /// Calendar year.
    pub year: i32,
    /// Month (1-12).
    pub month: u8,
    /// Day of month (1-31).
    pub day: u8,
}

/// Civil date and time fields.
///
/// # Example
///
/// ```rust
/// use rs_feedz::civil::CivilDateTime;
///
/// let t = CivilDateTime::new(2024, 6, 15, 22, 47, 0);
/// assert_eq!(t.date().day, 15);
/// assert_eq!(t.hour, 22);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CivilDateTime {
    /// Calendar year.
    pub year: i32,
    /// Month (1-12).
    pub month: u8,
    /// Day of month (1-31).
    pub day: u8,
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
    /// Second (0-59).
    pub second: u8,
}

/// Days between 0000-03-01 and 1970-01-01 in the civil calendar.
const UNIX_EPOCH_DAYS: i64 = 719_468;

/// Days per 400-year Gregorian era.
const DAYS_PER_ERA: i64 = 146_097;

/// Serial day number for a civil date (days since 1970-01-01, negative
/// before). Standard era-based Gregorian arithmetic.
fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let m = i64::from(month);
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_ERA + doe - UNIX_EPOCH_DAYS
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + UNIX_EPOCH_DAYS;
    let era = (if z >= 0 { z } else { z - (DAYS_PER_ERA - 1) }) / DAYS_PER_ERA;
    let doe = z - era * DAYS_PER_ERA;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    ((y + i64::from(month <= 2)) as i32, month, day)
}

impl CivilDateTime {
    /// Creates a civil date-time from its fields.
    ///
    /// Fields are taken as-is; out-of-range values produce nonsense epoch
    /// conversions rather than panics.
    pub const fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Returns the calendar-date part.
    #[inline]
    pub const fn date(&self) -> CivilDate {
        CivilDate {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }

    /// Converts to seconds since the Unix epoch, treating the fields as UTC.
    pub fn to_unix_secs(&self) -> i64 {
        days_from_civil(self.year, self.month, self.day) * 86_400
            + i64::from(self.hour) * 3_600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    /// Converts seconds since the Unix epoch back to civil fields (UTC).
    pub fn from_unix_secs(secs: i64) -> Self {
        let days = secs.div_euclid(86_400);
        let rem = secs.rem_euclid(86_400);
        let (year, month, day) = civil_from_days(days);
        Self {
            year,
            month,
            day,
            hour: (rem / 3_600) as u8,
            minute: (rem % 3_600 / 60) as u8,
            second: (rem % 60) as u8,
        }
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Month-granularity UTC offset rule.
///
/// Holds a standard and a daylight offset; the daylight offset applies for
/// UTC months March through November inclusive. See the module docs for why
/// this approximation is intentional.
///
/// # Example
///
/// ```rust
/// use rs_feedz::civil::{CivilDateTime, ZoneRule};
///
/// let zone = ZoneRule::US_CENTRAL;
/// let utc = CivilDateTime::new(2024, 6, 16, 3, 47, 0);
/// let local = zone.to_local(utc);
/// assert_eq!(local, CivilDateTime::new(2024, 6, 15, 22, 47, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneRule {
    /// Offset from UTC outside the daylight months, in seconds.
    pub standard_offset_secs: i32,
    /// Offset from UTC during the daylight months, in seconds.
    pub daylight_offset_secs: i32,
}

impl ZoneRule {
    /// US Central (CST -6h / CDT -5h).
    pub const US_CENTRAL: Self = Self {
        standard_offset_secs: -6 * 3_600,
        daylight_offset_secs: -5 * 3_600,
    };

    /// A fixed offset with no daylight component.
    pub const fn fixed(offset_secs: i32) -> Self {
        Self {
            standard_offset_secs: offset_secs,
            daylight_offset_secs: offset_secs,
        }
    }

    /// Offset in effect for the given UTC month (1-12).
    ///
    /// Months 3..=11 count as daylight time.
    pub const fn offset_secs(&self, utc_month: u8) -> i32 {
        if utc_month >= 3 && utc_month <= 11 {
            self.daylight_offset_secs
        } else {
            self.standard_offset_secs
        }
    }

    /// Converts a UTC civil time to local civil time.
    ///
    /// Pure function: epoch seconds plus the month-selected offset, back to
    /// civil fields.
    pub fn to_local(&self, utc: CivilDateTime) -> CivilDateTime {
        let offset = self.offset_secs(utc.month);
        CivilDateTime::from_unix_secs(utc.to_unix_secs() + i64::from(offset))
    }
}

impl Default for ZoneRule {
    fn default() -> Self {
        Self::US_CENTRAL
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero_is_unix_epoch() {
        let t = CivilDateTime::new(1970, 1, 1, 0, 0, 0);
        assert_eq!(t.to_unix_secs(), 0);
        assert_eq!(CivilDateTime::from_unix_secs(0), t);
    }

    #[test]
    fn known_epoch_value() {
        // 2024-06-15 22:47:00 UTC
        let t = CivilDateTime::new(2024, 6, 15, 22, 47, 0);
        assert_eq!(t.to_unix_secs(), 1_718_491_620);
        assert_eq!(CivilDateTime::from_unix_secs(1_718_491_620), t);
    }

    #[test]
    fn round_trip_leap_day() {
        let t = CivilDateTime::new(2024, 2, 29, 12, 30, 45);
        assert_eq!(CivilDateTime::from_unix_secs(t.to_unix_secs()), t);
    }

    #[test]
    fn round_trip_year_boundary() {
        let t = CivilDateTime::new(2023, 12, 31, 23, 59, 59);
        let back = CivilDateTime::from_unix_secs(t.to_unix_secs() + 1);
        assert_eq!(back, CivilDateTime::new(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn summer_month_uses_daylight_offset() {
        let zone = ZoneRule::US_CENTRAL;
        assert_eq!(zone.offset_secs(6), -5 * 3_600);
    }

    #[test]
    fn winter_month_uses_standard_offset() {
        let zone = ZoneRule::US_CENTRAL;
        assert_eq!(zone.offset_secs(1), -6 * 3_600);
        assert_eq!(zone.offset_secs(12), -6 * 3_600);
    }

    #[test]
    fn boundary_months_count_as_daylight() {
        let zone = ZoneRule::US_CENTRAL;
        assert_eq!(zone.offset_secs(3), -5 * 3_600);
        assert_eq!(zone.offset_secs(11), -5 * 3_600);
        // And the months just outside do not
        assert_eq!(zone.offset_secs(2), -6 * 3_600);
        assert_eq!(zone.offset_secs(12), -6 * 3_600);
    }

    #[test]
    fn to_local_summer_noon() {
        let zone = ZoneRule::US_CENTRAL;
        let utc = CivilDateTime::new(2024, 6, 15, 12, 0, 0);
        let local = zone.to_local(utc);
        assert_eq!(local, CivilDateTime::new(2024, 6, 15, 7, 0, 0));
    }

    #[test]
    fn to_local_winter_noon() {
        let zone = ZoneRule::US_CENTRAL;
        let utc = CivilDateTime::new(2024, 1, 15, 12, 0, 0);
        let local = zone.to_local(utc);
        assert_eq!(local, CivilDateTime::new(2024, 1, 15, 6, 0, 0));
    }

    #[test]
    fn to_local_rolls_date_backwards() {
        // Early-morning UTC lands on the previous local day
        let zone = ZoneRule::US_CENTRAL;
        let utc = CivilDateTime::new(2024, 1, 1, 3, 0, 0);
        let local = zone.to_local(utc);
        assert_eq!(local, CivilDateTime::new(2023, 12, 31, 21, 0, 0));
    }

    #[test]
    fn fixed_zone_ignores_month() {
        let zone = ZoneRule::fixed(3_600);
        assert_eq!(zone.offset_secs(1), 3_600);
        assert_eq!(zone.offset_secs(7), 3_600);
    }

    #[test]
    fn display_format() {
        let t = CivilDateTime::new(2024, 6, 5, 9, 7, 3);
        assert_eq!(format!("{}", t), "2024-06-05 09:07:03");
    }

    #[test]
    fn date_equality() {
        let a = CivilDateTime::new(2024, 6, 15, 0, 0, 0).date();
        let b = CivilDateTime::new(2024, 6, 15, 23, 59, 59).date();
        let c = CivilDateTime::new(2024, 6, 16, 0, 0, 0).date();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
