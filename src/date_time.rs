//! Civil date-time representation and calendar helpers.

use core::fmt;

const DOY_AT_MONTH: [i32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
const DOY_AT_MONTH_LEAP: [i32; 12] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// A civil date-time in the proleptic Gregorian calendar, together with its
/// offset from UTC.
///
/// Field values are never validated nor normalized: an hour of 25 is not
/// carried into the next day and a month of 13 is accepted as is. All
/// conversions treat fields as supplied and produce a mathematically defined,
/// if meaningless, result for out-of-range values.
///
/// Conventional ranges are:
///
/// | field                | range                                   |
/// |----------------------|-----------------------------------------|
/// | `year`               | any; year 0 is 1 BC                     |
/// | `month`              | 1–12                                    |
/// | `day`                | 1–31                                    |
/// | `hour`               | 0–24                                    |
/// | `minute`             | 0–60                                    |
/// | `second`             | 0–60, where 60 is an in-progress leap second |
/// | `utc_offset_minutes` | ±(0–5999), written `±HHMM` in text      |
///
/// # Examples
///
/// ```
/// use tai_calendar::DateTime;
///
/// // 2011-03-19 10:00:00 +0130
/// let dt = DateTime::new(2011, 3, 19).with_time(10, 0, 0).with_offset(90);
///
/// assert_eq!(dt.hour, 10);
/// assert_eq!(dt.utc_offset_minutes, 90);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Proleptic Gregorian year.
    pub year: i64,
    /// Month of the year.
    pub month: i64,
    /// Day of the month.
    pub day: i64,
    /// Hour of the day.
    pub hour: i64,
    /// Minute of the hour.
    pub minute: i64,
    /// Second of the minute.
    pub second: i64,
    /// Signed offset from UTC in minutes.
    pub utc_offset_minutes: i64,
}

impl DateTime {
    /// Creates a date-time at midnight UTC on the specified date.
    pub const fn new(year: i64, month: i64, day: i64) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            utc_offset_minutes: 0,
        }
    }

    /// Returns a copy of this date-time with the specified time of day.
    pub const fn with_time(self, hour: i64, minute: i64, second: i64) -> Self {
        Self {
            hour,
            minute,
            second,
            ..self
        }
    }

    /// Returns a copy of this date-time with the specified UTC offset in
    /// minutes.
    pub const fn with_offset(self, utc_offset_minutes: i64) -> Self {
        Self {
            utc_offset_minutes,
            ..self
        }
    }

    /// Returns the day of the week.
    ///
    /// See [`weekday`](crate::weekday) for the rules applied to two-digit
    /// years.
    ///
    /// # Examples
    ///
    /// ```
    /// use tai_calendar::{DateTime, Weekday};
    ///
    /// assert_eq!(DateTime::new(2000, 1, 1).weekday(), Weekday::Saturday);
    /// ```
    pub const fn weekday(&self) -> Weekday {
        match weekday(self) {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }
}

/// Day of the week, numbered from Monday.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Weekday {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl Weekday {
    /// Returns the index of the day, 0 for Monday and 6 for Sunday.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the day with the specified index, or `None` if the index is
    /// greater than 6.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Monday),
            1 => Some(Self::Tuesday),
            2 => Some(Self::Wednesday),
            3 => Some(Self::Thursday),
            4 => Some(Self::Friday),
            5 => Some(Self::Saturday),
            6 => Some(Self::Sunday),
            _ => None,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        };

        fmt.write_str(name)
    }
}

/// Returns the day of the week as an index between 0 (Monday) and 6 (Sunday).
///
/// Years below 100 are read as two-digit years of the 21st century, so year
/// 11 stands for 2011. Time-of-day fields and the UTC offset are ignored.
///
/// # Examples
///
/// ```
/// use tai_calendar::{weekday, DateTime};
///
/// // 2011-03-19 was a Saturday.
/// assert_eq!(weekday(&DateTime::new(2011, 3, 19)), 5);
/// assert_eq!(weekday(&DateTime::new(11, 3, 19)), 5);
/// ```
pub const fn weekday(dt: &DateTime) -> u8 {
    let mut year = dt.year;
    let mut month = dt.month;

    if year < 100 {
        year += 2000;
    }

    // January and February count as months 14 and 15 of the previous year.
    if month < 3 {
        month += 13;
        year = year.wrapping_sub(1);
    } else {
        month = month.wrapping_add(1);
    }

    let n = dt
        .day
        .wrapping_add(floor_div(month.wrapping_mul(26), 10))
        .wrapping_add(year)
        .wrapping_add(floor_div(year, 4))
        .wrapping_sub(floor_div(year, 100))
        .wrapping_add(floor_div(year, 400))
        .wrapping_add(5);

    floor_mod(n, 7) as u8
}

/// Integer division rounding towards negative infinity.
///
/// Only used with positive divisors, for which Euclidean division and floor
/// division coincide.
pub(crate) const fn floor_div(a: i64, b: i64) -> i64 {
    a.div_euclid(b)
}

/// Remainder of [`floor_div`], always in `0..b` for a positive divisor.
pub(crate) const fn floor_mod(a: i64, b: i64) -> i64 {
    a.rem_euclid(b)
}

/// Returns whether the year is a leap year for a 64-bit signed year.
///
/// The argument is the proleptic Gregorian year, with the ISO 8601
/// interpretation of year 0 as year 1 BC, which is a leap year.
pub(crate) const fn is_leap(year: i64) -> bool {
    (year & 0b11) == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Calculates the month and the day of the month for a 0-based day of the year.
pub(crate) fn month_and_day_of_month(year: i64, doy: i32) -> (i64, i64) {
    let table = if is_leap(year) {
        &DOY_AT_MONTH_LEAP
    } else {
        &DOY_AT_MONTH
    };

    let idx = table.binary_search(&doy).unwrap_or_else(|e| e - 1);
    let month = idx as i64 + 1;
    let day = (doy - table[idx]) as i64 + 1;

    (month, day)
}

/// Returns the year and the 0-based day of the year for a number of days
/// elapsed since the first day of year 0.
///
/// Negative day counts map to negative years.
pub(crate) fn days_to_date(days_from_year_0: i64) -> (i64, i32) {
    // Find the nearest 400-year boundary that is before or at the date.
    let n_period = floor_div(days_from_year_0, 146097);
    let mut day = floor_mod(days_from_year_0, 146097);

    // -- `day` is now guaranteed to be positive.

    let mut year = 400 * n_period;
    if day < 366 {
        return (year, day as i32);
    }

    // Find the nearest 100-year, 4-year and 1-year boundaries that are before
    // or at the date. The first century of a 400-year period and the first
    // 4-year period of a century start with a leap year, the others don't.
    for (years_in_period, days_in_period, starts_with_non_leap_year) in
        [(100, 36524, 1), (4, 1461, 0), (1, 365, 1)]
    {
        day -= starts_with_non_leap_year;
        let n_period = day / days_in_period;
        year += years_in_period * n_period;
        day -= n_period * days_in_period;
        if day < (366 - starts_with_non_leap_year) {
            return (year, day as i32);
        }
        day += starts_with_non_leap_year;
    }

    unreachable!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_reference_dates() {
        assert_eq!(weekday(&DateTime::new(2000, 1, 1)), 5);
        assert_eq!(weekday(&DateTime::new(1970, 1, 1)), 3);
        assert_eq!(weekday(&DateTime::new(2011, 3, 19)), 5);
        assert_eq!(weekday(&DateTime::new(2024, 2, 29)), 3);
        assert_eq!(weekday(&DateTime::new(1600, 3, 1)), 2);
    }

    #[test]
    fn weekday_two_digit_year() {
        assert_eq!(
            weekday(&DateTime::new(24, 12, 25)),
            weekday(&DateTime::new(2024, 12, 25))
        );
        // Year 99 is read as 2099, not 1999.
        assert_eq!(DateTime::new(99, 1, 1).weekday(), Weekday::Thursday);
    }

    #[test]
    fn weekday_period() {
        let mut expected = weekday(&DateTime::new(2011, 3, 1));
        for day in 2..=31 {
            expected = (expected + 1) % 7;
            assert_eq!(weekday(&DateTime::new(2011, 3, day)), expected);
        }
    }

    #[test]
    fn weekday_crosses_month_and_year() {
        assert_eq!(DateTime::new(2010, 12, 31).weekday(), Weekday::Friday);
        assert_eq!(DateTime::new(2011, 1, 1).weekday(), Weekday::Saturday);
        assert_eq!(DateTime::new(2011, 2, 28).weekday(), Weekday::Monday);
        assert_eq!(DateTime::new(2011, 3, 1).weekday(), Weekday::Tuesday);
    }

    #[test]
    fn weekday_stays_in_range_for_negative_years() {
        for day in 1..=28 {
            let wd = weekday(&DateTime::new(-4713, 1, day));
            assert!(wd <= 6);
        }
    }

    #[test]
    fn weekday_of_extreme_fields() {
        let huge_month = crate::parse("2011-999999999999999999-01 00:00 +0000").unwrap();
        let huge_year = crate::parse("100000000000000000-01-01 00:00 +0000").unwrap();

        assert!(weekday(&huge_month) <= 6);
        assert!(weekday(&huge_year) <= 6);
        for (year, month, day) in [
            (i64::MIN, i64::MIN, i64::MIN),
            (i64::MAX, i64::MAX, i64::MAX),
            (i64::MIN, 1, i64::MAX),
        ] {
            assert!(weekday(&DateTime::new(year, month, day)) <= 6);
        }
    }

    #[test]
    fn weekday_index() {
        for index in 0..7 {
            assert_eq!(Weekday::from_index(index).unwrap().index(), index);
        }
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn floor_division() {
        assert_eq!(floor_div(-1, 400), -1);
        assert_eq!(floor_mod(-1, 400), 399);
        assert_eq!(floor_div(-400, 400), -1);
        assert_eq!(floor_mod(-400, 400), 0);
        assert_eq!(floor_div(7, 4), 1);
    }

    #[test]
    fn days_to_date_boundaries() {
        assert_eq!(days_to_date(0), (0, 0));
        assert_eq!(days_to_date(365), (0, 365));
        assert_eq!(days_to_date(366), (1, 0));
        assert_eq!(days_to_date(-1), (-1, 364));
        // 1970-01-01 is 719528 days after 0000-01-01.
        assert_eq!(days_to_date(719_528), (1970, 0));
        // 2000-12-31 is the last day of a leap century year.
        assert_eq!(days_to_date(730_850), (2000, 365));
    }

    #[test]
    fn month_and_day() {
        assert_eq!(month_and_day_of_month(2000, 59), (2, 29));
        assert_eq!(month_and_day_of_month(2001, 59), (3, 1));
        assert_eq!(month_and_day_of_month(1900, 364), (12, 31));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let dt = DateTime::new(-44, 3, 15).with_time(12, 30, 0).with_offset(-60);
        let json = serde_json::to_string(&dt).unwrap();
        let back: DateTime = serde_json::from_str(&json).unwrap();

        assert_eq!(back, dt);
    }
}
