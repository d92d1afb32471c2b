//! Conversions between civil date-times and (Modified) Julian Days.
//!
//! The forward transform is exact integer arithmetic with floor division,
//! valid over the whole proleptic Gregorian calendar including years 0 and
//! below. The inverse transforms only reconstruct the date: time-of-day must
//! be carried separately by the caller.

use crate::date_time::{floor_div, floor_mod, DateTime};

/// Difference between a Julian Day and a Modified Julian Day.
pub const MJD_TO_JD: f64 = 2_400_000.5;

/// Number of days in a 400-year Gregorian cycle.
const DAYS_PER_400_YEARS: i64 = 146_097;

/// Number of days in a 4-year cycle.
const DAYS_PER_4_YEARS: i64 = 1_461;

/// Bias aligning day 0 with 1858-11-17, the MJD epoch.
const MJD_BIAS: i64 = -678_882;

const TIMES_365: [i64; 4] = [0, 365, 730, 1_095];
const TIMES_36524: [i64; 4] = [0, 36_524, 73_048, 109_572];

/// Day of the computing year at which each month starts, with March as
/// month 0.
const MONTH_OFFSET: [i64; 12] = [0, 31, 61, 92, 122, 153, 184, 214, 245, 275, 306, 337];

/// Returns the integer part of the Modified Julian Day of a date-time.
///
/// Only the date fields are used. The result is exact for any year,
/// including years 0 and below, and follows the day count continuously
/// across the 1 BC / 1 AD boundary. It wraps around for years so large that
/// the day count overflows an `i64`.
///
/// # Examples
///
/// ```
/// use tai_calendar::{mjd_day, DateTime};
///
/// assert_eq!(mjd_day(&DateTime::new(1858, 11, 17)), 0);
/// assert_eq!(mjd_day(&DateTime::new(1970, 1, 1)), 40_587);
/// ```
pub const fn mjd_day(dt: &DateTime) -> i64 {
    let mut day = dt.day.wrapping_add(MJD_BIAS);
    let mut month = dt.month.wrapping_sub(1);
    let mut year = dt.year;

    day = day.wrapping_add(DAYS_PER_400_YEARS.wrapping_mul(floor_div(year, 400)));
    year = floor_mod(year, 400);

    // Shift to a computing year starting in March so that the leap day falls
    // at its end.
    if month >= 2 {
        month -= 2;
    } else {
        month += 10;
        year -= 1;
    }

    year += floor_div(month, 12);
    month = floor_mod(month, 12);

    day = day.wrapping_add(MONTH_OFFSET[month as usize]);

    day = day.wrapping_add(DAYS_PER_400_YEARS.wrapping_mul(floor_div(year, 400)));
    year = floor_mod(year, 400);

    // -- `year` is now in `0..400`.

    day = day.wrapping_add(TIMES_365[(year & 3) as usize]);
    year >>= 2;

    day = day.wrapping_add(DAYS_PER_4_YEARS * (year % 25));
    year /= 25;

    day.wrapping_add(TIMES_36524[(year & 3) as usize])
}

/// Returns the Modified Julian Day of a date-time.
///
/// The fractional part is the time of day as a fraction of 86400 seconds. A
/// leap second (second 60) is placed as the second that precedes it. The UTC
/// offset is ignored.
///
/// # Examples
///
/// ```
/// use tai_calendar::{to_mjd, DateTime};
///
/// let noon = DateTime::new(2000, 1, 1).with_time(12, 0, 0);
/// assert_eq!(to_mjd(&noon), 51_544.5);
/// ```
pub fn to_mjd(dt: &DateTime) -> f64 {
    let second = if dt.second == 60 { 59 } else { dt.second };
    let seconds_of_day = second
        .wrapping_add(dt.minute.wrapping_mul(60))
        .wrapping_add(dt.hour.wrapping_mul(3600));

    mjd_day(dt) as f64 + seconds_of_day as f64 / 86_400.0
}

/// Returns the Julian Day of a date-time.
///
/// See [`to_mjd`].
pub fn to_jd(dt: &DateTime) -> f64 {
    to_mjd(dt) + MJD_TO_JD
}

/// Returns the proleptic Gregorian date of a Julian Day.
///
/// Time-of-day fields and the UTC offset of the result are zero: they are
/// not reconstructed from the fractional part of the day.
///
/// The produced calendar has no year 0: astronomical year 0 is returned as
/// year -1 and, more generally, any year below 1 is decremented by one. This
/// is not the numbering used by [`to_mjd`], which treats year 0 as 1 BC.
///
/// # Examples
///
/// ```
/// use tai_calendar::{from_jd, DateTime};
///
/// assert_eq!(from_jd(2_451_544.5), DateTime::new(2000, 1, 1));
/// ```
pub fn from_jd(jd: f64) -> DateTime {
    let z = floor(jd + 0.5);
    // Gregorian century correction, applied to all dates.
    let alpha = floor((z as f64 - 1_867_216.25) / 36_524.25);
    let a = z.wrapping_add(1).wrapping_add(alpha).wrapping_sub(floor_div(alpha, 4));

    date_from_shifted_day(a)
}

/// Returns the proleptic Gregorian date of a Modified Julian Day.
///
/// See [`from_jd`].
pub fn from_mjd(mjd: f64) -> DateTime {
    from_jd(mjd + MJD_TO_JD)
}

/// Returns the Julian calendar date of a Julian Day.
///
/// This is [`from_jd`] without the Gregorian century correction, so the
/// result is expressed in the Julian calendar with the same year numbering.
///
/// # Examples
///
/// ```
/// use tai_calendar::{from_jd_julian_calendar, DateTime};
///
/// // The first day of the Gregorian calendar was 1582-10-05 in the Julian
/// // calendar.
/// assert_eq!(from_jd_julian_calendar(2_299_160.5), DateTime::new(1582, 10, 5));
/// ```
pub fn from_jd_julian_calendar(jd: f64) -> DateTime {
    date_from_shifted_day(floor(jd + 0.5))
}

fn date_from_shifted_day(a: i64) -> DateTime {
    let b = a.wrapping_add(1524);
    let c = floor((b as f64 - 122.1) / 365.25);
    let d = floor(365.25 * c as f64);
    let e = floor(b.wrapping_sub(d) as f64 / 30.6001);

    let day = b.wrapping_sub(d).wrapping_sub(floor(30.6001 * e as f64));
    let month = if e < 14 { e.wrapping_sub(1) } else { e - 13 };
    let mut year = if month > 2 {
        c.wrapping_sub(4716)
    } else {
        c.wrapping_sub(4715)
    };

    // There is no year 0: year -1 (1 BC) is immediately followed by year 1.
    if year < 1 {
        year = year.wrapping_sub(1);
    }

    DateTime::new(year, month, day)
}

/// Largest integer not greater than `x`.
///
/// `f64::floor` is not available without `std`. Values outside the `i64`
/// range saturate and NaN maps to 0.
fn floor(x: f64) -> i64 {
    let t = x as i64;
    if (t as f64) > x {
        t - 1
    } else {
        t
    }
}
