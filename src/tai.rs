//! Raw TAI instants and their portable byte encoding.
//!
//! A raw TAI instant is a 64-bit label counting seconds on a scale with no
//! leap seconds, compatible with the [TAI64] labels of libtai: the label of
//! 1970-01-01 00:00:00 UTC is 2^62 + 10, which is the TAI64 label of
//! 1970-01-01 00:00:10 TAI. Leap seconds are accounted for separately with a
//! [`LeapSecondTable`](crate::LeapSecondTable).
//!
//! [TAI64]: https://cr.yp.to/libtai/tai64.html

use crate::date_time::{days_to_date, floor_div, floor_mod, month_and_day_of_month};
use crate::{mjd_day, DateTime};

/// Size in bytes of a packed TAI instant.
pub const TAI_PACKED_LEN: usize = 8;

/// Raw TAI instant of day 0 of the Modified Julian Day scale at 00:00:00 UTC.
pub const EPOCH_BIAS: u64 = 4_611_686_014_920_671_114;

/// Modified Julian Day of 0000-01-01.
const MJD_OF_YEAR_0: i64 = -678_941;

const SECS_PER_DAY: i64 = 86_400;

/// Packs a TAI instant as 8 big-endian bytes.
///
/// # Examples
///
/// ```
/// use tai_calendar::pack;
///
/// assert_eq!(pack(0x4000_0000_0000_000a), [0x40, 0, 0, 0, 0, 0, 0, 0x0a]);
/// ```
pub const fn pack(tai: u64) -> [u8; TAI_PACKED_LEN] {
    tai.to_be_bytes()
}

/// Unpacks a TAI instant from 8 big-endian bytes.
pub const fn unpack(bytes: &[u8; TAI_PACKED_LEN]) -> u64 {
    u64::from_be_bytes(*bytes)
}

/// Returns the raw TAI instant of a civil date-time, without leap seconds.
///
/// The UTC offset is subtracted so that the same instant expressed in
/// different time zones maps to the same label. A leap second (second 60)
/// maps to the same label as the first second of the next minute. The
/// computation wraps modulo 2^64 for dates far outside the 64-bit range.
///
/// Callers needing UTC semantics adjust the result with
/// [`add_leap_seconds`](crate::LeapSecondTable::add_leap_seconds).
///
/// # Examples
///
/// ```
/// use tai_calendar::{to_raw_tai, DateTime};
///
/// let utc = DateTime::new(1970, 1, 1);
/// let cet = DateTime::new(1970, 1, 1).with_time(1, 0, 0).with_offset(60);
///
/// assert_eq!(to_raw_tai(&utc), (1 << 62) + 10);
/// assert_eq!(to_raw_tai(&cet), to_raw_tai(&utc));
/// ```
pub const fn to_raw_tai(dt: &DateTime) -> u64 {
    let day = mjd_day(dt);
    let minutes = dt
        .hour
        .wrapping_mul(60)
        .wrapping_add(dt.minute)
        .wrapping_sub(dt.utc_offset_minutes);
    let seconds = minutes.wrapping_mul(60).wrapping_add(dt.second);

    EPOCH_BIAS.wrapping_add(day.wrapping_mul(SECS_PER_DAY).wrapping_add(seconds) as u64)
}

/// Returns the civil date-time of a raw TAI instant, expressed with the
/// specified UTC offset in minutes.
///
/// This is the inverse of [`to_raw_tai`] for date-times with canonical field
/// values, except that a leap second comes back as second 0 of the next
/// minute. Year 0 is 1 BC, as for [`to_raw_tai`].
///
/// # Examples
///
/// ```
/// use tai_calendar::{from_raw_tai, to_raw_tai, DateTime};
///
/// let dt = DateTime::new(2011, 3, 19).with_time(10, 0, 0).with_offset(-90);
///
/// assert_eq!(from_raw_tai(to_raw_tai(&dt), -90), dt);
/// ```
pub fn from_raw_tai(tai: u64, utc_offset_minutes: i64) -> DateTime {
    let secs = (tai.wrapping_sub(EPOCH_BIAS) as i64)
        .wrapping_add(utc_offset_minutes.wrapping_mul(60));

    let mjd = floor_div(secs, SECS_PER_DAY);
    let secs_of_day = floor_mod(secs, SECS_PER_DAY);

    let (year, doy) = days_to_date(mjd - MJD_OF_YEAR_0);
    let (month, day) = month_and_day_of_month(year, doy);

    DateTime {
        year,
        month,
        day,
        hour: secs_of_day / 3600,
        minute: secs_of_day / 60 % 60,
        second: secs_of_day % 60,
        utc_offset_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAI_1970: u64 = 4_611_686_018_427_387_914;

    #[test]
    fn pack_smoke() {
        assert_eq!(pack(0), [0; 8]);
        assert_eq!(pack(u64::MAX), [0xff; 8]);
        assert_eq!(
            pack(0x0102_0304_0506_0708),
            [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
    }

    #[test]
    fn unpack_smoke() {
        assert_eq!(unpack(&[0x40, 0, 0, 0, 0, 0, 0, 0x0a]), TAI_1970);
        assert_eq!(unpack(&pack(EPOCH_BIAS)), EPOCH_BIAS);
    }

    #[test]
    fn unpack_inverts_pack() {
        for bit in 0..64 {
            let tai = 1u64 << bit;
            assert_eq!(unpack(&pack(tai)), tai);
            assert_eq!(unpack(&pack(!tai)), !tai);
            assert_eq!(unpack(&pack(tai - 1)), tai - 1);
        }
        for k in 0..256 {
            assert_eq!(unpack(&pack(u64::MAX - k)), u64::MAX - k);
            assert_eq!(unpack(&pack(TAI_1970 + k * 0x0101_0101)), TAI_1970 + k * 0x0101_0101);
        }
        // Big-endian: the most significant byte comes first.
        assert_eq!(pack(1 << 56)[0], 1);
        assert_eq!(pack(1)[7], 1);
    }

    #[test]
    fn raw_tai_epochs() {
        assert_eq!(to_raw_tai(&DateTime::new(1858, 11, 17)), EPOCH_BIAS);
        assert_eq!(to_raw_tai(&DateTime::new(1970, 1, 1)), TAI_1970);
        assert_eq!(
            to_raw_tai(&DateTime::new(1970, 1, 2)),
            TAI_1970 + 86_400
        );
    }

    #[test]
    fn raw_tai_offsets() {
        let utc = DateTime::new(2011, 3, 19).with_time(10, 0, 0);
        let east = DateTime::new(2011, 3, 19).with_time(11, 30, 0).with_offset(90);
        let west = DateTime::new(2011, 3, 18).with_time(23, 0, 0).with_offset(-660);

        assert_eq!(to_raw_tai(&east), to_raw_tai(&utc));
        assert_eq!(to_raw_tai(&west), to_raw_tai(&utc));
    }

    #[test]
    fn raw_tai_is_monotonic() {
        let mut previous = to_raw_tai(&DateTime::new(-1, 12, 31).with_time(23, 59, 59));
        for dt in [
            DateTime::new(0, 1, 1),
            DateTime::new(0, 1, 1).with_time(0, 0, 1),
            DateTime::new(1858, 11, 16).with_time(23, 59, 59),
            DateTime::new(1858, 11, 17),
            DateTime::new(1970, 1, 1),
            DateTime::new(2016, 12, 31).with_time(23, 59, 59),
            DateTime::new(2017, 1, 1),
            DateTime::new(9999, 12, 31).with_time(23, 59, 59),
        ] {
            let tai = to_raw_tai(&dt);
            assert!(tai > previous, "{:?}", dt);
            previous = tai;
        }
    }

    #[test]
    fn raw_tai_adjacent_seconds() {
        let dt = DateTime::new(1900, 2, 28).with_time(23, 59, 59);
        let next = DateTime::new(1900, 3, 1);

        assert_eq!(to_raw_tai(&next) - to_raw_tai(&dt), 1);
    }

    #[test]
    fn raw_tai_leap_second() {
        let leap = DateTime::new(2016, 12, 31).with_time(23, 59, 60);
        let next = DateTime::new(2017, 1, 1);

        assert_eq!(to_raw_tai(&leap), to_raw_tai(&next));
    }

    #[test]
    fn raw_tai_of_extreme_fields_wraps() {
        let huge_hour = crate::parse("2011-03-19 999999999999999999:00 +0000").unwrap();
        let huge_year = crate::parse("100000000000000000-01-01 00:00 +0000").unwrap();
        let huge_month = crate::parse("2011-999999999999999999-01 00:00 +0000").unwrap();

        let day = to_raw_tai(&DateTime::new(2011, 3, 19));
        let hour_secs = 999_999_999_999_999_999i64.wrapping_mul(3600) as u64;
        assert_eq!(to_raw_tai(&huge_hour), day.wrapping_add(hour_secs));

        to_raw_tai(&huge_year);
        to_raw_tai(&huge_month);
        to_raw_tai(&DateTime::new(i64::MIN, i64::MIN, i64::MIN).with_offset(i64::MAX));
    }

    #[test]
    fn from_raw_tai_of_any_label() {
        for tai in [0, 1, EPOCH_BIAS, u64::MAX / 2, u64::MAX] {
            let dt = from_raw_tai(tai, 0);
            assert!((1..=12).contains(&dt.month), "{:?}", dt);
            assert!((0..86_400).contains(&(dt.hour * 3600 + dt.minute * 60 + dt.second)));
        }
    }

    #[test]
    fn from_raw_tai_inverts_to_raw_tai() {
        for dt in [
            DateTime::new(-4713, 11, 24).with_time(12, 0, 0),
            DateTime::new(-1, 12, 31).with_time(23, 59, 59),
            DateTime::new(0, 2, 29).with_time(6, 7, 8),
            DateTime::new(1, 1, 1),
            DateTime::new(1858, 11, 16).with_time(12, 0, 0).with_offset(-300),
            DateTime::new(2000, 2, 29).with_time(23, 59, 59).with_offset(330),
            DateTime::new(2011, 3, 19).with_time(10, 0, 0),
            DateTime::new(9999, 12, 31).with_time(23, 59, 59).with_offset(-5999),
        ] {
            assert_eq!(from_raw_tai(to_raw_tai(&dt), dt.utc_offset_minutes), dt);
        }
    }

    #[test]
    fn from_raw_tai_changes_offset() {
        let dt = from_raw_tai(TAI_1970, -60);

        assert_eq!(
            dt,
            DateTime::new(1969, 12, 31).with_time(23, 0, 0).with_offset(-60)
        );
    }
}
