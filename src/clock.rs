//! Clock providers and `chrono` interoperability.

use crate::DateTime;

/// A source of the current civil date-time.
///
/// Implementors return the local wall clock time together with its UTC
/// offset, or `None` if the time cannot be obtained.
pub trait ClockProvider {
    /// Returns the current civil date-time.
    fn now(&self) -> Option<DateTime>;
}

impl<C: ClockProvider + ?Sized> ClockProvider for &C {
    fn now(&self) -> Option<DateTime> {
        (**self).now()
    }
}

/// A clock stopped at a fixed date-time.
///
/// # Examples
///
/// ```
/// use tai_calendar::{ClockProvider, DateTime, FixedClock};
///
/// let clock = FixedClock(DateTime::new(2011, 3, 19).with_time(10, 0, 0));
///
/// assert_eq!(clock.now().map(|dt| dt.hour), Some(10));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FixedClock(pub DateTime);

impl ClockProvider for FixedClock {
    fn now(&self) -> Option<DateTime> {
        Some(self.0)
    }
}

/// A clock reading the system wall clock in the local time zone.
///
/// The UTC offset of the returned date-time includes daylight saving time
/// when in effect.
///
/// # Examples
///
/// ```
/// use tai_calendar::{ClockProvider, LocalClock};
///
/// let now = LocalClock.now().unwrap();
/// println!("local time: {}", now);
/// ```
#[cfg(feature = "clock")]
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalClock;

#[cfg(feature = "clock")]
impl ClockProvider for LocalClock {
    fn now(&self) -> Option<DateTime> {
        Some(DateTime::from_chrono_date_time(&chrono::Local::now()))
    }
}

#[cfg(feature = "chrono")]
impl DateTime {
    /// Creates a date-time from a `chrono::DateTime`.
    ///
    /// The fields are those of the local date-time in the time zone of the
    /// argument. A `chrono` leap second is mapped to second 60. Sub-minute
    /// parts of the UTC offset are truncated.
    ///
    /// # Examples
    ///
    /// ```
    /// use tai_calendar::DateTime;
    ///
    /// let chrono_date_time = chrono::DateTime::parse_from_rfc3339("2011-03-19T10:00:00+01:30").unwrap();
    ///
    /// assert_eq!(
    ///     DateTime::from_chrono_date_time(&chrono_date_time),
    ///     DateTime::new(2011, 3, 19).with_time(10, 0, 0).with_offset(90)
    /// );
    /// ```
    pub fn from_chrono_date_time<Tz: chrono::TimeZone>(date_time: &chrono::DateTime<Tz>) -> Self {
        use chrono::{Datelike, Offset, Timelike};

        let offset_secs = date_time.offset().fix().local_minus_utc();
        let local = date_time.naive_local();
        let leap = local.nanosecond() >= 1_000_000_000;

        Self {
            year: i64::from(local.year()),
            month: i64::from(local.month()),
            day: i64::from(local.day()),
            hour: i64::from(local.hour()),
            minute: i64::from(local.minute()),
            second: i64::from(local.second()) + i64::from(leap),
            utc_offset_minutes: i64::from(offset_secs / 60),
        }
    }

    /// Converts this date-time to a `chrono::DateTime` with a fixed offset.
    ///
    /// Second 60 is mapped to a `chrono` leap second. Returns `None` if a
    /// field is out of its conventional range or outside the range supported
    /// by `chrono`.
    pub fn to_chrono_date_time(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        use chrono::{FixedOffset, NaiveDate, TimeZone};

        let offset_secs = i32::try_from(self.utc_offset_minutes.checked_mul(60)?).ok()?;
        let offset = FixedOffset::east_opt(offset_secs)?;

        let (second, nano) = if self.second == 60 {
            (59, 1_000_000_000)
        } else {
            (u32::try_from(self.second).ok()?, 0)
        };
        let naive = NaiveDate::from_ymd_opt(
            i32::try_from(self.year).ok()?,
            u32::try_from(self.month).ok()?,
            u32::try_from(self.day).ok()?,
        )?
        .and_hms_nano_opt(
            u32::try_from(self.hour).ok()?,
            u32::try_from(self.minute).ok()?,
            second,
            nano,
        )?;

        offset.from_local_datetime(&naive).single()
    }
}
