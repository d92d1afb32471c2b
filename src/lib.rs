//! Calendar conversions between civil date-times, Julian Days and leap-second
//! aware TAI instants.
//!
//! # Overview
//!
//! This crate provides an exact, self-contained representation of civil time
//! in the proleptic Gregorian calendar that does not rely on the calendar
//! routines of the operating system. It is meant as a building block for
//! loggers, schedulers and protocol stacks that need to label events with
//! [TAI] instants.
//!
//! A [`DateTime`] is a plain civil date-time with a UTC offset in minutes.
//! It can be:
//!
//! - parsed from and formatted to an ISO-like text representation
//!   (see [`parse`] and [`format`]),
//! - converted to a Modified Julian Day or a Julian Day and back
//!   (see [`to_mjd`], [`to_jd`], [`from_jd`] and [`from_mjd`]),
//! - converted to a raw 64-bit TAI instant and back
//!   (see [`to_raw_tai`] and [`from_raw_tai`]), which can in turn be packed
//!   as 8 big-endian bytes (see [`pack`] and [`unpack`]),
//! - queried for its day of the week (see [`weekday`]).
//!
//! All calendar arithmetic is integer arithmetic with floor division, so that
//! conversions hold over the whole range of years, including year 0 and
//! negative years.
//!
//! Raw TAI instants ignore leap seconds: two consecutive civil seconds always
//! differ by 1. The [`LeapSecondTable`] holds the instants at which leap
//! seconds occurred, as distributed in the `leapsecs.dat` file of libtai, and
//! adjusts raw instants accordingly.
//!
//! [TAI]: https://en.wikipedia.org/wiki/International_Atomic_Time
//!
//!
//! # Design choices and limitations
//!
//! Field values are never validated nor normalized. Out-of-range values such
//! as month 13 or hour 25 yield a mathematically defined result rather than
//! an error, which is why parsing only fails on structural errors.
//!
//! The inverse Julian Day transforms only reconstruct the date: time of day
//! must be carried separately. They also use a calendar without year 0, unlike
//! the forward transform.
//!
//! The text format is fixed-width, so years outside 0–9999 do not survive
//! formatting.
//!
//!
//! # Features flags
//!
//! ### Support for `no-std`
//!
//! By default, this crate enables the `std` feature to provide the
//! leap-second table and its file loader, but specifying
//! `default-features = false` makes it `no-std`-compatible.
//!
//! ### Support for time-related crates
//!
//! Conversion methods to and from date-time stamps from the [chrono] crate
//! are available with the `chrono` feature. The `clock` feature additionally
//! provides [`LocalClock`], which reads the system wall clock in the local
//! time zone.
//!
//! [chrono]: https://crates.io/crates/chrono
//!
//! ### Serialization
//!
//! `DateTime`, `Weekday` and `ParseDateTimeError` can be (de)serialized with
//! `serde` by activating the `serde` feature.
//!
//! ### Logging
//!
//! Loads of the leap-second table emit `tracing` debug events when the
//! `tracing` feature is activated.
//!
//!
//! # Examples
#![cfg_attr(
    feature = "std",
    doc = r##"
```
use tai_calendar::{format, pack, parse, to_raw_tai, LeapSecondTable};

let dt = parse("2017-01-01T00:00:00 +0000").unwrap();
assert_eq!(format(&dt).as_str(), "2017-01-01 00:00:00 +0000");

// A table with a single leap second, inserted 1s before the instant.
let mut tai = to_raw_tai(&dt);
let table = LeapSecondTable::from_entries([tai - 1]).unwrap();

// Account for the leap second and serialize the instant.
assert_eq!(table.add_leap_seconds(&mut tai), Ok(1));
let bytes = pack(tai);
assert_eq!(bytes.len(), 8);
```"##
)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[macro_use]
mod macros;

mod clock;
mod date_time;
mod errors;
mod iso;
mod julian;
#[cfg(feature = "std")]
mod leap_secs;
mod tai;

#[cfg(feature = "clock")]
pub use clock::LocalClock;
pub use clock::{ClockProvider, FixedClock};
pub use date_time::{weekday, DateTime, Weekday};
#[cfg(feature = "std")]
pub use errors::LoadError;
pub use errors::ParseDateTimeError;
pub use iso::{format, parse, FormattedDateTime, FORMATTED_LEN};
pub use julian::{
    from_jd, from_jd_julian_calendar, from_mjd, mjd_day, to_jd, to_mjd, MJD_TO_JD,
};
#[cfg(feature = "std")]
pub use leap_secs::{
    ByteSource, FileSource, LeapSecondTable, ReaderSource, DEFAULT_LEAPSECS_PATH,
    LEAPSECS_PATH_ENV,
};
pub use tai::{from_raw_tai, pack, to_raw_tai, unpack, EPOCH_BIAS, TAI_PACKED_LEN};
