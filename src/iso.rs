//! ISO-like text parsing and fixed-width formatting.

use core::fmt;
use core::str::FromStr;

use crate::{DateTime, ParseDateTimeError};

/// Length in bytes of a formatted date-time.
pub const FORMATTED_LEN: usize = 25;

/// Parses a date-time with a mandatory UTC offset.
///
/// Expected format:
///
/// `[-]Y...Y-M...M-D...D[ |T]h...h:m...m[:s...s] ±OOOO`
///
/// Each field except the offset is a run of ASCII digits of any length,
/// including none, in which case the field is 0. The date and time may be
/// separated by any number of spaces, tabs or `T`, and the offset may be
/// preceded by any number of spaces or tabs. Seconds default to 0 when
/// omitted. The offset is exactly 4 digits giving hours then minutes.
/// Anything after the offset is ignored.
///
/// Field values are not range-checked: `2011-13-45 99:99 +0000` parses.
///
/// # Examples
///
/// ```
/// use tai_calendar::{parse, DateTime};
///
/// let dt = parse("2011-03-19T10:00 -0130").unwrap();
///
/// assert_eq!(dt, DateTime::new(2011, 3, 19).with_time(10, 0, 0).with_offset(-90));
/// ```
pub fn parse(text: &str) -> Result<DateTime, ParseDateTimeError> {
    let mut cursor = Cursor::new(text.as_bytes());

    let negative_year = cursor.eat(b'-');
    let year = cursor.number()?;
    let year = if negative_year { -year } else { year };

    cursor.expect(b'-')?;
    let month = cursor.number()?;
    cursor.expect(b'-')?;
    let day = cursor.number()?;

    cursor.skip_while(|c| matches!(c, b' ' | b'\t' | b'T'));
    let hour = cursor.number()?;
    cursor.expect(b':')?;
    let minute = cursor.number()?;
    let second = if cursor.eat(b':') {
        cursor.number()?
    } else {
        0
    };

    cursor.skip_while(|c| matches!(c, b' ' | b'\t'));
    let sign_position = cursor.pos;
    let offset_sign = match cursor.bump() {
        Some(b'+') => 1,
        Some(b'-') => -1,
        _ => {
            return Err(ParseDateTimeError::InvalidOffsetSign {
                position: sign_position,
            })
        }
    };

    // Hours and minutes are folded digit by digit: multiplying the hours by 6
    // before appending the tens of minutes is the same as `hh * 60 + mm`.
    let mut offset = cursor.offset_digit()?;
    offset = offset * 10 + cursor.offset_digit()?;
    offset = offset * 6 + cursor.offset_digit()?;
    offset = offset * 10 + cursor.offset_digit()?;

    Ok(DateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
        utc_offset_minutes: offset_sign * offset,
    })
}

/// A date-time formatted as `YYYY-MM-DD hh:mm:ss ±OOOO`.
///
/// This is a fixed-width, lossy encoding: each field is written with a fixed
/// number of digits taken from its absolute value, so that years outside
/// 0–9999 wrap (year 12345 is written `2345`) and negative years lose their
/// sign. Only the UTC offset carries a sign.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FormattedDateTime {
    buf: [u8; FORMATTED_LEN],
}

impl FormattedDateTime {
    /// Returns the formatted date-time as a string slice.
    pub fn as_str(&self) -> &str {
        // The buffer only ever contains ASCII characters.
        core::str::from_utf8(&self.buf).unwrap_or_default()
    }

    /// Returns the formatted date-time as ASCII bytes.
    pub const fn as_bytes(&self) -> &[u8; FORMATTED_LEN] {
        &self.buf
    }
}

impl AsRef<str> for FormattedDateTime {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FormattedDateTime {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

impl fmt::Debug for FormattedDateTime {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), fmt)
    }
}

/// Formats a date-time as `YYYY-MM-DD hh:mm:ss ±OOOO`.
///
/// See [`FormattedDateTime`] for the limitations of this format.
///
/// # Examples
///
/// ```
/// use tai_calendar::{format, DateTime};
///
/// let dt = DateTime::new(2011, 3, 19).with_time(10, 0, 0).with_offset(-90);
///
/// assert_eq!(format(&dt).as_str(), "2011-03-19 10:00:00 -0130");
/// ```
pub fn format(dt: &DateTime) -> FormattedDateTime {
    let offset = dt.utc_offset_minutes.unsigned_abs();
    let (offset_hours, offset_minutes) = (offset / 60, offset % 60);

    let mut buf = *b"0000-00-00 00:00:00 +0000";
    write_digits(&mut buf[0..4], dt.year.unsigned_abs());
    write_digits(&mut buf[5..7], dt.month.unsigned_abs());
    write_digits(&mut buf[8..10], dt.day.unsigned_abs());
    write_digits(&mut buf[11..13], dt.hour.unsigned_abs());
    write_digits(&mut buf[14..16], dt.minute.unsigned_abs());
    write_digits(&mut buf[17..19], dt.second.unsigned_abs());
    if dt.utc_offset_minutes < 0 {
        buf[20] = b'-';
    }
    write_digits(&mut buf[21..23], offset_hours);
    write_digits(&mut buf[23..25], offset_minutes);

    FormattedDateTime { buf }
}

/// Writes the last `out.len()` decimal digits of `value`, most significant
/// first.
fn write_digits(out: &mut [u8], mut value: u64) {
    for c in out.iter_mut().rev() {
        *c = b'0' + (value % 10) as u8;
        value /= 10;
    }
}

impl FromStr for DateTime {
    type Err = ParseDateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&format(self), fmt)
    }
}

/// A bounds-checked read position over the input.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;

        Some(c)
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, separator: u8) -> Result<(), ParseDateTimeError> {
        if self.eat(separator) {
            Ok(())
        } else {
            Err(ParseDateTimeError::MissingSeparator {
                expected: separator as char,
                position: self.pos,
            })
        }
    }

    fn skip_while(&mut self, mut predicate: impl FnMut(u8) -> bool) {
        while self.peek().map_or(false, &mut predicate) {
            self.pos += 1;
        }
    }

    /// Consumes the longest run of digits, possibly empty.
    fn number(&mut self) -> Result<i64, ParseDateTimeError> {
        let start = self.pos;
        let mut value: i64 = 0;
        while let Some(c @ b'0'..=b'9') = self.peek() {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(c - b'0')))
                .ok_or(ParseDateTimeError::FieldOverflow { position: start })?;
            self.pos += 1;
        }

        Ok(value)
    }

    fn offset_digit(&mut self) -> Result<i64, ParseDateTimeError> {
        let position = self.pos;
        match self.bump() {
            Some(c @ b'0'..=b'9') => Ok(i64::from(c - b'0')),
            _ => Err(ParseDateTimeError::InvalidOffsetDigit { position }),
        }
    }
}
