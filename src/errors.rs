//! Error types.

use core::fmt;

/// The error type returned when a date-time string does not have the expected
/// structure.
///
/// Parsing is purely lexical: out-of-range field values such as month 13 are
/// never reported as errors.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseDateTimeError {
    /// A mandatory separator is missing at the given byte position.
    MissingSeparator {
        /// The separator that was expected.
        expected: char,
        /// Byte offset in the input.
        position: usize,
    },
    /// The UTC offset does not start with `+` or `-`.
    InvalidOffsetSign {
        /// Byte offset in the input.
        position: usize,
    },
    /// One of the 4 digits of the UTC offset is missing or is not a digit.
    InvalidOffsetDigit {
        /// Byte offset in the input.
        position: usize,
    },
    /// A numeric field has too many digits to be represented.
    FieldOverflow {
        /// Byte offset of the first digit of the field.
        position: usize,
    },
}

impl fmt::Display for ParseDateTimeError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator { expected, position } => {
                write!(fmt, "expected '{}' at position {}", expected, position)
            }
            Self::InvalidOffsetSign { position } => write!(
                fmt,
                "expected UTC offset sign '+' or '-' at position {}",
                position
            ),
            Self::InvalidOffsetDigit { position } => {
                write!(fmt, "expected UTC offset digit at position {}", position)
            }
            Self::FieldOverflow { position } => {
                write!(fmt, "numeric field at position {} is too large", position)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseDateTimeError {}

/// The error type returned when the leap-second table cannot be loaded.
///
/// Whatever the error, the table retains the entries it held before the
/// failed load.
#[cfg(feature = "std")]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadError {
    /// The byte source could not be opened or read.
    Io(std::io::ErrorKind),
    /// The byte source ended before its announced length.
    ShortRead {
        /// Number of bytes announced by the source.
        expected: usize,
        /// Number of bytes actually read.
        actual: usize,
    },
    /// The length of the byte stream is not a multiple of 8.
    MisalignedLength(usize),
    /// The entry at this index is not strictly greater than its predecessor.
    Unsorted {
        /// Index of the offending entry.
        index: usize,
    },
    /// The buffer for the byte stream could not be allocated.
    OutOfMemory,
}

#[cfg(feature = "std")]
impl fmt::Display for LoadError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(kind) => write!(fmt, "could not read leap-second source: {}", kind),
            Self::ShortRead { expected, actual } => write!(
                fmt,
                "short read on leap-second source: {} of {} bytes",
                actual, expected
            ),
            Self::MisalignedLength(len) => write!(
                fmt,
                "leap-second source length {} is not a multiple of 8",
                len
            ),
            Self::Unsorted { index } => write!(
                fmt,
                "leap-second entry {} is not in strictly ascending order",
                index
            ),
            Self::OutOfMemory => "could not allocate the leap-second buffer".fmt(fmt),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LoadError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.kind())
    }
}
