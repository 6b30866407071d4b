//! Text rendering and parsing for [`DateTime`].
//!
//! # Format tokens
//!
//! [`DateTime::format_into`] rewrites a caller-supplied template in place.
//! The template may contain any of the following tokens:
//!
//! | token  | output                                                  |
//! |--------|---------------------------------------------------------|
//! | `YYYY` | the year as a 4-digit number (2000-2099)                |
//! | `YY`   | the year as a 2-digit number (00-99)                    |
//! | `MM`   | the month as a 2-digit number (01-12)                   |
//! | `MMM`  | the abbreviated English month name (`Jan`-`Dec`)        |
//! | `DD`   | the day as a 2-digit number (01-31)                     |
//! | `DDD`  | the abbreviated English day of the week (`Sun`-`Sat`)   |
//! | `AP`   | either `AM` or `PM`                                     |
//! | `ap`   | either `am` or `pm`                                     |
//! | `hh`   | the hour as a 2-digit number (00-23 or 01-12)           |
//! | `mm`   | the minute as a 2-digit number (00-59)                  |
//! | `ss`   | the second as a 2-digit number (00-59)                  |
//!
//! If `AP` or `ap` appears anywhere in the template, `hh` is rendered on a
//! 12-hour clock. Every other byte is left untouched, and the template
//! never changes length.
//!
//! # Parsing
//!
//! Two fixed layouts are understood: the build timestamp pair produced by
//! compilers (`"Apr 16 2020"`, `"18:34:56"`) and ISO 8601
//! (`"2020-04-16T18:34:56"`). The infallible constructors extract digits
//! at fixed offsets and never reject anything; [`DateTime::parse_iso8601`]
//! (also used by [`FromStr`]) checks the layout and the date first.

use core::fmt;
use core::str::FromStr;

use crate::DateTime;

const DAY_NAMES: [&[u8; 3]; 7] = [b"Sun", b"Mon", b"Tue", b"Wed", b"Thu", b"Fri", b"Sat"];

const MONTH_NAMES: [&[u8; 3]; 12] = [
    b"Jan", b"Feb", b"Mar", b"Apr", b"May", b"Jun", b"Jul", b"Aug", b"Sep", b"Oct", b"Nov",
    b"Dec",
];

const BUILD_DATE_TEMPLATE: &[u8; 11] = b"Jan 01 2000";
const BUILD_TIME_TEMPLATE: &[u8; 8] = b"00:00:00";
const ISO8601_TEMPLATE: &[u8; 19] = b"2000-01-01T00:00:00";

/// Errors reported by [`DateTime::parse_iso8601`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Input is not exactly `YYYY-MM-DDThh:mm:ss` long
    InvalidLength,
    /// A digit position holds something else
    InvalidDigit,
    /// A separator (`-`, `T`, `:`) is missing or wrong
    InvalidSeparator,
    /// The year is not in 2000-2099
    YearOutOfRange,
    /// The text is well formed but names an impossible date or time
    InvalidDateTime,
}

/// Which parts of a [`DateTime`] [`DateTime::timestamp`] renders.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimestampFormat {
    /// `YYYY-MM-DDThh:mm:ss`
    #[default]
    Full,
    /// `hh:mm:ss`
    Time,
    /// `YYYY-MM-DD`
    Date,
}

/// An ISO 8601 rendering of a [`DateTime`], see [`DateTime::timestamp`].
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    datetime: DateTime,
    format: TimestampFormat,
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dt = &self.datetime;
        match self.format {
            TimestampFormat::Full => write!(
                f,
                "{}-{:02}-{:02}T{:02}:{:02}:{:02}",
                dt.year(),
                dt.month(),
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second()
            ),
            TimestampFormat::Time => {
                write!(f, "{:02}:{:02}:{:02}", dt.hour(), dt.minute(), dt.second())
            }
            TimestampFormat::Date => {
                write!(f, "{}-{:02}-{:02}", dt.year(), dt.month(), dt.day())
            }
        }
    }
}

/// Copies as much of `input` as fits over a copy of `template`.
fn overlay<const N: usize>(template: &[u8; N], input: &[u8]) -> [u8; N] {
    let mut buf = *template;
    let len = N.min(input.len());
    buf[..len].copy_from_slice(&input[..len]);
    buf
}

/// Two ASCII digits to a number. A non-digit in the tens place counts as
/// zero, so space-padded values like `" 6"` read as 6.
fn conv2d(p: &[u8]) -> u8 {
    let tens = if p[0].is_ascii_digit() { p[0] - b'0' } else { 0 };
    (10 * tens).wrapping_add(p[1].wrapping_sub(b'0'))
}

/// Month number for a three-letter English abbreviation, or 0.
fn month_from_abbreviation(abbreviation: &[u8]) -> u8 {
    match MONTH_NAMES
        .iter()
        .position(|name| name[..] == *abbreviation)
    {
        Some(index) => index as u8 + 1,
        None => {
            warn!("unrecognized month abbreviation {:?}", abbreviation);
            0
        }
    }
}

fn write_two_digits(dst: &mut [u8], value: u8) {
    dst[0] = b'0' + value / 10;
    dst[1] = b'0' + value % 10;
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

impl DateTime {
    /// Creates a `DateTime` from the build date and time strings emitted by
    /// compilers, e.g. `"Apr 16 2020"` and `"18:34:56"`.
    ///
    /// Fields are taken from fixed offsets. Input shorter than the layout
    /// is completed from `"Jan 01 2000"` / `"00:00:00"`. An unrecognized
    /// month name gives month 0, which [`DateTime::is_valid`] rejects.
    pub fn from_build_timestamp(date: impl AsRef<[u8]>, time: impl AsRef<[u8]>) -> Self {
        let date = overlay(BUILD_DATE_TEMPLATE, date.as_ref());
        let time = overlay(BUILD_TIME_TEMPLATE, time.as_ref());
        DateTime::new(
            u16::from(conv2d(&date[9..])),
            month_from_abbreviation(&date[..3]),
            conv2d(&date[4..]),
            conv2d(&time[0..]),
            conv2d(&time[3..]),
            conv2d(&time[6..]),
        )
    }

    /// Creates a `DateTime` from `"YYYY-MM-DDThh:mm:ss"`.
    ///
    /// Only the last two digits of the year are read; the century is
    /// assumed to be 20. The input is copied over `"2000-01-01T00:00:00"`
    /// first, so truncated input keeps the trailing fields of that template:
    /// `"2020-06-25"` reads as midnight. Use [`DateTime::parse_iso8601`] to
    /// reject such input instead.
    pub fn from_iso8601(s: impl AsRef<[u8]>) -> Self {
        let buf = overlay(ISO8601_TEMPLATE, s.as_ref());
        DateTime::new(
            u16::from(conv2d(&buf[2..])),
            conv2d(&buf[5..]),
            conv2d(&buf[8..]),
            conv2d(&buf[11..]),
            conv2d(&buf[14..]),
            conv2d(&buf[17..]),
        )
    }

    /// Parses exactly `"YYYY-MM-DDThh:mm:ss"`, rejecting malformed text,
    /// years outside 2000-2099 and impossible dates.
    pub fn parse_iso8601(s: impl AsRef<[u8]>) -> Result<Self, ParseError> {
        let bytes = s.as_ref();
        if bytes.len() != ISO8601_TEMPLATE.len() {
            debug!("iso8601: expected {} bytes, got {}", ISO8601_TEMPLATE.len(), bytes.len());
            return Err(ParseError::InvalidLength);
        }
        for (&b, &expected) in bytes.iter().zip(ISO8601_TEMPLATE.iter()) {
            if expected.is_ascii_digit() {
                if !b.is_ascii_digit() {
                    return Err(ParseError::InvalidDigit);
                }
            } else if b != expected {
                return Err(ParseError::InvalidSeparator);
            }
        }
        if bytes[..2] != *b"20" {
            return Err(ParseError::YearOutOfRange);
        }
        let datetime = Self::from_iso8601(bytes);
        if !datetime.is_valid() {
            return Err(ParseError::InvalidDateTime);
        }
        Ok(datetime)
    }

    /// Renders this `DateTime` into `buffer`, which holds the template.
    ///
    /// See the [module documentation](crate::text) for the token table.
    /// Returns `buffer` for convenience.
    ///
    /// ```
    /// use rtc_calendar::DateTime;
    ///
    /// let mut buffer = *b"DDD, DD MMM YYYY hh:mm:ss";
    /// DateTime::new(2020, 4, 16, 18, 34, 56).format_into(&mut buffer);
    /// assert_eq!(&buffer, b"Thu, 16 Apr 2020 18:34:56");
    /// ```
    pub fn format_into<'a>(&self, buffer: &'a mut [u8]) -> &'a mut [u8] {
        let twelve_hour = contains(buffer, b"AP") || contains(buffer, b"ap");
        let hour = if twelve_hour {
            self.twelve_hour()
        } else {
            self.hour()
        };
        let year = (self.year_offset() % 100) as u8;
        let month_name = MONTH_NAMES
            .get(usize::from(self.month()).wrapping_sub(1))
            .copied()
            .unwrap_or(b"???");
        let day_name = DAY_NAMES[usize::from(self.day_of_week())];
        trace!("format_into: {} bytes, twelve_hour={}", buffer.len(), twelve_hour);

        for i in 0..buffer.len().saturating_sub(1) {
            let rest = &mut buffer[i..];
            if rest.starts_with(b"DDD") {
                rest[..3].copy_from_slice(day_name);
            } else if rest.starts_with(b"DD") {
                write_two_digits(rest, self.day());
            }
            if rest.starts_with(b"MMM") {
                rest[..3].copy_from_slice(month_name);
            } else if rest.starts_with(b"MM") {
                write_two_digits(rest, self.month());
            }
            if rest.starts_with(b"YYYY") {
                rest[..2].copy_from_slice(b"20");
                write_two_digits(&mut rest[2..], year);
            } else if rest.starts_with(b"YY") {
                write_two_digits(rest, year);
            }
            if rest.starts_with(b"hh") {
                write_two_digits(rest, hour);
            }
            if rest.starts_with(b"mm") {
                write_two_digits(rest, self.minute());
            }
            if rest.starts_with(b"ss") {
                write_two_digits(rest, self.second());
            }
            if rest.starts_with(b"AP") {
                rest[..2].copy_from_slice(if self.is_pm() { b"PM" } else { b"AM" });
            } else if rest.starts_with(b"ap") {
                rest[..2].copy_from_slice(if self.is_pm() { b"pm" } else { b"am" });
            }
        }
        buffer
    }

    /// Like [`DateTime::format_into`], but takes the template by value and
    /// returns the rendered copy.
    ///
    /// ```
    /// use rtc_calendar::DateTime;
    ///
    /// let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
    /// assert_eq!(&dt.format(*b"hh:mm AP"), b"06:34 PM");
    /// ```
    pub fn format<const N: usize>(&self, mut template: [u8; N]) -> [u8; N] {
        self.format_into(&mut template);
        template
    }

    /// Returns an ISO 8601 [`Display`](fmt::Display) adapter.
    ///
    /// ```
    /// use rtc_calendar::{DateTime, TimestampFormat};
    ///
    /// let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
    /// assert_eq!(format!("{}", dt.timestamp(TimestampFormat::Date)), "2020-04-16");
    /// ```
    pub fn timestamp(&self, format: TimestampFormat) -> Timestamp {
        Timestamp {
            datetime: *self,
            format,
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.timestamp(TimestampFormat::Full), f)
    }
}

impl FromStr for DateTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso8601(s)
    }
}
