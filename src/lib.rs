//! # RTC Calendar
//!
//! A platform-agnostic, `no_std` calendar engine for real-time clocks that
//! count years 2000-2099.
//!
//! The bus driver of a clock chip only moves bytes; this crate gives those
//! bytes meaning. It converts between calendar fields and linear time,
//! does arithmetic with signed durations, renders and parses text, and
//! encodes/decodes the BCD register records the chip exchanges.
//!
//! ## Features
//!
//! - [`DateTime`]: calendar timestamps with a round-trip validity check
//! - [`TimeSpan`]: signed durations with day/hour/minute/second digits
//! - Seconds since 1970 and since 2000, with exact inverses
//! - In-place template formatting (`"DDD, DD MMM YYYY hh:mm:ss"`)
//! - ISO 8601 and compiler build-timestamp parsing
//! - BCD register records for time, timestamps and alarms
//! - Conversions to and from chrono's `NaiveDateTime`
//! - Optional logging support via `log` or `defmt`
//!
//! ## Usage
//!
//! ```rust
//! use rtc_calendar::{DateTime, TimeSpan};
//!
//! let start = DateTime::new(2024, 2, 28, 23, 30, 0);
//! let later = start + TimeSpan::new(1, 0, 45, 0);
//! assert_eq!(later, DateTime::new(2024, 3, 1, 0, 15, 0));
//! assert_eq!((later - start).total_seconds(), 89_100);
//!
//! let mut buffer = *b"DDD DD MMM YYYY hh:mm AP";
//! later.format_into(&mut buffer);
//! assert_eq!(&buffer, b"Fri 01 Mar 2024 12:15 AM");
//! ```
//!
//! ## Validity
//!
//! Nothing is rejected at construction. `DateTime::new(2023, 2, 30, 0, 0, 0)`
//! builds fine and [`DateTime::is_valid`] returns `false`. Ordering and
//! equality between invalid values are meaningless.
//!
//! ## Register records
//!
//! ```rust
//! use rtc_calendar::{DateTime, TimeRegisters};
//!
//! // Seven bytes read from the seconds register onwards.
//! let raw = TimeRegisters::from([0x56, 0x34, 0x18, 0x16, 0x04, 0x04, 0x20]);
//! let now = raw.to_datetime();
//! assert!(now.is_valid());
//! assert_eq!(now, DateTime::new(2020, 4, 16, 18, 34, 56));
//!
//! let bytes: [u8; 7] = (&TimeRegisters::from_datetime(&now).unwrap()).into();
//! assert_eq!(bytes, [0x56, 0x34, 0x18, 0x16, 0x00, 0x04, 0x20]);
//! ```
//!
//! ## Features flags
//!
//! - `log`: Enables logging via the `log` crate
//! - `defmt`: Enables logging via `defmt` and derives `defmt::Format`
#![no_std]

#[macro_use]
mod fmt;

pub mod bcd;
pub mod calendar;
mod datetime;
mod interop;
pub mod registers;
pub mod text;
mod timespan;

pub use datetime::{DateTime, DateTimeError};
pub use registers::{AlarmRegisters, TimeRegisters, TimestampRegisters};
pub use text::{ParseError, Timestamp, TimestampFormat};
pub use timespan::TimeSpan;

/// Seconds in a day.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Unix time of 2000-01-01 00:00:00.
pub const SECONDS_FROM_1970_TO_2000: u32 = 946_684_800;
