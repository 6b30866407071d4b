//! Calendar timestamps for the 2000-2099 window.
//!
//! A [`DateTime`] stores its six calendar fields exactly as given. Nothing
//! is rejected at construction: `DateTime::new(2021, 2, 30, 0, 0, 0)` is a
//! perfectly good value, it just isn't a real date. Use
//! [`DateTime::is_valid`] before trusting a value built from arbitrary
//! components or parsed text.
//!
//! # Time scales
//!
//! Two linear scales are supported, both 32-bit unsigned seconds with no
//! notion of time zone:
//! - seconds since 1970-01-01 00:00:00 ([`DateTime::unixtime`])
//! - seconds since 2000-01-01 00:00:00 ([`DateTime::seconds_since_2000`])
//!
//! # Error Handling
//!
//! Conversions that can fail report [`DateTimeError`].

use core::ops::{Add, Sub};

use crate::calendar::{date_to_days, days_to_date, time_to_seconds};
use crate::{TimeSpan, SECONDS_FROM_1970_TO_2000};

/// A calendar date and time between 2000-01-01 and 2099-12-31.
///
/// Ordering is lexicographic over year, month, day, hour, minute, second;
/// equality is field-wise. Both are meaningless if either side is invalid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    // Field order drives the derived ordering.
    year_offset: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl DateTime {
    /// Creates a `DateTime` from its components.
    ///
    /// `year` may be either the full year (2000-2099) or the offset from 2000
    /// (0-99). Values are stored as given.
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        let year_offset = if year >= 2000 { year - 2000 } else { year };
        Self {
            year_offset,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Creates a `DateTime` at midnight of the given date.
    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Creates a `DateTime` from seconds elapsed since 1970-01-01 00:00:00.
    ///
    /// Values before 2000 wrap around and land after 2099, which
    /// [`DateTime::is_valid`] reports as invalid.
    pub fn from_unixtime(t: u32) -> Self {
        let mut t = t.wrapping_sub(SECONDS_FROM_1970_TO_2000);
        let second = (t % 60) as u8;
        t /= 60;
        let minute = (t % 60) as u8;
        t /= 60;
        let hour = (t % 24) as u8;
        let (year_offset, month, day) = days_to_date(t / 24);
        Self {
            year_offset,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Creates a `DateTime` from seconds elapsed since 2000-01-01 00:00:00.
    pub fn from_seconds_since_2000(t: u32) -> Self {
        Self::from_unixtime(t.wrapping_add(SECONDS_FROM_1970_TO_2000))
    }

    /// Full year (2000-2099 for valid values).
    pub const fn year(&self) -> u16 {
        2000 + self.year_offset
    }

    /// Offset of the year from 2000.
    pub const fn year_offset(&self) -> u16 {
        self.year_offset
    }

    /// Month (1-12).
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day of the month (1-31).
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Hour (0-23).
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute (0-59).
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Second (0-59).
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Hour on a 12-hour clock (1-12). Midnight and noon are both 12.
    pub const fn twelve_hour(&self) -> u8 {
        match self.hour {
            0 | 12 => 12,
            h if h > 12 => h - 12,
            h => h,
        }
    }

    /// Returns `true` from noon onwards.
    pub const fn is_pm(&self) -> bool {
        self.hour >= 12
    }

    /// Day of the week, 0 (Sunday) to 6 (Saturday).
    pub fn day_of_week(&self) -> u8 {
        let days = date_to_days(self.year_offset, self.month, self.day);
        // 2000-01-01 was a Saturday.
        (days.wrapping_add(6) % 7) as u8
    }

    /// Seconds elapsed since 2000-01-01 00:00:00.
    pub fn seconds_since_2000(&self) -> u32 {
        let days = date_to_days(self.year_offset, self.month, self.day);
        time_to_seconds(days, self.hour, self.minute, self.second)
    }

    /// Seconds elapsed since 1970-01-01 00:00:00.
    ///
    /// [`DateTime::from_unixtime`] is the inverse.
    pub fn unixtime(&self) -> u32 {
        self.seconds_since_2000()
            .wrapping_add(SECONDS_FROM_1970_TO_2000)
    }

    /// Checks that the fields describe a real date and time.
    ///
    /// The value is sent through the Unix time scale and back; any
    /// impossible combination (30 February, month 13, hour 24, ...)
    /// normalizes on the way and no longer compares equal.
    pub fn is_valid(&self) -> bool {
        if self.year_offset >= 100 {
            debug!("year offset {} out of range", self.year_offset);
            return false;
        }
        let normalized = Self::from_unixtime(self.unixtime());
        if *self != normalized {
            debug!("invalid datetime {:?} normalizes to {:?}", self, normalized);
            return false;
        }
        true
    }
}

impl Default for DateTime {
    /// 2000-01-01 00:00:00, the earliest representable instant.
    fn default() -> Self {
        Self::from_unixtime(SECONDS_FROM_1970_TO_2000)
    }
}

impl Add<TimeSpan> for DateTime {
    type Output = DateTime;

    fn add(self, span: TimeSpan) -> DateTime {
        DateTime::from_unixtime(self.unixtime().wrapping_add_signed(span.total_seconds()))
    }
}

impl Sub<TimeSpan> for DateTime {
    type Output = DateTime;

    fn sub(self, span: TimeSpan) -> DateTime {
        // Two's complement: a negative span moves forward.
        DateTime::from_unixtime(self.unixtime().wrapping_sub(span.total_seconds() as u32))
    }
}

impl Sub for DateTime {
    type Output = TimeSpan;

    /// Time elapsed from `rhs` to `self`. Negative if `rhs` is later.
    fn sub(self, rhs: DateTime) -> TimeSpan {
        TimeSpan::from_seconds(self.unixtime().wrapping_sub(rhs.unixtime()) as i32)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors that can occur when a `DateTime` has to be a real date.
pub enum DateTimeError {
    /// The date/time is not a real calendar date or time of day
    InvalidDateTime,
    /// The year is before 2000
    YearNotAfter1999,
    /// The year is after 2099
    YearNotBefore2100,
}
