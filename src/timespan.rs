//! Signed durations with one-second resolution.

use core::ops::{Add, Sub};

use crate::SECONDS_PER_DAY;

/// A signed span of time, stored as a number of seconds.
///
/// The [`days`](TimeSpan::days), [`hours`](TimeSpan::hours),
/// [`minutes`](TimeSpan::minutes) and [`seconds`](TimeSpan::seconds)
/// accessors report place-value digits, not totals: a span of 4 days and
/// 3 hours has `hours() == 3`, not 99.
///
/// Negative spans are allowed; every digit then carries the sign.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSpan {
    seconds: i32,
}

impl TimeSpan {
    /// Creates a span from a raw number of seconds.
    pub const fn from_seconds(seconds: i32) -> Self {
        Self { seconds }
    }

    /// Creates a span from days, hours, minutes and seconds.
    ///
    /// Each component may be negative on its own; the components are simply
    /// weighted and summed.
    ///
    /// ```
    /// use rtc_calendar::TimeSpan;
    ///
    /// // 3 hours 45 minutes
    /// assert_eq!(TimeSpan::new(0, 3, 45, 0).total_seconds(), 13_500);
    /// ```
    pub const fn new(days: i16, hours: i8, minutes: i8, seconds: i8) -> Self {
        Self {
            seconds: (days as i32)
                .wrapping_mul(SECONDS_PER_DAY as i32)
                .wrapping_add(hours as i32 * 3600)
                .wrapping_add(minutes as i32 * 60)
                .wrapping_add(seconds as i32),
        }
    }

    /// Whole days.
    pub const fn days(&self) -> i16 {
        (self.seconds / SECONDS_PER_DAY as i32) as i16
    }

    /// Hours within the current day (-23 to 23).
    pub const fn hours(&self) -> i8 {
        (self.seconds / 3600 % 24) as i8
    }

    /// Minutes within the current hour (-59 to 59).
    pub const fn minutes(&self) -> i8 {
        (self.seconds / 60 % 60) as i8
    }

    /// Seconds within the current minute (-59 to 59).
    pub const fn seconds(&self) -> i8 {
        (self.seconds % 60) as i8
    }

    /// Total length of the span in seconds.
    pub const fn total_seconds(&self) -> i32 {
        self.seconds
    }
}

impl From<i32> for TimeSpan {
    fn from(seconds: i32) -> Self {
        Self::from_seconds(seconds)
    }
}

impl Add for TimeSpan {
    type Output = TimeSpan;

    fn add(self, rhs: TimeSpan) -> TimeSpan {
        TimeSpan::from_seconds(self.seconds.wrapping_add(rhs.seconds))
    }
}

impl Sub for TimeSpan {
    type Output = TimeSpan;

    fn sub(self, rhs: TimeSpan) -> TimeSpan {
        TimeSpan::from_seconds(self.seconds.wrapping_sub(rhs.seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_components() {
        let span = TimeSpan::new(1, 2, 3, 4);
        assert_eq!(span.total_seconds(), 86_400 + 2 * 3600 + 3 * 60 + 4);
        assert_eq!(span.days(), 1);
        assert_eq!(span.hours(), 2);
        assert_eq!(span.minutes(), 3);
        assert_eq!(span.seconds(), 4);
    }

    #[test]
    fn test_decomposition_is_place_value() {
        let span = TimeSpan::from_seconds(90_061);
        assert_eq!(span.days(), 1);
        assert_eq!(span.hours(), 1);
        assert_eq!(span.minutes(), 1);
        assert_eq!(span.seconds(), 1);

        // 4 days 3 hours is 99 hours in total, but reports 3
        let span = TimeSpan::new(4, 3, 0, 0);
        assert_eq!(span.total_seconds() / 3600, 99);
        assert_eq!(span.hours(), 3);
    }

    #[test]
    fn test_mixed_sign_components() {
        // One day minus one hour
        let span = TimeSpan::new(1, -1, 0, 0);
        assert_eq!(span.total_seconds(), 82_800);
        assert_eq!(span.days(), 0);
        assert_eq!(span.hours(), 23);
    }

    #[test]
    fn test_negative_span() {
        let span = TimeSpan::from_seconds(-90_061);
        assert_eq!(span.days(), -1);
        assert_eq!(span.hours(), -1);
        assert_eq!(span.minutes(), -1);
        assert_eq!(span.seconds(), -1);
        assert_eq!(TimeSpan::new(-1, -1, -1, -1), span);
    }

    #[test]
    fn test_add_and_subtract() {
        let a = TimeSpan::new(0, 1, 0, 0);
        let b = TimeSpan::new(0, 0, 30, 0);
        assert_eq!((a + b).total_seconds(), 5400);
        assert_eq!((a - b).total_seconds(), 1800);
        assert_eq!((b - a).total_seconds(), -1800);
        assert_eq!(TimeSpan::from(i32::MAX) + TimeSpan::from(1), TimeSpan::from(i32::MIN));
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(TimeSpan::default().total_seconds(), 0);
    }
}
