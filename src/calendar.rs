//! Day counting for the 2000-2099 window.
//!
//! Days are counted from 2000-01-01, which is day 0. The leap rule is the
//! plain "divisible by four" rule: correct for every year in the window
//! because 2000 is a leap year and 2100 is outside of it.

use crate::SECONDS_PER_DAY;

/// Length of January through November. December is never looked up; it is
/// whatever remains of the year.
pub(crate) const DAYS_IN_MONTH: [u8; 11] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30];

/// Returns `true` if the year, given as an offset from 2000, is a leap year.
#[inline]
pub const fn is_leap_year(year_offset: u16) -> bool {
    year_offset % 4 == 0
}

/// Number of days from 2000-01-01 to the given date.
///
/// `year` may be a full year (2000-2099) or an offset from 2000 (0-99).
/// No validation is performed: out-of-range months contribute at most the
/// eleven tabulated month lengths, and day 0 of January 2000 wraps.
pub fn date_to_days(year: u16, month: u8, day: u8) -> u32 {
    let year = u32::from(if year >= 2000 { year - 2000 } else { year });
    let mut days = u32::from(day);
    for len in DAYS_IN_MONTH
        .iter()
        .take(usize::from(month.saturating_sub(1)))
    {
        days += u32::from(*len);
    }
    if month > 2 && year % 4 == 0 {
        days += 1;
    }
    (days + 365 * year + (year + 3) / 4).wrapping_sub(1)
}

/// Folds a day count and a time of day into a number of seconds.
///
/// Arithmetic is modulo 2^32, matching the width of the time scales.
#[inline]
pub const fn time_to_seconds(days: u32, hour: u8, minute: u8, second: u8) -> u32 {
    days.wrapping_mul(SECONDS_PER_DAY)
        .wrapping_add(hour as u32 * 3600)
        .wrapping_add(minute as u32 * 60)
        .wrapping_add(second as u32)
}

/// Splits a day count back into `(year_offset, month, day)`.
pub(crate) fn days_to_date(mut days: u32) -> (u16, u8, u8) {
    let mut year_offset = 0;
    let leap = loop {
        let leap = is_leap_year(year_offset);
        let year_len = 365 + u32::from(leap);
        if days < year_len {
            break leap;
        }
        days -= year_len;
        year_offset += 1;
    };

    let mut month = 1;
    while month < 12 {
        let mut month_len = u32::from(DAYS_IN_MONTH[usize::from(month - 1)]);
        if leap && month == 2 {
            month_len += 1;
        }
        if days < month_len {
            break;
        }
        days -= month_len;
        month += 1;
    }

    // What is left is below 31 whichever month we stopped in.
    (year_offset, month, days as u8 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn chrono_days(year: i32, month: u32, day: u32) -> u32 {
        let epoch = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        u32::try_from((date - epoch).num_days()).unwrap()
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(0));
        assert!(is_leap_year(4));
        assert!(is_leap_year(96));
        assert!(!is_leap_year(1));
        assert!(!is_leap_year(99));
    }

    #[test]
    fn test_date_to_days_known_values() {
        assert_eq!(date_to_days(2000, 1, 1), 0);
        assert_eq!(date_to_days(0, 1, 1), 0);
        assert_eq!(date_to_days(2000, 2, 29), 59);
        assert_eq!(date_to_days(2000, 3, 1), 60);
        assert_eq!(date_to_days(2001, 1, 1), 366);
        assert_eq!(date_to_days(2001, 3, 1), 366 + 59);
        assert_eq!(date_to_days(2099, 12, 31), 36_524);
    }

    #[test]
    fn test_date_to_days_matches_chrono() {
        for year in 2000..2100u16 {
            for month in 1..=12u8 {
                for day in [1u8, 15, 28] {
                    assert_eq!(
                        date_to_days(year, month, day),
                        chrono_days(i32::from(year), u32::from(month), u32::from(day)),
                        "{}-{}-{}",
                        year,
                        month,
                        day
                    );
                }
            }
        }
    }

    #[test]
    fn test_days_to_date_inverts_date_to_days() {
        for days in 0..=36_524u32 {
            let (year_offset, month, day) = days_to_date(days);
            assert_eq!(date_to_days(year_offset, month, day), days);
        }
    }

    #[test]
    fn test_days_to_date_boundaries() {
        assert_eq!(days_to_date(0), (0, 1, 1));
        assert_eq!(days_to_date(59), (0, 2, 29));
        assert_eq!(days_to_date(365), (0, 12, 31));
        assert_eq!(days_to_date(366), (1, 1, 1));
        assert_eq!(days_to_date(366 + 58), (1, 2, 28));
        assert_eq!(days_to_date(366 + 59), (1, 3, 1));
        assert_eq!(days_to_date(36_524), (99, 12, 31));
    }

    #[test]
    fn test_time_to_seconds() {
        assert_eq!(time_to_seconds(0, 0, 0, 0), 0);
        assert_eq!(time_to_seconds(1, 1, 1, 1), 90_061);
        assert_eq!(time_to_seconds(36_524, 23, 59, 59), 3_155_759_999);
    }

    #[test]
    fn test_out_of_range_month_does_not_panic() {
        // Only the eleven tabulated lengths are ever summed.
        assert_eq!(date_to_days(2001, 13, 1), date_to_days(2001, 12, 1));
        assert_eq!(date_to_days(2001, 0, 1), 366);
    }
}
