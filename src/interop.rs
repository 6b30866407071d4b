//! Conversions to and from chrono's `NaiveDateTime`.
//!
//! Only real dates convert: an invalid [`DateTime`] has no chrono
//! counterpart, and chrono values outside 2000-2099 have no [`DateTime`]
//! counterpart. Sub-second precision is dropped.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::{DateTime, DateTimeError};

impl TryFrom<DateTime> for NaiveDateTime {
    type Error = DateTimeError;

    fn try_from(datetime: DateTime) -> Result<Self, Self::Error> {
        if !datetime.is_valid() {
            return Err(DateTimeError::InvalidDateTime);
        }
        NaiveDate::from_ymd_opt(
            i32::from(datetime.year()),
            u32::from(datetime.month()),
            u32::from(datetime.day()),
        )
        .and_then(|d| {
            d.and_hms_opt(
                u32::from(datetime.hour()),
                u32::from(datetime.minute()),
                u32::from(datetime.second()),
            )
        })
        .ok_or(DateTimeError::InvalidDateTime)
    }
}

impl TryFrom<&NaiveDateTime> for DateTime {
    type Error = DateTimeError;

    fn try_from(datetime: &NaiveDateTime) -> Result<Self, Self::Error> {
        let year = datetime.year();
        if year > 2099 {
            error!("Year {} is too late! must be before 2100", year);
            return Err(DateTimeError::YearNotBefore2100);
        }
        if year < 2000 {
            error!("Year {} is too early! must be greater than 1999", year);
            return Err(DateTimeError::YearNotAfter1999);
        }
        // Every field is range-checked by chrono or the test above.
        Ok(DateTime::new(
            year as u16,
            datetime.month() as u8,
            datetime.day() as u8,
            datetime.hour() as u8,
            datetime.minute() as u8,
            // A leap second shows up as nanoseconds, not as second 60.
            datetime.second() as u8,
        ))
    }
}

impl TryFrom<NaiveDateTime> for DateTime {
    type Error = DateTimeError;

    fn try_from(datetime: NaiveDateTime) -> Result<Self, Self::Error> {
        DateTime::try_from(&datetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_to_chrono() {
        let dt = DateTime::new(2024, 3, 14, 15, 30, 0);
        let ndt = NaiveDateTime::try_from(dt).unwrap();
        assert_eq!(ndt, naive(2024, 3, 14, 15, 30, 0));
        assert_eq!(i64::from(dt.unixtime()), ndt.and_utc().timestamp());
    }

    #[test]
    fn test_to_chrono_invalid() {
        let dt = DateTime::new(2023, 2, 29, 0, 0, 0);
        assert!(matches!(
            NaiveDateTime::try_from(dt),
            Err(DateTimeError::InvalidDateTime)
        ));
    }

    #[test]
    fn test_from_chrono() {
        let ndt = naive(2099, 12, 31, 23, 59, 59);
        let dt = DateTime::try_from(&ndt).unwrap();
        assert_eq!(dt, DateTime::new(2099, 12, 31, 23, 59, 59));
        assert_eq!(DateTime::try_from(ndt).unwrap(), dt);
    }

    #[test]
    fn test_from_chrono_year_too_early() {
        let ndt = naive(1999, 12, 31, 23, 59, 59);
        assert!(matches!(
            DateTime::try_from(&ndt),
            Err(DateTimeError::YearNotAfter1999)
        ));
    }

    #[test]
    fn test_from_chrono_year_too_late() {
        let ndt = naive(2100, 1, 1, 0, 0, 0);
        assert!(matches!(
            DateTime::try_from(&ndt),
            Err(DateTimeError::YearNotBefore2100)
        ));
    }

    #[test]
    fn test_chrono_round_trip() {
        for (y, m, d) in [(2000, 1, 1), (2000, 2, 29), (2024, 12, 31), (2099, 6, 15)] {
            let ndt = naive(y, m, d, 1, 2, 3);
            let dt = DateTime::try_from(&ndt).unwrap();
            assert!(dt.is_valid());
            assert_eq!(NaiveDateTime::try_from(dt).unwrap(), ndt);
        }
    }
}
