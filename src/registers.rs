//! BCD register records exchanged with the RTC.
//!
//! The clock chip stores each calendar field as packed BCD, sharing some
//! bytes with status flags. The bitfield types below split each byte into
//! its BCD payload and flag bits; the record types group them the way the
//! chip lays them out for a single burst read or write.
//!
//! # Record layouts
//!
//! | record                   | bytes                                              |
//! |--------------------------|----------------------------------------------------|
//! | [`TimeRegisters`]        | second, minute, hour, day, weekday, month, year    |
//! | [`TimestampRegisters`]   | second, minute, hour, day, month, year             |
//! | [`AlarmRegisters`]       | second, minute, hour, day, month                   |
//!
//! Decoding never fails; the bus is trusted to deliver valid BCD, and
//! [`DateTime::is_valid`] is the place to check the result. Encoding
//! checks the [`DateTime`] first and fails with
//! [`DateTimeError::InvalidDateTime`].

use bitfield::bitfield;

use crate::{bcd, DateTime, DateTimeError};

// This macro generates the From<u8> and Into<u8> implementations for the
// register type
macro_rules! from_register_u8 {
    ($typ:ty) => {
        impl From<u8> for $typ {
            fn from(v: u8) -> Self {
                paste::paste!([< $typ >](v))
            }
        }
        impl From<$typ> for u8 {
            fn from(v: $typ) -> Self {
                v.0
            }
        }
    };
}

bitfield! {
    /// Seconds register (0-59) with oscillator-stop flag.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Seconds(u8);
    impl Debug;
    /// Oscillator stopped; the time may be wrong
    pub oscillator_stopped, set_oscillator_stopped: 7;
    /// BCD seconds
    pub bcd, set_bcd: 6, 0;
}
from_register_u8!(Seconds);

bitfield! {
    /// Minutes register (0-59) with event-monitor flag.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Minutes(u8);
    impl Debug;
    /// Event monitor flag
    pub event_monitor, set_event_monitor: 7;
    /// BCD minutes
    pub bcd, set_bcd: 6, 0;
}
from_register_u8!(Minutes);

bitfield! {
    /// Hours register (0-23).
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Hours(u8);
    impl Debug;
    /// BCD hours
    pub bcd, set_bcd: 5, 0;
}
from_register_u8!(Hours);

bitfield! {
    /// Day of month register (1-31).
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Days(u8);
    impl Debug;
    /// BCD day of month
    pub bcd, set_bcd: 5, 0;
}
from_register_u8!(Days);

bitfield! {
    /// Day of week register (0-6).
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Weekdays(u8);
    impl Debug;
    /// Day of week
    pub weekday, set_weekday: 2, 0;
}
from_register_u8!(Weekdays);

bitfield! {
    /// Month register (1-12).
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Months(u8);
    impl Debug;
    /// BCD month
    pub bcd, set_bcd: 4, 0;
}
from_register_u8!(Months);

bitfield! {
    /// Year register (0-99), offset from 2000.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Years(u8);
    impl Debug;
    /// BCD year offset
    pub bcd, set_bcd: 7, 0;
}
from_register_u8!(Years);

#[cfg(feature = "defmt")]
impl defmt::Format for Seconds {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Seconds({}s", bcd::decode(self.bcd()));
        if self.oscillator_stopped() {
            defmt::write!(f, ", OS");
        }
        defmt::write!(f, ")");
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Minutes {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Minutes({}m", bcd::decode(self.bcd()));
        if self.event_monitor() {
            defmt::write!(f, ", EMON");
        }
        defmt::write!(f, ")");
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Hours {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Hours({}h)", bcd::decode(self.bcd()));
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Days {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Days({})", bcd::decode(self.bcd()));
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Weekdays {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Weekdays({})", self.weekday());
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Months {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Months({})", bcd::decode(self.bcd()));
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Years {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Years({})", bcd::decode(self.bcd()));
    }
}

// Shared field encoding for all three records.
fn encode_seconds(datetime: &DateTime) -> Seconds {
    let mut value = Seconds::default();
    value.set_bcd(bcd::encode(datetime.second()));
    value
}

fn encode_minutes(datetime: &DateTime) -> Minutes {
    let mut value = Minutes::default();
    value.set_bcd(bcd::encode(datetime.minute()));
    value
}

fn encode_hours(datetime: &DateTime) -> Hours {
    let mut value = Hours::default();
    value.set_bcd(bcd::encode(datetime.hour()));
    value
}

fn encode_days(datetime: &DateTime) -> Days {
    let mut value = Days::default();
    value.set_bcd(bcd::encode(datetime.day()));
    value
}

fn encode_months(datetime: &DateTime) -> Months {
    let mut value = Months::default();
    value.set_bcd(bcd::encode(datetime.month()));
    value
}

fn encode_years(datetime: &DateTime) -> Years {
    // Only called on valid values, so the offset is below 100.
    let mut value = Years::default();
    value.set_bcd(bcd::encode(datetime.year_offset() as u8));
    value
}

fn check_valid(datetime: &DateTime) -> Result<(), DateTimeError> {
    if datetime.is_valid() {
        Ok(())
    } else {
        error!("refusing to encode invalid datetime {:?}", datetime);
        Err(DateTimeError::InvalidDateTime)
    }
}

/// The running clock: seven registers from seconds to years.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeRegisters {
    seconds: Seconds,
    minutes: Minutes,
    hours: Hours,
    days: Days,
    weekdays: Weekdays,
    months: Months,
    years: Years,
}

impl TimeRegisters {
    /// Encodes a `DateTime` for a register write. The weekday register is
    /// written as 0.
    pub fn from_datetime(datetime: &DateTime) -> Result<Self, DateTimeError> {
        check_valid(datetime)?;
        let raw = TimeRegisters {
            seconds: encode_seconds(datetime),
            minutes: encode_minutes(datetime),
            hours: encode_hours(datetime),
            days: encode_days(datetime),
            weekdays: Weekdays::default(),
            months: encode_months(datetime),
            years: encode_years(datetime),
        };
        debug!("raw={:?}", raw);
        Ok(raw)
    }

    /// Decodes the registers, ignoring flag bits and the weekday.
    pub fn to_datetime(&self) -> DateTime {
        debug!("raw={:?}", self);
        DateTime::new(
            u16::from(bcd::decode(self.years.bcd())),
            bcd::decode(self.months.bcd()),
            bcd::decode(self.days.bcd()),
            bcd::decode(self.hours.bcd()),
            bcd::decode(self.minutes.bcd()),
            bcd::decode(self.seconds.bcd()),
        )
    }

    /// Returns `true` if the oscillator stopped since the flag was last
    /// cleared, meaning the clock can't be trusted.
    pub fn oscillator_stopped(&self) -> bool {
        self.seconds.oscillator_stopped()
    }

    /// Raw weekday register.
    pub fn weekday(&self) -> u8 {
        self.weekdays.weekday()
    }
}

impl From<[u8; 7]> for TimeRegisters {
    fn from(data: [u8; 7]) -> Self {
        TimeRegisters {
            seconds: Seconds(data[0]),
            minutes: Minutes(data[1]),
            hours: Hours(data[2]),
            days: Days(data[3]),
            weekdays: Weekdays(data[4]),
            months: Months(data[5]),
            years: Years(data[6]),
        }
    }
}

impl From<&TimeRegisters> for [u8; 7] {
    fn from(raw: &TimeRegisters) -> [u8; 7] {
        [
            raw.seconds.0,
            raw.minutes.0,
            raw.hours.0,
            raw.days.0,
            raw.weekdays.0,
            raw.months.0,
            raw.years.0,
        ]
    }
}

impl TryFrom<&DateTime> for TimeRegisters {
    type Error = DateTimeError;

    fn try_from(datetime: &DateTime) -> Result<Self, Self::Error> {
        Self::from_datetime(datetime)
    }
}

impl From<&TimeRegisters> for DateTime {
    fn from(raw: &TimeRegisters) -> DateTime {
        raw.to_datetime()
    }
}

/// A captured timestamp: six registers, no weekday.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimestampRegisters {
    seconds: Seconds,
    minutes: Minutes,
    hours: Hours,
    days: Days,
    months: Months,
    years: Years,
}

impl TimestampRegisters {
    /// Encodes a `DateTime` for a register write.
    pub fn from_datetime(datetime: &DateTime) -> Result<Self, DateTimeError> {
        check_valid(datetime)?;
        Ok(TimestampRegisters {
            seconds: encode_seconds(datetime),
            minutes: encode_minutes(datetime),
            hours: encode_hours(datetime),
            days: encode_days(datetime),
            months: encode_months(datetime),
            years: encode_years(datetime),
        })
    }

    /// Decodes the registers, ignoring flag bits.
    pub fn to_datetime(&self) -> DateTime {
        DateTime::new(
            u16::from(bcd::decode(self.years.bcd())),
            bcd::decode(self.months.bcd()),
            bcd::decode(self.days.bcd()),
            bcd::decode(self.hours.bcd()),
            bcd::decode(self.minutes.bcd()),
            bcd::decode(self.seconds.bcd()),
        )
    }
}

impl From<[u8; 6]> for TimestampRegisters {
    fn from(data: [u8; 6]) -> Self {
        TimestampRegisters {
            seconds: Seconds(data[0]),
            minutes: Minutes(data[1]),
            hours: Hours(data[2]),
            days: Days(data[3]),
            months: Months(data[4]),
            years: Years(data[5]),
        }
    }
}

impl From<&TimestampRegisters> for [u8; 6] {
    fn from(raw: &TimestampRegisters) -> [u8; 6] {
        [
            raw.seconds.0,
            raw.minutes.0,
            raw.hours.0,
            raw.days.0,
            raw.months.0,
            raw.years.0,
        ]
    }
}

/// An alarm setting: five registers, no year.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmRegisters {
    seconds: Seconds,
    minutes: Minutes,
    hours: Hours,
    days: Days,
    months: Months,
}

impl AlarmRegisters {
    /// Encodes a `DateTime` for a register write. The year is dropped.
    pub fn from_datetime(datetime: &DateTime) -> Result<Self, DateTimeError> {
        check_valid(datetime)?;
        Ok(AlarmRegisters {
            seconds: encode_seconds(datetime),
            minutes: encode_minutes(datetime),
            hours: encode_hours(datetime),
            days: encode_days(datetime),
            months: encode_months(datetime),
        })
    }

    /// Decodes the registers into a `DateTime` in the year 2000.
    pub fn to_datetime(&self) -> DateTime {
        DateTime::new(
            2000,
            bcd::decode(self.months.bcd()),
            bcd::decode(self.days.bcd()),
            bcd::decode(self.hours.bcd()),
            bcd::decode(self.minutes.bcd()),
            bcd::decode(self.seconds.bcd()),
        )
    }
}

impl From<[u8; 5]> for AlarmRegisters {
    fn from(data: [u8; 5]) -> Self {
        AlarmRegisters {
            seconds: Seconds(data[0]),
            minutes: Minutes(data[1]),
            hours: Hours(data[2]),
            days: Days(data[3]),
            months: Months(data[4]),
        }
    }
}

impl From<&AlarmRegisters> for [u8; 5] {
    fn from(raw: &AlarmRegisters) -> [u8; 5] {
        [
            raw.seconds.0,
            raw.minutes.0,
            raw.hours.0,
            raw.days.0,
            raw.months.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_register_conversions() {
        let seconds = Seconds::from(0x59);
        assert!(!seconds.oscillator_stopped());
        assert_eq!(seconds.bcd(), 0x59);
        assert_eq!(u8::from(seconds), 0x59);

        let seconds = Seconds::from(0xD9);
        assert!(seconds.oscillator_stopped());
        assert_eq!(seconds.bcd(), 0x59);
        assert_eq!(u8::from(seconds), 0xD9);
    }

    #[test]
    fn test_flag_bits_are_masked() {
        assert_eq!(Minutes::from(0xB0).bcd(), 0x30);
        assert!(Minutes::from(0xB0).event_monitor());
        assert_eq!(Hours::from(0xE3).bcd(), 0x23);
        assert_eq!(Days::from(0xF1).bcd(), 0x31);
        assert_eq!(Weekdays::from(0xFE).weekday(), 6);
        assert_eq!(Months::from(0xF2).bcd(), 0x12);
        assert_eq!(Years::from(0x99).bcd(), 0x99);
    }

    #[test]
    fn test_time_registers_decode() {
        // 2024-03-14 15:30:00, Thursday
        let raw = TimeRegisters::from([0x00, 0x30, 0x15, 0x14, 0x04, 0x03, 0x24]);
        let dt = raw.to_datetime();
        assert_eq!(dt, DateTime::new(2024, 3, 14, 15, 30, 0));
        assert!(dt.is_valid());
        assert_eq!(raw.weekday(), 4);
        assert!(!raw.oscillator_stopped());
        assert_eq!(DateTime::from(&raw), dt);
    }

    #[test]
    fn test_time_registers_decode_strips_flags() {
        let raw = TimeRegisters::from([
            0x80 | 0x45, // oscillator stopped
            0x80 | 0x59, // event monitor
            0xC0 | 0x23,
            0xC0 | 0x31,
            0x00,
            0xE0 | 0x12,
            0x99,
        ]);
        assert!(raw.oscillator_stopped());
        assert_eq!(raw.to_datetime(), DateTime::new(2099, 12, 31, 23, 59, 45));
    }

    #[test]
    fn test_time_registers_encode() {
        let dt = DateTime::new(2024, 3, 14, 15, 30, 0);
        let raw = TimeRegisters::from_datetime(&dt).unwrap();
        let data: [u8; 7] = (&raw).into();
        assert_eq!(data, [0x00, 0x30, 0x15, 0x14, 0x00, 0x03, 0x24]);
        assert_eq!(TimeRegisters::try_from(&dt).unwrap(), raw);
    }

    #[test]
    fn test_time_registers_round_trip() {
        let dt = DateTime::new(2099, 12, 31, 23, 59, 59);
        let data: [u8; 7] = (&TimeRegisters::from_datetime(&dt).unwrap()).into();
        assert_eq!(TimeRegisters::from(data).to_datetime(), dt);
    }

    #[test]
    fn test_encode_invalid_datetime() {
        let dt = DateTime::new(2021, 2, 29, 0, 0, 0);
        assert!(matches!(
            TimeRegisters::from_datetime(&dt),
            Err(DateTimeError::InvalidDateTime)
        ));
        assert!(matches!(
            TimestampRegisters::from_datetime(&dt),
            Err(DateTimeError::InvalidDateTime)
        ));
        assert!(matches!(
            AlarmRegisters::from_datetime(&dt),
            Err(DateTimeError::InvalidDateTime)
        ));
    }

    #[test]
    fn test_timestamp_registers() {
        let dt = DateTime::new(2021, 7, 4, 9, 8, 7);
        let raw = TimestampRegisters::from_datetime(&dt).unwrap();
        let data: [u8; 6] = (&raw).into();
        assert_eq!(data, [0x07, 0x08, 0x09, 0x04, 0x07, 0x21]);
        assert_eq!(TimestampRegisters::from(data).to_datetime(), dt);
    }

    #[test]
    fn test_alarm_registers() {
        let dt = DateTime::new(2021, 7, 4, 9, 8, 7);
        let raw = AlarmRegisters::from_datetime(&dt).unwrap();
        let data: [u8; 5] = (&raw).into();
        assert_eq!(data, [0x07, 0x08, 0x09, 0x04, 0x07]);
        assert_eq!(
            AlarmRegisters::from(data).to_datetime(),
            DateTime::new(2000, 7, 4, 9, 8, 7)
        );
    }

    #[test]
    fn test_decode_garbage_is_invalid() {
        // Month 0x13 is not a month
        let raw = TimeRegisters::from([0x00, 0x00, 0x00, 0x01, 0x00, 0x13, 0x24]);
        assert!(!raw.to_datetime().is_valid());
    }
}
