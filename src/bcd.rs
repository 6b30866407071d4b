//! Packed binary-coded-decimal conversions.
//!
//! RTC chips store each calendar field as two decimal digits packed into a
//! byte, one digit per nibble: the value `45` is held as `0x45`, not `0x2d`.
//!
//! Neither direction checks its input. The hardware is trusted to emit valid
//! BCD, and callers are trusted to only encode values in `0..=99`; anything
//! else yields an unspecified (but non-panicking) result.

/// Converts a packed BCD byte to its binary value.
///
/// ```
/// assert_eq!(rtc_calendar::bcd::decode(0x59), 59);
/// ```
#[inline]
pub const fn decode(value: u8) -> u8 {
    value - 6 * (value >> 4)
}

/// Converts a binary value in `0..=99` to packed BCD.
///
/// ```
/// assert_eq!(rtc_calendar::bcd::encode(59), 0x59);
/// ```
#[inline]
pub const fn encode(value: u8) -> u8 {
    value.wrapping_add(6u8.wrapping_mul(value / 10))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid() {
        assert_eq!(decode(0x00), 0);
        assert_eq!(decode(0x09), 9);
        assert_eq!(decode(0x10), 10);
        assert_eq!(decode(0x45), 45);
        assert_eq!(decode(0x59), 59);
        assert_eq!(decode(0x99), 99);
    }

    #[test]
    fn test_encode_valid() {
        assert_eq!(encode(0), 0x00);
        assert_eq!(encode(9), 0x09);
        assert_eq!(encode(10), 0x10);
        assert_eq!(encode(31), 0x31);
        assert_eq!(encode(99), 0x99);
    }

    #[test]
    fn test_every_decimal_value() {
        for value in 0..=99u8 {
            let packed = encode(value);
            assert_eq!(packed >> 4, value / 10);
            assert_eq!(packed & 0x0F, value % 10);
            assert_eq!(decode(packed), value);
        }
    }

    #[test]
    fn test_garbage_does_not_panic() {
        // Invalid nibbles decode to something, just not anything meaningful.
        assert_eq!(decode(0xFF), 165);
        assert_eq!(decode(0x1A), 20);
        let _ = encode(u8::MAX);
    }
}
