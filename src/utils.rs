//! Small shared helpers.

/// Number of bits needed to store the value `v` (at least 1).
#[inline]
pub fn bits_for(v: u64) -> u32 {
    if v == 0 { 1 } else { u64::BITS - v.leading_zeros() }
}

/// Element width, in bits, that fits every position of a text of `len`
/// bytes. All structure values lie in `[0, len - 1]`.
#[inline]
pub fn width_for_text(len: usize) -> u32 {
    bits_for(len.saturating_sub(1) as u64)
}

/// Number of decimal digits needed to print `v`.
#[inline]
pub fn decimal_digits(v: u64) -> usize {
    if v == 0 { 1 } else { (v.ilog10() + 1) as usize }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_for() {
        assert_eq!(bits_for(0), 1);
        assert_eq!(bits_for(1), 1);
        assert_eq!(bits_for(2), 2);
        assert_eq!(bits_for(6), 3);
        assert_eq!(bits_for(7), 3);
        assert_eq!(bits_for(8), 4);
        assert_eq!(bits_for(u64::MAX), 64);
    }

    #[test]
    fn test_width_for_text() {
        // "banana\0": positions 0..=6 fit in 3 bits
        assert_eq!(width_for_text(7), 3);
        assert_eq!(width_for_text(8), 3);
        assert_eq!(width_for_text(9), 4);
        assert_eq!(width_for_text(1), 1);
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(10), 2);
        assert_eq!(decimal_digits(12345), 5);
    }
}
