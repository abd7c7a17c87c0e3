//! Integer range, alignment and bit-field primitives.

/// `low <= value <= high`.
#[inline]
pub fn in_range(value: i64, low: i64, high: i64) -> bool {
    value >= low && value <= high
}

/// `value` is a multiple of `align`. An alignment of zero places no
/// constraint.
#[inline]
pub fn aligned(value: i64, align: i64) -> bool {
    value.checked_rem(align).map_or(true, |rem| rem == 0)
}

/// Whether `value` fits a `width`-bit two's-complement field.
///
/// # Panics
///
/// Panics unless `1 <= width < 32`.
#[inline]
pub fn fits_signed_field(value: i64, width: u32) -> bool {
    assert!(width > 0 && width < 32, "signed field width {} out of range", width);
    let lim = 1i64 << (width - 1);
    value >= -lim && value < lim
}

/// Whether `value` fits a `width`-bit unsigned field.
///
/// # Panics
///
/// Panics unless `width < 32`.
#[inline]
pub fn fits_unsigned_field(value: i64, width: u32) -> bool {
    assert!(width < 32, "unsigned field width {} out of range", width);
    let lim = 1i64 << width;
    value >= 0 && value < lim
}

/// Bits `[lsb, lsb + width)` of `word`.
#[inline]
pub fn extract_bits(word: u32, lsb: u32, width: u32) -> u32 {
    if width == 0 {
        return 0;
    }
    if width >= 32 {
        return word >> lsb;
    }
    (word >> lsb) & ((1u32 << width) - 1)
}

/// Bit `n` of `word`.
#[inline]
pub fn bit(word: u32, n: u32) -> u32 {
    (word >> n) & 1
}

/// Sign-extend the low `width` bits of `value`.
#[inline]
pub fn sign_extend(value: u64, width: u32) -> i64 {
    debug_assert!(width > 0 && width <= 64);
    let shift = 64 - width;
    ((value << shift) as i64) >> shift
}

/// log2 of a power-of-two element size in bytes (1, 2, 4, 8 or 16).
pub(crate) fn log2_size(size: u32) -> u32 {
    debug_assert!(size.is_power_of_two() && size <= 16);
    size.trailing_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_is_inclusive() {
        assert!(in_range(0, 0, 7));
        assert!(in_range(7, 0, 7));
        assert!(!in_range(8, 0, 7));
        assert!(!in_range(-1, 0, 7));
    }

    #[test]
    fn aligned_handles_negatives() {
        assert!(aligned(-16, 8));
        assert!(!aligned(-12, 8));
        assert!(aligned(0, 4));
        assert!(aligned(9, 3));
    }

    #[test]
    fn aligned_is_total() {
        assert!(aligned(12, 0));
        assert!(aligned(0, 0));
        assert!(aligned(i64::MIN, -1));
        assert!(!aligned(i64::MAX, 2));
    }

    #[test]
    fn signed_field_bounds() {
        assert!(fits_signed_field(-256, 9));
        assert!(fits_signed_field(255, 9));
        assert!(!fits_signed_field(256, 9));
        assert!(!fits_signed_field(-257, 9));
        assert!(fits_signed_field(-1, 1));
        assert!(!fits_signed_field(1, 1));
    }

    #[test]
    fn unsigned_field_bounds() {
        assert!(fits_unsigned_field(4095, 12));
        assert!(!fits_unsigned_field(4096, 12));
        assert!(!fits_unsigned_field(-1, 12));
        assert!(fits_unsigned_field(0, 0));
        assert!(!fits_unsigned_field(1, 0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn wide_field_rejected() {
        let _ = fits_unsigned_field(0, 32);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn wide_signed_field_rejected() {
        let _ = fits_signed_field(0, 40);
    }

    #[test]
    fn bit_helpers() {
        assert_eq!(extract_bits(0xdead_beef, 8, 8), 0xbe);
        assert_eq!(extract_bits(0xdead_beef, 0, 32), 0xdead_beef);
        assert_eq!(bit(0b100, 2), 1);
        assert_eq!(sign_extend(0x1ff, 9), -1);
        assert_eq!(sign_extend(0x0ff, 9), 255);
        assert_eq!(log2_size(8), 3);
    }
}
