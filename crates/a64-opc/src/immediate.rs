//! Immediate encodability: logical (bitmask) immediates, move-wide
//! constants, replicated-byte immediates and 8-bit floating-point
//! constants.
//!
//! The logical-immediate lookup table is built once per process on first
//! use and is read-only afterwards.

use std::sync::OnceLock;

/// Number of distinct logical-immediate patterns over all element sizes.
pub const LOGICAL_IMMEDIATE_COUNT: usize = 5334;

#[derive(Debug, Clone, Copy)]
struct LogicalImm {
    imm: u64,
    encoding: u32,
}

static LOGICAL_IMMEDIATES: OnceLock<Vec<LogicalImm>> = OnceLock::new();

fn logical_immediates() -> &'static [LogicalImm] {
    LOGICAL_IMMEDIATES.get_or_init(build_logical_immediates)
}

/// Rotate the low `e` bits of `imm` right by `r` and replicate the
/// element across 64 bits.
fn rotate_and_replicate(imm: u64, r: u32, e: u32) -> u64 {
    let mask = if e == 64 { u64::MAX } else { (1u64 << e) - 1 };
    let mut imm = imm;
    if r != 0 {
        imm = (imm >> r) | ((imm << (e - r)) & mask);
    }
    let mut width = e;
    while width < 64 {
        imm |= imm << width;
        width *= 2;
    }
    imm
}

// N:immr:imms packing per element size E (imms shown with its fixed prefix):
//
//   N  imms    immr    E
//   1  ssssss  rrrrrr  64
//   0  0sssss  0rrrrr  32
//   0  10ssss  00rrrr  16
//   0  110sss  000rrr   8
//   0  1110ss  0000rr   4
//   0  11110s  00000r   2
fn build_logical_immediates() -> Vec<LogicalImm> {
    let mut table = Vec::with_capacity(LOGICAL_IMMEDIATE_COUNT);
    for log_e in 1..=6u32 {
        let e = 1u32 << log_e;
        let (is64, s_mask) = if log_e == 6 {
            (1, 0)
        } else {
            (0, ((1u32 << (5 - log_e)) - 1) << (log_e + 1))
        };
        // An all-ones run (s == e - 1) is reserved.
        for s in 0..e - 1 {
            for r in 0..e {
                let ones = (1u64 << (s + 1)) - 1;
                table.push(LogicalImm {
                    imm: rotate_and_replicate(ones, r, e),
                    encoding: (is64 << 12) | (r << 6) | (s | s_mask),
                });
            }
        }
    }
    debug_assert_eq!(table.len(), LOGICAL_IMMEDIATE_COUNT);
    table.sort_unstable_by_key(|entry| entry.imm);
    tracing::debug!(entries = table.len(), "built logical immediate table");
    table
}

/// Bits above an `esize`-byte element.
fn upper_bits(esize: u32) -> u64 {
    let bits = esize * 8;
    if bits >= 64 {
        0
    } else {
        u64::MAX << bits
    }
}

/// Size of the logical-immediate table, building it if needed.
pub fn logical_immediate_table_len() -> usize {
    logical_immediates().len()
}

/// The 13-bit `N:immr:imms` encoding of `value` as a logical immediate on
/// `esize`-byte elements, or `None` if it is not encodable or `esize` is
/// not 1, 2, 4 or 8.
///
/// Bits above the element may be all zeros or all ones, so that constant
/// expressions like `~1` are accepted.
///
/// ```
/// use a64_opc::immediate::logical_immediate;
///
/// assert_eq!(logical_immediate(0xff, 4), Some(0x007));
/// assert_eq!(logical_immediate(0, 8), None);
/// ```
pub fn logical_immediate(value: u64, esize: u32) -> Option<u32> {
    if !matches!(esize, 1 | 2 | 4 | 8) {
        return None;
    }
    let upper = upper_bits(esize);
    if value & !upper != value && value | upper != value {
        return None;
    }

    let mut value = value & !upper;
    let mut width = esize * 8;
    while width < 64 {
        value |= value << width;
        width *= 2;
    }

    let table = logical_immediates();
    let found = table
        .binary_search_by_key(&value, |entry| entry.imm)
        .ok()
        .map(|i| table[i].encoding);
    tracing::trace!(value, esize, ?found, "logical immediate lookup");
    found
}

/// Whether `value` is a logical immediate on `esize`-byte elements.
pub fn is_logical_immediate(value: u64, esize: u32) -> bool {
    logical_immediate(value, esize).is_some()
}

/// Expand a 13-bit `N:immr:imms` encoding to the value it denotes on
/// `esize`-byte elements. `None` for reserved encodings and for element
/// sizes wider than `esize`.
pub fn decode_logical_immediate(encoding: u32, esize: u32) -> Option<u64> {
    let n = (encoding >> 12) & 1;
    let immr = (encoding >> 6) & 0x3f;
    let imms = encoding & 0x3f;

    let combined = (n << 6) | (!imms & 0x3f);
    if combined < 2 {
        return None;
    }
    let len = 31 - combined.leading_zeros();
    let e = 1u32 << len;
    let bits = esize * 8;
    if e > bits.max(2) {
        return None;
    }

    let levels = e - 1;
    let s = imms & levels;
    let r = immr & levels;
    if s == levels {
        return None;
    }

    let imm = rotate_and_replicate((1u64 << (s + 1)) - 1, r, e);
    Some(if bits >= 64 { imm } else { imm & ((1u64 << bits) - 1) })
}

/// Left shift (0, 16, 32 or 48) that makes `value` a single 16-bit chunk,
/// i.e. a MOVZ-encodable constant.
///
/// For 32-bit registers the top half may be all zeros or all ones.
pub fn wide_constant(value: u64, is32: bool) -> Option<u32> {
    let mut value = value;
    let chunks = if is32 {
        let hi = value >> 32;
        if hi != 0 && hi != 0xffff_ffff {
            return None;
        }
        value &= 0xffff_ffff;
        2
    } else {
        4
    };
    (0..chunks)
        .map(|i| i * 16)
        .find(|&shift| value & (0xffffu64 << shift) == value)
}

/// Shrink a 64-bit value whose bytes are each `0x00` or `0xff` to the
/// 8-bit `abcdefgh` mask (bit `i` set iff byte `i` is `0xff`).
pub fn shrink_expanded_imm8(imm: u64) -> Option<u8> {
    let mut ret = 0u8;
    for i in 0..8 {
        match (imm >> (8 * i)) & 0xff {
            0xff => ret |= 1 << i,
            0x00 => {}
            _ => return None,
        }
    }
    Some(ret)
}

/// Expand an 8-bit FP immediate to the IEEE bit pattern of a double
/// (`size == 8`) or a single (`size == 4`; half-precision immediates also
/// expand to single precision). Other sizes yield `None`.
pub fn expand_fp_imm(size: u32, imm8: u32) -> Option<u64> {
    let b7 = u64::from((imm8 >> 7) & 1);
    let b6_0 = u64::from(imm8 & 0x7f);
    let b6 = b6_0 >> 6;
    let b6_repl4 = (b6 << 3) | (b6 << 2) | (b6 << 1) | b6;
    match size {
        8 => {
            let hi = (b7 << 31)
                | ((b6 ^ 1) << 30)
                | (b6_repl4 << 26)
                | (b6 << 25)
                | (b6 << 24)
                | (b6 << 23)
                | (b6_0 << 16);
            Some(hi << 32)
        }
        4 | 2 => Some((b7 << 31) | ((b6 ^ 1) << 30) | (b6_repl4 << 26) | (b6_0 << 19)),
        _ => None,
    }
}

/// Numeric value of an 8-bit FP immediate.
pub fn fp_imm_value(imm8: u32) -> f64 {
    let bits = expand_fp_imm(8, imm8).unwrap_or(0);
    f64::from_bits(bits)
}

/// Whether `value` cannot be materialised by SVE `DUP` (at any element
/// size) and so needs `DUPM`. `esize` is the immediate's size in bytes.
pub fn sve_dupm_mov_immediate(value: u64, esize: u32) -> bool {
    let upper = upper_bits(esize);
    if value & !upper != value && value | upper != value {
        return false;
    }

    let mut svalue = value as i64;
    if esize <= 4 || value as u32 == (value >> 32) as u32 {
        svalue = i64::from(value as i32);
        if esize <= 2 || value as u16 == (value >> 16) as u16 {
            svalue = i64::from(value as i16);
            if esize == 1 || value as u8 == (value >> 8) as u8 {
                return false;
            }
        }
    }
    if svalue & 0xff == 0 {
        svalue /= 256;
    }
    !(-128..128).contains(&svalue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_every_pattern() {
        assert_eq!(logical_immediate_table_len(), LOGICAL_IMMEDIATE_COUNT);
        let table = logical_immediates();
        assert!(table.windows(2).all(|w| w[0].imm < w[1].imm));
    }

    #[test]
    fn unsupported_element_sizes() {
        for esize in [0, 3, 16] {
            assert_eq!(logical_immediate(0, esize), None);
            assert_eq!(logical_immediate(u64::MAX, esize), None);
            assert_eq!(logical_immediate(0xff, esize), None);
            assert!(!is_logical_immediate(0x5555, esize));
        }
    }

    #[test]
    fn every_entry_round_trips() {
        for entry in logical_immediates() {
            assert_eq!(decode_logical_immediate(entry.encoding, 8), Some(entry.imm));
            assert_eq!(logical_immediate(entry.imm, 8), Some(entry.encoding));
        }
    }

    #[test]
    fn small_elements() {
        // 0x01 on byte elements: E = 8, s = 0, r = 0.
        assert_eq!(logical_immediate(0x1, 1), Some(0x030));
        assert_eq!(decode_logical_immediate(0x030, 1), Some(0x1));
        assert_eq!(logical_immediate(0x5555_5555_5555_5555, 8), Some(0x03c));
        assert_eq!(logical_immediate(0xff, 4), Some(0x007));
    }

    #[test]
    fn degenerate_patterns_rejected() {
        assert_eq!(logical_immediate(0, 8), None);
        assert_eq!(logical_immediate(u64::MAX, 8), None);
        assert_eq!(logical_immediate(0x1234, 8), None);
        assert_eq!(decode_logical_immediate(0x03f, 8), None);
        // N = 1 on a 32-bit element is reserved.
        assert_eq!(decode_logical_immediate(0x1000, 4), None);
    }

    #[test]
    fn sign_extended_upper_bits_allowed() {
        assert!(is_logical_immediate(!1u64, 4));
        assert!(is_logical_immediate(0xffff_fffe, 4));
        assert!(!is_logical_immediate(0x1_0000_00fe, 4));
    }

    #[test]
    fn wide_constants() {
        assert_eq!(wide_constant(0, false), Some(0));
        assert_eq!(wide_constant(0xabcd_0000, true), Some(16));
        assert_eq!(wide_constant(0xabcd_0000_0000, false), Some(32));
        assert_eq!(wide_constant(0xabcd_0000_0000, true), None);
        assert_eq!(wide_constant(0x1_0001, false), None);
        assert_eq!(wide_constant(0xffff_ffff_0000_1234, true), Some(0));
    }

    #[test]
    fn expanded_imm8() {
        assert_eq!(shrink_expanded_imm8(0xff00_ff00_0000_00ff), Some(0b1010_0001));
        assert_eq!(shrink_expanded_imm8(0), Some(0));
        assert_eq!(shrink_expanded_imm8(0x0100), None);
    }

    #[test]
    fn fp_expansion() {
        assert_eq!(expand_fp_imm(4, 0x70), Some(0x3f80_0000));
        assert_eq!(expand_fp_imm(8, 0x70), Some(0x3ff0_0000_0000_0000));
        assert_eq!(expand_fp_imm(4, 0x60), Some(0x3f00_0000));
        assert_eq!(expand_fp_imm(2, 0x00), Some(0x4000_0000));
        assert_eq!(expand_fp_imm(16, 0x00), None);
        assert!((fp_imm_value(0x70) - 1.0).abs() < f64::EPSILON);
        assert!((fp_imm_value(0xf0) + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn dupm_needed_only_beyond_dup() {
        assert!(!sve_dupm_mov_immediate(0x7f, 1));
        assert!(!sve_dupm_mov_immediate(0x7f00, 2));
        assert!(sve_dupm_mov_immediate(0x1234, 2));
        assert!(!sve_dupm_mov_immediate(0x0101_0101_0101_0101, 8));
        assert!(sve_dupm_mov_immediate(0x00ff_00ff_00ff_00ff, 8));
    }
}
