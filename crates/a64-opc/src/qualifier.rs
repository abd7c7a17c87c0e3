//! Operand qualifiers: the resolved shape of an operand.
//!
//! A qualifier is either a *variant* (register width or vector
//! arrangement, with element size, element count and the conventional
//! `size:Q` encoding value), a *value-in-range* constraint on an
//! immediate, or a miscellaneous shift-kind tag.

use std::fmt;

/// Broad category of a [`Qualifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QualifierKind {
    /// No qualifier.
    Nil,
    /// Register width or arrangement.
    Variant,
    /// Immediate restricted to `[lo, hi]`.
    ValueInRange,
    /// Shift kind or other tag.
    Misc,
}

/// Resolved operand shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Qualifier {
    /// Unresolved.
    #[default]
    Nil,
    /// 32-bit integer register.
    W,
    /// 64-bit integer register.
    X,
    /// 32-bit register where 31 means WSP.
    Wsp,
    /// 64-bit register where 31 means SP.
    Sp,
    /// Byte scalar.
    SB,
    /// Halfword scalar.
    SH,
    /// Word scalar.
    SS,
    /// Doubleword scalar.
    SD,
    /// Quadword scalar.
    SQ,
    /// Four bytes treated as one 32-bit element.
    S4B,
    /// Two halfwords treated as one 32-bit element.
    S2H,
    /// `.4b`
    V4B,
    /// `.8b`
    V8B,
    /// `.16b`
    V16B,
    /// `.2h`
    V2H,
    /// `.4h`
    V4H,
    /// `.8h`
    V8H,
    /// `.2s`
    V2S,
    /// `.4s`
    V4S,
    /// `.1d`
    V1D,
    /// `.2d`
    V2D,
    /// `.1q`
    V1Q,
    /// Zeroing predicate `/z`.
    PZ,
    /// Merging predicate `/m`.
    PM,
    /// Offset scaled by the 16-byte tag granule.
    ImmTag,
    /// System register CRn/CRm, 0 to 15.
    Cr,
    /// 0 to 7.
    Imm0_7,
    /// 0 to 15.
    Imm0_15,
    /// 0 to 31.
    Imm0_31,
    /// 0 to 63.
    Imm0_63,
    /// 1 to 32.
    Imm1_32,
    /// 1 to 64.
    Imm1_64,
    /// Shift by LSL.
    Lsl,
    /// Shift by MSL.
    Msl,
    /// Placeholder while a qualifier is being retrieved from the encoding.
    Retrieving,
}

struct QualifierData {
    data0: i32,
    data1: i32,
    data2: u32,
    name: &'static str,
    kind: QualifierKind,
}

const fn variant(esize: i32, nelem: i32, value: u32, name: &'static str) -> QualifierData {
    QualifierData {
        data0: esize,
        data1: nelem,
        data2: value,
        name,
        kind: QualifierKind::Variant,
    }
}

const fn bounded(lo: i32, hi: i32, name: &'static str) -> QualifierData {
    QualifierData {
        data0: lo,
        data1: hi,
        data2: 0,
        name,
        kind: QualifierKind::ValueInRange,
    }
}

const fn misc(name: &'static str) -> QualifierData {
    QualifierData {
        data0: 0,
        data1: 0,
        data2: 0,
        name,
        kind: QualifierKind::Misc,
    }
}

// Indexed by `Qualifier as usize`.
static QUALIFIERS: [QualifierData; 36] = [
    QualifierData {
        data0: 0,
        data1: 0,
        data2: 0,
        name: "NIL",
        kind: QualifierKind::Nil,
    },
    variant(4, 1, 0x0, "w"),
    variant(8, 1, 0x1, "x"),
    variant(4, 1, 0x0, "wsp"),
    variant(8, 1, 0x1, "sp"),
    variant(1, 1, 0x0, "b"),
    variant(2, 1, 0x1, "h"),
    variant(4, 1, 0x2, "s"),
    variant(8, 1, 0x3, "d"),
    variant(16, 1, 0x4, "q"),
    variant(4, 1, 0x0, "4b"),
    variant(4, 1, 0x0, "2h"),
    variant(1, 4, 0x0, "4b"),
    variant(1, 8, 0x0, "8b"),
    variant(1, 16, 0x1, "16b"),
    variant(2, 2, 0x0, "2h"),
    variant(2, 4, 0x2, "4h"),
    variant(2, 8, 0x3, "8h"),
    variant(4, 2, 0x4, "2s"),
    variant(4, 4, 0x5, "4s"),
    variant(8, 1, 0x6, "1d"),
    variant(8, 2, 0x7, "2d"),
    variant(16, 1, 0x8, "1q"),
    variant(0, 0, 0, "z"),
    variant(0, 0, 0, "m"),
    variant(16, 0, 0, "tag"),
    bounded(0, 15, "CR"),
    bounded(0, 7, "imm_0_7"),
    bounded(0, 15, "imm_0_15"),
    bounded(0, 31, "imm_0_31"),
    bounded(0, 63, "imm_0_63"),
    bounded(1, 32, "imm_1_32"),
    bounded(1, 64, "imm_1_64"),
    misc("lsl"),
    misc("msl"),
    misc("retrieving"),
];

impl Qualifier {
    /// Every qualifier, in table order.
    pub const ALL: [Qualifier; 36] = [
        Qualifier::Nil,
        Qualifier::W,
        Qualifier::X,
        Qualifier::Wsp,
        Qualifier::Sp,
        Qualifier::SB,
        Qualifier::SH,
        Qualifier::SS,
        Qualifier::SD,
        Qualifier::SQ,
        Qualifier::S4B,
        Qualifier::S2H,
        Qualifier::V4B,
        Qualifier::V8B,
        Qualifier::V16B,
        Qualifier::V2H,
        Qualifier::V4H,
        Qualifier::V8H,
        Qualifier::V2S,
        Qualifier::V4S,
        Qualifier::V1D,
        Qualifier::V2D,
        Qualifier::V1Q,
        Qualifier::PZ,
        Qualifier::PM,
        Qualifier::ImmTag,
        Qualifier::Cr,
        Qualifier::Imm0_7,
        Qualifier::Imm0_15,
        Qualifier::Imm0_31,
        Qualifier::Imm0_63,
        Qualifier::Imm1_32,
        Qualifier::Imm1_64,
        Qualifier::Lsl,
        Qualifier::Msl,
        Qualifier::Retrieving,
    ];

    fn data(self) -> &'static QualifierData {
        &QUALIFIERS[self as usize]
    }

    /// Display name, e.g. `"4s"` or `"imm_0_31"`.
    pub fn name(self) -> &'static str {
        self.data().name
    }

    /// Category of this qualifier.
    pub fn kind(self) -> QualifierKind {
        self.data().kind
    }

    /// Register width or arrangement.
    pub fn is_variant(self) -> bool {
        self.kind() == QualifierKind::Variant
    }

    /// Immediate range constraint.
    pub fn is_value_in_range(self) -> bool {
        self.kind() == QualifierKind::ValueInRange
    }

    /// Element size in bytes; zero for anything that is not a variant.
    pub fn esize(self) -> u32 {
        match self.kind() {
            QualifierKind::Variant => self.data().data0 as u32,
            _ => 0,
        }
    }

    /// Number of elements; zero for anything that is not a variant.
    pub fn nelem(self) -> u32 {
        match self.kind() {
            QualifierKind::Variant => self.data().data1 as u32,
            _ => 0,
        }
    }

    /// Conventional `size:Q` encoding of this variant.
    pub fn standard_value(self) -> u32 {
        match self.kind() {
            QualifierKind::Variant => self.data().data2,
            _ => 0,
        }
    }

    /// `(lo, hi)` for value-in-range qualifiers.
    pub fn bounds(self) -> Option<(i64, i64)> {
        let d = self.data();
        (d.kind == QualifierKind::ValueInRange).then_some((i64::from(d.data0), i64::from(d.data1)))
    }

    /// Upper bound of a value-in-range qualifier, zero otherwise.
    pub fn upper_bound(self) -> i64 {
        self.bounds().map_or(0, |(_, hi)| hi)
    }

    /// AdvSIMD vector arrangement (`.8b` through `.1q`).
    pub fn is_vector(self) -> bool {
        self >= Qualifier::V8B && self <= Qualifier::V1Q
    }

    /// Scalar FP/SIMD register width (`b` through `q`).
    pub fn is_fp(self) -> bool {
        self >= Qualifier::SB && self <= Qualifier::SQ
    }

    /// Total width of the register in bytes.
    pub fn total_size(self) -> u32 {
        self.esize() * self.nelem()
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_discriminant() {
        for (i, q) in Qualifier::ALL.iter().enumerate() {
            assert_eq!(*q as usize, i);
        }
        assert_eq!(Qualifier::Retrieving.name(), "retrieving");
    }

    #[test]
    fn variant_data() {
        assert_eq!(Qualifier::X.esize(), 8);
        assert_eq!(Qualifier::X.standard_value(), 1);
        assert_eq!(Qualifier::V16B.nelem(), 16);
        assert_eq!(Qualifier::V16B.standard_value(), 1);
        assert_eq!(Qualifier::V2D.total_size(), 16);
        assert_eq!(Qualifier::SQ.esize(), 16);
        assert_eq!(Qualifier::ImmTag.esize(), 16);
        assert_eq!(Qualifier::V4S.name(), "4s");
    }

    #[test]
    fn bounds_only_for_ranges() {
        assert_eq!(Qualifier::Imm1_64.bounds(), Some((1, 64)));
        assert_eq!(Qualifier::Cr.bounds(), Some((0, 15)));
        assert_eq!(Qualifier::X.bounds(), None);
        assert_eq!(Qualifier::Imm0_31.upper_bound(), 31);
        assert_eq!(Qualifier::Imm0_31.esize(), 0);
    }

    #[test]
    fn classification() {
        assert!(Qualifier::V8B.is_vector());
        assert!(!Qualifier::V4B.is_vector());
        assert!(Qualifier::SD.is_fp());
        assert!(!Qualifier::S4B.is_fp());
        assert!(Qualifier::PM.is_variant());
        assert_eq!(Qualifier::Lsl.kind(), QualifierKind::Misc);
        assert_eq!(Qualifier::Nil.kind(), QualifierKind::Nil);
    }
}
