//! Bit-field placement inside a 32-bit A64 instruction word.
//!
//! Every operand code maps to one or more [`Field`]s. Multi-field operands
//! are read and written as a concatenation with the first field in the
//! most significant position, which is how the architecture describes
//! split immediates such as `immhi:immlo` or `i3h:i3l:Zm`.

use crate::range::extract_bits;

macro_rules! fields {
    ($($name:ident = ($lsb:expr, $width:expr),)*) => {
        /// A named bit range within an instruction word.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Field {
            $(
                #[doc = concat!("Bits `[", stringify!($lsb), ", +", stringify!($width), ")`.")]
                $name,
            )*
        }

        impl Field {
            /// Every field, in declaration order.
            pub const ALL: &'static [Field] = &[$(Field::$name,)*];

            /// Least significant bit.
            pub const fn lsb(self) -> u32 {
                match self {
                    $(Field::$name => $lsb,)*
                }
            }

            /// Width in bits.
            pub const fn width(self) -> u32 {
                match self {
                    $(Field::$name => $width,)*
                }
            }

            /// Identifier used in diagnostics.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Field::$name => stringify!($name),)*
                }
            }
        }
    };
}

fields! {
    // ── General-purpose register slots ──
    Rd = (0, 5),
    Rn = (5, 5),
    Rm = (16, 5),
    Rt = (0, 5),
    Rt2 = (10, 5),
    Rs = (16, 5),
    Ra = (10, 5),

    // ── Base instruction set ──
    Abc = (16, 3),
    B5 = (31, 1),
    B40 = (19, 5),
    CRm = (8, 4),
    CRmDsbNxs = (10, 2),
    CRn = (12, 4),
    CsscImm8 = (10, 8),
    Cmode = (12, 4),
    Cond = (12, 4),
    Cond2 = (0, 4),
    Defgh = (5, 5),
    H = (11, 1),
    Hw = (21, 2),
    Imm1_8 = (8, 1),
    Imm1_10 = (10, 1),
    Imm1_15 = (15, 1),
    Imm1_16 = (16, 1),
    Imm2_1 = (1, 2),
    Imm2_8 = (8, 2),
    Imm2_10 = (10, 2),
    Imm2_15 = (15, 2),
    Imm3_10 = (10, 3),
    Imm3_12 = (12, 3),
    Imm3_14 = (14, 3),
    Imm4_10 = (10, 4),
    Imm4_16 = (16, 4),
    Imm5 = (16, 5),
    Imm6_10 = (10, 6),
    Imm6_16 = (16, 6),
    Imm7 = (15, 7),
    Imm8 = (13, 8),
    Imm9 = (12, 9),
    Imm12 = (10, 12),
    Imm14 = (5, 14),
    Imm16_0 = (0, 16),
    Imm16_5 = (5, 16),
    Imm19 = (5, 19),
    Imm26 = (0, 26),
    Immb = (16, 3),
    Immh = (19, 4),
    ImmHi = (5, 19),
    ImmLo = (29, 2),
    Immr = (16, 6),
    Imms = (10, 6),
    Index = (11, 1),
    L = (21, 1),
    LdstSize = (30, 2),
    Len = (13, 2),
    M = (20, 1),
    N = (22, 1),
    Nzcv = (0, 4),
    Op = (29, 1),
    Op0 = (19, 2),
    Op1 = (16, 3),
    Op2 = (5, 3),
    Opc = (22, 2),
    Opc1 = (23, 1),
    Option = (13, 3),
    Q = (30, 1),
    Rotate1 = (11, 2),
    Rotate2 = (13, 2),
    Rotate3 = (12, 1),
    S = (12, 1),
    Scale = (10, 6),
    Sf = (31, 1),
    Shift = (22, 2),
    Size = (22, 2),
    Sz = (22, 1),
    Type = (22, 2),
    VldstSize = (10, 2),

    // ── SVE ──
    SveM4 = (4, 1),
    SveM14 = (14, 1),
    SveM16 = (16, 1),
    SveN = (17, 1),
    SvePd = (0, 4),
    SvePg3 = (10, 3),
    SvePg4_5 = (5, 4),
    SvePg4_10 = (10, 4),
    SvePg4_16 = (16, 4),
    SvePm = (16, 4),
    SvePn = (5, 4),
    SvePt = (0, 4),
    SveRm = (5, 5),
    SveRn = (16, 5),
    SveVd = (0, 5),
    SveVm = (5, 5),
    SveVn = (5, 5),
    SveZa5 = (5, 5),
    SveZa16 = (16, 5),
    SveZd = (0, 5),
    SveZm5 = (5, 5),
    SveZm16 = (16, 5),
    SveZn = (5, 5),
    SveZt = (0, 5),
    SveI1 = (5, 1),
    SveI2h = (20, 1),
    SveI3h = (22, 1),
    SveI3h2 = (19, 2),
    SveI3l = (11, 1),
    SveImm3 = (16, 3),
    SveImm4 = (16, 4),
    SveImm5 = (5, 5),
    SveImm5b = (16, 5),
    SveImm6 = (16, 6),
    SveImm7 = (14, 7),
    SveImm8 = (5, 8),
    SveImm9 = (5, 9),
    SveImmr = (11, 6),
    SveImms = (5, 6),
    SveMsz = (10, 2),
    SvePattern = (5, 5),
    SvePrfop = (0, 4),
    SveRot1 = (16, 1),
    SveRot2 = (10, 2),
    SveRot3 = (10, 1),
    SveSize = (17, 2),
    SveSz = (22, 1),
    SveTszh = (22, 2),
    SveTszl8 = (8, 2),
    SveTszl19 = (19, 2),
    SveXs14 = (14, 1),
    SveXs22 = (22, 1),

    // ── SME ──
    SmePdx2 = (1, 3),
    SmePm = (13, 3),
    SmePNd3 = (0, 3),
    SmePNn3 = (5, 3),
    SmeQ = (16, 1),
    SmeRm = (16, 2),
    SmeRv = (13, 2),
    SmeV = (15, 1),
    SmeVl10 = (10, 1),
    SmeVl13 = (13, 1),
    SmeZAda2b = (0, 2),
    SmeZAda3b = (0, 3),
    SmeZdn2 = (1, 4),
    SmeZdn4 = (2, 3),
    SmeZm = (16, 4),
    SmeZm2 = (17, 4),
    SmeZm4 = (18, 3),
    SmeZn2 = (6, 4),
    SmeZn4 = (7, 3),
    SmeZtT = (4, 1),
    SmeZt3 = (0, 3),
    SmeZt2 = (0, 2),
    SmeI1 = (23, 1),
    SmeSize22 = (22, 2),
    SmeTszh = (22, 1),
    SmeTszl = (18, 3),
    SmeZeroMask = (0, 8),
    Off2 = (0, 2),
    Off3 = (0, 3),
}

impl Field {
    /// Mask of this field's bits, in place.
    pub const fn mask(self) -> u32 {
        let w = self.width();
        let ones = if w >= 32 { u32::MAX } else { (1u32 << w) - 1 };
        ones << self.lsb()
    }

    /// Read this field from `code`, ignoring bits set in `ignore`.
    #[inline]
    pub fn extract(self, code: u32, ignore: u32) -> u32 {
        extract_bits(code & !ignore, self.lsb(), self.width())
    }

    /// OR `value` (truncated to the field width) into `code`, leaving bits set
    /// in `ignore` untouched.
    #[inline]
    pub fn insert(self, code: &mut u32, value: u32, ignore: u32) {
        let w = self.width();
        let v = if w >= 32 { value } else { value & ((1u32 << w) - 1) };
        *code |= (v << self.lsb()) & !ignore;
    }
}

/// Combined width of a field list.
pub fn total_width(fields: &[Field]) -> u32 {
    fields.iter().map(|f| f.width()).sum()
}

/// Concatenate `fields` read from `code`, first field most significant.
pub fn extract_fields(code: u32, ignore: u32, fields: &[Field]) -> u32 {
    fields
        .iter()
        .fold(0u32, |acc, f| (acc << f.width()) | f.extract(code, ignore))
}

/// Split `value` across `fields`, last field taking the low bits.
pub fn insert_fields(code: &mut u32, ignore: u32, fields: &[Field], mut value: u32) {
    for f in fields.iter().rev() {
        f.insert(code, value, ignore);
        value = value.checked_shr(f.width()).unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement() {
        assert_eq!(Field::Rm.lsb(), 16);
        assert_eq!(Field::Rm.width(), 5);
        assert_eq!(Field::ImmHi.mask(), 0x00ff_ffe0);
        assert_eq!(Field::SveTszh.name(), "SveTszh");
        assert!(Field::ALL.iter().all(|f| f.lsb() + f.width() <= 32));
    }

    #[test]
    fn single_field_round_trip() {
        let mut code = 0;
        Field::Rn.insert(&mut code, 0x1f, 0);
        assert_eq!(code, 0x3e0);
        assert_eq!(Field::Rn.extract(code, 0), 31);
        assert_eq!(Field::Rn.extract(code, 0x20), 30);
    }

    #[test]
    fn multi_field_order() {
        // adr x0, #-1 encodes immhi = all ones, immlo = 0b11
        let code = 0x10ff_ffe0 | (0b11 << 29);
        let v = extract_fields(code, 0, &[Field::ImmHi, Field::ImmLo]);
        assert_eq!(v, (1 << 21) - 1);
        assert_eq!(total_width(&[Field::ImmHi, Field::ImmLo]), 21);

        let mut out = 0;
        insert_fields(&mut out, 0, &[Field::SveI3h, Field::SveI3h2], 0b101);
        assert_eq!(Field::SveI3h.extract(out, 0), 1);
        assert_eq!(Field::SveI3h2.extract(out, 0), 0b01);
    }

    #[test]
    fn ignore_mask_protects_bits() {
        let mut code = 0;
        Field::Size.insert(&mut code, 0b11, 1 << 23);
        assert_eq!(code, 1 << 22);
    }
}
