//! Operand codes and their static descriptors.
//!
//! An [`OperandCode`] names one kind of operand slot. Each code has a fixed
//! [`OperandClass`], a bit-field placement and a small amount of numeric
//! data (a list length, an expected shift, a scale) that drives the
//! class-generic checks in [`crate::constraint`].

use crate::field::{total_width, Field};

/// Broad family an operand code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperandClass {
    /// No operand.
    Nil,
    /// General-purpose register.
    IntReg,
    /// General-purpose register with a shift or extend.
    ModifiedReg,
    /// Scalar FP register.
    FpReg,
    /// Scalar or vector SIMD register.
    SimdReg,
    /// One lane of a SIMD register.
    SimdElement,
    /// `{ vN.T - vM.T }` list.
    SimdReglist,
    /// SVE vector register, possibly indexed.
    SveReg,
    /// List of SVE vector or predicate registers.
    SveReglist,
    /// SVE predicate or predicate-as-counter register.
    PredReg,
    /// Slice or array access into the SME ZA storage.
    ZaAccess,
    /// Immediate value.
    Immediate,
    /// Condition code.
    Cond,
    /// Memory address.
    Address,
    /// System register, PSTATE field, barrier or system operation.
    System,
}

/// Per-code flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OperandFlags(u8);

impl OperandFlags {
    /// No flags.
    pub const NONE: OperandFlags = OperandFlags(0);
    /// Register 31 names SP rather than ZR.
    pub const MAYBE_SP: OperandFlags = OperandFlags(1 << 0);
    /// Register 31 is not accepted as an index register.
    pub const NO_ZR: OperandFlags = OperandFlags(1 << 1);
    /// The encoded immediate is the byte offset divided by four.
    pub const SHIFT_BY_2: OperandFlags = OperandFlags(1 << 2);

    /// Whether every flag in `other` is set.
    pub const fn contains(self, other: OperandFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Static description of an operand code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandDesc {
    /// Operand family.
    pub class: OperandClass,
    /// Encoding fields, most significant first.
    pub fields: &'static [Field],
    /// Behaviour flags.
    pub flags: OperandFlags,
    /// Code-specific parameter (list length, expected shift, scale exponent).
    pub data: u32,
}

impl OperandDesc {
    /// Total width of all fields.
    pub fn width(&self) -> u32 {
        total_width(self.fields)
    }

    /// Width of the `n`th field, zero if absent.
    pub fn field_width(&self, n: usize) -> u32 {
        self.fields.get(n).map_or(0, |f| f.width())
    }
}

const fn od(class: OperandClass, fields: &'static [Field]) -> OperandDesc {
    OperandDesc {
        class,
        fields,
        flags: OperandFlags::NONE,
        data: 0,
    }
}

const fn odd(class: OperandClass, fields: &'static [Field], data: u32) -> OperandDesc {
    OperandDesc {
        class,
        fields,
        flags: OperandFlags::NONE,
        data,
    }
}

const fn odf(class: OperandClass, fields: &'static [Field], flags: OperandFlags, data: u32) -> OperandDesc {
    OperandDesc {
        class,
        fields,
        flags,
        data,
    }
}

/// The kind of one operand slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperandCode {
    /// End of the operand list.
    #[default]
    Nil,

    // ── Integer registers ──
    /// `Rd`, register 31 is ZR.
    Rd,
    /// `Rn`, register 31 is ZR.
    Rn,
    /// `Rm`, register 31 is ZR.
    Rm,
    /// `Rt`, register 31 is ZR.
    Rt,
    /// `Rt2`, register 31 is ZR.
    Rt2,
    /// `Rs`, register 31 is ZR.
    Rs,
    /// `Ra`, register 31 is ZR.
    Ra,
    /// Optional `Xt` of IC/DC/AT/TLBI.
    RtSys,
    /// `Rd`, register 31 is SP.
    RdSp,
    /// `Rn`, register 31 is SP.
    RnSp,
    /// `Rt`, register 31 is SP.
    RtSp,
    /// `Rm`, register 31 is SP.
    RmSp,
    /// Second register of an even/odd pair.
    PairReg,
    /// Second register of a pair that may be `xzr, xzr`.
    PairRegOrXzr,
    /// SVE scalar `Rm` at bits 9:5.
    SveRm,
    /// SVE scalar `Rn` at bits 20:16, register 31 is SP.
    SveRnSp,
    /// Fixed `x16`.
    X16,
    /// MOPS destination `[Xd]!`.
    MopsAddrRd,
    /// MOPS source `[Xs]!`.
    MopsAddrRs,
    /// MOPS size `Xn!`.
    MopsWbRn,

    // ── Modified registers ──
    /// Extended register.
    RmExt,
    /// Shifted register.
    RmSft,

    // ── FP / SIMD registers ──
    /// FP `Rd`.
    Fd,
    /// FP `Rn`.
    Fn,
    /// FP `Rm`.
    Fm,
    /// FP `Ra`.
    Fa,
    /// FP `Rt`.
    Ft,
    /// FP `Rt2`.
    Ft2,
    /// SIMD scalar `Rd`.
    Sd,
    /// SIMD scalar `Rn`.
    Sn,
    /// SIMD scalar `Rm`.
    Sm,
    /// Vector `Ra`.
    Va,
    /// Vector `Rd`.
    Vd,
    /// Vector `Rn`.
    Vn,
    /// Vector `Rm`.
    Vm,
    /// `Vd.D[1]`.
    VdD1,
    /// `Vn.D[1]`.
    VnD1,
    /// SVE scalar FP destination.
    SveVd,
    /// SVE scalar FP `Vm`.
    SveVm,
    /// SVE scalar FP `Vn`.
    SveVn,

    // ── SIMD lanes and lists ──
    /// `Vd.T[index]`.
    Ed,
    /// `Vn.T[index]`.
    En,
    /// `Vm.T[index]`.
    Em,
    /// `Vm.H[index]` restricted to v0-v15.
    Em16,
    /// Table lookup list.
    LVn,
    /// Load/store multiple list.
    LVt,
    /// Load/store replicate list.
    LVtAl,
    /// Load/store single-lane list.
    LEt,

    // ── SVE vector registers ──
    /// `Za` at bits 9:5.
    SveZa5,
    /// `Za` at bits 20:16.
    SveZa16,
    /// `Zd`.
    SveZd,
    /// `Zm` at bits 9:5.
    SveZm5,
    /// `Zm` at bits 20:16.
    SveZm16,
    /// `Zn`.
    SveZn,
    /// `Zt`.
    SveZt,
    /// SME `Zm`, z0-z15.
    SmeZm,
    /// `Zm.T[i]`, three-bit register with the rest of the field as index.
    SveZm3Index,
    /// `Zm.T[i]` with an extra index bit at 22.
    SveZm3_22Index,
    /// `Zm.T[i]` with index bits at 20:19 and 11.
    SveZm3_11Index,
    /// `Zm.T[i]`, four-bit register with the rest of the field as index.
    SveZm4Index,
    /// `Zm.T[i]` with index bits at 20 and 11.
    SveZm4_11Index,
    /// `Zn.T[i]` with a 64-byte index range.
    SveZnIndex,
    /// `Zn.T[i]` with a 16-byte index range.
    SveZn5Index,
    /// `Zm.T[imm4]`.
    SveZmImm4,
    /// `PNn[i]`, one index bit.
    SmePNn3Index1,
    /// `PNn[i]`, two index bits.
    SmePNn3Index2,
    /// SME2 `Zn[i]`, one index bit.
    SmeZnIndex1_16,
    /// SME2 `Zn[i]`, two index bits.
    SmeZnIndex2_15,
    /// SME2 `Zn[i]`, three index bits.
    SmeZnIndex3_14,
    /// SME2 `Zm.T[i]`, one index bit.
    SmeZmIndex1,
    /// SME2 `Zm.T[i]`, two index bits.
    SmeZmIndex2,
    /// SME2 `Zm.T[i]`, three index bits.
    SmeZmIndex3_10,
    /// SME2 `Zm.T[i]`, four index bits.
    SmeZmIndex4_10,
    /// `Pn.T[Wm, imm]`.
    SmePnTWmImm,
    /// ZA tile `ZAn.T`, two-bit number.
    SmeZAda2b,
    /// ZA tile `ZAn.T`, three-bit number.
    SmeZAda3b,
    /// `{ ZA0.D, ... }` tile list of ZERO.
    SmeListOf64bitTiles,
    /// `sm` or `za` of SMSTART/SMSTOP.
    SmeSmZa,
    /// `zt0`.
    SmeZt0,
    /// `{ zt0 }`.
    SmeZt0List,

    // ── SVE register lists ──
    /// `{ Pd, Pd+1 }`.
    SmePdx2,
    /// `{ Zdn - Zdn+1 }`.
    SmeZdnx2,
    /// `{ Zdn - Zdn+3 }`.
    SmeZdnx4,
    /// `{ Zm - Zm+1 }`.
    SmeZmx2,
    /// `{ Zm - Zm+3 }`.
    SmeZmx4,
    /// `{ Zn - Zn+1 }`.
    SmeZnx2,
    /// `{ Zn - Zn+3 }`.
    SmeZnx4,
    /// Strided pair `{ Zt, Zt+8 }`.
    SmeZtx2Strided,
    /// Strided quad `{ Zt, Zt+4, Zt+8, Zt+12 }`.
    SmeZtx4Strided,
    /// Two consecutive `Zt`.
    SmeZt2,
    /// Three consecutive `Zt`.
    SmeZt3,
    /// Four consecutive `Zt`.
    SmeZt4,
    /// `{ Pd.T - ... }` sized by the opcode.
    SmePdxN,
    /// `{ Zn.T - ... }` sized by the opcode.
    SveZnxN,
    /// `{ Zt.T - ... }` sized by the opcode.
    SveZtxN,

    // ── Predicates ──
    /// `Pd`.
    SvePd,
    /// Governing predicate p0-p7.
    SvePg3,
    /// Governing predicate at bits 8:5.
    SvePg4_5,
    /// Governing predicate at bits 13:10.
    SvePg4_10,
    /// Governing predicate at bits 19:16.
    SvePg4_16,
    /// `Pm`.
    SvePm,
    /// `Pn`.
    SvePn,
    /// `Pt`.
    SvePt,
    /// SME `Pm`, p0-p7.
    SmePm,
    /// Predicate-as-counter destination.
    SvePNd,
    /// Predicate-as-counter governing predicate.
    SvePNg4_10,
    /// Predicate-as-counter source.
    SvePNn,
    /// Predicate-as-counter transfer register.
    SvePNt,
    /// `PNd`, pn8-pn15.
    SmePNd3,
    /// `PNg`, pn8-pn15.
    SmePNg3,
    /// `PNn`, full range.
    SmePNn,

    // ── ZA access ──
    /// Horizontal/vertical slice source.
    SmeZaHvIdxSrc,
    /// Multi-vector slice source.
    SmeZaHvIdxSrcxN,
    /// Horizontal/vertical slice destination.
    SmeZaHvIdxDest,
    /// Multi-vector slice destination.
    SmeZaHvIdxDestxN,
    /// Slice of LD1/ST1 ZA forms.
    SmeZaHvIdxLdstr,
    /// `ZA.T[Wv, off4]`.
    SmeZaArrayOff4,
    /// `ZA.T[Wv, off3]` at bits 2:0.
    SmeZaArrayOff3_0,
    /// `ZA.T[Wv, off3]` at bits 7:5.
    SmeZaArrayOff3_5,
    /// `ZA.T[Wv, off1*4:off1*4+3]`.
    SmeZaArrayOff1x4,
    /// `ZA.T[Wv, off2*2:off2*2+1]`.
    SmeZaArrayOff2x2,
    /// `ZA.T[Wv, off2*4:off2*4+3]`.
    SmeZaArrayOff2x4,
    /// `ZA.T[Wv, off3*2:off3*2+1]`.
    SmeZaArrayOff3x2,
    /// Byte tile, two-vector range.
    SmeZaArrayVrsb1,
    /// Halfword tile, two-vector range.
    SmeZaArrayVrsh1,
    /// Word tile, two-vector range.
    SmeZaArrayVrss1,
    /// Doubleword tile, two-vector range.
    SmeZaArrayVrsd1,
    /// Byte tile, four-vector range.
    SmeZaArrayVrsb2,
    /// Halfword tile, four-vector range.
    SmeZaArrayVrsh2,
    /// Word tile, four-vector range.
    SmeZaArrayVrss2,
    /// Doubleword tile, four-vector range.
    SmeZaArrayVrsd2,

    // ── Immediates ──
    /// `CRn` of SYS.
    CRn,
    /// `CRm` of SYS.
    CRm,
    /// Vector shift left amount.
    ImmVlsl,
    /// Vector shift right amount.
    ImmVlsr,
    /// SHLL shift, equal to the source element width.
    ShllImm,
    /// `#0`.
    Imm0,
    /// `#0.0`.
    FpImm0,
    /// Bitfield `immr`.
    Immr,
    /// Bitfield `imms`.
    Imms,
    /// Bitfield width.
    Width,
    /// TBZ/TBNZ bit number.
    BitNum,
    /// Fixed-point fraction bits.
    Fbits,
    /// ADD/SUB immediate with optional `lsl #12`.
    Aimm,
    /// MOVZ/MOVN/MOVK immediate with `lsl #16*n`.
    Half,
    /// MOV alias immediate.
    ImmMov,
    /// Logical immediate.
    Limm,
    /// NZCV of CCMP.
    Nzcv,
    /// Immediate of CCMP.
    CcmpImm,
    /// Exception-generating immediate.
    Exception,
    /// UDF immediate.
    Undefined,
    /// TCANCEL immediate.
    TmeUimm16,
    /// Four-bit immediate in CRm.
    Uimm4,
    /// ADDG tag offset.
    Uimm4Addg,
    /// HINT immediate.
    Uimm7,
    /// ADDG address offset, scaled by 16.
    Uimm10,
    /// `op1` of SYS.
    Uimm3Op1,
    /// `op2` of SYS.
    Uimm3Op2,
    /// Signed five-bit immediate.
    Simm5,
    /// Scalar FP 8-bit immediate.
    FpImm,
    /// AdvSIMD modified immediate, unshifted.
    SimdImm,
    /// AdvSIMD modified immediate with shift.
    SimdImmSft,
    /// AdvSIMD FP immediate.
    SimdFpImm,
    /// Rotation 0/90/180/270 at bits 12:11.
    ImmRot1,
    /// Rotation 0/90/180/270 at bits 14:13.
    ImmRot2,
    /// Rotation 90/270 at bit 12.
    ImmRot3,
    /// SVE unsigned arithmetic immediate.
    SveAimm,
    /// SVE signed arithmetic immediate.
    SveAsimm,
    /// SVE FP 8-bit immediate.
    SveFpImm8,
    /// `#0.5` or `#1.0`.
    SveI1HalfOne,
    /// `#0.5` or `#2.0`.
    SveI1HalfTwo,
    /// `#0.0` or `#1.0`.
    SveI1ZeroOne,
    /// Inverted SVE logical immediate.
    SveInvLimm,
    /// SVE logical immediate.
    SveLimm,
    /// SVE logical immediate of the MOV alias of DUPM.
    SveLimmMov,
    /// Predicate-constraint pattern.
    SvePattern,
    /// Pattern with `mul #imm`.
    SvePatternScaled,
    /// SVE prefetch operation.
    SvePrfop,
    /// Predicated shift left.
    SveShlimmPred,
    /// Unpredicated shift left.
    SveShlimmUnpred,
    /// Unpredicated shift left, size at bit 22.
    SveShlimmUnpred22,
    /// Predicated shift right.
    SveShrimmPred,
    /// Unpredicated shift right.
    SveShrimmUnpred,
    /// Unpredicated shift right, size at bit 22.
    SveShrimmUnpred22,
    /// SVE signed five-bit immediate.
    SveSimm5,
    /// SVE signed five-bit immediate at bits 20:16.
    SveSimm5b,
    /// SVE signed six-bit immediate.
    SveSimm6,
    /// SVE signed eight-bit immediate.
    SveSimm8,
    /// SVE unsigned three-bit immediate.
    SveUimm3,
    /// SVE unsigned seven-bit immediate.
    SveUimm7,
    /// SVE unsigned eight-bit immediate.
    SveUimm8,
    /// SVE unsigned eight-bit immediate split over 20:16 and 12:10.
    SveUimm8_53,
    /// Rotation 90/270 at bit 16.
    SveImmRot1,
    /// Rotation 0/90/180/270 at bits 11:10.
    SveImmRot2,
    /// Rotation 90/270 at bit 10.
    SveImmRot3,
    /// CSSC signed eight-bit immediate.
    CsscSimm8,
    /// CSSC unsigned eight-bit immediate.
    CsscUimm8,
    /// SME2 narrowing shift, four bits.
    SmeShrimm4,
    /// SME2 narrowing shift, five bits.
    SmeShrimm5,
    /// `zt0[imm]`.
    SmeZt0Index,
    /// `vlx2`/`vlx4` at bit 10.
    SmeVlxN10,
    /// `vlx2`/`vlx4` at bit 13.
    SmeVlxN13,

    // ── Conditions ──
    /// Any condition.
    Cond,
    /// Condition other than AL and NV.
    Cond1,

    // ── Addresses ──
    /// ADRP page address.
    AddrAdrp,
    /// 14-bit branch offset.
    AddrPcrel14,
    /// 19-bit branch or literal offset.
    AddrPcrel19,
    /// ADR offset.
    AddrPcrel21,
    /// 26-bit branch offset.
    AddrPcrel26,
    /// `[Xn]`.
    AddrSimple,
    /// `[Xn, Rm{, ext #amount}]`.
    AddrRegoff,
    /// Pair offset, signed seven bits scaled.
    AddrSimm7,
    /// Signed nine-bit offset.
    AddrSimm9,
    /// Signed nine-bit offset, unscaled alias of a scaled form.
    AddrSimm9_2,
    /// LDRAA/LDRAB offset.
    AddrSimm10,
    /// Tag-granule pair offset.
    AddrSimm11,
    /// Tag-granule offset.
    AddrSimm13,
    /// Unscaled signed nine-bit offset of LDAPUR-style loads.
    AddrOffset,
    /// Unsigned 12-bit offset scaled by the access size.
    AddrUimm12,
    /// `[Xn]` of SIMD load/store.
    SimdAddrSimple,
    /// `[Xn], Xm` or `[Xn], #imm` of SIMD load/store.
    SimdAddrPost,
    /// RCPC3 `[Xn{, #-size}]!`.
    Rcpc3AddrOptPreindWb,
    /// RCPC3 `[Xn]{, #size}`.
    Rcpc3AddrOptPostind,
    /// RCPC3 `[Xn, #-size]!`.
    Rcpc3AddrPreindWb,
    /// RCPC3 `[Xn], #size`.
    Rcpc3AddrPostind,
    /// RCPC3 `[Xn{, #simm9}]`.
    Rcpc3AddrOffset,
    /// SME `[Xn{, #imm, mul vl}]`, 0 to 15.
    SmeAddrRiU4xVl,
    /// `[Xn{, #imm, mul vl}]`, -8 to 7.
    SveAddrRiS4xVl,
    /// `[Xn{, #imm, mul vl}]` in steps of 2.
    SveAddrRiS4x2xVl,
    /// `[Xn{, #imm, mul vl}]` in steps of 3.
    SveAddrRiS4x3xVl,
    /// `[Xn{, #imm, mul vl}]` in steps of 4.
    SveAddrRiS4x4xVl,
    /// `[Xn{, #imm, mul vl}]`, -32 to 31.
    SveAddrRiS6xVl,
    /// `[Xn{, #imm, mul vl}]`, -256 to 255.
    SveAddrRiS9xVl,
    /// `[Xn{, #imm}]`, 0 to 63.
    SveAddrRiU6,
    /// `[Xn{, #imm}]`, 0 to 126 in steps of 2.
    SveAddrRiU6x2,
    /// `[Xn{, #imm}]`, 0 to 252 in steps of 4.
    SveAddrRiU6x4,
    /// `[Xn{, #imm}]`, 0 to 504 in steps of 8.
    SveAddrRiU6x8,
    /// `[Xn{, #imm}]`, -128 to 112 in steps of 16.
    SveAddrRiS4x16,
    /// `[Xn{, #imm}]`, -256 to 224 in steps of 32.
    SveAddrRiS4x32,
    /// `[Xn]`.
    SveAddrR,
    /// `[Xn, Xm]`.
    SveAddrRr,
    /// `[Xn, Xm, lsl #1]`.
    SveAddrRrLsl1,
    /// `[Xn, Xm, lsl #2]`.
    SveAddrRrLsl2,
    /// `[Xn, Xm, lsl #3]`.
    SveAddrRrLsl3,
    /// `[Xn, Xm, lsl #4]`.
    SveAddrRrLsl4,
    /// `[Xn, Xm]`, `xzr` rejected.
    SveAddrRx,
    /// `[Xn, Xm, lsl #1]`, `xzr` rejected.
    SveAddrRxLsl1,
    /// `[Xn, Xm, lsl #2]`, `xzr` rejected.
    SveAddrRxLsl2,
    /// `[Xn, Xm, lsl #3]`, `xzr` rejected.
    SveAddrRxLsl3,
    /// `[Xn, Zm.D]`.
    SveAddrRz,
    /// `[Xn, Zm.D, lsl #1]`.
    SveAddrRzLsl1,
    /// `[Xn, Zm.D, lsl #2]`.
    SveAddrRzLsl2,
    /// `[Xn, Zm.D, lsl #3]`.
    SveAddrRzLsl3,
    /// `[Xn, Zm.T, (s|u)xtw]`, extend bit 14.
    SveAddrRzXtw14,
    /// `[Xn, Zm.T, (s|u)xtw]`, extend bit 22.
    SveAddrRzXtw22,
    /// `[Xn, Zm.T, (s|u)xtw #1]`, extend bit 14.
    SveAddrRzXtw1_14,
    /// `[Xn, Zm.T, (s|u)xtw #1]`, extend bit 22.
    SveAddrRzXtw1_22,
    /// `[Xn, Zm.T, (s|u)xtw #2]`, extend bit 14.
    SveAddrRzXtw2_14,
    /// `[Xn, Zm.T, (s|u)xtw #2]`, extend bit 22.
    SveAddrRzXtw2_22,
    /// `[Xn, Zm.T, (s|u)xtw #3]`, extend bit 14.
    SveAddrRzXtw3_14,
    /// `[Xn, Zm.T, (s|u)xtw #3]`, extend bit 22.
    SveAddrRzXtw3_22,
    /// `[Zn.T{, #imm}]`, 0 to 31.
    SveAddrZiU5,
    /// `[Zn.T{, #imm}]`, 0 to 62 in steps of 2.
    SveAddrZiU5x2,
    /// `[Zn.T{, #imm}]`, 0 to 124 in steps of 4.
    SveAddrZiU5x4,
    /// `[Zn.T{, #imm}]`, 0 to 248 in steps of 8.
    SveAddrZiU5x8,
    /// `[Zn.T, Zm.T{, lsl #amount}]`.
    SveAddrZzLsl,
    /// `[Zn.D, Zm.D, sxtw{ #amount}]`.
    SveAddrZzSxtw,
    /// `[Zn.D, Zm.D, uxtw{ #amount}]`.
    SveAddrZzUxtw,

    // ── System ──
    /// MRS/MSR system register.
    Sysreg,
    /// MSR immediate PSTATE field.
    Pstatefield,
    /// AT operation.
    SysregAt,
    /// DC operation.
    SysregDc,
    /// IC operation.
    SysregIc,
    /// TLBI operation.
    SysregTlbi,
    /// DMB/DSB option.
    Barrier,
    /// ISB option.
    BarrierIsb,
    /// DSB nXS option.
    BarrierDsbNxs,
    /// PSB CSYNC.
    BarrierPsb,
    /// GCSB DSYNC.
    BarrierGcsb,
    /// BTI target.
    BtiTarget,
    /// PRFM operation.
    Prfop,
}

use OperandClass as C;

const MAYBE_SP: OperandFlags = OperandFlags::MAYBE_SP;
const NO_ZR: OperandFlags = OperandFlags::NO_ZR;
const SHIFT_BY_2: OperandFlags = OperandFlags::SHIFT_BY_2;

impl OperandCode {
    /// Static descriptor of this code.
    pub fn desc(self) -> OperandDesc {
        use Field as F;
        use OperandCode as O;
        match self {
            O::Nil => od(C::Nil, &[]),

            O::Rd => od(C::IntReg, &[F::Rd]),
            O::Rn => od(C::IntReg, &[F::Rn]),
            O::Rm => od(C::IntReg, &[F::Rm]),
            O::Rt | O::RtSys => od(C::IntReg, &[F::Rt]),
            O::Rt2 => od(C::IntReg, &[F::Rt2]),
            O::Rs => od(C::IntReg, &[F::Rs]),
            O::Ra => od(C::IntReg, &[F::Ra]),
            O::RdSp => odf(C::IntReg, &[F::Rd], MAYBE_SP, 0),
            O::RnSp => odf(C::IntReg, &[F::Rn], MAYBE_SP, 0),
            O::RtSp => odf(C::IntReg, &[F::Rt], MAYBE_SP, 0),
            O::RmSp => odf(C::IntReg, &[F::Rm], MAYBE_SP, 0),
            O::PairReg | O::PairRegOrXzr | O::X16 => od(C::IntReg, &[]),
            O::SveRm => od(C::IntReg, &[F::SveRm]),
            O::SveRnSp => odf(C::IntReg, &[F::SveRn], MAYBE_SP, 0),
            O::MopsAddrRd => od(C::IntReg, &[F::Rd]),
            O::MopsAddrRs => od(C::IntReg, &[F::Rs]),
            O::MopsWbRn => od(C::IntReg, &[F::Rn]),

            O::RmExt => od(C::ModifiedReg, &[F::Rm, F::Option, F::Imm3_10]),
            O::RmSft => od(C::ModifiedReg, &[F::Rm, F::Shift, F::Imm6_10]),

            O::Fd => od(C::FpReg, &[F::Rd]),
            O::Fn => od(C::FpReg, &[F::Rn]),
            O::Fm => od(C::FpReg, &[F::Rm]),
            O::Fa => od(C::FpReg, &[F::Ra]),
            O::Ft => od(C::FpReg, &[F::Rt]),
            O::Ft2 => od(C::FpReg, &[F::Rt2]),
            O::Sd | O::Vd | O::VdD1 => od(C::SimdReg, &[F::Rd]),
            O::Sn | O::Vn | O::VnD1 => od(C::SimdReg, &[F::Rn]),
            O::Sm | O::Vm => od(C::SimdReg, &[F::Rm]),
            O::Va => od(C::SimdReg, &[F::Ra]),
            O::SveVd => od(C::SimdReg, &[F::SveVd]),
            O::SveVm => od(C::SimdReg, &[F::SveVm]),
            O::SveVn => od(C::SimdReg, &[F::SveVn]),

            O::Ed => od(C::SimdElement, &[F::Rd]),
            O::En => od(C::SimdElement, &[F::Rn]),
            O::Em => od(C::SimdElement, &[F::Rm]),
            O::Em16 => od(C::SimdElement, &[F::Rm]),
            O::LVn => od(C::SimdReglist, &[F::Rn]),
            O::LVt | O::LVtAl | O::LEt => od(C::SimdReglist, &[F::Rt]),

            O::SveZa5 => od(C::SveReg, &[F::SveZa5]),
            O::SveZa16 => od(C::SveReg, &[F::SveZa16]),
            O::SveZd => od(C::SveReg, &[F::SveZd]),
            O::SveZm5 => od(C::SveReg, &[F::SveZm5]),
            O::SveZm16 => od(C::SveReg, &[F::SveZm16]),
            O::SveZn => od(C::SveReg, &[F::SveZn]),
            O::SveZt => od(C::SveReg, &[F::SveZt]),
            O::SmeZm => od(C::SveReg, &[F::SmeZm]),
            O::SveZm3Index => odd(C::SveReg, &[F::SveZm16], 3),
            O::SveZm3_22Index => odd(C::SveReg, &[F::SveI3h, F::SveZm16], 3),
            O::SveZm3_11Index => odd(C::SveReg, &[F::SveI3h2, F::SveI3l, F::SveImm3], 3),
            O::SveZm4Index => odd(C::SveReg, &[F::SveZm16], 4),
            O::SveZm4_11Index => odd(C::SveReg, &[F::SveI2h, F::SveI3l, F::SveImm4], 4),
            O::SveZnIndex | O::SveZn5Index => od(C::SveReg, &[F::SveZn]),
            O::SveZmImm4 => od(C::SveReg, &[F::SveZm5, F::SveImm4]),
            O::SmePNn3Index1 => od(C::SveReg, &[F::SmePNn3, F::Imm1_8]),
            O::SmePNn3Index2 => od(C::SveReg, &[F::SmePNn3, F::Imm2_8]),
            O::SmeZnIndex1_16 => od(C::SveReg, &[F::SveZn, F::Imm1_16]),
            O::SmeZnIndex2_15 => od(C::SveReg, &[F::SveZn, F::Imm2_15]),
            O::SmeZnIndex3_14 => od(C::SveReg, &[F::SveZn, F::Imm3_14]),
            O::SmeZmIndex1 => od(C::SveReg, &[F::SmeZm, F::Imm1_10]),
            O::SmeZmIndex2 => od(C::SveReg, &[F::SmeZm, F::Imm2_10]),
            O::SmeZmIndex3_10 => od(C::SveReg, &[F::SmeZm, F::Imm1_15, F::Imm2_10]),
            O::SmeZmIndex4_10 => od(C::SveReg, &[F::SmeZm, F::Imm1_15, F::Imm3_10]),
            O::SmePnTWmImm => od(C::SveReg, &[F::SmeRv, F::SmeTszl]),
            O::SmeZAda2b => od(C::SveReg, &[F::SmeZAda2b]),
            O::SmeZAda3b => od(C::SveReg, &[F::SmeZAda3b]),
            O::SmeListOf64bitTiles => od(C::SveReg, &[F::SmeZeroMask]),
            O::SmeSmZa | O::SmeZt0 | O::SmeZt0List => od(C::SveReg, &[]),

            O::SmePdx2 => odd(C::SveReglist, &[F::SmePdx2], 2),
            O::SmeZdnx2 => odd(C::SveReglist, &[F::SmeZdn2], 2),
            O::SmeZdnx4 => odd(C::SveReglist, &[F::SmeZdn4], 4),
            O::SmeZmx2 => odd(C::SveReglist, &[F::SmeZm2], 2),
            O::SmeZmx4 => odd(C::SveReglist, &[F::SmeZm4], 4),
            O::SmeZnx2 => odd(C::SveReglist, &[F::SmeZn2], 2),
            O::SmeZnx4 => odd(C::SveReglist, &[F::SmeZn4], 4),
            O::SmeZtx2Strided => odd(C::SveReglist, &[F::SmeZtT, F::SmeZt3], 2),
            O::SmeZtx4Strided => odd(C::SveReglist, &[F::SmeZtT, F::SmeZt2], 4),
            O::SmeZt2 => odd(C::SveReglist, &[F::SveZt], 2),
            O::SmeZt3 => odd(C::SveReglist, &[F::SveZt], 3),
            O::SmeZt4 => odd(C::SveReglist, &[F::SveZt], 4),
            O::SmePdxN => od(C::SveReglist, &[F::SvePd]),
            O::SveZnxN => od(C::SveReglist, &[F::SveZn]),
            O::SveZtxN => od(C::SveReglist, &[F::SveZt]),

            O::SvePd | O::SvePNd => od(C::PredReg, &[F::SvePd]),
            O::SvePg3 | O::SmePNg3 => od(C::PredReg, &[F::SvePg3]),
            O::SvePg4_5 => od(C::PredReg, &[F::SvePg4_5]),
            O::SvePg4_10 | O::SvePNg4_10 => od(C::PredReg, &[F::SvePg4_10]),
            O::SvePg4_16 => od(C::PredReg, &[F::SvePg4_16]),
            O::SvePm => od(C::PredReg, &[F::SvePm]),
            O::SvePn | O::SvePNn | O::SmePNn => od(C::PredReg, &[F::SvePn]),
            O::SvePt | O::SvePNt => od(C::PredReg, &[F::SvePt]),
            O::SmePm => od(C::PredReg, &[F::SmePm]),
            O::SmePNd3 => od(C::PredReg, &[F::SmePNd3]),

            O::SmeZaHvIdxSrc
            | O::SmeZaHvIdxSrcxN
            | O::SmeZaHvIdxDest
            | O::SmeZaHvIdxDestxN
            | O::SmeZaHvIdxLdstr => od(C::ZaAccess, &[F::SmeV, F::SmeRv]),
            O::SmeZaArrayOff4 => od(C::ZaAccess, &[F::SmeRv, F::Imm4_10]),
            O::SmeZaArrayOff3_0 => od(C::ZaAccess, &[F::SmeRv, F::Off3]),
            O::SmeZaArrayOff3_5 => od(C::ZaAccess, &[F::SmeRv, F::Op2]),
            O::SmeZaArrayOff1x4 => od(C::ZaAccess, &[F::SmeRv, F::SveI1]),
            O::SmeZaArrayOff2x2 | O::SmeZaArrayOff2x4 => od(C::ZaAccess, &[F::SmeRv, F::Off2]),
            O::SmeZaArrayOff3x2 => od(C::ZaAccess, &[F::SmeRv, F::Off3]),
            O::SmeZaArrayVrsb1
            | O::SmeZaArrayVrsh1
            | O::SmeZaArrayVrss1
            | O::SmeZaArrayVrsd1
            | O::SmeZaArrayVrsb2
            | O::SmeZaArrayVrsh2
            | O::SmeZaArrayVrss2
            | O::SmeZaArrayVrsd2 => od(C::ZaAccess, &[F::SmeV, F::SmeRv]),

            O::CRn => od(C::Immediate, &[F::CRn]),
            O::CRm => od(C::Immediate, &[F::CRm]),
            O::ImmVlsl | O::ImmVlsr => od(C::Immediate, &[F::Immh, F::Immb]),
            O::ShllImm | O::Imm0 | O::FpImm0 | O::ImmMov => od(C::Immediate, &[]),
            O::Immr => od(C::Immediate, &[F::Immr]),
            O::Imms | O::Width => od(C::Immediate, &[F::Imms]),
            O::BitNum => od(C::Immediate, &[F::B5, F::B40]),
            O::Fbits => od(C::Immediate, &[F::Scale]),
            O::Aimm => od(C::Immediate, &[F::Shift, F::Imm12]),
            O::Half => od(C::Immediate, &[F::Hw, F::Imm16_5]),
            O::Limm => od(C::Immediate, &[F::N, F::Immr, F::Imms]),
            O::Nzcv => od(C::Immediate, &[F::Nzcv]),
            O::CcmpImm => od(C::Immediate, &[F::Imm5]),
            O::Exception | O::TmeUimm16 => od(C::Immediate, &[F::Imm16_5]),
            O::Undefined => od(C::Immediate, &[F::Imm16_0]),
            O::Uimm4 => od(C::Immediate, &[F::CRm]),
            O::Uimm4Addg => od(C::Immediate, &[F::Imm4_10]),
            O::Uimm7 => od(C::Immediate, &[F::CRm, F::Op2]),
            O::Uimm10 => od(C::Immediate, &[F::Imm6_16]),
            O::Uimm3Op1 => od(C::Immediate, &[F::Op1]),
            O::Uimm3Op2 => od(C::Immediate, &[F::Op2]),
            O::Simm5 => od(C::Immediate, &[F::Imm5]),
            O::FpImm => od(C::Immediate, &[F::Imm8]),
            O::SimdImm | O::SimdImmSft | O::SimdFpImm => od(C::Immediate, &[F::Abc, F::Defgh]),
            O::ImmRot1 => od(C::Immediate, &[F::Rotate1]),
            O::ImmRot2 => od(C::Immediate, &[F::Rotate2]),
            O::ImmRot3 => od(C::Immediate, &[F::Rotate3]),
            O::SveAimm | O::SveAsimm => od(C::Immediate, &[F::SveImm9]),
            O::SveFpImm8 => od(C::Immediate, &[F::SveImm8]),
            O::SveI1HalfOne | O::SveI1HalfTwo | O::SveI1ZeroOne => od(C::Immediate, &[F::SveI1]),
            O::SveInvLimm | O::SveLimm | O::SveLimmMov => {
                od(C::Immediate, &[F::SveN, F::SveImmr, F::SveImms])
            }
            O::SvePattern | O::SvePatternScaled => od(C::Immediate, &[F::SvePattern]),
            O::SvePrfop => od(C::Immediate, &[F::SvePrfop]),
            O::SveShlimmPred | O::SveShrimmPred => od(C::Immediate, &[F::SveTszh, F::SveImm5]),
            O::SveShlimmUnpred | O::SveShrimmUnpred => {
                od(C::Immediate, &[F::SveTszh, F::SveTszl19, F::SveImm3])
            }
            O::SveShlimmUnpred22 | O::SveShrimmUnpred22 => {
                od(C::Immediate, &[F::SveSz, F::SveTszl19, F::SveImm3])
            }
            O::SveSimm5 => od(C::Immediate, &[F::SveImm5]),
            O::SveSimm5b => od(C::Immediate, &[F::SveImm5b]),
            O::SveSimm6 => od(C::Immediate, &[F::SveImms]),
            O::SveSimm8 | O::SveUimm8 => od(C::Immediate, &[F::SveImm8]),
            O::SveUimm3 => od(C::Immediate, &[F::SveImm3]),
            O::SveUimm7 => od(C::Immediate, &[F::SveImm7]),
            O::SveUimm8_53 => od(C::Immediate, &[F::Imm5, F::Imm3_10]),
            O::SveImmRot1 => od(C::Immediate, &[F::SveRot1]),
            O::SveImmRot2 => od(C::Immediate, &[F::SveRot2]),
            O::SveImmRot3 => od(C::Immediate, &[F::SveRot3]),
            O::CsscSimm8 | O::CsscUimm8 => od(C::Immediate, &[F::CsscImm8]),
            O::SmeShrimm4 => od(C::Immediate, &[F::Imm4_16]),
            O::SmeShrimm5 => od(C::Immediate, &[F::SveTszh, F::Imm5]),
            O::SmeZt0Index => od(C::Immediate, &[F::Imm3_12]),
            O::SmeVlxN10 => od(C::Immediate, &[F::SmeVl10]),
            O::SmeVlxN13 => od(C::Immediate, &[F::SmeVl13]),

            O::Cond | O::Cond1 => od(C::Cond, &[F::Cond]),

            O::AddrAdrp | O::AddrPcrel21 => od(C::Address, &[F::ImmHi, F::ImmLo]),
            O::AddrPcrel14 => odf(C::Address, &[F::Imm14], SHIFT_BY_2, 0),
            O::AddrPcrel19 => odf(C::Address, &[F::Imm19], SHIFT_BY_2, 0),
            O::AddrPcrel26 => odf(C::Address, &[F::Imm26], SHIFT_BY_2, 0),
            O::AddrSimple | O::SimdAddrSimple => od(C::Address, &[F::Rn]),
            O::AddrRegoff => od(C::Address, &[F::Rn, F::Rm, F::Option, F::S]),
            O::AddrSimm7 => od(C::Address, &[F::Imm7, F::Rn]),
            O::AddrSimm9 | O::AddrSimm9_2 | O::AddrOffset | O::Rcpc3AddrOffset => {
                od(C::Address, &[F::Imm9, F::Rn])
            }
            O::AddrSimm10 => od(C::Address, &[F::Rn, F::Sz, F::Imm9]),
            O::AddrSimm11 => od(C::Address, &[F::Imm7, F::Rn]),
            O::AddrSimm13 => od(C::Address, &[F::Imm9, F::Rn]),
            O::AddrUimm12 => od(C::Address, &[F::Rn, F::Imm12]),
            O::SimdAddrPost => od(C::Address, &[F::Rn, F::Rm]),
            O::Rcpc3AddrOptPreindWb
            | O::Rcpc3AddrOptPostind
            | O::Rcpc3AddrPreindWb
            | O::Rcpc3AddrPostind => od(C::Address, &[F::Rn]),
            O::SmeAddrRiU4xVl => od(C::Address, &[F::Rn, F::Imm4_10]),
            O::SveAddrRiS4xVl => odd(C::Address, &[F::Rn, F::SveImm4], 0),
            O::SveAddrRiS4x2xVl => odd(C::Address, &[F::Rn, F::SveImm4], 1),
            O::SveAddrRiS4x3xVl => odd(C::Address, &[F::Rn, F::SveImm4], 2),
            O::SveAddrRiS4x4xVl => odd(C::Address, &[F::Rn, F::SveImm4], 3),
            O::SveAddrRiS6xVl => odd(C::Address, &[F::Rn, F::SveImm6], 0),
            O::SveAddrRiS9xVl => odd(C::Address, &[F::Rn, F::SveImm9], 0),
            O::SveAddrRiU6 => odd(C::Address, &[F::Rn, F::SveImm6], 0),
            O::SveAddrRiU6x2 => odd(C::Address, &[F::Rn, F::SveImm6], 1),
            O::SveAddrRiU6x4 => odd(C::Address, &[F::Rn, F::SveImm6], 2),
            O::SveAddrRiU6x8 => odd(C::Address, &[F::Rn, F::SveImm6], 3),
            O::SveAddrRiS4x16 => odd(C::Address, &[F::Rn, F::SveImm4], 4),
            O::SveAddrRiS4x32 => odd(C::Address, &[F::Rn, F::SveImm4], 5),
            O::SveAddrR | O::SveAddrRr => odd(C::Address, &[F::Rn, F::Rm], 0),
            O::SveAddrRrLsl1 => odd(C::Address, &[F::Rn, F::Rm], 1),
            O::SveAddrRrLsl2 => odd(C::Address, &[F::Rn, F::Rm], 2),
            O::SveAddrRrLsl3 => odd(C::Address, &[F::Rn, F::Rm], 3),
            O::SveAddrRrLsl4 => odd(C::Address, &[F::Rn, F::Rm], 4),
            O::SveAddrRx => odf(C::Address, &[F::Rn, F::Rm], NO_ZR, 0),
            O::SveAddrRxLsl1 => odf(C::Address, &[F::Rn, F::Rm], NO_ZR, 1),
            O::SveAddrRxLsl2 => odf(C::Address, &[F::Rn, F::Rm], NO_ZR, 2),
            O::SveAddrRxLsl3 => odf(C::Address, &[F::Rn, F::Rm], NO_ZR, 3),
            O::SveAddrRz => odd(C::Address, &[F::Rn, F::SveZm16], 0),
            O::SveAddrRzLsl1 => odd(C::Address, &[F::Rn, F::SveZm16], 1),
            O::SveAddrRzLsl2 => odd(C::Address, &[F::Rn, F::SveZm16], 2),
            O::SveAddrRzLsl3 => odd(C::Address, &[F::Rn, F::SveZm16], 3),
            O::SveAddrRzXtw14 => odd(C::Address, &[F::Rn, F::SveZm16, F::SveXs14], 0),
            O::SveAddrRzXtw22 => odd(C::Address, &[F::Rn, F::SveZm16, F::SveXs22], 0),
            O::SveAddrRzXtw1_14 => odd(C::Address, &[F::Rn, F::SveZm16, F::SveXs14], 1),
            O::SveAddrRzXtw1_22 => odd(C::Address, &[F::Rn, F::SveZm16, F::SveXs22], 1),
            O::SveAddrRzXtw2_14 => odd(C::Address, &[F::Rn, F::SveZm16, F::SveXs14], 2),
            O::SveAddrRzXtw2_22 => odd(C::Address, &[F::Rn, F::SveZm16, F::SveXs22], 2),
            O::SveAddrRzXtw3_14 => odd(C::Address, &[F::Rn, F::SveZm16, F::SveXs14], 3),
            O::SveAddrRzXtw3_22 => odd(C::Address, &[F::Rn, F::SveZm16, F::SveXs22], 3),
            O::SveAddrZiU5 => odd(C::Address, &[F::SveZn, F::SveImm5b], 0),
            O::SveAddrZiU5x2 => odd(C::Address, &[F::SveZn, F::SveImm5b], 1),
            O::SveAddrZiU5x4 => odd(C::Address, &[F::SveZn, F::SveImm5b], 2),
            O::SveAddrZiU5x8 => odd(C::Address, &[F::SveZn, F::SveImm5b], 3),
            O::SveAddrZzLsl | O::SveAddrZzSxtw | O::SveAddrZzUxtw => {
                od(C::Address, &[F::SveZn, F::SveZm16, F::SveMsz])
            }

            O::Sysreg => od(C::System, &[F::Op0, F::Op1, F::CRn, F::CRm, F::Op2]),
            O::Pstatefield => od(C::System, &[F::Op1, F::Op2]),
            O::SysregAt | O::SysregDc | O::SysregIc | O::SysregTlbi => {
                od(C::System, &[F::Op1, F::CRn, F::CRm, F::Op2])
            }
            O::Barrier | O::BarrierIsb => od(C::System, &[F::CRm]),
            O::BarrierDsbNxs => od(C::System, &[F::CRmDsbNxs]),
            O::BarrierPsb | O::BarrierGcsb | O::BtiTarget => od(C::System, &[]),
            O::Prfop => od(C::System, &[F::Rt]),
        }
    }

    /// Operand family of this code.
    pub fn class(self) -> OperandClass {
        self.desc().class
    }

    /// Whether register 31 means SP for this code.
    pub fn maybe_sp(self) -> bool {
        self.desc().flags.contains(OperandFlags::MAYBE_SP)
    }

    /// Whether this is one of the SVE scalar or vector register codes whose
    /// register number a preceding MOVPRFX constrains.
    pub fn is_movprfx_register(self) -> bool {
        matches!(
            self,
            OperandCode::SveZd
                | OperandCode::SveZm5
                | OperandCode::SveZm16
                | OperandCode::SveZn
                | OperandCode::SveZt
                | OperandCode::SveVm
                | OperandCode::SveVn
                | OperandCode::Va
                | OperandCode::Vn
                | OperandCode::Vm
                | OperandCode::Sn
                | OperandCode::Sm
        )
    }

    /// Whether this is an SVE governing or general predicate code.
    pub fn is_sve_predicate(self) -> bool {
        matches!(
            self,
            OperandCode::SvePd
                | OperandCode::SvePg3
                | OperandCode::SvePg4_5
                | OperandCode::SvePg4_10
                | OperandCode::SvePg4_16
                | OperandCode::SvePm
                | OperandCode::SvePn
                | OperandCode::SvePt
                | OperandCode::SmePm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes() {
        assert_eq!(OperandCode::RdSp.class(), OperandClass::IntReg);
        assert!(OperandCode::RdSp.maybe_sp());
        assert!(!OperandCode::Rd.maybe_sp());
        assert_eq!(OperandCode::RmExt.class(), OperandClass::ModifiedReg);
        assert_eq!(OperandCode::SmeZaArrayOff2x2.class(), OperandClass::ZaAccess);
        assert_eq!(OperandCode::AddrPcrel26.class(), OperandClass::Address);
        assert_eq!(OperandCode::Nil.class(), OperandClass::Nil);
    }

    #[test]
    fn widths_and_data() {
        assert_eq!(OperandCode::AddrPcrel21.desc().width(), 21);
        assert_eq!(OperandCode::SveZm3_22Index.desc().width(), 6);
        assert_eq!(OperandCode::SveZm3_22Index.desc().data, 3);
        assert_eq!(OperandCode::SmePNn3Index2.desc().field_width(1), 2);
        assert_eq!(OperandCode::SmePNn3Index2.desc().field_width(5), 0);
        assert_eq!(OperandCode::SveAddrRiS4x32.desc().data, 5);
        assert!(OperandCode::SveAddrRxLsl2.desc().flags.contains(OperandFlags::NO_ZR));
        assert!(OperandCode::AddrPcrel19.desc().flags.contains(OperandFlags::SHIFT_BY_2));
        assert!(!OperandCode::AddrPcrel21.desc().flags.contains(OperandFlags::SHIFT_BY_2));
    }

    #[test]
    fn movprfx_sets() {
        assert!(OperandCode::SveZd.is_movprfx_register());
        assert!(!OperandCode::SveZa5.is_movprfx_register());
        assert!(OperandCode::SvePg3.is_sve_predicate());
        assert!(!OperandCode::SmePNd3.is_sve_predicate());
    }
}
