//! The opcode table.
//!
//! A representative slice of the A64 instruction set covering every
//! operand family the checker knows about. Entries that must follow each
//! other in program order (the MOPS prologue/main/epilogue triples) are
//! adjacent here, since sequencing rules look up neighbours by position.

use crate::feature::{Feature, FeatureSet};
use crate::opcode::{Constraints, InsnClass as IC, OpKind, Opcode, OpcodeFlags, QualifierSeq, Verifier};
use crate::operand::OperandCode as O;
use crate::qualifier::Qualifier as Q;

// ── Feature sets ─────────────────────────────────────────────────────────

const V8: FeatureSet = FeatureSet::only(Feature::V8);
const FP: FeatureSet = FeatureSet::only(Feature::Fp);
const SIMD: FeatureSet = FeatureSet::only(Feature::Simd);
const LSE: FeatureSet = FeatureSet::only(Feature::Lse);
const MEMTAG: FeatureSet = FeatureSet::only(Feature::Memtag);
const TME: FeatureSet = FeatureSet::only(Feature::Tme);
const CSSC: FeatureSet = FeatureSet::only(Feature::Cssc);
const RCPC3: FeatureSet = FeatureSet::only(Feature::Rcpc3);
const MOPS: FeatureSet = FeatureSet::only(Feature::Mops);
const SVE: FeatureSet = FeatureSet::only(Feature::Sve);
const SVE2: FeatureSet = FeatureSet::only(Feature::Sve2);
const SME: FeatureSet = FeatureSet::only(Feature::Sme);
const SME2: FeatureSet = FeatureSet::only(Feature::Sme2);
const V8_4A: FeatureSet = FeatureSet::only(Feature::V8_4A);

// ── Flag shorthands ──────────────────────────────────────────────────────

const MOVPRFX_OK: Constraints = Constraints::SCAN_MOVPRFX;
const SCAN: OpcodeFlags = OpcodeFlags::SCAN;
const ALIAS: OpcodeFlags = OpcodeFlags::ALIAS;

// ── Shared qualifier sequences ───────────────────────────────────────────

const QL_R1NIL: &[QualifierSeq] = &[&[Q::W, Q::Nil], &[Q::X, Q::Nil]];
const QL_R2NIL: &[QualifierSeq] = &[&[Q::W, Q::W, Q::Nil], &[Q::X, Q::X, Q::Nil]];
const QL_I3SAMER: &[QualifierSeq] = &[&[Q::W, Q::W, Q::W], &[Q::X, Q::X, Q::X]];
const QL_I3SAMEX: &[QualifierSeq] = &[&[Q::X, Q::X, Q::X]];
const QL_LDST_R: &[QualifierSeq] = &[&[Q::W, Q::SS], &[Q::X, Q::SD]];
const QL_LDST_PAIR_R: &[QualifierSeq] = &[&[Q::W, Q::W, Q::SS], &[Q::X, Q::X, Q::SD]];
const QL_X1NIL: &[QualifierSeq] = &[&[Q::X, Q::Nil]];
const QL_FP3: &[QualifierSeq] = &[&[Q::SH, Q::SH, Q::SH], &[Q::SS, Q::SS, Q::SS], &[Q::SD, Q::SD, Q::SD]];
const QL_V3SAME_BHSD: &[QualifierSeq] = &[
    &[Q::V8B, Q::V8B, Q::Nil],
    &[Q::V16B, Q::V16B, Q::Nil],
    &[Q::V4H, Q::V4H, Q::Nil],
    &[Q::V8H, Q::V8H, Q::Nil],
    &[Q::V2S, Q::V2S, Q::Nil],
    &[Q::V4S, Q::V4S, Q::Nil],
    &[Q::V2D, Q::V2D, Q::Nil],
];
const QL_SIMD_LDST: &[QualifierSeq] = &[
    &[Q::V8B, Q::Nil],
    &[Q::V16B, Q::Nil],
    &[Q::V4H, Q::Nil],
    &[Q::V8H, Q::Nil],
    &[Q::V2S, Q::Nil],
    &[Q::V4S, Q::Nil],
    &[Q::V1D, Q::Nil],
    &[Q::V2D, Q::Nil],
];
const QL_SIMD_LDSTONE: &[QualifierSeq] = &[&[Q::SB, Q::Nil], &[Q::SH, Q::Nil], &[Q::SS, Q::Nil], &[Q::SD, Q::Nil]];

const SVE_BHSD_2: &[QualifierSeq] = &[&[Q::SB, Q::SB], &[Q::SH, Q::SH], &[Q::SS, Q::SS], &[Q::SD, Q::SD]];
const SVE_BHSD_3: &[QualifierSeq] = &[
    &[Q::SB, Q::SB, Q::SB],
    &[Q::SH, Q::SH, Q::SH],
    &[Q::SS, Q::SS, Q::SS],
    &[Q::SD, Q::SD, Q::SD],
];
const SVE_BHSD_IMM: &[QualifierSeq] = &[
    &[Q::SB, Q::SB, Q::Nil],
    &[Q::SH, Q::SH, Q::Nil],
    &[Q::SS, Q::SS, Q::Nil],
    &[Q::SD, Q::SD, Q::Nil],
];
const SVE_BHSD_1IMM: &[QualifierSeq] = &[&[Q::SB, Q::Nil], &[Q::SH, Q::Nil], &[Q::SS, Q::Nil], &[Q::SD, Q::Nil]];
const SVE_BHSD_MERGE: &[QualifierSeq] = &[
    &[Q::SB, Q::PM, Q::SB, Q::SB],
    &[Q::SH, Q::PM, Q::SH, Q::SH],
    &[Q::SS, Q::PM, Q::SS, Q::SS],
    &[Q::SD, Q::PM, Q::SD, Q::SD],
];
const SVE_BHSD_MERGE_IMM: &[QualifierSeq] = &[
    &[Q::SB, Q::PM, Q::SB, Q::Nil],
    &[Q::SH, Q::PM, Q::SH, Q::Nil],
    &[Q::SS, Q::PM, Q::SS, Q::Nil],
    &[Q::SD, Q::PM, Q::SD, Q::Nil],
];
const SVE_HSD_MERGE: &[QualifierSeq] = &[
    &[Q::SH, Q::PM, Q::SH, Q::SH],
    &[Q::SS, Q::PM, Q::SS, Q::SS],
    &[Q::SD, Q::PM, Q::SD, Q::SD],
];
const SVE_HSD_MERGE_IMM: &[QualifierSeq] = &[
    &[Q::SH, Q::PM, Q::SH, Q::Nil],
    &[Q::SS, Q::PM, Q::SS, Q::Nil],
    &[Q::SD, Q::PM, Q::SD, Q::Nil],
];
const SVE_LD_S: &[QualifierSeq] = &[&[Q::SS, Q::PZ, Q::Nil]];
const SVE_LD_D: &[QualifierSeq] = &[&[Q::SD, Q::PZ, Q::Nil]];
const SVE_GATHER_S: &[QualifierSeq] = &[&[Q::SS, Q::PZ, Q::SS]];
const SVE_GATHER_D: &[QualifierSeq] = &[&[Q::SD, Q::PZ, Q::SD]];
const MOPS_QL: &[QualifierSeq] = QL_I3SAMEX;
const NO_QL: &[QualifierSeq] = &[&[]];

/// Every opcode, in table order.
pub static OPCODES: &[Opcode] = &[
    // ── Data processing (immediate) ──────────────────────────────────────
    Opcode::new("add_imm", "add", 0x1100_0000, 0x7f80_0000, IC::AddsubImm, V8,
        &[O::RdSp, O::RnSp, O::Aimm], QL_R2NIL),
    Opcode::new("and_imm", "and", 0x1200_0000, 0x7f80_0000, IC::LogImm, V8,
        &[O::RdSp, O::Rn, O::Limm], QL_R2NIL),
    Opcode::new("movz", "movz", 0x5280_0000, 0x7f80_0000, IC::Movewide, V8,
        &[O::Rd, O::Half], QL_R1NIL),
    Opcode::new("mov_movz", "mov", 0x5280_0000, 0x7f80_0000, IC::Movewide, V8,
        &[O::Rd, O::ImmMov], QL_R1NIL)
        .op(OpKind::MovImmWide)
        .flags(ALIAS),
    Opcode::new("mov_movn", "mov", 0x1280_0000, 0x7f80_0000, IC::Movewide, V8,
        &[O::Rd, O::ImmMov], QL_R1NIL)
        .op(OpKind::MovImmWiden)
        .flags(ALIAS),
    Opcode::new("mov_orr", "mov", 0x3200_03e0, 0x7f80_03e0, IC::LogImm, V8,
        &[O::RdSp, O::ImmMov], QL_R1NIL)
        .op(OpKind::MovImmLog)
        .flags(ALIAS),
    Opcode::new("ubfm", "ubfm", 0x5300_0000, 0x7f80_0000, IC::Bitfield, V8,
        &[O::Rd, O::Rn, O::Immr, O::Imms],
        &[&[Q::W, Q::W, Q::Imm0_31, Q::Imm0_31], &[Q::X, Q::X, Q::Imm0_63, Q::Imm0_63]]),
    Opcode::new("ubfx", "ubfx", 0x5300_0000, 0x7f80_0000, IC::Bitfield, V8,
        &[O::Rd, O::Rn, O::Immr, O::Width],
        &[&[Q::W, Q::W, Q::Imm0_31, Q::Imm1_32], &[Q::X, Q::X, Q::Imm0_63, Q::Imm1_64]])
        .flags(ALIAS),
    Opcode::new("addg", "addg", 0x9180_0000, 0xffc0_c000, IC::AddsubImm, MEMTAG,
        &[O::RdSp, O::RnSp, O::Uimm10, O::Uimm4Addg], &[&[Q::X, Q::X, Q::Nil, Q::Nil]]),
    Opcode::new("smax_imm", "smax", 0x11c0_0000, 0x7ffc_0000, IC::AddsubImm, CSSC,
        &[O::Rd, O::Rn, O::CsscSimm8], QL_R2NIL),
    Opcode::new("umax_imm", "umax", 0x11c4_0000, 0x7ffc_0000, IC::AddsubImm, CSSC,
        &[O::Rd, O::Rn, O::CsscUimm8], QL_R2NIL),

    // ── Data processing (register) ───────────────────────────────────────
    Opcode::new("add_ext", "add", 0x0b20_0000, 0x7fe0_0000, IC::AddsubExt, V8,
        &[O::RdSp, O::RnSp, O::RmExt],
        &[&[Q::W, Q::W, Q::W], &[Q::X, Q::X, Q::W], &[Q::X, Q::X, Q::X]]),
    Opcode::new("add_shift", "add", 0x0b00_0000, 0x7f20_0000, IC::AddsubShift, V8,
        &[O::Rd, O::Rn, O::RmSft], QL_I3SAMER),
    Opcode::new("and_shift", "and", 0x0a00_0000, 0x7f20_0000, IC::LogShift, V8,
        &[O::Rd, O::Rn, O::RmSft], QL_I3SAMER),
    Opcode::new("ccmp_imm", "ccmp", 0x7a40_0800, 0x7fe0_0c10, IC::Condcmp, V8,
        &[O::Rn, O::CcmpImm, O::Nzcv, O::Cond],
        &[&[Q::W, Q::Nil, Q::Nil, Q::Nil], &[Q::X, Q::Nil, Q::Nil, Q::Nil]]),
    Opcode::new("cinc", "cinc", 0x1a80_0400, 0x7fe0_0c00, IC::Condsel, V8,
        &[O::Rd, O::Rn, O::Cond1], QL_R2NIL)
        .flags(ALIAS),

    // ── Branches, exceptions, system ─────────────────────────────────────
    Opcode::new("b", "b", 0x1400_0000, 0xfc00_0000, IC::BranchImm, V8, &[O::AddrPcrel26], NO_QL),
    Opcode::new("b_cond", "b.c", 0x5400_0000, 0xff00_0010, IC::Condbranch, V8, &[O::AddrPcrel19], NO_QL),
    Opcode::new("cbz", "cbz", 0x3400_0000, 0x7f00_0000, IC::Compbranch, V8,
        &[O::Rt, O::AddrPcrel19], QL_R1NIL),
    Opcode::new("tbz", "tbz", 0x3600_0000, 0x7f00_0000, IC::Testbranch, V8,
        &[O::Rt, O::BitNum, O::AddrPcrel14],
        &[&[Q::W, Q::Imm0_31, Q::Nil], &[Q::X, Q::Imm0_63, Q::Nil]]),
    Opcode::new("adr", "adr", 0x1000_0000, 0x9f00_0000, IC::Pcreladdr, V8,
        &[O::Rd, O::AddrPcrel21], QL_X1NIL),
    Opcode::new("adrp", "adrp", 0x9000_0000, 0x9f00_0000, IC::Pcreladdr, V8,
        &[O::Rd, O::AddrAdrp], QL_X1NIL),
    Opcode::new("svc", "svc", 0xd400_0001, 0xffe0_001f, IC::Exception, V8, &[O::Exception], NO_QL),
    Opcode::new("udf", "udf", 0x0000_0000, 0xffff_0000, IC::Exception, V8, &[O::Undefined], NO_QL),
    Opcode::new("tcancel", "tcancel", 0xd460_0000, 0xffe0_001f, IC::Exception, TME, &[O::TmeUimm16], NO_QL),
    Opcode::new("hint", "hint", 0xd503_201f, 0xffff_f01f, IC::IcSystem, V8, &[O::Uimm7], NO_QL),
    Opcode::new("msr_imm", "msr", 0xd500_401f, 0xfff8_f01f, IC::IcSystem, V8,
        &[O::Pstatefield, O::Uimm4], NO_QL),
    Opcode::new("mrs", "mrs", 0xd530_0000, 0xfff0_0000, IC::IcSystem, V8,
        &[O::Rt, O::Sysreg], QL_X1NIL),
    Opcode::new("msr_reg", "msr", 0xd510_0000, 0xfff0_0000, IC::IcSystem, V8,
        &[O::Sysreg, O::Rt], &[&[Q::Nil, Q::X]]),
    Opcode::new("sys", "sys", 0xd508_0000, 0xfff8_0000, IC::IcSystem, V8,
        &[O::Uimm3Op1, O::CRn, O::CRm, O::Uimm3Op2, O::Rt],
        &[&[Q::Nil, Q::Cr, Q::Cr, Q::Nil, Q::X]])
        .optional(4, 0x1f),
    Opcode::new("ic", "ic", 0xd508_7000, 0xfff8_f000, IC::IcSystem, V8,
        &[O::SysregIc, O::RtSys], &[&[Q::Nil, Q::X]])
        .flags(ALIAS)
        .optional(1, 0x1f),
    Opcode::new("dc", "dc", 0xd508_7000, 0xfff8_f000, IC::IcSystem, V8,
        &[O::SysregDc, O::RtSys], &[&[Q::Nil, Q::X]])
        .flags(ALIAS),
    Opcode::new("at", "at", 0xd508_7800, 0xfff8_fe00, IC::IcSystem, V8,
        &[O::SysregAt, O::RtSys], &[&[Q::Nil, Q::X]])
        .flags(ALIAS),
    Opcode::new("tlbi", "tlbi", 0xd508_8000, 0xfff8_f000, IC::IcSystem, V8,
        &[O::SysregTlbi, O::RtSys], &[&[Q::Nil, Q::X]])
        .flags(ALIAS)
        .optional(1, 0x1f),
    Opcode::new("dmb", "dmb", 0xd503_30bf, 0xffff_f0ff, IC::IcSystem, V8, &[O::Barrier], NO_QL),
    Opcode::new("isb", "isb", 0xd503_30df, 0xffff_f0ff, IC::IcSystem, V8, &[O::BarrierIsb], NO_QL)
        .optional(0, 0xf),
    Opcode::new("dsb_nxs", "dsb", 0xd503_323f, 0xffff_f3ff, IC::IcSystem, V8_4A, &[O::BarrierDsbNxs], NO_QL),
    Opcode::new("bti", "bti", 0xd503_241f, 0xffff_ff3f, IC::IcSystem, V8, &[O::BtiTarget], NO_QL)
        .optional(0, 0x20),
    Opcode::new("psb", "psb", 0xd503_223f, 0xffff_ffff, IC::IcSystem, V8, &[O::BarrierPsb], NO_QL),

    // ── Loads and stores ─────────────────────────────────────────────────
    Opcode::new("ldr_pos", "ldr", 0xb940_0000, 0xbfc0_0000, IC::LdstPos, V8,
        &[O::Rt, O::AddrUimm12], QL_LDST_R),
    Opcode::new("ldur", "ldur", 0xb840_0000, 0xbfe0_0c00, IC::LdstUnscaled, V8,
        &[O::Rt, O::AddrSimm9], QL_LDST_R),
    Opcode::new("ldr_indexed", "ldr", 0xb840_0400, 0xbfe0_0400, IC::LdstImm9, V8,
        &[O::Rt, O::AddrSimm9], QL_LDST_R),
    Opcode::new("ldtr", "ldtr", 0xb840_0800, 0xbfe0_0c00, IC::LdstUnpriv, V8,
        &[O::Rt, O::AddrSimm9], QL_LDST_R),
    Opcode::new("ldur_alias", "ldr", 0xb840_0000, 0xbfe0_0c00, IC::LdstUnscaled, V8,
        &[O::Rt, O::AddrSimm9_2], QL_LDST_R)
        .flags(ALIAS),
    Opcode::new("ldraa", "ldraa", 0xf820_0400, 0xff20_0400, IC::LdstImm10, V8,
        &[O::Rt, O::AddrSimm10], &[&[Q::X, Q::SD]]),
    Opcode::new("ldr_regoff", "ldr", 0xb860_0800, 0xbfe0_0c00, IC::LdstRegoff, V8,
        &[O::Rt, O::AddrRegoff], QL_LDST_R),
    Opcode::new("prfm_pos", "prfm", 0xf980_0000, 0xffc0_0000, IC::LdstPos, V8,
        &[O::Prfop, O::AddrUimm12], &[&[Q::Nil, Q::SD]]),
    Opcode::new("prfm_regoff", "prfm", 0xf8a0_0800, 0xffe0_0c00, IC::LdstRegoff, V8,
        &[O::Prfop, O::AddrRegoff], &[&[Q::Nil, Q::SD]]),
    Opcode::new("ldp", "ldp", 0x2940_0000, 0x7fc0_0000, IC::LdstpairOff, V8,
        &[O::Rt, O::Rt2, O::AddrSimm7], QL_LDST_PAIR_R),
    Opcode::new("ldp_indexed", "ldp", 0x28c0_0000, 0x7ec0_0000, IC::LdstpairIndexed, V8,
        &[O::Rt, O::Rt2, O::AddrSimm7], QL_LDST_PAIR_R),
    Opcode::new("ldnp", "ldnp", 0x2840_0000, 0x7fc0_0000, IC::LdstnapairOffs, V8,
        &[O::Rt, O::Rt2, O::AddrSimm7], QL_LDST_PAIR_R),
    Opcode::new("ldpsw_indexed", "ldpsw", 0x68c0_0000, 0xfec0_0000, IC::LdstpairIndexed, V8,
        &[O::Rt, O::Rt2, O::AddrSimm7], &[&[Q::X, Q::X, Q::SS]])
        .verifier(Verifier::Ldpsw),
    Opcode::new("ldapur", "ldapur", 0x9940_0000, 0xbfe0_0c00, IC::LdstUnscaled, V8_4A,
        &[O::Rt, O::AddrOffset], QL_LDST_R),
    Opcode::new("stg", "stg", 0xd920_0800, 0xffe0_0c00, IC::LdstTag, MEMTAG,
        &[O::RtSp, O::AddrSimm13], &[&[Q::X, Q::ImmTag]]),
    Opcode::new("stgp", "stgp", 0x6900_0000, 0xffc0_0000, IC::LdstpairOff, MEMTAG,
        &[O::Rt, O::Rt2, O::AddrSimm11], &[&[Q::X, Q::X, Q::ImmTag]]),
    Opcode::new("casp", "casp", 0x0820_7c00, 0xbfe0_7c00, IC::Lse, LSE,
        &[O::Rs, O::PairReg, O::Rt, O::PairReg, O::AddrSimple],
        &[&[Q::W, Q::W, Q::W, Q::W, Q::Nil], &[Q::X, Q::X, Q::X, Q::X, Q::Nil]]),
    Opcode::new("ldiapp", "ldiapp", 0x1940_0800, 0x3fe0_ec00, IC::Rcpc3, RCPC3,
        &[O::Rt, O::Rt2, O::Rcpc3AddrOptPostind], &[&[Q::W, Q::W, Q::Nil], &[Q::X, Q::X, Q::Nil]]),
    Opcode::new("stilp", "stilp", 0x1900_0800, 0x3fe0_ec00, IC::Rcpc3, RCPC3,
        &[O::Rt, O::Rt2, O::Rcpc3AddrOptPreindWb], &[&[Q::W, Q::W, Q::Nil], &[Q::X, Q::X, Q::Nil]]),
    Opcode::new("ldapr_post", "ldapr", 0x99c0_0800, 0xbfff_fc00, IC::Rcpc3, RCPC3,
        &[O::Rt, O::Rcpc3AddrPostind], QL_R1NIL),
    Opcode::new("stlr_pre", "stlr", 0x9980_0800, 0xbfff_fc00, IC::Rcpc3, RCPC3,
        &[O::Rt, O::Rcpc3AddrPreindWb], QL_R1NIL),
    Opcode::new("ldapur_fp", "ldapur", 0x1d40_0800, 0x3f60_0c00, IC::Rcpc3, RCPC3,
        &[O::Ft, O::Rcpc3AddrOffset], &[&[Q::SB, Q::Nil], &[Q::SH, Q::Nil], &[Q::SS, Q::Nil], &[Q::SD, Q::Nil], &[Q::SQ, Q::Nil]]),

    // ── AdvSIMD loads and stores ─────────────────────────────────────────
    Opcode::new("ld1_multi", "ld1", 0x0c40_7000, 0xbfff_f000, IC::Asisdlse, SIMD,
        &[O::LVt, O::SimdAddrSimple], QL_SIMD_LDST)
        .od(1),
    Opcode::new("ld4_multi", "ld4", 0x0c40_0000, 0xbfff_f000, IC::Asisdlse, SIMD,
        &[O::LVt, O::SimdAddrSimple], QL_SIMD_LDST)
        .od(4),
    Opcode::new("ld1_multi_post", "ld1", 0x0cc0_7000, 0xbfe0_f000, IC::Asisdlsep, SIMD,
        &[O::LVt, O::SimdAddrPost], QL_SIMD_LDST)
        .od(1),
    Opcode::new("ld1r_post", "ld1r", 0x0dc0_c000, 0xbfe0_f000, IC::Asisdlsop, SIMD,
        &[O::LVtAl, O::SimdAddrPost], QL_SIMD_LDST)
        .od(1),
    Opcode::new("ld1_lane", "ld1", 0x0d40_0000, 0xbfff_2000, IC::Asisdlso, SIMD,
        &[O::LEt, O::SimdAddrSimple], QL_SIMD_LDSTONE)
        .od(1),
    Opcode::new("ld2_lane_post", "ld2", 0x0de0_0000, 0xbfe0_2000, IC::Asisdlsop, SIMD,
        &[O::LEt, O::SimdAddrPost], QL_SIMD_LDSTONE)
        .od(2),

    // ── FP and AdvSIMD ───────────────────────────────────────────────────
    Opcode::new("fmov_imm", "fmov", 0x1e20_1000, 0xff20_1fe0, IC::FloatImm, FP,
        &[O::Fd, O::FpImm], &[&[Q::SH, Q::Nil], &[Q::SS, Q::Nil], &[Q::SD, Q::Nil]]),
    Opcode::new("fadd", "fadd", 0x1e20_2800, 0xff20_fc00, IC::Float, FP, &[O::Fd, O::Fn, O::Fm], QL_FP3),
    Opcode::new("scvtf_fix", "scvtf", 0x1e02_0000, 0x7f3f_0000, IC::Float, FP,
        &[O::Fd, O::Rn, O::Fbits],
        &[&[Q::SS, Q::W, Q::Imm1_32], &[Q::SD, Q::W, Q::Imm1_32], &[Q::SS, Q::X, Q::Imm1_64], &[Q::SD, Q::X, Q::Imm1_64]]),
    Opcode::new("movi_b", "movi", 0x0f00_e400, 0xbff8_fc00, IC::Asimdimm, SIMD,
        &[O::Vd, O::SimdImmSft], &[&[Q::V8B, Q::Nil], &[Q::V16B, Q::Nil]]),
    Opcode::new("movi_s_lsl", "movi", 0x0f00_0400, 0xbff8_9c00, IC::Asimdimm, SIMD,
        &[O::Vd, O::SimdImmSft], &[&[Q::V2S, Q::Lsl], &[Q::V4S, Q::Lsl]]),
    Opcode::new("movi_s_msl", "movi", 0x0f00_c400, 0xbff8_ec00, IC::Asimdimm, SIMD,
        &[O::Vd, O::SimdImmSft], &[&[Q::V2S, Q::Msl], &[Q::V4S, Q::Msl]]),
    Opcode::new("movi_d", "movi", 0x2f00_e400, 0xbff8_fc00, IC::Asimdimm, SIMD,
        &[O::Sd, O::SimdImm], &[&[Q::SD, Q::Nil], &[Q::V2D, Q::Nil]]),
    Opcode::new("fmov_vec", "fmov", 0x0f00_f400, 0x9ff8_fc00, IC::Asimdimm, SIMD,
        &[O::Vd, O::SimdFpImm], &[&[Q::V2S, Q::Nil], &[Q::V4S, Q::Nil], &[Q::V2D, Q::Nil]]),
    Opcode::new("shl", "shl", 0x0f00_5400, 0xbf80_fc00, IC::Asimdshf, SIMD,
        &[O::Vd, O::Vn, O::ImmVlsl], QL_V3SAME_BHSD),
    Opcode::new("sshr", "sshr", 0x0f00_0400, 0xbf80_fc00, IC::Asimdshf, SIMD,
        &[O::Vd, O::Vn, O::ImmVlsr], QL_V3SAME_BHSD),
    Opcode::new("shll", "shll", 0x2e21_3800, 0xbf3f_fc00, IC::Asimdshf, SIMD,
        &[O::Vd, O::Vn, O::ShllImm],
        &[&[Q::V8H, Q::V8B, Q::Nil], &[Q::V4S, Q::V4H, Q::Nil], &[Q::V2D, Q::V2S, Q::Nil]]),
    Opcode::new("fmla_elem", "fmla", 0x0f80_1000, 0xbf80_f400, IC::Asimdelem, SIMD,
        &[O::Vd, O::Vn, O::Em],
        &[&[Q::V2S, Q::V2S, Q::SS], &[Q::V4S, Q::V4S, Q::SS], &[Q::V2D, Q::V2D, Q::SD]])
        .verifier(Verifier::ElemSd),
    Opcode::new("fmla_elem_h", "fmla", 0x0f00_1000, 0xbfc0_f400, IC::Asimdelem, SIMD,
        &[O::Vd, O::Vn, O::Em16], &[&[Q::V4H, Q::V4H, Q::SH], &[Q::V8H, Q::V8H, Q::SH]]),
    Opcode::new("fcmla_elem", "fcmla", 0x2f00_1000, 0xbf00_9400, IC::Asimdelem, SIMD,
        &[O::Vd, O::Vn, O::Em, O::ImmRot2],
        &[&[Q::V4H, Q::V4H, Q::SH, Q::Nil], &[Q::V8H, Q::V8H, Q::SH, Q::Nil], &[Q::V4S, Q::V4S, Q::SS, Q::Nil]])
        .op(OpKind::FcmlaElem),
    Opcode::new("fcmla", "fcmla", 0x2e00_c400, 0xbf20_e400, IC::Asimdsame, SIMD,
        &[O::Vd, O::Vn, O::Vm, O::ImmRot1],
        &[&[Q::V4H, Q::V4H, Q::V4H, Q::Nil], &[Q::V4S, Q::V4S, Q::V4S, Q::Nil], &[Q::V2D, Q::V2D, Q::V2D, Q::Nil]]),
    Opcode::new("fcadd", "fcadd", 0x2e00_e400, 0xbf20_ec00, IC::Asimdsame, SIMD,
        &[O::Vd, O::Vn, O::Vm, O::ImmRot3],
        &[&[Q::V4H, Q::V4H, Q::V4H, Q::Nil], &[Q::V4S, Q::V4S, Q::V4S, Q::Nil], &[Q::V2D, Q::V2D, Q::V2D, Q::Nil]]),
    Opcode::new("tbl", "tbl", 0x0e00_0000, 0xbfe0_9c00, IC::Asimdtbl, SIMD,
        &[O::Vd, O::LVn, O::Vm], &[&[Q::V8B, Q::V16B, Q::V8B], &[Q::V16B, Q::V16B, Q::V16B]]),
    Opcode::new("dup_elem", "dup", 0x0e00_0400, 0xbfe0_fc00, IC::Asimdins, SIMD,
        &[O::Vd, O::En],
        &[&[Q::V8B, Q::SB], &[Q::V16B, Q::SB], &[Q::V4H, Q::SH], &[Q::V8H, Q::SH], &[Q::V2S, Q::SS], &[Q::V4S, Q::SS], &[Q::V2D, Q::SD]]),

    // ── SVE ──────────────────────────────────────────────────────────────
    Opcode::new("add_sve_pred", "add", 0x0400_0000, 0xff3f_e000, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SvePg3, O::SveZd, O::SveZm5], SVE_BHSD_MERGE)
        .constraints(MOVPRFX_OK)
        .tied(2),
    Opcode::new("add_sve_unpred", "add", 0x0420_0000, 0xff20_fc00, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SveZn, O::SveZm16], SVE_BHSD_3),
    Opcode::new("add_sve_imm", "add", 0x2520_c000, 0xff3f_c000, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SveZd, O::SveAimm], SVE_BHSD_IMM)
        .constraints(MOVPRFX_OK)
        .tied(1),
    Opcode::new("mov_sve_imm", "mov", 0x2538_c000, 0xff3f_c000, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SveAsimm], SVE_BHSD_1IMM)
        .flags(ALIAS),
    Opcode::new("mul_sve_imm", "mul", 0x2530_c000, 0xff3f_e000, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SveZd, O::SveSimm8], SVE_BHSD_IMM)
        .constraints(MOVPRFX_OK)
        .tied(1),
    Opcode::new("umax_sve_imm", "umax", 0x2529_c000, 0xff3f_e000, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SveZd, O::SveUimm8], SVE_BHSD_IMM)
        .constraints(MOVPRFX_OK)
        .tied(1),
    Opcode::new("and_sve_imm", "and", 0x0580_0000, 0xfffc_0000, IC::SveMisc, SVE,
        &[O::SveZd, O::SveZd, O::SveLimm], SVE_BHSD_IMM)
        .constraints(MOVPRFX_OK)
        .tied(1),
    Opcode::new("bic_sve_imm", "bic", 0x0580_0000, 0xfffc_0000, IC::SveMisc, SVE,
        &[O::SveZd, O::SveZd, O::SveLimm], SVE_BHSD_IMM)
        .op(OpKind::Bic)
        .flags(ALIAS)
        .constraints(MOVPRFX_OK)
        .tied(1),
    Opcode::new("orn_sve_imm", "orn", 0x0500_0000, 0xfffc_0000, IC::SveMisc, SVE,
        &[O::SveZd, O::SveZd, O::SveInvLimm], SVE_BHSD_IMM)
        .flags(ALIAS)
        .constraints(MOVPRFX_OK)
        .tied(1),
    Opcode::new("dupm", "dupm", 0x05c0_0000, 0xfffc_0000, IC::SveMisc, SVE,
        &[O::SveZd, O::SveLimm], SVE_BHSD_1IMM),
    Opcode::new("mov_dupm", "mov", 0x05c0_0000, 0xfffc_0000, IC::SveMisc, SVE,
        &[O::SveZd, O::SveLimmMov], SVE_BHSD_1IMM)
        .flags(ALIAS),
    Opcode::new("lsl_sve_pred_imm", "lsl", 0x0403_8000, 0xff3f_e000, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SvePg3, O::SveZd, O::SveShlimmPred], SVE_BHSD_MERGE_IMM)
        .constraints(MOVPRFX_OK)
        .tied(2),
    Opcode::new("asr_sve_pred_imm", "asr", 0x0400_8000, 0xff3f_e000, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SvePg3, O::SveZd, O::SveShrimmPred], SVE_BHSD_MERGE_IMM)
        .constraints(MOVPRFX_OK)
        .tied(2),
    Opcode::new("lsl_sve_imm", "lsl", 0x0420_9c00, 0xff20_fc00, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SveZn, O::SveShlimmUnpred], SVE_BHSD_IMM),
    Opcode::new("movprfx", "movprfx", 0x0420_bc00, 0xffff_fc00, IC::SveMisc, SVE,
        &[O::SveZd, O::SveZn], NO_QL)
        .flags(SCAN)
        .constraints(MOVPRFX_OK),
    Opcode::new("movprfx_pred", "movprfx", 0x0410_2000, 0xff3e_e000, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SvePg3, O::SveZn],
        &[
            &[Q::SB, Q::PZ, Q::SB],
            &[Q::SB, Q::PM, Q::SB],
            &[Q::SH, Q::PZ, Q::SH],
            &[Q::SH, Q::PM, Q::SH],
            &[Q::SS, Q::PZ, Q::SS],
            &[Q::SS, Q::PM, Q::SS],
            &[Q::SD, Q::PZ, Q::SD],
            &[Q::SD, Q::PM, Q::SD],
        ])
        .flags(SCAN)
        .constraints(MOVPRFX_OK),
    Opcode::new("fmla_sve", "fmla", 0x6520_0000, 0xff20_e000, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SvePg3, O::SveZn, O::SveZm16], SVE_HSD_MERGE)
        .constraints(MOVPRFX_OK),
    Opcode::new("fadd_sve_imm", "fadd", 0x6518_8000, 0xff3f_e3c0, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SvePg3, O::SveZd, O::SveI1HalfOne], SVE_HSD_MERGE_IMM)
        .constraints(MOVPRFX_OK)
        .tied(2),
    Opcode::new("fmul_sve_imm", "fmul", 0x651a_8000, 0xff3f_e3c0, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SvePg3, O::SveZd, O::SveI1HalfTwo], SVE_HSD_MERGE_IMM)
        .constraints(MOVPRFX_OK)
        .tied(2),
    Opcode::new("fmax_sve_imm", "fmax", 0x651e_8000, 0xff3f_e3c0, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SvePg3, O::SveZd, O::SveI1ZeroOne], SVE_HSD_MERGE_IMM)
        .constraints(MOVPRFX_OK)
        .tied(2),
    Opcode::new("fcvt_sve", "fcvt", 0x6588_a000, 0xffff_e000, IC::SveMisc, SVE,
        &[O::SveZd, O::SvePg3, O::SveZn],
        &[&[Q::SH, Q::PM, Q::SS], &[Q::SS, Q::PM, Q::SH], &[Q::SS, Q::PM, Q::SD], &[Q::SD, Q::PM, Q::SS]])
        .constraints(MOVPRFX_OK.union(Constraints::MAX_ELEM)),
    Opcode::new("fcadd_sve", "fcadd", 0x6400_8000, 0xff3e_e000, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SvePg3, O::SveZd, O::SveZm5, O::SveImmRot1],
        &[
            &[Q::SH, Q::PM, Q::SH, Q::SH, Q::Nil],
            &[Q::SS, Q::PM, Q::SS, Q::SS, Q::Nil],
            &[Q::SD, Q::PM, Q::SD, Q::SD, Q::Nil],
        ])
        .constraints(MOVPRFX_OK)
        .tied(2),
    Opcode::new("fmul_sve_idx_s", "fmul", 0x64a0_2000, 0xffe0_fc00, IC::SveMisc, SVE,
        &[O::SveZd, O::SveZn, O::SveZm3Index], &[&[Q::SS, Q::SS, Q::SS]]),
    Opcode::new("fmul_sve_idx_h", "fmul", 0x6420_2000, 0xffa0_fc00, IC::SveMisc, SVE,
        &[O::SveZd, O::SveZn, O::SveZm3_22Index], &[&[Q::SH, Q::SH, Q::SH]]),
    Opcode::new("fmul_sve_idx_d", "fmul", 0x64e0_2000, 0xffe0_fc00, IC::SveMisc, SVE,
        &[O::SveZd, O::SveZn, O::SveZm4Index], &[&[Q::SD, Q::SD, Q::SD]]),
    Opcode::new("dup_sve_idx", "dup", 0x0520_2000, 0xff20_fc00, IC::SveMisc, SVE,
        &[O::SveZd, O::SveZnIndex],
        &[&[Q::SB, Q::SB], &[Q::SH, Q::SH], &[Q::SS, Q::SS], &[Q::SD, Q::SD], &[Q::SQ, Q::SQ]]),
    Opcode::new("index", "index", 0x0420_4000, 0xff20_fc00, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SveSimm5, O::SveSimm5b], SVE_BHSD_IMM),
    Opcode::new("fdup", "fdup", 0x2539_c000, 0xff3f_e000, IC::SveSizeBhsd, SVE,
        &[O::SveZd, O::SveFpImm8], &[&[Q::SH, Q::Nil], &[Q::SS, Q::Nil], &[Q::SD, Q::Nil]]),
    Opcode::new("ext_sve", "ext", 0x0520_0000, 0xffe0_e000, IC::SveMisc, SVE,
        &[O::SveZd, O::SveZd, O::SveZm5, O::SveUimm8_53], &[&[Q::SB, Q::SB, Q::SB, Q::Nil]])
        .constraints(MOVPRFX_OK)
        .tied(1),
    Opcode::new("cmphi_sve_imm", "cmphi", 0x2420_0010, 0xff20_2010, IC::SveSizeBhsd, SVE,
        &[O::SvePd, O::SvePg3, O::SveZn, O::SveUimm7],
        &[
            &[Q::SB, Q::PZ, Q::SB, Q::Nil],
            &[Q::SH, Q::PZ, Q::SH, Q::Nil],
            &[Q::SS, Q::PZ, Q::SS, Q::Nil],
            &[Q::SD, Q::PZ, Q::SD, Q::Nil],
        ]),
    Opcode::new("ptrue", "ptrue", 0x2518_e000, 0xff3f_fc10, IC::SveSizeBhsd, SVE,
        &[O::SvePd, O::SvePattern], SVE_BHSD_1IMM)
        .optional(1, 0x1f),
    Opcode::new("cntb", "cntb", 0x0420_e000, 0xfff0_fc00, IC::SveMisc, SVE,
        &[O::Rd, O::SvePatternScaled], QL_X1NIL)
        .optional(1, 0x1f),
    Opcode::new("ld1w_sve_imm", "ld1w", 0xa540_a000, 0xfff0_e000, IC::SveLdst, SVE,
        &[O::SveZtxN, O::SvePg3, O::SveAddrRiS4xVl], SVE_LD_S)
        .od(1),
    Opcode::new("ld4w_sve_imm", "ld4w", 0xa560_e000, 0xfff0_e000, IC::SveLdst, SVE,
        &[O::SveZtxN, O::SvePg3, O::SveAddrRiS4x4xVl], SVE_LD_S)
        .od(4),
    Opcode::new("ld1w_sve_reg", "ld1w", 0xa540_4000, 0xffe0_e000, IC::SveLdst, SVE,
        &[O::SveZtxN, O::SvePg3, O::SveAddrRxLsl2], SVE_LD_S)
        .od(1),
    Opcode::new("ldff1d_sve_reg", "ldff1d", 0xa5e0_6000, 0xffe0_e000, IC::SveLdst, SVE,
        &[O::SveZtxN, O::SvePg3, O::SveAddrRrLsl3], SVE_LD_D)
        .od(1),
    Opcode::new("ld1d_sve_gather", "ld1d", 0xc5e0_c000, 0xffe0_e000, IC::SveLdst, SVE,
        &[O::SveZtxN, O::SvePg3, O::SveAddrRzLsl3], SVE_GATHER_D)
        .od(1),
    Opcode::new("ld1w_sve_gather_xtw", "ld1w", 0x8520_4000, 0xffa0_e000, IC::SveLdst, SVE,
        &[O::SveZtxN, O::SvePg3, O::SveAddrRzXtw2_22], SVE_GATHER_S)
        .od(1),
    Opcode::new("ld1w_sve_vec_imm", "ld1w", 0x8520_c000, 0xffe0_e000, IC::SveLdst, SVE,
        &[O::SveZtxN, O::SvePg3, O::SveAddrZiU5x4], SVE_GATHER_S)
        .od(1),
    Opcode::new("ld1rw", "ld1rw", 0x8540_c000, 0xffc0_e000, IC::SveLdst, SVE,
        &[O::SveZtxN, O::SvePg3, O::SveAddrRiU6x4], SVE_LD_S)
        .od(1),
    Opcode::new("ld1rqb", "ld1rqb", 0xa400_2000, 0xfff0_e000, IC::SveLdst, SVE,
        &[O::SveZtxN, O::SvePg3, O::SveAddrRiS4x16], &[&[Q::SB, Q::PZ, Q::Nil]])
        .od(1),
    Opcode::new("prfb", "prfb", 0x85c0_0000, 0xffc0_e010, IC::SveLdst, SVE,
        &[O::SvePrfop, O::SvePg3, O::SveAddrRiS6xVl], NO_QL),
    Opcode::new("adr_sve", "adr", 0x04a0_a000, 0xffa0_f000, IC::SveMisc, SVE,
        &[O::SveZd, O::SveAddrZzLsl], &[&[Q::SS, Q::SS], &[Q::SD, Q::SD]]),
    Opcode::new("adr_sve_sxtw", "adr", 0x0420_a000, 0xffe0_f000, IC::SveMisc, SVE,
        &[O::SveZd, O::SveAddrZzSxtw], &[&[Q::SD, Q::SD]]),

    // ── SVE2 ─────────────────────────────────────────────────────────────
    Opcode::new("eor3", "eor3", 0x0420_3800, 0xffe0_fc00, IC::SveMisc, SVE2,
        &[O::SveZd, O::SveZd, O::SveZm16, O::SveZn], &[&[Q::SD, Q::SD, Q::SD, Q::SD]])
        .constraints(MOVPRFX_OK)
        .tied(1),

    // ── SME ──────────────────────────────────────────────────────────────
    Opcode::new("smstart", "smstart", 0xd503_417f, 0xffff_f9ff, IC::SmeMisc, SME, &[O::SmeSmZa], NO_QL)
        .optional(0, 0),
    Opcode::new("zero_za", "zero", 0xc008_0000, 0xffff_ff00, IC::SmeMisc, SME, &[O::SmeListOf64bitTiles], NO_QL),
    Opcode::new("mova_tile_to_vec", "mova", 0xc002_0000, 0xff3e_0200, IC::SmeMisc, SME,
        &[O::SveZd, O::SvePg3, O::SmeZaHvIdxSrc],
        &[
            &[Q::SB, Q::PM, Q::SB],
            &[Q::SH, Q::PM, Q::SH],
            &[Q::SS, Q::PM, Q::SS],
            &[Q::SD, Q::PM, Q::SD],
            &[Q::SQ, Q::PM, Q::SQ],
        ]),
    Opcode::new("mova_vec_to_tile", "mova", 0xc000_0000, 0xff3e_0010, IC::SmeMisc, SME,
        &[O::SmeZaHvIdxDest, O::SvePg3, O::SveZn],
        &[
            &[Q::SB, Q::PM, Q::SB],
            &[Q::SH, Q::PM, Q::SH],
            &[Q::SS, Q::PM, Q::SS],
            &[Q::SD, Q::PM, Q::SD],
            &[Q::SQ, Q::PM, Q::SQ],
        ]),
    Opcode::new("ld1w_za", "ld1w", 0xe080_0000, 0xffe0_0010, IC::SmeMisc, SME,
        &[O::SmeZaHvIdxLdstr, O::SvePg3, O::SveAddrRrLsl2], &[&[Q::SS, Q::PZ, Q::Nil]]),
    Opcode::new("ldr_za", "ldr", 0xe100_0000, 0xffff_9c10, IC::SmeLdr, SME,
        &[O::SmeZaArrayOff4, O::SmeAddrRiU4xVl], &[&[Q::Nil, Q::Nil]])
        .tied(1),
    Opcode::new("str_za", "str", 0xe120_0000, 0xffff_9c10, IC::SmeStr, SME,
        &[O::SmeZaArrayOff4, O::SmeAddrRiU4xVl], &[&[Q::Nil, Q::Nil]])
        .tied(1),
    Opcode::new("fmopa_s", "fmopa", 0x8080_0000, 0xffe0_001c, IC::SmeFpSd, SME,
        &[O::SmeZAda2b, O::SmePm, O::SvePg3, O::SveZn, O::SveZm16],
        &[&[Q::SS, Q::PZ, Q::PZ, Q::SS, Q::SS]]),
    Opcode::new("fmopa_d", "fmopa", 0x80c0_0000, 0xffe0_0018, IC::SmeFpSd, SME,
        &[O::SmeZAda3b, O::SmePm, O::SvePg3, O::SveZn, O::SveZm16],
        &[&[Q::SD, Q::PZ, Q::PZ, Q::SD, Q::SD]]),
    Opcode::new("smopa_s", "smopa", 0xa080_0000, 0xffe0_001c, IC::SmeIntSd, SME,
        &[O::SmeZAda2b, O::SmePm, O::SvePg3, O::SveZn, O::SveZm16],
        &[&[Q::SS, Q::PZ, Q::PZ, Q::SB, Q::SB]]),
    Opcode::new("smopa_d", "smopa", 0xa0c0_0000, 0xffe0_0018, IC::SmeIntSd, SME,
        &[O::SmeZAda3b, O::SmePm, O::SvePg3, O::SveZn, O::SveZm16],
        &[&[Q::SD, Q::PZ, Q::PZ, Q::SH, Q::SH]]),
    Opcode::new("psel", "psel", 0x2520_4000, 0xff20_c210, IC::SmeMisc, SME,
        &[O::SvePd, O::SvePg4_10, O::SmePnTWmImm],
        &[
            &[Q::Nil, Q::Nil, Q::SB],
            &[Q::Nil, Q::Nil, Q::SH],
            &[Q::Nil, Q::Nil, Q::SS],
            &[Q::Nil, Q::Nil, Q::SD],
        ]),

    // ── SME2 ─────────────────────────────────────────────────────────────
    Opcode::new("add_za_vgx2", "add", 0xc1a0_1c10, 0xffbf_9c38, IC::Sme2, SME2,
        &[O::SmeZaArrayOff3_5, O::SmeZnx2], &[&[Q::SS, Q::SS], &[Q::SD, Q::SD]])
        .od(2),
    Opcode::new("fmlal_za", "fmlal", 0xc120_0c00, 0xfff0_9c1c, IC::Sme2, SME2,
        &[O::SmeZaArrayOff2x2, O::SveZn, O::SmeZm], &[&[Q::SS, Q::SH, Q::SH]]),
    Opcode::new("smlall_za", "smlall", 0xc100_0000, 0xfff0_9c1c, IC::Sme2, SME2,
        &[O::SmeZaArrayOff2x4, O::SveZn, O::SmeZm], &[&[Q::SS, Q::SB, Q::SB]]),
    Opcode::new("fmla_za_idx_vgx2", "fmla", 0xc150_1000, 0xfff0_9030, IC::Sme2, SME2,
        &[O::SmeZaArrayOff3_0, O::SmeZnx2, O::SmeZmIndex2], &[&[Q::SS, Q::SS, Q::SS]])
        .od(2),
    Opcode::new("mova_vrs_b", "mova", 0xc006_0000, 0xffff_9f01, IC::Sme2, SME2,
        &[O::SmeZdnx2, O::SmeZaArrayVrsb1], &[&[Q::SB, Q::SB]]),
    Opcode::new("mova_tile_to_vec_x4", "mova", 0xc006_0400, 0xff3f_1f03, IC::Sme2, SME2,
        &[O::SmeZdnx4, O::SmeZaHvIdxSrcxN],
        &[&[Q::SB, Q::SB], &[Q::SH, Q::SH], &[Q::SS, Q::SS], &[Q::SD, Q::SD]])
        .od(4),
    Opcode::new("add_sme2_x2", "add", 0xc120_a300, 0xff30_ffe1, IC::Sme2, SME2,
        &[O::SmeZdnx2, O::SmeZdnx2, O::SveZm16], SVE_BHSD_3)
        .tied(1),
    Opcode::new("ld1w_strided_x2", "ld1w", 0xa140_4000, 0xfff0_e008, IC::Sme2, SME2,
        &[O::SmeZtx2Strided, O::SmePNg3, O::SveAddrRiS4x2xVl], &[&[Q::SS, Q::Nil, Q::Nil]]),
    Opcode::new("ld1w_strided_x4", "ld1w", 0xa140_c000, 0xfff0_e00c, IC::Sme2, SME2,
        &[O::SmeZtx4Strided, O::SmePNg3, O::SveAddrRiS4x4xVl], &[&[Q::SS, Q::Nil, Q::Nil]]),
    Opcode::new("luti4", "luti4", 0xc0ca_0000, 0xffff_8c00, IC::Sme2, SME2,
        &[O::SveZd, O::SmeZt0, O::SmeZnIndex2_15], &[&[Q::SB, Q::Nil, Q::Nil], &[Q::SH, Q::Nil, Q::Nil], &[Q::SS, Q::Nil, Q::Nil]]),
    Opcode::new("movt", "movt", 0xc04f_03e0, 0xffff_8fe0, IC::Sme2, SME2,
        &[O::SmeZt0Index, O::Rt], &[&[Q::Nil, Q::X]]),
    Opcode::new("zero_zt0", "zero", 0xc048_0001, 0xffff_ffff, IC::Sme2, SME2, &[O::SmeZt0List], NO_QL),
    Opcode::new("whilelo_pn", "whilelo", 0x2520_4c18, 0xff20_dc18, IC::Sme2, SME2,
        &[O::SmePNd3, O::Rn, O::Rm, O::SmeVlxN13],
        &[&[Q::SB, Q::X, Q::X, Q::Nil], &[Q::SH, Q::X, Q::X, Q::Nil], &[Q::SS, Q::X, Q::X, Q::Nil], &[Q::SD, Q::X, Q::X, Q::Nil]]),
    Opcode::new("pext", "pext", 0x2520_7010, 0xff3f_fc10, IC::Sme2, SME2,
        &[O::SvePd, O::SmePNn3Index2], &[&[Q::SB, Q::SB], &[Q::SH, Q::SH], &[Q::SS, Q::SS], &[Q::SD, Q::SD]]),
    Opcode::new("sqrshr_x2", "sqrshr", 0xc1e0_d400, 0xfff0_fc20, IC::Sme2, SME2,
        &[O::SveZd, O::SmeZnx2, O::SmeShrimm4], &[&[Q::SH, Q::SS, Q::Nil]]),
    Opcode::new("sqrshr_x4", "sqrshr", 0xc160_d800, 0xff60_fc60, IC::Sme2, SME2,
        &[O::SveZd, O::SmeZnx4, O::SmeShrimm5], &[&[Q::SB, Q::SS, Q::Nil], &[Q::SH, Q::SD, Q::Nil]]),

    // ── MOPS ─────────────────────────────────────────────────────────────
    Opcode::new("cpyfp", "cpyfp", 0x1900_0400, 0x3fe0_fc00, IC::Mops, MOPS,
        &[O::MopsAddrRd, O::MopsAddrRs, O::MopsWbRn], MOPS_QL)
        .flags(SCAN)
        .constraints(Constraints::MOPS_P)
        .verifier(Verifier::ThreeDifferentRegs),
    Opcode::new("cpyfm", "cpyfm", 0x1940_0400, 0x3fe0_fc00, IC::Mops, MOPS,
        &[O::MopsAddrRd, O::MopsAddrRs, O::MopsWbRn], MOPS_QL)
        .constraints(Constraints::MOPS_M)
        .verifier(Verifier::ThreeDifferentRegs),
    Opcode::new("cpyfe", "cpyfe", 0x1980_0400, 0x3fe0_fc00, IC::Mops, MOPS,
        &[O::MopsAddrRd, O::MopsAddrRs, O::MopsWbRn], MOPS_QL)
        .constraints(Constraints::MOPS_E)
        .verifier(Verifier::ThreeDifferentRegs),
    Opcode::new("setp", "setp", 0x19c0_0400, 0x3fe0_fc00, IC::Mops, MOPS,
        &[O::MopsAddrRd, O::MopsWbRn, O::Rm], MOPS_QL)
        .flags(SCAN)
        .constraints(Constraints::MOPS_P)
        .verifier(Verifier::ThreeDifferentRegs),
    Opcode::new("setm", "setm", 0x19c0_4400, 0x3fe0_fc00, IC::Mops, MOPS,
        &[O::MopsAddrRd, O::MopsWbRn, O::Rm], MOPS_QL)
        .constraints(Constraints::MOPS_M)
        .verifier(Verifier::ThreeDifferentRegs),
    Opcode::new("sete", "sete", 0x19c0_8400, 0x3fe0_fc00, IC::Mops, MOPS,
        &[O::MopsAddrRd, O::MopsWbRn, O::Rm], MOPS_QL)
        .constraints(Constraints::MOPS_E)
        .verifier(Verifier::ThreeDifferentRegs),
];

/// Look an opcode up by its table key.
pub fn find(id: &str) -> Option<&'static Opcode> {
    OPCODES.iter().find(|o| o.id == id)
}

/// Every opcode with mnemonic `name`, in table order.
pub fn by_name(name: &str) -> impl Iterator<Item = &'static Opcode> + '_ {
    OPCODES.iter().filter(move |o| o.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inst::MAX_OPERANDS;
    use crate::opcode::{MopsStage, MAX_QLF_SEQ};
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let mut seen = HashSet::new();
        for op in OPCODES {
            assert!(seen.insert(op.id), "duplicate id {}", op.id);
        }
    }

    #[test]
    fn shapes_fit_limits() {
        for op in OPCODES {
            assert!(op.operands.len() <= MAX_OPERANDS, "{}", op.id);
            assert!(!op.qualifiers.is_empty() && op.qualifiers.len() <= MAX_QLF_SEQ, "{}", op.id);
            for seq in op.qualifiers {
                assert!(seq.len() <= op.operands.len(), "{}", op.id);
            }
            assert!(op.tied_operand < op.operands.len().max(1), "{}", op.id);
            assert_eq!(op.opcode & !op.mask, 0, "{}", op.id);
        }
    }

    #[test]
    fn mops_triples_are_adjacent() {
        for op in OPCODES {
            match op.constraints.mops_stage() {
                Some(MopsStage::P) => {
                    let m = op.next().expect("main follows prologue");
                    assert_eq!(m.constraints.mops_stage(), Some(MopsStage::M));
                    let e = m.next().expect("epilogue follows main");
                    assert_eq!(e.constraints.mops_stage(), Some(MopsStage::E));
                }
                Some(_) | None => {}
            }
        }
    }

    #[test]
    fn lookup_by_name() {
        assert!(by_name("MOVPRFX").count() >= 2);
        assert!(find("nonexistent").is_none());
    }
}
