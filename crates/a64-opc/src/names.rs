//! Named operand values: condition codes, shift/extend modifiers, barrier
//! and prefetch options, SVE patterns, PSTATE fields, system registers and
//! system instruction operations.

use std::fmt;

use crate::feature::{Feature, FeatureSet};

// ── Condition codes ──────────────────────────────────────────────────────

static CONDITION_NAMES: [&[&str]; 16] = [
    &["eq", "none"],
    &["ne", "any"],
    &["cs", "hs", "nlast"],
    &["cc", "lo", "ul", "last"],
    &["mi", "first"],
    &["pl", "nfrst"],
    &["vs"],
    &["vc"],
    &["hi", "pmore"],
    &["ls", "plast"],
    &["ge", "tcont"],
    &["lt", "tstop"],
    &["gt"],
    &["le"],
    &["al"],
    &["nv"],
];

/// A 4-bit AArch64 condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition(u8);

impl Condition {
    /// `eq`
    pub const EQ: Condition = Condition(0x0);
    /// `ne`
    pub const NE: Condition = Condition(0x1);
    /// `ge`
    pub const GE: Condition = Condition(0xa);
    /// `al`
    pub const AL: Condition = Condition(0xe);
    /// `nv`
    pub const NV: Condition = Condition(0xf);

    /// Condition for the low four bits of `value`.
    pub const fn from_value(value: u32) -> Self {
        Condition((value & 0xf) as u8)
    }

    /// Look a condition up by any of its names.
    pub fn from_name(name: &str) -> Option<Self> {
        CONDITION_NAMES
            .iter()
            .position(|names| names.iter().any(|n| n.eq_ignore_ascii_case(name)))
            .map(|i| Condition(i as u8))
    }

    /// Encoded value.
    pub const fn value(self) -> u32 {
        self.0 as u32
    }

    /// Preferred name.
    pub fn name(self) -> &'static str {
        CONDITION_NAMES[self.0 as usize][0]
    }

    /// Preferred name followed by its aliases.
    pub fn names(self) -> &'static [&'static str] {
        CONDITION_NAMES[self.0 as usize]
    }

    /// Logical inverse (`eq` <-> `ne`, `ge` <-> `lt`, ...).
    #[must_use]
    pub const fn invert(self) -> Self {
        Condition(self.0 ^ 1)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Modifiers ────────────────────────────────────────────────────────────

/// Shift, extend or multiplier attached to an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Modifier {
    /// No modifier.
    #[default]
    None,
    /// Masking shift left (AdvSIMD modified immediates).
    Msl,
    /// Rotate right.
    Ror,
    /// Arithmetic shift right.
    Asr,
    /// Logical shift right.
    Lsr,
    /// Logical shift left.
    Lsl,
    /// Zero-extend byte.
    Uxtb,
    /// Zero-extend halfword.
    Uxth,
    /// Zero-extend word.
    Uxtw,
    /// Zero-extend doubleword.
    Uxtx,
    /// Sign-extend byte.
    Sxtb,
    /// Sign-extend halfword.
    Sxth,
    /// Sign-extend word.
    Sxtw,
    /// Sign-extend doubleword.
    Sxtx,
    /// Multiply (SVE element counts).
    Mul,
    /// Multiply by vector length (SVE addressing).
    MulVl,
}

impl Modifier {
    /// Every modifier, in encoding-table order.
    pub const ALL: [Modifier; 16] = [
        Modifier::None,
        Modifier::Msl,
        Modifier::Ror,
        Modifier::Asr,
        Modifier::Lsr,
        Modifier::Lsl,
        Modifier::Uxtb,
        Modifier::Uxth,
        Modifier::Uxtw,
        Modifier::Uxtx,
        Modifier::Sxtb,
        Modifier::Sxth,
        Modifier::Sxtw,
        Modifier::Sxtx,
        Modifier::Mul,
        Modifier::MulVl,
    ];

    /// Assembly spelling.
    pub fn name(self) -> &'static str {
        match self {
            Modifier::None => "none",
            Modifier::Msl => "msl",
            Modifier::Ror => "ror",
            Modifier::Asr => "asr",
            Modifier::Lsr => "lsr",
            Modifier::Lsl => "lsl",
            Modifier::Uxtb => "uxtb",
            Modifier::Uxth => "uxth",
            Modifier::Uxtw => "uxtw",
            Modifier::Uxtx => "uxtx",
            Modifier::Sxtb => "sxtb",
            Modifier::Sxth => "sxth",
            Modifier::Sxtw => "sxtw",
            Modifier::Sxtx => "sxtx",
            Modifier::Mul => "mul",
            Modifier::MulVl => "mul vl",
        }
    }

    /// Value of the `shift` or `option` field that selects this modifier.
    pub fn value(self) -> u32 {
        match self {
            Modifier::None | Modifier::Msl | Modifier::Lsl | Modifier::Mul | Modifier::MulVl => 0,
            Modifier::Lsr => 1,
            Modifier::Asr => 2,
            Modifier::Ror => 3,
            Modifier::Uxtb => 0,
            Modifier::Uxth => 1,
            Modifier::Uxtw => 2,
            Modifier::Uxtx => 3,
            Modifier::Sxtb => 4,
            Modifier::Sxth => 5,
            Modifier::Sxtw => 6,
            Modifier::Sxtx => 7,
        }
    }

    /// Decode a `shift` (`extend == false`) or `option` (`extend == true`)
    /// field value.
    pub fn from_value(value: u32, extend: bool) -> Option<Self> {
        if extend {
            let i = Modifier::Uxtb as u32 + value;
            (value < 8).then(|| Modifier::ALL[i as usize])
        } else {
            let i = (Modifier::Lsl as u32).checked_sub(value)?;
            (i >= Modifier::Ror as u32).then(|| Modifier::ALL[i as usize])
        }
    }

    /// Look a modifier up by its spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Modifier::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// One of the eight extend operators.
    pub fn is_extend(self) -> bool {
        self > Modifier::Lsl && self <= Modifier::Sxtx
    }

    /// ROR, ASR, LSR or LSL.
    pub fn is_shift(self) -> bool {
        self >= Modifier::Ror && self <= Modifier::Lsl
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Barriers and hints ───────────────────────────────────────────────────

/// A named option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedValue {
    /// Assembly spelling.
    pub name: &'static str,
    /// Encoded value.
    pub value: u32,
}

const fn nv(name: &'static str, value: u32) -> NamedValue {
    NamedValue { name, value }
}

/// DMB/DSB options, indexed by CRm.
pub static BARRIER_OPTIONS: [NamedValue; 16] = [
    nv("#0x00", 0x0),
    nv("oshld", 0x1),
    nv("oshst", 0x2),
    nv("osh", 0x3),
    nv("#0x04", 0x4),
    nv("nshld", 0x5),
    nv("nshst", 0x6),
    nv("nsh", 0x7),
    nv("#0x08", 0x8),
    nv("ishld", 0x9),
    nv("ishst", 0xa),
    nv("ish", 0xb),
    nv("#0x0c", 0xc),
    nv("ld", 0xd),
    nv("st", 0xe),
    nv("sy", 0xf),
];

/// DSB nXS options.
pub static DSB_NXS_OPTIONS: [NamedValue; 4] = [
    nv("oshnxs", 16),
    nv("nshnxs", 20),
    nv("ishnxs", 24),
    nv("synxs", 28),
];

/// Barrier option for `value`, looking through the nXS table for values
/// outside `0..16`.
pub fn barrier(value: u32) -> Option<&'static NamedValue> {
    BARRIER_OPTIONS
        .get(value as usize)
        .or_else(|| DSB_NXS_OPTIONS.iter().find(|b| b.value == value))
}

/// Operand of `bti`, `psb` and `gcsb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintOption {
    /// Assembly spelling.
    pub name: &'static str,
    /// CRm:op2 value.
    pub value: u32,
    /// Omitted when rendering.
    pub noprint: bool,
}

/// BTI, PSB and GCSB targets. The first entry is the default BTI target and
/// is never printed.
pub static HINT_OPTIONS: [HintOption; 6] = [
    HintOption { name: " ", value: 0x20, noprint: true },
    HintOption { name: "csync", value: 0x11, noprint: false },
    HintOption { name: "dsync", value: 0x13, noprint: false },
    HintOption { name: "c", value: 0x22, noprint: false },
    HintOption { name: "j", value: 0x24, noprint: false },
    HintOption { name: "jc", value: 0x26, noprint: false },
];

/// Hint option with the given CRm:op2 value.
pub fn hint_option(value: u32) -> Option<&'static HintOption> {
    HINT_OPTIONS.iter().find(|h| h.value == value)
}

// ── Prefetch operations ──────────────────────────────────────────────────

/// PRFM `prfop` names indexed by the 5-bit `Rt` value; 24 to 31 are unnamed.
pub static PRFOPS: [Option<&str>; 32] = [
    Some("pldl1keep"),
    Some("pldl1strm"),
    Some("pldl2keep"),
    Some("pldl2strm"),
    Some("pldl3keep"),
    Some("pldl3strm"),
    Some("pldslckeep"),
    Some("pldslcstrm"),
    Some("plil1keep"),
    Some("plil1strm"),
    Some("plil2keep"),
    Some("plil2strm"),
    Some("plil3keep"),
    Some("plil3strm"),
    Some("plislckeep"),
    Some("plislcstrm"),
    Some("pstl1keep"),
    Some("pstl1strm"),
    Some("pstl2keep"),
    Some("pstl2strm"),
    Some("pstl3keep"),
    Some("pstl3strm"),
    Some("pstslckeep"),
    Some("pstslcstrm"),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
];

/// First prefetch operation the register-index form of PRFM rejects.
pub const PRFOP_REGOFF_LIMIT: i64 = 24;

/// SVE `prfop` names indexed by the 4-bit field.
pub static SVE_PRFOPS: [Option<&str>; 16] = [
    Some("pldl1keep"),
    Some("pldl1strm"),
    Some("pldl2keep"),
    Some("pldl2strm"),
    Some("pldl3keep"),
    Some("pldl3strm"),
    None,
    None,
    Some("pstl1keep"),
    Some("pstl1strm"),
    Some("pstl2keep"),
    Some("pstl2strm"),
    Some("pstl3keep"),
    Some("pstl3strm"),
    None,
    None,
];

/// SVE predicate-constraint pattern names indexed by the 5-bit field.
pub static SVE_PATTERNS: [Option<&str>; 32] = [
    Some("pow2"),
    Some("vl1"),
    Some("vl2"),
    Some("vl3"),
    Some("vl4"),
    Some("vl5"),
    Some("vl6"),
    Some("vl7"),
    Some("vl8"),
    Some("vl16"),
    Some("vl32"),
    Some("vl64"),
    Some("vl128"),
    Some("vl256"),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    Some("mul4"),
    Some("mul3"),
    Some("all"),
];

/// SME2 vector-length multipliers for `pext`/`whilelo` counters.
pub static SME_VLXN: [&str; 2] = ["vlx2", "vlx4"];

// ── System registers ─────────────────────────────────────────────────────

/// `op0:op1:CRn:CRm:op2` packed into 16 bits.
pub const fn cpenc(op0: u32, op1: u32, crn: u32, crm: u32, op2: u32) -> u32 {
    (op0 << 14) | (op1 << 11) | (crn << 7) | (crm << 3) | op2
}

/// `cpenc` with `op0 = 1`, the space used by SYS aliases.
pub const fn cpens(op1: u32, crn: u32, crm: u32, op2: u32) -> u32 {
    cpenc(1, op1, crn, crm, op2)
}

/// Access direction of a system register or of an instruction using one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegAccess {
    /// No restriction.
    #[default]
    ReadWrite,
    /// Readable only (`mrs`).
    Read,
    /// Writable only (`msr`).
    Write,
}

/// A named system register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SysReg {
    /// Lowercase name.
    pub name: &'static str,
    /// Packed encoding (see [`cpenc`]).
    pub value: u32,
    /// Read-only, write-only, or either.
    pub access: RegAccess,
    /// Extensions that define this register.
    pub features: FeatureSet,
}

const fn sr(name: &'static str, value: u32, access: RegAccess, features: FeatureSet) -> SysReg {
    SysReg {
        name,
        value,
        access,
        features,
    }
}

const V8: FeatureSet = FeatureSet::only(Feature::V8);
const RW: RegAccess = RegAccess::ReadWrite;
const RO: RegAccess = RegAccess::Read;
const WO: RegAccess = RegAccess::Write;

/// A representative selection of system registers.
pub static SYS_REGS: &[SysReg] = &[
    sr("nzcv", cpenc(3, 3, 4, 2, 0), RW, V8),
    sr("daif", cpenc(3, 3, 4, 2, 1), RW, V8),
    sr("fpcr", cpenc(3, 3, 4, 4, 0), RW, V8),
    sr("fpsr", cpenc(3, 3, 4, 4, 1), RW, V8),
    sr("currentel", cpenc(3, 0, 4, 2, 2), RO, V8),
    sr("spsel", cpenc(3, 0, 4, 2, 0), RW, V8),
    sr("sp_el0", cpenc(3, 0, 4, 1, 0), RW, V8),
    sr("spsr_el1", cpenc(3, 0, 4, 0, 0), RW, V8),
    sr("elr_el1", cpenc(3, 0, 4, 0, 1), RW, V8),
    sr("midr_el1", cpenc(3, 0, 0, 0, 0), RO, V8),
    sr("mpidr_el1", cpenc(3, 0, 0, 0, 5), RO, V8),
    sr("sctlr_el1", cpenc(3, 0, 1, 0, 0), RW, V8),
    sr("ttbr0_el1", cpenc(3, 0, 2, 0, 0), RW, V8),
    sr("esr_el1", cpenc(3, 0, 5, 2, 0), RW, V8),
    sr("far_el1", cpenc(3, 0, 6, 0, 0), RW, V8),
    sr("vbar_el1", cpenc(3, 0, 12, 0, 0), RW, V8),
    sr("ctr_el0", cpenc(3, 3, 0, 0, 1), RO, V8),
    sr("dczid_el0", cpenc(3, 3, 0, 0, 7), RO, V8),
    sr("tpidr_el0", cpenc(3, 3, 13, 0, 2), RW, V8),
    sr("tpidrro_el0", cpenc(3, 3, 13, 0, 3), RW, V8),
    sr("cntfrq_el0", cpenc(3, 3, 14, 0, 0), RW, V8),
    sr("cntvct_el0", cpenc(3, 3, 14, 0, 2), RO, V8),
    sr("pmswinc_el0", cpenc(3, 3, 9, 12, 4), WO, V8),
    sr("oslar_el1", cpenc(2, 0, 1, 0, 4), WO, V8),
    sr("icc_iar1_el1", cpenc(3, 0, 12, 12, 0), RO, V8),
    sr("icc_eoir1_el1", cpenc(3, 0, 12, 12, 1), WO, V8),
    sr("icc_sgi1r_el1", cpenc(3, 0, 12, 11, 5), WO, V8),
    sr("pan", cpenc(3, 0, 4, 2, 3), RW, FeatureSet::only(Feature::Pan)),
    sr("uao", cpenc(3, 0, 4, 2, 4), RW, FeatureSet::only(Feature::V8_2A)),
    sr("dit", cpenc(3, 3, 4, 2, 5), RW, FeatureSet::only(Feature::V8_4A)),
    sr("ssbs", cpenc(3, 3, 4, 2, 6), RW, FeatureSet::only(Feature::Ssbs)),
    sr("tco", cpenc(3, 3, 4, 2, 7), RW, FeatureSet::only(Feature::Memtag)),
    sr("svcr", cpenc(3, 3, 4, 2, 2), RW, FeatureSet::only(Feature::Sme)),
    sr("zcr_el1", cpenc(3, 0, 1, 2, 0), RW, FeatureSet::only(Feature::Sve)),
    sr("smcr_el1", cpenc(3, 0, 1, 2, 6), RW, FeatureSet::only(Feature::Sme)),
];

/// Generic `s<op0>_<op1>_c<n>_c<m>_<op2>` spelling of a packed encoding.
pub fn sysreg_generic_name(value: u32) -> String {
    format!(
        "s{}_{}_c{}_c{}_{}",
        (value >> 14) & 0x3,
        (value >> 11) & 0x7,
        (value >> 7) & 0xf,
        (value >> 3) & 0xf,
        value & 0x7
    )
}

// ── PSTATE fields ────────────────────────────────────────────────────────

/// A PSTATE field writable with `msr <field>, #imm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PstateField {
    /// Lowercase name.
    pub name: &'static str,
    /// `op1:op2` value.
    pub value: u32,
    /// CRm bits that select between fields sharing one `value`.
    pub crm: Option<u32>,
    /// Largest immediate the field accepts.
    pub max: i64,
    /// Required extensions; empty for the base set.
    pub features: FeatureSet,
}

const fn ps(name: &'static str, value: u32, crm: Option<u32>, max: i64, features: FeatureSet) -> PstateField {
    PstateField {
        name,
        value,
        crm,
        max,
        features,
    }
}

/// Every PSTATE field.
pub static PSTATE_FIELDS: [PstateField; 12] = [
    ps("spsel", 0x05, None, 1, FeatureSet::EMPTY),
    ps("daifset", 0x1e, None, 15, FeatureSet::EMPTY),
    ps("daifclr", 0x1f, None, 15, FeatureSet::EMPTY),
    ps("pan", 0x04, None, 1, FeatureSet::only(Feature::Pan)),
    ps("uao", 0x03, None, 1, FeatureSet::only(Feature::V8_2A)),
    ps("ssbs", 0x19, None, 1, FeatureSet::only(Feature::Ssbs)),
    ps("dit", 0x1a, None, 1, FeatureSet::only(Feature::V8_4A)),
    ps("tco", 0x1c, None, 1, FeatureSet::only(Feature::Memtag)),
    ps("svcrsm", 0x1b, Some(0x2), 1, FeatureSet::only(Feature::Sme)),
    ps("svcrza", 0x1b, Some(0x4), 1, FeatureSet::only(Feature::Sme)),
    ps("svcrsmza", 0x1b, Some(0x6), 1, FeatureSet::only(Feature::Sme)),
    ps("allint", 0x08, None, 1, FeatureSet::only(Feature::V8_8A)),
];

/// First PSTATE field with `value`; `crm`, when given, selects among the
/// SVCR variants.
pub fn pstate_field(value: u32, crm: Option<u32>) -> Option<&'static PstateField> {
    PSTATE_FIELDS
        .iter()
        .filter(|p| p.value == value)
        .find(|p| match (p.crm, crm) {
            (Some(want), Some(got)) => want == got,
            _ => true,
        })
}

// ── System instruction operations ────────────────────────────────────────

/// Which SYS alias a system instruction operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SysInsKind {
    /// Instruction cache maintenance.
    Ic,
    /// Data cache maintenance.
    Dc,
    /// Address translation.
    At,
    /// TLB invalidate.
    Tlbi,
}

/// An operation of an IC/DC/AT/TLBI alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SysIns {
    /// Lowercase name.
    pub name: &'static str,
    /// Packed `op1:CRn:CRm:op2` (see [`cpens`]).
    pub value: u32,
    /// Takes an `Xt` operand.
    pub has_xt: bool,
    /// Required extensions.
    pub features: FeatureSet,
}

const fn si(name: &'static str, value: u32, has_xt: bool) -> SysIns {
    SysIns {
        name,
        value,
        has_xt,
        features: V8,
    }
}

/// IC operations.
pub static IC_OPS: [SysIns; 3] = [
    si("ialluis", cpens(0, 7, 1, 0), false),
    si("iallu", cpens(0, 7, 5, 0), false),
    si("ivau", cpens(3, 7, 5, 1), true),
];

/// DC operations.
pub static DC_OPS: [SysIns; 10] = [
    si("zva", cpens(3, 7, 4, 1), true),
    si("ivac", cpens(0, 7, 6, 1), true),
    si("isw", cpens(0, 7, 6, 2), true),
    si("cvac", cpens(3, 7, 10, 1), true),
    si("csw", cpens(0, 7, 10, 2), true),
    si("cvau", cpens(3, 7, 11, 1), true),
    si("civac", cpens(3, 7, 14, 1), true),
    si("cisw", cpens(0, 7, 14, 2), true),
    SysIns {
        name: "gva",
        value: cpens(3, 7, 4, 3),
        has_xt: true,
        features: FeatureSet::only(Feature::Memtag),
    },
    SysIns {
        name: "gzva",
        value: cpens(3, 7, 4, 4),
        has_xt: true,
        features: FeatureSet::only(Feature::Memtag),
    },
];

/// AT operations.
pub static AT_OPS: [SysIns; 12] = [
    si("s1e1r", cpens(0, 7, 8, 0), true),
    si("s1e1w", cpens(0, 7, 8, 1), true),
    si("s1e0r", cpens(0, 7, 8, 2), true),
    si("s1e0w", cpens(0, 7, 8, 3), true),
    si("s12e1r", cpens(4, 7, 8, 4), true),
    si("s12e1w", cpens(4, 7, 8, 5), true),
    si("s12e0r", cpens(4, 7, 8, 6), true),
    si("s12e0w", cpens(4, 7, 8, 7), true),
    si("s1e2r", cpens(4, 7, 8, 0), true),
    si("s1e2w", cpens(4, 7, 8, 1), true),
    si("s1e3r", cpens(6, 7, 8, 0), true),
    si("s1e3w", cpens(6, 7, 8, 1), true),
];

/// TLBI operations.
pub static TLBI_OPS: [SysIns; 12] = [
    si("vmalle1", cpens(0, 8, 7, 0), false),
    si("vae1", cpens(0, 8, 7, 1), true),
    si("aside1", cpens(0, 8, 7, 2), true),
    si("vaae1", cpens(0, 8, 7, 3), true),
    si("vale1", cpens(0, 8, 7, 5), true),
    si("vaale1", cpens(0, 8, 7, 7), true),
    si("vmalle1is", cpens(0, 8, 3, 0), false),
    si("vae1is", cpens(0, 8, 3, 1), true),
    si("alle1", cpens(4, 8, 7, 4), false),
    si("alle1is", cpens(4, 8, 3, 4), false),
    si("alle2", cpens(4, 8, 7, 0), false),
    si("alle3", cpens(6, 8, 7, 0), false),
];

impl SysInsKind {
    /// Operation table for this alias.
    pub fn table(self) -> &'static [SysIns] {
        match self {
            SysInsKind::Ic => &IC_OPS,
            SysInsKind::Dc => &DC_OPS,
            SysInsKind::At => &AT_OPS,
            SysInsKind::Tlbi => &TLBI_OPS,
        }
    }

    /// Operation with packed encoding `value`.
    pub fn lookup(self, value: u32) -> Option<&'static SysIns> {
        self.table().iter().find(|op| op.value == value)
    }

    /// Operation named `name`.
    pub fn by_name(self, name: &str) -> Option<&'static SysIns> {
        self.table().iter().find(|op| op.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_aliases_and_inverse() {
        assert_eq!(Condition::from_name("hs"), Some(Condition::from_value(2)));
        assert_eq!(Condition::from_name("NLAST").map(Condition::name), Some("cs"));
        assert_eq!(Condition::from_value(3).names(), &["cc", "lo", "ul", "last"]);
        assert_eq!(Condition::EQ.invert(), Condition::NE);
        assert_eq!(Condition::GE.invert().name(), "lt");
        assert_eq!(Condition::from_name("xx"), None);
    }

    #[test]
    fn modifier_decoding() {
        assert_eq!(Modifier::from_value(0, false), Some(Modifier::Lsl));
        assert_eq!(Modifier::from_value(1, false), Some(Modifier::Lsr));
        assert_eq!(Modifier::from_value(3, false), Some(Modifier::Ror));
        assert_eq!(Modifier::from_value(4, false), None);
        assert_eq!(Modifier::from_value(2, true), Some(Modifier::Uxtw));
        assert_eq!(Modifier::from_value(7, true), Some(Modifier::Sxtx));
        assert_eq!(Modifier::from_value(8, true), None);
        for m in Modifier::ALL {
            if m.is_shift() {
                assert_eq!(Modifier::from_value(m.value(), false), Some(m));
            }
            if m.is_extend() {
                assert_eq!(Modifier::from_value(m.value(), true), Some(m));
            }
        }
    }

    #[test]
    fn modifier_classes() {
        assert!(Modifier::Uxtb.is_extend());
        assert!(!Modifier::Lsl.is_extend());
        assert!(Modifier::Lsl.is_shift());
        assert!(!Modifier::Msl.is_shift());
        assert_eq!(Modifier::from_name("mul vl"), Some(Modifier::MulVl));
    }

    #[test]
    fn barriers() {
        assert_eq!(barrier(0xb).map(|b| b.name), Some("ish"));
        assert_eq!(barrier(24).map(|b| b.name), Some("ishnxs"));
        assert_eq!(barrier(17), None);
        assert_eq!(hint_option(0x24).map(|h| h.name), Some("j"));
    }

    #[test]
    fn prefetch_tables() {
        assert_eq!(PRFOPS[0], Some("pldl1keep"));
        assert_eq!(PRFOPS[0b10101], Some("pstl3strm"));
        assert!(PRFOPS[PRFOP_REGOFF_LIMIT as usize..].iter().all(Option::is_none));
        assert_eq!(SVE_PATTERNS[31], Some("all"));
        assert_eq!(SVE_PATTERNS[14], None);
    }

    #[test]
    #[allow(clippy::unusual_byte_groupings)]
    fn sysreg_encoding() {
        assert_eq!(cpenc(3, 3, 4, 2, 0), 0b11_011_0100_0010_000);
        assert_eq!(sysreg_generic_name(cpenc(3, 3, 13, 0, 2)), "s3_3_c13_c0_2");
        assert_eq!(SysInsKind::Dc.by_name("zva").map(|op| op.value), Some(cpens(3, 7, 4, 1)));
        assert!(!SysInsKind::Ic.lookup(cpens(0, 7, 5, 0)).unwrap().has_xt);
    }

    #[test]
    fn pstate_lookup() {
        assert_eq!(pstate_field(0x1e, None).map(|p| p.max), Some(15));
        assert_eq!(pstate_field(0x1b, Some(0x4)).map(|p| p.name), Some("svcrza"));
        assert_eq!(pstate_field(0x1b, None).map(|p| p.name), Some("svcrsm"));
        assert!(pstate_field(0x00, None).is_none());
    }
}
