//! Opcode descriptors: operand shape, legal qualifier sequences, instruction
//! class and the flags that steer constraint checking and sequencing.

use std::fmt;
use std::ptr;

use crate::feature::FeatureSet;
use crate::inst::MAX_OPERANDS;
use crate::operand::OperandCode;
use crate::qualifier::Qualifier;
use crate::table::OPCODES;

/// Maximum number of qualifier sequences per opcode.
pub const MAX_QLF_SEQ: usize = 10;

/// One legal qualifier per operand slot. Missing trailing slots are `Nil`.
pub type QualifierSeq = &'static [Qualifier];

/// Broad instruction family, used where constraint rules depend on more
/// than the operand code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsnClass {
    /// ADD/SUB (immediate).
    AddsubImm,
    /// ADD/SUB (extended register).
    AddsubExt,
    /// ADD/SUB (shifted register).
    AddsubShift,
    /// Logical (immediate).
    LogImm,
    /// Logical (shifted register).
    LogShift,
    /// Move wide.
    Movewide,
    /// Bitfield.
    Bitfield,
    /// Conditional compare.
    Condcmp,
    /// Conditional select.
    Condsel,
    /// Conditional branch.
    Condbranch,
    /// Compare and branch.
    Compbranch,
    /// Test and branch.
    Testbranch,
    /// Unconditional branch (immediate).
    BranchImm,
    /// ADR/ADRP.
    Pcreladdr,
    /// Exception generation.
    Exception,
    /// System instructions, barriers and hints.
    IcSystem,
    /// Load/store, unsigned scaled offset.
    LdstPos,
    /// Load/store, unscaled signed offset.
    LdstUnscaled,
    /// Load/store, unprivileged.
    LdstUnpriv,
    /// Load/store, pre/post-indexed.
    LdstImm9,
    /// LDRAA/LDRAB.
    LdstImm10,
    /// Load/store, register offset.
    LdstRegoff,
    /// Load/store pair, signed offset.
    LdstpairOff,
    /// Load/store pair, pre/post-indexed.
    LdstpairIndexed,
    /// Load/store no-allocate pair.
    LdstnapairOffs,
    /// Memory tagging load/store.
    LdstTag,
    /// Compare and swap.
    Lse,
    /// RCPC3 load/store.
    Rcpc3,
    /// AdvSIMD load/store multiple structures.
    Asisdlse,
    /// AdvSIMD load/store multiple structures, post-indexed.
    Asisdlsep,
    /// AdvSIMD load/store single structure.
    Asisdlso,
    /// AdvSIMD load/store single structure, post-indexed.
    Asisdlsop,
    /// FP data processing.
    Float,
    /// FP immediate.
    FloatImm,
    /// AdvSIMD modified immediate.
    Asimdimm,
    /// AdvSIMD shift by immediate.
    Asimdshf,
    /// AdvSIMD three same / different.
    Asimdsame,
    /// AdvSIMD by element.
    Asimdelem,
    /// AdvSIMD table lookup.
    Asimdtbl,
    /// AdvSIMD copy.
    Asimdins,
    /// SVE, element size in bits 23:22.
    SveSizeBhsd,
    /// SVE, miscellaneous encodings.
    SveMisc,
    /// SVE loads and stores.
    SveLdst,
    /// SME miscellaneous.
    SmeMisc,
    /// SME LDR (ZA array vector).
    SmeLdr,
    /// SME STR (ZA array vector).
    SmeStr,
    /// SME FP outer products, single or double precision.
    SmeFpSd,
    /// SME integer outer products, 32- or 64-bit accumulators.
    SmeIntSd,
    /// SME2 multi-vector operations.
    Sme2,
    /// Memory copy and set.
    Mops,
}

/// Opcode-specific variation of a generic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpKind {
    /// Nothing special.
    #[default]
    None,
    /// MOV alias of MOVZ.
    MovImmWide,
    /// MOV alias of MOVN; the immediate is inverted before checking.
    MovImmWiden,
    /// MOV alias of ORR (immediate).
    MovImmLog,
    /// BIC alias of AND (immediate); the immediate is inverted.
    Bic,
    /// FCMLA by element; lane count depends on the arrangement.
    FcmlaElem,
}

/// Opcode flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OpcodeFlags(u32);

impl OpcodeFlags {
    /// No flags.
    pub const NONE: OpcodeFlags = OpcodeFlags(0);
    /// Every operand qualifier must match exactly; unresolved operands count.
    pub const STRICT: OpcodeFlags = OpcodeFlags(1 << 0);
    /// The instruction opens a dependent sequence.
    pub const SCAN: OpcodeFlags = OpcodeFlags(1 << 1);
    /// The opcode is an alias of another table entry.
    pub const ALIAS: OpcodeFlags = OpcodeFlags(1 << 2);

    /// Whether every flag in `other` is set.
    pub const fn contains(self, other: OpcodeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two flag sets.
    #[must_use]
    pub const fn union(self, other: OpcodeFlags) -> Self {
        OpcodeFlags(self.0 | other.0)
    }
}

/// Sequencing constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Constraints(u32);

impl Constraints {
    /// No constraints.
    pub const NONE: Constraints = Constraints(0);
    /// May follow a `movprfx`.
    pub const SCAN_MOVPRFX: Constraints = Constraints(1 << 0);
    /// Result element size is the largest of the operand element sizes.
    pub const MAX_ELEM: Constraints = Constraints(1 << 1);
    /// Prologue of a memory copy/set triple.
    pub const MOPS_P: Constraints = Constraints(1 << 2);
    /// Main part of a memory copy/set triple.
    pub const MOPS_M: Constraints = Constraints(1 << 3);
    /// Epilogue of a memory copy/set triple.
    pub const MOPS_E: Constraints = Constraints(1 << 4);

    const MOPS: u32 = Self::MOPS_P.0 | Self::MOPS_M.0 | Self::MOPS_E.0;

    /// Whether every bit in `other` is set.
    pub const fn contains(self, other: Constraints) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two constraint sets.
    #[must_use]
    pub const fn union(self, other: Constraints) -> Self {
        Constraints(self.0 | other.0)
    }

    /// No constraint at all.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Stage within a memory copy/set triple.
    pub fn mops_stage(self) -> Option<MopsStage> {
        match self.0 & Self::MOPS {
            x if x == Self::MOPS_P.0 => Some(MopsStage::P),
            x if x == Self::MOPS_M.0 => Some(MopsStage::M),
            x if x == Self::MOPS_E.0 => Some(MopsStage::E),
            _ => None,
        }
    }
}

/// The three parts of a memory copy/set sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MopsStage {
    /// Prologue.
    P,
    /// Main.
    M,
    /// Epilogue.
    E,
}

/// Extra whole-instruction check attached to an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verifier {
    /// LDPSW write-back and destination overlap.
    Ldpsw,
    /// By-element `sz:L == 11` is undefined.
    ElemSd,
    /// The first three register operands must all differ.
    ThreeDifferentRegs,
}

/// One instruction mnemonic variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// Unique table key.
    pub id: &'static str,
    /// Mnemonic.
    pub name: &'static str,
    /// Fixed bits.
    pub opcode: u32,
    /// Mask of the fixed bits.
    pub mask: u32,
    /// Instruction family.
    pub iclass: InsnClass,
    /// Opcode-specific check variation.
    pub op: OpKind,
    /// Extensions required.
    pub features: FeatureSet,
    /// Operand slots.
    pub operands: &'static [OperandCode],
    /// Legal qualifier sequences, in priority order.
    pub qualifiers: &'static [QualifierSeq],
    /// Flags.
    pub flags: OpcodeFlags,
    /// Sequencing constraints.
    pub constraints: Constraints,
    /// Operand tied to operand 0, or zero.
    pub tied_operand: usize,
    /// Opcode-dependent value: register count or vector-group size.
    pub od: u32,
    /// Optional operand index and its default value.
    pub optional: Option<(usize, i64)>,
    /// Whole-instruction verifier.
    pub verifier: Option<Verifier>,
}

impl Opcode {
    /// A table entry with no flags, constraints or verifier.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        id: &'static str,
        name: &'static str,
        opcode: u32,
        mask: u32,
        iclass: InsnClass,
        features: FeatureSet,
        operands: &'static [OperandCode],
        qualifiers: &'static [QualifierSeq],
    ) -> Self {
        Self {
            id,
            name,
            opcode,
            mask,
            iclass,
            op: OpKind::None,
            features,
            operands,
            qualifiers,
            flags: OpcodeFlags::NONE,
            constraints: Constraints::NONE,
            tied_operand: 0,
            od: 0,
            optional: None,
            verifier: None,
        }
    }

    /// Set the check variation.
    #[must_use]
    pub const fn op(self, op: OpKind) -> Self {
        Self { op, ..self }
    }

    /// Add flags.
    #[must_use]
    pub const fn flags(self, flags: OpcodeFlags) -> Self {
        Self {
            flags: self.flags.union(flags),
            ..self
        }
    }

    /// Add sequencing constraints.
    #[must_use]
    pub const fn constraints(self, constraints: Constraints) -> Self {
        Self {
            constraints: self.constraints.union(constraints),
            ..self
        }
    }

    /// Tie operand `idx` to operand 0.
    #[must_use]
    pub const fn tied(self, idx: usize) -> Self {
        Self {
            tied_operand: idx,
            ..self
        }
    }

    /// Set the opcode-dependent value.
    #[must_use]
    pub const fn od(self, od: u32) -> Self {
        Self { od, ..self }
    }

    /// Mark operand `idx` optional with default `value`.
    #[must_use]
    pub const fn optional(self, idx: usize, value: i64) -> Self {
        Self {
            optional: Some((idx, value)),
            ..self
        }
    }

    /// Attach a verifier.
    #[must_use]
    pub const fn verifier(self, verifier: Verifier) -> Self {
        Self {
            verifier: Some(verifier),
            ..self
        }
    }

    /// Number of operand slots.
    pub fn num_operands(&self) -> usize {
        self.operands
            .iter()
            .take(MAX_OPERANDS)
            .take_while(|c| **c != OperandCode::Nil)
            .count()
    }

    /// Qualifier of `seq` at `idx`, `Nil` past its end.
    pub fn seq_qualifier(seq: QualifierSeq, idx: usize) -> Qualifier {
        seq.get(idx).copied().unwrap_or(Qualifier::Nil)
    }

    /// Whether the opcode is strict about qualifiers.
    pub fn is_strict(&self) -> bool {
        self.flags.contains(OpcodeFlags::STRICT)
    }

    /// Whether operand 0's code appears again later, making the destination
    /// also a source.
    pub fn is_destructive_by_operands(&self) -> bool {
        match self.operands.split_first() {
            Some((first, rest)) if *first != OperandCode::Nil => rest
                .iter()
                .take_while(|c| **c != OperandCode::Nil)
                .any(|c| c == first),
            _ => false,
        }
    }

    /// Position in the opcode table.
    pub fn index(&self) -> Option<usize> {
        OPCODES.iter().position(|o| ptr::eq(o, self))
    }

    /// Preceding table entry.
    pub fn prev(&self) -> Option<&'static Opcode> {
        let i = self.index()?;
        OPCODES.get(i.checked_sub(1)?)
    }

    /// Following table entry.
    pub fn next(&self) -> Option<&'static Opcode> {
        OPCODES.get(self.index()? + 1)
    }

    /// Whether `other` is this very table entry.
    pub fn is(&self, other: &Opcode) -> bool {
        ptr::eq(self, other)
    }

    /// Whether the operand at `idx` is the optional one.
    pub fn is_optional(&self, idx: usize) -> bool {
        self.optional.is_some_and(|(i, _)| i == idx)
    }

    /// Default value of the optional operand.
    pub fn default_value(&self) -> i64 {
        self.optional.map_or(0, |(_, v)| v)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
