//! The per-instruction data model: operands with their payloads, and the
//! instruction that owns them.
//!
//! An [`Instruction`] is built fresh for every instruction a front end
//! processes. Operand slots are filled incrementally, the matcher resolves
//! the qualifiers that are still [`Qualifier::Nil`], and the checker,
//! sequence verifier and renderer read the result.

use crate::names::{Condition, Modifier, RegAccess, SysInsKind};
use crate::opcode::Opcode;
use crate::operand::{OperandClass, OperandCode};
use crate::qualifier::Qualifier;

/// Maximum number of operands of any instruction.
pub const MAX_OPERANDS: usize = 6;

/// Shift, extend or multiplier attached to an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shifter {
    /// The operator.
    pub kind: Modifier,
    /// Shift amount or multiplier.
    pub amount: i64,
    /// The operator was written explicitly.
    pub operator_present: bool,
    /// The amount was written explicitly.
    pub amount_present: bool,
}

impl Shifter {
    /// An explicit `kind #amount`.
    pub fn new(kind: Modifier, amount: i64) -> Self {
        Self {
            kind,
            amount,
            operator_present: true,
            amount_present: true,
        }
    }

    /// `kind` written without an amount.
    pub fn bare(kind: Modifier) -> Self {
        Self {
            kind,
            amount: 0,
            operator_present: true,
            amount_present: false,
        }
    }

    /// `kind #amount` implied by the encoding rather than written.
    pub fn implicit(kind: Modifier, amount: i64) -> Self {
        Self {
            kind,
            amount,
            operator_present: false,
            amount_present: false,
        }
    }
}

/// A register with a lane index, e.g. `v3.s[1]` or `z4.h[2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegLane {
    /// Register number.
    pub regno: u32,
    /// Lane index.
    pub index: i64,
}

/// A register list, e.g. `{ v0.4s - v3.4s }` or `{ z0.d, z8.d }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegList {
    /// First register number.
    pub first_regno: u32,
    /// Number of registers.
    pub num_regs: u32,
    /// Distance between consecutive registers.
    pub stride: u32,
    /// Lane index applied to every register, if any.
    pub index: Option<i64>,
}

impl RegList {
    /// Number of the last register, modulo the 32-register bank.
    pub fn last_regno(&self) -> u32 {
        self.first_regno
            .wrapping_add(self.stride.wrapping_mul(self.num_regs.saturating_sub(1)))
            & 0x1f
    }
}

/// Selection register, offset and range of a ZA access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZaIndex {
    /// Selection register `Wv`.
    pub regno: u32,
    /// First immediate offset.
    pub imm: i64,
    /// Number of consecutive offsets minus one.
    pub countm1: u32,
}

/// An access to ZA storage: a tile slice, a ZA array vector, or a
/// predicate-as-counter lane selected by a W register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexedZa {
    /// Tile (or predicate) number.
    pub regno: u32,
    /// Selection register and offsets.
    pub index: ZaIndex,
    /// `vgx2`/`vgx4` suffix, zero when omitted.
    pub group_size: u32,
    /// Vertical slice.
    pub v: bool,
}

/// Register or immediate offset of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddrOffset {
    /// Immediate byte offset (or multiplier for `mul vl` forms).
    Imm(i64),
    /// Index register number.
    Reg(u32),
}

impl Default for AddrOffset {
    fn default() -> Self {
        AddrOffset::Imm(0)
    }
}

/// An addressing-mode operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddrInfo {
    /// Base register.
    pub base_regno: u32,
    /// Offset.
    pub offset: AddrOffset,
    /// PC-relative.
    pub pcrel: bool,
    /// Pre-indexed (the offset is applied before the access).
    pub preind: bool,
    /// Post-indexed.
    pub postind: bool,
    /// The base register is updated.
    pub writeback: bool,
}

impl AddrInfo {
    /// `[Xn]`, pre-indexed with a zero offset and no write-back.
    pub fn base(regno: u32) -> Self {
        Self {
            base_regno: regno,
            offset: AddrOffset::Imm(0),
            pcrel: false,
            preind: true,
            postind: false,
            writeback: false,
        }
    }

    /// Replace the offset with an immediate.
    #[must_use]
    pub fn with_imm(mut self, imm: i64) -> Self {
        self.offset = AddrOffset::Imm(imm);
        self
    }

    /// Replace the offset with an index register.
    #[must_use]
    pub fn with_reg(mut self, regno: u32) -> Self {
        self.offset = AddrOffset::Reg(regno);
        self
    }

    /// `[Xn, #imm]!`
    #[must_use]
    pub fn pre_indexed(mut self) -> Self {
        self.preind = true;
        self.postind = false;
        self.writeback = true;
        self
    }

    /// `[Xn], #imm`
    #[must_use]
    pub fn post_indexed(mut self) -> Self {
        self.preind = false;
        self.postind = true;
        self.writeback = true;
        self
    }

    /// Immediate offset, zero for register offsets.
    pub fn imm(&self) -> i64 {
        match self.offset {
            AddrOffset::Imm(imm) => imm,
            AddrOffset::Reg(_) => 0,
        }
    }

    /// Index register, if the offset is a register.
    pub fn index_reg(&self) -> Option<u32> {
        match self.offset {
            AddrOffset::Reg(r) => Some(r),
            AddrOffset::Imm(_) => None,
        }
    }
}

/// An immediate operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Immediate {
    /// Value; for FP immediates the 8-bit encoding or the IEEE bit pattern.
    pub value: i64,
    /// The value is a floating-point encoding.
    pub is_fp: bool,
}

/// Value payload of an operand, interpreted according to its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperandValue {
    /// Not filled in.
    #[default]
    None,
    /// Plain register number.
    Reg(u32),
    /// Register with lane index.
    RegLane(RegLane),
    /// Register list.
    RegList(RegList),
    /// ZA tile slice, ZA array vector or indexed predicate.
    IndexedZa(IndexedZa),
    /// Immediate (also PC-relative offsets).
    Imm(Immediate),
    /// Memory address.
    Addr(AddrInfo),
    /// Condition code.
    Cond(Condition),
    /// System register of MRS/MSR.
    SysReg {
        /// Packed `op0:op1:CRn:CRm:op2`.
        value: u32,
        /// Direction of the instruction using it.
        access: RegAccess,
    },
    /// PSTATE field of MSR (immediate).
    Pstate {
        /// `op1:op2`.
        value: u32,
        /// CRm selector for the SVCR fields.
        crm: Option<u32>,
    },
    /// IC/DC/AT/TLBI operation.
    SysIns {
        /// Alias family.
        kind: SysInsKind,
        /// Packed `op1:CRn:CRm:op2`.
        value: u32,
    },
    /// Barrier option.
    Barrier(u32),
    /// Prefetch operation.
    Prfop(u32),
    /// BTI/PSB/GCSB hint option.
    Hint(u32),
}

/// One operand slot of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operand {
    /// Kind of slot, copied from the opcode.
    pub code: OperandCode,
    /// Resolved qualifier, or `Nil` while unresolved.
    pub qualifier: Qualifier,
    /// The operand was written (optional operands may be absent).
    pub present: bool,
    /// The operand is incomplete and must not be checked yet.
    pub skip: bool,
    /// Payload.
    pub value: OperandValue,
    /// Shift or extend.
    pub shifter: Shifter,
}

impl Default for Operand {
    fn default() -> Self {
        Self::new(OperandValue::None)
    }
}

impl Operand {
    /// An operand with the given payload and no qualifier.
    pub fn new(value: OperandValue) -> Self {
        Self {
            code: OperandCode::Nil,
            qualifier: Qualifier::Nil,
            present: true,
            skip: false,
            value,
            shifter: Shifter::default(),
        }
    }

    /// Register `regno`.
    pub fn reg(regno: u32) -> Self {
        Self::new(OperandValue::Reg(regno))
    }

    /// Register `regno` lane `index`.
    pub fn lane(regno: u32, index: i64) -> Self {
        Self::new(OperandValue::RegLane(RegLane { regno, index }))
    }

    /// `num_regs` registers from `first_regno` spaced by `stride`.
    pub fn list(first_regno: u32, num_regs: u32, stride: u32) -> Self {
        Self::new(OperandValue::RegList(RegList {
            first_regno,
            num_regs,
            stride,
            index: None,
        }))
    }

    /// ZA access.
    pub fn za(za: IndexedZa) -> Self {
        Self::new(OperandValue::IndexedZa(za))
    }

    /// Integer immediate.
    pub fn imm(value: i64) -> Self {
        Self::new(OperandValue::Imm(Immediate {
            value,
            is_fp: false,
        }))
    }

    /// Floating-point immediate (8-bit encoding or IEEE bits).
    pub fn fp_imm(value: i64) -> Self {
        Self::new(OperandValue::Imm(Immediate { value, is_fp: true }))
    }

    /// Memory address.
    pub fn addr(addr: AddrInfo) -> Self {
        Self::new(OperandValue::Addr(addr))
    }

    /// Condition code.
    pub fn cond(cond: Condition) -> Self {
        Self::new(OperandValue::Cond(cond))
    }

    /// Set the qualifier.
    #[must_use]
    pub fn qualified(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = qualifier;
        self
    }

    /// Set the shifter.
    #[must_use]
    pub fn shifted(mut self, shifter: Shifter) -> Self {
        self.shifter = shifter;
        self
    }

    /// Mark as not written.
    #[must_use]
    pub fn absent(mut self) -> Self {
        self.present = false;
        self
    }

    /// Mark as incomplete.
    #[must_use]
    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Operand class of the slot.
    pub fn class(&self) -> OperandClass {
        self.code.class()
    }

    /// Register number of any register-shaped payload, zero otherwise.
    pub fn regno(&self) -> u32 {
        match self.value {
            OperandValue::Reg(r) => r,
            OperandValue::RegLane(l) => l.regno,
            OperandValue::RegList(l) => l.first_regno,
            OperandValue::IndexedZa(z) => z.regno,
            _ => 0,
        }
    }

    /// Lane payload, or a zeroed lane.
    pub fn reglane(&self) -> RegLane {
        match self.value {
            OperandValue::RegLane(l) => l,
            OperandValue::Reg(regno) => RegLane { regno, index: 0 },
            _ => RegLane::default(),
        }
    }

    /// List payload, or an empty list.
    pub fn reglist(&self) -> RegList {
        match self.value {
            OperandValue::RegList(l) => l,
            _ => RegList::default(),
        }
    }

    /// ZA payload, or a zeroed access.
    pub fn indexed_za(&self) -> IndexedZa {
        match self.value {
            OperandValue::IndexedZa(z) => z,
            _ => IndexedZa::default(),
        }
    }

    /// Immediate payload, or zero.
    pub fn imm_value(&self) -> i64 {
        match self.value {
            OperandValue::Imm(i) => i.value,
            _ => 0,
        }
    }

    /// Whether the immediate payload is a floating-point encoding.
    pub fn is_fp_imm(&self) -> bool {
        matches!(self.value, OperandValue::Imm(Immediate { is_fp: true, .. }))
    }

    /// Address payload, or `[x0]`.
    pub fn addr_info(&self) -> AddrInfo {
        match self.value {
            OperandValue::Addr(a) => a,
            _ => AddrInfo::base(0),
        }
    }

    /// Whether register 31 of this operand names SP.
    pub fn is_stack_pointer(&self) -> bool {
        self.class() == OperandClass::IntReg && self.code.maybe_sp() && self.regno() == 31
    }

    /// Whether register 31 of this operand names ZR.
    pub fn is_zero_register(&self) -> bool {
        self.class() == OperandClass::IntReg && !self.code.maybe_sp() && self.regno() == 31
    }
}

/// One instruction: an opcode and its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Opcode table entry.
    pub opcode: &'static Opcode,
    /// Encoded word, when known.
    pub value: u32,
    /// Operand slots; slots past the opcode's operand list are `Nil`.
    pub operands: [Operand; MAX_OPERANDS],
}

impl Instruction {
    /// An instruction whose operand slots carry the opcode's operand codes
    /// and no values.
    pub fn new(opcode: &'static Opcode) -> Self {
        let mut operands = [Operand::default(); MAX_OPERANDS];
        for (slot, code) in operands.iter_mut().zip(opcode.operands.iter()) {
            slot.code = *code;
        }
        Self {
            opcode,
            value: 0,
            operands,
        }
    }

    /// Fill operand `idx`. The slot keeps the opcode's operand code.
    #[must_use]
    pub fn with(mut self, idx: usize, operand: Operand) -> Self {
        self.set(idx, operand);
        self
    }

    /// Fill operand `idx` in place.
    pub fn set(&mut self, idx: usize, operand: Operand) {
        if let Some(slot) = self.operands.get_mut(idx) {
            let code = self.opcode.operands.get(idx).copied().unwrap_or_default();
            *slot = Operand { code, ..operand };
        }
    }

    /// Record the encoded word.
    #[must_use]
    pub fn encoded(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    /// Number of operands of the opcode.
    pub fn num_operands(&self) -> usize {
        self.opcode.num_operands()
    }

    /// Current qualifiers of all slots.
    pub fn qualifiers(&self) -> [Qualifier; MAX_OPERANDS] {
        self.operands.map(|op| op.qualifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table;

    #[test]
    fn list_last_register_wraps() {
        let list = RegList {
            first_regno: 30,
            num_regs: 4,
            stride: 1,
            index: None,
        };
        assert_eq!(list.last_regno(), 1);
        let strided = RegList {
            first_regno: 3,
            num_regs: 2,
            stride: 8,
            index: None,
        };
        assert_eq!(strided.last_regno(), 11);
    }

    #[test]
    fn with_keeps_opcode_codes() {
        let op = table::find("add_sve_pred").expect("in table");
        let inst = Instruction::new(op).with(0, Operand::reg(5)).with(9, Operand::reg(1));
        assert_eq!(inst.operands[0].code, OperandCode::SveZd);
        assert_eq!(inst.operands[0].regno(), 5);
        assert_eq!(inst.operands[5].code, OperandCode::Nil);
    }

    #[test]
    fn address_builders() {
        let a = AddrInfo::base(2).with_imm(-16).pre_indexed();
        assert!(a.writeback && a.preind && !a.postind);
        assert_eq!(a.imm(), -16);
        let r = AddrInfo::base(2).with_reg(7);
        assert_eq!(r.index_reg(), Some(7));
        assert_eq!(r.imm(), 0);
    }

    #[test]
    fn stack_pointer_depends_on_code() {
        let ext = Instruction::new(table::find("add_ext").expect("in table"))
            .with(0, Operand::reg(31))
            .with(2, Operand::reg(31));
        assert!(ext.operands[0].is_stack_pointer());
        assert!(!ext.operands[2].is_stack_pointer());
        assert!(!ext.operands[2].is_zero_register());

        let shift = Instruction::new(table::find("add_shift").expect("in table")).with(0, Operand::reg(31));
        assert!(shift.operands[0].is_zero_register());
        assert!(!shift.operands[0].is_stack_pointer());
    }
}
