//! Cross-instruction sequencing rules.
//!
//! A few instructions constrain the ones that follow them:
//!
//! - `movprfx` must be followed by a compatible SVE instruction that writes
//!   the prefixed register and, for the predicated form, merges under the
//!   same governing predicate.
//! - The memory copy/set prologue (`cpyfp`, `setp`, ...) must be followed
//!   by its main and epilogue parts, in order, naming the same registers.
//!
//! [`InsnSequence`] carries the open sequence from one call to the next. It
//! is owned by the caller; use one per linear pass over a section.

use crate::error::{ErrorKind, OperandError};
use crate::feature::{Feature, FeatureSet};
use crate::inst::Instruction;
use crate::opcode::{Constraints, MopsStage, OpcodeFlags};
use crate::operand::OperandCode;
use crate::qualifier::Qualifier;

const SVE_ANY: FeatureSet = FeatureSet::only(Feature::Sve).with(Feature::Sve2);

/// Instructions of the currently open dependency sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsnSequence {
    instrs: Vec<Instruction>,
    capacity: usize,
}

impl InsnSequence {
    /// No open sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any open sequence.
    pub fn reset(&mut self) {
        if self.is_open() {
            tracing::debug!(opener = self.instrs[0].opcode.id, seen = self.instrs.len(), "sequence reset");
        }
        self.instrs.clear();
        self.capacity = 0;
    }

    /// Whether a sequence is open.
    pub fn is_open(&self) -> bool {
        !self.instrs.is_empty()
    }

    /// The instruction that opened the current sequence.
    pub fn opener(&self) -> Option<&Instruction> {
        self.instrs.first()
    }

    /// Check `inst` against the open sequence and advance it.
    ///
    /// `pc` is the offset of `inst` within its section; when decoding
    /// (`encoding` false) an offset of zero starts a new section. Every
    /// error returned here is non-fatal.
    pub fn verify(&mut self, inst: &Instruction, pc: u64, encoding: bool) -> Result<(), OperandError> {
        let opcode = inst.opcode;
        if opcode.constraints.is_empty() && !self.is_open() {
            return Ok(());
        }

        if opcode.flags.contains(OpcodeFlags::SCAN) {
            let res = if self.is_open() {
                Err(syntax(None, "instruction opens new dependency sequence without ending previous one"))
            } else {
                Ok(())
            };
            self.open(inst);
            return res;
        }

        let is_new_section = !encoding && pc == 0;
        let mut res = Ok(());
        if let Err(err) = self.check_mops(inst, is_new_section) {
            if opcode.constraints.mops_stage() != Some(MopsStage::M) {
                self.reset();
            }
            res = Err(err);
        }

        let Some(first) = self.instrs.first().copied() else {
            return res;
        };

        if is_new_section && res.is_ok() {
            self.reset();
            return Err(syntax(None, "previous `movprfx' sequence not closed"));
        }

        if first.opcode.constraints.contains(Constraints::SCAN_MOVPRFX) {
            if let Err(err) = check_movprfx(&first, inst) {
                res = Err(err);
            }
        }

        if self.instrs.len() == self.capacity {
            tracing::debug!(opener = first.opcode.id, last = opcode.id, "sequence closed");
            self.reset();
        } else {
            self.instrs.push(*inst);
        }
        res
    }

    /// End of input: an open sequence is reported and dropped.
    pub fn finish(&mut self) -> Result<(), OperandError> {
        if !self.is_open() {
            return Ok(());
        }
        self.reset();
        Err(syntax(None, "previous `movprfx' sequence not closed"))
    }

    fn open(&mut self, inst: &Instruction) {
        self.instrs.clear();
        let constraints = inst.opcode.constraints;
        self.capacity = if constraints.mops_stage() == Some(MopsStage::P) {
            2
        } else if constraints.contains(Constraints::SCAN_MOVPRFX) {
            1
        } else {
            0
        };
        if self.capacity > 0 {
            tracing::debug!(opener = inst.opcode.id, capacity = self.capacity, "sequence opened");
            self.instrs.push(*inst);
        }
    }

    /// Memory copy/set parts must follow each other and agree on their
    /// address and size registers.
    fn check_mops(&self, inst: &Instruction, is_new_section: bool) -> Result<(), OperandError> {
        let opcode = inst.opcode;
        let prev = self.instrs.last();
        let follows = |p: &Instruction| opcode.prev().is_some_and(|o| o.is(p.opcode));

        if let Some(p) = prev {
            if p.opcode.constraints.mops_stage().is_some() && !follows(p) {
                let next = p.opcode.next().map_or("", |n| n.name);
                return Err(OperandError::new(
                    ErrorKind::ExpectedAAfterB {
                        a: next.into(),
                        b: p.opcode.name.into(),
                    },
                    None,
                )
                .non_fatal());
            }
        }

        if opcode.constraints.mops_stage().is_none() {
            return Ok(());
        }
        let Some(p) = prev.filter(|p| !is_new_section && follows(p)) else {
            return Err(OperandError::new(
                ErrorKind::AShouldFollowB {
                    a: opcode.name.into(),
                    b: opcode.prev().map_or("", |o| o.name).into(),
                },
                None,
            )
            .non_fatal());
        };

        // The data register of SET* may change between parts.
        for (i, code) in opcode.operands.iter().enumerate().take(3) {
            let msg = match code {
                OperandCode::MopsAddrRd => "destination register differs from preceding instruction",
                OperandCode::MopsAddrRs => "source register differs from preceding instruction",
                OperandCode::MopsWbRn => "size register differs from preceding instruction",
                _ => continue,
            };
            if p.operands[i].regno() != inst.operands[i].regno() {
                return Err(syntax(Some(i), msg));
            }
        }
        Ok(())
    }
}

fn syntax(index: Option<usize>, msg: &'static str) -> OperandError {
    OperandError::new(ErrorKind::Syntax { msg: Some(msg.into()) }, index).non_fatal()
}

/// Rules for the instruction following `movprfx`.
fn check_movprfx(prefix: &Instruction, inst: &Instruction) -> Result<(), OperandError> {
    let opcode = inst.opcode;
    if !opcode.features.has_any(SVE_ANY) {
        return Err(syntax(None, "SVE instruction expected after `movprfx'"));
    }
    if !opcode.constraints.contains(Constraints::SCAN_MOVPRFX) {
        return Err(syntax(None, "SVE `movprfx' compatible instruction expected"));
    }

    let blk_dest = prefix.operands[0];
    let blk_pred = (prefix.operands[1].code == OperandCode::SvePg3).then_some(prefix.operands[1]);

    let mut max_esize = 0;
    let mut uses = 0;
    let mut last_use = 0;
    let mut pred = None;
    for (i, op) in inst.operands.iter().enumerate().take(inst.num_operands()) {
        if op.code.is_movprfx_register() {
            if op.regno() == blk_dest.regno() {
                uses += 1;
                last_use = i;
            }
            max_esize = max_esize.max(op.qualifier.esize());
        } else if op.code.is_sve_predicate() {
            pred = Some((i, *op));
        }
    }

    let dest = inst.operands[0];
    let size = if opcode.constraints.contains(Constraints::MAX_ELEM) {
        max_esize
    } else {
        dest.qualifier.esize()
    };

    if let Some(blk_pred) = blk_pred {
        let Some((pi, p)) = pred else {
            return Err(syntax(None, "predicated instruction expected after `movprfx'"));
        };
        if p.qualifier != Qualifier::PM {
            return Err(syntax(Some(pi), "merging predicate expected due to preceding `movprfx'"));
        }
        if p.regno() != blk_pred.regno() {
            return Err(syntax(Some(pi), "predicate register differs from that in preceding `movprfx'"));
        }
    }

    let allowed = if opcode.is_destructive_by_operands() { 2 } else { 1 };
    if uses == 0 {
        return Err(syntax(Some(0), "output register of preceding `movprfx' not used in current instruction"));
    }
    if dest.regno() != blk_dest.regno() {
        return Err(syntax(Some(0), "output register of preceding `movprfx' expected as output"));
    }
    if uses > allowed {
        return Err(syntax(Some(last_use), "output register of preceding `movprfx' used as input"));
    }
    if dest.qualifier != Qualifier::Nil && blk_dest.qualifier != Qualifier::Nil && size != blk_dest.qualifier.esize() {
        return Err(syntax(Some(0), "register size not compatible with previous `movprfx'"));
    }
    Ok(())
}
