//! Per-operand constraint checking.
//!
//! Once the qualifier matcher has resolved every operand's shape, each
//! operand is validated against the rules of its [`OperandClass`] and,
//! within the class, of its operand code: register windows, lane and list
//! shapes, ZA slice selection, addressing-mode write-back and offsets,
//! immediate encodability and system operands.
//!
//! The checks never mutate the instruction except for the qualifier
//! resolution performed by [`match_operands_constraint`] on success.

mod address;
mod immediate;
mod register;

use crate::error::OperandError;
use crate::inst::{Instruction, Operand, Shifter};
use crate::matcher::match_operands_qualifier;
use crate::names::Modifier;
use crate::opcode::InsnClass;
use crate::operand::OperandClass;

/// Check the tied operand, resolve the qualifiers and run every
/// per-operand check, stopping at the first failure.
///
/// Operands marked `skip` are not checked. On a qualifier mismatch the
/// operands are left untouched and the error carries the mismatch count
/// of the closest sequence.
pub fn match_operands_constraint(inst: &mut Instruction) -> Result<(), OperandError> {
    check_tied(inst)?;

    if let Err(mismatches) = match_operands_qualifier(inst) {
        tracing::debug!(opcode = inst.opcode.id, mismatches, "operand qualifiers rejected");
        return Err(OperandError::invalid_variant(mismatches));
    }

    for idx in 0..inst.num_operands() {
        if inst.operands[idx].skip {
            tracing::trace!(opcode = inst.opcode.id, idx, "skipping incomplete operand");
            continue;
        }
        if let Err(err) = check_operand(inst, idx) {
            tracing::debug!(opcode = inst.opcode.id, idx, error = %err, "operand constraint failed");
            return Err(err);
        }
    }
    Ok(())
}

/// Validate operand `idx` of `inst`, whose qualifiers must already be
/// resolved.
pub fn check_operand(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let Some(op) = inst.operands.get(idx) else {
        return Ok(());
    };
    match op.class() {
        OperandClass::IntReg => register::int_reg(inst, idx),
        OperandClass::ModifiedReg => register::modified_reg(inst, idx),
        OperandClass::SimdElement => register::simd_element(inst, idx),
        OperandClass::SimdReglist => register::simd_reglist(inst, idx),
        OperandClass::SveReg => register::sve_reg(inst, idx),
        OperandClass::SveReglist => register::sve_reglist(inst, idx),
        OperandClass::PredReg => register::pred_reg(inst, idx),
        OperandClass::ZaAccess => register::za_access(inst, idx),
        OperandClass::Cond => register::cond(inst, idx),
        OperandClass::Address => address::check(inst, idx),
        OperandClass::Immediate => immediate::check(inst, idx),
        OperandClass::System => immediate::system(inst, idx),
        OperandClass::Nil | OperandClass::FpReg | OperandClass::SimdReg => Ok(()),
    }
}

/// Operand 0 and the tied operand must name the same register (or list),
/// or for SME LDR/STR the same immediate offset.
fn check_tied(inst: &Instruction) -> Result<(), OperandError> {
    let i = inst.opcode.tied_operand;
    if i == 0 || i >= inst.num_operands() {
        return Ok(());
    }
    let first = &inst.operands[0];
    let tied = &inst.operands[i];

    match inst.opcode.iclass {
        InsnClass::SmeLdr | InsnClass::SmeStr => {
            if first.indexed_za().index.imm != tied.addr_info().imm() {
                return Err(OperandError::untied_immediates(i));
            }
        }
        _ => {
            let same = if first.class() == OperandClass::SveReglist {
                let (a, b) = (first.reglist(), tied.reglist());
                a.first_regno == b.first_regno && a.num_regs == b.num_regs && a.stride == b.stride
            } else {
                first.regno() == tied.regno()
            };
            if !same {
                tracing::trace!(opcode = inst.opcode.id, tied = i, "tied operand differs");
                return Err(OperandError::untied_operand(i));
            }
        }
    }
    Ok(())
}

/// The operator of `shifter`, with an unwritten `None` standing for
/// `default`.
pub(crate) fn operator_or(shifter: Shifter, default: Modifier) -> Modifier {
    if shifter.kind == Modifier::None && !shifter.operator_present {
        default
    } else {
        shifter.kind
    }
}

/// Element size of `op`'s qualifier, at least one so it can divide.
pub(crate) fn esize_of(op: &Operand) -> i64 {
    i64::from(op.qualifier.esize().max(1))
}

/// Operand `idx - back`, or an empty operand when out of range.
pub(crate) fn prev_operand(inst: &Instruction, idx: usize, back: usize) -> Operand {
    idx.checked_sub(back)
        .and_then(|i| inst.operands.get(i).copied())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::inst::{AddrInfo, IndexedZa, ZaIndex};
    use crate::qualifier::Qualifier;
    use crate::table::find;

    fn inst(id: &str) -> Instruction {
        Instruction::new(find(id).expect("in table"))
    }

    #[test]
    fn tied_register_must_match() {
        let mut bad = inst("add_sve_pred")
            .with(0, Operand::reg(5).qualified(Qualifier::SS))
            .with(1, Operand::reg(0).qualified(Qualifier::PM))
            .with(2, Operand::reg(6).qualified(Qualifier::SS))
            .with(3, Operand::reg(7).qualified(Qualifier::SS));
        let err = match_operands_constraint(&mut bad).expect_err("untied");
        assert_eq!(err.kind, ErrorKind::UntiedOperand);
        assert_eq!(err.index, Some(2));

        let mut good = bad.with(2, Operand::reg(5).qualified(Qualifier::SS));
        assert_eq!(match_operands_constraint(&mut good), Ok(()));
    }

    #[test]
    fn tied_lists_compare_shape() {
        let base = inst("add_sme2_x2")
            .with(0, Operand::list(2, 2, 1))
            .with(2, Operand::reg(3).qualified(Qualifier::SS));
        let mut same = base.with(1, Operand::list(2, 2, 1));
        assert_eq!(match_operands_constraint(&mut same), Ok(()));
        let mut other = base.with(1, Operand::list(4, 2, 1));
        assert_eq!(match_operands_constraint(&mut other).map_err(|e| e.kind), Err(ErrorKind::UntiedOperand));
    }

    #[test]
    fn sme_ldr_ties_immediates() {
        let za = IndexedZa {
            regno: 0,
            index: ZaIndex {
                regno: 13,
                imm: 3,
                countm1: 0,
            },
            group_size: 0,
            v: false,
        };
        let mut ok = inst("ldr_za")
            .with(0, Operand::za(za))
            .with(1, Operand::addr(AddrInfo::base(2).with_imm(3)));
        assert_eq!(match_operands_constraint(&mut ok), Ok(()));
        let mut bad = ok.with(1, Operand::addr(AddrInfo::base(2).with_imm(4)));
        let err = match_operands_constraint(&mut bad).expect_err("untied");
        assert_eq!(err.kind, ErrorKind::UntiedImmediates);
        assert_eq!(err.index, Some(1));
    }

    #[test]
    fn qualifier_failure_has_no_index() {
        let mut i = inst("add_ext")
            .with(0, Operand::reg(1).qualified(Qualifier::W))
            .with(1, Operand::reg(2).qualified(Qualifier::X))
            .with(2, Operand::reg(3).qualified(Qualifier::X));
        let err = match_operands_constraint(&mut i).expect_err("no sequence");
        assert_eq!(err.kind, ErrorKind::InvalidVariant { mismatches: 1 });
        assert_eq!(err.index, None);
    }

    #[test]
    fn skipped_operands_are_not_checked() {
        let base = inst("ubfm").with(0, Operand::reg(0)).with(1, Operand::reg(1)).with(3, Operand::imm(3));
        let mut bad = base.with(2, Operand::imm(40));
        assert!(match_operands_constraint(&mut bad).is_err());
        let mut skipped = base.with(2, Operand::imm(40).skipped());
        assert_eq!(match_operands_constraint(&mut skipped), Ok(()));
    }

    #[test]
    fn first_failure_wins() {
        let mut i = inst("ubfm")
            .with(0, Operand::reg(0))
            .with(1, Operand::reg(1))
            .with(2, Operand::imm(40))
            .with(3, Operand::imm(50));
        let err = match_operands_constraint(&mut i).expect_err("range");
        assert_eq!(err.index, Some(2));
    }

    #[test]
    fn unwritten_operator_defaults() {
        assert_eq!(operator_or(Shifter::default(), Modifier::Lsl), Modifier::Lsl);
        assert_eq!(operator_or(Shifter::bare(Modifier::Uxtw), Modifier::Lsl), Modifier::Uxtw);
        assert_eq!(operator_or(Shifter::bare(Modifier::None), Modifier::Lsl), Modifier::None);
    }
}
