//! Qualifier-sequence matching.
//!
//! An opcode lists the qualifier sequences it accepts, in priority order.
//! Matching picks the first sequence that agrees with every operand whose
//! qualifier is already known, and reports the smallest number of
//! disagreeing operands when none does.

use crate::inst::{Instruction, Operand, MAX_OPERANDS};
use crate::opcode::{Opcode, QualifierSeq, MAX_QLF_SEQ};
use crate::qualifier::Qualifier;

/// Whether every slot of `seq` is `Nil`.
fn is_empty_sequence(seq: QualifierSeq) -> bool {
    seq.iter().all(|q| *q == Qualifier::Nil)
}

/// Whether `operand`, already qualified, may also be qualified by
/// `target`: `w`/`x` against `wsp`/`sp` when the register is the stack
/// pointer, and the reverse when the operand code admits SP.
pub fn operand_also_qualified(operand: &Operand, target: Qualifier) -> bool {
    match (operand.qualifier, target) {
        (Qualifier::W, Qualifier::Wsp) | (Qualifier::X, Qualifier::Sp) => operand.is_stack_pointer(),
        (Qualifier::Wsp, Qualifier::W) | (Qualifier::Sp, Qualifier::X) => operand.code.maybe_sp(),
        _ => false,
    }
}

/// Count the operands in `0..=stop_at` that `seq` does not accept.
fn count_mismatches(inst: &Instruction, seq: QualifierSeq, stop_at: usize) -> u32 {
    let strict = inst.opcode.is_strict();
    let mut invalid = 0;
    for (j, operand) in inst.operands.iter().enumerate().take(stop_at + 1) {
        let want = Opcode::seq_qualifier(seq, j);
        if operand.qualifier == Qualifier::Nil && !strict {
            // Deduced from the sequence; checked later.
            continue;
        }
        if operand.qualifier != want && !operand_also_qualified(operand, want) {
            invalid += 1;
        }
    }
    invalid
}

/// Find the first of `qualifiers` that matches the operands of `inst` up to
/// and including `stop_at` (all operands when `None` or out of range).
///
/// On success the returned array holds the sequence's qualifiers up to
/// `stop_at` and `Nil` beyond. On failure the error is the smallest number
/// of mismatching operands over all sequences tried.
pub fn find_best_match(
    inst: &Instruction,
    qualifiers: &[QualifierSeq],
    stop_at: Option<usize>,
) -> Result<[Qualifier; MAX_OPERANDS], u32> {
    let mut ret = [Qualifier::Nil; MAX_OPERANDS];
    let num_opnds = inst.num_operands();
    if num_opnds == 0 {
        tracing::trace!(opcode = inst.opcode.id, "no operands to match");
        return Ok(ret);
    }

    let stop_at = match stop_at {
        Some(i) if i < num_opnds => i,
        _ => num_opnds - 1,
    };

    let mut min_invalid = num_opnds as u32;
    let mut matched = None;
    for (i, seq) in qualifiers.iter().take(MAX_QLF_SEQ).enumerate() {
        // The first sequence is taken literally even when empty; later an
        // empty sequence ends the list.
        if i > 0 && is_empty_sequence(seq) {
            break;
        }
        let invalid = count_mismatches(inst, seq, stop_at);
        tracing::trace!(opcode = inst.opcode.id, seq = i, invalid, "qualifier sequence tried");
        min_invalid = min_invalid.min(invalid);
        if min_invalid == 0 {
            matched = Some(*seq);
            break;
        }
    }

    match matched {
        Some(seq) => {
            for (j, slot) in ret.iter_mut().enumerate().take(stop_at + 1) {
                *slot = Opcode::seq_qualifier(seq, j);
            }
            Ok(ret)
        }
        None => {
            tracing::debug!(opcode = inst.opcode.id, min_invalid, "no qualifier sequence matches");
            Err(min_invalid)
        }
    }
}

/// Match the operands of `inst` against its opcode's qualifier sequences.
pub fn match_qualifiers(inst: &Instruction, stop_at: Option<usize>) -> Result<[Qualifier; MAX_OPERANDS], u32> {
    find_best_match(inst, inst.opcode.qualifiers, stop_at)
}

/// Match all operands and, on success, store the resolved qualifiers into
/// `inst`. Operands are left untouched on failure.
pub fn match_operands_qualifier(inst: &mut Instruction) -> Result<(), u32> {
    let resolved = match_qualifiers(inst, None)?;
    let num = inst.num_operands();
    for (operand, qualifier) in inst.operands.iter_mut().zip(resolved).take(num) {
        if operand.qualifier != qualifier {
            tracing::trace!(from = %operand.qualifier, to = %qualifier, "qualifier resolved");
        }
        operand.qualifier = qualifier;
    }
    Ok(())
}

/// Given that operand `known_idx` has qualifier `known`, the qualifier the
/// sequence list implies for operand `idx`.
///
/// A `Nil` `known` means the list has a single sequence and its qualifier
/// is returned directly. `Nil` is returned when several sequences have
/// `known` at `known_idx`, or none does.
pub fn expected_qualifier(qualifiers: &[QualifierSeq], idx: usize, known: Qualifier, known_idx: usize) -> Qualifier {
    if known == Qualifier::Nil {
        return qualifiers
            .first()
            .map_or(Qualifier::Nil, |seq| Opcode::seq_qualifier(seq, idx));
    }

    let mut found = None;
    for seq in qualifiers.iter().take(MAX_QLF_SEQ) {
        if Opcode::seq_qualifier(seq, known_idx) == known {
            if found.is_some() {
                return Qualifier::Nil;
            }
            found = Some(*seq);
        }
    }
    found.map_or(Qualifier::Nil, |seq| Opcode::seq_qualifier(seq, idx))
}
