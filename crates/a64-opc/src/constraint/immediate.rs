//! Immediate and system operands.

use super::{esize_of, operator_or, prev_operand};
use crate::error::OperandError;
use crate::immediate::{is_logical_immediate, shrink_expanded_imm8, sve_dupm_mov_immediate, wide_constant};
use crate::inst::{Instruction, OperandValue};
use crate::names::{pstate_field, Modifier, PRFOP_REGOFF_LIMIT};
use crate::opcode::{InsnClass, OpKind};
use crate::operand::OperandCode as O;
use crate::qualifier::Qualifier;
use crate::range::{aligned, fits_signed_field, fits_unsigned_field, in_range};

fn other(idx: usize, msg: &'static str) -> OperandError {
    OperandError::other(Some(idx), msg)
}

fn out_of_range(idx: usize) -> OperandError {
    other(idx, "immediate out of range")
}

/// `[lo, hi]` check reported as an immediate range error.
fn check_range(idx: usize, value: i64, lo: i64, hi: i64) -> Result<(), OperandError> {
    if in_range(value, lo, hi) {
        Ok(())
    } else {
        Err(OperandError::imm_out_of_range(idx, lo, hi))
    }
}

pub(super) fn check(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let imm = op.imm_value();
    let first = &inst.operands[0];

    if let Some((lo, hi)) = op.qualifier.bounds() {
        check_range(idx, imm, lo, hi)?;
    }

    match op.code {
        O::Aimm => {
            if operator_or(op.shifter, Modifier::Lsl) != Modifier::Lsl {
                return Err(other(idx, "invalid shift operator"));
            }
            if op.shifter.amount != 0 && op.shifter.amount != 12 {
                return Err(other(idx, "shift amount must be 0 or 12"));
            }
            if !fits_unsigned_field(imm, 12) {
                return Err(out_of_range(idx));
            }
        }

        O::Half => {
            if operator_or(op.shifter, Modifier::Lsl) != Modifier::Lsl {
                return Err(other(idx, "invalid shift operator"));
            }
            let amount = op.shifter.amount;
            let top = esize_of(first) * 8 - 16;
            if !aligned(amount, 16) {
                return Err(other(idx, "shift amount must be a multiple of 16"));
            }
            if !in_range(amount, 0, top) {
                return Err(OperandError::shift_out_of_range(idx, 0, top));
            }
            if imm < 0 {
                return Err(other(idx, "negative immediate value not allowed"));
            }
            if !fits_unsigned_field(imm, 16) {
                return Err(out_of_range(idx));
            }
        }

        O::ImmMov => {
            let esize = first.qualifier.esize();
            let ok = match inst.opcode.op {
                OpKind::MovImmWiden => wide_constant(!imm as u64, esize == 4).is_some(),
                OpKind::MovImmWide => wide_constant(imm as u64, esize == 4).is_some(),
                OpKind::MovImmLog => is_logical_immediate(imm as u64, esize),
                _ => true,
            };
            if !ok {
                return Err(out_of_range(idx));
            }
        }

        O::Nzcv
        | O::CcmpImm
        | O::Exception
        | O::Undefined
        | O::TmeUimm16
        | O::Uimm4
        | O::Uimm4Addg
        | O::Uimm7
        | O::Uimm3Op1
        | O::Uimm3Op2
        | O::SveUimm3
        | O::SveUimm7
        | O::SveUimm8
        | O::SveUimm8_53
        | O::CsscUimm8 => {
            let width = op.code.desc().width();
            if !fits_unsigned_field(imm, width) {
                return Err(OperandError::imm_out_of_range(idx, 0, (1i64 << width) - 1));
            }
        }

        O::Uimm10 => {
            check_range(idx, imm, 0, 1008)?;
            if !aligned(imm, 16) {
                return Err(OperandError::unaligned(idx, 16));
            }
        }

        O::Simm5 | O::SveSimm5 | O::SveSimm5b | O::SveSimm6 | O::SveSimm8 | O::CsscSimm8 => {
            let width = op.code.desc().width();
            if !fits_signed_field(imm, width) {
                let half = 1i64 << (width - 1);
                return Err(OperandError::imm_out_of_range(idx, -half, half - 1));
            }
        }

        O::Width => {
            // lsb + width may not run past the register.
            let lsb = prev_operand(inst, idx, 1).imm_value();
            let size = op.qualifier.upper_bound();
            if imm + lsb > size {
                return Err(OperandError::imm_out_of_range(idx, 1, size - lsb));
            }
        }

        O::Limm | O::SveLimm => {
            let value = if inst.opcode.op == OpKind::Bic { !imm } else { imm };
            if !is_logical_immediate(value as u64, first.qualifier.esize()) {
                return Err(out_of_range(idx));
            }
        }

        O::Imm0 | O::FpImm0 => {
            if imm != 0 {
                return Err(other(idx, "immediate zero expected"));
            }
        }

        O::ImmRot1 | O::ImmRot2 | O::SveImmRot2 => {
            if !matches!(imm, 0 | 90 | 180 | 270) {
                return Err(other(idx, "rotate expected to be 0, 90, 180 or 270"));
            }
        }
        O::ImmRot3 | O::SveImmRot1 | O::SveImmRot3 => {
            if !matches!(imm, 90 | 270) {
                return Err(other(idx, "rotate expected to be 90 or 270"));
            }
        }

        O::ShllImm => {
            let size = 8 * i64::from(prev_operand(inst, idx, 1).qualifier.esize());
            if imm != size {
                return Err(other(idx, "invalid shift amount"));
            }
        }

        O::ImmVlsl => {
            let bits = 8 * shift_esize(inst, idx);
            check_range(idx, imm, 0, bits - 1)?;
        }
        O::ImmVlsr => {
            let bits = 8 * shift_esize(inst, idx);
            check_range(idx, imm, 1, bits)?;
        }

        O::SimdImm | O::SimdImmSft => check_simd_imm(inst, idx)?,

        O::FpImm | O::SimdFpImm | O::SveFpImm8 => {
            if !op.is_fp_imm() {
                return Err(other(idx, "floating-point immediate expected"));
            }
            // abcdefgh: sign, 3-bit exponent, 4-bit fraction.
            if !in_range(imm, 0, 255) {
                return Err(out_of_range(idx));
            }
            if op.shifter.kind != Modifier::None {
                return Err(other(idx, "invalid shift operator"));
            }
        }

        O::SveAimm => check_sve_arith(inst, idx, 0)?,
        O::SveAsimm => check_sve_arith(inst, idx, -128)?,

        O::SveI1HalfOne => {
            if imm != 0x3f00_0000 && imm != 0x3f80_0000 {
                return Err(other(idx, "floating-point value must be 0.5 or 1.0"));
            }
        }
        O::SveI1HalfTwo => {
            if imm != 0x3f00_0000 && imm != 0x4000_0000 {
                return Err(other(idx, "floating-point value must be 0.5 or 2.0"));
            }
        }
        O::SveI1ZeroOne => {
            if imm != 0 && imm != 0x3f80_0000 {
                return Err(other(idx, "floating-point value must be 0.0 or 1.0"));
            }
        }

        O::SveInvLimm => {
            if !is_logical_immediate(!imm as u64, first.qualifier.esize()) {
                return Err(out_of_range(idx));
            }
        }
        O::SveLimmMov => {
            let esize = first.qualifier.esize();
            if !is_logical_immediate(imm as u64, esize) {
                return Err(out_of_range(idx));
            }
            if !sve_dupm_mov_immediate(imm as u64, esize) {
                return Err(other(idx, "invalid replicated MOV immediate"));
            }
        }

        O::SvePatternScaled => {
            // `mul #1` is implied when nothing is written.
            let amount = if op.shifter.amount_present { op.shifter.amount } else { 1 };
            if !in_range(amount, 1, 16) {
                return Err(OperandError::multiplier_out_of_range(idx, 1, 16));
            }
        }

        O::SveShlimmPred | O::SveShlimmUnpred | O::SveShlimmUnpred22 => {
            let bits = 8 * i64::from(prev_operand(inst, idx, 1).qualifier.esize());
            check_range(idx, imm, 0, bits - 1)?;
        }

        O::SmeShrimm4 => {
            let size = 1i64 << op.code.desc().width();
            check_range(idx, imm, 1, size)?;
        }
        O::SmeShrimm5 | O::SveShrimmPred | O::SveShrimmUnpred | O::SveShrimmUnpred22 => {
            let back = if op.code == O::SveShrimmUnpred22 { 2 } else { 1 };
            let bits = 8 * i64::from(prev_operand(inst, idx, back).qualifier.esize());
            check_range(idx, imm, 1, bits)?;
        }

        O::SmeZt0Index => {
            if !in_range(imm, 0, 56) {
                return Err(OperandError::elem_out_of_range(idx, 0, 56));
            }
            if imm % 8 != 0 {
                return Err(other(idx, "byte index must be a multiple of 8"));
            }
        }

        _ => {}
    }
    Ok(())
}

/// Element size governing a vector shift immediate: its own qualifier when
/// it names an arrangement, else the source register's.
fn shift_esize(inst: &Instruction, idx: usize) -> i64 {
    let own = inst.operands[idx].qualifier.esize();
    if own != 0 {
        return i64::from(own);
    }
    i64::from(prev_operand(inst, idx, 1).qualifier.esize())
}

/// MOVI/MVNI/ORR/BIC (vector, immediate): the operator must match the
/// variant, the value must be an 8-bit pattern and the shift must be
/// encodable.
fn check_simd_imm(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let imm = op.imm_value();
    let kind = match op.qualifier {
        Qualifier::Lsl => {
            let kind = operator_or(op.shifter, Modifier::Lsl);
            if kind != Modifier::Lsl {
                return Err(other(idx, "invalid shift operator"));
            }
            kind
        }
        Qualifier::Msl => {
            let kind = operator_or(op.shifter, Modifier::Msl);
            if kind != Modifier::Msl {
                return Err(other(idx, "invalid shift operator"));
            }
            kind
        }
        _ => {
            if op.shifter.kind != Modifier::None {
                return Err(other(idx, "shift is not permitted"));
            }
            Modifier::None
        }
    };

    let esize = inst.operands[0].qualifier.esize();
    if esize != 8 {
        check_range(idx, imm, -128, 255)?;
    } else if shrink_expanded_imm8(imm as u64).is_none() {
        // 64-bit forms take a byte mask: every byte 0x00 or 0xff.
        return Err(other(idx, "invalid value for immediate"));
    }

    let amount = op.shifter.amount;
    match kind {
        Modifier::Lsl => {
            let top = (i64::from(esize) - 1) * 8;
            if !in_range(amount, 0, top) {
                return Err(OperandError::shift_out_of_range(idx, 0, top));
            }
            if !aligned(amount, 8) {
                return Err(OperandError::unaligned(idx, 8));
            }
        }
        Modifier::Msl => {
            if amount != 8 && amount != 16 {
                return Err(other(idx, "shift amount must be 0 or 16"));
            }
        }
        _ => {}
    }
    Ok(())
}

/// SVE ADD/SUB/MOV (immediate): an 8-bit value optionally shifted left by
/// eight, with `min` the lowest value the 8-bit field denotes.
fn check_sve_arith(inst: &Instruction, idx: usize, min: i64) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let size = inst.operands[0].qualifier.esize();
    let mut mask = if size >= 8 { u64::MAX } else { (1u64 << (size * 8)) - 1 };
    let mut value = op.imm_value() as u64;
    let mut shift = op.shifter.amount;

    if size == 1 {
        if shift != 0 {
            return Err(other(idx, "no shift amount allowed for 8-bit constants"));
        }
    } else {
        if shift != 0 && shift != 8 {
            return Err(other(idx, "shift amount must be 0 or 8"));
        }
        if shift == 0 && value & 0xff == 0 {
            shift = 8;
            value = ((value as i64) / 256) as u64;
        }
    }

    mask >>= shift;
    if value & mask != value && value | !mask != value {
        return Err(other(idx, "immediate too big for element size"));
    }
    if value.wrapping_sub(min as u64) & mask > 0xff {
        return Err(other(idx, "invalid arithmetic immediate"));
    }
    Ok(())
}

pub(super) fn system(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    match (op.code, op.value) {
        (O::Pstatefield, OperandValue::Pstate { value, crm }) => {
            let Some(field) = pstate_field(value, crm) else {
                return Err(other(idx, "unknown PSTATE field"));
            };
            let imm = inst.operands.get(idx + 1).map_or(0, |op| op.imm_value());
            if !in_range(imm, 0, field.max) {
                tracing::trace!(field = field.name, imm, "PSTATE immediate rejected");
                return Err(OperandError::imm_out_of_range(idx + 1, 0, field.max));
            }
        }
        (O::Prfop, OperandValue::Prfop(prfop)) => {
            if inst.opcode.iclass == InsnClass::LdstRegoff && i64::from(prfop) >= PRFOP_REGOFF_LIMIT {
                return Err(other(
                    idx,
                    "the register-index form of PRFM does not accept opcodes in the range 24-31",
                ));
            }
        }
        _ => {}
    }
    Ok(())
}
