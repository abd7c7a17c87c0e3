//! Addressing-mode operands: write-back legality for the instruction
//! family, then the offset rules of each addressing form.

use super::{esize_of, operator_or, prev_operand};
use crate::error::OperandError;
use crate::inst::{Instruction, OperandValue};
use crate::names::Modifier;
use crate::opcode::InsnClass as IC;
use crate::operand::{OperandClass, OperandCode as O, OperandFlags};
use crate::range::{aligned, fits_signed_field, in_range, log2_size};

pub(super) fn check(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    check_writeback(inst, idx)?;
    check_offset(inst, idx)
}

fn check_writeback(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let addr = op.addr_info();
    let unexpected = || OperandError::syntax(idx, "unexpected address writeback");

    match inst.opcode.iclass {
        IC::LdstPos | IC::LdstUnscaled | IC::LdstnapairOffs | IC::LdstpairOff | IC::LdstUnpriv => {
            if addr.writeback {
                return Err(unexpected());
            }
        }
        IC::LdstImm10 => {
            if addr.writeback && !addr.preind {
                return Err(unexpected());
            }
        }
        IC::LdstImm9 | IC::LdstpairIndexed | IC::Asisdlsep | IC::Asisdlsop => {
            if !addr.writeback {
                return Err(OperandError::syntax(idx, "address writeback expected"));
            }
        }
        IC::Rcpc3 => {
            let bad = (op.code == O::Rcpc3AddrPreindWb && !addr.preind)
                || (op.code == O::Rcpc3AddrPostind && !addr.postind);
            if addr.writeback && bad {
                return Err(unexpected());
            }
        }
        _ => {}
    }
    Ok(())
}

/// Range and alignment check shared by the scaled immediate forms.
fn check_scaled(idx: usize, imm: i64, lo: i64, hi: i64, align: i64) -> Result<(), OperandError> {
    if !in_range(imm, lo, hi) {
        return Err(OperandError::offset_out_of_range(idx, lo, hi));
    }
    if !aligned(imm, align) {
        return Err(OperandError::unaligned(idx, align));
    }
    Ok(())
}

fn invalid_mode(idx: usize) -> OperandError {
    OperandError::other(Some(idx), "invalid addressing mode")
}

fn check_offset(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let desc = op.code.desc();
    let addr = op.addr_info();
    let imm = addr.imm();
    let size = esize_of(op);

    match op.code {
        O::AddrSimm7 => check_scaled(idx, imm, -64 * size, 63 * size, size),
        O::AddrOffset | O::AddrSimm9 => {
            if !in_range(imm, -256, 255) {
                return Err(OperandError::offset_out_of_range(idx, -256, 255));
            }
            Ok(())
        }
        O::AddrSimm9_2 => {
            // Only what the scaled form cannot express.
            if (in_range(imm, 0, 255) && !aligned(imm, size)) || in_range(imm, -256, -1) {
                Ok(())
            } else {
                Err(OperandError::other(Some(idx), "negative or unaligned offset expected"))
            }
        }
        O::AddrSimm10 => check_scaled(idx, imm, -4096, 4088, 8),
        O::AddrSimm11 => check_scaled(idx, imm, -1024, 1008, 16),
        O::AddrSimm13 => check_scaled(idx, imm, -4096, 4080, 16),
        O::AddrUimm12 => check_scaled(idx, imm, 0, 4095 * size, size),

        O::AddrRegoff => {
            let amount = op.shifter.amount;
            let scale = i64::from(log2_size(op.qualifier.esize().max(1)));
            if amount != 0 && amount != scale {
                return Err(OperandError::other(Some(idx), "invalid shift amount"));
            }
            match operator_or(op.shifter, Modifier::Lsl) {
                Modifier::Uxtw | Modifier::Lsl | Modifier::Sxtw | Modifier::Sxtx => Ok(()),
                _ => Err(OperandError::other(Some(idx), "invalid extend/shift operator")),
            }
        }

        O::SimdAddrPost => check_simd_post(inst, idx),

        O::AddrPcrel14 | O::AddrPcrel19 | O::AddrPcrel21 | O::AddrPcrel26 => {
            let mut value = match op.value {
                OperandValue::Imm(i) => i.value,
                _ => imm,
            };
            if desc.flags.contains(OperandFlags::SHIFT_BY_2) {
                // Branch targets are word aligned and encoded without the
                // low two bits.
                if !aligned(value, 4) {
                    return Err(OperandError::unaligned(idx, 4));
                }
                value >>= 2;
            }
            if !fits_signed_field(value, desc.width()) {
                return Err(OperandError::other(Some(idx), "immediate out of range"));
            }
            Ok(())
        }

        O::Rcpc3AddrOptPreindWb | O::Rcpc3AddrOptPostind | O::Rcpc3AddrPreindWb | O::Rcpc3AddrPostind => {
            let num_bytes = transfer_size(inst);
            let magnitude = if matches!(op.code, O::Rcpc3AddrOptPreindWb | O::Rcpc3AddrPreindWb) {
                -imm
            } else {
                imm
            };
            if num_bytes != magnitude && imm != 0 {
                return Err(OperandError::other(Some(idx), "invalid increment amount"));
            }
            Ok(())
        }
        O::Rcpc3AddrOffset => {
            if !in_range(imm, -256, 255) {
                return Err(OperandError::imm_out_of_range(idx, -256, 255));
            }
            Ok(())
        }

        O::SmeAddrRiU4xVl => {
            if !in_range(imm, 0, 15) {
                return Err(OperandError::offset_out_of_range(idx, 0, 15));
            }
            Ok(())
        }

        O::SveAddrRiS4xVl | O::SveAddrRiS4x2xVl | O::SveAddrRiS4x3xVl | O::SveAddrRiS4x4xVl => {
            check_mul_vl(inst, idx, -8, 7)
        }
        O::SveAddrRiS6xVl => check_mul_vl(inst, idx, -32, 31),
        O::SveAddrRiS9xVl => check_mul_vl(inst, idx, -256, 255),

        O::SveAddrRiU6 | O::SveAddrRiU6x2 | O::SveAddrRiU6x4 | O::SveAddrRiU6x8 => {
            check_plain_imm(inst, idx, 0, 63)
        }
        O::SveAddrRiS4x16 | O::SveAddrRiS4x32 => check_plain_imm(inst, idx, -8, 7),
        O::SveAddrZiU5 | O::SveAddrZiU5x2 | O::SveAddrZiU5x4 | O::SveAddrZiU5x8 => {
            check_plain_imm(inst, idx, 0, 31)
        }

        O::SveAddrR
        | O::SveAddrRr
        | O::SveAddrRrLsl1
        | O::SveAddrRrLsl2
        | O::SveAddrRrLsl3
        | O::SveAddrRrLsl4
        | O::SveAddrRx
        | O::SveAddrRxLsl1
        | O::SveAddrRxLsl2
        | O::SveAddrRxLsl3
        | O::SveAddrRz
        | O::SveAddrRzLsl1
        | O::SveAddrRzLsl2
        | O::SveAddrRzLsl3 => check_reg_offset(inst, idx, &[Modifier::Lsl]),
        O::SveAddrRzXtw14
        | O::SveAddrRzXtw22
        | O::SveAddrRzXtw1_14
        | O::SveAddrRzXtw1_22
        | O::SveAddrRzXtw2_14
        | O::SveAddrRzXtw2_22
        | O::SveAddrRzXtw3_14
        | O::SveAddrRzXtw3_22 => check_reg_offset(inst, idx, &[Modifier::Sxtw, Modifier::Uxtw]),

        O::SveAddrZzLsl => check_vector_offset(inst, idx, Modifier::Lsl),
        O::SveAddrZzSxtw => check_vector_offset(inst, idx, Modifier::Sxtw),
        O::SveAddrZzUxtw => check_vector_offset(inst, idx, Modifier::Uxtw),

        _ => Ok(()),
    }
}

/// The post-index immediate of a structure load/store must equal the
/// number of bytes transferred; a register offset may be any of x0-x30.
fn check_simd_post(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let addr = inst.operands[idx].addr_info();
    if let Some(reg) = addr.index_reg() {
        if reg <= 30 {
            return Ok(());
        }
        return Err(OperandError::other(Some(idx), "invalid register offset"));
    }

    let prev = prev_operand(inst, idx, 1);
    let list = prev.reglist();
    let esize = i64::from(prev.qualifier.esize());
    let num_bytes = if inst.opcode.operands.first() == Some(&O::LVtAl) {
        // Replicating loads read one structure.
        let regs = if inst.opcode.od == 1 { 1 } else { i64::from(list.num_regs) };
        regs * esize
    } else {
        i64::from(list.num_regs) * esize * i64::from(prev.qualifier.nelem())
    };
    if num_bytes != addr.imm() {
        return Err(OperandError::other(Some(idx), "invalid post-increment amount"));
    }
    Ok(())
}

/// Bytes moved by an RCPC3 access: the element sizes of the register
/// operands before the address.
fn transfer_size(inst: &Instruction) -> i64 {
    inst.operands
        .iter()
        .take(inst.num_operands())
        .take_while(|op| op.class() != OperandClass::Address)
        .map(|op| i64::from(op.qualifier.esize()))
        .sum()
}

/// `[Xn{, #imm, mul vl}]`: the immediate counts whole transfers, so it
/// must be a multiple of the register count.
fn check_mul_vl(inst: &Instruction, idx: usize, min: i64, max: i64) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let imm = op.addr_info().imm();
    let num = 1 + i64::from(op.code.desc().data);
    let shifter = op.shifter;
    if (imm != 0 && !shifter.operator_present) || (shifter.operator_present && shifter.kind != Modifier::MulVl) {
        return Err(invalid_mode(idx));
    }
    check_scaled(idx, imm, min * num, max * num, num)
}

/// `[Xn{, #imm}]` and `[Zn.T{, #imm}]` scaled by a power of two, with no
/// operator allowed.
fn check_plain_imm(inst: &Instruction, idx: usize, min: i64, max: i64) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let num = 1i64 << op.code.desc().data;
    if op.shifter.operator_present || op.shifter.amount_present {
        return Err(invalid_mode(idx));
    }
    check_scaled(idx, op.addr_info().imm(), min * num, max * num, num)
}

/// `[Xn, Xm/Zm{, op #amount}]` where the amount is fixed by the form.
fn check_reg_offset(inst: &Instruction, idx: usize, allowed: &[Modifier]) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let desc = op.code.desc();
    if desc.flags.contains(OperandFlags::NO_ZR) && op.addr_info().index_reg() == Some(31) {
        return Err(OperandError::other(Some(idx), "index register xzr is not allowed"));
    }
    let kind = operator_or(op.shifter, Modifier::Lsl);
    if !allowed.contains(&kind) || op.shifter.amount != i64::from(desc.data) {
        return Err(invalid_mode(idx));
    }
    Ok(())
}

/// `[Zn.T, Zm.T{, op #amount}]` with an amount of 0 to 3.
fn check_vector_offset(inst: &Instruction, idx: usize, allowed: Modifier) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let kind = operator_or(op.shifter, Modifier::Lsl);
    if kind != allowed || !in_range(op.shifter.amount, 0, 3) {
        return Err(invalid_mode(idx));
    }
    Ok(())
}
