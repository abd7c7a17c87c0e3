//! Register-shaped operand classes: integer, modified, lane, list,
//! predicate and ZA operands, plus condition codes.

use super::{esize_of, operator_or};
use crate::error::OperandError;
use crate::inst::{Instruction, OperandValue};
use crate::names::Modifier;
use crate::opcode::{InsnClass, OpKind};
use crate::operand::OperandCode as O;
use crate::qualifier::Qualifier;
use crate::range::in_range;

// ── Shared shape checks ──────────────────────────────────────────────────

/// Register number in `[min, max]`, lane index in `[imin, imax]`.
fn check_reglane(
    inst: &Instruction,
    idx: usize,
    prefix: &'static str,
    (min, max): (i64, i64),
    (imin, imax): (i64, i64),
) -> Result<(), OperandError> {
    let lane = inst.operands[idx].reglane();
    if !in_range(i64::from(lane.regno), min, max) {
        return Err(OperandError::invalid_register(idx, prefix, min, max));
    }
    if !in_range(lane.index, imin, imax) {
        return Err(OperandError::elem_out_of_range(idx, imin, imax));
    }
    Ok(())
}

/// Exactly `num` registers spaced by `stride`.
fn check_reglist(inst: &Instruction, idx: usize, num: u32, stride: u32) -> Result<(), OperandError> {
    let list = inst.operands[idx].reglist();
    if list.num_regs != num {
        return Err(OperandError::reg_list_length(idx, num));
    }
    if list.stride != stride {
        return Err(OperandError::reg_list_stride(idx, stride));
    }
    Ok(())
}

/// A ZA access selected by `w<min_wreg>`..`w<min_wreg+3>`, starting at a
/// multiple of `range_size` no greater than `max_value * range_size`,
/// covering `range_size` offsets, with an optional `vgx<group_size>`.
pub(super) fn check_za_access(
    inst: &Instruction,
    idx: usize,
    min_wreg: u32,
    max_value: i64,
    range_size: u32,
    group_size: u32,
) -> Result<(), OperandError> {
    let za = inst.operands[idx].indexed_za();

    if !(min_wreg..=min_wreg + 3).contains(&za.index.regno) {
        let msg = if min_wreg == 12 {
            "expected a selection register in the range w12-w15"
        } else {
            "expected a selection register in the range w8-w11"
        };
        return Err(OperandError::other(Some(idx), msg));
    }

    let range = i64::from(range_size.max(1));
    let max_index = max_value * range;
    if !in_range(za.index.imm, 0, max_index) {
        return Err(OperandError::offset_out_of_range(idx, 0, max_index));
    }

    if za.index.imm % range != 0 {
        let msg = if range == 2 {
            "starting offset is not a multiple of 2"
        } else {
            "starting offset is not a multiple of 4"
        };
        return Err(OperandError::other(Some(idx), msg));
    }

    if i64::from(za.index.countm1) != range - 1 {
        let msg = match range {
            1 => "expected a single offset rather than a range",
            2 => "expected a range of two offsets",
            _ => "expected a range of four offsets",
        };
        return Err(OperandError::other(Some(idx), msg));
    }

    // The vector group suffix may be omitted.
    if za.group_size != 0 && za.group_size != group_size {
        return Err(OperandError::invalid_vg_size(idx, group_size));
    }
    Ok(())
}

// ── Integer registers ────────────────────────────────────────────────────

pub(super) fn int_reg(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    match op.code {
        O::PairReg | O::PairRegOrXzr => check_pair(inst, idx)?,
        O::RtSys => check_rt_sys(inst, idx)?,
        _ => {}
    }

    if matches!(op.qualifier, Qualifier::Wsp | Qualifier::Sp) && !op.is_stack_pointer() {
        return Err(OperandError::other(Some(idx), "stack pointer register expected"));
    }
    Ok(())
}

/// The second register of a pair follows an even first register, or both
/// are ZR for the forms that allow it.
fn check_pair(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let Some(first_idx) = idx.checked_sub(1) else {
        return Ok(());
    };
    let first = inst.operands[first_idx].regno();
    let second = inst.operands[idx].regno();

    if inst.operands[idx].code == O::PairRegOrXzr && first == 31 {
        if second != 31 {
            return Err(OperandError::syntax(
                first_idx,
                "second reg in pair should be xzr if first is xzr",
            ));
        }
        return Ok(());
    }

    if first % 2 != 0 {
        return Err(OperandError::syntax(first_idx, "reg pair must start from even reg"));
    }
    if second != first + 1 {
        return Err(OperandError::syntax(idx, "reg pair must be contiguous"));
    }
    Ok(())
}

/// `Xt` of IC/DC/AT/TLBI must be given exactly when the operation takes one.
fn check_rt_sys(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let OperandValue::SysIns { kind, value } = inst.operands[0].value else {
        return Ok(());
    };
    let has_xt = kind.lookup(value).is_some_and(|op| op.has_xt);
    let present = inst.operands[idx].present;
    if present && !has_xt {
        return Err(OperandError::other(Some(idx), "extraneous register"));
    }
    if !present && has_xt {
        return Err(OperandError::other(Some(idx), "missing register"));
    }
    Ok(())
}

// ── Shifted and extended registers ───────────────────────────────────────

pub(super) fn modified_reg(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let kind = operator_or(op.shifter, Modifier::Lsl);
    let amount = op.shifter.amount;

    match op.code {
        O::RmExt => {
            if !kind.is_extend() && kind != Modifier::Lsl {
                return Err(OperandError::other(Some(idx), "extend operator expected"));
            }
            // LSL, written or implied, is only valid next to SP.
            let beside_sp = inst.operands[0].is_stack_pointer()
                || (idx == 2 && inst.operands[1].is_stack_pointer());
            if !beside_sp {
                if !op.shifter.operator_present {
                    return Err(OperandError::other(Some(idx), "missing extend operator"));
                }
                if kind == Modifier::Lsl {
                    return Err(OperandError::other(Some(idx), "'LSL' operator not allowed"));
                }
            }
            if !in_range(amount, 0, 4) {
                return Err(OperandError::shift_out_of_range(idx, 0, 4));
            }
            if op.qualifier == Qualifier::X && !matches!(kind, Modifier::Lsl | Modifier::Uxtx | Modifier::Sxtx) {
                return Err(OperandError::other(Some(idx), "W register expected"));
            }
        }
        O::RmSft => {
            if !kind.is_shift() {
                return Err(OperandError::other(Some(idx), "shift operator expected"));
            }
            if kind == Modifier::Ror && inst.opcode.iclass != InsnClass::LogShift {
                return Err(OperandError::other(Some(idx), "'ROR' operator not allowed"));
            }
            let max = if op.qualifier == Qualifier::W { 31 } else { 63 };
            if !in_range(amount, 0, max) {
                return Err(OperandError::shift_out_of_range(idx, 0, max));
            }
        }
        _ => {}
    }
    Ok(())
}

// ── AdvSIMD lanes and lists ──────────────────────────────────────────────

pub(super) fn simd_element(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let first = &inst.operands[0];
    let bytes = if inst.opcode.op == OpKind::FcmlaElem {
        // Complex pairs halve the usable index range.
        i64::from(first.qualifier.nelem() * first.qualifier.esize()) / 2
    } else {
        16
    };
    let max = bytes / esize_of(op) - 1;
    let lane = op.reglane();
    if !in_range(lane.index, 0, max) {
        return Err(OperandError::elem_out_of_range(idx, 0, max));
    }
    if op.code == O::Em16 && op.qualifier == Qualifier::SH && lane.regno > 15 {
        return Err(OperandError::regno_out_of_range(idx, 0, 15));
    }
    Ok(())
}

pub(super) fn simd_reglist(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let list = op.reglist();

    if op.code == O::LEt {
        let max = 16 / esize_of(op) - 1;
        let index = list.index.unwrap_or(0);
        if !in_range(index, 0, max) {
            return Err(OperandError::elem_out_of_range(idx, 0, max));
        }
    }

    // Structure element count of the load/store.
    let num = inst.opcode.od;
    match op.code {
        // LD1/ST1 take one to four registers.
        O::LVt if num != 1 => check_reglist(inst, idx, num, 1)?,
        O::LVtAl | O::LEt => check_reglist(inst, idx, num, 1)?,
        _ => {}
    }

    if list.stride != 1 {
        return Err(OperandError::reg_list_stride(idx, 1));
    }
    Ok(())
}

// ── SVE and SME vector registers ─────────────────────────────────────────

pub(super) fn sve_reg(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let desc = op.code.desc();
    let width = desc.width();

    match op.code {
        O::SveZm3Index | O::SveZm3_22Index | O::SveZm3_11Index | O::SveZm4_11Index | O::SveZm4Index => {
            let regbits = desc.data;
            check_reglane(
                inst,
                idx,
                "z",
                (0, (1i64 << regbits) - 1),
                (0, (1i64 << width.saturating_sub(regbits)) - 1),
            )
        }
        O::SveZnIndex => check_reglane(inst, idx, "z", (0, 31), (0, 64 / esize_of(op) - 1)),
        O::SveZn5Index => check_reglane(inst, idx, "z", (0, 31), (0, 16 / esize_of(op) - 1)),
        O::SveZmImm4 => check_reglane(inst, idx, "z", (0, 31), (0, 15)),
        O::SmePNn3Index1 | O::SmePNn3Index2 => {
            let bits = desc.field_width(1);
            check_reglane(inst, idx, "pn", (8, 15), (0, (1i64 << bits) - 1))
        }
        O::SmeZnIndex1_16 | O::SmeZnIndex2_15 | O::SmeZnIndex3_14 => {
            let bits = width.saturating_sub(5);
            check_reglane(inst, idx, "z", (0, 31), (0, (1i64 << bits) - 1))
        }
        O::SmeZmIndex1 | O::SmeZmIndex2 | O::SmeZmIndex3_10 | O::SmeZmIndex4_10 => {
            let bits = width.saturating_sub(4);
            check_reglane(inst, idx, "z", (0, 15), (0, (1i64 << bits) - 1))
        }
        O::SmeZm => {
            if op.regno() > 15 {
                return Err(OperandError::invalid_register(idx, "z", 0, 15));
            }
            Ok(())
        }
        O::SmePnTWmImm => check_za_access(inst, idx, 12, 16 / esize_of(op) - 1, 1, 0),
        _ => Ok(()),
    }
}

pub(super) fn sve_reglist(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let data = op.code.desc().data;

    match op.code {
        O::SmePdx2
        | O::SmeZdnx2
        | O::SmeZdnx4
        | O::SmeZmx2
        | O::SmeZmx4
        | O::SmeZnx2
        | O::SmeZnx4
        | O::SmeZt2
        | O::SmeZt3
        | O::SmeZt4 => {
            check_reglist(inst, idx, data, 1)?;
            if op.reglist().first_regno % data != 0 {
                return Err(OperandError::other(Some(idx), "start register out of range"));
            }
        }
        O::SmeZtx2Strided | O::SmeZtx4Strided => {
            check_reglist(inst, idx, data, 16 / data)?;
            let list = op.reglist();
            let allowed = 16 | (list.stride - 1);
            if list.first_regno & !allowed != 0 {
                return Err(OperandError::other(Some(idx), "start register out of range"));
            }
        }
        O::SmePdxN | O::SveZnxN | O::SveZtxN => check_reglist(inst, idx, inst.opcode.od, 1)?,
        _ => {}
    }
    Ok(())
}

// ── Predicates ───────────────────────────────────────────────────────────

pub(super) fn pred_reg(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    match op.code {
        O::SmePNd3 | O::SmePNg3 => {
            if op.regno() < 8 {
                return Err(OperandError::invalid_register(idx, "pn", 8, 15));
            }
        }
        _ => {
            if op.regno() >= 8 && op.code.desc().width() == 3 {
                return Err(OperandError::invalid_register(idx, "p", 0, 7));
            }
        }
    }
    Ok(())
}

// ── ZA storage ───────────────────────────────────────────────────────────

pub(super) fn za_access(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    let od = inst.opcode.od;
    let esize = esize_of(op);

    match op.code {
        O::SmeZaHvIdxSrc | O::SmeZaHvIdxDest | O::SmeZaHvIdxLdstr => {
            check_za_access(inst, idx, 12, 16 / esize - 1, 1, od)
        }
        O::SmeZaHvIdxSrcxN | O::SmeZaHvIdxDestxN => {
            let num = od.max(1);
            let mut max = 16 / i64::from(num) / esize;
            if max > 0 {
                max -= 1;
            }
            check_za_access(inst, idx, 12, max, num, 0)
        }
        O::SmeZaArrayOff4 => check_za_access(inst, idx, 12, 15, 1, od),
        O::SmeZaArrayOff3_0 | O::SmeZaArrayOff3_5 => check_za_access(inst, idx, 8, 7, 1, od),
        O::SmeZaArrayOff1x4 => check_za_access(inst, idx, 8, 1, 4, od),
        O::SmeZaArrayOff2x2 => check_za_access(inst, idx, 8, 3, 2, od),
        O::SmeZaArrayOff2x4 => check_za_access(inst, idx, 8, 3, 4, od),
        O::SmeZaArrayOff3x2 => check_za_access(inst, idx, 8, 7, 2, od),
        O::SmeZaArrayVrsb1 => check_za_access(inst, idx, 12, 7, 2, od),
        O::SmeZaArrayVrsh1 => check_za_access(inst, idx, 12, 3, 2, od),
        O::SmeZaArrayVrss1 => check_za_access(inst, idx, 12, 1, 2, od),
        O::SmeZaArrayVrsd1 => check_za_access(inst, idx, 12, 0, 2, od),
        O::SmeZaArrayVrsb2 => check_za_access(inst, idx, 12, 3, 4, od),
        O::SmeZaArrayVrsh2 => check_za_access(inst, idx, 12, 1, 4, od),
        O::SmeZaArrayVrss2 | O::SmeZaArrayVrsd2 => check_za_access(inst, idx, 12, 0, 4, od),
        _ => Ok(()),
    }
}

// ── Conditions ───────────────────────────────────────────────────────────

pub(super) fn cond(inst: &Instruction, idx: usize) -> Result<(), OperandError> {
    let op = &inst.operands[idx];
    if op.code == O::Cond1 {
        if let OperandValue::Cond(c) = op.value {
            // AL and NV have no inverse.
            if c.value() & 0xe == 0xe {
                return Err(OperandError::bare_syntax(idx));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::constraint::{check_operand, match_operands_constraint};
    use crate::error::{ErrorKind, OperandError, RangeKind};
    use crate::inst::{AddrInfo, IndexedZa, Instruction, Operand, OperandValue, RegList, Shifter, ZaIndex};
    use crate::names::{cpens, Condition, Modifier, SysInsKind};
    use crate::qualifier::Qualifier;
    use crate::table::find;

    fn inst(id: &str) -> Instruction {
        Instruction::new(find(id).expect("in table"))
    }

    fn check(mut i: Instruction) -> Result<(), OperandError> {
        match_operands_constraint(&mut i)
    }

    fn msg(err: &OperandError) -> String {
        err.kind.to_string()
    }

    fn za(regno: u32, wreg: u32, imm: i64, countm1: u32, group_size: u32) -> Operand {
        Operand::za(IndexedZa {
            regno,
            index: ZaIndex {
                regno: wreg,
                imm,
                countm1,
            },
            group_size,
            v: false,
        })
    }

    fn casp(rs: u32, rs2: u32) -> Instruction {
        inst("casp")
            .with(0, Operand::reg(rs))
            .with(1, Operand::reg(rs2))
            .with(2, Operand::reg(4))
            .with(3, Operand::reg(5))
            .with(4, Operand::addr(AddrInfo::base(1)))
    }

    #[test]
    fn register_pairs() {
        assert_eq!(check(casp(2, 3)), Ok(()));

        let odd = check(casp(3, 4)).expect_err("odd start");
        assert_eq!(odd.index, Some(0));
        assert_eq!(msg(&odd), "reg pair must start from even reg");

        let gap = check(casp(4, 6)).expect_err("not contiguous");
        assert_eq!(gap.index, Some(1));
        assert_eq!(msg(&gap), "reg pair must be contiguous");
    }

    #[test]
    fn stack_pointer_qualifier_needs_sp() {
        let mut i = inst("add_imm")
            .with(0, Operand::reg(3).qualified(Qualifier::Sp))
            .with(1, Operand::reg(2))
            .with(2, Operand::imm(1));
        let err = check_operand(&i, 0).expect_err("x3 is not sp");
        assert_eq!(msg(&err), "stack pointer register expected");

        i.operands[0].value = OperandValue::Reg(31);
        assert_eq!(check_operand(&i, 0), Ok(()));
    }

    #[test]
    fn sys_alias_register_presence() {
        let ivau = OperandValue::SysIns {
            kind: SysInsKind::Ic,
            value: cpens(3, 7, 5, 1),
        };
        let iallu = OperandValue::SysIns {
            kind: SysInsKind::Ic,
            value: cpens(0, 7, 5, 0),
        };
        let base = inst("ic").with(0, Operand::new(ivau));

        assert_eq!(check(base.with(1, Operand::reg(2))), Ok(()));
        let missing = check(base.with(1, Operand::reg(31).absent())).expect_err("ivau takes xt");
        assert_eq!(msg(&missing), "missing register");

        let extra = check(base.with(0, Operand::new(iallu)).with(1, Operand::reg(2))).expect_err("iallu does not");
        assert_eq!(msg(&extra), "extraneous register");
        assert_eq!(check(base.with(0, Operand::new(iallu)).with(1, Operand::reg(31).absent())), Ok(()));
    }

    fn add_ext(rd: u32, rn: u32, q: Qualifier, shifter: Shifter) -> Instruction {
        inst("add_ext")
            .with(0, Operand::reg(rd).qualified(q))
            .with(1, Operand::reg(rn).qualified(q))
            .with(2, Operand::reg(3).shifted(shifter))
    }

    #[test]
    fn extended_register_operators() {
        assert_eq!(check(add_ext(1, 2, Qualifier::W, Shifter::new(Modifier::Uxtb, 2))), Ok(()));

        let missing = check(add_ext(1, 2, Qualifier::W, Shifter::default())).expect_err("needs extend");
        assert_eq!(msg(&missing), "missing extend operator");

        // Next to SP the extend defaults to LSL.
        assert_eq!(check(add_ext(31, 2, Qualifier::W, Shifter::default())), Ok(()));
        assert_eq!(check(add_ext(1, 31, Qualifier::W, Shifter::new(Modifier::Lsl, 2))), Ok(()));

        let lsl = check(add_ext(1, 2, Qualifier::W, Shifter::new(Modifier::Lsl, 2))).expect_err("lsl");
        assert_eq!(msg(&lsl), "'LSL' operator not allowed");

        let shift = check(add_ext(1, 2, Qualifier::W, Shifter::new(Modifier::Sxth, 5))).expect_err("amount");
        assert_eq!(
            shift.kind,
            ErrorKind::OutOfRange {
                lo: 0,
                hi: 4,
                what: RangeKind::ShiftAmount
            }
        );

        let asr = check(add_ext(1, 2, Qualifier::W, Shifter::new(Modifier::Asr, 1))).expect_err("asr");
        assert_eq!(msg(&asr), "extend operator expected");
    }

    #[test]
    fn sixty_four_bit_extend_wants_w_register() {
        let mut i = add_ext(1, 2, Qualifier::X, Shifter::new(Modifier::Uxtw, 0));
        i.operands[2].qualifier = Qualifier::X;
        let err = check(i).expect_err("w expected");
        assert_eq!(msg(&err), "W register expected");

        let mut ok = add_ext(1, 2, Qualifier::X, Shifter::new(Modifier::Sxtx, 0));
        ok.operands[2].qualifier = Qualifier::X;
        assert_eq!(check(ok), Ok(()));
    }

    fn shifted(id: &str, q: Qualifier, shifter: Shifter) -> Instruction {
        inst(id)
            .with(0, Operand::reg(1).qualified(q))
            .with(1, Operand::reg(2))
            .with(2, Operand::reg(3).shifted(shifter))
    }

    #[test]
    fn shifted_register_operators() {
        assert_eq!(check(shifted("add_shift", Qualifier::W, Shifter::default())), Ok(()));
        assert_eq!(check(shifted("add_shift", Qualifier::X, Shifter::new(Modifier::Asr, 63))), Ok(()));

        let wide = check(shifted("add_shift", Qualifier::W, Shifter::new(Modifier::Lsl, 32))).expect_err("w");
        assert_eq!(
            wide.kind,
            ErrorKind::OutOfRange {
                lo: 0,
                hi: 31,
                what: RangeKind::ShiftAmount
            }
        );

        let ror = check(shifted("add_shift", Qualifier::X, Shifter::new(Modifier::Ror, 3))).expect_err("ror");
        assert_eq!(msg(&ror), "'ROR' operator not allowed");
        assert_eq!(check(shifted("and_shift", Qualifier::X, Shifter::new(Modifier::Ror, 3))), Ok(()));

        let ext = check(shifted("add_shift", Qualifier::X, Shifter::new(Modifier::Uxtw, 0))).expect_err("ext");
        assert_eq!(msg(&ext), "shift operator expected");
    }

    fn fmla_elem(q: Qualifier, lane: Operand) -> Instruction {
        inst("fmla_elem")
            .with(0, Operand::reg(0).qualified(q))
            .with(1, Operand::reg(1))
            .with(2, lane)
    }

    #[test]
    fn element_index_bounds() {
        assert_eq!(check(fmla_elem(Qualifier::V4S, Operand::lane(2, 3))), Ok(()));
        let err = check(fmla_elem(Qualifier::V4S, Operand::lane(2, 4))).expect_err("index");
        assert_eq!(
            err.kind,
            ErrorKind::OutOfRange {
                lo: 0,
                hi: 3,
                what: RangeKind::ElementIndex
            }
        );
        assert_eq!(err.index, Some(2));
        assert!(check(fmla_elem(Qualifier::V2D, Operand::lane(2, 2))).is_err());
    }

    #[test]
    fn complex_element_index_is_halved() {
        let base = inst("fcmla_elem")
            .with(0, Operand::reg(0).qualified(Qualifier::V4H))
            .with(1, Operand::reg(1))
            .with(3, Operand::imm(90));
        // 4h: 8 bytes of complex pairs, so h[0] and h[1] only.
        assert_eq!(check(base.with(2, Operand::lane(2, 1))), Ok(()));
        let err = check(base.with(2, Operand::lane(2, 2))).expect_err("index");
        assert_eq!(
            err.kind,
            ErrorKind::OutOfRange {
                lo: 0,
                hi: 1,
                what: RangeKind::ElementIndex
            }
        );
    }

    #[test]
    fn em16_register_window() {
        let base = inst("fmla_elem_h")
            .with(0, Operand::reg(0).qualified(Qualifier::V8H))
            .with(1, Operand::reg(1));
        assert_eq!(check(base.with(2, Operand::lane(15, 7))), Ok(()));
        let err = check(base.with(2, Operand::lane(16, 0))).expect_err("v16");
        assert_eq!(
            err.kind,
            ErrorKind::OutOfRange {
                lo: 0,
                hi: 15,
                what: RangeKind::RegisterNumber
            }
        );
    }

    fn with_index(first: u32, num: u32, index: i64) -> Operand {
        Operand::new(OperandValue::RegList(RegList {
            first_regno: first,
            num_regs: num,
            stride: 1,
            index: Some(index),
        }))
    }

    #[test]
    fn simd_lists() {
        let ld4 = |num| {
            inst("ld4_multi")
                .with(0, Operand::list(0, num, 1).qualified(Qualifier::V4S))
                .with(1, Operand::addr(AddrInfo::base(1)))
        };
        assert_eq!(check(ld4(4)), Ok(()));
        assert_eq!(check(ld4(3)).map_err(|e| e.kind), Err(ErrorKind::RegListLength { expected: 4 }));

        // LD1 accepts any length.
        let ld1 = inst("ld1_multi")
            .with(0, Operand::list(0, 3, 1).qualified(Qualifier::V16B))
            .with(1, Operand::addr(AddrInfo::base(1)));
        assert_eq!(check(ld1), Ok(()));

        let strided = inst("ld1_multi")
            .with(0, Operand::list(0, 2, 2).qualified(Qualifier::V16B))
            .with(1, Operand::addr(AddrInfo::base(1)));
        assert_eq!(check(strided).map_err(|e| e.kind), Err(ErrorKind::RegListStride { expected: 1 }));

        let lane = |index| {
            inst("ld1_lane")
                .with(0, with_index(0, 1, index).qualified(Qualifier::SS))
                .with(1, Operand::addr(AddrInfo::base(1)))
        };
        assert_eq!(check(lane(3)), Ok(()));
        assert_eq!(
            check(lane(4)).map_err(|e| e.kind),
            Err(ErrorKind::OutOfRange {
                lo: 0,
                hi: 3,
                what: RangeKind::ElementIndex
            })
        );
    }

    #[test]
    fn sve_indexed_vectors() {
        let fmul = |regno, index| {
            inst("fmul_sve_idx_s")
                .with(0, Operand::reg(0))
                .with(1, Operand::reg(1))
                .with(2, Operand::lane(regno, index))
        };
        assert_eq!(check(fmul(7, 3)), Ok(()));
        let reg = check(fmul(8, 0)).expect_err("z8");
        assert_eq!(msg(&reg), "expected a register in the range z0-z7");
        let idx = check(fmul(7, 4)).expect_err("index");
        assert_eq!(msg(&idx), "register element index out of range 0 to 3");

        let dup = |q, index| {
            inst("dup_sve_idx")
                .with(0, Operand::reg(0).qualified(q))
                .with(1, Operand::lane(1, index))
        };
        assert_eq!(check(dup(Qualifier::SB, 63)), Ok(()));
        assert!(check(dup(Qualifier::SD, 8)).is_err());
        assert_eq!(check(dup(Qualifier::SQ, 3)), Ok(()));
    }

    #[test]
    fn sme_indexed_vectors() {
        let luti = |index| {
            inst("luti4")
                .with(0, Operand::reg(0).qualified(Qualifier::SB))
                .with(1, Operand::new(OperandValue::None))
                .with(2, Operand::lane(3, index))
        };
        assert_eq!(check(luti(3)), Ok(()));
        assert!(check(luti(4)).is_err());

        let fmla = |regno, index| {
            inst("fmla_za_idx_vgx2")
                .with(0, za(0, 8, 0, 0, 2).qualified(Qualifier::SS))
                .with(1, Operand::list(2, 2, 1))
                .with(2, Operand::lane(regno, index))
        };
        assert_eq!(check(fmla(15, 3)), Ok(()));
        let err = check(fmla(16, 0)).expect_err("z16");
        assert_eq!(msg(&err), "expected a register in the range z0-z15");

        let pext = |regno, index| {
            inst("pext")
                .with(0, Operand::reg(0).qualified(Qualifier::SS))
                .with(1, Operand::lane(regno, index))
        };
        assert_eq!(check(pext(8, 3)), Ok(()));
        let err = check(pext(7, 0)).expect_err("pn7");
        assert_eq!(msg(&err), "expected a register in the range pn8-pn15");
    }

    #[test]
    fn sme_plain_zm_window() {
        let i = |zm| {
            inst("fmlal_za")
                .with(0, za(0, 8, 2, 1, 0))
                .with(1, Operand::reg(1))
                .with(2, Operand::reg(zm))
        };
        assert_eq!(check(i(15)), Ok(()));
        assert_eq!(msg(&check(i(16)).expect_err("z16")), "expected a register in the range z0-z15");
    }

    #[test]
    fn sve_fixed_lists() {
        let add = |first, num| {
            inst("add_sme2_x2")
                .with(0, Operand::list(first, num, 1))
                .with(1, Operand::list(first, num, 1))
                .with(2, Operand::reg(3).qualified(Qualifier::SS))
        };
        assert_eq!(check(add(4, 2)), Ok(()));
        assert_eq!(check(add(4, 4)).map_err(|e| e.kind), Err(ErrorKind::RegListLength { expected: 2 }));
        assert_eq!(msg(&check(add(3, 2)).expect_err("odd")), "start register out of range");
    }

    #[test]
    fn sve_strided_lists() {
        let ld = |first, stride| {
            inst("ld1w_strided_x2")
                .with(0, Operand::list(first, 2, stride))
                .with(1, Operand::reg(8))
                .with(2, Operand::addr(AddrInfo::base(1)))
        };
        assert_eq!(check(ld(7, 8)), Ok(()));
        assert_eq!(check(ld(17, 8)), Ok(()));
        assert_eq!(msg(&check(ld(8, 8)).expect_err("z8")), "start register out of range");
        assert_eq!(check(ld(0, 1)).map_err(|e| e.kind), Err(ErrorKind::RegListStride { expected: 8 }));

        let quad = |first| {
            inst("ld1w_strided_x4")
                .with(0, Operand::list(first, 4, 4))
                .with(1, Operand::reg(8))
                .with(2, Operand::addr(AddrInfo::base(1)))
        };
        assert_eq!(check(quad(19)), Ok(()));
        assert!(check(quad(4)).is_err());
    }

    #[test]
    fn sve_lists_sized_by_opcode() {
        let ld4 = |num| {
            inst("ld4w_sve_imm")
                .with(0, Operand::list(0, num, 1))
                .with(1, Operand::reg(0))
                .with(2, Operand::addr(AddrInfo::base(1)))
        };
        assert_eq!(check(ld4(4)), Ok(()));
        assert_eq!(check(ld4(2)).map_err(|e| e.kind), Err(ErrorKind::RegListLength { expected: 4 }));
    }

    #[test]
    fn predicate_windows() {
        let add = |pg| {
            inst("add_sve_pred")
                .with(0, Operand::reg(1).qualified(Qualifier::SH))
                .with(1, Operand::reg(pg))
                .with(2, Operand::reg(1))
                .with(3, Operand::reg(2))
        };
        assert_eq!(check(add(7)), Ok(()));
        assert_eq!(msg(&check(add(8)).expect_err("p8")), "expected a register in the range p0-p7");

        let whilelo = |pn| {
            inst("whilelo_pn")
                .with(0, Operand::reg(pn).qualified(Qualifier::SB))
                .with(1, Operand::reg(1))
                .with(2, Operand::reg(2))
                .with(3, Operand::imm(0))
        };
        assert_eq!(check(whilelo(8)), Ok(()));
        assert_eq!(msg(&check(whilelo(3)).expect_err("pn3")), "expected a register in the range pn8-pn15");
    }

    #[test]
    fn za_selection_register() {
        let ldr = |wreg| {
            inst("ldr_za")
                .with(0, za(0, wreg, 0, 0, 0))
                .with(1, Operand::addr(AddrInfo::base(1)))
        };
        assert_eq!(check(ldr(15)), Ok(()));
        let err = check(ldr(11)).expect_err("w11");
        assert_eq!(msg(&err), "expected a selection register in the range w12-w15");

        let add = |wreg| {
            inst("add_za_vgx2")
                .with(0, za(0, wreg, 7, 0, 2).qualified(Qualifier::SS))
                .with(1, Operand::list(0, 2, 1))
        };
        assert_eq!(check(add(8)), Ok(()));
        let err = check(add(12)).expect_err("w12");
        assert_eq!(msg(&err), "expected a selection register in the range w8-w11");
    }

    #[test]
    fn za_offsets_and_groups() {
        let add = |imm, group| {
            inst("add_za_vgx2")
                .with(0, za(0, 9, imm, 0, group).qualified(Qualifier::SS))
                .with(1, Operand::list(0, 2, 1))
        };
        assert_eq!(check(add(7, 0)), Ok(()));
        assert_eq!(
            check(add(8, 2)).map_err(|e| e.kind),
            Err(ErrorKind::OutOfRange {
                lo: 0,
                hi: 7,
                what: RangeKind::Offset
            })
        );
        assert_eq!(check(add(1, 4)).map_err(|e| e.kind), Err(ErrorKind::InvalidVgSize { expected: 2 }));
    }

    #[test]
    fn za_ranges() {
        let fmlal = |imm, countm1| {
            inst("fmlal_za")
                .with(0, za(0, 8, imm, countm1, 0))
                .with(1, Operand::reg(1))
                .with(2, Operand::reg(2))
        };
        assert_eq!(check(fmlal(6, 1)), Ok(()));
        assert_eq!(msg(&check(fmlal(3, 1)).expect_err("odd")), "starting offset is not a multiple of 2");
        assert_eq!(msg(&check(fmlal(2, 0)).expect_err("single")), "expected a range of two offsets");
        assert!(check(fmlal(8, 1)).is_err());

        let smlall = |imm, countm1| {
            inst("smlall_za")
                .with(0, za(0, 8, imm, countm1, 0))
                .with(1, Operand::reg(1))
                .with(2, Operand::reg(2))
        };
        assert_eq!(check(smlall(12, 3)), Ok(()));
        assert_eq!(msg(&check(smlall(2, 3)).expect_err("unaligned")), "starting offset is not a multiple of 4");
        assert_eq!(msg(&check(smlall(4, 1)).expect_err("pair")), "expected a range of four offsets");

        let ldr = inst("ldr_za").with(0, za(0, 12, 0, 1, 0)).with(1, Operand::addr(AddrInfo::base(1)));
        assert_eq!(msg(&check(ldr).expect_err("range")), "expected a single offset rather than a range");
    }

    #[test]
    fn tile_slices_scale_with_element_size() {
        let mova = |q, imm| {
            inst("mova_tile_to_vec")
                .with(0, Operand::reg(0).qualified(q))
                .with(1, Operand::reg(1))
                .with(2, za(0, 12, imm, 0, 0))
        };
        assert_eq!(check(mova(Qualifier::SB, 15)), Ok(()));
        assert!(check(mova(Qualifier::SS, 4)).is_err());
        assert_eq!(check(mova(Qualifier::SQ, 0)), Ok(()));
        assert!(check(mova(Qualifier::SQ, 1)).is_err());

        let multi = |q, imm| {
            inst("mova_tile_to_vec_x4")
                .with(0, Operand::list(0, 4, 1).qualified(q))
                .with(1, za(0, 12, imm, 3, 0))
        };
        assert_eq!(check(multi(Qualifier::SB, 0)), Ok(()));
        assert_eq!(check(multi(Qualifier::SB, 12)), Ok(()));
        assert!(check(multi(Qualifier::SS, 4)).is_err());
        assert_eq!(check(multi(Qualifier::SD, 0)), Ok(()));
    }

    #[test]
    fn vector_range_selection() {
        let mova = |imm| {
            inst("mova_vrs_b")
                .with(0, Operand::list(0, 2, 1))
                .with(1, za(0, 12, imm, 1, 0))
        };
        assert_eq!(check(mova(14)), Ok(()));
        assert!(check(mova(16)).is_err());
    }

    #[test]
    fn predicate_lane_select() {
        let psel = |q, imm| {
            inst("psel")
                .with(0, Operand::reg(1))
                .with(1, Operand::reg(2))
                .with(2, za(3, 12, imm, 0, 0).qualified(q))
        };
        assert_eq!(check(psel(Qualifier::SB, 15)), Ok(()));
        assert!(check(psel(Qualifier::SD, 2)).is_err());
    }

    #[test]
    fn conditions_without_inverse() {
        let cinc = |c| {
            inst("cinc")
                .with(0, Operand::reg(1))
                .with(1, Operand::reg(2))
                .with(2, Operand::cond(c))
        };
        assert_eq!(check(cinc(Condition::EQ)), Ok(()));
        let al = check(cinc(Condition::AL)).expect_err("al");
        assert_eq!(al.kind, ErrorKind::Syntax { msg: None });
        assert_eq!(al.index, Some(2));
        assert!(check(cinc(Condition::NV)).is_err());
    }
}
