//! Whole-instruction verifiers and the CPU support check.
//!
//! Some encodings are only meaningful as a whole: the register fields of an
//! LDPSW may not overlap its write-back base, by-element FP forms reserve
//! `sz:L == 11`, and the memory copy/set instructions need three distinct
//! registers. An opcode names at most one such rule through its
//! [`Verifier`] tag.

use std::fmt;

use crate::error::{ErrorKind, OperandError};
use crate::feature::{Feature, FeatureSet};
use crate::field::{extract_fields, insert_fields, Field};
use crate::inst::{Instruction, OperandValue};
use crate::opcode::{InsnClass, Verifier};
use crate::qualifier::Qualifier;
use crate::range::{bit, extract_bits};

/// Failure of a whole-instruction verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerifyError {
    /// The encoding is architecturally UNDEFINED.
    Undefined,
    /// The operands break a rule that a front end reports as an error.
    Violation(OperandError),
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::Undefined => f.write_str("undefined encoding"),
            VerifyError::Violation(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for VerifyError {}

impl From<OperandError> for VerifyError {
    fn from(err: OperandError) -> Self {
        VerifyError::Violation(err)
    }
}

/// Run the verifier attached to `inst`'s opcode, if any.
///
/// `insn` is the word being decoded. When `encoding` is set the word
/// recorded in `inst.value` is checked instead; if no word of this opcode
/// was recorded, the fields the verifier reads are taken from the operands.
pub fn verify(inst: &Instruction, insn: u32, encoding: bool) -> Result<(), VerifyError> {
    let Some(verifier) = inst.opcode.verifier else {
        return Ok(());
    };
    let word = if encoding { assembled_word(inst, verifier) } else { insn };
    let res = match verifier {
        Verifier::Ldpsw => ldpsw(word),
        Verifier::ElemSd => elem_sd(word),
        Verifier::ThreeDifferentRegs => three_different_regs(inst),
    };
    if let Err(err) = &res {
        tracing::debug!(opcode = inst.opcode.id, ?verifier, error = %err, "verifier rejected instruction");
    }
    res
}

/// The recorded word when it belongs to the opcode, otherwise the opcode
/// bits with the verified fields filled in from the resolved operands.
fn assembled_word(inst: &Instruction, verifier: Verifier) -> u32 {
    let opcode = inst.opcode;
    if inst.value & opcode.mask == opcode.opcode {
        return inst.value;
    }

    let mut word = opcode.opcode;
    match verifier {
        Verifier::Ldpsw => {
            let addr = inst.operands[2].addr_info();
            Field::Rt.insert(&mut word, inst.operands[0].regno(), 0);
            Field::Rt2.insert(&mut word, inst.operands[1].regno(), 0);
            Field::Rn.insert(&mut word, addr.base_regno, 0);
            if addr.writeback {
                word |= 1 << 23;
            } else {
                word &= !(1 << 23);
            }
        }
        Verifier::ElemSd => {
            let elem = inst
                .operands
                .iter()
                .find(|op| matches!(op.value, OperandValue::RegLane(_)));
            if let Some(elem) = elem {
                let index = elem.reglane().index as u32;
                if elem.qualifier == Qualifier::SD {
                    insert_fields(&mut word, 0, &[Field::Sz, Field::H, Field::L], 0b100 | ((index & 1) << 1));
                } else {
                    insert_fields(&mut word, 0, &[Field::H, Field::L], index & 3);
                }
            }
        }
        Verifier::ThreeDifferentRegs => {}
    }
    tracing::trace!(opcode = opcode.id, word, "verifying word assembled from operands");
    word
}

/// Write-back into a base that is also a destination, or a load into the
/// same register twice.
fn ldpsw(word: u32) -> Result<(), VerifyError> {
    let t = extract_bits(word, 0, 5);
    let n = extract_bits(word, 5, 5);
    let t2 = extract_bits(word, 10, 5);

    if bit(word, 23) != 0 && (t == n || t2 == n) && n != 31 {
        return Err(VerifyError::Undefined);
    }
    if bit(word, 22) != 0 && t == t2 {
        return Err(VerifyError::Undefined);
    }
    Ok(())
}

fn elem_sd(word: u32) -> Result<(), VerifyError> {
    if extract_fields(word, 0, &[Field::Sz, Field::L]) == 3 {
        return Err(VerifyError::Undefined);
    }
    Ok(())
}

fn three_different_regs(inst: &Instruction) -> Result<(), VerifyError> {
    let [a, b, c] = [0, 1, 2].map(|i| inst.operands[i].regno());
    if a == b || a == c || b == c {
        return Err(OperandError::new(
            ErrorKind::Syntax {
                msg: Some("the three register operands must be distinct from one another".into()),
            },
            None,
        )
        .into());
    }
    Ok(())
}

/// Whether a CPU with `features` can execute `inst`.
///
/// Besides the opcode's own requirement, the double-precision and 64-bit
/// integer forms of the SME outer products need their own extensions.
pub fn cpu_supports(features: FeatureSet, inst: &Instruction) -> bool {
    if !features.has_all(inst.opcode.features) {
        return false;
    }
    let wide = inst.operands[0].qualifier == Qualifier::SD;
    match inst.opcode.iclass {
        InsnClass::SmeFpSd if wide => features.has(Feature::SmeF64F64),
        InsnClass::SmeIntSd if wide => features.has(Feature::SmeI16I64),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inst::Operand;
    use crate::table::find;

    fn inst(id: &str) -> Instruction {
        Instruction::new(find(id).expect("in table"))
    }

    #[test]
    fn ldpsw_writeback_overlap() {
        let i = inst("ldpsw_indexed");
        // Rt = 1, Rn = 1, Rt2 = 2.
        assert_eq!(verify(&i, 0x68c0_0821, false), Err(VerifyError::Undefined));
        // Rt = 1, Rn = 3, Rt2 = 2.
        assert_eq!(verify(&i, 0x68c0_0861, false), Ok(()));
        // Base is SP.
        assert_eq!(verify(&i, 0x68c0_0be1, false), Ok(()));
    }

    #[test]
    fn ldpsw_same_destinations() {
        let i = inst("ldpsw_indexed");
        // Signed-offset form, Rt = Rt2 = 1, Rn = 3.
        assert_eq!(verify(&i, 0x6940_0461, false), Err(VerifyError::Undefined));
        assert_eq!(verify(&i, 0x6940_0861, false), Ok(()));
    }

    #[test]
    fn elem_sd_reserved_combination() {
        let i = inst("fmla_elem");
        assert_eq!(verify(&i, 0x0fe0_1000, false), Err(VerifyError::Undefined));
        assert_eq!(verify(&i, 0x0fc0_1000, false), Ok(()));
        assert_eq!(verify(&i, 0x0fa0_1000, false), Ok(()));
    }

    #[test]
    fn encoding_checks_recorded_word() {
        let i = inst("fmla_elem").encoded(0x0fe0_1000);
        assert_eq!(verify(&i, 0, true), Err(VerifyError::Undefined));
        assert_eq!(verify(&i, 0, false), Ok(()));
    }

    #[test]
    fn ldpsw_fields_from_operands() {
        use crate::inst::AddrInfo;

        let ldpsw = |t, t2, addr: AddrInfo| {
            inst("ldpsw_indexed")
                .with(0, Operand::reg(t).qualified(Qualifier::X))
                .with(1, Operand::reg(t2).qualified(Qualifier::X))
                .with(2, Operand::addr(addr))
        };
        let pre = AddrInfo::base(1).with_imm(8).pre_indexed();
        assert_eq!(verify(&ldpsw(1, 2, pre), 0, true), Err(VerifyError::Undefined));
        assert_eq!(verify(&ldpsw(2, 1, pre), 0, true), Err(VerifyError::Undefined));
        assert_eq!(verify(&ldpsw(3, 3, AddrInfo::base(1).with_imm(8).post_indexed()), 0, true), Err(VerifyError::Undefined));
        assert_eq!(verify(&ldpsw(3, 4, pre), 0, true), Ok(()));
        // Write-back into SP never overlaps.
        assert_eq!(verify(&ldpsw(3, 4, AddrInfo::base(31).with_imm(8).pre_indexed()), 0, true), Ok(()));

        // A recorded word of the opcode wins over the operands.
        assert_eq!(verify(&ldpsw(1, 2, pre).encoded(0x68c0_0861), 0, true), Ok(()));
    }

    #[test]
    fn elem_sd_fields_from_operands() {
        let fmla = |q, index| {
            inst("fmla_elem")
                .with(0, Operand::reg(0).qualified(Qualifier::V2D))
                .with(1, Operand::reg(1).qualified(Qualifier::V2D))
                .with(2, Operand::lane(2, index).qualified(q))
        };
        assert_eq!(verify(&fmla(Qualifier::SD, 1), 0, true), Ok(()));
        assert_eq!(verify(&fmla(Qualifier::SS, 3), 0, true), Ok(()));
        assert_eq!(verify(&fmla(Qualifier::SD, 1).encoded(0x4fe0_1000), 0, true), Err(VerifyError::Undefined));
    }

    #[test]
    fn three_registers_differ() {
        let base = inst("cpyfp").with(0, Operand::reg(0)).with(1, Operand::reg(1));
        assert_eq!(verify(&base.with(2, Operand::reg(2)), 0, false), Ok(()));

        let err = verify(&base.with(2, Operand::reg(1)), 0, false).expect_err("same registers");
        let VerifyError::Violation(err) = err else {
            panic!("expected a violation, got {err:?}");
        };
        assert_eq!(err.index, None);
        assert_eq!(err.to_string(), "the three register operands must be distinct from one another");
    }

    #[test]
    fn no_verifier_passes() {
        assert_eq!(verify(&inst("add_imm"), u32::MAX, false), Ok(()));
    }

    #[test]
    fn cpu_feature_requirements() {
        let add = inst("add_sve_pred");
        assert!(!cpu_supports(FeatureSet::base(), &add));
        assert!(cpu_supports(FeatureSet::base().with(Feature::Sve), &add));
    }

    #[test]
    fn sme_wide_outer_products() {
        let sme = FeatureSet::base().with(Feature::Sme);
        let fp_s = inst("fmopa_s").with(0, Operand::reg(0).qualified(Qualifier::SS));
        let fp_d = inst("fmopa_d").with(0, Operand::reg(0).qualified(Qualifier::SD));
        let int_d = inst("smopa_d").with(0, Operand::reg(0).qualified(Qualifier::SD));

        assert!(cpu_supports(sme, &fp_s));
        assert!(!cpu_supports(sme, &fp_d));
        assert!(cpu_supports(sme.with(Feature::SmeF64F64), &fp_d));
        assert!(!cpu_supports(sme.with(Feature::SmeF64F64), &int_d));
        assert!(cpu_supports(sme.with(Feature::SmeI16I64), &int_d));
    }
}
