//! Serde round-trip tests for the `a64_opc` data model.
//!
//! Every serializable public type must survive a trip through JSON
//! unchanged.

#![cfg(feature = "serde")]

use std::borrow::Cow;

use a64_opc::inst::{IndexedZa, RegLane, RegList, ZaIndex};
use a64_opc::names::{RegAccess, SysInsKind};
use a64_opc::table::find;
use a64_opc::{
    AddrInfo, CheckError, Condition, ErrorKind, FeatureSet, Instruction, Modifier, Operand, OperandError,
    OperandValue, Qualifier, RangeKind, Rendered, Shifter, Style, VerifyError,
};

/// Helper: serialize to JSON, deserialize back, assert equality.
fn round_trip<T>(val: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + core::fmt::Debug,
{
    let json = serde_json::to_string(val).expect("serialize");
    let back: T = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(val, &back, "round-trip mismatch for JSON: {json}");
}

// ─── Qualifiers and features ────────────────────────────────────────────────

#[test]
fn serde_qualifier() {
    for q in Qualifier::ALL {
        round_trip(&q);
    }
}

#[test]
fn serde_features() {
    for f in FeatureSet::all().iter() {
        round_trip(&f);
    }
    round_trip(&FeatureSet::base());
    round_trip(&FeatureSet::all());
}

#[test]
fn serde_modifier_and_condition() {
    for m in Modifier::ALL {
        round_trip(&m);
    }
    for v in 0..16 {
        round_trip(&Condition::from_value(v));
    }
}

// ─── Operands ───────────────────────────────────────────────────────────────

#[test]
fn serde_operand_values() {
    let za = IndexedZa {
        regno: 1,
        index: ZaIndex { regno: 12, imm: 4, countm1: 1 },
        group_size: 2,
        v: true,
    };
    for value in [
        OperandValue::None,
        OperandValue::Reg(31),
        OperandValue::RegLane(RegLane { regno: 3, index: 1 }),
        OperandValue::RegList(RegList { first_regno: 30, num_regs: 4, stride: 1, index: Some(2) }),
        OperandValue::IndexedZa(za),
        OperandValue::Addr(AddrInfo::base(2).with_imm(-16).pre_indexed()),
        OperandValue::Addr(AddrInfo::base(31).with_reg(4)),
        OperandValue::Cond(Condition::GE),
        OperandValue::SysReg { value: 0xde82, access: RegAccess::Read },
        OperandValue::Pstate { value: 0x1b, crm: Some(6) },
        OperandValue::SysIns { kind: SysInsKind::Dc, value: 0x3d1 },
        OperandValue::Barrier(0xf),
        OperandValue::Prfop(0x10),
        OperandValue::Hint(0x22),
    ] {
        round_trip(&value);
    }
}

#[test]
fn serde_operand_slots() {
    let add = Instruction::new(find("add_ext").expect("in table"))
        .with(0, Operand::reg(31).qualified(Qualifier::X))
        .with(1, Operand::reg(1).qualified(Qualifier::X))
        .with(2, Operand::reg(2).qualified(Qualifier::W).shifted(Shifter::new(Modifier::Uxtw, 2)));
    for op in &add.operands {
        round_trip(op);
    }
    round_trip(&Operand::imm(-1));
    round_trip(&Operand::fp_imm(0x70));
}

// ─── Diagnostics ────────────────────────────────────────────────────────────

#[test]
fn serde_operand_errors() {
    let errors = [
        OperandError::new(ErrorKind::Syntax { msg: None }, None),
        OperandError::new(ErrorKind::Syntax { msg: Some(Cow::Borrowed("reg pair must be contiguous")) }, Some(1)),
        OperandError::new(ErrorKind::InvalidRegister { prefix: "z".into(), lo: 0, hi: 15 }, Some(2)),
        OperandError::new(ErrorKind::OutOfRange { lo: -64, hi: 63, what: RangeKind::Offset }, Some(2)),
        OperandError::new(ErrorKind::Unaligned { align: 8 }, Some(2)),
        OperandError::new(ErrorKind::RegListLength { expected: 2 }, Some(0)),
        OperandError::new(ErrorKind::RegListStride { expected: 8 }, Some(0)),
        OperandError::new(ErrorKind::InvalidVgSize { expected: 4 }, Some(0)),
        OperandError::new(ErrorKind::UntiedOperand, Some(2)),
        OperandError::new(ErrorKind::UntiedImmediates, Some(1)),
        OperandError::new(ErrorKind::InvalidVariant { mismatches: 1 }, None),
        OperandError::new(ErrorKind::Other { msg: "immediate out of range".into() }, Some(2)),
        OperandError::new(ErrorKind::AShouldFollowB { a: "cpyfm".into(), b: "cpyfp".into() }, None).non_fatal(),
        OperandError::new(ErrorKind::ExpectedAAfterB { a: "cpyfe".into(), b: "cpyfm".into() }, None).non_fatal(),
    ];
    for err in &errors {
        round_trip(err);
    }
}

#[test]
fn serde_check_errors() {
    round_trip(&CheckError::Unsupported {
        mnemonic: "casp".to_owned(),
        required: FeatureSet::base(),
    });
    round_trip(&CheckError::Operand(OperandError::new(ErrorKind::UntiedOperand, Some(2))));
    round_trip(&CheckError::Verify(VerifyError::Undefined));
    round_trip(&CheckError::Sequence(
        OperandError::new(ErrorKind::Syntax { msg: Some("SVE instruction expected after `movprfx'".into()) }, None)
            .non_fatal(),
    ));
}

#[test]
fn serde_check_error_json_shape() {
    let err = CheckError::Verify(VerifyError::Undefined);
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json, serde_json::json!({ "Verify": "Undefined" }));
}

// ─── Rendering ──────────────────────────────────────────────────────────────

#[test]
fn serde_rendered() {
    for style in [Style::Register, Style::Immediate, Style::SubMnemonic, Style::Address] {
        round_trip(&style);
    }
    round_trip(&Rendered::default());
    round_trip(&Rendered {
        text: "#0x1000".to_owned(),
        comment: Some("4096".to_owned()),
        address: Some(0x1000),
        note: Some(Cow::Borrowed("reading from a write-only register")),
    });
}
