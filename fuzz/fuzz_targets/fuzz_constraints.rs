#![no_main]
use libfuzzer_sys::fuzz_target;

use a64_opc::inst::{AddrInfo, IndexedZa, RegList, ZaIndex};
use a64_opc::names::Modifier;
use a64_opc::render::{render_operand, PlainStyler};
use a64_opc::table::OPCODES;
use a64_opc::{Checker, FeatureSet, Instruction, Operand, OperandValue, Qualifier, Shifter};

/// Pulls little pieces out of the fuzzer input, yielding zeros once it runs
/// dry.
struct Bytes<'a>(&'a [u8]);

impl Bytes<'_> {
    fn u8(&mut self) -> u8 {
        match self.0.split_first() {
            Some((b, rest)) => {
                self.0 = rest;
                *b
            }
            None => 0,
        }
    }

    fn i16(&mut self) -> i64 {
        i64::from(i16::from_le_bytes([self.u8(), self.u8()]))
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes([self.u8(), self.u8(), self.u8(), self.u8()])
    }
}

fn operand(bytes: &mut Bytes<'_>) -> Operand {
    let regno = u32::from(bytes.u8() & 0x3f);
    let value = match bytes.u8() % 6 {
        0 => OperandValue::Reg(regno),
        1 => OperandValue::RegLane(a64_opc::inst::RegLane { regno, index: bytes.i16() & 0x3f }),
        2 => OperandValue::RegList(RegList {
            first_regno: regno,
            num_regs: u32::from(bytes.u8() % 6),
            stride: u32::from(bytes.u8() % 10),
            index: (bytes.u8() & 1 == 1).then(|| bytes.i16() & 0xf),
        }),
        3 => OperandValue::IndexedZa(IndexedZa {
            regno: regno & 0xf,
            index: ZaIndex { regno: u32::from(bytes.u8() & 0x1f), imm: bytes.i16(), countm1: u32::from(bytes.u8() & 7) },
            group_size: u32::from(bytes.u8() % 5),
            v: bytes.u8() & 1 == 1,
        }),
        4 => {
            let mut addr = AddrInfo::base(regno & 0x1f).with_imm(bytes.i16());
            match bytes.u8() % 4 {
                0 => addr = addr.pre_indexed(),
                1 => addr = addr.post_indexed(),
                2 => addr = addr.with_reg(u32::from(bytes.u8() & 0x1f)),
                _ => {}
            }
            OperandValue::Addr(addr)
        }
        _ => OperandValue::Imm(a64_opc::inst::Immediate { value: bytes.i16(), is_fp: bytes.u8() & 1 == 1 }),
    };
    let qualifier = Qualifier::ALL[bytes.u8() as usize % Qualifier::ALL.len()];
    let kind = Modifier::ALL[bytes.u8() as usize % Modifier::ALL.len()];
    let shifter = Shifter::new(kind, bytes.i16() & 0x3f);
    Operand::new(value).qualified(qualifier).shifted(shifter)
}

fuzz_target!(|data: &[u8]| {
    let mut bytes = Bytes(data);
    let mut checker = Checker::new();
    checker.features(FeatureSet::all());

    let mut pc = 0u64;
    while !bytes.0.is_empty() {
        let opcode = &OPCODES[bytes.u8() as usize % OPCODES.len()];
        let mut inst = Instruction::new(opcode).encoded(bytes.u32());
        for idx in 0..opcode.num_operands() {
            inst.set(idx, operand(&mut bytes));
        }

        let _ = checker.check(&mut inst, pc);
        for idx in 0..opcode.num_operands() {
            let _ = render_operand(&inst, idx, pc, &mut PlainStyler);
        }
        pc += 4;
    }
    let _ = checker.finish();
});
