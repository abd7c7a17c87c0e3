//! Performance benchmarks for `a64_opc`.
//!
//! Measures:
//! - Logical-immediate table lookups (first use builds the table)
//! - Full instruction checks, one at a time and over a mixed block
//! - Operand and instruction rendering
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use a64_opc::immediate::{is_logical_immediate, logical_immediate, logical_immediate_table_len};
use a64_opc::render::render_instruction;
use a64_opc::table::find;
use a64_opc::{render_operand, AddrInfo, Checker, FeatureSet, Instruction, Operand, PlainStyler, Qualifier, Style};

fn inst(id: &str) -> Instruction {
    Instruction::new(find(id).expect("in table"))
}

fn x(regno: u32) -> Operand {
    Operand::reg(regno).qualified(Qualifier::X)
}

fn z(regno: u32) -> Operand {
    Operand::reg(regno).qualified(Qualifier::SS)
}

/// A small mixed block: scalar ALU, loads, a pair CAS, a MOVPRFX pair and a
/// MOPS triple.
fn program() -> Vec<Instruction> {
    let mut out = vec![
        inst("add_imm").with(0, x(0)).with(1, x(1)).with(2, Operand::imm(16)),
        inst("and_imm").with(0, x(2)).with(1, x(3)).with(2, Operand::imm(0xff)),
        inst("ldr_pos").with(0, x(4)).with(1, Operand::addr(AddrInfo::base(31).with_imm(32))),
        inst("casp")
            .with(0, x(4))
            .with(1, x(5))
            .with(2, x(6))
            .with(3, x(7))
            .with(4, Operand::addr(AddrInfo::base(1))),
        inst("movprfx").with(0, Operand::reg(3)).with(1, Operand::reg(4)),
        inst("add_sve_pred")
            .with(0, z(3))
            .with(1, Operand::reg(0).qualified(Qualifier::PM))
            .with(2, z(3))
            .with(3, z(5)),
    ];
    for id in ["cpyfp", "cpyfm", "cpyfe"] {
        out.push(inst(id).with(0, x(0)).with(1, x(1)).with(2, x(2)));
    }
    out
}

// ─── Logical Immediates ──────────────────────────────────────────────────────

fn bench_logical_immediate(c: &mut Criterion) {
    let mut group = c.benchmark_group("logical_immediate");
    // Build the table outside the measurements.
    black_box(logical_immediate_table_len());

    group.bench_function("hit_64", |b| {
        b.iter(|| logical_immediate(black_box(0x5555_5555_5555_5555), 8))
    });

    group.bench_function("hit_32_replicated", |b| {
        b.iter(|| logical_immediate(black_box(0x0000_ff00), 4))
    });

    group.bench_function("miss", |b| {
        b.iter(|| logical_immediate(black_box(0x1234_5678), 4))
    });

    let values: Vec<u64> = (0..4096u64).map(|i| i.wrapping_mul(0x9e37_79b9_7f4a_7c15)).collect();
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("scan_4096", |b| {
        b.iter(|| values.iter().filter(|&&v| is_logical_immediate(black_box(v), 8)).count())
    });

    group.finish();
}

// ─── Checking ────────────────────────────────────────────────────────────────

fn bench_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("check");

    let add = inst("add_imm").with(0, x(0)).with(1, x(1)).with(2, Operand::imm(16));
    group.bench_function("add_imm", |b| {
        let mut checker = Checker::new();
        b.iter(|| {
            let mut i = black_box(add);
            checker.check(&mut i, 0)
        })
    });

    let unresolved = inst("add_imm").with(0, Operand::reg(0)).with(1, Operand::reg(1)).with(2, Operand::imm(16));
    group.bench_function("add_imm_unqualified", |b| {
        let mut checker = Checker::new();
        b.iter(|| {
            let mut i = black_box(unresolved);
            checker.check(&mut i, 0)
        })
    });

    let block = program();
    group.throughput(Throughput::Elements(block.len() as u64));
    group.bench_function("mixed_block", |b| {
        let mut checker = Checker::new();
        checker.features(FeatureSet::all());
        b.iter(|| {
            let mut failures = 0usize;
            for (pc, insn) in block.iter().enumerate() {
                let mut i = *insn;
                if checker.check(&mut i, pc as u64 * 4).is_err() {
                    failures += 1;
                }
            }
            let _ = checker.finish();
            black_box(failures)
        })
    });

    group.finish();
}

// ─── Rendering ───────────────────────────────────────────────────────────────

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let ldr = inst("ldr_pos").with(0, x(4)).with(1, Operand::addr(AddrInfo::base(31).with_imm(32)));
    group.bench_function("address_operand", |b| {
        b.iter(|| render_operand(black_box(&ldr), 1, 0, &mut PlainStyler))
    });

    group.bench_function("styled_address_operand", |b| {
        let mut styler = |style: Style, text: &str| match style {
            Style::Register => format!("%{text}"),
            _ => text.to_owned(),
        };
        b.iter(|| render_operand(black_box(&ldr), 1, 0, &mut styler))
    });

    let block = program();
    group.throughput(Throughput::Elements(block.len() as u64));
    group.bench_function("mixed_block", |b| {
        b.iter(|| {
            block
                .iter()
                .enumerate()
                .map(|(pc, i)| render_instruction(black_box(i), pc as u64 * 4, &mut PlainStyler).len())
                .sum::<usize>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_logical_immediate, bench_check, bench_render);
criterion_main!(benches);
