//! Textual rendering of operands.
//!
//! [`render_operand`] turns one operand of a checked [`Instruction`] into its
//! assembly spelling. Every register, immediate, sub-mnemonic and address
//! fragment passes through a [`Styler`] so callers can colour or tag it; the
//! punctuation between fragments is left alone.
//!
//! Besides the text, rendering may produce a comment (the decimal value of a
//! move immediate, the aliases of a condition), a branch target address, and
//! an advisory note such as a write to a read-only system register.
//!
//! ```
//! use a64_opc::inst::{Instruction, Operand, Shifter};
//! use a64_opc::names::Modifier;
//! use a64_opc::qualifier::Qualifier;
//! use a64_opc::render::{render_operand, PlainStyler};
//! use a64_opc::table::find;
//!
//! let inst = Instruction::new(find("add_shift").unwrap())
//!     .with(0, Operand::reg(1).qualified(Qualifier::X))
//!     .with(1, Operand::reg(2).qualified(Qualifier::X))
//!     .with(2, Operand::reg(3).qualified(Qualifier::X).shifted(Shifter::new(Modifier::Lsl, 4)));
//!
//! let out = render_operand(&inst, 2, 0, &mut PlainStyler);
//! assert_eq!(out.text, "x3, lsl #4");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::fmt::Write as _;

use crate::feature::FeatureSet;
use crate::immediate::expand_fp_imm;
use crate::inst::{AddrOffset, Instruction, Operand, OperandValue};
use crate::names::{self, Modifier, RegAccess, SME_VLXN, SVE_PATTERNS, SVE_PRFOPS, SYS_REGS};
use crate::operand::OperandCode;
use crate::qualifier::Qualifier;

// ── Styling ──────────────────────────────────────────────────────────────

/// Category of a rendered fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Style {
    /// Register name.
    Register,
    /// Immediate value.
    Immediate,
    /// Operator or named option (`lsl`, `vgx2`, `ish`, `eq`).
    SubMnemonic,
    /// Resolved address.
    Address,
}

/// Decorates rendered fragments.
pub trait Styler {
    /// Return `text` decorated for `style`.
    fn style(&mut self, style: Style, text: &str) -> String;
}

/// Leaves every fragment unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn style(&mut self, _style: Style, text: &str) -> String {
        text.to_owned()
    }
}

impl<F> Styler for F
where
    F: FnMut(Style, &str) -> String,
{
    fn style(&mut self, style: Style, text: &str) -> String {
        self(style, text)
    }
}

// ── Output ───────────────────────────────────────────────────────────────

/// One rendered operand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rendered {
    /// Operand text; empty when the operand is omitted.
    pub text: String,
    /// Text for the comment column.
    pub comment: Option<String>,
    /// Target of a PC-relative operand.
    pub address: Option<u64>,
    /// Something worth warning about that does not make the operand invalid.
    pub note: Option<Cow<'static, str>>,
}

impl Rendered {
    /// Whether the operand renders to nothing.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render operand `idx` of `inst` located at `pc`.
///
/// System registers are named regardless of the extensions that define
/// them; use [`render_operand_for`] to restrict naming to a CPU.
pub fn render_operand<S: Styler + ?Sized>(inst: &Instruction, idx: usize, pc: u64, styler: &mut S) -> Rendered {
    render_operand_for(FeatureSet::all(), inst, idx, pc, styler)
}

/// Render operand `idx` of `inst` located at `pc`, naming only system
/// registers that a CPU with `features` implements.
pub fn render_operand_for<S: Styler + ?Sized>(
    features: FeatureSet,
    inst: &Instruction,
    idx: usize,
    pc: u64,
    styler: &mut S,
) -> Rendered {
    let Some(op) = inst.operands.get(idx) else {
        return Rendered::default();
    };
    let mut printer = Printer {
        inst,
        idx,
        op,
        pc,
        features,
        styler,
        out: Rendered::default(),
    };
    let text = printer.render();
    Rendered { text, ..printer.out }
}

/// Render the whole instruction as `mnemonic op, op, ...`, skipping omitted
/// operands.
pub fn render_instruction<S: Styler + ?Sized>(inst: &Instruction, pc: u64, styler: &mut S) -> String {
    let mut line = inst.opcode.name.to_owned();
    let mut first = true;
    for idx in 0..inst.num_operands() {
        let op = render_operand(inst, idx, pc, styler);
        if op.is_empty() {
            continue;
        }
        line.push_str(if first { " " } else { ", " });
        line.push_str(&op.text);
        first = false;
    }
    line
}

// ── Printer ──────────────────────────────────────────────────────────────

struct Printer<'a, S: Styler + ?Sized> {
    inst: &'a Instruction,
    idx: usize,
    op: &'a Operand,
    pc: u64,
    features: FeatureSet,
    styler: &'a mut S,
    out: Rendered,
}

use OperandCode as O;

impl<S: Styler + ?Sized> Printer<'_, S> {
    fn reg(&mut self, text: impl AsRef<str>) -> String {
        self.styler.style(Style::Register, text.as_ref())
    }

    fn imm(&mut self, text: impl AsRef<str>) -> String {
        self.styler.style(Style::Immediate, text.as_ref())
    }

    fn sub(&mut self, text: impl AsRef<str>) -> String {
        self.styler.style(Style::SubMnemonic, text.as_ref())
    }

    fn addr(&mut self, text: impl AsRef<str>) -> String {
        self.styler.style(Style::Address, text.as_ref())
    }

    /// The optional operand holds its default value and is left out.
    fn is_default(&self, value: i64) -> bool {
        self.inst.opcode.is_optional(self.idx) && value == self.inst.opcode.default_value()
    }

    fn first_qualifier(&self) -> Qualifier {
        self.inst.operands[0].qualifier
    }

    fn render(&mut self) -> String {
        let op = *self.op;
        match op.code {
            O::Nil => String::new(),

            // ── Integer registers ──
            O::RtSys if !op.present => String::new(),
            O::Rd
            | O::Rn
            | O::Rm
            | O::Rt
            | O::Rt2
            | O::Rs
            | O::Ra
            | O::RtSys
            | O::PairReg
            | O::PairRegOrXzr
            | O::SveRm => {
                if self.is_default(i64::from(op.regno())) {
                    return String::new();
                }
                let name = int_reg_name(op.regno(), op.qualifier, false);
                self.reg(name)
            }
            O::RdSp | O::RnSp | O::RtSp | O::RmSp | O::SveRnSp => {
                let name = int_reg_name(op.regno(), op.qualifier, true);
                self.reg(name)
            }
            O::X16 => self.reg("x16"),
            O::MopsAddrRd | O::MopsAddrRs => {
                let name = self.reg(format!("x{}", op.regno()));
                format!("[{name}]!")
            }
            O::MopsWbRn => {
                let name = self.reg(format!("x{}", op.regno()));
                format!("{name}!")
            }
            O::RmExt => self.extended_reg(),
            O::RmSft => self.shifted_reg(),

            // ── FP and AdvSIMD registers ──
            O::Fd | O::Fn | O::Fm | O::Fa | O::Ft | O::Ft2 | O::Sd | O::Sn | O::Sm | O::SveVd | O::SveVm | O::SveVn => {
                self.reg(format!("{}{}", op.qualifier.name(), op.regno()))
            }
            O::Va | O::Vd | O::Vn | O::Vm => self.reg(format!("v{}.{}", op.regno(), op.qualifier.name())),
            O::Ed | O::En | O::Em | O::Em16 => {
                let lane = op.reglane();
                let name = self.reg(format!("v{}.{}", lane.regno, op.qualifier.name()));
                let index = self.imm(lane.index.to_string());
                format!("{name}[{index}]")
            }
            O::VdD1 | O::VnD1 => {
                let name = self.reg(format!("v{}.d", op.regno()));
                let one = self.imm("1");
                format!("{name}[{one}]")
            }
            O::LVn | O::LVt | O::LVtAl | O::LEt => self.reg_list("v", 31),

            // ── SVE vector registers ──
            O::SveZa5
            | O::SveZa16
            | O::SveZd
            | O::SveZm5
            | O::SveZm16
            | O::SveZn
            | O::SveZt
            | O::SmeZm => self.reg(sve_name("z", op.regno(), op.qualifier)),
            O::SveZm3Index
            | O::SveZm3_22Index
            | O::SveZm3_11Index
            | O::SveZm4Index
            | O::SveZm4_11Index
            | O::SveZnIndex
            | O::SveZn5Index
            | O::SveZmImm4
            | O::SmeZnIndex1_16
            | O::SmeZnIndex2_15
            | O::SmeZnIndex3_14
            | O::SmeZmIndex1
            | O::SmeZmIndex2
            | O::SmeZmIndex3_10
            | O::SmeZmIndex4_10 => {
                let lane = op.reglane();
                let name = self.reg(sve_name("z", lane.regno, op.qualifier));
                let index = self.imm(lane.index.to_string());
                format!("{name}[{index}]")
            }
            O::SmePNn3Index1 | O::SmePNn3Index2 => {
                let lane = op.reglane();
                let name = self.reg(format!("pn{}", lane.regno));
                let index = self.imm(lane.index.to_string());
                format!("{name}[{index}]")
            }
            O::SmeZAda2b | O::SmeZAda3b => self.reg(format!("za{}.{}", op.regno(), op.qualifier.name())),
            O::SmeZt0 => self.reg("zt0"),
            O::SmeZt0Index => {
                let name = self.reg("zt0");
                let index = self.imm(op.imm_value().to_string());
                format!("{name}[{index}]")
            }
            O::SmeZt0List => {
                let name = self.reg("zt0");
                format!("{{{name}}}")
            }
            O::SmeSmZa => self.reg(if op.regno() == u32::from(b's') { "sm" } else { "za" }),
            O::SmeListOf64bitTiles => self.tile_list(op.imm_value() as u32),

            // ── Lists ──
            O::SmePdx2 | O::SmePdxN => self.reg_list("p", 15),
            O::SmeZdnx2
            | O::SmeZdnx4
            | O::SmeZmx2
            | O::SmeZmx4
            | O::SmeZnx2
            | O::SmeZnx4
            | O::SmeZtx2Strided
            | O::SmeZtx4Strided
            | O::SmeZt2
            | O::SmeZt3
            | O::SmeZt4
            | O::SveZnxN
            | O::SveZtxN => self.reg_list("z", 31),

            // ── Predicates ──
            O::SvePd
            | O::SvePg3
            | O::SvePg4_5
            | O::SvePg4_10
            | O::SvePg4_16
            | O::SvePm
            | O::SvePn
            | O::SvePt
            | O::SmePm => self.reg(pred_name("p", op.regno(), op.qualifier)),
            O::SvePNd | O::SvePNg4_10 | O::SvePNn | O::SvePNt | O::SmePNd3 | O::SmePNg3 | O::SmePNn => {
                self.reg(pred_name("pn", op.regno(), op.qualifier))
            }

            // ── ZA access ──
            O::SmeZaHvIdxSrc
            | O::SmeZaHvIdxSrcxN
            | O::SmeZaHvIdxDest
            | O::SmeZaHvIdxDestxN
            | O::SmeZaHvIdxLdstr => {
                let za = op.indexed_za();
                let tile = self.reg(format!(
                    "za{}{}.{}",
                    za.regno,
                    if za.v { 'v' } else { 'h' },
                    op.qualifier.name()
                ));
                let index = self.za_index();
                if op.code == O::SmeZaHvIdxLdstr {
                    format!("{{{tile}{index}}}")
                } else {
                    format!("{tile}{index}")
                }
            }
            O::SmeZaArrayOff4
            | O::SmeZaArrayOff3_0
            | O::SmeZaArrayOff3_5
            | O::SmeZaArrayOff1x4
            | O::SmeZaArrayOff2x2
            | O::SmeZaArrayOff2x4
            | O::SmeZaArrayOff3x2 => {
                let array = self.reg(with_suffix("za".to_owned(), op.qualifier));
                let index = self.za_index();
                format!("{array}{index}")
            }
            O::SmeZaArrayVrsb1
            | O::SmeZaArrayVrsh1
            | O::SmeZaArrayVrss1
            | O::SmeZaArrayVrsd1
            | O::SmeZaArrayVrsb2
            | O::SmeZaArrayVrsh2
            | O::SmeZaArrayVrss2
            | O::SmeZaArrayVrsd2 => {
                let za = op.indexed_za();
                let tile = format!("za{}{}", za.regno, if za.v { 'v' } else { 'h' });
                let tile = self.reg(with_suffix(tile, op.qualifier));
                let index = self.za_index();
                format!("{tile}{index}")
            }
            O::SmePnTWmImm => {
                let za = op.indexed_za();
                let pred = self.reg(format!("p{}.{}", za.regno, op.qualifier.name()));
                let sel = self.reg(format!("w{}", za.index.regno));
                let imm = self.imm(za.index.imm.to_string());
                format!("{pred}[{sel}, {imm}]")
            }

            // ── Immediates ──
            O::CRn | O::CRm => self.imm(format!("C{}", op.imm_value())),
            O::SmeVlxN10 | O::SmeVlxN13 => {
                let name = SME_VLXN.get(op.imm_value() as usize).copied().unwrap_or("<invalid>");
                self.sub(name)
            }
            O::FpImm0 => self.imm("#0.0"),
            O::SveI1HalfOne | O::SveI1HalfTwo | O::SveI1ZeroOne => {
                let value = f32::from_bits(op.imm_value() as u32);
                self.imm(format!("#{value:.1}"))
            }
            O::SvePattern => {
                let value = op.imm_value();
                if self.is_default(value) {
                    return String::new();
                }
                self.pattern(value)
            }
            O::SvePatternScaled => {
                let value = op.imm_value();
                if self.is_default(value) && !op.shifter.operator_present {
                    return String::new();
                }
                let pattern = self.pattern(value);
                if op.shifter.operator_present {
                    let mul = self.sub("mul");
                    let amount = self.imm(format!("#{}", op.shifter.amount));
                    format!("{pattern}, {mul} {amount}")
                } else {
                    pattern
                }
            }
            O::SvePrfop => {
                let value = op.imm_value();
                match SVE_PRFOPS.get(value as usize).copied().flatten() {
                    Some(name) => self.sub(name),
                    None => self.imm(format!("#{value}")),
                }
            }
            O::ImmMov => self.move_imm(),
            O::Aimm | O::Half | O::Limm | O::SveInvLimm | O::SveLimm | O::SveLimmMov => {
                let imm = self.imm(format!("#0x{:x}", op.imm_value()));
                self.with_lsl(imm)
            }
            O::SimdImm | O::SimdImmSft => {
                let imm = self.imm(format!("#0x{:x}", op.imm_value()));
                let shifter = op.shifter;
                if (shifter.amount == 0 && shifter.kind == Modifier::Lsl) || shifter.kind == Modifier::None {
                    imm
                } else {
                    let kind = self.sub(shifter.kind.name());
                    let amount = self.imm(format!("#{}", shifter.amount));
                    format!("{imm}, {kind} {amount}")
                }
            }
            O::SveAimm | O::SveAsimm => {
                let imm = self.imm(format!("#{}", op.imm_value()));
                self.with_lsl(imm)
            }
            O::FpImm | O::SimdFpImm | O::SveFpImm8 => self.fp_imm(),
            O::CcmpImm | O::Nzcv | O::Exception | O::Uimm4 | O::Uimm4Addg | O::Uimm7 | O::Uimm10 => {
                let value = op.imm_value();
                if self.is_default(value) {
                    return String::new();
                }
                self.imm(format!("#0x{:x}", value as u32))
            }
            O::ImmVlsl
            | O::ImmVlsr
            | O::ShllImm
            | O::Imm0
            | O::Immr
            | O::Imms
            | O::Width
            | O::BitNum
            | O::Fbits
            | O::Undefined
            | O::TmeUimm16
            | O::Uimm3Op1
            | O::Uimm3Op2
            | O::Simm5
            | O::ImmRot1
            | O::ImmRot2
            | O::ImmRot3
            | O::SveShlimmPred
            | O::SveShlimmUnpred
            | O::SveShlimmUnpred22
            | O::SveShrimmPred
            | O::SveShrimmUnpred
            | O::SveShrimmUnpred22
            | O::SveSimm5
            | O::SveSimm5b
            | O::SveSimm6
            | O::SveSimm8
            | O::SveUimm3
            | O::SveUimm7
            | O::SveUimm8
            | O::SveUimm8_53
            | O::SveImmRot1
            | O::SveImmRot2
            | O::SveImmRot3
            | O::CsscSimm8
            | O::CsscUimm8
            | O::SmeShrimm4
            | O::SmeShrimm5 => self.imm(format!("#{}", op.imm_value())),

            // ── Conditions ──
            O::Cond | O::Cond1 => {
                let OperandValue::Cond(cond) = op.value else {
                    return "<invalid>".to_owned();
                };
                let names = cond.names();
                if let [first, second, rest @ ..] = names {
                    let mut comment = format!("{first} = {second}");
                    for alias in rest {
                        let _ = write!(comment, ", {alias}");
                    }
                    self.out.comment = Some(comment);
                }
                self.sub(cond.name())
            }

            // ── Addresses ──
            O::AddrAdrp => {
                let target = (self.pc & !0xfff).wrapping_add_signed(pcrel_offset(&op));
                self.out.address = Some(target);
                self.addr(format!("#0x{target:x}"))
            }
            O::AddrPcrel14 | O::AddrPcrel19 | O::AddrPcrel21 | O::AddrPcrel26 => {
                let target = self.pc.wrapping_add_signed(pcrel_offset(&op));
                self.out.address = Some(target);
                self.addr(format!("#0x{target:x}"))
            }
            O::AddrSimple | O::SimdAddrSimple => {
                let base = self.base_reg();
                format!("[{base}]")
            }
            O::SimdAddrPost => {
                let info = op.addr_info();
                let base = self.base_reg();
                let post = match info.offset {
                    AddrOffset::Reg(r) => self.reg(format!("x{r}")),
                    AddrOffset::Imm(imm) => self.imm(format!("#{imm}")),
                };
                format!("[{base}], {post}")
            }
            O::AddrRegoff
            | O::SveAddrR
            | O::SveAddrRr
            | O::SveAddrRrLsl1
            | O::SveAddrRrLsl2
            | O::SveAddrRrLsl3
            | O::SveAddrRrLsl4
            | O::SveAddrRx
            | O::SveAddrRxLsl1
            | O::SveAddrRxLsl2
            | O::SveAddrRxLsl3 => {
                let base = self.base_reg();
                let offset = self.offset_reg_name(|kind, r| {
                    let width = if matches!(kind, Modifier::Uxtw | Modifier::Sxtw) { 'w' } else { 'x' };
                    int_reg_name_with(r, width)
                });
                self.register_offset(base, offset)
            }
            O::SveAddrRz
            | O::SveAddrRzLsl1
            | O::SveAddrRzLsl2
            | O::SveAddrRzLsl3
            | O::SveAddrRzXtw14
            | O::SveAddrRzXtw22
            | O::SveAddrRzXtw1_14
            | O::SveAddrRzXtw1_22
            | O::SveAddrRzXtw2_14
            | O::SveAddrRzXtw2_22
            | O::SveAddrRzXtw3_14
            | O::SveAddrRzXtw3_22 => {
                let base = self.base_reg();
                let suffix = if op.qualifier == Qualifier::SD { "d" } else { "s" };
                let offset = self.offset_reg_name(|_, r| format!("z{r}.{suffix}"));
                self.register_offset(base, offset)
            }
            O::SveAddrZzLsl | O::SveAddrZzSxtw | O::SveAddrZzUxtw => {
                let info = op.addr_info();
                let base = self.reg(sve_name("z", info.base_regno, op.qualifier));
                let offset = self.offset_reg_name(|_, r| sve_name("z", r, op.qualifier));
                self.register_offset(base, offset)
            }
            O::SveAddrZiU5 | O::SveAddrZiU5x2 | O::SveAddrZiU5x4 | O::SveAddrZiU5x8 => {
                let info = op.addr_info();
                let base = self.reg(sve_name("z", info.base_regno, op.qualifier));
                self.immediate_offset(base)
            }
            O::AddrSimm7
            | O::AddrSimm9
            | O::AddrSimm9_2
            | O::AddrSimm10
            | O::AddrSimm11
            | O::AddrSimm13
            | O::AddrOffset
            | O::Rcpc3AddrOptPreindWb
            | O::Rcpc3AddrOptPostind
            | O::Rcpc3AddrPreindWb
            | O::Rcpc3AddrPostind
            | O::Rcpc3AddrOffset
            | O::SmeAddrRiU4xVl
            | O::SveAddrRiS4xVl
            | O::SveAddrRiS4x2xVl
            | O::SveAddrRiS4x3xVl
            | O::SveAddrRiS4x4xVl
            | O::SveAddrRiS6xVl
            | O::SveAddrRiS9xVl
            | O::SveAddrRiU6
            | O::SveAddrRiU6x2
            | O::SveAddrRiU6x4
            | O::SveAddrRiU6x8
            | O::SveAddrRiS4x16
            | O::SveAddrRiS4x32 => {
                let base = self.base_reg();
                self.immediate_offset(base)
            }
            O::AddrUimm12 => {
                let base = self.base_reg();
                let imm = op.addr_info().imm();
                if imm != 0 {
                    let imm = self.imm(format!("#{imm}"));
                    format!("[{base}, {imm}]")
                } else {
                    format!("[{base}]")
                }
            }

            // ── System ──
            O::Sysreg => self.sysreg(),
            O::Pstatefield => {
                let OperandValue::Pstate { value, crm } = op.value else {
                    return "<invalid>".to_owned();
                };
                match names::pstate_field(value, crm) {
                    Some(field) => self.reg(field.name),
                    None => self.reg(format!("#0x{value:x}")),
                }
            }
            O::SysregAt | O::SysregDc | O::SysregIc | O::SysregTlbi => {
                let OperandValue::SysIns { kind, value } = op.value else {
                    return "<invalid>".to_owned();
                };
                match kind.lookup(value) {
                    Some(ins) => self.sub(ins.name),
                    None => self.sub(names::sysreg_generic_name(value)),
                }
            }
            O::Barrier | O::BarrierDsbNxs => {
                let value = option_value(&op);
                match names::barrier(value) {
                    Some(b) if b.name.starts_with('#') => self.imm(b.name),
                    Some(b) => self.sub(b.name),
                    None => self.imm(format!("#0x{value:02x}")),
                }
            }
            O::BarrierIsb => {
                let value = option_value(&op);
                if self.is_default(i64::from(value)) {
                    return String::new();
                }
                self.imm(format!("#0x{value:x}"))
            }
            O::BarrierPsb => self.sub("csync"),
            O::BarrierGcsb => self.sub("dsync"),
            O::BtiTarget => {
                let value = option_value(&op);
                match names::hint_option(value) {
                    Some(hint) if hint.noprint => String::new(),
                    Some(hint) => self.sub(hint.name),
                    None => self.imm(format!("#0x{value:x}")),
                }
            }
            O::Prfop => {
                let value = option_value(&op);
                match names::PRFOPS.get(value as usize).copied().flatten() {
                    Some(name) => self.sub(name),
                    None => self.imm(format!("#0x{value:02x}")),
                }
            }
        }
    }

    // ── Registers ──

    fn extended_reg(&mut self) -> String {
        let op = *self.op;
        let inst = self.inst;
        let ops = &inst.operands;
        let name = self.reg(int_reg_name(op.regno(), op.qualifier, false));
        let mut kind = op.shifter.kind;
        if kind == Modifier::None && !op.shifter.operator_present {
            return name;
        }
        let sp_involved = ops[0].is_stack_pointer() || (self.idx == 2 && ops[1].is_stack_pointer());
        if sp_involved
            && ((op.qualifier == Qualifier::W && ops[0].qualifier == Qualifier::W && kind == Modifier::Uxtw)
                || (op.qualifier == Qualifier::X && kind == Modifier::Uxtx))
        {
            if op.shifter.amount == 0 {
                return name;
            }
            kind = Modifier::Lsl;
        }
        let kind = self.sub(kind.name());
        if op.shifter.amount != 0 {
            let amount = self.imm(format!("#{}", op.shifter.amount));
            format!("{name}, {kind} {amount}")
        } else {
            format!("{name}, {kind}")
        }
    }

    fn shifted_reg(&mut self) -> String {
        let op = *self.op;
        let name = self.reg(int_reg_name(op.regno(), op.qualifier, false));
        let shifter = op.shifter;
        if shifter.kind == Modifier::None || (shifter.kind == Modifier::Lsl && shifter.amount == 0) {
            return name;
        }
        let kind = self.sub(shifter.kind.name());
        let amount = self.imm(format!("#{}", shifter.amount));
        format!("{name}, {kind} {amount}")
    }

    /// `{ v0.4s-v3.4s }`-style list, or an explicit list for strided and
    /// single-register forms.
    fn reg_list(&mut self, prefix: &str, mask: u32) -> String {
        let op = *self.op;
        let list = op.reglist();
        let name = |regno: u32| with_suffix(format!("{prefix}{}", regno & mask), op.qualifier);
        let ranged = list.stride == 1
            && list.num_regs > 1
            && !matches!(op.code, O::SmeZt2 | O::SmeZt3 | O::SmeZt4);

        let mut text = String::from("{");
        if ranged {
            let first = self.reg(name(list.first_regno));
            let last = self.reg(name(list.first_regno.wrapping_add(list.num_regs - 1)));
            let _ = write!(text, "{first}-{last}");
        } else {
            for k in 0..list.num_regs {
                if k > 0 {
                    text.push_str(", ");
                }
                let reg = self.reg(name(list.first_regno.wrapping_add(k.wrapping_mul(list.stride))));
                text.push_str(&reg);
            }
        }
        text.push('}');
        if let Some(index) = list.index {
            let index = self.imm(index.to_string());
            let _ = write!(text, "[{index}]");
        }
        text
    }

    /// `{ za0.d, za3.d }`, using the widest tiles that cover the mask.
    fn tile_list(&mut self, mut mask: u32) -> String {
        const TILES: [(&str, u32); 15] = [
            ("za", 0xff),
            ("za0.h", 0x55),
            ("za1.h", 0xaa),
            ("za0.s", 0x11),
            ("za1.s", 0x22),
            ("za2.s", 0x44),
            ("za3.s", 0x88),
            ("za0.d", 0x01),
            ("za1.d", 0x02),
            ("za2.d", 0x04),
            ("za3.d", 0x08),
            ("za4.d", 0x10),
            ("za5.d", 0x20),
            ("za6.d", 0x40),
            ("za7.d", 0x80),
        ];
        let mut parts = Vec::new();
        for (name, bits) in TILES {
            if mask & bits == bits {
                mask &= !bits;
                parts.push(self.reg(name));
            }
            if mask == 0 {
                break;
            }
        }
        format!("{{{}}}", parts.join(", "))
    }

    /// `[Wv, imm{:end}{, vgxN}]`
    fn za_index(&mut self) -> String {
        let za = self.op.indexed_za();
        let sel = self.reg(format!("w{}", za.index.regno));
        let mut text = format!("[{sel}, ");
        let first = self.imm(za.index.imm.to_string());
        text.push_str(&first);
        if za.index.countm1 != 0 {
            let last = self.imm(za.index.imm.wrapping_add(i64::from(za.index.countm1)).to_string());
            let _ = write!(text, ":{last}");
        }
        if za.group_size != 0 {
            let vgx = self.sub(format!("vgx{}", za.group_size));
            let _ = write!(text, ", {vgx}");
        }
        text.push(']');
        text
    }

    // ── Immediates ──

    fn pattern(&mut self, value: i64) -> String {
        match SVE_PATTERNS.get(value as usize).copied().flatten() {
            Some(name) => self.reg(name),
            None => self.imm(format!("#{value}")),
        }
    }

    fn with_lsl(&mut self, imm: String) -> String {
        let amount = self.op.shifter.amount;
        if amount == 0 {
            return imm;
        }
        let lsl = self.sub("lsl");
        let amount = self.imm(format!("#{amount}"));
        format!("{imm}, {lsl} {amount}")
    }

    fn move_imm(&mut self) -> String {
        let value = self.op.imm_value();
        match self.first_qualifier().esize() {
            4 => {
                let v = value as i32;
                self.out.comment = Some(format!("#{v}"));
                self.imm(format!("#0x{:x}", v as u32))
            }
            8 => {
                self.out.comment = Some(format!("#{value}"));
                self.imm(format!("#0x{:x}", value as u64))
            }
            _ => "<invalid>".to_owned(),
        }
    }

    fn fp_imm(&mut self) -> String {
        let imm8 = (self.op.imm_value() & 0xff) as u32;
        let value = match self.first_qualifier().esize() {
            2 | 4 => expand_fp_imm(4, imm8).map(|bits| f64::from(f32::from_bits(bits as u32))),
            8 => expand_fp_imm(8, imm8).map(f64::from_bits),
            _ => None,
        };
        let Some(value) = value else {
            return "<invalid>".to_owned();
        };
        self.out.comment = Some(format!("#{value}"));
        self.imm(format!("#{}", scientific(value)))
    }

    // ── Addresses ──

    fn base_reg(&mut self) -> String {
        let base = self.op.addr_info().base_regno;
        self.reg(int_reg_name(base, Qualifier::X, true))
    }

    /// Name of the offset register, built by `name` from the effective
    /// extend and the register number.
    fn offset_reg_name(&mut self, name: impl FnOnce(Modifier, u32) -> String) -> String {
        let op = *self.op;
        let kind = effective_kind(&op);
        let regno = op.addr_info().index_reg().unwrap_or(31);
        self.reg(name(kind, regno))
    }

    /// `[base, offset{, extend{ #amount}}]`
    fn register_offset(&mut self, base: String, offset: String) -> String {
        let op = *self.op;
        let kind = effective_kind(&op);
        let shifter = op.shifter;
        let print_amount = shifter.amount != 0 || (op.qualifier == Qualifier::SB && shifter.amount_present);
        let print_extend = kind != Modifier::Lsl || print_amount;

        let mut text = format!("[{base}, {offset}");
        if print_extend {
            let kind = self.sub(kind.name());
            let _ = write!(text, ", {kind}");
            if print_amount {
                let amount = self.imm(format!("#{}", shifter.amount));
                let _ = write!(text, " {amount}");
            }
        }
        text.push(']');
        text
    }

    /// `[base, #imm]`, `[base, #imm]!`, `[base], #imm` or `[base, #imm, mul vl]`.
    fn immediate_offset(&mut self, base: String) -> String {
        let op = *self.op;
        let info = op.addr_info();
        let imm = info.imm();
        if info.writeback {
            if info.preind {
                if op.code == O::AddrSimm10 && imm == 0 {
                    return format!("[{base}]!");
                }
                let imm = self.imm(format!("#{imm}"));
                format!("[{base}, {imm}]!")
            } else {
                let imm = self.imm(format!("#{imm}"));
                format!("[{base}], {imm}")
            }
        } else if op.shifter.operator_present {
            let imm = self.imm(format!("#{imm}"));
            let mul_vl = self.sub("mul vl");
            format!("[{base}, {imm}, {mul_vl}]")
        } else if imm != 0 {
            let imm = self.imm(format!("#{imm}"));
            format!("[{base}, {imm}]")
        } else {
            format!("[{base}]")
        }
    }

    // ── System ──

    fn sysreg(&mut self) -> String {
        let OperandValue::SysReg { value, access } = self.op.value else {
            return "<invalid>".to_owned();
        };
        let mut fallback = None;
        for reg in SYS_REGS.iter().filter(|r| r.value == value) {
            let direction_ok =
                reg.access == RegAccess::ReadWrite || access == RegAccess::ReadWrite || reg.access == access;
            if direction_ok && self.features.has_all(reg.features) {
                return self.reg(reg.name);
            }
            if fallback.is_none() {
                fallback = Some(reg);
            }
        }
        if let Some(reg) = fallback {
            self.out.note = match reg.access {
                RegAccess::Write => Some("reading from a write-only register".into()),
                RegAccess::Read => Some("writing to a read-only register".into()),
                RegAccess::ReadWrite => None,
            };
        }
        self.reg(names::sysreg_generic_name(value))
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────

/// `wN`/`xN`, with register 31 naming the stack pointer when `sp` is set and
/// the zero register otherwise. Anything but a 32-bit qualifier is 64-bit.
fn int_reg_name(regno: u32, qualifier: Qualifier, sp: bool) -> String {
    let wide = qualifier.esize() != 4;
    match (regno, sp, wide) {
        (31, true, false) => "wsp".to_owned(),
        (31, true, true) => "sp".to_owned(),
        (31, false, false) => "wzr".to_owned(),
        (31, false, true) => "xzr".to_owned(),
        (r, _, false) => format!("w{r}"),
        (r, _, true) => format!("x{r}"),
    }
}

fn int_reg_name_with(regno: u32, width: char) -> String {
    if regno == 31 {
        format!("{width}zr")
    } else {
        format!("{width}{regno}")
    }
}

fn with_suffix(mut name: String, qualifier: Qualifier) -> String {
    if qualifier != Qualifier::Nil {
        name.push('.');
        name.push_str(qualifier.name());
    }
    name
}

fn sve_name(prefix: &str, regno: u32, qualifier: Qualifier) -> String {
    with_suffix(format!("{prefix}{regno}"), qualifier)
}

/// `pN`, `pN/z`, `pN/m` or `pN.T`.
fn pred_name(prefix: &str, regno: u32, qualifier: Qualifier) -> String {
    match qualifier {
        Qualifier::Nil => format!("{prefix}{regno}"),
        Qualifier::PZ | Qualifier::PM => format!("{prefix}{regno}/{}", qualifier.name()),
        q => format!("{prefix}{regno}.{}", q.name()),
    }
}

/// Extend or shift of an address offset; an unwritten operator is LSL.
fn effective_kind(op: &Operand) -> Modifier {
    if op.shifter.kind == Modifier::None {
        Modifier::Lsl
    } else {
        op.shifter.kind
    }
}

fn pcrel_offset(op: &Operand) -> i64 {
    match op.value {
        OperandValue::Imm(imm) => imm.value,
        OperandValue::Addr(addr) => addr.imm(),
        _ => 0,
    }
}

/// Raw value of a barrier, prefetch or hint operand.
fn option_value(op: &Operand) -> u32 {
    match op.value {
        OperandValue::Barrier(v) | OperandValue::Prfop(v) | OperandValue::Hint(v) => v,
        OperandValue::Imm(imm) => imm.value as u32,
        _ => 0,
    }
}

/// `2.500000000000000000e+00`: eighteen fraction digits, signed exponent of
/// at least two digits.
fn scientific(value: f64) -> String {
    let text = format!("{value:.18e}");
    let Some((mantissa, exp)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exp),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inst::{AddrInfo, IndexedZa, RegList, Shifter, ZaIndex};
    use crate::names::{cpenc, Condition, SysInsKind};
    use crate::table::find;

    fn inst(id: &str) -> Instruction {
        Instruction::new(find(id).expect("in table"))
    }

    fn text(inst: &Instruction, idx: usize) -> String {
        render_operand(inst, idx, 0, &mut PlainStyler).text
    }

    #[test]
    fn integer_registers() {
        let i = inst("add_imm")
            .with(0, Operand::reg(31).qualified(Qualifier::X))
            .with(1, Operand::reg(31).qualified(Qualifier::W));
        assert_eq!(text(&i, 0), "sp");
        assert_eq!(text(&i, 1), "wsp");

        let i = inst("add_shift")
            .with(0, Operand::reg(31).qualified(Qualifier::W))
            .with(1, Operand::reg(7).qualified(Qualifier::X));
        assert_eq!(text(&i, 0), "wzr");
        assert_eq!(text(&i, 1), "x7");
    }

    #[test]
    fn shifted_and_extended_registers() {
        let i = inst("add_shift").with(2, Operand::reg(3).qualified(Qualifier::W).shifted(Shifter::new(Modifier::Lsl, 0)));
        assert_eq!(text(&i, 2), "w3");
        let i = inst("add_shift").with(2, Operand::reg(3).qualified(Qualifier::W).shifted(Shifter::new(Modifier::Asr, 7)));
        assert_eq!(text(&i, 2), "w3, asr #7");

        let base = inst("add_ext")
            .with(0, Operand::reg(31).qualified(Qualifier::X))
            .with(1, Operand::reg(1).qualified(Qualifier::X));
        let uxtx = |amount| base.with(2, Operand::reg(2).qualified(Qualifier::X).shifted(Shifter::new(Modifier::Uxtx, amount)));
        assert_eq!(text(&uxtx(0), 2), "x2");
        assert_eq!(text(&uxtx(2), 2), "x2, lsl #2");

        let not_sp = inst("add_ext")
            .with(0, Operand::reg(0).qualified(Qualifier::X))
            .with(1, Operand::reg(1).qualified(Qualifier::X))
            .with(2, Operand::reg(2).qualified(Qualifier::W).shifted(Shifter::new(Modifier::Sxtw, 0)));
        assert_eq!(text(&not_sp, 2), "w2, sxtw");
    }

    #[test]
    fn styler_sees_each_fragment() {
        let i = inst("add_shift").with(2, Operand::reg(3).qualified(Qualifier::X).shifted(Shifter::new(Modifier::Lsr, 2)));
        let mut seen = Vec::new();
        let mut styler = |style: Style, text: &str| {
            seen.push((style, text.to_owned()));
            format!("<{text}>")
        };
        let out = render_operand(&i, 2, 0, &mut styler);
        assert_eq!(out.text, "<x3>, <lsr> <#2>");
        assert_eq!(
            seen,
            [
                (Style::Register, "x3".to_owned()),
                (Style::SubMnemonic, "lsr".to_owned()),
                (Style::Immediate, "#2".to_owned()),
            ]
        );
    }

    #[test]
    fn vector_registers_and_lists() {
        // Numbering wraps around the register file.
        let i = inst("ld1_multi").with(0, Operand::list(30, 3, 1).qualified(Qualifier::V4S));
        assert_eq!(text(&i, 0), "{v30.4s-v0.4s}");

        let mut lane = RegList { first_regno: 2, num_regs: 2, stride: 1, index: Some(1) };
        let i = inst("ld2_lane_post").with(0, Operand::new(OperandValue::RegList(lane)).qualified(Qualifier::SS));
        assert_eq!(text(&i, 0), "{v2.s-v3.s}[1]");

        lane.num_regs = 1;
        let i = inst("ld1_lane").with(0, Operand::new(OperandValue::RegList(lane)).qualified(Qualifier::SD));
        assert_eq!(text(&i, 0), "{v2.d}[1]");

        let i = inst("ld1w_strided_x2").with(0, Operand::list(0, 2, 8).qualified(Qualifier::SS));
        assert_eq!(text(&i, 0), "{z0.s, z8.s}");
    }

    #[test]
    fn predicates() {
        let i = inst("add_sve_pred")
            .with(0, Operand::reg(4).qualified(Qualifier::SH))
            .with(1, Operand::reg(3).qualified(Qualifier::PM));
        assert_eq!(text(&i, 0), "z4.h");
        assert_eq!(text(&i, 1), "p3/m");

        let i = inst("ptrue").with(0, Operand::reg(2).qualified(Qualifier::SB));
        assert_eq!(text(&i, 0), "p2.b");
    }

    #[test]
    fn optional_operands_are_omitted_at_default() {
        let i = inst("ptrue").with(1, Operand::imm(0x1f));
        assert_eq!(text(&i, 1), "");
        let i = inst("ptrue").with(1, Operand::imm(14));
        assert_eq!(text(&i, 1), "#14");
        let i = inst("ptrue").with(1, Operand::imm(0x1e));
        assert_eq!(text(&i, 1), "mul3");
        let i = inst("ptrue").with(1, Operand::imm(0));
        assert_eq!(text(&i, 1), "pow2");

        let scaled = inst("cntb").with(1, Operand::imm(0x1f).shifted(Shifter::new(Modifier::Mul, 4)));
        assert_eq!(text(&scaled, 1), "all, mul #4");

        assert_eq!(text(&inst("isb").with(0, Operand::new(OperandValue::Barrier(0xf))), 0), "");
        assert_eq!(text(&inst("isb").with(0, Operand::new(OperandValue::Barrier(3))), 0), "#0x3");
    }

    #[test]
    fn move_immediates_carry_a_comment() {
        let i = inst("mov_movz")
            .with(0, Operand::reg(0).qualified(Qualifier::W))
            .with(1, Operand::imm(-2));
        let out = render_operand(&i, 1, 0, &mut PlainStyler);
        assert_eq!(out.text, "#0xfffffffe");
        assert_eq!(out.comment.as_deref(), Some("#-2"));

        let i = inst("mov_movz")
            .with(0, Operand::reg(0).qualified(Qualifier::X))
            .with(1, Operand::imm(0x1234_0000));
        let out = render_operand(&i, 1, 0, &mut PlainStyler);
        assert_eq!(out.text, "#0x12340000");
        assert_eq!(out.comment.as_deref(), Some("#305397760"));
    }

    #[test]
    fn fp_immediates() {
        // imm8 0x04 is 2.5.
        let i = inst("fmov_imm")
            .with(0, Operand::reg(0).qualified(Qualifier::SD))
            .with(1, Operand::fp_imm(0x04));
        let out = render_operand(&i, 1, 0, &mut PlainStyler);
        assert_eq!(out.text, "#2.500000000000000000e+00");
        assert_eq!(out.comment.as_deref(), Some("#2.5"));

        // imm8 0x70 is 1.0 and 0xf0 is -1.0.
        let i = inst("fmov_imm")
            .with(0, Operand::reg(0).qualified(Qualifier::SS))
            .with(1, Operand::fp_imm(0xf0));
        assert_eq!(text(&i, 1), "#-1.000000000000000000e+00");
    }

    #[test]
    fn logical_and_shifted_immediates() {
        let i = inst("and_imm").with(2, Operand::imm(0xff));
        assert_eq!(text(&i, 2), "#0xff");
        let i = inst("add_imm").with(2, Operand::imm(1).shifted(Shifter::new(Modifier::Lsl, 12)));
        assert_eq!(text(&i, 2), "#0x1, lsl #12");

        let movi = |shifter| inst("movi_s_lsl").with(1, Operand::imm(0xab).shifted(shifter));
        assert_eq!(text(&movi(Shifter::new(Modifier::Lsl, 0)), 1), "#0xab");
        assert_eq!(text(&movi(Shifter::new(Modifier::Lsl, 8)), 1), "#0xab, lsl #8");
        assert_eq!(text(&movi(Shifter::new(Modifier::Msl, 16)), 1), "#0xab, msl #16");
    }

    #[test]
    fn conditions_list_aliases_in_comment() {
        let i = inst("ccmp_imm").with(3, Operand::cond(Condition::from_value(2)));
        let out = render_operand(&i, 3, 0, &mut PlainStyler);
        assert_eq!(out.text, "cs");
        assert_eq!(out.comment.as_deref(), Some("cs = hs, nlast"));

        let out = render_operand(&inst("ccmp_imm").with(3, Operand::cond(Condition::GE)), 3, 0, &mut PlainStyler);
        assert_eq!(out.comment.as_deref(), Some("ge = tcont"));
        let out = render_operand(&inst("ccmp_imm").with(3, Operand::cond(Condition::AL)), 3, 0, &mut PlainStyler);
        assert_eq!(out.comment, None);
    }

    #[test]
    fn pc_relative_targets() {
        let b = inst("b").with(0, Operand::imm(-8));
        let out = render_operand(&b, 0, 0x1000, &mut PlainStyler);
        assert_eq!(out.text, "#0xff8");
        assert_eq!(out.address, Some(0xff8));

        let adrp = inst("adrp").with(1, Operand::imm(0x2000));
        let out = render_operand(&adrp, 1, 0x4_0abc, &mut PlainStyler);
        assert_eq!(out.text, "#0x42000");
        assert_eq!(out.address, Some(0x4_2000));
    }

    #[test]
    fn immediate_offset_addresses() {
        let ldr = |addr| inst("ldr_indexed").with(1, Operand::addr(addr).qualified(Qualifier::SS));
        assert_eq!(text(&ldr(AddrInfo::base(1).with_imm(8).pre_indexed()), 1), "[x1, #8]!");
        assert_eq!(text(&ldr(AddrInfo::base(31).with_imm(-16).post_indexed()), 1), "[sp], #-16");
        assert_eq!(text(&ldr(AddrInfo::base(2)), 1), "[x2]");
        assert_eq!(text(&ldr(AddrInfo::base(2).with_imm(4)), 1), "[x2, #4]");

        let ldraa = inst("ldraa").with(1, Operand::addr(AddrInfo::base(3).pre_indexed()));
        assert_eq!(text(&ldraa, 1), "[x3]!");

        let sve = inst("ld1w_sve_imm").with(
            2,
            Operand::addr(AddrInfo::base(0).with_imm(-2)).shifted(Shifter::new(Modifier::MulVl, 0)),
        );
        assert_eq!(text(&sve, 2), "[x0, #-2, mul vl]");

        let pos = inst("ldr_pos").with(1, Operand::addr(AddrInfo::base(5).with_imm(0)));
        assert_eq!(text(&pos, 1), "[x5]");
    }

    #[test]
    fn register_offset_addresses() {
        let ldr = |shifter, q| {
            inst("ldr_regoff").with(1, Operand::addr(AddrInfo::base(1).with_reg(2)).qualified(q).shifted(shifter))
        };
        assert_eq!(text(&ldr(Shifter::default(), Qualifier::SS), 1), "[x1, x2]");
        assert_eq!(text(&ldr(Shifter::new(Modifier::Lsl, 2), Qualifier::SS), 1), "[x1, x2, lsl #2]");
        assert_eq!(text(&ldr(Shifter::new(Modifier::Sxtw, 0), Qualifier::SS), 1), "[x1, w2, sxtw]");
        assert_eq!(text(&ldr(Shifter::new(Modifier::Uxtw, 2), Qualifier::SS), 1), "[x1, w2, uxtw #2]");
        // An explicit zero amount survives only for byte accesses.
        assert_eq!(text(&ldr(Shifter::new(Modifier::Lsl, 0), Qualifier::SB), 1), "[x1, x2, lsl #0]");
    }

    #[test]
    fn simd_post_index() {
        let post = |info| inst("ld1_multi_post").with(1, Operand::addr(info));
        assert_eq!(text(&post(AddrInfo::base(0).with_reg(2).post_indexed()), 1), "[x0], x2");
        assert_eq!(text(&post(AddrInfo::base(0).with_imm(16).post_indexed()), 1), "[x0], #16");
    }

    #[test]
    fn za_operands() {
        let za = IndexedZa {
            regno: 1,
            index: ZaIndex { regno: 12, imm: 3, countm1: 0 },
            group_size: 0,
            v: true,
        };
        let i = inst("mova_tile_to_vec").with(2, Operand::za(za).qualified(Qualifier::SS));
        assert_eq!(text(&i, 2), "za1v.s[w12, 3]");

        let i = inst("ld1w_za").with(0, Operand::za(za).qualified(Qualifier::SS));
        assert_eq!(text(&i, 0), "{za1v.s[w12, 3]}");

        let array = IndexedZa {
            regno: 0,
            index: ZaIndex { regno: 8, imm: 2, countm1: 1 },
            group_size: 2,
            v: false,
        };
        let i = inst("fmlal_za").with(0, Operand::za(array).qualified(Qualifier::SS));
        assert_eq!(text(&i, 0), "za.s[w8, 2:3, vgx2]");

        let zero = |mask| inst("zero_za").with(0, Operand::imm(mask));
        assert_eq!(text(&zero(0xff), 0), "{za}");
        assert_eq!(text(&zero(0x55), 0), "{za0.h}");
        assert_eq!(text(&zero(0x13), 0), "{za0.s, za1.d}");
        assert_eq!(text(&zero(0), 0), "{}");
    }

    #[test]
    fn sme_mode_operand() {
        let sm = inst("smstart").with(0, Operand::reg(u32::from(b's')));
        assert_eq!(text(&sm, 0), "sm");
        let za = inst("smstart").with(0, Operand::reg(u32::from(b'z')));
        assert_eq!(text(&za, 0), "za");
    }

    #[test]
    fn system_registers_and_access_notes() {
        let midr = cpenc(3, 0, 0, 0, 0);
        let read = inst("mrs").with(1, Operand::new(OperandValue::SysReg { value: midr, access: RegAccess::Read }));
        let out = render_operand(&read, 1, 0, &mut PlainStyler);
        assert_eq!(out.text, "midr_el1");
        assert_eq!(out.note, None);

        let write = inst("msr_reg").with(0, Operand::new(OperandValue::SysReg { value: midr, access: RegAccess::Write }));
        let out = render_operand(&write, 0, 0, &mut PlainStyler);
        assert_eq!(out.text, "s3_0_c0_c0_0");
        assert_eq!(out.note.as_deref(), Some("writing to a read-only register"));

        let eoir = cpenc(3, 0, 12, 12, 1);
        let read = inst("mrs").with(1, Operand::new(OperandValue::SysReg { value: eoir, access: RegAccess::Read }));
        let out = render_operand(&read, 1, 0, &mut PlainStyler);
        assert_eq!(out.note.as_deref(), Some("reading from a write-only register"));

        let svcr = cpenc(3, 3, 4, 2, 2);
        let op = Operand::new(OperandValue::SysReg { value: svcr, access: RegAccess::Read });
        let out = render_operand_for(FeatureSet::base(), &inst("mrs").with(1, op), 1, 0, &mut PlainStyler);
        assert_eq!(out.text, "s3_3_c4_c2_2");
        assert_eq!(out.note, None);
    }

    #[test]
    fn system_options() {
        let dmb = |v| inst("dmb").with(0, Operand::new(OperandValue::Barrier(v)));
        assert_eq!(text(&dmb(0xb), 0), "ish");
        assert_eq!(text(&dmb(0x4), 0), "#0x04");

        let bti = |v| inst("bti").with(0, Operand::new(OperandValue::Hint(v)));
        assert_eq!(text(&bti(0x20), 0), "");
        assert_eq!(text(&bti(0x26), 0), "jc");

        let prfm = |v| inst("prfm_pos").with(0, Operand::new(OperandValue::Prfop(v)));
        assert_eq!(text(&prfm(0), 0), "pldl1keep");
        assert_eq!(text(&prfm(0x1f), 0), "#0x1f");

        assert_eq!(text(&inst("psb"), 0), "csync");

        let dc = inst("dc").with(0, Operand::new(OperandValue::SysIns { kind: SysInsKind::Dc, value: 0x0fffff }));
        assert!(text(&dc, 0).starts_with('s'));
    }

    #[test]
    fn mops_operands() {
        let i = inst("cpyfp")
            .with(0, Operand::reg(0))
            .with(1, Operand::reg(1))
            .with(2, Operand::reg(2));
        assert_eq!(render_instruction(&i, 0, &mut PlainStyler), "cpyfp [x0]!, [x1]!, x2!");
    }

    #[test]
    fn scientific_exponent_padding() {
        assert_eq!(scientific(0.125), "1.250000000000000000e-01");
        assert_eq!(scientific(31.0), "3.100000000000000000e+01");
        assert_eq!(scientific(1e100), "1.000000000000000000e+100");
    }
}
