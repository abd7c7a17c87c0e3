//! # a64-opc: AArch64 operand constraint checking
//!
//! `a64-opc` decides whether an AArch64 instruction's operands are legal for
//! its opcode: it resolves operand qualifiers against the opcode's accepted
//! qualifier sequences, validates every operand against the rules of its
//! class, runs whole-instruction verifiers, enforces the MOVPRFX and MOPS
//! sequencing rules, and renders operands back to assembly text.
//!
//! ## Quick Start
//!
//! ```rust
//! use a64_opc::{Checker, Instruction, Operand, Qualifier};
//! use a64_opc::table::find;
//!
//! let mut add = Instruction::new(find("add_imm").unwrap())
//!     .with(0, Operand::reg(0).qualified(Qualifier::X))
//!     .with(1, Operand::reg(31).qualified(Qualifier::X))
//!     .with(2, Operand::imm(16));
//!
//! let mut checker = Checker::new();
//! checker.check(&mut add, 0).unwrap();
//!
//! let mut too_big = add.with(2, Operand::imm(4096));
//! let err = checker.check(&mut too_big, 0).unwrap_err();
//! assert_eq!(err.to_string(), "immediate out of range at operand 3");
//! assert_eq!(err.operand_index(), Some(2));
//! ```
//!
//! ## Features
//!
//! - **Qualifier matching**: picks the accepted qualifier sequence that
//!   best fits the operands and fills in the unknown ones.
//! - **Constraint checks**: registers, lanes, lists, ZA slices, addressing
//!   modes, immediates and system operands, with structured errors.
//! - **Sequences**: MOVPRFX prefix rules and MOPS prologue/main/epilogue
//!   ordering across consecutive instructions.
//! - **Rendering**: operand text with a styling callback, comments,
//!   branch targets and advisory notes.
//! - **`serde`**: optional serialization of the data model.

#![forbid(unsafe_code)]
// ── Pedantic lint policy ─────────────────────────────────────────────────
// Encoding work narrows and re-signs integers between field widths all the
// time, and the tables are dense hex literals with long match arms.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::unreadable_literal,
    clippy::match_same_arms,
    clippy::redundant_closure_for_method_calls,
    clippy::bool_to_int_with_if,
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::needless_raw_string_hashes,
    clippy::semicolon_if_nothing_returned,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::similar_names,
    clippy::fn_params_excessive_bools,
    clippy::too_many_lines,
    clippy::single_match_else,
    clippy::manual_let_else,
    clippy::unnecessary_wraps,
    clippy::unused_self,
    clippy::map_unwrap_or,
    clippy::many_single_char_names,
    clippy::redundant_else,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc,
    clippy::needless_continue
)]

/// Checking front door: features, constraints, verifiers and sequences.
pub mod checker;
/// Per-operand constraint checks.
pub mod constraint;
/// Operand diagnostics.
pub mod error;
/// Architecture extensions and CPU feature sets.
pub mod feature;
/// Instruction bit-field table and extraction.
pub mod field;
/// Immediate encodability helpers (logical, wide move, FP, SVE).
pub mod immediate;
/// Instructions and operand payloads.
pub mod inst;
/// Qualifier sequence matching.
pub mod matcher;
/// Named operand values: conditions, modifiers, options, system registers.
pub mod names;
/// Opcode descriptors.
pub mod opcode;
/// Operand codes and their static descriptors.
pub mod operand;
/// Operand qualifiers.
pub mod qualifier;
/// Range, alignment and bit-field primitives.
pub mod range;
/// Operand rendering.
pub mod render;
/// MOVPRFX and MOPS sequence verification.
pub mod sequence;
/// The opcode table.
pub mod table;
/// Whole-instruction verifiers and CPU support.
pub mod verify;

// Re-exports
pub use checker::{CheckError, Checker};
pub use constraint::{check_operand, match_operands_constraint};
pub use error::{ErrorKind, OperandError, RangeKind};
pub use feature::{Feature, FeatureSet};
pub use inst::{AddrInfo, Instruction, Operand, OperandValue, Shifter};
pub use matcher::match_operands_qualifier;
pub use names::{Condition, Modifier};
pub use opcode::Opcode;
pub use operand::{OperandClass, OperandCode};
pub use qualifier::Qualifier;
pub use render::{render_operand, PlainStyler, Rendered, Style, Styler};
pub use sequence::InsnSequence;
pub use verify::{cpu_supports, verify, VerifyError};
