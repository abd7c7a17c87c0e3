//! Structured operand diagnostics.
//!
//! Every failing check produces an [`OperandError`]: a closed [`ErrorKind`]
//! tag with its typed payload, the offending operand index, and a
//! `non_fatal` hint. Message text is built only when the error is
//! displayed, so the same checks can run silently while exploring
//! alternative opcodes.

use std::borrow::Cow;
use std::fmt;

/// What an out-of-range value was measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeKind {
    /// A plain immediate operand.
    Immediate,
    /// An address offset.
    Offset,
    /// A register number.
    RegisterNumber,
    /// A vector lane or tile slice index.
    ElementIndex,
    /// A shift or extend amount.
    ShiftAmount,
    /// A `mul #imm` multiplier.
    Multiplier,
}

impl fmt::Display for RangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RangeKind::Immediate => "immediate value",
            RangeKind::Offset => "immediate offset",
            RangeKind::RegisterNumber => "register number",
            RangeKind::ElementIndex => "register element index",
            RangeKind::ShiftAmount => "shift amount",
            RangeKind::Multiplier => "multiplier",
        };
        f.write_str(s)
    }
}

/// The closed set of operand diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Structural problem with an operand.
    Syntax {
        /// Specific description, if any.
        msg: Option<Cow<'static, str>>,
    },

    /// Register number outside the encodable window.
    InvalidRegister {
        /// Register name prefix, e.g. `"p"` or `"z"`.
        prefix: Cow<'static, str>,
        /// Lowest legal register number.
        lo: i64,
        /// Highest legal register number.
        hi: i64,
    },

    /// Numeric value outside `[lo, hi]`.
    OutOfRange {
        /// Lowest legal value.
        lo: i64,
        /// Highest legal value.
        hi: i64,
        /// What the value measures.
        what: RangeKind,
    },

    /// Value is not a multiple of the required alignment.
    Unaligned {
        /// Required alignment.
        align: i64,
    },

    /// Register list has the wrong number of registers.
    RegListLength {
        /// Required register count.
        expected: u32,
    },

    /// Register list has the wrong stride.
    RegListStride {
        /// Required stride.
        expected: u32,
    },

    /// ZA vector-group size does not match the instruction.
    InvalidVgSize {
        /// Required group size.
        expected: u32,
    },

    /// Operand must repeat the first operand.
    UntiedOperand,

    /// Two immediates must have the same value.
    UntiedImmediates,

    /// No legal qualifier sequence matches the operands.
    InvalidVariant {
        /// Mismatching operands in the closest sequence.
        mismatches: u32,
    },

    /// Free-text fallback.
    Other {
        /// The diagnostic text.
        msg: Cow<'static, str>,
    },

    /// Instruction `a` is only valid directly after `b`.
    AShouldFollowB {
        /// The misplaced instruction.
        a: Cow<'static, str>,
        /// The instruction it must follow.
        b: Cow<'static, str>,
    },

    /// Instruction `a` was required after `b`.
    ExpectedAAfterB {
        /// The missing instruction.
        a: Cow<'static, str>,
        /// The instruction that demanded it.
        b: Cow<'static, str>,
    },
}

/// A single diagnostic produced by the checker, matcher or sequence verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperandError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Zero-based operand index, or `None` when no single operand is at fault.
    pub index: Option<usize>,
    /// Whether a front end may keep going after reporting this error.
    pub non_fatal: bool,
}

impl OperandError {
    /// Build an error of the given kind against operand `index`.
    #[must_use]
    pub fn new(kind: ErrorKind, index: Option<usize>) -> Self {
        Self {
            kind,
            index,
            non_fatal: false,
        }
    }

    /// Mark the error as advisory.
    #[must_use]
    pub fn non_fatal(mut self) -> Self {
        self.non_fatal = true;
        self
    }

    pub(crate) fn syntax(index: usize, msg: impl Into<Cow<'static, str>>) -> Self {
        Self::new(
            ErrorKind::Syntax {
                msg: Some(msg.into()),
            },
            Some(index),
        )
    }

    pub(crate) fn bare_syntax(index: usize) -> Self {
        Self::new(ErrorKind::Syntax { msg: None }, Some(index))
    }

    pub(crate) fn other(index: Option<usize>, msg: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Other { msg: msg.into() }, index)
    }

    pub(crate) fn invalid_register(index: usize, prefix: &'static str, lo: i64, hi: i64) -> Self {
        Self::new(
            ErrorKind::InvalidRegister {
                prefix: Cow::Borrowed(prefix),
                lo,
                hi,
            },
            Some(index),
        )
    }

    pub(crate) fn out_of_range(index: usize, lo: i64, hi: i64, what: RangeKind) -> Self {
        Self::new(ErrorKind::OutOfRange { lo, hi, what }, Some(index))
    }

    pub(crate) fn imm_out_of_range(index: usize, lo: i64, hi: i64) -> Self {
        Self::out_of_range(index, lo, hi, RangeKind::Immediate)
    }

    pub(crate) fn offset_out_of_range(index: usize, lo: i64, hi: i64) -> Self {
        Self::out_of_range(index, lo, hi, RangeKind::Offset)
    }

    pub(crate) fn regno_out_of_range(index: usize, lo: i64, hi: i64) -> Self {
        Self::out_of_range(index, lo, hi, RangeKind::RegisterNumber)
    }

    pub(crate) fn elem_out_of_range(index: usize, lo: i64, hi: i64) -> Self {
        Self::out_of_range(index, lo, hi, RangeKind::ElementIndex)
    }

    pub(crate) fn shift_out_of_range(index: usize, lo: i64, hi: i64) -> Self {
        Self::out_of_range(index, lo, hi, RangeKind::ShiftAmount)
    }

    pub(crate) fn multiplier_out_of_range(index: usize, lo: i64, hi: i64) -> Self {
        Self::out_of_range(index, lo, hi, RangeKind::Multiplier)
    }

    pub(crate) fn unaligned(index: usize, align: i64) -> Self {
        Self::new(ErrorKind::Unaligned { align }, Some(index))
    }

    pub(crate) fn reg_list_length(index: usize, expected: u32) -> Self {
        Self::new(ErrorKind::RegListLength { expected }, Some(index))
    }

    pub(crate) fn reg_list_stride(index: usize, expected: u32) -> Self {
        Self::new(ErrorKind::RegListStride { expected }, Some(index))
    }

    pub(crate) fn invalid_vg_size(index: usize, expected: u32) -> Self {
        Self::new(ErrorKind::InvalidVgSize { expected }, Some(index))
    }

    pub(crate) fn untied_operand(index: usize) -> Self {
        Self::new(ErrorKind::UntiedOperand, Some(index))
    }

    pub(crate) fn untied_immediates(index: usize) -> Self {
        Self::new(ErrorKind::UntiedImmediates, Some(index))
    }

    pub(crate) fn invalid_variant(mismatches: u32) -> Self {
        Self::new(ErrorKind::InvalidVariant { mismatches }, None)
    }

    /// Whether this error is advisory.
    pub fn is_fatal(&self) -> bool {
        !self.non_fatal
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax { msg: Some(msg) } => f.write_str(msg),
            ErrorKind::Syntax { msg: None } => f.write_str("invalid operand"),
            ErrorKind::InvalidRegister { prefix, lo, hi } => {
                write!(
                    f,
                    "expected a register in the range {}{}-{}{}",
                    prefix, lo, prefix, hi
                )
            }
            ErrorKind::OutOfRange { lo, hi, what } => {
                write!(f, "{} out of range {} to {}", what, lo, hi)
            }
            ErrorKind::Unaligned { align } => {
                write!(f, "immediate value must be a multiple of {}", align)
            }
            ErrorKind::RegListLength { expected } => {
                write!(f, "expected a list of {} registers", expected)
            }
            ErrorKind::RegListStride { expected } => {
                write!(f, "the register list must have a stride of {}", expected)
            }
            ErrorKind::InvalidVgSize { expected } => {
                write!(f, "the vector group size must be vgx{}", expected)
            }
            ErrorKind::UntiedOperand => {
                f.write_str("operand must be the same register as operand 1")
            }
            ErrorKind::UntiedImmediates => {
                f.write_str("operand must have the same immediate value as operand 1")
            }
            ErrorKind::InvalidVariant { mismatches } => {
                write!(
                    f,
                    "invalid operand qualifiers ({} mismatching operand{})",
                    mismatches,
                    if *mismatches == 1 { "" } else { "s" }
                )
            }
            ErrorKind::Other { msg } => f.write_str(msg),
            ErrorKind::AShouldFollowB { a, b } => write!(f, "`{}' should follow `{}'", a, b),
            ErrorKind::ExpectedAAfterB { a, b } => write!(f, "expected `{}' after `{}'", a, b),
        }
    }
}

impl fmt::Display for OperandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, self.index) {
            (ErrorKind::UntiedOperand, Some(i)) => {
                write!(f, "operand {} must be the same register as operand 1", i + 1)
            }
            (ErrorKind::UntiedImmediates, Some(i)) => {
                write!(
                    f,
                    "operand {} must have the same immediate value as operand 1",
                    i + 1
                )
            }
            (kind, Some(i)) => write!(f, "{} at operand {}", kind, i + 1),
            (kind, None) => write!(f, "{}", kind),
        }
    }
}

impl std::error::Error for OperandError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_display() {
        let err = OperandError::imm_out_of_range(1, 0, 31);
        assert_eq!(
            format!("{}", err),
            "immediate value out of range 0 to 31 at operand 2"
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn range_kind_labels() {
        assert_eq!(
            format!("{}", OperandError::offset_out_of_range(0, -256, 255).kind),
            "immediate offset out of range -256 to 255"
        );
        assert_eq!(
            format!("{}", OperandError::elem_out_of_range(0, 0, 3).kind),
            "register element index out of range 0 to 3"
        );
        assert_eq!(
            format!("{}", OperandError::multiplier_out_of_range(0, 1, 16).kind),
            "multiplier out of range 1 to 16"
        );
    }

    #[test]
    fn invalid_register_display() {
        let err = OperandError::invalid_register(0, "p", 0, 7);
        assert_eq!(
            format!("{}", err.kind),
            "expected a register in the range p0-p7"
        );
    }

    #[test]
    fn untied_operand_names_index() {
        let err = OperandError::untied_operand(2);
        assert_eq!(
            format!("{}", err),
            "operand 3 must be the same register as operand 1"
        );
    }

    #[test]
    fn invalid_variant_has_no_index() {
        let err = OperandError::invalid_variant(2);
        assert_eq!(err.index, None);
        assert_eq!(
            format!("{}", err),
            "invalid operand qualifiers (2 mismatching operands)"
        );
    }

    #[test]
    fn sequencing_messages() {
        let a = ErrorKind::AShouldFollowB {
            a: "cpyfm".into(),
            b: "cpyfp".into(),
        };
        assert_eq!(format!("{}", a), "`cpyfm' should follow `cpyfp'");
        let b = ErrorKind::ExpectedAAfterB {
            a: "setm".into(),
            b: "setp".into(),
        };
        assert_eq!(format!("{}", b), "expected `setm' after `setp'");
    }

    #[test]
    fn non_fatal_builder() {
        let err = OperandError::other(None, "x").non_fatal();
        assert!(err.non_fatal);
        assert!(!err.is_fatal());
        assert_eq!(format!("{}", err), "x");
    }
}
