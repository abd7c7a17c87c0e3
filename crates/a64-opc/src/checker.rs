//! The checking front door.
//!
//! A [`Checker`] bundles the CPU feature set with the instruction-sequence
//! state and runs every stage on each instruction in order: CPU support,
//! tied operand and qualifier matching, per-operand constraints, the
//! opcode's own verifier, and finally the MOVPRFX/MOPS sequence rules.

use std::fmt;

use crate::constraint::match_operands_constraint;
use crate::error::OperandError;
use crate::feature::FeatureSet;
use crate::inst::Instruction;
use crate::render::{render_operand_for, Rendered, Styler};
use crate::sequence::InsnSequence;
use crate::verify::{cpu_supports, verify, VerifyError};

/// Why [`Checker::check`] rejected an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckError {
    /// The configured CPU lacks an extension the instruction needs.
    Unsupported {
        /// Opcode name.
        mnemonic: String,
        /// Extensions the opcode asks for.
        required: FeatureSet,
    },
    /// An operand breaks its constraints.
    Operand(OperandError),
    /// The opcode verifier refused the instruction.
    Verify(VerifyError),
    /// The instruction breaks a MOVPRFX or MOPS sequence rule.
    Sequence(OperandError),
}

impl CheckError {
    /// Whether the instruction must be rejected. Sequence diagnostics about
    /// MOVPRFX usage are warnings.
    pub fn is_fatal(&self) -> bool {
        match self {
            CheckError::Operand(err) | CheckError::Sequence(err) => err.is_fatal(),
            CheckError::Unsupported { .. } | CheckError::Verify(_) => true,
        }
    }

    /// Index of the offending operand, when one is to blame.
    pub fn operand_index(&self) -> Option<usize> {
        match self {
            CheckError::Operand(err) | CheckError::Sequence(err) => err.index,
            CheckError::Verify(VerifyError::Violation(err)) => err.index,
            _ => None,
        }
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Unsupported { mnemonic, .. } => {
                write!(f, "selected processor does not support `{mnemonic}'")
            }
            CheckError::Operand(err) | CheckError::Sequence(err) => fmt::Display::fmt(err, f),
            CheckError::Verify(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for CheckError {}

impl From<VerifyError> for CheckError {
    fn from(err: VerifyError) -> Self {
        CheckError::Verify(err)
    }
}

/// Stateful instruction checker.
///
/// # Examples
///
/// ```
/// use a64_opc::checker::Checker;
/// use a64_opc::feature::{Feature, FeatureSet};
/// use a64_opc::inst::{Instruction, Operand};
/// use a64_opc::table::find;
///
/// let mut checker = Checker::new();
/// checker.features(FeatureSet::base().with(Feature::Sve));
///
/// let mut movprfx = Instruction::new(find("movprfx").unwrap())
///     .with(0, Operand::reg(1))
///     .with(1, Operand::reg(2));
/// checker.check(&mut movprfx, 0x1000).unwrap();
/// assert!(checker.sequence_open());
/// ```
#[derive(Debug, Clone)]
pub struct Checker {
    features: FeatureSet,
    sequences: bool,
    sequence: InsnSequence,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker {
    /// A checker for the base architecture with sequence checking enabled.
    pub fn new() -> Self {
        Self {
            features: FeatureSet::base(),
            sequences: true,
            sequence: InsnSequence::new(),
        }
    }

    /// Set the CPU's architecture extensions.
    pub fn features(&mut self, features: FeatureSet) -> &mut Self {
        self.features = features;
        self
    }

    /// Enable or disable MOVPRFX/MOPS sequence checking.
    pub fn sequences(&mut self, enabled: bool) -> &mut Self {
        self.sequences = enabled;
        if !enabled {
            self.sequence.reset();
        }
        self
    }

    /// The configured extensions.
    pub fn feature_set(&self) -> FeatureSet {
        self.features
    }

    /// Whether a MOVPRFX or MOPS sequence is awaiting its next instruction.
    pub fn sequence_open(&self) -> bool {
        self.sequence.is_open()
    }

    /// Whether the configured CPU can execute `inst`.
    pub fn supports(&self, inst: &Instruction) -> bool {
        cpu_supports(self.features, inst)
    }

    /// Run every check on `inst`, located at `pc`.
    ///
    /// On success the operand qualifiers are resolved. Checking stops at
    /// the first failing stage; a sequence diagnostic may be non-fatal
    /// (see [`CheckError::is_fatal`]).
    pub fn check(&mut self, inst: &mut Instruction, pc: u64) -> Result<(), CheckError> {
        if !self.supports(inst) {
            tracing::debug!(opcode = inst.opcode.id, "instruction not supported by the selected features");
            return Err(CheckError::Unsupported {
                mnemonic: inst.opcode.name.to_owned(),
                required: inst.opcode.features,
            });
        }
        match_operands_constraint(inst).map_err(CheckError::Operand)?;
        verify(inst, inst.value, true)?;
        if self.sequences {
            self.sequence.verify(inst, pc, true).map_err(CheckError::Sequence)?;
        }
        Ok(())
    }

    /// Report a sequence left open at the end of the input and reset.
    pub fn finish(&mut self) -> Result<(), CheckError> {
        self.sequence.finish().map_err(CheckError::Sequence)
    }

    /// Forget any open sequence. The feature set is kept.
    pub fn reset(&mut self) -> &mut Self {
        self.sequence.reset();
        self
    }

    /// Render operand `idx` of `inst`, naming system registers the
    /// configured CPU implements.
    pub fn render<S: Styler + ?Sized>(&self, inst: &Instruction, idx: usize, pc: u64, styler: &mut S) -> Rendered {
        render_operand_for(self.features, inst, idx, pc, styler)
    }
}
