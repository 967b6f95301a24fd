//! IR instructions.

use std::fmt;

use crate::{BlockId, IrType, RegisterId, Signature, Value};

/// Floating-point arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl FloatOp {
    /// Textual opcode, e.g. `fadd`.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "fadd",
            Self::Sub => "fsub",
            Self::Mul => "fmul",
            Self::Div => "fdiv",
        }
    }

    /// Default result name used by the code generator.
    #[must_use]
    pub const fn value_name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }

    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
        }
    }
}

impl fmt::Display for FloatOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Ordered floating-point comparison predicates.
///
/// Conditions only ever test against zero, so `one` is the sole predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatPredicate {
    /// Ordered and not equal.
    One,
}

impl FloatPredicate {
    #[must_use]
    pub fn evaluate(self, left: f64, right: f64) -> bool {
        let ordered = !left.is_nan() && !right.is_nan();
        match self {
            Self::One => ordered && left != right,
        }
    }
}

impl fmt::Display for FloatPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "one"),
        }
    }
}

/// A single IR instruction.
///
/// Instructions producing a value name it through `dest`; the register's
/// type and printable name live in the owning [`crate::IrFunction`].
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Reserves a stack slot of `ty`; `dest` is a pointer.
    Alloca { dest: RegisterId, ty: IrType },
    Load {
        dest: RegisterId,
        ty: IrType,
        pointer: Value,
    },
    Store { value: Value, pointer: Value },
    FloatBinary {
        dest: RegisterId,
        op: FloatOp,
        left: Value,
        right: Value,
    },
    FloatCompare {
        dest: RegisterId,
        predicate: FloatPredicate,
        left: Value,
        right: Value,
    },
    /// `fptosi`: truncates a double toward zero into an integer.
    FloatToSigned {
        dest: RegisterId,
        value: Value,
        ty: IrType,
    },
    Call {
        dest: Option<RegisterId>,
        callee: String,
        signature: Signature,
        args: Vec<Value>,
    },
    Branch { target: BlockId },
    CondBranch {
        condition: Value,
        then_block: BlockId,
        else_block: BlockId,
    },
    Return { value: Value },
}

impl Instruction {
    /// Returns true for instructions that end a basic block.
    #[must_use]
    pub const fn is_terminator(&self) -> bool {
        matches!(
            self,
            Self::Branch { .. } | Self::CondBranch { .. } | Self::Return { .. }
        )
    }

    /// Register defined by this instruction, if any.
    #[must_use]
    pub const fn dest(&self) -> Option<RegisterId> {
        match self {
            Self::Alloca { dest, .. }
            | Self::Load { dest, .. }
            | Self::FloatBinary { dest, .. }
            | Self::FloatCompare { dest, .. }
            | Self::FloatToSigned { dest, .. } => Some(*dest),
            Self::Call { dest, .. } => *dest,
            Self::Store { .. }
            | Self::Branch { .. }
            | Self::CondBranch { .. }
            | Self::Return { .. } => None,
        }
    }

    /// Values read by this instruction.
    #[must_use]
    pub fn operands(&self) -> Vec<&Value> {
        match self {
            Self::Alloca { .. } | Self::Branch { .. } => Vec::new(),
            Self::Load { pointer, .. } => vec![pointer],
            Self::Store { value, pointer } => vec![value, pointer],
            Self::FloatBinary { left, right, .. } | Self::FloatCompare { left, right, .. } => {
                vec![left, right]
            }
            Self::FloatToSigned { value, .. } | Self::Return { value } => vec![value],
            Self::Call { args, .. } => args.iter().collect(),
            Self::CondBranch { condition, .. } => vec![condition],
        }
    }

    /// Blocks control may transfer to after this instruction.
    #[must_use]
    pub fn successors(&self) -> Vec<BlockId> {
        match self {
            Self::Branch { target } => vec![*target],
            Self::CondBranch {
                then_block,
                else_block,
                ..
            } => vec![*then_block, *else_block],
            _ => Vec::new(),
        }
    }
}
