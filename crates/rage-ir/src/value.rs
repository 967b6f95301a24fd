//! Operands of IR instructions.

use crate::IrType;

/// Index of a virtual register within its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterId(pub u32);

/// Index of a basic block within its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

/// A value that can be used as an instruction operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Result of an instruction in the same function.
    Register { id: RegisterId, ty: IrType },
    /// `double` constant.
    Float(f64),
    /// Integer constant of the given width.
    Int { value: i64, ty: IrType },
    /// Address of a module-level global.
    Global(String),
}

impl Value {
    #[must_use]
    pub const fn ty(&self) -> IrType {
        match self {
            Self::Register { ty, .. } | Self::Int { ty, .. } => *ty,
            Self::Float(_) => IrType::Double,
            Self::Global(_) => IrType::Ptr,
        }
    }

    /// Returns the register this value names, if it is one.
    #[must_use]
    pub const fn register(&self) -> Option<RegisterId> {
        match self {
            Self::Register { id, .. } => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub const fn i32(value: i64) -> Self {
        Self::Int {
            value,
            ty: IrType::I32,
        }
    }
}
