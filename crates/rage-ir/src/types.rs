//! IR types and function signatures.

use std::fmt;

/// First-class types of the IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrType {
    Void,
    /// Boolean produced by comparisons.
    I1,
    /// Byte, the element type of string constants.
    I8,
    I32,
    Double,
    /// Untyped pointer (stack slots and globals).
    Ptr,
}

impl IrType {
    /// Returns true for `i1`, `i8` and `i32`.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::I1 | Self::I8 | Self::I32)
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Void => "void",
            Self::I1 => "i1",
            Self::I8 => "i8",
            Self::I32 => "i32",
            Self::Double => "double",
            Self::Ptr => "ptr",
        };
        write!(f, "{name}")
    }
}

/// Signature of a callable function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub return_type: IrType,
    pub params: Vec<IrType>,
    pub variadic: bool,
}

impl Signature {
    #[must_use]
    pub fn new(return_type: IrType, params: Vec<IrType>, variadic: bool) -> Self {
        Self {
            return_type,
            params,
            variadic,
        }
    }

    /// Renders the parameter list, e.g. `(ptr, ...)`.
    #[must_use]
    pub fn param_list(&self) -> String {
        let mut parts: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        if self.variadic {
            parts.push("...".to_string());
        }
        format!("({})", parts.join(", "))
    }
}
