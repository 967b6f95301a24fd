//! Abstract Syntax Tree (AST) definitions for Rage.
//!
//! Every composite node owns its children; the tree has no sharing and no
//! cycles.

use rage_core::Span;
use std::fmt;

/// A complete Rage program (compilation unit).
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub functions: Vec<Function>,
}

/// Function definition: `TYPE NAME() { statements }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Declared return type name. Code generation always returns `i32`.
    pub return_type: String,
    pub name: String,
    pub body: Vec<Statement>,
    pub span: Span,
}

/// Direction of a `stream` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamDirection {
    /// `stream.in x` reads a value into `x`.
    In,
    /// `stream.out x` writes the value of `x`.
    Out,
}

/// Statements in Rage.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Variable declaration: `TYPE name = expr`
    VariableDeclaration {
        type_name: String,
        name: String,
        initializer: Expression,
        span: Span,
    },

    /// Assignment: `name = expr`
    Assignment {
        name: String,
        value: Expression,
        span: Span,
    },

    /// Return statement: `return expr`
    Return { value: Expression, span: Span },

    /// Conditional: `if cond { ... } else { ... }`
    IfElse {
        condition: Expression,
        then_body: Vec<Statement>,
        else_body: Vec<Statement>,
        span: Span,
    },

    /// Stream I/O: `stream.in name` or `stream.out name`
    Stream {
        variable: String,
        direction: StreamDirection,
        span: Span,
    },
}

impl Statement {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::VariableDeclaration { span, .. }
            | Self::Assignment { span, .. }
            | Self::Return { span, .. }
            | Self::IfElse { span, .. }
            | Self::Stream { span, .. } => *span,
        }
    }
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 50,
            Self::Multiply | Self::Divide => 60,
        }
    }
}

/// Expressions in Rage.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Numeric literal; all literals are stored as `f64`.
    Number { value: f64, span: Span },

    /// Variable reference
    Variable { name: String, span: Span },

    /// Binary operation: `left op right`
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
        span: Span,
    },
}

impl Expression {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Number { span, .. } | Self::Variable { span, .. } | Self::Binary { span, .. } => {
                *span
            }
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Subtract => write!(f, "-"),
            Self::Multiply => write!(f, "*"),
            Self::Divide => write!(f, "/"),
        }
    }
}

/// Fully parenthesised infix form, e.g. `(2 + (3 * 4))`.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Variable { name, .. } => write!(f, "{name}"),
            Self::Binary {
                left,
                operator,
                right,
                ..
            } => write!(f, "({left} {operator} {right})"),
        }
    }
}
