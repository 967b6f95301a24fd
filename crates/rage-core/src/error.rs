//! Error types and result aliases for the Rage compiler.
//!
//! Every stage fails fast: the first error is returned unchanged to the
//! caller and nothing downstream runs.

use crate::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main error type for the Rage compiler.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lexer error: {0}")]
    #[diagnostic(code(rage::lexer))]
    Lexer(String, #[label("here")] Span),

    #[error("Parser error: {0}")]
    #[diagnostic(code(rage::parser))]
    Parser(String, #[label("here")] Span),

    #[error("Resolution error: {0}")]
    #[diagnostic(code(rage::resolve))]
    Resolution(String, #[label("not declared")] Span),

    #[error("Code generation error: {0}")]
    #[diagnostic(code(rage::codegen))]
    Codegen(String),

    #[error("IR verification failed: {0}")]
    #[diagnostic(code(rage::verify))]
    Verify(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Coarse classification of an [`Error`], one per failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Config,
    Lex,
    Parse,
    Resolution,
    Codegen,
    Verify,
    Runtime,
}

impl Error {
    /// Returns the category this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Config(_) => ErrorKind::Config,
            Self::Lexer(..) => ErrorKind::Lex,
            Self::Parser(..) => ErrorKind::Parse,
            Self::Resolution(..) => ErrorKind::Resolution,
            Self::Codegen(_) => ErrorKind::Codegen,
            Self::Verify(_) => ErrorKind::Verify,
            Self::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// Returns the source span attached to this error, if any.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::Lexer(_, span) | Self::Parser(_, span) | Self::Resolution(_, span) => {
                Some(*span)
            }
            _ => None,
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from(span.start.offset..span.end.offset)
    }
}

/// Result type alias using the Rage Error type.
pub type Result<T> = std::result::Result<T, Error>;
