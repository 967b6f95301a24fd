//! Parser for the Rage language.
//!
//! This crate turns a token sequence into an Abstract Syntax Tree (AST):
//! one [`Function`] per top-level definition.

pub mod ast;
mod parsing;

pub use ast::{
    BinaryOperator, Expression, Function, Program, Statement, StreamDirection,
};
pub use parsing::Parser;

use rage_core::Result;
use rage_lexer::TokenStream;

/// Parses a token sequence into a Rage program AST.
///
/// # Arguments
/// * `tokens` - The lexed tokens, as a `Vec<(Token, Span)>` or a [`TokenStream`]
///
/// # Returns
/// A parsed program AST
///
/// # Errors
/// Returns an error on the first syntax error, or when a function body
/// contains no `return` statement.
///
/// # Examples
/// ```
/// use rage_lexer::tokenize;
/// use rage_parser::parse;
///
/// let source = "int32 main() {\n    return 0\n}\n";
/// let tokens = tokenize(source).unwrap();
/// let program = parse(tokens).unwrap();
/// assert_eq!(program.functions[0].name, "main");
/// ```
pub fn parse(tokens: impl Into<TokenStream>) -> Result<Program> {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program()?;
    tracing::debug!(functions = program.functions.len(), "parsed program");
    Ok(program)
}
