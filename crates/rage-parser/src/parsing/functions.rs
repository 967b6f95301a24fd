//! Function definition parsing.

use super::parser::Parser;
use crate::ast::Function;
use rage_core::{Error, Result};
use rage_lexer::TokenKind;

impl Parser {
    /// Parses a function definition: `TYPE NAME() { statements }`.
    ///
    /// Parameter lists are not supported, so the parentheses must be empty.
    pub(crate) fn parse_function(&mut self) -> Result<Function> {
        if !self.check(TokenKind::TypeName) {
            return Err(self.unexpected("return type of a function definition"));
        }
        let (type_token, start_span) = self.advance()?;
        let return_type = type_token.text.unwrap_or_default();

        self.stream.skip_newlines();
        let (name, _) = self.expect_identifier()?;

        self.expect(TokenKind::LeftParen)?;
        self.expect(TokenKind::RightParen)?;

        self.stream.skip_newlines();
        self.expect(TokenKind::LeftBrace)?;

        self.saw_return = false;
        let body = self.parse_statement_list()?;
        if !std::mem::take(&mut self.saw_return) {
            return Err(Error::Parser(
                format!("Function '{name}' must return a value"),
                start_span.merge(self.current_span()),
            ));
        }

        let end_span = self.expect(TokenKind::RightBrace)?;
        tracing::trace!(function = %name, statements = body.len(), "parsed function");

        Ok(Function {
            return_type,
            name,
            body,
            span: start_span.merge(end_span),
        })
    }
}
