//! Control flow parsing.

use super::parser::Parser;
use crate::ast::Statement;
use rage_core::Result;
use rage_lexer::TokenKind;

impl Parser {
    /// Parses `if cond { ... } else { ... }`.
    ///
    /// The `else` branch is mandatory and there is no `else if` form.
    pub(crate) fn parse_if_else(&mut self) -> Result<Statement> {
        let start_span = self.expect(TokenKind::If)?;
        let condition = self.parse_required_expression("condition")?;

        self.stream.skip_newlines();
        self.expect(TokenKind::LeftBrace)?;
        let then_body = self.parse_statement_list()?;
        self.expect(TokenKind::RightBrace)?;

        self.stream.skip_newlines();
        if !self.check(TokenKind::Else) {
            return Err(self.unexpected("'else' after if body"));
        }
        self.advance()?;

        self.stream.skip_newlines();
        self.expect(TokenKind::LeftBrace)?;
        let else_body = self.parse_statement_list()?;
        let end_span = self.expect(TokenKind::RightBrace)?;

        Ok(Statement::IfElse {
            condition,
            then_body,
            else_body,
            span: start_span.merge(end_span),
        })
    }
}
