//! Statement parsing.

use super::parser::Parser;
use crate::ast::{Expression, Statement, StreamDirection};
use rage_core::{Error, Result};
use rage_lexer::TokenKind;

impl Parser {
    /// Parses one statement.
    ///
    /// Returns `Ok(None)` when the next token closes the enclosing block;
    /// the closing brace is left for the caller to consume.
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Statement>> {
        self.stream.skip_newlines();

        let statement = match self.peek_kind() {
            Some(TokenKind::RightBrace) => return Ok(None),
            Some(TokenKind::Stream) => self.parse_stream_statement()?,
            Some(TokenKind::TypeName) => self.parse_variable_declaration()?,
            Some(TokenKind::Return) => return self.parse_return_statement().map(Some),
            Some(TokenKind::If) => return self.parse_if_else().map(Some),
            Some(TokenKind::Identifier) => self.parse_assignment()?,
            _ => return Err(self.unexpected("statement")),
        };

        self.expect_statement_end()?;
        Ok(Some(statement))
    }

    /// Parses `stream.in NAME` or `stream.out NAME`.
    fn parse_stream_statement(&mut self) -> Result<Statement> {
        let start_span = self.expect(TokenKind::Stream)?;
        self.expect(TokenKind::Dot)?;

        let direction = match self.peek_kind() {
            Some(TokenKind::In) => StreamDirection::In,
            Some(TokenKind::Out) => StreamDirection::Out,
            _ => return Err(self.unexpected("'in' or 'out'")),
        };
        self.advance()?;

        let (variable, end_span) = self.expect_identifier()?;

        Ok(Statement::Stream {
            variable,
            direction,
            span: start_span.merge(end_span),
        })
    }

    /// Parses `TYPE NAME = expr`.
    fn parse_variable_declaration(&mut self) -> Result<Statement> {
        let (type_token, start_span) = self.advance()?;
        let type_name = type_token.text.unwrap_or_default();

        self.stream.skip_newlines();
        let (name, _) = self.expect_identifier()?;
        self.expect(TokenKind::Equal)?;

        self.stream.skip_newlines();
        let initializer = self.parse_required_expression("initializer")?;
        let span = start_span.merge(initializer.span());

        Ok(Statement::VariableDeclaration {
            type_name,
            name,
            initializer,
            span,
        })
    }

    /// Parses `NAME = expr`.
    fn parse_assignment(&mut self) -> Result<Statement> {
        let (name, start_span) = self.expect_identifier()?;
        self.expect(TokenKind::Equal)?;

        let value = self.parse_required_expression("assigned value")?;
        let span = start_span.merge(value.span());

        Ok(Statement::Assignment { name, value, span })
    }

    /// Parses `return expr`, which must be the last statement of its block.
    fn parse_return_statement(&mut self) -> Result<Statement> {
        let start_span = self.expect(TokenKind::Return)?;

        self.stream.skip_newlines();
        let value = self.parse_required_expression("return value")?;
        let span = start_span.merge(value.span());

        self.stream.skip_newlines();
        if !self.check(TokenKind::RightBrace) {
            return Err(self.unexpected("'}' after return statement"));
        }

        self.saw_return = true;
        Ok(Statement::Return { value, span })
    }

    /// Parses an expression and fails if it is empty.
    pub(crate) fn parse_required_expression(&mut self, what: &str) -> Result<Expression> {
        let span = self.current_span();
        self.parse_expression()?
            .ok_or_else(|| Error::Parser(format!("Expected {what}, found empty expression"), span))
    }

    /// A simple statement must be followed by a newline or the end of its block.
    fn expect_statement_end(&self) -> Result<()> {
        match self.peek_kind() {
            Some(TokenKind::Newline | TokenKind::RightBrace) | None => Ok(()),
            Some(_) => Err(self.unexpected("newline after statement")),
        }
    }
}

