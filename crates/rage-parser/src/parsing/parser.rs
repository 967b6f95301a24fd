//! Core parser structure and helper methods.

use crate::ast::{Program, Statement};
use rage_core::{Error, Result, Span};
use rage_lexer::{Token, TokenKind, TokenStream};

/// Recursive-descent parser for Rage source code.
///
/// Parsing is fail-fast: the first syntax error aborts the whole parse.
pub struct Parser {
    pub(crate) stream: TokenStream,
    /// Set whenever a `return` is parsed; checked and cleared per function.
    pub(crate) saw_return: bool,
}

impl Parser {
    /// Creates a new parser reading from the given token stream.
    pub fn new(stream: impl Into<TokenStream>) -> Self {
        Self {
            stream: stream.into(),
            saw_return: false,
        }
    }

    /// Parses a complete program: function definitions until tokens run out.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut functions = Vec::new();

        loop {
            self.stream.skip_newlines();
            if self.stream.is_exhausted() {
                break;
            }
            functions.push(self.parse_function()?);
        }

        Ok(Program { functions })
    }

    /// Parses statements up to, but not including, the closing brace.
    pub(crate) fn parse_statement_list(&mut self) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();

        while let Some(statement) = self.parse_statement()? {
            statements.push(statement);
        }

        Ok(statements)
    }

    // ==================== Helper Methods ====================

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.stream.peek_kind()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consumes the next token, failing at end of input.
    pub(crate) fn advance(&mut self) -> Result<(Token, Span)> {
        match self.stream.next_token() {
            Some(token) => Ok(token.clone()),
            None => Err(Error::Parser(
                "Unexpected end of input".to_string(),
                self.stream.end_span(),
            )),
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Span> {
        if self.check(kind) {
            let (_, span) = self.advance()?;
            Ok(span)
        } else {
            Err(self.unexpected(&format!("'{kind}'")))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<(String, Span)> {
        if self.check(TokenKind::Identifier) {
            let (token, span) = self.advance()?;
            Ok((token.text.unwrap_or_default(), span))
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// Builds an error describing what was expected at the current token.
    pub(crate) fn unexpected(&self, expected: &str) -> Error {
        let found = self
            .stream
            .peek()
            .map_or_else(|| "end of input".to_string(), |(token, _)| token.describe());
        Error::Parser(
            format!("Expected {expected}, found '{}'", found.escape_debug()),
            self.current_span(),
        )
    }

    pub(crate) fn current_span(&self) -> Span {
        self.stream.current_span()
    }
}
