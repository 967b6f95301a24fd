//! Expression parsing with operator precedence.
//!
//! Binary expressions use precedence climbing: a primary is parsed, then
//! operators binding at least as tightly as the current minimum are folded
//! into the left operand. Recursing with `precedence + 1` for the right
//! operand makes equal-precedence chains left-associative.

use super::parser::Parser;
use crate::ast::{BinaryOperator, Expression};
use rage_core::{Error, Result};
use rage_lexer::TokenKind;

impl Parser {
    /// Parses an expression.
    ///
    /// A newline where the expression should start is consumed and yields
    /// `Ok(None)` (an empty expression) rather than an error.
    pub(crate) fn parse_expression(&mut self) -> Result<Option<Expression>> {
        if self.stream.next_if(TokenKind::Newline).is_some() {
            return Ok(None);
        }

        self.parse_binary(0).map(Some)
    }

    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expression> {
        let mut left = self.parse_primary()?;

        while let Some(operator) = self.peek_operator() {
            if operator.precedence() < min_precedence {
                break;
            }
            self.advance()?;

            let right = self.parse_binary(operator.precedence() + 1)?;
            let span = left.span().merge(right.span());
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    /// Parses a numeric literal or a variable reference.
    fn parse_primary(&mut self) -> Result<Expression> {
        match self.peek_kind() {
            Some(TokenKind::Number) => {
                let (token, span) = self.advance()?;
                let text = token.text.unwrap_or_default();
                let value = text.parse::<f64>().map_err(|_| {
                    Error::Parser(format!("Invalid numeric literal '{text}'"), span)
                })?;
                Ok(Expression::Number { value, span })
            }
            Some(TokenKind::Identifier) => {
                let (name, span) = self.expect_identifier()?;
                Ok(Expression::Variable { name, span })
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn peek_operator(&self) -> Option<BinaryOperator> {
        match self.peek_kind()? {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Minus => Some(BinaryOperator::Subtract),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            _ => None,
        }
    }
}
