//! Cursor over a fully materialised token sequence.

use crate::{Token, TokenKind};
use rage_core::Span;

/// Sequential reader over lexed tokens with one token of lookahead.
///
/// Reading past the last token yields `None` from both [`peek`] and
/// [`next_token`]; the cursor never moves beyond the end.
///
/// [`peek`]: TokenStream::peek
/// [`next_token`]: TokenStream::next_token
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<(Token, Span)>,
    position: usize,
}

impl TokenStream {
    #[must_use]
    pub fn new(tokens: Vec<(Token, Span)>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&(Token, Span)> {
        self.tokens.get(self.position)
    }

    /// Returns the kind of the next token without consuming it.
    #[must_use]
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|(token, _)| token.kind)
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Option<&(Token, Span)> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Consumes the next token if it has the given kind.
    pub fn next_if(&mut self, kind: TokenKind) -> Option<&(Token, Span)> {
        if self.peek_kind() == Some(kind) {
            self.next_token()
        } else {
            None
        }
    }

    /// Consumes consecutive newline tokens.
    pub fn skip_newlines(&mut self) {
        while self.next_if(TokenKind::Newline).is_some() {}
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Index of the next token to be read.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Zero-width span just past the last token, for end-of-input errors.
    #[must_use]
    pub fn end_span(&self) -> Span {
        self.tokens
            .last()
            .map_or(Span::from_range(0, 0), |(_, span)| Span::new(span.end, span.end))
    }

    /// Span of the next token, or [`end_span`](Self::end_span) when exhausted.
    #[must_use]
    pub fn current_span(&self) -> Span {
        self.peek().map_or_else(|| self.end_span(), |(_, span)| *span)
    }

    #[must_use]
    pub fn tokens(&self) -> &[(Token, Span)] {
        &self.tokens
    }
}

impl From<Vec<(Token, Span)>> for TokenStream {
    fn from(tokens: Vec<(Token, Span)>) -> Self {
        Self::new(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    #[test]
    fn test_peek_does_not_advance() {
        let stream = TokenStream::new(tokenize("x = 1\n").unwrap());

        let first = stream.peek().cloned();
        let second = stream.peek().cloned();
        assert_eq!(first, second);
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_next_token_advances_until_exhausted() {
        let mut stream = TokenStream::new(tokenize("a b").unwrap());

        assert_eq!(stream.next_token().unwrap().0.text.as_deref(), Some("a"));
        assert_eq!(stream.peek_kind(), Some(TokenKind::Identifier));
        assert_eq!(stream.next_token().unwrap().0.text.as_deref(), Some("b"));
        assert!(stream.is_exhausted());
        assert!(stream.next_token().is_none());
        assert!(stream.peek().is_none());
        assert_eq!(stream.position(), 2);
    }

    #[test]
    fn test_skip_newlines() {
        let mut stream = TokenStream::new(tokenize("\n\r\n\nfoo").unwrap());
        stream.skip_newlines();
        assert_eq!(stream.peek_kind(), Some(TokenKind::Identifier));
    }

    #[test]
    fn test_end_span_of_empty_stream() {
        let stream = TokenStream::new(Vec::new());
        assert_eq!(stream.end_span(), Span::from_range(0, 0));
        assert_eq!(stream.current_span(), stream.end_span());
    }
}
