//! Lexical analysis for the Rage language.
//!
//! This crate turns Rage source text into a flat, fully materialised
//! sequence of tokens. Newlines are significant and are kept as tokens.

mod stream;
mod token;

pub use stream::TokenStream;
pub use token::{Token, TokenKind};

use logos::Logos;
use rage_core::{Error, Location, Result, Span};

/// Tokenizes Rage source code into a vector of tokens.
///
/// # Arguments
/// * `source` - The source code to tokenize
///
/// # Returns
/// A vector of tokens with their spans
///
/// # Errors
/// Returns [`Error::Lexer`] on the first character that does not start a
/// token, or on a carriage return not followed by a line feed.
///
/// # Examples
/// ```
/// use rage_lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("float x = 42\n").unwrap();
/// assert_eq!(tokens[0].0.kind, TokenKind::TypeName);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut line = 1;
    let mut line_start = 0;

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let start = Location::new(line, range.start - line_start + 1, range.start);
        let end = Location::new(line, range.end - line_start + 1, range.end);
        let span = Span::new(start, end);

        let kind = result.map_err(|()| invalid_input(lexer.slice(), span))?;

        if kind == TokenKind::Newline {
            line += 1;
            line_start = range.end;
        }

        let text = kind.keeps_text().then(|| lexer.slice().to_string());
        tokens.push((Token { kind, text }, span));
    }

    tracing::debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Tokenizes source code and wraps the result in a [`TokenStream`].
///
/// # Errors
/// Returns an error if the source contains invalid characters.
pub fn token_stream(source: &str) -> Result<TokenStream> {
    tokenize(source).map(TokenStream::new)
}

fn invalid_input(slice: &str, span: Span) -> Error {
    let message = match slice.chars().next() {
        Some('\r') => "malformed line terminator: '\\r' must be followed by '\\n'".to_string(),
        Some(c) => format!("invalid character '{}'", c.escape_debug()),
        None => "unexpected end of input".to_string(),
    };
    Error::Lexer(message, span)
}
