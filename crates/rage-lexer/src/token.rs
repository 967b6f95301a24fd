//! Token definitions for the Rage lexer.

use logos::Logos;
use std::fmt;

/// A single token of Rage source.
///
/// `text` is only kept for tokens whose spelling matters after lexing:
/// identifiers, numeric and string literals, and type names.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Option<String>,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: Option<String>) -> Self {
        Self { kind, text }
    }

    /// Returns the token text, or the kind's spelling for bare tokens.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => self.kind.to_string(),
        }
    }
}

/// The closed set of token kinds.
///
/// Spaces and tabs are skipped; line feeds are significant and become
/// [`TokenKind::Newline`]. A carriage return is only accepted as part of
/// `\r\n`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t]+")]
pub enum TokenKind {
    // Keywords
    #[token("if")]
    If,

    #[token("else")]
    Else,

    #[token("return")]
    Return,

    #[token("for")]
    For,

    #[token("to")]
    To,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("none")]
    NoneLiteral,

    #[token("stream")]
    Stream,

    #[token("in")]
    In,

    #[token("out")]
    Out,

    #[token("int32")]
    #[token("int8")]
    #[token("float")]
    TypeName,

    // Identifiers and literals
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Number,

    #[regex(r#""[^"\n]*""#)]
    String,

    // Operators
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("=")]
    Equal,

    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    // Punctuation
    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token(";")]
    Semicolon,

    #[token("#")]
    Hash,

    #[token("\n")]
    #[token("\r\n")]
    Newline,
}

impl TokenKind {
    /// Returns true if the lexer keeps the source text for this kind.
    #[must_use]
    pub const fn keeps_text(self) -> bool {
        matches!(
            self,
            Self::TypeName | Self::Identifier | Self::Number | Self::String
        )
    }

    /// Returns true for the four arithmetic operators.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Plus | Self::Minus | Self::Star | Self::Slash)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::Return => write!(f, "return"),
            Self::For => write!(f, "for"),
            Self::To => write!(f, "to"),
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::NoneLiteral => write!(f, "none"),
            Self::Stream => write!(f, "stream"),
            Self::In => write!(f, "in"),
            Self::Out => write!(f, "out"),
            Self::TypeName => write!(f, "type name"),

            Self::Identifier => write!(f, "identifier"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),

            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Equal => write!(f, "="),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),

            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::Semicolon => write!(f, ";"),
            Self::Hash => write!(f, "#"),
            Self::Newline => write!(f, "newline"),
        }
    }
}
