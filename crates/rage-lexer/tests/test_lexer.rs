//! Tests for the Rage lexer.

use rage_core::ErrorKind;
use rage_lexer::{TokenKind, tokenize};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|(token, _)| token.kind)
        .collect()
}

#[test]
fn test_keywords() {
    let source = "if else return for to true false none stream in out";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Return,
            TokenKind::For,
            TokenKind::To,
            TokenKind::True,
            TokenKind::False,
            TokenKind::NoneLiteral,
            TokenKind::Stream,
            TokenKind::In,
            TokenKind::Out,
        ]
    );

    // Bare keywords carry no text.
    let tokens = tokenize(source).unwrap();
    assert!(tokens.iter().all(|(token, _)| token.text.is_none()));
}

#[test]
fn test_type_names_keep_text() {
    let tokens = tokenize("int32 int8 float").unwrap();

    assert_eq!(tokens.len(), 3);
    for ((token, _), expected) in tokens.iter().zip(["int32", "int8", "float"]) {
        assert_eq!(token.kind, TokenKind::TypeName);
        assert_eq!(token.text.as_deref(), Some(expected));
    }
}

#[test]
fn test_keyword_prefixes_are_identifiers() {
    let tokens = tokenize("int int32x inner returned _if").unwrap();

    assert!(
        tokens
            .iter()
            .all(|(token, _)| token.kind == TokenKind::Identifier)
    );
    assert_eq!(tokens[1].0.text.as_deref(), Some("int32x"));
    assert_eq!(tokens[4].0.text.as_deref(), Some("_if"));
}

#[test]
fn test_punctuation() {
    assert_eq!(
        kinds("{ } ( ) ; . = + - * / , # < >"),
        vec![
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::Semicolon,
            TokenKind::Dot,
            TokenKind::Equal,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Comma,
            TokenKind::Hash,
            TokenKind::Less,
            TokenKind::Greater,
        ]
    );
}

#[test]
fn test_number_literals_keep_text() {
    let tokens = tokenize("42 3.14 7.").unwrap();

    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().all(|(t, _)| t.kind == TokenKind::Number));
    assert_eq!(tokens[0].0.text.as_deref(), Some("42"));
    assert_eq!(tokens[1].0.text.as_deref(), Some("3.14"));
    assert_eq!(tokens[2].0.text.as_deref(), Some("7."));
}

#[test]
fn test_number_with_two_dots() {
    // At most one decimal point belongs to a literal.
    let tokens = tokenize("1.5.3").unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].0.text.as_deref(), Some("1.5"));
    assert_eq!(tokens[1].0.kind, TokenKind::Dot);
    assert_eq!(tokens[2].0.text.as_deref(), Some("3"));
}

#[test]
fn test_newlines_are_tokens() {
    assert_eq!(
        kinds("a\nb\r\nc"),
        vec![
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn test_spaces_and_tabs_are_skipped() {
    assert_eq!(kinds(" \t x \t "), vec![TokenKind::Identifier]);
}

#[test]
fn test_string_literal() {
    let tokens = tokenize(r#""hello""#).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].0.kind, TokenKind::String);
    assert_eq!(tokens[0].0.text.as_deref(), Some(r#""hello""#));
}

#[test]
fn test_invalid_character_fails() {
    let err = tokenize("float x = 1 @ 2\n").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Lex);
    assert!(err.to_string().contains("invalid character '@'"));
    assert_eq!(err.span().unwrap().start.offset, 12);
}

#[test]
fn test_lone_carriage_return_fails() {
    let err = tokenize("x\ry").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Lex);
    assert!(err.to_string().contains("malformed line terminator"));
}

#[test]
fn test_function_token_dump() {
    let source = "int32 main() {\n    return 0\n}\n";
    let dump = kinds(source)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    insta::assert_snapshot!(dump, @"type name identifier ( ) { newline return number newline } newline");
}
