//! Compilation pipeline stages.
//!
//! Each stage renders its error as a miette report on stderr and hands back
//! a short `anyhow` error naming the stage that failed.

use anyhow::Result;
use miette::NamedSource;
use rage_codegen::{CodegenOptions, generate_with_options};
use rage_core::{Error, Span};
use rage_ir::IrModule;
use rage_lexer::{Token, tokenize};
use rage_parser::{Program, parse};

/// Prints `error` with the offending source excerpt.
fn report(error: Error, name: &str, source: &str, stage: &str) -> anyhow::Error {
    let report = miette::Report::new(error)
        .with_source_code(NamedSource::new(name, source.to_string()));
    eprintln!("{report:?}");
    anyhow::anyhow!("{stage} failed")
}

/// Runs lexical analysis on source code.
///
/// # Errors
/// Returns an error if lexical analysis fails.
pub fn lex(source: &str, name: &str) -> Result<Vec<(Token, Span)>> {
    tokenize(source).map_err(|e| report(e, name, source, "Lexical analysis"))
}

/// Runs parsing on tokens to produce an AST.
///
/// # Errors
/// Returns an error if parsing fails.
pub fn parse_tokens(tokens: Vec<(Token, Span)>, source: &str, name: &str) -> Result<Program> {
    parse(tokens).map_err(|e| report(e, name, source, "Parsing"))
}

/// Lowers the AST to IR, verifying it when the options ask for it.
///
/// # Errors
/// Returns an error if code generation or verification fails.
pub fn generate(
    program: &Program,
    options: &CodegenOptions,
    source: &str,
    name: &str,
) -> Result<IrModule> {
    generate_with_options(program, options.clone())
        .map_err(|e| report(e, name, source, "Code generation"))
}

/// Runs the complete compilation pipeline and returns the IR module.
///
/// # Errors
/// Returns an error if any stage fails.
pub fn build_pipeline(source: &str, name: &str, options: &CodegenOptions) -> Result<IrModule> {
    let tokens = lex(source, name)?;
    let program = parse_tokens(tokens, source, name)?;
    generate(&program, options, source, name)
}

/// Runs every stage and discards the result.
///
/// # Errors
/// Returns an error if any stage fails.
pub fn check_pipeline(source: &str, name: &str, options: &CodegenOptions) -> Result<()> {
    let module = build_pipeline(source, name, options)?;
    tracing::info!(functions = module.functions.len(), "check passed");
    Ok(())
}

/// Lists the tokens of `source`, one per line: position, kind and text.
///
/// # Errors
/// Returns an error if lexical analysis fails.
pub fn token_dump(source: &str, name: &str) -> Result<String> {
    let tokens = lex(source, name)?;
    let mut dump = String::new();
    for (token, span) in &tokens {
        dump.push_str(&format!("{span}\t{}", token.kind));
        if let Some(text) = &token.text {
            dump.push_str(&format!("\t{text}"));
        }
        dump.push('\n');
    }
    Ok(dump)
}
