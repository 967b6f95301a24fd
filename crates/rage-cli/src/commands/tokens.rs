//! Implementation of the `rage tokens` command.

use crate::compiler::Overrides;
use anyhow::Result;
use std::path::Path;

/// Executes the `tokens` command: prints the token listing of the file.
///
/// # Errors
/// Returns an error if the file cannot be read or fails to lex.
pub fn execute(file: &Path, overrides: &Overrides) -> Result<()> {
    let compiler = super::load(file, overrides)?;
    print!("{}", compiler.tokens()?);
    Ok(())
}
