//! Implementation of the `rage check` command.

use crate::compiler::Overrides;
use anyhow::Result;
use std::path::Path;

/// Executes the `check` command: runs the whole pipeline, emits nothing.
///
/// # Errors
/// Returns an error if the file cannot be read or contains errors.
pub fn execute(file: &Path, overrides: &Overrides) -> Result<()> {
    let compiler = super::load(file, overrides)?;
    compiler.check()?;
    Ok(())
}
