//! Implementation of the `rage emit` command.

use crate::compiler::Overrides;
use crate::utils::print_status;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Executes the `emit` command: prints the IR module, or writes it to
/// `output` when given.
///
/// # Errors
/// Returns an error if compilation fails or the output cannot be written.
pub fn execute(file: &Path, output: Option<&Path>, overrides: &Overrides) -> Result<()> {
    let compiler = super::load(file, overrides)?;
    let module = compiler.emit()?;
    let text = module.to_string();

    match output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print_status("Emitted", &path.display().to_string());
        }
        None => print!("{text}"),
    }
    Ok(())
}
