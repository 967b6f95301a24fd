//! Implementation of the `rage run` command.

use crate::compiler::Overrides;
use crate::utils::print_status;
use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;

/// Executes the `run` command: compiles the file and interprets `main`
/// with the process's stdin and stdout.
///
/// Returns the value `main` returned, for use as the exit code.
///
/// # Errors
/// Returns an error if the file cannot be compiled or run.
pub fn execute(file: &Path, overrides: &Overrides) -> Result<i32> {
    let compiler = super::load(file, overrides)?;
    print_status("Running", &compiler.file_name());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = compiler.run(stdin.lock(), stdout.lock())?;
    stdout.lock().flush()?;

    Ok(i32::try_from(result).unwrap_or(i32::MAX))
}
