//! Command implementations for the Rage CLI.

pub mod check;
pub mod emit;
pub mod run;
pub mod tokens;

use crate::compiler::{Compiler, Overrides};
use crate::utils::has_source_extension;
use anyhow::Result;
use std::path::Path;

/// Loads the compiler for `file`, warning about unusual extensions.
fn load(file: &Path, overrides: &Overrides) -> Result<Compiler> {
    if !has_source_extension(file) {
        tracing::warn!(file = %file.display(), "source file does not end in .rg");
    }
    Compiler::new(file, overrides)
}
