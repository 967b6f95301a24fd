//! Status output shared across the CLI.
//!
//! Status lines go to stderr; stdout is reserved for IR, token listings and
//! the output of interpreted programs.

use colored::Colorize;
use rage_utils::Config;
use std::path::Path;

/// Conventional extension of Rage source files.
pub const SOURCE_EXTENSION: &str = "rg";

/// Prints a status message with colored output.
pub fn print_status(status: &str, message: &str) {
    eprintln!("{:>12} {message}", status.green().bold());
}

/// Prints a status message naming the file and, when present, its project.
pub fn print_file_status(status: &str, config: Option<&Config>, path: &Path) {
    match config {
        Some(config) => print_status(
            status,
            &format!(
                "{} v{} ({})",
                config.package.name,
                config.package.version,
                path.display()
            ),
        ),
        None => print_status(status, &path.display().to_string()),
    }
}

/// Returns true if `path` has the conventional `.rg` extension.
pub fn has_source_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}
