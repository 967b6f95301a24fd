//! Compiler driver for a single source file.
//!
//! Pipeline: Source → Lexer → Parser → AST → CodeGen → IR → Verify

use crate::pipeline;
use crate::utils::{print_file_status, print_status};
use anyhow::{Context, Result};
use rage_codegen::CodegenOptions;
use rage_ir::{Interpreter, IrModule};
use rage_utils::Config;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Settings given on the command line, applied over `rage.toml`.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub module_name: Option<String>,
    pub no_verify: bool,
}

/// Compiler for one Rage source file.
pub struct Compiler {
    source_path: PathBuf,
    source: String,
    config: Option<Config>,
    options: CodegenOptions,
}

impl Compiler {
    /// Reads `source_path` and picks up the nearest `rage.toml` above it.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or a configuration file
    /// exists but is invalid.
    pub fn new(source_path: impl Into<PathBuf>, overrides: &Overrides) -> Result<Self> {
        let source_path = source_path.into();
        let source = fs::read_to_string(&source_path)
            .with_context(|| format!("Failed to read {}", source_path.display()))?;

        let search_dir = source_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let config = Config::find_from(&search_dir)
            .with_context(|| "Failed to load project configuration")?
            .map(|(config, _)| config);

        Ok(Self::from_source(source_path, source, config, overrides))
    }

    /// Builds a compiler from source text already in memory.
    #[must_use]
    pub fn from_source(
        source_path: impl Into<PathBuf>,
        source: impl Into<String>,
        config: Option<Config>,
        overrides: &Overrides,
    ) -> Self {
        let mut options = CodegenOptions::default();
        if let Some(config) = &config {
            options.module_name = config.compiler.module_name.clone();
            options.verify = config.compiler.verify;
        }
        if let Some(name) = &overrides.module_name {
            options.module_name = name.clone();
        }
        if overrides.no_verify {
            options.verify = false;
        }

        Self {
            source_path: source_path.into(),
            source: source.into(),
            config,
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &CodegenOptions {
        &self.options
    }

    #[must_use]
    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    /// File name used in diagnostics.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.source_path.display().to_string()
    }

    /// Compiles the file to an IR module.
    ///
    /// # Errors
    /// Returns an error if any pipeline stage fails.
    pub fn emit(&self) -> Result<IrModule> {
        pipeline::build_pipeline(&self.source, &self.file_name(), &self.options)
    }

    /// Checks the file for errors without producing output.
    ///
    /// # Errors
    /// Returns an error if the file contains errors.
    pub fn check(&self) -> Result<Duration> {
        let start = Instant::now();

        print_file_status("Checking", self.config.as_ref(), &self.source_path);
        pipeline::check_pipeline(&self.source, &self.file_name(), &self.options)?;

        let duration = start.elapsed();
        print_status(
            "Finished",
            &format!("file checked successfully in {:.2}s", duration.as_secs_f64()),
        );
        Ok(duration)
    }

    /// Returns the token listing of the file.
    ///
    /// # Errors
    /// Returns an error if lexical analysis fails.
    pub fn tokens(&self) -> Result<String> {
        pipeline::token_dump(&self.source, &self.file_name())
    }

    /// Compiles the file and interprets `main`, wiring `stream.in` to
    /// `input` and `stream.out` to `output`.
    ///
    /// # Errors
    /// Returns an error if compilation fails or execution hits a runtime
    /// error.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<i64> {
        let module = self.emit()?;
        let result = Interpreter::run(&module, "main", input, output)
            .with_context(|| format!("Failed to run {}", self.file_name()))?;
        Ok(result)
    }
}
