//! Shared utilities for the Rage toolchain: project configuration and
//! logger setup.

pub mod config;
pub mod logger;

pub use config::{CONFIG_FILE_NAME, CompilerSettings, Config, Package};
