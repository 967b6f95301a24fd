//! Core types and utilities for the Rage compiler.
//!
//! This crate provides source spans and the single error type shared by
//! every compiler stage.

pub mod error;
pub mod span;

pub use error::{Error, ErrorKind, Result};
pub use span::{Location, Span};
