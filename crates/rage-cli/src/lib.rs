//! Rage CLI library for testing and reusability.

pub mod compiler;
pub mod pipeline;
pub mod utils;

pub use compiler::{Compiler, Overrides};
pub use rage_utils::Config;
