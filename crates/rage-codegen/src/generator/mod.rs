//! Code generation implementation modules.

mod control_flow;
mod core;
mod expressions;
mod statements;
mod symbols;

pub use core::{CodeGenerator, CodegenOptions, PendingReturn};
pub use symbols::{Binding, SymbolTable};
