//! Parsing implementation modules.

mod control_flow;
mod expressions;
mod functions;
mod parser;
mod statements;

pub use parser::Parser;
