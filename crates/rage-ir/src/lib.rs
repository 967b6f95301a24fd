//! Rage intermediate representation.
//!
//! A basic-block IR modelled on LLVM: every function is a list of labelled
//! blocks, each ending in exactly one terminator. Mutable variables live in
//! stack slots created with `alloca` and are accessed through `load` and
//! `store`.
//!
//! The crate also contains the consumers of a finished module: the
//! [`verify`] pass, a textual printer (`Display`) and an [`Interpreter`].
//!
//! # Example
//!
//! ```rust
//! use rage_ir::{IrBuilder, IrModule, IrType, Value, verify_function};
//!
//! let mut module = IrModule::new("example");
//! let mut builder = IrBuilder::new("main", IrType::I32);
//! let entry = builder.append_block("entry");
//! builder.position_at_end(entry);
//! builder.build_return(Value::i32(0)).unwrap();
//!
//! let function = builder.finish();
//! verify_function(&function, &module).unwrap();
//! module.add_function(function).unwrap();
//! assert!(module.to_string().contains("ret i32 0"));
//! ```

mod builder;
mod display;
mod instruction;
mod interpreter;
mod module;
mod types;
mod value;
pub mod verify;

pub use builder::IrBuilder;
pub use display::{InstructionDisplay, format_double};
pub use instruction::{FloatOp, FloatPredicate, Instruction};
pub use interpreter::Interpreter;
pub use module::{BasicBlock, ExternalFunction, GlobalString, IrFunction, IrModule, Register};
pub use types::{IrType, Signature};
pub use value::{BlockId, RegisterId, Value};
pub use verify::{VerifyError, check_function, verify_function, verify_module};
