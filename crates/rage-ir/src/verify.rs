//! Structural verification of IR functions.
//!
//! Run after each function is generated so malformed control flow is
//! reported before the module reaches the printer or interpreter.

use std::collections::HashSet;
use std::fmt;

use rage_core::{Error, Result};

use crate::{Instruction, IrFunction, IrModule, IrType, RegisterId};

/// A single violated invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyError {
    pub message: String,
    pub function: String,
    pub block: Option<String>,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.block {
            Some(block) => write!(f, "in @{} %{block}: {}", self.function, self.message),
            None => write!(f, "in @{}: {}", self.function, self.message),
        }
    }
}

/// Collects every violation in `function`.
///
/// `module` resolves call targets; the function itself need not have been
/// added to it yet.
#[must_use]
pub fn check_function(function: &IrFunction, module: &IrModule) -> Vec<VerifyError> {
    let mut errors = Vec::new();
    let mut report = |message: String, block: Option<&str>| {
        errors.push(VerifyError {
            message,
            function: function.name.clone(),
            block: block.map(ToString::to_string),
        });
    };

    if function.layout.is_empty() {
        report("function has no entry block".to_string(), None);
        return errors;
    }

    let mut attached = HashSet::new();
    for id in &function.layout {
        if function.block(*id).is_none() {
            report(format!("layout refers to unknown block id {}", id.0), None);
        } else if !attached.insert(*id) {
            report(format!("block id {} appears twice in the layout", id.0), None);
        }
    }

    let defined: HashSet<RegisterId> = function
        .ordered_blocks()
        .flat_map(|b| b.instructions.iter().filter_map(Instruction::dest))
        .collect();

    let mut names = HashSet::new();
    let block_names = function.ordered_blocks().map(|b| b.name.as_str());
    let register_names = function.registers.iter().map(|r| r.name.as_str());
    for local in block_names.chain(register_names) {
        if !names.insert(local) {
            report(format!("name '%{local}' is defined more than once"), None);
        }
    }

    for block in function.ordered_blocks() {
        let name = Some(block.name.as_str());

        let Some(last) = block.instructions.last() else {
            report("block is empty".to_string(), name);
            continue;
        };
        if !last.is_terminator() {
            report("block does not end in a terminator".to_string(), name);
        }
        let terminators = block
            .instructions
            .iter()
            .filter(|inst| inst.is_terminator())
            .count();
        if terminators > 1 || (terminators == 1 && !last.is_terminator()) {
            report(
                "terminator found in the middle of the block".to_string(),
                name,
            );
        }

        for inst in &block.instructions {
            for target in inst.successors() {
                if !attached.contains(&target) {
                    let label = function
                        .block(target)
                        .map_or_else(|| format!("#{}", target.0), |b| b.name.clone());
                    report(
                        format!("branch to block '{label}' which is not part of the function"),
                        name,
                    );
                }
            }

            for operand in inst.operands() {
                if let Some(register) = operand.register() {
                    if function.register(register).is_none() || !defined.contains(&register) {
                        report(
                            format!("use of undefined register #{}", register.0),
                            name,
                        );
                    }
                }
            }

            match inst {
                Instruction::Return { value } if value.ty() != function.return_type => {
                    report(
                        format!(
                            "returns '{}' from a function declared to return '{}'",
                            value.ty(),
                            function.return_type
                        ),
                        name,
                    );
                }
                Instruction::CondBranch { condition, .. } if condition.ty() != IrType::I1 => {
                    report(
                        format!("branch condition must be 'i1', found '{}'", condition.ty()),
                        name,
                    );
                }
                Instruction::Call { callee, .. }
                    if module.get_external(callee).is_none() =>
                {
                    report(format!("call to undeclared external function '@{callee}'"), name);
                }
                _ => {}
            }
        }
    }

    errors
}

/// Verifies one function.
///
/// # Errors
/// Returns [`Error::Verify`] listing every violation found.
pub fn verify_function(function: &IrFunction, module: &IrModule) -> Result<()> {
    let errors = check_function(function, module);
    tracing::debug!(
        function = %function.name,
        errors = errors.len(),
        "verified function"
    );
    into_result(&errors)
}

/// Verifies every function in the module and rejects duplicate names.
///
/// # Errors
/// Returns [`Error::Verify`] listing every violation found.
pub fn verify_module(module: &IrModule) -> Result<()> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();
    for function in &module.functions {
        if !names.insert(function.name.as_str()) {
            errors.push(VerifyError {
                message: "duplicate function name".to_string(),
                function: function.name.clone(),
                block: None,
            });
        }
        errors.extend(check_function(function, module));
    }
    into_result(&errors)
}

fn into_result(errors: &[VerifyError]) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(Error::Verify(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IrBuilder, Value};
    use rage_core::ErrorKind;

    #[test]
    fn test_valid_function_passes() {
        let module = IrModule::new("test");
        let mut builder = IrBuilder::new("main", IrType::I32);
        let entry = builder.append_block("entry");
        builder.position_at_end(entry);
        builder.build_return(Value::i32(0)).unwrap();

        assert!(verify_function(&builder.finish(), &module).is_ok());
    }

    #[test]
    fn test_missing_terminator_is_reported() {
        let module = IrModule::new("test");
        let mut builder = IrBuilder::new("main", IrType::I32);
        let entry = builder.append_block("entry");
        builder.position_at_end(entry);
        builder.build_entry_alloca(IrType::Double, "x").unwrap();

        let err = verify_function(&builder.finish(), &module).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Verify);
        assert!(err.to_string().contains("%entry: block does not end in a terminator"));
    }

    #[test]
    fn test_empty_and_detached_blocks_are_reported() {
        let module = IrModule::new("test");
        let mut builder = IrBuilder::new("main", IrType::I32);
        let entry = builder.append_block("entry");
        let _merge = builder.append_block("merge");
        let detached = builder.create_block("else");
        builder.position_at_end(entry);
        builder.build_branch(detached).unwrap();

        let function = builder.finish();
        let errors = check_function(&function, &module);
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert!(messages.contains(&"branch to block 'else' which is not part of the function"));
        assert!(messages.contains(&"block is empty"));
        assert_eq!(errors.iter().filter(|e| e.block.as_deref() == Some("merge")).count(), 1);
    }

    #[test]
    fn test_function_without_blocks_is_reported() {
        let module = IrModule::new("test");
        let function = IrFunction::new("main", IrType::I32);
        let errors = check_function(&function, &module);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "in @main: function has no entry block");
    }

    #[test]
    fn test_duplicate_local_names_are_reported() {
        let module = IrModule::new("test");
        let mut builder = IrBuilder::new("main", IrType::I32);
        let entry = builder.append_block("entry");
        builder.position_at_end(entry);
        let slot = builder.build_entry_alloca(IrType::Double, "x").unwrap();
        builder.build_load(IrType::Double, slot, "y").unwrap();
        builder.build_return(Value::i32(0)).unwrap();

        let mut function = builder.finish();
        function.registers[1].name = "x".to_string();
        let errors = check_function(&function, &module);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "in @main: name '%x' is defined more than once");
    }
}
