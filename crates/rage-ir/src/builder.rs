//! Instruction builder with an explicit insertion point.

use std::collections::{HashMap, HashSet};

use rage_core::{Error, Result};

use crate::{
    BasicBlock, BlockId, FloatOp, FloatPredicate, Instruction, IrFunction, IrType, Register,
    RegisterId, Signature, Value,
};

/// Builds one function at a time, appending instructions at the end of the
/// current insertion block.
///
/// Value and block names share a single namespace per function; a name
/// already in use gets the first free numeric suffix (`x`, `x1`, `x2`, ...),
/// skipping suffixed names that were issued for another base.
#[derive(Debug)]
pub struct IrBuilder {
    function: IrFunction,
    insert_point: Option<BlockId>,
    issued: HashSet<String>,
    suffixes: HashMap<String, usize>,
}

impl IrBuilder {
    /// Starts a new function with no blocks.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: IrType) -> Self {
        Self {
            function: IrFunction::new(name, return_type),
            insert_point: None,
            issued: HashSet::new(),
            suffixes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn function(&self) -> &IrFunction {
        &self.function
    }

    #[must_use]
    pub fn return_type(&self) -> IrType {
        self.function.return_type
    }

    /// Creates a block that is not yet part of the layout.
    pub fn create_block(&mut self, name: &str) -> BlockId {
        let id = BlockId(self.function.blocks.len() as u32);
        let name = self.unique_name(name);
        self.function.blocks.push(BasicBlock {
            id,
            name,
            instructions: Vec::new(),
        });
        id
    }

    /// Creates a block and appends it to the layout.
    pub fn append_block(&mut self, name: &str) -> BlockId {
        let id = self.create_block(name);
        self.function.layout.push(id);
        id
    }

    /// Appends a previously created block to the layout.
    pub fn attach_block(&mut self, id: BlockId) {
        if !self.function.layout.contains(&id) {
            self.function.layout.push(id);
        }
    }

    pub fn position_at_end(&mut self, block: BlockId) {
        self.insert_point = Some(block);
    }

    #[must_use]
    pub fn insert_block(&self) -> Option<BlockId> {
        self.insert_point
    }

    #[must_use]
    pub fn entry_block(&self) -> Option<BlockId> {
        self.function.entry()
    }

    /// Returns true if the insertion block already ends in a terminator.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.insert_point
            .and_then(|id| self.function.block(id))
            .is_some_and(BasicBlock::is_terminated)
    }

    /// Allocates a stack slot in the entry block, after any slots already
    /// allocated there, regardless of the current insertion point.
    ///
    /// # Errors
    /// Returns an error if the function has no entry block.
    pub fn build_entry_alloca(&mut self, ty: IrType, name: &str) -> Result<Value> {
        let dest = self.new_register(name, IrType::Ptr);
        self.insert_in_prologue(Instruction::Alloca { dest, ty })?;
        Ok(Value::Register {
            id: dest,
            ty: IrType::Ptr,
        })
    }

    /// Like [`IrBuilder::build_entry_alloca`], and also stores `initial`
    /// into the slot before any other code of the entry block runs.
    ///
    /// # Errors
    /// Returns an error if the function has no entry block.
    pub fn build_entry_alloca_init(
        &mut self,
        ty: IrType,
        name: &str,
        initial: Value,
    ) -> Result<Value> {
        expect_type(&initial, ty, "initial store")?;
        let slot = self.build_entry_alloca(ty, name)?;
        self.insert_in_prologue(Instruction::Store {
            value: initial,
            pointer: slot.clone(),
        })?;
        Ok(slot)
    }

    /// # Errors
    /// Returns an error if `pointer` is not a pointer.
    pub fn build_load(&mut self, ty: IrType, pointer: Value, name: &str) -> Result<Value> {
        expect_type(&pointer, IrType::Ptr, "load address")?;
        let dest = self.new_register(name, ty);
        self.push(Instruction::Load { dest, ty, pointer })?;
        Ok(Value::Register { id: dest, ty })
    }

    /// # Errors
    /// Returns an error if `pointer` is not a pointer.
    pub fn build_store(&mut self, value: Value, pointer: Value) -> Result<()> {
        expect_type(&pointer, IrType::Ptr, "store address")?;
        self.push(Instruction::Store { value, pointer })
    }

    /// # Errors
    /// Returns an error if either operand is not a double.
    pub fn build_float_binary(
        &mut self,
        op: FloatOp,
        left: Value,
        right: Value,
        name: &str,
    ) -> Result<Value> {
        expect_type(&left, IrType::Double, op.mnemonic())?;
        expect_type(&right, IrType::Double, op.mnemonic())?;
        let dest = self.new_register(name, IrType::Double);
        self.push(Instruction::FloatBinary {
            dest,
            op,
            left,
            right,
        })?;
        Ok(Value::Register {
            id: dest,
            ty: IrType::Double,
        })
    }

    /// # Errors
    /// Returns an error if either operand is not a double.
    pub fn build_float_compare(
        &mut self,
        predicate: FloatPredicate,
        left: Value,
        right: Value,
        name: &str,
    ) -> Result<Value> {
        expect_type(&left, IrType::Double, "fcmp")?;
        expect_type(&right, IrType::Double, "fcmp")?;
        let dest = self.new_register(name, IrType::I1);
        self.push(Instruction::FloatCompare {
            dest,
            predicate,
            left,
            right,
        })?;
        Ok(Value::Register {
            id: dest,
            ty: IrType::I1,
        })
    }

    /// # Errors
    /// Returns an error unless `value` is a double and `ty` an integer type.
    pub fn build_float_to_signed(&mut self, value: Value, ty: IrType, name: &str) -> Result<Value> {
        expect_type(&value, IrType::Double, "fptosi")?;
        if !ty.is_integer() {
            return Err(Error::Codegen(format!(
                "fptosi target must be an integer type, found '{ty}'"
            )));
        }
        let dest = self.new_register(name, ty);
        self.push(Instruction::FloatToSigned { dest, value, ty })?;
        Ok(Value::Register { id: dest, ty })
    }

    /// Emits a call; returns the result unless the callee returns `void`.
    ///
    /// # Errors
    /// Returns an error if the argument count does not fit the signature.
    pub fn build_call(
        &mut self,
        callee: &str,
        signature: &Signature,
        args: Vec<Value>,
        name: &str,
    ) -> Result<Option<Value>> {
        let arity_ok = if signature.variadic {
            args.len() >= signature.params.len()
        } else {
            args.len() == signature.params.len()
        };
        if !arity_ok {
            return Err(Error::Codegen(format!(
                "call to '{callee}' with {} argument(s) does not match {}",
                args.len(),
                signature.param_list()
            )));
        }
        for (arg, param) in args.iter().zip(&signature.params) {
            expect_type(arg, *param, callee)?;
        }

        let dest = (signature.return_type != IrType::Void)
            .then(|| self.new_register(name, signature.return_type));
        self.push(Instruction::Call {
            dest,
            callee: callee.to_string(),
            signature: signature.clone(),
            args,
        })?;
        Ok(dest.map(|id| Value::Register {
            id,
            ty: signature.return_type,
        }))
    }

    /// # Errors
    /// Returns an error if the insertion block is missing or terminated.
    pub fn build_branch(&mut self, target: BlockId) -> Result<()> {
        self.push(Instruction::Branch { target })
    }

    /// # Errors
    /// Returns an error if `condition` is not an `i1`.
    pub fn build_cond_branch(
        &mut self,
        condition: Value,
        then_block: BlockId,
        else_block: BlockId,
    ) -> Result<()> {
        expect_type(&condition, IrType::I1, "conditional branch")?;
        self.push(Instruction::CondBranch {
            condition,
            then_block,
            else_block,
        })
    }

    /// # Errors
    /// Returns an error if `value` does not have the function's return type.
    pub fn build_return(&mut self, value: Value) -> Result<()> {
        expect_type(&value, self.function.return_type, "ret")?;
        self.push(Instruction::Return { value })
    }

    /// Consumes the builder and returns the finished function.
    #[must_use]
    pub fn finish(self) -> IrFunction {
        self.function
    }

    fn push(&mut self, instruction: Instruction) -> Result<()> {
        let id = self
            .insert_point
            .ok_or_else(|| Error::Codegen("No insertion block is set".to_string()))?;
        let block = self.block_mut(id)?;
        if block.is_terminated() {
            return Err(Error::Codegen(format!(
                "Block '{}' already ends in a terminator",
                block.name
            )));
        }
        block.instructions.push(instruction);
        Ok(())
    }

    /// Inserts right after the leading `alloca`s of the entry block.
    fn insert_in_prologue(&mut self, instruction: Instruction) -> Result<()> {
        let entry = self.entry_block().ok_or_else(|| {
            Error::Codegen(format!("Function '{}' has no entry block", self.function.name))
        })?;
        let block = self.block_mut(entry)?;
        let position = block
            .instructions
            .iter()
            .take_while(|inst| matches!(inst, Instruction::Alloca { .. }))
            .count();
        block.instructions.insert(position, instruction);
        Ok(())
    }

    fn block_mut(&mut self, id: BlockId) -> Result<&mut BasicBlock> {
        self.function
            .block_mut(id)
            .ok_or_else(|| Error::Codegen(format!("Unknown block id {}", id.0)))
    }

    fn new_register(&mut self, name: &str, ty: IrType) -> RegisterId {
        let id = RegisterId(self.function.registers.len() as u32);
        let name = self.unique_name(name);
        self.function.registers.push(Register { name, ty });
        id
    }

    fn unique_name(&mut self, name: &str) -> String {
        let base = if name.is_empty() { "tmp" } else { name };
        if self.issued.insert(base.to_string()) {
            return base.to_string();
        }

        let counter = self.suffixes.entry(base.to_string()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{base}{counter}");
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

fn expect_type(value: &Value, expected: IrType, context: &str) -> Result<()> {
    if value.ty() == expected {
        Ok(())
    } else {
        Err(Error::Codegen(format!(
            "Operand of '{context}' must be '{expected}', found '{}'",
            value.ty()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_with_entry() -> (IrBuilder, BlockId) {
        let mut builder = IrBuilder::new("main", IrType::I32);
        let entry = builder.append_block("entry");
        builder.position_at_end(entry);
        (builder, entry)
    }

    #[test]
    fn test_names_are_uniqued() {
        let (mut builder, _) = builder_with_entry();
        let slot = builder.build_entry_alloca(IrType::Double, "x").unwrap();
        let first = builder.build_load(IrType::Double, slot.clone(), "x").unwrap();
        let second = builder.build_load(IrType::Double, slot, "x").unwrap();

        let function = builder.finish();
        let name = |v: &Value| function.register(v.register().unwrap()).unwrap().name.clone();
        assert_eq!(name(&first), "x1");
        assert_eq!(name(&second), "x2");
    }

    #[test]
    fn test_suffixed_name_taken_by_another_base() {
        let (mut builder, _) = builder_with_entry();
        let x = builder.build_entry_alloca(IrType::Double, "x").unwrap();
        let load = builder.build_load(IrType::Double, x, "x").unwrap();
        let x1 = builder.build_entry_alloca(IrType::Double, "x1").unwrap();
        let then_block = builder.append_block("then");
        let then_again = builder.append_block("then");
        let then1_var = builder.build_entry_alloca(IrType::Double, "then1").unwrap();

        let function = builder.finish();
        let name = |v: &Value| function.register(v.register().unwrap()).unwrap().name.clone();
        assert_eq!(name(&load), "x1");
        assert_eq!(name(&x1), "x11");
        assert_eq!(function.block(then_block).unwrap().name, "then");
        assert_eq!(function.block(then_again).unwrap().name, "then1");
        assert_eq!(name(&then1_var), "then11");
    }

    #[test]
    fn test_entry_allocas_stay_grouped() {
        let mut builder = IrBuilder::new("main", IrType::I32);
        let entry = builder.append_block("entry");
        let other = builder.append_block("then");
        builder.position_at_end(entry);
        let a = builder.build_entry_alloca(IrType::Double, "a").unwrap();
        builder.build_store(Value::Float(1.0), a).unwrap();

        builder.position_at_end(other);
        builder.build_entry_alloca(IrType::Double, "b").unwrap();

        let function = builder.finish();
        let entry_block = function.block(entry).unwrap();
        assert!(matches!(entry_block.instructions[0], Instruction::Alloca { .. }));
        assert!(matches!(entry_block.instructions[1], Instruction::Alloca { .. }));
        assert!(matches!(entry_block.instructions[2], Instruction::Store { .. }));
        assert!(function.block(other).unwrap().instructions.is_empty());
    }

    #[test]
    fn test_no_instruction_after_terminator() {
        let (mut builder, _) = builder_with_entry();
        builder.build_return(Value::i32(0)).unwrap();
        assert!(builder.is_terminated());

        let err = builder.build_return(Value::i32(1)).unwrap_err();
        assert!(err.to_string().contains("already ends in a terminator"));
    }

    #[test]
    fn test_type_mismatches_are_rejected() {
        let (mut builder, _) = builder_with_entry();
        assert!(builder.build_return(Value::Float(1.0)).is_err());
        assert!(
            builder
                .build_float_binary(FloatOp::Add, Value::i32(1), Value::Float(1.0), "add")
                .is_err()
        );
        let then_block = builder.create_block("then");
        assert!(
            builder
                .build_cond_branch(Value::Float(1.0), then_block, then_block)
                .is_err()
        );
    }

    #[test]
    fn test_detached_block_is_attached_later() {
        let (mut builder, _) = builder_with_entry();
        let merge = builder.create_block("merge");
        assert_eq!(builder.function().layout.len(), 1);

        builder.attach_block(merge);
        builder.attach_block(merge);
        assert_eq!(builder.function().layout.len(), 2);
    }

    #[test]
    fn test_variadic_call_arity() {
        let (mut builder, _) = builder_with_entry();
        let signature = Signature::new(IrType::I32, vec![IrType::Ptr], true);
        let fmt = Value::Global("fmt.0".to_string());

        let result = builder
            .build_call("printf", &signature, vec![fmt, Value::Float(1.0)], "write")
            .unwrap();
        assert_eq!(result.map(|v| v.ty()), Some(IrType::I32));
        assert!(builder.build_call("printf", &signature, vec![], "write").is_err());
    }
}
