//! Core code generator: module, per-function state and return handling.

use rage_core::{Error, Result, Span};
use rage_ir::{IrBuilder, IrModule, IrType, Signature, Value, verify_function};
use rage_parser::{Function, Program};

use super::symbols::SymbolTable;

/// Module name used when none is configured.
pub const DEFAULT_MODULE_NAME: &str = "Rage Language";

/// Knobs for a code generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Identifier printed in the module header
    pub module_name: String,
    /// Verify each function right after it is generated
    pub verify: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            module_name: DEFAULT_MODULE_NAME.to_string(),
            verify: true,
        }
    }
}

/// A `return` value waiting for the enclosing function or branch to emit
/// the actual `ret`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReturn {
    pub value: Value,
    pub ty: IrType,
}

/// State of the function currently being generated.
#[derive(Debug)]
pub(crate) struct FunctionState {
    pub(crate) name: String,
    pub(crate) builder: IrBuilder,
}

/// Lowers Rage ASTs into an [`IrModule`].
#[derive(Debug)]
pub struct CodeGenerator {
    pub(crate) options: CodegenOptions,
    pub(crate) module: IrModule,
    pub(crate) symbols: SymbolTable,
    pub(crate) pending_return: Option<PendingReturn>,
    /// Value of the most recently emitted return, reused for the `ret`
    /// that closes a merge block no path reaches.
    pub(crate) last_return: Option<Value>,
    pub(crate) current: Option<FunctionState>,
}

impl CodeGenerator {
    #[must_use]
    pub fn new(options: CodegenOptions) -> Self {
        Self {
            module: IrModule::new(options.module_name.clone()),
            options,
            symbols: SymbolTable::new(),
            pending_return: None,
            last_return: None,
            current: None,
        }
    }

    /// Generates every function of `program` and returns the module.
    ///
    /// # Errors
    /// Returns the first resolution, code generation or verification error.
    pub fn generate(mut self, program: &Program) -> Result<IrModule> {
        for function in &program.functions {
            self.generate_function(function)?;
        }
        Ok(self.finish())
    }

    /// Generates one function and adds it to the module.
    ///
    /// Symbols bound by earlier calls stay visible.
    ///
    /// # Errors
    /// Returns the first resolution, code generation or verification error.
    pub fn generate_function(&mut self, function: &Function) -> Result<()> {
        let mut builder = IrBuilder::new(function.name.clone(), IrType::I32);
        let entry = builder.append_block("entry");
        builder.position_at_end(entry);
        self.current = Some(FunctionState {
            name: function.name.clone(),
            builder,
        });
        self.pending_return = None;
        self.last_return = None;

        for statement in &function.body {
            self.generate_statement(statement)?;
        }

        if let Some(pending) = self.pending_return.take() {
            self.ensure_reachable()?;
            self.emit_return(pending)?;
        }

        let state = self
            .current
            .take()
            .ok_or_else(|| Error::Codegen("No function is being generated".to_string()))?;
        let ir_function = state.builder.finish();

        if self.options.verify {
            verify_function(&ir_function, &self.module)?;
        }
        tracing::debug!(
            function = %ir_function.name,
            blocks = ir_function.layout.len(),
            instructions = ir_function.instruction_count(),
            "generated function"
        );
        self.module.add_function(ir_function)
    }

    /// Returns the module generated so far.
    #[must_use]
    pub fn finish(self) -> IrModule {
        self.module
    }

    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub(crate) fn builder(&mut self) -> Result<&mut IrBuilder> {
        self.current
            .as_mut()
            .map(|state| &mut state.builder)
            .ok_or_else(|| Error::Codegen("No function is being generated".to_string()))
    }

    pub(crate) fn current_function(&self) -> Result<&str> {
        self.current
            .as_ref()
            .map(|state| state.name.as_str())
            .ok_or_else(|| Error::Codegen("No function is being generated".to_string()))
    }

    /// Converts a pending value to the function's return type and emits `ret`.
    pub(crate) fn emit_return(&mut self, pending: PendingReturn) -> Result<()> {
        let builder = self.builder()?;
        let return_type = builder.return_type();
        let value = if pending.ty == return_type {
            pending.value.clone()
        } else {
            builder.build_float_to_signed(pending.value.clone(), return_type, "ret")?
        };
        builder.build_return(value)?;
        self.last_return = Some(pending.value);
        Ok(())
    }

    /// Fails if the insertion block can no longer receive instructions.
    pub(crate) fn ensure_reachable(&mut self) -> Result<()> {
        if self.builder()?.is_terminated() {
            return Err(Error::Codegen(
                "Statement follows an if/else whose branches both return".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the slot bound to `name` in the current function.
    ///
    /// A name bound while generating an earlier function gets a fresh,
    /// zero-initialised slot here since that function's frame is gone.
    pub(crate) fn resolve_slot(&mut self, name: &str, span: Span) -> Result<Value> {
        let binding = self
            .symbols
            .lookup(name)
            .cloned()
            .ok_or_else(|| Error::Resolution(format!("Variable '{name}' is not declared"), span))?;

        let function = self.current_function()?.to_string();
        if binding.function == function {
            return Ok(binding.slot);
        }

        tracing::trace!(
            variable = name,
            from = %binding.function,
            to = %function,
            "rebinding variable into new frame"
        );
        let slot = self
            .builder()?
            .build_entry_alloca_init(IrType::Double, name, Value::Float(0.0))?;
        self.symbols.bind(name, &function, slot.clone());
        Ok(slot)
    }

    /// Declares an I/O routine with the `i32 (ptr, ...)` signature.
    pub(crate) fn declare_io_function(&mut self, name: &str) -> Result<Signature> {
        let signature = Signature::new(IrType::I32, vec![IrType::Ptr], true);
        self.module.declare_external(name, signature.clone())?;
        Ok(signature)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(CodegenOptions::default())
    }
}
