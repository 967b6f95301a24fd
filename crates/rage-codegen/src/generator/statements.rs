//! Statement code generation.

use super::core::{CodeGenerator, PendingReturn};
use rage_core::{Result, Span};
use rage_ir::IrType;
use rage_parser::{Statement, StreamDirection};

impl CodeGenerator {
    /// Generates a single statement.
    pub(crate) fn generate_statement(&mut self, stmt: &Statement) -> Result<()> {
        self.ensure_reachable()?;

        match stmt {
            Statement::VariableDeclaration {
                name, initializer, ..
            } => {
                let value = self.generate_expression(initializer)?;
                let function = self.current_function()?.to_string();
                let builder = self.builder()?;
                let slot = builder.build_entry_alloca(IrType::Double, name)?;
                builder.build_store(value, slot.clone())?;
                if self.symbols.bind(name, &function, slot).is_some() {
                    tracing::trace!(variable = %name, "variable rebound");
                }
                Ok(())
            }
            Statement::Assignment { name, value, span } => {
                let slot = self.resolve_slot(name, *span)?;
                let value = self.generate_expression(value)?;
                self.builder()?.build_store(value, slot)
            }
            Statement::Return { value, .. } => {
                let value = self.generate_expression(value)?;
                self.pending_return = Some(PendingReturn {
                    ty: value.ty(),
                    value,
                });
                Ok(())
            }
            Statement::IfElse {
                condition,
                then_body,
                else_body,
                ..
            } => self.generate_if_else(condition, then_body, else_body),
            Statement::Stream {
                variable,
                direction,
                span,
            } => self.generate_stream(variable, *direction, *span),
        }
    }

    /// `stream.in` passes the slot to `scanf`; `stream.out` passes the
    /// loaded value to `printf`.
    fn generate_stream(
        &mut self,
        variable: &str,
        direction: StreamDirection,
        span: Span,
    ) -> Result<()> {
        let slot = self.resolve_slot(variable, span)?;

        let (callee, format, result_name) = match direction {
            StreamDirection::In => ("scanf", "%lf", "read"),
            StreamDirection::Out => ("printf", "%lf\n", "write"),
        };
        let signature = self.declare_io_function(callee)?;
        let format = self.module.intern_string(format);

        let builder = self.builder()?;
        let argument = match direction {
            StreamDirection::In => slot,
            StreamDirection::Out => builder.build_load(IrType::Double, slot, variable)?,
        };
        builder.build_call(callee, &signature, vec![format, argument], result_name)?;
        Ok(())
    }
}
