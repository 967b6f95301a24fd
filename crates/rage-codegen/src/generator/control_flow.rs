//! Control flow code generation.

use super::core::{CodeGenerator, PendingReturn};
use rage_core::{Error, Result};
use rage_ir::{BlockId, FloatPredicate, Value};
use rage_parser::{Expression, Statement};

impl CodeGenerator {
    /// Generates an if/else.
    ///
    /// A branch that returns ends in `ret`; one that does not jumps to the
    /// merge block. When both branches return the merge block is
    /// unreachable but still closed with a `ret` of the else branch value.
    pub(crate) fn generate_if_else(
        &mut self,
        condition: &Expression,
        then_body: &[Statement],
        else_body: &[Statement],
    ) -> Result<()> {
        let value = self.generate_expression(condition)?;

        let builder = self.builder()?;
        let cond =
            builder.build_float_compare(FloatPredicate::One, value, Value::Float(0.0), "cond")?;
        let then_block = builder.append_block("then");
        let else_block = builder.create_block("else");
        let merge_block = builder.create_block("merge");
        builder.build_cond_branch(cond, then_block, else_block)?;

        builder.position_at_end(then_block);
        let then_returns = self.generate_branch(then_body, merge_block)?;

        let builder = self.builder()?;
        builder.attach_block(else_block);
        builder.position_at_end(else_block);
        let else_returns = self.generate_branch(else_body, merge_block)?;

        let builder = self.builder()?;
        builder.attach_block(merge_block);
        builder.position_at_end(merge_block);

        if then_returns && else_returns {
            let value = self.last_return.clone().ok_or_else(|| {
                Error::Codegen("Both branches returned but no return value was recorded".to_string())
            })?;
            self.emit_return(PendingReturn {
                ty: value.ty(),
                value,
            })?;
        }
        Ok(())
    }

    /// Generates one branch body; returns true if it ends in a return.
    fn generate_branch(&mut self, body: &[Statement], merge_block: BlockId) -> Result<bool> {
        for statement in body {
            self.generate_statement(statement)?;
            if let Some(pending) = self.pending_return.take() {
                self.emit_return(pending)?;
            }
        }

        // A nested if/else whose branches all return leaves the insertion
        // point on its closed merge block.
        let builder = self.builder()?;
        if builder.is_terminated() {
            return Ok(true);
        }
        builder.build_branch(merge_block)?;
        Ok(false)
    }
}
