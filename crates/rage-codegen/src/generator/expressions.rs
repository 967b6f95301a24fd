//! Expression code generation.

use super::core::CodeGenerator;
use rage_core::Result;
use rage_ir::{FloatOp, IrType, Value};
use rage_parser::{BinaryOperator, Expression};

impl CodeGenerator {
    /// Generates an expression, producing a `double` value.
    pub(crate) fn generate_expression(&mut self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Number { value, .. } => Ok(Value::Float(*value)),
            Expression::Variable { name, span } => {
                let slot = self.resolve_slot(name, *span)?;
                self.builder()?.build_load(IrType::Double, slot, name)
            }
            Expression::Binary {
                left,
                operator,
                right,
                ..
            } => {
                let lhs = self.generate_expression(left)?;
                let rhs = self.generate_expression(right)?;
                let op = float_op(*operator);
                self.builder()?
                    .build_float_binary(op, lhs, rhs, op.value_name())
            }
        }
    }
}

const fn float_op(operator: BinaryOperator) -> FloatOp {
    match operator {
        BinaryOperator::Add => FloatOp::Add,
        BinaryOperator::Subtract => FloatOp::Sub,
        BinaryOperator::Multiply => FloatOp::Mul,
        BinaryOperator::Divide => FloatOp::Div,
    }
}
