//! Textual rendering of IR in an LLVM-flavoured syntax.

use std::fmt;

use crate::{BlockId, GlobalString, Instruction, IrFunction, IrModule, RegisterId, Value};

impl fmt::Display for IrModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.name)?;

        if !self.globals.is_empty() {
            writeln!(f)?;
            for global in &self.globals {
                writeln!(f, "{global}")?;
            }
        }

        for function in &self.functions {
            writeln!(f)?;
            write!(f, "{function}")?;
        }

        if !self.externals.is_empty() {
            writeln!(f)?;
            for external in &self.externals {
                writeln!(
                    f,
                    "declare {} @{}{}",
                    external.signature.return_type,
                    external.name,
                    external.signature.param_list()
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for GlobalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@{} = private unnamed_addr constant [{} x i8] c\"",
            self.name,
            self.bytes.len()
        )?;
        for byte in &self.bytes {
            match byte {
                b'"' | b'\\' => write!(f, "\\{byte:02X}")?,
                0x20..=0x7E => write!(f, "{}", char::from(*byte))?,
                _ => write!(f, "\\{byte:02X}")?,
            }
        }
        write!(f, "\"")
    }
}

impl fmt::Display for IrFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "define {} @{}() {{", self.return_type, self.name)?;
        for (index, block) in self.ordered_blocks().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}:", block.name)?;
            for inst in &block.instructions {
                writeln!(f, "  {}", self.display_instruction(inst))?;
            }
        }
        writeln!(f, "}}")
    }
}

impl IrFunction {
    /// Renders one instruction using this function's register names.
    #[must_use]
    pub fn display_instruction<'a>(&'a self, inst: &'a Instruction) -> InstructionDisplay<'a> {
        InstructionDisplay {
            function: self,
            inst,
        }
    }

    fn operand(&self, value: &Value) -> String {
        match value {
            Value::Register { id, .. } => self.dest_name(*id),
            Value::Float(v) => format_double(*v),
            Value::Int { value, .. } => value.to_string(),
            Value::Global(name) => format!("@{name}"),
        }
    }

    fn typed(&self, value: &Value) -> String {
        format!("{} {}", value.ty(), self.operand(value))
    }

    fn label(&self, id: BlockId) -> String {
        match self.block(id) {
            Some(block) => format!("label %{}", block.name),
            None => format!("label %{}", id.0),
        }
    }

    fn dest_name(&self, id: RegisterId) -> String {
        self.register(id)
            .map_or_else(|| format!("%{}", id.0), |register| format!("%{}", register.name))
    }
}

/// See [`IrFunction::display_instruction`].
pub struct InstructionDisplay<'a> {
    function: &'a IrFunction,
    inst: &'a Instruction,
}

impl fmt::Display for InstructionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let func = self.function;
        match self.inst {
            Instruction::Alloca { dest, ty } => {
                write!(f, "{} = alloca {ty}", func.dest_name(*dest))
            }
            Instruction::Load { dest, ty, pointer } => write!(
                f,
                "{} = load {ty}, {}",
                func.dest_name(*dest),
                func.typed(pointer)
            ),
            Instruction::Store { value, pointer } => {
                write!(f, "store {}, {}", func.typed(value), func.typed(pointer))
            }
            Instruction::FloatBinary {
                dest,
                op,
                left,
                right,
            } => write!(
                f,
                "{} = {op} {}, {}",
                func.dest_name(*dest),
                func.typed(left),
                func.operand(right)
            ),
            Instruction::FloatCompare {
                dest,
                predicate,
                left,
                right,
            } => write!(
                f,
                "{} = fcmp {predicate} {}, {}",
                func.dest_name(*dest),
                func.typed(left),
                func.operand(right)
            ),
            Instruction::FloatToSigned { dest, value, ty } => write!(
                f,
                "{} = fptosi {} to {ty}",
                func.dest_name(*dest),
                func.typed(value)
            ),
            Instruction::Call {
                dest,
                callee,
                signature,
                args,
            } => {
                if let Some(dest) = dest {
                    write!(f, "{} = ", func.dest_name(*dest))?;
                }
                write!(f, "call {} ", signature.return_type)?;
                if signature.variadic {
                    write!(f, "{} ", signature.param_list())?;
                }
                let args: Vec<String> = args.iter().map(|arg| func.typed(arg)).collect();
                write!(f, "@{callee}({})", args.join(", "))
            }
            Instruction::Branch { target } => write!(f, "br {}", func.label(*target)),
            Instruction::CondBranch {
                condition,
                then_block,
                else_block,
            } => write!(
                f,
                "br {}, {}, {}",
                func.typed(condition),
                func.label(*then_block),
                func.label(*else_block)
            ),
            Instruction::Return { value } => write!(f, "ret {}", func.typed(value)),
        }
    }
}

/// Formats a double the way LLVM does: exponent notation when six
/// fractional digits represent it exactly, otherwise its raw bit pattern.
#[must_use]
pub fn format_double(value: f64) -> String {
    if value.is_finite() {
        let text = format!("{value:.6e}");
        if let Some((mantissa, exponent)) = text.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                let formatted = format!("{mantissa}e{sign}{:02}", exponent.abs());
                if formatted.parse::<f64>().is_ok_and(|parsed| parsed == value) {
                    return formatted;
                }
            }
        }
    }
    format!("0x{:016X}", value.to_bits())
}
