//! Reference interpreter for IR modules.
//!
//! Executes a function directly on the IR, with `scanf` and `printf`
//! supplied by the interpreter itself (only the `%lf` conversion is
//! understood). This is what `rage run` and the evaluation tests use.

use std::io::{BufRead, Write};

use rage_core::{Error, Result};

use crate::{BlockId, Instruction, IrFunction, IrModule, RegisterId, Value};

const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// A runtime value held in a register or stack slot.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Float(f64),
    Int(i64),
    Bool(bool),
    Stack(usize),
    Global(String),
}

/// Executes IR functions against a reader and a writer.
pub struct Interpreter<'m, R, W> {
    module: &'m IrModule,
    input: R,
    output: W,
    memory: Vec<Option<Slot>>,
    steps: usize,
    step_limit: usize,
}

impl<'m, R: BufRead, W: Write> Interpreter<'m, R, W> {
    #[must_use]
    pub fn new(module: &'m IrModule, input: R, output: W) -> Self {
        Self {
            module,
            input,
            output,
            memory: Vec::new(),
            steps: 0,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    /// Caps the number of executed instructions.
    #[must_use]
    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Runs `function` in `module` and returns its integer result.
    ///
    /// # Errors
    /// Returns [`Error::Runtime`] if the function does not exist or
    /// execution hits an invalid state.
    pub fn run(module: &'m IrModule, function: &str, input: R, output: W) -> Result<i64> {
        Self::new(module, input, output).call(function)
    }

    /// Executes a defined function by name.
    ///
    /// # Errors
    /// See [`Interpreter::run`].
    pub fn call(&mut self, name: &str) -> Result<i64> {
        let module = self.module;
        let function = module
            .get_function(name)
            .ok_or_else(|| Error::Runtime(format!("No function named '{name}'")))?;

        let value = self.execute(function)?;
        self.output.flush()?;
        tracing::debug!(function = name, result = value, "interpreter finished");
        Ok(value)
    }

    fn execute(&mut self, function: &'m IrFunction) -> Result<i64> {
        let mut registers: Vec<Option<Slot>> = vec![None; function.registers.len()];
        let mut current = function
            .entry()
            .ok_or_else(|| Error::Runtime(format!("Function '{}' has no body", function.name)))?;

        loop {
            let block = function.block(current).ok_or_else(|| {
                Error::Runtime(format!("Unknown block id {} in '{}'", current.0, function.name))
            })?;

            let mut next: Option<BlockId> = None;
            for inst in &block.instructions {
                self.steps += 1;
                if self.steps > self.step_limit {
                    return Err(Error::Runtime(format!(
                        "Step limit of {} instructions exceeded",
                        self.step_limit
                    )));
                }

                match inst {
                    Instruction::Alloca { dest, .. } => {
                        self.memory.push(None);
                        set(&mut registers, *dest, Slot::Stack(self.memory.len() - 1));
                    }
                    Instruction::Load { dest, pointer, .. } => {
                        let address = self.address(&registers, pointer)?;
                        let value = self.memory[address].clone().ok_or_else(|| {
                            Error::Runtime("Load from uninitialised stack slot".to_string())
                        })?;
                        set(&mut registers, *dest, value);
                    }
                    Instruction::Store { value, pointer } => {
                        let address = self.address(&registers, pointer)?;
                        let value = eval(&registers, value)?;
                        self.memory[address] = Some(value);
                    }
                    Instruction::FloatBinary {
                        dest,
                        op,
                        left,
                        right,
                    } => {
                        let result = op.apply(float(&registers, left)?, float(&registers, right)?);
                        set(&mut registers, *dest, Slot::Float(result));
                    }
                    Instruction::FloatCompare {
                        dest,
                        predicate,
                        left,
                        right,
                    } => {
                        let result =
                            predicate.evaluate(float(&registers, left)?, float(&registers, right)?);
                        set(&mut registers, *dest, Slot::Bool(result));
                    }
                    Instruction::FloatToSigned { dest, value, .. } => {
                        // Saturates where LLVM would produce poison.
                        let result = float(&registers, value)?.trunc() as i32;
                        set(&mut registers, *dest, Slot::Int(i64::from(result)));
                    }
                    Instruction::Call {
                        dest, callee, args, ..
                    } => {
                        let args = args
                            .iter()
                            .map(|arg| eval(&registers, arg))
                            .collect::<Result<Vec<_>>>()?;
                        let result = self.call_named(callee, &args)?;
                        if let Some(dest) = dest {
                            set(&mut registers, *dest, Slot::Int(result));
                        }
                    }
                    Instruction::Branch { target } => next = Some(*target),
                    Instruction::CondBranch {
                        condition,
                        then_block,
                        else_block,
                    } => {
                        let taken = match eval(&registers, condition)? {
                            Slot::Bool(flag) => flag,
                            other => {
                                return Err(Error::Runtime(format!(
                                    "Branch condition is not a boolean: {other:?}"
                                )));
                            }
                        };
                        next = Some(if taken { *then_block } else { *else_block });
                    }
                    Instruction::Return { value } => {
                        return match eval(&registers, value)? {
                            Slot::Int(result) => Ok(result),
                            other => Err(Error::Runtime(format!(
                                "Function '{}' returned a non-integer value: {other:?}",
                                function.name
                            ))),
                        };
                    }
                }

                if next.is_some() {
                    break;
                }
            }

            current = next.ok_or_else(|| {
                Error::Runtime(format!(
                    "Block '{}' in '{}' fell through without a terminator",
                    block.name, function.name
                ))
            })?;
        }
    }

    fn call_named(&mut self, callee: &str, args: &[Slot]) -> Result<i64> {
        match callee {
            "scanf" => self.scanf(args),
            "printf" => self.printf(args),
            _ => Err(Error::Runtime(format!(
                "Call to unsupported external function '{callee}'"
            ))),
        }
    }

    fn scanf(&mut self, args: &[Slot]) -> Result<i64> {
        let format = self.format_string(args)?;
        let mut assigned = 0;
        for index in 0..count_directives(&format)? {
            let Some(Slot::Stack(address)) = args.get(index + 1) else {
                return Err(Error::Runtime(
                    "scanf '%lf' expects a stack slot argument".to_string(),
                ));
            };
            let Some(word) = self.read_word()? else {
                return Ok(if assigned == 0 { -1 } else { assigned });
            };
            match word.parse::<f64>() {
                Ok(value) => {
                    self.memory[*address] = Some(Slot::Float(value));
                    assigned += 1;
                }
                Err(_) => break,
            }
        }
        Ok(assigned)
    }

    fn printf(&mut self, args: &[Slot]) -> Result<i64> {
        let format = self.format_string(args)?;
        let mut text = String::new();
        let mut values = args.iter().skip(1);
        let mut rest = format.as_str();

        while let Some(position) = rest.find('%') {
            text.push_str(&rest[..position]);
            let after = &rest[position + 1..];
            if let Some(tail) = after.strip_prefix('%') {
                text.push('%');
                rest = tail;
            } else if let Some(tail) = after.strip_prefix("lf") {
                match values.next() {
                    Some(Slot::Float(value)) => text.push_str(&format!("{value:.6}")),
                    _ => {
                        return Err(Error::Runtime(
                            "printf '%lf' expects a double argument".to_string(),
                        ));
                    }
                }
                rest = tail;
            } else {
                return Err(Error::Runtime(format!(
                    "Unsupported format directive in \"{format}\""
                )));
            }
        }
        text.push_str(rest);

        self.output.write_all(text.as_bytes())?;
        Ok(text.len() as i64)
    }

    fn format_string(&self, args: &[Slot]) -> Result<String> {
        match args.first() {
            Some(Slot::Global(name)) => self
                .module
                .get_global(name)
                .map(|g| g.text())
                .ok_or_else(|| Error::Runtime(format!("Unknown global '@{name}'"))),
            _ => Err(Error::Runtime(
                "Format argument must be a global string".to_string(),
            )),
        }
    }

    /// Reads the next whitespace-delimited word, or `None` at end of input.
    fn read_word(&mut self) -> Result<Option<String>> {
        let mut word = Vec::new();
        loop {
            let buffer = self.input.fill_buf()?;
            if buffer.is_empty() {
                break;
            }
            let mut consumed = 0;
            let mut done = false;
            for &byte in buffer {
                if byte.is_ascii_whitespace() {
                    if !word.is_empty() {
                        done = true;
                        break;
                    }
                } else {
                    word.push(byte);
                }
                consumed += 1;
            }
            self.input.consume(consumed);
            if done {
                break;
            }
        }

        if word.is_empty() {
            Ok(None)
        } else {
            Ok(Some(String::from_utf8_lossy(&word).into_owned()))
        }
    }

    fn address(&self, registers: &[Option<Slot>], pointer: &Value) -> Result<usize> {
        match eval(registers, pointer)? {
            Slot::Stack(address) if address < self.memory.len() => Ok(address),
            other => Err(Error::Runtime(format!(
                "Memory access through an invalid pointer: {other:?}"
            ))),
        }
    }
}

/// Counts the `%lf` conversions in a `scanf` format.
fn count_directives(format: &str) -> Result<usize> {
    let mut found = 0;
    let mut rest = format;
    while let Some(position) = rest.find('%') {
        let after = &rest[position + 1..];
        if let Some(tail) = after.strip_prefix("lf") {
            found += 1;
            rest = tail;
        } else {
            return Err(Error::Runtime(format!(
                "Unsupported format directive in \"{format}\""
            )));
        }
    }
    Ok(found)
}

fn set(registers: &mut [Option<Slot>], dest: RegisterId, value: Slot) {
    if let Some(register) = registers.get_mut(dest.0 as usize) {
        *register = Some(value);
    }
}

fn eval(registers: &[Option<Slot>], value: &Value) -> Result<Slot> {
    match value {
        Value::Register { id, .. } => registers
            .get(id.0 as usize)
            .cloned()
            .flatten()
            .ok_or_else(|| Error::Runtime(format!("Read of undefined register #{}", id.0))),
        Value::Float(v) => Ok(Slot::Float(*v)),
        Value::Int { value, .. } => Ok(Slot::Int(*value)),
        Value::Global(name) => Ok(Slot::Global(name.clone())),
    }
}

fn float(registers: &[Option<Slot>], value: &Value) -> Result<f64> {
    match eval(registers, value)? {
        Slot::Float(v) => Ok(v),
        other => Err(Error::Runtime(format!("Expected a double, found {other:?}"))),
    }
}
