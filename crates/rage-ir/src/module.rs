//! IR module structure: globals, external declarations and functions.

use rage_core::{Error, Result};

use crate::{BlockId, Instruction, IrType, RegisterId, Signature, Value};

/// A complete IR module, the unit handed to the printer and interpreter.
#[derive(Debug, Clone)]
pub struct IrModule {
    /// Module identifier printed in the header
    pub name: String,
    /// Interned string constants
    pub globals: Vec<GlobalString>,
    /// Declared external functions
    pub externals: Vec<ExternalFunction>,
    /// Defined functions, in definition order
    pub functions: Vec<IrFunction>,
}

/// A private, NUL-terminated byte string constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalString {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl GlobalString {
    /// Returns the text without its trailing NUL.
    #[must_use]
    pub fn text(&self) -> String {
        let bytes = self.bytes.strip_suffix(&[0]).unwrap_or(&self.bytes);
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// A function declared but not defined in the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalFunction {
    pub name: String,
    pub signature: Signature,
}

impl IrModule {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            globals: Vec::new(),
            externals: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Interns `text` as a global string and returns its address.
    ///
    /// Identical strings share one global.
    pub fn intern_string(&mut self, text: &str) -> Value {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);

        if let Some(existing) = self.globals.iter().find(|g| g.bytes == bytes) {
            return Value::Global(existing.name.clone());
        }

        let name = format!("fmt.{}", self.globals.len());
        self.globals.push(GlobalString {
            name: name.clone(),
            bytes,
        });
        Value::Global(name)
    }

    /// Declares an external function once.
    ///
    /// # Errors
    /// Returns an error if `name` is already declared with a different
    /// signature or is defined in this module.
    pub fn declare_external(&mut self, name: &str, signature: Signature) -> Result<()> {
        if self.get_function(name).is_some() {
            return Err(Error::Codegen(format!(
                "'{name}' is defined in this module and cannot be declared external"
            )));
        }

        match self.get_external(name) {
            Some(existing) if existing.signature == signature => Ok(()),
            Some(_) => Err(Error::Codegen(format!(
                "external function '{name}' redeclared with a different signature"
            ))),
            None => {
                self.externals.push(ExternalFunction {
                    name: name.to_string(),
                    signature,
                });
                Ok(())
            }
        }
    }

    /// Adds a finished function to the module.
    ///
    /// # Errors
    /// Returns an error if a function or external with the same name exists.
    pub fn add_function(&mut self, function: IrFunction) -> Result<()> {
        if self.get_function(&function.name).is_some() || self.get_external(&function.name).is_some()
        {
            return Err(Error::Codegen(format!(
                "Function '{}' is defined more than once",
                function.name
            )));
        }
        self.functions.push(function);
        Ok(())
    }

    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<&IrFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn get_external(&self, name: &str) -> Option<&ExternalFunction> {
        self.externals.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn get_global(&self, name: &str) -> Option<&GlobalString> {
        self.globals.iter().find(|g| g.name == name)
    }
}

/// Name and type of a virtual register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    pub name: String,
    pub ty: IrType,
}

/// A labelled straight-line instruction sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    pub id: BlockId,
    pub name: String,
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    #[must_use]
    pub fn terminator(&self) -> Option<&Instruction> {
        self.instructions.last().filter(|inst| inst.is_terminator())
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminator().is_some()
    }
}

/// A function definition taking no parameters.
///
/// `blocks` is indexed by [`BlockId`]; `layout` lists the blocks that are
/// part of the body in emission order, the first being the entry block.
#[derive(Debug, Clone, PartialEq)]
pub struct IrFunction {
    pub name: String,
    pub return_type: IrType,
    pub registers: Vec<Register>,
    pub blocks: Vec<BasicBlock>,
    pub layout: Vec<BlockId>,
}

impl IrFunction {
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: IrType) -> Self {
        Self {
            name: name.into(),
            return_type,
            registers: Vec::new(),
            blocks: Vec::new(),
            layout: Vec::new(),
        }
    }

    #[must_use]
    pub fn entry(&self) -> Option<BlockId> {
        self.layout.first().copied()
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.0 as usize)
    }

    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut BasicBlock> {
        self.blocks.get_mut(id.0 as usize)
    }

    #[must_use]
    pub fn register(&self, id: RegisterId) -> Option<&Register> {
        self.registers.get(id.0 as usize)
    }

    /// Iterates the attached blocks in layout order.
    pub fn ordered_blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.layout.iter().filter_map(|id| self.block(*id))
    }

    /// Total number of instructions in attached blocks.
    #[must_use]
    pub fn instruction_count(&self) -> usize {
        self.ordered_blocks().map(|b| b.instructions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanf_signature() -> Signature {
        Signature::new(IrType::I32, vec![IrType::Ptr], true)
    }

    #[test]
    fn test_intern_string_dedupes() {
        let mut module = IrModule::new("test");
        let first = module.intern_string("%lf");
        let second = module.intern_string("%lf\n");
        let third = module.intern_string("%lf");

        assert_eq!(first, Value::Global("fmt.0".to_string()));
        assert_eq!(second, Value::Global("fmt.1".to_string()));
        assert_eq!(first, third);
        assert_eq!(module.globals.len(), 2);
        assert_eq!(module.globals[1].text(), "%lf\n");
        assert_eq!(module.globals[0].bytes, b"%lf\0".to_vec());
    }

    #[test]
    fn test_declare_external_once() {
        let mut module = IrModule::new("test");
        module.declare_external("scanf", scanf_signature()).unwrap();
        module.declare_external("scanf", scanf_signature()).unwrap();
        assert_eq!(module.externals.len(), 1);

        let conflicting = Signature::new(IrType::Void, vec![], false);
        assert!(module.declare_external("scanf", conflicting).is_err());
    }

    #[test]
    fn test_duplicate_function_is_rejected() {
        let mut module = IrModule::new("test");
        module.add_function(IrFunction::new("main", IrType::I32)).unwrap();

        let err = module
            .add_function(IrFunction::new("main", IrType::I32))
            .unwrap_err();
        assert!(err.to_string().contains("defined more than once"));
        assert!(module.get_function("main").is_some());
        assert!(module.get_function("other").is_none());
    }
}
