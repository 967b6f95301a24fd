//! Variable bindings shared by every function in a compilation unit.

use std::collections::HashMap;

use rage_ir::Value;

/// Storage slot bound to a variable name.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Function whose frame holds the slot
    pub function: String,
    /// Address of the slot (`alloca` result)
    pub slot: Value,
}

/// One flat namespace for the whole compilation unit.
///
/// There is no block scoping: a name declared inside an `if` body stays
/// visible after it, and in every function generated later. Declaring a
/// name again replaces its binding.
#[derive(Debug, Default)]
pub struct SymbolTable {
    bindings: HashMap<String, Binding>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, returning the binding it replaced.
    pub fn bind(&mut self, name: &str, function: &str, slot: Value) -> Option<Binding> {
        self.bindings.insert(
            name.to_string(),
            Binding {
                function: function.to_string(),
                slot,
            },
        )
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rage_ir::{IrType, RegisterId};

    fn slot(id: u32) -> Value {
        Value::Register {
            id: RegisterId(id),
            ty: IrType::Ptr,
        }
    }

    #[test]
    fn test_rebinding_replaces() {
        let mut symbols = SymbolTable::new();
        assert!(symbols.bind("x", "main", slot(0)).is_none());

        let previous = symbols.bind("x", "main", slot(3)).unwrap();
        assert_eq!(previous.slot, slot(0));
        assert_eq!(symbols.lookup("x").unwrap().slot, slot(3));
        assert_eq!(symbols.len(), 1);
    }

    #[test]
    fn test_lookup_missing() {
        let symbols = SymbolTable::new();
        assert!(symbols.is_empty());
        assert!(symbols.lookup("y").is_none());
    }
}
