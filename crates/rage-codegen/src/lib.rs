//! Code generation for the Rage language.
//!
//! This crate lowers a parsed [`Program`] into a basic-block [`IrModule`].
//! Every variable lives in a `double` stack slot, whatever its declared
//! type name; functions return `i32`.

mod generator;

pub use generator::{
    Binding, CodeGenerator, CodegenOptions, PendingReturn, SymbolTable,
};

use rage_core::Result;
use rage_ir::IrModule;
use rage_parser::Program;

/// Generates an IR module from a Rage program AST with default options.
///
/// # Arguments
/// * `program` - The parsed Rage program
///
/// # Returns
/// The generated and verified IR module
///
/// # Errors
/// Returns an error if a variable is used before it is declared, if
/// control flow cannot be closed, or if verification fails.
///
/// # Examples
/// ```
/// use rage_lexer::tokenize;
/// use rage_parser::parse;
/// use rage_codegen::generate;
///
/// let source = "int32 main() {\n    return 1 + 2\n}\n";
/// let program = parse(tokenize(source).unwrap()).unwrap();
/// let module = generate(&program).unwrap();
/// assert!(module.to_string().contains("define i32 @main()"));
/// ```
pub fn generate(program: &Program) -> Result<IrModule> {
    generate_with_options(program, CodegenOptions::default())
}

/// Generates an IR module using explicit [`CodegenOptions`].
///
/// # Errors
/// See [`generate`].
pub fn generate_with_options(program: &Program, options: CodegenOptions) -> Result<IrModule> {
    let module = CodeGenerator::new(options).generate(program)?;
    tracing::debug!(
        module = %module.name,
        functions = module.functions.len(),
        "generated module"
    );
    Ok(module)
}
