//! Mx* Compiler - Frontend
//!
//! This crate lowers a resolved, type-annotated Mx* program into a
//! control-flow-graph IR ready for register allocation:
//! - `typed_ast`: the resolver's output, consumed read-only
//! - `ir`: blocks, functions and the module container
//! - `codegen`: the typed AST to IR translation

pub mod types;
pub mod typed_ast;
pub mod ir;
pub mod codegen;

pub use types::{Type, REG_SIZE};
pub use typed_ast::{TypedProgram, TypedTopLevelItem};
pub use codegen::{CodegenError, CodegenOptions, FaultKind, IrGenerator};

use mxc_common::CompilerError;
use crate::ir::Module;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Decode a typed program from its JSON form
    pub fn load_program(json: &str) -> Result<TypedProgram, CompilerError> {
        serde_json::from_str(json).map_err(|e| CompilerError::input_error(format!("malformed typed program: {e}")))
    }

    /// Lower a typed program to IR with default options
    pub fn compile_to_ir(program: &TypedProgram, module_name: &str) -> Result<Module, CompilerError> {
        Self::compile_to_ir_with_options(program, module_name, CodegenOptions::default())
    }

    pub fn compile_to_ir_with_options(
        program: &TypedProgram,
        module_name: &str,
        options: CodegenOptions,
    ) -> Result<Module, CompilerError> {
        let generator = IrGenerator::with_options(module_name.to_string(), options);
        Ok(generator.generate(program)?)
    }
}
