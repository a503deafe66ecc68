//! Typed AST to IR lowering
//!
//! `IrGenerator` drives the whole program. Per function, lowering state
//! lives in a `FunctionContext` that the statement and expression
//! generators borrow; nothing is kept in globals.

mod codegen;
mod errors;
mod options;
pub mod expressions;
pub mod statements;

pub use codegen::{method_symbol, IrGenerator, GLOBAL_INIT_FUNCTION};
pub use errors::{CodegenError, FaultKind};
pub use options::CodegenOptions;

use mxc_common::{FunctionId, LabelId, LocalId, TempId};
use std::collections::HashMap;
use crate::ir::IrBuilder;
use crate::types::Type;

/// Jump targets of the innermost enclosing loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTargets {
    /// Target of `continue`: the update block, or the condition
    pub step: LabelId,
    /// Target of `break`
    pub after: LabelId,
}

/// Mutable state for lowering one function body
pub struct FunctionContext {
    pub builder: IrBuilder,
    pub locals: HashMap<LocalId, TempId>,
    /// Receiver register of a method
    pub this_register: Option<TempId>,
    pub return_type: Type,
    pub loop_stack: Vec<LoopTargets>,
}

impl FunctionContext {
    pub fn new(builder: IrBuilder, return_type: Type) -> Self {
        Self {
            builder,
            locals: HashMap::new(),
            this_register: None,
            return_type,
            loop_stack: Vec::new(),
        }
    }

    pub fn innermost_loop(&self) -> Option<LoopTargets> {
        self.loop_stack.last().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassInfo {
    /// Instance size in bytes
    pub size: i64,
    pub constructor: Option<FunctionId>,
}

/// Read-only facts shared by every function body
#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub classes: HashMap<String, ClassInfo>,
    pub options: CodegenOptions,
    pub init_function: FunctionId,
}
