//! Control-flow-graph IR for Mx*
//!
//! Non-SSA three-address code over unbounded virtual registers.
//!
//! ## Architecture
//!
//! - `values` - operands, destinations, string and global storage
//! - `ops` - binary, comparison and unary operators with constant evaluation
//! - `instructions` - the instruction set and its block placement (`Quad`)
//! - `blocks` - basic blocks
//! - `function` - functions, their block and register arenas
//! - `builtins` - runtime library catalogue
//! - `module` - the whole-program container
//! - `builder` - instruction emission into a function under construction

pub use self::values::{Register, StaticData, StaticString, Value, VirtualRegister};
pub use self::ops::{IrBinaryOp, IrCompareOp, IrUnaryOp};
pub use self::instructions::{Instruction, Quad};
pub use self::blocks::BasicBlock;
pub use self::function::{Function, FunctionKind};
pub use self::builtins::Builtin;
pub use self::module::{LoopRecord, Module};
pub use self::builder::IrBuilder;

mod values;
mod ops;
mod instructions;
mod blocks;
mod function;
mod builtins;
mod module;
mod builder;
