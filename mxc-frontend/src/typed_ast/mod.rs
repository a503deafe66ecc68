//! Typed AST representation
//!
//! This is the output of semantic resolution: every expression carries its
//! static type, every identifier its resolved storage, and every class its
//! instance size and field offsets. IR generation consumes it read-only.

mod expressions;
mod statements;
mod program;
pub mod builders;

pub use expressions::{BinaryOp, CallTarget, Intrinsic, Storage, TypedExpr, TypedExprKind, UnaryOp};
pub use statements::{TypedStmt, TypedStmtKind};
pub use program::{TypedClass, TypedFunction, TypedGlobal, TypedParameter, TypedProgram, TypedTopLevelItem};
