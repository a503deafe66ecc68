//! Typed statements

use mxc_common::{LocalId, LoopId, SourceLocation};
use serde::{Deserialize, Serialize};
use crate::types::Type;
use super::TypedExpr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedStmtKind {
    Expression(TypedExpr),
    VarDecl {
        name: String,
        id: LocalId,
        var_type: Type,
        initializer: Option<TypedExpr>,
    },
    Block(Vec<TypedStmt>),
    If {
        condition: TypedExpr,
        then_stmt: Box<TypedStmt>,
        else_stmt: Option<Box<TypedStmt>>,
    },
    While {
        condition: TypedExpr,
        body: Box<TypedStmt>,
    },
    For {
        /// Identity used to key the loop's block record
        id: LoopId,
        init: Option<Box<TypedStmt>>,
        condition: Option<TypedExpr>,
        update: Option<TypedExpr>,
        body: Box<TypedStmt>,
    },
    Return(Option<TypedExpr>),
    Break,
    Continue,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedStmt {
    pub kind: TypedStmtKind,
    #[serde(default)]
    pub location: SourceLocation,
}

impl TypedStmt {
    pub fn new(kind: TypedStmtKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}
