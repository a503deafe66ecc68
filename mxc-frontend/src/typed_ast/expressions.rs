//! Typed expressions

use mxc_common::{LocalId, SourceLocation};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::types::Type;

/// Binary operators as they appear in source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    LeftShift,
    RightShift,
    BitAnd,
    BitOr,
    BitXor,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    LogicalAnd,
    LogicalOr,
}

impl BinaryOp {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Less
                | BinaryOp::LessEqual
                | BinaryOp::Greater
                | BinaryOp::GreaterEqual
                | BinaryOp::Equal
                | BinaryOp::NotEqual
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::LogicalAnd | BinaryOp::LogicalOr)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Plus,
    Neg,
    BitNot,
    LogicalNot,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

/// Language intrinsics. Free-standing ones take only their arguments,
/// member ones (`length`, `substring`, `parseInt`, `ord`, `size`) also take
/// the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intrinsic {
    Print,
    Println,
    GetString,
    GetInt,
    ToString,
    Length,
    Substring,
    ParseInt,
    Ord,
    Size,
}

/// Where a resolved identifier lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Storage {
    /// Local variable or parameter, held in a virtual register
    Local(LocalId),
    /// Global variable, held in a static data slot of the same name
    Global,
    /// Field of the enclosing class accessed without an explicit `this`
    Member { offset: i64 },
}

/// What a call expression invokes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallTarget {
    Function { name: String },
    /// `receiver` is `None` for a method called on the implicit `this`
    Method {
        class: String,
        name: String,
        receiver: Option<Box<TypedExpr>>,
    },
    Intrinsic {
        intrinsic: Intrinsic,
        receiver: Option<Box<TypedExpr>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedExprKind {
    IntLiteral(i64),
    BoolLiteral(bool),
    StringLiteral(String),
    NullLiteral,
    Identifier {
        name: String,
        storage: Storage,
    },
    This,
    Binary {
        op: BinaryOp,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<TypedExpr>,
    },
    Assign {
        lhs: Box<TypedExpr>,
        rhs: Box<TypedExpr>,
    },
    Index {
        array: Box<TypedExpr>,
        index: Box<TypedExpr>,
    },
    Member {
        object: Box<TypedExpr>,
        field: String,
        offset: i64,
    },
    Call {
        target: CallTarget,
        arguments: Vec<TypedExpr>,
    },
    NewClass {
        class: String,
    },
    /// `new T[d0][d1][]...`: `dimensions` holds the sized dimensions only
    NewArray {
        dimensions: Vec<TypedExpr>,
        total_dimensions: usize,
    },
}

/// Typed expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedExpr {
    pub kind: TypedExprKind,
    pub expr_type: Type,
    #[serde(default)]
    pub location: SourceLocation,
}

impl TypedExpr {
    pub fn new(kind: TypedExprKind, expr_type: Type, location: SourceLocation) -> Self {
        Self { kind, expr_type, location }
    }

    /// Get the type of this expression
    pub fn get_type(&self) -> &Type {
        &self.expr_type
    }

    pub fn is_bool(&self) -> bool {
        self.expr_type.is_bool()
    }

    /// Whether reading or writing this expression goes through memory
    /// rather than a register: indexing, field access and implicit
    /// `this` members.
    pub fn is_memory_access(&self) -> bool {
        match &self.kind {
            TypedExprKind::Index { .. } | TypedExprKind::Member { .. } => true,
            TypedExprKind::Identifier { storage, .. } => matches!(storage, Storage::Member { .. }),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed_ast::builders::*;

    #[test]
    fn test_memory_access_classification() {
        assert!(member_field("x", 8, Type::Int).is_memory_access());
        assert!(!local("x", 0, Type::Int).is_memory_access());
        assert!(!global("g", Type::Int).is_memory_access());
        let arr = local("a", 0, Type::array_of(Type::Int, 1));
        assert!(index(arr, int(1)).is_memory_access());
    }

    #[test]
    fn test_binary_op_classes() {
        assert!(BinaryOp::Less.is_comparison());
        assert!(!BinaryOp::Add.is_comparison());
        assert!(BinaryOp::LogicalOr.is_logical());
        assert_eq!(format!("{}", BinaryOp::LeftShift), "<<");
    }
}
