//! IR Operations
//!
//! Defines binary, comparison and unary operations available in the IR,
//! together with their compile-time evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary arithmetic and bitwise operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrBinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    And,
    Or,
    Xor,
}

impl IrBinaryOp {
    /// Operands may be swapped without changing the result
    pub fn is_commutative(&self) -> bool {
        matches!(
            self,
            IrBinaryOp::Add | IrBinaryOp::Mul | IrBinaryOp::And | IrBinaryOp::Or | IrBinaryOp::Xor
        )
    }

    /// Needs dedicated hardware registers when emitted
    pub fn is_div_or_shift(&self) -> bool {
        matches!(self, IrBinaryOp::Div | IrBinaryOp::Mod | IrBinaryOp::Shl | IrBinaryOp::Shr)
    }

    /// Evaluates the operation with two's-complement 64-bit semantics.
    /// Returns `None` for division or modulo by zero.
    pub fn fold(&self, lhs: i64, rhs: i64) -> Option<i64> {
        let result = match self {
            IrBinaryOp::Add => lhs.wrapping_add(rhs),
            IrBinaryOp::Sub => lhs.wrapping_sub(rhs),
            IrBinaryOp::Mul => lhs.wrapping_mul(rhs),
            IrBinaryOp::Div => {
                if rhs == 0 {
                    return None;
                }
                lhs.wrapping_div(rhs)
            }
            IrBinaryOp::Mod => {
                if rhs == 0 {
                    return None;
                }
                lhs.wrapping_rem(rhs)
            }
            // shift amounts are taken modulo 64
            IrBinaryOp::Shl => lhs.wrapping_shl(rhs as u32),
            IrBinaryOp::Shr => lhs.wrapping_shr(rhs as u32),
            IrBinaryOp::And => lhs & rhs,
            IrBinaryOp::Or => lhs | rhs,
            IrBinaryOp::Xor => lhs ^ rhs,
        };
        Some(result)
    }
}

impl fmt::Display for IrBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            IrBinaryOp::Add => "add",
            IrBinaryOp::Sub => "sub",
            IrBinaryOp::Mul => "mul",
            IrBinaryOp::Div => "div",
            IrBinaryOp::Mod => "mod",
            IrBinaryOp::Shl => "shl",
            IrBinaryOp::Shr => "shr",
            IrBinaryOp::And => "and",
            IrBinaryOp::Or => "or",
            IrBinaryOp::Xor => "xor",
        };
        write!(f, "{op_str}")
    }
}

/// Comparison predicates; a `Compare` yields 1 or 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrCompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl IrCompareOp {
    /// Predicate that gives the same answer with the operands exchanged
    pub fn swapped(&self) -> Self {
        match self {
            IrCompareOp::Lt => IrCompareOp::Gt,
            IrCompareOp::Gt => IrCompareOp::Lt,
            IrCompareOp::Le => IrCompareOp::Ge,
            IrCompareOp::Ge => IrCompareOp::Le,
            IrCompareOp::Eq => IrCompareOp::Eq,
            IrCompareOp::Ne => IrCompareOp::Ne,
        }
    }

    pub fn evaluate<T: PartialOrd>(&self, lhs: T, rhs: T) -> bool {
        match self {
            IrCompareOp::Lt => lhs < rhs,
            IrCompareOp::Le => lhs <= rhs,
            IrCompareOp::Gt => lhs > rhs,
            IrCompareOp::Ge => lhs >= rhs,
            IrCompareOp::Eq => lhs == rhs,
            IrCompareOp::Ne => lhs != rhs,
        }
    }

    pub fn fold(&self, lhs: i64, rhs: i64) -> i64 {
        i64::from(self.evaluate(lhs, rhs))
    }
}

impl fmt::Display for IrCompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            IrCompareOp::Lt => "lt",
            IrCompareOp::Le => "le",
            IrCompareOp::Gt => "gt",
            IrCompareOp::Ge => "ge",
            IrCompareOp::Eq => "eq",
            IrCompareOp::Ne => "ne",
        };
        write!(f, "{op_str}")
    }
}

/// Unary operations in IR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrUnaryOp {
    Neg,
    BitNot,
}

impl IrUnaryOp {
    pub fn fold(&self, operand: i64) -> i64 {
        match self {
            IrUnaryOp::Neg => operand.wrapping_neg(),
            IrUnaryOp::BitNot => !operand,
        }
    }
}

impl fmt::Display for IrUnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            IrUnaryOp::Neg => "neg",
            IrUnaryOp::BitNot => "not",
        };
        write!(f, "{op_str}")
    }
}
