//! IR Instructions
//!
//! Three-address instructions ("quads"). The last three variants are block
//! terminators; every other instruction falls through to the next one.

use mxc_common::{FunctionId, LabelId, TempId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use crate::ir::{IrBinaryOp, IrCompareOp, IrUnaryOp, Register, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    Move {
        dst: Register,
        src: Value,
    },

    Unary {
        dst: Register,
        op: IrUnaryOp,
        src: Value,
    },

    Binary {
        dst: Register,
        op: IrBinaryOp,
        lhs: Value,
        rhs: Value,
    },

    Compare {
        dst: Register,
        op: IrCompareOp,
        lhs: Value,
        rhs: Value,
    },

    /// `dst = *(base + offset)`
    Load {
        dst: Register,
        size: i64,
        base: Value,
        offset: i64,
    },

    /// `*(base + offset) = value`
    Store {
        value: Value,
        size: i64,
        base: Value,
        offset: i64,
    },

    Call {
        callee: FunctionId,
        args: Vec<Value>,
        dst: Option<Register>,
    },

    HeapAlloc {
        dst: Register,
        size: Value,
    },

    Jump(LabelId),

    CondJump {
        cond: Value,
        then_block: LabelId,
        else_block: LabelId,
    },

    Return(Option<Value>),
}

impl Instruction {
    pub fn is_terminator(&self) -> bool {
        matches!(self, Instruction::Jump(_) | Instruction::CondJump { .. } | Instruction::Return(_))
    }

    /// Register written by this instruction, if any
    pub fn defined_register(&self) -> Option<Register> {
        match self {
            Instruction::Move { dst, .. }
            | Instruction::Unary { dst, .. }
            | Instruction::Binary { dst, .. }
            | Instruction::Compare { dst, .. }
            | Instruction::Load { dst, .. }
            | Instruction::HeapAlloc { dst, .. } => Some(*dst),
            Instruction::Call { dst, .. } => *dst,
            Instruction::Store { .. }
            | Instruction::Jump(_)
            | Instruction::CondJump { .. }
            | Instruction::Return(_) => None,
        }
    }

    /// Values read by this instruction, in operand order
    pub fn used_values(&self) -> Vec<Value> {
        match self {
            Instruction::Move { src, .. } | Instruction::Unary { src, .. } => vec![*src],
            Instruction::Binary { lhs, rhs, .. } | Instruction::Compare { lhs, rhs, .. } => vec![*lhs, *rhs],
            Instruction::Load { base, .. } => vec![*base],
            Instruction::Store { value, base, .. } => vec![*value, *base],
            Instruction::Call { args, .. } => args.clone(),
            Instruction::HeapAlloc { size, .. } => vec![*size],
            Instruction::Jump(_) => Vec::new(),
            Instruction::CondJump { cond, .. } => vec![*cond],
            Instruction::Return(value) => value.iter().copied().collect(),
        }
    }

    /// Blocks control may transfer to after this instruction
    pub fn successors(&self) -> Vec<LabelId> {
        match self {
            Instruction::Jump(target) => vec![*target],
            Instruction::CondJump { then_block, else_block, .. } => {
                if then_block == else_block {
                    vec![*then_block]
                } else {
                    vec![*then_block, *else_block]
                }
            }
            _ => Vec::new(),
        }
    }
}

/// An instruction placed in a block. The liveness sets are filled by
/// register allocation; lowering leaves them empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub parent: LabelId,
    pub instruction: Instruction,
    pub live_in: BTreeSet<TempId>,
    pub live_out: BTreeSet<TempId>,
}

impl Quad {
    pub fn new(parent: LabelId, instruction: Instruction) -> Self {
        Self {
            parent,
            instruction,
            live_in: BTreeSet::new(),
            live_out: BTreeSet::new(),
        }
    }

    pub fn is_terminator(&self) -> bool {
        self.instruction.is_terminator()
    }
}
