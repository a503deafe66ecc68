//! Basic Block Management
//!
//! A basic block is a run of straight-line instructions closed by exactly
//! one terminator. The terminator is held apart from the body so the
//! "nothing after a terminator" rule is structural.

use mxc_common::{LabelId, LoopId};
use serde::{Deserialize, Serialize};
use crate::ir::{Instruction, Quad};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: LabelId,
    /// Debug label
    pub label: String,
    pub instructions: Vec<Quad>,
    pub terminator: Option<Quad>,
    pub predecessors: Vec<LabelId>,
    /// Set on the blocks of a `for` statement
    #[serde(default)]
    pub for_loop: Option<LoopId>,
}

impl BasicBlock {
    pub fn new(id: LabelId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            instructions: Vec::new(),
            terminator: None,
            predecessors: Vec::new(),
            for_loop: None,
        }
    }

    /// Appends a non-terminator instruction.
    ///
    /// # Panics
    /// If the block is already terminated or `instr` is itself a terminator.
    pub fn add_instruction(&mut self, instr: Instruction) {
        assert!(
            !instr.is_terminator(),
            "terminator added as a plain instruction to block {} ({})",
            self.id,
            self.label
        );
        assert!(
            self.terminator.is_none(),
            "instruction added after the terminator of block {} ({})",
            self.id,
            self.label
        );
        self.instructions.push(Quad::new(self.id, instr));
    }

    /// Closes the block.
    ///
    /// # Panics
    /// If the block already has a terminator or `instr` is not one.
    pub fn set_terminator(&mut self, instr: Instruction) {
        assert!(instr.is_terminator(), "non-terminator used to close block {} ({})", self.id, self.label);
        assert!(
            self.terminator.is_none(),
            "second terminator set on block {} ({})",
            self.id,
            self.label
        );
        self.terminator = Some(Quad::new(self.id, instr));
    }

    /// Removes and returns the terminator, reopening the block
    pub fn take_terminator(&mut self) -> Option<Quad> {
        self.terminator.take()
    }

    pub fn has_terminator(&self) -> bool {
        self.terminator.is_some()
    }

    pub fn successors(&self) -> Vec<LabelId> {
        self.terminator
            .as_ref()
            .map(|quad| quad.instruction.successors())
            .unwrap_or_default()
    }

    /// Body instructions followed by the terminator
    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        self.instructions.iter().chain(self.terminator.iter())
    }

    pub fn returns(&self) -> bool {
        matches!(
            self.terminator.as_ref().map(|quad| &quad.instruction),
            Some(Instruction::Return(_))
        )
    }
}
