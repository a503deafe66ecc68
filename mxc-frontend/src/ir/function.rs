//! Function Definitions
//!
//! A function owns its blocks and registers in arenas indexed by
//! `LabelId` / `TempId`. Built-in runtime functions have no body, only a
//! linkage symbol.

use mxc_common::{index_of, next_id, FunctionId, LabelId, SourceLocation, TempId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use crate::ir::{BasicBlock, Instruction, VirtualRegister};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionKind {
    User,
    BuiltIn { symbol: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub id: FunctionId,
    pub name: String,
    pub kind: FunctionKind,
    pub has_return_value: bool,
    pub registers: Vec<VirtualRegister>,
    pub blocks: Vec<BasicBlock>,
    pub entry: Option<LabelId>,
    /// The single returning block, set once lowering finishes
    pub exit: Option<LabelId>,
    pub parameters: Vec<TempId>,
    /// Blocks closed by a `Return`, in emission order
    pub returns: Vec<LabelId>,
    pub callees: BTreeSet<FunctionId>,
    /// Transitive closure of `callees`
    pub recursive_callees: BTreeSet<FunctionId>,
    pub source_location: Option<SourceLocation>,
}

impl Function {
    pub fn new(id: FunctionId, name: String, has_return_value: bool) -> Self {
        Self {
            id,
            name,
            kind: FunctionKind::User,
            has_return_value,
            registers: Vec::new(),
            blocks: Vec::new(),
            entry: None,
            exit: None,
            parameters: Vec::new(),
            returns: Vec::new(),
            callees: BTreeSet::new(),
            recursive_callees: BTreeSet::new(),
            source_location: None,
        }
    }

    pub fn builtin(id: FunctionId, name: &str, symbol: &str, has_return_value: bool) -> Self {
        let mut function = Self::new(id, name.to_string(), has_return_value);
        function.kind = FunctionKind::BuiltIn { symbol: symbol.to_string() };
        function
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.kind, FunctionKind::BuiltIn { .. })
    }

    /// Symbol the function is emitted or linked under
    pub fn linkage_name(&self) -> &str {
        match &self.kind {
            FunctionKind::BuiltIn { symbol } => symbol,
            FunctionKind::User => &self.name,
        }
    }

    pub fn new_register(&mut self, name: Option<&str>) -> TempId {
        let id = next_id(self.registers.len());
        self.registers.push(VirtualRegister {
            id,
            name: name.map(str::to_string),
        });
        id
    }

    pub fn add_parameter(&mut self, name: &str) -> TempId {
        let id = self.new_register(Some(name));
        self.parameters.push(id);
        id
    }

    pub fn create_block(&mut self, label: &str) -> LabelId {
        let id = next_id(self.blocks.len());
        self.blocks.push(BasicBlock::new(id, label));
        id
    }

    /// # Panics
    /// If `id` was not created by this function.
    pub fn block(&self, id: LabelId) -> &BasicBlock {
        &self.blocks[index_of(id)]
    }

    /// # Panics
    /// If `id` was not created by this function.
    pub fn block_mut(&mut self, id: LabelId) -> &mut BasicBlock {
        &mut self.blocks[index_of(id)]
    }

    pub fn add_instruction(&mut self, block: LabelId, instr: Instruction) {
        self.block_mut(block).add_instruction(instr);
    }

    /// Closes `block` and records the resulting CFG edges
    pub fn set_terminator(&mut self, block: LabelId, instr: Instruction) {
        let successors = instr.successors();
        let is_return = matches!(instr, Instruction::Return(_));
        self.block_mut(block).set_terminator(instr);
        for succ in successors {
            self.block_mut(succ).predecessors.push(block);
        }
        if is_return {
            self.returns.push(block);
        }
    }

    /// Reopens `block`, dropping the edges its terminator created
    pub fn take_terminator(&mut self, block: LabelId) -> Option<Instruction> {
        let quad = self.block_mut(block).take_terminator()?;
        for succ in quad.instruction.successors() {
            let preds = &mut self.block_mut(succ).predecessors;
            if let Some(pos) = preds.iter().position(|&p| p == block) {
                preds.remove(pos);
            }
        }
        self.returns.retain(|&b| b != block);
        Some(quad.instruction)
    }

    /// Blocks reachable from the entry, in depth-first preorder
    pub fn reachable_blocks(&self) -> Vec<LabelId> {
        let Some(entry) = self.entry else {
            return Vec::new();
        };
        let mut visited = vec![false; self.blocks.len()];
        let mut order = Vec::new();
        let mut stack = vec![entry];
        while let Some(id) = stack.pop() {
            if visited[index_of(id)] {
                continue;
            }
            visited[index_of(id)] = true;
            order.push(id);
            for succ in self.block(id).successors().into_iter().rev() {
                if !visited[index_of(succ)] {
                    stack.push(succ);
                }
            }
        }
        order
    }

    pub fn is_reachable(&self, block: LabelId) -> bool {
        self.reachable_blocks().contains(&block)
    }

    /// Recomputes the direct callee set from the `Call` instructions
    pub fn collect_callees(&mut self) {
        self.callees = self
            .blocks
            .iter()
            .flat_map(|block| block.quads())
            .filter_map(|quad| match &quad.instruction {
                Instruction::Call { callee, .. } => Some(*callee),
                _ => None,
            })
            .collect();
    }

    /// Whether this function can reach itself through calls
    pub fn is_recursive(&self) -> bool {
        self.recursive_callees.contains(&self.id)
    }
}
