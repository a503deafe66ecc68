//! IR Builder
//!
//! Appends instructions to the current block of one function. All
//! structural bookkeeping (predecessor edges, return sites) goes through
//! `Function`, so the builder only tracks where the next instruction goes.

use log::trace;
use mxc_common::{FunctionId, LabelId, LoopId, TempId};
use crate::ir::{Function, Instruction, IrBinaryOp, IrCompareOp, IrUnaryOp, Register, Value};
use crate::types::REG_SIZE;

pub struct IrBuilder {
    function: Function,
    current_block: LabelId,
}

impl IrBuilder {
    /// Starts building `function` at a fresh entry block
    pub fn new(mut function: Function) -> Self {
        let entry = function.create_block("entry");
        function.entry = Some(entry);
        Self {
            function,
            current_block: entry,
        }
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    pub fn function_mut(&mut self) -> &mut Function {
        &mut self.function
    }

    pub fn function_id(&self) -> FunctionId {
        self.function.id
    }

    pub fn new_temp(&mut self, name: Option<&str>) -> TempId {
        self.function.new_register(name)
    }

    pub fn new_register(&mut self, name: Option<&str>) -> Register {
        Register::Virtual(self.new_temp(name))
    }

    pub fn add_parameter(&mut self, name: &str) -> TempId {
        self.function.add_parameter(name)
    }

    pub fn create_block(&mut self, label: &str) -> LabelId {
        let id = self.function.create_block(label);
        trace!("{}: created block {} ({})", self.function.name, id, label);
        id
    }

    pub fn tag_loop_block(&mut self, block: LabelId, loop_id: LoopId) {
        self.function.block_mut(block).for_loop = Some(loop_id);
    }

    pub fn switch_to_block(&mut self, block: LabelId) {
        self.current_block = block;
    }

    pub fn current_block_has_terminator(&self) -> bool {
        self.function.block(self.current_block).has_terminator()
    }

    pub fn add_instruction(&mut self, instr: Instruction) {
        self.function.add_instruction(self.current_block, instr);
    }

    pub fn build_move(&mut self, dst: Register, src: Value) {
        self.add_instruction(Instruction::Move { dst, src });
    }

    pub fn build_unary(&mut self, op: IrUnaryOp, src: Value) -> Value {
        let dst = self.new_register(None);
        self.add_instruction(Instruction::Unary { dst, op, src });
        dst.into()
    }

    pub fn build_binary(&mut self, op: IrBinaryOp, lhs: Value, rhs: Value) -> Value {
        let dst = self.new_register(None);
        self.build_binary_into(dst, op, lhs, rhs);
        dst.into()
    }

    pub fn build_binary_into(&mut self, dst: Register, op: IrBinaryOp, lhs: Value, rhs: Value) {
        self.add_instruction(Instruction::Binary { dst, op, lhs, rhs });
    }

    pub fn build_compare(&mut self, op: IrCompareOp, lhs: Value, rhs: Value) -> Value {
        let dst = self.new_register(None);
        self.add_instruction(Instruction::Compare { dst, op, lhs, rhs });
        dst.into()
    }

    pub fn build_load(&mut self, base: Value, offset: i64) -> Value {
        let dst = self.new_register(None);
        self.add_instruction(Instruction::Load { dst, size: REG_SIZE, base, offset });
        dst.into()
    }

    pub fn build_store(&mut self, value: Value, base: Value, offset: i64) {
        self.add_instruction(Instruction::Store { value, size: REG_SIZE, base, offset });
    }

    pub fn build_call(&mut self, callee: FunctionId, args: Vec<Value>, has_result: bool) -> Option<Value> {
        let dst = has_result.then(|| self.new_register(None));
        self.add_instruction(Instruction::Call { callee, args, dst });
        dst.map(Value::from)
    }

    pub fn build_heap_alloc(&mut self, size: Value) -> Value {
        let dst = self.new_register(None);
        self.add_instruction(Instruction::HeapAlloc { dst, size });
        dst.into()
    }

    pub fn build_jump(&mut self, target: LabelId) {
        self.function.set_terminator(self.current_block, Instruction::Jump(target));
    }

    pub fn build_cond_jump(&mut self, cond: Value, then_block: LabelId, else_block: LabelId) {
        self.function
            .set_terminator(self.current_block, Instruction::CondJump { cond, then_block, else_block });
    }

    pub fn build_return(&mut self, value: Option<Value>) {
        self.function.set_terminator(self.current_block, Instruction::Return(value));
    }

    pub fn finish_function(self) -> Function {
        self.function
    }
}
