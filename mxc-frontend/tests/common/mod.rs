//! Shared helpers for lowering tests

#![allow(dead_code)]

use mxc_frontend::codegen::{CodegenError, IrGenerator};
use mxc_frontend::ir::{Function, Instruction, Module};
use mxc_frontend::typed_ast::TypedProgram;

pub fn lower(program: &TypedProgram) -> Module {
    IrGenerator::new("test".to_string())
        .generate(program)
        .expect("lowering failed")
}

pub fn lower_err(program: &TypedProgram) -> CodegenError {
    IrGenerator::new("test".to_string())
        .generate(program)
        .expect_err("lowering should fail")
}

pub fn lowered<'m>(module: &'m Module, name: &str) -> &'m Function {
    module.get_function(name).unwrap_or_else(|| panic!("no function '{}'", name))
}

pub fn instructions(function: &Function) -> Vec<&Instruction> {
    function
        .blocks
        .iter()
        .flat_map(|block| block.quads())
        .map(|quad| &quad.instruction)
        .collect()
}

pub fn block_labelled<'f>(function: &'f Function, label: &str) -> &'f mxc_frontend::ir::BasicBlock {
    function
        .blocks
        .iter()
        .find(|block| block.label == label)
        .unwrap_or_else(|| panic!("no block '{}' in {}", label, function.name))
}

pub fn terminator(function: &Function, block: u32) -> &Instruction {
    &function.block(block).terminator.as_ref().expect("block not terminated").instruction
}

/// Every block terminated, exactly one return, the exit block holds it,
/// and predecessor lists mirror the successor edges
pub fn assert_well_formed(module: &Module) {
    for function in module.user_functions() {
        for block in &function.blocks {
            assert!(
                block.has_terminator(),
                "{}: block {} ({}) has no terminator",
                function.name,
                block.id,
                block.label
            );
            assert!(block.instructions.iter().all(|q| !q.is_terminator()));
            for succ in block.successors() {
                assert!(
                    function.block(succ).predecessors.contains(&block.id),
                    "{}: edge {} -> {} missing from predecessors",
                    function.name,
                    block.id,
                    succ
                );
            }
        }
        let returns: Vec<_> = function.blocks.iter().filter(|b| b.returns()).map(|b| b.id).collect();
        assert_eq!(returns.len(), 1, "{} must have a single return", function.name);
        assert_eq!(function.exit, Some(returns[0]));
        assert_eq!(function.returns, returns);
    }
}
