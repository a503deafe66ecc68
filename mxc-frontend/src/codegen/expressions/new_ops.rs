//! `new` expressions
//!
//! Each array dimension is one allocation of `count * 8 + 8` bytes with
//! the count in the first slot. Every dimension but the last is filled by
//! a counted loop that allocates the next dimension per element.

use mxc_common::SourceLocation;
use super::ExpressionGenerator;
use crate::codegen::CodegenError;
use crate::ir::{IrBinaryOp, IrCompareOp, Value};
use crate::typed_ast::TypedExpr;
use crate::types::REG_SIZE;

pub fn generate_new_class(gen: &mut ExpressionGenerator, class: &str, location: &SourceLocation) -> Result<Value, CodegenError> {
    let info = gen
        .program
        .classes
        .get(class)
        .copied()
        .ok_or_else(|| CodegenError::UndefinedClass {
            name: class.to_string(),
            location: location.clone(),
        })?;

    let object = gen.ctx.builder.build_heap_alloc(Value::Imm(info.size));
    if let Some(constructor) = info.constructor {
        gen.ctx.builder.build_call(constructor, vec![object], false);
    }
    Ok(object)
}

/// Dimension sizes are evaluated once each, outermost first, before any
/// allocation
pub fn generate_new_array(
    gen: &mut ExpressionGenerator,
    dimensions: &[TypedExpr],
    location: &SourceLocation,
) -> Result<Value, CodegenError> {
    let mut counts = Vec::with_capacity(dimensions.len());
    for dim in dimensions {
        counts.push(gen.generate(dim)?);
    }
    if counts.is_empty() {
        return Err(CodegenError::InvalidOperands {
            op: "new".to_string(),
            message: "array allocation without a sized dimension".to_string(),
            location: location.clone(),
        });
    }
    allocate_dimension(gen, &counts, location)
}

fn allocate_dimension(gen: &mut ExpressionGenerator, counts: &[Value], location: &SourceLocation) -> Result<Value, CodegenError> {
    let count = counts[0];
    let payload = gen.emit_binary(IrBinaryOp::Mul, count, Value::Imm(REG_SIZE), location)?;
    let bytes = gen.emit_binary(IrBinaryOp::Add, payload, Value::Imm(REG_SIZE), location)?;
    let array = gen.ctx.builder.build_heap_alloc(bytes);
    gen.ctx.builder.build_store(count, array, 0);

    if counts.len() > 1 {
        let builder = &mut gen.ctx.builder;
        let index = builder.new_register(Some("new_index"));
        let slot = builder.new_register(Some("new_slot"));
        builder.build_move(index, Value::Imm(0));
        builder.build_move(slot, array);

        let cond_block = builder.create_block("new_cond");
        let body_block = builder.create_block("new_body");
        let after_block = builder.create_block("new_after");

        builder.build_jump(cond_block);
        builder.switch_to_block(cond_block);
        let in_range = builder.build_compare(IrCompareOp::Lt, index.into(), count);
        builder.build_cond_jump(in_range, body_block, after_block);

        builder.switch_to_block(body_block);
        builder.build_binary_into(slot, IrBinaryOp::Add, slot.into(), Value::Imm(REG_SIZE));
        let inner = allocate_dimension(gen, &counts[1..], location)?;
        let builder = &mut gen.ctx.builder;
        builder.build_store(inner, slot.into(), 0);
        builder.build_binary_into(index, IrBinaryOp::Add, index.into(), Value::Imm(1));
        builder.build_jump(cond_block);

        builder.switch_to_block(after_block);
    }
    Ok(array)
}
