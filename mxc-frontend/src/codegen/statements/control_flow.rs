//! Control flow statement code generation (if, while, for)
//!
//! Conditions are lowered straight into branches to the statement's
//! blocks. A branch body that already ended its block (return, break,
//! continue) gets no fall-through jump.

use log::trace;
use mxc_common::{LabelId, LoopId};
use super::StatementGenerator;
use crate::codegen::expressions::BranchTargets;
use crate::codegen::{CodegenError, LoopTargets};
use crate::ir::LoopRecord;
use crate::typed_ast::{TypedExpr, TypedStmt};

pub fn generate_if(
    gen: &mut StatementGenerator,
    condition: &TypedExpr,
    then_stmt: &TypedStmt,
    else_stmt: Option<&TypedStmt>,
) -> Result<(), CodegenError> {
    let then_block = gen.ctx.builder.create_block("if_then");
    let else_block = else_stmt.map(|_| gen.ctx.builder.create_block("if_else"));
    let after_block = gen.ctx.builder.create_block("if_after");

    gen.create_expression_generator()
        .generate_condition(condition, BranchTargets::new(then_block, else_block.unwrap_or(after_block)))?;

    gen.ctx.builder.switch_to_block(then_block);
    gen.generate(then_stmt)?;
    close_with_jump(gen, after_block);

    if let (Some(else_stmt), Some(else_block)) = (else_stmt, else_block) {
        gen.ctx.builder.switch_to_block(else_block);
        gen.generate(else_stmt)?;
        close_with_jump(gen, after_block);
    }

    gen.ctx.builder.switch_to_block(after_block);
    Ok(())
}

pub fn generate_while(gen: &mut StatementGenerator, condition: &TypedExpr, body: &TypedStmt) -> Result<(), CodegenError> {
    let cond_block = gen.ctx.builder.create_block("while_cond");
    let body_block = gen.ctx.builder.create_block("while_body");
    let after_block = gen.ctx.builder.create_block("while_after");

    gen.ctx.builder.build_jump(cond_block);
    gen.ctx.builder.switch_to_block(cond_block);
    gen.create_expression_generator()
        .generate_condition(condition, BranchTargets::new(body_block, after_block))?;

    gen.ctx.builder.switch_to_block(body_block);
    let targets = LoopTargets {
        step: cond_block,
        after: after_block,
    };
    gen.with_loop(targets, |gen| gen.generate(body))?;
    close_with_jump(gen, cond_block);

    gen.ctx.builder.switch_to_block(after_block);
    Ok(())
}

/// A missing condition collapses the condition block into the body and a
/// missing update collapses the update block into the condition, so
/// `for (;;)` is a single self-looping body block.
pub fn generate_for(
    gen: &mut StatementGenerator,
    id: LoopId,
    init: Option<&TypedStmt>,
    condition: Option<&TypedExpr>,
    update: Option<&TypedExpr>,
    body: &TypedStmt,
) -> Result<(), CodegenError> {
    let body_block = gen.ctx.builder.create_block("for_body");
    let cond_block = match condition {
        Some(_) => gen.ctx.builder.create_block("for_cond"),
        None => body_block,
    };
    let incr_block = match update {
        Some(_) => gen.ctx.builder.create_block("for_incr"),
        None => cond_block,
    };
    let after_block = gen.ctx.builder.create_block("for_after");

    for block in [body_block, cond_block, incr_block, after_block] {
        gen.ctx.builder.tag_loop_block(block, id);
    }
    let function = gen.ctx.builder.function_id();
    gen.module.record_loop(
        id,
        LoopRecord {
            function,
            cond: cond_block,
            incr: incr_block,
            body: body_block,
            after: after_block,
            processed: false,
        },
    );
    trace!(
        "for #{}: cond={} incr={} body={} after={}",
        id,
        cond_block,
        incr_block,
        body_block,
        after_block
    );

    if let Some(init) = init {
        gen.generate(init)?;
    }
    gen.ctx.builder.build_jump(cond_block);

    if let Some(condition) = condition {
        gen.ctx.builder.switch_to_block(cond_block);
        gen.create_expression_generator()
            .generate_condition(condition, BranchTargets::new(body_block, after_block))?;
    }

    if let Some(update) = update {
        gen.ctx.builder.switch_to_block(incr_block);
        gen.create_expression_generator().generate(update)?;
        gen.ctx.builder.build_jump(cond_block);
    }

    gen.ctx.builder.switch_to_block(body_block);
    let targets = LoopTargets {
        step: incr_block,
        after: after_block,
    };
    gen.with_loop(targets, |gen| gen.generate(body))?;
    close_with_jump(gen, incr_block);

    gen.ctx.builder.switch_to_block(after_block);
    Ok(())
}

fn close_with_jump(gen: &mut StatementGenerator, target: LabelId) {
    if !gen.ctx.builder.current_block_has_terminator() {
        gen.ctx.builder.build_jump(target);
    }
}
