//! Boolean expressions as control flow
//!
//! A condition is lowered against a pair of target blocks and leaves the
//! current block terminated with a jump into one of them. `&&` and `||`
//! never produce a value of their own: the left operand branches either
//! to a fresh block that evaluates the right operand or straight to the
//! outer target.

use mxc_common::LabelId;
use super::ExpressionGenerator;
use crate::codegen::CodegenError;
use crate::ir::Value;
use crate::typed_ast::{BinaryOp, TypedExpr, TypedExprKind, UnaryOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchTargets {
    pub then_block: LabelId,
    pub else_block: LabelId,
}

impl BranchTargets {
    pub fn new(then_block: LabelId, else_block: LabelId) -> Self {
        Self { then_block, else_block }
    }

    pub fn swapped(self) -> Self {
        Self {
            then_block: self.else_block,
            else_block: self.then_block,
        }
    }
}

pub fn generate_condition(
    gen: &mut ExpressionGenerator,
    expr: &TypedExpr,
    targets: BranchTargets,
) -> Result<(), CodegenError> {
    match &expr.kind {
        TypedExprKind::BoolLiteral(value) => {
            let target = if *value { targets.then_block } else { targets.else_block };
            gen.ctx.builder.build_jump(target);
            Ok(())
        }

        TypedExprKind::Binary { op: BinaryOp::LogicalAnd, left, right } => {
            let rhs_block = gen.ctx.builder.create_block("and_rhs");
            generate_condition(gen, left, BranchTargets::new(rhs_block, targets.else_block))?;
            gen.ctx.builder.switch_to_block(rhs_block);
            generate_condition(gen, right, targets)
        }

        TypedExprKind::Binary { op: BinaryOp::LogicalOr, left, right } => {
            let rhs_block = gen.ctx.builder.create_block("or_rhs");
            generate_condition(gen, left, BranchTargets::new(targets.then_block, rhs_block))?;
            gen.ctx.builder.switch_to_block(rhs_block);
            generate_condition(gen, right, targets)
        }

        TypedExprKind::Unary { op: UnaryOp::LogicalNot, operand } => {
            generate_condition(gen, operand, targets.swapped())
        }

        _ => {
            let value = gen.generate(expr)?;
            branch_on(gen, value, targets);
            Ok(())
        }
    }
}

/// Jumps straight to the taken target when the value is known
fn branch_on(gen: &mut ExpressionGenerator, value: Value, targets: BranchTargets) {
    match value.as_imm() {
        Some(v) => {
            let target = if v != 0 { targets.then_block } else { targets.else_block };
            gen.ctx.builder.build_jump(target);
        }
        None => gen.ctx.builder.build_cond_jump(value, targets.then_block, targets.else_block),
    }
}

/// Lowers a condition in value position: both outcomes write 1 or 0 into
/// one register and meet in a merge block.
pub fn materialize_condition(gen: &mut ExpressionGenerator, expr: &TypedExpr) -> Result<Value, CodegenError> {
    let true_block = gen.ctx.builder.create_block("bool_true");
    let false_block = gen.ctx.builder.create_block("bool_false");
    let merge_block = gen.ctx.builder.create_block("bool_merge");
    let result = gen.ctx.builder.new_register(Some("bool"));

    generate_condition(gen, expr, BranchTargets::new(true_block, false_block))?;

    gen.ctx.builder.switch_to_block(true_block);
    gen.ctx.builder.build_move(result, Value::Imm(1));
    gen.ctx.builder.build_jump(merge_block);

    gen.ctx.builder.switch_to_block(false_block);
    gen.ctx.builder.build_move(result, Value::Imm(0));
    gen.ctx.builder.build_jump(merge_block);

    gen.ctx.builder.switch_to_block(merge_block);
    Ok(result.into())
}
