//! Unary operation code generation

use mxc_common::SourceLocation;
use super::{ExpressionGenerator, Place};
use crate::codegen::CodegenError;
use crate::ir::{IrBinaryOp, IrUnaryOp, Value};
use crate::typed_ast::{TypedExpr, UnaryOp};

pub fn generate_unary_operation(
    gen: &mut ExpressionGenerator,
    op: UnaryOp,
    operand: &TypedExpr,
    location: &SourceLocation,
) -> Result<Value, CodegenError> {
    match op {
        UnaryOp::Plus => gen.generate(operand),
        UnaryOp::Neg | UnaryOp::BitNot => {
            let ir_op = if op == UnaryOp::Neg { IrUnaryOp::Neg } else { IrUnaryOp::BitNot };
            let value = gen.generate(operand)?;
            match value.as_imm() {
                Some(v) => Ok(Value::Imm(ir_op.fold(v))),
                None => Ok(gen.ctx.builder.build_unary(ir_op, value)),
            }
        }
        UnaryOp::PreIncrement | UnaryOp::PreDecrement | UnaryOp::PostIncrement | UnaryOp::PostDecrement => {
            generate_increment(gen, op, operand)
        }
        UnaryOp::LogicalNot => Err(CodegenError::InvalidOperands {
            op: "!".to_string(),
            message: "logical negation must be lowered as a condition".to_string(),
            location: location.clone(),
        }),
    }
}

/// `++x`, `x++`, `--x`, `x--`. A memory operand's address is computed
/// once and used for both the load and the store.
fn generate_increment(gen: &mut ExpressionGenerator, op: UnaryOp, operand: &TypedExpr) -> Result<Value, CodegenError> {
    let step = match op {
        UnaryOp::PreIncrement | UnaryOp::PostIncrement => IrBinaryOp::Add,
        _ => IrBinaryOp::Sub,
    };
    let is_prefix = matches!(op, UnaryOp::PreIncrement | UnaryOp::PreDecrement);

    match gen.generate_place(operand)? {
        Place::Memory(addr) => {
            let old = gen.load_place(Place::Memory(addr));
            let new = gen.ctx.builder.build_binary(step, old, Value::Imm(1));
            gen.ctx.builder.build_store(new, addr.base, addr.offset);
            Ok(if is_prefix { new } else { old })
        }
        Place::Register(reg) => {
            if is_prefix {
                gen.ctx.builder.build_binary_into(reg, step, reg.into(), Value::Imm(1));
                Ok(reg.into())
            } else {
                let old = gen.ctx.builder.new_register(None);
                gen.ctx.builder.build_move(old, reg.into());
                gen.ctx.builder.build_binary_into(reg, step, reg.into(), Value::Imm(1));
                Ok(old.into())
            }
        }
    }
}
