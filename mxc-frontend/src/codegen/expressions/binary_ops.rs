//! Binary operation code generation
//!
//! Integer operations fold when both operands are immediates. Otherwise a
//! lone immediate goes on the right: commutative operators swap operands,
//! comparisons swap and flip their predicate, and `-`, `/`, `%`, `<<`, `>>`
//! are emitted as written.

use log::trace;
use mxc_common::SourceLocation;
use super::ExpressionGenerator;
use crate::codegen::CodegenError;
use crate::ir::{Builtin, IrBinaryOp, IrCompareOp, Value};
use crate::typed_ast::{BinaryOp, TypedExpr};

pub fn generate_binary_operation(
    gen: &mut ExpressionGenerator,
    op: BinaryOp,
    left: &TypedExpr,
    right: &TypedExpr,
    location: &SourceLocation,
) -> Result<Value, CodegenError> {
    if op.is_logical() {
        return Err(CodegenError::UnsplitLogicalOperator {
            op,
            location: location.clone(),
        });
    }

    let lhs = gen.generate(left)?;
    let rhs = gen.generate(right)?;

    if left.get_type().is_string() && right.get_type().is_string() {
        return generate_string_operation(gen, op, lhs, rhs, location);
    }

    if let Some(cmp) = compare_op(op) {
        return Ok(emit_compare(gen, cmp, lhs, rhs));
    }

    let ir_op = arithmetic_op(op).ok_or_else(|| CodegenError::InvalidOperands {
        op: op.to_string(),
        message: "not an arithmetic operator".to_string(),
        location: location.clone(),
    })?;
    emit_binary(gen, ir_op, lhs, rhs, location)
}

pub fn arithmetic_op(op: BinaryOp) -> Option<IrBinaryOp> {
    let ir_op = match op {
        BinaryOp::Add => IrBinaryOp::Add,
        BinaryOp::Sub => IrBinaryOp::Sub,
        BinaryOp::Mul => IrBinaryOp::Mul,
        BinaryOp::Div => IrBinaryOp::Div,
        BinaryOp::Mod => IrBinaryOp::Mod,
        BinaryOp::LeftShift => IrBinaryOp::Shl,
        BinaryOp::RightShift => IrBinaryOp::Shr,
        BinaryOp::BitAnd => IrBinaryOp::And,
        BinaryOp::BitOr => IrBinaryOp::Or,
        BinaryOp::BitXor => IrBinaryOp::Xor,
        _ => return None,
    };
    Some(ir_op)
}

pub fn compare_op(op: BinaryOp) -> Option<IrCompareOp> {
    let cmp = match op {
        BinaryOp::Less => IrCompareOp::Lt,
        BinaryOp::LessEqual => IrCompareOp::Le,
        BinaryOp::Greater => IrCompareOp::Gt,
        BinaryOp::GreaterEqual => IrCompareOp::Ge,
        BinaryOp::Equal => IrCompareOp::Eq,
        BinaryOp::NotEqual => IrCompareOp::Ne,
        _ => return None,
    };
    Some(cmp)
}

pub fn emit_binary(
    gen: &mut ExpressionGenerator,
    op: IrBinaryOp,
    lhs: Value,
    rhs: Value,
    location: &SourceLocation,
) -> Result<Value, CodegenError> {
    let divides = matches!(op, IrBinaryOp::Div | IrBinaryOp::Mod);
    if divides && rhs == Value::Imm(0) {
        return Err(CodegenError::DivisionByZero {
            location: location.clone(),
        });
    }

    if let (Some(l), Some(r)) = (lhs.as_imm(), rhs.as_imm()) {
        let folded = op.fold(l, r).ok_or_else(|| CodegenError::DivisionByZero {
            location: location.clone(),
        })?;
        trace!("folded {} {}, {} to {}", op, l, r, folded);
        return Ok(Value::Imm(folded));
    }

    if op.is_div_or_shift() {
        gen.module.has_div_shift = true;
    }

    let (lhs, rhs) = if lhs.is_imm() && op.is_commutative() {
        (rhs, lhs)
    } else {
        (lhs, rhs)
    };
    Ok(gen.ctx.builder.build_binary(op, lhs, rhs))
}

pub fn emit_compare(gen: &mut ExpressionGenerator, op: IrCompareOp, lhs: Value, rhs: Value) -> Value {
    if let (Some(l), Some(r)) = (lhs.as_imm(), rhs.as_imm()) {
        return Value::Imm(op.fold(l, r));
    }
    if lhs.is_imm() {
        return gen.ctx.builder.build_compare(op.swapped(), rhs, lhs);
    }
    gen.ctx.builder.build_compare(op, lhs, rhs)
}

/// `+` and comparisons on strings. Two pooled strings fold at compile
/// time, anything else calls into the runtime. `>`/`>=` reuse the
/// `<`/`<=` entry points with the operands exchanged.
fn generate_string_operation(
    gen: &mut ExpressionGenerator,
    op: BinaryOp,
    lhs: Value,
    rhs: Value,
    location: &SourceLocation,
) -> Result<Value, CodegenError> {
    if let Some((l, r)) = pooled_texts(gen, lhs, rhs) {
        if op == BinaryOp::Add {
            return Ok(Value::Str(gen.module.put_static_string(&format!("{l}{r}"))));
        }
        if let Some(cmp) = compare_op(op) {
            return Ok(Value::Imm(i64::from(cmp.evaluate(l.as_str(), r.as_str()))));
        }
    }

    let (builtin, args) = match op {
        BinaryOp::Add => (Builtin::StringConcat, vec![lhs, rhs]),
        BinaryOp::Equal => (Builtin::StringEqual, vec![lhs, rhs]),
        BinaryOp::NotEqual => (Builtin::StringInequal, vec![lhs, rhs]),
        BinaryOp::Less => (Builtin::StringLess, vec![lhs, rhs]),
        BinaryOp::LessEqual => (Builtin::StringLessEqual, vec![lhs, rhs]),
        BinaryOp::Greater => (Builtin::StringLess, vec![rhs, lhs]),
        BinaryOp::GreaterEqual => (Builtin::StringLessEqual, vec![rhs, lhs]),
        _ => {
            return Err(CodegenError::InvalidOperands {
                op: op.to_string(),
                message: "operator is not defined on strings".to_string(),
                location: location.clone(),
            })
        }
    };
    let callee = gen.module.builtin(builtin);
    let result = gen.ctx.builder.build_call(callee, args, true);
    Ok(result.unwrap_or(Value::Imm(0)))
}

fn pooled_texts(gen: &ExpressionGenerator, lhs: Value, rhs: Value) -> Option<(String, String)> {
    match (lhs, rhs) {
        (Value::Str(l), Value::Str(r)) => {
            let l = gen.module.static_string(l)?;
            let r = gen.module.static_string(r)?;
            Some((l.to_string(), r.to_string()))
        }
        _ => None,
    }
}
