//! Array indexing and field access
//!
//! An array is a pointer to a length slot followed by the elements, so
//! element `i` of `a` lives at `a + i * 8 + 8`.

use super::{Address, ExpressionGenerator};
use crate::codegen::CodegenError;
use crate::ir::{IrBinaryOp, Value};
use crate::typed_ast::{Storage, TypedExpr, TypedExprKind};
use crate::types::REG_SIZE;

pub fn generate_address(gen: &mut ExpressionGenerator, expr: &TypedExpr) -> Result<Address, CodegenError> {
    match &expr.kind {
        TypedExprKind::Index { array, index } => {
            let base = gen.generate(array)?;
            let index = gen.generate(index)?;
            let scaled = gen.emit_binary(IrBinaryOp::Mul, index, Value::Imm(REG_SIZE), &expr.location)?;
            let element = gen.emit_binary(IrBinaryOp::Add, base, scaled, &expr.location)?;
            Ok(Address {
                base: element,
                offset: REG_SIZE,
            })
        }
        TypedExprKind::Member { object, offset, .. } => {
            let base = gen.generate(object)?;
            Ok(Address { base, offset: *offset })
        }
        TypedExprKind::Identifier {
            storage: Storage::Member { offset },
            ..
        } => {
            let base = super::identifiers::this_value(gen, &expr.location)?;
            Ok(Address { base, offset: *offset })
        }
        _ => Err(CodegenError::InvalidLvalue {
            location: expr.location.clone(),
        }),
    }
}

pub fn generate_memory_load(gen: &mut ExpressionGenerator, expr: &TypedExpr) -> Result<Value, CodegenError> {
    let addr = generate_address(gen, expr)?;
    Ok(gen.ctx.builder.build_load(addr.base, addr.offset))
}
