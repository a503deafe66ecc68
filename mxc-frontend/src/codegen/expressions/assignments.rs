//! Assignment code generation

use super::ExpressionGenerator;
use crate::codegen::CodegenError;
use crate::ir::Value;
use crate::typed_ast::TypedExpr;

/// Stores into memory operands, moves into registers. The assigned value
/// is the result.
pub fn generate_assignment(gen: &mut ExpressionGenerator, lhs: &TypedExpr, rhs: &TypedExpr) -> Result<Value, CodegenError> {
    let place = gen.generate_place(lhs)?;
    let value = gen.generate(rhs)?;
    gen.store_to_place(place, value);
    Ok(value)
}
