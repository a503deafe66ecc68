//! Literal code generation

use super::ExpressionGenerator;
use crate::ir::Value;

/// Interns the literal; equal text shares one pool entry
pub fn generate_string_literal(gen: &mut ExpressionGenerator, value: &str) -> Value {
    Value::Str(gen.module.put_static_string(value))
}
