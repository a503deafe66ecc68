//! Function and method call code generation

use mxc_common::FunctionId;
use super::{identifiers, intrinsics, ExpressionGenerator};
use crate::codegen::{method_symbol, CodegenError};
use crate::ir::Value;
use crate::typed_ast::{CallTarget, TypedExpr};

pub fn generate_call(
    gen: &mut ExpressionGenerator,
    target: &CallTarget,
    arguments: &[TypedExpr],
    call: &TypedExpr,
) -> Result<Value, CodegenError> {
    match target {
        CallTarget::Function { name } => {
            let callee = lookup_function(gen, name, call)?;
            let args = generate_arguments(gen, arguments, Vec::new())?;
            Ok(emit_call(gen, callee, args, call))
        }
        CallTarget::Method { class, name, receiver } => {
            let callee = lookup_function(gen, &method_symbol(class, name), call)?;
            let this = match receiver {
                Some(receiver) => gen.generate(receiver)?,
                None => identifiers::this_value(gen, &call.location)?,
            };
            let args = generate_arguments(gen, arguments, vec![this])?;
            Ok(emit_call(gen, callee, args, call))
        }
        CallTarget::Intrinsic { intrinsic, receiver } => {
            intrinsics::generate_intrinsic(gen, *intrinsic, receiver.as_deref(), arguments, call)
        }
    }
}

fn lookup_function(gen: &ExpressionGenerator, name: &str, call: &TypedExpr) -> Result<FunctionId, CodegenError> {
    gen.module
        .function_id(name)
        .ok_or_else(|| CodegenError::UndefinedFunction {
            name: name.to_string(),
            location: call.location.clone(),
        })
}

/// Evaluates arguments left to right after any already-evaluated leading
/// values (the receiver)
pub fn generate_arguments(
    gen: &mut ExpressionGenerator,
    arguments: &[TypedExpr],
    mut values: Vec<Value>,
) -> Result<Vec<Value>, CodegenError> {
    for arg in arguments {
        values.push(gen.generate(arg)?);
    }
    Ok(values)
}

/// A void call still yields a value so callers need no special case; it
/// is never read.
pub fn emit_call(gen: &mut ExpressionGenerator, callee: FunctionId, args: Vec<Value>, call: &TypedExpr) -> Value {
    let has_result = !call.get_type().is_void();
    gen.ctx
        .builder
        .build_call(callee, args, has_result)
        .unwrap_or(Value::Imm(0))
}
