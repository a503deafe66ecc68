//! Built-in call lowering
//!
//! Member intrinsics pass their receiver first. `length` and `size` read
//! the length slot in front of the data instead of calling out.

use super::{function_calls, ExpressionGenerator};
use crate::codegen::CodegenError;
use crate::ir::{Builtin, Value};
use crate::typed_ast::{BinaryOp, CallTarget, Intrinsic, TypedExpr, TypedExprKind};

pub fn generate_intrinsic(
    gen: &mut ExpressionGenerator,
    intrinsic: Intrinsic,
    receiver: Option<&TypedExpr>,
    arguments: &[TypedExpr],
    call: &TypedExpr,
) -> Result<Value, CodegenError> {
    match intrinsic {
        Intrinsic::Print | Intrinsic::Println => {
            let arg = expect_arguments(arguments, 1, call)?;
            generate_print(gen, intrinsic == Intrinsic::Println, &arg[0])?;
            Ok(Value::Imm(0))
        }
        Intrinsic::GetString => call_builtin(gen, Builtin::GetString, Vec::new(), arguments),
        Intrinsic::GetInt => call_builtin(gen, Builtin::GetInt, Vec::new(), arguments),
        Intrinsic::ToString => call_builtin(gen, Builtin::ToString, Vec::new(), arguments),
        Intrinsic::Length | Intrinsic::Size => {
            expect_arguments(arguments, 0, call)?;
            let this = receiver_value(gen, receiver, call)?;
            Ok(gen.ctx.builder.build_load(this, 0))
        }
        Intrinsic::Substring => {
            let this = receiver_value(gen, receiver, call)?;
            call_builtin(gen, Builtin::StringSubstring, vec![this], arguments)
        }
        Intrinsic::ParseInt => {
            let this = receiver_value(gen, receiver, call)?;
            call_builtin(gen, Builtin::StringParseInt, vec![this], arguments)
        }
        Intrinsic::Ord => {
            let this = receiver_value(gen, receiver, call)?;
            call_builtin(gen, Builtin::StringOrd, vec![this], arguments)
        }
    }
}

/// `print(a + b)` prints `a` then `b`, recursing into nested
/// concatenations so no intermediate string is built. Only the last
/// piece of a `println` ends the line.
fn generate_print(gen: &mut ExpressionGenerator, newline: bool, arg: &TypedExpr) -> Result<(), CodegenError> {
    if arg.get_type().is_string() {
        if let TypedExprKind::Binary { op: BinaryOp::Add, left, right } = &arg.kind {
            generate_print(gen, false, left)?;
            return generate_print(gen, newline, right);
        }
    }

    if gen.program.options.print_int_fast_path {
        if let TypedExprKind::Call {
            target: CallTarget::Intrinsic { intrinsic: Intrinsic::ToString, .. },
            arguments,
        } = &arg.kind
        {
            let number = expect_arguments(arguments, 1, arg)?;
            let value = gen.generate(&number[0])?;
            let builtin = if newline { Builtin::PrintlnInt } else { Builtin::PrintInt };
            let callee = gen.module.builtin(builtin);
            gen.ctx.builder.build_call(callee, vec![value], false);
            return Ok(());
        }
    }

    let value = gen.generate(arg)?;
    let builtin = if newline { Builtin::Println } else { Builtin::Print };
    let callee = gen.module.builtin(builtin);
    gen.ctx.builder.build_call(callee, vec![value], false);
    Ok(())
}

fn call_builtin(
    gen: &mut ExpressionGenerator,
    builtin: Builtin,
    leading: Vec<Value>,
    arguments: &[TypedExpr],
) -> Result<Value, CodegenError> {
    let args = function_calls::generate_arguments(gen, arguments, leading)?;
    let callee = gen.module.builtin(builtin);
    Ok(gen
        .ctx
        .builder
        .build_call(callee, args, builtin.has_return_value())
        .unwrap_or(Value::Imm(0)))
}

fn receiver_value(
    gen: &mut ExpressionGenerator,
    receiver: Option<&TypedExpr>,
    call: &TypedExpr,
) -> Result<Value, CodegenError> {
    match receiver {
        Some(receiver) => gen.generate(receiver),
        None => Err(CodegenError::InvalidOperands {
            op: "call".to_string(),
            message: "member built-in without a receiver".to_string(),
            location: call.location.clone(),
        }),
    }
}

fn expect_arguments<'e>(arguments: &'e [TypedExpr], count: usize, call: &TypedExpr) -> Result<&'e [TypedExpr], CodegenError> {
    if arguments.len() == count {
        Ok(arguments)
    } else {
        Err(CodegenError::InvalidOperands {
            op: "call".to_string(),
            message: format!("expected {} argument(s), found {}", count, arguments.len()),
            location: call.location.clone(),
        })
    }
}
