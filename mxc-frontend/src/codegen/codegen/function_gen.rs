//! Function code generation

use log::debug;
use mxc_common::{LabelId, SourceLocation};
use std::collections::HashSet;
use crate::codegen::statements::{self, StatementGenerator};
use crate::codegen::{method_symbol, CodegenError, FunctionContext, ProgramInfo};
use crate::ir::{Function, Instruction, IrBuilder, Module, Value};
use crate::typed_ast::TypedFunction;
use crate::types::Type;

/// Lowers a free function (`class == None`) or a method into the function
/// pre-registered under its symbol
pub fn generate_function(
    module: &mut Module,
    program: &ProgramInfo,
    func: &TypedFunction,
    class: Option<&str>,
) -> Result<(), CodegenError> {
    let symbol = match class {
        Some(class) => method_symbol(class, &func.name),
        None => func.name.clone(),
    };
    let id = module.function_id(&symbol).ok_or_else(|| CodegenError::UndefinedFunction {
        name: symbol.clone(),
        location: func.location.clone(),
    })?;
    debug!("lowering function '{}'", symbol);

    let mut function = module.take_function(id);
    function.source_location = Some(func.location.clone());
    let mut ctx = FunctionContext::new(IrBuilder::new(function), func.return_type.clone());

    if class.is_some() {
        ctx.this_register = Some(ctx.builder.add_parameter("this"));
    }
    for param in &func.parameters {
        let reg = ctx.builder.add_parameter(&param.name);
        ctx.locals.insert(param.id, reg);
    }

    let is_entry = class.is_none() && func.name == program.options.entry_point;
    if is_entry {
        ctx.builder.build_call(program.init_function, Vec::new(), false);
    }

    let mut gen = StatementGenerator {
        ctx: &mut ctx,
        module: &mut *module,
        program,
    };
    statements::generate_block(&mut gen, &func.body)?;

    let function = finish_body(ctx, is_entry, &func.location)?;
    module.put_function(function);
    Ok(())
}

/// Closes every open block with a return, then merges all returns into a
/// single exit block. `implicit_zero` lets a non-void function fall off its
/// end returning 0.
pub(super) fn finish_body(
    ctx: FunctionContext,
    implicit_zero: bool,
    location: &SourceLocation,
) -> Result<Function, CodegenError> {
    let FunctionContext {
        mut builder,
        return_type,
        ..
    } = ctx;
    close_open_blocks(&mut builder, &return_type, implicit_zero, location)?;
    merge_returns(&mut builder);
    Ok(builder.finish_function())
}

/// An open block that is unreachable (the join after an `if` whose arms
/// both return) is closed with `Return(0)`; a reachable one in a non-void
/// function means a path without `return`.
fn close_open_blocks(
    builder: &mut IrBuilder,
    return_type: &Type,
    implicit_zero: bool,
    location: &SourceLocation,
) -> Result<(), CodegenError> {
    let reachable: HashSet<LabelId> = builder.function().reachable_blocks().into_iter().collect();
    let open: Vec<LabelId> = builder
        .function()
        .blocks
        .iter()
        .filter(|block| !block.has_terminator())
        .map(|block| block.id)
        .collect();

    for block in open {
        let value = if return_type.is_void() {
            None
        } else if implicit_zero || !reachable.contains(&block) {
            Some(Value::Imm(0))
        } else {
            return Err(CodegenError::MissingReturn {
                function: builder.function().name.clone(),
                location: location.clone(),
            });
        };
        builder.switch_to_block(block);
        builder.build_return(value);
    }
    Ok(())
}

/// Rewrites every `return v` into `return_value = v; jump exit` and gives
/// the exit block the only `Return`
fn merge_returns(builder: &mut IrBuilder) {
    let returns = builder.function().returns.clone();
    if returns.len() <= 1 {
        builder.function_mut().exit = returns.first().copied();
        return;
    }

    let name = builder.function().name.clone();
    let exit = builder.create_block(&format!("{name}_exit"));
    let result = if builder.function().has_return_value {
        Some(builder.new_register(Some("return_value")))
    } else {
        None
    };

    let function = builder.function_mut();
    for &block in &returns {
        let old = function.take_terminator(block);
        if let (Some(dst), Some(Instruction::Return(Some(value)))) = (result, old) {
            function.add_instruction(block, Instruction::Move { dst, src: value });
        }
        function.set_terminator(block, Instruction::Jump(exit));
    }
    function.set_terminator(exit, Instruction::Return(result.map(Value::from)));
    function.exit = Some(exit);

    debug!("{}: merged {} return sites into block {}", name, returns.len(), exit);
}
