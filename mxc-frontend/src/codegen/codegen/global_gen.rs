//! Global variable code generation
//!
//! Globals get a static slot each, in declaration order. Their
//! initializers run, in the same order, in a synthetic function that the
//! entry point calls first.

use mxc_common::StaticId;
use crate::codegen::expressions::ExpressionGenerator;
use crate::codegen::{CodegenError, FunctionContext, ProgramInfo};
use crate::ir::{IrBuilder, Module, Register};
use crate::typed_ast::TypedGlobal;
use crate::types::{Type, REG_SIZE};
use super::function_gen;

pub fn declare_global(module: &mut Module, global: &TypedGlobal) -> StaticId {
    module.put_static_data(&global.name, REG_SIZE)
}

pub fn generate_global_initializer(
    module: &mut Module,
    program: &ProgramInfo,
    globals: &[&TypedGlobal],
) -> Result<(), CodegenError> {
    let function = module.take_function(program.init_function);
    let mut ctx = FunctionContext::new(IrBuilder::new(function), Type::Void);

    for global in globals {
        let Some(init) = &global.initializer else {
            continue;
        };
        let slot = module
            .static_data_id(&global.name)
            .ok_or_else(|| CodegenError::UndefinedGlobal {
                name: global.name.clone(),
                location: global.location.clone(),
            })?;
        let value = ExpressionGenerator {
            ctx: &mut ctx,
            module: &mut *module,
            program,
        }
        .generate(init)?;
        ctx.builder.build_move(Register::Static(slot), value);
    }

    let location = globals.first().map(|g| g.location.clone()).unwrap_or_default();
    let function = function_gen::finish_body(ctx, false, &location)?;
    module.put_function(function);
    Ok(())
}
