//! Jump statement code generation (break, continue, return)

use mxc_common::SourceLocation;
use super::StatementGenerator;
use crate::codegen::CodegenError;
use crate::typed_ast::TypedExpr;

pub fn generate_break(gen: &mut StatementGenerator, location: &SourceLocation) -> Result<(), CodegenError> {
    let targets = gen.ctx.innermost_loop().ok_or_else(|| CodegenError::BreakOutsideLoop {
        location: location.clone(),
    })?;
    gen.ctx.builder.build_jump(targets.after);
    Ok(())
}

pub fn generate_continue(gen: &mut StatementGenerator, location: &SourceLocation) -> Result<(), CodegenError> {
    let targets = gen.ctx.innermost_loop().ok_or_else(|| CodegenError::ContinueOutsideLoop {
        location: location.clone(),
    })?;
    gen.ctx.builder.build_jump(targets.step);
    Ok(())
}

pub fn generate_return(
    gen: &mut StatementGenerator,
    value: Option<&TypedExpr>,
    location: &SourceLocation,
) -> Result<(), CodegenError> {
    if gen.ctx.return_type.is_void() {
        // `return f();` with a void `f` still makes the call
        if let Some(expr) = value {
            gen.create_expression_generator().generate(expr)?;
        }
        gen.ctx.builder.build_return(None);
        return Ok(());
    }

    let expr = value.ok_or_else(|| CodegenError::MissingReturn {
        function: gen.ctx.builder.function().name.clone(),
        location: location.clone(),
    })?;
    let result = gen.create_expression_generator().generate(expr)?;
    gen.ctx.builder.build_return(Some(result));
    Ok(())
}
