//! Local variable declarations

use mxc_common::LocalId;
use super::StatementGenerator;
use crate::codegen::CodegenError;
use crate::ir::Register;
use crate::typed_ast::TypedExpr;

/// Every local gets its own register. The initializer is evaluated
/// before the name is bound.
pub fn generate_var_decl(
    gen: &mut StatementGenerator,
    name: &str,
    id: LocalId,
    initializer: Option<&TypedExpr>,
) -> Result<(), CodegenError> {
    let init = match initializer {
        Some(expr) => Some(gen.create_expression_generator().generate(expr)?),
        None => None,
    };

    let reg = gen.ctx.builder.new_temp(Some(name));
    gen.ctx.locals.insert(id, reg);
    if let Some(value) = init {
        gen.ctx.builder.build_move(Register::Virtual(reg), value);
    }
    Ok(())
}
