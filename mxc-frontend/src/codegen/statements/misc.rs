//! Expression statements and blocks

use super::StatementGenerator;
use crate::codegen::CodegenError;
use crate::typed_ast::{TypedExpr, TypedStmt};

pub fn generate_expression_stmt(gen: &mut StatementGenerator, expr: &TypedExpr) -> Result<(), CodegenError> {
    gen.create_expression_generator().generate(expr)?;
    Ok(())
}

/// Statements after one that ends its block are unreachable and skipped
pub fn generate_block(gen: &mut StatementGenerator, statements: &[TypedStmt]) -> Result<(), CodegenError> {
    for stmt in statements {
        gen.generate(stmt)?;
        if gen.ctx.builder.current_block_has_terminator() {
            break;
        }
    }
    Ok(())
}
