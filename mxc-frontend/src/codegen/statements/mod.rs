//! Statement code generation modules

mod declarations;
mod control_flow;
mod jumps;
mod misc;

pub use control_flow::{generate_for, generate_if, generate_while};
pub use declarations::generate_var_decl;
pub use jumps::{generate_break, generate_continue, generate_return};
pub use misc::{generate_block, generate_expression_stmt};

use super::expressions::ExpressionGenerator;
use super::{CodegenError, FunctionContext, LoopTargets, ProgramInfo};
use crate::ir::Module;
use crate::typed_ast::{TypedStmt, TypedStmtKind};

/// Typed statement generator context
pub struct StatementGenerator<'a> {
    pub ctx: &'a mut FunctionContext,
    pub module: &'a mut Module,
    pub program: &'a ProgramInfo,
}

impl<'a> StatementGenerator<'a> {
    /// Generate IR for a typed statement
    pub fn generate(&mut self, stmt: &TypedStmt) -> Result<(), CodegenError> {
        match &stmt.kind {
            TypedStmtKind::Expression(expr) => misc::generate_expression_stmt(self, expr),

            TypedStmtKind::VarDecl { name, id, initializer, .. } => {
                declarations::generate_var_decl(self, name, *id, initializer.as_ref())
            }

            TypedStmtKind::Block(statements) => misc::generate_block(self, statements),

            TypedStmtKind::If { condition, then_stmt, else_stmt } => {
                control_flow::generate_if(self, condition, then_stmt, else_stmt.as_deref())
            }

            TypedStmtKind::While { condition, body } => control_flow::generate_while(self, condition, body),

            TypedStmtKind::For { id, init, condition, update, body } => control_flow::generate_for(
                self,
                *id,
                init.as_deref(),
                condition.as_ref(),
                update.as_ref(),
                body,
            ),

            TypedStmtKind::Return(value) => jumps::generate_return(self, value.as_ref(), &stmt.location),

            TypedStmtKind::Break => jumps::generate_break(self, &stmt.location),

            TypedStmtKind::Continue => jumps::generate_continue(self, &stmt.location),

            TypedStmtKind::Empty => Ok(()),
        }
    }

    pub fn create_expression_generator(&mut self) -> ExpressionGenerator<'_> {
        ExpressionGenerator {
            ctx: self.ctx,
            module: self.module,
            program: self.program,
        }
    }

    /// Runs `f` with `targets` as the innermost loop. The loop stack is
    /// restored whether or not `f` succeeds.
    pub(super) fn with_loop<T>(
        &mut self,
        targets: LoopTargets,
        f: impl FnOnce(&mut Self) -> Result<T, CodegenError>,
    ) -> Result<T, CodegenError> {
        let depth = self.ctx.loop_stack.len();
        self.ctx.loop_stack.push(targets);
        let result = f(self);
        self.ctx.loop_stack.truncate(depth);
        result
    }
}
