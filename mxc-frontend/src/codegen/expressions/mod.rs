//! Expression code generation modules
//!
//! Three entry points share one generator:
//! - `generate` yields a value (register, immediate, string or global)
//! - `generate_address` yields the base and offset of a memory operand
//! - `generate_condition` ends control in one of two target blocks

mod literals;
mod identifiers;
mod binary_ops;
mod unary_ops;
mod conditions;
mod member_access;
mod assignments;
mod function_calls;
mod intrinsics;
mod new_ops;

pub use conditions::BranchTargets;

use mxc_common::SourceLocation;
use super::{CodegenError, FunctionContext, ProgramInfo};
use crate::ir::{IrBinaryOp, IrCompareOp, Module, Register, Value};
use crate::typed_ast::{TypedExpr, TypedExprKind, UnaryOp};

/// Memory operand: `*(base + offset)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub base: Value,
    pub offset: i64,
}

/// Where an assignable expression lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    Register(Register),
    Memory(Address),
}

/// Typed expression generator context
pub struct ExpressionGenerator<'a> {
    pub ctx: &'a mut FunctionContext,
    pub module: &'a mut Module,
    pub program: &'a ProgramInfo,
}

impl<'a> ExpressionGenerator<'a> {
    /// Generate IR for a typed expression in value mode
    pub fn generate(&mut self, expr: &TypedExpr) -> Result<Value, CodegenError> {
        match &expr.kind {
            TypedExprKind::IntLiteral(value) => Ok(Value::Imm(*value)),

            TypedExprKind::BoolLiteral(value) => Ok(Value::Imm(i64::from(*value))),

            TypedExprKind::StringLiteral(value) => Ok(literals::generate_string_literal(self, value)),

            TypedExprKind::NullLiteral => Ok(Value::Imm(0)),

            TypedExprKind::Identifier { name, storage } => {
                identifiers::generate_identifier(self, name, storage, &expr.location)
            }

            TypedExprKind::This => identifiers::this_value(self, &expr.location),

            TypedExprKind::Binary { op, .. } if op.is_logical() => conditions::materialize_condition(self, expr),

            TypedExprKind::Binary { op, left, right } => {
                binary_ops::generate_binary_operation(self, *op, left, right, &expr.location)
            }

            TypedExprKind::Unary { op: UnaryOp::LogicalNot, .. } => conditions::materialize_condition(self, expr),

            TypedExprKind::Unary { op, operand } => unary_ops::generate_unary_operation(self, *op, operand, &expr.location),

            TypedExprKind::Assign { lhs, rhs } => assignments::generate_assignment(self, lhs, rhs),

            TypedExprKind::Index { .. } | TypedExprKind::Member { .. } => member_access::generate_memory_load(self, expr),

            TypedExprKind::Call { target, arguments } => function_calls::generate_call(self, target, arguments, expr),

            TypedExprKind::NewClass { class } => new_ops::generate_new_class(self, class, &expr.location),

            TypedExprKind::NewArray { dimensions, .. } => new_ops::generate_new_array(self, dimensions, &expr.location),
        }
    }

    /// Generate the memory operand of an indexing, field or implicit
    /// member expression
    pub fn generate_address(&mut self, expr: &TypedExpr) -> Result<Address, CodegenError> {
        member_access::generate_address(self, expr)
    }

    /// Lower a boolean expression as a control-flow split
    pub fn generate_condition(&mut self, expr: &TypedExpr, targets: BranchTargets) -> Result<(), CodegenError> {
        conditions::generate_condition(self, expr, targets)
    }

    /// Resolve an assignment target
    pub fn generate_place(&mut self, expr: &TypedExpr) -> Result<Place, CodegenError> {
        if expr.is_memory_access() {
            return Ok(Place::Memory(self.generate_address(expr)?));
        }
        match &expr.kind {
            TypedExprKind::Identifier { name, storage } => {
                let reg = identifiers::identifier_register(self, name, storage, &expr.location)?;
                Ok(Place::Register(reg))
            }
            _ => Err(CodegenError::InvalidLvalue {
                location: expr.location.clone(),
            }),
        }
    }

    pub fn load_place(&mut self, place: Place) -> Value {
        match place {
            Place::Register(reg) => reg.into(),
            Place::Memory(addr) => self.ctx.builder.build_load(addr.base, addr.offset),
        }
    }

    pub fn store_to_place(&mut self, place: Place, value: Value) {
        match place {
            Place::Register(reg) => self.ctx.builder.build_move(reg, value),
            Place::Memory(addr) => self.ctx.builder.build_store(value, addr.base, addr.offset),
        }
    }

    /// Emit a binary operation, folding constants and canonicalizing
    /// operand order
    pub fn emit_binary(
        &mut self,
        op: IrBinaryOp,
        lhs: Value,
        rhs: Value,
        location: &SourceLocation,
    ) -> Result<Value, CodegenError> {
        binary_ops::emit_binary(self, op, lhs, rhs, location)
    }

    /// Emit a comparison, folding constants and canonicalizing operand
    /// order
    pub fn emit_compare(&mut self, op: IrCompareOp, lhs: Value, rhs: Value) -> Value {
        binary_ops::emit_compare(self, op, lhs, rhs)
    }
}
