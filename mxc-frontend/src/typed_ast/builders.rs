//! Helpers for building typed trees by hand
//!
//! Used by tests and by tools that synthesize small programs. Types are
//! filled in the way the resolver would: comparisons and logical operators
//! are `bool`, arithmetic takes the left operand's type.

use mxc_common::{LocalId, LoopId, SourceLocation};
use crate::types::Type;
use super::*;

pub fn loc() -> SourceLocation {
    SourceLocation::dummy()
}

fn expr(kind: TypedExprKind, ty: Type) -> TypedExpr {
    TypedExpr::new(kind, ty, loc())
}

fn stmt(kind: TypedStmtKind) -> TypedStmt {
    TypedStmt::new(kind, loc())
}

pub fn int(value: i64) -> TypedExpr {
    expr(TypedExprKind::IntLiteral(value), Type::Int)
}

pub fn boolean(value: bool) -> TypedExpr {
    expr(TypedExprKind::BoolLiteral(value), Type::Bool)
}

pub fn string(value: &str) -> TypedExpr {
    expr(TypedExprKind::StringLiteral(value.to_string()), Type::String)
}

pub fn null() -> TypedExpr {
    expr(TypedExprKind::NullLiteral, Type::Null)
}

pub fn local(name: &str, id: LocalId, ty: Type) -> TypedExpr {
    expr(
        TypedExprKind::Identifier { name: name.to_string(), storage: Storage::Local(id) },
        ty,
    )
}

pub fn global(name: &str, ty: Type) -> TypedExpr {
    expr(
        TypedExprKind::Identifier { name: name.to_string(), storage: Storage::Global },
        ty,
    )
}

/// A field of the enclosing class named without `this.`
pub fn member_field(name: &str, offset: i64, ty: Type) -> TypedExpr {
    expr(
        TypedExprKind::Identifier { name: name.to_string(), storage: Storage::Member { offset } },
        ty,
    )
}

pub fn this(class: &str) -> TypedExpr {
    expr(TypedExprKind::This, Type::Class(class.to_string()))
}

pub fn binary(op: BinaryOp, left: TypedExpr, right: TypedExpr) -> TypedExpr {
    let ty = if op.is_comparison() || op.is_logical() {
        Type::Bool
    } else {
        left.expr_type.clone()
    };
    expr(
        TypedExprKind::Binary { op, left: Box::new(left), right: Box::new(right) },
        ty,
    )
}

pub fn unary(op: UnaryOp, operand: TypedExpr) -> TypedExpr {
    let ty = if op == UnaryOp::LogicalNot { Type::Bool } else { operand.expr_type.clone() };
    expr(TypedExprKind::Unary { op, operand: Box::new(operand) }, ty)
}

pub fn assign(lhs: TypedExpr, rhs: TypedExpr) -> TypedExpr {
    let ty = lhs.expr_type.clone();
    expr(TypedExprKind::Assign { lhs: Box::new(lhs), rhs: Box::new(rhs) }, ty)
}

pub fn index(array: TypedExpr, idx: TypedExpr) -> TypedExpr {
    let ty = array.expr_type.element_type().cloned().unwrap_or(Type::Int);
    expr(TypedExprKind::Index { array: Box::new(array), index: Box::new(idx) }, ty)
}

pub fn member(object: TypedExpr, field: &str, offset: i64, ty: Type) -> TypedExpr {
    expr(
        TypedExprKind::Member { object: Box::new(object), field: field.to_string(), offset },
        ty,
    )
}

pub fn call(name: &str, arguments: Vec<TypedExpr>, return_type: Type) -> TypedExpr {
    expr(
        TypedExprKind::Call { target: CallTarget::Function { name: name.to_string() }, arguments },
        return_type,
    )
}

pub fn method_call(
    class: &str,
    name: &str,
    receiver: Option<TypedExpr>,
    arguments: Vec<TypedExpr>,
    return_type: Type,
) -> TypedExpr {
    expr(
        TypedExprKind::Call {
            target: CallTarget::Method {
                class: class.to_string(),
                name: name.to_string(),
                receiver: receiver.map(Box::new),
            },
            arguments,
        },
        return_type,
    )
}

pub fn intrinsic(intrinsic: Intrinsic, receiver: Option<TypedExpr>, arguments: Vec<TypedExpr>) -> TypedExpr {
    let ty = match intrinsic {
        Intrinsic::Print | Intrinsic::Println => Type::Void,
        Intrinsic::GetString | Intrinsic::ToString | Intrinsic::Substring => Type::String,
        Intrinsic::GetInt | Intrinsic::Length | Intrinsic::ParseInt | Intrinsic::Ord | Intrinsic::Size => Type::Int,
    };
    expr(
        TypedExprKind::Call {
            target: CallTarget::Intrinsic { intrinsic, receiver: receiver.map(Box::new) },
            arguments,
        },
        ty,
    )
}

pub fn new_class(class: &str) -> TypedExpr {
    expr(TypedExprKind::NewClass { class: class.to_string() }, Type::Class(class.to_string()))
}

pub fn new_array(base: Type, dimensions: Vec<TypedExpr>, total_dimensions: usize) -> TypedExpr {
    expr(
        TypedExprKind::NewArray { dimensions, total_dimensions },
        Type::array_of(base, total_dimensions),
    )
}

pub fn expr_stmt(e: TypedExpr) -> TypedStmt {
    stmt(TypedStmtKind::Expression(e))
}

pub fn var_decl(name: &str, id: LocalId, var_type: Type, initializer: Option<TypedExpr>) -> TypedStmt {
    stmt(TypedStmtKind::VarDecl { name: name.to_string(), id, var_type, initializer })
}

pub fn block(stmts: Vec<TypedStmt>) -> TypedStmt {
    stmt(TypedStmtKind::Block(stmts))
}

pub fn if_stmt(condition: TypedExpr, then_stmt: TypedStmt, else_stmt: Option<TypedStmt>) -> TypedStmt {
    stmt(TypedStmtKind::If {
        condition,
        then_stmt: Box::new(then_stmt),
        else_stmt: else_stmt.map(Box::new),
    })
}

pub fn while_stmt(condition: TypedExpr, body: TypedStmt) -> TypedStmt {
    stmt(TypedStmtKind::While { condition, body: Box::new(body) })
}

pub fn for_stmt(
    id: LoopId,
    init: Option<TypedStmt>,
    condition: Option<TypedExpr>,
    update: Option<TypedExpr>,
    body: TypedStmt,
) -> TypedStmt {
    stmt(TypedStmtKind::For {
        id,
        init: init.map(Box::new),
        condition,
        update,
        body: Box::new(body),
    })
}

pub fn return_stmt(value: Option<TypedExpr>) -> TypedStmt {
    stmt(TypedStmtKind::Return(value))
}

pub fn break_stmt() -> TypedStmt {
    stmt(TypedStmtKind::Break)
}

pub fn continue_stmt() -> TypedStmt {
    stmt(TypedStmtKind::Continue)
}

pub fn function(name: &str, return_type: Type, parameters: Vec<(&str, LocalId, Type)>, body: Vec<TypedStmt>) -> TypedFunction {
    TypedFunction {
        name: name.to_string(),
        return_type,
        parameters: parameters
            .into_iter()
            .map(|(name, id, param_type)| TypedParameter { name: name.to_string(), id, param_type })
            .collect(),
        body,
        location: loc(),
    }
}

pub fn global_var(name: &str, var_type: Type, initializer: Option<TypedExpr>) -> TypedTopLevelItem {
    TypedTopLevelItem::GlobalVariable(TypedGlobal {
        name: name.to_string(),
        var_type,
        initializer,
        location: loc(),
    })
}

pub fn class(name: &str, size: i64, methods: Vec<TypedFunction>) -> TypedTopLevelItem {
    TypedTopLevelItem::Class(TypedClass { name: name.to_string(), size, methods, location: loc() })
}

/// A program with a single `int main()` around `body`
pub fn main_program(body: Vec<TypedStmt>) -> TypedProgram {
    TypedProgram::new(vec![TypedTopLevelItem::Function(function("main", Type::Int, vec![], body))])
}
