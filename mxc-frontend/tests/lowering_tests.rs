//! End-to-end tests of typed AST to IR lowering

mod common;

use common::*;
use mxc_frontend::codegen::{method_symbol, CodegenError, FaultKind, GLOBAL_INIT_FUNCTION};
use mxc_frontend::ir::{Builtin, Instruction, IrBinaryOp, IrCompareOp, Register, Value};
use mxc_frontend::typed_ast::builders::*;
use mxc_frontend::typed_ast::{BinaryOp, Intrinsic, TypedProgram, TypedTopLevelItem, UnaryOp};
use mxc_frontend::Type;
use pretty_assertions::assert_eq;

fn program(items: Vec<TypedTopLevelItem>) -> TypedProgram {
    TypedProgram::new(items)
}

fn func_item(f: mxc_frontend::typed_ast::TypedFunction) -> TypedTopLevelItem {
    TypedTopLevelItem::Function(f)
}

fn returned_value(module: &mxc_frontend::ir::Module, name: &str) -> Option<Value> {
    let f = lowered(module, name);
    match terminator(f, f.exit.expect("no exit")) {
        Instruction::Return(value) => *value,
        other => panic!("exit ends in {:?}", other),
    }
}

#[test]
fn test_integer_constants_fold_without_instructions() {
    let module = lower(&main_program(vec![return_stmt(Some(binary(BinaryOp::Div, int(7), int(2))))]));
    assert_eq!(returned_value(&module, "main"), Some(Value::Imm(3)));
    let main = lowered(&module, "main");
    assert!(!instructions(main).iter().any(|i| matches!(i, Instruction::Binary { .. })));

    let module = lower(&main_program(vec![return_stmt(Some(binary(BinaryOp::Mod, int(7), int(-2))))]));
    assert_eq!(returned_value(&module, "main"), Some(Value::Imm(1)));

    let module = lower(&main_program(vec![return_stmt(Some(binary(
        BinaryOp::Add,
        binary(BinaryOp::Mul, int(6), int(7)),
        binary(BinaryOp::LeftShift, int(1), int(3)),
    )))]));
    assert_eq!(returned_value(&module, "main"), Some(Value::Imm(50)));
    assert!(!module.has_div_shift);
}

#[test]
fn test_comparison_of_constants_folds() {
    let cond = binary(BinaryOp::Less, int(1), int(2));
    let module = lower(&main_program(vec![
        var_decl("b", 0, Type::Bool, Some(cond)),
        return_stmt(Some(int(0))),
    ]));
    let main = lowered(&module, "main");
    assert!(instructions(main).iter().any(|i| matches!(i, Instruction::Move { src: Value::Imm(1), .. })));
    assert!(!instructions(main).iter().any(|i| matches!(i, Instruction::Compare { .. })));
}

#[test]
fn test_constant_division_by_zero_is_fatal() {
    let err = lower_err(&main_program(vec![return_stmt(Some(binary(BinaryOp::Div, int(1), int(0))))]));
    assert!(matches!(err, CodegenError::DivisionByZero { .. }));
    assert_eq!(err.kind(), FaultKind::ConstantEvaluation);

    let f = function_item_with_param(vec![return_stmt(Some(binary(BinaryOp::Mod, local("x", 0, Type::Int), int(0))))]);
    let err = lower_err(&program(vec![f]));
    assert_eq!(err.kind(), FaultKind::ConstantEvaluation);
}

fn function_item_with_param(body: Vec<mxc_frontend::typed_ast::TypedStmt>) -> TypedTopLevelItem {
    func_item(function("f", Type::Int, vec![("x", 0, Type::Int)], body))
}

#[test]
fn test_constant_operand_canonicalization() {
    let x = || local("x", 0, Type::Int);
    let module = lower(&program(vec![
        func_item(function("sub", Type::Int, vec![("x", 0, Type::Int)], vec![return_stmt(Some(binary(BinaryOp::Sub, int(3), x())))])),
        func_item(function("add", Type::Int, vec![("x", 0, Type::Int)], vec![return_stmt(Some(binary(BinaryOp::Add, int(3), x())))])),
        func_item(function("lt", Type::Bool, vec![("x", 0, Type::Int)], vec![return_stmt(Some(binary(BinaryOp::Less, int(3), x())))])),
        func_item(function("ge", Type::Bool, vec![("x", 0, Type::Int)], vec![return_stmt(Some(binary(BinaryOp::GreaterEqual, int(3), x())))])),
    ]));

    let param = |name: &str| Value::Reg(lowered(&module, name).parameters[0]);

    let sub = instructions(lowered(&module, "sub"));
    assert!(sub.iter().any(|i| matches!(i, Instruction::Binary { op: IrBinaryOp::Sub, lhs: Value::Imm(3), rhs, .. } if *rhs == param("sub"))));

    let add = instructions(lowered(&module, "add"));
    assert!(add.iter().any(|i| matches!(i, Instruction::Binary { op: IrBinaryOp::Add, lhs, rhs: Value::Imm(3), .. } if *lhs == param("add"))));

    let lt = instructions(lowered(&module, "lt"));
    assert!(lt.iter().any(|i| matches!(i, Instruction::Compare { op: IrCompareOp::Gt, lhs, rhs: Value::Imm(3), .. } if *lhs == param("lt"))));

    let ge = instructions(lowered(&module, "ge"));
    assert!(ge.iter().any(|i| matches!(i, Instruction::Compare { op: IrCompareOp::Le, lhs, rhs: Value::Imm(3), .. } if *lhs == param("ge"))));
}

#[test]
fn test_div_shift_flag() {
    let module = lower(&program(vec![function_item_with_param(vec![return_stmt(Some(binary(
        BinaryOp::RightShift,
        local("x", 0, Type::Int),
        int(1),
    )))])]));
    assert!(module.has_div_shift);
}

#[test]
fn test_string_literals_are_interned_once() {
    let module = lower(&program(vec![
        func_item(function("greet", Type::String, vec![], vec![return_stmt(Some(string("hello")))])),
        func_item(function("main", Type::Int, vec![], vec![
            var_decl("s", 0, Type::String, Some(string("hello"))),
            return_stmt(Some(int(0))),
        ])),
    ]));
    assert_eq!(module.static_strings.len(), 1);
    let id = module.static_strings[0].id;
    assert_eq!(returned_value(&module, "greet"), Some(Value::Str(id)));
    let main = lowered(&module, "main");
    assert!(instructions(main).iter().any(|i| matches!(i, Instruction::Move { src: Value::Str(s), .. } if *s == id)));
}

#[test]
fn test_static_string_folding() {
    let module = lower(&program(vec![
        func_item(function("cat", Type::String, vec![], vec![return_stmt(Some(binary(BinaryOp::Add, string("foo"), string("bar"))))])),
        func_item(function("cmp", Type::Bool, vec![], vec![return_stmt(Some(binary(BinaryOp::Greater, string("b"), string("abc"))))])),
    ]));
    let folded = match returned_value(&module, "cat") {
        Some(Value::Str(id)) => module.static_string(id).map(str::to_string),
        other => panic!("expected a pooled string, got {:?}", other),
    };
    assert_eq!(folded.as_deref(), Some("foobar"));
    assert_eq!(returned_value(&module, "cmp"), Some(Value::Imm(1)));
    assert!(instructions(lowered(&module, "cat")).iter().all(|i| !matches!(i, Instruction::Call { .. })));
}

fn folded_string_comparison(op: BinaryOp, lhs: &str, rhs: &str) -> Option<Value> {
    let module = lower(&program(vec![func_item(function(
        "cmp",
        Type::Bool,
        vec![],
        vec![return_stmt(Some(binary(op, string(lhs), string(rhs))))],
    ))]));
    assert!(calls_in(&module, "cmp").is_empty(), "{} {} {} was not folded", lhs, op, rhs);
    returned_value(&module, "cmp")
}

#[test]
fn test_static_string_comparisons_order_bytewise() {
    let cases = [
        (BinaryOp::Less, "ab", "abc", 1),
        (BinaryOp::LessEqual, "abc", "ab", 0),
        (BinaryOp::Greater, "abc", "ab", 1),
        (BinaryOp::Equal, "abc", "abc", 1),
        (BinaryOp::NotEqual, "abc", "abc", 0),
        (BinaryOp::GreaterEqual, "abc", "abc", 1),
        (BinaryOp::Less, "abc", "abc", 0),
        (BinaryOp::Less, "", "a", 1),
        (BinaryOp::Equal, "", "", 1),
        (BinaryOp::GreaterEqual, "", "a", 0),
        // 0xC3 0xA9 sorts after 'z' (0x7A)
        (BinaryOp::Greater, "\u{e9}", "z", 1),
        (BinaryOp::Less, "Z", "a", 1),
    ];
    for (op, lhs, rhs, expected) in cases {
        assert_eq!(
            folded_string_comparison(op, lhs, rhs),
            Some(Value::Imm(expected)),
            "{:?} {} {:?}",
            lhs,
            op,
            rhs
        );
    }
}

#[test]
fn test_static_concat_with_empty_string() {
    let module = lower(&program(vec![func_item(function(
        "cat",
        Type::String,
        vec![],
        vec![return_stmt(Some(binary(BinaryOp::Add, string(""), string("x"))))],
    ))]));
    let folded = match returned_value(&module, "cat") {
        Some(Value::Str(id)) => module.static_string(id),
        other => panic!("expected a pooled string, got {:?}", other),
    };
    assert_eq!(folded, Some("x"));
}

#[test]
fn test_runtime_string_operations_call_builtins() {
    let s = || local("s", 0, Type::String);
    let t = || local("t", 1, Type::String);
    let params = || vec![("s", 0, Type::String), ("t", 1, Type::String)];
    let module = lower(&program(vec![
        func_item(function("cat", Type::String, params(), vec![return_stmt(Some(binary(BinaryOp::Add, s(), t())))])),
        func_item(function("gt", Type::Bool, params(), vec![return_stmt(Some(binary(BinaryOp::Greater, s(), t())))])),
    ]));

    let cat = lowered(&module, "cat");
    let (ps, pt) = (Value::Reg(cat.parameters[0]), Value::Reg(cat.parameters[1]));
    let concat = module.builtin(Builtin::StringConcat);
    assert!(instructions(cat).iter().any(|i| matches!(i, Instruction::Call { callee, args, dst: Some(_) } if *callee == concat && *args == vec![ps, pt])));

    let gt = lowered(&module, "gt");
    let (ps, pt) = (Value::Reg(gt.parameters[0]), Value::Reg(gt.parameters[1]));
    let less = module.builtin(Builtin::StringLess);
    assert!(instructions(gt).iter().any(|i| matches!(i, Instruction::Call { callee, args, .. } if *callee == less && *args == vec![pt, ps])));
}

fn calls_in(module: &mxc_frontend::ir::Module, name: &str) -> Vec<(u32, Vec<Value>)> {
    instructions(lowered(module, name))
        .into_iter()
        .filter_map(|i| match i {
            Instruction::Call { callee, args, .. } => Some((*callee, args.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_print_of_concatenation_is_split() {
    let s = local("s", 0, Type::String);
    let arg = binary(BinaryOp::Add, binary(BinaryOp::Add, string("a"), s), string("b"));
    let module = lower(&program(vec![func_item(function(
        "show",
        Type::Void,
        vec![("s", 0, Type::String)],
        vec![expr_stmt(intrinsic(Intrinsic::Println, None, vec![arg]))],
    ))]));

    let show = lowered(&module, "show");
    let callees: Vec<u32> = calls_in(&module, "show").into_iter().map(|(c, _)| c).collect();
    assert_eq!(
        callees,
        vec![module.builtin(Builtin::Print), module.builtin(Builtin::Print), module.builtin(Builtin::Println)]
    );
    let calls = calls_in(&module, "show");
    assert_eq!(calls[1].1, vec![Value::Reg(show.parameters[0])]);
    assert!(!callees.contains(&module.builtin(Builtin::StringConcat)));
}

#[test]
fn test_print_to_string_uses_print_int() {
    let n = local("n", 0, Type::Int);
    let module = lower(&program(vec![func_item(function(
        "show",
        Type::Void,
        vec![("n", 0, Type::Int)],
        vec![
            expr_stmt(intrinsic(Intrinsic::Print, None, vec![intrinsic(Intrinsic::ToString, None, vec![n.clone()])])),
            expr_stmt(intrinsic(Intrinsic::Println, None, vec![intrinsic(Intrinsic::ToString, None, vec![n])])),
        ],
    ))]));
    let callees: Vec<u32> = calls_in(&module, "show").into_iter().map(|(c, _)| c).collect();
    assert_eq!(callees, vec![module.builtin(Builtin::PrintInt), module.builtin(Builtin::PrintlnInt)]);
}

#[test]
fn test_user_function_named_like_builtin_stays_separate() {
    let module = lower(&program(vec![
        func_item(function(
            "printInt",
            Type::Void,
            vec![("x", 0, Type::Int)],
            vec![expr_stmt(intrinsic(Intrinsic::Print, None, vec![string("custom")]))],
        )),
        func_item(function("main", Type::Int, vec![], vec![
            expr_stmt(intrinsic(Intrinsic::Print, None, vec![intrinsic(Intrinsic::ToString, None, vec![int(5)])])),
            expr_stmt(call("printInt", vec![int(3)], Type::Void)),
            return_stmt(Some(int(0))),
        ])),
    ]));

    let user = lowered(&module, "printInt");
    assert!(!user.is_builtin());
    assert_eq!(user.linkage_name(), "printInt");
    assert_eq!(user.parameters.len(), 1);
    assert!(module.user_functions().any(|f| f.id == user.id));

    let runtime = module.builtin(Builtin::PrintInt);
    assert_ne!(user.id, runtime);
    let runtime_fn = module.function(runtime);
    assert!(runtime_fn.is_builtin());
    assert!(runtime_fn.blocks.is_empty());
    assert_eq!(runtime_fn.linkage_name(), "__mx_printInt");

    let init = module.function_id(GLOBAL_INIT_FUNCTION).unwrap();
    assert_eq!(
        calls_in(&module, "main"),
        vec![(init, vec![]), (runtime, vec![Value::Imm(5)]), (user.id, vec![Value::Imm(3)])]
    );
    assert_well_formed(&module);
}

#[test]
fn test_print_int_fast_path_can_be_disabled() {
    use mxc_frontend::codegen::{CodegenOptions, IrGenerator};
    let prog = program(vec![func_item(function(
        "show",
        Type::Void,
        vec![],
        vec![expr_stmt(intrinsic(Intrinsic::Print, None, vec![intrinsic(Intrinsic::ToString, None, vec![int(4)])]))],
    ))]);
    let options = CodegenOptions { print_int_fast_path: false, ..CodegenOptions::default() };
    let module = IrGenerator::with_options("test".to_string(), options).generate(&prog).unwrap();
    let callees: Vec<u32> = calls_in(&module, "show").into_iter().map(|(c, _)| c).collect();
    assert_eq!(callees, vec![module.builtin(Builtin::ToString), module.builtin(Builtin::Print)]);
}

#[test]
fn test_string_members_pass_receiver_first() {
    let s = || local("s", 0, Type::String);
    let module = lower(&program(vec![func_item(function(
        "f",
        Type::Int,
        vec![("s", 0, Type::String)],
        vec![
            expr_stmt(intrinsic(Intrinsic::Substring, Some(s()), vec![int(1), int(3)])),
            return_stmt(Some(intrinsic(Intrinsic::Length, Some(s()), vec![]))),
        ],
    ))]));
    let f = lowered(&module, "f");
    let this = Value::Reg(f.parameters[0]);
    let calls = calls_in(&module, "f");
    assert_eq!(calls, vec![(module.builtin(Builtin::StringSubstring), vec![this, Value::Imm(1), Value::Imm(3)])]);
    assert!(instructions(f).iter().any(|i| matches!(i, Instruction::Load { base, offset: 0, .. } if *base == this)));
}

#[test]
fn test_short_circuit_and_skips_rhs_on_false() {
    let x = local("x", 0, Type::Int);
    let cond = binary(BinaryOp::LogicalAnd, binary(BinaryOp::Less, x, int(1)), boolean(true));
    let module = lower(&program(vec![func_item(function(
        "f",
        Type::Int,
        vec![("x", 0, Type::Int)],
        vec![
            if_stmt(cond, return_stmt(Some(int(1))), None),
            return_stmt(Some(int(2))),
        ],
    ))]));
    let f = lowered(&module, "f");
    let rhs = block_labelled(f, "and_rhs").id;
    let then_block = block_labelled(f, "if_then").id;
    let after = block_labelled(f, "if_after").id;

    match terminator(f, f.entry.unwrap()) {
        Instruction::CondJump { then_block: t, else_block: e, .. } => {
            assert_eq!(*t, rhs);
            assert_eq!(*e, after);
        }
        other => panic!("entry should branch, got {:?}", other),
    }
    assert_eq!(terminator(f, rhs), &Instruction::Jump(then_block));
}

#[test]
fn test_short_circuit_or_and_not() {
    let x = || local("x", 0, Type::Int);
    let cond = binary(
        BinaryOp::LogicalOr,
        unary(UnaryOp::LogicalNot, binary(BinaryOp::Equal, x(), int(0))),
        binary(BinaryOp::Greater, x(), int(5)),
    );
    let module = lower(&program(vec![func_item(function(
        "f",
        Type::Int,
        vec![("x", 0, Type::Int)],
        vec![if_stmt(cond, return_stmt(Some(int(1))), Some(return_stmt(Some(int(2)))))],
    ))]));
    let f = lowered(&module, "f");
    let rhs = block_labelled(f, "or_rhs").id;
    let then_block = block_labelled(f, "if_then").id;
    let else_block = block_labelled(f, "if_else").id;

    // `!(x == 0)` swaps the targets of the comparison
    match terminator(f, f.entry.unwrap()) {
        Instruction::CondJump { then_block: t, else_block: e, .. } => {
            assert_eq!((*t, *e), (rhs, then_block));
        }
        other => panic!("entry should branch, got {:?}", other),
    }
    match terminator(f, rhs) {
        Instruction::CondJump { then_block: t, else_block: e, .. } => assert_eq!((*t, *e), (then_block, else_block)),
        other => panic!("rhs should branch, got {:?}", other),
    }
    assert_well_formed(&module);
}

#[test]
fn test_logical_operator_in_value_position_is_materialized() {
    let cond = binary(
        BinaryOp::LogicalAnd,
        binary(BinaryOp::Less, local("x", 0, Type::Int), int(1)),
        binary(BinaryOp::Less, local("y", 1, Type::Int), int(2)),
    );
    let module = lower(&program(vec![func_item(function(
        "f",
        Type::Bool,
        vec![("x", 0, Type::Int), ("y", 1, Type::Int)],
        vec![return_stmt(Some(cond))],
    ))]));
    let f = lowered(&module, "f");
    let t = block_labelled(f, "bool_true");
    let e = block_labelled(f, "bool_false");
    let merge = block_labelled(f, "bool_merge").id;
    let dst = match &t.instructions[0].instruction {
        Instruction::Move { dst, src: Value::Imm(1) } => *dst,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(e.instructions[0].instruction, Instruction::Move { dst, src: Value::Imm(0) });
    assert_eq!(terminator(f, t.id), &Instruction::Jump(merge));
    assert_eq!(returned_value(&module, "f"), Some(dst.into()));
}

#[test]
fn test_empty_for_collapses_to_body_and_after() {
    let module = lower(&main_program(vec![for_stmt(3, None, None, None, block(vec![]))]));
    let main = lowered(&module, "main");
    assert_eq!(main.blocks.len(), 3);
    let body = block_labelled(main, "for_body").id;
    let after = block_labelled(main, "for_after").id;
    assert_eq!(terminator(main, main.entry.unwrap()), &Instruction::Jump(body));
    assert_eq!(terminator(main, body), &Instruction::Jump(body));
    assert!(!instructions(main).iter().any(|i| matches!(i, Instruction::Compare { .. })));

    let record = module.loop_record(3).copied().unwrap();
    assert_eq!((record.cond, record.incr, record.body, record.after), (body, body, body, after));
    assert_eq!(record.function, main.id);
    assert_eq!(main.block(after).for_loop, Some(3));
}

#[test]
fn test_full_for_loop_blocks_and_continue() {
    let i = || local("i", 0, Type::Int);
    let body = block(vec![
        if_stmt(binary(BinaryOp::Equal, i(), int(2)), continue_stmt(), None),
        if_stmt(binary(BinaryOp::Equal, i(), int(7)), break_stmt(), None),
    ]);
    let module = lower(&main_program(vec![
        for_stmt(
            0,
            Some(var_decl("i", 0, Type::Int, Some(int(0)))),
            Some(binary(BinaryOp::Less, i(), int(10))),
            Some(unary(UnaryOp::PreIncrement, i())),
            body,
        ),
        return_stmt(Some(int(0))),
    ]));
    let main = lowered(&module, "main");
    let record = *module.loop_record(0).unwrap();
    assert_eq!(main.block(record.cond).label, "for_cond");
    assert_eq!(main.block(record.incr).label, "for_incr");
    assert_eq!(terminator(main, record.incr), &Instruction::Jump(record.cond));
    match terminator(main, record.cond) {
        Instruction::CondJump { then_block, else_block, .. } => {
            assert_eq!((*then_block, *else_block), (record.body, record.after));
        }
        other => panic!("unexpected {:?}", other),
    }

    let jumps_to = |target: u32| {
        main.blocks
            .iter()
            .filter(|b| b.label == "if_then" && b.terminator.as_ref().map(|q| &q.instruction) == Some(&Instruction::Jump(target)))
            .count()
    };
    assert_eq!(jumps_to(record.incr), 1);
    assert_eq!(jumps_to(record.after), 1);
    assert_well_formed(&module);
}

#[test]
fn test_while_loop_structure() {
    let x = || local("x", 0, Type::Int);
    let module = lower(&program(vec![func_item(function(
        "count",
        Type::Void,
        vec![("x", 0, Type::Int)],
        vec![while_stmt(
            binary(BinaryOp::Greater, x(), int(0)),
            expr_stmt(unary(UnaryOp::PostDecrement, x())),
        )],
    ))]));
    let f = lowered(&module, "count");
    let cond = block_labelled(f, "while_cond").id;
    let body = block_labelled(f, "while_body").id;
    let after = block_labelled(f, "while_after").id;
    assert_eq!(terminator(f, f.entry.unwrap()), &Instruction::Jump(cond));
    assert_eq!(terminator(f, body), &Instruction::Jump(cond));
    assert_eq!(terminator(f, after), &Instruction::Return(None));
    assert_eq!(f.block(cond).predecessors.len(), 2);
}

#[test]
fn test_three_returns_merge_into_one_exit() {
    let x = || local("x", 0, Type::Int);
    let body = vec![
        if_stmt(binary(BinaryOp::Less, x(), int(0)), return_stmt(Some(int(-1))), None),
        if_stmt(binary(BinaryOp::Equal, x(), int(0)), return_stmt(Some(int(0))), None),
        return_stmt(Some(int(1))),
    ];
    let module = lower(&program(vec![func_item(function("sign", Type::Int, vec![("x", 0, Type::Int)], body))]));
    let f = lowered(&module, "sign");

    let exit = f.exit.unwrap();
    assert_eq!(f.block(exit).label, "sign_exit");
    let result = match terminator(f, exit) {
        Instruction::Return(Some(Value::Reg(r))) => *r,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(f.registers[result as usize].name.as_deref(), Some("return_value"));

    let feeders: Vec<i64> = f
        .blocks
        .iter()
        .filter(|b| b.terminator.as_ref().map(|q| &q.instruction) == Some(&Instruction::Jump(exit)))
        .map(|b| match &b.instructions.last().unwrap().instruction {
            Instruction::Move { dst, src: Value::Imm(v) } if dst.as_virtual() == Some(result) => *v,
            other => panic!("unexpected {:?}", other),
        })
        .collect();
    let mut sorted = feeders.clone();
    sorted.sort();
    assert_eq!(sorted, vec![-1, 0, 1]);
    assert_well_formed(&module);
}

#[test]
fn test_join_after_returning_arms_is_closed_and_merged() {
    let body = vec![if_stmt(
        binary(BinaryOp::Less, local("x", 0, Type::Int), int(0)),
        return_stmt(Some(int(1))),
        Some(return_stmt(Some(int(2)))),
    )];
    let module = lower(&program(vec![function_item_with_param(body)]));
    let f = lowered(&module, "f");
    let after = block_labelled(f, "if_after");
    assert!(!f.is_reachable(after.id));
    assert_eq!(f.block(f.exit.unwrap()).label, "f_exit");
    assert_well_formed(&module);
}

#[test]
fn test_void_function_gets_implicit_return() {
    let module = lower(&program(vec![func_item(function("noop", Type::Void, vec![], vec![]))]));
    let f = lowered(&module, "noop");
    assert_eq!(f.blocks.len(), 1);
    assert_eq!(terminator(f, f.entry.unwrap()), &Instruction::Return(None));
}

#[test]
fn test_main_falls_through_returning_zero() {
    let module = lower(&main_program(vec![]));
    assert_eq!(returned_value(&module, "main"), Some(Value::Imm(0)));
}

#[test]
fn test_missing_return_is_fatal() {
    let body = vec![if_stmt(binary(BinaryOp::Less, local("x", 0, Type::Int), int(0)), return_stmt(Some(int(1))), None)];
    let err = lower_err(&program(vec![function_item_with_param(body)]));
    assert!(matches!(err, CodegenError::MissingReturn { ref function, .. } if function == "f"));
    assert_eq!(err.kind(), FaultKind::ConsistencyViolation);
}

#[test]
fn test_statements_after_return_are_skipped() {
    let module = lower(&main_program(vec![
        return_stmt(Some(int(1))),
        expr_stmt(intrinsic(Intrinsic::Print, None, vec![string("dead")])),
    ]));
    assert!(module.static_strings.is_empty());
    assert_eq!(returned_value(&module, "main"), Some(Value::Imm(1)));
}

#[test]
fn test_break_and_continue_outside_loop_are_fatal() {
    let err = lower_err(&main_program(vec![break_stmt()]));
    assert!(matches!(err, CodegenError::BreakOutsideLoop { .. }));
    let err = lower_err(&main_program(vec![continue_stmt()]));
    assert!(matches!(err, CodegenError::ContinueOutsideLoop { .. }));
    assert_eq!(err.kind(), FaultKind::ConsistencyViolation);
}

#[test]
fn test_this_outside_class_is_fatal() {
    let err = lower_err(&main_program(vec![while_stmt(boolean(true), expr_stmt(this("A")))]));
    assert!(matches!(err, CodegenError::ThisOutsideClass { .. }));
}

#[test]
fn test_lookup_faults() {
    let err = lower_err(&main_program(vec![expr_stmt(call("missing", vec![], Type::Void))]));
    assert!(matches!(err, CodegenError::UndefinedFunction { ref name, .. } if name == "missing"));
    assert_eq!(err.kind(), FaultKind::Lookup);

    let err = lower_err(&main_program(vec![return_stmt(Some(global("g", Type::Int)))]));
    assert!(matches!(err, CodegenError::UndefinedGlobal { .. }));

    let err = lower_err(&main_program(vec![expr_stmt(new_class("Ghost"))]));
    assert!(matches!(err, CodegenError::UndefinedClass { .. }));
}

#[test]
fn test_expression_generator_on_a_bare_function() {
    use mxc_frontend::codegen::expressions::ExpressionGenerator;
    use mxc_frontend::codegen::{CodegenOptions, FunctionContext, ProgramInfo};
    use mxc_frontend::ir::{IrBuilder, Module};
    use std::collections::HashMap;

    let mut module = Module::new("test".to_string());
    let id = module.declare_function("f", true);
    let info = ProgramInfo { classes: HashMap::new(), options: CodegenOptions::default(), init_function: id };
    let mut ctx = FunctionContext::new(IrBuilder::new(module.take_function(id)), Type::Int);
    let mut gen = ExpressionGenerator { ctx: &mut ctx, module: &mut module, program: &info };

    // a logical operator in value position is materialized, not rejected
    let value = gen.generate(&binary(BinaryOp::LogicalOr, boolean(false), boolean(true))).unwrap();
    assert!(matches!(value, Value::Reg(_)));

    let err = gen
        .emit_binary(IrBinaryOp::Div, Value::Reg(0), Value::Imm(0), &loc())
        .unwrap_err();
    assert!(matches!(err, CodegenError::DivisionByZero { .. }));
}

#[test]
fn test_globals_are_laid_out_and_initialized_before_main() {
    let module = lower(&program(vec![
        global_var("a", Type::Int, Some(int(1))),
        func_item(function("main", Type::Int, vec![], vec![return_stmt(Some(global("c", Type::Int)))])),
        global_var("b", Type::Int, None),
        global_var("c", Type::Int, Some(binary(BinaryOp::Add, global("a", Type::Int), int(2)))),
    ]));

    let names: Vec<_> = module.static_data.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert!(module.static_data.iter().all(|d| d.size == 8));

    let init = lowered(&module, GLOBAL_INIT_FUNCTION);
    let init_code = instructions(init);
    assert_eq!(init_code[0], &Instruction::Move { dst: Register::Static(0), src: Value::Imm(1) });
    assert!(matches!(
        init_code[1],
        Instruction::Binary { op: IrBinaryOp::Add, lhs: Value::Static(0), rhs: Value::Imm(2), .. }
    ));
    assert!(matches!(init_code[2], Instruction::Move { dst: Register::Static(2), .. }));

    let main = lowered(&module, "main");
    let first = &main.block(main.entry.unwrap()).instructions[0].instruction;
    assert_eq!(first, &Instruction::Call { callee: init.id, args: vec![], dst: None });
    assert_eq!(returned_value(&module, "main"), Some(Value::Static(2)));
    assert_well_formed(&module);
}

#[test]
fn test_init_function_exists_without_globals() {
    let module = lower(&main_program(vec![]));
    let init = lowered(&module, GLOBAL_INIT_FUNCTION);
    assert_eq!(instructions(init), vec![&Instruction::Return(None)]);
}

#[test]
fn test_new_class_calls_constructor() {
    let ctor = function("Point", Type::Void, vec![], vec![expr_stmt(assign(member_field("x", 0, Type::Int), int(5)))]);
    let module = lower(&program(vec![
        class("Point", 16, vec![ctor]),
        class("Bare", 8, vec![]),
        func_item(function("main", Type::Int, vec![], vec![
            var_decl("p", 0, Type::Class("Point".to_string()), Some(new_class("Point"))),
            var_decl("q", 1, Type::Class("Bare".to_string()), Some(new_class("Bare"))),
            return_stmt(Some(int(0))),
        ])),
    ]));

    let ctor_id = module.function_id(&method_symbol("Point", "Point")).unwrap();
    let main = lowered(&module, "main");
    let code = instructions(main);
    let alloc = code
        .iter()
        .position(|i| matches!(i, Instruction::HeapAlloc { size: Value::Imm(16), .. }))
        .unwrap();
    let object = code[alloc].defined_register().unwrap();
    assert_eq!(code[alloc + 1], &Instruction::Call { callee: ctor_id, args: vec![object.into()], dst: None });
    assert!(code.iter().any(|i| matches!(i, Instruction::HeapAlloc { size: Value::Imm(8), .. })));
    assert_eq!(calls_in(&module, "main").len(), 2);

    let ctor_fn = lowered(&module, "Point.Point");
    let this = Value::Reg(ctor_fn.parameters[0]);
    assert!(instructions(ctor_fn)
        .iter()
        .any(|i| matches!(i, Instruction::Store { value: Value::Imm(5), base, offset: 0, .. } if *base == this)));
}

#[test]
fn test_methods_receive_this_and_read_members() {
    let get = function("get", Type::Int, vec![], vec![return_stmt(Some(member_field("v", 8, Type::Int)))]);
    let obj_ty = Type::Class("Box".to_string());
    let module = lower(&program(vec![
        class("Box", 16, vec![get]),
        func_item(function("read", Type::Int, vec![("b", 0, obj_ty.clone())], vec![return_stmt(Some(method_call(
            "Box",
            "get",
            Some(local("b", 0, obj_ty)),
            vec![],
            Type::Int,
        )))])),
    ]));

    let get_fn = lowered(&module, "Box.get");
    assert_eq!(get_fn.parameters.len(), 1);
    let this = Value::Reg(get_fn.parameters[0]);
    assert!(instructions(get_fn).iter().any(|i| matches!(i, Instruction::Load { base, offset: 8, .. } if *base == this)));

    let read = lowered(&module, "read");
    let calls = calls_in(&module, "read");
    assert_eq!(calls, vec![(get_fn.id, vec![Value::Reg(read.parameters[0])])]);
}

#[test]
fn test_array_indexing_reads_and_writes_memory() {
    let arr_ty = Type::array_of(Type::Int, 1);
    let a = || local("a", 0, arr_ty.clone());
    let i = || local("i", 1, Type::Int);
    let module = lower(&program(vec![func_item(function(
        "poke",
        Type::Int,
        vec![("a", 0, arr_ty.clone()), ("i", 1, Type::Int)],
        vec![
            expr_stmt(assign(index(a(), i()), int(5))),
            return_stmt(Some(intrinsic(Intrinsic::Size, Some(a()), vec![]))),
        ],
    ))]));
    let f = lowered(&module, "poke");
    let (pa, pi) = (Value::Reg(f.parameters[0]), Value::Reg(f.parameters[1]));
    let code = instructions(f);

    let scaled = match code[0] {
        Instruction::Binary { dst, op: IrBinaryOp::Mul, lhs, rhs: Value::Imm(8) } if *lhs == pi => Value::from(*dst),
        other => panic!("unexpected {:?}", other),
    };
    let element = match code[1] {
        Instruction::Binary { dst, op: IrBinaryOp::Add, lhs, rhs } if *lhs == pa && *rhs == scaled => Value::from(*dst),
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(code[2], &Instruction::Store { value: Value::Imm(5), size: 8, base: element, offset: 8 });
    assert!(matches!(code[3], Instruction::Load { base, offset: 0, .. } if *base == pa));
}

#[test]
fn test_constant_index_folds_address_arithmetic() {
    let arr_ty = Type::array_of(Type::Int, 1);
    let module = lower(&program(vec![func_item(function(
        "first",
        Type::Int,
        vec![("a", 0, arr_ty.clone())],
        vec![return_stmt(Some(index(local("a", 0, arr_ty), int(2))))],
    ))]));
    let f = lowered(&module, "first");
    let code = instructions(f);
    assert!(matches!(code[0], Instruction::Binary { op: IrBinaryOp::Add, rhs: Value::Imm(16), .. }));
    assert!(matches!(code[1], Instruction::Load { offset: 8, .. }));
}

#[test]
fn test_multi_dimensional_new_array() {
    let n = || local("n", 0, Type::Int);
    let module = lower(&program(vec![func_item(function(
        "grid",
        Type::array_of(Type::Int, 3),
        vec![("n", 0, Type::Int)],
        vec![return_stmt(Some(new_array(Type::Int, vec![n(), int(4)], 3)))],
    ))]));
    let f = lowered(&module, "grid");
    let pn = Value::Reg(f.parameters[0]);
    let code = instructions(f);

    let allocs: Vec<_> = code.iter().filter(|i| matches!(i, Instruction::HeapAlloc { .. })).collect();
    assert_eq!(allocs.len(), 2);
    // inner dimension has a constant size: 4 * 8 + 8
    assert!(matches!(allocs[1], Instruction::HeapAlloc { size: Value::Imm(40), .. }));
    assert!(code.iter().any(|i| matches!(i, Instruction::Store { value, offset: 0, .. } if *value == pn)));
    assert!(code.iter().any(|i| matches!(i, Instruction::Store { value: Value::Imm(4), offset: 0, .. })));

    let cond = block_labelled(f, "new_cond");
    let body = block_labelled(f, "new_body");
    let after = block_labelled(f, "new_after");
    assert!(matches!(
        &cond.instructions[0].instruction,
        Instruction::Compare { op: IrCompareOp::Lt, rhs, .. } if *rhs == pn
    ));
    assert_eq!(terminator(f, body.id), &Instruction::Jump(cond.id));
    assert!(after.returns());
    assert_eq!(f.blocks.iter().filter(|b| b.label == "new_cond").count(), 1);
}

#[test]
fn test_increment_of_register_and_memory() {
    let arr_ty = Type::array_of(Type::Int, 1);
    let module = lower(&program(vec![func_item(function(
        "bump",
        Type::Int,
        vec![("a", 0, arr_ty.clone()), ("i", 1, Type::Int)],
        vec![
            expr_stmt(unary(UnaryOp::PreIncrement, index(local("a", 0, arr_ty), int(0)))),
            return_stmt(Some(unary(UnaryOp::PostIncrement, local("i", 1, Type::Int)))),
        ],
    ))]));
    let f = lowered(&module, "bump");
    let pi = Register::Virtual(f.parameters[1]);
    let code = instructions(f);

    let loads = code.iter().filter(|i| matches!(i, Instruction::Load { .. })).count();
    let stores = code.iter().filter(|i| matches!(i, Instruction::Store { .. })).count();
    assert_eq!((loads, stores), (1, 1));

    let old = code
        .iter()
        .find_map(|i| match i {
            Instruction::Move { dst, src } if *src == Value::from(pi) => Some(*dst),
            _ => None,
        })
        .expect("post-increment copies the old value");
    assert!(code.iter().any(|i| matches!(
        i,
        Instruction::Binary { dst, op: IrBinaryOp::Add, lhs, rhs: Value::Imm(1) } if *dst == pi && *lhs == Value::from(pi)
    )));
    assert_eq!(returned_value(&module, "bump"), Some(old.into()));
}

#[test]
fn test_callee_sets_after_lowering() {
    let module = lower(&program(vec![
        func_item(function("ping", Type::Int, vec![("n", 0, Type::Int)], vec![return_stmt(Some(call(
            "pong",
            vec![local("n", 0, Type::Int)],
            Type::Int,
        )))])),
        func_item(function("pong", Type::Int, vec![("n", 0, Type::Int)], vec![return_stmt(Some(call(
            "ping",
            vec![local("n", 0, Type::Int)],
            Type::Int,
        )))])),
        func_item(function("main", Type::Int, vec![], vec![return_stmt(Some(call("ping", vec![int(3)], Type::Int)))])),
    ]));
    let ping = module.function_id("ping").unwrap();
    let pong = module.function_id("pong").unwrap();
    let init = module.function_id(GLOBAL_INIT_FUNCTION).unwrap();
    let main = lowered(&module, "main");

    assert!(main.callees.contains(&ping) && main.callees.contains(&init));
    assert!(main.recursive_callees.contains(&pong));
    assert!(!main.is_recursive());
    assert!(lowered(&module, "ping").is_recursive());
    assert!(lowered(&module, "pong").recursive_callees.contains(&pong));
}
