use super::*;
use crate::test_support::{demo_file, print_stmts, with_printer};
use p2z_ast::{
    ArrayItem, BinaryOperator, Case, Catch, ElseIf, Expr, IncDecOperator, Name, NodeKind,
    StaticVar, Stmt,
};
use p2z_common::DiagnosticKind;

fn echo(expr: Expr) -> Stmt {
    Stmt::Echo { exprs: vec![expr] }
}

#[test]
fn test_if_elseif_else_layout() {
    let stmt = Stmt::If {
        cond: Expr::var("a"),
        then: vec![echo(Expr::int(1))],
        elseifs: vec![ElseIf {
            cond: Expr::var("b"),
            body: vec![echo(Expr::int(2))],
        }],
        otherwise: Some(vec![echo(Expr::int(3))]),
    };
    let (text, sink) = print_stmts(&[stmt]);

    assert_eq!(
        text,
        "if a {\n    echo 1;\n} elseif b {\n    echo 2;\n} else {\n    echo 3;\n}"
    );
    assert!(sink.is_empty());
}

#[test]
fn test_array_in_if_condition_is_hoisted() {
    let temp = array_temp_name(&[ArrayItem::new(Expr::int(1))]);
    let stmt = Stmt::if_then(
        Expr::binary(
            BinaryOperator::Equal,
            Expr::var("a"),
            Expr::array(vec![Expr::int(1)]),
        ),
        vec![Stmt::ret(None)],
    );
    let (text, _) = print_stmts(&[stmt]);

    assert_eq!(
        text,
        format!("let {temp} = [1];\nif a == {temp} {{\n    return;\n}}")
    );
}

#[test]
fn test_returned_array_is_hoisted() {
    let temp = array_temp_name(&[ArrayItem::new(Expr::var("a"))]);
    let (text, _) = print_stmts(&[Stmt::ret(Some(Expr::array(vec![Expr::var("a")])))]);

    assert_eq!(text, format!("let {temp} = [a];\nreturn {temp};"));
}

#[test]
fn test_destructuring_assignment_is_lowered() {
    let stmt = Stmt::expr(Expr::assign(
        Expr::list(vec![Some(Expr::var("a")), Some(Expr::var("b"))]),
        Expr::var("x"),
    ));
    let (text, _) = print_stmts(&[stmt]);

    assert_eq!(
        text,
        "let tmpListAB = x;\nlet a = tmpListAB[0];\nlet b = tmpListAB[1];"
    );
}

#[test]
fn test_for_is_lowered_to_while() {
    let stmt = Stmt::For {
        init: vec![Expr::assign(Expr::var("i"), Expr::int(0))],
        cond: vec![Expr::binary(
            BinaryOperator::Smaller,
            Expr::var("i"),
            Expr::int(3),
        )],
        step: vec![Expr::IncDec {
            op: IncDecOperator::PostInc,
            target: Box::new(Expr::var("i")),
        }],
        body: vec![echo(Expr::var("i"))],
    };
    let (text, _) = print_stmts(&[stmt]);

    assert_eq!(
        text,
        "let i = 0;\nwhile i < 3 {\n    echo i;\n    let i++;\n}"
    );
}

#[test]
fn test_for_step_runs_before_continue() {
    let stmt = Stmt::For {
        init: vec![Expr::assign(Expr::var("i"), Expr::int(0))],
        cond: vec![Expr::binary(
            BinaryOperator::Smaller,
            Expr::var("i"),
            Expr::int(3),
        )],
        step: vec![Expr::IncDec {
            op: IncDecOperator::PostInc,
            target: Box::new(Expr::var("i")),
        }],
        body: vec![
            Stmt::if_then(Expr::var("skip"), vec![Stmt::Continue]),
            echo(Expr::var("i")),
        ],
    };
    let (text, sink) = print_stmts(&[stmt]);

    assert_eq!(
        text,
        "let i = 0;\nwhile i < 3 {\n    if skip {\n        let i++;\n        continue;\n    }\n    echo i;\n    let i++;\n}"
    );
    assert!(sink.is_empty());
}

#[test]
fn test_for_runs_every_condition_and_tests_the_last() {
    let stmt = Stmt::For {
        init: Vec::new(),
        cond: vec![Expr::call("a", Vec::new()), Expr::call("b", Vec::new())],
        step: Vec::new(),
        body: vec![echo(Expr::int(1))],
    };
    let (text, _) = print_stmts(&[stmt]);

    assert_eq!(
        text,
        "loop {\n    a();\n    if !(b()) {\n        break;\n    }\n    echo 1;\n}"
    );
}

#[test]
fn test_assignment_in_while_condition_runs_every_iteration() {
    let stmt = Stmt::While {
        cond: Expr::assign(Expr::var("row"), Expr::call("next_row", Vec::new())),
        body: vec![echo(Expr::var("row"))],
    };
    let (text, _) = print_stmts(&[stmt]);

    assert_eq!(
        text,
        "loop {\n    let row = next_row();\n    if !(row) {\n        break;\n    }\n    echo row;\n}"
    );
}

#[test]
fn test_continue_in_do_while_reaches_the_condition() {
    let stmt = Stmt::DoWhile {
        body: vec![Stmt::if_then(Expr::var("skip"), vec![Stmt::Continue])],
        cond: Expr::assign(Expr::var("x"), Expr::call("more", Vec::new())),
    };
    let (text, _) = print_stmts(&[stmt]);

    assert_eq!(
        text,
        "loop {\n    if skip {\n        let x = more();\n        if !(x) {\n            break;\n        }\n        continue;\n    }\n    let x = more();\n    if !(x) {\n        break;\n    }\n}"
    );
}

#[test]
fn test_plain_loops_keep_their_shape() {
    let (text, _) = print_stmts(&[Stmt::DoWhile {
        body: vec![Stmt::Continue],
        cond: Expr::var("more"),
    }]);
    assert_eq!(text, "do {\n    continue;\n} while more;");

    let (text, _) = print_stmts(&[Stmt::While {
        cond: Expr::var("more"),
        body: vec![Stmt::Continue],
    }]);
    assert_eq!(text, "while more {\n    continue;\n}");
}

#[test]
fn test_assignment_in_elseif_runs_only_when_reached() {
    let stmt = Stmt::If {
        cond: Expr::var("a"),
        then: vec![echo(Expr::int(1))],
        elseifs: vec![
            ElseIf {
                cond: Expr::assign(Expr::var("b"), Expr::call("expensive", Vec::new())),
                body: vec![echo(Expr::int(2))],
            },
            ElseIf {
                cond: Expr::var("c"),
                body: vec![echo(Expr::int(3))],
            },
        ],
        otherwise: Some(vec![echo(Expr::int(4))]),
    };
    let (text, _) = print_stmts(&[stmt]);

    assert_eq!(
        text,
        "if a {\n    echo 1;\n} else {\n    let b = expensive();\n    if b {\n        echo 2;\n    } elseif c {\n        echo 3;\n    } else {\n        echo 4;\n    }\n}"
    );
}

#[test]
fn test_destructuring_converts_each_slot_once() {
    let slot = Expr::dim(
        Expr::var("a"),
        Some(Expr::dim(Expr::call("foo", Vec::new()), Some(Expr::int(0)))),
    );
    let stmt = Stmt::expr(Expr::assign(Expr::list(vec![Some(slot)]), Expr::var("x")));
    let (text, _) = print_stmts(&[stmt]);

    assert_eq!(
        text,
        "let tmpDim1 = foo();\nlet tmpListA = x;\nlet a[tmpDim1[0]] = tmpListA[0];"
    );
}

#[test]
fn test_for_without_condition_loops_forever() {
    let stmt = Stmt::For {
        init: Vec::new(),
        cond: Vec::new(),
        step: Vec::new(),
        body: vec![Stmt::Break],
    };
    let (text, _) = print_stmts(&[stmt]);

    assert_eq!(text, "while true {\n    break;\n}");
}

#[test]
fn test_foreach_with_key() {
    let stmt = Stmt::Foreach {
        expr: Expr::var("items"),
        key: Some(Expr::var("k")),
        value: Expr::var("v"),
        by_ref: false,
        body: vec![echo(Expr::var("v"))],
    };
    let (text, sink) = print_stmts(&[stmt]);

    assert_eq!(text, "for k, v in items {\n    echo v;\n}");
    assert!(sink.is_empty());
}

#[test]
fn test_foreach_by_reference_is_reported() {
    let stmt = Stmt::Foreach {
        expr: Expr::var("items"),
        key: None,
        value: Expr::var("v"),
        by_ref: true,
        body: Vec::new(),
    };
    let (text, sink) = print_stmts(&[stmt]);

    assert_eq!(text, "for v in items {\n}");
    assert_eq!(sink.count(DiagnosticKind::Incompatibility), 1);
}

#[test]
fn test_switch_cases_are_indented() {
    let stmt = Stmt::Switch {
        subject: Expr::var("a"),
        cases: vec![
            Case {
                test: Some(Expr::int(1)),
                body: vec![Stmt::Break],
            },
            Case {
                test: None,
                body: vec![echo(Expr::string("x"))],
            },
        ],
    };
    let (text, _) = print_stmts(&[stmt]);

    assert_eq!(
        text,
        "switch a {\n    case 1:\n        break;\n    default:\n        echo \"x\";\n}"
    );
}

#[test]
fn test_static_variables_become_locals() {
    let stmt = Stmt::Static {
        vars: vec![
            StaticVar {
                name: "count".to_string(),
                default: Some(Expr::int(0)),
            },
            StaticVar {
                name: "cache".to_string(),
                default: None,
            },
        ],
    };
    let (text, sink) = print_stmts(&[stmt]);

    assert_eq!(text, "let count = 0;\nlet cache = null;");
    let diagnostics = sink.into_vec();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].category.as_deref(), Some("static"));
    assert_eq!(diagnostics[0].node, "test: static");
}

#[test]
fn test_try_catch_finally() {
    let stmt = Stmt::TryCatch {
        body: vec![Stmt::Throw {
            expr: Expr::New {
                class: Name::new("Exception"),
                args: Vec::new(),
            },
        }],
        catches: vec![Catch {
            types: vec![Name::new("\\Exception")],
            var: Some("e".to_string()),
            body: vec![echo(Expr::var("e"))],
        }],
        finally: Some(vec![echo(Expr::string("done"))]),
    };
    let (text, sink) = print_stmts(&[stmt]);

    assert_eq!(
        text,
        "try {\n    throw new Exception();\n} catch \\Exception, e {\n    echo e;\n}\necho \"done\";"
    );
    assert_eq!(sink.count(DiagnosticKind::Incompatibility), 1);
}

#[test]
fn test_nop_emits_nothing() {
    let (text, _) = print_stmts(&[Stmt::Nop, Stmt::Continue]);
    assert_eq!(text, "continue;");
}

#[test]
fn test_goto_is_unsupported() {
    let files = vec![demo_file(Vec::new())];
    let stmt = Stmt::Goto {
        label: "end".to_string(),
    };
    let err = with_printer(&files, |printer| printer.convert_stmt(&stmt)).unwrap_err();

    assert!(
        matches!(
            err,
            ConvertError::UnsupportedNodeKind {
                kind: NodeKind::Goto,
                ..
            }
        ),
        "unexpected error {err:?}"
    );
}
