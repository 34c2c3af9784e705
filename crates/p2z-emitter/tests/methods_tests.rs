use crate::test_support::print_method;
use p2z_ast::{BinaryOperator, Expr, Method, Modifiers, Param, Stmt, TypeHint};
use p2z_common::DiagnosticKind;

#[test]
fn test_documented_primitive_types() {
    let method = Method::new("f")
        .with_doc("/** @param int $a @return string */")
        .with_params(vec![Param::new("a")])
        .with_body(vec![Stmt::ret(Some(Expr::string("x")))]);
    let (text, sink) = print_method(method);

    assert_eq!(text, "public function f(int a) -> string\n{\n    return \"x\";\n}");
    assert!(sink.is_empty());
}

#[test]
fn test_native_class_types_and_nullable_return() {
    let method = Method::new("g")
        .with_params(vec![Param::new("a").with_type(TypeHint::class("Foo"))])
        .with_return_type(TypeHint::nullable(TypeHint::class("Bar")))
        .with_body(vec![Stmt::ret(Some(Expr::constant("null")))]);
    let (text, _) = print_method(method);

    assert_eq!(
        text,
        "public function g(<Foo> a) -> <Bar> | null\n{\n    return null;\n}"
    );
}

#[test]
fn test_documented_union_return() {
    let method = Method::new("pick")
        .with_doc("/**\n * @return Foo|Bar|Foo\n */")
        .with_body(vec![Stmt::ret(Some(Expr::constant("null")))]);
    let (text, _) = print_method(method);

    assert!(
        text.starts_with("public function pick() -> <Foo> | <Bar>\n"),
        "unexpected header in {text}"
    );
}

#[test]
fn test_no_types_and_no_return_means_no_annotation() {
    let method = Method::new("h").with_body(vec![Stmt::Echo {
        exprs: vec![Expr::int(1)],
    }]);
    let (text, _) = print_method(method);

    assert_eq!(text, "public function h()\n{\n    echo 1;\n}");
}

#[test]
fn test_reference_parameter_is_reported_once() {
    let method = Method::new("r").with_params(vec![Param::new("a").by_ref()]);
    let (text, sink) = print_method(method);

    assert_eq!(text, "public function r(a)\n{\n}");
    let diagnostics = sink.into_vec();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Incompatibility);
    assert_eq!(diagnostics[0].category.as_deref(), Some("reference"));
    assert_eq!(diagnostics[0].node, "r: param $a");
    assert_eq!(diagnostics[0].class, "App\\Demo");
}

#[test]
fn test_reference_method_is_reported() {
    let mut method = Method::new("r");
    method.by_ref = true;
    let (_, sink) = print_method(method);

    assert_eq!(sink.count(DiagnosticKind::Incompatibility), 1);
}

#[test]
fn test_var_line_lists_locals() {
    let method = Method::new("s")
        .with_params(vec![Param::new("a")])
        .with_body(vec![
            Stmt::expr(Expr::assign(
                Expr::var("total"),
                Expr::binary(BinaryOperator::Add, Expr::var("a"), Expr::int(1)),
            )),
            Stmt::ret(Some(Expr::var("total"))),
        ]);
    let (text, _) = print_method(method);

    assert_eq!(
        text,
        "public function s(a)\n{\n    var total;\n\n    let total = a + 1;\n    return total;\n}"
    );
}

#[test]
fn test_reserved_parameter_is_renamed_everywhere() {
    let method = Method::new("t")
        .with_params(vec![Param::new("var").with_default(Expr::int(1))])
        .with_body(vec![Stmt::ret(Some(Expr::var("var")))]);
    let (text, _) = print_method(method);

    assert_eq!(
        text,
        "public function t(varFixed = 1)\n{\n    return varFixed;\n}"
    );
}

#[test]
fn test_abstract_method_has_no_body() {
    let method = Method::new("x")
        .with_flags(Modifiers::PROTECTED | Modifiers::ABSTRACT)
        .without_body();
    let (text, _) = print_method(method);

    assert_eq!(text, "protected abstract function x();");
}

#[test]
fn test_constructor_never_gets_annotation() {
    let method = Method::new("__construct")
        .with_doc("/** @return static */")
        .with_body(vec![Stmt::ret(None)]);
    let (text, _) = print_method(method);

    assert!(text.starts_with("public function __construct()\n"), "{text}");
}

#[test]
fn test_union_parameter_is_left_untyped() {
    let method = Method::new("u")
        .with_doc("/** @param int|string $a */")
        .with_params(vec![Param::new("a")]);
    let (text, sink) = print_method(method);

    assert_eq!(text, "public function u(a)\n{\n}");
    assert_eq!(sink.count(DiagnosticKind::Informational), 1);
}

#[test]
fn test_nullable_documented_parameter_keeps_its_type() {
    let method = Method::new("n")
        .with_doc("/** @param string|null $a */")
        .with_params(vec![Param::new("a").with_default(Expr::constant("null"))]);
    let (text, _) = print_method(method);

    assert_eq!(text, "public function n(string a = null)\n{\n}");
}

#[test]
fn test_excluded_return_member_is_dropped() {
    let method = Method::new("e")
        .with_doc("/** @return int|callable */")
        .with_body(vec![Stmt::ret(Some(Expr::int(1)))]);
    let (text, sink) = print_method(method);

    assert!(text.starts_with("public function e() -> int\n"), "{text}");
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.count(DiagnosticKind::Informational), 1);
}

#[test]
fn test_native_union_return_without_return_statement() {
    let method = Method::new("v").with_return_type(TypeHint::Union {
        types: vec![TypeHint::identifier("int"), TypeHint::identifier("string")],
    });
    let (text, _) = print_method(method);

    assert_eq!(text, "public function v()\n{\n}");
}

#[test]
fn test_native_union_return_falls_back_to_documentation() {
    let method = Method::new("w")
        .with_doc("/** @return int|string */")
        .with_return_type(TypeHint::Union {
            types: vec![TypeHint::identifier("int"), TypeHint::identifier("string")],
        })
        .with_body(vec![Stmt::ret(Some(Expr::int(1)))]);
    let (text, _) = print_method(method);

    assert!(text.starts_with("public function w() -> int | string\n"), "{text}");
}
