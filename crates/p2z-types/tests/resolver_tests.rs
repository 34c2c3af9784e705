use super::*;
use p2z_ast::{ClassKind, ClassLike, ClassMember, Expr, Method, Name, Param, SourceFile, TypeHint, UseItem};
use p2z_binder::{ClassContext, ClassRegistry};
use p2z_common::{DiagnosticKind, DiagnosticSink};

fn file(namespace: Option<&str>, uses: Vec<UseItem>, classes: Vec<ClassLike>) -> SourceFile {
    SourceFile {
        path: None,
        namespace: namespace.map(Name::new),
        uses,
        classes,
    }
}

fn class_with(kind: ClassKind, name: &str, methods: Vec<Method>) -> ClassLike {
    let mut class = ClassLike::new(kind, name);
    class.members = methods.into_iter().map(ClassMember::Method).collect();
    class
}

fn resolve(files: &[SourceFile], raw: &str) -> (TypeUnion, DiagnosticSink) {
    let registry = ClassRegistry::collect(files);
    let known = KnownClasses::builtin();
    let resolver = TypeResolver::new(&registry, &known);
    let ctx = ClassContext::new(&files[0], &files[0].classes[0]);
    let mut sink = DiagnosticSink::new();
    let union = resolver.resolve_type_string(raw, "method foo", &ctx, &mut sink);
    (union, sink)
}

fn single_class_file() -> Vec<SourceFile> {
    vec![file(
        Some("App"),
        Vec::new(),
        vec![ClassLike::new(ClassKind::Class, "Foo")],
    )]
}

#[test]
fn test_excluded_member_is_dropped_with_one_note() {
    let files = single_class_file();
    let (union, sink) = resolve(&files, "int|callable");

    assert_eq!(union.members(), &[TypeDescriptor::primitive("int")]);
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.count(DiagnosticKind::Informational), 1);
}

#[test]
fn test_exclusion_ignores_case() {
    let files = single_class_file();
    let (union, sink) = resolve(&files, "Callable|Void|int|OBJECT");

    assert_eq!(union.members(), &[TypeDescriptor::primitive("int")]);
    assert_eq!(sink.count(DiagnosticKind::Informational), 3);

    let (union, sink) = resolve(&files, "Mixed|Integer");
    assert_eq!(
        union.members(),
        &[TypeDescriptor::primitive("var"), TypeDescriptor::primitive("int")]
    );
    assert!(sink.is_empty());
}

#[test]
fn test_duplicates_collapse() {
    let files = single_class_file();
    let (union, sink) = resolve(&files, "Foo|Bar|Foo");

    assert_eq!(union.len(), 2);
    assert_eq!(union.render().unwrap().as_deref(), Some("<Foo> | <Bar>"));
    assert!(sink.is_empty());
}

#[test]
fn test_normalizes_integer_and_mixed() {
    let files = single_class_file();
    let (union, sink) = resolve(&files, "integer|int");
    assert_eq!(union.members(), &[TypeDescriptor::primitive("int")]);
    assert!(sink.is_empty());

    let (union, sink) = resolve(&files, "mixed");
    assert_eq!(union.members(), &[TypeDescriptor::primitive("var")]);
    assert!(sink.is_empty());
}

#[test]
fn test_everything_excluded_yields_no_type_marker() {
    let files = single_class_file();
    let (union, sink) = resolve(&files, "void");

    assert_eq!(union.members(), &[TypeDescriptor::empty()]);
    assert!(union.is_untyped());
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_primitive_and_array_forms() {
    let files = single_class_file();
    let (union, _) = resolve(&files, "String|bool[]|Foo[]");
    assert_eq!(
        union.members(),
        &[
            TypeDescriptor::primitive("string"),
            TypeDescriptor::primitive("array"),
        ]
    );
}

#[test]
fn test_known_class_keeps_spelling() {
    let files = single_class_file();
    let (union, _) = resolve(&files, "\\Exception");
    assert_eq!(union.members(), &[TypeDescriptor::class("\\Exception")]);
}

#[test]
fn test_import_suffix_match() {
    let files = vec![file(
        Some("App"),
        vec![UseItem::new("Lib\\Models\\User")],
        vec![ClassLike::new(ClassKind::Class, "Foo")],
    )];
    let (union, _) = resolve(&files, "\\User");
    assert_eq!(union.members(), &[TypeDescriptor::class("User")]);
}

#[test]
fn test_registry_suffix_and_exact_match() {
    let files = vec![
        file(
            Some("App"),
            Vec::new(),
            vec![ClassLike::new(ClassKind::Class, "Foo")],
        ),
        file(
            Some("App\\Models"),
            Vec::new(),
            vec![ClassLike::new(ClassKind::Class, "Post")],
        ),
    ];

    let (union, _) = resolve(&files, "Post");
    assert_eq!(union.members(), &[TypeDescriptor::class("Post")]);

    let (union, _) = resolve(&files, "\\App\\Models\\Post");
    assert_eq!(union.members(), &[TypeDescriptor::class("\\App\\Models\\Post")]);
}

#[test]
fn test_unknown_name_stays_a_class() {
    let files = single_class_file();
    let (union, _) = resolve(&files, "Whatever");
    assert_eq!(union.members(), &[TypeDescriptor::class("Whatever")]);
}

#[test]
fn test_native_types() {
    assert_eq!(
        TypeResolver::native_type(&TypeHint::identifier("mixed")).unwrap(),
        Some(TypeUnion::single(TypeDescriptor::primitive("var")))
    );
    assert_eq!(
        TypeResolver::native_type(&TypeHint::nullable(TypeHint::class("\\App\\Foo"))).unwrap(),
        Some(TypeUnion::single(TypeDescriptor::class("\\App\\Foo")))
    );
    assert_eq!(
        TypeResolver::native_type(&TypeHint::identifier("  ")).unwrap(),
        None
    );

    let empty_name = TypeHint::Name {
        name: Name {
            parts: Vec::new(),
            fully_qualified: false,
        },
    };
    assert!(matches!(
        TypeResolver::native_type(&empty_name),
        Err(TypeError::MalformedTypeDescriptor { .. })
    ));
}

#[test]
fn test_method_types_params_from_native_and_doc() {
    let method = Method::new("sum")
        .with_params(vec![
            Param::new("a").with_type(TypeHint::identifier("int")),
            Param::new("b").with_default(Expr::int(1)),
            Param::new("var"),
        ])
        .with_doc("/**\n * @param string $b\n * @param float $var\n * @return int|null\n */");
    let files = vec![file(
        None,
        Vec::new(),
        vec![class_with(ClassKind::Class, "Calc", vec![method])],
    )];
    let registry = ClassRegistry::collect(&files);
    let known = KnownClasses::builtin();
    let resolver = TypeResolver::new(&registry, &known);
    let ctx = ClassContext::new(&files[0], &files[0].classes[0]);
    let mut sink = DiagnosticSink::new();

    let decl = files[0].classes[0].methods().next().unwrap();
    let info = resolver.method_types(decl, &ctx, &mut sink).unwrap();

    assert_eq!(info.params.len(), 3);
    assert_eq!(info.params[0].name, "a");
    assert_eq!(
        info.params[0].ty,
        Some(TypeUnion::single(TypeDescriptor::primitive("int")))
    );
    assert_eq!(
        info.params[1].ty,
        Some(TypeUnion::single(TypeDescriptor::primitive("string")))
    );
    assert_eq!(info.params[1].default, Some(&Expr::int(1)));
    // `var` is reserved in Zephir.
    assert_eq!(info.params[2].name, "varFixed");
    assert_eq!(
        info.params[2].ty,
        Some(TypeUnion::single(TypeDescriptor::primitive("float")))
    );
    assert_eq!(
        info.return_type.unwrap().render().unwrap().as_deref(),
        Some("int | null")
    );
}

#[test]
fn test_constructor_has_no_return_type() {
    let ctor = Method::new("__construct").with_doc("/** @return static */");
    let files = vec![file(
        None,
        Vec::new(),
        vec![class_with(ClassKind::Class, "Foo", vec![ctor])],
    )];
    let registry = ClassRegistry::collect(&files);
    let known = KnownClasses::builtin();
    let resolver = TypeResolver::new(&registry, &known);
    let ctx = ClassContext::new(&files[0], &files[0].classes[0]);
    let mut sink = DiagnosticSink::new();

    let decl = files[0].classes[0].methods().next().unwrap();
    let info = resolver.method_types(decl, &ctx, &mut sink).unwrap();
    assert_eq!(info.return_type, None);
}

#[test]
fn test_interface_documentation_wins() {
    let interface = class_with(
        ClassKind::Interface,
        "Greeter",
        vec![
            Method::new("greet")
                .without_body()
                .with_doc("/** @return string */"),
        ],
    );
    let mut class = class_with(
        ClassKind::Class,
        "Hello",
        vec![Method::new("greet").with_doc("/** @return int */")],
    );
    class.implements = vec![Name::new("Greeter")];
    let files = vec![file(Some("App"), Vec::new(), vec![class, interface])];

    let registry = ClassRegistry::collect(&files);
    let known = KnownClasses::builtin();
    let resolver = TypeResolver::new(&registry, &known);
    let ctx = ClassContext::new(&files[0], &files[0].classes[0]);
    let mut sink = DiagnosticSink::new();

    let decl = files[0].classes[0].methods().next().unwrap();
    let info = resolver.method_types(decl, &ctx, &mut sink).unwrap();
    assert_eq!(
        info.return_type,
        Some(TypeUnion::single(TypeDescriptor::primitive("string")))
    );
}

#[test]
fn test_missing_interface_method_falls_back_to_own_doc() {
    let interface = class_with(ClassKind::Interface, "Greeter", Vec::new());
    let mut class = class_with(
        ClassKind::Class,
        "Hello",
        vec![Method::new("greet").with_doc("/** @return int */")],
    );
    class.implements = vec![Name::new("Greeter"), Name::new("Unknown")];
    let files = vec![file(Some("App"), Vec::new(), vec![class, interface])];

    let registry = ClassRegistry::collect(&files);
    let known = KnownClasses::builtin();
    let resolver = TypeResolver::new(&registry, &known);
    let ctx = ClassContext::new(&files[0], &files[0].classes[0]);
    let mut sink = DiagnosticSink::new();

    let decl = files[0].classes[0].methods().next().unwrap();
    let info = resolver.method_types(decl, &ctx, &mut sink).unwrap();
    assert_eq!(
        info.return_type,
        Some(TypeUnion::single(TypeDescriptor::primitive("int")))
    );
}

#[test]
fn test_interface_through_import() {
    let interface_file = file(
        Some("Lib\\Contracts"),
        Vec::new(),
        vec![class_with(
            ClassKind::Interface,
            "Greeter",
            vec![
                Method::new("greet")
                    .without_body()
                    .with_doc("/** @return bool */"),
            ],
        )],
    );
    let mut class = class_with(ClassKind::Class, "Hello", vec![Method::new("greet")]);
    class.implements = vec![Name::new("Greeter")];
    let class_file = file(
        Some("App"),
        vec![UseItem::new("Lib\\Contracts\\Greeter")],
        vec![class],
    );
    let files = vec![class_file, interface_file];

    let registry = ClassRegistry::collect(&files);
    let known = KnownClasses::builtin();
    let resolver = TypeResolver::new(&registry, &known);
    let ctx = ClassContext::new(&files[0], &files[0].classes[0]);
    let mut sink = DiagnosticSink::new();

    let decl = files[0].classes[0].methods().next().unwrap();
    let info = resolver.method_types(decl, &ctx, &mut sink).unwrap();
    assert_eq!(
        info.return_type,
        Some(TypeUnion::single(TypeDescriptor::primitive("bool")))
    );
}
