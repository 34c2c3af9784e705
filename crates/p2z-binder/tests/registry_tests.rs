use super::*;
use p2z_ast::{ClassKind, ClassLike, ClassMember, Method, Name, SourceFile};

fn file(namespace: Option<&str>, classes: Vec<ClassLike>) -> SourceFile {
    SourceFile {
        path: None,
        namespace: namespace.map(Name::new),
        uses: Vec::new(),
        classes,
    }
}

fn class_with_methods(kind: ClassKind, name: &str, methods: &[&str]) -> ClassLike {
    let mut class = ClassLike::new(kind, name);
    class.members = methods
        .iter()
        .map(|m| ClassMember::Method(Method::new(m).without_body()))
        .collect();
    class
}

#[test]
fn test_collect_keys_by_fully_qualified_name() {
    let files = vec![
        file(
            Some("App\\Model"),
            vec![class_with_methods(ClassKind::Class, "User", &["save"])],
        ),
        file(None, vec![class_with_methods(ClassKind::Class, "Legacy", &[])]),
    ];
    let registry = ClassRegistry::collect(&files);

    assert_eq!(registry.len(), 2);
    assert!(registry.contains("App\\Model\\User"));
    assert!(registry.contains("Legacy"));
    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        vec!["App\\Model\\User", "Legacy"]
    );
}

#[test]
fn test_duplicate_class_keeps_first_declaration() {
    let files = vec![
        file(Some("A"), vec![class_with_methods(ClassKind::Class, "Foo", &["first"])]),
        file(Some("A"), vec![class_with_methods(ClassKind::Class, "Foo", &["second"])]),
    ];
    let registry = ClassRegistry::collect(&files);

    assert_eq!(registry.len(), 1);
    assert!(registry.find_method("A\\Foo", "first").is_ok());
}

#[test]
fn test_find_method_errors_are_distinguishable() {
    let files = vec![file(
        Some("App"),
        vec![class_with_methods(ClassKind::Interface, "Greeter", &["greet"])],
    )];
    let registry = ClassRegistry::collect(&files);

    let method = registry.find_method("App\\Greeter", "greet").expect("found");
    assert_eq!(method.name, "greet");

    assert_eq!(
        registry.find_method("App\\Greeter", "wave"),
        Err(LookupError::MethodNotFound {
            class: "App\\Greeter".to_string(),
            method: "wave".to_string(),
        })
    );
    assert!(matches!(
        registry.find_method("App\\Missing", "greet"),
        Err(LookupError::ClassNotFound { .. })
    ));
}

#[test]
fn test_qualified_name_without_namespace() {
    assert_eq!(qualified_name(None, "Foo"), "Foo");
    assert_eq!(qualified_name(Some(&Name::new("A\\B")), "Foo"), "A\\B\\Foo");
}
