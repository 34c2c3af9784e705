use super::*;

#[test]
fn test_descriptor_render() {
    assert_eq!(
        TypeDescriptor::class("Foo").render().unwrap().as_deref(),
        Some("<Foo>")
    );
    assert_eq!(
        TypeDescriptor::primitive("int").render().unwrap().as_deref(),
        Some("int")
    );
    assert_eq!(TypeDescriptor::empty().render().unwrap(), None);
}

#[test]
fn test_class_descriptor_without_name_is_malformed() {
    let err = TypeDescriptor::class("").render().unwrap_err();
    assert!(matches!(err, TypeError::MalformedTypeDescriptor { .. }));
}

#[test]
fn test_union_dedupes_first_occurrence_wins() {
    let union: TypeUnion = [
        TypeDescriptor::class("Foo"),
        TypeDescriptor::class("Bar"),
        TypeDescriptor::class("Foo"),
    ]
    .into_iter()
    .collect();

    assert_eq!(union.len(), 2);
    assert_eq!(union.members()[0].value, "Foo");
    assert_eq!(union.members()[1].value, "Bar");
    assert_eq!(union.render().unwrap().as_deref(), Some("<Foo> | <Bar>"));
}

#[test]
fn test_union_render_skips_empty_marker() {
    let union: TypeUnion = [TypeDescriptor::empty(), TypeDescriptor::primitive("int")]
        .into_iter()
        .collect();
    assert_eq!(union.render().unwrap().as_deref(), Some("int"));

    let only_marker = TypeUnion::single(TypeDescriptor::empty());
    assert!(only_marker.is_untyped());
    assert_eq!(only_marker.render().unwrap(), None);
}

#[test]
fn test_param_type_ignores_null() {
    let union: TypeUnion = [TypeDescriptor::class("Foo"), TypeDescriptor::primitive("null")]
        .into_iter()
        .collect();
    assert_eq!(
        union.param_type(),
        ParamType::Single(&TypeDescriptor::class("Foo"))
    );
}

#[test]
fn test_param_type_ambiguous_with_two_members() {
    let union: TypeUnion = [TypeDescriptor::primitive("int"), TypeDescriptor::primitive("string")]
        .into_iter()
        .collect();
    assert_eq!(union.param_type(), ParamType::Ambiguous);
    assert_eq!(TypeUnion::new().param_type(), ParamType::Untyped);
}

#[test]
fn test_union_display() {
    let union: TypeUnion = [TypeDescriptor::class("Foo"), TypeDescriptor::primitive("int")]
        .into_iter()
        .collect();
    assert_eq!(union.to_string(), "<Foo> | int");
}
