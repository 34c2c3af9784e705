use super::*;

#[test]
fn test_sink_counts_by_kind() {
    let mut sink = DiagnosticSink::new();
    assert!(sink.is_empty());

    sink.record(Diagnostic::incompatibility(
        "reference",
        "Reference not supported",
        "method foo",
        "App\\Foo",
    ));
    sink.record(Diagnostic::informational(
        "Type(s) \"int|callable\" in excludelist",
        "method foo",
        "App\\Foo",
    ));
    sink.record(Diagnostic::informational("another", "param $a", "App\\Foo"));

    assert_eq!(sink.len(), 3);
    assert_eq!(sink.count(DiagnosticKind::Incompatibility), 1);
    assert_eq!(sink.count(DiagnosticKind::Informational), 2);
}

#[test]
fn test_sink_extend_preserves_order() {
    let mut first = DiagnosticSink::new();
    first.record(Diagnostic::informational("one", "n", "A"));
    let mut second = DiagnosticSink::new();
    second.record(Diagnostic::informational("two", "n", "B"));

    first.extend(second);
    let messages: Vec<_> = first.iter().map(|d| d.message_text.as_str()).collect();
    assert_eq!(messages, vec!["one", "two"]);
}

#[test]
fn test_diagnostic_display_includes_category() {
    let diag = Diagnostic::incompatibility("reference", "Reference not supported", "param $a", "A");
    assert_eq!(
        diag.to_string(),
        "A: [reference] Reference not supported (param $a)"
    );
}

#[test]
fn test_diagnostic_serializes_camel_case() {
    let diag = Diagnostic::informational("note", "method f", "A\\B");
    let json = serde_json::to_value(&diag).unwrap();
    assert_eq!(json["kind"], "informational");
    assert_eq!(json["messageText"], "note");
    assert!(json.get("category").is_none());
}
