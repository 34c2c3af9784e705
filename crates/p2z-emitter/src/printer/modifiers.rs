use p2z_ast::Modifiers;

const KEYWORDS: [(Modifiers, &str); 6] = [
    (Modifiers::PUBLIC, "public"),
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::ABSTRACT, "abstract"),
    (Modifiers::STATIC, "static"),
    (Modifiers::FINAL, "final"),
];

/// Modifier keywords in canonical order, each followed by a space
/// (`"public static "`); empty when no flag is set.
pub fn modifiers_text(flags: Modifiers) -> String {
    KEYWORDS
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, keyword)| format!("{keyword} "))
        .collect()
}

/// Members without an explicit visibility are public.
pub(crate) fn with_default_visibility(flags: Modifiers) -> Modifiers {
    let visibility = Modifiers::PUBLIC | Modifiers::PROTECTED | Modifiers::PRIVATE;
    if flags.intersects(visibility) {
        flags
    } else {
        flags | Modifiers::PUBLIC
    }
}
