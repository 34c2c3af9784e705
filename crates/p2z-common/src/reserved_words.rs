//! Identifier sanitisation.
//!
//! Zephir reserves a larger set of words than PHP does for variable names
//! (`var`, `let`, `fetch`, `array`, ...). Any variable or parameter name that
//! collides with one of them gets a fixed suffix appended.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use std::borrow::Cow;

/// Suffix appended to identifiers that collide with a reserved word.
pub const RESERVED_SUFFIX: &str = "Fixed";

static RESERVED_WORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "abstract", "array", "bool", "boolean", "break", "callable", "case", "catch", "char",
        "class", "clone", "const", "continue", "default", "do", "double", "else", "elseif",
        "empty", "enum", "export", "extends", "false", "fetch", "final", "finally", "float", "for",
        "foreach", "function", "if", "implements", "inline", "instanceof", "int", "integer",
        "interface", "internal", "isset", "let", "likely", "long", "loop", "namespace", "new",
        "null", "object", "private", "protected", "public", "require", "resource", "return",
        "static", "string", "switch", "throw", "true", "try", "typeof", "uint", "ulong",
        "unlikely", "unset", "use", "var", "void", "while",
    ]
    .into_iter()
    .collect()
});

/// Whether `name` collides with a Zephir reserved word (case-insensitive).
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(name.to_ascii_lowercase().as_str())
}

/// Map `name` to an identifier that is safe to emit.
///
/// Not idempotent on purpose: callers sanitise each name exactly once, at the
/// point where a source name becomes an emitted one.
pub fn sanitize(name: &str) -> Cow<'_, str> {
    if is_reserved_word(name) {
        Cow::Owned(format!("{name}{RESERVED_SUFFIX}"))
    } else {
        Cow::Borrowed(name)
    }
}
