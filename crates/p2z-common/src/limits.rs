//! Centralized naming constants and limits for the converter.
//!
//! Synthesized temporaries share these prefixes so the variable collector
//! and the printers that hoist values always agree on a name.

// =============================================================================
// Synthesized temporaries
// =============================================================================

/// Prefix for a hoisted literal array: `tmpArray<hash>`.
pub const TMP_ARRAY_PREFIX: &str = "tmpArray";

/// Prefix for the intermediate value of a destructuring assignment:
/// `tmpList<CapitalizedSlotNames>`.
pub const TMP_LIST_PREFIX: &str = "tmpList";

/// Prefix for a hoisted indexed-fetch base: `tmpDim<counter>`.
pub const TMP_DIM_PREFIX: &str = "tmpDim";

/// Number of hex digits of the content hash kept in `tmpArray` names.
///
/// 32 hex digits (128 bits) keep names readable while collisions between
/// structurally different arrays stay out of reach in practice.
pub const ARRAY_HASH_HEX_LEN: usize = 32;

// =============================================================================
// Output formatting
// =============================================================================

/// Default indentation width (spaces) for emitted Zephir.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Implicit variables that are never declared in a `var` block: the receiver
/// and the request/session/server/environment pseudo-globals.
pub const AMBIENT_GLOBAL_NAMES: &[&str] = &[
    "this", "_SERVER", "_GET", "_POST", "_FILES", "_COOKIE", "_SESSION", "_REQUEST", "_ENV",
];

/// Whether `name` is the receiver or a pseudo-global.
pub fn is_ambient_global(name: &str) -> bool {
    AMBIENT_GLOBAL_NAMES.contains(&name)
}
