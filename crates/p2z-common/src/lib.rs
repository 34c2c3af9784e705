//! Common types and utilities for the p2z converter.
//!
//! This crate provides foundational pieces shared by every p2z crate:
//! - Diagnostics (`Diagnostic`, `DiagnosticKind`, `DiagnosticSink`)
//! - Identifier sanitisation against Zephir reserved words
//! - Centralised naming constants and limits

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};

pub mod reserved_words;
pub use reserved_words::{is_reserved_word, sanitize};

pub mod limits;

#[cfg(test)]
#[path = "../tests/diagnostics.rs"]
mod diagnostics_tests;
#[cfg(test)]
#[path = "../tests/reserved_words.rs"]
mod reserved_words_tests;
