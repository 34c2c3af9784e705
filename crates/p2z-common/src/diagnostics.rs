//! Diagnostic types for the converter.
//!
//! Diagnostics are non-fatal notes about constructs that were weakened or
//! dropped while converting a class. The converter only ever writes them;
//! reading them back is the caller's business (the CLI prints them and can
//! dump them as JSON).

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// A construct with no faithful Zephir equivalent (e.g. references).
    Incompatibility,
    /// Informational note, such as a documented type that was excluded.
    Informational,
}

/// A note recorded against a node of a class being converted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Short grouping key for incompatibilities (e.g. `reference`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message_text: String,
    /// Human-readable label of the offending node (`param $a`, `method foo`).
    pub node: String,
    /// Fully qualified name of the owning class.
    pub class: String,
}

impl Diagnostic {
    /// Create an incompatibility diagnostic.
    #[must_use]
    pub fn incompatibility(
        category: impl Into<String>,
        message: impl Into<String>,
        node: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        Self {
            kind: DiagnosticKind::Incompatibility,
            category: Some(category.into()),
            message_text: message.into(),
            node: node.into(),
            class: class.into(),
        }
    }

    /// Create an informational diagnostic.
    #[must_use]
    pub fn informational(
        message: impl Into<String>,
        node: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        Self {
            kind: DiagnosticKind::Informational,
            category: None,
            message_text: message.into(),
            node: node.into(),
            class: class.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.category) {
            (DiagnosticKind::Incompatibility, Some(category)) => write!(
                f,
                "{}: [{category}] {} ({})",
                self.class, self.message_text, self.node
            ),
            _ => write!(f, "{}: {} ({})", self.class, self.message_text, self.node),
        }
    }
}

// =============================================================================
// Sink
// =============================================================================

/// Append-only collection of diagnostics.
///
/// Every recorded diagnostic is mirrored as a `tracing` event so a run with
/// `P2Z_LOG` set shows them inline with the conversion trace.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        match diagnostic.kind {
            DiagnosticKind::Incompatibility => tracing::warn!(
                class = %diagnostic.class,
                node = %diagnostic.node,
                category = diagnostic.category.as_deref().unwrap_or_default(),
                "{}",
                diagnostic.message_text
            ),
            DiagnosticKind::Informational => tracing::debug!(
                class = %diagnostic.class,
                node = %diagnostic.node,
                "{}",
                diagnostic.message_text
            ),
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Move all diagnostics of `other` to the end of this sink.
    pub fn extend(&mut self, other: DiagnosticSink) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
