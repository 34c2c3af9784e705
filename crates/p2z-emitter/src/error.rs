//! Fatal conversion errors.
//!
//! Each variant aborts the class being converted; the program driver
//! records it in that class's output and moves on to the next class.

use p2z_ast::NodeKind;
use p2z_types::TypeError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The tree holds a construct Zephir has no form for.
    #[error("cannot convert node kind '{kind}' in class '{class}'")]
    UnsupportedNodeKind { kind: NodeKind, class: String },

    /// A second declaration of an already registered class name.
    #[error("class '{class}' is already declared; this declaration was skipped")]
    DuplicateClass { class: String },

    #[error(transparent)]
    MalformedType(#[from] TypeError),
}
