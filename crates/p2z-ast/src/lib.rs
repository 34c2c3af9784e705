//! Parsed PHP tree consumed by the p2z converter.
//!
//! The tree is produced by an external parser and handed over as JSON; this
//! crate only models it. Modules:
//! - `node` - statements, expressions and declarations as closed enums
//! - `kind` - `NodeKind`, the finite tag every node exposes
//! - `walk` - depth-first traversal with the ancestor-kind chain
//! - `docblock` - reads `@param`/`@return`/`@throws` tags from doc comments

pub mod docblock;
pub mod kind;
pub mod node;
pub mod walk;

pub use docblock::{DocBlock, DocTag};
pub use kind::NodeKind;
pub use node::*;
pub use walk::{NodeRef, Visit, contains_kind, descendants};

#[cfg(test)]
#[path = "../tests/docblock_tests.rs"]
mod docblock_tests;
#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod node_tests;
#[cfg(test)]
#[path = "../tests/walk_tests.rs"]
mod walk_tests;
