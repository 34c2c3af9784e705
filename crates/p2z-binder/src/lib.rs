//! Name binding for the p2z converter.
//!
//! - `registry` - whole-program map from fully qualified class name to its
//!   declaration, built in a first pass over every input file
//! - `context` - per-class snapshot of namespace, imports and implemented
//!   interfaces, threaded through the conversion of that class

pub mod context;
pub mod registry;

pub use context::ClassContext;
pub use registry::{ClassRegistry, LookupError, RegisteredClass, find_method, qualified_name};

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod registry_tests;
#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod context_tests;
