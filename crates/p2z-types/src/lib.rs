//! Type vocabulary and type resolution for the p2z converter.
//!
//! - `types` - `TypeDescriptor` and the ordered, deduplicated `TypeUnion`
//! - `known_classes` - the ambient class universe (built-in PHP classes)
//! - `resolver` - merges native declarations with doc-block tags into
//!   `MethodTypeInfo`

pub mod known_classes;
pub mod resolver;
pub mod types;

pub use known_classes::KnownClasses;
pub use resolver::{EXCLUDED_TYPES, MethodTypeInfo, ParamDefinition, PRIMITIVE_TYPES, TypeResolver};
pub use types::{ParamType, TypeDescriptor, TypeError, TypeUnion};

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod types_tests;
#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod resolver_tests;
