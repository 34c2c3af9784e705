//! Zephir emitter for the p2z converter.
//!
//! Turns parsed PHP classes into Zephir source text:
//! - `printer` - `Printer`, the per-class converter (dispatch, classes,
//!   methods, variable collection, statements, expressions)
//! - `context` - per-method conversion state
//! - `program` - two-phase whole-program driver
//! - `options` - conversion knobs
//! - `error` - fatal conversion errors
//!
//! Output is returned in memory; writing files is left to the caller.

pub mod context;
pub mod error;
pub mod options;
pub mod printer;
pub mod program;

pub use context::ConvertContext;
pub use error::ConvertError;
pub use options::ConvertOptions;
pub use printer::{Printer, array_temp_name, list_temp_name, modifiers_text};
pub use program::{ClassOutput, ProgramOutput, convert_class, convert_program};

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;
#[cfg(test)]
#[path = "../tests/expressions_tests.rs"]
mod expressions_tests;
#[cfg(test)]
#[path = "../tests/statements_tests.rs"]
mod statements_tests;
#[cfg(test)]
#[path = "../tests/methods_tests.rs"]
mod methods_tests;
#[cfg(test)]
#[path = "../tests/variables_tests.rs"]
mod variables_tests;
#[cfg(test)]
#[path = "../tests/program_tests.rs"]
mod program_tests;
