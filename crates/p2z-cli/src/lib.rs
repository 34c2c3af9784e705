//! Command-line driver for the p2z converter.
//!
//! - `args` - `clap` flag definitions
//! - `config` - `p2z.json` loading and merge with the flags
//! - `driver` - input discovery, conversion, output and diagnostics files
//! - `reporter` - terminal rendering of failures and diagnostics
//! - `tracing_config` - `P2Z_LOG` subscriber setup

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;
#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod reporter_tests;
