#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use p2z_cli::args::CliArgs;
use p2z_cli::reporter::Reporter;
use p2z_cli::{config, driver, tracing_config};

/// Exit status when at least one class could not be converted.
const EXIT_CLASSES_FAILED: i32 = 1;

fn main() -> Result<()> {
    // Zero cost unless P2Z_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let config = config::resolve(&args, &cwd)?;

    let summary = driver::run(&config)?;

    let reporter = Reporter::new(std::io::stderr().is_terminal());
    eprintln!("{}", reporter.render(&summary, args.quiet));

    if summary.has_failures() {
        std::process::exit(EXIT_CLASSES_FAILED);
    }
    Ok(())
}
