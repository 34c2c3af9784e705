use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the p2z binary.
#[derive(Parser, Debug)]
#[command(
    name = "p2z",
    version,
    about = "Convert parsed PHP classes to Zephir"
)]
pub struct CliArgs {
    /// Path to p2z.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Directory the .zep files are written to.
    #[arg(long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Class treated as built-in when resolving documented types (repeatable).
    #[arg(long = "known-class", alias = "knownClass")]
    pub known_classes: Vec<String>,

    /// Spaces per indentation level in the emitted code.
    #[arg(long = "indent-width", alias = "indentWidth")]
    pub indent_width: Option<usize>,

    /// Write every diagnostic to this file as JSON.
    #[arg(long = "diagnostics")]
    pub diagnostics: Option<PathBuf>,

    /// Stop at the first class that cannot be converted; nothing is written.
    #[arg(long = "fail-fast", alias = "failFast")]
    pub fail_fast: bool,

    /// Only print incompatibilities, not informational notes.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Parsed-tree files (`*.ast.json`) or directories to search for them.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,
}
