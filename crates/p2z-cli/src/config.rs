//! `p2z.json` project file and its merge with command-line flags.
//!
//! ```json
//! {
//!   "include": ["build/ast"],
//!   "exclude": ["**/tests/**"],
//!   "outDir": "ext/app",
//!   "knownClasses": ["Carbon\\Carbon"],
//!   "indentWidth": 4,
//!   "diagnosticsFile": "p2z-diagnostics.json"
//! }
//! ```
//!
//! Paths in the file are relative to the file's directory; paths given on
//! the command line are relative to the working directory. Flags win.

use anyhow::{Context, Result, bail};
use p2z_emitter::ConvertOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "p2z.json";

/// Output directory used when neither the file nor the flags name one.
pub const DEFAULT_OUT_DIR: &str = "zephir";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub include: Vec<PathBuf>,
    /// Glob patterns matched against input paths relative to the project.
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub known_classes: Vec<String>,
    #[serde(default)]
    pub indent_width: Option<usize>,
    #[serde(default)]
    pub diagnostics_file: Option<PathBuf>,
}

/// Settings for one run, after merging the project file and the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub base_dir: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub exclude: Vec<String>,
    pub out_dir: PathBuf,
    pub options: ConvertOptions,
    pub diagnostics_file: Option<PathBuf>,
    pub fail_fast: bool,
}

pub fn parse_config(source: &str) -> Result<ProjectConfig> {
    serde_json::from_str(source).context("failed to parse p2z.json")
}

pub fn load_config(path: &Path) -> Result<ProjectConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("invalid config: {}", path.display()))
}

pub(crate) fn find_config(cwd: &Path) -> Option<PathBuf> {
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Config file named by `--project`, or `p2z.json` in `cwd` when present.
pub fn resolve_config_path(cwd: &Path, project: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(project) = project else {
        return Ok(find_config(cwd));
    };

    let mut candidate = cwd.join(project);
    if candidate.is_dir() {
        candidate = candidate.join(CONFIG_FILE_NAME);
    }
    if !candidate.exists() {
        bail!("p2z.json not found at {}", candidate.display());
    }
    if !candidate.is_file() {
        bail!("project path is not a file: {}", candidate.display());
    }
    Ok(Some(candidate))
}

/// Merge the project file (if any) with the flags.
pub fn resolve(args: &CliArgs, cwd: &Path) -> Result<ResolvedConfig> {
    let config_path = resolve_config_path(cwd, args.project.as_deref())?;
    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => ProjectConfig::default(),
    };
    let base_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
    tracing::debug!(config = ?config_path, base = %base_dir.display(), "resolved project");

    let inputs = if !args.inputs.is_empty() {
        args.inputs.iter().map(|path| cwd.join(path)).collect()
    } else if !config.include.is_empty() {
        config.include.iter().map(|path| base_dir.join(path)).collect()
    } else {
        vec![base_dir.clone()]
    };

    let out_dir = match (&args.out_dir, &config.out_dir) {
        (Some(flag), _) => cwd.join(flag),
        (None, Some(file)) => base_dir.join(file),
        (None, None) => base_dir.join(DEFAULT_OUT_DIR),
    };

    let diagnostics_file = match (&args.diagnostics, &config.diagnostics_file) {
        (Some(flag), _) => Some(cwd.join(flag)),
        (None, Some(file)) => Some(base_dir.join(file)),
        (None, None) => None,
    };

    let defaults = ConvertOptions::default();
    let mut known_classes = config.known_classes;
    known_classes.extend(args.known_classes.iter().cloned());
    let options = ConvertOptions {
        known_classes,
        indent_width: args
            .indent_width
            .or(config.indent_width)
            .unwrap_or(defaults.indent_width),
    };

    Ok(ResolvedConfig {
        base_dir,
        inputs,
        exclude: config.exclude,
        out_dir,
        options,
        diagnostics_file,
        fail_fast: args.fail_fast,
    })
}
