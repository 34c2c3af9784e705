//! Discovery, conversion and output writing for one run.

use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use p2z_ast::SourceFile;
use p2z_common::Diagnostic;
use p2z_emitter::convert_program;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ResolvedConfig;

/// Suffix of the parsed-tree files searched for in input directories.
pub const AST_FILE_SUFFIX: &str = ".ast.json";

/// A class that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFailure {
    pub class: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub inputs: usize,
    /// `.zep` files written, in class order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<ClassFailure>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

pub fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .with_context(|| format!("invalid exclude pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build exclude patterns")
}

/// Every parsed-tree file under `roots`, sorted and deduplicated. A root
/// naming a file is taken as is; directories are searched recursively for
/// `*.ast.json`. Excludes match the path relative to `base_dir`.
pub fn discover_inputs(
    roots: &[PathBuf],
    base_dir: &Path,
    exclude: &GlobSet,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            bail!("input not found: {}", root.display());
        }
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            let path = entry.path();
            let is_ast = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(AST_FILE_SUFFIX));
            if !entry.file_type().is_file() || !is_ast {
                continue;
            }
            let relative = path.strip_prefix(base_dir).unwrap_or(path);
            if exclude.is_match(relative) {
                tracing::trace!(path = %path.display(), "excluded");
                continue;
            }
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

pub fn read_source(path: &Path) -> Result<SourceFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut file: SourceFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse tree in {}", path.display()))?;
    if file.path.is_none() {
        file.path = Some(path.display().to_string());
    }
    Ok(file)
}

/// Convert every input and write the results under the output directory.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run(config: &ResolvedConfig) -> Result<RunSummary> {
    let exclude = build_exclude_set(&config.exclude)?;
    let paths = discover_inputs(&config.inputs, &config.base_dir, &exclude)?;
    tracing::debug!(inputs = paths.len(), "discovered inputs");

    let sources = paths
        .iter()
        .map(|path| read_source(path))
        .collect::<Result<Vec<_>>>()?;

    let output = convert_program(&sources, &config.options);

    if config.fail_fast
        && let Some(failed) = output.failures().next()
        && let Err(err) = &failed.result
    {
        bail!("cannot convert {}: {err}", failed.name);
    }

    let mut summary = RunSummary {
        inputs: paths.len(),
        ..RunSummary::default()
    };
    for class in &output.classes {
        match &class.result {
            Ok(text) => {
                let target = config.out_dir.join(class.relative_path());
                write_output(&target, text)?;
                summary.written.push(target);
            }
            Err(err) => summary.failures.push(ClassFailure {
                class: class.name.clone(),
                message: err.to_string(),
            }),
        }
    }
    summary.diagnostics = output.diagnostics.into_vec();

    if let Some(path) = &config.diagnostics_file {
        write_diagnostics(path, &summary.diagnostics)?;
    }
    Ok(summary)
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

pub fn write_diagnostics(path: &Path, diagnostics: &[Diagnostic]) -> Result<()> {
    let json =
        serde_json::to_string_pretty(diagnostics).context("failed to serialize diagnostics")?;
    write_output(path, &json)
}
