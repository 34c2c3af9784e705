use colored::Colorize;
use p2z_common::{Diagnostic, DiagnosticKind};

use crate::driver::{ClassFailure, RunSummary};

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// `App\Foo - incompatibility [reference]: message (foo: param $a)`
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = format!("{} - {}", diagnostic.class, self.format_kind(diagnostic.kind));
        if let Some(category) = &diagnostic.category {
            output.push_str(&format!(" [{category}]"));
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        output.push_str(&format!(" ({})", diagnostic.node));
        output
    }

    pub fn format_failure(&self, failure: &ClassFailure) -> String {
        let label = if self.color {
            "error".red().bold().to_string()
        } else {
            "error".to_string()
        };
        format!("{} - {label}: {}", failure.class, failure.message)
    }

    pub fn format_summary(&self, summary: &RunSummary) -> String {
        let line = format!(
            "{} input file(s), {} class(es) written, {} failed, {} diagnostic(s)",
            summary.inputs,
            summary.written.len(),
            summary.failures.len(),
            summary.diagnostics.len()
        );
        if !self.color {
            return line;
        }
        if summary.has_failures() {
            line.red().to_string()
        } else {
            line.green().to_string()
        }
    }

    /// Every failure, then the diagnostics (informational ones unless
    /// `quiet`), then the summary line.
    pub fn render(&self, summary: &RunSummary, quiet: bool) -> String {
        let mut lines: Vec<String> = summary
            .failures
            .iter()
            .map(|failure| self.format_failure(failure))
            .collect();
        lines.extend(
            summary
                .diagnostics
                .iter()
                .filter(|d| !quiet || d.kind == DiagnosticKind::Incompatibility)
                .map(|d| self.format_diagnostic(d)),
        );
        lines.push(self.format_summary(summary));
        lines.join("\n")
    }

    fn format_kind(&self, kind: DiagnosticKind) -> String {
        let label = match kind {
            DiagnosticKind::Incompatibility => "incompatibility",
            DiagnosticKind::Informational => "info",
        };
        if !self.color {
            return label.to_string();
        }
        match kind {
            DiagnosticKind::Incompatibility => label.yellow().bold().to_string(),
            DiagnosticKind::Informational => label.cyan().to_string(),
        }
    }
}
