//! Zephir printer.
//!
//! `Printer` converts one class. Every converter takes a node and returns
//! the Zephir text for it; callers concatenate. Dispatch is a closed match
//! on the node enums, so a node kind without a converter is a build error
//! rather than a runtime surprise. The few constructs Zephir cannot express
//! (`goto`, labels, `eval`, backticks, inline HTML) are routed explicitly
//! to [`ConvertError::UnsupportedNodeKind`].
//!
//! Submodules add `impl Printer` blocks by concern:
//! - `classes` - class header and members
//! - `methods` - method signature and body synthesis
//! - `variables` - collection of the locals a method body needs
//! - `statements` - statement printers and block layout
//! - `expressions` - expression printers and hoisting
//! - `dim_fetch` - indexed fetches and their temporaries
//! - `modifiers` - modifier keyword lists

mod classes;
mod dim_fetch;
mod expressions;
mod methods;
mod modifiers;
mod statements;
mod variables;

pub use expressions::{array_temp_name, list_temp_name};
pub use modifiers::modifiers_text;

use p2z_ast::{NodeKind, NodeRef};
use p2z_binder::ClassContext;
use p2z_common::{Diagnostic, DiagnosticSink};
use p2z_types::TypeResolver;

use crate::context::ConvertContext;
use crate::error::ConvertError;

pub struct Printer<'p> {
    pub(crate) class: &'p ClassContext<'p>,
    pub(crate) resolver: &'p TypeResolver<'p, 'p>,
    pub(crate) ctx: ConvertContext,
    pub(crate) diagnostics: DiagnosticSink,
    indent_unit: String,
}

impl<'p> Printer<'p> {
    pub fn new(
        class: &'p ClassContext<'p>,
        resolver: &'p TypeResolver<'p, 'p>,
        indent_width: usize,
    ) -> Self {
        Self {
            class,
            resolver,
            ctx: ConvertContext::default(),
            diagnostics: DiagnosticSink::new(),
            indent_unit: " ".repeat(indent_width),
        }
    }

    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> DiagnosticSink {
        self.diagnostics
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Convert any node to Zephir text.
    pub fn convert(&mut self, node: NodeRef<'_>) -> Result<String, ConvertError> {
        match node {
            NodeRef::Stmt(stmt) => self.convert_stmt(stmt),
            NodeRef::Expr(expr) => self.convert_expr(expr),
            NodeRef::Arg(arg) => self.convert_arg(arg),
            NodeRef::ArrayItem(item) => self.convert_array_item(item),
            NodeRef::ElseIf(elseif) => self.convert_elseif(elseif),
            NodeRef::Case(case) => self.convert_case(case),
            NodeRef::Catch(catch) => self.convert_catch(catch),
            NodeRef::StaticVar(var) => self.convert_static_var(var),
        }
    }

    pub(crate) fn unsupported<T>(&self, kind: NodeKind) -> Result<T, ConvertError> {
        tracing::debug!(%kind, class = %self.class.full_name(), "unsupported node kind");
        Err(ConvertError::UnsupportedNodeKind {
            kind,
            class: self.class.full_name().to_string(),
        })
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Label for a node inside the method being converted: `foo: param $a`.
    pub(crate) fn node_label(&self, node: &str) -> String {
        match &self.ctx.current_method {
            Some(method) => format!("{method}: {node}"),
            None => node.to_string(),
        }
    }

    pub(crate) fn incompatibility(&mut self, category: &str, message: String, node: &str) {
        let diagnostic = Diagnostic::incompatibility(
            category,
            message,
            self.node_label(node),
            self.class.full_name(),
        );
        self.diagnostics.record(diagnostic);
    }

    pub(crate) fn note(&mut self, message: String, node: &str) {
        let diagnostic =
            Diagnostic::informational(message, self.node_label(node), self.class.full_name());
        self.diagnostics.record(diagnostic);
    }

    /// Run `f` with output side effects discarded: hoisted lines and
    /// diagnostics recorded inside are dropped afterwards.
    pub(crate) fn sandboxed<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let prelude = std::mem::take(&mut self.ctx.prelude);
        let diagnostics = std::mem::take(&mut self.diagnostics);
        let hoist = std::mem::replace(&mut self.ctx.hoist_array_literals, false);

        let result = f(self);

        self.ctx.prelude = prelude;
        self.diagnostics = diagnostics;
        self.ctx.hoist_array_literals = hoist;
        result
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Queue a line to be emitted before the statement being converted.
    pub(crate) fn hoist(&mut self, line: String) {
        self.ctx.prelude.push(line);
    }

    /// Indent every non-empty line of `text` by one level.
    pub(crate) fn indent(&self, text: &str) -> String {
        text.lines()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{}{line}", self.indent_unit)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
