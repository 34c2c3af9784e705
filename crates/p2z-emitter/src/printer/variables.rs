//! Local variable collection.
//!
//! Zephir wants every local declared up front, so the body is walked once
//! before it is printed. Besides the variables the source names, the
//! collector predicts the temporaries the printers will synthesize
//! (`tmpArray<hash>`, `tmpList<Slots>`, `tmpDim<N>`), using the same naming
//! helpers so the two always agree.

use indexmap::IndexSet;
use p2z_ast::{ArrayItem, Expr, NodeKind, NodeRef, Stmt, descendants};
use p2z_common::limits::is_ambient_global;
use p2z_common::sanitize;

use super::Printer;
use super::expressions::{array_temp_name, list_temp_name};

impl<'p> Printer<'p> {
    /// Names to declare in the method's `var` line: sanitized, deduplicated
    /// in first-seen order, without parameters and ambient globals.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn collect_variables(&mut self, body: &[Stmt], params: &[&str]) -> Vec<String> {
        let raw = self.sandboxed(|printer| printer.gather_names(body));
        self.ctx.reset_temporaries();

        let vars: IndexSet<String> = raw
            .iter()
            .filter(|name| !name.is_empty() && !is_ambient_global(name))
            .map(|name| sanitize(name).into_owned())
            .filter(|name| !params.contains(&name.as_str()))
            .collect();
        tracing::trace!(count = vars.len(), "collected variables");
        vars.into_iter().collect()
    }

    fn gather_names(&mut self, body: &[Stmt]) -> Vec<String> {
        let mut names = Vec::new();
        for visit in descendants(body) {
            match visit.node {
                NodeRef::Expr(expr) => match expr {
                    Expr::Assign { target, .. } => match target.as_ref() {
                        Expr::List { items } => collect_list(items, &mut names),
                        target => names.extend(target.literal_var_name().map(str::to_string)),
                    },
                    Expr::Variable { .. } => {
                        names.extend(expr.literal_var_name().map(str::to_string));
                    }
                    Expr::ArrayDimFetch { .. } if !visit.has_ancestor(NodeKind::ArrayDimFetch) => {
                        names.extend(self.probe_dim_fetch(expr));
                    }
                    _ => {}
                },
                NodeRef::Stmt(stmt) => match stmt {
                    Stmt::Foreach { key, value, .. } => {
                        names.extend(
                            key.iter()
                                .chain(Some(value))
                                .filter_map(Expr::literal_var_name)
                                .map(str::to_string),
                        );
                    }
                    Stmt::For { init, .. } => {
                        for expr in init {
                            if let Expr::Assign { target, .. } = expr {
                                names.extend(target.literal_var_name().map(str::to_string));
                            }
                        }
                    }
                    Stmt::If { cond, .. } => {
                        for inner in descendants([cond]) {
                            if let NodeRef::Expr(Expr::Array { items }) = inner.node {
                                names.push(array_temp_name(items));
                            }
                        }
                    }
                    Stmt::Return {
                        expr: Some(Expr::Array { items }),
                    } => names.push(array_temp_name(items)),
                    _ => {}
                },
                // The bound variable is what the handler reads; a catch has
                // no separate type alias to declare.
                NodeRef::Catch(catch) => names.extend(catch.var.clone()),
                NodeRef::StaticVar(var) => names.push(var.name.clone()),
                NodeRef::Arg(arg) => {
                    if let Expr::Array { items } = &arg.value {
                        names.push(array_temp_name(items));
                    }
                }
                NodeRef::ArrayItem(_) | NodeRef::ElseIf(_) | NodeRef::Case(_) => {}
            }
        }
        names
    }
}

/// Slot names of a destructuring target, nested lists included, plus
/// the `tmpList` temporary holding each list's value.
fn collect_list(items: &[Option<ArrayItem>], names: &mut Vec<String>) {
    for item in items.iter().flatten() {
        match &item.value {
            Expr::List { items: nested } => collect_list(nested, names),
            value => names.extend(value.literal_var_name().map(str::to_string)),
        }
    }
    names.push(list_temp_name(items));
}
