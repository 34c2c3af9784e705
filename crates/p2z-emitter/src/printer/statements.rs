use p2z_ast::{Case, Catch, ElseIf, Expr, Name, NodeKind, StaticVar, Stmt};
use p2z_common::sanitize;

use super::Printer;
use crate::error::ConvertError;

impl<'p> Printer<'p> {
    // =========================================================================
    // Blocks
    // =========================================================================

    /// Convert a statement list, one statement per line (nested blocks span
    /// several). Lines hoisted while converting a statement are placed right
    /// before it. The result is not indented.
    pub(crate) fn print_stmts(&mut self, stmts: &[Stmt]) -> Result<String, ConvertError> {
        let outer = std::mem::take(&mut self.ctx.prelude);
        let mut lines = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            let text = self.convert_stmt(stmt)?;
            lines.append(&mut self.ctx.prelude);
            if !text.is_empty() {
                lines.push(text);
            }
        }
        self.ctx.prelude = outer;
        Ok(lines.join("\n"))
    }

    /// `{ ... }` with the statements indented one level.
    pub(crate) fn print_block(&mut self, stmts: &[Stmt]) -> Result<String, ConvertError> {
        let body = self.print_stmts(stmts)?;
        Ok(self.wrap_block(&body))
    }

    fn wrap_block(&self, body: &str) -> String {
        if body.is_empty() {
            "{\n}".to_string()
        } else {
            format!("{{\n{}\n}}", self.indent(body))
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn convert_stmt(&mut self, stmt: &Stmt) -> Result<String, ConvertError> {
        match stmt {
            Stmt::Expression { expr } => Ok(self.convert_statement_expr(expr)?.0),
            Stmt::Return { expr } => match expr {
                None => Ok("return;".to_string()),
                Some(Expr::Array { items }) => {
                    Ok(format!("return {};", self.convert_array(items, true)?))
                }
                Some(expr) => Ok(format!("return {};", self.convert_expr(expr)?)),
            },
            Stmt::If {
                cond,
                then,
                elseifs,
                otherwise,
            } => self.convert_if(cond, then, elseifs, otherwise.as_deref()),
            Stmt::While { cond, body } => self.convert_while(cond, body),
            Stmt::DoWhile { body, cond } => self.convert_do_while(body, cond),
            Stmt::For {
                init,
                cond,
                step,
                body,
            } => self.convert_for(init, cond, step, body),
            Stmt::Foreach {
                expr,
                key,
                value,
                by_ref,
                body,
            } => {
                if *by_ref {
                    self.incompatibility(
                        "reference",
                        "Reference not supported in foreach".to_string(),
                        "foreach",
                    );
                }
                let subject = self.convert_expr(expr)?;
                let value = self.convert_expr(value)?;
                let head = match key {
                    Some(key) => format!("{}, {value}", self.convert_expr(key)?),
                    None => value,
                };
                let body = self.in_loop(Vec::new(), |printer| printer.print_block(body))?;
                Ok(format!("for {head} in {subject} {body}"))
            }
            Stmt::Switch { subject, cases } => {
                let subject = self.convert_expr(subject)?;
                let cases = cases
                    .iter()
                    .map(|case| self.convert_case(case))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("switch {subject} {}", self.wrap_block(&cases.join("\n"))))
            }
            Stmt::Static { vars } => {
                let names = vars
                    .iter()
                    .map(|var| format!("${}", var.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.incompatibility(
                    "static",
                    format!("Static variable(s) {names} converted to locals"),
                    "static",
                );
                let lines = vars
                    .iter()
                    .map(|var| self.convert_static_var(var))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(lines.join("\n"))
            }
            Stmt::TryCatch {
                body,
                catches,
                finally,
            } => {
                let mut out = format!("try {}", self.print_block(body)?);
                for catch in catches {
                    out.push(' ');
                    out.push_str(&self.convert_catch(catch)?);
                }
                if let Some(finally) = finally {
                    self.incompatibility(
                        "finally",
                        "Finally not supported, its body runs after the try".to_string(),
                        "finally",
                    );
                    let tail = self.print_stmts(finally)?;
                    if !tail.is_empty() {
                        out.push('\n');
                        out.push_str(&tail);
                    }
                }
                Ok(out)
            }
            Stmt::Throw { expr } => Ok(format!("throw {};", self.convert_expr(expr)?)),
            Stmt::Break => Ok("break;".to_string()),
            Stmt::Continue => match self.ctx.loop_continues.last() {
                Some(pending) if !pending.is_empty() => {
                    Ok(format!("{}\ncontinue;", pending.join("\n")))
                }
                _ => Ok("continue;".to_string()),
            },
            Stmt::Echo { exprs } => {
                let parts = exprs
                    .iter()
                    .map(|expr| self.convert_expr(expr))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("echo {};", parts.join(", ")))
            }
            Stmt::Unset { vars } => {
                let lines = vars
                    .iter()
                    .map(|var| -> Result<String, ConvertError> {
                        Ok(format!("unset {};", self.convert_expr(var)?))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(lines.join("\n"))
            }
            Stmt::Goto { .. } => self.unsupported(NodeKind::Goto),
            Stmt::Label { .. } => self.unsupported(NodeKind::Label),
            Stmt::InlineHtml { .. } => self.unsupported(NodeKind::InlineHtml),
            Stmt::Nop => Ok(String::new()),
        }
    }

    fn convert_if(
        &mut self,
        cond: &Expr,
        then: &[Stmt],
        elseifs: &[ElseIf],
        otherwise: Option<&[Stmt]>,
    ) -> Result<String, ConvertError> {
        let hoist = std::mem::replace(&mut self.ctx.hoist_array_literals, true);
        let cond = self.convert_expr(cond);
        self.ctx.hoist_array_literals = hoist;
        self.convert_if_chain(cond?, then, elseifs, otherwise)
    }

    /// An `elseif` whose condition hoists lines is split into
    /// `else { <hoisted> if ... }` so those lines only run when reached.
    fn convert_if_chain(
        &mut self,
        cond: String,
        then: &[Stmt],
        elseifs: &[ElseIf],
        otherwise: Option<&[Stmt]>,
    ) -> Result<String, ConvertError> {
        let mut out = format!("if {cond} {}", self.print_block(then)?);
        for (position, elseif) in elseifs.iter().enumerate() {
            let (cond, mut hoisted) = self.convert_isolated(&elseif.cond)?;
            if hoisted.is_empty() {
                out.push_str(&format!(" elseif {cond} {}", self.print_block(&elseif.body)?));
                continue;
            }
            let rest = &elseifs[position + 1..];
            hoisted.push(self.convert_if_chain(cond, &elseif.body, rest, otherwise)?);
            out.push_str(" else ");
            out.push_str(&self.wrap_block(&hoisted.join("\n")));
            return Ok(out);
        }
        if let Some(otherwise) = otherwise {
            out.push_str(" else ");
            out.push_str(&self.print_block(otherwise)?);
        }
        Ok(out)
    }

    pub(crate) fn convert_elseif(&mut self, elseif: &ElseIf) -> Result<String, ConvertError> {
        let cond = self.convert_expr(&elseif.cond)?;
        Ok(format!("elseif {cond} {}", self.print_block(&elseif.body)?))
    }

    // =========================================================================
    // Loops
    // =========================================================================

    /// A condition that hoists lines must run them on every iteration, so
    /// the loop becomes `loop { <hoisted> if !(cond) { break; } ... }`.
    fn convert_while(&mut self, cond: &Expr, body: &[Stmt]) -> Result<String, ConvertError> {
        let (cond, mut checks) = self.convert_isolated(cond)?;
        if checks.is_empty() {
            let body = self.in_loop(Vec::new(), |printer| printer.print_block(body))?;
            return Ok(format!("while {cond} {body}"));
        }
        checks.push(self.break_unless(&cond));
        let body = self.in_loop(Vec::new(), |printer| printer.print_stmts(body))?;
        if !body.is_empty() {
            checks.push(body);
        }
        Ok(format!("loop {}", self.wrap_block(&checks.join("\n"))))
    }

    /// With a hoisting condition the check moves to the end of a `loop`; a
    /// `continue` runs it too.
    fn convert_do_while(&mut self, body: &[Stmt], cond: &Expr) -> Result<String, ConvertError> {
        let (cond, mut checks) = self.convert_isolated(cond)?;
        if checks.is_empty() {
            let body = self.in_loop(Vec::new(), |printer| printer.print_block(body))?;
            return Ok(format!("do {body} while {cond};"));
        }
        checks.push(self.break_unless(&cond));
        let body = self.in_loop(checks.clone(), |printer| printer.print_stmts(body))?;
        let mut lines = Vec::with_capacity(checks.len() + 1);
        if !body.is_empty() {
            lines.push(body);
        }
        lines.extend(checks);
        Ok(format!("loop {}", self.wrap_block(&lines.join("\n"))))
    }

    /// `for` has no Zephir counterpart outside ranges: initializers become
    /// statements and the loop a `while` with the step appended to its body
    /// and repeated before every `continue`. Every condition but the last
    /// runs as a statement; when any exists the loop becomes a `loop` that
    /// breaks on the last one.
    fn convert_for(
        &mut self,
        init: &[Expr],
        cond: &[Expr],
        step: &[Expr],
        body: &[Stmt],
    ) -> Result<String, ConvertError> {
        let mut lines = Vec::new();
        for expr in init {
            lines.extend(self.statement_lines(expr)?);
        }

        let mut checks = Vec::new();
        let test = match cond.split_last() {
            Some((last, leading)) => {
                for expr in leading {
                    checks.extend(self.statement_lines(expr)?);
                }
                let (test, hoisted) = self.convert_isolated(last)?;
                checks.extend(hoisted);
                test
            }
            None => "true".to_string(),
        };

        let mut steps = Vec::new();
        for expr in step {
            steps.extend(self.statement_lines(expr)?);
        }

        let mut inner = Vec::new();
        let body = self.in_loop(steps.clone(), |printer| printer.print_stmts(body))?;
        if !body.is_empty() {
            inner.push(body);
        }
        inner.extend(steps);

        if checks.is_empty() {
            lines.push(format!("while {test} {}", self.wrap_block(&inner.join("\n"))));
        } else {
            checks.push(self.break_unless(&test));
            checks.extend(inner);
            lines.push(format!("loop {}", self.wrap_block(&checks.join("\n"))));
        }
        Ok(lines.join("\n"))
    }

    /// Run `f` as the body of a loop whose `continue` must first emit
    /// `on_continue`.
    fn in_loop<T>(
        &mut self,
        on_continue: Vec<String>,
        f: impl FnOnce(&mut Self) -> Result<T, ConvertError>,
    ) -> Result<T, ConvertError> {
        self.ctx.loop_continues.push(on_continue);
        let result = f(self);
        self.ctx.loop_continues.pop();
        result
    }

    /// `expr` as a statement, preceded by whatever it hoisted.
    fn statement_lines(&mut self, expr: &Expr) -> Result<Vec<String>, ConvertError> {
        let outer = std::mem::take(&mut self.ctx.prelude);
        let line = self.convert_statement_expr(expr);
        let mut lines = std::mem::replace(&mut self.ctx.prelude, outer);
        lines.push(line?.0);
        Ok(lines)
    }

    /// Convert `expr` keeping the lines it hoists apart from the current
    /// statement's prelude.
    fn convert_isolated(&mut self, expr: &Expr) -> Result<(String, Vec<String>), ConvertError> {
        let outer = std::mem::take(&mut self.ctx.prelude);
        let text = self.convert_expr(expr);
        let hoisted = std::mem::replace(&mut self.ctx.prelude, outer);
        Ok((text?, hoisted))
    }

    fn break_unless(&self, cond: &str) -> String {
        format!("if !({cond}) {}", self.wrap_block("break;"))
    }

    // =========================================================================
    // Clauses
    // =========================================================================

    pub(crate) fn convert_case(&mut self, case: &Case) -> Result<String, ConvertError> {
        let head = match &case.test {
            Some(test) => format!("case {}:", self.convert_expr(test)?),
            None => "default:".to_string(),
        };
        let body = self.print_stmts(&case.body)?;
        if body.is_empty() {
            Ok(head)
        } else {
            Ok(format!("{head}\n{}", self.indent(&body)))
        }
    }

    /// `catch A|B, e { ... }`; the variable is omitted when none is bound.
    pub(crate) fn convert_catch(&mut self, catch: &Catch) -> Result<String, ConvertError> {
        let types = catch
            .types
            .iter()
            .map(Name::to_string)
            .collect::<Vec<_>>()
            .join("|");
        let head = match &catch.var {
            Some(var) => format!("catch {types}, {}", sanitize(var)),
            None => format!("catch {types}"),
        };
        Ok(format!("{head} {}", self.print_block(&catch.body)?))
    }

    /// A static variable becomes a plain local initialized to its default.
    pub(crate) fn convert_static_var(&mut self, var: &StaticVar) -> Result<String, ConvertError> {
        let value = match &var.default {
            Some(default) => self.convert_expr(default)?,
            None => "null".to_string(),
        };
        Ok(format!("let {} = {value};", sanitize(&var.name)))
    }
}
