use std::fmt::Write as _;

use p2z_ast::{
    Arg, ArrayItem, CastType, Expr, IncDecOperator, NodeKind, UnaryOperator, VarName,
};
use p2z_common::limits::{ARRAY_HASH_HEX_LEN, TMP_ARRAY_PREFIX, TMP_LIST_PREFIX};
use p2z_common::sanitize;
use sha2::{Digest, Sha256};

use super::Printer;
use crate::error::ConvertError;

/// Temporary a literal array is hoisted into: `tmpArray` followed by the
/// leading hex digits of the SHA-256 of its serialized items. Structurally
/// identical arrays share a name.
pub fn array_temp_name(items: &[ArrayItem]) -> String {
    let serialized = serde_json::to_vec(items).unwrap_or_default();
    let digest = Sha256::digest(&serialized);

    let mut name = String::with_capacity(TMP_ARRAY_PREFIX.len() + ARRAY_HASH_HEX_LEN);
    name.push_str(TMP_ARRAY_PREFIX);
    for byte in digest.iter().take(ARRAY_HASH_HEX_LEN / 2) {
        let _ = write!(name, "{byte:02x}");
    }
    name
}

/// Temporary a destructured value is held in: `tmpList` followed by the
/// stem of each slot with its first letter capitalized. Built from the tree
/// alone so that naming converts nothing.
pub fn list_temp_name(items: &[Option<ArrayItem>]) -> String {
    let mut name = String::from(TMP_LIST_PREFIX);
    for item in items.iter().flatten() {
        name.push_str(&ucfirst(&slot_stem(&item.value)));
    }
    name.retain(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    name
}

/// Variable and property names a destructuring slot writes through;
/// indexes are ignored.
fn slot_stem(expr: &Expr) -> String {
    match expr {
        Expr::Variable {
            name: VarName::Literal(name),
        } => sanitize(name).into_owned(),
        Expr::ArrayDimFetch { base, .. } => slot_stem(base),
        Expr::PropertyFetch { object, property } => {
            format!("{}{}", slot_stem(object), ucfirst(property))
        }
        Expr::StaticPropertyFetch { property, .. } => property.clone(),
        Expr::List { items } => items
            .iter()
            .flatten()
            .map(|item| ucfirst(&slot_stem(&item.value)))
            .collect(),
        _ => String::new(),
    }
}

impl<'p> Printer<'p> {
    // =========================================================================
    // Expressions
    // =========================================================================

    pub(crate) fn convert_expr(&mut self, expr: &Expr) -> Result<String, ConvertError> {
        match expr {
            Expr::Variable { name } => self.convert_variable(name),
            Expr::Assign { .. } | Expr::AssignOp { .. } | Expr::IncDec { .. } => {
                // Zephir assignments are statements: hoist and use the target.
                let (line, target) = self.convert_statement_expr(expr)?;
                self.hoist(line);
                Ok(target)
            }
            Expr::PropertyFetch { object, property } => {
                Ok(format!("{}->{property}", self.convert_expr(object)?))
            }
            Expr::StaticPropertyFetch { class, property } => Ok(format!("{class}::{property}")),
            Expr::ArrayDimFetch { base, dim } => self.convert_dim_fetch(base, dim.as_deref()),
            Expr::List { items } => {
                let slots = items
                    .iter()
                    .map(|item| match item {
                        Some(item) => self.convert_array_item(item),
                        None => Ok(String::new()),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("[{}]", slots.join(", ")))
            }
            Expr::Array { items } => self.convert_array(items, self.ctx.hoist_array_literals),
            Expr::FuncCall { name, args } => Ok(format!("{name}({})", self.convert_args(args)?)),
            Expr::MethodCall {
                object,
                method,
                args,
            } => {
                let object = self.convert_expr(object)?;
                Ok(format!("{object}->{method}({})", self.convert_args(args)?))
            }
            Expr::StaticCall {
                class,
                method,
                args,
            } => Ok(format!("{class}::{method}({})", self.convert_args(args)?)),
            Expr::New { class, args } => Ok(format!("new {class}({})", self.convert_args(args)?)),
            Expr::ClassConstFetch { class, constant } => Ok(format!("{class}::{constant}")),
            Expr::ConstFetch { name } => Ok(name.to_string()),
            Expr::String { value } => Ok(quote(value)),
            Expr::Int { value } => Ok(value.to_string()),
            Expr::Float { value } => Ok(format!("{value:?}")),
            Expr::BinaryOp { op, left, right } => {
                let left = self.convert_operand(left)?;
                let right = self.convert_operand(right)?;
                Ok(format!("{left} {} {right}", op.as_str()))
            }
            Expr::UnaryOp { op, operand } => {
                let symbol = match op {
                    UnaryOperator::Not => "!",
                    UnaryOperator::Minus => "-",
                    UnaryOperator::Plus => "+",
                    UnaryOperator::BitNot => "~",
                };
                Ok(format!("{symbol}{}", self.convert_operand(operand)?))
            }
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => {
                let cond = self.convert_operand(cond)?;
                let then = match then {
                    Some(then) => self.convert_operand(then)?,
                    None => cond.clone(),
                };
                let otherwise = self.convert_operand(otherwise)?;
                Ok(format!("{cond} ? {then} : {otherwise}"))
            }
            Expr::Isset { vars } => {
                let checks = vars
                    .iter()
                    .map(|var| -> Result<String, ConvertError> {
                        Ok(format!("isset {}", self.convert_expr(var)?))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(checks.join(" && "))
            }
            Expr::Empty { expr } => Ok(format!("empty {}", self.convert_operand(expr)?)),
            Expr::Instanceof { expr, class } => {
                Ok(format!("{} instanceof {class}", self.convert_operand(expr)?))
            }
            Expr::Cast { to, expr } => {
                let keyword = match to {
                    CastType::Int => "int",
                    CastType::Float => "double",
                    CastType::String => "string",
                    CastType::Bool => "boolean",
                    CastType::Array => "array",
                    CastType::Object => "object",
                };
                Ok(format!("({keyword}) {}", self.convert_operand(expr)?))
            }
            Expr::Eval { .. } => self.unsupported(NodeKind::Eval),
            Expr::ShellExec { .. } => self.unsupported(NodeKind::ShellExec),
        }
    }

    /// Convert a sub-expression, parenthesized when it binds looser than a
    /// unary or binary operand.
    pub(crate) fn convert_operand(&mut self, expr: &Expr) -> Result<String, ConvertError> {
        let text = self.convert_expr(expr)?;
        Ok(match expr {
            Expr::BinaryOp { .. } | Expr::Ternary { .. } | Expr::Instanceof { .. } => {
                format!("({text})")
            }
            _ => text,
        })
    }

    fn convert_variable(&mut self, name: &VarName) -> Result<String, ConvertError> {
        match name {
            VarName::Literal(name) => Ok(sanitize(name).into_owned()),
            VarName::Dynamic(inner) => Ok(format!("{{{}}}", self.convert_expr(inner)?)),
        }
    }

    // =========================================================================
    // Assignments
    // =========================================================================

    /// Statement form of an expression together with the text its value can
    /// be read back from (the target, for assignments).
    pub(crate) fn convert_statement_expr(
        &mut self,
        expr: &Expr,
    ) -> Result<(String, String), ConvertError> {
        match expr {
            Expr::Assign {
                target,
                value,
                by_ref,
            } => {
                if *by_ref {
                    self.incompatibility(
                        "reference",
                        "Assignment by reference not supported".to_string(),
                        "assign",
                    );
                }
                if let Expr::List { items } = target.as_ref() {
                    return self.lower_destructuring(items, value);
                }
                let value = self.convert_expr(value)?;
                let target = self.convert_expr(target)?;
                Ok((format!("let {target} = {value};"), target))
            }
            Expr::AssignOp { op, target, value } => {
                let value = self.convert_expr(value)?;
                let target = self.convert_expr(target)?;
                Ok((format!("let {target} {}= {value};", op.as_str()), target))
            }
            Expr::IncDec { op, target } => {
                let target = self.convert_expr(target)?;
                let suffix = match op {
                    IncDecOperator::PreInc | IncDecOperator::PostInc => "++",
                    IncDecOperator::PreDec | IncDecOperator::PostDec => "--",
                };
                Ok((format!("let {target}{suffix};"), target))
            }
            other => {
                let text = self.convert_expr(other)?;
                Ok((format!("{text};"), text))
            }
        }
    }

    /// `[$a, $b] = $x` becomes `let tmpListAB = x;` followed by one `let`
    /// per slot reading from the temporary.
    fn lower_destructuring(
        &mut self,
        items: &[Option<ArrayItem>],
        value: &Expr,
    ) -> Result<(String, String), ConvertError> {
        let temp = list_temp_name(items);
        let value = self.convert_expr(value)?;
        let mut lines = vec![format!("let {temp} = {value};")];
        self.destructure_into(&temp, items, &mut lines)?;
        Ok((lines.join("\n"), temp))
    }

    fn destructure_into(
        &mut self,
        source: &str,
        items: &[Option<ArrayItem>],
        lines: &mut Vec<String>,
    ) -> Result<(), ConvertError> {
        for (position, item) in items.iter().enumerate() {
            let Some(item) = item else {
                continue;
            };
            let index = match &item.key {
                Some(key) => self.convert_expr(key)?,
                None => position.to_string(),
            };
            match &item.value {
                Expr::List { items: nested } => {
                    let temp = list_temp_name(nested);
                    lines.push(format!("let {temp} = {source}[{index}];"));
                    self.destructure_into(&temp, nested, lines)?;
                }
                target => {
                    let target = self.convert_expr(target)?;
                    lines.push(format!("let {target} = {source}[{index}];"));
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Calls and arrays
    // =========================================================================

    pub(crate) fn convert_args(&mut self, args: &[Arg]) -> Result<String, ConvertError> {
        let args = args
            .iter()
            .map(|arg| self.convert_arg(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(args.join(", "))
    }

    /// A literal array passed as an argument is hoisted into a temporary.
    pub(crate) fn convert_arg(&mut self, arg: &Arg) -> Result<String, ConvertError> {
        if arg.unpack {
            self.incompatibility(
                "unpack",
                "Argument unpacking not supported".to_string(),
                "argument",
            );
        }
        match &arg.value {
            Expr::Array { items } => self.convert_array(items, true),
            value => self.convert_expr(value),
        }
    }

    /// Render a literal array; with `hoist` it is assigned to its
    /// `tmpArray` temporary first and the temporary is returned.
    pub(crate) fn convert_array(
        &mut self,
        items: &[ArrayItem],
        hoist: bool,
    ) -> Result<String, ConvertError> {
        let entries = items
            .iter()
            .map(|item| self.convert_array_item(item))
            .collect::<Result<Vec<_>, _>>()?;
        let literal = format!("[{}]", entries.join(", "));
        if !hoist {
            return Ok(literal);
        }

        let temp = array_temp_name(items);
        self.hoist(format!("let {temp} = {literal};"));
        Ok(temp)
    }

    pub(crate) fn convert_array_item(&mut self, item: &ArrayItem) -> Result<String, ConvertError> {
        if item.by_ref {
            self.incompatibility(
                "reference",
                "Reference not supported in array item".to_string(),
                "array item",
            );
        }
        if item.unpack {
            self.incompatibility(
                "unpack",
                "Array unpacking not supported".to_string(),
                "array item",
            );
        }
        let key = match &item.key {
            Some(key) => Some(self.convert_expr(key)?),
            None => None,
        };
        let value = self.convert_expr(&item.value)?;
        Ok(match key {
            Some(key) => format!("{key}: {value}"),
            None => value,
        })
    }
}

/// Zephir double-quoted string literal.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn ucfirst(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
