//! Method declarations.
//!
//! ```text
//! public function sum(int a, b = 1) -> int
//! {
//!     var total;
//!
//!     let total = a + b;
//!     return total;
//! }
//! ```
//!
//! The `var` line lists every local the body needs (see `variables`); it is
//! left out when there are none. Methods without a body end with `;`.

use p2z_ast::{Method, NodeKind, Param, TypeHint, contains_kind};
use p2z_types::{MethodTypeInfo, ParamDefinition, ParamType, TypeError};

use super::Printer;
use super::modifiers::{modifiers_text, with_default_visibility};
use crate::context::ConvertContext;
use crate::error::ConvertError;

impl<'p> Printer<'p> {
    #[tracing::instrument(level = "debug", skip_all, fields(method = %method.name))]
    pub fn print_method(&mut self, method: &Method) -> Result<String, ConvertError> {
        self.ctx = ConvertContext::for_method(&method.name);

        let info = self
            .resolver
            .method_types(method, self.class, &mut self.diagnostics)?;

        self.report_references(method);

        let params = method
            .params
            .iter()
            .zip(&info.params)
            .map(|(param, definition)| self.print_param(param, definition))
            .collect::<Result<Vec<_>, _>>()?;
        self.ctx.prelude.clear();

        let mut out = format!(
            "{}function {}({})",
            modifiers_text(with_default_visibility(method.flags)),
            method.name,
            params.join(", ")
        );
        if let Some(annotation) = self.return_annotation(method, &info)? {
            out.push_str(" -> ");
            out.push_str(&annotation);
        }

        let Some(body) = &method.body else {
            out.push(';');
            return Ok(out);
        };

        let param_names: Vec<&str> = info.params.iter().map(|p| p.name.as_str()).collect();
        let vars = self.collect_variables(body, &param_names);
        let statements = self.print_stmts(body)?;

        out.push_str("\n{");
        if !vars.is_empty() {
            out.push('\n');
            out.push_str(&self.indent(&format!("var {};", vars.join(", "))));
            if !statements.is_empty() {
                out.push('\n');
            }
        }
        if !statements.is_empty() {
            out.push('\n');
            out.push_str(&self.indent(&statements));
        }
        out.push_str("\n}");
        Ok(out)
    }

    fn report_references(&mut self, method: &Method) {
        for param in &method.params {
            let node = format!("param ${}", param.name);
            if param.by_ref {
                self.incompatibility(
                    "reference",
                    format!("Reference not supported in parameter (var \"{}\")", param.name),
                    &node,
                );
            }
            if param.variadic {
                self.incompatibility(
                    "variadic",
                    format!("Variadic parameter \"{}\" converted to a plain one", param.name),
                    &node,
                );
            }
        }
        if method.by_ref {
            self.incompatibility(
                "reference",
                "Reference not supported".to_string(),
                &format!("method {}", method.name),
            );
        }
    }

    /// `[<type> ]<name>[ = <default>]`
    fn print_param(
        &mut self,
        param: &Param,
        definition: &ParamDefinition<'_>,
    ) -> Result<String, ConvertError> {
        let mut out = String::new();
        if let Some(ty) = &definition.ty {
            match ty.param_type() {
                ParamType::Single(descriptor) => {
                    if let Some(rendered) = descriptor.render()? {
                        out.push_str(&rendered);
                        out.push(' ');
                    }
                }
                ParamType::Ambiguous => self.note(
                    format!("Union type \"{ty}\" left off the parameter"),
                    &format!("param ${}", param.name),
                ),
                ParamType::Untyped => {}
            }
        }
        out.push_str(&definition.name);
        if let Some(default) = definition.default {
            out.push_str(" = ");
            out.push_str(&self.convert_expr(default)?);
        }
        Ok(out)
    }

    /// Annotation after `->`, if any. A native declaration wins; a
    /// documented `@return` is used otherwise.
    fn return_annotation(
        &self,
        method: &Method,
        info: &MethodTypeInfo<'_>,
    ) -> Result<Option<String>, ConvertError> {
        if method.is_constructor() {
            return Ok(None);
        }
        let documented = || -> Result<Option<String>, ConvertError> {
            match &info.return_type {
                Some(union) => Ok(union.render()?),
                None => Ok(None),
            }
        };

        let Some(native) = &method.return_type else {
            return documented();
        };
        let (hint, nullable) = match native {
            TypeHint::Nullable { inner } => (inner.as_ref(), true),
            hint => (hint, false),
        };

        let annotation = match hint {
            TypeHint::Identifier { name } => {
                let name = name.trim();
                (!name.is_empty()).then(|| name.to_string())
            }
            TypeHint::Name { name } => {
                if name.parts.is_empty() {
                    return Err(TypeError::MalformedTypeDescriptor {
                        reason: "class return type without a name".to_string(),
                    }
                    .into());
                }
                Some(format!("<{name}>"))
            }
            TypeHint::Nullable { .. } | TypeHint::Union { .. } => {
                let returns = method
                    .body
                    .as_deref()
                    .is_some_and(|body| contains_kind(body, NodeKind::Return));
                if returns { documented()? } else { None }
            }
        };

        Ok(match annotation {
            Some(annotation) if nullable => Some(format!("{annotation} | null")),
            other => other,
        })
    }
}
