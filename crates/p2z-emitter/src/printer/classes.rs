use p2z_ast::{ClassConst, ClassKind, ClassMember, Name, Property};

use super::Printer;
use super::modifiers::{modifiers_text, with_default_visibility};
use crate::context::ConvertContext;
use crate::error::ConvertError;

impl<'p> Printer<'p> {
    // =========================================================================
    // Class
    // =========================================================================

    /// Print the whole class: namespace, imports, header and members.
    #[tracing::instrument(level = "debug", skip_all, fields(class = %self.class.full_name()))]
    pub fn print_class(&mut self) -> Result<String, ConvertError> {
        let decl = self.class.decl;
        let mut sections = Vec::new();

        if let Some(namespace) = &self.class.namespace {
            sections.push(format!("namespace {namespace};"));
        }

        let uses = self
            .class
            .imports
            .iter()
            .map(|(local, qualified)| {
                if qualified.rsplit('\\').next() == Some(local.as_str()) {
                    format!("use {qualified};")
                } else {
                    format!("use {qualified} as {local};")
                }
            })
            .collect::<Vec<_>>();
        if !uses.is_empty() {
            sections.push(uses.join("\n"));
        }

        let mut declaration = String::new();
        if let Some(doc) = &decl.doc {
            declaration.push_str(&format_doc(doc));
            declaration.push('\n');
        }
        declaration.push_str(&self.class_header());

        let members = self.print_members()?;
        if members.is_empty() {
            declaration.push_str("\n{\n}");
        } else {
            declaration.push_str("\n{\n");
            declaration.push_str(&self.indent(&members));
            declaration.push_str("\n}");
        }
        sections.push(declaration);

        Ok(format!("{}\n", sections.join("\n\n")))
    }

    fn class_header(&mut self) -> String {
        let decl = self.class.decl;
        let names = |names: &[Name]| names.iter().map(Name::to_string).collect::<Vec<_>>().join(", ");

        let mut header = match decl.kind {
            ClassKind::Interface => format!("interface {}", decl.name),
            ClassKind::Class | ClassKind::Trait => {
                if decl.kind == ClassKind::Trait {
                    self.incompatibility(
                        "trait",
                        format!("Trait \"{}\" converted to a class", decl.name),
                        "trait",
                    );
                }
                format!("{}class {}", modifiers_text(decl.flags), decl.name)
            }
        };
        if !decl.extends.is_empty() {
            header.push_str(" extends ");
            header.push_str(&names(&decl.extends));
        }
        if decl.kind != ClassKind::Interface && !decl.implements.is_empty() {
            header.push_str(" implements ");
            header.push_str(&names(&decl.implements));
        }
        header
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Constants, then properties, then methods; groups and methods are
    /// separated by a blank line.
    fn print_members(&mut self) -> Result<String, ConvertError> {
        let mut constants = Vec::new();
        let mut properties = Vec::new();
        let mut methods = Vec::new();

        let decl = self.class.decl;
        for member in &decl.members {
            match member {
                ClassMember::Constant(constant) => constants.push(self.print_constant(constant)?),
                ClassMember::Property(property) => properties.push(self.print_property(property)?),
                ClassMember::Method(method) => {
                    let mut text = String::new();
                    if let Some(doc) = &method.doc {
                        text.push_str(&format_doc(doc));
                        text.push('\n');
                    }
                    text.push_str(&self.print_method(method)?);
                    methods.push(text);
                }
            }
        }

        let mut blocks = Vec::new();
        if !constants.is_empty() {
            blocks.push(constants.join("\n"));
        }
        if !properties.is_empty() {
            blocks.push(properties.join("\n\n"));
        }
        blocks.extend(methods);
        Ok(blocks.join("\n\n"))
    }

    fn print_constant(&mut self, constant: &ClassConst) -> Result<String, ConvertError> {
        self.ctx = ConvertContext::default();
        Ok(format!(
            "const {} = {};",
            constant.name,
            self.convert_expr(&constant.value)?
        ))
    }

    fn print_property(&mut self, property: &Property) -> Result<String, ConvertError> {
        self.ctx = ConvertContext::default();
        let mut out = String::new();
        if let Some(doc) = &property.doc {
            out.push_str(&format_doc(doc));
            out.push('\n');
        }
        out.push_str(&modifiers_text(with_default_visibility(property.flags)));
        out.push_str(&property.name);
        if let Some(default) = &property.default {
            out.push_str(" = ");
            out.push_str(&self.convert_expr(default)?);
        }
        out.push(';');
        Ok(out)
    }
}

/// Re-align a doc comment: continuation lines starting with `*` get one
/// leading space.
fn format_doc(doc: &str) -> String {
    doc.trim()
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let line = line.trim();
            if i > 0 && line.starts_with('*') {
                format!(" {line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
