//! Type resolution for method signatures.
//!
//! Parameters take their native declaration when present and fall back to
//! the method's `@param` tag. Return values come from `@return` tags only
//! (native return types are rendered directly by the method printer); when
//! the class implements an interface whose same-named method is documented,
//! that documentation wins over the method's own.
//!
//! Doc-block type strings go through one shared rule:
//!
//! 1. split on `|`, normalize (`integer` -> `int`, `mixed` -> `var`), dedupe
//! 2. drop members of [`EXCLUDED_TYPES`], one informational note each
//! 3. classify each survivor (first match wins): ambient class, import
//!    suffix, registry key, `T[]`, known primitive, otherwise a class
//! 4. an empty result becomes the single "no type" descriptor

use p2z_ast::{DocBlock, Expr, Method, Param, TypeHint};
use p2z_binder::{ClassContext, ClassRegistry};
use p2z_common::{Diagnostic, DiagnosticSink, sanitize};

use crate::known_classes::KnownClasses;
use crate::types::{TypeDescriptor, TypeError, TypeUnion};

/// Names that classify as primitives (also accepted with a `[]` suffix).
pub const PRIMITIVE_TYPES: &[&str] = &[
    "string", "int", "integer", "float", "double", "bool", "boolean", "array", "null", "callable",
    "scalar", "void", "object", "var",
];

/// Documented types with no Zephir counterpart; dropped from unions.
pub const EXCLUDED_TYPES: &[&str] = &[
    "mixed",
    "callable",
    "callable[]",
    "scalar",
    "scalar[]",
    "void",
    "object",
    "self",
    "resource",
    "true",
];

/// A parameter as it will be emitted.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamDefinition<'m> {
    /// Sanitized name.
    pub name: String,
    pub default: Option<&'m Expr>,
    pub ty: Option<TypeUnion>,
}

/// Resolved signature types of one method. Computed per method, never cached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MethodTypeInfo<'m> {
    pub params: Vec<ParamDefinition<'m>>,
    /// Documented return type; `None` when no `@return` tag applies.
    pub return_type: Option<TypeUnion>,
}

pub struct TypeResolver<'r, 'a> {
    registry: &'r ClassRegistry<'a>,
    known_classes: &'r KnownClasses,
}

impl<'r, 'a> TypeResolver<'r, 'a> {
    pub fn new(registry: &'r ClassRegistry<'a>, known_classes: &'r KnownClasses) -> Self {
        Self {
            registry,
            known_classes,
        }
    }

    /// Resolve parameter and return types of `method` declared in `class`.
    #[tracing::instrument(level = "debug", skip_all, fields(class = %class.full_name(), method = %method.name))]
    pub fn method_types<'m>(
        &self,
        method: &'m Method,
        class: &ClassContext<'_>,
        sink: &mut DiagnosticSink,
    ) -> Result<MethodTypeInfo<'m>, TypeError> {
        let doc = method.doc.as_deref().map(DocBlock::parse);

        let params = method
            .params
            .iter()
            .map(|param| self.param_definition(param, doc.as_ref(), class, sink))
            .collect::<Result<Vec<_>, _>>()?;

        let return_type = if method.is_constructor() {
            None
        } else {
            self.return_type(method, doc.as_ref(), class, sink)
        };

        Ok(MethodTypeInfo {
            params,
            return_type,
        })
    }

    fn param_definition<'m>(
        &self,
        param: &'m Param,
        doc: Option<&DocBlock>,
        class: &ClassContext<'_>,
        sink: &mut DiagnosticSink,
    ) -> Result<ParamDefinition<'m>, TypeError> {
        let ty = match &param.type_hint {
            Some(hint) => Self::native_type(hint)?,
            None => doc
                .and_then(|doc| doc.param_type(&param.name))
                .map(|raw| {
                    self.resolve_type_string(raw, &format!("param ${}", param.name), class, sink)
                }),
        };

        Ok(ParamDefinition {
            name: sanitize(&param.name).into_owned(),
            default: param.default.as_ref(),
            ty,
        })
    }

    /// Type of a native declaration. `mixed` maps to `var`; class names keep
    /// their leading separator. A nullable wrapper is looked through.
    pub fn native_type(hint: &TypeHint) -> Result<Option<TypeUnion>, TypeError> {
        match hint {
            TypeHint::Identifier { name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Ok(None);
                }
                let name = if name == "mixed" { "var" } else { name };
                Ok(Some(TypeUnion::single(TypeDescriptor::primitive(name))))
            }
            TypeHint::Name { name } => {
                if name.parts.is_empty() {
                    return Err(TypeError::MalformedTypeDescriptor {
                        reason: "class type declaration without a name".to_string(),
                    });
                }
                Ok(Some(TypeUnion::single(TypeDescriptor::class(
                    name.to_string(),
                ))))
            }
            TypeHint::Nullable { inner } => Self::native_type(inner),
            TypeHint::Union { types } => {
                let mut union = TypeUnion::new();
                for member in types {
                    if let Some(resolved) = Self::native_type(member)? {
                        resolved
                            .members()
                            .iter()
                            .for_each(|descriptor| union.push(descriptor.clone()));
                    }
                }
                Ok((!union.is_empty()).then_some(union))
            }
        }
    }

    fn return_type(
        &self,
        method: &Method,
        own_doc: Option<&DocBlock>,
        class: &ClassContext<'_>,
        sink: &mut DiagnosticSink,
    ) -> Option<TypeUnion> {
        let inherited = self.inherited_doc(method, class);
        let raw = inherited
            .as_ref()
            .and_then(DocBlock::return_type)
            .or_else(|| own_doc.and_then(DocBlock::return_type))?;
        Some(self.resolve_type_string(raw, &format!("method {}", method.name), class, sink))
    }

    /// Documentation of the same-named method on the first implemented
    /// interface that declares and documents it. Interfaces are tried in
    /// declaration order; for each, the current-namespace name before the
    /// import it aliases.
    pub fn inherited_doc(&self, method: &Method, class: &ClassContext<'_>) -> Option<DocBlock> {
        for interface in &class.implements {
            for candidate in class.interface_candidates(interface) {
                match self.registry.find_method(&candidate, &method.name) {
                    Ok(found) => {
                        if let Some(doc) = &found.doc {
                            tracing::trace!(interface = %candidate, "using inherited documentation");
                            return Some(DocBlock::parse(doc));
                        }
                    }
                    Err(err) => tracing::trace!(%err, "no inherited documentation"),
                }
            }
        }
        None
    }

    /// Resolve a `|`-delimited doc-block type into a normalized union.
    pub fn resolve_type_string(
        &self,
        raw: &str,
        node: &str,
        class: &ClassContext<'_>,
        sink: &mut DiagnosticSink,
    ) -> TypeUnion {
        let mut names: Vec<&str> = Vec::new();
        for part in raw.split('|').map(str::trim).filter(|part| !part.is_empty()) {
            let normalized = match part.to_ascii_lowercase().as_str() {
                "integer" => "int",
                "mixed" => "var",
                _ => part,
            };
            if !names.contains(&normalized) {
                names.push(normalized);
            }
        }

        names.retain(|name| {
            let excluded = is_excluded(name);
            if excluded {
                sink.record(Diagnostic::informational(
                    format!("Type \"{name}\" of \"{raw}\" is in the exclude list"),
                    node,
                    class.full_name(),
                ));
            }
            !excluded
        });

        let union: TypeUnion = names.iter().map(|name| self.classify(name, class)).collect();
        if union.is_empty() {
            TypeUnion::single(TypeDescriptor::empty())
        } else {
            union
        }
    }

    fn classify(&self, raw: &str, class: &ClassContext<'_>) -> TypeDescriptor {
        if self.known_classes.contains(raw) {
            return TypeDescriptor::class(raw);
        }

        let bare = raw.strip_prefix('\\').unwrap_or(raw);
        if class
            .imported_names()
            .any(|import| ends_with_segment(import, bare))
        {
            return TypeDescriptor::class(bare);
        }

        for name in self.registry.names() {
            if ends_with_segment(name, bare) {
                return TypeDescriptor::class(bare);
            }
            if name == bare {
                return TypeDescriptor::class(raw);
            }
        }

        if raw.ends_with("[]") {
            return TypeDescriptor::primitive("array");
        }

        let lower = raw.to_ascii_lowercase();
        let primitive = PRIMITIVE_TYPES.contains(&lower.as_str())
            || lower
                .strip_suffix("[]")
                .is_some_and(|base| PRIMITIVE_TYPES.contains(&base));
        if primitive {
            return TypeDescriptor::primitive(lower);
        }

        TypeDescriptor::class(raw)
    }
}

/// Exclusion ignores case: `Callable` would otherwise classify as the
/// primitive `callable`.
fn is_excluded(name: &str) -> bool {
    EXCLUDED_TYPES
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(name))
}

/// `qualified` ends with `name` right after a `\` separator.
fn ends_with_segment(qualified: &str, name: &str) -> bool {
    !name.is_empty()
        && qualified.len() > name.len()
        && qualified.ends_with(name)
        && qualified.as_bytes()[qualified.len() - name.len() - 1] == b'\\'
}
