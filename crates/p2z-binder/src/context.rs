//! Per-class conversion context.

use indexmap::IndexMap;
use p2z_ast::{ClassLike, Name, SourceFile};
use smallvec::SmallVec;

use crate::registry::qualified_name;

/// Immutable snapshot of the names visible to one class.
#[derive(Clone, Debug)]
pub struct ClassContext<'a> {
    /// Namespace without a leading separator; `None` for the global one.
    pub namespace: Option<String>,
    /// Imports keyed by the local name they are visible under, mapping to
    /// the fully qualified name (no leading separator).
    pub imports: IndexMap<String, String>,
    /// Implemented interfaces as written, in declaration order.
    pub implements: Vec<Name>,
    pub decl: &'a ClassLike,
    full_name: String,
}

impl<'a> ClassContext<'a> {
    pub fn new(file: &'a SourceFile, decl: &'a ClassLike) -> Self {
        let namespace = file
            .namespace
            .as_ref()
            .filter(|ns| !ns.parts.is_empty())
            .map(Name::joined);
        let imports = file
            .uses
            .iter()
            .map(|item| (item.local_name().to_string(), item.name.joined()))
            .collect();

        Self {
            namespace,
            imports,
            implements: decl.implements.clone(),
            decl,
            full_name: qualified_name(file.namespace.as_ref(), &decl.name),
        }
    }

    /// Fully qualified name of the class: `App\Foo`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Fully qualified names of every import.
    pub fn imported_names(&self) -> impl Iterator<Item = &str> {
        self.imports.values().map(String::as_str)
    }

    /// Registry keys an implemented interface may be declared under, most
    /// specific first: the written name when fully qualified, otherwise the
    /// name inside the current namespace followed by the import it aliases.
    pub fn interface_candidates(&self, interface: &Name) -> SmallVec<[String; 2]> {
        let mut candidates = SmallVec::new();
        if interface.fully_qualified {
            candidates.push(interface.joined());
            return candidates;
        }

        candidates.push(match &self.namespace {
            Some(ns) => format!("{ns}\\{}", interface.joined()),
            None => interface.joined(),
        });

        if let Some((first, rest)) = interface.parts.split_first()
            && let Some(imported) = self.imports.get(first)
        {
            let mut resolved = imported.clone();
            for part in rest {
                resolved.push('\\');
                resolved.push_str(part);
            }
            if !candidates.contains(&resolved) {
                candidates.push(resolved);
            }
        }
        candidates
    }
}
