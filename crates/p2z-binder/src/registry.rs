//! Whole-program class registry.
//!
//! Built once, before any class is converted, so that return-type inference
//! can inspect interfaces declared in any file regardless of processing
//! order. The registry borrows the parsed files and is immutable after
//! [`ClassRegistry::collect`].

use indexmap::IndexMap;
use p2z_ast::{ClassLike, Method, Name, SourceFile};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("class '{class}' is not registered")]
    ClassNotFound { class: String },

    #[error("method '{method}' not found in '{class}'")]
    MethodNotFound { class: String, method: String },
}

/// Fully qualified class name without a leading separator: `App\Foo`.
pub fn qualified_name(namespace: Option<&Name>, class: &str) -> String {
    match namespace {
        Some(ns) if !ns.parts.is_empty() => format!("{}\\{class}", ns.joined()),
        _ => class.to_string(),
    }
}

/// Find a method of `decl` by exact name.
pub fn find_method<'a>(decl: &'a ClassLike, name: &str) -> Result<&'a Method, LookupError> {
    decl.methods()
        .find(|method| method.name == name)
        .ok_or_else(|| LookupError::MethodNotFound {
            class: decl.name.clone(),
            method: name.to_string(),
        })
}

#[derive(Clone, Copy, Debug)]
pub struct RegisteredClass<'a> {
    pub decl: &'a ClassLike,
    pub file: &'a SourceFile,
}

#[derive(Debug, Default)]
pub struct ClassRegistry<'a> {
    classes: IndexMap<String, RegisteredClass<'a>>,
}

impl<'a> ClassRegistry<'a> {
    /// Register every class of every file. Keys keep first-seen order; a
    /// duplicate name keeps its first declaration.
    #[tracing::instrument(level = "debug", skip_all, fields(files = files.len()))]
    pub fn collect(files: &'a [SourceFile]) -> Self {
        let mut classes = IndexMap::new();
        for file in files {
            for decl in &file.classes {
                let name = qualified_name(file.namespace.as_ref(), &decl.name);
                if classes.contains_key(&name) {
                    tracing::warn!(class = %name, "duplicate class declaration ignored");
                    continue;
                }
                classes.insert(name, RegisteredClass { decl, file });
            }
        }
        tracing::debug!(classes = classes.len(), "class registry collected");
        Self { classes }
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredClass<'a>> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredClass<'a>)> {
        self.classes.iter().map(|(name, class)| (name.as_str(), class))
    }

    /// Look up `method` on the class registered as `class`.
    pub fn find_method(&self, class: &str, method: &str) -> Result<&'a Method, LookupError> {
        let registered = self.get(class).ok_or_else(|| LookupError::ClassNotFound {
            class: class.to_string(),
        })?;
        find_method(registered.decl, method).map_err(|_| LookupError::MethodNotFound {
            class: class.to_string(),
            method: method.to_string(),
        })
    }
}
