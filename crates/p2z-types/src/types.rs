//! Normalized type vocabulary.
//!
//! A type is an ordered, deduplicated union of [`TypeDescriptor`]s. Class
//! members render with Zephir's class-reference brackets (`<Foo>`),
//! primitives render as bare keywords (`int`).

use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("malformed type descriptor: {reason}")]
    MalformedTypeDescriptor { reason: String },
}

/// One member of a possibly-union type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub value: String,
    pub is_class: bool,
}

impl TypeDescriptor {
    pub fn class(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_class: true,
        }
    }

    pub fn primitive(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_class: false,
        }
    }

    /// The "no type" marker produced when every member of a union was dropped.
    pub fn empty() -> Self {
        Self::primitive(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_null(&self) -> bool {
        !self.is_class && self.value == "null"
    }

    /// Render for emission; `None` for the "no type" marker.
    pub fn render(&self) -> Result<Option<String>, TypeError> {
        match (self.is_class, self.value.is_empty()) {
            (true, true) => Err(TypeError::MalformedTypeDescriptor {
                reason: "class type without a name".to_string(),
            }),
            (false, true) => Ok(None),
            (true, false) => Ok(Some(format!("<{}>", self.value))),
            (false, false) => Ok(Some(self.value.clone())),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_class {
            write!(f, "<{}>", self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

/// How a resolved type applies to a parameter, which takes one type at most.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamType<'a> {
    Untyped,
    Single(&'a TypeDescriptor),
    /// More than one non-null member; the parameter stays untyped.
    Ambiguous,
}

/// Ordered, deduplicated sequence of descriptors (first occurrence wins).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeUnion {
    members: SmallVec<[TypeDescriptor; 2]>,
}

impl TypeUnion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(descriptor: TypeDescriptor) -> Self {
        let mut union = Self::new();
        union.push(descriptor);
        union
    }

    /// Append unless an equal member is already present.
    pub fn push(&mut self, descriptor: TypeDescriptor) {
        if !self.members.contains(&descriptor) {
            self.members.push(descriptor);
        }
    }

    pub fn members(&self) -> &[TypeDescriptor] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True when no member carries a type (empty, or only the "no type" marker).
    pub fn is_untyped(&self) -> bool {
        self.members.iter().all(TypeDescriptor::is_empty)
    }

    /// Render as a return annotation body: members joined by ` | `,
    /// duplicates after rendering dropped. `None` when nothing renders.
    pub fn render(&self) -> Result<Option<String>, TypeError> {
        let mut rendered: SmallVec<[String; 2]> = SmallVec::new();
        for member in &self.members {
            if let Some(text) = member.render()?
                && !rendered.contains(&text)
            {
                rendered.push(text);
            }
        }
        Ok((!rendered.is_empty()).then(|| rendered.join(" | ")))
    }

    /// Collapse to the single type a parameter can carry; `null` members
    /// are ignored since nullability comes from the default value.
    pub fn param_type(&self) -> ParamType<'_> {
        let mut typed = self
            .members
            .iter()
            .filter(|member| !member.is_empty() && !member.is_null());
        match (typed.next(), typed.next()) {
            (None, _) => ParamType::Untyped,
            (Some(only), None) => ParamType::Single(only),
            (Some(_), Some(_)) => ParamType::Ambiguous,
        }
    }
}

impl FromIterator<TypeDescriptor> for TypeUnion {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        let mut union = Self::new();
        for descriptor in iter {
            union.push(descriptor);
        }
        union
    }
}

impl fmt::Display for TypeUnion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}
