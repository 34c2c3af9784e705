//! The ambient class universe.
//!
//! Names that resolve as classes before any import or registry lookup:
//! PHP's built-in classes and interfaces, plus whatever the caller adds
//! (framework base classes provided by an extension, for example).
//! Matching is case-insensitive and ignores a leading separator, like
//! PHP's own class lookup.

use rustc_hash::FxHashSet;

const BUILTIN_CLASSES: &[&str] = &[
    "ArgumentCountError",
    "ArithmeticError",
    "ArrayAccess",
    "ArrayIterator",
    "ArrayObject",
    "BadFunctionCallException",
    "BadMethodCallException",
    "Closure",
    "Countable",
    "DateInterval",
    "DatePeriod",
    "DateTime",
    "DateTimeImmutable",
    "DateTimeInterface",
    "DateTimeZone",
    "DivisionByZeroError",
    "DomainException",
    "Error",
    "ErrorException",
    "Exception",
    "Generator",
    "InvalidArgumentException",
    "Iterator",
    "IteratorAggregate",
    "JsonSerializable",
    "LengthException",
    "LogicException",
    "OutOfBoundsException",
    "OutOfRangeException",
    "OverflowException",
    "PDO",
    "PDOStatement",
    "RangeException",
    "RuntimeException",
    "Serializable",
    "SplFixedArray",
    "SplObjectStorage",
    "SplPriorityQueue",
    "SplQueue",
    "SplStack",
    "Stringable",
    "Throwable",
    "Traversable",
    "TypeError",
    "UnderflowException",
    "UnexpectedValueException",
    "stdClass",
];

#[derive(Clone, Debug)]
pub struct KnownClasses {
    names: FxHashSet<String>,
}

impl Default for KnownClasses {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnownClasses {
    /// PHP's built-in classes only.
    pub fn builtin() -> Self {
        Self::empty().with_extra(BUILTIN_CLASSES.iter().copied())
    }

    pub fn empty() -> Self {
        Self {
            names: FxHashSet::default(),
        }
    }

    pub fn with_extra<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names
            .extend(names.into_iter().map(|name| normalize(name.as_ref())));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().trim_start_matches('\\').to_ascii_lowercase()
}
