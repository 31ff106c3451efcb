//! Pattern nodes.

use crate::Expr;

/// A binding pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Array-shaped pattern `[a, , b = 1, ...rest]`
    Positional(Vec<Slot>),

    /// Mapping-shaped pattern `{ a, b: c, [k]: d = 1 }`
    Keyed(Vec<Entry>),
}

/// A slot in a positional pattern.
#[derive(Debug, Clone)]
pub enum Slot {
    /// Elision `[, b]`: pulls one element and discards it
    Skip,

    /// Element `a` or `a = default` or `[x, y] = default`
    Element(Element),

    /// Rest element `...tail`, must be last
    Rest(Target),
}

/// A non-rest element of a positional pattern.
#[derive(Debug, Clone)]
pub struct Element {
    pub target: Target,
    pub default: Option<Expr>,
}

/// An entry in a keyed pattern.
#[derive(Debug, Clone)]
pub struct Entry {
    pub key: PropertyKey,
    pub target: Target,
    pub default: Option<Expr>,
}

/// The key an entry reads from.
#[derive(Debug, Clone)]
pub enum PropertyKey {
    /// Literal name `{ foo }`
    Name(String),

    /// Computed key `{ [expr]: x }`, evaluated in entry order
    Computed(Expr),
}

/// Where a resolved value goes.
#[derive(Debug, Clone)]
pub enum Target {
    /// Bind to a name
    Name(String),

    /// Write to a property of an existing array or object, e.g. `obj.prop`
    /// or `arr[0]`. Assignment form only.
    Member { object: String, key: PropertyKey },

    /// Decompose further with a nested pattern
    Pattern(Box<Pattern>),
}

impl Pattern {
    /// Start building a positional pattern.
    pub fn positional() -> crate::PositionalBuilder {
        crate::PositionalBuilder::default()
    }

    /// Start building a keyed pattern.
    pub fn keyed() -> crate::KeyedBuilder {
        crate::KeyedBuilder::default()
    }

    /// Whether the pattern has no slots or entries.
    pub fn is_empty(&self) -> bool {
        match self {
            Pattern::Positional(slots) => slots.is_empty(),
            Pattern::Keyed(entries) => entries.is_empty(),
        }
    }
}

impl Target {
    pub fn member(object: impl Into<String>, key: impl Into<String>) -> Self {
        Target::Member {
            object: object.into(),
            key: PropertyKey::Name(key.into()),
        }
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Name(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Name(name)
    }
}

impl From<Pattern> for Target {
    fn from(pattern: Pattern) -> Self {
        Target::Pattern(Box::new(pattern))
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        PropertyKey::Name(name.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        PropertyKey::Name(name)
    }
}
