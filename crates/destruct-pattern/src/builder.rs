//! Pattern builders.
//!
//! Builders collect slots or entries and validate the structure in `build`,
//! so a malformed pattern is rejected when it is constructed rather than when
//! it is evaluated.

use crate::{Element, Entry, Expr, Pattern, PatternError, PropertyKey, Slot, Target};

/// Builder for positional patterns.
#[derive(Debug, Default)]
pub struct PositionalBuilder {
    slots: Vec<Slot>,
}

impl PositionalBuilder {
    /// Add an elision.
    pub fn skip(mut self) -> Self {
        self.slots.push(Slot::Skip);
        self
    }

    /// Bind the next element to a name.
    pub fn bind(self, name: impl Into<String>) -> Self {
        self.element(Target::Name(name.into()), None)
    }

    /// Bind the next element to a name, with a default.
    pub fn bind_or(self, name: impl Into<String>, default: Expr) -> Self {
        self.element(Target::Name(name.into()), Some(default))
    }

    /// Decompose the next element with a nested pattern.
    pub fn nested(self, pattern: Pattern) -> Self {
        self.element(Target::from(pattern), None)
    }

    /// Decompose the next element with a nested pattern, with a default.
    pub fn nested_or(self, pattern: Pattern, default: Expr) -> Self {
        self.element(Target::from(pattern), Some(default))
    }

    /// Add an element with an arbitrary target.
    pub fn element(mut self, target: Target, default: Option<Expr>) -> Self {
        self.slots.push(Slot::Element(Element { target, default }));
        self
    }

    /// Collect the remaining elements into a name.
    pub fn rest(self, name: impl Into<String>) -> Self {
        self.rest_to(Target::Name(name.into()))
    }

    /// Collect the remaining elements into an arbitrary target.
    pub fn rest_to(mut self, target: Target) -> Self {
        self.slots.push(Slot::Rest(target));
        self
    }

    pub fn build(self) -> Result<Pattern, PatternError> {
        let pattern = Pattern::Positional(self.slots);
        pattern.validate()?;
        Ok(pattern)
    }
}

/// Builder for keyed patterns.
#[derive(Debug, Default)]
pub struct KeyedBuilder {
    entries: Vec<Entry>,
}

impl KeyedBuilder {
    /// Shorthand entry `{ name }`.
    pub fn field(self, name: &str) -> Self {
        self.entry(PropertyKey::from(name), Target::from(name), None)
    }

    /// Shorthand entry with default `{ name = default }`.
    pub fn field_or(self, name: &str, default: Expr) -> Self {
        self.entry(PropertyKey::from(name), Target::from(name), Some(default))
    }

    /// Renaming entry `{ key: name }`.
    pub fn rename(self, key: &str, name: &str) -> Self {
        self.entry(PropertyKey::from(key), Target::from(name), None)
    }

    /// Renaming entry with default `{ key: name = default }`.
    pub fn rename_or(self, key: &str, name: &str, default: Expr) -> Self {
        self.entry(PropertyKey::from(key), Target::from(name), Some(default))
    }

    /// Nested entry `{ key: <pattern> }`.
    pub fn nested(self, key: &str, pattern: Pattern) -> Self {
        self.entry(PropertyKey::from(key), Target::from(pattern), None)
    }

    /// Computed entry `{ [expr]: target }`.
    pub fn computed(self, key: Expr, target: Target, default: Option<Expr>) -> Self {
        self.entry(PropertyKey::Computed(key), target, default)
    }

    pub fn entry(mut self, key: PropertyKey, target: Target, default: Option<Expr>) -> Self {
        self.entries.push(Entry { key, target, default });
        self
    }

    pub fn build(self) -> Result<Pattern, PatternError> {
        let pattern = Pattern::Keyed(self.entries);
        pattern.validate()?;
        Ok(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_must_be_last() {
        let err = Pattern::positional().rest("tail").bind("x").build().unwrap_err();
        assert_eq!(err, PatternError::RestNotLast);
    }

    #[test]
    fn test_nested_rest_checked() {
        let inner = Pattern::Positional(vec![
            Slot::Rest(Target::from("a")),
            Slot::Skip,
        ]);
        let err = Pattern::keyed().nested("p", inner).build().unwrap_err();
        assert_eq!(err, PatternError::RestNotLast);
    }

    #[test]
    fn test_builds_nested() {
        let inner = Pattern::positional().bind("x").build().unwrap();
        let pattern = Pattern::keyed()
            .field("a")
            .rename_or("b", "c", Expr::lit(1))
            .nested("p", inner)
            .build()
            .unwrap();
        assert!(matches!(pattern, Pattern::Keyed(ref entries) if entries.len() == 3));
    }
}
