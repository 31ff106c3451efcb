//! Binding environments and scopes.

use std::collections::HashMap;
use std::rc::Rc;

use destruct_pattern::Scope;
use destruct_value::Value;

use crate::EvalError;

/// A flat name → value environment produced by destructuring.
///
/// One `Bindings` can collect several declarations made in the same scope;
/// declaring a name twice fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Introduce a new name.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) -> Result<(), EvalError> {
        let name = name.into();
        if self.values.contains_key(&name) {
            return Err(EvalError::DuplicateBinding { name });
        }
        self.values.insert(name, value);
        Ok(())
    }

    /// Set a name, overwriting any previous value.
    pub fn assign(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Install these bindings into a scope chain frame.
    pub fn install(self, scope: &mut ScopeChain) {
        for (name, value) in self.values {
            scope.define(name, value);
        }
    }
}

impl Scope for Bindings {
    fn resolve(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for Bindings {
    type Item = (String, Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// A scope with no names.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScope;

impl Scope for EmptyScope {
    fn resolve(&self, _name: &str) -> Option<Value> {
        None
    }
}

/// A lexical scope chain, used as the outer scope of an evaluation.
#[derive(Debug, Clone, Default)]
pub struct ScopeChain {
    bindings: HashMap<String, Value>,
    parent: Option<Rc<ScopeChain>>,
}

impl ScopeChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child scope.
    pub fn child(parent: Rc<ScopeChain>) -> Self {
        Self {
            bindings: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Define a variable in the current scope.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.get(name);
        }
        None
    }
}

impl Scope for ScopeChain {
    fn resolve(&self, name: &str) -> Option<Value> {
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_twice_fails() {
        let mut env = Bindings::new();
        env.declare("a", Value::from(10)).unwrap();
        assert_eq!(
            env.declare("a", Value::from(1)),
            Err(EvalError::DuplicateBinding { name: "a".to_string() })
        );
        assert_eq!(env.get("a"), Some(&Value::from(10)));
    }

    #[test]
    fn test_assign_overwrites() {
        let mut env = Bindings::new();
        env.assign("a", Value::from(1));
        env.assign("a", Value::from(2));
        assert_eq!(env.get("a"), Some(&Value::from(2)));
    }

    #[test]
    fn test_scope_chain_shadowing() {
        let mut global = ScopeChain::new();
        global.define("tmp", Value::from(123));
        global.define("b", Value::from(1));
        let mut block = ScopeChain::child(Rc::new(global));
        block.define("tmp", Value::from("abc"));
        assert_eq!(block.resolve("tmp"), Some(Value::from("abc")));
        assert_eq!(block.resolve("b"), Some(Value::from(1)));
        assert_eq!(block.resolve("a"), None);
    }
}
