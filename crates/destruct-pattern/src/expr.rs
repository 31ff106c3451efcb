//! Default expressions and computed keys.

use std::fmt;
use std::rc::Rc;

use destruct_value::Value;
use thiserror::Error;

/// Read-only name lookup.
///
/// Default expressions resolve free names through a `Scope`: the bindings
/// produced so far by the same pattern, then the caller's outer scope.
pub trait Scope {
    /// Resolve a name. `None` means unresolved: never declared, or declared
    /// by the current pattern but not yet initialised.
    fn resolve(&self, name: &str) -> Option<Value>;

    /// Resolve a name or fail with `ThunkError::Unresolved`.
    fn require(&self, name: &str) -> Result<Value, ThunkError> {
        self.resolve(name)
            .ok_or_else(|| ThunkError::Unresolved(name.to_string()))
    }
}

/// Errors raised while running a deferred computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThunkError {
    #[error("{0} is not defined")]
    Unresolved(String),

    #[error("{0}")]
    Failed(String),
}

type ThunkFn = dyn Fn(&dyn Scope) -> Result<Value, ThunkError>;

/// A zero-argument deferred computation.
///
/// The evaluator calls it at most once per firing default, with the scope
/// visible at that point in the pattern.
#[derive(Clone)]
pub struct Thunk {
    func: Rc<ThunkFn>,
}

impl Thunk {
    pub fn new(func: impl Fn(&dyn Scope) -> Result<Value, ThunkError> + 'static) -> Self {
        Self { func: Rc::new(func) }
    }

    pub fn call(&self, scope: &dyn Scope) -> Result<Value, ThunkError> {
        (self.func)(scope)
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<thunk>")
    }
}

/// An expression used as a default value or computed key.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A constant value
    Literal(Value),

    /// A name reference `x`
    Ref(String),

    /// A fresh array `[e1, e2]`
    Array(Vec<Expr>),

    /// A fresh object `{ k: e }`
    Object(Vec<(String, Expr)>),

    /// Arbitrary deferred computation
    Thunk(Thunk),
}

impl Expr {
    pub fn lit(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Expr::Ref(name.into())
    }

    pub fn thunk(func: impl Fn(&dyn Scope) -> Result<Value, ThunkError> + 'static) -> Self {
        Expr::Thunk(Thunk::new(func))
    }

    /// Names referenced directly by `Ref` nodes, in source order.
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Ref(name) => out.push(name),
            Expr::Array(items) => items.iter().for_each(|e| e.collect_references(out)),
            Expr::Object(fields) => fields.iter().for_each(|(_, e)| e.collect_references(out)),
            Expr::Literal(_) | Expr::Thunk(_) => {}
        }
    }
}
