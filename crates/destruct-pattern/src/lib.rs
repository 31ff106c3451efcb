//! Binding patterns for destruct.
//!
//! A pattern is a declarative description of how to decompose a value into
//! named bindings. Patterns arrive pre-built: this crate holds the data model,
//! a builder that validates structure at construction time, and the static
//! analysis the evaluator and CLI rely on.

mod analysis;
mod builder;
mod expr;
mod pattern;
mod validate;

pub use analysis::{PatternKind, Summary};
pub use builder::{KeyedBuilder, PositionalBuilder};
pub use expr::{Expr, Scope, Thunk, ThunkError};
pub use pattern::{Element, Entry, Pattern, PropertyKey, Slot, Target};
pub use validate::PatternError;
