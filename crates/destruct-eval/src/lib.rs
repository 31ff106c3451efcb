//! Destructuring evaluator for destruct.
//!
//! Given a pre-built `Pattern`, a source `Value` and an outer `Scope`, the
//! evaluator produces a flat `Bindings` environment or a typed `EvalError`.
//! Evaluation is a single synchronous pass with no state kept between calls.

mod codes;
mod env;
mod error;
mod eval;
mod expr;
mod options;

pub use codes::ErrorCode;
pub use env::{Bindings, EmptyScope, ScopeChain};
pub use error::EvalError;
pub use eval::{Evaluator, evaluate};
pub use options::{BindingForm, DEFAULT_REST_LIMIT, EvalOptions};

pub use destruct_pattern::{
    Element, Entry, Expr, KeyedBuilder, Pattern, PatternError, PositionalBuilder, PropertyKey,
    Scope, Slot, Target, Thunk, ThunkError,
};
pub use destruct_value::{Sequence, Value};
