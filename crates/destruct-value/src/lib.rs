//! Runtime values for destruct.
//!
//! This crate provides the values a destructuring pattern is evaluated against:
//! - `Value`: the tagged value model, including the `Undefined` missing sentinel
//! - `Sequence`: a pull-based lazy (possibly infinite) source
//! - `ValueIter`: ordered iteration used by positional patterns
//! - property lookup with primitive coercion, used by keyed patterns

mod iter;
mod property;
mod seq;
mod value;

pub use iter::ValueIter;
pub use property::{MAX_ARRAY_GAP, number_to_key};
pub use seq::Sequence;
pub use value::Value;

use thiserror::Error;

/// Errors raised by value operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("{type_name} is not iterable")]
    NotIterable { type_name: &'static str },

    #[error("cannot read properties of {type_name}")]
    NullishLookup { type_name: &'static str },

    #[error("cannot set property '{key}' on {type_name}")]
    NotWritable { type_name: &'static str, key: String },
}
