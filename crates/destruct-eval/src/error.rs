//! Evaluation errors.

use destruct_pattern::{PatternError, ThunkError};
use thiserror::Error;

use crate::ErrorCode;

/// Errors raised by `Evaluator::evaluate`.
///
/// Evaluation stops at the first error and leaves the caller's environment
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("type error: {0}")]
    TypeError(String),

    #[error("{name} is not defined")]
    UnresolvedReference { name: String },

    #[error("identifier '{name}' has already been declared")]
    DuplicateBinding { name: String },

    #[error("malformed pattern: {0}")]
    MalformedPattern(PatternError),

    #[error("cannot assign to this property of '{object}' ({found})")]
    InvalidMemberTarget { object: String, found: &'static str },

    #[error("rest element collected more than {limit} elements")]
    RestLimitExceeded { limit: usize },

    #[error("default expression failed: {0}")]
    Thunk(String),
}

impl EvalError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalError::TypeError(_) => ErrorCode::TypeError,
            EvalError::UnresolvedReference { .. } => ErrorCode::UnresolvedReference,
            EvalError::DuplicateBinding { .. } => ErrorCode::DuplicateBinding,
            EvalError::MalformedPattern(_) => ErrorCode::MalformedPattern,
            EvalError::InvalidMemberTarget { .. } => ErrorCode::InvalidMemberTarget,
            EvalError::RestLimitExceeded { .. } => ErrorCode::RestLimitExceeded,
            EvalError::Thunk(_) => ErrorCode::ThunkFailed,
        }
    }

    /// A suggested fix for this particular error, if one is known.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            EvalError::MalformedPattern(err) => match err {
                PatternError::RestNotLast => Some("move the rest element to the last slot"),
                PatternError::EmptyName => Some("give every binding and member object a name"),
                PatternError::MemberInDeclaration { .. } => {
                    Some("member targets are only allowed in an assignment")
                }
                PatternError::DuplicateBinding(_) => ErrorCode::DuplicateBinding.suggestion(),
            },
            other => other.code().suggestion(),
        }
    }
}

impl From<PatternError> for EvalError {
    fn from(err: PatternError) -> Self {
        match err {
            PatternError::DuplicateBinding(name) => EvalError::DuplicateBinding { name },
            other => EvalError::MalformedPattern(other),
        }
    }
}

impl From<ThunkError> for EvalError {
    fn from(err: ThunkError) -> Self {
        match err {
            ThunkError::Unresolved(name) => EvalError::UnresolvedReference { name },
            ThunkError::Failed(message) => EvalError::Thunk(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_pattern_error_maps_to_duplicate_binding() {
        let err = EvalError::from(PatternError::DuplicateBinding("a".to_string()));
        assert_eq!(err, EvalError::DuplicateBinding { name: "a".to_string() });
        assert_eq!(err.code().as_str(), "E0103");
    }

    #[test]
    fn test_help_follows_pattern_error() {
        let err = EvalError::from(PatternError::MemberInDeclaration {
            object: "obj".to_string(),
        });
        assert_eq!(err.code(), ErrorCode::MalformedPattern);
        assert_eq!(err.help(), Some("member targets are only allowed in an assignment"));
        let err = EvalError::from(PatternError::RestNotLast);
        assert_eq!(err.help(), Some("move the rest element to the last slot"));
        assert_eq!(ErrorCode::MalformedPattern.suggestion(), None);
        assert_eq!(EvalError::TypeError(String::new()).help(), None);
    }

    #[test]
    fn test_display() {
        let err = EvalError::UnresolvedReference { name: "y".to_string() };
        assert_eq!(err.to_string(), "y is not defined");
    }
}
