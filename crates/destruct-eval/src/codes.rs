//! Error codes for evaluation failures.

/// Error codes for categorizing evaluation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Runtime errors (E0100 - E0199)
    TypeError,
    UnresolvedReference,
    InvalidMemberTarget,
    DuplicateBinding,
    RestLimitExceeded,
    ThunkFailed,

    // Static errors (E0200 - E0299)
    MalformedPattern,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::TypeError => "E0100",
            ErrorCode::UnresolvedReference => "E0101",
            ErrorCode::InvalidMemberTarget => "E0102",
            ErrorCode::DuplicateBinding => "E0103",
            ErrorCode::RestLimitExceeded => "E0104",
            ErrorCode::ThunkFailed => "E0105",

            ErrorCode::MalformedPattern => "E0200",
        }
    }

    /// Get a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::TypeError => "source value cannot be destructured by this pattern",
            ErrorCode::UnresolvedReference => "default expression reads a name that is not bound",
            ErrorCode::InvalidMemberTarget => "member target is not a writable array index or object property",
            ErrorCode::DuplicateBinding => "name declared more than once in the same scope",
            ErrorCode::RestLimitExceeded => "rest element did not reach the end of its source",
            ErrorCode::ThunkFailed => "default expression failed",
            ErrorCode::MalformedPattern => "pattern is structurally invalid",
        }
    }

    /// Get a suggested fix for the error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::UnresolvedReference => {
                Some("a default may only refer to names bound to its left or in the outer scope")
            }
            ErrorCode::DuplicateBinding => Some("rename one of the bindings or use an assignment"),
            ErrorCode::RestLimitExceeded => {
                Some("the source may be infinite; drop the rest element or raise the limit")
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
