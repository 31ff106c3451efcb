//! Static pattern validation.

use std::collections::HashSet;

use thiserror::Error;

use crate::{Pattern, PropertyKey, Slot, Target};

/// Structural errors detected before evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("rest element must be last in an array pattern")]
    RestNotLast,

    #[error("binding name must not be empty")]
    EmptyName,

    #[error("identifier '{0}' has already been declared")]
    DuplicateBinding(String),

    #[error("member target on '{object}' is only valid in an assignment")]
    MemberInDeclaration { object: String },
}

impl Pattern {
    /// Check the structure of this pattern and all nested patterns.
    ///
    /// This holds for both declaration and assignment forms.
    pub fn validate(&self) -> Result<(), PatternError> {
        match self {
            Pattern::Positional(slots) => {
                for (i, slot) in slots.iter().enumerate() {
                    match slot {
                        Slot::Skip => {}
                        Slot::Element(element) => validate_target(&element.target)?,
                        Slot::Rest(target) => {
                            if i + 1 != slots.len() {
                                return Err(PatternError::RestNotLast);
                            }
                            validate_target(target)?;
                        }
                    }
                }
            }
            Pattern::Keyed(entries) => {
                for entry in entries {
                    if let PropertyKey::Name(name) = &entry.key {
                        if name.is_empty() {
                            return Err(PatternError::EmptyName);
                        }
                    }
                    validate_target(&entry.target)?;
                }
            }
        }
        Ok(())
    }

    /// Check the extra rules of the declaration form: every name is declared
    /// once, and only plain names are declared.
    pub fn check_declaration(&self) -> Result<(), PatternError> {
        self.validate()?;
        let mut seen = HashSet::new();
        self.visit_targets(&mut |target| match target {
            Target::Name(name) => {
                if seen.insert(name.as_str()) {
                    Ok(())
                } else {
                    Err(PatternError::DuplicateBinding(name.clone()))
                }
            }
            Target::Member { object, .. } => Err(PatternError::MemberInDeclaration {
                object: object.clone(),
            }),
            Target::Pattern(_) => Ok(()),
        })
    }

    /// Visit every target in left-to-right order, descending into nested
    /// patterns after their own target is visited.
    pub(crate) fn visit_targets<'a, F>(&'a self, f: &mut F) -> Result<(), PatternError>
    where
        F: FnMut(&'a Target) -> Result<(), PatternError>,
    {
        for target in self.targets() {
            f(target)?;
            if let Target::Pattern(nested) = target {
                nested.visit_targets(f)?;
            }
        }
        Ok(())
    }
}

fn validate_target(target: &Target) -> Result<(), PatternError> {
    match target {
        Target::Name(name) if name.is_empty() => Err(PatternError::EmptyName),
        Target::Member { object, .. } if object.is_empty() => Err(PatternError::EmptyName),
        Target::Pattern(nested) => nested.validate(),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Expr;

    #[test]
    fn test_duplicate_in_declaration() {
        let inner = Pattern::positional().bind("a").build().unwrap();
        let pattern = Pattern::positional().bind("a").nested(inner).build().unwrap();
        assert_eq!(
            pattern.check_declaration(),
            Err(PatternError::DuplicateBinding("a".to_string()))
        );
    }

    #[test]
    fn test_member_only_in_assignment() {
        let pattern = Pattern::keyed()
            .entry("foo".into(), Target::member("obj", "prop"), None)
            .build()
            .unwrap();
        assert!(pattern.validate().is_ok());
        assert_eq!(
            pattern.check_declaration(),
            Err(PatternError::MemberInDeclaration { object: "obj".to_string() })
        );
    }

    #[test]
    fn test_same_key_different_names_is_fine() {
        // let { loc, loc: { start }, loc: { start: { line } } } = node;
        let start = Pattern::keyed().field("start").build().unwrap();
        let line = Pattern::keyed()
            .nested("start", Pattern::keyed().field("line").build().unwrap())
            .build()
            .unwrap();
        let pattern = Pattern::keyed()
            .field("loc")
            .nested("loc", start)
            .nested("loc", line)
            .build()
            .unwrap();
        assert_eq!(pattern.check_declaration(), Ok(()));
    }

    #[test]
    fn test_empty_name() {
        let err = Pattern::keyed().field_or("", Expr::lit(1)).build().unwrap_err();
        assert_eq!(err, PatternError::EmptyName);
    }
}
