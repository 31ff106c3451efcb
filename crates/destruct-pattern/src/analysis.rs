//! Static pattern analysis.
//!
//! Facts about a pattern that hold regardless of the source value: which names
//! it declares, how many elements a positional pattern pulls, how deep it nests.

use std::collections::HashSet;
use std::fmt;

use crate::{Pattern, PropertyKey, Slot, Target};

/// Top-level shape of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Positional,
    Keyed,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Positional => write!(f, "positional"),
            PatternKind::Keyed => write!(f, "keyed"),
        }
    }
}

/// A summary of a pattern, used for logging and the `explain` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub kind: PatternKind,
    /// Number of top-level slots or entries.
    pub width: usize,
    /// Declared names in left-to-right order.
    pub bindings: Vec<String>,
    /// Elements a top-level positional pattern pulls; `None` when a rest slot
    /// drains the source.
    pub max_pulls: Option<usize>,
    pub depth: usize,
    pub defaults: usize,
    pub members: usize,
    /// Names read from the scope, see `Pattern::references`.
    pub reads: Vec<String>,
}

impl Pattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            Pattern::Positional(_) => PatternKind::Positional,
            Pattern::Keyed(_) => PatternKind::Keyed,
        }
    }

    /// Names declared by this pattern, left to right, nested names included.
    /// Member targets declare nothing.
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        // The visitor never fails here.
        let _ = self.visit_targets(&mut |target| {
            if let Target::Name(name) = target {
                names.push(name.as_str());
            }
            Ok(())
        });
        names
    }

    /// How many elements evaluating this pattern pulls from its own source.
    ///
    /// Keyed patterns pull nothing. A positional pattern pulls one element per
    /// non-rest slot, or drains the source if it has a rest slot.
    pub fn max_pulls(&self) -> Option<usize> {
        match self {
            Pattern::Keyed(_) => Some(0),
            Pattern::Positional(slots) => {
                if slots.iter().any(|slot| matches!(slot, Slot::Rest(_))) {
                    None
                } else {
                    Some(slots.len())
                }
            }
        }
    }

    /// Nesting depth. A flat pattern has depth 1.
    pub fn depth(&self) -> usize {
        let nested = self
            .targets()
            .filter_map(|target| match target {
                Target::Pattern(p) => Some(p.depth()),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        nested + 1
    }

    pub fn summary(&self) -> Summary {
        let mut defaults = 0;
        let mut members = 0;
        self.count(&mut defaults, &mut members);
        Summary {
            kind: self.kind(),
            width: match self {
                Pattern::Positional(slots) => slots.len(),
                Pattern::Keyed(entries) => entries.len(),
            },
            bindings: self.bound_names().into_iter().map(str::to_string).collect(),
            max_pulls: self.max_pulls(),
            depth: self.depth(),
            defaults,
            members,
            reads: self.references().into_iter().map(str::to_string).collect(),
        }
    }

    /// Names the pattern reads while it is evaluated, left to right and
    /// without repeats: references in defaults and computed keys, and the
    /// objects of member targets.
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        let mut seen = HashSet::new();
        names.retain(|name| seen.insert(*name));
        names
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Pattern::Positional(slots) => {
                for slot in slots {
                    match slot {
                        Slot::Skip => {}
                        Slot::Element(element) => {
                            if let Some(default) = &element.default {
                                out.extend(default.references());
                            }
                            target_references(&element.target, out);
                        }
                        Slot::Rest(target) => target_references(target, out),
                    }
                }
            }
            Pattern::Keyed(entries) => {
                for entry in entries {
                    key_references(&entry.key, out);
                    if let Some(default) = &entry.default {
                        out.extend(default.references());
                    }
                    target_references(&entry.target, out);
                }
            }
        }
    }

    pub(crate) fn targets(&self) -> Box<dyn Iterator<Item = &Target> + '_> {
        match self {
            Pattern::Positional(slots) => Box::new(slots.iter().filter_map(|slot| match slot {
                Slot::Skip => None,
                Slot::Element(element) => Some(&element.target),
                Slot::Rest(target) => Some(target),
            })),
            Pattern::Keyed(entries) => Box::new(entries.iter().map(|entry| &entry.target)),
        }
    }

    fn count(&self, defaults: &mut usize, members: &mut usize) {
        *defaults += match self {
            Pattern::Positional(slots) => slots
                .iter()
                .filter(|slot| matches!(slot, Slot::Element(e) if e.default.is_some()))
                .count(),
            Pattern::Keyed(entries) => entries.iter().filter(|e| e.default.is_some()).count(),
        };
        for target in self.targets() {
            match target {
                Target::Member { .. } => *members += 1,
                Target::Pattern(nested) => nested.count(defaults, members),
                Target::Name(_) => {}
            }
        }
    }
}

fn key_references<'a>(key: &'a PropertyKey, out: &mut Vec<&'a str>) {
    if let PropertyKey::Computed(expr) = key {
        out.extend(expr.references());
    }
}

fn target_references<'a>(target: &'a Target, out: &mut Vec<&'a str>) {
    match target {
        Target::Name(_) => {}
        Target::Member { object, key } => {
            out.push(object);
            key_references(key, out);
        }
        Target::Pattern(nested) => nested.collect_references(out),
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "kind:     {} ({} top-level)", self.kind, self.width)?;
        writeln!(f, "bindings: {}", self.bindings.join(", "))?;
        match self.max_pulls {
            Some(n) => writeln!(f, "pulls:    {}", n)?,
            None => writeln!(f, "pulls:    until exhausted")?,
        }
        writeln!(f, "depth:    {}", self.depth)?;
        writeln!(f, "defaults: {}", self.defaults)?;
        writeln!(f, "members:  {}", self.members)?;
        if self.reads.is_empty() {
            write!(f, "reads:    -")
        } else {
            write!(f, "reads:    {}", self.reads.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Expr;
    use pretty_assertions::assert_eq;

    fn nested_example() -> Pattern {
        // let [foo, [[bar], baz = 1]] = ...
        let bar = Pattern::positional().bind("bar").build().unwrap();
        let inner = Pattern::positional()
            .nested(bar)
            .bind_or("baz", Expr::lit(1))
            .build()
            .unwrap();
        Pattern::positional().bind("foo").nested(inner).build().unwrap()
    }

    #[test]
    fn test_bound_names_in_order() {
        assert_eq!(nested_example().bound_names(), vec!["foo", "bar", "baz"]);
    }

    #[test]
    fn test_max_pulls() {
        let p = Pattern::positional().skip().skip().bind("third").build().unwrap();
        assert_eq!(p.max_pulls(), Some(3));
        let p = Pattern::positional().bind("head").rest("tail").build().unwrap();
        assert_eq!(p.max_pulls(), None);
    }

    #[test]
    fn test_summary() {
        let summary = nested_example().summary();
        assert_eq!(
            summary,
            Summary {
                kind: PatternKind::Positional,
                width: 2,
                bindings: vec!["foo".into(), "bar".into(), "baz".into()],
                max_pulls: Some(2),
                depth: 3,
                defaults: 1,
                members: 0,
                reads: vec![],
            }
        );
    }

    #[test]
    fn test_references_in_evaluation_order() {
        // ({ [k]: obj.a = x, b: [c = x, ...arr[i]] } = ...)
        let inner = Pattern::positional()
            .bind_or("c", Expr::reference("x"))
            .rest_to(Target::Member {
                object: "arr".to_string(),
                key: PropertyKey::Computed(Expr::reference("i")),
            })
            .build()
            .unwrap();
        let pattern = Pattern::keyed()
            .computed(
                Expr::reference("k"),
                Target::member("obj", "a"),
                Some(Expr::reference("x")),
            )
            .nested("b", inner)
            .build()
            .unwrap();
        assert_eq!(pattern.references(), vec!["k", "x", "obj", "arr", "i"]);
        assert_eq!(pattern.summary().reads, vec!["k", "x", "obj", "arr", "i"]);
    }
}
