//! Pattern evaluation.
//!
//! Recursive descent over the pattern shape. A run stages every binding and
//! member write, and touches the caller's environment only once the whole
//! pattern has succeeded.

use std::collections::{HashMap, HashSet};

use destruct_pattern::{Entry, Expr, Pattern, PropertyKey, Scope, Slot, Target};
use destruct_value::{Value, ValueError, ValueIter};
use tracing::{debug, trace};

use crate::expr::eval_expr;
use crate::{BindingForm, Bindings, EvalError, EvalOptions};

/// Destructure `source` with `pattern` using default options.
pub fn evaluate(pattern: &Pattern, source: Value, outer: &dyn Scope) -> Result<Bindings, EvalError> {
    Evaluator::new().evaluate(pattern, source, outer)
}

/// The destructuring evaluator.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    options: EvalOptions,
}

impl Evaluator {
    /// Create an evaluator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Destructure `source` into a fresh environment.
    pub fn evaluate(
        &self,
        pattern: &Pattern,
        source: Value,
        outer: &dyn Scope,
    ) -> Result<Bindings, EvalError> {
        let mut bindings = Bindings::new();
        self.evaluate_into(pattern, source, outer, &mut bindings)?;
        Ok(bindings)
    }

    /// Destructure `source` into an existing environment.
    ///
    /// Names already in `target` are visible to defaults. In declaration form,
    /// re-declaring one of them fails. On error `target` is left unchanged.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(kind = %pattern.kind(), form = ?self.options.form, source = source.type_name())
    )]
    pub fn evaluate_into(
        &self,
        pattern: &Pattern,
        source: Value,
        outer: &dyn Scope,
        target: &mut Bindings,
    ) -> Result<(), EvalError> {
        let pending = match self.options.form {
            BindingForm::Declaration => {
                pattern.check_declaration()?;
                pattern.bound_names().into_iter().map(str::to_string).collect()
            }
            BindingForm::Assignment => {
                pattern.validate()?;
                HashSet::new()
            }
        };

        let mut run = Run {
            options: &self.options,
            outer,
            existing: target,
            staged: HashMap::new(),
            pending,
            writes: Vec::new(),
        };
        run.pattern(pattern, source)?;
        let (staged, writes) = (run.staged, run.writes);

        if self.options.form == BindingForm::Declaration {
            if let Some(name) = staged.keys().find(|name| target.contains(name)) {
                return Err(EvalError::DuplicateBinding { name: name.clone() });
            }
        }
        debug!(bindings = staged.len(), writes = writes.len(), "destructured");
        for (name, value) in staged {
            target.assign(name, value);
        }
        for write in writes {
            write
                .base
                .set_property(&write.key, write.value)
                .map_err(|e| member_error(&write.object, e))?;
        }
        Ok(())
    }
}

/// A member write deferred until the whole pattern succeeds.
struct MemberWrite {
    object: String,
    base: Value,
    key: String,
    value: Value,
}

/// State of one top-level evaluation.
struct Run<'a> {
    options: &'a EvalOptions,
    outer: &'a dyn Scope,
    existing: &'a Bindings,
    staged: HashMap<String, Value>,
    /// Names declared by the pattern and not yet initialised.
    pending: HashSet<String>,
    writes: Vec<MemberWrite>,
}

impl Scope for Run<'_> {
    fn resolve(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.staged.get(name) {
            return Some(value.clone());
        }
        if self.pending.contains(name) {
            trace!(name, "read before initialisation");
            return None;
        }
        if let Some(value) = self.existing.get(name) {
            return Some(value.clone());
        }
        self.outer.resolve(name)
    }
}

impl Run<'_> {
    fn pattern(&mut self, pattern: &Pattern, source: Value) -> Result<(), EvalError> {
        match pattern {
            Pattern::Positional(slots) => self.positional(slots, source),
            Pattern::Keyed(entries) => self.keyed(entries, source),
        }
    }

    fn positional(&mut self, slots: &[Slot], source: Value) -> Result<(), EvalError> {
        if slots.is_empty() && self.options.vacuous_empty_positional {
            return Ok(());
        }
        let mut iter = source.iter_values().map_err(|e| source_error(&source, e))?;
        let mut done = false;

        for slot in slots {
            match slot {
                Slot::Skip => {
                    pull(&mut iter, &mut done);
                }
                Slot::Element(element) => {
                    let value = pull(&mut iter, &mut done);
                    let value = self.with_default(value, element.default.as_ref())?;
                    self.assign(&element.target, value)?;
                }
                Slot::Rest(target) => {
                    let mut items = Vec::new();
                    while let Some(value) = pull_next(&mut iter, &mut done) {
                        if let Some(limit) = self.options.rest_limit {
                            if items.len() >= limit {
                                return Err(EvalError::RestLimitExceeded { limit });
                            }
                        }
                        items.push(value);
                    }
                    trace!(len = items.len(), "rest collected");
                    self.assign(target, Value::array(items))?;
                }
            }
        }
        Ok(())
    }

    fn keyed(&mut self, entries: &[Entry], source: Value) -> Result<(), EvalError> {
        if source.is_nullish() {
            return Err(nullish_error(&source));
        }
        for entry in entries {
            let key = self.key(&entry.key)?;
            let value = source.property(&key).map_err(|e| source_error(&source, e))?;
            let value = self.with_default(value, entry.default.as_ref())?;
            self.assign(&entry.target, value)?;
        }
        Ok(())
    }

    /// Substitute the default when the value is the missing sentinel.
    fn with_default(&self, value: Value, default: Option<&Expr>) -> Result<Value, EvalError> {
        match default {
            Some(expr) if value.is_missing() => {
                trace!("default fired");
                eval_expr(expr, self)
            }
            _ => Ok(value),
        }
    }

    fn key(&self, key: &PropertyKey) -> Result<String, EvalError> {
        match key {
            PropertyKey::Name(name) => Ok(name.clone()),
            PropertyKey::Computed(expr) => Ok(eval_expr(expr, self)?.to_property_key()),
        }
    }

    fn assign(&mut self, target: &Target, value: Value) -> Result<(), EvalError> {
        match target {
            Target::Name(name) => self.bind(name, value),
            Target::Member { object, key } => {
                let base = self.resolve(object).ok_or_else(|| EvalError::UnresolvedReference {
                    name: object.clone(),
                })?;
                let key = self.key(key)?;
                base.check_writable(&key).map_err(|e| member_error(object, e))?;
                self.writes.push(MemberWrite {
                    object: object.clone(),
                    base,
                    key,
                    value,
                });
                Ok(())
            }
            Target::Pattern(nested) => self.pattern(nested, value),
        }
    }

    fn bind(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        trace!(name, ?value, "bind");
        match self.options.form {
            BindingForm::Declaration => {
                self.pending.remove(name);
                if self.staged.contains_key(name) {
                    return Err(EvalError::DuplicateBinding {
                        name: name.to_string(),
                    });
                }
                self.staged.insert(name.to_string(), value);
            }
            BindingForm::Assignment => {
                self.staged.insert(name.to_string(), value);
            }
        }
        Ok(())
    }
}

/// Pull one element, or the missing sentinel once the source is exhausted.
fn pull(iter: &mut ValueIter, done: &mut bool) -> Value {
    pull_next(iter, done).unwrap_or(Value::Undefined)
}

fn pull_next(iter: &mut ValueIter, done: &mut bool) -> Option<Value> {
    if *done {
        return None;
    }
    let next = iter.next();
    if next.is_none() {
        *done = true;
    }
    next
}

fn nullish_error(source: &Value) -> EvalError {
    EvalError::TypeError(format!(
        "cannot destructure '{}' as it is {}",
        source.type_name(),
        source.type_name()
    ))
}

fn source_error(source: &Value, err: ValueError) -> EvalError {
    if source.is_nullish() {
        nullish_error(source)
    } else {
        EvalError::TypeError(err.to_string())
    }
}

fn member_error(object: &str, err: ValueError) -> EvalError {
    match err {
        ValueError::NotWritable { type_name, .. } => EvalError::InvalidMemberTarget {
            object: object.to_string(),
            found: type_name,
        },
        other => EvalError::TypeError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EmptyScope;
    use pretty_assertions::assert_eq;

    fn nums(ns: &[i32]) -> Value {
        Value::array(ns.iter().map(|&n| Value::from(n)))
    }

    #[test]
    fn test_head_and_tail() {
        let pattern = Pattern::positional().bind("head").rest("tail").build().unwrap();
        let env = evaluate(&pattern, nums(&[1, 2, 3, 4]), &EmptyScope).unwrap();
        assert_eq!(env.get("head"), Some(&Value::from(1)));
        assert_eq!(env.get("tail"), Some(&nums(&[2, 3, 4])));
    }

    #[test]
    fn test_missing_slot_is_undefined() {
        // let [x, y, ...z] = ['a']
        let pattern = Pattern::positional().bind("x").bind("y").rest("z").build().unwrap();
        let env = evaluate(&pattern, Value::array([Value::from("a")]), &EmptyScope).unwrap();
        assert_eq!(env.get("x"), Some(&Value::from("a")));
        assert_eq!(env.get("y"), Some(&Value::Undefined));
        assert_eq!(env.get("z"), Some(&Value::array(Vec::new())));
    }

    #[test]
    fn test_tdz_in_declaration() {
        // let [x = y, y = 1] = [];
        let pattern = Pattern::positional()
            .bind_or("x", Expr::reference("y"))
            .bind_or("y", Expr::lit(1))
            .build()
            .unwrap();
        let outer: Bindings = [("y", Value::from(5))].into_iter().collect();
        let err = evaluate(&pattern, Value::array(Vec::new()), &outer).unwrap_err();
        assert_eq!(err, EvalError::UnresolvedReference { name: "y".to_string() });
    }

    #[test]
    fn test_assignment_reads_outer_for_later_name() {
        // [x = y, y = 1] = [] with y already in scope
        let pattern = Pattern::positional()
            .bind_or("x", Expr::reference("y"))
            .bind_or("y", Expr::lit(1))
            .build()
            .unwrap();
        let outer: Bindings = [("y", Value::from(5))].into_iter().collect();
        let evaluator = Evaluator::with_options(EvalOptions::new().assignment());
        let env = evaluator.evaluate(&pattern, Value::array(Vec::new()), &outer).unwrap();
        assert_eq!(env.get("x"), Some(&Value::from(5)));
        assert_eq!(env.get("y"), Some(&Value::from(1)));
    }

    #[test]
    fn test_failure_leaves_target_untouched() {
        let pattern = Pattern::positional()
            .bind("a")
            .bind_or("b", Expr::reference("nope"))
            .build()
            .unwrap();
        let mut env = Bindings::new();
        let result = Evaluator::new().evaluate_into(&pattern, nums(&[1]), &EmptyScope, &mut env);
        assert!(result.is_err());
        assert!(env.is_empty());
    }

    #[test]
    fn test_redeclaration_across_patterns() {
        let first = Pattern::positional().bind("a").build().unwrap();
        let second = Pattern::keyed().field("a").build().unwrap();
        let evaluator = Evaluator::new();
        let mut env = Bindings::new();
        evaluator.evaluate_into(&first, nums(&[10]), &EmptyScope, &mut env).unwrap();
        let err = evaluator
            .evaluate_into(&second, Value::object([("a", Value::from(1))]), &EmptyScope, &mut env)
            .unwrap_err();
        assert_eq!(err, EvalError::DuplicateBinding { name: "a".to_string() });
        assert_eq!(env.get("a"), Some(&Value::from(10)));
    }
}
