//! Expression evaluation for defaults and computed keys.

use destruct_pattern::{Expr, Scope};
use destruct_value::Value;

use crate::EvalError;

/// Evaluate an expression against a scope.
pub(crate) fn eval_expr(expr: &Expr, scope: &dyn Scope) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Ref(name) => scope
            .resolve(name)
            .ok_or_else(|| EvalError::UnresolvedReference { name: name.clone() }),
        Expr::Array(items) => {
            let values = items
                .iter()
                .map(|item| eval_expr(item, scope))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::array(values))
        }
        Expr::Object(fields) => {
            let mut entries = Vec::with_capacity(fields.len());
            for (key, value) in fields {
                entries.push((key.clone(), eval_expr(value, scope)?));
            }
            Ok(Value::object(entries))
        }
        Expr::Thunk(thunk) => Ok(thunk.call(scope)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bindings;

    #[test]
    fn test_fresh_array_each_time() {
        let expr = Expr::Array(vec![Expr::lit(1)]);
        let scope = Bindings::new();
        let a = eval_expr(&expr, &scope).unwrap();
        let b = eval_expr(&expr, &scope).unwrap();
        assert_eq!(a, b);
        assert!(!a.strict_eq(&b));
    }

    #[test]
    fn test_unresolved_ref() {
        let err = eval_expr(&Expr::reference("y"), &Bindings::new()).unwrap_err();
        assert_eq!(err, EvalError::UnresolvedReference { name: "y".to_string() });
    }
}
