//! The `destruct eval` command.
//! `destruct eval` 命令。

use super::read_document;
use crate::output;
use destruct_eval::{BindingForm, Bindings, EmptyScope, EvalOptions, Evaluator};
use destruct_json::{bindings_to_json, parse_pattern, parse_scope, parse_value};
use tracing::debug;

/// Destructure a value and print the resulting bindings as JSON.
/// 解构一个值，并以 JSON 打印得到的绑定。
///
/// In assignment form the outer scope is the environment being assigned
/// into, so the whole updated scope is printed.
/// 赋值形式下外部作用域即被赋值的环境，因此打印整个更新后的作用域。
pub fn run(
    pattern: &str,
    value: &str,
    outer: Option<&str>,
    options: EvalOptions,
    verbose: bool,
    quiet: bool,
) -> Result<(), String> {
    let pattern = parse_pattern(&read_document(pattern)?).map_err(|e| e.to_string())?;
    let source = parse_value(&read_document(value)?).map_err(|e| e.to_string())?;
    let mut scope = match outer {
        Some(doc) => parse_scope(&read_document(doc)?).map_err(|e| e.to_string())?,
        None => Bindings::new(),
    };
    debug!(kind = %pattern.kind(), outer = scope.len(), "evaluating");

    let evaluator = Evaluator::with_options(options);
    let bindings = match evaluator.options().form {
        BindingForm::Declaration => evaluator.evaluate(&pattern, source, &scope),
        BindingForm::Assignment => evaluator
            .evaluate_into(&pattern, source, &EmptyScope, &mut scope)
            .map(|()| scope),
    }
    .map_err(|e| output::eval_error(&e, verbose))?;

    if quiet {
        return Ok(());
    }
    let json = serde_json::to_string_pretty(&bindings_to_json(&bindings))
        .map_err(|e| format!("cannot encode bindings: {}", e))?;
    println!("{}", json);
    Ok(())
}
