//! The `destruct check` command.
//! `destruct check` 命令。

use super::read_document;
use crate::output;
use destruct_eval::EvalError;
use destruct_json::parse_pattern;

/// Validate a pattern without evaluating it.
/// 校验模式但不求值。
pub fn run(pattern: &str, assign: bool, verbose: bool, quiet: bool) -> Result<(), String> {
    let pattern = parse_pattern(&read_document(pattern)?).map_err(|e| e.to_string())?;

    if verbose && !quiet {
        output::info(&format!(
            "Parsed {} pattern binding {} name(s)",
            pattern.kind(),
            pattern.bound_names().len()
        ));
    }

    let checked = if assign {
        pattern.validate()
    } else {
        pattern.check_declaration()
    };
    checked.map_err(|e| output::eval_error(&EvalError::from(e), verbose))?;

    if !quiet {
        output::success("OK - No errors found");
    }
    Ok(())
}
