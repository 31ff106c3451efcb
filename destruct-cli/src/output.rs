//! Output formatting utilities.
//! 输出格式化工具。
//!
//! These functions provide colored terminal output for the CLI.
//! 这些函数为 CLI 提供彩色终端输出。

use destruct_eval::EvalError;

/// Print a success message in green.
/// 以绿色打印成功消息。
pub fn success(msg: &str) {
    println!("\x1b[32m{msg}\x1b[0m");
}

/// Print an error message in red.
/// 以红色打印错误消息。
pub fn error(msg: &str) {
    eprintln!("\x1b[31merror:\x1b[0m {msg}");
}

/// Print an info message in blue.
/// 以蓝色打印信息消息。
pub fn info(msg: &str) {
    eprintln!("\x1b[34m{msg}\x1b[0m");
}

/// Render an evaluation error with its code and, when known, a hint.
/// Verbose output also explains the error code.
/// 渲染求值错误及其错误码，如有可能附带提示；详细模式下还会解释错误码。
pub fn eval_error(err: &EvalError, verbose: bool) -> String {
    let code = err.code();
    let mut rendered = format!("[{code}] {err}");
    if verbose {
        rendered.push_str(&format!("\n  = note: {code}: {}", code.description()));
    }
    if let Some(help) = err.help() {
        rendered.push_str(&format!("\n  = help: {help}"));
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use destruct_eval::PatternError;

    #[test]
    fn test_eval_error_with_help() {
        let err = EvalError::UnresolvedReference { name: "y".to_string() };
        let rendered = eval_error(&err, false);
        assert!(rendered.starts_with("[E0101] y is not defined"));
        assert!(rendered.contains("help:"));
        assert!(!rendered.contains("note:"));
    }

    #[test]
    fn test_eval_error_without_help() {
        let err = EvalError::TypeError("number is not iterable".to_string());
        assert_eq!(eval_error(&err, false), "[E0100] type error: number is not iterable");
    }

    #[test]
    fn test_verbose_explains_code() {
        let err = EvalError::TypeError("number is not iterable".to_string());
        assert_eq!(
            eval_error(&err, true),
            "[E0100] type error: number is not iterable\n  \
             = note: E0100: source value cannot be destructured by this pattern"
        );
    }

    #[test]
    fn test_malformed_pattern_help_matches_cause() {
        let err = EvalError::from(PatternError::MemberInDeclaration {
            object: "obj".to_string(),
        });
        let rendered = eval_error(&err, false);
        assert!(rendered.ends_with("= help: member targets are only allowed in an assignment"));
        assert!(!rendered.contains("rest element"));
    }
}
