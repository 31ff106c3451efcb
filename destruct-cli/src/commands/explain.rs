//! The `destruct explain` command.
//! `destruct explain` 命令。

use super::read_document;
use destruct_json::parse_pattern;

/// Print a static summary of a pattern.
/// 打印模式的静态摘要。
pub fn run(pattern: &str, quiet: bool) -> Result<(), String> {
    let pattern = parse_pattern(&read_document(pattern)?).map_err(|e| e.to_string())?;
    if !quiet {
        println!("{}", pattern.summary());
    }
    Ok(())
}
