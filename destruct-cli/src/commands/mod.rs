//! CLI command implementations.

pub mod check;
pub mod eval;
pub mod explain;

use std::fs;
use std::path::Path;

/// Read a document argument: an existing file path, or inline JSON text.
/// 读取文档参数：已存在的文件路径，或内联 JSON 文本。
pub fn read_document(arg: &str) -> Result<String, String> {
    let path = Path::new(arg);
    if path.is_file() {
        fs::read_to_string(path).map_err(|e| format!("cannot read file '{}': {}", arg, e))
    } else {
        Ok(arg.to_string())
    }
}
