//! JSON document format for destruct.
//! destruct 的 JSON 文档格式。
//!
//! Patterns, default expressions, source values and outer scopes can be
//! written as JSON so they can be stored in files and fed to the CLI.
//! 模式、默认值表达式、源值和外部作用域都可以写成 JSON，便于存入文件并交给 CLI。

mod pattern;
mod value;

pub use pattern::{EntryDoc, ExprDoc, MemberDoc, PatternDoc, SlotDoc};
pub use value::{bindings_to_json, value_from_json, value_to_json};

use destruct_eval::Bindings;
use destruct_pattern::{Pattern, PatternError};
use destruct_value::Value;
use thiserror::Error;

/// Errors raised while reading documents.
/// 读取文档时产生的错误。
#[derive(Debug, Error)]
pub enum DocError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid target: {0}")]
    Target(String),

    #[error("invalid value: {0}")]
    Value(String),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Parse a pattern document and validate its structure.
/// 解析模式文档并校验其结构。
pub fn parse_pattern(text: &str) -> Result<Pattern, DocError> {
    let doc: PatternDoc = serde_json::from_str(text)?;
    doc.into_pattern()
}

/// Parse a value document.
/// 解析值文档。
pub fn parse_value(text: &str) -> Result<Value, DocError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    value_from_json(&json)
}

/// Parse an outer scope: a JSON object mapping names to values.
/// 解析外部作用域：一个从名称映射到值的 JSON 对象。
pub fn parse_scope(text: &str) -> Result<Bindings, DocError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Object(fields) = json else {
        return Err(DocError::Value("scope must be a JSON object".to_string()));
    };
    let mut scope = Bindings::new();
    for (name, value) in &fields {
        scope.assign(name.clone(), value_from_json(value)?);
    }
    Ok(scope)
}
