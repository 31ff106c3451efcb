//! Value documents.
//! 值文档。
//!
//! Plain JSON maps onto values directly. Values JSON cannot express use a
//! single-key object tagged with `$`:
//! 普通 JSON 直接映射为值；JSON 无法表达的值使用以 `$` 开头的单键对象：
//!
//! - `{"$undefined": null}`
//! - `{"$set": [...]}`
//! - `{"$seq": [...]}`: one-shot lazy sequence over the items
//! - `{"$fibonacci": null}`, `{"$naturals": 0}`: infinite sequences
//!
//! Unknown `$` tags are read as ordinary objects. Encoding may also produce
//! `{"$sequence": label}` and `{"$circular": type}`, which read back as plain
//! objects.

use destruct_eval::Bindings;
use destruct_value::{Sequence, Value};
use serde_json::{Map, Number, json};

use crate::DocError;

/// Decode a JSON value. / 解码 JSON 值。
pub fn value_from_json(json: &serde_json::Value) -> Result<Value, DocError> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => Value::Number(
            n.as_f64()
                .ok_or_else(|| DocError::Value(format!("number {} is out of range", n)))?,
        ),
        serde_json::Value::String(s) => Value::string(s),
        serde_json::Value::Array(items) => Value::array(decode_all(items)?),
        serde_json::Value::Object(fields) => {
            if let Some(tagged) = decode_tagged(fields)? {
                return Ok(tagged);
            }
            let mut entries = Vec::with_capacity(fields.len());
            for (key, value) in fields {
                entries.push((key.clone(), value_from_json(value)?));
            }
            Value::object(entries)
        }
    })
}

fn decode_all(items: &[serde_json::Value]) -> Result<Vec<Value>, DocError> {
    items.iter().map(value_from_json).collect()
}

fn decode_tagged(fields: &Map<String, serde_json::Value>) -> Result<Option<Value>, DocError> {
    if fields.len() != 1 {
        return Ok(None);
    }
    let Some((tag, payload)) = fields.iter().next() else {
        return Ok(None);
    };
    let items = |what: &str| match payload {
        serde_json::Value::Array(items) => decode_all(items),
        _ => Err(DocError::Value(format!("{} expects an array", what))),
    };
    let value = match tag.as_str() {
        "$undefined" => Value::Undefined,
        "$set" => Value::set(items("$set")?),
        "$seq" => Value::Sequence(Sequence::new(items("$seq")?)),
        "$fibonacci" => Value::Sequence(Sequence::fibonacci()),
        "$naturals" => {
            let start = payload
                .as_f64()
                .ok_or_else(|| DocError::Value("$naturals expects a number".to_string()))?;
            Value::Sequence(Sequence::naturals(start))
        }
        _ => return Ok(None),
    };
    Ok(Some(value))
}

/// Encode a value as JSON. Sequences are opaque and are not pulled. A value
/// nested inside itself encodes as `{"$circular": type}`.
/// 将值编码为 JSON。序列是不透明的，不会被拉取；自引用的值编码为 `{"$circular": 类型}`。
pub fn value_to_json(value: &Value) -> serde_json::Value {
    encode(value, &mut Vec::new())
}

fn encode(value: &Value, seen: &mut Vec<*const ()>) -> serde_json::Value {
    if let Some(id) = value.identity() {
        if seen.contains(&id) {
            return json!({ "$circular": value.type_name() });
        }
        seen.push(id);
    }
    let json = match value {
        Value::Undefined => json!({ "$undefined": null }),
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => serde_json::Value::String(s.to_string()),
        Value::Array(items) => {
            serde_json::Value::Array(items.borrow().iter().map(|v| encode(v, seen)).collect())
        }
        Value::Object(fields) => serde_json::Value::Object(
            fields
                .borrow()
                .iter()
                .map(|(k, v)| (k.clone(), encode(v, seen)))
                .collect(),
        ),
        Value::Set(items) => {
            json!({ "$set": items.iter().map(|v| encode(v, seen)).collect::<Vec<_>>() })
        }
        Value::Sequence(seq) => json!({ "$sequence": seq.label() }),
    };
    if value.identity().is_some() {
        seen.pop();
    }
    json
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        serde_json::Value::Number(Number::from(n as i64))
    } else {
        // NaN and infinities have no JSON form
        Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

/// Encode bindings as a JSON object with sorted keys.
/// 将绑定编码为键有序的 JSON 对象。
pub fn bindings_to_json(bindings: &Bindings) -> serde_json::Value {
    let mut fields = Map::new();
    for name in bindings.names() {
        if let Some(value) = bindings.get(name) {
            fields.insert(name.to_string(), value_to_json(value));
        }
    }
    serde_json::Value::Object(fields)
}
