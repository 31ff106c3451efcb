//! Key-based lookup on values.
//!
//! Keyed patterns see every non-nullish value through a key-lookup view:
//! objects expose their own keys, arrays and strings expose index keys and
//! `length`, sets expose `size`. Other primitives expose nothing.

use crate::{Value, ValueError};

/// Format a number the way it prints as a property key: `1`, not `1.0`.
pub fn number_to_key(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let key = if n > 0.0 { "Infinity" } else { "-Infinity" };
        key.to_string()
    } else if n.fract() == 0.0 && n.abs() < 9.0e15 {
        // -0 prints as 0
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Largest array index, `2^32 - 2`.
const MAX_ARRAY_INDEX: u32 = u32::MAX - 1;

/// How far past the end of an array a write may land.
pub const MAX_ARRAY_GAP: usize = 1 << 20;

fn index_key(key: &str) -> Option<usize> {
    if key == "0" {
        return Some(0);
    }
    if key.starts_with('0') || key.starts_with('+') {
        return None;
    }
    let index: u32 = key.parse().ok()?;
    (index <= MAX_ARRAY_INDEX).then_some(index as usize)
}

impl Value {
    /// Convert a computed key to a property key.
    pub fn to_property_key(&self) -> String {
        match self {
            Value::String(s) => s.to_string(),
            Value::Number(n) => number_to_key(*n),
            Value::Bool(b) => b.to_string(),
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            other => format!("{:?}", other),
        }
    }

    /// Look up a property. Absent keys yield `Undefined`.
    pub fn property(&self, key: &str) -> Result<Value, ValueError> {
        let found = match self {
            Value::Undefined | Value::Null => {
                return Err(ValueError::NullishLookup {
                    type_name: self.type_name(),
                });
            }
            Value::Object(fields) => fields.borrow().get(key).cloned(),
            Value::Array(items) => {
                if key == "length" {
                    Some(Value::Number(items.borrow().len() as f64))
                } else {
                    index_key(key).and_then(|i| items.borrow().get(i).cloned())
                }
            }
            Value::String(text) => {
                if key == "length" {
                    Some(Value::Number(text.chars().count() as f64))
                } else {
                    index_key(key)
                        .and_then(|i| text.chars().nth(i))
                        .map(|c| Value::string(c.to_string()))
                }
            }
            Value::Set(items) => (key == "size").then(|| Value::Number(items.len() as f64)),
            Value::Bool(_) | Value::Number(_) | Value::Sequence(_) => None,
        };
        Ok(found.unwrap_or(Value::Undefined))
    }

    /// Check that `set_property` with this key would succeed.
    pub fn check_writable(&self, key: &str) -> Result<(), ValueError> {
        match self {
            Value::Object(_) => Ok(()),
            Value::Array(items) => match index_key(key) {
                Some(index) if index.saturating_sub(items.borrow().len()) <= MAX_ARRAY_GAP => Ok(()),
                _ => Err(ValueError::NotWritable {
                    type_name: self.type_name(),
                    key: key.to_string(),
                }),
            },
            other => Err(ValueError::NotWritable {
                type_name: other.type_name(),
                key: key.to_string(),
            }),
        }
    }

    /// Write a property through to an array or object.
    ///
    /// Writing past the end of an array fills the gap with `Undefined`.
    pub fn set_property(&self, key: &str, value: Value) -> Result<(), ValueError> {
        self.check_writable(key)?;
        match self {
            Value::Object(fields) => {
                fields.borrow_mut().insert(key.to_string(), value);
            }
            Value::Array(items) => {
                if let Some(index) = index_key(key) {
                    let mut items = items.borrow_mut();
                    if index >= items.len() {
                        items.resize(index + 1, Value::Undefined);
                    }
                    items[index] = value;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys() {
        assert_eq!(number_to_key(1.0), "1");
        assert_eq!(number_to_key(-0.0), "0");
        assert_eq!(number_to_key(1.5), "1.5");
        assert_eq!(number_to_key(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_string_view() {
        let s = Value::from("hello");
        assert_eq!(s.property("length"), Ok(Value::from(5)));
        assert_eq!(s.property("1"), Ok(Value::from("e")));
        assert_eq!(s.property("01"), Ok(Value::Undefined));
        assert_eq!(s.property("toString"), Ok(Value::Undefined));
    }

    #[test]
    fn test_nullish_lookup_fails() {
        assert_eq!(
            Value::Null.property("x"),
            Err(ValueError::NullishLookup { type_name: "null" })
        );
    }

    #[test]
    fn test_array_write_grows() {
        let arr = Value::array(Vec::new());
        arr.set_property("2", Value::from(true)).unwrap();
        assert_eq!(arr, Value::array([Value::Undefined, Value::Undefined, Value::from(true)]));
        assert!(arr.set_property("len", Value::Null).is_err());
    }

    #[test]
    fn test_index_range() {
        assert_eq!(index_key("4294967294"), Some(4294967294));
        assert_eq!(index_key("4294967295"), None);
        assert_eq!(index_key("18446744073709551615"), None);
        let arr = Value::array([Value::from(1)]);
        assert_eq!(arr.property("4294967295"), Ok(Value::Undefined));
    }

    #[test]
    fn test_array_write_too_far_rejected() {
        let arr = Value::array(Vec::new());
        for key in ["4294967294", "4294967295", "18446744073709551615"] {
            assert_eq!(
                arr.set_property(key, Value::Null),
                Err(ValueError::NotWritable { type_name: "array", key: key.to_string() })
            );
        }
        assert_eq!(arr.as_array().map(|items| items.len()), Some(0));
        assert!(arr.check_writable(&MAX_ARRAY_GAP.to_string()).is_ok());
        assert!(arr.check_writable(&(MAX_ARRAY_GAP + 1).to_string()).is_err());
    }
}
