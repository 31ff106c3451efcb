//! Runtime values.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::Sequence;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// The missing sentinel. Only this value triggers defaults.
    Undefined,
    /// The null sentinel
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value
    Number(f64),
    /// String value
    String(Rc<str>),
    /// Array value (shared, mutable through assignment targets)
    Array(Rc<RefCell<Vec<Value>>>),
    /// Object value (shared, mutable through assignment targets)
    Object(Rc<RefCell<BTreeMap<String, Value>>>),
    /// Set value (insertion ordered, no duplicates)
    Set(Rc<Vec<Value>>),
    /// Lazy pull-based sequence
    Sequence(Sequence),
}

impl Value {
    /// Create a string value.
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    /// Create an array value.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Create an object value from key/value pairs. Later keys win.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Object(Rc::new(RefCell::new(map)))
    }

    /// Create a set value, dropping duplicates under SameValueZero.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.iter().any(|seen| seen.same_value_zero(&item)) {
                unique.push(item);
            }
        }
        Value::Set(Rc::new(unique))
    }

    /// The type name reported in errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Set(_) => "set",
            Value::Sequence(_) => "sequence",
        }
    }

    /// Whether this is the missing sentinel.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Whether this is `null` or `undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Strict equality (`===`): compound values compare by identity.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Set(a), Value::Set(b)) => Rc::ptr_eq(a, b),
            (Value::Sequence(a), Value::Sequence(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Address of the shared storage behind an array, object or set.
    /// Walks over nested values use it to detect cycles.
    pub fn identity(&self) -> Option<*const ()> {
        match self {
            Value::Array(items) => Some(Rc::as_ptr(items) as *const ()),
            Value::Object(fields) => Some(Rc::as_ptr(fields) as *const ()),
            Value::Set(items) => Some(Rc::as_ptr(items) as *const ()),
            _ => None,
        }
    }

    /// SameValueZero, the equality used for set membership.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
            _ => self.strict_eq(other),
        }
    }

    /// Try to get as number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Snapshot of an array's elements.
    pub fn as_array(&self) -> Option<Vec<Value>> {
        match self {
            Value::Array(items) => Some(items.borrow().clone()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::Sequence(seq)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_value(self, f, &mut Vec::new())
    }
}

/// `seen` holds the compound values currently being printed; meeting one
/// again prints `[Circular]`.
fn debug_value(value: &Value, f: &mut fmt::Formatter<'_>, seen: &mut Vec<*const ()>) -> fmt::Result {
    let Some(id) = value.identity() else {
        return match value {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", crate::number_to_key(*n)),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Sequence(seq) => write!(f, "<sequence:{}>", seq.label()),
            _ => Ok(()),
        };
    };
    if seen.contains(&id) {
        return write!(f, "[Circular]");
    }
    seen.push(id);
    let result = match value {
        Value::Array(items) => {
            write!(f, "[")?;
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                debug_value(item, f, seen)?;
            }
            write!(f, "]")
        }
        Value::Object(fields) => {
            let fields = fields.borrow();
            write!(f, "{{")?;
            for (i, (name, item)) in fields.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, " {}: ", name)?;
                debug_value(item, f, seen)?;
            }
            if fields.is_empty() {
                write!(f, "}}")
            } else {
                write!(f, " }}")
            }
        }
        Value::Set(items) => {
            write!(f, "Set {{")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, " ")?;
                debug_value(item, f, seen)?;
            }
            write!(f, " }}")
        }
        _ => Ok(()),
    };
    seen.pop();
    result
}

/// Structural equality, used by tests and by callers comparing results.
/// Sequences compare by identity. A pair of compound values already being
/// compared further up counts as equal, so cyclic values terminate.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        eq_values(self, other, &mut Vec::new())
    }
}

fn eq_values(a: &Value, b: &Value, seen: &mut Vec<(*const (), *const ())>) -> bool {
    let (Some(ia), Some(ib)) = (a.identity(), b.identity()) else {
        return a.strict_eq(b);
    };
    if ia == ib || seen.contains(&(ia, ib)) {
        return true;
    }
    seen.push((ia, ib));
    let equal = match (a, b) {
        (Value::Array(x), Value::Array(y)) => eq_slices(&x.borrow(), &y.borrow(), seen),
        (Value::Set(x), Value::Set(y)) => eq_slices(x, y, seen),
        (Value::Object(x), Value::Object(y)) => {
            let (x, y) = (x.borrow(), y.borrow());
            x.len() == y.len()
                && x.iter()
                    .zip(y.iter())
                    .all(|((kx, vx), (ky, vy))| kx == ky && eq_values(vx, vy, seen))
        }
        _ => false,
    };
    seen.pop();
    equal
}

fn eq_slices(x: &[Value], y: &[Value], seen: &mut Vec<(*const (), *const ())>) -> bool {
    x.len() == y.len() && x.iter().zip(y).all(|(a, b)| eq_values(a, b, seen))
}
