//! Ordered iteration over iterable values.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{Sequence, Value, ValueError};

/// A fused, pull-based iterator over an iterable value.
///
/// Arrays are read by live index, so writes made while iterating are observed.
pub struct ValueIter {
    state: IterState,
}

enum IterState {
    Array { items: Rc<RefCell<Vec<Value>>>, index: usize },
    Chars { text: Rc<str>, offset: usize },
    Set { items: Rc<Vec<Value>>, index: usize },
    Sequence(Sequence),
    Done,
}

impl Value {
    /// Obtain an ordered iterator over this value.
    pub fn iter_values(&self) -> Result<ValueIter, ValueError> {
        let state = match self {
            Value::Array(items) => IterState::Array { items: items.clone(), index: 0 },
            Value::String(text) => IterState::Chars { text: text.clone(), offset: 0 },
            Value::Set(items) => IterState::Set { items: items.clone(), index: 0 },
            Value::Sequence(seq) => IterState::Sequence(seq.clone()),
            other => {
                return Err(ValueError::NotIterable {
                    type_name: other.type_name(),
                });
            }
        };
        Ok(ValueIter { state })
    }

    /// Whether `iter_values` would succeed.
    pub fn is_iterable(&self) -> bool {
        matches!(
            self,
            Value::Array(_) | Value::String(_) | Value::Set(_) | Value::Sequence(_)
        )
    }
}

impl Iterator for ValueIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let next = match &mut self.state {
            IterState::Array { items, index } => {
                let item = items.borrow().get(*index).cloned();
                *index += 1;
                item
            }
            IterState::Chars { text, offset } => {
                let ch = text[*offset..].chars().next();
                if let Some(ch) = ch {
                    *offset += ch.len_utf8();
                }
                ch.map(|c| Value::string(c.to_string()))
            }
            IterState::Set { items, index } => {
                let item = items.get(*index).cloned();
                *index += 1;
                item
            }
            IterState::Sequence(seq) => seq.next(),
            IterState::Done => None,
        };
        if next.is_none() {
            self.state = IterState::Done;
        }
        next
    }
}

impl std::iter::FusedIterator for ValueIter {}
