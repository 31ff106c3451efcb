//! Pull-based lazy sequences.
//!
//! A `Sequence` stands in for any iterator-protocol source such as a generator.
//! It is one-shot: clones share the same underlying iterator, and values pulled
//! through one clone are gone for the others. Nothing ever restarts it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::Value;

struct SequenceInner {
    label: &'static str,
    iter: RefCell<Box<dyn Iterator<Item = Value>>>,
    pulled: Cell<usize>,
    exhausted: Cell<bool>,
}

/// A lazy, possibly infinite, source of values.
#[derive(Clone)]
pub struct Sequence {
    inner: Rc<SequenceInner>,
}

impl Sequence {
    /// Wrap any iterator as a sequence.
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Self::named("iterator", iter)
    }

    /// Wrap an iterator with a label used in debug output.
    pub fn named<I>(label: &'static str, iter: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Self {
            inner: Rc::new(SequenceInner {
                label,
                iter: RefCell::new(Box::new(iter.into_iter())),
                pulled: Cell::new(0),
                exhausted: Cell::new(false),
            }),
        }
    }

    /// The infinite Fibonacci sequence `0, 1, 1, 2, 3, 5, ...`.
    pub fn fibonacci() -> Self {
        let terms = std::iter::successors(Some((0.0_f64, 1.0_f64)), |&(a, b)| Some((b, a + b)));
        Self::named("fibonacci", terms.map(|(a, _)| Value::Number(a)))
    }

    /// The infinite counting sequence `start, start + 1, ...`.
    pub fn naturals(start: f64) -> Self {
        let terms = std::iter::successors(Some(start), |n| Some(n + 1.0));
        Self::named("naturals", terms.map(Value::Number))
    }

    /// Pull the next value, or `None` once the source is exhausted.
    ///
    /// After the first `None` the underlying iterator is never polled again.
    pub fn next(&self) -> Option<Value> {
        if self.inner.exhausted.get() {
            return None;
        }
        let next = self.inner.iter.borrow_mut().next();
        match next {
            Some(value) => {
                self.inner.pulled.set(self.inner.pulled.get() + 1);
                Some(value)
            }
            None => {
                self.inner.exhausted.set(true);
                None
            }
        }
    }

    /// Number of values pulled so far, across all clones.
    pub fn pulled(&self) -> usize {
        self.inner.pulled.get()
    }

    /// Whether the source has reported its end.
    pub fn is_exhausted(&self) -> bool {
        self.inner.exhausted.get()
    }

    pub fn label(&self) -> &'static str {
        self.inner.label
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("label", &self.inner.label)
            .field("pulled", &self.inner.pulled.get())
            .finish()
    }
}
