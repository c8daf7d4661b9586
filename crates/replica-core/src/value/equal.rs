//! Structural equality
//!
//! Two values are deep-equal when they have the same shape and the same
//! primitives at every path. Objects compare their enumerable own properties
//! regardless of order; prototypes are ignored. Cycles are handled by
//! assuming a pair of containers equal while it is under comparison.

use std::collections::HashSet;
use std::rc::Rc;

use super::value::{ContainerId, Value};

pub fn deep_equal(left: &Value, right: &Value) -> bool {
    Comparison::default().equal(left, right)
}

#[derive(Default)]
struct Comparison {
    assumed: HashSet<(ContainerId, ContainerId)>,
}

impl Comparison {
    fn equal(&mut self, left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                if Rc::ptr_eq(a, b) || !self.assume(ContainerId::of(a), ContainerId::of(b)) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                let equal =
                    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| self.equal(x, y));
                equal
            }
            (Value::Object(a), Value::Object(b)) => {
                if Rc::ptr_eq(a, b) || !self.assume(ContainerId::of(a), ContainerId::of(b)) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                if a.own_enumerable_keys().count() != b.own_enumerable_keys().count() {
                    return false;
                }
                let equal = a.enumerable_entries().all(|(key, x)| {
                    match b.property(key) {
                        Some(property) if property.enumerable => self.equal(x, &property.value),
                        _ => false,
                    }
                });
                equal
            }
            _ => false,
        }
    }

    /// Returns false when the pair is already being compared.
    fn assume(&mut self, left: ContainerId, right: ContainerId) -> bool {
        self.assumed.insert((left, right))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}
