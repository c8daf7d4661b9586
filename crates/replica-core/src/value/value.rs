//! Runtime Value Representation
//!
//! Defines the JS-like values a clone operates on. Primitives are immutable;
//! arrays and objects are shared, mutable containers with reference identity.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::ReplicaResult;
use super::object::Object;

/// Shared handle to an array's elements
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Shared handle to an object's properties
pub type ObjectRef = Rc<RefCell<Object>>;

/// Identity of a live container, derived from its allocation address.
///
/// Only meaningful while the container is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(usize);

impl ContainerId {
    pub fn of<T>(container: &Rc<T>) -> Self {
        ContainerId(Rc::as_ptr(container) as *const () as usize)
    }
}

/// Runtime value
#[derive(Clone, Default)]
pub enum Value {
    /// Missing value
    #[default]
    Undefined,

    /// Absence of a value
    Null,

    /// Boolean value
    Bool(bool),

    /// Numeric value (IEEE 754)
    Number(f64),

    /// Immutable string
    String(Rc<str>),

    /// Ordered sequence
    Array(ArrayRef),

    /// String-keyed record
    Object(ObjectRef),
}

impl Value {
    /// New array owning `items`
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    /// New object owning `object`
    pub fn object(object: Object) -> Self {
        Value::Object(Rc::new(RefCell::new(object)))
    }

    pub fn empty_array() -> Self {
        Self::array(Vec::new())
    }

    pub fn empty_object() -> Self {
        Self::object(Object::new())
    }

    pub fn is_primitive(&self) -> bool {
        !self.is_container()
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Name of the variant as JS would report it
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Identity of the container, `None` for primitives
    pub fn container_id(&self) -> Option<ContainerId> {
        match self {
            Value::Array(items) => Some(ContainerId::of(items)),
            Value::Object(object) => Some(ContainerId::of(object)),
            _ => None,
        }
    }

    /// Strict identity: containers compare by reference, primitives by value.
    ///
    /// `NaN` is never the same as itself, `+0` and `-0` are.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Element at `index` of an array
    pub fn at(&self, index: usize) -> Option<Value> {
        self.as_array()?.borrow().get(index).cloned()
    }

    /// Property lookup on an object, following the prototype chain
    pub fn get(&self, key: &str) -> Option<Value> {
        self.as_object()?.borrow().get(key)
    }

    /// Own element or enumerable property count; 0 for primitives
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.borrow().len(),
            Value::Object(object) => object.borrow().own_enumerable_keys().count(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop a container's contents. Breaks reference cycles so they can be freed.
    pub fn clear(&self) {
        match self {
            Value::Array(items) => items.borrow_mut().clear(),
            Value::Object(object) => object.borrow_mut().clear(),
            _ => {}
        }
    }

    /// Structurally independent copy with default limits
    pub fn deep_clone(&self) -> ReplicaResult<Value> {
        crate::clone::deep_clone(self)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::object(object)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Cycle-safe debug rendering; a back-reference prints as `[Circular]`.
struct DebugRender {
    ancestors: Vec<ContainerId>,
}

impl DebugRender {
    fn write(&mut self, value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match value {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(items) => {
                let id = ContainerId::of(items);
                if self.ancestors.contains(&id) {
                    return write!(f, "[Circular]");
                }
                self.ancestors.push(id);
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    self.write(item, f)?;
                }
                self.ancestors.pop();
                write!(f, "]")
            }
            Value::Object(object) => {
                let id = ContainerId::of(object);
                if self.ancestors.contains(&id) {
                    return write!(f, "[Circular]");
                }
                self.ancestors.push(id);
                self.write_entries(&object.borrow(), f)?;
                self.ancestors.pop();
                Ok(())
            }
        }
    }

    fn write_entries(&mut self, object: &Object, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut written = 0;
        for (key, value) in object.enumerable_entries() {
            if written > 0 {
                write!(f, ",")?;
            }
            write!(f, " {:?}: ", key)?;
            self.write(value, f)?;
            written += 1;
        }
        if written == 0 {
            write!(f, "}}")
        } else {
            write!(f, " }}")
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        DebugRender { ancestors: Vec::new() }.write(self, f)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        DebugRender { ancestors: Vec::new() }.write_entries(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_is_reference_identity_for_containers() {
        let a = Value::array(vec![Value::from(1)]);
        let alias = a.clone();
        let other = Value::array(vec![Value::from(1)]);

        assert!(a.same(&alias));
        assert!(!a.same(&other));
        assert_eq!(a.container_id(), alias.container_id());
        assert_ne!(a.container_id(), other.container_id());
    }

    #[test]
    fn same_follows_js_number_rules() {
        assert!(Value::from(0.0).same(&Value::from(-0.0)));
        assert!(!Value::from(f64::NAN).same(&Value::from(f64::NAN)));
        assert!(Value::from("x").same(&Value::from(String::from("x"))));
        assert!(!Value::Null.same(&Value::Undefined));
    }

    #[test]
    fn primitives_have_no_container_id() {
        for value in [Value::Undefined, Value::Null, Value::from(true), Value::from(2), Value::from("s")] {
            assert!(value.is_primitive());
            assert_eq!(value.container_id(), None);
        }
    }

    #[test]
    fn debug_marks_cycles() {
        let a = Value::array(vec![Value::from(1)]);
        a.as_array().unwrap().borrow_mut().push(a.clone());
        assert_eq!(format!("{:?}", a), "[1, [Circular]]");
        a.clear();
    }

    #[test]
    fn debug_renders_objects() {
        let mut object = Object::new();
        object.set("a", Value::from(vec![Value::from(1), Value::Null]));
        object.set("b", Value::from("x"));
        let value = Value::object(object);
        assert_eq!(format!("{:?}", value), r#"{ "a": [1, null], "b": "x" }"#);
        assert_eq!(format!("{:?}", Value::empty_object()), "{}");
    }

    #[test]
    fn accessors_match_only_their_variant() {
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(2.5).as_number(), Some(2.5));
        assert_eq!(Value::from("s").as_str(), Some("s"));

        assert_eq!(Value::from(1).as_bool(), None);
        assert_eq!(Value::from(false).as_number(), None);
        assert_eq!(Value::Null.as_str(), None);
        assert!(Value::from(1).as_array().is_none());
        assert!(Value::empty_array().as_object().is_none());
    }

    #[test]
    fn option_maps_none_to_null() {
        assert!(Value::from(None::<i32>).same(&Value::Null));
        assert!(Value::from(Some(3)).same(&Value::from(3)));
    }
}
