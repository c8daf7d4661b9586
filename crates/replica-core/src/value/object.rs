//! Object Model
//!
//! A flat, insertion-ordered record of own properties. The optional
//! prototype link is consulted by lookups only; nothing else walks it.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::value::{ContainerId, ObjectRef, Value};

/// A single own property
#[derive(Debug, Clone)]
pub struct Property {
    pub value: Value,
    pub enumerable: bool,
}

/// String-keyed record
#[derive(Default)]
pub struct Object {
    properties: Vec<(Rc<str>, Property)>,
    index: HashMap<Rc<str>, usize>,
    prototype: Option<ObjectRef>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty object whose lookups fall back to `prototype`
    pub fn with_prototype(prototype: ObjectRef) -> Self {
        Object {
            prototype: Some(prototype),
            ..Self::default()
        }
    }

    pub fn prototype(&self) -> Option<&ObjectRef> {
        self.prototype.as_ref()
    }

    pub fn set_prototype(&mut self, prototype: Option<ObjectRef>) {
        self.prototype = prototype;
    }

    /// Assign a property. New keys are enumerable; existing keys keep their flag.
    pub fn set(&mut self, key: impl Into<Rc<str>>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.properties[slot].1.value, value)),
            None => {
                self.insert(key, Property { value, enumerable: true });
                None
            }
        }
    }

    /// Define a non-enumerable property, replacing any existing one.
    pub fn define_hidden(&mut self, key: impl Into<Rc<str>>, value: Value) {
        let key = key.into();
        let property = Property { value, enumerable: false };
        match self.index.get(&key) {
            Some(&slot) => self.properties[slot].1 = property,
            None => self.insert(key, property),
        }
    }

    fn insert(&mut self, key: Rc<str>, property: Property) {
        self.index.insert(Rc::clone(&key), self.properties.len());
        self.properties.push((key, property));
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let slot = self.index.remove(key)?;
        let (_, property) = self.properties.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        Some(property.value)
    }

    pub fn has_own(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get_own(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&slot| &self.properties[slot].1.value)
    }

    pub fn property(&self, key: &str) -> Option<&Property> {
        self.index.get(key).map(|&slot| &self.properties[slot].1)
    }

    /// Own property first, then the prototype chain.
    ///
    /// A chain that loops back on itself ends the lookup.
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.get_own(key) {
            return Some(value.clone());
        }

        let mut seen = HashSet::new();
        let mut current = self.prototype.clone();
        while let Some(prototype) = current {
            if !seen.insert(ContainerId::of(&prototype)) {
                break;
            }
            let object = prototype.borrow();
            if let Some(value) = object.get_own(key) {
                return Some(value.clone());
            }
            current = object.prototype.clone();
        }
        None
    }

    /// Own keys in insertion order, hidden ones included
    pub fn own_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.iter().map(|(key, _)| &**key)
    }

    pub fn own_enumerable_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.enumerable_entries().map(|(key, _)| &**key)
    }

    /// Every own property in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&Rc<str>, &Property)> + '_ {
        self.properties.iter().map(|(key, property)| (key, property))
    }

    pub fn enumerable_entries(&self) -> impl Iterator<Item = (&Rc<str>, &Value)> + '_ {
        self.properties
            .iter()
            .filter(|(_, property)| property.enumerable)
            .map(|(key, property)| (key, &property.value))
    }

    /// Number of own properties, hidden ones included
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Remove every own property and the prototype link
    pub fn clear(&mut self) {
        self.properties.clear();
        self.index.clear();
        self.prototype = None;
    }
}

impl<K: Into<Rc<str>>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.set(key, value);
        }
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn shared(object: Object) -> ObjectRef {
        Rc::new(RefCell::new(object))
    }

    #[test]
    fn set_keeps_insertion_order_and_overwrites_in_place() {
        let mut object = Object::new();
        object.set("b", Value::from(1));
        object.set("a", Value::from(2));
        let previous = object.set("b", Value::from(3));

        assert!(previous.unwrap().same(&Value::from(1)));
        assert_eq!(object.own_keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(object.get_own("b").unwrap().same(&Value::from(3)));
    }

    #[test]
    fn hidden_properties_are_own_but_not_enumerable() {
        let mut object = Object::new();
        object.set("shown", Value::from(1));
        object.define_hidden("secret", Value::from(2));

        assert!(object.has_own("secret"));
        assert_eq!(object.own_keys().collect::<Vec<_>>(), vec!["shown", "secret"]);
        assert_eq!(object.own_enumerable_keys().collect::<Vec<_>>(), vec!["shown"]);

        // assignment does not make it enumerable
        object.set("secret", Value::from(5));
        assert!(!object.property("secret").unwrap().enumerable);
    }

    #[test]
    fn remove_reindexes_later_keys() {
        let mut object: Object = [("a", Value::from(1)), ("b", Value::from(2)), ("c", Value::from(3))]
            .into_iter()
            .collect();
        assert!(object.remove("a").is_some());
        assert!(object.remove("a").is_none());
        assert!(object.get_own("c").unwrap().same(&Value::from(3)));
        object.set("c", Value::from(9));
        assert_eq!(object.own_keys().collect::<Vec<_>>(), vec!["b", "c"]);
        assert!(object.get_own("c").unwrap().same(&Value::from(9)));
    }

    #[test]
    fn get_walks_the_prototype_chain() {
        let mut root = Object::new();
        root.set("x", Value::from("from root"));
        let root = shared(root);

        let middle = shared(Object::with_prototype(Rc::clone(&root)));
        let mut child = Object::with_prototype(middle);
        child.set("own", Value::from(1));

        assert!(child.get("x").unwrap().same(&Value::from("from root")));
        assert!(child.get_own("x").is_none());
        assert!(child.get("missing").is_none());
    }

    #[test]
    fn looping_prototype_chain_terminates() {
        let a = shared(Object::new());
        let b = shared(Object::with_prototype(Rc::clone(&a)));
        a.borrow_mut().set_prototype(Some(Rc::clone(&b)));

        let child = Object::with_prototype(Rc::clone(&a));
        assert!(child.get("nowhere").is_none());

        a.borrow_mut().clear();
    }
}
