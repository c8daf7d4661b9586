//! Container graph queries
//!
//! Iterative walks over the containers reachable from a value, so arbitrarily
//! deep input cannot exhaust the call stack.
//!
//! `is_cyclic` follows what a clone sees (enumerable own properties).
//! `reachable_containers` follows everything: hidden properties and
//! prototype links included.

use std::collections::{HashMap, HashSet};

use crate::value::{ContainerId, Value};

/// Children visible to a clone
fn enumerable_children(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.borrow().clone(),
        Value::Object(object) => object
            .borrow()
            .enumerable_entries()
            .map(|(_, child)| child.clone())
            .collect(),
        _ => Vec::new(),
    }
}

/// Every container referenced by `value`, prototype included
fn all_children(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.borrow().clone(),
        Value::Object(object) => {
            let object = object.borrow();
            let mut children: Vec<Value> = object
                .entries()
                .map(|(_, property)| property.value.clone())
                .collect();
            if let Some(prototype) = object.prototype() {
                children.push(Value::Object(prototype.clone()));
            }
            children
        }
        _ => Vec::new(),
    }
}

/// Identities of every container reachable from `root`, `root` included.
pub fn reachable_containers(root: &Value) -> HashSet<ContainerId> {
    let mut seen = HashSet::new();
    let mut pending = vec![root.clone()];
    while let Some(value) = pending.pop() {
        let Some(id) = value.container_id() else {
            continue;
        };
        if seen.insert(id) {
            pending.extend(all_children(&value).into_iter().filter(Value::is_container));
        }
    }
    seen
}

/// Whether any container is reachable from both values.
pub fn shares_containers(left: &Value, right: &Value) -> bool {
    let left = reachable_containers(left);
    reachable_containers(right)
        .iter()
        .any(|id| left.contains(id))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnPath,
    Finished,
}

enum Step {
    Enter(Value),
    Leave(ContainerId),
}

/// Whether some container reaches itself through enumerable properties.
pub fn is_cyclic(root: &Value) -> bool {
    let mut marks: HashMap<ContainerId, Mark> = HashMap::new();
    let mut steps = vec![Step::Enter(root.clone())];

    while let Some(step) = steps.pop() {
        match step {
            Step::Leave(id) => {
                marks.insert(id, Mark::Finished);
            }
            Step::Enter(value) => {
                let Some(id) = value.container_id() else {
                    continue;
                };
                match marks.get(&id) {
                    Some(Mark::OnPath) => return true,
                    Some(Mark::Finished) => continue,
                    None => {}
                }
                marks.insert(id, Mark::OnPath);
                steps.push(Step::Leave(id));
                steps.extend(enumerable_children(&value).into_iter().map(Step::Enter));
            }
        }
    }
    false
}

/// Number of distinct containers reachable from `root`.
pub fn container_count(root: &Value) -> usize {
    reachable_containers(root).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Object;
    use serde_json::json;

    #[test]
    fn tree_is_not_cyclic() {
        let value = Value::from(json!({ "a": [1, { "b": [] }], "c": {} }));
        assert!(!is_cyclic(&value));
        assert_eq!(container_count(&value), 5);
    }

    #[test]
    fn diamond_is_not_cyclic() {
        let shared = Value::from(json!([1]));
        let value = Value::array(vec![shared.clone(), shared]);
        assert!(!is_cyclic(&value));
        assert_eq!(container_count(&value), 2);
    }

    #[test]
    fn self_reference_is_cyclic() {
        let value = Value::empty_object();
        value.as_object().unwrap().borrow_mut().set("me", value.clone());
        assert!(is_cyclic(&value));
        value.clear();
    }

    #[test]
    fn hidden_back_reference_is_not_a_clone_cycle() {
        let value = Value::empty_object();
        value.as_object().unwrap().borrow_mut().define_hidden("me", value.clone());
        assert!(!is_cyclic(&value));
        assert_eq!(container_count(&value), 1);
        value.clear();
    }

    #[test]
    fn sharing_is_detected_through_prototypes() {
        let parent = Value::empty_object();
        let child = Value::object(Object::with_prototype(parent.as_object().unwrap().clone()));
        assert!(shares_containers(&child, &parent));
        assert!(!shares_containers(&child, &Value::empty_object()));
        assert!(!shares_containers(&Value::from(1), &Value::from(1)));
    }
}
