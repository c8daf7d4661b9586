//! Replica - Core Library
//!
//! Deep cloning for JS-like values built from primitives, shared arrays and
//! shared string-keyed objects.

pub mod error;
pub mod config;
pub mod value;
pub mod clone;
pub mod graph;
pub mod path;

// Re-export commonly used types
pub use error::{ReplicaError, ReplicaResult};
pub use config::{CyclePolicy, ReplicaConfig, SharedPolicy};
pub use value::{deep_equal, ContainerId, Object, Property, Value};
pub use clone::{deep_clone, deep_clone_with};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_and_function_agree() {
        let input = Value::from(json!({ "list": [1, "two", null, { "three": 3 }] }));
        let via_fn = deep_clone(&input).expect("clone failed");
        let via_method = input.deep_clone().expect("clone failed");

        assert!(deep_equal(&via_fn, &via_method));
        assert!(!via_fn.same(&via_method));
        assert!(!graph::shares_containers(&via_fn, &input));
        assert!(!graph::shares_containers(&via_method, &input));
    }

    #[test]
    fn aliased_and_cyclic_together() {
        // root -> [shared, shared], shared -> { back: root }
        let shared = Value::empty_object();
        let root = Value::array(vec![shared.clone(), shared.clone()]);
        shared.as_object().unwrap().borrow_mut().set("back", root.clone());

        let config = ReplicaConfig::new().with_cycles(CyclePolicy::Reconstruct);
        let clone = deep_clone_with(&root, &config).expect("clone failed");

        let first = clone.at(0).unwrap();
        assert!(first.same(&clone.at(1).unwrap()));
        assert!(first.get("back").unwrap().same(&clone));
        assert_eq!(graph::container_count(&clone), 2);
        assert!(!graph::shares_containers(&clone, &root));

        root.clear();
        clone.clear();
    }
}
