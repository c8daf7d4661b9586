//! Cloner
//!
//! Single-call traversal state. Containers are tracked by identity in two
//! maps: `open` holds clones still being filled (their originals are on the
//! current path), `done` holds finished clones for aliasing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::{CyclePolicy, ReplicaConfig, SharedPolicy};
use crate::error::{ReplicaError, ReplicaResult};
use crate::path::AccessPath;
use crate::value::{ArrayRef, ContainerId, Object, ObjectRef, Value};

#[derive(Debug)]
pub(crate) struct Cloner<'a> {
    config: &'a ReplicaConfig,
    open: HashMap<ContainerId, Value>,
    done: HashMap<ContainerId, Value>,
    path: AccessPath,
    allocated: usize,
}

impl<'a> Cloner<'a> {
    pub(crate) fn new(config: &'a ReplicaConfig) -> Self {
        Cloner {
            config,
            open: HashMap::new(),
            done: HashMap::new(),
            path: AccessPath::new(),
            allocated: 0,
        }
    }

    /// Containers allocated so far
    pub(crate) fn allocated(&self) -> usize {
        self.allocated
    }

    /// Single dispatch point over the three variants.
    pub(crate) fn clone_value(&mut self, value: &Value) -> ReplicaResult<Value> {
        match value {
            Value::Array(items) => self.clone_array(items),
            Value::Object(object) => self.clone_object(object),
            primitive => Ok(primitive.clone()),
        }
    }

    fn clone_array(&mut self, source: &ArrayRef) -> ReplicaResult<Value> {
        let id = ContainerId::of(source);
        if let Some(existing) = self.revisit(id)? {
            return Ok(existing);
        }

        let target: ArrayRef = Rc::new(RefCell::new(Vec::new()));
        let clone = Value::Array(Rc::clone(&target));
        self.begin(id, &clone);

        let items = source.borrow();
        trace!(path = %self.path, len = items.len(), "clone array");
        let mut cloned = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            self.path.push_index(index);
            let result = self.clone_value(item);
            self.path.pop();
            cloned.push(result?);
        }
        *target.borrow_mut() = cloned;

        self.finish(id, &clone);
        Ok(clone)
    }

    fn clone_object(&mut self, source: &ObjectRef) -> ReplicaResult<Value> {
        let id = ContainerId::of(source);
        if let Some(existing) = self.revisit(id)? {
            return Ok(existing);
        }

        let target: ObjectRef = Rc::new(RefCell::new(Object::new()));
        let clone = Value::Object(Rc::clone(&target));
        self.begin(id, &clone);

        let object = source.borrow();
        trace!(path = %self.path, keys = object.len(), "clone object");
        let mut cloned = Object::new();
        for (key, value) in object.enumerable_entries() {
            self.path.push_key(Rc::clone(key));
            let result = self.clone_value(value);
            self.path.pop();
            cloned.set(Rc::clone(key), result?);
        }
        *target.borrow_mut() = cloned;

        self.finish(id, &clone);
        Ok(clone)
    }

    /// Resolve a container seen before, or check the depth limit for a new one.
    fn revisit(&self, id: ContainerId) -> ReplicaResult<Option<Value>> {
        if let Some(finished) = self.done.get(&id) {
            return Ok(Some(finished.clone()));
        }

        if let Some(pending) = self.open.get(&id) {
            return match self.config.cycles {
                CyclePolicy::Reconstruct => Ok(Some(pending.clone())),
                CyclePolicy::Reject => {
                    debug!(path = %self.path, "cyclic structure rejected");
                    Err(ReplicaError::CyclicStructure {
                        path: self.path.to_string(),
                    })
                }
            };
        }

        if self.open.len() >= self.config.max_depth {
            debug!(path = %self.path, limit = self.config.max_depth, "depth limit reached");
            return Err(ReplicaError::DepthExceeded {
                limit: self.config.max_depth,
                path: self.path.to_string(),
            });
        }

        Ok(None)
    }

    fn begin(&mut self, id: ContainerId, clone: &Value) {
        self.allocated += 1;
        self.open.insert(id, clone.clone());
    }

    fn finish(&mut self, id: ContainerId, clone: &Value) {
        self.open.remove(&id);
        if self.config.shared == SharedPolicy::Preserve {
            self.done.insert(id, clone.clone());
        }
    }
}
