//! JSON bridge
//!
//! Builds values from `serde_json` trees and renders them back.

use serde_json::{Map, Number};

use crate::config::ReplicaConfig;
use crate::error::{ReplicaError, ReplicaResult};
use crate::path::AccessPath;
use super::object::Object;
use super::value::{ContainerId, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => {
                Value::array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect::<Object>(),
            ),
        }
    }
}

impl Value {
    /// Render as JSON with default limits.
    ///
    /// `undefined` becomes `null` inside arrays and is skipped in objects,
    /// non-finite numbers become `null`, hidden properties are skipped.
    /// Shared containers are written out at every site; cycles are an error.
    pub fn to_json(&self) -> ReplicaResult<serde_json::Value> {
        self.to_json_with(&ReplicaConfig::default())
    }

    /// Render as JSON, honouring `config.max_depth`.
    pub fn to_json_with(&self, config: &ReplicaConfig) -> ReplicaResult<serde_json::Value> {
        config.validate()?;
        JsonWriter {
            max_depth: config.max_depth,
            ancestors: Vec::new(),
            path: AccessPath::new(),
        }
        .write(self)
    }
}

/// Largest integer an `f64` represents exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Integral numbers render without a fraction, as JS does.
fn number(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::from(n as i64);
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

struct JsonWriter {
    max_depth: usize,
    ancestors: Vec<ContainerId>,
    path: AccessPath,
}

impl JsonWriter {
    fn write(&mut self, value: &Value) -> ReplicaResult<serde_json::Value> {
        match value {
            Value::Undefined | Value::Null => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Number(n) => Ok(number(*n)),
            Value::String(s) => Ok(serde_json::Value::String(s.to_string())),
            Value::Array(items) => {
                self.enter(ContainerId::of(items))?;
                let items = items.borrow();
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    self.path.push_index(index);
                    let written = self.write(item);
                    self.path.pop();
                    out.push(written?);
                }
                self.ancestors.pop();
                Ok(serde_json::Value::Array(out))
            }
            Value::Object(object) => {
                self.enter(ContainerId::of(object))?;
                let object = object.borrow();
                let mut out = Map::new();
                for (key, item) in object.enumerable_entries() {
                    if matches!(item, Value::Undefined) {
                        continue;
                    }
                    self.path.push_key(key.clone());
                    let written = self.write(item);
                    self.path.pop();
                    out.insert(key.to_string(), written?);
                }
                self.ancestors.pop();
                Ok(serde_json::Value::Object(out))
            }
        }
    }

    fn enter(&mut self, id: ContainerId) -> ReplicaResult<()> {
        if self.ancestors.contains(&id) {
            return Err(ReplicaError::CyclicStructure {
                path: self.path.to_string(),
            });
        }
        if self.ancestors.len() >= self.max_depth {
            return Err(ReplicaError::DepthExceeded {
                limit: self.max_depth,
                path: self.path.to_string(),
            });
        }
        self.ancestors.push(id);
        Ok(())
    }
}
