//! Deep Clone
//!
//! Produces a structurally equal copy of a value that shares no container
//! with the input. Each call owns its bookkeeping; nothing outlives it.

mod cloner;

use tracing::debug;

use crate::config::ReplicaConfig;
use crate::error::ReplicaResult;
use crate::value::Value;

use cloner::Cloner;

/// Deep clone with default limits: cycles rejected, shared sub-structure
/// preserved, nesting capped at 512 levels.
pub fn deep_clone(input: &Value) -> ReplicaResult<Value> {
    deep_clone_with(input, &ReplicaConfig::default())
}

/// Deep clone under an explicit configuration.
pub fn deep_clone_with(input: &Value, config: &ReplicaConfig) -> ReplicaResult<Value> {
    config.validate()?;
    if input.is_primitive() {
        return Ok(input.clone());
    }

    debug!(
        kind = input.type_name(),
        max_depth = config.max_depth,
        cycles = ?config.cycles,
        shared = ?config.shared,
        "deep clone started"
    );
    let mut cloner = Cloner::new(config);
    let clone = cloner.clone_value(input)?;
    debug!(containers = cloner.allocated(), "deep clone finished");
    Ok(clone)
}
