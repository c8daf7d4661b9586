//! Replica Configuration
//!
//! Defines traversal limits and structural policies for a clone.
//! Configuration specifies constraints only; enforcement is handled by the cloner.

use serde::Deserialize;

use crate::error::{ReplicaError, ReplicaResult};

/// What to do when a container is reached again while it is still being cloned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CyclePolicy {
    /// Fail with `ReplicaError::CyclicStructure`.
    #[default]
    Reject,

    /// Point the back-reference at the clone under construction.
    Reconstruct,
}

/// What to do when a finished container is reached again through another path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SharedPolicy {
    /// Clone once and alias the clone at every site.
    #[default]
    Preserve,

    /// Give every site its own copy.
    Duplicate,
}

/// Clone configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReplicaConfig {
    /// Maximum number of nested container levels
    pub max_depth: usize,

    /// Back-reference handling
    pub cycles: CyclePolicy,

    /// Aliased sub-structure handling
    pub shared: SharedPolicy,
}

impl Default for ReplicaConfig {
    fn default() -> Self {
        ReplicaConfig {
            max_depth: 512,
            cycles: CyclePolicy::Reject,
            shared: SharedPolicy::Preserve,
        }
    }
}

impl ReplicaConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cycles(mut self, cycles: CyclePolicy) -> Self {
        self.cycles = cycles;
        self
    }

    pub fn with_shared(mut self, shared: SharedPolicy) -> Self {
        self.shared = shared;
        self
    }

    /// Reject configurations no traversal could satisfy.
    pub fn validate(&self) -> ReplicaResult<()> {
        if self.max_depth == 0 {
            return Err(ReplicaError::Config(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
