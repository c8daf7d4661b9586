//! Replica Error Types
//!
//! Defines the error conditions a clone or conversion can produce.
//! Errors carry the access path at which the traversal stopped.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplicaError {
    // Structural errors
    /// A container refers back to one of its own ancestors.
    #[error("cyclic structure at {path}")]
    CyclicStructure { path: String },

    /// Nesting went past the configured depth limit.
    #[error("nesting depth exceeds limit of {limit} at {path}")]
    DepthExceeded { limit: usize, path: String },

    // Configuration errors
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ReplicaError {
    /// Access path carried by structural errors.
    pub fn path(&self) -> Option<&str> {
        match self {
            ReplicaError::CyclicStructure { path }
            | ReplicaError::DepthExceeded { path, .. } => Some(path.as_str()),
            ReplicaError::Config(_) => None,
        }
    }
}

pub type ReplicaResult<T> = Result<T, ReplicaError>;
