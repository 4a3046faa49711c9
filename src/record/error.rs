//! Node record error types.

use crate::engine::TransitionError;
use thiserror::Error;

/// Errors that can occur while updating, encoding or loading a node record
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordError {
    /// The event was rejected by the state machine
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Record version is not supported by this version
    #[error("Unsupported record version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Record data does not fit the machine it is checked against
    #[error("Record validation failed: {0}")]
    ValidationFailed(String),
}
