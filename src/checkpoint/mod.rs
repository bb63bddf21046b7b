//! Checkpoint and resume functionality for state machines.
//!
//! Snapshots capture the whole machine — graph, initial/current pointers,
//! history, traversal mode — so a long-lived traversal can survive process
//! restarts. Snapshots serialize to JSON (diff-friendly) or bincode
//! (compact).

use crate::core::{StateMachine, StateValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a state machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<V: StateValue> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When the checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// The captured machine
    pub machine: StateMachine<V>,
}

impl<V: StateValue> Checkpoint<V> {
    /// Capture the current state of `machine`.
    pub fn capture(machine: &StateMachine<V>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            machine: machine.clone(),
        }
    }

    /// Recover the machine from this checkpoint.
    ///
    /// Rejects unsupported versions and snapshots whose graph fails
    /// validation (dangling transition targets survive serialization,
    /// so a snapshot from a mutated-then-captured machine is checked
    /// again here).
    pub fn restore(self) -> Result<StateMachine<V>, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        self.machine
            .validate()
            .map_err(|error| CheckpointError::ValidationFailed(error.to_string()))?;
        Ok(self.machine)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self)
            .map_err(|error| CheckpointError::SerializationFailed(error.to_string()))
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json)
            .map_err(|error| CheckpointError::DeserializationFailed(error.to_string()))
    }

    /// Serialize to compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self)
            .map_err(|error| CheckpointError::SerializationFailed(error.to_string()))
    }

    /// Deserialize from compact binary.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|error| CheckpointError::DeserializationFailed(error.to_string()))
    }
}
