//! Versioned node records.
//!
//! A [`NodeRecord`] is the shape a caller stores for one node: its current
//! provisioning status and the history that led there. Records are values:
//! firing an event returns a new record and leaves the old one intact, so a
//! caller that fails to persist simply drops the new value.
//!
//! Records encode to JSON for readability and to bincode for compactness.
//! Both encodings lead with the format version so loaders can refuse data
//! they do not understand before decoding the rest.

use crate::core::{Event, NodeState, State, StateHistory, StateTransition};
use crate::engine::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::RecordError;

/// Version identifier for the record format
pub const RECORD_VERSION: u32 = 1;

/// Provisioning record of a single node.
///
/// # Example
///
/// ```rust
/// use provision_fsm::provisioning::{provision_machine, ProvisionEvent, ProvisionState};
/// use provision_fsm::record::NodeRecord;
/// use uuid::Uuid;
///
/// let machine = provision_machine().unwrap();
/// let record = NodeRecord::enroll(Uuid::new_v4(), &machine);
///
/// let record = record.fire(&machine, &ProvisionEvent::Provide, None).unwrap();
/// let record = record.fire(&machine, &ProvisionEvent::Deploy, None).unwrap();
///
/// assert_eq!(record.status.provision_state, ProvisionState::Deploying);
/// assert_eq!(record.status.target_provision_state, Some(ProvisionState::Active));
/// assert_eq!(record.history.transitions().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct NodeRecord<S: State, E: Event> {
    /// Record format version
    pub version: u32,

    /// Node identifier
    pub node: Uuid,

    /// Current provisioning status
    pub status: NodeState<S>,

    /// Every transition applied since enrollment
    pub history: StateHistory<S, E>,

    /// When the node was enrolled
    pub created_at: DateTime<Utc>,

    /// Last applied transition, or enrollment time
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

impl<S: State, E: Event> NodeRecord<S, E> {
    /// A freshly enrolled node resting in the machine's initial state.
    pub fn enroll<C>(node: Uuid, machine: &StateMachine<S, E, C>) -> Self {
        let now = Utc::now();
        Self {
            version: RECORD_VERSION,
            node,
            status: NodeState::at_rest(machine.initial_state().clone()),
            history: StateHistory::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Fire `event` with a default guard context.
    pub fn fire<C: Default>(
        &self,
        machine: &StateMachine<S, E, C>,
        event: &E,
        explicit_target: Option<&S>,
    ) -> Result<Self, RecordError> {
        self.fire_with(machine, event, explicit_target, &C::default())
    }

    /// Fire `event` and return the updated record.
    ///
    /// Watchers run inside a span carrying the node id.
    pub fn fire_with<C>(
        &self,
        machine: &StateMachine<S, E, C>,
        event: &E,
        explicit_target: Option<&S>,
        context: &C,
    ) -> Result<Self, RecordError> {
        let span = tracing::debug_span!("node", node = %self.node);
        let _entered = span.enter();

        let status = machine.advance_with(&self.status, event, explicit_target, context)?;
        let transition = StateTransition::now(
            self.status.provision_state.clone(),
            status.provision_state.clone(),
            event.clone(),
            status.target_provision_state.clone(),
        );
        let updated_at = transition.timestamp;

        Ok(Self {
            version: self.version,
            node: self.node,
            status,
            history: self.history.record(transition),
            created_at: self.created_at,
            updated_at,
        })
    }

    /// True when the node sits in a stable state of `machine`.
    pub fn is_at_rest<C>(&self, machine: &StateMachine<S, E, C>) -> bool {
        machine
            .is_stable(&self.status.provision_state)
            .unwrap_or(false)
    }

    /// Check that the record can be driven by `machine`.
    pub fn validate<C>(&self, machine: &StateMachine<S, E, C>) -> Result<(), RecordError> {
        check_version(self.version)?;

        let state = &self.status.provision_state;
        if !machine.is_valid_state(state) {
            return Err(RecordError::ValidationFailed(format!(
                "provision state '{}' is not registered",
                state.name()
            )));
        }

        if let Some(target) = &self.status.target_provision_state {
            if !machine.is_valid_state(target) {
                return Err(RecordError::ValidationFailed(format!(
                    "target provision state '{}' is not registered",
                    target.name()
                )));
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RecordError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let probe: VersionProbe = serde_json::from_str(json)
            .map_err(|e| RecordError::DeserializationFailed(e.to_string()))?;
        check_version(probe.version)?;

        serde_json::from_str(json).map_err(|e| RecordError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, RecordError> {
        bincode::serialize(self).map_err(|e| RecordError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, RecordError> {
        // version is the leading field
        let version: u32 = bincode::deserialize(bytes)
            .map_err(|e| RecordError::DeserializationFailed(e.to_string()))?;
        check_version(version)?;

        bincode::deserialize(bytes).map_err(|e| RecordError::DeserializationFailed(e.to_string()))
    }
}

fn check_version(found: u32) -> Result<(), RecordError> {
    if found == RECORD_VERSION {
        Ok(())
    } else {
        Err(RecordError::UnsupportedVersion {
            found,
            supported: RECORD_VERSION,
        })
    }
}
