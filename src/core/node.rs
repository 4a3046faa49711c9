//! Provisioning status of a single node.

use super::state::State;
use serde::{Deserialize, Serialize};

/// The pair of fields a node carries about its provisioning lifecycle.
///
/// The engine never stores these; it computes new values that the caller
/// persists while it still holds the node's exclusive lock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct NodeState<S: State> {
    /// Current lifecycle stage
    pub provision_state: S,
    /// Stage the node is working toward, `None` when at rest
    pub target_provision_state: Option<S>,
}

impl<S: State> NodeState<S> {
    /// A node resting in `state` with no target.
    pub fn at_rest(state: S) -> Self {
        Self {
            provision_state: state,
            target_provision_state: None,
        }
    }

    /// A node in `state` working toward `target`.
    pub fn in_flight(state: S, target: S) -> Self {
        Self {
            provision_state: state,
            target_provision_state: Some(target),
        }
    }

    /// True while a target is recorded.
    pub fn has_target(&self) -> bool {
        self.target_provision_state.is_some()
    }
}
