//! Public API verbs and the events they fire.
//!
//! Clients ask for a node to reach a goal ("active", "deleted", ...). The
//! event that expresses that goal can depend on where the node is now, so
//! the mapping is an explicit `(verb, current state)` table rather than a
//! plain rename. The table only picks the event; whether the event is legal
//! is still decided by the state machine.

use super::states::{ProvisionEvent, ProvisionState};
use std::str::FromStr;
use thiserror::Error;

crate::__named_enum! {
    /// Target verbs accepted by the provisioning API.
    pub enum Verb {
        Active => "active",
        Rebuild => "rebuild",
        Deleted => "deleted",
        Manage => "manage",
        Provide => "provide",
        Inspect => "inspect",
    }
}

/// Errors raised while mapping a verb to an event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerbError {
    #[error("Unknown provision verb '{verb}'")]
    UnknownVerb { verb: String },

    #[error("Verb '{verb}' is not allowed in state '{state}'")]
    VerbNotAllowed { verb: Verb, state: ProvisionState },
}

impl FromStr for Verb {
    type Err = VerbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::from_name(s).ok_or_else(|| VerbError::UnknownVerb {
            verb: s.to_string(),
        })
    }
}

/// Which states a verb row applies to.
#[derive(Debug, Clone, Copy)]
enum Sources {
    Any,
    OneOf(&'static [ProvisionState]),
}

impl Sources {
    fn contains(&self, state: ProvisionState) -> bool {
        match self {
            Sources::Any => true,
            Sources::OneOf(states) => states.contains(&state),
        }
    }
}

/// `(verb, current states, event)`; the first matching row wins.
const VERB_TABLE: &[(Verb, Sources, ProvisionEvent)] = &[
    (
        Verb::Active,
        Sources::OneOf(&[ProvisionState::Available, ProvisionState::DeployFail]),
        ProvisionEvent::Deploy,
    ),
    (
        Verb::Active,
        Sources::OneOf(&[ProvisionState::Active, ProvisionState::Error]),
        ProvisionEvent::Rebuild,
    ),
    (
        Verb::Rebuild,
        Sources::OneOf(&[
            ProvisionState::Active,
            ProvisionState::DeployFail,
            ProvisionState::Error,
        ]),
        ProvisionEvent::Rebuild,
    ),
    (Verb::Deleted, Sources::Any, ProvisionEvent::Delete),
    (Verb::Manage, Sources::Any, ProvisionEvent::Manage),
    (Verb::Provide, Sources::Any, ProvisionEvent::Provide),
    (Verb::Inspect, Sources::Any, ProvisionEvent::Inspect),
];

impl Verb {
    /// Event to fire for this verb on a node currently in `current`.
    pub fn event_for(self, current: ProvisionState) -> Result<ProvisionEvent, VerbError> {
        VERB_TABLE
            .iter()
            .find(|(verb, from, _)| *verb == self && from.contains(current))
            .map(|&(_, _, event)| event)
            .ok_or(VerbError::VerbNotAllowed {
                verb: self,
                state: current,
            })
    }
}

/// Parse `verb` and map it for a node in `current`.
pub fn event_for_verb(verb: &str, current: ProvisionState) -> Result<ProvisionEvent, VerbError> {
    verb.parse::<Verb>()?.event_for(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provisioning::provision_machine;

    #[test]
    fn active_deploys_from_available_and_deploy_failed() {
        assert_eq!(
            event_for_verb("active", ProvisionState::Available),
            Ok(ProvisionEvent::Deploy)
        );
        assert_eq!(
            event_for_verb("active", ProvisionState::DeployFail),
            Ok(ProvisionEvent::Deploy)
        );
    }

    #[test]
    fn active_rebuilds_deployed_and_errored_nodes() {
        for state in [ProvisionState::Active, ProvisionState::Error] {
            assert_eq!(
                event_for_verb("active", state),
                Ok(ProvisionEvent::Rebuild),
                "{state}"
            );
        }
    }

    #[test]
    fn active_is_not_allowed_mid_deploy() {
        assert_eq!(
            event_for_verb("active", ProvisionState::Deploying),
            Err(VerbError::VerbNotAllowed {
                verb: Verb::Active,
                state: ProvisionState::Deploying,
            })
        );
    }

    #[test]
    fn rebuild_maps_from_deployed_failed_and_error() {
        for state in [
            ProvisionState::Active,
            ProvisionState::DeployFail,
            ProvisionState::Error,
        ] {
            assert_eq!(
                Verb::Rebuild.event_for(state),
                Ok(ProvisionEvent::Rebuild),
                "{state}"
            );
        }
        assert!(Verb::Rebuild.event_for(ProvisionState::Available).is_err());
    }

    #[test]
    fn deleted_maps_to_delete_everywhere() {
        for &state in ProvisionState::ALL {
            assert_eq!(Verb::Deleted.event_for(state), Ok(ProvisionEvent::Delete));
        }
    }

    #[test]
    fn unknown_verb_is_rejected() {
        assert_eq!(
            event_for_verb("explode", ProvisionState::Active),
            Err(VerbError::UnknownVerb {
                verb: "explode".to_string()
            })
        );
    }

    #[test]
    fn machine_still_decides_legality() {
        let machine = provision_machine().unwrap();

        let event = event_for_verb("deleted", ProvisionState::Available).unwrap();

        assert!(!machine.is_valid_event(&ProvisionState::Available, &event));
    }

    #[test]
    fn every_conditional_row_maps_to_a_legal_event() {
        let machine = provision_machine().unwrap();

        for &(verb, from, event) in VERB_TABLE {
            if let Sources::OneOf(states) = from {
                for state in states {
                    assert!(
                        machine.is_valid_event(state, &event),
                        "{verb} from {state}"
                    );
                }
            }
        }
    }
}
