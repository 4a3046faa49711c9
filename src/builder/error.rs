//! Build errors for the machine and transition builders.

use crate::core::RegistryError;
use std::fmt;
use thiserror::Error;

/// A state whose declared target was never registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedTarget {
    pub state: String,
    pub target: String,
}

impl fmt::Display for UnresolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' -> '{}'", self.state, self.target)
    }
}

fn join(targets: &[UnresolvedTarget]) -> String {
    targets
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur while building a state machine.
///
/// All of these are configuration bugs and are meant to stop the process at
/// startup; none can occur once a machine is built.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Transition from '{from}' on '{event}' already leads to '{existing}', not '{requested}'")]
    DuplicateTransition {
        from: String,
        event: String,
        existing: String,
        requested: String,
    },

    #[error("Unresolved target states: {}", join(.0))]
    UnresolvedTargets(Vec<UnresolvedTarget>),

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial state '{state}' is not stable")]
    UnstableInitialState { state: String },

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,
}

impl BuildError {
    pub(crate) fn unknown_state(state: &str) -> Self {
        BuildError::Registry(RegistryError::UnknownState {
            state: state.to_string(),
        })
    }
}
