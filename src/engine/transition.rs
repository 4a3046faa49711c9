//! Transition definitions and the errors raised while processing events.

use crate::core::{Event, Guard, State};
use crate::watcher::{HookPhase, WatcherError};

/// Errors that can occur while processing an event.
///
/// None of these leave anything changed: the engine holds no per-node state,
/// and the caller must not persist anything when `process_event` fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("State '{state}' is not a registered state")]
    InvalidState { state: String },

    #[error("Event '{event}' is not allowed in state '{state}'")]
    InvalidEvent { state: String, event: String },

    #[error("Guard rejected event '{event}' in state '{state}'")]
    GuardRejected { state: String, event: String },

    #[error("{phase} watcher of state '{state}' failed on event '{event}': {source}")]
    Watcher {
        state: String,
        event: String,
        phase: HookPhase,
        #[source]
        source: WatcherError,
    },
}

impl TransitionError {
    /// True for the expected "action not allowed in current state" case.
    pub fn is_not_allowed(&self) -> bool {
        matches!(self, Self::InvalidEvent { .. } | Self::GuardRejected { .. })
    }
}

/// A legal move from one state to another, triggered by an event.
///
/// `C` is the caller-supplied context type seen by the optional guard.
pub struct Transition<S: State, E: Event, C = ()> {
    pub from: S,
    pub to: S,
    pub event: E,
    pub guard: Option<Guard<S, E, C>>,
}

impl<S: State, E: Event, C> Transition<S, E, C> {
    /// An unguarded transition.
    pub fn new(from: S, to: S, event: E) -> Self {
        Self {
            from,
            to,
            event,
            guard: None,
        }
    }

    /// Check if this transition can execute for `event` from `current` (pure).
    pub fn can_execute(&self, current: &S, event: &E, context: &C) -> bool {
        if *current != self.from || *event != self.event {
            return false;
        }

        self.guard
            .as_ref()
            .map_or(true, |g| g.check(current, event, context))
    }
}

impl<S: State, E: Event, C> Clone for Transition<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            event: self.event.clone(),
            guard: self.guard.clone(),
        }
    }
}

impl<S: State, E: Event, C> std::fmt::Debug for Transition<S, E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("event", &self.event)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provisioning::{ProvisionEvent, ProvisionState};

    #[test]
    fn can_execute_matches_from_state_and_event() {
        let transition: Transition<ProvisionState, ProvisionEvent> = Transition::new(
            ProvisionState::Available,
            ProvisionState::Deploying,
            ProvisionEvent::Deploy,
        );

        assert!(transition.can_execute(&ProvisionState::Available, &ProvisionEvent::Deploy, &()));
        assert!(!transition.can_execute(&ProvisionState::Active, &ProvisionEvent::Deploy, &()));
        assert!(!transition.can_execute(&ProvisionState::Available, &ProvisionEvent::Manage, &()));
    }

    #[test]
    fn can_execute_respects_guard() {
        let mut transition: Transition<ProvisionState, ProvisionEvent, bool> = Transition::new(
            ProvisionState::Active,
            ProvisionState::Deleting,
            ProvisionEvent::Delete,
        );
        transition.guard = Some(Guard::new(|_, _, allowed: &bool| *allowed));

        assert!(transition.can_execute(&ProvisionState::Active, &ProvisionEvent::Delete, &true));
        assert!(!transition.can_execute(&ProvisionState::Active, &ProvisionEvent::Delete, &false));
    }

    #[test]
    fn not_allowed_covers_invalid_event_and_guard() {
        let invalid = TransitionError::InvalidEvent {
            state: "active".to_string(),
            event: "manage".to_string(),
        };
        let guarded = TransitionError::GuardRejected {
            state: "active".to_string(),
            event: "delete".to_string(),
        };
        let unknown = TransitionError::InvalidState {
            state: "deleted".to_string(),
        };

        assert!(invalid.is_not_allowed());
        assert!(guarded.is_not_allowed());
        assert!(!unknown.is_not_allowed());
        assert_eq!(
            invalid.to_string(),
            "Event 'manage' is not allowed in state 'active'"
        );
    }

    #[test]
    fn watcher_error_message_names_phase() {
        let error = TransitionError::Watcher {
            state: "deploying".to_string(),
            event: "deploy".to_string(),
            phase: HookPhase::Enter,
            source: WatcherError::new("sink closed"),
        };

        assert_eq!(
            error.to_string(),
            "on_enter watcher of state 'deploying' failed on event 'deploy': sink closed"
        );
    }
}
