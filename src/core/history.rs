//! State transition history tracking.
//!
//! Provides immutable tracking of a node's provisioning transitions over
//! time. Recording returns a new history; existing values are never mutated.

use super::event::Event;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied transition.
///
/// `target` is the target provision state computed for the node when it
/// entered `to`, or `None` when the node came to rest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State, E: Event> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The event that triggered the transition
    pub event: E,
    /// Target provision state after the transition
    pub target: Option<S>,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl<S: State, E: Event> StateTransition<S, E> {
    /// Create a record stamped with the current time.
    pub fn now(from: S, to: S, event: E, target: Option<S>) -> Self {
        Self {
            from,
            to,
            event,
            target,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use provision_fsm::core::{StateHistory, StateTransition};
/// use provision_fsm::provisioning::{ProvisionEvent, ProvisionState};
///
/// let history = StateHistory::new()
///     .record(StateTransition::now(
///         ProvisionState::Available,
///         ProvisionState::Deploying,
///         ProvisionEvent::Deploy,
///         Some(ProvisionState::Active),
///     ))
///     .record(StateTransition::now(
///         ProvisionState::Deploying,
///         ProvisionState::Active,
///         ProvisionEvent::Done,
///         None,
///     ));
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // available -> deploying -> active
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State, E: Event> {
    transitions: Vec<StateTransition<S, E>>,
}

impl<S: State, E: Event> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateHistory<S, E> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left unchanged.
    pub fn record(&self, transition: StateTransition<S, E>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the first transition's `from` state followed by the `to`
    /// state of every transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S, E>> {
        self.transitions.last()
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[StateTransition<S, E>] {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "initial",
                Self::Processing => "processing",
                Self::Complete => "complete",
            }
        }
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Begin,
        Finish,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            match self {
                Self::Begin => "begin",
                Self::Finish => "finish",
            }
        }
    }

    fn begin() -> StateTransition<TestState, TestEvent> {
        StateTransition::now(
            TestState::Initial,
            TestState::Processing,
            TestEvent::Begin,
            Some(TestState::Complete),
        )
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState, TestEvent> = StateHistory::new();
        assert_eq!(history.transitions().len(), 0);
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();

        let new_history = history.record(begin());

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new().record(begin()).record(StateTransition::now(
            TestState::Processing,
            TestState::Complete,
            TestEvent::Finish,
            None,
        ));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &TestState::Initial);
        assert_eq!(path[1], &TestState::Processing);
        assert_eq!(path[2], &TestState::Complete);
        assert_eq!(history.last().map(|t| &t.event), Some(&TestEvent::Finish));
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let mut first = begin();
        first.timestamp = start;
        let mut second = StateTransition::now(
            TestState::Processing,
            TestState::Complete,
            TestEvent::Finish,
            None,
        );
        second.timestamp = start + chrono::Duration::milliseconds(250);

        let history = StateHistory::new().record(first).record(second);

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history = StateHistory::new().record(begin());

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(begin());

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestState, TestEvent> =
            serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
