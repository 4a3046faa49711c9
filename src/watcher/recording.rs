//! Recording watcher for tests.

use super::{HookPhase, Watcher, WatcherError};
use crate::core::{Event, State};
use std::sync::{Mutex, PoisonError};

/// One observed hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRecord<S, E> {
    pub phase: HookPhase,
    pub state: S,
    pub event: E,
}

/// Watcher that remembers every call in order.
///
/// Optionally fails when a given phase fires for a given state, which lets
/// tests check how watcher failures surface to callers.
///
/// # Example
///
/// ```rust
/// use provision_fsm::provisioning::{provision_machine_with, ProvisionEvent, ProvisionState};
/// use provision_fsm::watcher::{HookPhase, RecordingWatcher};
/// use std::sync::Arc;
///
/// let recorder: Arc<RecordingWatcher<ProvisionState, ProvisionEvent>> =
///     Arc::new(RecordingWatcher::new());
/// let machine = provision_machine_with(recorder.clone()).unwrap();
///
/// machine
///     .process_event(&ProvisionState::Available, &ProvisionEvent::Deploy)
///     .unwrap();
///
/// let phases: Vec<_> = recorder.records().iter().map(|r| r.phase).collect();
/// assert_eq!(phases, vec![HookPhase::Exit, HookPhase::Enter]);
/// ```
#[derive(Debug)]
pub struct RecordingWatcher<S, E> {
    records: Mutex<Vec<WatchRecord<S, E>>>,
    fail_on: Option<(HookPhase, S)>,
}

impl<S: State, E: Event> Default for RecordingWatcher<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> RecordingWatcher<S, E> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }

    /// A recorder that fails when `phase` fires for `state`.
    ///
    /// The failing call is still recorded.
    pub fn failing_on(phase: HookPhase, state: S) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_on: Some((phase, state)),
        }
    }

    /// Snapshot of every call seen so far.
    pub fn records(&self) -> Vec<WatchRecord<S, E>> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn observe(&self, phase: HookPhase, state: &S, event: &E) -> Result<(), WatcherError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(WatchRecord {
                phase,
                state: state.clone(),
                event: event.clone(),
            });

        match &self.fail_on {
            Some((fail_phase, fail_state)) if *fail_phase == phase && fail_state == state => Err(
                WatcherError::new(format!("{phase} failed for '{}'", state.name())),
            ),
            _ => Ok(()),
        }
    }
}

impl<S: State, E: Event> Watcher<S, E> for RecordingWatcher<S, E> {
    fn on_exit(&self, state: &S, event: &E) -> Result<(), WatcherError> {
        self.observe(HookPhase::Exit, state, event)
    }

    fn on_enter(&self, state: &S, event: &E) -> Result<(), WatcherError> {
        self.observe(HookPhase::Enter, state, event)
    }
}
