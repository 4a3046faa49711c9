//! Registry of valid states and their metadata.
//!
//! The registry is filled once during initialization and then frozen inside
//! a [`StateMachine`](crate::engine::StateMachine). Lookups are plain reads
//! and safe from any number of threads once the registry stops changing.

use super::event::Event;
use super::state::State;
use crate::watcher::{SharedWatcher, Watcher};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while registering or querying states.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("State '{state}' is already registered")]
    DuplicateState { state: String },

    #[error("State '{state}' is not registered")]
    UnknownState { state: String },
}

/// Definition of one state: stability, implicit target and watcher hooks.
///
/// # Example
///
/// ```rust
/// use provision_fsm::core::StateDef;
/// use provision_fsm::provisioning::{ProvisionEvent, ProvisionState};
/// use provision_fsm::watcher::LoggingWatcher;
///
/// let deploying: StateDef<ProvisionState, ProvisionEvent> =
///     StateDef::new(ProvisionState::Deploying)
///         .target(ProvisionState::Active)
///         .watched_by(LoggingWatcher::new());
///
/// assert!(!deploying.is_stable());
/// assert_eq!(deploying.target_state(), Some(&ProvisionState::Active));
/// ```
pub struct StateDef<S: State, E: Event> {
    state: S,
    stable: bool,
    target: Option<S>,
    on_enter: Option<SharedWatcher<S, E>>,
    on_exit: Option<SharedWatcher<S, E>>,
}

impl<S: State, E: Event> StateDef<S, E> {
    /// A transitional state with no target and no hooks.
    pub fn new(state: S) -> Self {
        Self {
            state,
            stable: false,
            target: None,
            on_enter: None,
            on_exit: None,
        }
    }

    /// Mark the state as stable: nothing happens here without new input.
    pub fn stable(mut self) -> Self {
        self.stable = true;
        self
    }

    /// The state this one is working toward.
    ///
    /// The target may be registered after this state; it is checked when
    /// the machine is built.
    pub fn target(mut self, target: S) -> Self {
        self.target = Some(target);
        self
    }

    pub fn on_enter<W>(mut self, watcher: W) -> Self
    where
        W: Watcher<S, E> + 'static,
    {
        self.on_enter = Some(Arc::new(watcher));
        self
    }

    pub fn on_exit<W>(mut self, watcher: W) -> Self
    where
        W: Watcher<S, E> + 'static,
    {
        self.on_exit = Some(Arc::new(watcher));
        self
    }

    /// Attach one watcher to both hooks.
    pub fn watched_by<W>(mut self, watcher: W) -> Self
    where
        W: Watcher<S, E> + 'static,
    {
        let shared: SharedWatcher<S, E> = Arc::new(watcher);
        self.on_enter = Some(Arc::clone(&shared));
        self.on_exit = Some(shared);
        self
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn is_stable(&self) -> bool {
        self.stable
    }

    pub fn target_state(&self) -> Option<&S> {
        self.target.as_ref()
    }

    pub(crate) fn enter_hook(&self) -> Option<&SharedWatcher<S, E>> {
        self.on_enter.as_ref()
    }

    pub(crate) fn exit_hook(&self) -> Option<&SharedWatcher<S, E>> {
        self.on_exit.as_ref()
    }
}

impl<S: State, E: Event> fmt::Debug for StateDef<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDef")
            .field("state", &self.state)
            .field("stable", &self.stable)
            .field("target", &self.target)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}

/// Authoritative set of valid states, in registration order.
pub struct StateRegistry<S: State, E: Event> {
    index: HashMap<S, usize>,
    defs: Vec<StateDef<S, E>>,
}

impl<S: State, E: Event> Default for StateRegistry<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateRegistry<S, E> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            defs: Vec::new(),
        }
    }

    /// Register a state.
    ///
    /// Fails with [`RegistryError::DuplicateState`] if the state is already
    /// present; the registry is left unchanged in that case.
    pub fn add_state(&mut self, def: StateDef<S, E>) -> Result<(), RegistryError> {
        if self.index.contains_key(&def.state) {
            return Err(RegistryError::DuplicateState {
                state: def.state.name().to_string(),
            });
        }
        self.index.insert(def.state.clone(), self.defs.len());
        self.defs.push(def);
        Ok(())
    }

    pub fn is_valid_state(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    /// Whether `state` is stable. Unregistered states are an error.
    pub fn is_stable(&self, state: &S) -> Result<bool, RegistryError> {
        self.get(state)
            .map(StateDef::is_stable)
            .ok_or_else(|| RegistryError::UnknownState {
                state: state.name().to_string(),
            })
    }

    /// Implicit target of `state`, or `None` if it has none or is unknown.
    pub fn target_for(&self, state: &S) -> Option<&S> {
        self.get(state).and_then(StateDef::target_state)
    }

    pub fn get(&self, state: &S) -> Option<&StateDef<S, E>> {
        self.index.get(state).map(|&i| &self.defs[i])
    }

    /// Resolve a persisted state name back to a registered state.
    pub fn lookup(&self, name: &str) -> Option<&S> {
        self.defs
            .iter()
            .map(StateDef::state)
            .find(|state| state.name() == name)
    }

    pub fn states(&self) -> impl Iterator<Item = &S> + '_ {
        self.defs.iter().map(StateDef::state)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &StateDef<S, E>> + '_ {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl<S: State, E: Event> fmt::Debug for StateRegistry<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.defs.iter()).finish()
    }
}
