//! The frozen transition engine.

use crate::core::{Event, NodeState, RegistryError, State, StateDef, StateRegistry};
use crate::engine::transition::{Transition, TransitionError};
use crate::watcher::HookPhase;
use std::collections::HashMap;
use std::fmt;

/// Event-driven state machine shared by every caller.
///
/// A `StateMachine` is produced by
/// [`MachineBuilder::build`](crate::builder::MachineBuilder::build) and never
/// changes afterwards. It holds no per-node data: processing an event reads
/// the tables, runs the watcher hooks and returns the destination. The caller
/// must hold the node's exclusive lock for the duration and persists the
/// result itself.
///
/// # Example
///
/// ```rust
/// use provision_fsm::provisioning::{provision_machine, ProvisionEvent, ProvisionState};
///
/// let machine = provision_machine().unwrap();
///
/// let next = machine
///     .process_event(&ProvisionState::Available, &ProvisionEvent::Deploy)
///     .unwrap();
///
/// assert_eq!(next, ProvisionState::Deploying);
/// assert_eq!(machine.target_state_for(&next, None), Some(ProvisionState::Active));
/// ```
pub struct StateMachine<S: State, E: Event, C = ()> {
    registry: StateRegistry<S, E>,
    table: Vec<Transition<S, E, C>>,
    index: HashMap<S, HashMap<E, usize>>,
    initial: S,
}

impl<S: State, E: Event, C> StateMachine<S, E, C> {
    pub(crate) fn from_parts(
        registry: StateRegistry<S, E>,
        table: Vec<Transition<S, E, C>>,
        initial: S,
    ) -> Self {
        let mut index: HashMap<S, HashMap<E, usize>> = HashMap::new();
        for (position, transition) in table.iter().enumerate() {
            index
                .entry(transition.from.clone())
                .or_default()
                .insert(transition.event.clone(), position);
        }

        Self {
            registry,
            table,
            index,
            initial,
        }
    }

    pub fn registry(&self) -> &StateRegistry<S, E> {
        &self.registry
    }

    /// State a newly enrolled node starts in.
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    pub fn is_valid_state(&self, state: &S) -> bool {
        self.registry.is_valid_state(state)
    }

    pub fn is_stable(&self, state: &S) -> Result<bool, RegistryError> {
        self.registry.is_stable(state)
    }

    pub fn target_for(&self, state: &S) -> Option<&S> {
        self.registry.target_for(state)
    }

    /// True iff a transition is registered for `event` from `source`.
    ///
    /// Guards are not consulted.
    pub fn is_valid_event(&self, source: &S, event: &E) -> bool {
        self.lookup(source, event).is_some()
    }

    /// Events registered from `source`, in registration order.
    pub fn events_from(&self, source: &S) -> Vec<&E> {
        self.table
            .iter()
            .filter(|t| t.from == *source)
            .map(|t| &t.event)
            .collect()
    }

    /// Every registered transition, in registration order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition<S, E, C>> + '_ {
        self.table.iter()
    }

    /// Target state to record after entering `destination`.
    ///
    /// An explicit target from the caller wins; otherwise the destination's
    /// registered target is used, which is `None` for states at rest.
    pub fn target_state_for(&self, destination: &S, explicit_target: Option<&S>) -> Option<S> {
        explicit_target
            .or_else(|| self.registry.target_for(destination))
            .cloned()
    }

    /// Process `event` from `current`, passing `context` to the guard.
    ///
    /// Runs the exit hook of `current`, then the enter hook of the
    /// destination, and returns the destination. A watcher failure is
    /// returned as [`TransitionError::Watcher`]; when the enter hook fails the
    /// destination was computed but is not returned, so the caller has
    /// nothing to persist.
    pub fn process_event_with(
        &self,
        current: &S,
        event: &E,
        context: &C,
    ) -> Result<S, TransitionError> {
        let Some(source_def) = self.registry.get(current) else {
            tracing::debug!(
                state = current.name(),
                event = event.name(),
                "rejected event for unregistered state"
            );
            return Err(TransitionError::InvalidState {
                state: current.name().to_string(),
            });
        };

        let Some(transition) = self.lookup(current, event) else {
            tracing::debug!(
                state = current.name(),
                event = event.name(),
                "rejected event with no transition"
            );
            return Err(TransitionError::InvalidEvent {
                state: current.name().to_string(),
                event: event.name().to_string(),
            });
        };

        if !transition.can_execute(current, event, context) {
            tracing::debug!(
                state = current.name(),
                event = event.name(),
                "guard rejected event"
            );
            return Err(TransitionError::GuardRejected {
                state: current.name().to_string(),
                event: event.name().to_string(),
            });
        }

        if let Some(hook) = source_def.exit_hook() {
            hook.on_exit(current, event)
                .map_err(|source| watcher_failed(HookPhase::Exit, current, event, source))?;
        }

        let destination = transition.to.clone();

        if let Some(hook) = self.registry.get(&destination).and_then(StateDef::enter_hook) {
            hook.on_enter(&destination, event)
                .map_err(|source| watcher_failed(HookPhase::Enter, &destination, event, source))?;
        }

        Ok(destination)
    }

    /// Apply `event` to a node's status.
    ///
    /// Returns the new status with its target computed by
    /// [`target_state_for`](Self::target_state_for). `node` is not modified.
    pub fn advance_with(
        &self,
        node: &NodeState<S>,
        event: &E,
        explicit_target: Option<&S>,
        context: &C,
    ) -> Result<NodeState<S>, TransitionError> {
        let destination = self.process_event_with(&node.provision_state, event, context)?;
        let target = self.target_state_for(&destination, explicit_target);

        Ok(NodeState {
            provision_state: destination,
            target_provision_state: target,
        })
    }

    fn lookup(&self, source: &S, event: &E) -> Option<&Transition<S, E, C>> {
        self.index
            .get(source)
            .and_then(|events| events.get(event))
            .map(|&position| &self.table[position])
    }
}

impl<S: State, E: Event, C: Default> StateMachine<S, E, C> {
    /// Process `event` from `current` with a default context.
    pub fn process_event(&self, current: &S, event: &E) -> Result<S, TransitionError> {
        self.process_event_with(current, event, &C::default())
    }

    /// [`advance_with`](Self::advance_with) using a default context.
    pub fn advance(
        &self,
        node: &NodeState<S>,
        event: &E,
        explicit_target: Option<&S>,
    ) -> Result<NodeState<S>, TransitionError> {
        self.advance_with(node, event, explicit_target, &C::default())
    }
}

impl<S: State, E: Event, C> fmt::Debug for StateMachine<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("initial", &self.initial)
            .field("states", &self.registry.len())
            .field("transitions", &self.table.len())
            .finish()
    }
}

fn watcher_failed<S: State, E: Event>(
    phase: HookPhase,
    state: &S,
    event: &E,
    source: crate::watcher::WatcherError,
) -> TransitionError {
    tracing::warn!(
        state = state.name(),
        event = event.name(),
        %phase,
        error = %source,
        "watcher failed"
    );
    TransitionError::Watcher {
        state: state.name().to_string(),
        event: event.name().to_string(),
        phase,
        source,
    }
}
