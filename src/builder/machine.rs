//! Builder for constructing state machines.

use crate::builder::error::{BuildError, UnresolvedTarget};
use crate::builder::transition::TransitionBuilder;
use crate::core::{Event, Guard, State, StateDef, StateRegistry};
use crate::engine::{StateMachine, Transition};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing state machines with a fluent API.
///
/// This is the only place states and transitions can be added. Once
/// [`build`](Self::build) succeeds the result is frozen.
///
/// # Example
///
/// ```rust
/// use provision_fsm::builder::MachineBuilder;
/// use provision_fsm::core::StateDef;
/// use provision_fsm::engine::StateMachine;
/// use provision_fsm::provisioning::{ProvisionEvent, ProvisionState};
///
/// let machine: StateMachine<ProvisionState, ProvisionEvent> = MachineBuilder::new()
///     .initial(ProvisionState::Manageable)
///     .add_state(StateDef::new(ProvisionState::Manageable).stable())?
///     .add_state(StateDef::new(ProvisionState::Available).stable())?
///     .add_transition(
///         ProvisionState::Manageable,
///         ProvisionState::Available,
///         ProvisionEvent::Provide,
///     )?
///     .build()?;
///
/// assert!(machine.is_valid_event(&ProvisionState::Manageable, &ProvisionEvent::Provide));
/// # Ok::<(), provision_fsm::builder::BuildError>(())
/// ```
pub struct MachineBuilder<S: State, E: Event, C = ()> {
    initial: Option<S>,
    registry: StateRegistry<S, E>,
    transitions: Vec<Transition<S, E, C>>,
}

impl<S: State, E: Event, C> MachineBuilder<S, E, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            registry: StateRegistry::new(),
            transitions: Vec::new(),
        }
    }

    /// Set the state newly enrolled nodes start in (required).
    ///
    /// It must be registered and stable by the time `build` runs.
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Register a state.
    pub fn add_state(mut self, def: StateDef<S, E>) -> Result<Self, BuildError> {
        self.registry.add_state(def)?;
        Ok(self)
    }

    /// Register an unguarded transition.
    pub fn add_transition(self, from: S, to: S, event: E) -> Result<Self, BuildError> {
        self.add(Transition::new(from, to, event))
    }

    /// Register a transition that only runs when `guard` allows it.
    pub fn add_guarded_transition(
        self,
        from: S,
        to: S,
        event: E,
        guard: Guard<S, E, C>,
    ) -> Result<Self, BuildError> {
        let mut transition = Transition::new(from, to, event);
        transition.guard = Some(guard);
        self.add(transition)
    }

    /// Add a transition using a builder.
    pub fn transition(self, builder: TransitionBuilder<S, E, C>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.add(transition)
    }

    /// Build the state machine.
    ///
    /// Every declared target is checked here, and all unresolved ones are
    /// reported together.
    pub fn build(self) -> Result<StateMachine<S, E, C>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if !self.registry.is_stable(&initial)? {
            return Err(BuildError::UnstableInitialState {
                state: initial.name().to_string(),
            });
        }

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        check_targets(&self.registry)?;

        tracing::debug!(
            initial = initial.name(),
            states = self.registry.len(),
            transitions = self.transitions.len(),
            "state machine built"
        );

        Ok(StateMachine::from_parts(
            self.registry,
            self.transitions,
            initial,
        ))
    }

    fn add(mut self, transition: Transition<S, E, C>) -> Result<Self, BuildError> {
        for state in [&transition.from, &transition.to] {
            if !self.registry.is_valid_state(state) {
                return Err(BuildError::unknown_state(state.name()));
            }
        }

        let existing = self
            .transitions
            .iter()
            .find(|t| t.from == transition.from && t.event == transition.event)
            .map(|t| t.to.clone());

        match existing {
            // same mapping registered twice: keep the first one
            Some(to) if to == transition.to => Ok(self),
            Some(to) => Err(BuildError::DuplicateTransition {
                from: transition.from.name().to_string(),
                event: transition.event.name().to_string(),
                existing: to.name().to_string(),
                requested: transition.to.name().to_string(),
            }),
            None => {
                self.transitions.push(transition);
                Ok(self)
            }
        }
    }
}

impl<S: State, E: Event, C> Default for MachineBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_targets<S: State, E: Event>(registry: &StateRegistry<S, E>) -> Result<(), BuildError> {
    let checks: Vec<Validation<(), NonEmptyVec<UnresolvedTarget>>> = registry
        .definitions()
        .filter_map(|def| def.target_state().map(|target| (def.state(), target)))
        .map(|(state, target)| {
            if registry.is_valid_state(target) {
                Validation::success(())
            } else {
                Validation::fail(UnresolvedTarget {
                    state: state.name().to_string(),
                    target: target.name().to_string(),
                })
            }
        })
        .collect();

    match Validation::all_vec(checks).map(|_| ()) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(unresolved) => Err(BuildError::UnresolvedTargets(
            unresolved.iter().cloned().collect(),
        )),
    }
}
