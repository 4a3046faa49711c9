//! Builder for constructing state transitions.

use crate::builder::error::BuildError;
use crate::core::{Event, Guard, State};
use crate::engine::Transition;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S: State, E: Event, C = ()> {
    from: Option<S>,
    to: Option<S>,
    event: Option<E>,
    guard: Option<Guard<S, E, C>>,
}

impl<S: State, E: Event, C> TransitionBuilder<S, E, C> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            event: None,
            guard: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the destination state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<S, E, C>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&S, &E, &C) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, E, C>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;

        Ok(Transition {
            from,
            to,
            event,
            guard: self.guard,
        })
    }
}

impl<S: State, E: Event, C> Default for TransitionBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}
