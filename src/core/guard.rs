//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions attached to a single transition. They
//! see the source state, the event and a caller-supplied context value, and
//! decide whether the transition may run. A guard never mutates anything.

use super::event::Event;
use super::state::State;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

type Predicate<S, E, C> = dyn Fn(&S, &E, &C) -> bool + Send + Sync;

/// Pure predicate that determines if a transition can execute.
///
/// Guards are evaluated after the engine has confirmed the transition is
/// registered and before any watcher runs.
///
/// # Example
///
/// ```rust
/// use provision_fsm::core::{Event, Guard, State};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door { Closed, Open }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "closed",
///             Self::Open => "open",
///         }
///     }
/// }
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Push { Open }
///
/// impl Event for Push {
///     fn name(&self) -> &str { "open" }
/// }
///
/// struct Badge { authorized: bool }
///
/// let only_authorized = Guard::new(|_: &Door, _: &Push, badge: &Badge| badge.authorized);
///
/// assert!(only_authorized.check(&Door::Closed, &Push::Open, &Badge { authorized: true }));
/// assert!(!only_authorized.check(&Door::Closed, &Push::Open, &Badge { authorized: false }));
/// ```
pub struct Guard<S: State, E: Event, C = ()> {
    predicate: Arc<Predicate<S, E, C>>,
    _phantom: PhantomData<(S, E)>,
}

impl<S: State, E: Event, C> Guard<S, E, C> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S, &E, &C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Check if the guard allows `event` from `source` under `context`.
    pub fn check(&self, source: &S, event: &E, context: &C) -> bool {
        (self.predicate)(source, event, context)
    }
}

impl<S: State, E: Event, C> Clone for Guard<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            _phantom: PhantomData,
        }
    }
}

impl<S: State, E: Event, C> fmt::Debug for Guard<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
