//! Watcher hooks fired on state exit and entry.
//!
//! Watchers exist for observability. They receive the state being left or
//! entered and the event responsible, and can report a failure, but they have
//! no way to veto or redirect a transition: the engine has already decided
//! the destination before any watcher runs.
//!
//! - [`LoggingWatcher`] is the production adapter, emitting `tracing` events.
//! - [`RecordingWatcher`] records every call and can be told to fail, for
//!   tests of code that drives the machine.

mod logging;
mod recording;

pub use logging::LoggingWatcher;
pub use recording::{RecordingWatcher, WatchRecord};

use crate::core::{Event, State};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Which side of a transition a hook fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookPhase {
    /// Fired on the source state before the destination is computed
    Exit,
    /// Fired on the destination state
    Enter,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit => f.write_str("on_exit"),
            Self::Enter => f.write_str("on_enter"),
        }
    }
}

/// Failure reported by a watcher.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct WatcherError {
    message: String,
}

impl WatcherError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Observability hook attached to a state.
///
/// Both methods default to doing nothing, so an implementation only needs to
/// override the phases it cares about. Calls are synchronous on the thread
/// that processes the event.
pub trait Watcher<S: State, E: Event>: Send + Sync {
    /// Called after the engine accepted a transition out of `state`.
    fn on_exit(&self, _state: &S, _event: &E) -> Result<(), WatcherError> {
        Ok(())
    }

    /// Called once the engine has computed `state` as the destination.
    fn on_enter(&self, _state: &S, _event: &E) -> Result<(), WatcherError> {
        Ok(())
    }
}

/// Watcher handle shared between every state it is attached to.
pub type SharedWatcher<S, E> = Arc<dyn Watcher<S, E>>;

impl<S: State, E: Event, W: Watcher<S, E> + ?Sized> Watcher<S, E> for Arc<W> {
    fn on_exit(&self, state: &S, event: &E) -> Result<(), WatcherError> {
        (**self).on_exit(state, event)
    }

    fn on_enter(&self, state: &S, event: &E) -> Result<(), WatcherError> {
        (**self).on_enter(state, event)
    }
}
