//! `tracing`-backed watcher used in production.

use super::{Watcher, WatcherError};
use crate::core::{Event, State};
use tracing::Level;

/// Logs every state exit and entry as a structured `tracing` event.
///
/// Events carry `state` and `event` fields. Any span the caller entered
/// (for example one carrying the node UUID) is attached by the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingWatcher {
    level: Level,
}

impl Default for LoggingWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingWatcher {
    /// Log at `DEBUG`.
    pub fn new() -> Self {
        Self {
            level: Level::DEBUG,
        }
    }

    pub fn with_level(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    fn emit(&self, message: &str, state: &str, event: &str) {
        // tracing macros need the level at compile time
        if self.level == Level::ERROR {
            tracing::error!(state, event, "{message}");
        } else if self.level == Level::WARN {
            tracing::warn!(state, event, "{message}");
        } else if self.level == Level::INFO {
            tracing::info!(state, event, "{message}");
        } else if self.level == Level::DEBUG {
            tracing::debug!(state, event, "{message}");
        } else {
            tracing::trace!(state, event, "{message}");
        }
    }
}

impl<S: State, E: Event> Watcher<S, E> for LoggingWatcher {
    fn on_exit(&self, state: &S, event: &E) -> Result<(), WatcherError> {
        self.emit("exiting old state", state.name(), event.name());
        Ok(())
    }

    fn on_enter(&self, state: &S, event: &E) -> Result<(), WatcherError> {
        self.emit("entering new state", state.name(), event.name());
        Ok(())
    }
}
