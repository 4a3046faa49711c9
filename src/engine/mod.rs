//! The transition engine.
//!
//! A built [`StateMachine`] validates `(state, event)` pairs against its
//! transition table, evaluates guards, runs watcher hooks and returns the
//! destination. It never stores node data, so one instance is shared by every
//! caller for the life of the process.
//!
//! # Ordering
//!
//! For an accepted event the engine:
//! 1. rejects unregistered states (`InvalidState`)
//! 2. rejects events with no transition (`InvalidEvent`)
//! 3. rejects events the guard refuses (`GuardRejected`)
//! 4. runs the source state's exit hook
//! 5. runs the destination's enter hook
//! 6. returns the destination
//!
//! Steps 1 to 3 run no hook.

mod machine;
mod transition;

pub use machine::StateMachine;
pub use transition::{Transition, TransitionError};
