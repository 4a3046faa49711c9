//! Core state machine types.
//!
//! This module contains the building blocks shared by the engine and its
//! callers:
//! - State and event identities via the `State` and `Event` traits
//! - The state registry with stability and target metadata
//! - Guard predicates for transition control
//! - Node status values and immutable history tracking

mod event;
mod guard;
mod history;
mod node;
mod registry;
mod state;

pub use event::Event;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use node::NodeState;
pub use registry::{RegistryError, StateDef, StateRegistry};
pub use state::State;
