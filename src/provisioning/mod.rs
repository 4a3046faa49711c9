//! Bare-metal node provisioning.
//!
//! The concrete machine: provision states and events, the transition table
//! that connects them, and the mapping from public API verbs to events.

mod machine;
mod states;
mod verbs;

pub use machine::{provision_machine, provision_machine_with, ProvisionMachine};
pub use states::{ProvisionEvent, ProvisionState};
pub use verbs::{event_for_verb, Verb, VerbError};
