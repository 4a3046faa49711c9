//! Provision FSM: the provisioning state machine of bare-metal nodes
//!
//! A node moves through a small set of provision states (`manageable`,
//! `available`, `deploying`, `active`, ...) in response to events. The
//! machine is described once at startup with a [`MachineBuilder`], validated,
//! and frozen into a [`StateMachine`] that every worker shares. Processing an
//! event reads the frozen tables, fires watcher hooks and hands back the new
//! status; persisting it is the caller's job.
//!
//! # Core Concepts
//!
//! - **States and events**: identities via the `State` and `Event` traits
//! - **Stable states**: resting points with nothing pending; every other state
//!   names the stable target it works toward
//! - **Watchers**: observability hooks fired on exit and entry
//! - **Records**: versioned snapshots of a node's status and history
//!
//! # Example
//!
//! ```rust
//! use provision_fsm::provisioning::{event_for_verb, provision_machine, ProvisionState};
//! use provision_fsm::NodeState;
//!
//! let machine = provision_machine().unwrap();
//! let node = NodeState::at_rest(ProvisionState::Available);
//!
//! let event = event_for_verb("active", node.provision_state).unwrap();
//! let node = machine.advance(&node, &event, None).unwrap();
//!
//! assert_eq!(node.provision_state, ProvisionState::Deploying);
//! assert_eq!(node.target_provision_state, Some(ProvisionState::Active));
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod provisioning;
pub mod record;
pub mod watcher;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, TransitionBuilder};
pub use self::core::{Event, Guard, NodeState, State, StateDef, StateHistory, StateTransition};
pub use engine::{StateMachine, TransitionError};
pub use record::{NodeRecord, RecordError};
pub use watcher::{HookPhase, LoggingWatcher, RecordingWatcher, Watcher, WatcherError};
