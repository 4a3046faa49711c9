//! Builder API for constructing state machines at startup.
//!
//! This module provides the fluent builders and declaration macros used to
//! describe a machine once, validate it, and freeze it into a
//! [`StateMachine`](crate::engine::StateMachine).

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{BuildError, UnresolvedTarget};
pub use machine::MachineBuilder;
pub use transition::TransitionBuilder;
