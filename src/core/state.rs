//! Core State trait for provisioning states.
//!
//! A state is a plain value identifying a condition a node can persist in.
//! Whether a state is stable, and which state it is working toward, is not a
//! property of the value itself: that metadata lives in the
//! [`StateRegistry`](super::StateRegistry) so the same type can back several
//! machines.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history records and node status values
/// - `Eq` + `Hash`: states key the registry and the transition table
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are persisted by callers
/// - `Send` + `Sync`: a built machine is shared across threads
///
/// # Example
///
/// ```rust
/// use provision_fsm::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum LampState {
///     Off,
///     WarmingUp,
///     On,
/// }
///
/// impl State for LampState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "off",
///             Self::WarmingUp => "warming up",
///             Self::On => "on",
///         }
///     }
/// }
///
/// assert_eq!(LampState::WarmingUp.name(), "warming up");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync
{
    /// The state's persisted name, used for display and logging.
    fn name(&self) -> &str;
}
