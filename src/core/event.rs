//! Event trait for transition triggers.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// A named trigger that causes a transition attempt.
///
/// Events are not globally unique in effect: the same event may be legal from
/// several source states, each mapped to its own destination.
///
/// # Example
///
/// ```rust
/// use provision_fsm::core::Event;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum LampEvent {
///     Switch,
///     Ready,
/// }
///
/// impl Event for LampEvent {
///     fn name(&self) -> &str {
///         match self {
///             Self::Switch => "switch",
///             Self::Ready => "ready",
///         }
///     }
/// }
///
/// assert_eq!(LampEvent::Switch.name(), "switch");
/// ```
pub trait Event:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync
{
    /// The event's name for display and logging.
    fn name(&self) -> &str;
}
