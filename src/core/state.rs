//! Core State trait for object status enums.
//!
//! Every guarded object carries exactly one status value implementing this
//! trait. The methods are pure, so statuses can be inspected freely without
//! touching the owning object.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for object status enums.
///
/// # Required Traits
///
/// - `Clone`: statuses are copied into transition history
/// - `PartialEq`: statuses are compared by guards and tests
/// - `Debug`: statuses show up in diagnostics
/// - `Serialize` + `Deserialize`: statuses appear in serializable snapshots
///
/// # Example
///
/// ```rust
/// use objectsim::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum DoorStatus {
///     Open,
///     Shut,
///     Welded,
/// }
///
/// impl State for DoorStatus {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Shut => "Shut",
///             Self::Welded => "Welded",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Welded)
///     }
/// }
///
/// assert!(DoorStatus::Welded.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the status name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a terminal status.
    ///
    /// Objects in a final status never leave it again.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
