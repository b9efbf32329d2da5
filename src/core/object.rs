//! The read-only surface every guarded object exposes.

use super::history::StateHistory;
use super::state::State;
use std::fmt::Display;

/// Common view over a guarded object.
///
/// This is a convenience for generic inspection (tests, demos); the objects
/// share no behavior beyond it.
pub trait GuardedObject: Display {
    /// Status enum gating the object's operations.
    type Status: State;

    /// Current status.
    fn status(&self) -> &Self::Status;

    /// Accepted status changes since construction.
    fn history(&self) -> &StateHistory<Self::Status>;

    /// Human-readable summary of every field. Never fails.
    fn describe(&self) -> String {
        self.to_string()
    }
}
