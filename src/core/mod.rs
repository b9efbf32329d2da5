//! Building blocks shared by the guarded objects.
//!
//! - Status enums via the `State` trait
//! - Guard predicates that gate operations on a status
//! - History of accepted status changes
//! - The `GuardedObject` read-only view
//!
//! Nothing here mutates an object; the objects own their fields and call
//! into these types before changing them.

mod guard;
mod history;
mod object;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use object::GuardedObject;
pub use state::State;
