//! Guard predicates for status-gated operations.
//!
//! A guard pairs an operation name with a pure predicate over the owning
//! object's status. Objects evaluate the guard before touching any field, so
//! a rejected call never leaves partial changes behind.

use super::state::State;
use crate::error::{Error, Result};
use std::marker::PhantomData;

/// Pure predicate deciding whether an operation may run in a given status.
///
/// # Example
///
/// ```rust
/// use objectsim::core::{Guard, State};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Power {
///     On,
///     Off,
/// }
///
/// impl State for Power {
///     fn name(&self) -> &str {
///         match self {
///             Self::On => "On",
///             Self::Off => "Off",
///         }
///     }
/// }
///
/// let while_on = Guard::new("blend", |p: &Power| matches!(p, Power::On));
///
/// assert!(while_on.check(&Power::On));
/// assert!(while_on.require(&Power::Off).is_err());
/// ```
pub struct Guard<S: State> {
    operation: &'static str,
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
    _phantom: PhantomData<S>,
}

impl<S: State> Guard<S> {
    /// Create a guard for `operation` from a pure predicate function.
    pub fn new<F>(operation: &'static str, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            operation,
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Guard that only admits one exact status.
    pub fn only(operation: &'static str, allowed: S) -> Self
    where
        S: 'static,
    {
        Self::new(operation, move |s: &S| *s == allowed)
    }

    /// Name of the operation this guard protects.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Check if the guard admits this status.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }

    /// Like [`check`](Self::check), but turns a refusal into
    /// [`Error::IllegalState`].
    pub fn require(&self, state: &S) -> Result<()> {
        if self.check(state) {
            Ok(())
        } else {
            tracing::warn!(
                operation = self.operation,
                state = state.name(),
                "guard rejected operation"
            );
            Err(Error::IllegalState {
                operation: self.operation,
                state: state.name().to_string(),
            })
        }
    }
}
