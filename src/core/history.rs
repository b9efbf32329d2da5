//! Status transition history.
//!
//! Each object keeps an ordered log of the status changes it accepted.
//! Rejected operations never reach the log.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single accepted status change.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The status being left
    pub from: S,
    /// The status being entered
    pub to: S,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
    /// Operation that caused the change (e.g. "close account")
    pub operation: String,
}

impl<S: State> StateTransition<S> {
    /// Transition stamped with the current time.
    pub fn now(from: S, to: S, operation: impl Into<String>) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
            operation: operation.into(),
        }
    }
}

/// Ordered history of status transitions.
///
/// `record` returns a new history with the transition appended and leaves
/// the receiver untouched.
///
/// # Example
///
/// ```rust
/// use objectsim::core::{State, StateHistory, StateTransition};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Lamp {
///     Dark,
///     Lit,
/// }
///
/// impl State for Lamp {
///     fn name(&self) -> &str {
///         match self {
///             Self::Dark => "Dark",
///             Self::Lit => "Lit",
///         }
///     }
/// }
///
/// let history = StateHistory::new()
///     .record(StateTransition::now(Lamp::Dark, Lamp::Lit, "switch on"))
///     .record(StateTransition::now(Lamp::Lit, Lamp::Dark, "switch off"));
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Lamp::Dark, &Lamp::Lit, &Lamp::Dark]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Statuses traversed: the first `from`, then every `to` in order.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// Get all transitions in recording order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
