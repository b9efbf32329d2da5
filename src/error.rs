//! Error taxonomy shared by every guarded object.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A bounded quantity tracked by one of the objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Funds,
    Fuel,
    Water,
    Beans,
    Battery,
    Copies,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Funds => "funds",
            Self::Fuel => "fuel",
            Self::Water => "water",
            Self::Beans => "coffee beans",
            Self::Battery => "battery",
            Self::Copies => "copies",
        };
        f.write_str(name)
    }
}

/// Errors returned by guarded operations.
///
/// A returned error always means the object was left exactly as it was
/// before the call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("insufficient {resource}: requested {requested}, available {available}")]
    InsufficientResource {
        resource: Resource,
        requested: f64,
        available: f64,
    },

    #[error("cannot {operation} while {state}")]
    IllegalState {
        operation: &'static str,
        state: String,
    },

    #[error("incorrect PIN")]
    Authentication,

    #[error("{} invalid parameter(s): {}", .0.len(), join_messages(.0))]
    InvalidParameters(Vec<Error>),

    #[error("configuration could not be parsed: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// How much more of the resource the rejected operation needed.
    ///
    /// Returns `None` for every variant other than `InsufficientResource`.
    pub fn shortfall(&self) -> Option<f64> {
        match self {
            Self::InsufficientResource {
                requested,
                available,
                ..
            } => Some((requested - available).max(0.0)),
            _ => None,
        }
    }
}

fn join_messages(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
