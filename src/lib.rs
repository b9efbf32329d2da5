//! Objectsim: everyday objects as guarded finite-state values.
//!
//! Every object pairs a status enum with a few bounded resources. Mutating
//! operations check a guard against the status and validate their input
//! before touching anything, so a failed call leaves the object exactly as
//! it was.
//!
//! # Core Concepts
//!
//! - **State**: status enums implement the `State` trait (usually through
//!   `state_enum!`)
//! - **Guards**: pure predicates that decide whether an operation may run in
//!   the current status
//! - **History**: every accepted status change is recorded with a timestamp
//!
//! # Example
//!
//! ```rust
//! use objectsim::money::Money;
//! use objectsim::objects::BankAccount;
//! use objectsim::{Error, GuardedObject};
//!
//! let mut account = BankAccount::new("ACC001", "John Doe", Money::from_major(1000), 0.02)?;
//! account.deposit(Money::from_major(500))?;
//! account.close_account()?;
//!
//! assert!(matches!(
//!     account.withdraw(Money::from_major(100)),
//!     Err(Error::IllegalState { .. })
//! ));
//! assert_eq!(account.history().len(), 1);
//! # Ok::<(), objectsim::Error>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
mod macros;
pub mod money;
pub mod objects;
pub mod validation;

// Re-export commonly used types
pub use self::core::{Guard, GuardedObject, State, StateHistory, StateTransition};
pub use error::{Error, Resource, Result};
