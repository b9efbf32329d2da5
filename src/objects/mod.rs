//! The five guarded objects.
//!
//! Each module is self-contained: an object never calls into another one.

pub mod bank_account;
pub mod book;
pub mod car;
pub mod coffee_maker;
pub mod smartphone;

pub use bank_account::{AccountStatus, BankAccount};
pub use book::{Book, BookStatus};
pub use car::{Car, DriveOutcome, EngineStatus};
pub use coffee_maker::{BrewReceipt, CoffeeMaker, CoffeeMakerStatus, CupSize, PowerStatus, Refill};
pub use smartphone::{BatteryStatus, LockStatus, Smartphone};
