//! Parameter validation.
//!
//! Two flavors:
//!
//! - Construction and configuration checks accumulate every violation with
//!   `stillwater`'s `Validation`, so a caller building an object sees all of
//!   its mistakes at once instead of one per attempt.
//! - Per-operation amount checks fail fast with a plain `Result`, since an
//!   operation only ever has one amount to get wrong.

use crate::error::{Error, Result};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single accumulating check.
pub type Check = Validation<(), NonEmptyVec<Error>>;

/// Passes when `condition` holds, otherwise records a violation on `field`.
pub fn ensure(condition: bool, field: &'static str, reason: &str) -> Check {
    if condition {
        Validation::success(())
    } else {
        Validation::fail(Error::validation(field, reason))
    }
}

/// Rejects empty or whitespace-only text.
pub fn not_blank(field: &'static str, value: &str) -> Check {
    ensure(!value.trim().is_empty(), field, "must not be blank")
}

/// Rejects values outside `[min, max]`, including NaN.
pub fn within(field: &'static str, value: f64, min: f64, max: f64) -> Check {
    ensure(
        value.is_finite() && (min..=max).contains(&value),
        field,
        &format!("must be between {min} and {max}, got {value}"),
    )
}

/// Rejects zero, negative and non-finite values.
pub fn positive(field: &'static str, value: f64) -> Check {
    ensure(
        value.is_finite() && value > 0.0,
        field,
        &format!("must be positive, got {value}"),
    )
}

/// Runs every check and folds the violations into a single error.
pub fn collect(checks: Vec<Check>) -> Result<()> {
    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => {
            let errors: Vec<Error> = errors.iter().cloned().collect();
            tracing::warn!(count = errors.len(), "parameter validation failed");
            Err(Error::InvalidParameters(errors))
        }
    }
}

/// Fail-fast check for an operation amount.
pub fn positive_amount(field: &'static str, amount: f64) -> Result<f64> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::validation(
            field,
            format!("must be a positive number, got {amount}"),
        ))
    }
}
