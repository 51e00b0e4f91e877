//! Candidate-value validation for preference edits.
//!
//! A validator inspects a candidate [`PrefValue`] before it is committed.
//! Rejection is an ordinary, fully-recoverable outcome: the control reverts
//! to the last committed value and the message is surfaced through the
//! delegate's error channel. Nothing here panics on user input.
//!
//! # Example
//!
//! ```
//! use ridgeline_prefs::{FnValidator, PrefValidator, PrefValue, ValidationOutcome};
//!
//! let even_only = FnValidator::new(|v: &PrefValue| {
//!     match v.try_as_int() {
//!         Some(n) if n % 2 == 0 => ValidationOutcome::Passed,
//!         _ => ValidationOutcome::failed("value must be even"),
//!     }
//! });
//!
//! assert!(even_only.validate(&PrefValue::Int(4)).is_passed());
//! assert!(!even_only.validate(&PrefValue::Int(3)).is_passed());
//! ```

use std::sync::Arc;

use crate::value::PrefValue;

/// The result of validating a candidate value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The candidate is acceptable and may be committed.
    Passed,
    /// The candidate is rejected with a host-displayable message.
    Failed(String),
}

impl ValidationOutcome {
    /// Shorthand for `Failed` with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        ValidationOutcome::Failed(message.into())
    }

    /// Returns `true` if the outcome is `Passed`.
    pub fn is_passed(&self) -> bool {
        matches!(self, ValidationOutcome::Passed)
    }
}

/// Trait for preference validators.
///
/// Validators must be `Send + Sync` so items can be shared with the signal
/// system and test harnesses.
pub trait PrefValidator: Send + Sync {
    /// Validate the candidate value.
    fn validate(&self, candidate: &PrefValue) -> ValidationOutcome;
}

// Allow using Arc<dyn PrefValidator> as a PrefValidator
impl<V: PrefValidator + ?Sized> PrefValidator for Arc<V> {
    fn validate(&self, candidate: &PrefValue) -> ValidationOutcome {
        (**self).validate(candidate)
    }
}

// Allow using Box<dyn PrefValidator> as a PrefValidator
impl<V: PrefValidator + ?Sized> PrefValidator for Box<V> {
    fn validate(&self, candidate: &PrefValue) -> ValidationOutcome {
        (**self).validate(candidate)
    }
}

/// A validator built from a closure.
///
/// This allows creating validators without implementing the trait manually.
pub struct FnValidator<F>
where
    F: Fn(&PrefValue) -> ValidationOutcome + Send + Sync,
{
    validate_fn: F,
}

impl<F> FnValidator<F>
where
    F: Fn(&PrefValue) -> ValidationOutcome + Send + Sync,
{
    /// Create a new validator from the given function.
    pub fn new(validate_fn: F) -> Self {
        Self { validate_fn }
    }
}

impl<F> PrefValidator for FnValidator<F>
where
    F: Fn(&PrefValue) -> ValidationOutcome + Send + Sync,
{
    fn validate(&self, candidate: &PrefValue) -> ValidationOutcome {
        (self.validate_fn)(candidate)
    }
}

/// Validator for integer candidates within a range.
///
/// Non-integer candidates are rejected with a message naming the expected
/// payload; attach this validator only to integer-valued items.
///
/// # Example
///
/// ```
/// use ridgeline_prefs::{IntRangeValidator, PrefValidator, PrefValue};
///
/// let validator = IntRangeValidator::new(1, 10);
/// assert!(validator.validate(&PrefValue::Int(5)).is_passed());
/// assert!(!validator.validate(&PrefValue::Int(11)).is_passed());
/// ```
#[derive(Debug, Clone)]
pub struct IntRangeValidator {
    minimum: i64,
    maximum: i64,
}

impl IntRangeValidator {
    /// Create a new range validator with the given inclusive bounds.
    pub fn new(minimum: i64, maximum: i64) -> Self {
        Self {
            minimum: minimum.min(maximum),
            maximum: minimum.max(maximum),
        }
    }

    /// Get the minimum value.
    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    /// Get the maximum value.
    pub fn maximum(&self) -> i64 {
        self.maximum
    }
}

impl PrefValidator for IntRangeValidator {
    fn validate(&self, candidate: &PrefValue) -> ValidationOutcome {
        match candidate.try_as_int() {
            Some(n) if n >= self.minimum && n <= self.maximum => ValidationOutcome::Passed,
            Some(n) => ValidationOutcome::failed(format!(
                "{n} is outside the allowed range {} to {}",
                self.minimum, self.maximum
            )),
            None => ValidationOutcome::failed(format!(
                "expected an integer value, got {}",
                candidate.variant_name()
            )),
        }
    }
}

/// Validator that accepts only values from a fixed set.
///
/// Useful for choice items whose stored value may arrive from outside the
/// picker path (e.g. imported settings).
#[derive(Debug, Clone)]
pub struct ChoiceValidator {
    allowed: Vec<PrefValue>,
}

impl ChoiceValidator {
    /// Create a validator accepting exactly the given values.
    pub fn new(allowed: Vec<PrefValue>) -> Self {
        Self { allowed }
    }
}

impl PrefValidator for ChoiceValidator {
    fn validate(&self, candidate: &PrefValue) -> ValidationOutcome {
        if self.allowed.contains(candidate) {
            ValidationOutcome::Passed
        } else {
            ValidationOutcome::failed(format!("{candidate} is not one of the allowed options"))
        }
    }
}
