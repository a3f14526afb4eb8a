//! Validation failures raised while scoring a single subject.
//!
//! Every failure is terminal for the evaluation it belongs to: the caller
//! receives the first violation found and must supply corrected input.

use thiserror::Error;

use crate::enums::Field;

/// A value fell outside its calibrated range. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("the value for {field} is outside the allowed range ({min}-{max} {unit}): {value}")]
pub struct RangeError {
    pub field: Field,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    /// Unit label of the bounds, for display.
    pub unit: &'static str,
}

/// Errors that can occur while validating and normalizing clinical input.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// A categorical token (sex) is not one of the accepted spellings.
    #[error("invalid {field} '{value}': expected one of {expected}")]
    InvalidEnum {
        field: Field,
        value: String,
        expected: &'static str,
    },

    /// A unit token is not recognized for its field.
    #[error("unrecognized unit '{unit}' for {field}: expected one of {expected}")]
    InvalidUnit {
        field: Field,
        unit: String,
        expected: &'static str,
    },

    /// A value was supplied without its unit.
    #[error("a unit must be specified for {field} when a value is supplied")]
    MissingUnit { field: Field },

    #[error(transparent)]
    Range(#[from] RangeError),
}

impl ValidationError {
    /// The field the failure refers to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::InvalidEnum { field, .. }
            | ValidationError::InvalidUnit { field, .. }
            | ValidationError::MissingUnit { field } => *field,
            ValidationError::Range(range) => range.field,
        }
    }
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
