//! Data model for cardiovascular risk scoring: inputs, units, ranges and errors.

pub mod enums;
pub mod error;
pub mod input;
pub mod ranges;

pub use enums::{CholesterolUnit, CreatinineUnit, Field, HeightUnit, Sex};
pub use error::{RangeError, Result, ValidationError};
pub use input::{ClinicalInput, Measurement, SubjectRecord};
pub use ranges::{
    AGE_RANGE, CHOLESTEROL_MG_RANGE, CHOLESTEROL_MMOL_RANGE, CREATININE_MG_RANGE,
    CREATININE_UMOL_RANGE, HEIGHT_CM_RANGE, HEIGHT_INCHES_RANGE, SYSTOLIC_BP_RANGE, VALID_RANGES,
    ValidRange, cholesterol_range, creatinine_range, height_range,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_converts() {
        let err: ValidationError = RangeError {
            field: Field::Age,
            value: 30.0,
            min: 35.0,
            max: 74.0,
            unit: "years",
        }
        .into();
        assert_eq!(err.field(), Field::Age);
    }

    #[test]
    fn input_serializes() {
        let input = ClinicalInput::new(
            60,
            Sex::Female,
            140.0,
            Measurement::new(200.0, CholesterolUnit::MgPerDl),
        )
        .with_height(160.0, HeightUnit::Cm);
        let json = serde_json::to_string(&input).expect("serialize input");
        let round: ClinicalInput = serde_json::from_str(&json).expect("deserialize input");
        assert_eq!(round, input);
    }
}
