//! Calibrated input ranges of the risk model.
//!
//! Values outside these bounds were not represented in the cohort the
//! coefficients were fitted on. Bounds are inclusive and expressed in the
//! unit the value is supplied in, before any conversion.

use serde::Serialize;

use crate::enums::{CholesterolUnit, CreatinineUnit, Field, HeightUnit};

/// Inclusive range for one field in one unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidRange {
    pub field: Field,
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

impl ValidRange {
    pub const fn new(field: Field, min: f64, max: f64, unit: &'static str) -> Self {
        Self {
            field,
            min,
            max,
            unit,
        }
    }

    /// Returns true if `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

pub const AGE_RANGE: ValidRange = ValidRange::new(Field::Age, 35.0, 74.0, "years");
pub const SYSTOLIC_BP_RANGE: ValidRange = ValidRange::new(Field::SystolicBp, 90.0, 250.0, "mm Hg");
pub const CHOLESTEROL_MMOL_RANGE: ValidRange =
    ValidRange::new(Field::Cholesterol, 3.0, 14.0, "mmol/l");
pub const CHOLESTEROL_MG_RANGE: ValidRange =
    ValidRange::new(Field::Cholesterol, 100.0, 550.0, "mg/dl");
pub const CREATININE_UMOL_RANGE: ValidRange =
    ValidRange::new(Field::Creatinine, 30.0, 200.0, "µmol/l");
pub const CREATININE_MG_RANGE: ValidRange = ValidRange::new(Field::Creatinine, 0.3, 2.3, "mg/dl");
pub const HEIGHT_CM_RANGE: ValidRange = ValidRange::new(Field::Height, 120.0, 210.0, "cm");
pub const HEIGHT_INCHES_RANGE: ValidRange = ValidRange::new(Field::Height, 45.0, 85.0, "inches");

/// Every calibrated range, in validation order.
pub const VALID_RANGES: &[ValidRange] = &[
    AGE_RANGE,
    SYSTOLIC_BP_RANGE,
    CHOLESTEROL_MMOL_RANGE,
    CHOLESTEROL_MG_RANGE,
    CREATININE_UMOL_RANGE,
    CREATININE_MG_RANGE,
    HEIGHT_CM_RANGE,
    HEIGHT_INCHES_RANGE,
];

pub fn cholesterol_range(unit: CholesterolUnit) -> ValidRange {
    match unit {
        CholesterolUnit::MmolPerL => CHOLESTEROL_MMOL_RANGE,
        CholesterolUnit::MgPerDl => CHOLESTEROL_MG_RANGE,
    }
}

pub fn creatinine_range(unit: CreatinineUnit) -> ValidRange {
    match unit {
        CreatinineUnit::UmolPerL => CREATININE_UMOL_RANGE,
        CreatinineUnit::MgPerDl => CREATININE_MG_RANGE,
    }
}

pub fn height_range(unit: HeightUnit) -> ValidRange {
    match unit {
        HeightUnit::Cm => HEIGHT_CM_RANGE,
        HeightUnit::Inches => HEIGHT_INCHES_RANGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(SYSTOLIC_BP_RANGE.contains(90.0));
        assert!(SYSTOLIC_BP_RANGE.contains(250.0));
        assert!(!SYSTOLIC_BP_RANGE.contains(89.999));
        assert!(!SYSTOLIC_BP_RANGE.contains(250.001));
    }

    #[test]
    fn test_unit_specific_ranges() {
        assert_eq!(cholesterol_range(CholesterolUnit::MgPerDl).max, 550.0);
        assert_eq!(creatinine_range(CreatinineUnit::MgPerDl).min, 0.3);
        assert_eq!(height_range(HeightUnit::Inches).unit, "inches");
    }

    #[test]
    fn test_nan_is_never_contained() {
        assert!(!AGE_RANGE.contains(f64::NAN));
    }
}
