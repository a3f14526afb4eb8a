//! Range validation against the calibrated bounds.

use cvd_model::{Field, RangeError, ValidRange};

/// Check that `value` lies in `[min, max]`.
///
/// NaN never passes, since it compares false against both bounds.
pub fn validate(
    field: Field,
    value: f64,
    min: f64,
    max: f64,
    unit: &'static str,
) -> Result<(), RangeError> {
    validate_range(&ValidRange::new(field, min, max, unit), value)
}

/// Check `value` against a range from the calibration table.
pub fn validate_range(range: &ValidRange, value: f64) -> Result<(), RangeError> {
    if range.contains(value) {
        tracing::trace!(field = %range.field, "value within range");
        Ok(())
    } else {
        Err(RangeError {
            field: range.field,
            value,
            min: range.min,
            max: range.max,
            unit: range.unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvd_model::{AGE_RANGE, SYSTOLIC_BP_RANGE};

    #[test]
    fn test_inclusive_bounds_pass() {
        assert!(validate_range(&SYSTOLIC_BP_RANGE, 90.0).is_ok());
        assert!(validate_range(&SYSTOLIC_BP_RANGE, 250.0).is_ok());
    }

    #[test]
    fn test_outside_bounds_fail() {
        let err = validate_range(&SYSTOLIC_BP_RANGE, 89.999).unwrap_err();
        assert_eq!(err.field, Field::SystolicBp);
        assert_eq!(err.value, 89.999);
        assert_eq!((err.min, err.max), (90.0, 250.0));
        assert_eq!(err.unit, "mm Hg");
        assert!(validate_range(&SYSTOLIC_BP_RANGE, 250.001).is_err());
    }

    #[test]
    fn test_ad_hoc_range() {
        assert!(validate(Field::Age, 35.0, 35.0, 74.0, "years").is_ok());
        let err = validate(Field::Age, 75.0, 35.0, 74.0, "years").unwrap_err();
        assert_eq!(err.field, AGE_RANGE.field);
    }

    #[test]
    fn test_nan_fails() {
        assert!(validate_range(&AGE_RANGE, f64::NAN).is_err());
    }
}
