//! Unit normalization and default inference.
//!
//! Each supplied value is range-checked in the unit it was given in, then
//! converted to the canonical unit the formula is calibrated against:
//! mmol/l for cholesterol, µmol/l for creatinine and cm for height.
//! Missing creatinine and height are replaced by sex-based defaults that are
//! already canonical and are not range-checked.

use serde::Serialize;
use tracing::debug;

use cvd_model::{
    AGE_RANGE, CholesterolUnit, ClinicalInput, CreatinineUnit, Field, HeightUnit, Result,
    SYSTOLIC_BP_RANGE, Sex, ValidationError, cholesterol_range, creatinine_range, height_range,
};

use crate::validate::validate_range;

/// Cholesterol: mg/dl per mmol/l.
pub const CHOLESTEROL_MG_DL_PER_MMOL_L: f64 = 38.7;
/// Creatinine: µmol/l per mg/dl.
pub const CREATININE_UMOL_L_PER_MG_DL: f64 = 88.5;
pub const CM_PER_INCH: f64 = 2.54;

/// Default serum creatinine in µmol/l when none is supplied.
pub fn default_creatinine(sex: Sex) -> f64 {
    match sex {
        Sex::Female => 83.0,
        Sex::Male => 101.0,
    }
}

/// Default height in cm when none is supplied.
pub fn default_height(sex: Sex) -> f64 {
    match sex {
        Sex::Female => 160.0,
        Sex::Male => 173.0,
    }
}

/// Validated input in canonical units, with indicators as 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[non_exhaustive]
pub struct NormalizedInput {
    pub age: f64,
    /// 1 for male, 0 for female.
    pub sex: f64,
    pub smoker: f64,
    /// mm Hg.
    pub systolic_bp: f64,
    /// mmol/l.
    pub cholesterol: f64,
    pub diabetic: f64,
    pub left_ventricular_hypertrophy: f64,
    pub prior_mi: f64,
    pub prior_stroke: f64,
    /// µmol/l.
    pub creatinine: f64,
    /// cm.
    pub height: f64,
}

/// Validate `input` and convert it to canonical units.
///
/// Checks run in a fixed order (age, systolic blood pressure, cholesterol,
/// creatinine, height) and the first failure is returned.
pub fn normalize(input: &ClinicalInput) -> Result<NormalizedInput> {
    let age = f64::from(input.age);
    validate_range(&AGE_RANGE, age)?;
    validate_range(&SYSTOLIC_BP_RANGE, input.systolic_bp)?;

    let cholesterol = normalize_cholesterol(input.cholesterol.value, input.cholesterol.unit)?;
    let creatinine = normalize_creatinine(input.creatinine, input.creatinine_unit, input.sex)?;
    let height = normalize_height(input.height, input.height_unit, input.sex)?;

    Ok(NormalizedInput {
        age,
        sex: input.sex.indicator(),
        smoker: indicator(input.smoker),
        systolic_bp: input.systolic_bp,
        cholesterol,
        diabetic: indicator(input.diabetic),
        left_ventricular_hypertrophy: indicator(input.left_ventricular_hypertrophy),
        prior_mi: indicator(input.prior_mi),
        prior_stroke: indicator(input.prior_stroke),
        creatinine,
        height,
    })
}

fn normalize_cholesterol(value: f64, unit: CholesterolUnit) -> Result<f64> {
    validate_range(&cholesterol_range(unit), value)?;
    Ok(match unit {
        CholesterolUnit::MmolPerL => value,
        CholesterolUnit::MgPerDl => value / CHOLESTEROL_MG_DL_PER_MMOL_L,
    })
}

fn normalize_creatinine(value: Option<f64>, unit: Option<CreatinineUnit>, sex: Sex) -> Result<f64> {
    let Some(value) = value else {
        debug!(field = %Field::Creatinine, "not supplied, using sex-based default");
        return Ok(default_creatinine(sex));
    };
    let unit = unit.ok_or(ValidationError::MissingUnit {
        field: Field::Creatinine,
    })?;
    validate_range(&creatinine_range(unit), value)?;
    Ok(match unit {
        CreatinineUnit::UmolPerL => value,
        CreatinineUnit::MgPerDl => value * CREATININE_UMOL_L_PER_MG_DL,
    })
}

fn normalize_height(value: Option<f64>, unit: Option<HeightUnit>, sex: Sex) -> Result<f64> {
    let Some(value) = value else {
        debug!(field = %Field::Height, "not supplied, using sex-based default");
        return Ok(default_height(sex));
    };
    let unit = unit.ok_or(ValidationError::MissingUnit {
        field: Field::Height,
    })?;
    validate_range(&height_range(unit), value)?;
    Ok(match unit {
        HeightUnit::Cm => value,
        HeightUnit::Inches => value * CM_PER_INCH,
    })
}

fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}
