//! Clinical inputs as supplied by callers.

use serde::{Deserialize, Serialize};

use crate::enums::{CholesterolUnit, CreatinineUnit, HeightUnit, Sex};
use crate::error::{Result, ValidationError};

/// A numeric value tagged with the unit it was measured in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement<U> {
    pub value: f64,
    pub unit: U,
}

impl<U> Measurement<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }
}

/// Typed clinical input for one subject.
///
/// Categorical tokens are already resolved. Optional markers keep their
/// value and unit separately: a value without a unit is representable here
/// and rejected during normalization, while a unit without a value is
/// simply ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalInput {
    /// Age in whole years.
    pub age: u32,
    pub sex: Sex,
    pub smoker: bool,
    /// Systolic blood pressure in mm Hg.
    pub systolic_bp: f64,
    /// Total cholesterol.
    pub cholesterol: Measurement<CholesterolUnit>,
    pub diabetic: bool,
    pub left_ventricular_hypertrophy: bool,
    pub prior_mi: bool,
    pub prior_stroke: bool,
    pub creatinine: Option<f64>,
    pub creatinine_unit: Option<CreatinineUnit>,
    pub height: Option<f64>,
    pub height_unit: Option<HeightUnit>,
}

impl ClinicalInput {
    /// Create an input with the required measurements; every history flag
    /// starts out false and optional markers are absent.
    pub fn new(
        age: u32,
        sex: Sex,
        systolic_bp: f64,
        cholesterol: Measurement<CholesterolUnit>,
    ) -> Self {
        Self {
            age,
            sex,
            smoker: false,
            systolic_bp,
            cholesterol,
            diabetic: false,
            left_ventricular_hypertrophy: false,
            prior_mi: false,
            prior_stroke: false,
            creatinine: None,
            creatinine_unit: None,
            height: None,
            height_unit: None,
        }
    }

    #[must_use]
    pub fn with_smoker(mut self, smoker: bool) -> Self {
        self.smoker = smoker;
        self
    }

    #[must_use]
    pub fn with_diabetic(mut self, diabetic: bool) -> Self {
        self.diabetic = diabetic;
        self
    }

    #[must_use]
    pub fn with_left_ventricular_hypertrophy(mut self, lvh: bool) -> Self {
        self.left_ventricular_hypertrophy = lvh;
        self
    }

    #[must_use]
    pub fn with_prior_mi(mut self, prior_mi: bool) -> Self {
        self.prior_mi = prior_mi;
        self
    }

    #[must_use]
    pub fn with_prior_stroke(mut self, prior_stroke: bool) -> Self {
        self.prior_stroke = prior_stroke;
        self
    }

    #[must_use]
    pub fn with_creatinine(mut self, value: f64, unit: CreatinineUnit) -> Self {
        self.creatinine = Some(value);
        self.creatinine_unit = Some(unit);
        self
    }

    #[must_use]
    pub fn with_height(mut self, value: f64, unit: HeightUnit) -> Self {
        self.height = Some(value);
        self.height_unit = Some(unit);
        self
    }
}

/// Untyped subject record as read from a CSV row or command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    /// Caller-side identifier, carried through to results.
    pub id: Option<String>,
    pub age: u32,
    pub sex: String,
    pub smoker: bool,
    pub systolic_bp: f64,
    pub cholesterol: f64,
    pub cholesterol_unit: String,
    pub diabetic: bool,
    pub left_ventricular_hypertrophy: bool,
    pub prior_mi: bool,
    pub prior_stroke: bool,
    pub creatinine: Option<f64>,
    pub creatinine_unit: Option<String>,
    pub height: Option<f64>,
    pub height_unit: Option<String>,
}

impl TryFrom<&SubjectRecord> for ClinicalInput {
    type Error = ValidationError;

    /// Resolve sex and unit tokens. Stops at the first unrecognized token.
    fn try_from(record: &SubjectRecord) -> Result<Self> {
        let sex: Sex = record.sex.parse()?;
        let cholesterol_unit: CholesterolUnit = record.cholesterol_unit.parse()?;
        let creatinine_unit = optional_unit::<CreatinineUnit>(
            record.creatinine,
            record.creatinine_unit.as_deref(),
        )?;
        let height_unit = optional_unit::<HeightUnit>(record.height, record.height_unit.as_deref())?;

        Ok(ClinicalInput {
            age: record.age,
            sex,
            smoker: record.smoker,
            systolic_bp: record.systolic_bp,
            cholesterol: Measurement::new(record.cholesterol, cholesterol_unit),
            diabetic: record.diabetic,
            left_ventricular_hypertrophy: record.left_ventricular_hypertrophy,
            prior_mi: record.prior_mi,
            prior_stroke: record.prior_stroke,
            creatinine: record.creatinine,
            creatinine_unit,
            height: record.height,
            height_unit,
        })
    }
}

impl TryFrom<SubjectRecord> for ClinicalInput {
    type Error = ValidationError;

    fn try_from(record: SubjectRecord) -> Result<Self> {
        ClinicalInput::try_from(&record)
    }
}

/// A unit token only matters when its value is present; blank tokens count
/// as absent.
fn optional_unit<U>(value: Option<f64>, token: Option<&str>) -> Result<Option<U>>
where
    U: std::str::FromStr<Err = ValidationError>,
{
    if value.is_none() {
        return Ok(None);
    }
    match token.map(str::trim) {
        Some(token) if !token.is_empty() => token.parse().map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Field;

    fn record() -> SubjectRecord {
        SubjectRecord {
            age: 50,
            sex: "F".to_string(),
            systolic_bp: 130.0,
            cholesterol: 5.0,
            cholesterol_unit: "mmol/l".to_string(),
            ..SubjectRecord::default()
        }
    }

    #[test]
    fn test_builder_defaults() {
        let input = ClinicalInput::new(
            50,
            Sex::Male,
            120.0,
            Measurement::new(5.0, CholesterolUnit::MmolPerL),
        );
        assert!(!input.smoker);
        assert!(!input.prior_stroke);
        assert_eq!(input.creatinine, None);
        assert_eq!(input.height_unit, None);
    }

    #[test]
    fn test_record_resolves_tokens() {
        let mut raw = record();
        raw.height = Some(65.0);
        raw.height_unit = Some("Inches".to_string());
        let input = ClinicalInput::try_from(&raw).unwrap();
        assert_eq!(input.sex, Sex::Female);
        assert_eq!(input.cholesterol.unit, CholesterolUnit::MmolPerL);
        assert_eq!(input.height_unit, Some(HeightUnit::Inches));
    }

    #[test]
    fn test_unit_without_value_is_ignored() {
        let mut raw = record();
        raw.creatinine_unit = Some("bogus".to_string());
        let input = ClinicalInput::try_from(&raw).unwrap();
        assert_eq!(input.creatinine, None);
        assert_eq!(input.creatinine_unit, None);
    }

    #[test]
    fn test_blank_unit_with_value_stays_unresolved() {
        let mut raw = record();
        raw.creatinine = Some(90.0);
        raw.creatinine_unit = Some("  ".to_string());
        let input = ClinicalInput::try_from(&raw).unwrap();
        assert_eq!(input.creatinine, Some(90.0));
        assert_eq!(input.creatinine_unit, None);
    }

    #[test]
    fn test_sex_is_resolved_before_units() {
        let mut raw = record();
        raw.sex = "x".to_string();
        raw.cholesterol_unit = "g/l".to_string();
        let err = ClinicalInput::try_from(&raw).unwrap_err();
        assert_eq!(err.field(), Field::Sex);
    }
}
