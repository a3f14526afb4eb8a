//! Closed enumerations for the categorical clinical inputs.
//!
//! Callers supply sex and unit tokens as free text. Each token is resolved
//! once, at the input boundary, into one of these enums so that the scoring
//! pipeline never compares strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Clinical field named by validation failures and range tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    Sex,
    SystolicBp,
    Cholesterol,
    Creatinine,
    Height,
}

impl Field {
    /// Human-readable field name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Sex => "sex",
            Field::SystolicBp => "systolic blood pressure",
            Field::Cholesterol => "cholesterol",
            Field::Creatinine => "creatinine",
            Field::Height => "height",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Biological sex as used by the regression model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Accepted spellings, for error messages.
    pub const EXPECTED: &'static str = "male, female, m, f";

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Formula indicator: 1 for male, 0 for female.
    pub fn indicator(&self) -> f64 {
        match self {
            Sex::Male => 1.0,
            Sex::Female => 0.0,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ValidationError;

    /// Parse a sex token (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();

        match normalized.as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(ValidationError::InvalidEnum {
                field: Field::Sex,
                value: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// Units accepted for total cholesterol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CholesterolUnit {
    /// Canonical unit.
    #[serde(rename = "mmol/l")]
    MmolPerL,
    #[serde(rename = "mg/dl")]
    MgPerDl,
}

impl CholesterolUnit {
    pub const EXPECTED: &'static str = "mmol/l, mg/dl";

    pub fn as_str(&self) -> &'static str {
        match self {
            CholesterolUnit::MmolPerL => "mmol/l",
            CholesterolUnit::MgPerDl => "mg/dl",
        }
    }
}

impl fmt::Display for CholesterolUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CholesterolUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mmol/l" => Ok(CholesterolUnit::MmolPerL),
            "mg/dl" => Ok(CholesterolUnit::MgPerDl),
            _ => Err(ValidationError::InvalidUnit {
                field: Field::Cholesterol,
                unit: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// Units accepted for serum creatinine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatinineUnit {
    /// Canonical unit.
    #[serde(rename = "umol/l", alias = "µmol/l")]
    UmolPerL,
    #[serde(rename = "mg/dl")]
    MgPerDl,
}

impl CreatinineUnit {
    pub const EXPECTED: &'static str = "µmol/l (umol/l), mg/dl";

    pub fn as_str(&self) -> &'static str {
        match self {
            CreatinineUnit::UmolPerL => "µmol/l",
            CreatinineUnit::MgPerDl => "mg/dl",
        }
    }
}

impl fmt::Display for CreatinineUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CreatinineUnit {
    type Err = ValidationError;

    /// Both the micro sign (U+00B5) and the Greek mu (U+03BC) are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "µmol/l" | "μmol/l" | "umol/l" => Ok(CreatinineUnit::UmolPerL),
            "mg/dl" => Ok(CreatinineUnit::MgPerDl),
            _ => Err(ValidationError::InvalidUnit {
                field: Field::Creatinine,
                unit: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// Units accepted for height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    /// Canonical unit.
    Cm,
    Inches,
}

impl HeightUnit {
    pub const EXPECTED: &'static str = "cm (cms), inches (in)";

    pub fn as_str(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Inches => "inches",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HeightUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "cms" => Ok(HeightUnit::Cm),
            "in" | "inches" => Ok(HeightUnit::Inches),
            _ => Err(ValidationError::InvalidUnit {
                field: Field::Height,
                unit: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}
