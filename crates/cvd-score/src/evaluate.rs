//! The weighted-sum risk formula.
//!
//! Predictors are centered (age at 37.5, systolic BP at 115, cholesterol at
//! 4.5, height at 180, creatinine at 40) and combined with sex and smoking
//! interaction terms. The coefficients are the published model and must
//! not be tuned.

use serde::Serialize;

use crate::normalize::NormalizedInput;

const AGE_CENTER: f64 = 37.5;
const SYSTOLIC_BP_CENTER: f64 = 115.0;
const CHOLESTEROL_CENTER: f64 = 4.5;
const HEIGHT_CENTER: f64 = 180.0;
const CREATININE_CENTER: f64 = 40.0;

/// The linear sum is multiplied by this factor to give the score.
pub const SCORE_SCALE: f64 = 10.0;

/// Term labels and signed coefficients, in formula order.
pub const COEFFICIENTS: [(&str, f64); 16] = [
    ("age", 0.0909179),
    ("sex x age", -0.0190903),
    ("sex", 1.343643),
    ("smoker", 1.302315),
    ("sex x smoker", -0.4399128),
    ("smoker x age", -0.0146243),
    ("height", -0.0147991),
    ("systolic blood pressure", 0.010771),
    ("diabetes", 0.9108246),
    ("sex x diabetes", -0.7664304),
    ("prior myocardial infarction", 0.8198657),
    ("prior stroke", 0.8079117),
    ("cholesterol", 0.0482319),
    ("sex x cholesterol", 0.1321689),
    ("left ventricular hypertrophy", 0.3321234),
    ("creatinine", 0.0059917),
];

/// One weighted term of the formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermContribution {
    pub label: &'static str,
    pub coefficient: f64,
    /// Centered predictor, or product of predictors for interaction terms.
    pub predictor: f64,
    /// `coefficient * predictor`, before scaling.
    pub contribution: f64,
}

impl TermContribution {
    /// Contribution in score points.
    pub fn points(&self) -> f64 {
        self.contribution * SCORE_SCALE
    }
}

/// Every term of the formula for `n`, in formula order.
pub fn score_terms(n: &NormalizedInput) -> Vec<TermContribution> {
    let age = n.age - AGE_CENTER;
    let cholesterol = n.cholesterol - CHOLESTEROL_CENTER;
    let predictors = [
        age,
        n.sex * age,
        n.sex,
        n.smoker,
        n.sex * n.smoker,
        n.smoker * age,
        n.height - HEIGHT_CENTER,
        n.systolic_bp - SYSTOLIC_BP_CENTER,
        n.diabetic,
        n.sex * n.diabetic,
        n.prior_mi,
        n.prior_stroke,
        cholesterol,
        n.sex * cholesterol,
        n.left_ventricular_hypertrophy,
        n.creatinine - CREATININE_CENTER,
    ];

    COEFFICIENTS
        .iter()
        .zip(predictors)
        .map(|(&(label, coefficient), predictor)| TermContribution {
            label,
            coefficient,
            predictor,
            contribution: coefficient * predictor,
        })
        .collect()
}

/// Unrounded score. Terms are summed left to right in formula order.
pub fn evaluate_unrounded(n: &NormalizedInput) -> f64 {
    let sum = score_terms(n)
        .iter()
        .fold(0.0, |acc, term| acc + term.contribution);
    SCORE_SCALE * sum
}

/// Risk score rounded to two decimal places.
pub fn evaluate(n: &NormalizedInput) -> f64 {
    round_score(evaluate_unrounded(n))
}

/// Round to two decimals, ties to even, on the exact binary value.
///
/// Scaling by 100 before rounding would move values that sit just below a
/// tie onto it, so the decimal formatter does the rounding instead.
pub fn round_score(score: f64) -> f64 {
    format!("{score:.2}").parse().unwrap_or(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(age: f64, sex: f64) -> NormalizedInput {
        NormalizedInput {
            age,
            sex,
            smoker: 0.0,
            systolic_bp: 115.0,
            cholesterol: 4.5,
            diabetic: 0.0,
            left_ventricular_hypertrophy: 0.0,
            prior_mi: 0.0,
            prior_stroke: 0.0,
            creatinine: 40.0,
            height: 180.0,
        }
    }

    #[test]
    fn test_centered_baseline_is_zero() {
        assert_eq!(evaluate(&normalized(37.5, 0.0)), 0.0);
    }

    #[test]
    fn test_male_indicator_alone() {
        assert_eq!(evaluate(&normalized(37.5, 1.0)), 13.44);
    }

    #[test]
    fn test_terms_follow_formula_order() {
        let terms = score_terms(&normalized(47.5, 1.0));
        assert_eq!(terms.len(), 16);
        assert_eq!(terms[0].label, "age");
        assert_eq!(terms[0].predictor, 10.0);
        assert_eq!(terms[1].contribution, -0.0190903 * 10.0);
        assert_eq!(terms[15].label, "creatinine");
    }

    #[test]
    fn test_terms_add_up_to_score() {
        let n = normalized(60.0, 1.0);
        let points: f64 = score_terms(&n).iter().map(TermContribution::points).sum();
        assert!((points - evaluate_unrounded(&n)).abs() < 1e-9);
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(30.365696), 30.37);
        assert_eq!(round_score(49.786006500000006), 49.79);
        assert_eq!(round_score(-0.154), -0.15);
        // Exactly representable ties go to the even neighbour.
        assert_eq!(round_score(0.125), 0.12);
        assert_eq!(round_score(0.375), 0.38);
    }
}
