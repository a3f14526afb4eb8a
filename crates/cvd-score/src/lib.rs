//! Cardiovascular risk score evaluation.
//!
//! Scoring is a single pass: validate every supplied value against its
//! calibrated range, normalize units and fill sex-based defaults, then apply
//! the weighted-sum formula. Evaluation is a pure function of its input and
//! is safe to call from any number of threads.

pub mod evaluate;
pub mod normalize;
pub mod validate;

use serde::Serialize;
use tracing::{debug, trace_span};

use cvd_model::{ClinicalInput, Result, SubjectRecord};

pub use evaluate::{
    COEFFICIENTS, SCORE_SCALE, TermContribution, evaluate, evaluate_unrounded, round_score,
    score_terms,
};
pub use normalize::{
    CHOLESTEROL_MG_DL_PER_MMOL_L, CM_PER_INCH, CREATININE_UMOL_L_PER_MG_DL, NormalizedInput,
    default_creatinine, default_height, normalize,
};
pub use validate::{validate, validate_range};

/// Compute the risk score for one subject, rounded to two decimals.
///
/// # Errors
///
/// Returns the first validation failure found.
pub fn compute_risk_score(input: &ClinicalInput) -> Result<f64> {
    let span = trace_span!("compute_risk_score");
    let _guard = span.enter();
    let normalized = normalize(input).inspect_err(|error| {
        debug!(field = %error.field(), "input rejected");
    })?;
    Ok(evaluate(&normalized))
}

/// Resolve the tokens of a raw record and score it.
///
/// # Errors
///
/// Returns the first unrecognized token or validation failure.
pub fn score_record(record: &SubjectRecord) -> Result<f64> {
    let input = ClinicalInput::try_from(record)?;
    compute_risk_score(&input)
}

/// Score together with the normalized input and each weighted term.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub normalized: NormalizedInput,
    pub terms: Vec<TermContribution>,
    /// Score before rounding.
    pub unrounded: f64,
    pub score: f64,
}

/// Like [`compute_risk_score`], but keeps the intermediate values.
///
/// # Errors
///
/// Returns the first validation failure found.
pub fn explain(input: &ClinicalInput) -> Result<ScoreBreakdown> {
    let normalized = normalize(input)?;
    let terms = score_terms(&normalized);
    let unrounded = evaluate_unrounded(&normalized);
    Ok(ScoreBreakdown {
        normalized,
        terms,
        unrounded,
        score: round_score(unrounded),
    })
}
