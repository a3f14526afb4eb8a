use std::path::PathBuf;

use serde::Serialize;

use cvd_ingest::BatchOutcome;
use cvd_model::ClinicalInput;
use cvd_score::{ScoreBreakdown, TermContribution};

/// Result of the `batch` command.
#[derive(Debug)]
pub struct BatchRun {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: BatchOutcome,
}

impl BatchRun {
    pub fn has_errors(&self) -> bool {
        self.outcome.has_errors()
    }
}

/// JSON body printed by `score --json`.
#[derive(Debug, Serialize)]
pub struct ScoreReport<'a> {
    pub score: f64,
    pub unrounded: f64,
    pub input: &'a ClinicalInput,
    pub terms: &'a [TermContribution],
}

impl<'a> ScoreReport<'a> {
    pub fn new(input: &'a ClinicalInput, breakdown: &'a ScoreBreakdown) -> Self {
        Self {
            score: breakdown.score,
            unrounded: breakdown.unrounded,
            input,
            terms: &breakdown.terms,
        }
    }
}
