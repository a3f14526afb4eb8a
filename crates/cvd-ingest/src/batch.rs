//! Scoring many subject records in one pass.

use serde::Serialize;
use tracing::{debug, info, info_span};

use cvd_model::SubjectRecord;
use cvd_score::score_record;

use crate::reader::SubjectRow;

/// Options controlling batch behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchOptions {
    /// Stop at the first record that fails validation.
    pub fail_fast: bool,
    /// Leave records that fail validation out of the results.
    pub skip_invalid: bool,
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fail_fast(mut self, enable: bool) -> Self {
        self.fail_fast = enable;
        self
    }

    #[must_use]
    pub fn with_skip_invalid(mut self, enable: bool) -> Self {
        self.skip_invalid = enable;
        self
    }
}

/// A subject record with its score or validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    /// Record id, or its 1-based position when the input has none.
    pub id: String,
    /// The input record; `None` when its row could not be parsed.
    pub record: Option<SubjectRecord>,
    pub score: Option<f64>,
    pub error: Option<String>,
}

impl ScoredRecord {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of scoring a batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    pub records: Vec<ScoredRecord>,
    pub scored: usize,
    pub failed: usize,
    /// True when `fail_fast` stopped the batch before the last record.
    pub stopped_early: bool,
}

impl BatchOutcome {
    pub fn has_errors(&self) -> bool {
        self.failed > 0
    }

    /// Records that failed validation, in input order.
    pub fn failures(&self) -> impl Iterator<Item = &ScoredRecord> {
        self.records.iter().filter(|record| !record.is_valid())
    }
}

/// Score every record. Each record is independent; a failure never
/// affects the score of another record.
pub fn score_records(records: &[SubjectRecord], options: &BatchOptions) -> BatchOutcome {
    let entries = records
        .iter()
        .map(|record| (record.id.as_deref(), Ok::<_, String>(record)));
    score_entries(entries, records.len(), options)
}

/// Score every row read from a file. Rows whose cells could not be parsed
/// count as failed records, like records that fail validation.
pub fn score_rows(rows: &[SubjectRow], options: &BatchOptions) -> BatchOutcome {
    let entries = rows.iter().map(|row| {
        let record = row.record.as_ref().map_err(ToString::to_string);
        (row.id.as_deref(), record)
    });
    score_entries(entries, rows.len(), options)
}

fn score_entries<'a, I>(entries: I, total: usize, options: &BatchOptions) -> BatchOutcome
where
    I: Iterator<Item = (Option<&'a str>, std::result::Result<&'a SubjectRecord, String>)>,
{
    let span = info_span!("batch", record_count = total);
    let _guard = span.enter();
    let mut outcome = BatchOutcome::default();

    for (index, (id, record)) in entries.enumerate() {
        let id = id.map_or_else(|| (index + 1).to_string(), str::to_string);
        let parsed = record.as_ref().ok().copied();
        let scored = record.and_then(|record| {
            score_record(record).map_err(|error| {
                debug!(record_id = %id, field = %error.field(), "record rejected");
                error.to_string()
            })
        });
        match scored {
            Ok(score) => {
                outcome.scored += 1;
                outcome.records.push(ScoredRecord {
                    id,
                    record: parsed.cloned(),
                    score: Some(score),
                    error: None,
                });
            }
            Err(error) => {
                outcome.failed += 1;
                if !options.skip_invalid {
                    outcome.records.push(ScoredRecord {
                        id,
                        record: parsed.cloned(),
                        score: None,
                        error: Some(error),
                    });
                }
                if options.fail_fast {
                    outcome.stopped_early = index + 1 < total;
                    break;
                }
            }
        }
    }

    info!(
        scored = outcome.scored,
        failed = outcome.failed,
        stopped_early = outcome.stopped_early,
        "batch complete"
    );
    outcome
}
