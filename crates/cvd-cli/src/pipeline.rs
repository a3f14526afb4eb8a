//! File-to-file batch scoring used by the `batch` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use cvd_ingest::{BatchOptions, read_subject_rows, score_rows, write_scored_records};

use crate::logging::redact_value;
use crate::types::BatchRun;

/// `<dir>/<stem>_scored.csv` next to the input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "subjects".to_string());
    input.with_file_name(format!("{stem}_scored.csv"))
}

/// Read `input`, score every record and write the results.
///
/// Rows with unparseable cells and records that fail validation do not make
/// this function fail; they are reported through the returned outcome.
///
/// # Errors
///
/// Fails if the input cannot be read as a subject file (missing file,
/// missing required column, malformed CSV) or the output cannot be written.
pub fn run_batch(input: &Path, output: Option<&Path>, options: &BatchOptions) -> Result<BatchRun> {
    let span = info_span!("batch_file", input = %input.display());
    let _guard = span.enter();
    let output = output.map_or_else(|| default_output_path(input), Path::to_path_buf);

    let rows = read_subject_rows(input)
        .with_context(|| format!("read subjects from {}", input.display()))?;
    info!(record_count = rows.len(), "subjects loaded");

    let outcome = score_rows(&rows, options);
    for failure in outcome.failures() {
        let detail = failure.error.as_deref().unwrap_or_default();
        warn!(
            record_id = %failure.id,
            error = %redact_value(detail),
            "record not scored"
        );
    }

    write_scored_records(&output, &outcome.records)
        .with_context(|| format!("write results to {}", output.display()))?;
    info!(output = %output.display(), "results written");

    Ok(BatchRun {
        input: input.to_path_buf(),
        output,
        outcome,
    })
}
