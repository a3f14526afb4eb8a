//! Scored records to CSV.

use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;

use crate::batch::ScoredRecord;
use crate::error::{IngestError, Result};

/// Output columns: the input fields followed by `score` and `error`.
pub const OUTPUT_HEADERS: [&str; 17] = [
    "id",
    "age",
    "sex",
    "smoker",
    "systolic_bp",
    "cholesterol",
    "cholesterol_unit",
    "diabetic",
    "left_ventricular_hypertrophy",
    "prior_mi",
    "prior_stroke",
    "creatinine",
    "creatinine_unit",
    "height",
    "height_unit",
    "score",
    "error",
];

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn to_row(scored: &ScoredRecord) -> [String; 17] {
    let mut row: [String; 17] = Default::default();
    row[0] = scored.id.clone();
    if let Some(record) = &scored.record {
        row[1] = record.age.to_string();
        row[2] = record.sex.clone();
        row[3] = record.smoker.to_string();
        row[4] = record.systolic_bp.to_string();
        row[5] = record.cholesterol.to_string();
        row[6] = record.cholesterol_unit.clone();
        row[7] = record.diabetic.to_string();
        row[8] = record.left_ventricular_hypertrophy.to_string();
        row[9] = record.prior_mi.to_string();
        row[10] = record.prior_stroke.to_string();
        row[11] = optional(record.creatinine);
        row[12] = record.creatinine_unit.clone().unwrap_or_default();
        row[13] = optional(record.height);
        row[14] = record.height_unit.clone().unwrap_or_default();
    }
    row[15] = optional(scored.score);
    row[16] = scored.error.clone().unwrap_or_default();
    row
}

/// Write scored records with a header row, replacing any existing file.
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn write_scored_records(path: &Path, records: &[ScoredRecord]) -> Result<()> {
    let write_error = |source: csv::Error| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(write_error)?;
    writer.write_record(OUTPUT_HEADERS).map_err(write_error)?;
    for scored in records {
        writer.write_record(to_row(scored)).map_err(write_error)?;
    }
    writer.flush().map_err(|source| IngestError::Flush {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        record_count = records.len(),
        "scored records written"
    );
    Ok(())
}
