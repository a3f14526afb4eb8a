//! Batch ingestion for risk scoring.
//!
//! Reads subject records from CSV, scores them with `cvd-score` and writes
//! the results back to CSV. All file access of the workspace lives here and
//! in the CLI; the scoring core itself performs no I/O.

pub mod batch;
pub mod error;
pub mod reader;
pub mod writer;

pub use batch::{BatchOptions, BatchOutcome, ScoredRecord, score_records, score_rows};
pub use error::{IngestError, Result};
pub use reader::{
    SubjectRow, normalize_header, parse_flag, read_subject_records, read_subject_rows,
};
pub use writer::{OUTPUT_HEADERS, write_scored_records};
