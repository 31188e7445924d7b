//! Task-level reporting over stored evaluator results.
//!
//! Records are loaded from the results file, reviewed dimension by
//! dimension, and then exported, summarized or listed.

mod export;
mod history;
mod record;
mod review;
mod summary;

pub use export::{csv_headers, to_csv, to_json, CSV_FIXED_COLUMNS};
pub use history::{entry, history, HistoryEntry};
pub use record::{load_records, parse_records, parse_timestamp, DimensionResponse, TaskRecord};
pub use review::{review_all, review_dimension, review_task, DimensionReview, TaskReview};
pub use summary::{summarize, DimensionSummary, ReviewSummary};

use thiserror::Error;

/// Errors raised while loading or exporting results.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to read results: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse results JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Export produced invalid UTF-8: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("Invalid results file: {0}")]
    InvalidRecord(String),
}
