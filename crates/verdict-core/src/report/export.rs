//! JSON and CSV export of task reviews.
//!
//! Exports carry the same `CanonicalScore` values that drive on-screen
//! rendering, so numbers appear unclamped.

use crate::dimensions::Dimension;

use super::review::TaskReview;
use super::ReportError;

/// Leading CSV columns before the per-dimension scores.
pub const CSV_FIXED_COLUMNS: [&str; 4] = ["task_id", "config_file", "results_file", "reviewed_at"];

/// Full CSV header row.
pub fn csv_headers() -> Vec<&'static str> {
    CSV_FIXED_COLUMNS
        .iter()
        .copied()
        .chain(Dimension::ALL.iter().map(|d| d.name()))
        .collect()
}

/// Pretty-printed JSON array of reviews.
pub fn to_json(reviews: &[TaskReview]) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(reviews)?)
}

/// One CSV row per review with headline scores per dimension.
pub fn to_csv(reviews: &[TaskReview]) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(csv_headers())?;

    for review in reviews {
        let mut row = vec![
            review.task_id.clone().unwrap_or_else(|| "unknown".to_string()),
            review.config_file.clone().unwrap_or_default(),
            review.results_file.clone().unwrap_or_default(),
            review.reviewed_at.clone().unwrap_or_default(),
        ];
        row.extend(Dimension::ALL.iter().map(|&d| review.headline(d).to_string()));
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::IoError(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
