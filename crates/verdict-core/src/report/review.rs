//! Per-task review: every dimension decoded, scored and presented.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dimensions::Dimension;
use crate::types::{CanonicalScore, DetectedFlag, RawEvaluationOutput};
use crate::{evaluate_output, OutputVerdict};

use super::record::TaskRecord;

/// Review of one dimension of one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionReview {
    pub dimension: Dimension,

    #[serde(flatten)]
    pub verdict: OutputVerdict,

    /// Raw text for fallback rendering when there is no structured decode
    pub raw_text: String,

    /// Error reported by the evaluation service for this dimension
    pub error: Option<String>,
}

impl DimensionReview {
    pub fn headline(&self) -> CanonicalScore {
        self.verdict.headline
    }
}

/// Review of every dimension of one task, in catalogue order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReview {
    pub task_id: Option<String>,
    pub reviewed_at: Option<String>,
    pub reviewer_email: Option<String>,
    pub config_file: Option<String>,
    pub results_file: Option<String>,
    pub dimensions: Vec<DimensionReview>,
    pub detected_flags: Vec<DetectedFlag>,
}

impl TaskReview {
    /// The review for a single dimension.
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionReview> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }

    /// Headline score for a dimension; `Unknown` if it was not reviewed.
    pub fn headline(&self, dimension: Dimension) -> CanonicalScore {
        self.dimension(dimension)
            .map(DimensionReview::headline)
            .unwrap_or(CanonicalScore::Unknown)
    }
}

/// Review one dimension's raw output.
pub fn review_dimension(
    dimension: Dimension,
    raw: &RawEvaluationOutput,
    error: Option<&str>,
) -> DimensionReview {
    DimensionReview {
        dimension,
        verdict: evaluate_output(raw),
        raw_text: raw.as_text().into_owned(),
        error: error.map(str::to_string),
    }
}

/// Review every dimension of a stored record.
pub fn review_task(record: &TaskRecord) -> TaskReview {
    let dimensions = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let raw = record.response_for(dimension);
            review_dimension(dimension, &raw, record.error_for(dimension))
        })
        .collect::<Vec<_>>();

    debug!(
        task_id = record.task_id.as_deref().unwrap_or("unknown"),
        decoded = dimensions.iter().filter(|d| d.verdict.parsed.is_some()).count(),
        "task reviewed"
    );

    TaskReview {
        task_id: record.task_id.clone(),
        reviewed_at: record.reviewed_at.clone(),
        reviewer_email: record.reviewer_email.clone(),
        config_file: record.config_file.clone(),
        results_file: record.results_file.clone(),
        dimensions,
        detected_flags: record.detected_flags.clone(),
    }
}

/// Review a batch of records, preserving order.
pub fn review_all(records: &[TaskRecord]) -> Vec<TaskReview> {
    records.iter().map(review_task).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::Bucket;
    use crate::report::parse_records;
    use crate::types::Verdict;

    const RECORDS: &str = r#"[
        {
            "task_id": "task_1",
            "reviewed_at": "2026-01-22T10:15:30",
            "evaluation_results": {
                "Prompt Quality": {"response": "```json\n{\"overall_score\": 4.5, \"naturalness\": {\"score\": 5}}\n```"},
                "Manual Tool Execution (Happy Path)": {"response": "{\"overall_score\": \"PASS\"}"},
                "SQL Verifier Quality": {"response": "Evaluation error: quota", "error": "quota"},
                "Model Benchmarking Analysis": {"response": "Skipped (No Results Provided)", "error": null}
            }
        }
    ]"#;

    #[test]
    fn test_review_covers_all_dimensions_in_order() {
        let records = parse_records(RECORDS).unwrap();
        let review = review_task(&records[0]);

        let order: Vec<_> = review.dimensions.iter().map(|d| d.dimension).collect();
        assert_eq!(order, Dimension::ALL.to_vec());
    }

    #[test]
    fn test_review_scores() {
        let records = parse_records(RECORDS).unwrap();
        let review = review_task(&records[0]);

        assert_eq!(review.headline(Dimension::PromptQuality), CanonicalScore::Numeric(4.5));
        assert_eq!(
            review.headline(Dimension::HappyPath),
            CanonicalScore::Verdict(Verdict::Pass)
        );
        assert_eq!(review.headline(Dimension::SqlVerifierQuality), CanonicalScore::Unknown);
        assert_eq!(review.headline(Dimension::ModelBenchmarking), CanonicalScore::Unknown);
    }

    #[test]
    fn test_review_details() {
        let records = parse_records(RECORDS).unwrap();
        let review = review_task(&records[0]);

        let prompt = review.dimension(Dimension::PromptQuality).unwrap();
        let parsed = prompt.verdict.parsed.as_ref().unwrap();
        assert_eq!(parsed.metrics[0].label, "Naturalness");
        assert_eq!(prompt.verdict.presentation.bucket, Bucket::Gradient);

        let sql = review.dimension(Dimension::SqlVerifierQuality).unwrap();
        assert!(sql.verdict.parsed.is_none());
        assert_eq!(sql.raw_text, "Evaluation error: quota");
        assert_eq!(sql.error.as_deref(), Some("quota"));
        assert_eq!(sql.verdict.presentation.label, "N/A");
    }

    #[test]
    fn test_review_is_deterministic() {
        let records = parse_records(RECORDS).unwrap();
        assert_eq!(review_all(&records), review_all(&records));
    }
}
