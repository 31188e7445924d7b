//! Stored evaluator result records.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::warn;

use crate::dimensions::Dimension;
use crate::types::{DetectedFlag, RawEvaluationOutput};

use super::ReportError;

/// The evaluator's response for one dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionResponse {
    #[serde(default)]
    pub response: RawEvaluationOutput,

    #[serde(default)]
    pub error: Option<String>,
}

/// One evaluated task as written by the evaluation service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub task_id: Option<String>,

    /// ISO-8601 timestamp of the review
    #[serde(default)]
    pub reviewed_at: Option<String>,

    #[serde(default)]
    pub reviewer_email: Option<String>,

    #[serde(default)]
    pub config_file: Option<String>,

    #[serde(default)]
    pub results_file: Option<String>,

    /// Responses keyed by dimension name
    #[serde(default)]
    pub evaluation_results: BTreeMap<String, DimensionResponse>,

    #[serde(default)]
    pub detected_flags: Vec<DetectedFlag>,

    /// Position in the stored results array, counting skipped elements
    #[serde(skip)]
    pub position: usize,

    /// Remaining top-level keys, including the flat `<dimension name>: response` copies
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl TaskRecord {
    /// Raw output for a dimension.
    ///
    /// Prefers `evaluation_results[<name>].response`, then the flat top-level copy.
    pub fn response_for(&self, dimension: Dimension) -> RawEvaluationOutput {
        let nested = self
            .evaluation_results
            .get(dimension.name())
            .map(|r| &r.response)
            .filter(|r| !r.is_absent());

        match nested {
            Some(response) => response.clone(),
            None => RawEvaluationOutput::from(self.extra.get(dimension.name()).cloned()),
        }
    }

    /// Error recorded while evaluating a dimension, if any.
    pub fn error_for(&self, dimension: Dimension) -> Option<&str> {
        self.evaluation_results
            .get(dimension.name())
            .and_then(|r| r.error.as_deref())
    }

    /// Task-level processing error written in place of a result.
    pub fn processing_error(&self) -> Option<&str> {
        self.extra.get("error").and_then(JsonValue::as_str)
    }

    /// Parsed review timestamp.
    pub fn reviewed_at_time(&self) -> Option<NaiveDateTime> {
        self.reviewed_at.as_deref().and_then(parse_timestamp)
    }
}

/// Parse records from JSON text: an array of records or a single record.
///
/// Array elements that are not valid records are skipped with a warning.
pub fn parse_records(json: &str) -> Result<Vec<TaskRecord>, ReportError> {
    let value: JsonValue = serde_json::from_str(json)?;

    match value {
        JsonValue::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<TaskRecord>(item) {
                Ok(record) => Some(TaskRecord {
                    position: index,
                    ..record
                }),
                Err(e) => {
                    warn!(index, error = %e, "skipping malformed result record");
                    None
                }
            })
            .collect()),
        JsonValue::Object(_) => Ok(vec![serde_json::from_value(value)?]),
        other => Err(ReportError::InvalidRecord(format!(
            "expected an array of records or a single record, found {}",
            json_type_name(&other)
        ))),
    }
}

/// Load records from a results file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<TaskRecord>, ReportError> {
    let contents = fs::read_to_string(path)?;
    parse_records(&contents)
}

/// Parse an ISO-8601 timestamp with or without a UTC offset.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|t| t.naive_utc()))
}

/// Task ids are usually strings but older records carry numbers.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlagDetails;

    const RECORD: &str = r#"{
        "task_id": "task_0042",
        "reviewed_at": "2026-01-22T10:15:30.123456",
        "reviewer_email": "reviewer@example.com",
        "evaluation_results": {
            "Prompt Quality": {"response": "```json\n{\"overall_score\": 4}\n```", "error": null},
            "Model Benchmarking Analysis": {"response": "Skipped (No Results Provided)", "error": null},
            "SQL Verifier Quality": {"response": "Evaluation error: timeout", "error": "timeout"}
        },
        "detected_flags": [
            {"flag_type": "redundant_calls", "details": ["list_orders called 2 times"]}
        ],
        "Prompt Quality": "```json\n{\"overall_score\": 4}\n```",
        "Manual Tool Execution (Happy Path)": "Score: 3"
    }"#;

    #[test]
    fn test_parse_single_record() {
        let records = parse_records(RECORD).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.task_id.as_deref(), Some("task_0042"));
        assert_eq!(record.detected_flags.len(), 1);
        assert!(matches!(record.detected_flags[0].details, FlagDetails::List(_)));
    }

    #[test]
    fn test_response_lookup_prefers_nested() {
        let record = &parse_records(RECORD).unwrap()[0];

        assert_eq!(
            record.response_for(Dimension::PromptQuality),
            RawEvaluationOutput::text("```json\n{\"overall_score\": 4}\n```")
        );
        // Only the flat copy exists for this one
        assert_eq!(
            record.response_for(Dimension::HappyPath),
            RawEvaluationOutput::text("Score: 3")
        );
    }

    #[test]
    fn test_missing_dimension_is_absent() {
        let record: TaskRecord = serde_json::from_str(r#"{"task_id": "t1"}"#).unwrap();
        assert!(record.response_for(Dimension::SqlVerifierQuality).is_absent());
        assert!(record.error_for(Dimension::SqlVerifierQuality).is_none());
    }

    #[test]
    fn test_dimension_error() {
        let record = &parse_records(RECORD).unwrap()[0];
        assert_eq!(record.error_for(Dimension::SqlVerifierQuality), Some("timeout"));
    }

    #[test]
    fn test_numeric_task_id() {
        let record: TaskRecord = serde_json::from_str(r#"{"task_id": 17}"#).unwrap();
        assert_eq!(record.task_id.as_deref(), Some("17"));
    }

    #[test]
    fn test_array_skips_malformed_entries() {
        let json = r#"[{"task_id": "a"}, 42, {"task_id": "b", "detected_flags": "oops"}, {"task_id": "c"}]"#;
        let ids: Vec<_> = parse_records(json)
            .unwrap()
            .into_iter()
            .filter_map(|r| r.task_id)
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_skipped_entries_keep_stored_positions() {
        let json = r#"[{"task_id": "a"}, {"task_id": "b", "detected_flags": "oops"}, {"task_id": "c"}]"#;
        let positions: Vec<_> = parse_records(json)
            .unwrap()
            .into_iter()
            .map(|r| (r.task_id.unwrap_or_default(), r.position))
            .collect();
        assert_eq!(positions, vec![("a".to_string(), 0), ("c".to_string(), 2)]);
    }

    #[test]
    fn test_processing_error_record() {
        let json = r#"{"task_id": "error", "config_file": "data/x_config.json", "error": "boom"}"#;
        let record = &parse_records(json).unwrap()[0];
        assert_eq!(record.processing_error(), Some("boom"));
    }

    #[test]
    fn test_invalid_top_level() {
        assert!(matches!(parse_records("\"text\""), Err(ReportError::InvalidRecord(_))));
        assert!(matches!(parse_records("{not json"), Err(ReportError::JsonError(_))));
    }

    #[test]
    fn test_timestamps() {
        assert!(parse_timestamp("2026-01-22T10:15:30.123456").is_some());
        assert!(parse_timestamp("2026-01-22T10:15:30").is_some());
        assert!(parse_timestamp("2026-01-22T10:15:30Z").is_some());
        assert!(parse_timestamp("2026-01-22T10:15:30+02:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
