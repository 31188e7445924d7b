//! Structured recovery of evaluator payloads.
//!
//! This module handles locating the payload object in raw output and
//! projecting it into a [`ParsedEvaluation`](crate::types::ParsedEvaluation)
//! with its per-metric table.

mod metrics;
mod structured;

pub use metrics::{build_metric_table, metric_label};
pub use structured::{decode_document, evaluation_from_document, parse_evaluation, Document};

use serde_json::Value as JsonValue;

/// Coerce a loosely-typed payload field to text.
///
/// Strings pass through, `null` is missing, anything else is rendered as JSON.
pub(crate) fn value_to_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
