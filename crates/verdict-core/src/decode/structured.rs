//! Structured decode of an evaluator payload.
//!
//! A payload may arrive already decoded, inside a ```` ```json ```` fence, or
//! as a bare JSON document. When none of these yields a JSON object the
//! decode is absent and callers render the raw text instead.

use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::patterns;
use crate::score::normalize_score;
use crate::types::{ParsedEvaluation, RawEvaluationOutput};

use super::metrics::build_metric_table;
use super::value_to_text;

/// A decoded payload object, keys in payload order.
pub type Document = Map<String, JsonValue>;

type DocumentStrategy = fn(&str) -> Option<Document>;

/// Text decode strategies, in precedence order.
const DOCUMENT_STRATEGIES: [(&str, DocumentStrategy); 2] = [
    ("fenced_json", fenced_document),
    ("whole_document", whole_document),
];

/// Recover the payload object from raw output.
pub fn decode_document(raw: &RawEvaluationOutput) -> Option<Document> {
    match raw {
        RawEvaluationOutput::Structured(JsonValue::Object(map)) => Some(map.clone()),
        RawEvaluationOutput::Structured(_) | RawEvaluationOutput::Absent => None,
        RawEvaluationOutput::Text(text) => DOCUMENT_STRATEGIES
            .iter()
            .find_map(|(name, strategy)| {
                let document = strategy(text)?;
                debug!(strategy = name, keys = document.len(), "decoded evaluator payload");
                Some(document)
            }),
    }
}

/// Fully decode raw output into a [`ParsedEvaluation`].
///
/// Returns `None` when no JSON object can be recovered; this is not an error.
pub fn parse_evaluation(raw: &RawEvaluationOutput) -> Option<ParsedEvaluation> {
    match decode_document(raw) {
        Some(document) => Some(evaluation_from_document(&document)),
        None => {
            debug!("no structured decode available, falling back to raw text");
            None
        }
    }
}

/// Interpret a decoded payload object.
pub fn evaluation_from_document(document: &Document) -> ParsedEvaluation {
    ParsedEvaluation {
        overall_score: normalize_score(document.get("overall_score")),
        overall_pass: document.get("overall_pass").and_then(JsonValue::as_bool),
        summary: document.get("summary").and_then(value_to_text),
        flags: document
            .get("flags")
            .and_then(JsonValue::as_array)
            .map(|items| items.iter().filter_map(flag_label).collect())
            .unwrap_or_default(),
        metrics: build_metric_table(document),
    }
}

fn fenced_document(text: &str) -> Option<Document> {
    let body = patterns::fenced_json(text)?;
    match serde_json::from_str(body) {
        Ok(JsonValue::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "fenced json block did not parse");
            None
        }
    }
}

fn whole_document(text: &str) -> Option<Document> {
    match serde_json::from_str(text.trim()) {
        Ok(JsonValue::Object(map)) => Some(map),
        _ => None,
    }
}

/// Flags are usually strings; detected-flag objects collapse to their type.
fn flag_label(item: &JsonValue) -> Option<String> {
    match item {
        JsonValue::Object(map) => match map.get("flag_type").and_then(JsonValue::as_str) {
            Some(flag_type) => Some(flag_type.to_string()),
            None => Some(item.to_string()),
        },
        other => value_to_text(other),
    }
}
