//! Per-metric breakdown of a decoded payload.
//!
//! Every non-reserved top-level key whose value is an object carrying a
//! `score` field becomes one [`MetricResult`]. Output order is the payload's
//! key order (`serde_json` is built with `preserve_order`).

use serde_json::Value as JsonValue;

use crate::dimensions::is_reserved_key;
use crate::score::normalize_score;
use crate::types::{MetricResult, MisclassifiedRun};

use super::structured::Document;
use super::value_to_text;

/// Project a decoded payload into its ordered metric table.
pub fn build_metric_table(document: &Document) -> Vec<MetricResult> {
    document
        .iter()
        .filter(|(key, _)| !is_reserved_key(key))
        .filter_map(|(key, value)| {
            let entry = value.as_object()?;
            let score = entry.get("score")?;

            Some(MetricResult {
                key: key.clone(),
                label: metric_label(key),
                score: normalize_score(Some(score)),
                reasoning: entry.get("reasoning").and_then(value_to_text),
                misclassified_runs: entry
                    .get("misclassified_runs")
                    .and_then(JsonValue::as_array)
                    .map(|runs| runs.iter().map(misclassified_run).collect())
                    .unwrap_or_default(),
                fake_passes_detected: entry
                    .get("fake_passes_detected")
                    .and_then(JsonValue::as_array)
                    .map(|items| items.iter().filter_map(value_to_text).collect())
                    .unwrap_or_default(),
            })
        })
        .collect()
}

/// Derive a display label: underscores become spaces and each word starts
/// with a capital letter. The rest of each word is left as written.
pub fn metric_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut at_word_start = true;

    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if at_word_start && ch.is_alphanumeric() {
            label.extend(ch.to_uppercase());
        } else {
            label.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }

    label
}

fn misclassified_run(item: &JsonValue) -> MisclassifiedRun {
    match item.as_object() {
        Some(run) => MisclassifiedRun {
            run_id: run.get("run_id").and_then(value_to_text),
            claimed: run.get("claimed").and_then(value_to_text),
            actual: run.get("actual").and_then(value_to_text),
            reasoning: run.get("reasoning").and_then(value_to_text),
        },
        // Not the documented shape; keep the text so nothing is silently lost
        None => MisclassifiedRun {
            reasoning: value_to_text(item),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CanonicalScore, Verdict};
    use serde_json::json;

    fn document(value: JsonValue) -> Document {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_label_derivation() {
        assert_eq!(metric_label("tool_selection"), "Tool Selection");
        assert_eq!(metric_label("categorization_accuracy"), "Categorization Accuracy");
        assert_eq!(metric_label("naturalness"), "Naturalness");
        assert_eq!(metric_label("state_change_SQL"), "State Change SQL");
        assert_eq!(metric_label("pass_at_10"), "Pass At 10");
        assert_eq!(metric_label("multi-step_flow"), "Multi-Step Flow");
    }

    #[test]
    fn test_reserved_and_non_metric_keys_skipped() {
        let doc = document(json!({
            "overall_score": 4,
            "overall_pass": true,
            "summary": "ok",
            "flags": [],
            "notes": "free text",
            "tags": [{"score": 1}],
            "extra": {"reasoning": "no score field"},
            "naturalness": {"score": 5}
        }));

        let metrics = build_metric_table(&doc);
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].key, "naturalness");
        assert_eq!(metrics[0].score, CanonicalScore::Numeric(5.0));
    }

    #[test]
    fn test_order_follows_payload() {
        let doc: Document = serde_json::from_str(
            r#"{"tool_selection": {"score": 4}, "parameter_accuracy": {"score": "FAIL"}, "logical_dependency": {"score": 3}}"#,
        )
        .unwrap();

        let keys: Vec<_> = build_metric_table(&doc).into_iter().map(|m| m.key).collect();
        assert_eq!(keys, vec!["tool_selection", "parameter_accuracy", "logical_dependency"]);
    }

    #[test]
    fn test_detail_lists() {
        let doc = document(json!({
            "categorization_accuracy": {
                "score": "FAIL",
                "reasoning": "Two runs mislabeled",
                "misclassified_runs": [
                    {"run_id": 3, "claimed": "wrong_parameter", "actual": "wrong_tool", "reasoning": "called refund_order"},
                    {"run_id": "7", "claimed": "asking_confirmation"},
                    "run 9 also looks wrong"
                ],
                "fake_passes_detected": ["run 4", 5]
            }
        }));

        let metric = &build_metric_table(&doc)[0];
        assert_eq!(metric.score, CanonicalScore::Verdict(Verdict::Fail));
        assert_eq!(metric.reasoning.as_deref(), Some("Two runs mislabeled"));
        assert_eq!(metric.misclassified_runs.len(), 3);

        let first = &metric.misclassified_runs[0];
        assert_eq!(first.run_id.as_deref(), Some("3"));
        assert_eq!(first.actual.as_deref(), Some("wrong_tool"));

        let second = &metric.misclassified_runs[1];
        assert_eq!(second.actual, None);

        let third = &metric.misclassified_runs[2];
        assert_eq!(third.run_id, None);
        assert_eq!(third.reasoning.as_deref(), Some("run 9 also looks wrong"));

        assert_eq!(metric.fake_passes_detected, vec!["run 4", "5"]);
    }

    #[test]
    fn test_null_score_is_still_a_metric() {
        let doc = document(json!({"robustness": {"score": null}}));
        let metrics = build_metric_table(&doc);
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].score, CanonicalScore::Unknown);
    }
}
