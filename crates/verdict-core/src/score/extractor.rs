//! Headline score extraction.
//!
//! Recovery is an ordered chain of pure strategies. Each strategy either
//! produces a score or yields `None`; the first `Some` wins and later
//! strategies never run. Exhausting the chain yields `Unknown`.
//!
//! | Order | Strategy | Looks for |
//! |-------|----------|-----------|
//! | 1 | `fenced_json` | `overall_score` / `score` in a ```` ```json ```` block |
//! | 2 | `whole_document` | `overall_score` / `score` in the input parsed as JSON |
//! | 3 | `verdict_literal` | `"overall_score": "pass"` / `"fail"` text |
//! | 4 | `score_field`, `score_phrase` | `"score": 4` then `score: 4` |
//!
//! The field pattern runs before the prose pattern for compatibility with
//! stored results; there is no deeper precedence rule between them.

use serde_json::Value as JsonValue;
use tracing::trace;

use crate::patterns::{
    self, OVERALL_FAIL_LITERALS, OVERALL_PASS_LITERALS, SCORE_FIELD_PATTERN,
    SCORE_PHRASE_PATTERN,
};
use crate::types::{CanonicalScore, RawEvaluationOutput, Verdict};

use super::normalizer::normalize_score;

/// A single recovery strategy.
pub type ScoreStrategy = fn(&RawEvaluationOutput) -> Option<CanonicalScore>;

/// The recovery chain, in precedence order.
pub const SCORE_STRATEGIES: [(&str, ScoreStrategy); 5] = [
    ("fenced_json", from_fenced_json),
    ("whole_document", from_whole_document),
    ("verdict_literal", from_verdict_literal),
    ("score_field", from_score_field),
    ("score_phrase", from_score_phrase),
];

/// Extract the headline score from raw evaluator output.
///
/// Never fails: when nothing recognizable is present the result is
/// [`CanonicalScore::Unknown`].
pub fn extract_score(raw: &RawEvaluationOutput) -> CanonicalScore {
    if raw.is_absent() {
        return CanonicalScore::Unknown;
    }

    for (name, strategy) in SCORE_STRATEGIES.iter() {
        if let Some(score) = strategy(raw) {
            trace!(strategy = name, ?score, "headline score recovered");
            return score;
        }
    }

    trace!("no score found in evaluator output");
    CanonicalScore::Unknown
}

/// Look up `overall_score`, then `score`, on a decoded document.
///
/// A key holding `null` counts as missing.
pub fn score_from_document(document: &JsonValue) -> Option<CanonicalScore> {
    let object = document.as_object()?;

    ["overall_score", "score"]
        .iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
        .map(|value| normalize_score(Some(value)))
}

fn from_fenced_json(raw: &RawEvaluationOutput) -> Option<CanonicalScore> {
    let RawEvaluationOutput::Text(text) = raw else {
        return None;
    };
    let body = patterns::fenced_json(text)?;
    let document: JsonValue = serde_json::from_str(body).ok()?;
    score_from_document(&document)
}

fn from_whole_document(raw: &RawEvaluationOutput) -> Option<CanonicalScore> {
    match raw {
        RawEvaluationOutput::Text(text) => {
            let document: JsonValue = serde_json::from_str(text.trim()).ok()?;
            score_from_document(&document)
        }
        RawEvaluationOutput::Structured(document) => score_from_document(document),
        RawEvaluationOutput::Absent => None,
    }
}

fn from_verdict_literal(raw: &RawEvaluationOutput) -> Option<CanonicalScore> {
    let text = raw.as_text().to_lowercase();

    if OVERALL_PASS_LITERALS.iter().any(|lit| text.contains(lit)) {
        return Some(CanonicalScore::Verdict(Verdict::Pass));
    }
    if OVERALL_FAIL_LITERALS.iter().any(|lit| text.contains(lit)) {
        return Some(CanonicalScore::Verdict(Verdict::Fail));
    }
    None
}

fn from_score_field(raw: &RawEvaluationOutput) -> Option<CanonicalScore> {
    patterns::first_number(&SCORE_FIELD_PATTERN, &raw.as_text()).map(CanonicalScore::Numeric)
}

fn from_score_phrase(raw: &RawEvaluationOutput) -> Option<CanonicalScore> {
    patterns::first_number(&SCORE_PHRASE_PATTERN, &raw.as_text()).map(CanonicalScore::Numeric)
}
