//! Shared text patterns for locating scores in evaluator output.
//!
//! Both the score extractor and the structured parser look for the same
//! fenced JSON block, so the pattern lives here once.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A markdown fence tagged `json`. Captures the fence body.
    pub static ref JSON_FENCE_PATTERN: Regex = Regex::new(
        r"(?s)```json[ \t]*\r?\n?(.*?)```"
    ).unwrap();

    /// A JSON-shaped `"score": <number>` field. Key and number quotes are optional,
    /// so `"overall_score": 4` in a truncated document also matches.
    pub static ref SCORE_FIELD_PATTERN: Regex = Regex::new(
        r#""?score"?\s*:\s*"?(-?\d+(?:\.\d+)?)"#
    ).unwrap();

    /// A prose `score: <number>` mention, any letter case.
    pub static ref SCORE_PHRASE_PATTERN: Regex = Regex::new(
        r"(?i)score\s*:\s*(-?\d+(?:\.\d+)?)"
    ).unwrap();
}

/// Literal spellings of a JSON pass/fail overall score, lowercase.
pub const OVERALL_PASS_LITERALS: [&str; 2] = [r#""overall_score": "pass""#, r#""overall_score":"pass""#];
pub const OVERALL_FAIL_LITERALS: [&str; 2] = [r#""overall_score": "fail""#, r#""overall_score":"fail""#];

/// Body of the first ```` ```json ```` fence, trimmed.
pub fn fenced_json(content: &str) -> Option<&str> {
    JSON_FENCE_PATTERN
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// First number captured by `pattern`, if it parses to a finite value.
///
/// Long digit runs overflow to infinity and are treated as no match.
pub fn first_number(pattern: &Regex, content: &str) -> Option<f64> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_detection() {
        let text = "Here you go:\n```json\n{\"overall_score\": 4}\n```\nThanks";
        assert_eq!(fenced_json(text), Some("{\"overall_score\": 4}"));

        let inline = "```json {\"score\": 2}```";
        assert_eq!(fenced_json(inline), Some("{\"score\": 2}"));
    }

    #[test]
    fn test_untagged_fence_is_ignored() {
        assert_eq!(fenced_json("```\n{\"score\": 2}\n```"), None);
        assert_eq!(fenced_json("no fences at all"), None);
    }

    #[test]
    fn test_first_fence_wins() {
        let text = "```json\n{\"a\": 1}\n```\n```json\n{\"b\": 2}\n```";
        assert_eq!(fenced_json(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_score_field_pattern() {
        assert_eq!(first_number(&SCORE_FIELD_PATTERN, r#"{"score": 3.5"#), Some(3.5));
        assert_eq!(first_number(&SCORE_FIELD_PATTERN, r#""score":"4""#), Some(4.0));
        assert_eq!(first_number(&SCORE_FIELD_PATTERN, r#""overall_score": 2"#), Some(2.0));
        assert_eq!(first_number(&SCORE_FIELD_PATTERN, "Score: 3.5"), None);
    }

    #[test]
    fn test_score_phrase_pattern() {
        assert_eq!(first_number(&SCORE_PHRASE_PATTERN, "Score: 3.5 out of 5"), Some(3.5));
        assert_eq!(first_number(&SCORE_PHRASE_PATTERN, "final SCORE : -1"), Some(-1.0));
        assert_eq!(first_number(&SCORE_PHRASE_PATTERN, "score is high"), None);
    }

    #[test]
    fn test_overflowing_number_is_no_match() {
        let digits = "9".repeat(400);
        assert_eq!(first_number(&SCORE_PHRASE_PATTERN, &format!("Score: {}", digits)), None);
        assert_eq!(first_number(&SCORE_FIELD_PATTERN, &format!(r#""score": {}"#, digits)), None);
    }
}
