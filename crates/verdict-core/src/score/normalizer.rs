//! Coercion of a single loosely-typed score value.

use serde_json::Value as JsonValue;

use crate::types::{CanonicalScore, Verdict};

/// Normalize one raw score value.
///
/// | Input | Result |
/// |-------|--------|
/// | absent / `null` | `Unknown` |
/// | number | `Numeric`, unclamped |
/// | `"pass"` / `"fail"` (any case) | `Verdict` |
/// | numeric string | `Numeric` |
/// | anything else | `Unknown` |
pub fn normalize_score(value: Option<&JsonValue>) -> CanonicalScore {
    match value {
        None | Some(JsonValue::Null) => CanonicalScore::Unknown,
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .map(CanonicalScore::Numeric)
            .unwrap_or(CanonicalScore::Unknown),
        Some(JsonValue::String(s)) => normalize_score_str(s),
        Some(_) => CanonicalScore::Unknown,
    }
}

/// Normalize a score given as text.
pub fn normalize_score_str(raw: &str) -> CanonicalScore {
    if raw.eq_ignore_ascii_case("pass") {
        return CanonicalScore::Verdict(Verdict::Pass);
    }
    if raw.eq_ignore_ascii_case("fail") {
        return CanonicalScore::Verdict(Verdict::Fail);
    }

    // "NaN" and "inf" parse as f64 but are not scores
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => CanonicalScore::Numeric(v),
        _ => CanonicalScore::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_and_null() {
        assert_eq!(normalize_score(None), CanonicalScore::Unknown);
        assert_eq!(normalize_score(Some(&JsonValue::Null)), CanonicalScore::Unknown);
    }

    #[test]
    fn test_numbers_are_not_clamped() {
        assert_eq!(normalize_score(Some(&json!(4.2))), CanonicalScore::Numeric(4.2));
        assert_eq!(normalize_score(Some(&json!(7))), CanonicalScore::Numeric(7.0));
        assert_eq!(normalize_score(Some(&json!(-3))), CanonicalScore::Numeric(-3.0));
    }

    #[test]
    fn test_verdict_strings_any_case() {
        for s in ["pass", "PASS", "Pass", "pAsS"] {
            assert_eq!(
                normalize_score(Some(&json!(s))),
                CanonicalScore::Verdict(Verdict::Pass)
            );
        }
        assert_eq!(
            normalize_score(Some(&json!("FAIL"))),
            CanonicalScore::Verdict(Verdict::Fail)
        );
    }

    #[test]
    fn test_verdict_match_is_exact() {
        assert_eq!(normalize_score(Some(&json!("passed"))), CanonicalScore::Unknown);
        assert_eq!(normalize_score(Some(&json!("PASS!"))), CanonicalScore::Unknown);
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(normalize_score(Some(&json!("3.5"))), CanonicalScore::Numeric(3.5));
        assert_eq!(normalize_score(Some(&json!(" 2 "))), CanonicalScore::Numeric(2.0));
    }

    #[test]
    fn test_malformed_strings_degrade_to_unknown() {
        for s in ["", "excellent", "4/5", "NaN", "inf", "N/A"] {
            assert_eq!(normalize_score(Some(&json!(s))), CanonicalScore::Unknown, "{s}");
        }
    }

    #[test]
    fn test_other_types_are_unknown() {
        assert_eq!(normalize_score(Some(&json!(true))), CanonicalScore::Unknown);
        assert_eq!(normalize_score(Some(&json!([4]))), CanonicalScore::Unknown);
        assert_eq!(normalize_score(Some(&json!({"score": 4}))), CanonicalScore::Unknown);
    }
}
