//! Core types shared by every decoding stage.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Raw evaluator output for one quality dimension.
///
/// The upstream evaluator usually hands back a string, but stored records
/// occasionally carry the payload as an already-decoded JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<JsonValue>", into = "Option<JsonValue>")]
pub enum RawEvaluationOutput {
    /// Free-form text, possibly containing a fenced or bare JSON document
    Text(String),

    /// An already-structured JSON value
    Structured(JsonValue),

    /// No output was recorded
    Absent,
}

impl RawEvaluationOutput {
    /// Create a text output.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Whether there is nothing to decode.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The output as text, serializing structured values compactly.
    ///
    /// Text-level fallbacks operate on this rendering.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Structured(value) => Cow::Owned(value.to_string()),
            Self::Absent => Cow::Borrowed(""),
        }
    }
}

impl Default for RawEvaluationOutput {
    fn default() -> Self {
        Self::Absent
    }
}

impl From<&str> for RawEvaluationOutput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawEvaluationOutput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<JsonValue> for RawEvaluationOutput {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Absent,
            JsonValue::String(s) => Self::Text(s),
            other => Self::Structured(other),
        }
    }
}

impl From<Option<JsonValue>> for RawEvaluationOutput {
    fn from(value: Option<JsonValue>) -> Self {
        value.map(Self::from).unwrap_or(Self::Absent)
    }
}

impl From<RawEvaluationOutput> for Option<JsonValue> {
    fn from(raw: RawEvaluationOutput) -> Self {
        match raw {
            RawEvaluationOutput::Text(s) => Some(JsonValue::String(s)),
            RawEvaluationOutput::Structured(value) => Some(value),
            RawEvaluationOutput::Absent => None,
        }
    }
}

/// A pass/fail verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The normalized result of decoding a score field.
///
/// `Numeric` values are never clamped; display clamping happens in
/// [`crate::presentation`] only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CanonicalScore {
    Numeric(f64),
    Verdict(Verdict),
    Unknown,
}

impl CanonicalScore {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The numeric value, if this is a numeric score.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// The verdict, if this is a pass/fail score.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Self::Verdict(v) => Some(*v),
            _ => None,
        }
    }
}

impl Default for CanonicalScore {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Export rendering: unclamped numbers, `PASS`/`FAIL`, or `N/A`.
impl fmt::Display for CanonicalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers keep one decimal so 7 exports as "7.0"
            Self::Numeric(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{:.1}", v),
            Self::Numeric(v) => write!(f, "{}", v),
            Self::Verdict(v) => write!(f, "{}", v),
            Self::Unknown => f.write_str("N/A"),
        }
    }
}

/// The structured decode of one evaluator payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEvaluation {
    /// Normalized `overall_score`
    pub overall_score: CanonicalScore,

    /// `overall_pass`, only when the payload carried a literal boolean
    pub overall_pass: Option<bool>,

    /// Free-text summary
    pub summary: Option<String>,

    /// Flags raised by the evaluator, in payload order
    #[serde(default)]
    pub flags: Vec<String>,

    /// Per-metric breakdown, in payload key order
    #[serde(default)]
    pub metrics: Vec<MetricResult>,
}

/// One named sub-score within a [`ParsedEvaluation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// Raw field name from the payload (e.g., "tool_selection")
    pub key: String,

    /// Human-readable label (e.g., "Tool Selection")
    pub label: String,

    pub score: CanonicalScore,

    pub reasoning: Option<String>,

    #[serde(default)]
    pub misclassified_runs: Vec<MisclassifiedRun>,

    #[serde(default)]
    pub fake_passes_detected: Vec<String>,
}

/// A model run whose failure category the evaluator disputes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisclassifiedRun {
    pub run_id: Option<String>,

    /// Category the trainer assigned
    pub claimed: Option<String>,

    /// Category the evaluator believes is correct
    pub actual: Option<String>,

    pub reasoning: Option<String>,
}

/// A flag raised against a task before or during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedFlag {
    /// Flag identifier (e.g., "magic_id")
    pub flag_type: String,

    #[serde(default)]
    pub details: FlagDetails,
}

/// Supporting detail for a [`DetectedFlag`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagDetails {
    Text(String),
    List(Vec<String>),
    Other(JsonValue),
}

impl Default for FlagDetails {
    fn default() -> Self {
        Self::Other(JsonValue::Null)
    }
}

impl FlagDetails {
    /// Detail lines for display.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Text(s) => vec![s.clone()],
            Self::List(items) => items.clone(),
            Self::Other(JsonValue::Null) => Vec::new(),
            Self::Other(value) => vec![value.to_string()],
        }
    }
}
