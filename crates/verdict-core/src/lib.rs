//! # verdict-core
//!
//! Deterministic score recovery for LLM evaluator output.
//!
//! Evaluators are asked to answer with a JSON document, but what comes back
//! is often wrapped in prose, fenced in markdown, truncated, or loosely
//! typed. This crate answers, for each quality dimension of a task:
//! - What is the headline score?
//! - What structured detail can be recovered?
//! - How should it be shown?
//!
//! ## Key Guarantees
//!
//! 1. **Total**: Parsing never fails; unrecognizable input yields `Unknown` or no decode
//! 2. **Deterministic**: Same input always produces same output
//! 3. **Unclamped**: Scores keep their true value; only display colors clamp
//! 4. **Ordered**: Recovery strategies run in a fixed order, first success wins
//!
//! ## Example
//!
//! ```rust,ignore
//! use verdict_core::{evaluate_output, RawEvaluationOutput};
//!
//! let raw = RawEvaluationOutput::text("```json\n{\"overall_score\": 4.2}\n```");
//! let verdict = evaluate_output(&raw);
//!
//! println!("{} ({:?})", verdict.presentation.label, verdict.presentation.bucket);
//! if let Some(parsed) = verdict.parsed {
//!     for metric in parsed.metrics {
//!         println!("{}: {}", metric.label, metric.score);
//!     }
//! }
//! ```

pub mod decode;
pub mod dimensions;
pub mod patterns;
pub mod presentation;
pub mod report;
pub mod score;
pub mod types;

// Re-export main types at crate root
pub use decode::{metric_label, parse_evaluation};
pub use dimensions::{flag_info, Dimension, FlagInfo, FLAG_CATALOG, RESERVED_KEYS};
pub use presentation::{gradient_color, one_decimal, present_score, Bucket, HslColor, Presentation};
pub use report::{
    load_records, parse_records, review_task, summarize, DimensionReview, HistoryEntry,
    ReportError, ReviewSummary, TaskRecord, TaskReview,
};
pub use score::{extract_score, normalize_score};
pub use types::{
    CanonicalScore, DetectedFlag, FlagDetails, MetricResult, MisclassifiedRun, ParsedEvaluation,
    RawEvaluationOutput, Verdict,
};

use serde::{Deserialize, Serialize};

/// Everything recovered from one raw evaluator output.
///
/// The headline score and the structured decode are recovered
/// independently, so a blob with no decodable document can still carry a
/// headline score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputVerdict {
    pub headline: CanonicalScore,
    pub presentation: Presentation,
    pub parsed: Option<ParsedEvaluation>,
}

/// Recover the headline score, its presentation and the structured decode.
///
/// This is the main entry point for scoring a single evaluator output.
pub fn evaluate_output(raw: &RawEvaluationOutput) -> OutputVerdict {
    let headline = extract_score(raw);

    OutputVerdict {
        headline,
        presentation: present_score(&headline),
        parsed: parse_evaluation(raw),
    }
}
