//! Constant lookup tables: quality dimensions, reserved payload keys and
//! the flag catalogue.
//!
//! These tables are read-only. Dimension order is the display and export
//! order everywhere in the workspace.

use serde::{Deserialize, Serialize};

/// Top-level payload keys that are never treated as metrics.
pub const RESERVED_KEYS: [&str; 4] = ["overall_score", "overall_pass", "summary", "flags"];

/// Whether a payload key belongs to the reserved top-level set.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// A quality dimension scored by the upstream evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    PromptQuality,
    #[serde(rename = "happy_path_execution")]
    HappyPath,
    SqlVerifierQuality,
    #[serde(rename = "model_benchmarking")]
    ModelBenchmarking,
}

impl Dimension {
    /// All dimensions in display order.
    pub const ALL: [Dimension; 4] = [
        Dimension::PromptQuality,
        Dimension::HappyPath,
        Dimension::SqlVerifierQuality,
        Dimension::ModelBenchmarking,
    ];

    /// Stable machine key.
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::PromptQuality => "prompt_quality",
            Dimension::HappyPath => "happy_path_execution",
            Dimension::SqlVerifierQuality => "sql_verifier_quality",
            Dimension::ModelBenchmarking => "model_benchmarking",
        }
    }

    /// Full display name. Stored records are keyed by this name.
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::PromptQuality => "Prompt Quality",
            Dimension::HappyPath => "Manual Tool Execution (Happy Path)",
            Dimension::SqlVerifierQuality => "SQL Verifier Quality",
            Dimension::ModelBenchmarking => "Model Benchmarking Analysis",
        }
    }

    /// Short alias for compact displays. Never used for parsing payloads.
    pub fn alias(&self) -> &'static str {
        match self {
            Dimension::PromptQuality => "Prompt",
            Dimension::HappyPath => "Happy Path",
            Dimension::SqlVerifierQuality => "SQL Verifier",
            Dimension::ModelBenchmarking => "Benchmarking",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Dimension::PromptQuality => {
                "Evaluates if the Trainer created a realistic, solvable prompt grounded in the specific environment"
            }
            Dimension::HappyPath => {
                "Evaluates the Gold Standard execution performed by the Trainer - the Imitation Learning target"
            }
            Dimension::SqlVerifierQuality => {
                "Evaluates the SQL queries written to validate the model's performance"
            }
            Dimension::ModelBenchmarking => {
                "Evaluates the analysis of model runs (Pass@10) to ensure accurate labeling of model failures"
            }
        }
    }

    /// Rubric sub-checks the evaluator scores within this dimension.
    pub fn sub_checks(&self) -> &'static [&'static str] {
        match self {
            Dimension::PromptQuality => &["Naturalness", "Environment Grounding", "Complexity"],
            Dimension::HappyPath => &[
                "Tool Selection",
                "Parameter Accuracy",
                "Logical Dependency",
                "State Change",
            ],
            Dimension::SqlVerifierQuality => &["Target Accuracy", "State Validation", "Robustness"],
            Dimension::ModelBenchmarking => &["Categorization Accuracy", "Comment Quality"],
        }
    }

    /// Find a dimension by key, name or alias (case-insensitive).
    pub fn lookup(query: &str) -> Option<Dimension> {
        let query = query.trim();
        Self::ALL.into_iter().find(|d| {
            d.key().eq_ignore_ascii_case(query)
                || d.name().eq_ignore_ascii_case(query)
                || d.alias().eq_ignore_ascii_case(query)
        })
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Catalogue entry for a known flag type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagInfo {
    pub flag_type: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Known flag types raised by the rubric.
pub const FLAG_CATALOG: [FlagInfo; 6] = [
    FlagInfo {
        flag_type: "magic_id",
        name: "Magic ID",
        description: "Trainer uses an ID that was never output by a previous tool in the trace",
    },
    FlagInfo {
        flag_type: "fake_pass",
        name: "Fake Pass (False Positive)",
        description: "Model claimed success but never called the required tool",
    },
    FlagInfo {
        flag_type: "lazy_verification",
        name: "Lazy Verification",
        description: "Wrong tool mislabeled as wrong parameter",
    },
    FlagInfo {
        flag_type: "safety_mislabel",
        name: "Safety Trigger Mislabel",
        description: "Refusal mislabeled as asking for confirmation",
    },
    FlagInfo {
        flag_type: "redundant_calls",
        name: "Redundant Tool Calls",
        description: "Trainer calls the same tool multiple times unnecessarily",
    },
    FlagInfo {
        flag_type: "api_param_in_prompt",
        name: "API Parameter in Prompt",
        description: "Prompt includes API parameter names (e.g., 'Set is_private to true')",
    },
];

/// Look up a flag type in the catalogue.
pub fn flag_info(flag_type: &str) -> Option<&'static FlagInfo> {
    FLAG_CATALOG.iter().find(|f| f.flag_type == flag_type)
}
