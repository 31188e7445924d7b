//! Score recovery: single-value normalization and the headline extraction chain.

mod extractor;
mod normalizer;

pub use extractor::{extract_score, score_from_document, ScoreStrategy, SCORE_STRATEGIES};
pub use normalizer::{normalize_score, normalize_score_str};
