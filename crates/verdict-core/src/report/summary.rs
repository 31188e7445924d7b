//! Aggregate statistics over a batch of task reviews.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::dimensions::Dimension;
use crate::types::{CanonicalScore, Verdict};

use super::record::parse_timestamp;
use super::review::TaskReview;

/// Score distribution for one dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionSummary {
    pub dimension: Option<Dimension>,

    /// Reviews considered
    pub total: usize,

    pub numeric_count: usize,

    /// Mean of numeric scores, unclamped
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,

    pub pass_count: usize,
    pub fail_count: usize,
    pub unknown_count: usize,

    #[serde(skip)]
    sum: f64,
}

impl DimensionSummary {
    fn record(&mut self, score: CanonicalScore) {
        self.total += 1;
        match score {
            CanonicalScore::Numeric(v) => {
                self.numeric_count += 1;
                self.min = Some(self.min.map_or(v, |m| m.min(v)));
                self.max = Some(self.max.map_or(v, |m| m.max(v)));
                self.sum += v;
            }
            CanonicalScore::Verdict(Verdict::Pass) => self.pass_count += 1,
            CanonicalScore::Verdict(Verdict::Fail) => self.fail_count += 1,
            CanonicalScore::Unknown => self.unknown_count += 1,
        }
    }

    fn finish(mut self) -> Self {
        if self.numeric_count > 0 {
            self.mean = Some(self.sum / self.numeric_count as f64);
        }
        self
    }
}

/// Summary of a results file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub task_count: usize,

    /// Per-dimension distributions, in catalogue order
    pub dimensions: Vec<DimensionSummary>,

    /// Occurrences of each detected flag type
    pub flag_counts: BTreeMap<String, usize>,

    pub earliest_review: Option<NaiveDateTime>,
    pub latest_review: Option<NaiveDateTime>,
}

impl ReviewSummary {
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionSummary> {
        self.dimensions
            .iter()
            .find(|d| d.dimension == Some(dimension))
    }
}

/// Summarize a batch of reviews.
pub fn summarize(reviews: &[TaskReview]) -> ReviewSummary {
    let mut dimensions: Vec<DimensionSummary> = Dimension::ALL
        .iter()
        .map(|&d| DimensionSummary {
            dimension: Some(d),
            ..Default::default()
        })
        .collect();
    let mut flag_counts = BTreeMap::new();
    let mut earliest: Option<NaiveDateTime> = None;
    let mut latest: Option<NaiveDateTime> = None;

    for review in reviews {
        for (summary, &dimension) in dimensions.iter_mut().zip(Dimension::ALL.iter()) {
            summary.record(review.headline(dimension));
        }

        for flag in &review.detected_flags {
            *flag_counts.entry(flag.flag_type.clone()).or_insert(0) += 1;
        }

        if let Some(at) = review.reviewed_at.as_deref().and_then(parse_timestamp) {
            earliest = Some(earliest.map_or(at, |e| e.min(at)));
            latest = Some(latest.map_or(at, |l| l.max(at)));
        }
    }

    ReviewSummary {
        task_count: reviews.len(),
        dimensions: dimensions.into_iter().map(DimensionSummary::finish).collect(),
        flag_counts,
        earliest_review: earliest,
        latest_review: latest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{parse_records, review_all};

    fn summary() -> ReviewSummary {
        let records = parse_records(
            r#"[
                {
                    "task_id": "a",
                    "reviewed_at": "2026-01-22T10:00:00",
                    "Prompt Quality": "{\"overall_score\": 2}",
                    "Manual Tool Execution (Happy Path)": "{\"overall_score\": \"PASS\"}",
                    "detected_flags": [{"flag_type": "magic_id"}, {"flag_type": "fake_pass"}]
                },
                {
                    "task_id": "b",
                    "reviewed_at": "2026-01-20T09:30:00.500",
                    "Prompt Quality": "{\"overall_score\": 7}",
                    "Manual Tool Execution (Happy Path)": "{\"overall_score\": \"fail\"}",
                    "detected_flags": [{"flag_type": "magic_id"}]
                },
                {"task_id": "c", "reviewed_at": "not a date"}
            ]"#,
        )
        .unwrap();
        summarize(&review_all(&records))
    }

    #[test]
    fn test_numeric_distribution_is_unclamped() {
        let summary = summary();
        let prompt = summary.dimension(Dimension::PromptQuality).unwrap();

        assert_eq!(prompt.total, 3);
        assert_eq!(prompt.numeric_count, 2);
        assert_eq!(prompt.mean, Some(4.5));
        assert_eq!(prompt.min, Some(2.0));
        assert_eq!(prompt.max, Some(7.0));
        assert_eq!(prompt.unknown_count, 1);
    }

    #[test]
    fn test_verdict_counts() {
        let summary = summary();
        let happy = summary.dimension(Dimension::HappyPath).unwrap();

        assert_eq!(happy.pass_count, 1);
        assert_eq!(happy.fail_count, 1);
        assert_eq!(happy.unknown_count, 1);
        assert_eq!(happy.mean, None);
    }

    #[test]
    fn test_flags_and_time_range() {
        let summary = summary();

        assert_eq!(summary.task_count, 3);
        assert_eq!(summary.flag_counts.get("magic_id"), Some(&2));
        assert_eq!(summary.flag_counts.get("fake_pass"), Some(&1));
        assert_eq!(
            summary.earliest_review.map(|t| t.to_string()),
            Some("2026-01-20 09:30:00.500".to_string())
        );
        assert_eq!(
            summary.latest_review.map(|t| t.to_string()),
            Some("2026-01-22 10:00:00".to_string())
        );
    }

    #[test]
    fn test_empty_batch() {
        let summary = summarize(&[]);
        assert_eq!(summary.task_count, 0);
        assert_eq!(summary.dimensions.len(), Dimension::ALL.len());
        assert!(summary.dimensions.iter().all(|d| d.mean.is_none()));
        assert!(summary.earliest_review.is_none());
    }
}
