//! Newest-first listing of stored reviews.

use serde::{Deserialize, Serialize};

use super::record::TaskRecord;

/// One row of the review history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Position in the stored results array
    pub index: usize,
    pub task_id: String,
    pub reviewed_at: String,
    pub flags_count: usize,
}

impl HistoryEntry {
    fn from_record(record: &TaskRecord) -> Self {
        Self {
            index: record.position,
            task_id: record
                .task_id
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            reviewed_at: record.reviewed_at.clone().unwrap_or_default(),
            flags_count: record.detected_flags.len(),
        }
    }
}

/// History rows, most recently stored first.
///
/// `index` always addresses the stored array, so it can be passed back
/// to [`entry`] or used to select a record for review.
pub fn history(records: &[TaskRecord]) -> Vec<HistoryEntry> {
    records.iter().rev().map(HistoryEntry::from_record).collect()
}

/// The record stored at `index`, if it was loaded.
pub fn entry(records: &[TaskRecord], index: usize) -> Option<&TaskRecord> {
    records.iter().find(|r| r.position == index)
}
