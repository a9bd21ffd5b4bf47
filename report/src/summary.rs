use crate::model::ConflictOverviewRow;
use serde::Serialize;
use std::collections::HashMap;

pub const CONFLICT_LEVELS: std::ops::RangeInclusive<i64> = 1..=5;

/// Conflicts between one submitter and a single other submitter.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct SubmitterSummary {
    pub submitter_id: i64,
    pub name: String,
    /// Counts for conflict levels 1 through 5.
    pub levels: [u64; 5],
    pub total: u64,
}

impl SubmitterSummary {
    pub fn level(&self, conflict_level: i64) -> u64 {
        level_index(conflict_level)
            .map(|index| self.levels[index])
            .unwrap_or(0)
    }
}

fn level_index(conflict_level: i64) -> Option<usize> {
    CONFLICT_LEVELS
        .contains(&conflict_level)
        .then(|| (conflict_level - 1) as usize)
}

/// Groups overview rows by second submitter, in order of first appearance.
///
/// Rows without a second submitter are skipped.
pub fn summarize_by_submitter(rows: &[ConflictOverviewRow]) -> Vec<SubmitterSummary> {
    let mut summaries: Vec<SubmitterSummary> = Vec::new();
    let mut positions: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let Some(submitter_id) = row.submitter2_id else {
            continue;
        };
        let position = *positions.entry(submitter_id).or_insert_with(|| {
            summaries.push(SubmitterSummary {
                submitter_id,
                name: row
                    .submitter2_name
                    .clone()
                    .unwrap_or_else(|| submitter_id.to_string()),
                ..Default::default()
            });
            summaries.len() - 1
        });
        let summary = &mut summaries[position];
        if let Some(index) = row.conflict_level.and_then(level_index) {
            summary.levels[index] += row.count;
        }
        summary.total += row.count;
    }

    summaries
}
