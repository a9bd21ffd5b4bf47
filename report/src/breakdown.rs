use crate::model::ConflictOverviewRow;
use crate::significance::sort_significances;
use serde::Serialize;
use std::collections::BTreeSet;
use std::collections::HashMap;
use tracing::debug;

/// Significance × significance counts of conflicting submissions.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Breakdown {
    /// `counts[clin_sig1][clin_sig2]`, summed over all matching rows.
    pub counts: HashMap<String, HashMap<String, u64>>,
    /// Distinct first-submitter significances in report order.
    pub significances1: Vec<String>,
    /// Distinct second-submitter significances in report order.
    pub significances2: Vec<String>,
    pub total: u64,
}

impl Breakdown {
    /// Folds `(clin_sig1, clin_sig2, count)` triples into a breakdown.
    pub fn from_counts<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, u64)>,
    {
        let mut counts: HashMap<String, HashMap<String, u64>> = HashMap::new();
        let mut significances1 = BTreeSet::new();
        let mut significances2 = BTreeSet::new();
        let mut total = 0;

        for (clin_sig1, clin_sig2, count) in rows {
            *counts
                .entry(clin_sig1.to_string())
                .or_default()
                .entry(clin_sig2.to_string())
                .or_default() += count;
            significances1.insert(clin_sig1.to_string());
            significances2.insert(clin_sig2.to_string());
            total += count;
        }

        let mut significances1: Vec<String> = significances1.into_iter().collect();
        let mut significances2: Vec<String> = significances2.into_iter().collect();
        sort_significances(&mut significances1);
        sort_significances(&mut significances2);

        debug!(
            "breakdown of {total} conflicts across {}x{} significances",
            significances1.len(),
            significances2.len()
        );

        Self {
            counts,
            significances1,
            significances2,
            total,
        }
    }

    pub fn from_rows(rows: &[ConflictOverviewRow]) -> Self {
        Self::from_counts(
            rows.iter()
                .map(|row| (row.clin_sig1.as_str(), row.clin_sig2.as_str(), row.count)),
        )
    }

    pub fn count(&self, clin_sig1: &str, clin_sig2: &str) -> u64 {
        self.counts
            .get(clin_sig1)
            .and_then(|row| row.get(clin_sig2))
            .copied()
            .unwrap_or(0)
    }

    pub fn row_total(&self, clin_sig1: &str) -> u64 {
        self.counts
            .get(clin_sig1)
            .map(|row| row.values().sum())
            .unwrap_or(0)
    }

    pub fn column_total(&self, clin_sig2: &str) -> u64 {
        self.counts
            .values()
            .filter_map(|row| row.get(clin_sig2))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
