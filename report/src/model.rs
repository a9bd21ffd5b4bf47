use serde::Deserialize;
use serde::Serialize;

/// One grouped row of the conflict overview query.
///
/// The submitter and conflict level columns are only populated when the
/// overview is scoped to a first submitter.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConflictOverviewRow {
    pub clin_sig1: String,
    pub clin_sig2: String,
    pub submitter2_id: Option<i64>,
    pub submitter2_name: Option<String>,
    pub conflict_level: Option<i64>,
    pub count: u64,
}

impl ConflictOverviewRow {
    pub fn new(clin_sig1: impl Into<String>, clin_sig2: impl Into<String>, count: u64) -> Self {
        Self {
            clin_sig1: clin_sig1.into(),
            clin_sig2: clin_sig2.into(),
            count,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitterInfo {
    pub id: i64,
    pub name: String,
}

impl SubmitterInfo {
    /// Placeholder for the "everyone else" column of a one-submitter report.
    pub fn all_others() -> Self {
        Self {
            id: 0,
            name: "All other submitters".to_string(),
        }
    }

    /// Resolves the first submitter of a drill-down, falling back to the bare id.
    pub fn first_or_id(id: i64, found: Option<SubmitterInfo>) -> Self {
        found.unwrap_or_else(|| Self {
            id,
            name: id.to_string(),
        })
    }

    /// Resolves the second submitter; id 0 stands for any other submitter.
    pub fn second_or_id(id: i64, found: Option<SubmitterInfo>) -> Self {
        match found {
            Some(info) => info,
            None if id == 0 => Self {
                id: 0,
                name: "any other submitter".to_string(),
            },
            None => Self::first_or_id(id, None),
        }
    }
}
