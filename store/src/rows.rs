use serde::Serialize;

/// A pair of disagreeing submissions on one variant.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct VariantConflict {
    pub variant_id: i64,
    pub variant_name: String,
    pub submitter1_id: i64,
    pub submitter1_name: String,
    pub rcv1: String,
    pub significance1: String,
    pub submitter2_id: i64,
    pub submitter2_name: String,
    pub rcv2: String,
    pub significance2: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Submission {
    pub submitter_id: i64,
    pub submitter_name: String,
    pub rcv: String,
    pub significance: String,
    pub last_eval: String,
    pub review_status: String,
    pub star_level: i64,
    pub method: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SubmitterCount {
    pub submitter_id: i64,
    pub submitter_name: String,
    pub count: u64,
}

/// Count keyed by a free-text label such as a gene or a country.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct VariantCount {
    pub variant_id: i64,
    pub variant_name: String,
    pub count: u64,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DateCount {
    pub date: String,
    pub count: u64,
}

/// Count for one series (for example a collection method) in one release.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DatedCount {
    pub date: String,
    pub series: String,
    pub count: u64,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SignificanceTermInfo {
    pub significance: String,
    pub first_seen: String,
    pub last_seen: String,
}
