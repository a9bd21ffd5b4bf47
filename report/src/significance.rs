use std::cmp::Ordering;

/// Clinical significance terms from most to least severe.
pub const SIGNIFICANCE_RANKS: [&str; 12] = [
    "pathogenic",
    "likely pathogenic",
    "uncertain significance",
    "likely benign",
    "benign",
    "risk allele",
    "association",
    "protective allele",
    "drug response",
    "confers sensitivity",
    "other",
    "not provided",
];

/// Rank shared by every term missing from [`SIGNIFICANCE_RANKS`]: after
/// "confers sensitivity", before "other" and "not provided".
pub const UNRANKED: f64 = SIGNIFICANCE_RANKS.len() as f64 - 2.5;

/// Sort key of a significance label. Matching is exact and case-sensitive.
pub fn significance_rank(significance: &str) -> f64 {
    SIGNIFICANCE_RANKS
        .iter()
        .position(|term| *term == significance)
        .map(|index| index as f64)
        .unwrap_or(UNRANKED)
}

/// Orders by rank, then alphabetically so unranked terms stay deterministic.
pub fn compare_significance(a: &str, b: &str) -> Ordering {
    significance_rank(a)
        .total_cmp(&significance_rank(b))
        .then_with(|| a.cmp(b))
}

pub fn sort_significances(significances: &mut [String]) {
    significances.sort_by(|a, b| compare_significance(a, b));
}
