//! Template-ready shapes built from store rows.
//!
//! Templates only loop and print; every URL, label and matrix cell is worked
//! out here.

use crate::format::or_space;
use crate::format::prettify_date;
use crate::format::quote_path;
use crate::format::rcv_link;
use crate::format::submitter_link;
use crate::format::variant_link;
use clinvar_report::Breakdown;
use clinvar_report::FilterSet;
use clinvar_report::SubmitterSummary;
use clinvar_report::TimeSeriesTable;
use clinvar_report::summary::CONFLICT_LEVELS;
use clinvar_store::DateCount;
use clinvar_store::DatedCount;
use clinvar_store::LabelCount;
use clinvar_store::SignificanceTermInfo;
use clinvar_store::Submission;
use clinvar_store::SubmitterCount;
use clinvar_store::VariantConflict;
use clinvar_store::VariantCount;

const MAX_STARS: i64 = 4;

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// The GET form at the top of every filterable report.
pub struct FilterForm {
    pub star_options: Vec<SelectOption>,
    pub method_options: Vec<SelectOption>,
    pub show_corrected_terms: bool,
    pub corrected_terms: bool,
    pub show_conflict_levels: bool,
    pub conflict_level_options: Vec<SelectOption>,
}

impl FilterForm {
    /// Stars, method and the corrected-terms switch.
    pub fn for_significances(filters: &FilterSet, methods: &[String]) -> Self {
        Self {
            show_corrected_terms: true,
            corrected_terms: filters.uses_corrected_terms(),
            ..Self::base(filters, methods)
        }
    }

    /// Stars, method and the minimum conflict level.
    pub fn for_submissions(filters: &FilterSet, methods: &[String]) -> Self {
        let mut conflict_level_options = vec![SelectOption::new(
            "0",
            "any submissions",
            filters.min_conflict_level <= 0,
        )];
        conflict_level_options.extend(CONFLICT_LEVELS.map(|level| {
            SelectOption::new(
                level.to_string(),
                format!("conflict level {level} or higher"),
                filters.min_conflict_level == level,
            )
        }));
        Self {
            show_conflict_levels: true,
            conflict_level_options,
            ..Self::base(filters, methods)
        }
    }

    fn base(filters: &FilterSet, methods: &[String]) -> Self {
        let star_options = (0..=MAX_STARS)
            .map(|stars| {
                let label = match stars {
                    0 => "any review status".to_string(),
                    1 => "1 star or more".to_string(),
                    _ => format!("{stars} stars or more"),
                };
                SelectOption::new(stars.to_string(), label, filters.min_stars == stars)
            })
            .collect();
        let selected_method = filters.method.as_deref();
        let mut method_options = vec![SelectOption::new(
            "",
            "any method",
            selected_method.is_none(),
        )];
        method_options.extend(methods.iter().map(|method| {
            SelectOption::new(
                method.as_str(),
                method.as_str(),
                selected_method == Some(method.as_str()),
            )
        }));
        Self {
            star_options,
            method_options,
            show_corrected_terms: false,
            corrected_terms: false,
            show_conflict_levels: false,
            conflict_level_options: Vec::new(),
        }
    }
}

/// Empty cells have no drill-down link and an empty `href`.
pub struct BreakdownCell {
    pub count: u64,
    pub href: String,
}

pub struct BreakdownRow {
    pub significance: String,
    pub cells: Vec<BreakdownCell>,
    pub total: u64,
}

/// Significance × significance matrix with drill-down links.
pub struct BreakdownTable {
    pub columns: Vec<String>,
    pub rows: Vec<BreakdownRow>,
    pub column_totals: Vec<u64>,
    pub total: u64,
}

impl BreakdownTable {
    /// `base_path` is the page path the two significance segments are
    /// appended to; `query` is carried over to every link.
    pub fn new(breakdown: &Breakdown, base_path: &str, query: &str) -> Self {
        let rows = breakdown
            .significances1
            .iter()
            .map(|significance1| BreakdownRow {
                significance: or_space(significance1),
                cells: breakdown
                    .significances2
                    .iter()
                    .map(|significance2| {
                        let count = breakdown.count(significance1, significance2);
                        let href = if count > 0 {
                            format!(
                                "{base_path}/{}/{}{query}",
                                quote_path(significance1),
                                quote_path(significance2)
                            )
                        } else {
                            String::new()
                        };
                        BreakdownCell { count, href }
                    })
                    .collect(),
                total: breakdown.row_total(significance1),
            })
            .collect();
        Self {
            columns: breakdown
                .significances2
                .iter()
                .map(|significance| or_space(significance))
                .collect(),
            rows,
            column_totals: breakdown
                .significances2
                .iter()
                .map(|significance2| breakdown.column_total(significance2))
                .collect(),
            total: breakdown.total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// One second-submitter line of the per-submitter summary.
pub struct SummaryRow {
    pub href: String,
    pub name: String,
    pub levels: Vec<u64>,
    pub total: u64,
}

impl SummaryRow {
    pub fn build(
        submitter1_id: i64,
        summaries: &[SubmitterSummary],
        query: &str,
    ) -> Vec<SummaryRow> {
        summaries
            .iter()
            .map(|summary| SummaryRow {
                href: format!(
                    "/conflicting-variants-by-submitter/{submitter1_id}/{}{query}",
                    summary.submitter_id
                ),
                name: or_space(&summary.name),
                levels: CONFLICT_LEVELS.map(|level| summary.level(level)).collect(),
                total: summary.total,
            })
            .collect()
    }
}

/// A conflicting pair of submissions; the link fields hold markup.
pub struct VariantRow {
    pub variant: String,
    pub submitter1: String,
    pub rcv1: String,
    pub significance1: String,
    pub submitter2: String,
    pub rcv2: String,
    pub significance2: String,
}

impl From<&VariantConflict> for VariantRow {
    fn from(row: &VariantConflict) -> Self {
        Self {
            variant: variant_link(row.variant_id, &row.variant_name),
            submitter1: submitter_link(row.submitter1_id, &row.submitter1_name),
            rcv1: rcv_link(&row.rcv1),
            significance1: or_space(&row.significance1),
            submitter2: submitter_link(row.submitter2_id, &row.submitter2_name),
            rcv2: rcv_link(&row.rcv2),
            significance2: or_space(&row.significance2),
        }
    }
}

pub struct SubmissionRow {
    pub submitter: String,
    pub rcv: String,
    pub significance: String,
    pub last_eval: String,
    pub review_status: String,
    pub star_level: i64,
    pub method: String,
    pub description: String,
}

impl From<&Submission> for SubmissionRow {
    fn from(row: &Submission) -> Self {
        Self {
            submitter: submitter_link(row.submitter_id, &row.submitter_name),
            rcv: rcv_link(&row.rcv),
            significance: or_space(&row.significance),
            last_eval: prettify_date(&row.last_eval),
            review_status: or_space(&row.review_status),
            star_level: row.star_level,
            method: or_space(&row.method),
            description: row.description.clone(),
        }
    }
}

/// A count whose label links somewhere inside the report site.
pub struct LinkedCount {
    pub href: String,
    pub label: String,
    pub count: u64,
}

impl LinkedCount {
    /// `base_path/<quoted label>` for gene, country and term lists.
    pub fn by_label(base_path: &str, rows: &[LabelCount], query: &str) -> Vec<Self> {
        rows.iter()
            .map(|row| LinkedCount {
                href: format!("{base_path}/{}{query}", quote_path(&row.label)),
                label: or_space(&row.label),
                count: row.count,
            })
            .collect()
    }

    pub fn by_submitter(rows: &[SubmitterCount]) -> Vec<Self> {
        rows.iter()
            .map(|row| LinkedCount {
                href: format!("/conflicting-variants-by-submitter/{}", row.submitter_id),
                label: or_space(&row.submitter_name),
                count: row.count,
            })
            .collect()
    }

    pub fn by_variant(rows: &[VariantCount], query: &str) -> Vec<Self> {
        rows.iter()
            .map(|row| LinkedCount {
                href: format!("/submissions-by-variant/{}{query}", row.variant_id),
                label: or_space(&row.variant_name),
                count: row.count,
            })
            .collect()
    }
}

/// A count whose label is already markup, such as an external submitter link.
pub struct MarkupCount {
    pub markup: String,
    pub count: u64,
}

impl MarkupCount {
    pub fn by_submitter(rows: &[SubmitterCount]) -> Vec<Self> {
        rows.iter()
            .map(|row| MarkupCount {
                markup: submitter_link(row.submitter_id, &row.submitter_name),
                count: row.count,
            })
            .collect()
    }
}

pub struct TermRow {
    pub href: String,
    pub significance: String,
    pub first_seen: String,
    pub last_seen: String,
}

impl TermRow {
    pub fn build(rows: &[SignificanceTermInfo]) -> Vec<Self> {
        rows.iter()
            .map(|row| TermRow {
                href: format!("/significance-terms/{}", quote_path(&row.significance)),
                significance: or_space(&row.significance),
                first_seen: prettify_date(&row.first_seen),
                last_seen: prettify_date(&row.last_seen),
            })
            .collect()
    }
}

pub struct DatedTotal {
    pub date: String,
    pub count: u64,
}

impl From<&DateCount> for DatedTotal {
    fn from(row: &DateCount) -> Self {
        Self {
            date: prettify_date(&row.date),
            count: row.count,
        }
    }
}

pub struct DatedRow {
    pub date: String,
    pub counts: Vec<u64>,
}

/// Over-time counts with one column per series.
pub struct TimeSeriesView {
    pub series: Vec<String>,
    pub rows: Vec<DatedRow>,
}

impl TimeSeriesView {
    pub fn new(points: &[DatedCount]) -> Self {
        let table = TimeSeriesTable::pivot(
            points
                .iter()
                .map(|point| (point.date.as_str(), point.series.as_str(), point.count)),
        );
        Self {
            series: table.series.iter().map(|series| or_space(series)).collect(),
            rows: table
                .rows
                .into_iter()
                .map(|row| DatedRow {
                    date: prettify_date(&row.date),
                    counts: row.counts,
                })
                .collect(),
        }
    }
}
