//! One askama template per report page.
//!
//! Fields named after links (`*_link`, `markup`, `variant`, `submitter*`,
//! `rcv*`) already hold escaped markup and are printed with `|safe`.

use crate::views::BreakdownTable;
use crate::views::DatedTotal;
use crate::views::FilterForm;
use crate::views::LinkedCount;
use crate::views::MarkupCount;
use crate::views::SubmissionRow;
use crate::views::SummaryRow;
use crate::views::TermRow;
use crate::views::TimeSeriesView;
use crate::views::VariantRow;
use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub title: String,
    pub max_date: String,
}

#[derive(Template)]
#[template(path = "significance_overview.html")]
pub struct SignificanceOverviewPage {
    pub title: String,
    pub form: FilterForm,
    pub breakdown: BreakdownTable,
}

#[derive(Template)]
#[template(path = "significance_variants.html")]
pub struct SignificanceVariantsPage {
    pub title: String,
    pub form: FilterForm,
    pub variants: Vec<VariantRow>,
}

#[derive(Template)]
#[template(path = "submitter_index.html")]
pub struct SubmitterIndexPage {
    pub title: String,
    pub submitters: Vec<LinkedCount>,
}

#[derive(Template)]
#[template(path = "one_submitter.html")]
pub struct OneSubmitterPage {
    pub title: String,
    pub form: FilterForm,
    pub submitter1_link: String,
    /// Empty when the submitter has no current submissions.
    pub primary_method: String,
    pub summary: Vec<SummaryRow>,
    pub all_others_href: String,
    pub breakdown: BreakdownTable,
}

#[derive(Template)]
#[template(path = "two_submitters.html")]
pub struct TwoSubmittersPage {
    pub title: String,
    pub form: FilterForm,
    pub submitter1_link: String,
    pub submitter2_link: String,
    pub breakdown: BreakdownTable,
}

#[derive(Template)]
#[template(path = "submitter_variants.html")]
pub struct SubmitterVariantsPage {
    pub title: String,
    pub form: FilterForm,
    pub submitter1_link: String,
    pub submitter2_link: String,
    pub significance1: String,
    pub significance2: String,
    pub variants: Vec<VariantRow>,
}

#[derive(Template)]
#[template(path = "significance_terms_index.html")]
pub struct SignificanceTermsIndexPage {
    pub title: String,
    pub over_time: Vec<DatedTotal>,
    pub current_terms: Vec<TermRow>,
    pub old_terms: Vec<TermRow>,
}

#[derive(Template)]
#[template(path = "significance_term.html")]
pub struct SignificanceTermPage {
    pub title: String,
    pub submitters: Vec<MarkupCount>,
}

#[derive(Template)]
#[template(path = "genes_index.html")]
pub struct GenesIndexPage {
    pub title: String,
    pub form: FilterForm,
    pub genes: Vec<LinkedCount>,
}

#[derive(Template)]
#[template(path = "variants_by_gene.html")]
pub struct VariantsByGenePage {
    pub title: String,
    pub form: FilterForm,
    pub variants: Vec<LinkedCount>,
}

#[derive(Template)]
#[template(path = "submissions_by_variant.html")]
pub struct SubmissionsByVariantPage {
    pub title: String,
    pub form: FilterForm,
    pub variant_link: String,
    pub submissions: Vec<SubmissionRow>,
}

/// Shared by the all-submissions and conflicting-submissions method reports.
#[derive(Template)]
#[template(path = "methods_over_time.html")]
pub struct MethodsOverTimePage {
    pub title: String,
    pub max_date: String,
    pub table: TimeSeriesView,
}

#[derive(Template)]
#[template(path = "countries_index.html")]
pub struct CountriesIndexPage {
    pub title: String,
    pub countries: Vec<LinkedCount>,
}

#[derive(Template)]
#[template(path = "country.html")]
pub struct CountryPage {
    pub title: String,
    pub submitters: Vec<MarkupCount>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub title: String,
    pub status: u16,
    pub message: String,
}
