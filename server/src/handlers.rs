//! Route handlers. Path segments are resolved before the query string, so a
//! malformed id is a 404 even when the filters are malformed too.

use crate::app::AppState;
use crate::error::AppError;
use crate::format::prettify_date;
use crate::format::query_suffix;
use crate::format::submitter_link;
use crate::format::variant_link;
use crate::pages::CountriesIndexPage;
use crate::pages::CountryPage;
use crate::pages::GenesIndexPage;
use crate::pages::IndexPage;
use crate::pages::MethodsOverTimePage;
use crate::pages::OneSubmitterPage;
use crate::pages::SignificanceOverviewPage;
use crate::pages::SignificanceTermPage;
use crate::pages::SignificanceTermsIndexPage;
use crate::pages::SignificanceVariantsPage;
use crate::pages::SubmissionsByVariantPage;
use crate::pages::SubmitterIndexPage;
use crate::pages::SubmitterVariantsPage;
use crate::pages::TwoSubmittersPage;
use crate::pages::VariantsByGenePage;
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
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::RawQuery;
use axum::extract::State;
use axum::http::Uri;
use axum::response::Html;
use clinvar_report::Breakdown;
use clinvar_report::FilterSet;
use clinvar_report::RawFilters;
use clinvar_report::SignificanceDrillDown;
use clinvar_report::SubmitterDrillDown;
use clinvar_report::SubmitterInfo;
use clinvar_report::decode_path_segment;
use clinvar_report::parse_id_segment;
use clinvar_report::summarize_by_submitter;
use clinvar_store::ClinvarStore;
use clinvar_store::SubmitterPair;
use tracing::debug;

const SIGNIFICANCE_PATH: &str = "/conflicting-variants-by-significance";
const SUBMITTER_PATH: &str = "/conflicting-variants-by-submitter";
const GENE_PATH: &str = "/submissions-by-gene";
const COUNTRY_PATH: &str = "/total-submissions-by-country";

type PageResult = Result<Html<String>, AppError>;

/// Decoded query pairs in request order. Extracting a list keeps repeated
/// keys from being rejected before a handler decides which ones it reads.
type QueryPairs = Vec<(String, String)>;

fn render(page: &impl Template) -> PageResult {
    Ok(Html(page.render()?))
}

pub async fn index(State(state): State<AppState>) -> PageResult {
    let max_date = state.with_store(ClinvarStore::max_date).await?;
    render(&IndexPage {
        title: "ClinVar conflicting submissions".to_string(),
        max_date: max_date.as_deref().map(prettify_date).unwrap_or_default(),
    })
}

pub async fn significance_overview(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
    RawQuery(query): RawQuery,
) -> PageResult {
    significance_report(
        state,
        SignificanceDrillDown::resolve(None),
        RawFilters::from_pairs(pairs),
        query,
    )
    .await
}

pub async fn significance_variants(
    State(state): State<AppState>,
    Path((significance1, significance2)): Path<(String, String)>,
    Query(pairs): Query<QueryPairs>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let drill_down =
        SignificanceDrillDown::resolve(Some((significance1.as_str(), significance2.as_str())));
    significance_report(state, drill_down, RawFilters::from_pairs(pairs), query).await
}

async fn significance_report(
    state: AppState,
    drill_down: SignificanceDrillDown,
    raw: RawFilters,
    query: Option<String>,
) -> PageResult {
    let filters = FilterSet::resolve(&raw)?;
    let query = query_suffix(query.as_deref());
    debug!(?drill_down, ?filters, "significance report");

    match drill_down {
        SignificanceDrillDown::Overview => {
            let store_filters = filters.clone();
            let (rows, methods) = state
                .with_store(move |store| {
                    Ok((
                        store.conflict_overview(SubmitterPair::default(), &store_filters)?,
                        store.methods()?,
                    ))
                })
                .await?;
            render(&SignificanceOverviewPage {
                title: "Conflicting variants by significance".to_string(),
                form: FilterForm::for_significances(&filters, &methods),
                breakdown: BreakdownTable::new(
                    &Breakdown::from_rows(&rows),
                    SIGNIFICANCE_PATH,
                    &query,
                ),
            })
        }
        SignificanceDrillDown::Variants {
            significance1,
            significance2,
        } => {
            let store_filters = filters.clone();
            let (store_sig1, store_sig2) = (significance1.clone(), significance2.clone());
            let (variants, methods) = state
                .with_store(move |store| {
                    Ok((
                        store.variants(
                            &store_sig1,
                            &store_sig2,
                            SubmitterPair::default(),
                            &store_filters,
                        )?,
                        store.methods()?,
                    ))
                })
                .await?;
            render(&SignificanceVariantsPage {
                title: format!("Variants reported as {significance1} and {significance2}"),
                form: FilterForm::for_significances(&filters, &methods),
                variants: variants.iter().map(VariantRow::from).collect(),
            })
        }
    }
}

pub async fn submitter_index(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let empty: [&str; 0] = [];
    submitter_report(
        state,
        SubmitterDrillDown::resolve(&empty)?,
        RawFilters::from_pairs(pairs),
        query,
    )
    .await
}

pub async fn one_submitter(
    State(state): State<AppState>,
    Path(submitter1_id): Path<String>,
    Query(pairs): Query<QueryPairs>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let drill_down = SubmitterDrillDown::resolve(&[submitter1_id])?;
    submitter_report(state, drill_down, RawFilters::from_pairs(pairs), query).await
}

pub async fn two_submitters(
    State(state): State<AppState>,
    Path((submitter1_id, submitter2_id)): Path<(String, String)>,
    Query(pairs): Query<QueryPairs>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let drill_down = SubmitterDrillDown::resolve(&[submitter1_id, submitter2_id])?;
    submitter_report(state, drill_down, RawFilters::from_pairs(pairs), query).await
}

pub async fn submitter_variants(
    State(state): State<AppState>,
    Path((submitter1_id, submitter2_id, significance1, significance2)): Path<(
        String,
        String,
        String,
        String,
    )>,
    Query(pairs): Query<QueryPairs>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let drill_down = SubmitterDrillDown::resolve(&[
        submitter1_id,
        submitter2_id,
        significance1,
        significance2,
    ])?;
    submitter_report(state, drill_down, RawFilters::from_pairs(pairs), query).await
}

async fn submitter_report(
    state: AppState,
    drill_down: SubmitterDrillDown,
    raw: RawFilters,
    query: Option<String>,
) -> PageResult {
    let query = query_suffix(query.as_deref());
    debug!(?drill_down, "submitter report");

    match drill_down {
        SubmitterDrillDown::Index => {
            let totals = state
                .with_store(|store| store.total_variants_by_submitter(1))
                .await?;
            render(&SubmitterIndexPage {
                title: "Conflicting variants by submitter".to_string(),
                submitters: LinkedCount::by_submitter(&totals),
            })
        }
        SubmitterDrillDown::OneSubmitter { submitter1_id } => {
            let filters = FilterSet::resolve(&raw)?;
            let store_filters = filters.clone();
            let (info, primary_method, rows, methods) = state
                .with_store(move |store| {
                    Ok((
                        store.submitter_info(submitter1_id)?,
                        store.submitter_primary_method(submitter1_id)?,
                        store.conflict_overview(SubmitterPair::first(submitter1_id), &store_filters)?,
                        store.methods()?,
                    ))
                })
                .await?;
            let submitter1 = SubmitterInfo::first_or_id(submitter1_id, info);
            let all_others = SubmitterInfo::all_others();
            let base_path = format!("{SUBMITTER_PATH}/{submitter1_id}/{}", all_others.id);
            render(&OneSubmitterPage {
                title: format!(
                    "Conflicts between {} and {}",
                    submitter1.name,
                    all_others.name.to_lowercase()
                ),
                form: FilterForm::for_significances(&filters, &methods),
                submitter1_link: submitter_link(submitter1.id, &submitter1.name),
                primary_method: primary_method.unwrap_or_default(),
                summary: SummaryRow::build(submitter1_id, &summarize_by_submitter(&rows), &query),
                all_others_href: format!("{base_path}{query}"),
                breakdown: BreakdownTable::new(&Breakdown::from_rows(&rows), &base_path, &query),
            })
        }
        SubmitterDrillDown::TwoSubmitters {
            submitter1_id,
            submitter2_id,
        } => {
            let filters = FilterSet::resolve(&raw)?;
            let store_filters = filters.clone();
            let (info1, info2, rows, methods) = state
                .with_store(move |store| {
                    Ok((
                        store.submitter_info(submitter1_id)?,
                        store.submitter_info(submitter2_id)?,
                        store.conflict_overview(
                            SubmitterPair::both(submitter1_id, submitter2_id),
                            &store_filters,
                        )?,
                        store.methods()?,
                    ))
                })
                .await?;
            let submitter1 = SubmitterInfo::first_or_id(submitter1_id, info1);
            let submitter2 = SubmitterInfo::second_or_id(submitter2_id, info2);
            let base_path = format!("{SUBMITTER_PATH}/{submitter1_id}/{submitter2_id}");
            render(&TwoSubmittersPage {
                title: format!(
                    "Conflicts between {} and {}",
                    submitter1.name, submitter2.name
                ),
                form: FilterForm::for_significances(&filters, &methods),
                submitter1_link: submitter_link(submitter1.id, &submitter1.name),
                submitter2_link: submitter_link(submitter2.id, &submitter2.name),
                breakdown: BreakdownTable::new(&Breakdown::from_rows(&rows), &base_path, &query),
            })
        }
        SubmitterDrillDown::Variants {
            submitter1_id,
            submitter2_id,
            significance1,
            significance2,
        } => {
            let filters = FilterSet::resolve(&raw)?;
            let store_filters = filters.clone();
            let (store_sig1, store_sig2) = (significance1.clone(), significance2.clone());
            let (info1, info2, variants, methods) = state
                .with_store(move |store| {
                    Ok((
                        store.submitter_info(submitter1_id)?,
                        store.submitter_info(submitter2_id)?,
                        store.variants(
                            &store_sig1,
                            &store_sig2,
                            SubmitterPair::both(submitter1_id, submitter2_id),
                            &store_filters,
                        )?,
                        store.methods()?,
                    ))
                })
                .await?;
            let submitter1 = SubmitterInfo::first_or_id(submitter1_id, info1);
            let submitter2 = SubmitterInfo::second_or_id(submitter2_id, info2);
            render(&SubmitterVariantsPage {
                title: format!(
                    "Variants reported as {significance1} by {} and {significance2} by {}",
                    submitter1.name, submitter2.name
                ),
                form: FilterForm::for_significances(&filters, &methods),
                submitter1_link: submitter_link(submitter1.id, &submitter1.name),
                submitter2_link: submitter_link(submitter2.id, &submitter2.name),
                significance1,
                significance2,
                variants: variants.iter().map(VariantRow::from).collect(),
            })
        }
    }
}

pub async fn significance_terms_index(State(state): State<AppState>) -> PageResult {
    let (over_time, current_terms, old_terms) = state
        .with_store(|store| {
            Ok((
                store.total_significance_terms_over_time()?,
                store.significance_term_info()?,
                store.old_significance_term_info()?,
            ))
        })
        .await?;
    render(&SignificanceTermsIndexPage {
        title: "Significance terms".to_string(),
        over_time: over_time.iter().map(DatedTotal::from).collect(),
        current_terms: TermRow::build(&current_terms),
        old_terms: TermRow::build(&old_terms),
    })
}

pub async fn empty_significance_term(State(state): State<AppState>) -> PageResult {
    significance_term_report(state, String::new()).await
}

pub async fn significance_term(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> PageResult {
    significance_term_report(state, decode_path_segment(&term)).await
}

async fn significance_term_report(state: AppState, term: String) -> PageResult {
    let store_term = term.clone();
    let submitters = state
        .with_store(move |store| store.total_significance_terms(&store_term))
        .await?;
    render(&SignificanceTermPage {
        title: format!("Submitters currently using \"{term}\""),
        submitters: MarkupCount::by_submitter(&submitters),
    })
}

pub async fn genes_index(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let filters = FilterSet::resolve(&RawFilters::from_pairs(pairs))?;
    let query = query_suffix(query.as_deref());
    let store_filters = filters.clone();
    let (genes, methods) = state
        .with_store(move |store| {
            Ok((
                store.total_submissions_by_gene(&store_filters)?,
                store.methods()?,
            ))
        })
        .await?;
    render(&GenesIndexPage {
        title: "Submissions by gene".to_string(),
        form: FilterForm::for_submissions(&filters, &methods),
        genes: LinkedCount::by_label(GENE_PATH, &genes, &query),
    })
}

pub async fn variants_by_gene(
    State(state): State<AppState>,
    Path(gene): Path<String>,
    Query(pairs): Query<QueryPairs>,
    RawQuery(query): RawQuery,
) -> PageResult {
    let gene = decode_path_segment(&gene);
    let filters = FilterSet::resolve(&RawFilters::from_pairs(pairs))?;
    let query = query_suffix(query.as_deref());
    let (store_gene, store_filters) = (gene.clone(), filters.clone());
    let (variants, methods) = state
        .with_store(move |store| {
            Ok((
                store.total_submissions_by_variant(&store_gene, &store_filters)?,
                store.methods()?,
            ))
        })
        .await?;
    render(&VariantsByGenePage {
        title: format!("Variants in {gene}"),
        form: FilterForm::for_submissions(&filters, &methods),
        variants: LinkedCount::by_variant(&variants, &query),
    })
}

pub async fn submissions_by_variant(
    State(state): State<AppState>,
    Path(variant_id): Path<String>,
    Query(pairs): Query<QueryPairs>,
) -> PageResult {
    let variant_id = parse_id_segment(&variant_id)?;
    let filters = FilterSet::resolve(&RawFilters::from_pairs(pairs))?;
    let store_filters = filters.clone();
    let (variant_name, submissions, methods) = state
        .with_store(move |store| {
            Ok((
                store.variant_name(variant_id)?,
                store.submissions(variant_id, &store_filters)?,
                store.methods()?,
            ))
        })
        .await?;
    let variant_name = variant_name.unwrap_or_else(|| variant_id.to_string());
    render(&SubmissionsByVariantPage {
        title: format!("Submissions for {variant_name}"),
        form: FilterForm::for_submissions(&filters, &methods),
        variant_link: variant_link(variant_id, &variant_name),
        submissions: submissions.iter().map(SubmissionRow::from).collect(),
    })
}

pub async fn conflicting_submissions_by_method(State(state): State<AppState>) -> PageResult {
    let (points, max_date) = state
        .with_store(|store| {
            Ok((
                store.total_conflicting_submissions_by_method_over_time()?,
                store.max_date()?,
            ))
        })
        .await?;
    render(&MethodsOverTimePage {
        title: "Total conflicting submissions by method".to_string(),
        max_date: max_date.as_deref().map(prettify_date).unwrap_or_default(),
        table: TimeSeriesView::new(&points),
    })
}

pub async fn submissions_by_method(State(state): State<AppState>) -> PageResult {
    let (points, max_date) = state
        .with_store(|store| {
            Ok((
                store.total_submissions_by_method_over_time()?,
                store.max_date()?,
            ))
        })
        .await?;
    render(&MethodsOverTimePage {
        title: "Total submissions by method".to_string(),
        max_date: max_date.as_deref().map(prettify_date).unwrap_or_default(),
        table: TimeSeriesView::new(&points),
    })
}

pub async fn countries_index(State(state): State<AppState>) -> PageResult {
    let countries = state
        .with_store(ClinvarStore::total_submissions_by_country)
        .await?;
    render(&CountriesIndexPage {
        title: "Total submissions by country".to_string(),
        countries: LinkedCount::by_label(COUNTRY_PATH, &countries, ""),
    })
}

pub async fn empty_country(State(state): State<AppState>) -> PageResult {
    country_report(state, String::new()).await
}

pub async fn country(State(state): State<AppState>, Path(country): Path<String>) -> PageResult {
    country_report(state, decode_path_segment(&country)).await
}

async fn country_report(state: AppState, country: String) -> PageResult {
    let store_country = country.clone();
    let submitters = state
        .with_store(move |store| store.total_submissions_by_submitter(&store_country))
        .await?;
    let title = if country.is_empty() {
        "Total submissions from submitters with no country".to_string()
    } else {
        format!("Total submissions from {country}")
    };
    render(&CountryPage {
        title,
        submitters: MarkupCount::by_submitter(&submitters),
    })
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("no report at {}", uri.path()))
}
