use anyhow::Result;
use clinvar_report::FilterSet;
use clinvar_report::TimeSeriesTable;
use clinvar_store::ClinvarStore;
use clinvar_store::StoreError;
use pretty_assertions::assert_eq;
use store_test_support::LATEST;
use store_test_support::PREVIOUS;
use store_test_support::seeded_database;

fn labels<T>(rows: &[T], label: impl Fn(&T) -> &str) -> Vec<String> {
    rows.iter().map(|row| label(row).to_string()).collect()
}

#[test]
fn submitter_lookups() -> Result<()> {
    let fixture = seeded_database()?;
    let store = ClinvarStore::open(&fixture.db_path)?;

    assert_eq!(
        store.submitter_info(1)?.map(|info| info.name),
        Some("Alpha Genetics".to_string())
    );
    assert_eq!(store.submitter_info(4)?, None);
    assert_eq!(
        store.submitter_primary_method(3)?.as_deref(),
        Some("research")
    );
    assert_eq!(store.submitter_primary_method(99)?, None);
    assert_eq!(
        store.methods()?,
        vec!["clinical testing", "literature only", "research"]
    );
    assert_eq!(store.max_date()?.as_deref(), Some(LATEST));
    Ok(())
}

#[test]
fn conflicting_variants_per_submitter() -> Result<()> {
    let fixture = seeded_database()?;
    let store = ClinvarStore::open(&fixture.db_path)?;

    let totals = store.total_variants_by_submitter(1)?;
    assert_eq!(
        labels(&totals, |row| row.submitter_name.as_str()),
        vec!["Alpha Genetics", "Beta Labs", "Gamma Clinic"]
    );
    assert_eq!(totals[0].count, 2);

    let severe = store.total_variants_by_submitter(4)?;
    assert_eq!(
        labels(&severe, |row| row.submitter_name.as_str()),
        vec!["Alpha Genetics", "Beta Labs"]
    );
    Ok(())
}

#[test]
fn significance_term_history() -> Result<()> {
    let fixture = seeded_database()?;
    let store = ClinvarStore::open(&fixture.db_path)?;

    let over_time = store.total_significance_terms_over_time()?;
    assert_eq!(
        over_time
            .iter()
            .map(|row| (row.date.as_str(), row.count))
            .collect::<Vec<_>>(),
        vec![(PREVIOUS, 3), (LATEST, 5)]
    );

    let current = store.significance_term_info()?;
    assert_eq!(
        labels(&current, |row| row.significance.as_str()),
        vec![
            "pathogenic",
            "uncertain significance",
            "benign",
            "drug response",
            "Likely pathogenic",
        ]
    );
    assert_eq!(current[0].first_seen, PREVIOUS);

    let old = store.old_significance_term_info()?;
    assert_eq!(
        labels(&old, |row| row.significance.as_str()),
        vec!["likely benign", "protective"]
    );
    assert_eq!(old[0].last_seen, PREVIOUS);

    let submitters = store.total_significance_terms("pathogenic")?;
    assert_eq!(
        labels(&submitters, |row| row.submitter_name.as_str()),
        vec!["4", "Alpha Genetics"]
    );
    Ok(())
}

#[test]
fn gene_and_variant_totals_respect_filters() -> Result<()> {
    let fixture = seeded_database()?;
    let store = ClinvarStore::open(&fixture.db_path)?;

    let genes = store.total_submissions_by_gene(&FilterSet::default())?;
    assert_eq!(
        labels(&genes, |row| row.label.as_str()),
        vec!["BRCA1/test", "BRCA2", "TP53"]
    );

    let conflicting = store.total_submissions_by_gene(&FilterSet {
        min_conflict_level: 4,
        ..Default::default()
    })?;
    assert_eq!(labels(&conflicting, |row| row.label.as_str()), vec!["BRCA2"]);
    assert_eq!(conflicting[0].count, 2);

    let starred = store.total_submissions_by_gene(&FilterSet {
        min_stars: 2,
        ..Default::default()
    })?;
    assert_eq!(labels(&starred, |row| row.label.as_str()), vec!["BRCA2"]);
    assert_eq!(starred[0].count, 1);

    let variants = store.total_submissions_by_variant("BRCA1/test", &FilterSet::default())?;
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].variant_id, 200);
    assert_eq!(variants[0].count, 2);
    Ok(())
}

#[test]
fn submissions_on_a_variant() -> Result<()> {
    let fixture = seeded_database()?;
    let store = ClinvarStore::open(&fixture.db_path)?;

    let submissions = store.submissions(100, &FilterSet::default())?;
    assert_eq!(
        labels(&submissions, |row| row.submitter_name.as_str()),
        vec!["Alpha Genetics", "Beta Labs"]
    );
    assert_eq!(submissions[0].star_level, 2);

    let research = store.submissions(
        200,
        &FilterSet {
            method: Some("research".to_string()),
            ..Default::default()
        },
    )?;
    assert_eq!(labels(&research, |row| row.rcv.as_str()), vec!["RCV000004"]);

    assert_eq!(
        store.variant_name(300)?.as_deref(),
        Some("NM_000546.5(TP53):c.3G>A")
    );
    assert_eq!(store.variant_name(999)?, None);
    Ok(())
}

#[test]
fn method_totals_over_time() -> Result<()> {
    let fixture = seeded_database()?;
    let store = ClinvarStore::open(&fixture.db_path)?;

    let conflicting = store.total_conflicting_submissions_by_method_over_time()?;
    let table = TimeSeriesTable::pivot(
        conflicting
            .iter()
            .map(|row| (row.date.as_str(), row.series.as_str(), row.count)),
    );
    assert_eq!(table.series, vec!["clinical testing", "research"]);
    assert_eq!(table.rows[0].counts, vec![3, 0]);
    assert_eq!(table.rows[1].counts, vec![3, 1]);

    let all = store.total_submissions_by_method_over_time()?;
    let table = TimeSeriesTable::pivot(
        all.iter()
            .map(|row| (row.date.as_str(), row.series.as_str(), row.count)),
    );
    assert_eq!(
        table.series,
        vec!["clinical testing", "literature only", "research"]
    );
    assert_eq!(table.rows[1].counts, vec![4, 1, 1]);
    Ok(())
}

#[test]
fn country_totals() -> Result<()> {
    let fixture = seeded_database()?;
    let store = ClinvarStore::open(&fixture.db_path)?;

    let countries = store.total_submissions_by_country()?;
    assert_eq!(
        labels(&countries, |row| row.label.as_str()),
        vec!["", "United Kingdom", "United States"]
    );

    let unknown = store.total_submissions_by_submitter("")?;
    assert_eq!(
        labels(&unknown, |row| row.submitter_name.as_str()),
        vec!["4", "Gamma Clinic"]
    );
    Ok(())
}

#[test]
fn missing_database_is_an_open_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("missing.db");
    assert!(matches!(
        ClinvarStore::open(&path),
        Err(StoreError::Open { .. })
    ));
    Ok(())
}
