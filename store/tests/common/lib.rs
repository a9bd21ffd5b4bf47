//! Small two-release database shared by the store and server test suites.
//!
//! Latest release `2019-02-01`:
//!
//! | variant | gene       | submitter          | significance           | stars | method           |
//! |---------|------------|--------------------|------------------------|-------|------------------|
//! | 100     | BRCA2      | 1 Alpha Genetics   | pathogenic             | 2     | clinical testing |
//! | 100     | BRCA2      | 2 Beta Labs        | benign                 | 1     | clinical testing |
//! | 200     | BRCA1/test | 1 Alpha Genetics   | Likely pathogenic (*)  | 1     | clinical testing |
//! | 200     | BRCA1/test | 3 Gamma Clinic     | uncertain significance | 0     | research         |
//! | 300     | TP53       | 2 Beta Labs        | drug response          | 1     | clinical testing |
//! | 300     | TP53       | 4 (no info row)    | pathogenic             | 1     | literature only  |
//!
//! (*) corrected to `likely pathogenic`. Conflicts: variant 100 between 1 and 2
//! at level 5, variant 200 between 1 and 3 at level 3.

use anyhow::Result;
use clinvar_store::ClinvarStore;
use rusqlite::params;
use std::path::PathBuf;
use tempfile::TempDir;

pub const LATEST: &str = "2019-02-01";
pub const PREVIOUS: &str = "2019-01-01";

pub struct Fixture {
    pub dir: TempDir,
    pub db_path: PathBuf,
}

struct SubmissionSeed {
    date: &'static str,
    variant_id: i64,
    variant_name: &'static str,
    gene: &'static str,
    submitter_id: i64,
    rcv: &'static str,
    significance: &'static str,
    corrected: Option<&'static str>,
    star_level: i64,
    method: &'static str,
}

const BRCA2: &str = "NM_000059.3(BRCA2):c.1A>G";
const BRCA1: &str = "NM_007294.3(BRCA1):c.2T>C";
const TP53: &str = "NM_000546.5(TP53):c.3G>A";

#[allow(clippy::too_many_arguments)]
fn seed(
    date: &'static str,
    variant_id: i64,
    variant_name: &'static str,
    gene: &'static str,
    submitter_id: i64,
    rcv: &'static str,
    significance: &'static str,
    star_level: i64,
    method: &'static str,
) -> SubmissionSeed {
    SubmissionSeed {
        date,
        variant_id,
        variant_name,
        gene,
        submitter_id,
        rcv,
        significance,
        corrected: None,
        star_level,
        method,
    }
}

fn seeds() -> Vec<SubmissionSeed> {
    vec![
        seed(PREVIOUS, 100, BRCA2, "BRCA2", 1, "RCV000001", "pathogenic", 2, "clinical testing"),
        seed(PREVIOUS, 100, BRCA2, "BRCA2", 2, "RCV000002", "likely benign", 1, "clinical testing"),
        seed(PREVIOUS, 100, BRCA2, "BRCA2", 3, "RCV000005", "protective", 0, "clinical testing"),
        seed(LATEST, 100, BRCA2, "BRCA2", 1, "RCV000001", "pathogenic", 2, "clinical testing"),
        seed(LATEST, 100, BRCA2, "BRCA2", 2, "RCV000002", "benign", 1, "clinical testing"),
        SubmissionSeed {
            corrected: Some("likely pathogenic"),
            ..seed(LATEST, 200, BRCA1, "BRCA1/test", 1, "RCV000003", "Likely pathogenic", 1, "clinical testing")
        },
        seed(LATEST, 200, BRCA1, "BRCA1/test", 3, "RCV000004", "uncertain significance", 0, "research"),
        seed(LATEST, 300, TP53, "TP53", 2, "RCV000006", "drug response", 1, "clinical testing"),
        seed(LATEST, 300, TP53, "TP53", 4, "RCV000007", "pathogenic", 1, "literature only"),
    ]
}

/// Writes the fixture database into a fresh temporary directory.
pub fn seeded_database() -> Result<Fixture> {
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("clinvar.db");
    let store = ClinvarStore::create(&db_path)?;
    let conn = store.connection();

    for (id, name, country) in [
        (1, "Alpha Genetics", "United States"),
        (2, "Beta Labs", "United Kingdom"),
        (3, "Gamma Clinic", ""),
    ] {
        conn.execute(
            "INSERT INTO submitter_info (id, name, country) VALUES (?1, ?2, ?3)",
            params![id, name, country],
        )?;
    }

    for seed in seeds() {
        conn.execute(
            "INSERT INTO submissions (
                date, variant_id, variant_name, gene, submitter_id, rcv,
                significance, corrected_significance, last_eval, review_status,
                star_level, method, description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                seed.date,
                seed.variant_id,
                seed.variant_name,
                seed.gene,
                seed.submitter_id,
                seed.rcv,
                seed.significance,
                seed.corrected,
                "2018-11-20",
                "criteria provided, single submitter",
                seed.star_level,
                seed.method,
                "",
            ],
        )?;
    }

    for (date, variant_id, a, b, level) in [
        (PREVIOUS, 100, 1, 2, 4),
        (PREVIOUS, 100, 1, 3, 2),
        (LATEST, 100, 1, 2, 5),
        (LATEST, 200, 1, 3, 3),
    ] {
        for (submitter1_id, submitter2_id) in [(a, b), (b, a)] {
            conn.execute(
                "INSERT INTO conflicts (date, variant_id, submitter1_id, submitter2_id, conflict_level)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![date, variant_id, submitter1_id, submitter2_id, level],
            )?;
        }
    }

    drop(store);
    Ok(Fixture { dir, db_path })
}
