//! Tables the reports read from.
//!
//! Loading is done elsewhere; this is the contract the loader fills in.
//! `submissions` and `conflicts` hold one snapshot per release `date`; the
//! `current_*` views narrow both to the latest release.

use crate::error::StoreError;
use rusqlite::Connection;

pub const SCHEMA_SQL: &str = r#"
-- Submitting organisations.
CREATE TABLE IF NOT EXISTS submitter_info (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    country TEXT NOT NULL DEFAULT ''
);

-- One row per submission per release.
CREATE TABLE IF NOT EXISTS submissions (
    date TEXT NOT NULL,
    variant_id INTEGER NOT NULL,
    variant_name TEXT NOT NULL,
    gene TEXT NOT NULL DEFAULT '',
    submitter_id INTEGER NOT NULL,
    rcv TEXT NOT NULL,
    significance TEXT NOT NULL,
    corrected_significance TEXT,
    last_eval TEXT NOT NULL DEFAULT '',
    review_status TEXT NOT NULL DEFAULT '',
    star_level INTEGER NOT NULL DEFAULT 0,
    method TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_submissions_date_variant
    ON submissions(date, variant_id, submitter_id);
CREATE INDEX IF NOT EXISTS idx_submissions_gene
    ON submissions(date, gene);

-- Ordered pairs of disagreeing submitters; the loader writes both directions.
CREATE TABLE IF NOT EXISTS conflicts (
    date TEXT NOT NULL,
    variant_id INTEGER NOT NULL,
    submitter1_id INTEGER NOT NULL,
    submitter2_id INTEGER NOT NULL,
    conflict_level INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_conflicts_date_submitters
    ON conflicts(date, submitter1_id, submitter2_id);

CREATE VIEW IF NOT EXISTS current_submissions AS
    SELECT * FROM submissions
    WHERE date = (SELECT MAX(date) FROM submissions);

CREATE VIEW IF NOT EXISTS current_conflicts AS
    SELECT * FROM conflicts
    WHERE date = (SELECT MAX(date) FROM submissions);
"#;

/// Creates any missing tables and views.
pub fn create_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
