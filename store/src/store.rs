use crate::error::Result;
use crate::error::StoreError;
use crate::rows::DateCount;
use crate::rows::DatedCount;
use crate::rows::LabelCount;
use crate::rows::SignificanceTermInfo;
use crate::rows::Submission;
use crate::rows::SubmitterCount;
use crate::rows::VariantConflict;
use crate::rows::VariantCount;
use crate::schema::create_schema;
use clinvar_report::ConflictOverviewRow;
use clinvar_report::FilterSet;
use clinvar_report::SubmitterInfo;
use clinvar_report::compare_significance;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::named_params;
use rusqlite::params;
use std::path::Path;
use tracing::debug;

/// Optional submitter scope of the conflict queries.
///
/// A second submitter id of 0 means "any other submitter" and does not filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmitterPair {
    pub submitter1_id: Option<i64>,
    pub submitter2_id: Option<i64>,
}

impl SubmitterPair {
    pub fn first(submitter1_id: i64) -> Self {
        Self {
            submitter1_id: Some(submitter1_id),
            submitter2_id: None,
        }
    }

    pub fn both(submitter1_id: i64, submitter2_id: i64) -> Self {
        Self {
            submitter1_id: Some(submitter1_id),
            submitter2_id: Some(submitter2_id),
        }
    }

    fn second_filter(&self) -> Option<i64> {
        self.submitter2_id.filter(|id| *id != 0)
    }
}

const OVERVIEW_BY_SIGNIFICANCE_SQL: &str = "
SELECT
    CASE WHEN :corrected THEN COALESCE(s1.corrected_significance, s1.significance)
        ELSE s1.significance END AS clin_sig1,
    CASE WHEN :corrected THEN COALESCE(s2.corrected_significance, s2.significance)
        ELSE s2.significance END AS clin_sig2,
    NULL,
    NULL,
    NULL,
    COUNT(DISTINCT c.variant_id)
FROM current_conflicts c
JOIN current_submissions s1
    ON s1.variant_id = c.variant_id AND s1.submitter_id = c.submitter1_id
JOIN current_submissions s2
    ON s2.variant_id = c.variant_id AND s2.submitter_id = c.submitter2_id
WHERE s1.star_level >= :min_stars AND s2.star_level >= :min_stars
    AND (:method IS NULL OR (s1.method = :method AND s2.method = :method))
GROUP BY clin_sig1, clin_sig2
ORDER BY clin_sig1, clin_sig2";

const OVERVIEW_BY_SUBMITTER_SQL: &str = "
SELECT
    CASE WHEN :corrected THEN COALESCE(s1.corrected_significance, s1.significance)
        ELSE s1.significance END AS clin_sig1,
    CASE WHEN :corrected THEN COALESCE(s2.corrected_significance, s2.significance)
        ELSE s2.significance END AS clin_sig2,
    c.submitter2_id,
    COALESCE(i2.name, CAST(c.submitter2_id AS TEXT)) AS submitter2_name,
    c.conflict_level,
    COUNT(DISTINCT c.variant_id)
FROM current_conflicts c
JOIN current_submissions s1
    ON s1.variant_id = c.variant_id AND s1.submitter_id = c.submitter1_id
JOIN current_submissions s2
    ON s2.variant_id = c.variant_id AND s2.submitter_id = c.submitter2_id
LEFT JOIN submitter_info i2 ON i2.id = c.submitter2_id
WHERE c.submitter1_id = :submitter1_id
    AND (:submitter2_id IS NULL OR c.submitter2_id = :submitter2_id)
    AND s1.star_level >= :min_stars AND s2.star_level >= :min_stars
    AND (:method IS NULL OR (s1.method = :method AND s2.method = :method))
GROUP BY c.submitter2_id, c.conflict_level, clin_sig1, clin_sig2
ORDER BY submitter2_name, c.submitter2_id, c.conflict_level, clin_sig1, clin_sig2";

const VARIANTS_SQL: &str = "
SELECT DISTINCT
    c.variant_id,
    s1.variant_name,
    c.submitter1_id,
    COALESCE(i1.name, CAST(c.submitter1_id AS TEXT)) AS submitter1_name,
    s1.rcv,
    CASE WHEN :corrected THEN COALESCE(s1.corrected_significance, s1.significance)
        ELSE s1.significance END AS clin_sig1,
    c.submitter2_id,
    COALESCE(i2.name, CAST(c.submitter2_id AS TEXT)) AS submitter2_name,
    s2.rcv,
    CASE WHEN :corrected THEN COALESCE(s2.corrected_significance, s2.significance)
        ELSE s2.significance END AS clin_sig2
FROM current_conflicts c
JOIN current_submissions s1
    ON s1.variant_id = c.variant_id AND s1.submitter_id = c.submitter1_id
JOIN current_submissions s2
    ON s2.variant_id = c.variant_id AND s2.submitter_id = c.submitter2_id
LEFT JOIN submitter_info i1 ON i1.id = c.submitter1_id
LEFT JOIN submitter_info i2 ON i2.id = c.submitter2_id
WHERE clin_sig1 = :significance1 AND clin_sig2 = :significance2
    AND (:submitter1_id IS NULL OR c.submitter1_id = :submitter1_id)
    AND (:submitter2_id IS NULL OR c.submitter2_id = :submitter2_id)
    AND s1.star_level >= :min_stars AND s2.star_level >= :min_stars
    AND (:method IS NULL OR (s1.method = :method AND s2.method = :method))
ORDER BY s1.variant_name, c.variant_id, submitter1_name, submitter2_name, s1.rcv, s2.rcv";

/// Star, method and conflict-level filter over `current_submissions s`.
const SUBMISSION_FILTER_SQL: &str = "
    s.star_level >= :min_stars
    AND (:method IS NULL OR s.method = :method)
    AND (:min_conflict_level < 1 OR EXISTS (
        SELECT 1 FROM current_conflicts c
        WHERE c.variant_id = s.variant_id
            AND c.submitter1_id = s.submitter_id
            AND c.conflict_level >= :min_conflict_level
    ))";

const METHOD_OVER_TIME_SQL: &str = "
SELECT s.date, s.method, COUNT(*)
FROM submissions s
GROUP BY s.date, s.method
ORDER BY s.date, s.method";

const CONFLICTING_METHOD_OVER_TIME_SQL: &str = "
SELECT s.date, s.method, COUNT(*)
FROM submissions s
WHERE EXISTS (
    SELECT 1 FROM conflicts c
    WHERE c.date = s.date
        AND c.variant_id = s.variant_id
        AND c.submitter1_id = s.submitter_id
)
GROUP BY s.date, s.method
ORDER BY s.date, s.method";

/// Read-only handle on the report database, opened once per request.
pub struct ClinvarStore {
    conn: Connection,
}

impl ClinvarStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { conn })
    }

    /// Opens (creating if needed) a writable database with the report schema.
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Significance pairs of conflicting submissions with their variant counts.
    ///
    /// Without a first submitter the rows are grouped by significance only;
    /// with one they also carry the second submitter and conflict level.
    pub fn conflict_overview(
        &self,
        submitters: SubmitterPair,
        filters: &FilterSet,
    ) -> Result<Vec<ConflictOverviewRow>> {
        let rows = match submitters.submitter1_id {
            None => {
                let mut stmt = self.conn.prepare_cached(OVERVIEW_BY_SIGNIFICANCE_SQL)?;
                let rows = stmt.query_map(
                    named_params! {
                        ":corrected": filters.uses_corrected_terms(),
                        ":min_stars": filters.min_stars,
                        ":method": filters.method.as_deref(),
                    },
                    overview_row,
                )?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            Some(submitter1_id) => {
                let mut stmt = self.conn.prepare_cached(OVERVIEW_BY_SUBMITTER_SQL)?;
                let rows = stmt.query_map(
                    named_params! {
                        ":corrected": filters.uses_corrected_terms(),
                        ":submitter1_id": submitter1_id,
                        ":submitter2_id": submitters.second_filter(),
                        ":min_stars": filters.min_stars,
                        ":method": filters.method.as_deref(),
                    },
                    overview_row,
                )?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        debug!("conflict overview for {submitters:?}: {} rows", rows.len());
        Ok(rows)
    }

    /// Conflicting submission pairs reported with the two given significances.
    pub fn variants(
        &self,
        significance1: &str,
        significance2: &str,
        submitters: SubmitterPair,
        filters: &FilterSet,
    ) -> Result<Vec<VariantConflict>> {
        let mut stmt = self.conn.prepare_cached(VARIANTS_SQL)?;
        let rows = stmt.query_map(
            named_params! {
                ":corrected": filters.uses_corrected_terms(),
                ":significance1": significance1,
                ":significance2": significance2,
                ":submitter1_id": submitters.submitter1_id,
                ":submitter2_id": submitters.second_filter(),
                ":min_stars": filters.min_stars,
                ":method": filters.method.as_deref(),
            },
            |row| {
                Ok(VariantConflict {
                    variant_id: row.get(0)?,
                    variant_name: row.get(1)?,
                    submitter1_id: row.get(2)?,
                    submitter1_name: row.get(3)?,
                    rcv1: row.get(4)?,
                    significance1: row.get(5)?,
                    submitter2_id: row.get(6)?,
                    submitter2_name: row.get(7)?,
                    rcv2: row.get(8)?,
                    significance2: row.get(9)?,
                })
            },
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Collection methods present in the latest release, for filter menus.
    pub fn methods(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT DISTINCT method FROM current_submissions WHERE method != '' ORDER BY method",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<String>>>()?)
    }

    pub fn submitter_info(&self, submitter_id: i64) -> Result<Option<SubmitterInfo>> {
        let info = self
            .conn
            .query_row(
                "SELECT id, name FROM submitter_info WHERE id = ?1",
                params![submitter_id],
                |row| {
                    Ok(SubmitterInfo {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(info)
    }

    /// The method the submitter uses most often in the latest release.
    pub fn submitter_primary_method(&self, submitter_id: i64) -> Result<Option<String>> {
        let method = self
            .conn
            .query_row(
                "SELECT method FROM current_submissions
                 WHERE submitter_id = ?1
                 GROUP BY method
                 ORDER BY COUNT(*) DESC, method
                 LIMIT 1",
                params![submitter_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(method)
    }

    /// Submitters ranked by how many variants they are in conflict on.
    pub fn total_variants_by_submitter(
        &self,
        min_conflict_level: i64,
    ) -> Result<Vec<SubmitterCount>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT c.submitter1_id,
                    COALESCE(i.name, CAST(c.submitter1_id AS TEXT)) AS submitter_name,
                    COUNT(DISTINCT c.variant_id) AS count
             FROM current_conflicts c
             LEFT JOIN submitter_info i ON i.id = c.submitter1_id
             WHERE c.conflict_level >= ?1
             GROUP BY c.submitter1_id
             ORDER BY count DESC, submitter_name",
        )?;
        let rows = stmt.query_map(params![min_conflict_level], submitter_count)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Date of the latest release, if anything has been loaded.
    pub fn max_date(&self) -> Result<Option<String>> {
        let date = self
            .conn
            .query_row("SELECT MAX(date) FROM submissions", [], |row| row.get(0))?;
        Ok(date)
    }

    /// Number of distinct significance terms in use in each release.
    pub fn total_significance_terms_over_time(&self) -> Result<Vec<DateCount>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT date, COUNT(DISTINCT significance) FROM submissions
             GROUP BY date ORDER BY date",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(DateCount {
                date: row.get(0)?,
                count: count_at(row, 1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Terms still used in the latest release, in significance order.
    pub fn significance_term_info(&self) -> Result<Vec<SignificanceTermInfo>> {
        let mut terms = self.term_info(
            "SELECT significance, MIN(date), MAX(date) FROM submissions
             GROUP BY significance
             HAVING MAX(date) = (SELECT MAX(date) FROM submissions)",
        )?;
        terms.sort_by(|a, b| compare_significance(&a.significance, &b.significance));
        Ok(terms)
    }

    /// Terms that no longer appear in the latest release, most recently dropped first.
    pub fn old_significance_term_info(&self) -> Result<Vec<SignificanceTermInfo>> {
        self.term_info(
            "SELECT significance, MIN(date), MAX(date) AS last_seen FROM submissions
             GROUP BY significance
             HAVING MAX(date) < (SELECT MAX(date) FROM submissions)
             ORDER BY last_seen DESC, significance",
        )
    }

    fn term_info(&self, sql: &str) -> Result<Vec<SignificanceTermInfo>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(SignificanceTermInfo {
                significance: row.get(0)?,
                first_seen: row.get(1)?,
                last_seen: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Submitters using `significance` in the latest release.
    pub fn total_significance_terms(&self, significance: &str) -> Result<Vec<SubmitterCount>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT s.submitter_id,
                    COALESCE(i.name, CAST(s.submitter_id AS TEXT)) AS submitter_name,
                    COUNT(*) AS count
             FROM current_submissions s
             LEFT JOIN submitter_info i ON i.id = s.submitter_id
             WHERE s.significance = ?1
             GROUP BY s.submitter_id
             ORDER BY count DESC, submitter_name",
        )?;
        let rows = stmt.query_map(params![significance], submitter_count)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn total_submissions_by_gene(&self, filters: &FilterSet) -> Result<Vec<LabelCount>> {
        let sql = format!(
            "SELECT s.gene, COUNT(*) AS count
             FROM current_submissions s
             WHERE s.gene != '' AND {SUBMISSION_FILTER_SQL}
             GROUP BY s.gene
             ORDER BY count DESC, s.gene"
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(
            named_params! {
                ":min_stars": filters.min_stars,
                ":method": filters.method.as_deref(),
                ":min_conflict_level": filters.min_conflict_level,
            },
            |row| {
                Ok(LabelCount {
                    label: row.get(0)?,
                    count: count_at(row, 1)?,
                })
            },
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn total_submissions_by_variant(
        &self,
        gene: &str,
        filters: &FilterSet,
    ) -> Result<Vec<VariantCount>> {
        let sql = format!(
            "SELECT s.variant_id, MAX(s.variant_name), COUNT(*) AS count
             FROM current_submissions s
             WHERE s.gene = :gene AND {SUBMISSION_FILTER_SQL}
             GROUP BY s.variant_id
             ORDER BY count DESC, MAX(s.variant_name)"
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(
            named_params! {
                ":gene": gene,
                ":min_stars": filters.min_stars,
                ":method": filters.method.as_deref(),
                ":min_conflict_level": filters.min_conflict_level,
            },
            |row| {
                Ok(VariantCount {
                    variant_id: row.get(0)?,
                    variant_name: row.get(1)?,
                    count: count_at(row, 2)?,
                })
            },
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Latest-release submissions on one variant.
    pub fn submissions(&self, variant_id: i64, filters: &FilterSet) -> Result<Vec<Submission>> {
        let sql = format!(
            "SELECT s.submitter_id,
                    COALESCE(i.name, CAST(s.submitter_id AS TEXT)) AS submitter_name,
                    s.rcv, s.significance, s.last_eval, s.review_status,
                    s.star_level, s.method, s.description
             FROM current_submissions s
             LEFT JOIN submitter_info i ON i.id = s.submitter_id
             WHERE s.variant_id = :variant_id AND {SUBMISSION_FILTER_SQL}
             ORDER BY s.star_level DESC, submitter_name, s.rcv"
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(
            named_params! {
                ":variant_id": variant_id,
                ":min_stars": filters.min_stars,
                ":method": filters.method.as_deref(),
                ":min_conflict_level": filters.min_conflict_level,
            },
            |row| {
                Ok(Submission {
                    submitter_id: row.get(0)?,
                    submitter_name: row.get(1)?,
                    rcv: row.get(2)?,
                    significance: row.get(3)?,
                    last_eval: row.get(4)?,
                    review_status: row.get(5)?,
                    star_level: row.get(6)?,
                    method: row.get(7)?,
                    description: row.get(8)?,
                })
            },
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn variant_name(&self, variant_id: i64) -> Result<Option<String>> {
        let name = self
            .conn
            .query_row(
                "SELECT variant_name FROM submissions
                 WHERE variant_id = ?1
                 ORDER BY date DESC
                 LIMIT 1",
                params![variant_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(name)
    }

    pub fn total_conflicting_submissions_by_method_over_time(&self) -> Result<Vec<DatedCount>> {
        self.dated_counts(CONFLICTING_METHOD_OVER_TIME_SQL)
    }

    pub fn total_submissions_by_method_over_time(&self) -> Result<Vec<DatedCount>> {
        self.dated_counts(METHOD_OVER_TIME_SQL)
    }

    fn dated_counts(&self, sql: &str) -> Result<Vec<DatedCount>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(DatedCount {
                date: row.get(0)?,
                series: row.get(1)?,
                count: count_at(row, 2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Latest-release submissions per submitter country; unknown countries are `""`.
    pub fn total_submissions_by_country(&self) -> Result<Vec<LabelCount>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT COALESCE(i.country, '') AS country, COUNT(*) AS count
             FROM current_submissions s
             LEFT JOIN submitter_info i ON i.id = s.submitter_id
             GROUP BY country
             ORDER BY count DESC, country",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(LabelCount {
                label: row.get(0)?,
                count: count_at(row, 1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn total_submissions_by_submitter(&self, country: &str) -> Result<Vec<SubmitterCount>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT s.submitter_id,
                    COALESCE(i.name, CAST(s.submitter_id AS TEXT)) AS submitter_name,
                    COUNT(*) AS count
             FROM current_submissions s
             LEFT JOIN submitter_info i ON i.id = s.submitter_id
             WHERE COALESCE(i.country, '') = ?1
             GROUP BY s.submitter_id
             ORDER BY count DESC, submitter_name",
        )?;
        let rows = stmt.query_map(params![country], submitter_count)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn overview_row(row: &Row<'_>) -> rusqlite::Result<ConflictOverviewRow> {
    Ok(ConflictOverviewRow {
        clin_sig1: row.get(0)?,
        clin_sig2: row.get(1)?,
        submitter2_id: row.get(2)?,
        submitter2_name: row.get(3)?,
        conflict_level: row.get(4)?,
        count: count_at(row, 5)?,
    })
}

fn submitter_count(row: &Row<'_>) -> rusqlite::Result<SubmitterCount> {
    Ok(SubmitterCount {
        submitter_id: row.get(0)?,
        submitter_name: row.get(1)?,
        count: count_at(row, 2)?,
    })
}

/// SQLite integers are signed; counts never are.
fn count_at(row: &Row<'_>, index: usize) -> rusqlite::Result<u64> {
    let count: i64 = row.get(index)?;
    Ok(u64::try_from(count).unwrap_or(0))
}
