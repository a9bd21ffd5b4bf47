//! Typed request filters and drill-down levels.
//!
//! Query strings arrive as loose optional strings; everything downstream of
//! this module works with [`FilterSet`] and the drill-down enums instead.

use crate::error::ParamError;
use crate::error::Result;
use serde::Serialize;

/// Escape used by report links for a `/` inside a single path segment.
pub const ESCAPED_SLASH: &str = "%2F";

/// Query-string parameters exactly as received.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawFilters {
    pub min_stars: Option<String>,
    pub method: Option<String>,
    pub corrected_terms: Option<String>,
    pub min_conflict_level: Option<String>,
}

impl RawFilters {
    /// Collects the known keys from decoded query pairs. A repeated key keeps
    /// its first value; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "min_stars" => &mut raw.min_stars,
                "method" => &mut raw.method,
                "corrected_terms" => &mut raw.corrected_terms,
                "min_conflict_level" => &mut raw.min_conflict_level,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        raw
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct FilterSet {
    pub min_stars: i64,
    pub method: Option<String>,
    pub corrected_terms: Option<String>,
    pub min_conflict_level: i64,
}

impl FilterSet {
    pub fn resolve(raw: &RawFilters) -> Result<Self> {
        Ok(Self {
            min_stars: int_param("min_stars", raw.min_stars.as_deref())?,
            method: opaque_param(raw.method.as_deref()),
            corrected_terms: opaque_param(raw.corrected_terms.as_deref()),
            min_conflict_level: int_param("min_conflict_level", raw.min_conflict_level.as_deref())?,
        })
    }

    pub fn uses_corrected_terms(&self) -> bool {
        self.corrected_terms.is_some()
    }
}

fn int_param(name: &'static str, value: Option<&str>) -> Result<i64> {
    match value {
        None | Some("") => Ok(0),
        Some(value) => value.trim().parse().map_err(|_| ParamError::BadRequest {
            name,
            value: value.to_string(),
        }),
    }
}

fn opaque_param(value: Option<&str>) -> Option<String> {
    value.filter(|value| !value.is_empty()).map(str::to_string)
}

/// Restores slashes in a segment escaped as `%2F`. No other decoding happens.
pub fn decode_path_segment(segment: &str) -> String {
    segment.replace(ESCAPED_SLASH, "/")
}

/// Parses a numeric id from a path segment; anything else is a missing page.
pub fn parse_id_segment(segment: &str) -> Result<i64> {
    segment.parse().map_err(|_| ParamError::NotFound {
        segment: segment.to_string(),
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignificanceDrillDown {
    Overview,
    Variants {
        significance1: String,
        significance2: String,
    },
}

impl SignificanceDrillDown {
    pub fn resolve(significances: Option<(&str, &str)>) -> Self {
        match significances {
            None => Self::Overview,
            Some((significance1, significance2)) => Self::Variants {
                significance1: decode_path_segment(significance1),
                significance2: decode_path_segment(significance2),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitterDrillDown {
    Index,
    OneSubmitter {
        submitter1_id: i64,
    },
    TwoSubmitters {
        submitter1_id: i64,
        submitter2_id: i64,
    },
    Variants {
        submitter1_id: i64,
        submitter2_id: i64,
        significance1: String,
        significance2: String,
    },
}

impl SubmitterDrillDown {
    /// Resolves the path segments after `/conflicting-variants-by-submitter`.
    ///
    /// Accepts zero, one, two or four segments; each level requires the ones
    /// above it, so the router never produces any other count.
    pub fn resolve<S: AsRef<str>>(segments: &[S]) -> Result<Self> {
        let Some(first) = segments.first() else {
            return Ok(Self::Index);
        };
        let submitter1_id = parse_id_segment(first.as_ref())?;
        let Some(second) = segments.get(1) else {
            return Ok(Self::OneSubmitter { submitter1_id });
        };
        let submitter2_id = parse_id_segment(second.as_ref())?;
        match (segments.get(2), segments.get(3)) {
            (Some(significance1), Some(significance2)) => Ok(Self::Variants {
                submitter1_id,
                submitter2_id,
                significance1: decode_path_segment(significance1.as_ref()),
                significance2: decode_path_segment(significance2.as_ref()),
            }),
            _ => Ok(Self::TwoSubmitters {
                submitter1_id,
                submitter2_id,
            }),
        }
    }
}
