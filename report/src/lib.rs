/*!
# ClinVar conflict reports

Request-independent logic behind the conflict reports: significance ranking,
the significance × significance breakdown, per-submitter summaries,
time-series pivots and the typed filters resolved from a request.

```text
query string / path segments
  └─> params (FilterSet, drill-down level)
        └─> store rows
              └─> breakdown / summary / timeline
                    └─> rendered report
```
*/

pub mod breakdown;
mod error;
pub mod model;
pub mod params;
pub mod significance;
pub mod summary;
pub mod timeline;

pub use breakdown::Breakdown;
pub use error::ParamError;
pub use error::Result;
pub use model::ConflictOverviewRow;
pub use model::SubmitterInfo;
pub use params::FilterSet;
pub use params::RawFilters;
pub use params::SignificanceDrillDown;
pub use params::SubmitterDrillDown;
pub use params::decode_path_segment;
pub use params::parse_id_segment;
pub use significance::SIGNIFICANCE_RANKS;
pub use significance::compare_significance;
pub use significance::significance_rank;
pub use summary::SubmitterSummary;
pub use summary::summarize_by_submitter;
pub use timeline::TimeSeriesTable;
