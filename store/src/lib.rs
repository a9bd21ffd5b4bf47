//! SQLite access for the ClinVar conflict reports.
//!
//! Every report query lives on [`ClinvarStore`]; callers open one store per
//! request and drop it when the page is rendered.

mod error;
pub mod rows;
pub mod schema;
mod store;

pub use error::Result;
pub use error::StoreError;
pub use rows::DateCount;
pub use rows::DatedCount;
pub use rows::LabelCount;
pub use rows::SignificanceTermInfo;
pub use rows::Submission;
pub use rows::SubmitterCount;
pub use rows::VariantConflict;
pub use rows::VariantCount;
pub use schema::create_schema;
pub use store::ClinvarStore;
pub use store::SubmitterPair;
