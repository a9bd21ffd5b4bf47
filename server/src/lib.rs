//! HTTP surface of the ClinVar conflict reports: an axum router over
//! [`clinvar_store::ClinvarStore`] that renders every report as HTML.

mod app;
pub mod cli;
mod error;
pub mod format;
mod handlers;
mod pages;
mod views;

pub use app::AppState;
pub use app::ServerOptions;
pub use app::router;
pub use app::run_server;
pub use error::AppError;
