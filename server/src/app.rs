use crate::error::AppError;
use crate::handlers;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use clinvar_store::ClinvarStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone, Debug)]
pub struct ServerOptions {
    pub db_path: PathBuf,
    pub listen: SocketAddr,
}

#[derive(Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path: Arc::new(db_path),
        }
    }

    /// Runs `f` against a fresh read-only connection on the blocking pool.
    pub(crate) async fn with_store<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&ClinvarStore) -> clinvar_store::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = Arc::clone(&self.db_path);
        let result = tokio::task::spawn_blocking(move || {
            let store = ClinvarStore::open(&db_path)?;
            f(&store)
        })
        .await?;
        Ok(result?)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/conflicting-variants-by-significance",
            get(handlers::significance_overview),
        )
        .route(
            "/conflicting-variants-by-significance/{significance1}/{significance2}",
            get(handlers::significance_variants),
        )
        .route(
            "/conflicting-variants-by-submitter",
            get(handlers::submitter_index),
        )
        .route(
            "/conflicting-variants-by-submitter/{submitter1_id}",
            get(handlers::one_submitter),
        )
        .route(
            "/conflicting-variants-by-submitter/{submitter1_id}/{submitter2_id}",
            get(handlers::two_submitters),
        )
        .route(
            "/conflicting-variants-by-submitter/{submitter1_id}/{submitter2_id}/{significance1}/{significance2}",
            get(handlers::submitter_variants),
        )
        .route("/significance-terms", get(handlers::significance_terms_index))
        .route("/significance-terms/", get(handlers::empty_significance_term))
        .route("/significance-terms/{term}", get(handlers::significance_term))
        .route("/submissions-by-gene", get(handlers::genes_index))
        .route("/submissions-by-gene/{gene}", get(handlers::variants_by_gene))
        .route(
            "/submissions-by-variant/{variant_id}",
            get(handlers::submissions_by_variant),
        )
        .route(
            "/total-conflicting-submissions-by-method",
            get(handlers::conflicting_submissions_by_method),
        )
        .route(
            "/total-submissions-by-method",
            get(handlers::submissions_by_method),
        )
        .route(
            "/total-submissions-by-country",
            get(handlers::countries_index),
        )
        .route(
            "/total-submissions-by-country/",
            get(handlers::empty_country),
        )
        .route(
            "/total-submissions-by-country/{country}",
            get(handlers::country),
        )
        .fallback(handlers::not_found)
        .with_state(state)
}

pub async fn run_server(opts: ServerOptions) -> Result<()> {
    let listener = TcpListener::bind(opts.listen).await?;
    let addr = listener.local_addr()?;
    info!(
        "serving ClinVar conflict reports from {} on http://{addr}",
        opts.db_path.display()
    );
    let app = router(AppState::new(opts.db_path));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
