use anyhow::Result;
use clinvar_server::AppState;
use clinvar_server::router;
use reqwest::StatusCode;
use std::path::PathBuf;
use store_test_support::Fixture;
use store_test_support::seeded_database;
use tokio::net::TcpListener;

/// A report server on an ephemeral port, serving its own fixture database.
pub struct TestServer {
    base_url: String,
    _fixture: Option<Fixture>,
}

impl TestServer {
    pub async fn seeded() -> Result<Self> {
        let fixture = seeded_database()?;
        let db_path = fixture.db_path.clone();
        Self::spawn(db_path, Some(fixture)).await
    }

    pub async fn without_database(db_path: PathBuf) -> Result<Self> {
        Self::spawn(db_path, None).await
    }

    async fn spawn(db_path: PathBuf, fixture: Option<Fixture>) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(AppState::new(db_path));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self {
            base_url: format!("http://{addr}"),
            _fixture: fixture,
        })
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, String)> {
        let response = reqwest::get(format!("{}{path}", self.base_url)).await?;
        let status = response.status();
        Ok((status, response.text().await?))
    }

    /// Fetches a page that must render successfully.
    pub async fn page(&self, path: &str) -> Result<String> {
        let (status, body) = self.get(path).await?;
        anyhow::ensure!(status == StatusCode::OK, "GET {path} returned {status}");
        Ok(body)
    }
}
