use crate::pages::ErrorPage;
use askama::Template;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use clinvar_report::ParamError;
use clinvar_store::StoreError;
use tracing::debug;
use tracing::error;

/// Failure of a single report request, rendered as an HTML error page.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ParamError> for AppError {
    fn from(err: ParamError) -> Self {
        let status = match err {
            ParamError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ParamError::NotFound { .. } => StatusCode::NOT_FOUND,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        Self::internal(err)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("request failed: {}", self.message);
        } else {
            debug!("request rejected with {}: {}", self.status, self.message);
        }
        let page = ErrorPage {
            title: self
                .status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            status: self.status.as_u16(),
            // Store and template failures stay in the log.
            message: if self.status.is_server_error() {
                "The report could not be generated.".to_string()
            } else {
                self.message
            },
        };
        match page.render() {
            Ok(body) => (self.status, Html(body)).into_response(),
            Err(err) => {
                error!("failed to render error page: {err}");
                (self.status, page.message).into_response()
            }
        }
    }
}
