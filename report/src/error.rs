use thiserror::Error;

/// Rejection of a request before any query runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// Malformed numeric query parameter.
    #[error("query parameter `{name}` must be an integer, got {value:?}")]
    BadRequest { name: &'static str, value: String },

    /// Malformed numeric path identifier.
    #[error("no report for path segment {segment:?}")]
    NotFound { segment: String },
}

pub type Result<T> = std::result::Result<T, ParamError>;
