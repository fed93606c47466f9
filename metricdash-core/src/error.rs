use thiserror::Error;

/// Common result type for core operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Failure of a single metrics request. Every variant is a network failure
/// and renders through the same banner template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("timeout of {0}ms exceeded")]
    Timeout(u64),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed with status code {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid endpoint url: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
