use std::fmt;
use thiserror::Error;

/// Outcome of a failed fetch, as seen by the query pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// The server answered with a non-200 status code
    Http(u16),
    /// The request did not complete within the configured timeout
    Timeout,
    /// Connection, TLS or body decoding failure
    Unreachable,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Http(code) => write!(f, "HTTP {code}"),
            FetchStatus::Timeout => write!(f, "timeout"),
            FetchStatus::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Recoverable failures of a single user query.
///
/// These never carry user-facing text; [`crate::ui`] decides how they are shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The input does not resolve to any town of the reference table
    #[error("town not found: {input}")]
    TownNotFound { input: String },
    /// The remote page could not be fetched
    #[error("fetch failed: {status}")]
    FetchFailed { status: FetchStatus },
    /// The fetched document does not have the expected shape
    #[error("parse error: {reason}")]
    ParseError { reason: String },
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Reference table missing or malformed, fatal at startup
    #[error("Failed to load reference table: {0}")]
    DataLoadError(String),
    /// A user query failed
    #[error(transparent)]
    Query(#[from] QueryError),
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    UrlError(String),
    /// Failed to parse JSON/HTML content
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Invalid input format
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::DataLoadError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
