//! Error types for the job board client.
//!
//! `JobBoardError` carries detailed context for library consumers. Errors
//! stored in the query cache are kept as rendered messages, since
//! `reqwest::Error` is not `Clone`; a request that joins an in-flight fetch
//! receives that message back as [`JobBoardError::Query`].

use thiserror::Error;

/// Main error type for the job board library.
#[derive(Debug, Error)]
pub enum JobBoardError {
    /// Request could not be sent or timed out.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Job feed returned status {status} for {url}")]
    ApiStatus { status: u16, url: String },

    /// Response body was not the expected JSON document.
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A page request succeeded but contained no jobs.
    #[error("No jobs found on page {page}")]
    EmptyResult { page: u32 },

    /// Connectivity observer reports no connection.
    #[error("No internet connection")]
    Offline,

    /// Job identifier cannot be used as a URL path segment.
    #[error("Invalid job id: '{0}'. Expected a non-empty identifier without '/', '?', '#' or whitespace")]
    InvalidJobId(String),

    /// Page size must be positive.
    #[error("Invalid page size: {0}. Expected a value greater than 0")]
    InvalidPageSize(u32),

    /// An error replayed from a shared query cache entry.
    #[error("{0}")]
    Query(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization of local state failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl JobBoardError {
    /// Whether the failure happened before any HTTP response arrived.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Network(e) => e.is_connect(),
            Self::Offline => true,
            _ => false,
        }
    }
}

/// Result type alias for job board operations.
pub type Result<T> = std::result::Result<T, JobBoardError>;
