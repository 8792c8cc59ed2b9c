use std::result;

use thiserror::Error;

/// Error types for PubMed affiliation filter operations
#[derive(Error, Debug)]
pub enum PubMedError {
    /// Client or classifier configuration is unusable
    ///
    /// Raised at construction time, e.g. when no contact email was supplied
    /// and `NCBI_EMAIL` is not set. Never retried.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A call to the E-utilities service failed
    #[error("Remote service error: {0}")]
    RemoteService(#[from] RemoteServiceError),
}

/// Failure modes of a single ESearch/EFetch exchange
#[derive(Error, Debug)]
pub enum RemoteServiceError {
    /// HTTP request failed (connection, DNS, timeout)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    Xml(String),

    /// The service answered 200 OK but reported an error in the payload
    #[error("NCBI API error: {0}")]
    Api(String),
}

impl PubMedError {
    /// Shorthand for building a [`PubMedError::Configuration`]
    pub fn configuration(message: impl Into<String>) -> Self {
        PubMedError::Configuration(message.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, PubMedError::Configuration(_))
    }

    pub fn is_remote_service(&self) -> bool {
        matches!(self, PubMedError::RemoteService(_))
    }
}

impl From<reqwest::Error> for PubMedError {
    fn from(err: reqwest::Error) -> Self {
        PubMedError::RemoteService(RemoteServiceError::Request(err))
    }
}

impl From<serde_json::Error> for PubMedError {
    fn from(err: serde_json::Error) -> Self {
        PubMedError::RemoteService(RemoteServiceError::Json(err))
    }
}

pub type Result<T> = result::Result<T, PubMedError>;
