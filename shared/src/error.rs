//! Error types for the calendar-tools functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving a calendar-tools request.
///
/// Variants follow the three error classes of the request contract:
/// client input (400/405), collaborator failures carrying the
/// collaborator's status, and everything else (500).
#[derive(Error, Debug)]
pub enum Error {
    /// Client sent a malformed, missing, or invalid field
    #[error("{0}")]
    Validation(String),

    /// Endpoint called with an unsupported HTTP method
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Deployment configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Secret store error
    #[error("Secrets Manager error: {0}")]
    Secrets(String),

    /// Calendar provider rejected the call; `status` is the provider's own
    #[error("An API error occurred: {message}")]
    Provider { status: u16, message: String },

    /// Transport-level failure talking to a collaborator
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::MethodNotAllowed(_) => 405,
            Error::Provider { status, .. } => *status,
            _ => 500,
        }
    }
}
