//! Error types for the maqraa client

use maqraa_api::{ApiError, ApiFailure};
use thiserror::Error;

/// Errors that can occur when talking to the maqraa backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Server answered with a non-success HTTP status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw body returned by the server
        message: String,
    },

    /// Server answered 2xx but the envelope carries `isSuccess: false`
    #[error("backend failure: {}", join_messages(.0))]
    Backend(Vec<ApiError>),

    /// A normalized page contained items that do not match the expected DTO
    #[error("response decode failed: {0}")]
    Decode(String),

    /// Operation requires an authenticated session and none is present
    #[error("not authenticated")]
    NotAuthenticated,

    /// Session/preferences storage failed
    #[error("session storage error: {0}")]
    Session(String),

    /// Configuration file could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

fn join_messages(errors: &[ApiError]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ApiFailure> for ClientError {
    fn from(failure: ApiFailure) -> Self {
        match failure {
            ApiFailure::Rejected(errors) => ClientError::Backend(errors),
            ApiFailure::MissingData => {
                ClientError::Decode("successful envelope without a payload".to_string())
            }
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
