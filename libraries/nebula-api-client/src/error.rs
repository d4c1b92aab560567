//! Error types for the Nebula API client.

use nebula_core::NebulaError;
use thiserror::Error;

/// Errors that can occur when talking to the Nebula backend.
#[derive(Error, Debug)]
pub enum ApiClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid backend URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse backend response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Response parsed but a required field was absent
    #[error("Response is missing {0}")]
    MissingField(&'static str),

    /// Backend is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;

impl From<ApiClientError> for NebulaError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Request(e) if e.is_decode() => NebulaError::parse(e.to_string()),
            ApiClientError::Request(e) => NebulaError::network(e.to_string()),
            ApiClientError::ServerUnreachable(msg) => NebulaError::Network(msg),
            ApiClientError::ServerError { status, message } => {
                NebulaError::Api { status, message }
            }
            ApiClientError::ParseError(msg) => NebulaError::Parse(msg),
            ApiClientError::MissingField(field) => {
                NebulaError::parse(format!("response is missing {field}"))
            }
            ApiClientError::InvalidUrl(msg) => NebulaError::InvalidInput(msg),
        }
    }
}
