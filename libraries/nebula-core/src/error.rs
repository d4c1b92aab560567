/// Core error types for Nebula Player
use thiserror::Error;

/// Result type alias using `NebulaError`
pub type Result<T> = std::result::Result<T, NebulaError>;

/// Core error type for Nebula Player
#[derive(Error, Debug)]
pub enum NebulaError {
    /// Transport-level failure (connection refused, reset, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Backend answered with a body we could not use
    #[error("Parse error: {0}")]
    Parse(String),

    /// Durable client storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// The audio output rejected an operation
    #[error("Output error: {0}")]
    Output(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl NebulaError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an output error
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Whether the failure happened before the backend produced a response
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
