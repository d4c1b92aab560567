/// CLI error types
use nebula_api_client::ApiClientError;
use nebula_core::NebulaError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Backend client error: {0}")]
    Client(#[from] ApiClientError),

    #[error(transparent)]
    Nebula(#[from] NebulaError),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
