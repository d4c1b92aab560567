//! Main Nebula backend client.

use crate::catalog::CatalogClient;
use crate::error::{ApiClientError, Result};
use crate::likes::LikesClient;
use crate::playlists::PlaylistClient;
use crate::types::ApiConfig;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Main client for interacting with a Nebula backend.
///
/// Cheap to clone; clones share the connection pool.
///
/// # Example
///
/// ```ignore
/// use nebula_api_client::{ApiConfig, NebulaClient};
///
/// let client = NebulaClient::new(ApiConfig::new("http://127.0.0.1:8000"))?;
/// let liked = client.likes().liked().await?;
/// println!("{} liked songs", liked.len());
/// ```
#[derive(Debug, Clone)]
pub struct NebulaClient {
    http: Client,
    base_url: String,
}

impl NebulaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        // Validate URL
        if config.base_url.trim().is_empty() {
            return Err(ApiClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&base_url).map_err(|e| ApiClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("NebulaPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(base_url = %base_url, "Created backend client");

        Ok(Self { http, base_url })
    }

    /// Get the normalized backend URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search, stream resolution, track info and autoplay.
    pub fn catalog(&self) -> CatalogClient<'_> {
        CatalogClient::new(&self.http, &self.base_url)
    }

    /// Like, unlike and liked-list operations.
    pub fn likes(&self) -> LikesClient<'_> {
        LikesClient::new(&self.http, &self.base_url)
    }

    /// Playlist operations.
    pub fn playlist(&self) -> PlaylistClient<'_> {
        PlaylistClient::new(&self.http, &self.base_url)
    }
}

/// Map transport failures, separating "could not reach the backend" from
/// other request errors.
pub(crate) fn transport_error(e: reqwest::Error) -> ApiClientError {
    if e.is_connect() || e.is_timeout() {
        ApiClientError::ServerUnreachable(e.to_string())
    } else {
        ApiClientError::Request(e)
    }
}

/// Turn a non-success status into `ServerError`, passing success through.
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(ApiClientError::ServerError {
            status: status.as_u16(),
            message: error_text,
        })
    }
}

/// Check the status and decode a JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let response = ensure_success(response).await?;
    response
        .json()
        .await
        .map_err(|e| ApiClientError::ParseError(format!("Failed to parse {} response: {}", what, e)))
}
