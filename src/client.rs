//! Transport seam between the page fetcher and the remote API.
//!
//! [`RemoteClient`] performs exactly one GET and hands back the status plus the
//! decoded JSON body. It knows nothing about pagination or filtering, which keeps
//! the scheduler testable against in-memory fakes.

use async_trait::async_trait;
use tracing::trace;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// Response of a single GET
#[derive(Clone, Debug, PartialEq)]
pub struct RemoteResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded body (`Null` when a failing response had no JSON body)
    pub body: serde_json::Value,
}

impl RemoteResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP GET with query parameters
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Issue a GET to `url` with `query` appended.
    ///
    /// Transport failures are returned as [`Error::Network`]; non-success statuses
    /// are *not* errors at this level.
    async fn get(&self, url: &Url, query: &[(&'static str, String)]) -> Result<RemoteResponse>;
}

/// [`RemoteClient`] backed by a pooled `reqwest` session
///
/// Dropping the client releases its connection pool.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http_client: reqwest::Client,
}

impl HttpClient {
    /// Build a session from API settings
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl RemoteClient for HttpClient {
    async fn get(&self, url: &Url, query: &[(&'static str, String)]) -> Result<RemoteResponse> {
        let response = self
            .http_client
            .get(url.clone())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        trace!(status = status.as_u16(), len = bytes.len(), "received response");

        let body = if status.is_success() {
            serde_json::from_slice(&bytes)?
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        Ok(RemoteResponse {
            status: status.as_u16(),
            body,
        })
    }
}
