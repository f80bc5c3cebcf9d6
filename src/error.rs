//! Error types for stackx-topn
//!
//! Every fallible operation in the crate returns [`Result`]. The variants map onto
//! the three failure kinds a retrieval can end in:
//! - the remote API answered with a non-success status ([`Error::RemoteRequest`])
//! - the transport never completed the request ([`Error::Network`])
//! - anything else that surfaced during the run

use thiserror::Error;

/// Result type alias for stackx-topn operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message used when a failing response carries no `error_message`
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong.";

/// Code used when a failing response carries no `error_id`
pub const DEFAULT_ERROR_CODE: i64 = 500;

/// Main error type for stackx-topn
#[derive(Debug, Error)]
pub enum Error {
    /// A page request came back with a non-success status
    #[error("Unable to fetch page #{page}: {message} | Error code: {code}")]
    RemoteRequest {
        /// 1-based number of the page that failed
        page: u32,
        /// Message reported by the API (or the default message)
        message: String,
        /// Error id reported by the API (or 500)
        code: i64,
    },

    /// The transport failed before a response was received
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response body could not be decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "batch_width")
        key: Option<String>,
    },

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a configuration error for the given key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Build a [`Error::RemoteRequest`] from a failing response body.
    ///
    /// `error_message` and `error_id` are read independently; each one that is
    /// missing or mistyped falls back to [`DEFAULT_ERROR_MESSAGE`] or
    /// [`DEFAULT_ERROR_CODE`] on its own.
    pub fn from_remote_body(page: u32, body: &serde_json::Value) -> Self {
        let message = body
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or(DEFAULT_ERROR_MESSAGE);
        let code = body
            .get("error_id")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or(DEFAULT_ERROR_CODE);

        Error::RemoteRequest {
            page,
            message: message.to_string(),
            code,
        }
    }

    /// Whether the error came from the transport layer rather than the API
    /// or this crate.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// The page number the error is attributed to, when known
    pub fn page(&self) -> Option<u32> {
        match self {
            Error::RemoteRequest { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Machine-readable error kind, used for structured log fields and events
    pub fn kind(&self) -> &'static str {
        match self {
            Error::RemoteRequest { .. } => "remote_request",
            Error::Network(_) => "transport",
            Error::Serialization(_) => "serialization",
            Error::Config { .. } => "config",
            Error::Other(_) => "unexpected",
        }
    }
}
