//! Configuration types for stackx-topn

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remote search API settings
///
/// Everything needed to build the transport session and the fixed part of
/// every page query. Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root (default: "https://api.stackexchange.com/2.3")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API method appended to the root (default: "search")
    #[serde(default = "default_method")]
    pub method: String,

    /// Site the query is scoped to (default: "stackoverflow")
    #[serde(default = "default_site")]
    pub site: String,

    /// Server-side response filter id
    ///
    /// Narrows each returned item to answer_count, link, view_count,
    /// creation_date and question_id. Created once at
    /// https://api.stackexchange.com/docs/create-filter and never changed per request.
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Server-side sort order (default: "creation")
    #[serde(default = "default_sort")]
    pub sort: String,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            method: default_method(),
            site: default_site(),
            filter: default_filter(),
            sort: default_sort(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Full endpoint URL, e.g. `https://api.stackexchange.com/2.3/search`
    pub fn endpoint(&self) -> Result<url::Url> {
        let root = format!("{}/", self.base_url.trim_end_matches('/'));
        let base = url::Url::parse(&root)
            .map_err(|e| Error::config("base_url", format!("invalid base URL: {}", e)))?;
        base.join(self.method.trim_start_matches('/'))
            .map_err(|e| Error::config("method", format!("invalid API method: {}", e)))
    }
}

/// Defaults for a single retrieval run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Items requested per page (default: 100, the API maximum)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum number of pages fetched concurrently (default: 10)
    #[serde(default = "default_batch_width")]
    pub batch_width: usize,

    /// Number of results kept (default: 5)
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// How far back the default from-date reaches, in days (default: 7)
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            batch_width: default_batch_width(),
            top_n: default_top_n(),
            lookback_days: default_lookback_days(),
        }
    }
}

/// Main configuration
///
/// - [`api`](ApiConfig) — endpoint, site, response filter, transport settings
/// - [`retrieval`](RetrievalConfig) — page size, concurrency and result size defaults
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote search API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Retrieval defaults
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl Config {
    /// Check the configuration for values the scheduler cannot run with
    pub fn validate(&self) -> Result<()> {
        self.api.endpoint()?;

        if self.retrieval.page_size == 0 {
            return Err(Error::config("page_size", "page size must be at least 1"));
        }
        if self.retrieval.batch_width == 0 {
            return Err(Error::config("batch_width", "batch width must be at least 1"));
        }
        if self.retrieval.lookback_days < 0 {
            return Err(Error::config(
                "lookback_days",
                "lookback window cannot be negative",
            ));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.stackexchange.com/2.3".to_string()
}

fn default_method() -> String {
    "search".to_string()
}

fn default_site() -> String {
    "stackoverflow".to_string()
}

fn default_filter() -> String {
    "!m9aF_UAbWOtMBiDgLzfN4Q".to_string()
}

fn default_sort() -> String {
    "creation".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("stackx-topn/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_batch_width() -> usize {
    10
}

fn default_top_n() -> usize {
    5
}

fn default_lookback_days() -> i64 {
    7
}

/// Reads and writes `ApiConfig::timeout` as a plain number of seconds, so a
/// config file can say `"timeout": 10`.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
