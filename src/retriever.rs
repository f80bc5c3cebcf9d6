//! Top-level entry point tying configuration, transport and scheduler together.

use tokio::sync::broadcast;
use tracing::debug;

use crate::client::{HttpClient, RemoteClient};
use crate::config::Config;
use crate::error::Result;
use crate::fetcher::PageFetcher;
use crate::scheduler::BatchScheduler;
use crate::types::{Event, Question, RetrievalRequest};

/// Finds the most viewed unanswered questions for a query
///
/// A `Retriever` is cheap to keep around: it holds configuration and the event
/// channel only. Each retrieval opens its own HTTP session and closes it when the
/// call returns, on success and on failure alike.
pub struct Retriever {
    config: Config,
    /// Event broadcast channel sender (multiple subscribers supported)
    event_tx: broadcast::Sender<Event>,
}

impl Retriever {
    /// Create a retriever after validating `config`
    ///
    /// # Errors
    /// Returns [`Error::Config`](crate::Error::Config) for invalid settings
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let (event_tx, _rx) = broadcast::channel(1000);
        Ok(Self { config, event_tx })
    }

    /// Current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Subscribe to retrieval events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Build a request for `tag` from the configured defaults.
    ///
    /// The from-date is evaluated now, not when the retriever was created.
    pub fn request(&self, tag: impl Into<String>) -> RetrievalRequest {
        RetrievalRequest::with_defaults(tag, &self.config.retrieval)
    }

    /// Run one retrieval over a fresh HTTP session
    ///
    /// # Errors
    /// See [`BatchScheduler::run`]; transport failures surface as
    /// [`Error::Network`](crate::Error::Network).
    pub async fn top_unanswered(&self, request: &RetrievalRequest) -> Result<Vec<Question>> {
        let client = HttpClient::new(&self.config.api)?;
        debug!(tag = %request.tag, "HTTP session opened");
        self.top_unanswered_with(&client, request).await
    }

    /// Run one retrieval over a caller-provided client
    pub async fn top_unanswered_with<C: RemoteClient + ?Sized>(
        &self,
        client: &C,
        request: &RetrievalRequest,
    ) -> Result<Vec<Question>> {
        let fetcher = PageFetcher::new(client, &self.config.api, request)?;
        BatchScheduler::new(fetcher)
            .with_events(&self.event_tx)
            .run()
            .await
    }
}
