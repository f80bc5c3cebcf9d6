//! Single-page fetch: request, validate, filter.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::client::RemoteClient;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::types::{Page, RawQuestion, RetrievalRequest};

/// Search response envelope
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RawQuestion>,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    quota_remaining: Option<u64>,
}

/// Fetches and filters individual pages for one [`RetrievalRequest`]
pub struct PageFetcher<'a, C: RemoteClient + ?Sized> {
    client: &'a C,
    endpoint: Url,
    api: &'a ApiConfig,
    request: &'a RetrievalRequest,
}

impl<'a, C: RemoteClient + ?Sized> PageFetcher<'a, C> {
    /// Create a fetcher bound to a client, API settings and request
    ///
    /// # Errors
    /// Returns a configuration error if the endpoint URL cannot be built
    pub fn new(client: &'a C, api: &'a ApiConfig, request: &'a RetrievalRequest) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: api.endpoint()?,
            api,
            request,
        })
    }

    /// The request this fetcher serves
    pub fn request(&self) -> &RetrievalRequest {
        self.request
    }

    fn query(&self, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("tagged", self.request.tag.clone()),
            ("intitle", self.request.in_title.clone()),
            ("fromdate", self.request.from_date.timestamp().to_string()),
            ("page", page.to_string()),
            ("pagesize", self.request.page_size.to_string()),
            ("sort", self.api.sort.clone()),
            ("site", self.api.site.clone()),
            ("filter", self.api.filter.clone()),
        ]
    }

    /// Fetch one page and keep only unanswered questions.
    ///
    /// # Errors
    /// - [`Error::RemoteRequest`] if the API answers with a non-success status
    /// - [`Error::Network`] if the transport fails
    /// - [`Error::Serialization`] if a successful body does not decode
    pub async fn fetch(&self, page: u32) -> Result<Page> {
        debug!(page, "fetching page");

        let response = self.client.get(&self.endpoint, &self.query(page)).await?;
        if !response.is_success() {
            debug!(page, status = response.status, "page request failed");
            return Err(Error::from_remote_body(page, &response.body));
        }

        let body: SearchResponse = serde_json::from_value(response.body)?;
        if let Some(quota) = body.quota_remaining {
            debug!(page, quota_remaining = quota, "API quota");
        }

        let returned = body.items.len();
        let items: Vec<_> = body
            .items
            .into_iter()
            .filter_map(RawQuestion::into_unanswered)
            .collect();
        let discarded = returned - items.len();

        debug!(page, kept = items.len(), discarded, total = body.total, "page fetched");

        Ok(Page {
            number: page,
            items,
            discarded,
            total: body.total,
            page_size: self.request.page_size,
        })
    }
}
