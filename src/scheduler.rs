//! Batched concurrent pagination and merge.
//!
//! Page 1 is fetched on its own to learn how many pages exist. The remaining
//! pages are fetched in groups whose requests run concurrently; groups run one
//! after another, and each group is folded into the running top-N before the
//! next one starts. At most `batch_width` requests are ever in flight.
//!
//! Group sizes are planned remainder first: with 3 pages left and a width of 2
//! the first group holds 1 page and the second 2. See [`GroupPlan`].

use std::ops::RangeInclusive;

use futures::future::try_join_all;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::client::RemoteClient;
use crate::error::{Error, Result};
use crate::fetcher::PageFetcher;
use crate::selector::merge_top_n;
use crate::types::{Event, Page, Question};

/// Rank key: view count
fn by_views(question: &Question) -> u64 {
    question.view_count
}

/// Plans the page groups that follow page 1.
///
/// Each step takes `remaining % width` pages (or `width` when that is zero),
/// so the only partial group comes first and every later group is full.
/// Page numbers start at 2 and increase strictly in fetch order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupPlan {
    next_page: u32,
    remaining: u32,
    width: u32,
}

impl GroupPlan {
    /// Plan groups for `total_pages` pages with at most `width` per group
    ///
    /// # Errors
    /// Returns a configuration error if `width` is zero, or an error if the
    /// page count does not fit in a page number.
    pub fn new(total_pages: u64, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(Error::config("batch_width", "batch width must be at least 1"));
        }
        // The last page number plus one must still fit in a u32
        let total = u32::try_from(total_pages)
            .ok()
            .filter(|total| *total < u32::MAX)
            .ok_or_else(|| Error::Other(format!("page count {} is out of range", total_pages)))?;

        Ok(Self {
            next_page: 2,
            remaining: total.saturating_sub(1),
            width: u32::try_from(width).unwrap_or(u32::MAX),
        })
    }

    /// Pages not yet handed out
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Iterator for GroupPlan {
    type Item = RangeInclusive<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let size = match self.remaining % self.width {
            0 => self.width,
            partial => partial,
        };
        self.remaining -= size;

        let first = self.next_page;
        self.next_page += size;
        Some(first..=first + size - 1)
    }
}

/// Drives one retrieval from page 1 to the final top-N
pub struct BatchScheduler<'a, C: RemoteClient + ?Sized> {
    fetcher: PageFetcher<'a, C>,
    event_tx: Option<&'a broadcast::Sender<Event>>,
}

impl<'a, C: RemoteClient + ?Sized> BatchScheduler<'a, C> {
    /// Create a scheduler over a page fetcher
    pub fn new(fetcher: PageFetcher<'a, C>) -> Self {
        Self {
            fetcher,
            event_tx: None,
        }
    }

    /// Publish progress events on `event_tx`
    pub fn with_events(mut self, event_tx: &'a broadcast::Sender<Event>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    fn emit(&self, event: Event) {
        if let Some(tx) = self.event_tx {
            // No subscribers is fine
            tx.send(event).ok();
        }
    }

    fn emit_page(&self, page: &Page) {
        self.emit(Event::PageFetched {
            page: page.number,
            kept: page.items.len(),
            discarded: page.discarded,
        });
    }

    /// Run the retrieval to completion.
    ///
    /// Returns at most `top_n` unanswered questions, highest view count first.
    ///
    /// # Errors
    /// The first failing page aborts the whole retrieval; nothing partial is
    /// returned and requests still in flight in the same group are dropped.
    pub async fn run(&self) -> Result<Vec<Question>> {
        let request = self.fetcher.request();
        self.emit(Event::RetrievalStarted {
            tag: request.tag.clone(),
        });

        let result = self.drain().await;
        match &result {
            Ok(top) => info!(tag = %request.tag, results = top.len(), "retrieval complete"),
            Err(e) => {
                warn!(tag = %request.tag, page = ?e.page(), error = %e, "retrieval failed");
                self.emit(Event::RetrievalFailed {
                    page: e.page(),
                    error: e.to_string(),
                });
            }
        }
        result
    }

    async fn drain(&self) -> Result<Vec<Question>> {
        let request = self.fetcher.request();
        let n = request.top_n;
        if request.batch_width == 0 {
            return Err(Error::config("batch_width", "batch width must be at least 1"));
        }
        if request.page_size == 0 {
            return Err(Error::config("page_size", "page size must be at least 1"));
        }

        let first = self.fetcher.fetch(1).await?;
        self.emit_page(&first);
        let total_pages = first.total_pages();
        let mut plan = GroupPlan::new(total_pages, request.batch_width)?;
        let mut top = merge_top_n(Vec::new(), first.items, n, by_views);

        debug!(total_pages, remaining = plan.remaining(), "first page merged");

        while let Some(group) = plan.next() {
            let (first_page, last_page) = (*group.start(), *group.end());
            debug!(first_page, last_page, "fetching group");
            self.emit(Event::GroupStarted {
                first_page,
                last_page,
            });

            let pages = try_join_all(group.map(|page| self.fetcher.fetch(page))).await?;

            // try_join_all keeps input order, so folds run in page-number order
            for page in pages {
                self.emit_page(&page);
                top = merge_top_n(top, page.items, n, by_views);
            }

            self.emit(Event::GroupMerged {
                last_page,
                remaining: u64::from(plan.remaining()),
            });
        }

        self.emit(Event::RetrievalComplete {
            pages: total_pages.max(1),
            results: top.len(),
        });
        Ok(top)
    }
}
