//! # stackx-topn
//!
//! Finds the most viewed unanswered questions on a Stack Exchange site for a tag,
//! an optional title substring and a creation-time window.
//!
//! The search API is paginated. The first page tells how many pages exist; the
//! rest are fetched in concurrency-bounded groups, and each page is filtered and
//! folded into a bounded top-N list as soon as its group completes. Memory stays
//! proportional to N plus one group of pages.
//!
//! ## Quick Start
//!
//! ```no_run
//! use stackx_topn::{Config, Retriever};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let retriever = Retriever::new(Config::default())?;
//!
//!     let request = retriever.request("rust").in_title("lifetime").top_n(5);
//!     for question in retriever.top_unanswered(&request).await? {
//!         println!("{} views: {}", question.view_count, question.link);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Remote client seam and HTTP implementation
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Single-page fetch and filter
pub mod fetcher;
/// Top-level retrieval entry point
pub mod retriever;
/// Batched concurrent pagination
pub mod scheduler;
/// Top-N merge
pub mod selector;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use client::{HttpClient, RemoteClient, RemoteResponse};
pub use config::{ApiConfig, Config, RetrievalConfig};
pub use error::{Error, Result};
pub use fetcher::PageFetcher;
pub use retriever::Retriever;
pub use scheduler::{BatchScheduler, GroupPlan};
pub use selector::merge_top_n;
pub use types::{Event, Page, Question, QuestionId, RawQuestion, RetrievalRequest};
