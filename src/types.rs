//! Core types for stackx-topn

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RetrievalConfig;

/// Unique identifier for a question
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u64);

impl QuestionId {
    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for QuestionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A question that passed the unanswered filter
///
/// This is the externally visible item: it has no answer count, because the
/// count is consumed when the filter runs (see [`RawQuestion::into_unanswered`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question id
    pub question_id: QuestionId,

    /// View count, the rank key results are ordered by
    pub view_count: u64,

    /// Link to the question
    #[serde(default)]
    pub link: String,

    /// Creation time (epoch seconds on the wire)
    #[serde(with = "chrono::serde::ts_seconds")]
    pub creation_date: DateTime<Utc>,

    /// Any other returned fields (title, tags, ...), passed through unchanged
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A question as returned by the API, before filtering
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawQuestion {
    /// Question id
    pub question_id: QuestionId,

    /// View count
    pub view_count: u64,

    /// Link to the question
    #[serde(default)]
    pub link: String,

    /// Creation time (epoch seconds on the wire)
    #[serde(with = "chrono::serde::ts_seconds")]
    pub creation_date: DateTime<Utc>,

    /// Number of answers; absent counts as zero
    #[serde(default)]
    pub answer_count: Option<u64>,

    /// Any other returned fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawQuestion {
    /// Whether the question has at least one answer
    pub fn is_answered(&self) -> bool {
        self.answer_count.unwrap_or(0) > 0
    }

    /// Evaluate the unanswered filter.
    ///
    /// Returns the question without its answer count when it has no answers,
    /// `None` otherwise.
    pub fn into_unanswered(self) -> Option<Question> {
        if self.is_answered() {
            return None;
        }
        Some(Question {
            question_id: self.question_id,
            view_count: self.view_count,
            link: self.link,
            creation_date: self.creation_date,
            extra: self.extra,
        })
    }
}

/// One fetched page, already filtered
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    /// Surviving items, in the order the API returned them
    pub items: Vec<Question>,
    /// Items dropped by the filter
    pub discarded: usize,
    /// Total matching items across all pages, as reported by the API
    pub total: u64,
    /// Items requested per page
    pub page_size: u32,
}

impl Page {
    /// `ceil(total / page_size)`
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }
}

/// Parameters for one retrieval run
///
/// Built once per call and only read afterwards. [`RetrievalRequest::new`]
/// evaluates the default from-date (now minus seven days) at call time.
#[derive(Clone, Debug, PartialEq)]
pub struct RetrievalRequest {
    /// Tag the questions must carry
    pub tag: String,
    /// Substring the title must contain (empty = any)
    pub in_title: String,
    /// Only questions created at or after this instant
    pub from_date: DateTime<Utc>,
    /// Number of results kept
    pub top_n: usize,
    /// Maximum number of pages fetched concurrently
    pub batch_width: usize,
    /// Items requested per page
    pub page_size: u32,
}

impl RetrievalRequest {
    /// Create a request for `tag` using the built-in defaults
    pub fn new(tag: impl Into<String>) -> Self {
        Self::with_defaults(tag, &RetrievalConfig::default())
    }

    /// Create a request for `tag` using configured defaults
    pub fn with_defaults(tag: impl Into<String>, defaults: &RetrievalConfig) -> Self {
        Self {
            tag: tag.into(),
            in_title: String::new(),
            from_date: Utc::now() - chrono::Duration::days(defaults.lookback_days),
            top_n: defaults.top_n,
            batch_width: defaults.batch_width,
            page_size: defaults.page_size,
        }
    }

    /// Set the title substring filter
    pub fn in_title(mut self, in_title: impl Into<String>) -> Self {
        self.in_title = in_title.into();
        self
    }

    /// Set the creation-time lower bound
    pub fn from_date(mut self, from_date: DateTime<Utc>) -> Self {
        self.from_date = from_date;
        self
    }

    /// Set the number of results kept
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Set the maximum number of concurrent page fetches
    pub fn batch_width(mut self, width: usize) -> Self {
        self.batch_width = width;
        self
    }

    /// Set the page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }
}

/// Event emitted during a retrieval
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A retrieval started
    RetrievalStarted {
        /// Tag being searched
        tag: String,
    },

    /// A page was fetched and filtered
    PageFetched {
        /// 1-based page number
        page: u32,
        /// Items that passed the filter
        kept: usize,
        /// Items dropped by the filter
        discarded: usize,
    },

    /// A group of pages is about to be fetched concurrently
    GroupStarted {
        /// First page number in the group
        first_page: u32,
        /// Last page number in the group (inclusive)
        last_page: u32,
    },

    /// All pages of a group were merged into the running result
    GroupMerged {
        /// Last page number in the group
        last_page: u32,
        /// Pages still to fetch
        remaining: u64,
    },

    /// The retrieval finished
    RetrievalComplete {
        /// Total pages fetched
        pages: u64,
        /// Number of results returned
        results: usize,
    },

    /// The retrieval was aborted
    RetrievalFailed {
        /// Failing page, when the error is attributed to one
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
        /// Error message
        error: String,
    },
}
