use serde::{Deserialize, Serialize};
// Use the interfaces crate for the storage-facing types
pub use interfaces::defs::{Datastore, JournalEntry};

/// Entries shorter than this many characters are treated as test posts.
pub const MIN_RELEVANT_LENGTH: usize = 30;

/// Page size used when a request omits `limit`.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Upper bound on in-flight per-user fetches while merging.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

/// A journal entry tagged with the user who published it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredEntry {
    pub author: String,
    pub date: String,
    pub last_modified: String,
    pub markdown: String,
}

impl AuthoredEntry {
    pub fn new(author: &str, entry: JournalEntry) -> Self {
        Self {
            author: author.to_string(),
            date: entry.date,
            last_modified: entry.last_modified,
            markdown: entry.markdown,
        }
    }
}

/// Public shape of one feed item. `last_modified` is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFeedItem {
    pub author: String,
    pub date: String,
    pub markdown: String,
}

impl From<AuthoredEntry> for RecentFeedItem {
    fn from(entry: AuthoredEntry) -> Self {
        Self {
            author: entry.author,
            date: entry.date,
            markdown: entry.markdown,
        }
    }
}

/// Validated pagination parameters for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub limit: usize,
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub min_relevant_length: usize,
    pub default_page_size: usize,
    pub fetch_concurrency: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            min_relevant_length: MIN_RELEVANT_LENGTH,
            default_page_size: DEFAULT_PAGE_SIZE,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid start")]
    InvalidStart,

    #[error("invalid limit")]
    InvalidLimit,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to retrieve users: {0}")]
    ListUsers(#[source] anyhow::Error),

    #[error("Failed to retrieve entries for user {username}: {source}")]
    Aggregation {
        username: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to encode feed: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;
