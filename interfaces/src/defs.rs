use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One published update for one user on one date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// RFC 3339 timestamp of the last edit.
    pub last_modified: String,
    pub markdown: String,
}

// Object style note:
// Implementations of Datastore are shared across every request handler, so
// they hold their connection (or map) behind `&self` and never rely on
// per-call mutable state. Callers must treat returned entries as read-only
// snapshots.

/// Read side of journal storage consumed by the feed.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Every username that has an account, in a stable order.
    async fn users(&self) -> Result<Vec<String>>;

    /// All published entries for `username`. Unknown users yield an empty list.
    async fn get_entries(&self, username: &str) -> Result<Vec<JournalEntry>>;
}
