use crate::types::{AuthoredEntry, JournalEntry, RecentFeedItem, MIN_RELEVANT_LENGTH};

/// Gate that keeps low-effort and test posts out of the feed.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceFilter {
    min_length: usize,
}

impl RelevanceFilter {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Length is counted in characters, not bytes.
    pub fn keep(&self, entry: &JournalEntry) -> bool {
        entry.markdown.chars().count() >= self.min_length
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(MIN_RELEVANT_LENGTH)
    }
}

/// Order entries newest date first, breaking ties on the most recent edit.
///
/// Dates are fixed-width `YYYY-MM-DD` and timestamps share one RFC 3339 shape,
/// so plain string comparison matches chronological order. The sort is stable,
/// so fully tied entries keep their merge order.
pub fn sort_newest_first(mut entries: Vec<AuthoredEntry>) -> Vec<AuthoredEntry> {
    entries.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.last_modified.cmp(&a.last_modified))
    });
    entries
}

pub fn present(entries: Vec<AuthoredEntry>) -> Vec<RecentFeedItem> {
    entries.into_iter().map(RecentFeedItem::from).collect()
}
