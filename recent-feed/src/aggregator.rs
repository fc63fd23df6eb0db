use crate::processing::{present, sort_newest_first, RelevanceFilter};
use crate::types::{
    AuthoredEntry, Datastore, FeedConfig, FeedError, PageWindow, RecentFeedItem, Result,
};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds the cross-user recent entries feed on top of a [`Datastore`].
pub struct RecentEntriesAggregator {
    datastore: Arc<dyn Datastore>,
    filter: RelevanceFilter,
    fetch_concurrency: usize,
}

impl RecentEntriesAggregator {
    pub fn new(datastore: Arc<dyn Datastore>, config: &FeedConfig) -> Self {
        Self {
            datastore,
            filter: RelevanceFilter::new(config.min_relevant_length),
            fetch_concurrency: config.fetch_concurrency.max(1),
        }
    }

    /// Fetch every user's entries and keep the relevant ones, tagged with
    /// their author.
    ///
    /// Up to `fetch_concurrency` users are fetched at once. Results come back
    /// in `usernames` order no matter which fetch finishes first, and the
    /// first failed fetch aborts the whole merge.
    pub async fn merge(&self, usernames: &[String]) -> Result<Vec<AuthoredEntry>> {
        let mut merged = Vec::new();

        for batch in usernames.chunks(self.fetch_concurrency) {
            let per_user = try_join_all(batch.iter().map(|username| self.fetch_relevant(username))).await?;
            merged.extend(per_user.into_iter().flatten());
        }

        Ok(merged)
    }

    async fn fetch_relevant(&self, username: &str) -> Result<Vec<AuthoredEntry>> {
        let entries = self
            .datastore
            .get_entries(username)
            .await
            .map_err(|source| FeedError::Aggregation {
                username: username.to_string(),
                source,
            })?;

        let total = entries.len();
        let relevant: Vec<AuthoredEntry> = entries
            .into_iter()
            .filter(|entry| self.filter.keep(entry))
            .map(|entry| AuthoredEntry::new(username, entry))
            .collect();

        debug!(
            "User {}: kept {}/{} entries for the feed",
            username,
            relevant.len(),
            total
        );
        Ok(relevant)
    }

    /// Produce one page of the feed: list users, merge, sort, slice, present.
    pub async fn build_feed(&self, window: PageWindow) -> Result<Vec<RecentFeedItem>> {
        let usernames = self.datastore.users().await.map_err(FeedError::ListUsers)?;
        let merged = self.merge(&usernames).await?;
        let feed_size = merged.len();

        let page = window.slice(sort_newest_first(merged));

        info!(
            "Built recent entries page: {} of {} entries from {} users (start={}, limit={})",
            page.len(),
            feed_size,
            usernames.len(),
            window.start,
            window.limit
        );
        Ok(present(page))
    }
}
