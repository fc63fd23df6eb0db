use crate::aggregator::RecentEntriesAggregator;
use crate::types::{Datastore, FeedConfig};
use std::sync::Arc;

/// Read-only state shared by every request handler.
pub struct AppState {
    pub datastore: Arc<dyn Datastore>,
    pub aggregator: RecentEntriesAggregator,
    pub config: FeedConfig,
}

impl AppState {
    pub fn new(datastore: Arc<dyn Datastore>, config: FeedConfig) -> Arc<Self> {
        let aggregator = RecentEntriesAggregator::new(datastore.clone(), &config);

        Arc::new(Self {
            datastore,
            aggregator,
            config,
        })
    }
}
