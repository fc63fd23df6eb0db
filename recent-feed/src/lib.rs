pub mod types;
pub mod entry;
pub mod processing;
pub mod pagination;
pub mod aggregator;
pub mod datastore;
pub mod memory;
pub mod state;
pub mod error;
pub mod csp;
pub mod config;
pub mod routes;

pub use types::*;
pub use aggregator::RecentEntriesAggregator;
pub use processing::{present, sort_newest_first, RelevanceFilter};
pub use pagination::window;
pub use datastore::PgDatastore;
pub use memory::MemoryDatastore;
pub use state::AppState;
pub use error::AppError;
pub use config::Config;
pub use routes::build_router;
