#![allow(dead_code)]

use recent_feed::{build_router, AppState, FeedConfig, JournalEntry, MemoryDatastore};
use std::sync::{Arc, Once};
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();
    });
}

pub fn entry(date: &str, last_modified: &str, markdown: &str) -> JournalEntry {
    JournalEntry {
        date: date.to_string(),
        last_modified: last_modified.to_string(),
        markdown: markdown.to_string(),
    }
}

/// Build an in-memory datastore from `(username, date, last_modified, markdown)` rows.
pub async fn seeded_datastore(rows: &[(&str, &str, &str, &str)]) -> Arc<MemoryDatastore> {
    let datastore = Arc::new(MemoryDatastore::new());
    for (username, date, last_modified, markdown) in rows {
        datastore
            .insert_entry(username, entry(date, last_modified, markdown))
            .await
            .expect("seed entry");
    }
    datastore
}

/// Serve the real router on an ephemeral port and return its base URL.
pub async fn spawn_app(datastore: Arc<MemoryDatastore>) -> String {
    let state = AppState::new(datastore, FeedConfig::default());
    let app = build_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    format!("http://{addr}")
}
