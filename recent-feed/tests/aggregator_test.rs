mod common;

use common::{entry, init_tracing, seeded_datastore};
use interfaces::EmptyDatastore;
use recent_feed::{
    FeedConfig, FeedError, MemoryDatastore, PageWindow, RecentEntriesAggregator, Result,
};
use std::sync::Arc;
use tracing::info;

const FIRST_PAGE: PageWindow = PageWindow { start: 0, limit: 15 };

#[tokio::test]
async fn test_merge_tags_authors_and_drops_short_entries() -> Result<()> {
    init_tracing();

    let datastore = seeded_datastore(&[
        ("alice", "2019-05-24", "2019-05-24T00:00:00Z", "Rode the bus and saw a movie about ghosts"),
        ("alice", "2019-05-17", "2019-05-17T00:00:00Z", "test post"),
        ("bob", "2019-05-24", "2019-05-25T00:00:00Z", "Read a book about the history of cheese"),
    ])
    .await;

    let aggregator = RecentEntriesAggregator::new(datastore, &FeedConfig::default());
    let usernames = vec!["alice".to_string(), "bob".to_string()];
    let merged = aggregator.merge(&usernames).await?;

    info!("Merged {} entries", merged.len());
    assert_eq!(merged.len(), 2);
    // Reassembled in username order regardless of fetch completion order.
    assert_eq!(merged[0].author, "alice");
    assert_eq!(merged[0].markdown, "Rode the bus and saw a movie about ghosts");
    assert_eq!(merged[1].author, "bob");
    assert_eq!(merged[1].last_modified, "2019-05-25T00:00:00Z");
    Ok(())
}

#[tokio::test]
async fn test_merge_is_deterministic_across_concurrency_levels() -> Result<()> {
    init_tracing();

    let mut rows = Vec::new();
    let users: Vec<String> = (0..20).map(|i| format!("user{i:02}")).collect();
    for user in &users {
        rows.push((user.as_str(), "2019-05-24", "2019-05-24T00:00:00Z", "Wrote a long enough update for the feed"));
    }
    let datastore = seeded_datastore(&rows).await;

    let sequential = RecentEntriesAggregator::new(
        datastore.clone(),
        &FeedConfig { fetch_concurrency: 1, ..FeedConfig::default() },
    );
    let concurrent = RecentEntriesAggregator::new(
        datastore,
        &FeedConfig { fetch_concurrency: 16, ..FeedConfig::default() },
    );

    let a = sequential.merge(&users).await?;
    let b = concurrent.merge(&users).await?;
    assert_eq!(a, b);

    let page = concurrent.build_feed(PageWindow { start: 0, limit: 100 }).await?;
    let authors: Vec<&str> = page.iter().map(|item| item.author.as_str()).collect();
    assert_eq!(authors, users.iter().map(String::as_str).collect::<Vec<_>>());
    Ok(())
}

#[tokio::test]
async fn test_merge_fails_fast_with_username() {
    init_tracing();

    let datastore = seeded_datastore(&[
        ("alice", "2019-05-24", "2019-05-24T00:00:00Z", "Rode the bus and saw a movie about ghosts"),
        ("mallory", "2019-05-24", "2019-05-24T00:00:00Z", "Read a book about the history of cheese"),
    ])
    .await;
    datastore.fail_entries_for("mallory").await;

    let aggregator = RecentEntriesAggregator::new(datastore, &FeedConfig::default());
    let err = aggregator.build_feed(FIRST_PAGE).await.unwrap_err();

    match err {
        FeedError::Aggregation { username, .. } => assert_eq!(username, "mallory"),
        other => panic!("expected aggregation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_build_feed_reports_user_listing_failure() {
    init_tracing();

    let datastore = Arc::new(MemoryDatastore::new());
    datastore.fail_user_listing().await;

    let aggregator = RecentEntriesAggregator::new(datastore, &FeedConfig::default());
    let err = aggregator.build_feed(FIRST_PAGE).await.unwrap_err();
    assert!(matches!(err, FeedError::ListUsers(_)));
}

#[tokio::test]
async fn test_build_feed_sorts_and_windows() -> Result<()> {
    init_tracing();

    let datastore = seeded_datastore(&[
        ("bob", "2019-05-10", "2019-05-25T06:00:00.000Z", "Read the news today... Oh boy!"),
        ("bob", "2019-05-03", "2019-05-16T00:00:00.000Z", "Took a nap and dreamed about chocolate"),
        ("bob", "2019-04-26", "2019-05-25T00:00:00.000Z", "Read a book about the history of cheese"),
        ("bob", "2019-04-19", "2019-05-17T12:00:00.000Z", "Saw a movie about French vanilla"),
        ("bob", "2019-04-12", "2019-05-23T00:00:00.000Z", "Ate some crackers in a bathtub"),
        ("bob", "2019-04-05", "2019-05-24T00:00:00.000Z", "Rode the bus and saw a movie about ghosts"),
    ])
    .await;

    let aggregator = RecentEntriesAggregator::new(datastore, &FeedConfig::default());
    let page = aggregator.build_feed(PageWindow { start: 1, limit: 3 }).await?;

    let dates: Vec<&str> = page.iter().map(|item| item.date.as_str()).collect();
    assert_eq!(dates, vec!["2019-05-03", "2019-04-26", "2019-04-19"]);
    Ok(())
}

#[tokio::test]
async fn test_build_feed_respects_configured_threshold() -> Result<()> {
    init_tracing();

    let datastore = Arc::new(MemoryDatastore::new());
    datastore
        .insert_entry("bob", entry("2019-05-24", "2019-05-24T00:00:00Z", "Shipped it"))
        .await
        .expect("seed entry");

    let strict = RecentEntriesAggregator::new(datastore.clone(), &FeedConfig::default());
    assert!(strict.build_feed(FIRST_PAGE).await?.is_empty());

    let lenient = RecentEntriesAggregator::new(
        datastore,
        &FeedConfig { min_relevant_length: 5, ..FeedConfig::default() },
    );
    assert_eq!(lenient.build_feed(FIRST_PAGE).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_build_feed_on_empty_datastore() -> Result<()> {
    init_tracing();

    let aggregator = RecentEntriesAggregator::new(Arc::new(EmptyDatastore), &FeedConfig::default());
    assert!(aggregator.build_feed(FIRST_PAGE).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_memory_datastore_rejects_malformed_dates() {
    let datastore = MemoryDatastore::new();

    for date in ["2019-5-24", "2019-02-30", "yesterday", ""] {
        let result = datastore
            .insert_entry("bob", entry(date, "2019-05-24T00:00:00Z", "whatever"))
            .await;
        assert!(result.is_err(), "{date} should be rejected");
    }
}

#[tokio::test]
async fn test_memory_datastore_replaces_entry_for_same_date() -> anyhow::Result<()> {
    use interfaces::Datastore;

    let datastore = MemoryDatastore::new();
    datastore
        .insert_entry("bob", entry("2019-05-24", "2019-05-24T00:00:00Z", "first draft"))
        .await?;
    datastore
        .insert_entry("bob", entry("2019-05-24", "2019-05-24T09:00:00Z", "second draft"))
        .await?;

    let entries = datastore.get_entries("bob").await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].markdown, "second draft");
    assert_eq!(datastore.users().await?, vec!["bob".to_string()]);
    assert!(datastore.get_entries("nobody").await?.is_empty());
    Ok(())
}
