use crate::entry::validate_entry_date;
use crate::types::{Datastore, JournalEntry};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Default)]
struct MemoryState {
    // username -> date -> entry
    entries: BTreeMap<String, BTreeMap<String, JournalEntry>>,
    failing_users: HashSet<String>,
    users_unavailable: bool,
}

/// Process-local datastore. Used when no database is configured and as the
/// test double for the HTTP layer.
#[derive(Default)]
pub struct MemoryDatastore {
    state: RwLock<MemoryState>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `entry` for `username`, replacing any entry on the same date.
    pub async fn insert_entry(&self, username: &str, entry: JournalEntry) -> Result<()> {
        validate_entry_date(&entry.date)?;

        let mut state = self.state.write().await;
        state
            .entries
            .entry(username.to_string())
            .or_default()
            .insert(entry.date.clone(), entry);

        debug!("Stored in-memory entry for user {}", username);
        Ok(())
    }

    /// Make every later `get_entries(username)` call fail.
    pub async fn fail_entries_for(&self, username: &str) {
        let mut state = self.state.write().await;
        state.failing_users.insert(username.to_string());
        info!("In-memory datastore will fail entry reads for {}", username);
    }

    /// Make every later `users()` call fail.
    pub async fn fail_user_listing(&self) {
        self.state.write().await.users_unavailable = true;
    }
}

#[async_trait]
impl Datastore for MemoryDatastore {
    async fn users(&self) -> Result<Vec<String>> {
        let state = self.state.read().await;
        if state.users_unavailable {
            return Err(anyhow!("user listing unavailable"));
        }
        Ok(state.entries.keys().cloned().collect())
    }

    async fn get_entries(&self, username: &str) -> Result<Vec<JournalEntry>> {
        let state = self.state.read().await;
        if state.failing_users.contains(username) {
            return Err(anyhow!("entries unavailable for {username}"));
        }
        Ok(state
            .entries
            .get(username)
            .map(|by_date| by_date.values().cloned().collect())
            .unwrap_or_default())
    }
}
