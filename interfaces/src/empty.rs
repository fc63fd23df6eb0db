use anyhow::Result;
use async_trait::async_trait;

use crate::defs::Datastore;
use crate::defs::JournalEntry;

pub struct EmptyDatastore;

#[async_trait]
impl Datastore for EmptyDatastore {
    async fn users(&self) -> Result<Vec<String>> {
        // Nobody has signed up yet.
        Ok(vec![])
    }

    async fn get_entries(&self, _username: &str) -> Result<Vec<JournalEntry>> {
        Ok(vec![])
    }
}
