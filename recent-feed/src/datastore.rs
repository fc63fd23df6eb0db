use crate::entry::validate_entry_date;
use crate::types::{Datastore, JournalEntry};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{debug, info};

/// PostgreSQL-backed journal storage.
pub struct PgDatastore {
    pool: PgPool,
}

impl PgDatastore {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub async fn setup_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS journal_entries (
                username TEXT NOT NULL,
                date TEXT NOT NULL,
                last_modified TEXT NOT NULL,
                markdown TEXT NOT NULL,
                PRIMARY KEY (username, date)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_journal_entries_date ON journal_entries (date)")
            .execute(&self.pool)
            .await?;

        info!("Journal entries schema ready");
        Ok(())
    }

    /// Publish an entry, replacing the user's existing entry for that date.
    pub async fn insert_entry(&self, username: &str, entry: &JournalEntry) -> Result<()> {
        validate_entry_date(&entry.date)?;

        sqlx::query(
            r#"
            INSERT INTO journal_entries (username, date, last_modified, markdown)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (username, date)
            DO UPDATE SET
                last_modified = EXCLUDED.last_modified,
                markdown = EXCLUDED.markdown
            "#,
        )
        .bind(username)
        .bind(&entry.date)
        .bind(&entry.last_modified)
        .bind(&entry.markdown)
        .execute(&self.pool)
        .await?;

        debug!("Stored entry {} for user {}", entry.date, username);
        Ok(())
    }
}

#[async_trait]
impl Datastore for PgDatastore {
    async fn users(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT DISTINCT username FROM journal_entries ORDER BY username")
            .fetch_all(&self.pool)
            .await?;

        let usernames = rows
            .into_iter()
            .map(|row| row.try_get("username"))
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(usernames)
    }

    async fn get_entries(&self, username: &str) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query(
            "SELECT date, last_modified, markdown FROM journal_entries WHERE username = $1 ORDER BY date",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(JournalEntry {
                date: row.try_get("date")?,
                last_modified: row.try_get("last_modified")?,
                markdown: row.try_get("markdown")?,
            });
        }
        Ok(entries)
    }
}
