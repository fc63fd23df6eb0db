use crate::types::JournalEntry;
use anyhow::{bail, Result};
use chrono::{NaiveDate, SecondsFormat, Utc};

/// Check that `date` is a real calendar date written as `YYYY-MM-DD`.
pub fn validate_entry_date(date: &str) -> Result<()> {
    // chrono accepts unpadded fields, but the feed's ordering relies on
    // fixed-width dates.
    if date.len() != 10 {
        bail!("Invalid entry date: {date}");
    }
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        bail!("Invalid entry date: {date}");
    }
    Ok(())
}

/// Build an entry for `date` stamped with the current UTC time.
pub fn published_entry(date: &str, markdown: &str) -> Result<JournalEntry> {
    validate_entry_date(date)?;

    Ok(JournalEntry {
        date: date.to_string(),
        last_modified: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        markdown: markdown.to_string(),
    })
}
