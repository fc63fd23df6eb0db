use clap::Parser;
use url::Url;

use crate::types::{FeedConfig, DEFAULT_FETCH_CONCURRENCY, DEFAULT_PAGE_SIZE, MIN_RELEVANT_LENGTH};

/// Command line and environment configuration for the feed server.
#[derive(Debug, Clone, Parser)]
#[command(name = "recent-feed", about = "Serves the recent journal entries feed")]
pub struct Config {
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// PostgreSQL connection string. Without it entries live in memory.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Entries with fewer characters are left out of the feed.
    #[arg(long, env = "MIN_RELEVANT_LENGTH", default_value_t = MIN_RELEVANT_LENGTH)]
    pub min_relevant_length: usize,

    /// Page size when a request omits `limit`.
    #[arg(long, env = "DEFAULT_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_positive)]
    pub default_page_size: usize,

    /// Maximum per-user fetches in flight while merging.
    #[arg(long, env = "FETCH_CONCURRENCY", default_value_t = DEFAULT_FETCH_CONCURRENCY, value_parser = parse_positive)]
    pub fetch_concurrency: usize,
}

impl Config {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            min_relevant_length: self.min_relevant_length,
            default_page_size: self.default_page_size,
            fetch_concurrency: self.fetch_concurrency,
        }
    }
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(value) => Ok(value),
        Err(e) => Err(e.to_string()),
    }
}

/// Hide the password in a connection string before it reaches the logs.
pub fn redact_database_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("***"));
            }
            url.to_string()
        }
        Err(_) => "<unparseable database url>".to_string(),
    }
}
