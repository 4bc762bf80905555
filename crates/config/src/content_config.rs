//! Content source configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Where the book document comes from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentConfig {
    /// File path or http(s) URL of the book document
    pub book_source: String,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent sent with HTTP requests
    pub user_agent: String,
}

impl ContentConfig {
    /// True when the source is fetched over HTTP
    pub fn is_remote(&self) -> bool {
        self.book_source.starts_with("http://") || self.book_source.starts_with("https://")
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            book_source: "book.json".to_string(),
            request_timeout_secs: 30,
            user_agent: format!("Readalong/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ConfigSection for ContentConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::not_empty(&self.book_source, "content.book_source"),
            Validator::in_range(
                self.request_timeout_secs,
                1,
                300,
                "content.request_timeout_secs",
            ),
            Validator::not_empty(&self.user_agent, "content.user_agent"),
        ])
    }

    fn merge(&mut self, other: Self) {
        self.book_source = other.book_source;
        self.request_timeout_secs = other.request_timeout_secs;
        self.user_agent = other.user_agent;
    }

    fn section_name(&self) -> &'static str {
        "content"
    }
}
