// FILE: crates/content-sources/src/remote.rs

use crate::{ContentProvider, SourceError, SourceResult};
use async_trait::async_trait;
use readalong_core::Book;
use readalong_network::{Client, NetworkError};

/// Fetches a book document with a single HTTP GET
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    url: String,
}

impl HttpProvider {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ContentProvider for HttpProvider {
    async fn fetch_book(&self) -> SourceResult<Book> {
        self.client
            .get_json::<Book>(&self.url)
            .await
            .map_err(|e| match e {
                NetworkError::Decode(e) => SourceError::ParseError(e.to_string()),
                NetworkError::Status { status: 404, url } => SourceError::NotFound(url),
                NetworkError::InvalidUrl(url) => SourceError::InvalidLocation(url),
                other => SourceError::NetworkError(other.to_string()),
            })
    }

    fn name(&self) -> &str {
        "http"
    }
}
