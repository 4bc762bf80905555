// FILE: crates/content-sources/src/fixed.rs

use crate::{ContentProvider, SourceError, SourceResult};
use async_trait::async_trait;
use readalong_core::Book;

/// Provider with a predetermined outcome; used for previews, demos and tests
#[derive(Debug, Clone)]
pub struct StaticProvider {
    outcome: SourceResult<Book>,
}

impl StaticProvider {
    /// Always returns `book`
    pub fn new(book: Book) -> Self {
        Self { outcome: Ok(book) }
    }

    /// Always fails with `error`
    pub fn failing(error: SourceError) -> Self {
        Self {
            outcome: Err(error),
        }
    }

    /// Always returns the built-in sample book
    pub fn sample() -> Self {
        Self::new(Book::sample())
    }
}

#[async_trait]
impl ContentProvider for StaticProvider {
    async fn fetch_book(&self) -> SourceResult<Book> {
        self.outcome.clone()
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_outcomes() {
        let provider = StaticProvider::sample();
        assert_eq!(provider.fetch_book().await.unwrap().chapter_count(), 3);

        let provider = StaticProvider::failing(SourceError::Unavailable("offline".to_string()));
        assert_eq!(
            provider.fetch_book().await,
            Err(SourceError::Unavailable("offline".to_string()))
        );
    }
}
