// FILE: src/traits.rs
// ============================================================================

use crate::SourceResult;
use async_trait::async_trait;
use readalong_core::Book;

/// Where a book document comes from
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Fetches the book document. Called once per load; no retry.
    async fn fetch_book(&self) -> SourceResult<Book>;

    /// Short provider name used in logs and errors
    fn name(&self) -> &str;
}
