// FILE: crates/content-sources/src/local.rs

use crate::{ContentProvider, SourceError, SourceResult};
use async_trait::async_trait;
use readalong_core::Book;
use std::path::{Path, PathBuf};

/// Reads a book document from the local filesystem
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContentProvider for FileProvider {
    async fn fetch_book(&self) -> SourceResult<Book> {
        log::debug!("Reading book from {}", self.path.display());
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SourceError::NotFound(self.path.display().to_string()),
                _ => SourceError::Io(e.to_string()),
            })?;
        Book::from_json(&json).map_err(|e| SourceError::ParseError(e.to_string()))
    }

    fn name(&self) -> &str {
        "file"
    }
}
