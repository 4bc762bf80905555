//! Chapter index for text presentation

use readalong_core::{Book, Chapter};

/// Tracks the chapter shown in reader mode, clamped to the book on every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookReaderPosition {
    current_chapter_index: usize,
    chapter_count: usize,
}

impl BookReaderPosition {
    pub fn new(chapter_count: usize) -> Self {
        Self {
            current_chapter_index: 0,
            chapter_count,
        }
    }

    pub fn current_chapter_index(&self) -> usize {
        self.current_chapter_index
    }

    pub fn chapter_count(&self) -> usize {
        self.chapter_count
    }

    /// Chapter of `book` at the current index
    pub fn current_chapter<'a>(&self, book: &'a Book) -> Option<&'a Chapter> {
        book.chapter(self.current_chapter_index)
    }

    /// Moves one page forward, stopping at the last chapter
    pub fn next_chapter(&mut self) -> usize {
        self.set_chapter_index(self.current_chapter_index.saturating_add(1))
    }

    /// Moves one page back, stopping at the first chapter
    pub fn previous_chapter(&mut self) -> usize {
        self.set_chapter_index(self.current_chapter_index.saturating_sub(1))
    }

    /// Sets the index, clamping out-of-range input. Returns the resulting index.
    pub fn set_chapter_index(&mut self, index: usize) -> usize {
        let last = self.chapter_count.saturating_sub(1);
        self.current_chapter_index = index.min(last);
        self.current_chapter_index
    }
}
