use readalong_core::PresentationMode;

/// Cross-feature notifications published by the coordinator
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinatorEvent {
    /// A fetched book replaced the placeholder
    BookInstalled { id: i64 },
    /// The fetch failed; the book is still the placeholder
    FetchFailed { message: String },
    /// Reader and audio now show this chapter
    ChapterIndexChanged(usize),
    /// The book switched presentation mode
    ModeToggled(PresentationMode),
    /// The mode switcher's playing flag changed
    PlayingChanged(bool),
}
