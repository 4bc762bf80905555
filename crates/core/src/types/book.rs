//! Book and chapter domain models

use serde::{Deserialize, Serialize};

/// How a book is presented to the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// Player controls with chapter audio
    #[default]
    Audio,
    /// Chapter text
    Reader,
}

impl PresentationMode {
    /// Returns the other mode
    pub fn toggled(self) -> Self {
        match self {
            Self::Audio => Self::Reader,
            Self::Reader => Self::Audio,
        }
    }

    pub fn is_reader(self) -> bool {
        self == Self::Reader
    }
}

impl std::fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Audio => write!(f, "audio"),
            Self::Reader => write!(f, "reader"),
        }
    }
}

/// A single chapter: text for reader mode, audio locator for audio mode.
///
/// At runtime a chapter is identified by its position in `Book::chapters`,
/// not by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: i64,
    pub text: String,
    /// Resource locator of the chapter audio (not validated here)
    pub audio: String,
    pub key_point: String,
}

impl Chapter {
    /// Creates a new chapter
    pub fn new(
        id: i64,
        text: impl Into<String>,
        audio: impl Into<String>,
        key_point: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            audio: audio.into(),
            key_point: key_point.into(),
        }
    }
}

/// A fetched book document.
///
/// Immutable once fetched apart from `mode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub name: String,
    /// Cover art locator, resolved through the asset cache
    pub cover_page_image: String,
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub mode: PresentationMode,
}

impl Book {
    /// Placeholder installed before a book has been fetched
    pub fn idle() -> Self {
        Self {
            id: 0,
            name: String::new(),
            cover_page_image: String::new(),
            chapters: Vec::new(),
            mode: PresentationMode::Audio,
        }
    }

    /// Returns true for the placeholder book
    pub fn is_idle(&self) -> bool {
        *self == Self::idle()
    }

    /// Parses a book document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serializes the book document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Index of the last chapter, `None` when the book has no chapters
    pub fn last_chapter_index(&self) -> Option<usize> {
        self.chapters.len().checked_sub(1)
    }

    /// Returns the chapter at `index`, if it exists
    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    /// Three-chapter fixture book
    pub fn sample() -> Self {
        Self {
            id: 1,
            name: "Glinda of Oz".to_string(),
            cover_page_image: "https://media.publit.io/file/glinda-of-oz-1002.png".to_string(),
            chapters: vec![
                Chapter::new(
                    1,
                    "Glinda, the good Sorceress of Oz, sat in the grand court of her palace.",
                    "https://ia600708.us.archive.org/0/items/glinda_oz_0908_librivox/glindaofoz_01_baum_64kb.mp3",
                    "Ozma and Dorothy set out to stop a war.",
                ),
                Chapter::new(
                    2,
                    "Residing in Ozma's palace at this time was a live Scarecrow.",
                    "https://ia600708.us.archive.org/0/items/glinda_oz_0908_librivox/glindaofoz_02_baum_64kb.mp3",
                    "The Scarecrow stays behind in the Emerald City.",
                ),
                Chapter::new(
                    3,
                    "The Flatheads lived on a mountain with a flat top.",
                    "https://ia600708.us.archive.org/0/items/glinda_oz_0908_librivox/glindaofoz_03_baum_64kb.mp3",
                    "The travellers reach the Flathead mountain.",
                ),
            ],
            mode: PresentationMode::Audio,
        }
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::idle()
    }
}
