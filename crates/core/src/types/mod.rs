//! Domain types for readalong
//!
//! - `book`: Book, Chapter and presentation mode

mod book;

pub use book::{Book, Chapter, PresentationMode};
