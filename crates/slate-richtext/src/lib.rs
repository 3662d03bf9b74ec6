//! slate-richtext: run-based styled-text document model.
//!
//! A document is an ordered sequence of [`TextRun`]s, each pairing a text
//! span with sparse style [`TextMarks`]. All editing operations are pure:
//! they take a document by reference and return a new value, so callers can
//! treat documents as immutable snapshots. Offsets throughout are character
//! indices into the plain-text projection.

pub mod document;
pub mod marks;
pub mod ops;
pub mod run;
pub mod selection;

pub use document::RichTextDocument;
pub use marks::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_LINE_HEIGHT, FontWeight, TextMarks,
};
pub use ops::merge_adjacent_runs;
pub use run::TextRun;
pub use selection::{Direction, TextSelection};
