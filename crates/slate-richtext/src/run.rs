use serde::{Deserialize, Serialize};

use crate::marks::TextMarks;

/// A contiguous span of text sharing one set of marks.
///
/// A run may contain embedded `\n` characters in the document model; layout
/// splits on them, so a run never spans a line break in a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub marks: TextMarks,
}

impl TextRun {
    pub fn new(text: impl Into<String>, marks: TextMarks) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    /// Length of the run in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
