use serde::{Deserialize, Serialize};

use crate::marks::TextMarks;
use crate::ops::merge_adjacent_runs;
use crate::run::TextRun;

/// A styled-text document: an ordered sequence of runs plus a version
/// counter.
///
/// Documents are immutable values: every editing operation returns a new
/// document and bumps `version`. Concatenating the run texts in order
/// reconstructs the plain-text projection; all offsets in the editing API
/// are character indices into that projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextDocument {
    pub runs: Vec<TextRun>,
    pub version: u64,
}

impl RichTextDocument {
    /// Empty document (no runs).
    pub fn empty() -> Self {
        Self {
            runs: Vec::new(),
            version: 1,
        }
    }

    /// Build a document from plain text with one set of marks. Empty text
    /// yields an empty run list.
    pub fn from_plain_text(text: impl Into<String>, marks: TextMarks) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![TextRun::new(text, marks)]
        };
        Self { runs, version: 1 }
    }

    /// Concatenation of all run texts.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::with_capacity(self.runs.iter().map(|r| r.text.len()).sum());
        for run in &self.runs {
            out.push_str(&run.text);
        }
        out
    }

    /// Length of the plain-text projection in characters.
    pub fn char_len(&self) -> usize {
        self.runs.iter().map(TextRun::char_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(TextRun::is_empty)
    }

    /// Marks of the run containing `position`: the first run whose
    /// cumulative end reaches `position`. At or past the document end this
    /// is the last run's marks; an empty document yields empty marks.
    ///
    /// This is the contract used to pre-fill marks for the next typed
    /// character at a caret.
    pub fn marks_at_position(&self, position: usize) -> TextMarks {
        let mut end = 0usize;
        for run in &self.runs {
            end += run.char_len();
            if end >= position {
                return run.marks.clone();
            }
        }
        self.runs
            .last()
            .map(|run| run.marks.clone())
            .unwrap_or_default()
    }

    /// Drop zero-length runs, merge style-equal neighbors, bump `version`.
    ///
    /// Content is a fixed point: normalizing twice yields the same run
    /// sequence (the version still increments).
    pub fn normalize(&self) -> Self {
        let kept: Vec<TextRun> = self
            .runs
            .iter()
            .filter(|run| !run.is_empty())
            .cloned()
            .collect();
        Self {
            runs: merge_adjacent_runs(kept),
            version: self.version + 1,
        }
    }
}

impl Default for RichTextDocument {
    fn default() -> Self {
        Self::empty()
    }
}
