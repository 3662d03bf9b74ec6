use core::ops::Range;

use serde::{Deserialize, Serialize};

/// Which end of a selection the user is actively moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
    #[default]
    None,
}

/// A caret or range selection over the plain-text projection of a document.
///
/// `start` and `end` are character indices; they are stored as given (which
/// may be reversed for backward selections) and normalized on demand.
/// `start == end` denotes a caret, not a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSelection {
    pub start: usize,
    pub end: usize,
    pub direction: Direction,
}

impl TextSelection {
    pub fn new(start: usize, end: usize, direction: Direction) -> Self {
        Self {
            start,
            end,
            direction,
        }
    }

    /// A collapsed selection (caret) at the given offset.
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
            direction: Direction::None,
        }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// The selected range in logical order, regardless of direction.
    pub fn normalized_range(&self) -> Range<usize> {
        if self.start <= self.end {
            self.start..self.end
        } else {
            self.end..self.start
        }
    }

    /// Length of the selection in characters.
    pub fn len(&self) -> usize {
        let range = self.normalized_range();
        range.end - range.start
    }

    pub fn is_empty(&self) -> bool {
        self.is_caret()
    }

    /// Clamp both offsets to a document of `len` characters.
    pub fn clamp_to(&self, len: usize) -> Self {
        Self {
            start: self.start.min(len),
            end: self.end.min(len),
            direction: self.direction,
        }
    }

    /// Whether the (normalized) selection contains the given offset.
    pub fn contains(&self, offset: usize) -> bool {
        self.normalized_range().contains(&offset)
    }
}
