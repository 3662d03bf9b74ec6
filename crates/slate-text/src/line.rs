use core::ops::Range;

use slate_richtext::TextRun;

/// A run positioned within its line.
///
/// `x` is the offset from the line start (including any centering offset
/// baked in at finalize time), `y` is the line's top in layout space, and
/// `baseline` is the offset from `y` to the glyph baseline. `char_range`
/// is the span of the document's plain-text projection this box covers, in
/// character indices.
#[derive(Debug, Clone)]
pub struct RunBox {
    pub run: TextRun,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub baseline: f32,
    pub line_index: usize,
    pub run_index: usize,
    pub char_range: Range<usize>,
}

impl RunBox {
    /// Length of the box in characters.
    pub fn char_len(&self) -> usize {
        self.char_range.end - self.char_range.start
    }
}

/// One visual line: positioned run boxes plus line-level geometry.
///
/// `x` is the horizontal centering offset applied when a container width
/// was supplied (already baked into each box's `x` as well). `char_range`
/// spans the first box's start to the last box's end; characters consumed
/// between lines (a hard `\n`, whitespace trimmed at a wrap) fall in the
/// gaps between line ranges.
#[derive(Debug, Clone)]
pub struct LineBox {
    pub runs: Vec<RunBox>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub baseline: f32,
    pub line_index: usize,
    pub char_range: Range<usize>,
}

impl LineBox {
    /// Baseline Y in layout space.
    pub fn baseline_y(&self) -> f32 {
        self.y + self.baseline
    }

    /// Bottom Y of the line box in layout space.
    pub fn bottom_y(&self) -> f32 {
        self.y + self.height
    }

    /// Whether a layout-space point falls within this line's vertical band.
    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.y && y < self.bottom_y()
    }
}

/// The full typeset result: lines of positioned run boxes.
///
/// `version` echoes the source document's version so hosts can use it as a
/// cheap layout-level cache key. Layouts are never mutated once returned.
#[derive(Debug, Clone)]
pub struct Layout {
    pub lines: Vec<LineBox>,
    pub total_width: f32,
    pub total_height: f32,
    pub version: u64,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line whose vertical band contains `y`, if any.
    pub fn line_at_y(&self, y: f32) -> Option<&LineBox> {
        self.lines.iter().find(|line| line.contains_y(y))
    }

    /// Character offset just past the last positioned character.
    pub fn char_end(&self) -> usize {
        self.lines.last().map(|line| line.char_range.end).unwrap_or(0)
    }
}
