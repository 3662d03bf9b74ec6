//! Range-based editing operations.
//!
//! Every range edit follows the same shape: split runs at the range
//! boundaries so the range is run-aligned, operate on whole runs, then
//! merge. `split_runs_at` is that shared splitting step; `insert_text`,
//! `delete_range` and `apply_marks` are thin walks over its output.

use crate::document::RichTextDocument;
use crate::marks::TextMarks;
use crate::run::TextRun;

/// Byte offset of the `char_index`-th character, clamped to the text end.
fn byte_index_at_char(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

fn slice_chars(text: &str, from: usize, to: usize) -> String {
    let start = byte_index_at_char(text, from);
    let end = byte_index_at_char(text, to);
    text[start..end].to_string()
}

/// Split runs so that every boundary offset falls on a run boundary.
/// Boundaries must be sorted ascending; offsets outside the document are
/// ignored. Marks are preserved on both halves of a split.
fn split_runs_at(runs: &[TextRun], boundaries: &[usize]) -> Vec<TextRun> {
    let mut out = Vec::with_capacity(runs.len() + boundaries.len());
    let mut run_start = 0usize;
    for run in runs {
        let run_len = run.char_len();
        let run_end = run_start + run_len;
        let mut local_from = 0usize;
        for &boundary in boundaries {
            if boundary > run_start && boundary < run_end {
                let local = boundary - run_start;
                if local > local_from {
                    out.push(TextRun::new(
                        slice_chars(&run.text, local_from, local),
                        run.marks.clone(),
                    ));
                    local_from = local;
                }
            }
        }
        out.push(TextRun::new(
            slice_chars(&run.text, local_from, run_len),
            run.marks.clone(),
        ));
        run_start = run_end;
    }
    out
}

/// Coalesce consecutive runs whose marks are structurally equal.
pub fn merge_adjacent_runs(runs: Vec<TextRun>) -> Vec<TextRun> {
    let mut out: Vec<TextRun> = Vec::with_capacity(runs.len());
    for run in runs {
        match out.last_mut() {
            Some(last) if last.marks == run.marks => last.text.push_str(&run.text),
            _ => out.push(run),
        }
    }
    out
}

impl RichTextDocument {
    /// Insert `text` as a new run with `marks` at `position` (clamped to the
    /// document bounds), splitting the containing run when the position
    /// falls mid-run.
    ///
    /// Does not auto-merge with neighbors even when marks match; call
    /// [`RichTextDocument::normalize`] when fragmentation must be cleaned
    /// up. Empty `text` returns the document unchanged.
    pub fn insert_text(
        &self,
        position: usize,
        text: impl Into<String>,
        marks: TextMarks,
    ) -> RichTextDocument {
        let text = text.into();
        if text.is_empty() {
            return self.clone();
        }
        let position = position.min(self.char_len());
        let mut runs = split_runs_at(&self.runs, &[position]);

        let mut insert_at = runs.len();
        let mut cursor = 0usize;
        for (index, run) in runs.iter().enumerate() {
            if cursor >= position {
                insert_at = index;
                break;
            }
            cursor += run.char_len();
        }
        runs.insert(insert_at, TextRun::new(text, marks));

        RichTextDocument {
            runs,
            version: self.version + 1,
        }
    }

    /// Remove all characters in `[start, end)`. Runs fully inside the range
    /// are dropped; runs straddling a boundary keep their marks on the
    /// surviving text. No-op when the (clamped) range is empty.
    pub fn delete_range(&self, start: usize, end: usize) -> RichTextDocument {
        let len = self.char_len();
        let start = start.min(len);
        let end = end.min(len);
        if start >= end {
            return self.clone();
        }
        let split = split_runs_at(&self.runs, &[start, end]);

        let mut out = Vec::with_capacity(split.len());
        let mut cursor = 0usize;
        for run in split {
            let run_len = run.char_len();
            if cursor < start || cursor >= end {
                out.push(run);
            }
            cursor += run_len;
        }

        RichTextDocument {
            runs: out,
            version: self.version + 1,
        }
    }

    /// Apply `marks` to every run sub-span overlapping `[start, end)` via a
    /// shallow merge (set keys override, unset keys inherit). Portions
    /// outside the range are split off unchanged. The result is passed
    /// through [`merge_adjacent_runs`]. No-op when the (clamped) range is
    /// empty.
    pub fn apply_marks(&self, start: usize, end: usize, marks: &TextMarks) -> RichTextDocument {
        let len = self.char_len();
        let start = start.min(len);
        let end = end.min(len);
        if start >= end {
            return self.clone();
        }
        let split = split_runs_at(&self.runs, &[start, end]);

        let mut out = Vec::with_capacity(split.len());
        let mut cursor = 0usize;
        for mut run in split {
            let run_len = run.char_len();
            if run_len > 0 && cursor >= start && cursor < end {
                run.marks = run.marks.merged_with(marks);
            }
            cursor += run_len;
            out.push(run);
        }

        RichTextDocument {
            runs: merge_adjacent_runs(out),
            version: self.version + 1,
        }
    }
}
