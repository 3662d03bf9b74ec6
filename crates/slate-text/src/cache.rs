use hashbrown::HashMap;

use slate_richtext::TextMarks;

use crate::measure::RunMetrics;

/// Cache key covering everything that affects a measurement result: the
/// text, every resolved font attribute, and the engine's cache version.
/// Float fields enter the key via `to_bits` so the key stays `Eq + Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct MeasureKey {
    text: String,
    family: String,
    weight: String,
    italic: bool,
    size_bits: u32,
    letter_spacing_bits: u32,
    line_height_bits: u32,
    cache_version: u64,
}

impl MeasureKey {
    pub(crate) fn new(
        text: &str,
        marks: &TextMarks,
        default_line_height: f32,
        cache_version: u64,
    ) -> Self {
        Self {
            text: text.to_string(),
            family: marks.font_family_or_default().to_string(),
            weight: marks.resolved_weight(),
            italic: marks.is_italic(),
            size_bits: marks.font_size_or_default().to_bits(),
            letter_spacing_bits: marks.letter_spacing_or_default().to_bits(),
            line_height_bits: marks.line_height_or(default_line_height).to_bits(),
            cache_version,
        }
    }
}

/// Owned measurement cache. Invalidation is a version bump plus a wholesale
/// clear; with the version baked into every key, stale entries could never
/// be hit even without the clear, so the clear only bounds memory.
#[derive(Debug, Default)]
pub(crate) struct MeasureCache {
    entries: HashMap<MeasureKey, RunMetrics>,
}

impl MeasureCache {
    pub(crate) fn get(&self, key: &MeasureKey) -> Option<RunMetrics> {
        self.entries.get(key).copied()
    }

    pub(crate) fn insert(&mut self, key: MeasureKey, metrics: RunMetrics) {
        self.entries.insert(key, metrics);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
