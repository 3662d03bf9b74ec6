use tracing::{debug, warn};

use slate_richtext::{DEFAULT_LINE_HEIGHT, RichTextDocument, TextMarks, TextRun};

use crate::cache::{MeasureCache, MeasureKey};
use crate::line::{Layout, LineBox, RunBox};
use crate::measure::{
    FontSpec, RunMetrics, TextMeasurer, approximate_metrics, run_metrics_from,
};

/// Layout configuration for [`LayoutEngine::layout_with_options`].
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    /// Wrap width in pixels; `f32::INFINITY` disables wrapping.
    pub max_width: f32,
    /// Default line-height multiplier for runs without an explicit override.
    pub line_height: f32,
    /// When set, each line is horizontally centered within this width.
    pub container_width: Option<f32>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_width: f32::INFINITY,
            line_height: DEFAULT_LINE_HEIGHT,
            container_width: None,
        }
    }
}

/// Converts documents into paintable, measurable layouts.
///
/// The engine owns the only mutable state in the stack: a measurement
/// cache keyed on text plus resolved font attributes. Confine each
/// instance to one editing session; it is not meant to be shared across
/// threads.
pub struct LayoutEngine {
    measurer: Option<Box<dyn TextMeasurer>>,
    cache: MeasureCache,
    cache_version: u64,
    fallback_warned: bool,
}

impl LayoutEngine {
    /// Engine with no measurement provider; all metrics come from the
    /// fixed-ratio approximation.
    pub fn new() -> Self {
        Self {
            measurer: None,
            cache: MeasureCache::default(),
            cache_version: 0,
            fallback_warned: false,
        }
    }

    /// Engine backed by a host measurement provider.
    pub fn with_measurer(measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            measurer: Some(measurer),
            ..Self::new()
        }
    }

    /// Measure a single run under its own marks (letter spacing folded into
    /// the width, line height into the height). Results are cached; two
    /// calls with identical content and marks return identical metrics.
    pub fn measure_run(&mut self, run: &TextRun) -> RunMetrics {
        self.measure_text(&run.text, &run.marks, DEFAULT_LINE_HEIGHT)
    }

    pub(crate) fn measure_text(
        &mut self,
        text: &str,
        marks: &TextMarks,
        default_line_height: f32,
    ) -> RunMetrics {
        let key = MeasureKey::new(text, marks, default_line_height, self.cache_version);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        let font = FontSpec::from_marks(marks);
        let raw = match &self.measurer {
            Some(measurer) => measurer
                .measure(text, &font)
                .unwrap_or_else(|| approximate_metrics(text, &font)),
            None => {
                if !self.fallback_warned {
                    warn!("no text measurer installed; using fixed-ratio approximate metrics");
                    self.fallback_warned = true;
                }
                approximate_metrics(text, &font)
            }
        };

        let metrics = run_metrics_from(raw, text, marks, default_line_height);
        self.cache.insert(key, metrics);
        metrics
    }

    /// Typeset a document at `max_width` with a default `line_height`
    /// multiplier.
    pub fn layout_text(
        &mut self,
        doc: &RichTextDocument,
        max_width: f32,
        line_height: f32,
    ) -> Layout {
        self.layout_with_options(
            doc,
            &LayoutOptions {
                max_width,
                line_height,
                container_width: None,
            },
        )
    }

    /// Typeset a document.
    ///
    /// Hard `\n` breaks always win over the wrap width. Within a segment,
    /// wrapping happens strictly at whitespace token boundaries: a token
    /// that would overflow a non-empty line flushes the pending word and
    /// starts a new line, while the first token of an empty line is always
    /// placed even when it alone exceeds `max_width`. Leading whitespace is
    /// trimmed at the start of wrapped lines.
    pub fn layout_with_options(
        &mut self,
        doc: &RichTextDocument,
        options: &LayoutOptions,
    ) -> Layout {
        let mut lines: Vec<LineBox> = Vec::new();
        let mut y = 0.0f32;
        let mut total_width = 0.0f32;

        // Pending boxes for the in-progress line and the running char
        // offset into the document's plain-text projection.
        let mut boxes: Vec<PendingBox> = Vec::new();
        let mut placed_width = 0.0f32;
        let mut doc_pos = 0usize;

        for run in &doc.runs {
            let marks = &run.marks;
            for (segment_index, segment) in run.text.split('\n').enumerate() {
                if segment_index > 0 {
                    // Hard break: finalize a non-empty in-progress line and
                    // account for the newline character itself.
                    if !boxes.is_empty() {
                        finalize_line(&mut lines, &mut boxes, &mut y, &mut total_width, options);
                        placed_width = 0.0;
                    }
                    doc_pos += 1;
                }

                // The word buffer never outlives its segment: it flushes on
                // wrap, at the segment end, and at the run end.
                let mut buffer = String::new();
                let mut buffer_start = doc_pos;

                for token in whitespace_tokens(segment) {
                    let token_chars = token.chars().count();
                    let token_is_ws = token.chars().all(char::is_whitespace);

                    let mut candidate = buffer.clone();
                    candidate.push_str(token);
                    let candidate_width =
                        self.measure_text(&candidate, marks, options.line_height).width;
                    let line_has_content = !boxes.is_empty() || !buffer.is_empty();

                    if placed_width + candidate_width > options.max_width && line_has_content {
                        if !buffer.is_empty() {
                            let metrics =
                                self.measure_text(&buffer, marks, options.line_height);
                            boxes.push(PendingBox::new(
                                std::mem::take(&mut buffer),
                                marks.clone(),
                                buffer_start,
                                metrics,
                            ));
                        }
                        finalize_line(&mut lines, &mut boxes, &mut y, &mut total_width, options);
                        placed_width = 0.0;

                        if token_is_ws {
                            doc_pos += token_chars;
                            buffer_start = doc_pos;
                        } else {
                            buffer_start = doc_pos;
                            buffer.push_str(token);
                            doc_pos += token_chars;
                        }
                    } else {
                        if buffer.is_empty() {
                            buffer_start = doc_pos;
                        }
                        buffer.push_str(token);
                        doc_pos += token_chars;
                    }
                }

                if !buffer.is_empty() {
                    let metrics = self.measure_text(&buffer, marks, options.line_height);
                    placed_width += metrics.width;
                    boxes.push(PendingBox::new(buffer, marks.clone(), buffer_start, metrics));
                }
            }
        }

        if !boxes.is_empty() {
            finalize_line(&mut lines, &mut boxes, &mut y, &mut total_width, options);
        }

        Layout {
            lines,
            total_width,
            total_height: y,
            version: doc.version,
        }
    }

    /// Drop every cached measurement. The cache version participates in
    /// every key, so the bump alone orphans old entries; the clear bounds
    /// memory.
    pub fn invalidate_cache(&mut self) {
        self.cache_version += 1;
        self.cache.clear();
    }

    /// Invalidate after something affecting the given marks changed (for
    /// example a font for their family finished loading). Eviction is
    /// wholesale, not per-entry.
    pub fn invalidate_cache_for_marks(&mut self, marks: &TextMarks) {
        debug!(
            family = marks.font_family_or_default(),
            "invalidating measurements for marks"
        );
        self.invalidate_cache();
    }

    /// Release the measurement provider and all cached metrics. The engine
    /// remains usable afterwards in approximation mode.
    pub fn dispose(&mut self) {
        self.measurer = None;
        self.cache.clear();
    }

    #[cfg(test)]
    pub(crate) fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// A measured slice of one run waiting for its line to be finalized.
struct PendingBox {
    text: String,
    marks: TextMarks,
    char_start: usize,
    metrics: RunMetrics,
}

impl PendingBox {
    fn new(text: String, marks: TextMarks, char_start: usize, metrics: RunMetrics) -> Self {
        Self {
            text,
            marks,
            char_start,
            metrics,
        }
    }
}

/// Turn the pending boxes into a finished [`LineBox`]: sum widths, take the
/// max height, center within the container width when one is supplied, and
/// advance the y cursor.
fn finalize_line(
    lines: &mut Vec<LineBox>,
    boxes: &mut Vec<PendingBox>,
    y: &mut f32,
    total_width: &mut f32,
    options: &LayoutOptions,
) {
    let line_index = lines.len();
    let width: f32 = boxes.iter().map(|b| b.metrics.width).sum();
    let height = boxes
        .iter()
        .map(|b| b.metrics.height)
        .fold(0.0f32, f32::max);
    let offset_x = options
        .container_width
        .map(|container| (container - width) / 2.0)
        .unwrap_or(0.0);

    let mut run_boxes = Vec::with_capacity(boxes.len());
    let mut x = offset_x;
    let mut line_baseline = 0.0f32;
    for (run_index, pending) in boxes.drain(..).enumerate() {
        let char_len = pending.text.chars().count();
        // Baseline vertically centers the run's glyphs within its own box.
        let baseline = (pending.metrics.height
            - (pending.metrics.ascent + pending.metrics.descent))
            / 2.0
            + pending.metrics.ascent;
        line_baseline = line_baseline.max(baseline);
        run_boxes.push(RunBox {
            run: TextRun::new(pending.text, pending.marks),
            x,
            y: *y,
            width: pending.metrics.width,
            height: pending.metrics.height,
            baseline,
            line_index,
            run_index,
            char_range: pending.char_start..pending.char_start + char_len,
        });
        x += pending.metrics.width;
    }

    let char_range = run_boxes
        .first()
        .map(|first| first.char_range.start..run_boxes.last().unwrap().char_range.end)
        .unwrap_or(0..0);

    lines.push(LineBox {
        runs: run_boxes,
        x: offset_x,
        y: *y,
        width,
        height,
        baseline: line_baseline,
        line_index,
        char_range,
    });

    *y += height;
    *total_width = total_width.max(width);
}

/// Split a segment into alternating whitespace and non-whitespace tokens,
/// retaining the whitespace so wrapping happens strictly at token
/// boundaries.
fn whitespace_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0usize;
    let mut in_ws: Option<bool> = None;
    for (index, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        match in_ws {
            Some(previous) if previous != is_ws => {
                tokens.push(&text[start..index]);
                start = index;
                in_ws = Some(is_ws);
            }
            Some(_) => {}
            None => in_ws = Some(is_ws),
        }
    }
    if !text.is_empty() {
        tokens.push(&text[start..]);
    }
    tokens
}
