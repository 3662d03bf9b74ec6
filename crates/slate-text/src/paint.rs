//! Rendering a [`Layout`] onto a host paint surface.
//!
//! The surface contract is the minimal primitive set the paint routine
//! composes from: filled rectangles, anchored text, and stroked line
//! segments. Each primitive returns a `Result`, and the first failure
//! aborts the render at the boundary with nothing retried.

use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

use slate_richtext::{DEFAULT_LINE_HEIGHT, TextSelection};

use crate::engine::LayoutEngine;
use crate::error::{RenderError, SurfaceError};
use crate::line::{Layout, LineBox};
use crate::measure::FontSpec;

/// Text color applied when a run carries no explicit color mark.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

const SELECTION_COLOR: &str = "#3b82f6";
const SELECTION_OPACITY: f32 = 0.35;
/// Underline sits this many px below the baseline.
const UNDERLINE_OFFSET: f32 = 2.0;
/// Strikethrough sits at this fraction of the font size above the baseline.
const STRIKETHROUGH_RATIO: f32 = 0.3;

/// Horizontal anchoring of a drawn string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Vertical anchoring of a drawn string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
}

/// Host-supplied raster surface.
pub trait PaintSurface {
    fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: &str,
        opacity: f32,
    ) -> Result<(), SurfaceError>;

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        color: &str,
        align: TextAlign,
        baseline: TextBaseline,
    ) -> Result<(), SurfaceError>;

    fn stroke_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: &str,
        width: f32,
    ) -> Result<(), SurfaceError>;
}

/// Options for [`LayoutEngine::render_text_layout`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Selection to highlight under the text.
    pub selection: Option<TextSelection>,
    /// When set, a background rect sized to the layout plus padding is
    /// painted first.
    pub background_color: Option<String>,
    pub padding: f32,
    pub background_opacity: f32,
    /// When set, each line is centered within this width at paint time
    /// (on top of whatever centering the layout already baked in).
    pub container_width: Option<f32>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            selection: None,
            background_color: None,
            padding: 0.0,
            background_opacity: 1.0,
            container_width: None,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutEngine {
    /// Paint a layout with `(offset_x, offset_y)` as the center of the
    /// whole block.
    ///
    /// The first failing surface primitive aborts the render: the error is
    /// logged and returned, no further primitives are issued, and no
    /// document/layout state is touched.
    pub fn render_text_layout(
        &mut self,
        surface: &mut dyn PaintSurface,
        layout: &Layout,
        offset_x: f32,
        offset_y: f32,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        match self.render_block(surface, layout, offset_x, offset_y, options) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(error = %err, "paint surface failed; render aborted");
                Err(RenderError::Surface(err))
            }
        }
    }

    fn render_block(
        &mut self,
        surface: &mut dyn PaintSurface,
        layout: &Layout,
        offset_x: f32,
        offset_y: f32,
        options: &RenderOptions,
    ) -> Result<(), SurfaceError> {
        let origin_x = offset_x - layout.total_width / 2.0;
        let origin_y = offset_y - layout.total_height / 2.0;

        if let Some(color) = &options.background_color {
            surface.fill_rect(
                origin_x - options.padding,
                origin_y - options.padding,
                layout.total_width + 2.0 * options.padding,
                layout.total_height + 2.0 * options.padding,
                color,
                options.background_opacity,
            )?;
        }

        let selection_range = options
            .selection
            .map(|selection| selection.clamp_to(layout.char_end()).normalized_range())
            .filter(|range| !range.is_empty());

        for line in &layout.lines {
            let dx = line_offset(line, options);

            if let Some(range) = &selection_range {
                if let Some(rect) = self.line_selection_rect(line, range) {
                    surface.fill_rect(
                        origin_x + dx + rect.x,
                        origin_y + rect.y,
                        rect.width,
                        rect.height,
                        SELECTION_COLOR,
                        SELECTION_OPACITY,
                    )?;
                }
            }

            for run_box in &line.runs {
                let marks = &run_box.run.marks;
                let font = FontSpec::from_marks(marks);
                let color = marks.color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR);
                let spacing = marks.letter_spacing_or_default();
                let box_x = origin_x + dx + run_box.x;
                let box_y = origin_y + run_box.y;

                if spacing != 0.0 {
                    // The surface's text primitive has no spacing knob, so
                    // advance glyph by glyph.
                    let mut pen = box_x;
                    for grapheme in run_box.run.text.graphemes(true) {
                        let glyph_width =
                            self.measure_text(grapheme, marks, DEFAULT_LINE_HEIGHT).width;
                        surface.draw_text(
                            grapheme,
                            pen + glyph_width / 2.0,
                            box_y + run_box.height / 2.0,
                            &font,
                            color,
                            TextAlign::Center,
                            TextBaseline::Middle,
                        )?;
                        pen += glyph_width + spacing;
                    }
                } else {
                    surface.draw_text(
                        &run_box.run.text,
                        box_x + run_box.width / 2.0,
                        box_y + run_box.height / 2.0,
                        &font,
                        color,
                        TextAlign::Center,
                        TextBaseline::Middle,
                    )?;
                }

                let thickness = (font.size / 16.0).max(1.0);
                if marks.is_underline() {
                    let y = box_y + run_box.baseline + UNDERLINE_OFFSET;
                    surface.stroke_line(box_x, y, box_x + run_box.width, y, color, thickness)?;
                }
                if marks.is_strikethrough() {
                    let y = box_y + run_box.baseline - font.size * STRIKETHROUGH_RATIO;
                    surface.stroke_line(box_x, y, box_x + run_box.width, y, color, thickness)?;
                }
            }
        }

        Ok(())
    }
}

/// Paint-time horizontal correction for a line: the centering the render
/// options ask for, minus whatever the layout already baked in.
fn line_offset(line: &LineBox, options: &RenderOptions) -> f32 {
    options
        .container_width
        .map(|container| (container - line.width) / 2.0 - line.x)
        .unwrap_or(0.0)
}
