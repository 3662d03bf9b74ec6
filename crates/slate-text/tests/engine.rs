//! End-to-end engine coverage with a deterministic mock measurer.

use std::cell::Cell;
use std::rc::Rc;

use slate_richtext::{Direction, RichTextDocument, TextMarks, TextRun, TextSelection};
use slate_text::{
    FontSpec, LayoutEngine, LayoutOptions, PaintSurface, RenderOptions, SurfaceError, TextAlign,
    TextBaseline, TextMeasurer, TextMetrics,
};

/// Half-em-per-char measurer that counts provider calls.
struct CountingMeasurer {
    calls: Rc<Cell<usize>>,
}

impl TextMeasurer for CountingMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> Option<TextMetrics> {
        self.calls.set(self.calls.get() + 1);
        Some(TextMetrics {
            width: 0.5 * font.size * text.chars().count() as f32,
            ascent: 0.8 * font.size,
            descent: 0.2 * font.size,
        })
    }
}

fn counting_engine() -> (LayoutEngine, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let engine = LayoutEngine::with_measurer(Box::new(CountingMeasurer {
        calls: calls.clone(),
    }));
    (engine, calls)
}

fn doc(text: &str) -> RichTextDocument {
    RichTextDocument::from_plain_text(text, TextMarks::default())
}

#[test]
fn measure_run_hits_cache_on_identical_input() {
    let (mut engine, calls) = counting_engine();
    let run = TextRun::new("hello", TextMarks::default());

    let first = engine.measure_run(&run);
    let count_after_first = calls.get();
    let second = engine.measure_run(&run);

    assert_eq!(first, second);
    assert_eq!(calls.get(), count_after_first);
}

#[test]
fn invalidate_cache_forces_remeasure() {
    let (mut engine, calls) = counting_engine();
    let run = TextRun::new("hello", TextMarks::default());

    engine.measure_run(&run);
    let count_after_first = calls.get();

    engine.invalidate_cache();
    engine.measure_run(&run);
    assert!(calls.get() > count_after_first);
}

#[test]
fn invalidate_cache_for_marks_forces_remeasure() {
    let (mut engine, calls) = counting_engine();
    let marks = TextMarks {
        font_family: Some("Inter".to_string()),
        ..TextMarks::default()
    };
    let run = TextRun::new("hello", marks.clone());

    engine.measure_run(&run);
    let count_after_first = calls.get();

    engine.invalidate_cache_for_marks(&marks);
    engine.measure_run(&run);
    assert!(calls.get() > count_after_first);
}

#[test]
fn relayout_of_unchanged_text_is_served_from_cache() {
    let (mut engine, calls) = counting_engine();
    let document = doc("hello wide world");

    engine.layout_text(&document, 60.0, 1.2);
    let count_after_first = calls.get();
    engine.layout_text(&document, 60.0, 1.2);

    assert_eq!(calls.get(), count_after_first);
}

#[test]
fn layout_follows_model_edits() {
    let (mut engine, _calls) = counting_engine();
    let original = doc("hello world");
    let edited = original.insert_text(5, " there", TextMarks::default());

    let layout = engine.layout_text(&edited, f32::INFINITY, 1.2);
    let text: String = layout.lines[0]
        .runs
        .iter()
        .map(|b| b.run.text.as_str())
        .collect();
    assert_eq!(text, "hello there world");
    assert_eq!(layout.version, edited.version);
}

#[test]
fn insert_then_delete_round_trips_through_layout() {
    let (mut engine, _calls) = counting_engine();
    let original = doc("hello world");
    let round = original
        .insert_text(5, "XYZ", TextMarks::default())
        .delete_range(5, 8);

    let layout_original = engine.layout_text(&original, f32::INFINITY, 1.2);
    let layout_round = engine.layout_text(&round, f32::INFINITY, 1.2);
    assert_eq!(layout_original.total_width, layout_round.total_width);
    assert_eq!(layout_original.lines.len(), layout_round.lines.len());
}

#[test]
fn styled_fragments_layout_as_separate_boxes() {
    let (mut engine, _calls) = counting_engine();
    let document = doc("hello world")
        .apply_marks(
            0,
            5,
            &TextMarks {
                bold: Some(true),
                ..TextMarks::default()
            },
        )
        .normalize();

    let layout = engine.layout_text(&document, f32::INFINITY, 1.2);
    assert_eq!(layout.lines.len(), 1);
    assert_eq!(layout.lines[0].runs.len(), 2);
    assert_eq!(layout.lines[0].runs[0].run.text, "hello");
    assert_eq!(layout.lines[0].runs[0].run.marks.bold, Some(true));
    assert_eq!(layout.lines[0].runs[1].run.text, " world");
}

#[test]
fn position_mapping_is_inverse_within_tolerance_across_styles() {
    let (mut engine, _calls) = counting_engine();
    let document = doc("the quick brown fox\njumps over")
        .apply_marks(
            4,
            9,
            &TextMarks {
                font_size: Some(24.0),
                ..TextMarks::default()
            },
        )
        .normalize();
    let layout = engine.layout_text(&document, 90.0, 1.2);

    for char_index in 0..=document.char_len() {
        let Some(position) = engine.position_from_character(&layout, char_index) else {
            continue;
        };
        let back = engine.character_from_position(&layout, position.x, position.y);
        assert!(
            back.abs_diff(char_index) <= 1,
            "char {char_index} mapped back to {back}"
        );
    }
}

#[test]
fn selection_rects_cover_a_wrapped_selection() {
    let (mut engine, _calls) = counting_engine();
    let document = doc("hello world");
    // Wrap after "hello" (5 chars * 8px = 40).
    let layout = engine.layout_text(&document, 41.0, 1.2);
    assert_eq!(layout.lines.len(), 2);

    let rects =
        engine.selection_rects(&layout, &TextSelection::new(3, 9, Direction::Forward));
    assert_eq!(rects.len(), 2);
    assert!(rects[0].y < rects[1].y);
    // Line one: "lo" from char 3 to the line end.
    assert_eq!(rects[0].x, 24.0);
    assert_eq!(rects[0].width, 16.0);
    // Line two: "wor" from the line start.
    assert_eq!(rects[1].x, 0.0);
    assert_eq!(rects[1].width, 24.0);
}

/// Surface that accepts everything, recording only the primitive kinds.
#[derive(Default)]
struct NullSurface {
    rects: usize,
    texts: usize,
    lines: usize,
}

impl PaintSurface for NullSurface {
    fn fill_rect(
        &mut self,
        _x: f32,
        _y: f32,
        _width: f32,
        _height: f32,
        _color: &str,
        _opacity: f32,
    ) -> Result<(), SurfaceError> {
        self.rects += 1;
        Ok(())
    }

    fn draw_text(
        &mut self,
        _text: &str,
        _x: f32,
        _y: f32,
        _font: &FontSpec,
        _color: &str,
        _align: TextAlign,
        _baseline: TextBaseline,
    ) -> Result<(), SurfaceError> {
        self.texts += 1;
        Ok(())
    }

    fn stroke_line(
        &mut self,
        _x1: f32,
        _y1: f32,
        _x2: f32,
        _y2: f32,
        _color: &str,
        _width: f32,
    ) -> Result<(), SurfaceError> {
        self.lines += 1;
        Ok(())
    }
}

#[test]
fn render_paints_background_selection_and_text() {
    let (mut engine, _calls) = counting_engine();
    let document = doc("hello world");
    let layout = engine.layout_with_options(
        &document,
        &LayoutOptions {
            max_width: 41.0,
            ..LayoutOptions::default()
        },
    );

    let mut surface = NullSurface::default();
    let options = RenderOptions {
        selection: Some(TextSelection::new(0, 8, Direction::Forward)),
        background_color: Some("#fff8dc".to_string()),
        padding: 6.0,
        ..RenderOptions::new()
    };
    engine
        .render_text_layout(&mut surface, &layout, 200.0, 100.0, &options)
        .unwrap();

    // Background plus one selection rect per touched line.
    assert_eq!(surface.rects, 3);
    // One text primitive per run box.
    assert_eq!(surface.texts, 2);
    assert_eq!(surface.lines, 0);
}

#[test]
fn headless_engine_still_lays_out() {
    let mut engine = LayoutEngine::new();
    let layout = engine.layout_text(&doc("hello world"), f32::INFINITY, 1.2);
    assert_eq!(layout.lines.len(), 1);
    // Approximation: 11 chars at 0.6em of 16px.
    assert!((layout.total_width - 11.0 * 9.6).abs() < 1e-3);
}
