use slate_richtext::TextMarks;

/// Width ratio of the fixed-ratio fallback: an average glyph is assumed to
/// be 0.6 em wide when no measurement provider is installed.
pub const APPROX_CHAR_WIDTH: f32 = 0.6;
/// Ascent/descent split of the fallback, as fractions of the font size.
pub const APPROX_ASCENT: f32 = 0.8;
pub const APPROX_DESCENT: f32 = 0.2;

/// Resolved font description handed to measurement providers and paint
/// surfaces. Defaults from the marks module are already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub weight: String,
    pub italic: bool,
}

impl FontSpec {
    /// Resolve a run's marks into a concrete font description.
    pub fn from_marks(marks: &TextMarks) -> Self {
        Self {
            family: marks.font_family_or_default().to_string(),
            size: marks.font_size_or_default(),
            weight: marks.resolved_weight(),
            italic: marks.is_italic(),
        }
    }
}

/// Raw metrics for a string under one font, as reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the whole string (may reflect kerning).
    pub width: f32,
    /// Pixels above the baseline.
    pub ascent: f32,
    /// Pixels below the baseline (positive).
    pub descent: f32,
}

/// Metrics for a measured run: provider metrics with letter spacing folded
/// into the width and the line-height multiplier folded into the height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunMetrics {
    pub width: f32,
    pub height: f32,
    pub ascent: f32,
    pub descent: f32,
}

/// Host-supplied text measurement.
///
/// Implementors return glyph-accurate metrics for the exact string (not a
/// per-glyph sum, so kerning can be reflected). Returning `None` makes the
/// engine fall back to the fixed-ratio approximation for that call.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> Option<TextMetrics>;
}

/// Fixed-ratio approximation used when no provider is available, so layout
/// degrades gracefully in headless contexts instead of failing.
pub(crate) fn approximate_metrics(text: &str, font: &FontSpec) -> TextMetrics {
    let char_count = text.chars().count() as f32;
    TextMetrics {
        width: APPROX_CHAR_WIDTH * font.size * char_count,
        ascent: APPROX_ASCENT * font.size,
        descent: APPROX_DESCENT * font.size,
    }
}

/// Fold letter spacing and line height into provider metrics.
pub(crate) fn run_metrics_from(
    metrics: TextMetrics,
    text: &str,
    marks: &TextMarks,
    default_line_height: f32,
) -> RunMetrics {
    let char_count = text.chars().count();
    let spacing = marks.letter_spacing_or_default() * char_count.saturating_sub(1) as f32;
    let height = marks.line_height_or(default_line_height) * marks.font_size_or_default();
    RunMetrics {
        width: metrics.width + spacing,
        height,
        ascent: metrics.ascent,
        descent: metrics.descent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_richtext::DEFAULT_LINE_HEIGHT;

    #[test]
    fn test_font_spec_from_marks_applies_defaults() {
        let spec = FontSpec::from_marks(&TextMarks::default());
        assert_eq!(spec.family, "sans-serif");
        assert_eq!(spec.size, 16.0);
        assert_eq!(spec.weight, "normal");
        assert!(!spec.italic);
    }

    #[test]
    fn test_approximate_metrics() {
        let font = FontSpec::from_marks(&TextMarks::default());
        let metrics = approximate_metrics("abcd", &font);
        assert_eq!(metrics.width, 0.6 * 16.0 * 4.0);
        assert_eq!(metrics.ascent, 0.8 * 16.0);
        assert_eq!(metrics.descent, 0.2 * 16.0);
    }

    #[test]
    fn test_letter_spacing_folds_into_width() {
        let marks = TextMarks {
            letter_spacing: Some(2.0),
            ..TextMarks::default()
        };
        let font = FontSpec::from_marks(&marks);
        let raw = approximate_metrics("abc", &font);
        let run = run_metrics_from(raw, "abc", &marks, DEFAULT_LINE_HEIGHT);
        // Two gaps between three glyphs.
        assert_eq!(run.width, raw.width + 4.0);

        // A single glyph gets no spacing.
        let raw_one = approximate_metrics("a", &font);
        let run_one = run_metrics_from(raw_one, "a", &marks, DEFAULT_LINE_HEIGHT);
        assert_eq!(run_one.width, raw_one.width);
    }

    #[test]
    fn test_height_uses_line_height_multiplier() {
        let marks = TextMarks {
            font_size: Some(20.0),
            line_height: Some(1.5),
            ..TextMarks::default()
        };
        let font = FontSpec::from_marks(&marks);
        let run = run_metrics_from(approximate_metrics("x", &font), "x", &marks, 1.2);
        assert_eq!(run.height, 30.0);

        let defaulted = TextMarks {
            font_size: Some(20.0),
            ..TextMarks::default()
        };
        let run = run_metrics_from(
            approximate_metrics("x", &font),
            "x",
            &defaulted,
            1.2,
        );
        assert_eq!(run.height, 24.0);
    }
}
