use serde::{Deserialize, Serialize};

/// Default font size in logical pixels when a run carries no explicit size.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;
/// Default font family when a run carries no explicit family.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
/// Default line-height multiplier (scales font size to the line box height).
pub const DEFAULT_LINE_HEIGHT: f32 = 1.2;

/// Font weight for a run: a named weight ("normal", "bold", ...) or a
/// numeric value (100..900).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    Named(String),
    Numeric(u16),
}

impl FontWeight {
    /// CSS-style string form, as handed to measurement providers and paint
    /// surfaces.
    pub fn css(&self) -> String {
        match self {
            FontWeight::Named(name) => name.clone(),
            FontWeight::Numeric(value) => value.to_string(),
        }
    }
}

/// Sparse style attributes applied to a span of text.
///
/// Marks are value objects: a `None` field is an absent key, so structural
/// equality via `PartialEq` treats differing key sets as unequal. Absent
/// keys resolve to the module defaults at measurement/paint time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMarks {
    /// Font size in logical pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Font family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Explicit font weight; wins over `bold` when both are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    /// Additional px inserted between consecutive glyphs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
    /// Line-height multiplier for lines this run participates in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    /// Text color, in whatever string form the host paint surface accepts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
}

impl TextMarks {
    /// Marks with no keys set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow merge: `other`'s set keys override, unset keys inherit from
    /// `self`.
    pub fn merged_with(&self, other: &TextMarks) -> TextMarks {
        TextMarks {
            font_size: other.font_size.or(self.font_size),
            font_family: other.font_family.clone().or_else(|| self.font_family.clone()),
            font_weight: other.font_weight.clone().or_else(|| self.font_weight.clone()),
            letter_spacing: other.letter_spacing.or(self.letter_spacing),
            line_height: other.line_height.or(self.line_height),
            color: other.color.clone().or_else(|| self.color.clone()),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            underline: other.underline.or(self.underline),
            strikethrough: other.strikethrough.or(self.strikethrough),
        }
    }

    /// Font size with the default applied.
    pub fn font_size_or_default(&self) -> f32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Font family with the default applied.
    pub fn font_family_or_default(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    /// Letter spacing with the default (0) applied.
    pub fn letter_spacing_or_default(&self) -> f32 {
        self.letter_spacing.unwrap_or(0.0)
    }

    /// Line-height multiplier, falling back to the caller-supplied default.
    pub fn line_height_or(&self, default: f32) -> f32 {
        self.line_height.unwrap_or(default)
    }

    /// Effective weight string: explicit `font_weight` wins, then `bold`,
    /// then "normal".
    pub fn resolved_weight(&self) -> String {
        if let Some(weight) = &self.font_weight {
            return weight.css();
        }
        if self.bold == Some(true) {
            return "bold".to_string();
        }
        "normal".to_string()
    }

    pub fn is_italic(&self) -> bool {
        self.italic == Some(true)
    }

    pub fn is_underline(&self) -> bool {
        self.underline == Some(true)
    }

    pub fn is_strikethrough(&self) -> bool {
        self.strikethrough == Some(true)
    }
}
