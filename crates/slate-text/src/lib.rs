//! slate-text: layout engine for run-based styled text.
//!
//! Consumes a [`slate_richtext::RichTextDocument`] plus a wrap width and
//! produces a [`Layout`] of positioned line/run boxes, together with
//! character ↔ pixel position mapping and a paint routine over a minimal
//! host surface contract. Measurement is delegated to a pluggable
//! [`TextMeasurer`]; without one the engine degrades to a fixed-ratio
//! approximation instead of failing.

mod cache;
pub mod engine;
pub mod error;
pub mod line;
pub mod measure;
pub mod paint;

pub use engine::{LayoutEngine, LayoutOptions};
pub use error::{RenderError, SurfaceError};
pub use hit_test::{CaretRect, DEFAULT_CARET_WIDTH, Position, SelectionRect};
pub use line::{Layout, LineBox, RunBox};
pub use measure::{FontSpec, RunMetrics, TextMeasurer, TextMetrics};
pub use paint::{DEFAULT_TEXT_COLOR, PaintSurface, RenderOptions, TextAlign, TextBaseline};
