//! Slate Draw text stack.
//!
//! Facade over the rich-text document model and the layout engine that back
//! in-canvas text editing.

pub use slate_richtext as richtext;
pub use slate_text as text;
