//! Text model and layout engine
//!
//! Runs, lines and paragraphs, and the layout that turns raw text into
//! positioned lines.

mod builder;
mod layout;
mod types;

pub use builder::ParagraphBuilder;
pub use layout::{
    baseline_distance, layout_paragraph, line_position, split_lines,
    DEFAULT_LINE_SPACING_FACTOR, NOMINAL_FONT_SIZE,
};
pub use types::{
    DocumentFontInfo, FontRecommendation, FontType, Paragraph, TextElement, TextLine, TextStatus,
    Word,
};
