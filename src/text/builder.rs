//! Paragraph construction and editing

use crate::geometry::{Color, Font, Position};
use crate::refs::{Reference, TextRef};

use super::layout::{layout_paragraph, DEFAULT_LINE_SPACING_FACTOR};
use super::types::{Paragraph, TextLine, TextStatus};

/// Builds a new paragraph from text, or restyles an existing one
#[derive(Debug, Clone)]
pub struct ParagraphBuilder {
    paragraph: Paragraph,
    text: Option<String>,
    font: Option<Font>,
    color: Option<Color>,
    line_spacing: Option<f64>,
    default_line_spacing: f64,
    original_position: Option<Position>,
}

impl Default for ParagraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ParagraphBuilder {
    pub fn new() -> Self {
        Self::with_default_spacing(DEFAULT_LINE_SPACING_FACTOR)
    }

    /// Builder whose spacing factor defaults to `spacing` instead of 1.2
    pub fn with_default_spacing(spacing: f64) -> Self {
        Self {
            paragraph: Paragraph::default(),
            text: None,
            font: None,
            color: None,
            line_spacing: None,
            default_line_spacing: spacing,
            original_position: None,
        }
    }

    /// Start editing an existing paragraph from its reference.
    ///
    /// The reference's children become the initial lines; the reference
    /// position is remembered so a later `at` moves every line with it.
    pub fn edit(existing: &TextRef) -> Self {
        let mut builder = Self::new();
        let position = existing.position().cloned();
        builder.original_position = position.clone();
        builder.paragraph.position = position;
        builder.paragraph.font = match (&existing.font_name, existing.font_size) {
            (Some(name), Some(size)) => Some(Font::new(name.clone(), size)),
            _ => None,
        };
        for child in &existing.children {
            builder.paragraph.add_line(TextLine::from_text_ref(child));
        }
        builder
            .paragraph
            .set_line_spacings(existing.line_spacings.clone());
        builder
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Spacing factor, not an absolute distance
    pub fn line_spacing(mut self, factor: f64) -> Self {
        self.line_spacing = Some(factor);
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.paragraph.position = Some(position);
        self
    }

    pub fn at_page_coordinates(self, page_index: u32, x: f64, y: f64) -> Self {
        self.at(Position::at_page_coordinates(page_index, x, y))
    }

    /// True when only the text differs from the paragraph being edited
    pub fn only_text_changed(&self) -> bool {
        self.color.is_none() && self.font.is_none() && self.line_spacing.is_none()
    }

    pub fn build(self) -> Paragraph {
        match self.text.clone() {
            Some(text) => self.build_from_text(&text),
            None => self.restyle(),
        }
    }

    fn build_from_text(self, text: &str) -> Paragraph {
        let status = TextStatus::from_paragraph(&self.paragraph);
        let mut paragraph = layout_paragraph(
            Some(text),
            self.paragraph.position.clone(),
            self.font.or(self.paragraph.font),
            self.line_spacing.unwrap_or(self.default_line_spacing),
            Some(self.color.unwrap_or(Color::BLACK)),
            Some(status),
        );
        paragraph.id = self.paragraph.id;
        paragraph
    }

    fn restyle(self) -> Paragraph {
        let mut paragraph = self.paragraph;
        if let Some(font) = &self.font {
            paragraph.font = Some(font.clone());
        }
        let pairs = paragraph.lines().len().saturating_sub(1);
        let spacings = match self.line_spacing {
            Some(factor) => vec![factor; pairs],
            None => {
                let mut spacings = paragraph.line_spacings().to_vec();
                let fill = spacings.last().copied().unwrap_or(self.default_line_spacing);
                spacings.resize(pairs, fill);
                spacings
            }
        };
        paragraph.set_line_spacings(spacings);

        for line in paragraph.lines_mut() {
            if let Some(color) = self.color {
                line.color = Some(color);
            }
            if let Some(font) = &self.font {
                line.font_name = Some(font.name.clone());
                line.font_size = Some(font.size);
                for run in &mut line.elements {
                    run.font = Some(font.clone());
                }
            }
        }

        let target = paragraph.position.as_ref().and_then(|p| p.point());
        let base = self
            .original_position
            .as_ref()
            .and_then(|p| p.point())
            .or_else(|| {
                paragraph
                    .lines()
                    .first()
                    .and_then(|l| l.position.as_ref())
                    .and_then(|p| p.point())
            });
        if let (Some(target), Some(base)) = (target, base) {
            let (dx, dy) = (target.x - base.x, target.y - base.y);
            for line in paragraph.lines_mut() {
                if let Some(position) = line.position.as_mut() {
                    position.move_x(dx);
                    position.move_y(dy);
                }
            }
        }
        paragraph
    }
}
