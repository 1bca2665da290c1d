//! Paragraph layout
//!
//! Splits text into lines and places each line one baseline distance below
//! the previous. Spacing is font-size proportional only; no glyph metrics.

use crate::geometry::{Color, Font, Position};

use super::types::{Paragraph, TextLine, TextStatus};

/// Baseline-to-baseline distance as a multiple of the font size
pub const DEFAULT_LINE_SPACING_FACTOR: f64 = 1.2;

/// Font size assumed when no font is supplied
pub const NOMINAL_FONT_SIZE: f64 = 12.0;

/// Absolute baseline distance for a font and spacing factor.
/// Non-positive factors fall back to the default.
pub fn baseline_distance(font: Option<&Font>, spacing_factor: f64) -> f64 {
    match font {
        None => NOMINAL_FONT_SIZE * DEFAULT_LINE_SPACING_FACTOR,
        Some(font) => {
            let factor = if spacing_factor > 0.0 {
                spacing_factor
            } else {
                DEFAULT_LINE_SPACING_FACTOR
            };
            font.size * factor
        }
    }
}

/// Anchor of line `index` in a paragraph starting at `start`
///
/// A start without both coordinates lays the line out from (0, 0).
pub fn line_position(
    start: Option<&Position>,
    index: usize,
    font: Option<&Font>,
    spacing_factor: f64,
) -> Option<Position> {
    let start = start?;
    let offset = index as f64 * baseline_distance(font, spacing_factor);
    let mut position = match start.point() {
        Some(p) => Position::at(p.x, p.y + offset),
        None => Position::at(0.0, offset),
    };
    position.set_page_index(start.page_index());
    Some(position)
}

/// Raw lines of `text`; trailing empty lines are dropped, interior ones kept
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Lay `text` out as a paragraph anchored at `start`
///
/// Blank text yields a paragraph with no lines and no spacing factors.
/// Every adjacent line pair records the input `spacing_factor`.
pub fn layout_paragraph(
    text: Option<&str>,
    start: Option<Position>,
    font: Option<Font>,
    spacing_factor: f64,
    color: Option<Color>,
    status: Option<TextStatus>,
) -> Paragraph {
    let mut paragraph = Paragraph::new(start);
    paragraph.font = font;

    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return paragraph,
    };

    let raw = split_lines(text);
    let lines: Vec<TextLine> = raw
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let position = line_position(
                paragraph.position.as_ref(),
                i,
                paragraph.font.as_ref(),
                spacing_factor,
            );
            TextLine::from_text(line, position, color, paragraph.font.as_ref(), status.clone())
        })
        .collect();
    let spacings = vec![spacing_factor; lines.len().saturating_sub(1)];

    tracing::debug!(
        lines = lines.len(),
        baseline = baseline_distance(paragraph.font.as_ref(), spacing_factor),
        "Laid out paragraph"
    );

    paragraph.set_lines(lines, spacings);
    paragraph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn y_of(line: &TextLine) -> f64 {
        line.position.as_ref().and_then(|p| p.y()).unwrap()
    }

    #[test]
    fn test_three_lines_are_one_baseline_apart() {
        let start = Position::at(50.0, 100.0);
        let paragraph = layout_paragraph(
            Some("A\nB\nC"),
            Some(start),
            Some(Font::new("Helvetica", 10.0)),
            1.2,
            Some(Color::BLACK),
            None,
        );

        assert_eq!(paragraph.lines().len(), 3);
        let offsets: Vec<f64> = paragraph.lines().iter().map(|l| y_of(l) - 100.0).collect();
        for (got, want) in offsets.iter().zip([0.0, 12.0, 24.0]) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
        assert_eq!(paragraph.line_spacings(), &[1.2, 1.2]);
        assert_eq!(paragraph.text(), "A\nB\nC");
    }

    #[test]
    fn test_blank_text_yields_no_lines() {
        for text in [None, Some(""), Some("   \n\t ")] {
            let paragraph = layout_paragraph(
                text,
                Some(Position::at(0.0, 0.0)),
                Some(Font::new("Helvetica", 10.0)),
                1.2,
                None,
                None,
            );
            assert!(paragraph.lines().is_empty());
            assert!(paragraph.line_spacings().is_empty());
        }
    }

    #[test]
    fn test_single_line_has_no_spacing() {
        let paragraph = layout_paragraph(
            Some("only"),
            Some(Position::at(1.0, 1.0)),
            None,
            1.5,
            None,
            None,
        );
        assert_eq!(paragraph.lines().len(), 1);
        assert!(paragraph.line_spacings().is_empty());
    }

    #[test]
    fn test_interior_empty_line_kept_trailing_dropped() {
        assert_eq!(split_lines("a\n\nb\n\n"), vec!["a", "", "b"]);

        let paragraph = layout_paragraph(
            Some("a\n\nb\n"),
            Some(Position::at(0.0, 0.0)),
            Some(Font::new("Helvetica", 10.0)),
            1.0,
            None,
            None,
        );
        assert_eq!(paragraph.lines().len(), 3);
        assert_eq!(paragraph.lines()[1].text.as_deref(), Some(""));
        assert_eq!(paragraph.line_spacings().len(), 2);
    }

    #[test]
    fn test_missing_font_uses_nominal_size() {
        assert!((baseline_distance(None, 3.0) - 14.4).abs() < 1e-9);
        let font = Font::new("Courier", 20.0);
        assert!((baseline_distance(Some(&font), 0.0) - 24.0).abs() < 1e-9);
        assert!((baseline_distance(Some(&font), -1.0) - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_start_without_coordinates_degrades_to_origin() {
        let start = Position::at_page(2);
        let font = Font::new("Helvetica", 10.0);
        let second = line_position(Some(&start), 1, Some(&font), 2.0).unwrap();
        assert_eq!(second.x(), Some(0.0));
        assert_eq!(second.y(), Some(20.0));
        assert_eq!(second.page_index(), Some(2));

        assert!(line_position(None, 1, Some(&font), 2.0).is_none());
    }

    #[test]
    fn test_lines_carry_style_and_single_run() {
        let paragraph = layout_paragraph(
            Some("x\ny"),
            Some(Position::at_page_coordinates(0, 10.0, 10.0)),
            Some(Font::new("Times-Roman", 8.0)),
            1.2,
            Some(Color::RED),
            None,
        );
        for line in paragraph.lines() {
            assert_eq!(line.color, Some(Color::RED));
            assert_eq!(line.font_name.as_deref(), Some("Times-Roman"));
            assert_eq!(line.runs().len(), 1);
            assert_eq!(line.runs()[0].position, line.position);
        }
    }
}
