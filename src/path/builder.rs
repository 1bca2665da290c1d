//! Cursor-based path construction

use super::segment::{Bezier, Line, PathSegment, SegmentStyle};
use super::types::Path;
use crate::error::{ModelError, Result};
use crate::geometry::{Color, Point};

/// Control point offset for approximating a quarter circle with a cubic
const KAPPA: f64 = 0.5522847498;

/// Builds a multi-segment path from drawing commands
///
/// Styling applies to every segment added after the call. Drawing before
/// `move_to` is an error.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    page_index: Option<u32>,
    segments: Vec<PathSegment>,
    cursor: Option<Point>,
    subpath_start: Option<Point>,
    style: SegmentStyle,
    even_odd_fill: Option<bool>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_page(page_index: u32) -> Self {
        Self {
            page_index: Some(page_index),
            ..Default::default()
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let point = Point::new(x, y);
        self.cursor = Some(point);
        self.subpath_start = Some(point);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Result<Self> {
        let from = self.cursor.ok_or(ModelError::MissingCursor { op: "line_to" })?;
        let to = Point::new(x, y);
        let mut line = Line::new(from, to);
        line.style = self.style.clone();
        self.segments.push(line.into());
        self.cursor = Some(to);
        Ok(self)
    }

    pub fn bezier_to(mut self, c1: Point, c2: Point, to: Point) -> Result<Self> {
        let from = self.cursor.ok_or(ModelError::MissingCursor { op: "bezier_to" })?;
        let mut curve = Bezier::new(from, c1, c2, to);
        curve.style = self.style.clone();
        self.segments.push(curve.into());
        self.cursor = Some(to);
        Ok(self)
    }

    /// Line back to the subpath start, unless the cursor is already there
    pub fn close_path(self) -> Result<Self> {
        let (cursor, start) = match (self.cursor, self.subpath_start) {
            (Some(c), Some(s)) => (c, s),
            _ => return Err(ModelError::MissingCursor { op: "close_path" }),
        };
        let mut builder = if cursor != start {
            self.line_to(start.x, start.y)?
        } else {
            self
        };
        builder.cursor = Some(start);
        Ok(builder)
    }

    /// Closed rectangle from the bottom-left corner
    pub fn rect(self, x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        self.move_to(x, y)
            .line_to(x + width, y)?
            .line_to(x + width, y + height)?
            .line_to(x, y + height)?
            .close_path()
    }

    /// Circle approximated by four cubic Béziers, starting at the top
    pub fn circle(self, cx: f64, cy: f64, r: f64) -> Result<Self> {
        let k = KAPPA * r;
        let p = Point::new;
        self.move_to(cx, cy + r)
            .bezier_to(p(cx + k, cy + r), p(cx + r, cy + k), p(cx + r, cy))?
            .bezier_to(p(cx + r, cy - k), p(cx + k, cy - r), p(cx, cy - r))?
            .bezier_to(p(cx - k, cy - r), p(cx - r, cy - k), p(cx - r, cy))?
            .bezier_to(p(cx - r, cy + k), p(cx - k, cy + r), p(cx, cy + r))?
            .close_path()
    }

    pub fn stroke_color(mut self, color: Color) -> Self {
        self.style.stroke_color = Some(color);
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.style.fill_color = Some(color);
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.style.stroke_width = Some(width);
        self
    }

    pub fn dash(self, pattern: &[f64]) -> Self {
        self.dash_with_phase(0.0, pattern)
    }

    pub fn dash_with_phase(mut self, phase: f64, pattern: &[f64]) -> Self {
        self.style.dash_array = pattern.to_vec();
        self.style.dash_phase = Some(phase);
        self
    }

    pub fn even_odd_fill(mut self, even_odd: bool) -> Self {
        self.even_odd_fill = Some(even_odd);
        self
    }

    pub fn build(self) -> Result<Path> {
        if self.segments.is_empty() {
            return Err(ModelError::EmptyPathBuilder);
        }
        Ok(Path {
            id: None,
            page_index: self.page_index,
            segments: self.segments,
            even_odd_fill: self.even_odd_fill,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_requires_cursor() {
        let err = PathBuilder::new().line_to(1.0, 1.0).unwrap_err();
        assert!(matches!(err, ModelError::MissingCursor { op: "line_to" }));
        assert!(PathBuilder::new().close_path().is_err());
    }

    #[test]
    fn test_build_without_segments_fails() {
        let err = PathBuilder::new().move_to(0.0, 0.0).build().unwrap_err();
        assert!(matches!(err, ModelError::EmptyPathBuilder));
    }

    #[test]
    fn test_rect_has_four_sides() {
        let path = PathBuilder::on_page(2)
            .rect(10.0, 20.0, 30.0, 40.0)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(path.segments.len(), 4);
        assert_eq!(path.segments[3].end(), Point::new(10.0, 20.0));
        let position = path.position().unwrap();
        assert_eq!(position.point(), Some(Point::new(10.0, 60.0)));
        assert_eq!(position.page_index(), Some(2));
    }

    #[test]
    fn test_close_path_at_start_adds_nothing() {
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(5.0, 0.0)
            .unwrap()
            .line_to(0.0, 0.0)
            .unwrap()
            .close_path()
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(path.segments.len(), 2);
    }

    #[test]
    fn test_circle_is_four_curves() {
        let path = PathBuilder::new().circle(0.0, 0.0, 10.0).unwrap().build().unwrap();
        assert_eq!(path.segments.len(), 4);
        assert!(path
            .segments
            .iter()
            .all(|s| matches!(s, PathSegment::Bezier(_))));
        let bounds = path.control_bounds().unwrap();
        assert!((bounds.width - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_style_applies_to_later_segments() {
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(1.0, 0.0)
            .unwrap()
            .stroke_color(Color::RED)
            .dash(&[2.0, 1.0])
            .line_to(1.0, 1.0)
            .unwrap()
            .even_odd_fill(true)
            .build()
            .unwrap();
        assert_eq!(path.segments[0].style().stroke_color, None);
        assert_eq!(path.segments[1].style().stroke_color, Some(Color::RED));
        assert_eq!(path.segments[1].style().dash_phase, Some(0.0));
        assert!(path.uses_even_odd_fill());
    }
}
