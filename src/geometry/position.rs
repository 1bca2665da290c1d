//! Object positions and position selectors
//!
//! A `Position` is an optional (x, y) anchor plus optional page index,
//! bounding rectangle and text selectors used when locating objects.
//! Unassigned coordinates are meaningful and serialise as `null`.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::{BoundingRect, Point};
use crate::error::Result;

/// How a position selects objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionMode {
    Intersect,
    Contains,
}

/// Shape described by a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShapeType {
    Point,
    Line,
    Circle,
    Rect,
}

/// Anchor of a document object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bounding_rect: Option<BoundingRect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<PositionMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_starts_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_pattern: Option<String>,
}

impl Position {
    /// Point position with a zero-size bounding rectangle
    pub fn at(x: f64, y: f64) -> Self {
        let mut position = Self::default();
        position.anchor(x, y);
        position
    }

    /// Whole-page position with no coordinates
    pub fn at_page(page_index: u32) -> Self {
        Self {
            page_index: Some(page_index),
            mode: Some(PositionMode::Contains),
            ..Default::default()
        }
    }

    pub fn at_page_coordinates(page_index: u32, x: f64, y: f64) -> Self {
        let mut position = Self::at_page(page_index);
        position.anchor(x, y);
        position
    }

    /// Named-element selector
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Position with an explicit extent, anchored at the rectangle origin
    pub fn with_rect(page_index: Option<u32>, rect: BoundingRect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            page_index,
            bounding_rect: Some(rect),
            mode: Some(PositionMode::Contains),
            shape: Some(ShapeType::Rect),
            ..Default::default()
        }
    }

    fn anchor(&mut self, x: f64, y: f64) {
        self.x = Some(x);
        self.y = Some(y);
        self.mode = Some(PositionMode::Contains);
        self.shape = Some(ShapeType::Point);
        self.bounding_rect = Some(BoundingRect::new(x, y, 0.0, 0.0));
    }

    /// X coordinate, falling back to the bounding rectangle origin
    pub fn x(&self) -> Option<f64> {
        self.x.or_else(|| self.bounding_rect.map(|r| r.x))
    }

    /// Y coordinate, falling back to the bounding rectangle origin
    pub fn y(&self) -> Option<f64> {
        self.y.or_else(|| self.bounding_rect.map(|r| r.y))
    }

    /// Both coordinates, if both are assigned
    pub fn point(&self) -> Option<Point> {
        Some(Point::new(self.x()?, self.y()?))
    }

    pub fn page_index(&self) -> Option<u32> {
        self.page_index
    }

    pub fn set_page_index(&mut self, page_index: Option<u32>) {
        self.page_index = page_index;
    }

    pub fn bounding_rect(&self) -> Option<&BoundingRect> {
        self.bounding_rect.as_ref()
    }

    /// Re-anchor at (x, y), keeping page and selectors
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.anchor(x, y);
    }

    /// Shift horizontally; no-op when the position has no anchor
    pub fn move_x(&mut self, offset: f64) {
        if let Some(p) = self.point() {
            self.anchor(p.x + offset, p.y);
        }
    }

    /// Shift vertically; no-op when the position has no anchor
    pub fn move_y(&mut self, offset: f64) {
        if let Some(p) = self.point() {
            self.anchor(p.x, p.y + offset);
        }
    }

    /// Full match of `text_pattern` against `text`, `.` matching newlines.
    /// A position without a pattern matches everything.
    pub fn text_matches(&self, text: &str) -> Result<bool> {
        match &self.text_pattern {
            Some(pattern) => Ok(full_match_regex(pattern)?.is_match(text)),
            None => Ok(true),
        }
    }
}

/// Compile a pattern that must match the whole input, dot-all enabled
pub(crate) fn full_match_regex(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("(?s)^(?:{})$", pattern))?)
}

/// Fluent construction of selector positions
#[derive(Debug, Default)]
pub struct PositionBuilder {
    position: Position,
}

impl PositionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_page(mut self, page_index: u32) -> Self {
        self.position.page_index = Some(page_index);
        self
    }

    pub fn at_coordinates(mut self, x: f64, y: f64) -> Self {
        self.position.anchor(x, y);
        self
    }

    pub fn text_starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.position.text_starts_with = Some(prefix.into());
        self
    }

    pub fn text_matches(mut self, pattern: impl Into<String>) -> Self {
        self.position.text_pattern = Some(pattern.into());
        self
    }

    pub fn build(self) -> Position {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_coordinates_serialize_as_null() {
        let json = serde_json::to_string(&Position::default()).unwrap();
        assert_eq!(json, r#"{"x":null,"y":null}"#);
    }

    #[test]
    fn test_null_coordinates_are_not_coerced() {
        let position: Position = serde_json::from_str(r#"{"x":null,"y":4.5}"#).unwrap();
        assert_eq!(position.x(), None);
        assert_eq!(position.y(), Some(4.5));
        assert!(position.point().is_none());
    }

    #[test]
    fn test_coordinates_fall_back_to_bounding_rect() {
        let json = r#"{"pageIndex":2,"boundingRect":{"x":1.0,"y":2.0,"width":3.0,"height":4.0}}"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.point(), Some(Point::new(1.0, 2.0)));
        assert_eq!(position.page_index(), Some(2));
    }

    #[test]
    fn test_at_creates_zero_size_rect() {
        let position = Position::at_page_coordinates(1, 20.0, 30.0);
        assert_eq!(
            position.bounding_rect(),
            Some(&BoundingRect::new(20.0, 30.0, 0.0, 0.0))
        );
        assert_eq!(position.shape, Some(ShapeType::Point));
        assert_eq!(position.page_index(), Some(1));
    }

    #[test]
    fn test_move_keeps_page() {
        let mut position = Position::at_page_coordinates(3, 10.0, 10.0);
        position.move_x(5.0);
        position.move_y(-2.5);
        assert_eq!(position.point(), Some(Point::new(15.0, 7.5)));
        assert_eq!(position.page_index(), Some(3));

        let mut empty = Position::at_page(0);
        empty.move_x(5.0);
        assert!(empty.point().is_none());
    }

    #[test]
    fn test_text_matches_is_full_and_dotall() {
        let position = PositionBuilder::new()
            .on_page(0)
            .text_matches("Hello.*end")
            .build();
        assert!(position.text_matches("Hello\nworld end").unwrap());
        assert!(!position.text_matches("Say Hello end").unwrap());

        let broken = PositionBuilder::new().text_matches("(unclosed").build();
        assert!(broken.text_matches("anything").is_err());
    }
}
