//! Path segments
//!
//! Straight lines and cubic Béziers. A segment is anchored at its first
//! control point; dash settings are stroke styling only and never affect
//! geometry.

use serde::{Deserialize, Serialize};

use crate::geometry::{Color, Point};

/// Stroke and fill styling shared by all segment kinds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Alternating on/off lengths; empty means solid
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dash_array: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_phase: Option<f64>,
}

/// Straight segment from `p0` to `p1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub p0: Point,
    pub p1: Point,
    #[serde(flatten)]
    pub style: SegmentStyle,
}

impl Line {
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0,
            p1,
            style: SegmentStyle::default(),
        }
    }

    /// Linear interpolation, unclamped
    pub fn evaluate(&self, t: f64) -> Point {
        Point::new(
            self.p0.x + (self.p1.x - self.p0.x) * t,
            self.p0.y + (self.p1.y - self.p0.y) * t,
        )
    }
}

/// Cubic Bézier with start `p0`, controls `p1`/`p2` and end `p3`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
    #[serde(flatten)]
    pub style: SegmentStyle,
}

impl Bezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self {
            p0,
            p1,
            p2,
            p3,
            style: SegmentStyle::default(),
        }
    }

    /// Bernstein form. `t` outside [0, 1] extrapolates.
    pub fn evaluate(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let (b0, b1, b2, b3) = (u.powi(3), 3.0 * u.powi(2) * t, 3.0 * u * t.powi(2), t.powi(3));
        Point::new(
            b0 * self.p0.x + b1 * self.p1.x + b2 * self.p2.x + b3 * self.p3.x,
            b0 * self.p0.y + b1 * self.p1.y + b2 * self.p2.y + b3 * self.p3.y,
        )
    }
}

/// One piece of a vector path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "segmentType", rename_all = "UPPERCASE")]
pub enum PathSegment {
    #[serde(alias = "line")]
    Line(Line),
    #[serde(alias = "bezier")]
    Bezier(Bezier),
}

impl PathSegment {
    /// Anchor point, always the first control point
    pub fn position(&self) -> Point {
        match self {
            PathSegment::Line(l) => l.p0,
            PathSegment::Bezier(b) => b.p0,
        }
    }

    pub fn points(&self) -> Vec<Point> {
        match self {
            PathSegment::Line(l) => vec![l.p0, l.p1],
            PathSegment::Bezier(b) => vec![b.p0, b.p1, b.p2, b.p3],
        }
    }

    pub fn end(&self) -> Point {
        match self {
            PathSegment::Line(l) => l.p1,
            PathSegment::Bezier(b) => b.p3,
        }
    }

    pub fn evaluate(&self, t: f64) -> Point {
        match self {
            PathSegment::Line(l) => l.evaluate(t),
            PathSegment::Bezier(b) => b.evaluate(t),
        }
    }

    pub fn style(&self) -> &SegmentStyle {
        match self {
            PathSegment::Line(l) => &l.style,
            PathSegment::Bezier(b) => &b.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut SegmentStyle {
        match self {
            PathSegment::Line(l) => &mut l.style,
            PathSegment::Bezier(b) => &mut b.style,
        }
    }
}

impl From<Line> for PathSegment {
    fn from(line: Line) -> Self {
        PathSegment::Line(line)
    }
}

impl From<Bezier> for PathSegment {
    fn from(bezier: Bezier) -> Self {
        PathSegment::Bezier(bezier)
    }
}
