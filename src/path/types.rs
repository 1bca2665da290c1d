//! Vector paths

use serde::{Deserialize, Serialize};

use super::segment::PathSegment;
use crate::error::{ModelError, Result};
use crate::geometry::{BoundingRect, Position};
use crate::refs::{BasicRef, ObjectType, ToObjectRef};

/// Ordered segments drawn as one vector object
///
/// The position is derived from the segments and cannot be assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_index: Option<u32>,
    #[serde(default, rename = "pathSegments")]
    pub segments: Vec<PathSegment>,
    /// `Some(true)` for even-odd, otherwise nonzero winding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub even_odd_fill: Option<bool>,
}

impl Path {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self {
            segments,
            ..Default::default()
        }
    }

    pub fn add_segment(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    /// Leftmost x and topmost y over the segment anchors
    pub fn position(&self) -> Result<Position> {
        let mut anchors = self.segments.iter().map(PathSegment::position);
        let first = anchors.next().ok_or(ModelError::EmptyPath)?;
        let (x, y) = anchors.fold((first.x, first.y), |(x, y), p| (x.min(p.x), y.max(p.y)));
        let mut position = Position::at(x, y);
        position.set_page_index(self.page_index);
        Ok(position)
    }

    /// Always fails; move or replace segments instead
    pub fn set_position(&mut self, _position: Position) -> Result<()> {
        Err(ModelError::PositionImmutable { object: "path" })
    }

    /// Box around every control point of every segment
    pub fn control_bounds(&self) -> Option<BoundingRect> {
        BoundingRect::enclosing(self.segments.iter().flat_map(PathSegment::points))
    }

    pub fn uses_even_odd_fill(&self) -> bool {
        self.even_odd_fill.unwrap_or(false)
    }
}

impl ToObjectRef for Path {
    type Ref = BasicRef;

    fn to_object_ref(&self) -> BasicRef {
        BasicRef::new(self.id.clone(), self.position().ok(), ObjectType::Path)
    }
}
