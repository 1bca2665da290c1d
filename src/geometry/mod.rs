//! Geometry primitives
//!
//! Value types shared by every other module: points, positions, bounding
//! rectangles, colors, fonts and page sizes.

mod position;
mod types;

pub(crate) use position::full_match_regex;
pub use position::{Position, PositionBuilder, PositionMode, ShapeType};
pub use types::{
    BoundingRect, Color, Font, Orientation, PageSize, Point, Size, StandardFont,
    StandardPageSize,
};
