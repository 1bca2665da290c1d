//! Vector path geometry

mod builder;
mod segment;
mod types;

pub use builder::PathBuilder;
pub use segment::{Bezier, Line, PathSegment, SegmentStyle};
pub use types::Path;
