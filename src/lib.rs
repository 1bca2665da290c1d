//! pdfdom
//!
//! Client-side object model for PDF documents: geometry values, vector
//! paths, text runs/lines/paragraphs with a line layout engine, typed
//! object references and selection over document snapshots.
//!
//! # Modules
//!
//! - `geometry`: points, positions, rectangles, colors, fonts, page sizes
//! - `path`: line and Bézier segments, paths and a path builder
//! - `text`: text model, paragraph layout and paragraph builder
//! - `refs`: object type tags and reference projections
//! - `document`: images, form fields, pages and the document object union
//! - `snapshot`: snapshot values, fetcher seam and LRU cache
//! - `selection`: spatial and textual selection queries

pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod path;
pub mod refs;
pub mod selection;
pub mod snapshot;
pub mod text;

pub use config::Config;
pub use error::{ModelError, Result};
pub use geometry::{BoundingRect, Color, Font, Point, Position};
pub use refs::{ObjectRef, ObjectType, Reference, ToObjectRef};
pub use selection::SelectionIndex;
pub use snapshot::{DocumentSnapshot, PageSnapshot, SnapshotCache, SnapshotFetcher};
