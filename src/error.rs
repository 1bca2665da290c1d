//! Model error types
//!
//! Unified error handling for geometry, layout, reference and selection code.

use thiserror::Error;

/// Unified model error type
#[derive(Debug, Error)]
pub enum ModelError {
    /// Position is derived and cannot be assigned
    #[error("Position of {object} is derived and cannot be set")]
    PositionImmutable { object: &'static str },

    /// Position requested for a path without segments
    #[error("Path has no segments, position is undefined")]
    EmptyPath,

    /// Typed element list contains an element of another variant
    #[error("Expected elements of type {expected} but got {found}")]
    HeterogeneousElements {
        expected: &'static str,
        found: &'static str,
    },

    /// Path builder drawing command issued before move_to
    #[error("Call move_to() before {op}()")]
    MissingCursor { op: &'static str },

    /// Path builder finished without segments
    #[error("No segments in path, use move_to()/line_to()/bezier_to() to add segments")]
    EmptyPathBuilder,

    /// Text pattern failed to compile
    #[error("Invalid text pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Object type name not part of the wire enumeration
    #[error("Unknown object type: {0}")]
    UnknownObjectType(String),

    /// JSON encoding/decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by a snapshot fetcher
    #[error("Snapshot fetch failed: {0}")]
    Fetch(String),

    /// Configuration value could not be used
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
