//! Spatial and textual selection over snapshots
//!
//! Non-destructive queries that filter snapshot references by type, point
//! containment, text prefix or text pattern.

mod query;
mod service;

pub use query::SelectionIndex;
pub use service::{
    adjust_form_field_type, collect_all_elements, collect_form_fields, collect_objects_by_type,
    contains_point, flatten_typed_document, narrow_all, starts_with_ignore_case, typed_elements,
    ElementSource, FormScope, DEFAULT_EPSILON,
};
