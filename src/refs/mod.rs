//! Typed object references
//!
//! Reference projections of live objects, their type tags, and the traits
//! used to read and narrow them.

mod object_type;
mod traits;
mod types;

pub use object_type::{FormFieldKind, ObjectType};
pub use traits::{RefVariant, Reference, ToObjectRef};
pub use types::{BasicRef, FormFieldRef, ObjectRef, PageRef, RefCore, TextRef};
