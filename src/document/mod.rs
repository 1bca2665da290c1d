//! Live document objects
//!
//! Images, form fields and pages, plus `DocumentObject`, the tagged union
//! of everything that can be added to a document.

mod types;

pub use types::{DocumentObject, FormField, Image, Page};
