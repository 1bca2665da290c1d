//! Reference traits

use super::object_type::ObjectType;
use super::types::{BasicRef, FormFieldRef, ObjectRef, PageRef, RefCore, TextRef};
use crate::geometry::{BoundingRect, Position};

/// Read access to the fields every reference carries
pub trait Reference {
    fn core(&self) -> &RefCore;

    fn internal_id(&self) -> Option<&str> {
        self.core().internal_id.as_deref()
    }

    fn position(&self) -> Option<&Position> {
        self.core().position.as_ref()
    }

    fn bounding_rect(&self) -> Option<&BoundingRect> {
        self.position().and_then(Position::bounding_rect)
    }

    /// Concrete type tag
    fn object_type(&self) -> Option<ObjectType> {
        self.core().object_type()
    }

    /// Structural type tag used for grouping
    fn object_ref_type(&self) -> Option<ObjectType> {
        self.core().object_ref_type()
    }
}

/// Projection of a live object onto its reference
pub trait ToObjectRef {
    type Ref: Into<ObjectRef>;

    fn to_object_ref(&self) -> Self::Ref;

    fn to_any_ref(&self) -> ObjectRef {
        self.to_object_ref().into()
    }
}

/// A concrete reference type that an `ObjectRef` can be narrowed to
pub trait RefVariant: Reference + Clone {
    const NAME: &'static str;

    fn narrow(r: &ObjectRef) -> Option<&Self>;
}

macro_rules! ref_variant {
    ($ty:ident, $variant:ident) => {
        impl Reference for $ty {
            fn core(&self) -> &RefCore {
                &self.core
            }
        }

        impl RefVariant for $ty {
            const NAME: &'static str = stringify!($ty);

            fn narrow(r: &ObjectRef) -> Option<&Self> {
                match r {
                    ObjectRef::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

ref_variant!(BasicRef, Basic);
ref_variant!(TextRef, Text);
ref_variant!(FormFieldRef, FormField);
ref_variant!(PageRef, Page);

impl RefVariant for ObjectRef {
    const NAME: &'static str = "ObjectRef";

    fn narrow(r: &ObjectRef) -> Option<&Self> {
        Some(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_matches_variant_only() {
        let text: ObjectRef = TextRef::default().into();
        assert!(TextRef::narrow(&text).is_some());
        assert!(FormFieldRef::narrow(&text).is_none());
        assert!(ObjectRef::narrow(&text).is_some());
        assert_eq!(TextRef::NAME, "TextRef");
        assert_eq!(text.variant_name(), TextRef::NAME);
    }

    #[test]
    fn test_bounding_rect_through_position() {
        let r = BasicRef::new(None, Some(Position::at(1.0, 2.0)), ObjectType::Image);
        assert_eq!(r.bounding_rect(), Some(&BoundingRect::new(1.0, 2.0, 0.0, 0.0)));
        assert!(BasicRef::default().bounding_rect().is_none());
    }
}
