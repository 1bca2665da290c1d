//! Live document objects
//!
//! Editable objects composed locally and sent once in a mutation request.
//! Text and path objects live in their own modules; this file holds the
//! rest and the tagged union used as the request payload.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};
use crate::geometry::{Font, PageSize, Position, Size};
use crate::path::Path;
use crate::refs::{
    BasicRef, FormFieldKind, FormFieldRef, ObjectRef, ObjectType, PageRef, RefCore, ToObjectRef,
};
use crate::text::{Paragraph, TextLine};

/// Raster image with its encoded bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Encoding name, e.g. `PNG` or `JPEG`
    pub format: Option<String>,
    pub size: Option<Size>,
    pub position: Option<Position>,
    #[serde(default, with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl Image {
    pub fn new(format: impl Into<String>, size: Size, data: Vec<u8>) -> Self {
        Self {
            id: None,
            format: Some(format.into()),
            size: Some(size),
            position: None,
            data,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

impl ToObjectRef for Image {
    type Ref = BasicRef;

    fn to_object_ref(&self) -> BasicRef {
        BasicRef::new(self.id.clone(), self.position.clone(), ObjectType::Image)
    }
}

/// Byte arrays travel as standard base64 strings
mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        match encoded {
            Some(s) => BASE64.decode(s.as_bytes()).map_err(serde::de::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}

/// Interactive form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "fieldType")]
    pub kind: FormFieldKind,
    pub value: Option<String>,
    pub size: Option<Size>,
    pub font: Option<Font>,
    pub position: Option<Position>,
}

impl FormField {
    pub fn new(name: impl Into<String>, kind: FormFieldKind) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind,
            value: None,
            size: None,
            font: None,
            position: None,
        }
    }
}

impl ToObjectRef for FormField {
    type Ref = FormFieldRef;

    fn to_object_ref(&self) -> FormFieldRef {
        FormFieldRef {
            core: RefCore::new(
                self.id.clone(),
                self.position.clone(),
                Some(ObjectType::FormField),
                Some(self.kind.object_type()),
            ),
            name: Some(self.name.clone()),
            value: self.value.clone(),
        }
    }
}

/// A document page; its position is the whole page and cannot be moved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub page_number: u32,
    pub size: Option<PageSize>,
}

impl Page {
    pub fn new(page_number: u32, size: Option<PageSize>) -> Self {
        Self {
            id: None,
            page_number,
            size,
        }
    }

    pub fn position(&self) -> Position {
        Position::at_page(self.page_number)
    }

    pub fn set_position(&mut self, _position: Position) -> Result<()> {
        Err(ModelError::PositionImmutable { object: "page" })
    }
}

impl ToObjectRef for Page {
    type Ref = PageRef;

    fn to_object_ref(&self) -> PageRef {
        PageRef {
            core: RefCore::new(
                self.id.clone(),
                Some(self.position()),
                Some(ObjectType::Page),
                Some(ObjectType::Page),
            ),
            page_size: self.size.clone(),
            orientation: self.size.as_ref().map(PageSize::orientation),
        }
    }
}

/// Any object that can be added to a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentObject {
    Paragraph(Paragraph),
    TextLine(TextLine),
    Image(Image),
    Path(Path),
    FormField(FormField),
}

impl DocumentObject {
    pub fn object_type(&self) -> ObjectType {
        match self {
            DocumentObject::Paragraph(_) => ObjectType::Paragraph,
            DocumentObject::TextLine(_) => ObjectType::TextLine,
            DocumentObject::Image(_) => ObjectType::Image,
            DocumentObject::Path(_) => ObjectType::Path,
            DocumentObject::FormField(_) => ObjectType::FormField,
        }
    }
}

impl ToObjectRef for DocumentObject {
    type Ref = ObjectRef;

    fn to_object_ref(&self) -> ObjectRef {
        match self {
            DocumentObject::Paragraph(p) => p.to_any_ref(),
            DocumentObject::TextLine(l) => l.to_any_ref(),
            DocumentObject::Image(i) => i.to_any_ref(),
            DocumentObject::Path(p) => p.to_any_ref(),
            DocumentObject::FormField(f) => f.to_any_ref(),
        }
    }
}

macro_rules! document_object_from {
    ($($ty:ident),*) => {
        $(impl From<$ty> for DocumentObject {
            fn from(value: $ty) -> Self {
                DocumentObject::$ty(value)
            }
        })*
    };
}

document_object_from!(Paragraph, TextLine, Image, Path, FormField);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Orientation, StandardPageSize};
    use crate::path::PathBuilder;
    use crate::refs::Reference;
    use crate::text::ParagraphBuilder;

    #[test]
    fn test_image_data_is_base64_on_the_wire() {
        let image = Image::new("PNG", Size::new(2.0, 3.0), vec![0x89, b'P', b'N', b'G'])
            .at(Position::at_page_coordinates(0, 10.0, 10.0));
        let value = serde_json::to_value(&image).unwrap();
        assert_eq!(value["data"], "iVBORw==");

        let back: Image = serde_json::from_value(value).unwrap();
        assert_eq!(back.data, image.data);
        assert_eq!(image.to_object_ref().object_type(), Some(ObjectType::Image));
    }

    #[test]
    fn test_form_field_ref_carries_kind() {
        let mut field = FormField::new("subscribe", FormFieldKind::Checkbox);
        field.value = Some("Off".into());
        let r = field.to_object_ref();
        assert_eq!(r.object_type(), Some(ObjectType::Checkbox));
        assert_eq!(r.object_ref_type(), Some(ObjectType::FormField));
        assert_eq!(r.name.as_deref(), Some("subscribe"));
    }

    #[test]
    fn test_page_position_is_fixed() {
        let mut page = Page::new(3, Some(PageSize::standard(StandardPageSize::A4)));
        assert!(page.set_position(Position::at(1.0, 1.0)).is_err());
        let r = page.to_object_ref();
        assert_eq!(r.position().and_then(|p| p.page_index()), Some(3));
        assert_eq!(r.orientation, Some(Orientation::Portrait));
    }

    #[test]
    fn test_payload_is_tagged_by_type() {
        let paragraph = ParagraphBuilder::new()
            .text("hello")
            .at(Position::at(1.0, 2.0))
            .build();
        let path = PathBuilder::new().rect(0.0, 0.0, 1.0, 1.0).unwrap().build().unwrap();

        let objects: Vec<DocumentObject> = vec![paragraph.into(), path.into()];
        let value = serde_json::to_value(&objects).unwrap();
        assert_eq!(value[0]["type"], "PARAGRAPH");
        assert_eq!(value[1]["type"], "PATH");
        assert_eq!(value[1]["pathSegments"].as_array().map(Vec::len), Some(4));

        let back: Vec<DocumentObject> = serde_json::from_value(value).unwrap();
        assert_eq!(back, objects);
        assert_eq!(back[1].to_object_ref().object_type(), Some(ObjectType::Path));
    }
}
