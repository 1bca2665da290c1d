//! Object reference types
//!
//! Lightweight value projections of document objects as they appear in
//! snapshots. On the wire every reference is one flat record; here it is a
//! closed enum chosen from the structural tag.

use serde::{Deserialize, Deserializer, Serialize};

use super::object_type::ObjectType;
use super::traits::Reference;
use crate::geometry::{Color, Orientation, PageSize, Position};
use crate::text::TextStatus;

/// Identity, position and type tags shared by every reference
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefCore {
    pub internal_id: Option<String>,
    pub position: Option<Position>,
    object_type: Option<ObjectType>,
    object_ref_type: Option<ObjectType>,
}

impl RefCore {
    /// The structural tag falls back to the concrete one and vice versa
    pub fn new(
        internal_id: Option<String>,
        position: Option<Position>,
        object_ref_type: Option<ObjectType>,
        object_type: Option<ObjectType>,
    ) -> Self {
        let base = object_ref_type.or(object_type);
        Self {
            internal_id,
            position,
            object_type: object_type.or(base),
            object_ref_type: base,
        }
    }

    pub fn object_type(&self) -> Option<ObjectType> {
        self.object_type
    }

    pub fn object_ref_type(&self) -> Option<ObjectType> {
        self.object_ref_type
    }

    /// Same identity and position, concrete tag replaced
    pub fn with_object_type(&self, object_type: ObjectType) -> Self {
        Self {
            object_type: Some(object_type),
            ..self.clone()
        }
    }
}

/// Reference with no variant payload: paths, images, form XObjects, words
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicRef {
    pub core: RefCore,
}

impl BasicRef {
    pub fn new(internal_id: Option<String>, position: Option<Position>, tag: ObjectType) -> Self {
        Self {
            core: RefCore::new(internal_id, position, Some(tag), Some(tag)),
        }
    }
}

/// Paragraph, text line or text run reference
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRef {
    pub core: RefCore,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub text: Option<String>,
    pub line_spacings: Vec<f64>,
    pub color: Option<Color>,
    pub status: Option<TextStatus>,
    pub children: Vec<TextRef>,
}

impl TextRef {
    /// Explicit text, else the children's texts joined by newlines.
    ///
    /// A ref with neither yields `None` rather than an empty string, so
    /// text queries skip it instead of matching it against `""`.
    pub fn text(&self) -> Option<String> {
        if let Some(text) = &self.text {
            return Some(text.clone());
        }
        if self.children.is_empty() {
            return None;
        }
        Some(
            self.children
                .iter()
                .map(|c| c.text().unwrap_or_default())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

/// Form field reference with its name and current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFieldRef {
    pub core: RefCore,
    pub name: Option<String>,
    pub value: Option<String>,
}

impl FormFieldRef {
    /// Copy with the concrete type replaced; the structural tag is kept
    pub fn with_type(&self, object_type: ObjectType) -> Self {
        Self {
            core: self.core.with_object_type(object_type),
            name: self.name.clone(),
            value: self.value.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRef {
    pub core: RefCore,
    pub page_size: Option<PageSize>,
    pub orientation: Option<Orientation>,
}

/// Any reference found in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawObjectRef", into = "RawObjectRef")]
pub enum ObjectRef {
    Basic(BasicRef),
    Text(TextRef),
    FormField(FormFieldRef),
    Page(PageRef),
}

impl ObjectRef {
    /// Variant name used in narrowing errors
    pub fn variant_name(&self) -> &'static str {
        match self {
            ObjectRef::Basic(_) => "BasicRef",
            ObjectRef::Text(_) => "TextRef",
            ObjectRef::FormField(_) => "FormFieldRef",
            ObjectRef::Page(_) => "PageRef",
        }
    }

    /// Text content of text references
    pub fn text(&self) -> Option<String> {
        match self {
            ObjectRef::Text(t) => t.text(),
            _ => None,
        }
    }
}

impl Reference for ObjectRef {
    fn core(&self) -> &RefCore {
        match self {
            ObjectRef::Basic(r) => &r.core,
            ObjectRef::Text(r) => &r.core,
            ObjectRef::FormField(r) => &r.core,
            ObjectRef::Page(r) => &r.core,
        }
    }
}

impl From<BasicRef> for ObjectRef {
    fn from(r: BasicRef) -> Self {
        ObjectRef::Basic(r)
    }
}

impl From<TextRef> for ObjectRef {
    fn from(r: TextRef) -> Self {
        ObjectRef::Text(r)
    }
}

impl From<FormFieldRef> for ObjectRef {
    fn from(r: FormFieldRef) -> Self {
        ObjectRef::FormField(r)
    }
}

impl From<PageRef> for ObjectRef {
    fn from(r: PageRef) -> Self {
        ObjectRef::Page(r)
    }
}

/// Flat wire record covering every variant's fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawObjectRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    internal_id: Option<String>,
    #[serde(default)]
    position: Option<Position>,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient_tag",
        skip_serializing_if = "Option::is_none"
    )]
    object_type: Option<ObjectType>,
    #[serde(
        default,
        deserialize_with = "lenient_tag",
        skip_serializing_if = "Option::is_none"
    )]
    object_ref_type: Option<ObjectType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line_spacings: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<TextStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<RawObjectRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_size: Option<PageSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    orientation: Option<Orientation>,
}

/// Unknown tag names become an absent tag instead of an error
fn lenient_tag<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<ObjectType>, D::Error> {
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(name.and_then(|n| n.parse().ok()))
}

impl RawObjectRef {
    fn core(&self) -> RefCore {
        RefCore::new(
            self.internal_id.clone(),
            self.position.clone(),
            self.object_ref_type,
            self.object_type,
        )
    }

    fn into_text(self) -> TextRef {
        let core = self.core();
        TextRef {
            core,
            font_name: self.font_name,
            font_size: self.font_size,
            text: self.text,
            line_spacings: self.line_spacings.unwrap_or_default(),
            color: self.color,
            status: self.status,
            children: self
                .children
                .unwrap_or_default()
                .into_iter()
                .map(RawObjectRef::into_text)
                .collect(),
        }
    }

    fn from_core(core: &RefCore) -> Self {
        Self {
            internal_id: core.internal_id.clone(),
            position: core.position.clone(),
            object_type: core.object_type,
            object_ref_type: core.object_ref_type,
            ..Default::default()
        }
    }

    fn from_text(r: TextRef) -> Self {
        Self {
            font_name: r.font_name,
            font_size: r.font_size,
            text: r.text,
            line_spacings: Some(r.line_spacings),
            color: r.color,
            status: r.status,
            children: Some(r.children.into_iter().map(RawObjectRef::from_text).collect()),
            ..Self::from_core(&r.core)
        }
    }
}

impl From<RawObjectRef> for ObjectRef {
    fn from(raw: RawObjectRef) -> Self {
        let core = raw.core();
        match core.object_ref_type() {
            Some(tag) if tag.is_text() => ObjectRef::Text(raw.into_text()),
            Some(tag) if tag.is_form_field() => ObjectRef::FormField(FormFieldRef {
                core,
                name: raw.name,
                value: raw.value,
            }),
            Some(ObjectType::Page) => ObjectRef::Page(PageRef {
                core,
                page_size: raw.page_size,
                orientation: raw.orientation,
            }),
            _ => ObjectRef::Basic(BasicRef { core }),
        }
    }
}

impl From<ObjectRef> for RawObjectRef {
    fn from(r: ObjectRef) -> Self {
        match r {
            ObjectRef::Basic(b) => RawObjectRef::from_core(&b.core),
            ObjectRef::Text(t) => RawObjectRef::from_text(t),
            ObjectRef::FormField(f) => RawObjectRef {
                name: f.name,
                value: f.value,
                ..RawObjectRef::from_core(&f.core)
            },
            ObjectRef::Page(p) => RawObjectRef {
                page_size: p.page_size,
                orientation: p.orientation,
                ..RawObjectRef::from_core(&p.core)
            },
        }
    }
}
