//! Object type tags
//!
//! Closed enumeration of the wire type names. The same names are used as
//! filter-set keys by the selection code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;

/// Concrete or structural type of a document object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    Pdf,
    Page,
    TextElement,
    Paragraph,
    Image,
    Path,
    Line,
    Rectangle,
    Bezier,
    Clipping,
    FormXObject,
    FormField,
    Word,
    TextLine,
    TextField,
    RadioButton,
    Button,
    Dropdown,
    Checkbox,
}

impl ObjectType {
    pub const ALL: [ObjectType; 19] = [
        ObjectType::Pdf,
        ObjectType::Page,
        ObjectType::TextElement,
        ObjectType::Paragraph,
        ObjectType::Image,
        ObjectType::Path,
        ObjectType::Line,
        ObjectType::Rectangle,
        ObjectType::Bezier,
        ObjectType::Clipping,
        ObjectType::FormXObject,
        ObjectType::FormField,
        ObjectType::Word,
        ObjectType::TextLine,
        ObjectType::TextField,
        ObjectType::RadioButton,
        ObjectType::Button,
        ObjectType::Dropdown,
        ObjectType::Checkbox,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Pdf => "PDF",
            ObjectType::Page => "PAGE",
            ObjectType::TextElement => "TEXT_ELEMENT",
            ObjectType::Paragraph => "PARAGRAPH",
            ObjectType::Image => "IMAGE",
            ObjectType::Path => "PATH",
            ObjectType::Line => "LINE",
            ObjectType::Rectangle => "RECTANGLE",
            ObjectType::Bezier => "BEZIER",
            ObjectType::Clipping => "CLIPPING",
            ObjectType::FormXObject => "FORM_X_OBJECT",
            ObjectType::FormField => "FORM_FIELD",
            ObjectType::Word => "WORD",
            ObjectType::TextLine => "TEXT_LINE",
            ObjectType::TextField => "TEXT_FIELD",
            ObjectType::RadioButton => "RADIO_BUTTON",
            ObjectType::Button => "BUTTON",
            ObjectType::Dropdown => "DROPDOWN",
            ObjectType::Checkbox => "CHECKBOX",
        }
    }

    /// Form field tags, generic or specific
    pub fn is_form_field(&self) -> bool {
        matches!(
            self,
            ObjectType::FormField
                | ObjectType::TextField
                | ObjectType::RadioButton
                | ObjectType::Button
                | ObjectType::Dropdown
                | ObjectType::Checkbox
        )
    }

    /// Tags carried by text references
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            ObjectType::Paragraph | ObjectType::TextLine | ObjectType::TextElement
        )
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

impl FromStr for ObjectType {
    type Err = ModelError;

    /// Accepts `TEXT_ELEMENT`, `text_element` and `textElement` alike
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s.trim());
        ObjectType::ALL
            .iter()
            .copied()
            .find(|t| normalize(t.as_str()) == wanted)
            .ok_or_else(|| ModelError::UnknownObjectType(s.to_string()))
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ObjectType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ObjectType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Semantic form field categories used to partition form field snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormFieldKind {
    TextField,
    Checkbox,
    RadioButton,
    Dropdown,
    Button,
}

impl FormFieldKind {
    pub const ALL: [FormFieldKind; 5] = [
        FormFieldKind::TextField,
        FormFieldKind::Checkbox,
        FormFieldKind::RadioButton,
        FormFieldKind::Dropdown,
        FormFieldKind::Button,
    ];

    /// Filter name sent with typed snapshot requests
    pub fn name(&self) -> &'static str {
        self.object_type().as_str()
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            FormFieldKind::TextField => ObjectType::TextField,
            FormFieldKind::Checkbox => ObjectType::Checkbox,
            FormFieldKind::RadioButton => ObjectType::RadioButton,
            FormFieldKind::Dropdown => ObjectType::Dropdown,
            FormFieldKind::Button => ObjectType::Button,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_wire_and_camel_case() {
        assert_eq!("TEXT_ELEMENT".parse::<ObjectType>().unwrap(), ObjectType::TextElement);
        assert_eq!("textElement".parse::<ObjectType>().unwrap(), ObjectType::TextElement);
        assert_eq!("form_x_object".parse::<ObjectType>().unwrap(), ObjectType::FormXObject);
        assert!(matches!(
            "SPARKLE".parse::<ObjectType>(),
            Err(ModelError::UnknownObjectType(_))
        ));
    }

    #[test]
    fn test_every_name_round_trips() {
        for t in ObjectType::ALL {
            assert_eq!(t.as_str().parse::<ObjectType>().unwrap(), t);
        }
    }

    #[test]
    fn test_serde_uses_wire_name() {
        let json = serde_json::to_string(&ObjectType::RadioButton).unwrap();
        assert_eq!(json, "\"RADIO_BUTTON\"");
        let parsed: ObjectType = serde_json::from_str("\"checkbox\"").unwrap();
        assert_eq!(parsed, ObjectType::Checkbox);
    }

    #[test]
    fn test_form_field_kinds() {
        for kind in FormFieldKind::ALL {
            assert!(kind.object_type().is_form_field());
        }
        assert_eq!(FormFieldKind::Dropdown.name(), "DROPDOWN");
        assert!(!ObjectType::Paragraph.is_form_field());
        assert!(ObjectType::TextLine.is_text());
    }
}
