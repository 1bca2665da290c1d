//! Text object types
//!
//! Live, editable text objects: runs, words, lines and paragraphs, plus the
//! font status metadata the remote engine attaches to text.

use serde::{Deserialize, Serialize};

use crate::geometry::{Color, Font, Position};
use crate::refs::{BasicRef, ObjectType, RefCore, TextRef, ToObjectRef};

/// Origin of a font used to render text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FontType {
    System,
    Standard,
    Embedded,
}

/// Mapping from a font referenced by the document to the system font used
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFontInfo {
    pub document_font_name: Option<String>,
    pub system_font_name: Option<String>,
}

/// Font suggested by the remote engine for a requested name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontRecommendation {
    pub font_name: String,
    pub font_type: Option<FontType>,
    pub similarity_score: f64,
}

/// Rendering status of a piece of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStatus {
    #[serde(default)]
    pub modified: bool,
    #[serde(default = "encodable_by_default")]
    pub encodable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_type: Option<FontType>,
    #[serde(default, alias = "fontInfoDto", skip_serializing_if = "Option::is_none")]
    pub font_info: Option<DocumentFontInfo>,
}

fn encodable_by_default() -> bool {
    true
}

impl Default for TextStatus {
    fn default() -> Self {
        Self {
            modified: false,
            encodable: true,
            font_type: None,
            font_info: None,
        }
    }
}

impl TextStatus {
    /// Fold another status in: `modified` sticks once true, `encodable`
    /// sticks once false, font type/info keep the first value seen.
    pub fn merge(&mut self, other: &TextStatus) {
        self.modified |= other.modified;
        self.encodable &= other.encodable;
        if self.font_info.is_none() {
            self.font_info = other.font_info.clone();
        }
        if self.font_type.is_none() {
            self.font_type = other.font_type;
        }
    }

    /// Accumulated status of a sequence of runs; runs without status are ignored
    pub fn combine<'a, I>(elements: I) -> Self
    where
        I: IntoIterator<Item = &'a TextElement>,
    {
        elements
            .into_iter()
            .filter_map(|e| e.status.as_ref())
            .fold(TextStatus::default(), |mut acc, s| {
                acc.merge(s);
                acc
            })
    }

    pub fn from_text_line(line: &TextLine) -> Self {
        Self::combine(&line.elements)
    }

    pub fn from_paragraph(paragraph: &Paragraph) -> Self {
        Self::combine(paragraph.lines.iter().flat_map(|l| l.elements.iter()))
    }

    /// User-facing warning about font fallback or embedded-font edits
    pub fn warning(&self) -> Option<String> {
        if !self.encodable {
            if let Some(info) = &self.font_info {
                return Some(format!(
                    "Text is not encodable with your current font, using '{}' as a fallback font instead.",
                    info.system_font_name.as_deref().unwrap_or("unknown")
                ));
            }
        }
        if self.modified && self.font_type == Some(FontType::Embedded) {
            let has_system_font = self
                .font_info
                .as_ref()
                .and_then(|i| i.system_font_name.as_ref())
                .is_some();
            if !has_system_font {
                return Some(
                    "Text set in an embedded font was modified. The font reports it can render \
                     the new text, but this is not guaranteed."
                        .to_string(),
                );
            }
        }
        None
    }
}

/// Smallest text unit, usually one character or one styled run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: Option<String>,
    pub font: Option<Font>,
    pub color: Option<Color>,
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TextStatus>,
}

impl TextElement {
    pub fn new(
        text: impl Into<String>,
        font: Option<Font>,
        color: Option<Color>,
        position: Option<Position>,
    ) -> Self {
        Self {
            id: None,
            text: Some(text.into()),
            font,
            color,
            position,
            status: None,
        }
    }
}

impl ToObjectRef for TextElement {
    type Ref = TextRef;

    fn to_object_ref(&self) -> TextRef {
        TextRef {
            core: RefCore::new(
                self.id.clone(),
                self.position.clone(),
                Some(ObjectType::TextElement),
                Some(ObjectType::TextElement),
            ),
            font_name: self.font.as_ref().map(|f| f.name.clone()),
            font_size: self.font.as_ref().map(|f| f.size),
            text: self.text.clone(),
            line_spacings: Vec::new(),
            color: self.color,
            status: self.status.clone(),
            children: Vec::new(),
        }
    }
}

/// Word-level text, currently a leaf
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: Option<String>,
    pub position: Option<Position>,
}

impl ToObjectRef for Word {
    type Ref = BasicRef;

    fn to_object_ref(&self) -> BasicRef {
        BasicRef::new(self.id.clone(), self.position.clone(), ObjectType::Word)
    }
}

/// A positioned line of text made of one or more runs
///
/// `text` and the runs are two representations of the same content. Layout
/// keeps them in sync; code editing one of them must pick it as the source
/// of truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub position: Option<Position>,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<Color>,
    pub text: Option<String>,
    #[serde(default, rename = "textElements")]
    pub elements: Vec<TextElement>,
}

impl TextLine {
    /// Line with a single run spanning the whole text
    pub fn from_text(
        text: &str,
        position: Option<Position>,
        color: Option<Color>,
        font: Option<&Font>,
        status: Option<TextStatus>,
    ) -> Self {
        let mut run = TextElement::new(text, font.cloned(), color, position.clone());
        run.status = status;
        Self {
            id: None,
            position,
            font_name: font.map(|f| f.name.clone()),
            font_size: font.map(|f| f.size),
            color,
            text: Some(text.to_string()),
            elements: vec![run],
        }
    }

    /// Rebuild an editable line from a text reference
    pub fn from_text_ref(text_ref: &TextRef) -> Self {
        let font = match (&text_ref.font_name, text_ref.font_size) {
            (Some(name), Some(size)) => Some(Font::new(name.clone(), size)),
            _ => None,
        };
        let text = text_ref.text();
        let mut run = TextElement::new(
            text.clone().unwrap_or_default(),
            font,
            text_ref.color,
            text_ref.core.position.clone(),
        );
        run.status = text_ref.status.clone();
        Self {
            id: None,
            position: text_ref.core.position.clone(),
            font_name: text_ref.font_name.clone(),
            font_size: text_ref.font_size,
            color: text_ref.color,
            text,
            elements: vec![run],
        }
    }

    /// Line text, or the concatenated run texts when no line text is set
    pub fn text(&self) -> Option<String> {
        if let Some(text) = &self.text {
            return Some(text.clone());
        }
        let runs: Vec<&str> = self
            .elements
            .iter()
            .filter_map(|e| e.text.as_deref())
            .collect();
        if runs.is_empty() {
            None
        } else {
            Some(runs.concat())
        }
    }

    pub fn runs(&self) -> &[TextElement] {
        &self.elements
    }
}

impl ToObjectRef for TextLine {
    type Ref = TextRef;

    fn to_object_ref(&self) -> TextRef {
        TextRef {
            core: RefCore::new(
                self.id.clone(),
                self.position.clone(),
                Some(ObjectType::Paragraph),
                Some(ObjectType::TextLine),
            ),
            font_name: self.font_name.clone(),
            font_size: self.font_size,
            text: self.text(),
            line_spacings: Vec::new(),
            color: self.color,
            status: Some(TextStatus::from_text_line(self)),
            children: self.elements.iter().map(|e| e.to_object_ref()).collect(),
        }
    }
}

/// A block of lines separated by font-relative spacing factors
///
/// `line_spacings[i]` multiplies the font size to give the baseline
/// distance between line `i` and line `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub position: Option<Position>,
    #[serde(default)]
    lines: Vec<TextLine>,
    #[serde(default)]
    line_spacings: Vec<f64>,
    pub font: Option<Font>,
    #[serde(default, rename = "text", skip_serializing_if = "Option::is_none")]
    text_override: Option<String>,
}

impl Paragraph {
    pub fn new(position: Option<Position>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut [TextLine] {
        &mut self.lines
    }

    pub fn line_spacings(&self) -> &[f64] {
        &self.line_spacings
    }

    pub fn set_line_spacings(&mut self, spacings: Vec<f64>) {
        self.line_spacings = spacings;
    }

    /// Replace all lines and spacing factors; drops any text override
    pub fn set_lines(&mut self, lines: Vec<TextLine>, spacings: Vec<f64>) {
        self.lines = lines;
        self.line_spacings = spacings;
        self.text_override = None;
    }

    /// Append a line; drops any text override
    pub fn add_line(&mut self, line: TextLine) {
        self.lines.push(line);
        self.text_override = None;
    }

    pub fn clear_lines(&mut self) {
        self.lines.clear();
        self.line_spacings.clear();
        self.text_override = None;
    }

    /// Explicit text that takes precedence over the line texts until the
    /// lines are replaced
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text_override = Some(text.into());
    }

    pub fn has_text_override(&self) -> bool {
        self.text_override.is_some()
    }

    /// Override text, or the newline-joined line texts (computed each call)
    pub fn text(&self) -> String {
        match &self.text_override {
            Some(text) => text.clone(),
            None => self
                .lines
                .iter()
                .map(|l| l.text().unwrap_or_default())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl ToObjectRef for Paragraph {
    type Ref = TextRef;

    fn to_object_ref(&self) -> TextRef {
        TextRef {
            core: RefCore::new(
                self.id.clone(),
                self.position.clone(),
                Some(ObjectType::Paragraph),
                Some(ObjectType::Paragraph),
            ),
            font_name: self.font.as_ref().map(|f| f.name.clone()),
            font_size: self.font.as_ref().map(|f| f.size),
            text: Some(self.text()),
            line_spacings: self.line_spacings.clone(),
            color: self.lines.iter().find_map(|l| l.color),
            status: Some(TextStatus::from_paragraph(self)),
            children: self.lines.iter().map(|l| l.to_object_ref()).collect(),
        }
    }
}
