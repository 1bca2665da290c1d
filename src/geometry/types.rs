//! Geometry value types
//!
//! Points, rectangles, colors, fonts and page sizes. Plain values with no
//! behaviour beyond construction, comparison and a few derived accessors.

use serde::{Deserialize, Serialize};

/// A 2D point with both coordinates known
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in page space (y grows upward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle enclosing all points, `None` when empty
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive containment with a symmetric tolerance on every edge
    pub fn contains_within(&self, x: f64, y: f64, epsilon: f64) -> bool {
        x >= self.x - epsilon
            && x <= self.right() + epsilon
            && y >= self.y - epsilon
            && y <= self.top() + epsilon
    }
}

/// RGBA color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    #[serde(default = "opaque")]
    pub alpha: u8,
}

fn opaque() -> u8 {
    255
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// `#RRGGBB`, alpha is not encoded
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Font reference by name and size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    pub name: String,
    pub size: f64,
    #[serde(default)]
    pub embedded: bool,
}

impl Font {
    /// Create a font; subset-prefixed names (`ABCDEF+Name`) are flagged as embedded
    pub fn new(name: impl Into<String>, size: f64) -> Self {
        let name = name.into();
        let embedded = has_subset_prefix(&name);
        Self {
            name,
            size,
            embedded,
        }
    }

    pub fn with_embedded(name: impl Into<String>, size: f64, embedded: bool) -> Self {
        Self {
            name: name.into(),
            size,
            embedded,
        }
    }
}

fn has_subset_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() > 6 && bytes[..6].iter().all(u8::is_ascii_uppercase) && bytes[6] == b'+'
}

fn strip_subset_prefix(name: &str) -> &str {
    if has_subset_prefix(name) {
        &name[7..]
    } else {
        name
    }
}

/// The 14 PDF base fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
    Symbol,
    ZapfDingbats,
}

impl StandardFont {
    pub const ALL: [StandardFont; 14] = [
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::TimesItalic,
        StandardFont::TimesBoldItalic,
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::HelveticaBoldOblique,
        StandardFont::Courier,
        StandardFont::CourierBold,
        StandardFont::CourierOblique,
        StandardFont::CourierBoldOblique,
        StandardFont::Symbol,
        StandardFont::ZapfDingbats,
    ];

    pub fn font_name(&self) -> &'static str {
        match self {
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
            StandardFont::Symbol => "Symbol",
            StandardFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    pub fn font(&self, size: f64) -> Font {
        Font::with_embedded(self.font_name(), size, false)
    }

    /// Case-insensitive match against the base fonts, ignoring a subset prefix
    pub fn is_standard_font(name: &str) -> bool {
        let normalized = strip_subset_prefix(name);
        Self::ALL
            .iter()
            .any(|f| f.font_name().eq_ignore_ascii_case(normalized))
    }
}

/// Width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Named page formats, dimensions in points (portrait)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardPageSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    B4,
    B5,
    Letter,
    Legal,
    Tabloid,
    Executive,
    Postcard,
    Index3x5,
}

impl StandardPageSize {
    pub const ALL: [StandardPageSize; 15] = [
        StandardPageSize::A0,
        StandardPageSize::A1,
        StandardPageSize::A2,
        StandardPageSize::A3,
        StandardPageSize::A4,
        StandardPageSize::A5,
        StandardPageSize::A6,
        StandardPageSize::B4,
        StandardPageSize::B5,
        StandardPageSize::Letter,
        StandardPageSize::Legal,
        StandardPageSize::Tabloid,
        StandardPageSize::Executive,
        StandardPageSize::Postcard,
        StandardPageSize::Index3x5,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StandardPageSize::A0 => "A0",
            StandardPageSize::A1 => "A1",
            StandardPageSize::A2 => "A2",
            StandardPageSize::A3 => "A3",
            StandardPageSize::A4 => "A4",
            StandardPageSize::A5 => "A5",
            StandardPageSize::A6 => "A6",
            StandardPageSize::B4 => "B4",
            StandardPageSize::B5 => "B5",
            StandardPageSize::Letter => "LETTER",
            StandardPageSize::Legal => "LEGAL",
            StandardPageSize::Tabloid => "TABLOID",
            StandardPageSize::Executive => "EXECUTIVE",
            StandardPageSize::Postcard => "POSTCARD",
            StandardPageSize::Index3x5 => "INDEX_3X5",
        }
    }

    /// (width, height) in points
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            StandardPageSize::A0 => (2384.0, 3370.0),
            StandardPageSize::A1 => (1684.0, 2384.0),
            StandardPageSize::A2 => (1191.0, 1684.0),
            StandardPageSize::A3 => (842.0, 1191.0),
            StandardPageSize::A4 => (595.0, 842.0),
            StandardPageSize::A5 => (420.0, 595.0),
            StandardPageSize::A6 => (298.0, 420.0),
            StandardPageSize::B4 => (709.0, 1001.0),
            StandardPageSize::B5 => (499.0, 709.0),
            StandardPageSize::Letter => (612.0, 792.0),
            StandardPageSize::Legal => (612.0, 1008.0),
            StandardPageSize::Tabloid => (792.0, 1224.0),
            StandardPageSize::Executive => (522.0, 756.0),
            StandardPageSize::Postcard => (288.0, 432.0),
            StandardPageSize::Index3x5 => (216.0, 360.0),
        }
    }
}

/// Tolerance when matching measured page dimensions to a named format
const PAGE_SIZE_TOLERANCE: f64 = 0.5;

/// Page dimensions, named when they match a standard format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn standard(size: StandardPageSize) -> Self {
        let (width, height) = size.dimensions();
        Self {
            name: Some(size.name().to_string()),
            width,
            height,
        }
    }

    pub fn custom(width: f64, height: f64) -> Self {
        Self {
            name: None,
            width,
            height,
        }
    }

    /// Match against the standard formats in either orientation
    pub fn of(width: f64, height: f64) -> Self {
        let close = |a: f64, b: f64| (a - b).abs() < PAGE_SIZE_TOLERANCE;
        StandardPageSize::ALL
            .iter()
            .find(|s| {
                let (w, h) = s.dimensions();
                (close(w, width) && close(h, height)) || (close(w, height) && close(h, width))
            })
            .map(|s| Self::standard(*s))
            .unwrap_or_else(|| Self::custom(width, height))
    }

    pub fn is_standard(&self) -> bool {
        self.name.is_some()
    }

    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_hex() {
        assert_eq!(Color::RED.to_hex(), "#FF0000");
        assert_eq!(Color::rgba(1, 2, 255, 10).to_hex(), "#0102FF");
    }

    #[test]
    fn test_color_alpha_defaults_to_opaque() {
        let color: Color = serde_json::from_str(r#"{"red":1,"green":2,"blue":3}"#).unwrap();
        assert_eq!(color.alpha, 255);
    }

    #[test]
    fn test_font_subset_prefix_marks_embedded() {
        assert!(Font::new("ABCDEF+Roboto", 10.0).embedded);
        assert!(!Font::new("Helvetica", 10.0).embedded);
        assert!(!Font::new("ABCDEf+Roboto", 10.0).embedded);
    }

    #[test]
    fn test_standard_font_detection() {
        assert!(StandardFont::is_standard_font("helvetica-bold"));
        assert!(StandardFont::is_standard_font("QWERTY+Times-Roman"));
        assert!(!StandardFont::is_standard_font("Roboto"));
    }

    #[test]
    fn test_page_size_matches_rotated_standard() {
        let size = PageSize::of(842.2, 595.0);
        assert_eq!(size.name.as_deref(), Some("A4"));

        let custom = PageSize::of(100.0, 100.0);
        assert!(!custom.is_standard());
    }

    #[test]
    fn test_enclosing_rect() {
        let rect = BoundingRect::enclosing(vec![
            Point::new(10.0, 5.0),
            Point::new(-2.0, 8.0),
            Point::new(4.0, 20.0),
        ])
        .unwrap();
        assert_eq!(rect, BoundingRect::new(-2.0, 5.0, 12.0, 15.0));
        assert!(BoundingRect::enclosing(Vec::new()).is_none());
    }

    #[test]
    fn test_contains_within_epsilon() {
        let rect = BoundingRect::new(10.0, 10.0, 5.0, 5.0);
        assert!(rect.contains_within(10.0, 10.0, 0.0));
        assert!(rect.contains_within(15.0, 15.0, 0.0));
        assert!(rect.contains_within(9.5, 15.5, 0.5));
        assert!(!rect.contains_within(9.49, 10.0, 0.5));
    }
}
