//! Core types for template elements

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A point on the design canvas, in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Read a pixel value, rounding fractional positions left by dragging
pub(crate) fn pixels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(value.round() as i32)
}

pub(crate) fn pixels_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i32>, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|v| v.round() as i32))
}

/// The kind of element, without any attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Text,
    Image,
    Table,
}

impl ElementType {
    /// Wire name, also used as the id prefix for fresh elements
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Table => "table",
        }
    }
}

impl std::str::FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ElementType::Text),
            "image" => Ok(ElementType::Image),
            "table" => Ok(ElementType::Table),
            other => Err(format!("unknown element type '{}'", other)),
        }
    }
}

/// One positioned visual primitive inside a layout document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(deserialize_with = "pixels")]
    pub x: i32,
    #[serde(deserialize_with = "pixels")]
    pub y: i32,
    #[serde(deserialize_with = "pixels")]
    pub width: i32,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Construct an element of `element_type` with the editor's default attributes
    pub fn with_defaults(id: impl Into<String>, element_type: ElementType, at: Point) -> Self {
        let (width, kind) = match element_type {
            ElementType::Text => (200, ElementKind::Text(TextElement::default())),
            ElementType::Image => (100, ElementKind::Image(ImageElement::default())),
            ElementType::Table => (600, ElementKind::Table(TableElement::default())),
        };
        Self {
            id: id.into(),
            x: at.x,
            y: at.y,
            width,
            kind,
        }
    }

    pub fn element_type(&self) -> ElementType {
        match self.kind {
            ElementKind::Text(_) => ElementType::Text,
            ElementKind::Image(_) => ElementType::Image,
            ElementKind::Table(_) => ElementType::Table,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Declared height; tables size to their content and have none
    pub fn height(&self) -> Option<i32> {
        match &self.kind {
            ElementKind::Text(t) => Some(t.height),
            ElementKind::Image(i) => Some(i.height),
            ElementKind::Table(_) => None,
        }
    }
}

/// Type-specific attributes, tagged by `"type"` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextElement),
    Image(ImageElement),
    Table(TableElement),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    /// Literal text, possibly embedding `{{field}}` tokens
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_text_height", deserialize_with = "pixels")]
    pub height: i32,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default = "default_text_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
}

impl Default for TextElement {
    fn default() -> Self {
        Self {
            content: "New Text".to_string(),
            height: default_text_height(),
            font_size: default_font_size(),
            font_weight: FontWeight::Normal,
            text_align: TextAlign::Left,
            color: default_text_color(),
            text_decoration: None,
        }
    }
}

fn default_text_height() -> i32 {
    40
}

fn default_font_size() -> u32 {
    14
}

fn default_text_color() -> String {
    "#000000".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    /// Resolved asset URL, a `{{field}}` token, or empty
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_image_height", deserialize_with = "pixels")]
    pub height: i32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub border: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
}

impl Default for ImageElement {
    fn default() -> Self {
        Self {
            url: String::new(),
            height: default_image_height(),
            border: false,
            border_color: None,
            border_width: None,
        }
    }
}

impl ImageElement {
    pub fn border_color(&self) -> &str {
        self.border_color.as_deref().unwrap_or("#000")
    }

    pub fn border_width(&self) -> u32 {
        self.border_width.unwrap_or(2)
    }
}

fn default_image_height() -> i32 {
    100
}

/// A header column; `width` is an advisory CSS length such as `"50%"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

impl Column {
    pub fn new(label: impl Into<String>, width: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            width: Some(width.into()),
        }
    }
}

/// A table row as stored. Anything other than an array is kept verbatim
/// so persisted data survives a round trip, and is skipped when rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableRow {
    Cells(Vec<TableCell>),
    Malformed(Value),
}

impl TableRow {
    pub fn cells(&self) -> Option<&[TableCell]> {
        match self {
            TableRow::Cells(cells) => Some(cells),
            TableRow::Malformed(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableCell {
    Text(String),
    Field(FieldCell),
    Other(Value),
}

impl TableCell {
    pub fn field(label: impl Into<String>, field: impl Into<String>) -> Self {
        TableCell::Field(FieldCell {
            label: Some(label.into()),
            field: Some(field.into()),
            colspan: None,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        TableCell::Text(text.into())
    }
}

/// A structured cell. A non-empty `label` is both the displayed text and the
/// signal to render the cell bold.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colspan: Option<u32>,
}

impl FieldCell {
    pub fn with_colspan(mut self, colspan: u32) -> Self {
        self.colspan = Some(colspan);
        self
    }

    /// Label if non-empty
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }

    /// Field if non-empty
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref().filter(|f| !f.is_empty())
    }

    /// Missing or zero spans one column
    pub fn colspan(&self) -> u32 {
        match self.colspan {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableElement {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_padding: Option<u32>,
}

impl Default for TableElement {
    fn default() -> Self {
        Self {
            columns: vec![Column::new("Column 1", "50%"), Column::new("Column 2", "50%")],
            rows: vec![TableRow::Cells(vec![
                TableCell::field("Field 1", "{{value1}}"),
                TableCell::field("Field 2", "{{value2}}"),
            ])],
            border_width: Some(1),
            border_color: Some("#000000".to_string()),
            header_bg: None,
            cell_padding: Some(6),
        }
    }
}

impl TableElement {
    pub fn border_width(&self) -> u32 {
        match self.border_width {
            Some(w) if w > 0 => w,
            _ => 1,
        }
    }

    pub fn border_color(&self) -> &str {
        self.border_color.as_deref().unwrap_or("#000")
    }

    pub fn header_bg(&self) -> &str {
        self.header_bg.as_deref().unwrap_or("#f5f5f5")
    }

    pub fn cell_padding(&self) -> u32 {
        match self.cell_padding {
            Some(p) if p > 0 => p,
            _ => 6,
        }
    }

    /// Rows that are not arrays
    pub fn malformed_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.cells().is_none()).count()
    }
}
