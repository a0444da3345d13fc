//! Partial element updates

use serde::{Deserialize, Serialize};

use super::types::{pixels_opt, Column, Element, ElementKind, FontWeight, TableRow, TextAlign};

/// A set of attributes to merge into an element. Unset fields leave the
/// element untouched; fields that do not apply to the element's kind are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(deserialize_with = "pixels_opt")]
    pub x: Option<i32>,
    #[serde(deserialize_with = "pixels_opt")]
    pub y: Option<i32>,
    #[serde(deserialize_with = "pixels_opt")]
    pub width: Option<i32>,
    #[serde(deserialize_with = "pixels_opt")]
    pub height: Option<i32>,

    pub content: Option<String>,
    pub font_size: Option<u32>,
    pub font_weight: Option<FontWeight>,
    pub text_align: Option<TextAlign>,
    pub color: Option<String>,
    pub text_decoration: Option<String>,

    pub url: Option<String>,
    pub border: Option<bool>,

    pub columns: Option<Vec<Column>>,
    pub rows: Option<Vec<TableRow>>,
    pub header_bg: Option<String>,
    pub cell_padding: Option<u32>,

    /// Shared by images and tables
    pub border_color: Option<String>,
    pub border_width: Option<u32>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this patch into `element`
    pub fn apply(&self, element: &mut Element) {
        set(&mut element.x, self.x);
        set(&mut element.y, self.y);
        set(&mut element.width, self.width);

        match &mut element.kind {
            ElementKind::Text(text) => {
                set(&mut text.height, self.height);
                set(&mut text.content, self.content.clone());
                set(&mut text.font_size, self.font_size);
                set(&mut text.font_weight, self.font_weight);
                set(&mut text.text_align, self.text_align);
                set(&mut text.color, self.color.clone());
                if self.text_decoration.is_some() {
                    text.text_decoration = self.text_decoration.clone();
                }
            }
            ElementKind::Image(image) => {
                set(&mut image.height, self.height);
                set(&mut image.url, self.url.clone());
                set(&mut image.border, self.border);
                if self.border_color.is_some() {
                    image.border_color = self.border_color.clone();
                }
                if self.border_width.is_some() {
                    image.border_width = self.border_width;
                }
            }
            ElementKind::Table(table) => {
                set(&mut table.columns, self.columns.clone());
                set(&mut table.rows, self.rows.clone());
                if self.border_color.is_some() {
                    table.border_color = self.border_color.clone();
                }
                if self.border_width.is_some() {
                    table.border_width = self.border_width;
                }
                if self.header_bg.is_some() {
                    table.header_bg = self.header_bg.clone();
                }
                if self.cell_padding.is_some() {
                    table.cell_padding = self.cell_padding;
                }
            }
        }
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}
