//! Layout documents: template-level style plus an optional element list

use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, ValidationError};

use super::types::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Template-level asset fields that receive uploaded URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSlot {
    Logo,
    Signature,
    Stamp,
    Background,
}

/// Style attributes shared by every template kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateStyle {
    pub background_color: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub border_color: String,
    pub border_width: u32,
    pub font_size: u32,
    pub font_family: String,
    pub text_color: String,
    pub header_text: String,
    pub footer_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamp_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(rename = "includeQRCode")]
    pub include_qr_code: bool,
    pub include_barcode: bool,
    pub include_photo: bool,
    pub orientation: Orientation,
}

impl Default for TemplateStyle {
    fn default() -> Self {
        Self {
            background_color: "#FFFFFF".to_string(),
            primary_color: "#1e40af".to_string(),
            secondary_color: "#64748b".to_string(),
            border_color: "#000000".to_string(),
            border_width: 2,
            font_size: 14,
            font_family: "Arial".to_string(),
            text_color: "#000000".to_string(),
            header_text: String::new(),
            footer_text: String::new(),
            logo_url: None,
            signature_url: None,
            stamp_url: None,
            background_image: None,
            include_qr_code: false,
            include_barcode: false,
            include_photo: false,
            orientation: Orientation::Portrait,
        }
    }
}

impl TemplateStyle {
    pub const BORDER_WIDTH_RANGE: (u32, u32) = (0, 20);
    pub const FONT_SIZE_RANGE: (u32, u32) = (8, 72);

    /// Check numeric attributes against the ranges the editor form allows
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("borderWidth", self.border_width, Self::BORDER_WIDTH_RANGE)?;
        check_range("fontSize", self.font_size, Self::FONT_SIZE_RANGE)?;
        Ok(())
    }

    pub fn asset(&self, slot: AssetSlot) -> Option<&str> {
        match slot {
            AssetSlot::Logo => self.logo_url.as_deref(),
            AssetSlot::Signature => self.signature_url.as_deref(),
            AssetSlot::Stamp => self.stamp_url.as_deref(),
            AssetSlot::Background => self.background_image.as_deref(),
        }
    }

    pub fn set_asset(&mut self, slot: AssetSlot, url: impl Into<String>) {
        let url = Some(url.into());
        match slot {
            AssetSlot::Logo => self.logo_url = url,
            AssetSlot::Signature => self.signature_url = url,
            AssetSlot::Stamp => self.stamp_url = url,
            AssetSlot::Background => self.background_image = url,
        }
    }
}

fn check_range(field: &'static str, value: u32, (min, max): (u32, u32)) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: i32,
    pub height: i32,
}

/// The full description of one template's visual design
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    #[serde(flatten)]
    pub style: TemplateStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_size: Option<CanvasSize>,
    /// Present only for kinds edited on the free-form canvas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<Element>>,
}

impl LayoutDocument {
    /// A style-only document
    pub fn with_style(style: TemplateStyle) -> Self {
        Self {
            style,
            canvas_size: None,
            elements: None,
        }
    }

    /// A canvas document holding `elements`
    pub fn with_elements(style: TemplateStyle, elements: Vec<Element>) -> Self {
        Self {
            style,
            canvas_size: None,
            elements: Some(elements),
        }
    }

    /// Parse a `layoutConfig` JSON document
    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(source).map_err(|e| DocumentError::from_json(&e, source))
    }

    pub fn to_json_pretty(&self) -> String {
        // Serializing plain data with string keys cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn elements(&self) -> &[Element] {
        self.elements.as_deref().unwrap_or(&[])
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements().iter().find(|e| e.id == id)
    }

    pub fn uses_canvas(&self) -> bool {
        self.elements.is_some()
    }
}
