//! Template themes
//!
//! A theme is a TOML file holding a partial `TemplateStyle`. Applying a
//! theme overwrites only the keys the file sets, so themes can be layered
//! on top of a template kind's defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::{Orientation, TemplateStyle};

/// Errors that can occur when loading or parsing themes
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse theme TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Style keys a theme may set. Absent keys leave the target untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleOverrides {
    pub background_color: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<u32>,
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub text_color: Option<String>,
    pub header_text: Option<String>,
    pub footer_text: Option<String>,
    pub logo_url: Option<String>,
    pub signature_url: Option<String>,
    pub stamp_url: Option<String>,
    pub background_image: Option<String>,
    pub include_qr_code: Option<bool>,
    pub include_barcode: Option<bool>,
    pub include_photo: Option<bool>,
    pub orientation: Option<Orientation>,
}

/// A named set of style overrides
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: Option<String>,
    pub description: Option<String>,
    pub overrides: StyleOverrides,
}

#[derive(Deserialize)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    style: StyleOverrides,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Built-in theme matching the `TemplateStyle` defaults
const DEFAULT_THEME: &str = r##"
[metadata]
name = "Classic"
description = "Blue accents on white, Arial throughout"

[style]
background_color = "#FFFFFF"
primary_color = "#1e40af"
secondary_color = "#64748b"
border_color = "#000000"
border_width = 2
font_size = 14
font_family = "Arial"
text_color = "#000000"
"##;

impl Theme {
    /// Load a theme from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a theme from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;

        Ok(Theme {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            overrides: parsed.style,
        })
    }

    /// Overwrite the keys this theme sets
    pub fn apply(&self, style: &mut TemplateStyle) {
        let o = &self.overrides;
        set(&mut style.background_color, &o.background_color);
        set(&mut style.primary_color, &o.primary_color);
        set(&mut style.secondary_color, &o.secondary_color);
        set(&mut style.border_color, &o.border_color);
        set(&mut style.border_width, &o.border_width);
        set(&mut style.font_size, &o.font_size);
        set(&mut style.font_family, &o.font_family);
        set(&mut style.text_color, &o.text_color);
        set(&mut style.header_text, &o.header_text);
        set(&mut style.footer_text, &o.footer_text);
        set(&mut style.include_qr_code, &o.include_qr_code);
        set(&mut style.include_barcode, &o.include_barcode);
        set(&mut style.include_photo, &o.include_photo);
        set(&mut style.orientation, &o.orientation);
        if o.logo_url.is_some() {
            style.logo_url = o.logo_url.clone();
        }
        if o.signature_url.is_some() {
            style.signature_url = o.signature_url.clone();
        }
        if o.stamp_url.is_some() {
            style.stamp_url = o.stamp_url.clone();
        }
        if o.background_image.is_some() {
            style.background_image = o.background_image.clone();
        }
    }

    /// A copy of `base` with this theme applied
    pub fn applied_to(&self, base: &TemplateStyle) -> TemplateStyle {
        let mut style = base.clone();
        self.apply(&mut style);
        style
    }
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_str(DEFAULT_THEME).expect("Default theme should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_matches_style_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.name, Some("Classic".to_string()));
        let mut style = TemplateStyle {
            primary_color: "#ff0000".to_string(),
            font_size: 30,
            ..TemplateStyle::default()
        };
        theme.apply(&mut style);
        assert_eq!(style, TemplateStyle::default());
    }

    #[test]
    fn test_partial_theme_keeps_other_keys() {
        let theme = Theme::from_str(
            r##"
[style]
primary_color = "#7c3aed"
orientation = "landscape"
include_qr_code = true
"##,
        )
        .expect("Should parse");
        assert_eq!(theme.name, None);

        let base = TemplateStyle {
            header_text: "Springfield High".to_string(),
            ..TemplateStyle::default()
        };
        let style = theme.applied_to(&base);
        assert_eq!(style.primary_color, "#7c3aed");
        assert_eq!(style.orientation, Orientation::Landscape);
        assert!(style.include_qr_code);
        assert_eq!(style.header_text, "Springfield High");
        assert_eq!(style.font_family, "Arial");
    }

    #[test]
    fn test_asset_overrides() {
        let theme = Theme::from_str(
            r#"
[style]
logo_url = "https://cdn.example.com/logo.png"
"#,
        )
        .expect("Should parse");
        let style = theme.applied_to(&TemplateStyle::default());
        assert_eq!(style.logo_url.as_deref(), Some("https://cdn.example.com/logo.png"));
        assert_eq!(style.stamp_url, None);
    }

    #[test]
    fn test_metadata_only() {
        let theme = Theme::from_str("[metadata]\nname = \"Empty\"\n").expect("Should parse");
        assert_eq!(theme.overrides, StyleOverrides::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            Theme::from_str("[style]\nprimary = \"#000\"\n"),
            Err(ThemeError::ParseError(_))
        ));
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(Theme::from_str("this is not valid toml {{{{").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Theme::from_file(Path::new("/definitely/not/a/theme.toml")),
            Err(ThemeError::IoError(_))
        ));
    }
}
