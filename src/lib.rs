//! EduBreezy document templates
//!
//! The layout model behind certificate, ID-card and admit-card templates:
//! elements on a canvas, an undo/redo editor, `{{field}}` placeholders, and
//! an SVG preview renderer.
//!
//! # Example
//!
//! ```rust
//! use edubreezy_templates::render;
//!
//! let svg = render(r#"{"elements":[{"id":"t","type":"text","x":10,"y":10,"width":200,"content":"Hello"}]}"#).unwrap();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("Hello"));
//! ```

pub mod attendance;
pub mod editor;
pub mod error;
pub mod layout;
pub mod placeholder;
pub mod renderer;
pub mod state;
pub mod template;
pub mod theme;
pub mod upload;

pub use editor::Editor;
pub use error::{DocumentError, ValidationError};
pub use layout::{CanvasConfig, Element, ElementPatch, ElementType, LayoutDocument, TemplateStyle};
pub use placeholder::FieldValues;
pub use renderer::{render_layout, render_svg, SvgConfig};
pub use template::{TemplateDraft, TemplateKind, TemplateRecord, TemplateStore};
pub use theme::{Theme, ThemeError};

use log::warn;
use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// The layout JSON did not parse
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Canvas used when the document has no `canvasSize`
    pub canvas: CanvasConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Theme applied on top of the document's style
    pub theme: Option<Theme>,
    /// Field values to fill into placeholders; `None` previews raw tokens
    pub values: Option<FieldValues>,
    /// Log lint warnings for the document before rendering
    pub lint: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas configuration
    pub fn with_canvas(mut self, canvas: CanvasConfig) -> Self {
        self.canvas = canvas;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_values(mut self, values: FieldValues) -> Self {
        self.values = Some(values);
        self
    }

    /// Enable or disable linting
    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }
}

/// Render layout JSON to SVG with default configuration
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, &RenderConfig::default())
}

/// Render layout JSON to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use edubreezy_templates::{render_with_config, CanvasConfig, RenderConfig};
///
/// let config = RenderConfig::new().with_canvas(CanvasConfig::new().with_size(794, 1123));
/// let svg = render_with_config("{}", &config).unwrap();
/// assert!(svg.contains(r#"viewBox="0 0 794 1123""#));
/// ```
pub fn render_with_config(source: &str, config: &RenderConfig) -> Result<String, RenderError> {
    let mut doc = LayoutDocument::from_json(source)?;

    if let Some(theme) = &config.theme {
        theme.apply(&mut doc.style);
    }

    if config.lint {
        if let Err(e) = doc.style.validate() {
            warn!("{}", e);
        }
        for warning in layout::lint::check(&doc, &config.canvas, doc.uses_canvas()) {
            warn!("{}", warning);
        }
    }

    Ok(render_layout(&doc, &config.canvas, &config.svg, config.values.as_ref()))
}
