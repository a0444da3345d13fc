//! Configuration for SVG rendering

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Whether to include XML declaration and standalone attributes
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "eb-" for "eb-element")
    pub class_prefix: Option<String>,

    /// Font size used inside table cells
    pub table_font_size: u32,

    /// Draw a labelled box where an image url is empty or still a
    /// `{{field}}` token. Off for print-ready output.
    pub placeholder_hints: bool,

    /// Fill of the placeholder box
    pub placeholder_fill: String,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            class_prefix: Some("eb-".to_string()),
            table_font_size: 10,
            placeholder_hints: true,
            placeholder_fill: "#f0f0f0".to_string(),
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub fn with_table_font_size(mut self, size: u32) -> Self {
        self.table_font_size = size;
        self
    }

    pub fn with_placeholder_hints(mut self, hints: bool) -> Self {
        self.placeholder_hints = hints;
        self
    }

    pub fn with_placeholder_fill(mut self, fill: impl Into<String>) -> Self {
        self.placeholder_fill = fill.into();
        self
    }
}
