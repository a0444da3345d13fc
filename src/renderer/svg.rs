//! SVG generation from layout documents

use crate::layout::{
    CanvasConfig, Element, ElementKind, ImageElement, LayoutDocument, TableElement, TemplateStyle,
    TextAlign, TextElement,
};
use crate::placeholder::{self, FieldValues};

use super::table::TableView;
use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add CSS custom properties from the template-level style
    pub fn add_document_style(&mut self, style: &TemplateStyle) {
        let mut css = String::from(":root {\n");
        for (token, value) in [
            ("primary-color", &style.primary_color),
            ("secondary-color", &style.secondary_color),
            ("text-color", &style.text_color),
            ("border-color", &style.border_color),
            ("font-family", &style.font_family),
        ] {
            css.push_str(&format!("    --{}: {};\n", token, escape_xml(value)));
        }
        css.push_str("  }\n");
        let prefix = self.prefix();
        css.push_str(&format!(
            "  .{}text {{ font-family: var(--font-family); }}",
            prefix
        ));
        self.styles.push(css);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn class_list(&self, kind: &str, classes: &[String]) -> String {
        let prefix = self.prefix();
        std::iter::once(format!("{}{}", prefix, kind))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, x: i32, y: i32, w: i32, h: i32, classes: &[String], styles: &str) {
        let class_list = self.class_list("rect", classes);
        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            class_list,
            x,
            y,
            w,
            h,
            styles
        ));
    }

    /// Add a text element
    pub fn add_text(&mut self, text: &str, x: i32, y: i32, align: TextAlign, styles: &str) {
        let prefix = self.prefix();
        let anchor = match align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };

        self.elements.push(format!(
            r#"{}<text class="{}text" x="{}" y="{}" text-anchor="{}"{}>{}</text>"#,
            self.indent_str(),
            prefix,
            x,
            y,
            anchor,
            styles,
            escape_xml(text)
        ));
    }

    /// Add a raster image by URL
    pub fn add_image(&mut self, href: &str, x: i32, y: i32, w: i32, h: i32) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<image class="{}image" href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet"/>"#,
            self.indent_str(),
            prefix,
            escape_xml(href),
            x,
            y,
            w,
            h
        ));
    }

    /// Embed already-serialized XHTML
    pub fn add_foreign_object(&mut self, x: i32, y: i32, w: i32, h: i32, xhtml: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<foreignObject class="{}table" x="{}" y="{}" width="{}" height="{}">{}</foreignObject>"#,
            self.indent_str(),
            prefix,
            x,
            y,
            w,
            h,
            xhtml
        ));
    }

    /// Start a group element
    pub fn start_group(&mut self, id: Option<&str>, classes: &[String]) {
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };

        self.elements
            .push(format!("{}<g{}{}>", self.indent_str(), id_attr, class_attr));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string for a canvas of the given size
    pub fn build(self, width: i32, height: i32) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            width, height, width, height
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a layout document as it appears in the editor, tokens unfilled
pub fn render_svg(doc: &LayoutDocument, canvas: &CanvasConfig, config: &SvgConfig) -> String {
    render_layout(doc, canvas, config, None)
}

/// Render a layout document, substituting `values` into text, image URLs
/// and table cells when given.
///
/// The document's own `canvasSize` wins over `canvas` when present.
pub fn render_layout(
    doc: &LayoutDocument,
    canvas: &CanvasConfig,
    config: &SvgConfig,
    values: Option<&FieldValues>,
) -> String {
    let (width, height) = doc
        .canvas_size
        .map(|c| (c.width, c.height))
        .unwrap_or((canvas.width, canvas.height));

    let mut builder = SvgBuilder::new(config.clone());
    builder.add_document_style(&doc.style);

    let background = format!(r#" fill="{}""#, escape_xml(&doc.style.background_color));
    builder.add_rect(0, 0, width, height, &[], &background);
    if let Some(url) = doc.style.background_image.as_deref().filter(|u| !u.is_empty()) {
        builder.add_image(url, 0, 0, width, height);
    }

    let mut ctx = RenderContext {
        builder,
        values,
        canvas_height: height,
        config,
    };
    for element in doc.elements() {
        ctx.render_element(element);
    }

    ctx.builder.build(width, height)
}

struct RenderContext<'a> {
    builder: SvgBuilder,
    values: Option<&'a FieldValues>,
    canvas_height: i32,
    config: &'a SvgConfig,
}

impl RenderContext<'_> {
    fn fill(&self, text: &str) -> String {
        match self.values {
            Some(v) => placeholder::substitute(text, v),
            None => text.to_string(),
        }
    }

    fn render_element(&mut self, element: &Element) {
        let prefix = self.builder.prefix();
        let classes = vec![
            format!("{}element", prefix),
            format!("{}{}", prefix, element.element_type().as_str()),
        ];
        self.builder.start_group(Some(&element.id), &classes);

        match &element.kind {
            ElementKind::Text(text) => self.render_text(element, text),
            ElementKind::Image(image) => self.render_image(element, image),
            ElementKind::Table(table) => self.render_table(element, table),
        }

        self.builder.end_group();
    }

    fn render_text(&mut self, element: &Element, text: &TextElement) {
        let x = match text.text_align {
            TextAlign::Left => element.x + 4,
            TextAlign::Center => element.x + element.width / 2,
            TextAlign::Right => element.x + element.width - 4,
        };
        let y = element.y + text.font_size as i32;
        let content = self.fill(&text.content);
        self.builder
            .add_text(&content, x, y, text.text_align, &format_text_styles(text));
    }

    fn render_image(&mut self, element: &Element, image: &ImageElement) {
        let url = self.fill(&image.url);
        let (x, y, w, h) = (element.x, element.y, element.width, image.height);

        if url.is_empty() || placeholder::is_placeholder(&url) {
            if !self.config.placeholder_hints {
                self.render_image_border(element, image);
                return;
            }
            let fill = format!(r#" fill="{}""#, escape_xml(&self.config.placeholder_fill));
            self.builder.add_rect(x, y, w, h, &[], &fill);
            let label = if url.is_empty() { "Image" } else { url.as_str() };
            self.builder.add_text(
                label,
                x + w / 2,
                y + h / 2,
                TextAlign::Center,
                r##" font-size="12" fill="#999999""##,
            );
        } else {
            self.builder.add_image(&url, x, y, w, h);
        }
        self.render_image_border(element, image);
    }

    fn render_image_border(&mut self, element: &Element, image: &ImageElement) {
        if image.border {
            let styles = format!(
                r#" fill="none" stroke="{}" stroke-width="{}""#,
                escape_xml(image.border_color()),
                image.border_width()
            );
            self.builder
                .add_rect(element.x, element.y, element.width, image.height, &[], &styles);
        }
    }

    fn render_table(&mut self, element: &Element, table: &TableElement) {
        let view = match self.values {
            Some(v) => TableView::build_filled(table, v),
            None => TableView::build(table),
        };
        let html = view.to_html(table, self.config.table_font_size);
        let height = (self.canvas_height - element.y).max(0);
        self.builder
            .add_foreign_object(element.x, element.y, element.width, height, &html);
    }
}

fn format_text_styles(text: &TextElement) -> String {
    let mut parts = vec![
        format!(r#"font-size="{}""#, text.font_size),
        format!(r#"font-weight="{}""#, text.font_weight.as_str()),
        format!(r#"fill="{}""#, escape_xml(&text.color)),
    ];
    if let Some(decoration) = text.text_decoration.as_deref().filter(|d| !d.is_empty()) {
        parts.push(format!(r#"text-decoration="{}""#, escape_xml(decoration)));
    }
    format!(" {}", parts.join(" "))
}

/// Escape text for use in XML content and attribute values
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{CanvasSize, ElementType, Point};

    fn doc_with(elements: Vec<Element>) -> LayoutDocument {
        LayoutDocument::with_elements(TemplateStyle::default(), elements)
    }

    fn text_at(id: &str, align: TextAlign) -> Element {
        let mut e = Element::with_defaults(id, ElementType::Text, Point::new(100, 50));
        if let ElementKind::Text(t) = &mut e.kind {
            t.text_align = align;
            t.content = "Hello {{name}}".to_string();
        }
        e
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<a & b>"), "&lt;a &amp; b&gt;");
        assert_eq!(escape_xml(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_canvas_viewbox() {
        let svg = render_svg(&doc_with(vec![]), &CanvasConfig::default(), &SvgConfig::default());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 1000 700""#));
        assert!(svg.contains(r##"fill="#FFFFFF""##));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_document_canvas_size_wins() {
        let mut doc = doc_with(vec![]);
        doc.canvas_size = Some(CanvasSize {
            width: 794,
            height: 1123,
        });
        let svg = render_svg(&doc, &CanvasConfig::default(), &SvgConfig::default());
        assert!(svg.contains(r#"viewBox="0 0 794 1123""#));
    }

    #[test]
    fn test_text_anchor_positions() {
        let config = SvgConfig::default();
        let canvas = CanvasConfig::default();
        let left = render_svg(&doc_with(vec![text_at("a", TextAlign::Left)]), &canvas, &config);
        assert!(left.contains(r#"x="104" y="64" text-anchor="start""#));
        let center = render_svg(&doc_with(vec![text_at("a", TextAlign::Center)]), &canvas, &config);
        assert!(center.contains(r#"x="200" y="64" text-anchor="middle""#));
        let right = render_svg(&doc_with(vec![text_at("a", TextAlign::Right)]), &canvas, &config);
        assert!(right.contains(r#"x="296" y="64" text-anchor="end""#));
    }

    #[test]
    fn test_values_substituted() {
        let doc = doc_with(vec![text_at("a", TextAlign::Left)]);
        let values: FieldValues = [("name".to_string(), "Asha".to_string())].into_iter().collect();
        let canvas = CanvasConfig::default();
        let config = SvgConfig::default();
        assert!(render_svg(&doc, &canvas, &config).contains(">Hello {{name}}</text>"));
        assert!(render_layout(&doc, &canvas, &config, Some(&values)).contains(">Hello Asha</text>"));
    }

    #[test]
    fn test_image_placeholder_box() {
        let mut photo = Element::with_defaults("photo", ElementType::Image, Point::new(10, 10));
        if let ElementKind::Image(i) = &mut photo.kind {
            i.url = "{{studentPhoto}}".to_string();
            i.border = true;
        }
        let empty = Element::with_defaults("logo", ElementType::Image, Point::new(300, 10));
        let svg = render_svg(
            &doc_with(vec![photo, empty]),
            &CanvasConfig::default(),
            &SvgConfig::default(),
        );
        assert!(svg.contains(r##"fill="#f0f0f0""##));
        assert!(svg.contains(">{{studentPhoto}}</text>"));
        assert!(svg.contains(">Image</text>"));
        assert!(svg.contains(r##"stroke="#000" stroke-width="2""##));
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn test_placeholder_hints_off() {
        let mut photo = Element::with_defaults("photo", ElementType::Image, Point::new(10, 10));
        if let ElementKind::Image(i) = &mut photo.kind {
            i.url = "{{studentPhoto}}".to_string();
            i.border = true;
        }
        let config = SvgConfig::new().with_placeholder_hints(false);
        let svg = render_svg(&doc_with(vec![photo]), &CanvasConfig::default(), &config);
        assert!(!svg.contains("{{studentPhoto}}"));
        assert!(!svg.contains(r##"fill="#f0f0f0""##));
        assert!(svg.contains(r##"stroke="#000" stroke-width="2""##));

        let tinted = SvgConfig::new().with_placeholder_fill("#fde68a");
        let empty = Element::with_defaults("logo", ElementType::Image, Point::new(0, 0));
        let svg = render_svg(&doc_with(vec![empty]), &CanvasConfig::default(), &tinted);
        assert!(svg.contains(r##"fill="#fde68a""##));
    }

    #[test]
    fn test_image_with_url() {
        let mut logo = Element::with_defaults("logo", ElementType::Image, Point::new(0, 0));
        if let ElementKind::Image(i) = &mut logo.kind {
            i.url = "https://cdn.example.com/a.png?x=1&y=2".to_string();
        }
        let svg = render_svg(&doc_with(vec![logo]), &CanvasConfig::default(), &SvgConfig::default());
        assert!(svg.contains(r#"href="https://cdn.example.com/a.png?x=1&amp;y=2""#));
    }

    #[test]
    fn test_table_foreign_object() {
        let table = Element::with_defaults("t", ElementType::Table, Point::new(40, 500));
        let svg = render_svg(&doc_with(vec![table]), &CanvasConfig::default(), &SvgConfig::default());
        assert!(svg.contains(r#"<foreignObject class="eb-table" x="40" y="500" width="600" height="200">"#));
        assert!(svg.contains(r#"<g id="t" class="eb-element eb-table">"#));
    }

    #[test]
    fn test_compact_output() {
        let config = SvgConfig::new().with_standalone(false).with_pretty_print(false);
        let svg = render_svg(&doc_with(vec![]), &CanvasConfig::default(), &config);
        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains("\n<rect"));
    }
}
