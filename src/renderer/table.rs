//! Table element rendering
//!
//! Column widths are advisory CSS lengths passed straight through; the host
//! layout engine decides actual pixel widths. Rows that are not arrays are
//! skipped without error so malformed persisted data still previews. The
//! one exception is the legacy `{label, field}` row object, which a filled
//! view still draws as a two-cell row.

use log::warn;
use serde_json::Value;

use crate::layout::{TableCell, TableElement, TableRow};
use crate::placeholder::{self, FieldValues};

use super::svg::escape_xml;

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub label: String,
    pub width: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub content: String,
    pub colspan: u32,
    pub bold: bool,
}

/// A table reduced to what a renderer draws
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<Vec<CellView>>,
    /// Rows dropped because they could not be drawn
    pub skipped_rows: usize,
}

impl TableView {
    /// Build the editor view: object cells show their label, or their field
    /// token when there is no label.
    pub fn build(table: &TableElement) -> Self {
        Self::build_with(table, None)
    }

    /// Build a generated-document view: object cells show their field (or
    /// label) and every cell has `values` substituted.
    pub fn build_filled(table: &TableElement, values: &FieldValues) -> Self {
        Self::build_with(table, Some(values))
    }

    fn build_with(table: &TableElement, values: Option<&FieldValues>) -> Self {
        let header = table
            .columns
            .iter()
            .map(|c| HeaderCell {
                label: c.label.clone(),
                width: c.width.clone(),
            })
            .collect();

        let mut rows = Vec::with_capacity(table.rows.len());
        let mut skipped_rows = 0;
        for row in &table.rows {
            match (row, values) {
                (TableRow::Cells(cells), _) => {
                    rows.push(cells.iter().map(|c| cell_view(c, values)).collect())
                }
                (TableRow::Malformed(value), Some(v)) => match legacy_row(value, v) {
                    Some(cells) => rows.push(cells),
                    None => skipped_rows += 1,
                },
                (TableRow::Malformed(_), None) => skipped_rows += 1,
            }
        }
        if skipped_rows > 0 {
            warn!("skipped {} malformed table row(s)", skipped_rows);
        }

        Self {
            header,
            rows,
            skipped_rows,
        }
    }

    /// Render as an XHTML table suitable for embedding in a `<foreignObject>`
    pub fn to_html(&self, table: &TableElement, font_size: u32) -> String {
        let border = format!(
            "border:{}px solid {}",
            table.border_width(),
            escape_xml(table.border_color())
        );
        let padding = format!("padding:{}px", table.cell_padding());

        let mut html = format!(
            r#"<table xmlns="http://www.w3.org/1999/xhtml" style="width:100%;border-collapse:collapse;font-size:{}px;background-color:#fff">"#,
            font_size
        );

        if !self.header.is_empty() {
            html.push_str("<thead><tr>");
            for col in &self.header {
                html.push_str(&format!(
                    r#"<th style="{};{};font-weight:bold;background-color:{};width:{};text-align:left;font-size:{}px;color:black">{}</th>"#,
                    border,
                    padding,
                    escape_xml(table.header_bg()),
                    escape_xml(col.width.as_deref().unwrap_or("auto")),
                    font_size + 1,
                    escape_xml(&col.label)
                ));
            }
            html.push_str("</tr></thead>");
        }

        html.push_str("<tbody>");
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                let colspan = if cell.colspan > 1 {
                    format!(r#" colspan="{}""#, cell.colspan)
                } else {
                    String::new()
                };
                html.push_str(&format!(
                    r#"<td{} style="{};{};font-weight:{};font-size:{}px;color:black">{}</td>"#,
                    colspan,
                    border,
                    padding,
                    if cell.bold { "bold" } else { "normal" },
                    font_size,
                    escape_xml(&cell.content)
                ));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        html
    }
}

fn cell_view(cell: &TableCell, values: Option<&FieldValues>) -> CellView {
    match cell {
        TableCell::Text(s) => CellView {
            content: fill(s, values),
            colspan: 1,
            bold: false,
        },
        TableCell::Field(f) => {
            let content = match values {
                None => f.label().or(f.field()).unwrap_or_default().to_string(),
                Some(v) => placeholder::substitute(f.field().or(f.label()).unwrap_or_default(), v),
            };
            CellView {
                content,
                colspan: f.colspan(),
                bold: f.label().is_some(),
            }
        }
        TableCell::Other(value) => CellView {
            content: match value {
                Value::Null => String::new(),
                Value::String(s) => fill(s, values),
                other => other.to_string(),
            },
            colspan: 1,
            bold: false,
        },
    }
}

/// A `{label, field}` row object from older layouts, drawn as label then value
fn legacy_row(value: &Value, values: &FieldValues) -> Option<Vec<CellView>> {
    let label = value.get("label")?.as_str().filter(|l| !l.is_empty())?;
    let field = value.get("field").and_then(Value::as_str).unwrap_or_default();
    Some(vec![
        CellView {
            content: label.to_string(),
            colspan: 1,
            bold: true,
        },
        CellView {
            content: placeholder::substitute(field, values),
            colspan: 1,
            bold: false,
        },
    ])
}

fn fill(text: &str, values: Option<&FieldValues>) -> String {
    match values {
        Some(v) => placeholder::substitute(text, v),
        None => text.to_string(),
    }
}
