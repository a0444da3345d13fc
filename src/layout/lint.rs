//! Lint engine for detecting defects in layout documents.
//!
//! Nothing here is fatal: the editor and renderers tolerate every condition
//! reported below. Warnings exist so authors can clean up persisted data.

use std::collections::HashSet;
use std::fmt;

use crate::placeholder;

use super::config::CanvasConfig;
use super::document::LayoutDocument;
use super::types::{Element, ElementKind, TableCell, TableElement};

/// A lint warning about a layout defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub element: Option<String>,
    pub message: String,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            Some(id) => write!(f, "[{}] \"{}\": {}", self.category, id, self.message),
            None => write!(f, "[{}] {}", self.category, self.message),
        }
    }
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    DuplicateId,
    Bounds,
    Table,
    Placeholder,
    Image,
    Capability,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::DuplicateId => write!(f, "duplicate-id"),
            LintCategory::Bounds => write!(f, "bounds"),
            LintCategory::Table => write!(f, "table"),
            LintCategory::Placeholder => write!(f, "placeholder"),
            LintCategory::Image => write!(f, "image"),
            LintCategory::Capability => write!(f, "capability"),
        }
    }
}

/// Run all lint checks on a layout document.
///
/// `uses_drag_drop` is the template kind's capability flag; element lists on
/// kinds without it are reported.
pub fn check(doc: &LayoutDocument, canvas: &CanvasConfig, uses_drag_drop: bool) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    if doc.uses_canvas() && !uses_drag_drop {
        warnings.push(LintWarning {
            category: LintCategory::Capability,
            element: None,
            message: "element list present on a template kind without the canvas editor".to_string(),
        });
    }
    check_ids(doc.elements(), &mut warnings);
    for element in doc.elements() {
        check_bounds(element, canvas, &mut warnings);
        match &element.kind {
            ElementKind::Text(text) => {
                check_placeholder(&element.id, &text.content, &mut warnings);
            }
            ElementKind::Image(image) => {
                if image.url.is_empty() {
                    warnings.push(warn(element, LintCategory::Image, "image has no url"));
                }
            }
            ElementKind::Table(table) => check_table(element, table, &mut warnings),
        }
    }
    warnings
}

fn warn(element: &Element, category: LintCategory, message: impl Into<String>) -> LintWarning {
    LintWarning {
        category,
        element: Some(element.id.clone()),
        message: message.into(),
    }
}

fn check_ids(elements: &[Element], warnings: &mut Vec<LintWarning>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for element in elements {
        if !seen.insert(element.id.as_str()) && reported.insert(element.id.as_str()) {
            warnings.push(warn(element, LintCategory::DuplicateId, "id is used more than once"));
        }
    }
}

fn check_bounds(element: &Element, canvas: &CanvasConfig, warnings: &mut Vec<LintWarning>) {
    if !canvas.contains(element.origin()) {
        warnings.push(warn(
            element,
            LintCategory::Bounds,
            format!(
                "origin ({}, {}) is outside the {}x{} canvas",
                element.x, element.y, canvas.width, canvas.height
            ),
        ));
    }
}

fn check_placeholder(id: &str, text: &str, warnings: &mut Vec<LintWarning>) {
    if placeholder::has_unterminated(text) {
        warnings.push(LintWarning {
            category: LintCategory::Placeholder,
            element: Some(id.to_string()),
            message: format!("unterminated placeholder in \"{}\"", text),
        });
    }
}

fn check_table(element: &Element, table: &TableElement, warnings: &mut Vec<LintWarning>) {
    let columns = table.columns.len() as u32;
    for (index, row) in table.rows.iter().enumerate() {
        let Some(cells) = row.cells() else {
            warnings.push(warn(
                element,
                LintCategory::Table,
                format!("row {} is not a list of cells and will be skipped", index + 1),
            ));
            continue;
        };

        let span: u32 = cells
            .iter()
            .map(|cell| match cell {
                TableCell::Field(f) => f.colspan(),
                _ => 1,
            })
            .sum();
        if columns > 0 && span > columns {
            warnings.push(warn(
                element,
                LintCategory::Table,
                format!("row {} spans {} columns but the table has {}", index + 1, span, columns),
            ));
        }

        for cell in cells {
            match cell {
                TableCell::Text(s) => check_placeholder(&element.id, s, warnings),
                TableCell::Field(f) => {
                    if let Some(field) = f.field() {
                        check_placeholder(&element.id, field, warnings);
                    }
                }
                TableCell::Other(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{seed, ElementType, Point, TableRow, TemplateStyle};

    fn doc(elements: Vec<Element>) -> LayoutDocument {
        LayoutDocument::with_elements(TemplateStyle::default(), elements)
    }

    #[test]
    fn test_seed_only_warns_about_empty_logos() {
        let warnings = check(&doc(seed::default_admit_card()), &CanvasConfig::default(), true);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.category == LintCategory::Image));
    }

    #[test]
    fn test_duplicate_ids_reported_once() {
        let a = Element::with_defaults("same", ElementType::Text, Point::new(0, 0));
        let warnings = check(
            &doc(vec![a.clone(), a.clone(), a]),
            &CanvasConfig::default(),
            true,
        );
        let dups: Vec<_> = warnings
            .iter()
            .filter(|w| w.category == LintCategory::DuplicateId)
            .collect();
        assert_eq!(dups.len(), 1);
    }

    #[test]
    fn test_out_of_bounds() {
        let el = Element::with_defaults("far", ElementType::Text, Point::new(2000, 10));
        let warnings = check(&doc(vec![el]), &CanvasConfig::default(), true);
        assert_eq!(warnings[0].category, LintCategory::Bounds);
        assert!(warnings[0].to_string().contains("\"far\""));
    }

    #[test]
    fn test_malformed_row_and_unterminated_placeholder() {
        let mut el = Element::with_defaults("t", ElementType::Table, Point::new(0, 0));
        if let ElementKind::Table(table) = &mut el.kind {
            table.rows.push(TableRow::Malformed(serde_json::json!({"label": "x"})));
            table.rows.push(TableRow::Cells(vec![TableCell::text("{{name")]));
        }
        let warnings = check(&doc(vec![el]), &CanvasConfig::default(), true);
        let categories: Vec<_> = warnings.iter().map(|w| w.category).collect();
        assert_eq!(categories, vec![LintCategory::Table, LintCategory::Placeholder]);
    }

    #[test]
    fn test_colspan_overflow() {
        let mut el = Element::with_defaults("t", ElementType::Table, Point::new(0, 0));
        if let ElementKind::Table(table) = &mut el.kind {
            table.rows = vec![TableRow::Cells(vec![
                TableCell::text("a"),
                TableCell::Field(crate::layout::FieldCell::default().with_colspan(2)),
            ])];
        }
        let warnings = check(&doc(vec![el]), &CanvasConfig::default(), true);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("spans 3 columns"));
    }

    #[test]
    fn test_capability_mismatch() {
        let warnings = check(&doc(vec![]), &CanvasConfig::default(), false);
        assert_eq!(warnings[0].category, LintCategory::Capability);
        let style_only = LayoutDocument::with_style(TemplateStyle::default());
        assert!(check(&style_only, &CanvasConfig::default(), false).is_empty());
    }
}
