//! Built-in admit-card layout used to seed the canvas editor

use super::types::{
    Column, Element, ElementKind, FontWeight, ImageElement, TableCell, TableElement, TableRow,
    TextAlign, TextElement,
};

fn text(
    id: &str,
    (x, y, width, height): (i32, i32, i32, i32),
    content: &str,
    font_size: u32,
    bold: bool,
    align: TextAlign,
) -> Element {
    Element {
        id: id.to_string(),
        x,
        y,
        width,
        kind: ElementKind::Text(TextElement {
            content: content.to_string(),
            height,
            font_size,
            font_weight: if bold { FontWeight::Bold } else { FontWeight::Normal },
            text_align: align,
            color: "#000000".to_string(),
            text_decoration: None,
        }),
    }
}

fn image(id: &str, (x, y, width, height): (i32, i32, i32, i32), url: &str, border: bool) -> Element {
    Element {
        id: id.to_string(),
        x,
        y,
        width,
        kind: ElementKind::Image(ImageElement {
            url: url.to_string(),
            height,
            border,
            border_color: border.then(|| "#000000".to_string()),
            border_width: border.then_some(1),
        }),
    }
}

fn table(id: &str, (x, y, width): (i32, i32, i32), columns: Vec<Column>, rows: Vec<TableRow>) -> Element {
    Element {
        id: id.to_string(),
        x,
        y,
        width,
        kind: ElementKind::Table(TableElement {
            columns,
            rows,
            border_width: Some(1),
            border_color: Some("#000000".to_string()),
            header_bg: Some("#f5f5f5".to_string()),
            cell_padding: Some(6),
        }),
    }
}

fn info_row(a: (&str, &str), b: (&str, &str)) -> TableRow {
    TableRow::Cells(vec![
        TableCell::text(a.0),
        TableCell::text(a.1),
        TableCell::text(b.0),
        TableCell::text(b.1),
    ])
}

fn schedule_row(n: u32) -> TableRow {
    TableRow::Cells(vec![
        TableCell::text(format!("{{{{examDate{n}}}}}")),
        TableCell::text(format!("{{{{paperCode{n}}}}}")),
        TableCell::text(format!("{{{{subject{n}}}}}")),
        TableCell::text(format!("{{{{opted{n}}}}}")),
    ])
}

/// The default admit-card layout: a board-exam style card with a header,
/// two logo slots, candidate details, a photo slot, the exam schedule and a
/// signature block. Eleven elements.
pub fn default_admit_card() -> Vec<Element> {
    vec![
        text(
            "header-text",
            (150, 20, 700, 36),
            "{{schoolName}}",
            22,
            true,
            TextAlign::Center,
        ),
        text(
            "sub-header",
            (150, 58, 700, 24),
            "Secondary School Examination {{year}}",
            14,
            false,
            TextAlign::Center,
        ),
        image("logo-left", (40, 20, 80, 80), "", false),
        image("logo-right", (880, 20, 80, 80), "", false),
        text(
            "admit-title",
            (350, 100, 300, 30),
            "ADMIT CARD",
            18,
            true,
            TextAlign::Center,
        ),
        table(
            "info-table",
            (40, 150, 740),
            vec![],
            vec![
                info_row(("Roll No.", "{{rollNumber}}"), ("Admission No.", "{{admissionNo}}")),
                info_row(("Candidate Name", "{{studentName}}"), ("Class", "{{class}}")),
                info_row(("Father's Name", "{{fatherName}}"), ("Mother's Name", "{{motherName}}")),
                info_row(("Date of Birth", "{{dob}}"), ("Gender", "{{gender}}")),
                TableRow::Cells(vec![
                    TableCell::text("Exam Centre"),
                    TableCell::Field(
                        crate::layout::FieldCell {
                            label: None,
                            field: Some("{{examCenter}}".to_string()),
                            colspan: None,
                        }
                        .with_colspan(3),
                    ),
                ]),
            ],
        ),
        image("student-photo", (810, 150, 150, 180), "{{studentPhoto}}", true),
        table(
            "schedule-table",
            (40, 360, 920),
            vec![
                Column::new("Date", "20%"),
                Column::new("Paper Code", "20%"),
                Column::new("Subject", "40%"),
                Column::new("Opted", "20%"),
            ],
            (1..=4).map(schedule_row).collect(),
        ),
        image("signature-image", (780, 560, 160, 50), "{{principalSignature}}", false),
        text(
            "signature-label",
            (780, 615, 160, 24),
            "Controller of Examinations",
            11,
            true,
            TextAlign::Center,
        ),
        text(
            "instructions",
            (40, 560, 600, 80),
            "Candidates must carry this admit card to the examination centre. Report 30 minutes before the exam.",
            10,
            false,
            TextAlign::Left,
        ),
    ]
}
