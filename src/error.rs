//! Error types for layout documents and template validation

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors raised while reading a layout document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid layout JSON at line {line}, column {column}: {message}")]
    Json {
        message: String,
        line: usize,
        column: usize,
        span: Span,
    },
}

impl DocumentError {
    /// Build a JSON error, locating the byte span in `source`
    pub fn from_json(err: &serde_json::Error, source: &str) -> Self {
        let line = err.line();
        let column = err.column();
        let start = byte_offset(source, line, column);
        let end = (start + 1).min(source.len()).max(start);
        DocumentError::Json {
            message: err.to_string(),
            line,
            column,
            span: start..end,
        }
    }

    /// Source span of the error
    pub fn span(&self) -> &Span {
        match self {
            DocumentError::Json { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            DocumentError::Json { message, span, .. } => {
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message("invalid layout document")
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// serde_json reports 1-based lines and columns; column 0 means "before the first char"
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

/// Validation failures for template metadata and style attributes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Name must be at least {min} characters")]
    NameTooShort { min: usize },

    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}
