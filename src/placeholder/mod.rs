//! Placeholder tokens
//!
//! Template authors embed per-document values as `{{fieldName}}` inside text,
//! image urls and table cells. Two notions coexist:
//!
//! - *display detection* ([`is_placeholder`]) is a bare prefix check: any
//!   string starting with `{{` is shown as a raw token rather than loaded;
//! - *substitution* ([`substitute`]) only replaces complete `{{word}}`
//!   tokens, leaving everything else verbatim.

mod catalog;
pub mod lexer;

use std::collections::HashMap;

pub use catalog::{field_label, PlaceholderField, STANDARD_FIELDS};
pub use lexer::{segments, Segment};

/// Field values keyed by placeholder name
pub type FieldValues = HashMap<String, String>;

/// Whether `s` should be treated as a placeholder for display purposes
pub fn is_placeholder(s: &str) -> bool {
    s.starts_with("{{")
}

/// Wrap a field name as a token, e.g. `studentName` -> `{{studentName}}`
pub fn token(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

/// Replace every complete `{{name}}` token that has a non-empty value.
///
/// Unknown names and empty values leave the token in place so the gap is
/// visible on the generated document.
pub fn substitute(text: &str, values: &FieldValues) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in segments(text) {
        match segment {
            Segment::Literal(s) => out.push_str(s),
            Segment::Field { name, span } => match values.get(name) {
                Some(value) if !value.is_empty() => out.push_str(value),
                _ => out.push_str(&text[span]),
            },
        }
    }
    out
}

/// Field names referenced by complete tokens, in order of first appearance
pub fn fields(text: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for segment in segments(text) {
        if let Segment::Field { name, .. } = segment {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Whether `text` opens a `{{` that never becomes a complete token
pub fn has_unterminated(text: &str) -> bool {
    segments(text).iter().any(|segment| match segment {
        Segment::Literal(s) => s.contains("{{"),
        Segment::Field { .. } => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_prefix_detection() {
        assert!(is_placeholder("{{studentPhoto}}"));
        assert!(is_placeholder("{{name"));
        assert!(!is_placeholder("https://cdn/logo.png"));
        assert!(!is_placeholder(" {{x}}"));
        assert!(!is_placeholder(""));
    }

    #[test]
    fn test_token() {
        assert_eq!(token("rollNumber"), "{{rollNumber}}");
    }

    #[test]
    fn test_substitute_known_and_unknown() {
        let v = values(&[("studentName", "Asha Rao"), ("class", "")]);
        assert_eq!(
            substitute("{{studentName}} of {{class}} ({{section}})", &v),
            "Asha Rao of {{class}} ({{section}})"
        );
    }

    #[test]
    fn test_substitute_repeated_token() {
        let v = values(&[("a", "1")]);
        assert_eq!(substitute("{{a}}-{{a}}", &v), "1-1");
    }

    #[test]
    fn test_substitute_leaves_malformed_tokens() {
        let v = values(&[("name", "x")]);
        assert_eq!(substitute("{{name", &v), "{{name");
        assert_eq!(substitute("{name}", &v), "{name}");
    }

    #[test]
    fn test_substitute_inside_extra_braces() {
        let v = values(&[("studentName", "Asha")]);
        assert_eq!(substitute("{{{studentName}}}", &v), "{Asha}");
        assert_eq!(fields("{{{studentName}}}"), vec!["studentName"]);
    }

    #[test]
    fn test_fields_dedup() {
        assert_eq!(fields("{{a}} {{b}} {{a}}"), vec!["a", "b"]);
    }

    #[test]
    fn test_unterminated() {
        assert!(has_unterminated("Dear {{name"));
        assert!(!has_unterminated("Dear {{name}}"));
        assert!(!has_unterminated("plain"));
    }
}
