//! Lexer for `{{field}}` tokens inside template text, using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Braces lex one at a time so a field can be found inside a longer brace run
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum Token {
    #[token("{")]
    Open,
    #[token("}")]
    Close,
    #[regex(r"[A-Za-z0-9_]+")]
    Word,
    #[regex(r"[^{}A-Za-z0-9_]+")]
    Other,
}

/// A run of template text
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    /// Text reproduced as-is
    Literal(&'a str),
    /// A complete `{{name}}` token
    Field { name: &'a str, span: Span },
}

pub fn lex(input: &str) -> impl Iterator<Item = (Option<Token>, Span)> + '_ {
    Token::lexer(input).spanned().map(|(tok, span)| (tok.ok(), span))
}

const FIELD: [Token; 5] = [Token::Open, Token::Open, Token::Word, Token::Close, Token::Close];

/// Split `input` into literal runs and complete field tokens.
///
/// Only `{{` word `}}` forms a field; any other brace usage, including an
/// unterminated `{{name`, stays literal. Extra braces around a field are
/// literal too, so `{{{name}}}` is a field wrapped in `{` and `}`. Adjacent
/// literals are merged.
pub fn segments(input: &str) -> Vec<Segment<'_>> {
    let tokens: Vec<_> = lex(input).collect();
    let mut out = Vec::new();
    let mut literal_start: Option<usize> = None;
    let mut i = 0;

    while i < tokens.len() {
        let window = tokens.get(i..i + FIELD.len()).unwrap_or_default();
        let is_field = window.len() == FIELD.len()
            && window.iter().zip(FIELD).all(|((tok, _), want)| *tok == Some(want));
        if is_field {
            let open = &window[0].1;
            let close = &window[4].1;
            if let Some(start) = literal_start.take() {
                out.push(Segment::Literal(&input[start..open.start]));
            }
            out.push(Segment::Field {
                name: &input[window[2].1.clone()],
                span: open.start..close.end,
            });
            i += FIELD.len();
            continue;
        }
        literal_start.get_or_insert(tokens[i].1.start);
        i += 1;
    }

    if let Some(start) = literal_start {
        out.push(Segment::Literal(&input[start..]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kinds() {
        let tokens: Vec<_> = lex("{{a}} b{").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Some(Token::Open),
                Some(Token::Open),
                Some(Token::Word),
                Some(Token::Close),
                Some(Token::Close),
                Some(Token::Other),
                Some(Token::Word),
                Some(Token::Open),
            ]
        );
    }

    #[test]
    fn test_segments_mixed() {
        let segs = segments("Name: {{studentName}}!");
        assert_eq!(
            segs,
            vec![
                Segment::Literal("Name: "),
                Segment::Field {
                    name: "studentName",
                    span: 6..21,
                },
                Segment::Literal("!"),
            ]
        );
    }

    #[test]
    fn test_unterminated_is_literal() {
        assert_eq!(segments("{{name"), vec![Segment::Literal("{{name")]);
    }

    #[test]
    fn test_field_needs_a_word() {
        assert_eq!(segments("{{ name }}"), vec![Segment::Literal("{{ name }}")]);
        assert_eq!(segments("{{}}"), vec![Segment::Literal("{{}}")]);
    }

    #[test]
    fn test_field_inside_extra_braces() {
        assert_eq!(
            segments("{{{name}}}"),
            vec![
                Segment::Literal("{"),
                Segment::Field {
                    name: "name",
                    span: 1..9,
                },
                Segment::Literal("}"),
            ]
        );
        assert_eq!(
            segments("{{{{a}}"),
            vec![
                Segment::Literal("{{"),
                Segment::Field {
                    name: "a",
                    span: 2..7,
                },
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(segments("").is_empty());
    }
}
