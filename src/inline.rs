use crate::block::Span;

/// Parse inline Markdown formatting into a flat span list.
///
/// Recognized delimiters: `` ` `` for code, `**` for bold, `*` for italic.
/// Matching is longest-delimiter-first, so bold wins when delimiters collide,
/// and delimiters never nest. Unclosed delimiters fall through as plain text.
pub fn parse_spans(text: &str) -> Vec<Span> {
    let text = normalize_emphasis(text);
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text.as_str();

    while let Some(ch) = rest.chars().next() {
        match ch {
            '`' => {
                if let Some(end) = rest[1..].find('`') {
                    flush(&mut plain, &mut spans);
                    spans.push(Span::Code(rest[1..1 + end].to_string()));
                    rest = &rest[1 + end + 1..];
                } else {
                    plain.push('`');
                    rest = &rest[1..];
                }
            }
            '*' if rest.starts_with("**") => {
                if let Some(end) = rest[2..].find("**") {
                    flush(&mut plain, &mut spans);
                    spans.push(Span::Bold(rest[2..2 + end].to_string()));
                    rest = &rest[2 + end + 2..];
                } else {
                    plain.push_str("**");
                    rest = &rest[2..];
                }
            }
            '*' => {
                if let Some(end) = rest[1..].find('*') {
                    flush(&mut plain, &mut spans);
                    spans.push(Span::Italic(rest[1..1 + end].to_string()));
                    rest = &rest[1 + end + 1..];
                } else {
                    plain.push('*');
                    rest = &rest[1..];
                }
            }
            _ => {
                plain.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    flush(&mut plain, &mut spans);
    spans
}

fn flush(plain: &mut String, spans: &mut Vec<Span>) {
    if !plain.is_empty() {
        spans.push(Span::Text(std::mem::take(plain)));
    }
}

/// Collapse runs of three or more asterisks to `**`.
///
/// Triple emphasis is not supported as nesting; `***text***` resolves to
/// bold, which is how collisions are disambiguated upstream too.
fn normalize_emphasis(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut stars = 0usize;
    for ch in text.chars() {
        if ch == '*' {
            stars += 1;
        } else {
            emit_stars(&mut out, stars);
            stars = 0;
            out.push(ch);
        }
    }
    emit_stars(&mut out, stars);
    out
}

fn emit_stars(out: &mut String, count: usize) {
    if count >= 3 {
        out.push_str("**");
    } else {
        for _ in 0..count {
            out.push('*');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text() {
        assert_eq!(parse_spans("hello"), vec![Span::Text("hello".into())]);
    }

    #[test]
    fn bold() {
        assert_eq!(
            parse_spans("a **b** c"),
            vec![
                Span::Text("a ".into()),
                Span::Bold("b".into()),
                Span::Text(" c".into()),
            ]
        );
    }

    #[test]
    fn italic() {
        assert_eq!(
            parse_spans("*x*"),
            vec![Span::Italic("x".into())]
        );
    }

    #[test]
    fn inline_code() {
        assert_eq!(
            parse_spans("run `cargo build` now"),
            vec![
                Span::Text("run ".into()),
                Span::Code("cargo build".into()),
                Span::Text(" now".into()),
            ]
        );
    }

    #[test]
    fn code_protects_asterisks() {
        assert_eq!(
            parse_spans("`a * b`"),
            vec![Span::Code("a * b".into())]
        );
    }

    #[test]
    fn bold_wins_delimiter_collision() {
        assert_eq!(parse_spans("***x***"), vec![Span::Bold("x".into())]);
    }

    #[test]
    fn unclosed_delimiters_stay_plain() {
        assert_eq!(parse_spans("a * b"), vec![Span::Text("a * b".into())]);
        assert_eq!(parse_spans("`open"), vec![Span::Text("`open".into())]);
        assert_eq!(parse_spans("**open"), vec![Span::Text("**open".into())]);
    }

    #[test]
    fn adjacent_spans_not_merged() {
        assert_eq!(
            parse_spans("`a``b`"),
            vec![Span::Code("a".into()), Span::Code("b".into())]
        );
        assert_eq!(
            parse_spans("**a** **b**"),
            vec![
                Span::Bold("a".into()),
                Span::Text(" ".into()),
                Span::Bold("b".into()),
            ]
        );
    }

    #[test]
    fn mixed_kinds_preserve_order() {
        assert_eq!(
            parse_spans("*i* and **b** and `c`"),
            vec![
                Span::Italic("i".into()),
                Span::Text(" and ".into()),
                Span::Bold("b".into()),
                Span::Text(" and ".into()),
                Span::Code("c".into()),
            ]
        );
    }
}
