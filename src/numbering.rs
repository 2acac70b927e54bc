use crate::block::{Block, Span};
use crate::styles::StyleCatalog;

/// Reconcile source-level numbering with the styles it will be bound to.
///
/// List items lose their literal marker when the bound style numbers them
/// itself, otherwise the marker is rendered verbatim. Headings bound to an
/// auto-numbering style drop a leading manual section number so the text
/// is not numbered twice.
pub fn resolve(blocks: &mut [Block], catalog: &StyleCatalog) {
    for block in blocks {
        match block {
            Block::ListItem {
                depth,
                ordered,
                marker,
                ..
            } => {
                if catalog.list(*ordered, *depth).auto_numbers {
                    marker.clear();
                }
            }
            Block::Heading { level, content } => {
                if catalog.heading(*level).auto_numbers {
                    strip_section_number(content);
                }
            }
            _ => {}
        }
    }
}

/// Remove a manual section number ("1.", "2.3", "1.2.3.") from the start
/// of a heading. Only plain leading text is touched; if nothing but the
/// number remains the span is dropped.
fn strip_section_number(content: &mut Vec<Span>) {
    let Some(Span::Text(text)) = content.first() else {
        return;
    };
    let Some(rest) = section_number_suffix(text) else {
        return;
    };
    if rest.is_empty() {
        content.remove(0);
    } else {
        content[0] = Span::Text(rest);
    }
}

/// If `text` starts with a section number followed by whitespace, return
/// the remainder after both.
fn section_number_suffix(text: &str) -> Option<String> {
    let mut chars = text.char_indices().peekable();
    let mut saw_digit = false;

    loop {
        match chars.peek() {
            Some((_, c)) if c.is_ascii_digit() => {
                saw_digit = true;
                chars.next();
            }
            Some((_, '.')) if saw_digit => {
                chars.next();
                // A dot must be the end or lead into another digit group.
                match chars.peek() {
                    Some((_, c)) if c.is_ascii_digit() => saw_digit = false,
                    _ => break,
                }
            }
            _ => break,
        }
    }

    let end = chars.peek().map_or(text.len(), |(i, _)| *i);
    if end == 0 {
        return None;
    }

    let rest = &text[end..];
    if rest.is_empty() {
        // "1.2" alone is a heading that is nothing but a number.
        return Some(String::new());
    }
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start().to_string())
}
