use crate::block::{Block, Span};
use crate::inline;

/// Parse markdown text into a list of blocks.
///
/// Single forward pass, line oriented. Malformed constructs degrade rather
/// than fail: an unterminated code fence runs to end of input, a table row
/// with a missing separator stays a paragraph line.
pub fn parse(markdown: &str) -> Vec<Block> {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut blocks = Vec::new();
    let mut para = ParagraphBuf::default();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if trimmed.is_empty() {
            para.flush_into(&mut blocks);
            blocks.push(Block::Blank);
            i += 1;
            continue;
        }

        // A soft break glues the next line into the open paragraph before
        // any block classification; soft breaks never start a new block.
        if para.pending_break() {
            para.push_line(line);
            i += 1;
            continue;
        }

        if let Some(language) = fence(trimmed) {
            para.flush_into(&mut blocks);
            let (block, next) = collect_code_block(&lines, i + 1, language);
            blocks.push(block);
            i = next;
            continue;
        }

        if let Some((level, text)) = heading(trimmed) {
            para.flush_into(&mut blocks);
            blocks.push(Block::Heading {
                level,
                content: inline::parse_spans(text),
            });
            i += 1;
            continue;
        }

        if is_rule(trimmed) {
            para.flush_into(&mut blocks);
            blocks.push(Block::Rule);
            i += 1;
            continue;
        }

        if let Some((depth, ordered, marker, text)) = list_item(line) {
            para.flush_into(&mut blocks);
            blocks.push(Block::ListItem {
                depth,
                ordered,
                content: inline::parse_spans(text),
                marker,
            });
            i += 1;
            continue;
        }

        if line.contains('|') && lines.get(i + 1).is_some_and(|next| is_separator(next)) {
            para.flush_into(&mut blocks);
            let next = collect_table(&lines, i, &mut blocks);
            i = next;
            continue;
        }

        para.push_line(line);
        i += 1;
    }

    para.flush_into(&mut blocks);
    blocks
}

/// Open paragraph accumulator. Lines between explicit breaks are joined
/// with single spaces and inline-parsed as one chunk at flush time.
#[derive(Default)]
struct ParagraphBuf {
    chunks: Vec<String>,
    current: String,
    pending_break: bool,
}

impl ParagraphBuf {
    fn pending_break(&self) -> bool {
        self.pending_break
    }

    fn push_line(&mut self, line: &str) {
        let (text, soft_break) = strip_soft_break(line);
        if !self.current.is_empty() {
            self.current.push(' ');
        }
        self.current.push_str(text.trim());
        self.pending_break = soft_break;
        if soft_break {
            self.chunks.push(std::mem::take(&mut self.current));
        }
    }

    fn flush_into(&mut self, blocks: &mut Vec<Block>) {
        if !self.current.is_empty() {
            self.chunks.push(std::mem::take(&mut self.current));
        }
        self.pending_break = false;
        if self.chunks.is_empty() {
            return;
        }
        let mut content = Vec::new();
        for (n, chunk) in self.chunks.drain(..).enumerate() {
            if n > 0 {
                content.push(Span::LineBreak);
            }
            content.extend(inline::parse_spans(&chunk));
        }
        if !content.is_empty() {
            blocks.push(Block::Paragraph { content });
        }
    }
}

/// Trailing `  ` or a lone trailing `\` marks a soft line break.
fn strip_soft_break(line: &str) -> (&str, bool) {
    if line.ends_with("  ") {
        return (line.trim_end(), true);
    }
    let trimmed = line.trim_end();
    if trimmed.ends_with('\\') && !trimmed.ends_with("\\\\") {
        return (&trimmed[..trimmed.len() - 1], true);
    }
    (trimmed, false)
}

/// `#{1,}` followed by a space; level caps at 6, trailing `#` runs stripped.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?;
    let level = hashes.min(6) as u8;
    let text = text.trim_end().trim_end_matches('#').trim_end();
    Some((level, text))
}

/// `- ` or `digits.` + space after leading indentation. Only `-` is a
/// bullet marker; `*` and `+` are left to the paragraph path.
fn list_item(line: &str) -> Option<(usize, bool, String, &str)> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    let rest = &line[indent..];
    let depth = indent / 2;

    if let Some(text) = rest.strip_prefix("- ") {
        return Some((depth, false, "-".to_string(), text.trim()));
    }

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0
        && let Some(after_dot) = rest[digits..].strip_prefix('.')
        && let Some(text) = after_dot.strip_prefix(' ')
    {
        return Some((depth, true, rest[..digits + 1].to_string(), text.trim()));
    }

    None
}

/// A fence line carries a backtick run of exactly three, with an optional
/// language token after it.
fn fence(trimmed: &str) -> Option<Option<String>> {
    let rest = trimmed.strip_prefix("```")?;
    if rest.starts_with('`') {
        return None;
    }
    let language = rest.split_whitespace().next().map(str::to_string);
    Some(language)
}

fn collect_code_block(lines: &[&str], mut i: usize, language: Option<String>) -> (Block, usize) {
    let mut raw = Vec::new();
    while i < lines.len() {
        if fence(lines[i].trim()).is_some() {
            // Closing fence is consumed without becoming content.
            return (
                Block::CodeBlock {
                    language,
                    lines: raw,
                },
                i + 1,
            );
        }
        raw.push(lines[i].to_string());
        i += 1;
    }
    // Unterminated fence: everything to end of input is code.
    (
        Block::CodeBlock {
            language,
            lines: raw,
        },
        i,
    )
}

/// Three or more of `-`, `_`, `*` and nothing else.
fn is_rule(trimmed: &str) -> bool {
    trimmed.len() >= 3 && trimmed.chars().all(|c| matches!(c, '-' | '_' | '*'))
}

/// Header/body delimiter row: `-`, `|`, `:` and whitespace only, with at
/// least one dash.
fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '-' | '|' | ':') || c.is_whitespace())
}

fn collect_table(lines: &[&str], start: usize, blocks: &mut Vec<Block>) -> usize {
    blocks.push(Block::TableRow {
        cells: split_cells(lines[start]),
        header: true,
    });

    // Skip the separator row.
    let mut i = start + 2;
    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() || !line.contains('|') {
            break;
        }
        blocks.push(Block::TableRow {
            cells: split_cells(line),
            header: false,
        });
        i += 1;
    }
    i
}

fn split_cells(line: &str) -> Vec<Vec<Span>> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed
        .split('|')
        .map(|cell| inline::parse_spans(cell.trim()))
        .collect()
}
