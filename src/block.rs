/// Inline text spans with formatting.
///
/// Spans are flat: emphasis does not nest, each delimiter pair produces
/// exactly one span, and adjacent spans of the same kind are kept separate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    /// Explicit soft line break inside a paragraph (trailing `  ` or `\`).
    LineBreak,
}

impl Span {
    /// Plain text content of the span, empty for breaks.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(t) | Span::Bold(t) | Span::Italic(t) | Span::Code(t) => t,
            Span::LineBreak => "",
        }
    }
}

/// Block-level elements parsed from Markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        /// Always 1..=6; deeper sources clamp to 6.
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    ListItem {
        /// Nesting depth: one level per two leading spaces.
        depth: usize,
        ordered: bool,
        content: Vec<Span>,
        /// Literal marker text from the source (`"-"`, `"3."`). Cleared by
        /// the numbering resolver when the bound style auto-numbers.
        marker: String,
    },
    CodeBlock {
        language: Option<String>,
        /// Raw lines, verbatim, no inline parsing.
        lines: Vec<String>,
    },
    TableRow {
        cells: Vec<Vec<Span>>,
        header: bool,
    },
    /// Thematic break (`---`).
    Rule,
    /// Blank-line separator; carries no content and is never rendered.
    Blank,
}
