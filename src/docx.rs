use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

use crate::block::{Block, Span};
use crate::error::ConvertError;
use crate::styles::StyleCatalog;
use crate::template::Template;

/// Build a complete `.docx` package from the resolved block sequence.
///
/// Returns the package bytes; nothing is written to disk here, so a failed
/// build never leaves a partial document behind.
pub fn build(
    blocks: &[Block],
    catalog: &StyleCatalog,
    template: Option<&Template>,
) -> Result<Vec<u8>, ConvertError> {
    let mut document = String::with_capacity(4096);
    document.push_str(DOCUMENT_PRE);
    body_xml(blocks, catalog, &mut document);
    document.push_str(SECT_PR);
    document.push_str(DOCUMENT_POST);
    package(&document, template)
}

const DOCUMENT_PRE: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
    "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\" ",
    "xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\"><w:body>",
);
const SECT_PR: &str = concat!(
    "<w:sectPr><w:pgSz w:w=\"11906\" w:h=\"16838\"/>",
    "<w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\" ",
    "w:header=\"708\" w:footer=\"708\" w:gutter=\"0\"/></w:sectPr>",
);
const DOCUMENT_POST: &str = "</w:body></w:document>";

/// Emit the body: one paragraph per block, consecutive table rows grouped
/// into a single table element.
fn body_xml(blocks: &[Block], catalog: &StyleCatalog, out: &mut String) {
    let mut i = 0;
    while i < blocks.len() {
        if matches!(blocks[i], Block::TableRow { .. }) {
            let end = i + blocks[i..]
                .iter()
                .take_while(|b| matches!(b, Block::TableRow { .. }))
                .count();
            emit_table(&blocks[i..end], catalog, out);
            i = end;
        } else {
            emit_block(&blocks[i], catalog, out);
            i += 1;
        }
    }
}

fn emit_block(block: &Block, catalog: &StyleCatalog, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            emit_paragraph(&catalog.heading(*level).style_id, content, catalog, out);
        }
        Block::Paragraph { content } => {
            emit_paragraph(&catalog.body().style_id, content, catalog, out);
        }
        Block::ListItem {
            depth,
            ordered,
            content,
            marker,
        } => {
            let style_id = &catalog.list(*ordered, *depth).style_id;
            open_paragraph(style_id, out);
            // The literal marker survives only when the bound style does
            // not number the item itself.
            if !marker.is_empty() {
                emit_run(None, &format!("{marker} "), out);
            }
            for span in content {
                emit_span(span, catalog, out);
            }
            out.push_str("</w:p>");
        }
        Block::CodeBlock { lines, .. } => {
            let style_id = &catalog.code().style_id;
            for line in lines {
                open_paragraph(style_id, out);
                if !line.is_empty() {
                    emit_run(None, line, out);
                }
                out.push_str("</w:p>");
            }
        }
        Block::Rule => {
            out.push_str("<w:p><w:pPr><w:pStyle w:val=\"");
            escape_into(&catalog.body().style_id, out);
            out.push_str(concat!(
                "\"/><w:pBdr><w:bottom w:val=\"single\" w:sz=\"6\" ",
                "w:space=\"1\" w:color=\"auto\"/></w:pBdr></w:pPr></w:p>",
            ));
        }
        Block::Blank => {}
        // Grouped by the caller.
        Block::TableRow { .. } => {}
    }
}

fn open_paragraph(style_id: &str, out: &mut String) {
    out.push_str("<w:p><w:pPr><w:pStyle w:val=\"");
    escape_into(style_id, out);
    out.push_str("\"/></w:pPr>");
}

fn emit_paragraph(style_id: &str, spans: &[Span], catalog: &StyleCatalog, out: &mut String) {
    open_paragraph(style_id, out);
    for span in spans {
        emit_span(span, catalog, out);
    }
    out.push_str("</w:p>");
}

fn emit_span(span: &Span, catalog: &StyleCatalog, out: &mut String) {
    match span {
        Span::Text(text) => emit_run(None, text, out),
        Span::Bold(text) => {
            let props = format!(
                "<w:rStyle w:val=\"{}\"/><w:b/>",
                escaped(&catalog.bold().style_id)
            );
            emit_run(Some(&props), text, out);
        }
        Span::Italic(text) => {
            let props = format!(
                "<w:rStyle w:val=\"{}\"/><w:i/>",
                escaped(&catalog.italic().style_id)
            );
            emit_run(Some(&props), text, out);
        }
        Span::Code(text) => {
            let props = format!(
                "<w:rStyle w:val=\"{}\"/>",
                escaped(&catalog.inline_code().style_id)
            );
            emit_run(Some(&props), text, out);
        }
        Span::LineBreak => out.push_str("<w:r><w:br/></w:r>"),
    }
}

fn emit_run(props: Option<&str>, text: &str, out: &mut String) {
    out.push_str("<w:r>");
    if let Some(props) = props {
        out.push_str("<w:rPr>");
        out.push_str(props);
        out.push_str("</w:rPr>");
    }
    out.push_str("<w:t xml:space=\"preserve\">");
    escape_into(text, out);
    out.push_str("</w:t></w:r>");
}

fn emit_table(rows: &[Block], catalog: &StyleCatalog, out: &mut String) {
    let cols = rows
        .iter()
        .map(|row| match row {
            Block::TableRow { cells, .. } => cells.len(),
            _ => 0,
        })
        .max()
        .unwrap_or(0);
    if cols == 0 {
        return;
    }

    out.push_str("<w:tbl><w:tblPr><w:tblStyle w:val=\"");
    escape_into(&catalog.table().style_id, out);
    out.push_str("\"/><w:tblW w:w=\"0\" w:type=\"auto\"/></w:tblPr>");

    for row in rows {
        let Block::TableRow { cells, header } = row else {
            continue;
        };
        out.push_str("<w:tr>");
        for col in 0..cols {
            out.push_str("<w:tc>");
            match cells.get(col) {
                Some(spans) if !spans.is_empty() => {
                    open_paragraph(&catalog.body().style_id, out);
                    for span in spans {
                        emit_cell_span(span, *header, catalog, out);
                    }
                    out.push_str("</w:p>");
                }
                // Short rows pad with empty trailing cells.
                _ => out.push_str("<w:p/>"),
            }
            out.push_str("</w:tc>");
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
}

fn emit_cell_span(span: &Span, header: bool, catalog: &StyleCatalog, out: &mut String) {
    // Header cells take the bold character style for their plain runs.
    if header && let Span::Text(text) = span {
        let props = format!(
            "<w:rStyle w:val=\"{}\"/><w:b/>",
            escaped(&catalog.bold().style_id)
        );
        emit_run(Some(&props), text, out);
    } else {
        emit_span(span, catalog, out);
    }
}

fn escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
}

/// Package part metadata: zip name, content type, relationship type, and
/// relationship target relative to `word/`.
const PART_INFO: &[(&str, &str, &str, &str)] = &[
    (
        "word/styles.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles",
        "styles.xml",
    ),
    (
        "word/numbering.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering",
        "numbering.xml",
    ),
    (
        "word/fontTable.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.fontTable+xml",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/fontTable",
        "fontTable.xml",
    ),
    (
        "word/theme/theme1.xml",
        "application/vnd.openxmlformats-officedocument.theme+xml",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme",
        "theme/theme1.xml",
    ),
];

fn package(document: &str, template: Option<&Template>) -> Result<Vec<u8>, ConvertError> {
    let carried: Vec<(&str, &[u8])> = match template {
        Some(t) => t.carried().collect(),
        None => vec![("word/styles.xml", DEFAULT_STYLES.as_bytes())],
    };
    let part_names: Vec<&str> = carried.iter().map(|(name, _)| *name).collect();

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    // Fixed timestamps keep repeated conversions byte-identical.
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut write_part = |zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, bytes: &[u8]| {
        zip.start_file(name, options)
            .map_err(|e| ConvertError::Build(e.to_string()))?;
        zip.write_all(bytes)
            .map_err(|e| ConvertError::Build(e.to_string()))
    };

    write_part(
        &mut zip,
        "[Content_Types].xml",
        content_types(&part_names).as_bytes(),
    )?;
    write_part(&mut zip, "_rels/.rels", ROOT_RELS.as_bytes())?;
    write_part(&mut zip, "word/document.xml", document.as_bytes())?;
    write_part(
        &mut zip,
        "word/_rels/document.xml.rels",
        document_rels(&part_names).as_bytes(),
    )?;
    for (name, bytes) in &carried {
        write_part(&mut zip, name, bytes)?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| ConvertError::Build(e.to_string()))?;
    Ok(cursor.into_inner())
}

fn content_types(part_names: &[&str]) -> String {
    let mut out = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
        "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
        "<Default Extension=\"rels\" ",
        "ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
        "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
        "<Override PartName=\"/word/document.xml\" ContentType=",
        "\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>",
    ));
    for (name, content_type, _, _) in PART_INFO {
        if part_names.contains(name) {
            out.push_str(&format!(
                "<Override PartName=\"/{name}\" ContentType=\"{content_type}\"/>"
            ));
        }
    }
    out.push_str("</Types>");
    out
}

const ROOT_RELS: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=",
    "\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" ",
    "Target=\"word/document.xml\"/></Relationships>",
);

fn document_rels(part_names: &[&str]) -> String {
    let mut out = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    ));
    let mut rid = 0;
    for (name, _, rel_type, target) in PART_INFO {
        if part_names.contains(name) {
            rid += 1;
            out.push_str(&format!(
                "<Relationship Id=\"rId{rid}\" Type=\"{rel_type}\" Target=\"{target}\"/>"
            ));
        }
    }
    out.push_str("</Relationships>");
    out
}

/// Style definitions embedded when no template is supplied. The style ids
/// match `StyleCatalog::default_bindings`; none of the list styles carry
/// numbering, so literal source markers are rendered as-is.
const DEFAULT_STYLES: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
    "<w:styles xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">",
    "<w:docDefaults><w:rPrDefault><w:rPr>",
    "<w:rFonts w:ascii=\"Calibri\" w:hAnsi=\"Calibri\"/><w:sz w:val=\"22\"/>",
    "</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>",
    "<w:spacing w:after=\"160\" w:line=\"259\" w:lineRule=\"auto\"/>",
    "</w:pPr></w:pPrDefault></w:docDefaults>",
    "<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\">",
    "<w:name w:val=\"Normal\"/><w:qFormat/></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"Heading1\"><w:name w:val=\"heading 1\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:next w:val=\"Normal\"/>",
    "<w:pPr><w:keepNext/><w:spacing w:before=\"240\" w:after=\"120\"/><w:outlineLvl w:val=\"0\"/></w:pPr>",
    "<w:rPr><w:b/><w:sz w:val=\"32\"/></w:rPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"Heading2\"><w:name w:val=\"heading 2\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:next w:val=\"Normal\"/>",
    "<w:pPr><w:keepNext/><w:spacing w:before=\"200\" w:after=\"100\"/><w:outlineLvl w:val=\"1\"/></w:pPr>",
    "<w:rPr><w:b/><w:sz w:val=\"28\"/></w:rPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"Heading3\"><w:name w:val=\"heading 3\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:next w:val=\"Normal\"/>",
    "<w:pPr><w:keepNext/><w:spacing w:before=\"160\" w:after=\"80\"/><w:outlineLvl w:val=\"2\"/></w:pPr>",
    "<w:rPr><w:b/><w:sz w:val=\"26\"/></w:rPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"Heading4\"><w:name w:val=\"heading 4\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:next w:val=\"Normal\"/>",
    "<w:pPr><w:keepNext/><w:spacing w:before=\"140\" w:after=\"70\"/><w:outlineLvl w:val=\"3\"/></w:pPr>",
    "<w:rPr><w:b/><w:sz w:val=\"24\"/></w:rPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"Heading5\"><w:name w:val=\"heading 5\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:next w:val=\"Normal\"/>",
    "<w:pPr><w:keepNext/><w:spacing w:before=\"120\" w:after=\"60\"/><w:outlineLvl w:val=\"4\"/></w:pPr>",
    "<w:rPr><w:b/><w:sz w:val=\"22\"/></w:rPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"Heading6\"><w:name w:val=\"heading 6\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:next w:val=\"Normal\"/>",
    "<w:pPr><w:keepNext/><w:spacing w:before=\"120\" w:after=\"60\"/><w:outlineLvl w:val=\"5\"/></w:pPr>",
    "<w:rPr><w:b/><w:i/><w:sz w:val=\"22\"/></w:rPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"ListBullet\"><w:name w:val=\"List Bullet\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:pPr><w:ind w:left=\"360\"/></w:pPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"ListBullet2\"><w:name w:val=\"List Bullet 2\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:pPr><w:ind w:left=\"720\"/></w:pPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"ListBullet3\"><w:name w:val=\"List Bullet 3\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:pPr><w:ind w:left=\"1080\"/></w:pPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"ListBullet4\"><w:name w:val=\"List Bullet 4\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:pPr><w:ind w:left=\"1440\"/></w:pPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"ListBullet5\"><w:name w:val=\"List Bullet 5\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:pPr><w:ind w:left=\"1800\"/></w:pPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"ListNumber\"><w:name w:val=\"List Number\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:pPr><w:ind w:left=\"360\"/></w:pPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"ListNumber2\"><w:name w:val=\"List Number 2\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:pPr><w:ind w:left=\"720\"/></w:pPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"ListNumber3\"><w:name w:val=\"List Number 3\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:pPr><w:ind w:left=\"1080\"/></w:pPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"ListNumber4\"><w:name w:val=\"List Number 4\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:pPr><w:ind w:left=\"1440\"/></w:pPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"ListNumber5\"><w:name w:val=\"List Number 5\"/>",
    "<w:basedOn w:val=\"Normal\"/><w:pPr><w:ind w:left=\"1800\"/></w:pPr></w:style>",
    "<w:style w:type=\"paragraph\" w:styleId=\"Code\"><w:name w:val=\"Code\"/>",
    "<w:basedOn w:val=\"Normal\"/>",
    "<w:pPr><w:spacing w:after=\"0\"/>",
    "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"F0F0F0\"/></w:pPr>",
    "<w:rPr><w:rFonts w:ascii=\"Consolas\" w:hAnsi=\"Consolas\"/><w:sz w:val=\"20\"/></w:rPr>",
    "</w:style>",
    "<w:style w:type=\"character\" w:styleId=\"Strong\"><w:name w:val=\"Strong\"/>",
    "<w:rPr><w:b/></w:rPr></w:style>",
    "<w:style w:type=\"character\" w:styleId=\"Emphasis\"><w:name w:val=\"Emphasis\"/>",
    "<w:rPr><w:i/></w:rPr></w:style>",
    "<w:style w:type=\"character\" w:styleId=\"CodeChar\"><w:name w:val=\"Code Char\"/>",
    "<w:rPr><w:rFonts w:ascii=\"Consolas\" w:hAnsi=\"Consolas\"/><w:sz w:val=\"20\"/></w:rPr>",
    "</w:style>",
    "<w:style w:type=\"table\" w:styleId=\"TableGrid\"><w:name w:val=\"Table Grid\"/>",
    "<w:tblPr><w:tblBorders>",
    "<w:top w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
    "<w:left w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
    "<w:bottom w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
    "<w:right w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
    "<w:insideH w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
    "<w:insideV w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
    "</w:tblBorders></w:tblPr></w:style>",
    "</w:styles>",
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::numbering;
    use crate::parser;

    fn default_catalog() -> StyleCatalog {
        StyleCatalog::default_bindings(&Config::default())
    }

    fn body(markdown: &str) -> String {
        let blocks = parser::parse(markdown);
        let mut out = String::new();
        body_xml(&blocks, &default_catalog(), &mut out);
        out
    }

    #[test]
    fn heading_paragraph_takes_heading_style() {
        let out = body("## Title");
        assert!(out.contains("<w:pStyle w:val=\"Heading2\"/>"));
        assert!(out.contains("<w:t xml:space=\"preserve\">Title</w:t>"));
    }

    #[test]
    fn soft_break_renders_inside_one_paragraph() {
        let out = body("one  \ntwo");
        assert_eq!(out.matches("<w:p>").count(), 1);
        assert!(out.contains("<w:br/>"));
    }

    #[test]
    fn code_block_is_one_paragraph_per_line() {
        let out = body("```\nfirst\nsecond\n```");
        assert_eq!(out.matches("<w:pStyle w:val=\"Code\"/>").count(), 2);
        // Raw lines render literally, no inline interpretation.
        let out = body("```\n**not bold**\n```");
        assert!(out.contains("<w:t xml:space=\"preserve\">**not bold**</w:t>"));
        assert!(!out.contains("<w:b/>"));
    }

    #[test]
    fn default_bindings_render_literal_markers() {
        let out = body("- item\n\n3. third");
        assert!(out.contains("<w:t xml:space=\"preserve\">- </w:t>"));
        assert!(out.contains("<w:t xml:space=\"preserve\">3. </w:t>"));
        assert!(out.contains("<w:pStyle w:val=\"ListBullet\"/>"));
        assert!(out.contains("<w:pStyle w:val=\"ListNumber\"/>"));
    }

    #[test]
    fn bold_italic_code_runs_carry_formatting() {
        let out = body("**b** *i* `c`");
        assert!(out.contains("<w:rStyle w:val=\"Strong\"/><w:b/>"));
        assert!(out.contains("<w:rStyle w:val=\"Emphasis\"/><w:i/>"));
        assert!(out.contains("<w:rStyle w:val=\"CodeChar\"/>"));
    }

    #[test]
    fn text_is_xml_escaped() {
        let out = body("a < b & c");
        assert!(out.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn short_table_rows_pad_to_max_columns() {
        let out = body("| A | B | C |\n|---|---|---|\n| 1 | 2 |");
        assert_eq!(out.matches("<w:tbl>").count(), 1);
        assert_eq!(out.matches("<w:tr>").count(), 2);
        // 3 header cells + 2 data cells + 1 padded empty cell.
        assert_eq!(out.matches("<w:tc>").count(), 6);
        assert_eq!(out.matches("<w:p/>").count(), 1);
    }

    #[test]
    fn header_cells_take_bold_character_style() {
        let out = body("| Head |\n|---|\n| data |");
        assert!(out.contains("<w:rStyle w:val=\"Strong\"/><w:b/>"));
    }

    #[test]
    fn auto_numbering_list_style_suppresses_markers() {
        let styles_xml = br#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:style w:type="paragraph" w:styleId="Bullets">
              <w:name w:val="List Bullet"/>
              <w:pPr><w:numPr><w:numId w:val="1"/></w:numPr></w:pPr>
            </w:style>
        </w:styles>"#;
        let catalog = StyleCatalog::from_styles_xml(styles_xml, &Config::default());

        let mut blocks = parser::parse("# Title\n\n- a\n  - b\n- c\n");
        numbering::resolve(&mut blocks, &catalog);

        let mut out = String::new();
        body_xml(&blocks, &catalog, &mut out);

        assert_eq!(out.matches("<w:pStyle w:val=\"Bullets\"/>").count(), 3);
        assert!(!out.contains("- "), "literal bullet leaked into: {out}");
    }

    #[test]
    fn rule_renders_as_bordered_paragraph() {
        let out = body("---");
        assert!(out.contains("<w:pBdr>"));
    }

    #[test]
    fn default_package_has_expected_parts() {
        let blocks = parser::parse("# Hi\n\ntext");
        let bytes = build(&blocks, &default_catalog(), None).unwrap();
        assert!(bytes.starts_with(b"PK"));

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "word/document.xml",
                "word/_rels/document.xml.rels",
                "word/styles.xml",
            ]
        );
    }

    #[test]
    fn build_is_deterministic() {
        let blocks = parser::parse("# Hi\n\n- a\n- b");
        let catalog = default_catalog();
        let first = build(&blocks, &catalog, None).unwrap();
        let second = build(&blocks, &catalog, None).unwrap();
        assert_eq!(first, second);
    }

}
