use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::warn;

use crate::config::Config;
use crate::template::Template;

/// Resolved style for one semantic role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBinding {
    /// `w:styleId` to reference from the document body.
    pub style_id: String,
    /// Whether the style carries built-in list numbering (`w:numPr`).
    pub auto_numbers: bool,
}

impl StyleBinding {
    fn fixed(style_id: &str) -> Self {
        Self {
            style_id: style_id.to_string(),
            auto_numbers: false,
        }
    }
}

/// Role-to-style mapping for one conversion run.
///
/// Built once from a template (or the built-in defaults) and read-only
/// afterwards; list depths beyond the deepest bound style are clamped.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    headings: Vec<StyleBinding>,
    bullet: Vec<StyleBinding>,
    number: Vec<StyleBinding>,
    body: StyleBinding,
    code: StyleBinding,
    table: StyleBinding,
    bold: StyleBinding,
    italic: StyleBinding,
    inline_code: StyleBinding,
}

impl StyleCatalog {
    /// The built-in binding set, matching the style ids of the default
    /// `styles.xml` the builder embeds when no template is supplied.
    pub fn default_bindings(config: &Config) -> Self {
        let depths = config.lists.depths.max(1);
        Self {
            headings: (1..=6)
                .map(|level| StyleBinding::fixed(&format!("Heading{level}")))
                .collect(),
            bullet: (0..depths)
                .map(|d| StyleBinding::fixed(&default_depth_id("ListBullet", d)))
                .collect(),
            number: (0..depths)
                .map(|d| StyleBinding::fixed(&default_depth_id("ListNumber", d)))
                .collect(),
            body: StyleBinding::fixed("Normal"),
            code: StyleBinding::fixed("Code"),
            table: StyleBinding::fixed("TableGrid"),
            bold: StyleBinding::fixed("Strong"),
            italic: StyleBinding::fixed("Emphasis"),
            inline_code: StyleBinding::fixed("CodeChar"),
        }
    }

    /// Bind roles against a template's style definitions.
    pub fn from_template(template: &Template, config: &Config) -> Self {
        Self::from_styles_xml(template.styles_xml(), config)
    }

    /// Bind roles against a raw `styles.xml` part. Unreadable XML degrades
    /// to the default bindings with a warning, never an error.
    pub fn from_styles_xml(xml: &[u8], config: &Config) -> Self {
        match scan_styles(xml) {
            Ok(styles) => Self::bind(&styles, config),
            Err(err) => {
                warn!(%err, "unreadable styles.xml, using default bindings");
                Self::default_bindings(config)
            }
        }
    }

    fn bind(styles: &[TemplateStyle], config: &Config) -> Self {
        let defaults = Self::default_bindings(config);
        let names = &config.styles;

        // Word stores built-in names lowercase ("heading 1"), so the
        // lookup ignores case.
        let find = |style_type: &str, name: &str| {
            styles
                .iter()
                .find(|s| s.style_type == style_type && s.name.eq_ignore_ascii_case(name))
                .map(TemplateStyle::binding)
        };

        Self {
            headings: (1..=6)
                .map(|level| {
                    find("paragraph", &format!("{} {level}", names.heading_prefix))
                        .unwrap_or_else(|| defaults.heading(level).clone())
                })
                .collect(),
            bullet: bind_depths(styles, &names.bullet, &defaults.bullet),
            number: bind_depths(styles, &names.number, &defaults.number),
            body: find("paragraph", &names.body).unwrap_or(defaults.body),
            code: find("paragraph", &names.code).unwrap_or(defaults.code),
            table: find("table", &names.table).unwrap_or(defaults.table),
            bold: find("character", &names.bold).unwrap_or(defaults.bold),
            italic: find("character", &names.italic).unwrap_or(defaults.italic),
            inline_code: find("character", &names.inline_code).unwrap_or(defaults.inline_code),
        }
    }

    pub fn heading(&self, level: u8) -> &StyleBinding {
        &self.headings[(level.clamp(1, 6) - 1) as usize]
    }

    pub fn list(&self, ordered: bool, depth: usize) -> &StyleBinding {
        let bindings = if ordered { &self.number } else { &self.bullet };
        &bindings[depth.min(bindings.len() - 1)]
    }

    pub fn body(&self) -> &StyleBinding {
        &self.body
    }

    pub fn code(&self) -> &StyleBinding {
        &self.code
    }

    pub fn table(&self) -> &StyleBinding {
        &self.table
    }

    pub fn bold(&self) -> &StyleBinding {
        &self.bold
    }

    pub fn italic(&self) -> &StyleBinding {
        &self.italic
    }

    pub fn inline_code(&self) -> &StyleBinding {
        &self.inline_code
    }
}

fn default_depth_id(base: &str, depth: usize) -> String {
    if depth == 0 {
        base.to_string()
    } else {
        format!("{base}{}", depth + 1)
    }
}

/// Per-depth list bindings: "List Bullet", "List Bullet 2", ... Depths the
/// template does not define reuse its deepest defined style; a template
/// without the base name falls back to the defaults per depth.
fn bind_depths(
    styles: &[TemplateStyle],
    base_name: &str,
    defaults: &[StyleBinding],
) -> Vec<StyleBinding> {
    let found: Vec<Option<StyleBinding>> = (0..defaults.len())
        .map(|depth| {
            let name = if depth == 0 {
                base_name.to_string()
            } else {
                format!("{base_name} {}", depth + 1)
            };
            styles
                .iter()
                .find(|s| s.style_type == "paragraph" && s.name.eq_ignore_ascii_case(&name))
                .map(TemplateStyle::binding)
        })
        .collect();

    let deepest = found.iter().rposition(Option::is_some);

    found
        .iter()
        .enumerate()
        .map(|(depth, binding)| match (binding, deepest) {
            (Some(b), _) => b.clone(),
            (None, Some(max)) if depth > max => match &found[max] {
                Some(b) => b.clone(),
                None => defaults[depth].clone(),
            },
            _ => defaults[depth].clone(),
        })
        .collect()
}

struct TemplateStyle {
    style_type: String,
    style_id: String,
    name: String,
    numbered: bool,
}

impl TemplateStyle {
    fn binding(&self) -> StyleBinding {
        StyleBinding {
            style_id: self.style_id.clone(),
            auto_numbers: self.numbered,
        }
    }
}

#[derive(Default)]
struct StyleScan {
    style_type: String,
    style_id: String,
    name: String,
    numbered: bool,
}

fn scan_styles(xml: &[u8]) -> Result<Vec<TemplateStyle>, quick_xml::Error> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut styles = Vec::new();
    let mut current: Option<StyleScan> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"style" => {
                let mut scan = StyleScan::default();
                for attr in e.attributes().flatten() {
                    match attr.key.local_name().as_ref() {
                        b"type" => {
                            if let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) {
                                scan.style_type = value.to_string();
                            }
                        }
                        b"styleId" => {
                            if let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) {
                                scan.style_id = value.to_string();
                            }
                        }
                        _ => {}
                    }
                }
                current = Some(scan);
            }
            Event::Start(e) | Event::Empty(e) => {
                if let Some(scan) = current.as_mut() {
                    match e.local_name().as_ref() {
                        b"name" => {
                            for attr in e.attributes().flatten() {
                                if attr.key.local_name().as_ref() == b"val"
                                    && let Ok(value) =
                                        attr.decode_and_unescape_value(reader.decoder())
                                {
                                    scan.name = value.to_string();
                                }
                            }
                        }
                        b"numPr" => scan.numbered = true,
                        _ => {}
                    }
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"style" => {
                if let Some(scan) = current.take()
                    && !scan.style_id.is_empty()
                {
                    styles.push(TemplateStyle {
                        style_type: scan.style_type,
                        style_id: scan.style_id,
                        name: scan.name,
                        numbered: scan.numbered,
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(styles)
}
