use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::error::ConvertError;

/// Template parts that are carried verbatim into every converted document,
/// in the order they are written to the output package.
const CARRIED_PARTS: &[&str] = &[
    "word/styles.xml",
    "word/numbering.xml",
    "word/fontTable.xml",
    "word/theme/theme1.xml",
];

/// A Word template package, reduced to the parts the converter needs:
/// the style definitions and their supporting parts.
///
/// Loaded once per run and shared read-only across file conversions.
pub struct Template {
    parts: HashMap<String, Vec<u8>>,
}

impl Template {
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let load_failed = |reason: String| ConvertError::TemplateLoadFailed {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| load_failed(e.to_string()))?;
        let mut archive = ZipArchive::new(file).map_err(|e| load_failed(e.to_string()))?;

        let mut parts = HashMap::new();
        for &name in CARRIED_PARTS {
            if let Ok(mut entry) = archive.by_name(name) {
                let mut buf = Vec::new();
                entry
                    .read_to_end(&mut buf)
                    .map_err(|e| load_failed(format!("{name}: {e}")))?;
                parts.insert(name.to_string(), buf);
            }
        }

        if !parts.contains_key("word/styles.xml") {
            return Err(load_failed("no word/styles.xml part".to_string()));
        }

        Ok(Self { parts })
    }

    pub fn styles_xml(&self) -> &[u8] {
        // Presence checked in `open`.
        &self.parts["word/styles.xml"]
    }

    /// Carried parts in deterministic package order.
    pub fn carried(&self) -> impl Iterator<Item = (&'static str, &[u8])> {
        CARRIED_PARTS
            .iter()
            .filter_map(|&name| self.parts.get(name).map(|bytes| (name, bytes.as_slice())))
    }
}
