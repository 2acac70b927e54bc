use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Conventional style names used to locate bindings in a template.
///
/// Built once at startup and passed explicitly to the catalog and builder;
/// a config file only needs to name the fields it overrides.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub styles: StylesConfig,
    pub lists: ListsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StylesConfig {
    /// Heading styles are looked up as `"<prefix> <level>"`.
    pub heading_prefix: String,
    pub body: String,
    pub code: String,
    pub table: String,
    /// Bullet list styles: `"<name>"` for depth 0, `"<name> <depth+1>"` deeper.
    pub bullet: String,
    pub number: String,
    pub bold: String,
    pub italic: String,
    pub inline_code: String,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            heading_prefix: "Heading".to_string(),
            body: "Normal".to_string(),
            code: "Code".to_string(),
            table: "Table Grid".to_string(),
            bullet: "List Bullet".to_string(),
            number: "List Number".to_string(),
            bold: "Strong".to_string(),
            italic: "Emphasis".to_string(),
            inline_code: "Code Char".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListsConfig {
    /// Distinct list depths to bind; deeper items clamp to the last one.
    pub depths: usize,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self { depths: 5 }
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}
