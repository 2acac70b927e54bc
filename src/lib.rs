mod block;
mod config;
mod docx;
mod error;
mod inline;
mod numbering;
mod parser;
mod styles;
mod template;

pub use block::{Block, Span};
pub use config::Config;
pub use error::{ConversionResult, ConvertError};
pub use styles::{StyleBinding, StyleCatalog};
pub use template::Template;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown to `.docx` package bytes.
pub fn markdown_to_docx(
    markdown: &str,
    catalog: &StyleCatalog,
    template: Option<&Template>,
) -> Result<Vec<u8>, ConvertError> {
    let mut blocks = parse(markdown);
    numbering::resolve(&mut blocks, catalog);
    docx::build(&blocks, catalog, template)
}

/// Convert one markdown file, loading the template (if any) for this call.
/// `output` names the destination file itself; when `None` the document
/// lands next to the input.
pub fn convert(
    input: &Path,
    output: Option<&Path>,
    template_path: Option<&Path>,
    config: &Config,
) -> ConversionResult {
    let (template, catalog) = load_template(template_path, config);
    convert_with(input, output, template.as_ref(), &catalog)
}

/// Convert one markdown file against an already-loaded template and catalog.
pub fn convert_with(
    input: &Path,
    output: Option<&Path>,
    template: Option<&Template>,
    catalog: &StyleCatalog,
) -> ConversionResult {
    ConversionResult {
        input: input.to_path_buf(),
        outcome: convert_inner(input, output, template, catalog),
    }
}

/// Convert every `.md` file directly inside `dir`, in name order.
///
/// The template and catalog are loaded once and shared; files convert in
/// parallel and one failure never stops the others.
pub fn convert_dir(
    dir: &Path,
    out_dir: Option<&Path>,
    template_path: Option<&Path>,
    config: &Config,
) -> Vec<ConversionResult> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(source) => {
            return vec![ConversionResult {
                input: dir.to_path_buf(),
                outcome: Err(ConvertError::UnreadableInput {
                    path: dir.to_path_buf(),
                    source,
                }),
            }];
        }
    };

    let mut inputs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| is_markdown(path) && path.is_file())
        .collect();
    inputs.sort();
    debug!(count = inputs.len(), dir = %dir.display(), "converting directory");

    let (template, catalog) = load_template(template_path, config);

    inputs
        .par_iter()
        .map(|input| {
            let output = out_dir.map(|d| docx_name(d, input));
            convert_with(input, output.as_deref(), template.as_ref(), &catalog)
        })
        .collect()
}

fn convert_inner(
    input: &Path,
    output: Option<&Path>,
    template: Option<&Template>,
    catalog: &StyleCatalog,
) -> Result<PathBuf, ConvertError> {
    let markdown = fs::read_to_string(input).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ConvertError::InputNotFound(input.to_path_buf())
        } else {
            ConvertError::UnreadableInput {
                path: input.to_path_buf(),
                source,
            }
        }
    })?;

    let bytes = markdown_to_docx(&markdown, catalog, template)?;

    // Build fully before touching the filesystem so a failed conversion
    // leaves no partial output.
    let output = resolve_output(input, output);
    fs::write(&output, &bytes).map_err(|source| ConvertError::OutputWriteFailed {
        path: output.clone(),
        source,
    })?;
    Ok(output)
}

fn load_template(path: Option<&Path>, config: &Config) -> (Option<Template>, StyleCatalog) {
    match path {
        Some(path) => match Template::open(path) {
            Ok(template) => {
                let catalog = StyleCatalog::from_template(&template, config);
                (Some(template), catalog)
            }
            Err(err) => {
                warn!(%err, "falling back to built-in styles");
                (None, StyleCatalog::default_bindings(config))
            }
        },
        None => (None, StyleCatalog::default_bindings(config)),
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

fn docx_name(dir: &Path, input: &Path) -> PathBuf {
    dir.join(input.file_name().unwrap_or_default())
        .with_extension("docx")
}

/// A supplied output is the exact destination; only a missing one is
/// derived from the input. Writing to an occupied path fails rather than
/// redirecting.
fn resolve_output(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension("docx"),
    }
}
