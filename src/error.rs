use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("input not found: {0}")]
    InputNotFound(PathBuf),

    #[error("cannot read {path}: {source}")]
    UnreadableInput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Recoverable: the caller falls back to the default bindings.
    #[error("template load failed for {path}: {reason}")]
    TemplateLoadFailed { path: PathBuf, reason: String },

    #[error("cannot write {path}: {source}")]
    OutputWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("document assembly failed: {0}")]
    Build(String),
}

/// Outcome of converting one input file.
#[derive(Debug)]
pub struct ConversionResult {
    pub input: PathBuf,
    pub outcome: Result<PathBuf, ConvertError>,
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
