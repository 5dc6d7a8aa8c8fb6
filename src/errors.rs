// ABOUTME: Error types for the revealprez application
// ABOUTME: Provides structured error handling for each stage of the build pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrezError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to fetch remote resource: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Got {status} for {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Unexpected archive layout: entry {entry:?} is not under {prefix:?}")]
    ArchiveLayoutError { entry: String, prefix: String },

    #[error("Failed to mirror {path:?}: {source}")]
    MirrorError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source document not found: {0:?}")]
    SourceNotFound(PathBuf),

    #[error("Embedded file not found: {path:?} (referenced from slide {slide})")]
    EmbedNotFound { path: PathBuf, slide: usize },

    #[error("Invalid embed pattern: {0}")]
    EmbedPatternError(String),

    #[error("File is not valid UTF-8: {0:?}")]
    InvalidUtf8(PathBuf),

    #[error("HTML generation error: {0}")]
    HtmlError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Watch error: {0}")]
    WatchError(String),
}

impl PrezError {
    /// True for errors caused by bad user configuration rather than a failed stage.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PrezError::ConfigError(_) | PrezError::EmbedPatternError(_)
        )
    }
}

impl From<regex::Error> for PrezError {
    fn from(err: regex::Error) -> Self {
        PrezError::EmbedPatternError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PrezError>;
