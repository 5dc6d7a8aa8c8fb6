// ABOUTME: Configuration module for the revealprez application
// ABOUTME: Provides build settings, defaults and environment variable handling

use crate::errors::{PrezError, Result};
use crate::utils;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SEPARATOR: &str = "----SLIDE----";
pub const DEFAULT_FILENAME: &str = "index.md";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_OUTPUT_DIR: &str = "out";
pub const DEFAULT_REVEALJS_VERSION: &str = "3.8.0";
pub const DEFAULT_BUNDLE_BASE_URL: &str = "https://github.com/hakimel/reveal.js/archive";
pub const DEFAULT_EMBED_PATTERN: &str = r"<!--\s*embed:\s*(\S+?)\s*-->";
pub const DEFAULT_DEBOUNCE_MS: u64 = 2000;

/// Settings for a single build (or a watch session of repeated builds)
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Directory holding the source document, embedded files and assets
    pub input_dir: PathBuf,

    /// Directory the rendered site is written to
    pub output_dir: PathBuf,

    /// Literal token separating two slides
    pub separator: String,

    /// Regex with exactly one capture group holding the embedded file path
    pub embed_pattern: String,

    /// Source document name, relative to `input_dir`
    pub filename: String,

    /// Name of the assets subdirectory, mirrored as-is into the output
    pub assets_dir: String,

    /// reveal.js release to fetch
    pub revealjs_version: String,

    /// Base URL the `<version>.zip` archive is fetched from
    pub bundle_base_url: String,

    /// Where the downloaded archive and unpacked template are cached
    pub cache_dir: PathBuf,

    /// Rebuild on changes after the first build
    pub watch: bool,

    /// Minimum time between two rebuilds in watch mode
    pub debounce_ms: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            separator: DEFAULT_SEPARATOR.to_string(),
            embed_pattern: DEFAULT_EMBED_PATTERN.to_string(),
            filename: DEFAULT_FILENAME.to_string(),
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
            revealjs_version: DEFAULT_REVEALJS_VERSION.to_string(),
            bundle_base_url: DEFAULT_BUNDLE_BASE_URL.to_string(),
            cache_dir: PathBuf::from("."),
            watch: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl BuildConfig {
    /// Create a new configuration instance
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration defaults from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let output_dir = env::var("REVEALPREZ_OUTPUT_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);
        let revealjs_version =
            env::var("REVEALJS_VERSION").unwrap_or(defaults.revealjs_version);
        let bundle_base_url =
            env::var("REVEALJS_BASE_URL").unwrap_or(defaults.bundle_base_url);
        let cache_dir = env::var("REVEALPREZ_CACHE_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_dir);
        let debounce_ms = env::var("REVEALPREZ_DEBOUNCE_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        Self {
            output_dir,
            revealjs_version,
            bundle_base_url,
            cache_dir,
            debounce_ms,
            ..defaults
        }
    }

    /// Validate the settings and turn every path into an absolute one.
    pub fn resolve(mut self) -> Result<Self> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(PrezError::ConfigError("input-dir is required".to_string()));
        }
        if self.separator.is_empty() {
            return Err(PrezError::ConfigError(
                "separator must not be empty".to_string(),
            ));
        }
        if self.revealjs_version.trim().is_empty() {
            return Err(PrezError::ConfigError(
                "revealjs version must not be empty".to_string(),
            ));
        }
        url::Url::parse(&self.bundle_base_url).map_err(|e| {
            PrezError::ConfigError(format!(
                "invalid bundle base URL {:?}: {}",
                self.bundle_base_url, e
            ))
        })?;

        self.input_dir = utils::get_absolute_path(&self.input_dir)?;
        self.output_dir = utils::get_absolute_path(&self.output_dir)?;
        self.cache_dir = utils::get_absolute_path(&self.cache_dir)?;
        Ok(self)
    }

    /// Path of the source document
    pub fn source_path(&self) -> PathBuf {
        self.input_dir.join(&self.filename)
    }

    /// Source and destination of the user assets tree
    pub fn assets_paths(&self) -> (PathBuf, PathBuf) {
        (
            self.input_dir.join(&self.assets_dir),
            self.output_dir.join(&self.assets_dir),
        )
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
