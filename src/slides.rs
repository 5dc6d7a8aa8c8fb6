// ABOUTME: Slide parsing for the revealprez application
// ABOUTME: Splits the source document into slides and expands embedded files

use crate::errors::{PrezError, Result};
use log::{debug, info};
use regex::Regex;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// One separator-delimited chunk of the source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// 1-based position in the document
    pub index: usize,
    /// Raw markup after embed expansion
    pub markup: String,
}

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Slide {}>", self.index)
    }
}

pub struct SlideParser {
    separator: String,
    embed: Regex,
}

impl SlideParser {
    /// `embed_pattern` must contain exactly one capture group: the path of
    /// the file to embed.
    pub fn new(separator: &str, embed_pattern: &str) -> Result<Self> {
        if separator.is_empty() {
            return Err(PrezError::ConfigError(
                "separator must not be empty".to_string(),
            ));
        }

        let embed = Regex::new(embed_pattern)?;
        // captures_len counts the implicit whole-match group
        if embed.captures_len() != 2 {
            return Err(PrezError::EmbedPatternError(format!(
                "{:?} must have exactly one capture group, found {}",
                embed_pattern,
                embed.captures_len() - 1
            )));
        }

        Ok(Self {
            separator: separator.to_string(),
            embed,
        })
    }

    /// Read `<input_dir>/<filename>` and parse it.
    pub fn parse_file(&self, input_dir: &Path, filename: &str) -> Result<Vec<Slide>> {
        let path = input_dir.join(filename);
        info!("Loading slides from {:?}", path);

        let content = read_text(&path).map_err(|e| match e {
            PrezError::IoError(ref io) if io.kind() == io::ErrorKind::NotFound => {
                PrezError::SourceNotFound(path.clone())
            }
            other => other,
        })?;

        self.parse_str(&content, input_dir)
    }

    /// Split `content` on the separator and expand embeds relative to `input_dir`.
    pub fn parse_str(&self, content: &str, input_dir: &Path) -> Result<Vec<Slide>> {
        let slides = content
            .split(self.separator.as_str())
            .enumerate()
            .map(|(i, page)| {
                let index = i + 1;
                Ok(Slide {
                    index,
                    markup: self.expand_embeds(page, input_dir, index)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Parsed {} slides", slides.len());
        Ok(slides)
    }

    /// Replace every embed reference in `text` with the referenced file.
    /// The inserted content is not scanned again.
    pub fn expand_embeds(&self, text: &str, input_dir: &Path, slide: usize) -> Result<String> {
        let mut expanded = String::with_capacity(text.len());
        let mut last = 0;

        for caps in self.embed.captures_iter(text) {
            let (Some(whole), Some(target)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            let path = input_dir.join(target.as_str());
            debug!("Embedding {:?} into slide {}", path, slide);
            let content = read_text(&path).map_err(|e| match e {
                PrezError::IoError(ref io) if io.kind() == io::ErrorKind::NotFound => {
                    PrezError::EmbedNotFound {
                        path: path.clone(),
                        slide,
                    }
                }
                other => other,
            })?;

            expanded.push_str(&text[last..whole.start()]);
            expanded.push_str(&content);
            last = whole.end();
        }

        expanded.push_str(&text[last..]);
        Ok(expanded)
    }
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|_| PrezError::InvalidUtf8(path.to_path_buf()))
}
