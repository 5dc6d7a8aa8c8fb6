// ABOUTME: HTML generation module for the revealprez application
// ABOUTME: Renders parsed slides into the reveal.js index page

use crate::errors::{PrezError, Result};
use crate::slides::Slide;
use crate::utils;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.html";

const PAGE_HEAD: &str = r#"<!doctype html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no">

    <title>Presentation</title>

    <link rel="stylesheet" href="dist/reveal.css">
    <link rel="stylesheet" href="dist/theme/black.css">

    <!-- Theme used for syntax highlighting of code -->
    <link rel="stylesheet" href="dist/theme/zenburn.css">

</head>
<body>
<div class="reveal">
    <div class="slides">
"#;

const PAGE_TAIL: &str = r#"
    </div>
</div>

<script src="dist/reveal.js"></script>
<script src="plugin/markdown/markdown.js"></script>
<script src="plugin/highlight/highlight.js"></script>

<script>
    // More info about config & dependencies:
    // - https://github.com/hakimel/reveal.js#configuration
    // - https://github.com/hakimel/reveal.js#dependencies
    Reveal.initialize({
        slideNumber: true,
        showNotes: true,
        plugins: [ RevealMarkdown, RevealHighlight ]
    });
</script>
</body>
</html>
"#;

/// Section for a single slide. The markup goes in untouched; reveal's
/// markdown plugin renders it client side.
pub fn render_section(slide: &Slide) -> String {
    format!(
        "<section data-markdown>\n\t<textarea data-template>\n\t\t{}\n\t</textarea>\n</section>",
        slide.markup
    )
}

/// Render the full index page, one section per slide in order
pub fn render_presentation(slides: &[Slide]) -> String {
    let mut html_doc = String::from(PAGE_HEAD);
    for slide in slides {
        html_doc.push_str(&render_section(slide));
        html_doc.push('\n');
    }
    html_doc.push_str(PAGE_TAIL);
    html_doc
}

/// Render `slides` and write them to `<output_dir>/index.html`
pub fn write_presentation(output_dir: &Path, slides: &[Slide]) -> Result<PathBuf> {
    let output_path = output_dir.join(INDEX_FILE);
    info!("Writing HTML to file: {:?}", output_path);

    utils::ensure_directory_exists(output_dir)?;

    let html_content = render_presentation(slides);
    fs::write(&output_path, html_content).map_err(|e| {
        PrezError::HtmlError(format!("failed to write {:?}: {}", output_path, e))
    })?;

    Ok(output_path)
}
