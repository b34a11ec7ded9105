//! Shared helpers for the integration tests.

use qtext_babel::{parse, FormatError, MathRenderer, OutputFormat, ParsedText, RenderOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// The eight byte PNG signature, enough for MIME detection and embedding.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n";
pub const PNG_BASE64: &str = "iVBORw0KGgo=";

pub fn parse_str(source: &str) -> ParsedText {
    parse(source, Path::new(".")).expect("source to parse")
}

pub fn render(source: &str, format: OutputFormat) -> Result<String, FormatError> {
    render_with(source, format, RenderOptions::default().with_math(&NO_TOOL))
}

pub fn render_with(
    source: &str,
    format: OutputFormat,
    options: RenderOptions<'_>,
) -> Result<String, FormatError> {
    parse_str(source).render(format, &options)
}

static NO_TOOL: qtext_babel::resources::NoMathRenderer = qtext_babel::resources::NoMathRenderer;

/// A math tool that is always available and tags its input.
pub struct TaggingMath;

impl MathRenderer for TaggingMath {
    fn is_available(&self) -> bool {
        true
    }

    fn render(&self, tex: &str, display: bool) -> Result<String, FormatError> {
        let mode = if display { "display" } else { "inline" };
        Ok(format!("<math data-mode=\"{mode}\">{tex}</math>"))
    }
}

/// A math tool that is available but always fails, like a tool exiting non-zero.
pub struct FailingMath;

impl MathRenderer for FailingMath {
    fn is_available(&self) -> bool {
        true
    }

    fn render(&self, _tex: &str, _display: bool) -> Result<String, FormatError> {
        Err(FormatError::ResourceError("math tool exited with status 1".to_string()))
    }
}

/// A directory holding `img/dot.png`.
pub fn image_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::create_dir_all(dir.path().join("img")).expect("img dir");
    fs::write(dir.path().join("img/dot.png"), PNG_BYTES).expect("write image");
    dir
}
