//! Output format definitions
//!
//! The set of output formats is closed: every document can be rendered to each
//! of them from the same AST. Formats are identified by name (for config files
//! and command lines) and can be detected from an output file extension.

use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A target format for [`crate::render::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Styled HTML fragment
    Html,
    /// HTML for a learning management system, referencing uploaded resources
    LmsHtml,
    /// LaTeX fragment
    Latex,
    /// Plain canonical text
    Text,
    /// Canonicalized markdown in the qtext dialect
    Markdown,
    /// The AST itself, as JSON
    AstJson,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Html,
        OutputFormat::LmsHtml,
        OutputFormat::Latex,
        OutputFormat::Text,
        OutputFormat::Markdown,
        OutputFormat::AstJson,
    ];

    /// The name of this format (e.g., "html", "latex")
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::LmsHtml => "lms-html",
            OutputFormat::Latex => "latex",
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::AstJson => "ast-json",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Html => "HTML fragment with inline styles",
            OutputFormat::LmsHtml => "HTML fragment referencing LMS-hosted files and equations",
            OutputFormat::Latex => "LaTeX fragment",
            OutputFormat::Text => "Plain canonical text",
            OutputFormat::Markdown => "Canonical qtext markdown",
            OutputFormat::AstJson => "Document AST as JSON",
        }
    }

    /// File extensions associated with this format, without the leading dot.
    pub fn file_extensions(&self) -> &'static [&'static str] {
        match self {
            OutputFormat::Html => &["html", "htm"],
            OutputFormat::LmsHtml => &[],
            OutputFormat::Latex => &["tex", "latex"],
            OutputFormat::Text => &["txt"],
            OutputFormat::Markdown => &["md", "markdown"],
            OutputFormat::AstJson => &["json"],
        }
    }

    /// Whether the format is rendered visually by its consumer (math gets
    /// typeset instead of being left as source).
    pub fn is_visual(&self) -> bool {
        matches!(self, OutputFormat::Html | OutputFormat::LmsHtml)
    }

    /// List all format names (sorted)
    pub fn list_formats() -> Vec<&'static str> {
        let mut names: Vec<_> = Self::ALL.iter().map(|f| f.name()).collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    ///
    /// Extensions are matched case-sensitively, as returned by `Path::extension()`.
    pub fn detect_from_filename(filename: &str) -> Option<OutputFormat> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        Self::ALL
            .into_iter()
            .find(|format| format.file_extensions().contains(&extension))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == name)
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }
}
