//! Parser and multi-format renderer for qtext documents
//!
//!     qtext is markdown with a few additions for teaching material: `$…$` math, images,
//!     tables, `<placeholder>` blanks, `::: name` container blocks and `<style>` declarations
//!     that set presentation for the enclosing container.
//!
//!     One document is parsed once and rendered to any number of formats:
//!         - HTML, and an LMS-flavored HTML variant
//!         - LaTeX body markup
//!         - plain text (prose, or a filtered identifier-safe form)
//!         - canonical markdown, which parses back to the same AST
//!         - the AST itself as JSON
//!
//!     This is a pure lib: no printing, no environment reads, no process exits. External
//!     effects (image upload, math tool) come in through render options.
//!
//! Architecture
//!
//!     text ──► tokenizer ──► pipeline ──► ast::build ──► Document ──► render ──► String
//!
//!     .
//!     ├── tokenizer       # comrak adapter and `:::` container fences → flat tokens
//!     ├── pipeline        # five ordered token passes (root, styles, placeholders, raw, prune)
//!     ├── ast             # closed node enum, stack based flat → nested builder
//!     ├── style.rs        # style maps, recognized keys, the full/incremental cascade
//!     ├── render          # Renderer trait, per-render context, table layout
//!     ├── formats
//!     │   ├── html        # DOM via html5ever/markup5ever_rcdom, standard and LMS flavors
//!     │   ├── latex
//!     │   ├── text
//!     │   ├── markdown
//!     │   └── json
//!     ├── resources       # image resolution, external math tool, LMS URLs
//!     ├── format.rs       # OutputFormat
//!     └── error.rs
//!
//!     Tokens and the AST are immutable once built. Everything a render call needs to remember
//!     (resolved images, the style stack) lives in its RenderContext and is dropped with it, so
//!     a Document can be rendered repeatedly, to different formats, from different threads.
//!
//! Core Algorithms
//!
//!     Two places carry most of the logic. The pipeline rewrites the token stream in a fixed
//!     order; each pass is a pure function and pruning repeats until it reaches a fixed point.
//!     The AST builder then turns open/close pairs into a tree with a frame stack, so every
//!     renderer works on nested typed nodes and never on tokens.
//!
//!     Renderers dispatch with an exhaustive match on Node. A new node type does not compile
//!     until every format handles it.
//!
//! Testing
//!
//!     Unit tests sit next to the code. Integration tests live under tests/<format>/ and are
//!     wired through tests/lib.rs, since cargo does not discover test subdirectories.

pub mod ast;
pub mod error;
pub mod format;
pub mod formats;
pub mod pipeline;
pub mod render;
pub mod resources;
pub mod style;
pub mod tokenizer;

pub use ast::{Document, Node};
pub use error::FormatError;
pub use format::OutputFormat;
pub use render::{RenderOptions, RenderSettings};
pub use resources::{ImageCallback, LmsInstance, MathRenderer};
pub use style::{StyleDefaults, StyleMap};

use std::path::Path;

/// Source text and the document parsed from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedText {
    /// Canonicalized source: line endings normalized, outer whitespace trimmed
    pub text: String,
    pub document: Document,
}

impl ParsedText {
    pub fn render(
        &self,
        format: OutputFormat,
        options: &RenderOptions<'_>,
    ) -> Result<String, FormatError> {
        self.document.render(format, options)
    }
}

/// Line endings to `\n`, then trim.
pub fn canonicalize(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "").trim().to_string()
}

/// Parse `text`. Relative image sources resolve against `base_dir` at render time.
pub fn parse(text: &str, base_dir: &Path) -> Result<ParsedText, FormatError> {
    let text = canonicalize(text);
    let tokens = tokenizer::tokenize(&text);
    log::debug!("tokenized {} bytes into {} tokens", text.len(), tokens.len());
    let tokens = pipeline::postprocess(tokens)?;
    let document = ast::build_document(&tokens, base_dir)?;
    Ok(ParsedText { text, document })
}
