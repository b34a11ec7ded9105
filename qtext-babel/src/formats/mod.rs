//! Format implementations
//!
//! One module per output format. Each renderer implements
//! [`Renderer`](crate::render::Renderer) except AST JSON, which serializes the
//! document directly.

pub mod html;
pub mod json;
pub mod latex;
pub mod markdown;
pub mod text;

pub use html::{HtmlFlavor, HtmlRenderer};
pub use latex::LatexRenderer;
pub use markdown::MarkdownRenderer;
pub use text::TextRenderer;
