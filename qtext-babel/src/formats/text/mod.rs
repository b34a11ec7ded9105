//! Plain text output
//!
//! Two modes, picked from [`RenderOptions`](crate::render::RenderOptions):
//!
//! - Restrictive (default). The result can serve as an identifier: whitespace
//!   is canonicalized, then everything but alphanumerics, spaces and hyphens is
//!   dropped. Tables, images, lists, quotes and rules are `NotSupported`; code
//!   and math need `allow_raw`.
//! - Permissive (`allow_all_characters`). No character filter. Nodes without a
//!   text form render as nothing, code passes through as written.
//!
//! Math that gets through keeps its TeX source between `$…$` / `$$…$$`.

use crate::ast::{Image, Link, List, Node, Table};
use crate::error::FormatError;
use crate::render::{RenderContext, Renderer, Separator};
use crate::resources::math::delimit;

#[derive(Debug, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        TextRenderer
    }
}

fn unsupported(what: &str, ctx: &RenderContext<'_>) -> Result<String, FormatError> {
    if ctx.options.allow_all_characters {
        Ok(String::new())
    } else {
        Err(FormatError::NotSupported(format!(
            "{what} cannot be rendered as plain text"
        )))
    }
}

fn raw(what: &str, value: &str, ctx: &RenderContext<'_>) -> Result<String, FormatError> {
    if ctx.options.allow_raw || ctx.options.allow_all_characters {
        Ok(value.to_string())
    } else {
        Err(FormatError::NotSupported(format!(
            "{what} in plain text requires raw passthrough"
        )))
    }
}

/// Collapse whitespace runs and keep only alphanumerics, spaces and hyphens.
pub fn restrict(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-')
        .collect::<String>()
        .trim()
        .to_string()
}

impl Renderer for TextRenderer {
    type Fragment = String;

    fn empty(&self) -> String {
        String::new()
    }

    fn join(&self, parts: Vec<String>, separator: Separator) -> String {
        match separator {
            Separator::Inline => parts.concat(),
            Separator::Block => parts
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }

    fn finish(&mut self, fragment: String, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        if ctx.options.allow_all_characters {
            Ok(fragment.trim().to_string())
        } else {
            Ok(restrict(&fragment))
        }
    }

    fn text(&mut self, value: &str, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        Ok(value.to_string())
    }

    fn soft_break(&mut self, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        Ok(" ".to_string())
    }

    fn hard_break(&mut self, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        Ok("\n".to_string())
    }

    fn emphasis(&mut self, children: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.inlines(children, ctx)
    }

    fn strong(&mut self, children: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.inlines(children, ctx)
    }

    fn strikethrough(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        self.inlines(children, ctx)
    }

    fn code(&mut self, value: &str, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        raw("code", value, ctx)
    }

    fn math_inline(&mut self, tex: &str, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        raw("math", &delimit(tex, false), ctx)
    }

    fn math_block(&mut self, tex: &str, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        raw("math", &delimit(tex, true), ctx)
    }

    fn image(&mut self, _image: &Image, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        unsupported("images", ctx)
    }

    fn link(&mut self, link: &Link, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.inlines(&link.children, ctx)
    }

    fn placeholder(&mut self, label: &str, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        Ok(format!("[{label}]"))
    }

    fn heading(
        &mut self,
        _level: u8,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        self.inlines(children, ctx)
    }

    fn blockquote(&mut self, _children: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        unsupported("block quotes", ctx)
    }

    fn list(&mut self, _list: &List, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        unsupported("lists", ctx)
    }

    fn table(&mut self, _table: &Table, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        unsupported("tables", ctx)
    }

    fn code_block(
        &mut self,
        _info: Option<&str>,
        value: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        raw("code blocks", value.trim_end_matches('\n'), ctx)
    }

    fn rule(&mut self, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        unsupported("rules", ctx)
    }
}
