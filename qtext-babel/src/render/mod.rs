//! Renderer core
//!
//! Every output format implements [`Renderer`]. The trait walks the AST with an
//! exhaustive match over [`Node`], so adding a node type forces every format to
//! handle it. Structural nodes (containers, paragraphs, block and inline
//! sequences) have shared default handling; content nodes are required
//! methods.
//!
//! A renderer picks its own fragment type. String formats concatenate strings,
//! the HTML formats build a DOM and serialize it in [`Renderer::finish`].
//!
//! Rendering never mutates the document. Per-call state (image cache, style
//! cascade) lives in [`RenderContext`], created fresh for each [`render`] call.

pub mod context;
pub mod table;

pub use context::RenderContext;
pub use table::TableLayout;

use crate::ast::{Container, Document, Image, Link, List, Node, Table};
use crate::error::FormatError;
use crate::format::OutputFormat;
use crate::formats::{html, json, latex, markdown, text};
use crate::resources::image::ImageCallback;
use crate::resources::lms::LmsInstance;
use crate::resources::math::{ExternalMathTool, MathRenderer};
use crate::style::{AppliedStyle, StyleDefaults};
use std::fmt;

/// How sibling fragments are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Block,
    Inline,
}

/// Caller controlled render inputs. Cheap to copy; everything is borrowed.
#[derive(Clone, Copy, Default)]
pub struct RenderOptions<'a> {
    pub image_callback: Option<&'a ImageCallback<'a>>,
    pub lms: Option<&'a LmsInstance>,
    pub math: Option<&'a dyn MathRenderer>,
    /// Plain text: keep every character and degrade unsupported nodes to nothing
    pub allow_all_characters: bool,
    /// Plain text: pass code and math through as written
    pub allow_raw: bool,
    pub style_defaults: StyleDefaults,
}

impl<'a> RenderOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image_callback(mut self, callback: &'a ImageCallback<'a>) -> Self {
        self.image_callback = Some(callback);
        self
    }

    pub fn with_lms(mut self, lms: &'a LmsInstance) -> Self {
        self.lms = Some(lms);
        self
    }

    pub fn with_math(mut self, math: &'a dyn MathRenderer) -> Self {
        self.math = Some(math);
        self
    }

    pub fn allow_all_characters(mut self, allow: bool) -> Self {
        self.allow_all_characters = allow;
        self
    }

    pub fn allow_raw(mut self, allow: bool) -> Self {
        self.allow_raw = allow;
        self
    }

    pub fn with_style_defaults(mut self, defaults: StyleDefaults) -> Self {
        self.style_defaults = defaults;
        self
    }
}

impl fmt::Debug for RenderOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("image_callback", &self.image_callback.is_some())
            .field("lms", &self.lms)
            .field("math", &self.math.is_some())
            .field("allow_all_characters", &self.allow_all_characters)
            .field("allow_raw", &self.allow_raw)
            .field("style_defaults", &self.style_defaults)
            .finish()
    }
}

/// Owned render defaults, typically loaded from configuration.
#[derive(Debug, Default)]
pub struct RenderSettings {
    pub style_defaults: StyleDefaults,
    pub math_tool: ExternalMathTool,
}

impl RenderSettings {
    /// Options borrowing these settings.
    pub fn options(&self) -> RenderOptions<'_> {
        RenderOptions::default()
            .with_style_defaults(self.style_defaults)
            .with_math(&self.math_tool)
    }
}

/// Render `document` to `format`.
pub fn render(
    document: &Document,
    format: OutputFormat,
    options: &RenderOptions<'_>,
) -> Result<String, FormatError> {
    log::debug!("rendering document to {format}");
    let mut ctx = RenderContext::new(format, &document.base_dir, *options);

    match format {
        OutputFormat::Html => html::HtmlRenderer::standard().render_document(document, &mut ctx),
        OutputFormat::LmsHtml => html::HtmlRenderer::lms().render_document(document, &mut ctx),
        OutputFormat::Latex => latex::LatexRenderer::new().render_document(document, &mut ctx),
        OutputFormat::Text => text::TextRenderer::new().render_document(document, &mut ctx),
        OutputFormat::Markdown => {
            markdown::MarkdownRenderer::new().render_document(document, &mut ctx)
        }
        OutputFormat::AstJson => json::render(document),
    }
}

pub trait Renderer {
    type Fragment;

    fn empty(&self) -> Self::Fragment;

    fn join(&self, parts: Vec<Self::Fragment>, separator: Separator) -> Self::Fragment;

    /// Turn the document fragment into the output string.
    fn finish(
        &mut self,
        fragment: Self::Fragment,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError>;

    fn render_document(
        &mut self,
        document: &Document,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        let fragment = match &document.root {
            Some(root) => self.container(root, ctx)?,
            None => self.empty(),
        };
        self.finish(fragment, ctx)
    }

    fn render_node(
        &mut self,
        node: &Node,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError> {
        match node {
            Node::Container(container) => self.container(container, ctx),
            Node::Paragraph { children } => self.paragraph(children, ctx),
            Node::Heading { level, children } => self.heading(*level, children, ctx),
            Node::List(list) => self.list(list, ctx),
            Node::Blockquote { children } => self.blockquote(children, ctx),
            Node::Table(table) => self.table(table, ctx),
            Node::CodeBlock { info, text } => self.code_block(info.as_deref(), text, ctx),
            Node::MathBlock { text } => self.math_block(text, ctx),
            Node::Rule => self.rule(ctx),
            Node::Placeholder { label } => self.placeholder(label, ctx),
            Node::Text { text } => self.text(text, ctx),
            Node::SoftBreak => self.soft_break(ctx),
            Node::HardBreak => self.hard_break(ctx),
            Node::Code { text } => self.code(text, ctx),
            Node::MathInline { text } => self.math_inline(text, ctx),
            Node::Emphasis { children } => self.emphasis(children, ctx),
            Node::Strong { children } => self.strong(children, ctx),
            Node::Strikethrough { children } => self.strikethrough(children, ctx),
            Node::Link(link) => self.link(link, ctx),
            Node::Image(image) => self.image(image, ctx),
        }
    }

    fn render_sequence(
        &mut self,
        nodes: &[Node],
        separator: Separator,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError> {
        let mut parts = Vec::with_capacity(nodes.len());
        for node in nodes {
            parts.push(self.render_node(node, ctx)?);
        }
        Ok(self.join(parts, separator))
    }

    fn blocks(
        &mut self,
        nodes: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError> {
        self.render_sequence(nodes, Separator::Block, ctx)
    }

    fn inlines(
        &mut self,
        nodes: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError> {
        self.render_sequence(nodes, Separator::Inline, ctx)
    }

    /// Enter the container's style, render its body, then wrap it.
    fn container(
        &mut self,
        container: &Container,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError> {
        let applied = ctx.enter_container(&container.style);
        let body = self.blocks(&container.children, ctx);
        ctx.leave_container();
        self.wrap_container(container, &applied, body?, ctx)
    }

    fn wrap_container(
        &mut self,
        _container: &Container,
        _applied: &AppliedStyle,
        body: Self::Fragment,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError> {
        Ok(body)
    }

    fn paragraph(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError> {
        self.inlines(children, ctx)
    }

    fn text(&mut self, text: &str, ctx: &mut RenderContext<'_>)
        -> Result<Self::Fragment, FormatError>;

    fn soft_break(&mut self, ctx: &mut RenderContext<'_>) -> Result<Self::Fragment, FormatError>;

    fn hard_break(&mut self, ctx: &mut RenderContext<'_>) -> Result<Self::Fragment, FormatError>;

    fn emphasis(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError>;

    fn strong(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError>;

    fn strikethrough(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError>;

    fn code(&mut self, text: &str, ctx: &mut RenderContext<'_>)
        -> Result<Self::Fragment, FormatError>;

    fn math_inline(
        &mut self,
        text: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError>;

    fn math_block(
        &mut self,
        text: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError>;

    fn image(
        &mut self,
        image: &Image,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError>;

    fn link(&mut self, link: &Link, ctx: &mut RenderContext<'_>)
        -> Result<Self::Fragment, FormatError>;

    fn placeholder(
        &mut self,
        label: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError>;

    fn heading(
        &mut self,
        level: u8,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError>;

    fn blockquote(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError>;

    fn list(&mut self, list: &List, ctx: &mut RenderContext<'_>)
        -> Result<Self::Fragment, FormatError>;

    fn table(
        &mut self,
        table: &Table,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError>;

    fn code_block(
        &mut self,
        info: Option<&str>,
        text: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self::Fragment, FormatError>;

    fn rule(&mut self, ctx: &mut RenderContext<'_>) -> Result<Self::Fragment, FormatError>;
}

/// Six heading levels, clamped.
pub fn heading_index(level: u8) -> usize {
    usize::from(level.clamp(1, 6)) - 1
}
