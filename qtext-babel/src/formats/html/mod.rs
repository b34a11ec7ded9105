//! HTML and LMS-HTML output
//!
//! Builds a `markup5ever_rcdom` tree and serializes it with `html5ever`, which
//! takes care of text and attribute escaping.
//!
//! # Element Mapping Table
//!
//! | Node            | HTML                                                        |
//! |-----------------|-------------------------------------------------------------|
//! | Root container  | `<div class="qtext" style="…full style…">`                 |
//! | Container       | `<div class="qtext-NAME" style="…own style…">`             |
//! | Paragraph       | `<p>` (omitted inside tight list items)                     |
//! | Heading         | `<h1>` … `<h6>`                                             |
//! | List            | `<ul>` / `<ol start="N">` with `<li>`                       |
//! | Blockquote      | `<blockquote>`                                              |
//! | Table           | `<table>` with `<thead>`/`<tbody>`, styled `<th>`/`<td>`    |
//! | Code block      | `<pre><code class="language-INFO">`                         |
//! | Math            | tool output in `<span class="math">` / `<div class="math">` |
//! | Math, no tool   | `<code class="math">` / `<pre class="math"><code>`          |
//! | Placeholder     | `<span class="qtext-placeholder">[LABEL]</span>`            |
//! | Image           | `<img>` with a data URI and a percentage width              |
//! | Emphasis etc.   | `<em>`, `<strong>`, `<del>`, `<code>`, `<a>`, `<br>`        |
//!
//! # Style
//!
//! Nested divs inherit presentation from their parents, so a named container
//! only carries its own declaration. The root div has nothing to inherit from
//! and carries the full style. Only `text-align` and `font-size` become CSS on
//! containers; table and image keys are read at the table or image.
//!
//! # LMS flavor
//!
//! Same output with two differences. An image reference that is neither a URL
//! nor a data URI (typically a file identifier returned by an upload callback)
//! becomes the instance's file preview URL. Math becomes the instance's
//! equation image when an [`LmsInstance`](crate::resources::LmsInstance) is
//! given.

pub mod serializer;

use crate::ast::{Container, Image, Link, List, Node, Table};
use crate::error::FormatError;
use crate::render::{heading_index, RenderContext, Renderer, Separator, TableLayout};
use crate::resources::image::{is_passthrough, ImageTarget};
use crate::style::{format_number, keys, Alignment, AppliedStyle, StyleMap};
use markup5ever_rcdom::Handle;
use serializer::{element, serialize_nodes, text, RawSlots};

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

const PLACEHOLDER_STYLE: &str = "border: 1px dashed; padding: 0 0.25em; font-family: monospace";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlFlavor {
    Standard,
    Lms,
}

pub struct HtmlRenderer {
    flavor: HtmlFlavor,
    raw: RawSlots,
}

impl HtmlRenderer {
    pub fn new(flavor: HtmlFlavor) -> Self {
        HtmlRenderer {
            flavor,
            raw: RawSlots::default(),
        }
    }

    pub fn standard() -> Self {
        Self::new(HtmlFlavor::Standard)
    }

    pub fn lms() -> Self {
        Self::new(HtmlFlavor::Lms)
    }

    fn wrap(
        &mut self,
        tag: &str,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        let inner = self.inlines(children, ctx)?;
        Ok(vec![element(tag, vec![], inner)])
    }

    fn math(
        &mut self,
        tex: &str,
        display: bool,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        if let (HtmlFlavor::Lms, Some(lms)) = (self.flavor, ctx.options.lms) {
            let src = lms.equation_image_url(tex);
            let alt = format!("LaTeX: {tex}");
            let image = element(
                "img",
                vec![
                    ("class", "equation_image"),
                    ("title", tex),
                    ("src", &src),
                    ("alt", &alt),
                    ("data-equation-content", tex),
                ],
                vec![],
            );
            return Ok(if display {
                vec![element("p", vec![("class", "math")], vec![image])]
            } else {
                vec![image]
            });
        }

        let renderer = ctx.math();
        if renderer.is_available() {
            let markup = renderer.render(tex, display)?;
            let slot = self.raw.slot(markup);
            let tag = if display { "div" } else { "span" };
            return Ok(vec![element(tag, vec![("class", "math")], vec![slot])]);
        }

        Ok(if display {
            let code = element("code", vec![], vec![text(tex)]);
            vec![element("pre", vec![("class", "math")], vec![code])]
        } else {
            vec![element("code", vec![("class", "math")], vec![text(tex)])]
        })
    }

    fn image_reference(
        &mut self,
        src: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        let resolved = ctx.resolve_image(src, ImageTarget::Embed)?;
        match (self.flavor, ctx.options.lms) {
            (HtmlFlavor::Lms, Some(lms)) if !is_passthrough(&resolved) => {
                Ok(lms.file_preview_url(&resolved))
            }
            _ => Ok(resolved),
        }
    }

    fn table_cell(
        &mut self,
        children: &[Node],
        header: bool,
        alignment: Option<Alignment>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Handle, FormatError> {
        let style = ctx.table_style();
        let mut css = Vec::new();
        if let Some(alignment) = alignment {
            css.push(format!("text-align: {}", alignment.as_str()));
        }
        css.push(format!(
            "padding: {}em {}em",
            format_number(style.vertical_padding()),
            format_number(style.horizontal_padding())
        ));
        if style.border {
            css.push("border: 1px solid".to_string());
        }
        if header && !style.header_bold {
            css.push("font-weight: normal".to_string());
        }
        if header && style.header_rule {
            css.push("border-bottom: 1px solid".to_string());
        }

        let css = css.join("; ");
        let inner = self.inlines(children, ctx)?;
        let tag = if header { "th" } else { "td" };
        Ok(element(tag, vec![("style", &css)], inner))
    }
}

/// CSS for the container keys HTML renders on divs.
fn container_css(style: &StyleMap) -> String {
    let mut css = Vec::new();
    if let Some(alignment) = style.alignment(keys::TEXT_ALIGN) {
        css.push(format!("text-align: {}", alignment.as_str()));
    }
    if let Some(size) = style.number(keys::FONT_SIZE) {
        css.push(format!("font-size: {}pt", format_number(size)));
    }
    css.join("; ")
}

/// Horizontal placement of a block-level image or table.
fn placement_css(alignment: Option<Alignment>) -> Option<&'static str> {
    match alignment? {
        Alignment::Center => Some("margin-left: auto; margin-right: auto"),
        Alignment::Right => Some("margin-left: auto; margin-right: 0"),
        Alignment::Left => Some("margin-left: 0; margin-right: auto"),
        Alignment::Justify => None,
    }
}

fn newline() -> Handle {
    text("\n")
}

impl Renderer for HtmlRenderer {
    type Fragment = Vec<Handle>;

    fn empty(&self) -> Vec<Handle> {
        Vec::new()
    }

    fn join(&self, parts: Vec<Vec<Handle>>, separator: Separator) -> Vec<Handle> {
        let mut joined = Vec::new();
        for part in parts.into_iter().filter(|part| !part.is_empty()) {
            if separator == Separator::Block && !joined.is_empty() {
                joined.push(newline());
            }
            joined.extend(part);
        }
        joined
    }

    fn finish(
        &mut self,
        fragment: Vec<Handle>,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        let html = serialize_nodes(&fragment)?;
        Ok(self.raw.fill(html))
    }

    fn wrap_container(
        &mut self,
        container: &Container,
        applied: &AppliedStyle,
        body: Vec<Handle>,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        let (class, style) = if container.root {
            ("qtext".to_string(), &applied.full)
        } else {
            let name = container.name.as_deref().unwrap_or("block");
            (format!("qtext-{name}"), &applied.incremental)
        };

        let css = container_css(style);
        let mut attrs = vec![("class", class.as_str())];
        if !css.is_empty() {
            attrs.push(("style", css.as_str()));
        }
        Ok(vec![element("div", attrs, body)])
    }

    fn paragraph(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        self.wrap("p", children, ctx)
    }

    fn text(&mut self, value: &str, _ctx: &mut RenderContext<'_>) -> Result<Vec<Handle>, FormatError> {
        Ok(vec![text(value)])
    }

    fn soft_break(&mut self, _ctx: &mut RenderContext<'_>) -> Result<Vec<Handle>, FormatError> {
        Ok(vec![newline()])
    }

    fn hard_break(&mut self, _ctx: &mut RenderContext<'_>) -> Result<Vec<Handle>, FormatError> {
        Ok(vec![element("br", vec![], vec![])])
    }

    fn emphasis(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        self.wrap("em", children, ctx)
    }

    fn strong(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        self.wrap("strong", children, ctx)
    }

    fn strikethrough(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        self.wrap("del", children, ctx)
    }

    fn code(&mut self, value: &str, _ctx: &mut RenderContext<'_>) -> Result<Vec<Handle>, FormatError> {
        Ok(vec![element("code", vec![], vec![text(value)])])
    }

    fn math_inline(
        &mut self,
        tex: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        self.math(tex, false, ctx)
    }

    fn math_block(
        &mut self,
        tex: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        self.math(tex, true, ctx)
    }

    fn image(
        &mut self,
        image: &Image,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        let src = self.image_reference(&image.src, ctx)?;

        let mut css = format!("width: {}%", format_number(ctx.image_width() * 100.0));
        if let Some(placement) = placement_css(ctx.content_align()) {
            css.push_str("; display: block; ");
            css.push_str(placement);
        }

        let mut attrs = vec![("src", src.as_str()), ("alt", image.alt.as_str())];
        if let Some(title) = &image.title {
            attrs.push(("title", title.as_str()));
        }
        attrs.push(("style", css.as_str()));
        Ok(vec![element("img", attrs, vec![])])
    }

    fn link(&mut self, link: &Link, ctx: &mut RenderContext<'_>) -> Result<Vec<Handle>, FormatError> {
        let inner = self.inlines(&link.children, ctx)?;
        let mut attrs = vec![("href", link.href.as_str())];
        if let Some(title) = &link.title {
            attrs.push(("title", title.as_str()));
        }
        Ok(vec![element("a", attrs, inner)])
    }

    fn placeholder(
        &mut self,
        label: &str,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        Ok(vec![element(
            "span",
            vec![("class", "qtext-placeholder"), ("style", PLACEHOLDER_STYLE)],
            vec![text(&format!("[{label}]"))],
        )])
    }

    fn heading(
        &mut self,
        level: u8,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        self.wrap(HEADINGS[heading_index(level)], children, ctx)
    }

    fn blockquote(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        let inner = self.blocks(children, ctx)?;
        Ok(vec![element("blockquote", vec![], inner)])
    }

    fn list(&mut self, list: &List, ctx: &mut RenderContext<'_>) -> Result<Vec<Handle>, FormatError> {
        let mut items = Vec::with_capacity(list.items.len());
        for item in &list.items {
            let mut parts = Vec::with_capacity(item.children.len());
            for child in &item.children {
                let part = match child {
                    Node::Paragraph { children } if list.tight => self.inlines(children, ctx)?,
                    other => self.render_node(other, ctx)?,
                };
                parts.push(part);
            }
            let inner = self.join(parts, Separator::Block);
            items.push(vec![element("li", vec![], inner)]);
        }
        let inner = self.join(items, Separator::Block);

        let start = list.start.to_string();
        let node = if list.ordered {
            let attrs = if list.start == 1 {
                vec![]
            } else {
                vec![("start", start.as_str())]
            };
            element("ol", attrs, inner)
        } else {
            element("ul", vec![], inner)
        };
        Ok(vec![node])
    }

    fn table(
        &mut self,
        table: &Table,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        let layout = TableLayout::of(table);

        let mut sections = Vec::new();
        for (tag, rows) in [("thead", &table.head), ("tbody", &table.body)] {
            if rows.is_empty() {
                continue;
            }
            let mut row_nodes = Vec::with_capacity(rows.len());
            for row in rows.iter() {
                let header = row.cells.first().is_some_and(|cell| cell.header);
                let mut cells = Vec::with_capacity(layout.columns);
                for (column, cell) in row.cells.iter().enumerate() {
                    cells.push(self.table_cell(
                        &cell.children,
                        cell.header,
                        layout.alignment(column),
                        ctx,
                    )?);
                }
                for column in row.cells.len()..layout.columns {
                    cells.push(self.table_cell(&[], header, layout.alignment(column), ctx)?);
                }
                row_nodes.push(vec![element("tr", vec![], cells)]);
            }
            let inner = self.join(row_nodes, Separator::Block);
            sections.push(vec![element(tag, vec![], inner)]);
        }

        let mut css = String::from("border-collapse: collapse");
        if let Some(placement) = placement_css(ctx.table_style().content_align) {
            css.push_str("; ");
            css.push_str(placement);
        }
        let inner = self.join(sections, Separator::Block);
        Ok(vec![element("table", vec![("style", css.as_str())], inner)])
    }

    fn code_block(
        &mut self,
        info: Option<&str>,
        value: &str,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<Handle>, FormatError> {
        let class = info
            .and_then(|info| info.split_whitespace().next())
            .map(|language| format!("language-{language}"));
        let attrs = match &class {
            Some(class) => vec![("class", class.as_str())],
            None => vec![],
        };
        let code = element("code", attrs, vec![text(value)]);
        Ok(vec![element("pre", vec![], vec![code])])
    }

    fn rule(&mut self, _ctx: &mut RenderContext<'_>) -> Result<Vec<Handle>, FormatError> {
        Ok(vec![element("hr", vec![], vec![])])
    }
}
