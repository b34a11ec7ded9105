//! Canonical markdown output
//!
//! Writes the document back in one normalized spelling of the dialect. Parsing
//! the output again yields the same AST.
//!
//! # Element Mapping Table
//!
//! | Node        | Markdown                                             |
//! |-------------|------------------------------------------------------|
//! | Container   | `::: name` fence, own style as a `<style>` line      |
//! | Heading     | `#` … `######`                                       |
//! | List        | `-` / `N.` with continuation indent                  |
//! | Blockquote  | `> ` prefixed lines                                  |
//! | Table       | aligned pipe table                                   |
//! | Code block  | backtick fence sized to the content                  |
//! | Math        | `$…$` / `$$…$$`                                      |
//! | Placeholder | `<placeholder>LABEL</placeholder>`, own lines as block |
//! | Emphasis    | `*em*`, `**strong**`, `~~strike~~`                   |
//! | Image       | `![alt](src "title")`, source as written             |
//!
//! Containers holding containers get longer fences, one colon per level of
//! nesting below them, so every closing fence is unambiguous.

pub mod escape;
pub mod table;

use crate::ast::{Container, Image, Link, List, Node, Table};
use crate::error::FormatError;
use crate::render::{heading_index, RenderContext, Renderer, Separator, TableLayout};
use crate::resources::math::delimit;
use crate::style::AppliedStyle;
use escape::{code_span, destination, escape_markdown, fence_length, title};
use table::PipeTable;

#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    /// Whether the next inline output begins a line, where block markers need escaping
    line_start: bool,
    /// Inside a pipe table cell, where `|` splits cells even in code spans
    in_cell: bool,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn delimited(
        &mut self,
        marker: &str,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        self.line_start = false;
        let inner = self.inlines(children, ctx)?;
        self.line_start = false;
        Ok(format!("{marker}{inner}{marker}"))
    }

    fn block_parts(&mut self, nodes: &[Node], ctx: &mut RenderContext<'_>) -> Result<Vec<String>, FormatError> {
        let mut parts = Vec::with_capacity(nodes.len());
        for node in nodes {
            parts.push(match node {
                // On one line it would read back as a paragraph
                Node::Placeholder { label } => format!("<placeholder>\n{label}\n</placeholder>"),
                // Outside an inline run a trailing backslash would read back as text
                Node::HardBreak => "<br>".to_string(),
                other => self.render_node(other, ctx)?,
            });
        }
        Ok(parts)
    }

    fn cell_safe(&self, markup: String) -> String {
        if self.in_cell {
            markup.replace('|', "\\|")
        } else {
            markup
        }
    }

    /// Inline content that starts on a fresh line.
    fn line(&mut self, children: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.line_start = true;
        self.inlines(children, ctx)
    }
}

/// Levels of containers nested below `container`.
fn nesting_height(container: &Container) -> usize {
    container
        .children
        .iter()
        .filter_map(|child| match child {
            Node::Container(inner) => Some(1 + nesting_height(inner)),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

/// Prefix every line after the first with `indent`, leaving blank lines empty.
fn indent_continuation(text: &str, indent: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl Renderer for MarkdownRenderer {
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

    fn finish(&mut self, fragment: String, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        let trimmed = fragment.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{trimmed}\n"))
    }

    fn blocks(&mut self, nodes: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        let parts = self.block_parts(nodes, ctx)?;
        Ok(self.join(parts, Separator::Block))
    }

    fn paragraph(&mut self, children: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.line(children, ctx)
    }

    fn wrap_container(
        &mut self,
        container: &Container,
        _applied: &AppliedStyle,
        body: String,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        let mut parts = Vec::new();
        if !container.style.is_empty() {
            parts.push(format!("<style>{}</style>", container.style.to_json()));
        }
        parts.push(body);
        let inner = self.join(parts, Separator::Block);

        if container.root {
            return Ok(inner);
        }
        let fence = ":".repeat(3 + nesting_height(container));
        let name = container.name.as_deref().unwrap_or("block");
        Ok(format!("{fence} {name}\n{inner}\n{fence}"))
    }

    fn text(&mut self, value: &str, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        let escaped = escape_markdown(value, self.line_start);
        self.line_start &= value.is_empty();
        Ok(escaped)
    }

    fn soft_break(&mut self, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.line_start = true;
        Ok("\n".to_string())
    }

    fn hard_break(&mut self, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        if self.in_cell {
            return Ok("<br>".to_string());
        }
        self.line_start = true;
        Ok("\\\n".to_string())
    }

    fn emphasis(&mut self, children: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.delimited("*", children, ctx)
    }

    fn strong(&mut self, children: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.delimited("**", children, ctx)
    }

    fn strikethrough(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        self.delimited("~~", children, ctx)
    }

    fn code(&mut self, value: &str, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.line_start = false;
        Ok(self.cell_safe(code_span(value)))
    }

    fn math_inline(&mut self, tex: &str, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.line_start = false;
        Ok(self.cell_safe(delimit(tex, false)))
    }

    fn math_block(&mut self, tex: &str, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        Ok(delimit(tex, true))
    }

    fn image(&mut self, image: &Image, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.line_start = false;
        let mut target = destination(&image.src);
        if let Some(image_title) = &image.title {
            target = format!("{target} {}", title(image_title));
        }
        Ok(format!("![{}]({target})", escape_markdown(&image.alt, false)))
    }

    fn link(&mut self, link: &Link, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.line_start = false;
        let inner = self.inlines(&link.children, ctx)?;
        self.line_start = false;
        let mut target = destination(&link.href);
        if let Some(link_title) = &link.title {
            target = format!("{target} {}", title(link_title));
        }
        Ok(format!("[{inner}]({target})"))
    }

    fn placeholder(&mut self, label: &str, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.line_start = false;
        Ok(format!("<placeholder>{label}</placeholder>"))
    }

    fn heading(
        &mut self,
        level: u8,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        let hashes = "#".repeat(heading_index(level) + 1);
        let inner = self.line(children, ctx)?;
        Ok(format!("{hashes} {}", inner.replace('\n', " ")))
    }

    fn blockquote(&mut self, children: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        let body = self.blocks(children, ctx)?;
        Ok(body
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn list(&mut self, list: &List, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        let mut items = Vec::with_capacity(list.items.len());
        for (index, item) in list.items.iter().enumerate() {
            let marker = if list.ordered {
                format!("{}.", list.start + index as u64)
            } else {
                "-".to_string()
            };
            let parts = self.block_parts(&item.children, ctx)?;
            // A blank line inside an item would make the whole list loose
            let body = if list.tight {
                parts.into_iter().filter(|part| !part.is_empty()).collect::<Vec<_>>().join("\n")
            } else {
                self.join(parts, Separator::Block)
            };
            let indent = " ".repeat(marker.len() + 1);
            items.push(format!("{marker} {}", indent_continuation(&body, &indent)));
        }
        let separator = if list.tight { "\n" } else { "\n\n" };
        Ok(items.join(separator))
    }

    fn table(&mut self, table: &Table, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        let layout = TableLayout::of(table);
        if layout.columns == 0 {
            return Ok(String::new());
        }

        let mut sections = [Vec::new(), Vec::new()];
        for (section, rows) in sections.iter_mut().zip([&table.head, &table.body]) {
            for row in rows.iter() {
                let mut cells = Vec::with_capacity(row.cells.len());
                self.in_cell = true;
                for cell in &row.cells {
                    cells.push(self.line(&cell.children, ctx)?.replace('\n', " "));
                }
                self.in_cell = false;
                section.push(cells);
            }
        }
        let [head, body] = sections;

        Ok(PipeTable {
            layout: &layout,
            head,
            body,
        }
        .serialize())
    }

    fn code_block(
        &mut self,
        info: Option<&str>,
        value: &str,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        let fence = "`".repeat(fence_length(value));
        let body = value.trim_end_matches('\n');
        Ok(format!("{fence}{}\n{body}\n{fence}", info.unwrap_or("")))
    }

    fn rule(&mut self, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        Ok("---".to_string())
    }
}
