//! LaTeX output
//!
//! Produces a body fragment meant to be placed inside a document that loads
//! `graphicx`, `hyperref`, `ulem` (for `\sout`) and `enumitem` (for
//! `[start=N]`). Preamble generation belongs to the caller.
//!
//! `\verb` cannot appear inside a command argument, so code spans nested in
//! headings, emphasis, links or table cells fall back to `\texttt`. A line
//! break inside a table cell would end the row; such cells are set as a
//! one-column `tabular` of their own.
//!
//! Containers apply the full cascade at every level: each one opens its own
//! `\fontsize` group and alignment environment, so a nested container never
//! depends on what its parent emitted.

pub mod escape;

use crate::ast::{Container, Image, Link, List, Node, Table};
use crate::error::FormatError;
use crate::render::{heading_index, RenderContext, Renderer, Separator, TableLayout};
use crate::resources::image::{is_passthrough, ImageTarget};
use crate::resources::math::delimit;
use crate::style::{format_number, keys, Alignment, AppliedStyle};
pub use escape::{escape_tex, escape_url, graphics_path, unescape_tex};

const HEADINGS: [&str; 6] = [
    r"\section*",
    r"\subsection*",
    r"\subsubsection*",
    r"\paragraph*",
    r"\subparagraph*",
    r"\textbf",
];

/// Delimiters tried, in order, for `\verb`.
pub const VERB_DELIMITERS: &str = "|!+=/:;@#-_,.~\"'";

#[derive(Debug, Default)]
pub struct LatexRenderer {
    /// Nesting depth of command arguments at the current position
    argument_depth: usize,
    in_cell: bool,
    cell_broken: bool,
}

impl LatexRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inline content set as a command argument.
    fn argument(&mut self, children: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.argument_depth += 1;
        let inner = self.inlines(children, ctx);
        self.argument_depth -= 1;
        inner
    }

    fn command(
        &mut self,
        name: &str,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        let inner = self.argument(children, ctx)?;
        Ok(format!("{name}{{{inner}}}"))
    }

    fn table_cell(
        &mut self,
        children: &[Node],
        column: char,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        self.in_cell = true;
        self.cell_broken = false;
        let content = self.argument(children, ctx);
        self.in_cell = false;
        let content = content?;
        if self.cell_broken {
            Ok(format!(
                "\\begin{{tabular}}[c]{{@{{}}{column}@{{}}}}{content}\\end{{tabular}}"
            ))
        } else {
            Ok(content)
        }
    }
}

/// First delimiter absent from `text`.
pub fn verb_delimiter(text: &str) -> Result<char, FormatError> {
    VERB_DELIMITERS
        .chars()
        .find(|delimiter| !text.contains(*delimiter))
        .ok_or_else(|| {
            FormatError::ResourceError(format!(
                "no \\verb delimiter available for code span: {text}"
            ))
        })
}

fn environment(name: &str, options: &str, body: &str) -> String {
    format!("\\begin{{{name}}}{options}\n{body}\n\\end{{{name}}}")
}

fn alignment_environment(alignment: Option<Alignment>) -> Option<&'static str> {
    match alignment? {
        Alignment::Center => Some("center"),
        Alignment::Left => Some("flushleft"),
        Alignment::Right => Some("flushright"),
        Alignment::Justify => None,
    }
}

fn column_spec(alignment: Option<Alignment>) -> char {
    match alignment {
        Some(Alignment::Center) => 'c',
        Some(Alignment::Right) => 'r',
        _ => 'l',
    }
}

impl Renderer for LatexRenderer {
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
        if fragment.is_empty() {
            return Ok(fragment);
        }
        Ok(format!("{}\n", fragment.trim_end()))
    }

    fn wrap_container(
        &mut self,
        _container: &Container,
        applied: &AppliedStyle,
        body: String,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        let style = &applied.full;
        let mut output = body;

        if let Some(env) = alignment_environment(style.alignment(keys::TEXT_ALIGN)) {
            output = environment(env, "", &output);
        }
        if let Some(size) = style.number(keys::FONT_SIZE) {
            output = format!(
                "{{\\fontsize{{{}}}{{{}}}\\selectfont\n{output}\n}}",
                format_number(size),
                format_number(size * 1.2)
            );
        }
        Ok(output)
    }

    fn text(&mut self, value: &str, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        Ok(escape_tex(value))
    }

    fn soft_break(&mut self, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        Ok("\n".to_string())
    }

    fn hard_break(&mut self, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        if self.in_cell {
            self.cell_broken = true;
            return Ok("\\\\ ".to_string());
        }
        Ok("\\\\\n".to_string())
    }

    fn emphasis(&mut self, children: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.command(r"\emph", children, ctx)
    }

    fn strong(&mut self, children: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        self.command(r"\textbf", children, ctx)
    }

    fn strikethrough(
        &mut self,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        self.command(r"\sout", children, ctx)
    }

    fn code(&mut self, value: &str, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        if self.argument_depth > 0 {
            return Ok(format!("\\texttt{{{}}}", escape_tex(value)));
        }
        let delimiter = verb_delimiter(value)?;
        Ok(format!("\\verb{delimiter}{value}{delimiter}"))
    }

    fn math_inline(&mut self, tex: &str, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        Ok(delimit(tex, false))
    }

    fn math_block(&mut self, tex: &str, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        Ok(delimit(tex, true))
    }

    fn image(&mut self, image: &Image, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        if is_passthrough(&image.src) {
            return Err(FormatError::ResourceError(format!(
                "remote image cannot be included in LaTeX output: {}",
                image.src
            )));
        }
        let path = graphics_path(&ctx.resolve_image(&image.src, ImageTarget::Path)?)?;
        Ok(format!(
            "\\includegraphics[width={}\\linewidth]{{{path}}}",
            format_number(ctx.image_width())
        ))
    }

    fn link(&mut self, link: &Link, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        let inner = self.argument(&link.children, ctx)?;
        Ok(format!("\\href{{{}}}{{{inner}}}", escape_url(&link.href)))
    }

    fn placeholder(&mut self, label: &str, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        Ok(format!("\\fbox{{\\texttt{{{}}}}}", escape_tex(label)))
    }

    fn heading(
        &mut self,
        level: u8,
        children: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        self.command(HEADINGS[heading_index(level)], children, ctx)
    }

    fn blockquote(&mut self, children: &[Node], ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        let body = self.blocks(children, ctx)?;
        Ok(environment("quote", "", &body))
    }

    fn list(&mut self, list: &List, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        let mut items = Vec::with_capacity(list.items.len());
        for item in &list.items {
            let body = self.blocks(&item.children, ctx)?;
            items.push(format!("\\item {body}"));
        }
        let body = items.join("\n");

        if list.ordered {
            let options = if list.start == 1 {
                String::new()
            } else {
                format!("[start={}]", list.start)
            };
            Ok(environment("enumerate", &options, &body))
        } else {
            Ok(environment("itemize", "", &body))
        }
    }

    fn table(&mut self, table: &Table, ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        let layout = TableLayout::of(table);
        if layout.columns == 0 {
            return Ok(String::new());
        }
        let style = ctx.table_style();

        let columns: Vec<String> = (0..layout.columns)
            .map(|column| column_spec(layout.alignment(column)).to_string())
            .collect();
        let spec = if style.border {
            format!("|{}|", columns.join("|"))
        } else {
            columns.concat()
        };

        let mut lines = Vec::new();
        if style.border {
            lines.push(r"\hline".to_string());
        }
        let head_rows = table.head.len();
        for (index, row) in table.rows().enumerate() {
            let mut cells = Vec::with_capacity(layout.columns);
            for (column, cell) in row.cells.iter().enumerate() {
                let content =
                    self.table_cell(&cell.children, column_spec(layout.alignment(column)), ctx)?;
                if cell.header && style.header_bold && !content.is_empty() {
                    cells.push(format!("\\textbf{{{content}}}"));
                } else {
                    cells.push(content);
                }
            }
            cells.extend(std::iter::repeat(String::new()).take(layout.missing_cells(row)));
            lines.push(format!("{} \\\\", cells.join(" & ")));

            let last_head_row = head_rows > 0 && index + 1 == head_rows;
            if style.border || (last_head_row && style.header_rule) {
                lines.push(r"\hline".to_string());
            }
        }

        let tabular = environment("tabular", &format!("{{{spec}}}"), &lines.join("\n"));
        let table = format!(
            "{{\\renewcommand{{\\arraystretch}}{{{}}}\\setlength{{\\tabcolsep}}{{{}em}}\n{tabular}\n}}",
            format_number(style.cell_height),
            format_number(style.horizontal_padding())
        );
        Ok(match alignment_environment(style.content_align) {
            Some(env) => environment(env, "", &table),
            None => table,
        })
    }

    fn code_block(
        &mut self,
        _info: Option<&str>,
        value: &str,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<String, FormatError> {
        if value.contains(r"\end{verbatim}") {
            return Err(FormatError::ResourceError(
                "code block contains \\end{verbatim}".to_string(),
            ));
        }
        Ok(environment("verbatim", "", value.trim_end_matches('\n')))
    }

    fn rule(&mut self, _ctx: &mut RenderContext<'_>) -> Result<String, FormatError> {
        Ok(r"\noindent\rule{\linewidth}{0.4pt}".to_string())
    }
}
