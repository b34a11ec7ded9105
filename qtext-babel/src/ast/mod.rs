//! Document AST
//!
//! The closed node set every renderer works from. The tree is built once per
//! parse (see [`build`]) and never mutated afterwards; renderers receive it by
//! shared reference.
//!
//! ```text
//! Document
//! └── Container (root, full style source)
//!     ├── Heading { level, children: [inline] }
//!     ├── Paragraph { children: [inline] }
//!     ├── Container (named, own style)
//!     │   └── ...
//!     ├── List { items: [ListItem { children: [block] }] }
//!     └── Table { head: [TableRow], body: [TableRow] }
//! ```
//!
//! The AST serializes to JSON with a `type` tag on every node.

pub mod build;

pub use build::build_document;

use crate::error::FormatError;
use crate::format::OutputFormat;
use crate::render::RenderOptions;
use crate::resources::image::is_passthrough;
use crate::style::{Alignment, StyleMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    // Blocks
    Container(Container),
    Paragraph { children: Vec<Node> },
    Heading { level: u8, children: Vec<Node> },
    List(List),
    Blockquote { children: Vec<Node> },
    Table(Table),
    CodeBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        info: Option<String>,
        text: String,
    },
    MathBlock { text: String },
    Rule,

    /// Labeled blank, block or inline
    Placeholder { label: String },

    // Inlines
    Text { text: String },
    SoftBreak,
    HardBreak,
    Code { text: String },
    MathInline { text: String },
    Emphasis { children: Vec<Node> },
    Strong { children: Vec<Node> },
    Strikethrough { children: Vec<Node> },
    Link(Link),
    Image(Image),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph { children }
    }

    /// True for nodes that occur inside a paragraph, heading or cell.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Node::Text { .. }
                | Node::SoftBreak
                | Node::HardBreak
                | Node::Code { .. }
                | Node::MathInline { .. }
                | Node::Emphasis { .. }
                | Node::Strong { .. }
                | Node::Strikethrough { .. }
                | Node::Link(_)
                | Node::Image(_)
        )
    }

    /// Visit this node and every descendant, parents first.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        match self {
            Node::Container(container) => walk_all(&container.children, visit),
            Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::Blockquote { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Strikethrough { children } => walk_all(children, visit),
            Node::Link(link) => walk_all(&link.children, visit),
            Node::List(list) => {
                for item in &list.items {
                    walk_all(&item.children, visit);
                }
            }
            Node::Table(table) => {
                for cell in table.rows().flat_map(|row| row.cells.iter()) {
                    walk_all(&cell.children, visit);
                }
            }
            Node::CodeBlock { .. }
            | Node::MathBlock { .. }
            | Node::Rule
            | Node::Placeholder { .. }
            | Node::Text { .. }
            | Node::SoftBreak
            | Node::HardBreak
            | Node::Code { .. }
            | Node::MathInline { .. }
            | Node::Image(_) => {}
        }
    }
}

fn walk_all<'a>(nodes: &'a [Node], visit: &mut dyn FnMut(&'a Node)) {
    for node in nodes {
        node.walk(visit);
    }
}

/// A `:::` block, or the synthetic document root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub root: bool,
    /// Declared style of this container alone
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub style: StyleMap,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub start: u64,
    pub tight: bool,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub head: Vec<TableRow>,
    pub body: Vec<TableRow>,
}

impl Table {
    /// Header rows, then body rows.
    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.head.iter().chain(self.body.iter())
    }

    /// Maximum row width over header and body rows.
    pub fn column_count(&self) -> usize {
        self.rows().map(|row| row.cells.len()).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub header: bool,
    /// Raw per-cell style string, e.g. `text-align:center`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub children: Vec<Node>,
}

impl TableCell {
    pub fn alignment(&self) -> Option<Alignment> {
        self.style.as_deref().and_then(Alignment::from_cell_style)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Source exactly as written in the document
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A parsed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Directory relative image sources resolve against
    #[serde(skip)]
    pub base_dir: PathBuf,
    /// `None` for an empty document
    pub root: Option<Container>,
}

impl Document {
    pub fn new(root: Option<Container>, base_dir: impl Into<PathBuf>) -> Self {
        Document {
            base_dir: base_dir.into(),
            root,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root
            .as_ref()
            .map_or(true, |root| root.children.is_empty())
    }

    /// Top-level blocks of the root container.
    pub fn blocks(&self) -> &[Node] {
        self.root
            .as_ref()
            .map(|root| root.children.as_slice())
            .unwrap_or(&[])
    }

    /// Visit every node below the root, parents first.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        walk_all(self.blocks(), visit);
    }

    pub fn render(
        &self,
        format: OutputFormat,
        options: &RenderOptions<'_>,
    ) -> Result<String, FormatError> {
        crate::render::render(self, format, options)
    }

    /// Local image files referenced by the document, joined with `base_dir`.
    ///
    /// Remote and data URI sources are skipped.
    pub fn collect_file_paths(&self, base_dir: &Path) -> BTreeSet<PathBuf> {
        let mut paths = BTreeSet::new();
        self.walk(&mut |node| {
            if let Node::Image(image) = node {
                if !is_passthrough(&image.src) {
                    paths.insert(base_dir.join(&image.src));
                }
            }
        });
        paths
    }

    /// Labels of every placeholder in the document.
    pub fn collect_placeholders(&self) -> BTreeSet<String> {
        let mut labels = BTreeSet::new();
        self.walk(&mut |node| {
            if let Node::Placeholder { label } = node {
                labels.insert(label.clone());
            }
        });
        labels
    }
}
