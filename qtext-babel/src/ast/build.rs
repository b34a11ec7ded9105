//! Token stream to AST
//!
//! A stack of open frames mirrors the open tokens seen so far. An open token
//! pushes a frame, a close token pops the innermost frame (which must carry the
//! same tag), turns it into a node and hands it to the new innermost frame.
//! Leaves go straight into the innermost frame. Inline runs are built the same
//! way with their own stack.
//!
//! Table head and body tokens push no frame; they only switch which list the
//! following rows land in.
//!
//! Raw markup still present at this point means the pipeline was skipped and
//! is reported as a parse error, as are unbalanced streams.

use super::{Container, Document, Image, Link, List, ListItem, Node, Table, TableCell, TableRow};
use crate::error::FormatError;
use crate::style::StyleMap;
use crate::tokenizer::{source_text, Nesting, Token, TokenTag};
use std::path::Path;

/// Build a document from a post-processed token stream.
pub fn build_document(tokens: &[Token], base_dir: &Path) -> Result<Document, FormatError> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut top: Vec<Node> = Vec::new();

    for token in tokens {
        match token.nesting {
            Nesting::Open if is_section(token.tag) => match stack.last_mut() {
                Some(Frame::Table { in_head, .. }) => *in_head = token.tag == TokenTag::TableHead,
                _ => return Err(misplaced(token)),
            },
            Nesting::Close if is_section(token.tag) => {}
            Nesting::Open => {
                let frame = Frame::open(token, stack.last())?;
                stack.push(frame);
            }
            Nesting::Close => {
                let frame = stack.pop().ok_or_else(|| {
                    FormatError::parse(
                        format!("close {} without open block", token.tag.name()),
                        token.tag.name(),
                    )
                })?;
                if frame.tag() != token.tag {
                    return Err(FormatError::parse(
                        format!(
                            "close {} does not match open {}",
                            token.tag.name(),
                            frame.tag().name()
                        ),
                        token.tag.name(),
                    ));
                }
                deliver(&mut stack, &mut top, frame.finish(), token)?;
            }
            Nesting::Leaf => {
                for node in leaf_nodes(token)? {
                    deliver(&mut stack, &mut top, Built::Node(node), token)?;
                }
            }
        }
    }

    if !stack.is_empty() {
        return Err(FormatError::parse(
            format!("{} unclosed blocks at end of input", stack.len()),
            source_text(tokens),
        ));
    }

    Ok(Document::new(into_root(top), base_dir))
}

fn deliver(
    stack: &mut [Frame],
    top: &mut Vec<Node>,
    built: Built,
    token: &Token,
) -> Result<(), FormatError> {
    match stack.last_mut() {
        Some(frame) => frame.accept(built, token),
        None => match built {
            Built::Node(node) => {
                top.push(node);
                Ok(())
            }
            _ => Err(misplaced(token)),
        },
    }
}

/// The single root container, wrapping loose nodes when there is none.
fn into_root(mut nodes: Vec<Node>) -> Option<Container> {
    if nodes.is_empty() {
        return None;
    }
    let single_root = nodes.len() == 1
        && matches!(nodes.first(), Some(Node::Container(container)) if container.root);
    if single_root {
        if let Some(Node::Container(root)) = nodes.pop() {
            return Some(root);
        }
    }
    Some(Container {
        name: None,
        root: true,
        style: StyleMap::default(),
        children: nodes,
    })
}

fn is_section(tag: TokenTag) -> bool {
    matches!(tag, TokenTag::TableHead | TokenTag::TableBody)
}

fn misplaced(token: &Token) -> FormatError {
    let context = if token.content.is_empty() {
        token.tag.name().to_string()
    } else {
        token.content.trim().to_string()
    };
    FormatError::parse(format!("unexpected {} token", token.tag.name()), context)
}

enum Frame {
    Container(Container),
    Paragraph(Vec<Node>),
    Heading(u8, Vec<Node>),
    List(TokenTag, List),
    ListItem(Vec<Node>),
    Blockquote(Vec<Node>),
    Table { table: Table, in_head: bool },
    Row { cells: Vec<TableCell>, header: bool },
    Cell(TokenTag, TableCell),
}

enum Built {
    Node(Node),
    Item(ListItem),
    Row { row: TableRow, header: bool },
    Cell(TableCell),
}

impl Frame {
    fn open(token: &Token, parent: Option<&Frame>) -> Result<Frame, FormatError> {
        let frame = match token.tag {
            TokenTag::Container => Frame::Container(Container {
                name: token.attr("name").map(str::to_string),
                root: token.attr("root") == Some("true"),
                style: token.style.clone(),
                children: Vec::new(),
            }),
            TokenTag::Paragraph => Frame::Paragraph(Vec::new()),
            TokenTag::Heading => {
                let level = token
                    .attr("level")
                    .and_then(|l| l.parse::<u8>().ok())
                    .unwrap_or(1)
                    .clamp(1, 6);
                Frame::Heading(level, Vec::new())
            }
            TokenTag::BulletList | TokenTag::OrderedList => Frame::List(
                token.tag,
                List {
                    ordered: token.tag == TokenTag::OrderedList,
                    start: token
                        .attr("start")
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(1),
                    tight: token.attr("tight") == Some("true"),
                    items: Vec::new(),
                },
            ),
            TokenTag::ListItem => Frame::ListItem(Vec::new()),
            TokenTag::Blockquote => Frame::Blockquote(Vec::new()),
            TokenTag::Table => Frame::Table {
                table: Table::default(),
                in_head: false,
            },
            TokenTag::TableRow => Frame::Row {
                cells: Vec::new(),
                header: matches!(parent, Some(Frame::Table { in_head: true, .. })),
            },
            TokenTag::TableHeaderCell | TokenTag::TableCell => Frame::Cell(
                token.tag,
                TableCell {
                    header: token.tag == TokenTag::TableHeaderCell,
                    style: token.attr("style").map(str::to_string),
                    children: Vec::new(),
                },
            ),
            _ => return Err(misplaced(token)),
        };
        Ok(frame)
    }

    fn tag(&self) -> TokenTag {
        match self {
            Frame::Container(_) => TokenTag::Container,
            Frame::Paragraph(_) => TokenTag::Paragraph,
            Frame::Heading(..) => TokenTag::Heading,
            Frame::List(tag, _) | Frame::Cell(tag, _) => *tag,
            Frame::ListItem(_) => TokenTag::ListItem,
            Frame::Blockquote(_) => TokenTag::Blockquote,
            Frame::Table { .. } => TokenTag::Table,
            Frame::Row { .. } => TokenTag::TableRow,
        }
    }

    fn finish(self) -> Built {
        match self {
            Frame::Container(container) => Built::Node(Node::Container(container)),
            Frame::Paragraph(children) => Built::Node(Node::Paragraph { children }),
            Frame::Heading(level, children) => Built::Node(Node::Heading { level, children }),
            Frame::List(_, list) => Built::Node(Node::List(list)),
            Frame::ListItem(children) => Built::Item(ListItem { children }),
            Frame::Blockquote(children) => Built::Node(Node::Blockquote { children }),
            Frame::Table { table, .. } => Built::Node(Node::Table(table)),
            Frame::Row { cells, header } => Built::Row {
                row: TableRow { cells },
                header,
            },
            Frame::Cell(_, cell) => Built::Cell(cell),
        }
    }

    fn accept(&mut self, built: Built, token: &Token) -> Result<(), FormatError> {
        match (self, built) {
            (Frame::Container(Container { children, .. }), Built::Node(node))
            | (Frame::Paragraph(children), Built::Node(node))
            | (Frame::Heading(_, children), Built::Node(node))
            | (Frame::ListItem(children), Built::Node(node))
            | (Frame::Blockquote(children), Built::Node(node))
            | (Frame::Cell(_, TableCell { children, .. }), Built::Node(node)) => {
                children.push(node);
            }
            (Frame::List(_, list), Built::Item(item)) => list.items.push(item),
            (Frame::Table { table, .. }, Built::Row { row, header }) => {
                if header {
                    table.head.push(row);
                } else {
                    table.body.push(row);
                }
            }
            (Frame::Row { cells, .. }, Built::Cell(cell)) => cells.push(cell),
            _ => return Err(misplaced(token)),
        }
        Ok(())
    }
}

/// Nodes produced by a leaf token. An inline run yields its whole content.
fn leaf_nodes(token: &Token) -> Result<Vec<Node>, FormatError> {
    let node = match token.tag {
        TokenTag::Inline => return build_inlines(&token.children),
        TokenTag::CodeBlock => Node::CodeBlock {
            info: token.attr("info").map(str::to_string),
            text: token.content.clone(),
        },
        TokenTag::MathBlock => Node::MathBlock {
            text: token.content.clone(),
        },
        TokenTag::Rule => Node::Rule,
        TokenTag::HardBreak => Node::HardBreak,
        TokenTag::SoftBreak => Node::SoftBreak,
        TokenTag::Placeholder => Node::Placeholder {
            label: token.content.clone(),
        },
        TokenTag::Text => Node::text(token.content.clone()),
        _ => return Err(misplaced(token)),
    };
    Ok(vec![node])
}

struct InlineFrame {
    tag: TokenTag,
    href: String,
    title: Option<String>,
    children: Vec<Node>,
}

/// Build the nodes of one inline run.
pub(crate) fn build_inlines(tokens: &[Token]) -> Result<Vec<Node>, FormatError> {
    let mut stack: Vec<InlineFrame> = Vec::new();
    let mut top: Vec<Node> = Vec::new();

    for token in tokens {
        match token.nesting {
            Nesting::Open => match token.tag {
                TokenTag::Emphasis | TokenTag::Strong | TokenTag::Strikethrough | TokenTag::Link => {
                    stack.push(InlineFrame {
                        tag: token.tag,
                        href: token.attr("href").unwrap_or_default().to_string(),
                        title: token.attr("title").map(str::to_string),
                        children: Vec::new(),
                    });
                }
                _ => return Err(misplaced(token)),
            },
            Nesting::Close => {
                let frame = stack
                    .pop()
                    .filter(|frame| frame.tag == token.tag)
                    .ok_or_else(|| {
                        FormatError::parse(
                            format!("unbalanced inline {}", token.tag.name()),
                            source_text(tokens),
                        )
                    })?;
                let children = frame.children;
                let node = match frame.tag {
                    TokenTag::Emphasis => Node::Emphasis { children },
                    TokenTag::Strong => Node::Strong { children },
                    TokenTag::Strikethrough => Node::Strikethrough { children },
                    _ => Node::Link(Link {
                        href: frame.href,
                        title: frame.title,
                        children,
                    }),
                };
                push_inline(&mut stack, &mut top, node);
            }
            Nesting::Leaf => {
                let node = match token.tag {
                    TokenTag::Text => Node::text(token.content.clone()),
                    TokenTag::SoftBreak => Node::SoftBreak,
                    TokenTag::HardBreak => Node::HardBreak,
                    TokenTag::Code => Node::Code {
                        text: token.content.clone(),
                    },
                    TokenTag::MathInline => Node::MathInline {
                        text: token.content.clone(),
                    },
                    TokenTag::Placeholder => Node::Placeholder {
                        label: token.content.clone(),
                    },
                    TokenTag::Image => Node::Image(Image {
                        src: token.attr("src").unwrap_or_default().to_string(),
                        alt: token.attr("alt").unwrap_or_default().to_string(),
                        title: token.attr("title").map(str::to_string),
                    }),
                    _ => return Err(misplaced(token)),
                };
                push_inline(&mut stack, &mut top, node);
            }
        }
    }

    if !stack.is_empty() {
        return Err(FormatError::parse(
            "unclosed inline formatting",
            source_text(tokens),
        ));
    }
    Ok(top)
}

/// Append to the innermost open frame, merging text left adjacent by removed markup.
fn push_inline(stack: &mut [InlineFrame], top: &mut Vec<Node>, node: Node) {
    let siblings = match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => top,
    };
    if let Node::Text { text: more } = &node {
        if let Some(Node::Text { text }) = siblings.last_mut() {
            text.push_str(more);
            return;
        }
    }
    siblings.push(node);
}
