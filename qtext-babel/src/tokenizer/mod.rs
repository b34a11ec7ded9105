//! Tokenizer adapter
//!
//! Wraps the comrak markdown parser and flattens its tree into the token
//! stream the post-processing pipeline works on.
//!
//! Pipeline: source text → container segments → comrak AST per segment → tokens
//!
//! Extensions enabled on top of CommonMark: GFM tables, strikethrough and
//! dollar math (`$…$`, `$$…$$`). Named `:::` containers are split out before
//! comrak runs (see [`containers`]) since comrak has no generic fenced-div
//! syntax.
//!
//! Mapping notes:
//!
//! - A paragraph holding nothing but one display math span becomes a block
//!   [`TokenTag::MathBlock`]; display math inside running text stays inline.
//! - Table cells carry their column alignment as a `style` attribute
//!   (`text-align:center`), header and body rows are grouped under
//!   [`TokenTag::TableHead`] and [`TokenTag::TableBody`].
//! - Adjacent text nodes are merged, so an inline run never holds two text
//!   tokens in a row.

pub mod containers;
pub mod token;

pub use containers::{split_containers, Segment};
pub use token::{source_text, Nesting, Token, TokenTag};

use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{parse_document, Arena, ComrakOptions};

/// Tokenize qtext source.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for segment in split_containers(source) {
        push_segment(segment, &mut tokens);
    }
    tokens
}

fn push_segment(segment: Segment, tokens: &mut Vec<Token>) {
    match segment {
        Segment::Markdown(text) => tokens.extend(tokenize_markdown(&text)),
        Segment::Container { name, body } => {
            tokens.push(Token::open(TokenTag::Container).with_attr("name", name));
            for inner in body {
                push_segment(inner, tokens);
            }
            tokens.push(Token::close(TokenTag::Container));
        }
    }
}

pub fn comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.math_dollars = true;
    options
}

fn tokenize_markdown(text: &str) -> Vec<Token> {
    let arena = Arena::new();
    let root = parse_document(&arena, text, &comrak_options());

    let mut tokens = Vec::new();
    for child in root.children() {
        collect_block(child, &mut tokens);
    }
    tokens
}

fn collect_block<'a>(node: &'a AstNode<'a>, tokens: &mut Vec<Token>) {
    let data = node.data.borrow();

    match &data.value {
        NodeValue::Paragraph => {
            if let Some(math) = sole_display_math(node) {
                tokens.push(Token::content_leaf(TokenTag::MathBlock, math));
                return;
            }
            tokens.push(Token::open(TokenTag::Paragraph));
            tokens.push(inline_run(node));
            tokens.push(Token::close(TokenTag::Paragraph));
        }

        NodeValue::Heading(heading) => {
            let level = heading.level.to_string();
            tokens.push(Token::open(TokenTag::Heading).with_attr("level", level));
            tokens.push(inline_run(node));
            tokens.push(Token::close(TokenTag::Heading));
        }

        NodeValue::List(list) => {
            let (tag, open) = match list.list_type {
                ListType::Bullet => (TokenTag::BulletList, Token::open(TokenTag::BulletList)),
                ListType::Ordered => (
                    TokenTag::OrderedList,
                    Token::open(TokenTag::OrderedList).with_attr("start", list.start.to_string()),
                ),
            };
            tokens.push(open.with_attr("tight", list.tight.to_string()));
            for child in node.children() {
                collect_block(child, tokens);
            }
            tokens.push(Token::close(tag));
        }

        NodeValue::Item(_) => {
            tokens.push(Token::open(TokenTag::ListItem));
            for child in node.children() {
                collect_block(child, tokens);
            }
            tokens.push(Token::close(TokenTag::ListItem));
        }

        NodeValue::BlockQuote => {
            tokens.push(Token::open(TokenTag::Blockquote));
            for child in node.children() {
                collect_block(child, tokens);
            }
            tokens.push(Token::close(TokenTag::Blockquote));
        }

        NodeValue::CodeBlock(code) => {
            let mut token = Token::content_leaf(TokenTag::CodeBlock, code.literal.clone());
            let info = code.info.trim();
            if !info.is_empty() {
                token.set_attr("info", info);
            }
            tokens.push(token);
        }

        NodeValue::HtmlBlock(html) => {
            tokens.push(Token::content_leaf(TokenTag::HtmlBlock, html.literal.clone()));
        }

        NodeValue::ThematicBreak => tokens.push(Token::leaf(TokenTag::Rule)),

        NodeValue::Table(table) => {
            let alignments = table.alignments.clone();
            collect_table(node, &alignments, tokens);
        }

        other => {
            log::debug!("skipping unsupported block node {other:?}");
        }
    }
}

fn collect_table<'a>(node: &'a AstNode<'a>, alignments: &[TableAlignment], tokens: &mut Vec<Token>) {
    tokens.push(Token::open(TokenTag::Table));

    let mut section: Option<TokenTag> = None;
    for row in node.children() {
        let header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
        let wanted = if header {
            TokenTag::TableHead
        } else {
            TokenTag::TableBody
        };
        if section != Some(wanted) {
            if let Some(open) = section {
                tokens.push(Token::close(open));
            }
            tokens.push(Token::open(wanted));
            section = Some(wanted);
        }

        let cell_tag = if header {
            TokenTag::TableHeaderCell
        } else {
            TokenTag::TableCell
        };

        tokens.push(Token::open(TokenTag::TableRow));
        for (column, cell) in row.children().enumerate() {
            let mut open = Token::open(cell_tag);
            if let Some(align) = alignments.get(column).and_then(|a| alignment_keyword(*a)) {
                open.set_attr("style", format!("text-align:{align}"));
            }
            tokens.push(open);
            tokens.push(inline_run(cell));
            tokens.push(Token::close(cell_tag));
        }
        tokens.push(Token::close(TokenTag::TableRow));
    }

    if let Some(open) = section {
        tokens.push(Token::close(open));
    }
    tokens.push(Token::close(TokenTag::Table));
}

fn alignment_keyword(alignment: TableAlignment) -> Option<&'static str> {
    match alignment {
        TableAlignment::Left => Some("left"),
        TableAlignment::Center => Some("center"),
        TableAlignment::Right => Some("right"),
        TableAlignment::None => None,
    }
}

/// The literal of a paragraph's only display math span, ignoring blank text.
fn sole_display_math<'a>(node: &'a AstNode<'a>) -> Option<String> {
    let mut found = None;
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Math(math) if math.display_math && found.is_none() => {
                found = Some(math.literal.clone());
            }
            NodeValue::Text(text) if text.trim().is_empty() => {}
            NodeValue::SoftBreak | NodeValue::LineBreak => {}
            _ => return None,
        }
    }
    found
}

fn inline_run<'a>(node: &'a AstNode<'a>) -> Token {
    let mut children = Vec::new();
    for child in node.children() {
        collect_inline(child, &mut children);
    }
    Token::inline(children)
}

fn push_text(out: &mut Vec<Token>, text: &str) {
    match out.last_mut() {
        Some(last) if last.tag == TokenTag::Text && last.nesting == Nesting::Leaf => {
            last.content.push_str(text);
        }
        _ => out.push(Token::text(text)),
    }
}

fn collect_inline<'a>(node: &'a AstNode<'a>, out: &mut Vec<Token>) {
    let data = node.data.borrow();

    let wrap = |tag: TokenTag, open: Token, out: &mut Vec<Token>| {
        out.push(open);
        for child in node.children() {
            collect_inline(child, out);
        }
        out.push(Token::close(tag));
    };

    match &data.value {
        NodeValue::Text(text) => push_text(out, text),
        NodeValue::SoftBreak => out.push(Token::leaf(TokenTag::SoftBreak)),
        NodeValue::LineBreak => out.push(Token::leaf(TokenTag::HardBreak)),
        NodeValue::Code(code) => {
            out.push(Token::content_leaf(TokenTag::Code, code.literal.clone()));
        }
        NodeValue::Math(math) => {
            out.push(Token::content_leaf(TokenTag::MathInline, math.literal.clone()));
        }
        NodeValue::HtmlInline(html) => {
            out.push(Token::content_leaf(TokenTag::HtmlInline, html.clone()));
        }
        NodeValue::Emph => wrap(TokenTag::Emphasis, Token::open(TokenTag::Emphasis), out),
        NodeValue::Strong => wrap(TokenTag::Strong, Token::open(TokenTag::Strong), out),
        NodeValue::Strikethrough => wrap(
            TokenTag::Strikethrough,
            Token::open(TokenTag::Strikethrough),
            out,
        ),
        NodeValue::Link(link) => {
            let mut open = Token::open(TokenTag::Link).with_attr("href", link.url.clone());
            if !link.title.is_empty() {
                open.set_attr("title", link.title.clone());
            }
            wrap(TokenTag::Link, open, out);
        }
        NodeValue::Image(link) => {
            let mut alt = String::new();
            for child in node.children() {
                collect_plain_text(child, &mut alt);
            }
            let mut image = Token::leaf(TokenTag::Image)
                .with_attr("src", link.url.clone())
                .with_attr("alt", alt);
            if !link.title.is_empty() {
                image.set_attr("title", link.title.clone());
            }
            out.push(image);
        }
        _ => {
            for child in node.children() {
                collect_inline(child, out);
            }
        }
    }
}

fn collect_plain_text<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::Math(math) => output.push_str(&math.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_plain_text(child, output);
            }
        }
    }
}
