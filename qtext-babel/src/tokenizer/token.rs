//! Token stream primitives
//!
//! Block structure is a flat stream of [`Nesting::Open`]/[`Nesting::Close`]
//! pairs with [`Nesting::Leaf`] tokens in between. The inline run of a
//! paragraph, heading or table cell is carried by a single [`TokenTag::Inline`]
//! leaf whose `children` form their own flat open/close stream.

use crate::style::StyleMap;

/// Type tag of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenTag {
    // Block structure
    Container,
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    Blockquote,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeaderCell,
    TableCell,

    // Inline structure
    Emphasis,
    Strong,
    Strikethrough,
    Link,

    /// Holder of an inline run
    Inline,

    // Content and leaves
    Text,
    SoftBreak,
    HardBreak,
    Code,
    CodeBlock,
    MathInline,
    MathBlock,
    HtmlBlock,
    HtmlInline,
    Image,
    Rule,
    Placeholder,
}

impl TokenTag {
    /// Leaves whose meaning is their text content. An empty one carries nothing.
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            TokenTag::Text
                | TokenTag::Code
                | TokenTag::CodeBlock
                | TokenTag::MathInline
                | TokenTag::MathBlock
                | TokenTag::HtmlBlock
                | TokenTag::HtmlInline
                | TokenTag::Placeholder
        )
    }

    /// Structure whose position matters even when empty.
    pub fn is_positional(&self) -> bool {
        matches!(
            self,
            TokenTag::TableRow | TokenTag::TableHeaderCell | TokenTag::TableCell
        )
    }

    pub fn is_raw_markup(&self) -> bool {
        matches!(self, TokenTag::HtmlBlock | TokenTag::HtmlInline)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenTag::Container => "container",
            TokenTag::Paragraph => "paragraph",
            TokenTag::Heading => "heading",
            TokenTag::BulletList => "bullet_list",
            TokenTag::OrderedList => "ordered_list",
            TokenTag::ListItem => "list_item",
            TokenTag::Blockquote => "blockquote",
            TokenTag::Table => "table",
            TokenTag::TableHead => "thead",
            TokenTag::TableBody => "tbody",
            TokenTag::TableRow => "tr",
            TokenTag::TableHeaderCell => "th",
            TokenTag::TableCell => "td",
            TokenTag::Emphasis => "em",
            TokenTag::Strong => "strong",
            TokenTag::Strikethrough => "s",
            TokenTag::Link => "link",
            TokenTag::Inline => "inline",
            TokenTag::Text => "text",
            TokenTag::SoftBreak => "softbreak",
            TokenTag::HardBreak => "hardbreak",
            TokenTag::Code => "code_inline",
            TokenTag::CodeBlock => "code_block",
            TokenTag::MathInline => "math_inline",
            TokenTag::MathBlock => "math_block",
            TokenTag::HtmlBlock => "html_block",
            TokenTag::HtmlInline => "html_inline",
            TokenTag::Image => "image",
            TokenTag::Rule => "hr",
            TokenTag::Placeholder => "placeholder",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    Open,
    Close,
    Leaf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub tag: TokenTag,
    pub nesting: Nesting,
    pub content: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Token>,
    /// Declared style; only meaningful on container-open tokens
    pub style: StyleMap,
}

impl Token {
    fn new(tag: TokenTag, nesting: Nesting) -> Self {
        Token {
            tag,
            nesting,
            content: String::new(),
            attrs: Vec::new(),
            children: Vec::new(),
            style: StyleMap::default(),
        }
    }

    pub fn open(tag: TokenTag) -> Self {
        Self::new(tag, Nesting::Open)
    }

    pub fn close(tag: TokenTag) -> Self {
        Self::new(tag, Nesting::Close)
    }

    pub fn leaf(tag: TokenTag) -> Self {
        Self::new(tag, Nesting::Leaf)
    }

    pub fn content_leaf(tag: TokenTag, content: impl Into<String>) -> Self {
        let mut token = Self::leaf(tag);
        token.content = content.into();
        token
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::content_leaf(TokenTag::Text, content)
    }

    pub fn inline(children: Vec<Token>) -> Self {
        let mut token = Self::leaf(TokenTag::Inline);
        token.children = children;
        token
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((key.to_string(), value)),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_open(&self, tag: TokenTag) -> bool {
        self.tag == tag && self.nesting == Nesting::Open
    }

    pub fn is_close(&self, tag: TokenTag) -> bool {
        self.tag == tag && self.nesting == Nesting::Close
    }
}

/// Approximate source text of a token run, used as error context.
pub fn source_text(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token.tag {
            TokenTag::Inline => out.push_str(&source_text(&token.children)),
            TokenTag::SoftBreak | TokenTag::HardBreak => out.push('\n'),
            TokenTag::Code => {
                out.push('`');
                out.push_str(&token.content);
                out.push('`');
            }
            TokenTag::MathInline => {
                out.push('$');
                out.push_str(&token.content);
                out.push('$');
            }
            TokenTag::Placeholder => {
                out.push_str("<placeholder>");
                out.push_str(&token.content);
                out.push_str("</placeholder>");
            }
            _ => out.push_str(&token.content),
        }
    }
    out.trim().to_string()
}
