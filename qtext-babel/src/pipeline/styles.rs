//! Style extraction
//!
//! `<style>` declarations are lifted out of the token stream and merged into
//! the declared style of the nearest enclosing container. Two shapes are
//! recognized:
//!
//! - raw block markup holding one or more complete `<style>…</style>` elements,
//! - an inline `<style>` tag, the text after it, and an inline `</style>` tag.

use crate::error::FormatError;
use crate::style::StyleMap;
use crate::tokenizer::{source_text, Nesting, Token, TokenTag};
use once_cell::sync::Lazy;
use regex::Regex;

static STYLE_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>(.*?)</style\s*>").expect("valid regex"));
static STYLE_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?style\b").expect("valid regex"));
static STYLE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^<style\b[^>]*>$").expect("valid regex"));
static STYLE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^</style\s*>$").expect("valid regex"));

/// Move every style declaration onto its enclosing container.
pub fn extract_styles(tokens: Vec<Token>) -> Result<Vec<Token>, FormatError> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut containers: Vec<usize> = Vec::new();

    for mut token in tokens {
        match (token.tag, token.nesting) {
            (TokenTag::Container, Nesting::Open) => {
                containers.push(out.len());
                out.push(token);
            }
            (TokenTag::Container, Nesting::Close) => {
                containers.pop();
                out.push(token);
            }
            (TokenTag::HtmlBlock, _) if STYLE_MENTION.is_match(&token.content) => {
                let (declarations, rest) = split_block(&token.content)?;
                for payload in declarations {
                    attach(&mut out, &containers, &payload, &token.content)?;
                }
                if !rest.trim().is_empty() {
                    token.content = rest;
                    out.push(token);
                }
            }
            (TokenTag::Inline, _) => {
                let (declarations, children) = split_inline(token.children)?;
                for (payload, context) in declarations {
                    attach(&mut out, &containers, &payload, &context)?;
                }
                token.children = children;
                out.push(token);
            }
            _ => out.push(token),
        }
    }

    Ok(out)
}

fn attach(
    out: &mut [Token],
    containers: &[usize],
    payload: &str,
    context: &str,
) -> Result<(), FormatError> {
    let index = containers.last().copied().ok_or_else(|| {
        FormatError::parse("style declaration outside of a container", context.trim())
    })?;
    let declared = StyleMap::parse(payload)?;
    log::debug!("attaching {} style keys to container", declared.len());
    out[index].style.merge(&declared);
    Ok(())
}

/// Pull complete style elements out of raw block markup.
fn split_block(content: &str) -> Result<(Vec<String>, String), FormatError> {
    let declarations = STYLE_ELEMENT
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect();
    let rest = STYLE_ELEMENT.replace_all(content, "").into_owned();

    if STYLE_MENTION.is_match(&rest) {
        return Err(FormatError::parse(
            "style tag without matching close tag",
            content.trim(),
        ));
    }
    Ok((declarations, rest))
}

type InlineDeclarations = Vec<(String, String)>;

/// Pull `<style>` … `</style>` runs out of an inline run.
fn split_inline(children: Vec<Token>) -> Result<(InlineDeclarations, Vec<Token>), FormatError> {
    if !children
        .iter()
        .any(|t| t.tag == TokenTag::HtmlInline && STYLE_MENTION.is_match(&t.content))
    {
        return Ok((Vec::new(), children));
    }

    let context = source_text(&children);
    let mut declarations = Vec::new();
    let mut kept = Vec::with_capacity(children.len());
    let mut tokens = children.into_iter();

    while let Some(token) = tokens.next() {
        if token.tag != TokenTag::HtmlInline || !STYLE_MENTION.is_match(&token.content) {
            kept.push(token);
            continue;
        }
        if !STYLE_OPEN.is_match(token.content.trim()) {
            return Err(FormatError::parse("unexpected style tag", context));
        }

        let mut payload = String::new();
        let mut closed = false;
        for inner in tokens.by_ref() {
            if inner.tag == TokenTag::HtmlInline && STYLE_CLOSE.is_match(inner.content.trim()) {
                closed = true;
                break;
            }
            match inner.tag {
                TokenTag::SoftBreak | TokenTag::HardBreak => payload.push('\n'),
                _ => payload.push_str(&source_text(std::slice::from_ref(&inner))),
            }
        }
        if !closed {
            return Err(FormatError::parse(
                "style tag without matching close tag",
                context,
            ));
        }
        declarations.push((payload, context.clone()));
    }

    Ok((declarations, kept))
}
