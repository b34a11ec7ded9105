//! Placeholder recognition
//!
//! `<placeholder>LABEL</placeholder>` marks a labeled blank. As raw block
//! markup the whole block must be that one element. Inline, the open tag, a
//! single text token and the close tag must follow each other directly in the
//! same run; anything else is a structural error.

use crate::error::FormatError;
use crate::tokenizer::{source_text, Nesting, Token, TokenTag};
use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*<placeholder\s*>(.*?)</placeholder\s*>\s*$").expect("valid regex")
});
static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?placeholder\b").expect("valid regex"));
static OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^<placeholder\s*>$").expect("valid regex"));
static CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^</placeholder\s*>$").expect("valid regex"));

/// Replace placeholder markup with [`TokenTag::Placeholder`] leaves.
pub fn recognize_placeholders(tokens: Vec<Token>) -> Result<Vec<Token>, FormatError> {
    tokens
        .into_iter()
        .map(|mut token| match token.tag {
            TokenTag::HtmlBlock if MENTION.is_match(&token.content) => block_placeholder(&token),
            TokenTag::Inline => {
                token.children = inline_placeholders(token.children)?;
                Ok(token)
            }
            _ => Ok(token),
        })
        .collect()
}

fn block_placeholder(token: &Token) -> Result<Token, FormatError> {
    let context = token.content.trim();
    let label = BLOCK
        .captures(&token.content)
        .map(|caps| caps[1].to_string())
        .filter(|interior| !MENTION.is_match(interior))
        .ok_or_else(|| FormatError::parse("malformed placeholder block", context))?;

    Ok(Token::content_leaf(
        TokenTag::Placeholder,
        normalize_label(&label, context)?,
    ))
}

fn inline_placeholders(children: Vec<Token>) -> Result<Vec<Token>, FormatError> {
    if !children.iter().any(is_placeholder_markup) {
        return Ok(children);
    }

    let context = source_text(&children);
    let mut out = Vec::with_capacity(children.len());
    let mut index = 0;

    while index < children.len() {
        let token = &children[index];
        if !is_placeholder_markup(token) {
            out.push(token.clone());
            index += 1;
            continue;
        }

        let content = token.content.trim();
        if CLOSE.is_match(content) {
            return Err(FormatError::parse(
                "placeholder close tag without open tag",
                context,
            ));
        }
        if !OPEN.is_match(content) {
            return Err(FormatError::parse("malformed placeholder tag", context));
        }

        let interior = children
            .get(index + 1)
            .filter(|t| t.tag == TokenTag::Text && t.nesting == Nesting::Leaf);
        let closed = children
            .get(index + 2)
            .is_some_and(|t| t.tag == TokenTag::HtmlInline && CLOSE.is_match(t.content.trim()));

        match interior {
            Some(text) if closed => {
                out.push(Token::content_leaf(
                    TokenTag::Placeholder,
                    normalize_label(&text.content, &context)?,
                ));
                index += 3;
            }
            _ => {
                return Err(FormatError::parse(
                    "placeholder must enclose exactly one text and be closed",
                    context,
                ))
            }
        }
    }

    Ok(out)
}

fn is_placeholder_markup(token: &Token) -> bool {
    token.tag == TokenTag::HtmlInline && MENTION.is_match(&token.content)
}

/// Collapse internal whitespace; the result must not be empty.
fn normalize_label(raw: &str, context: &str) -> Result<String, FormatError> {
    let label = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if label.is_empty() {
        return Err(FormatError::parse("empty placeholder label", context));
    }
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn placeholders(tokens: &[Token]) -> Vec<String> {
        let mut labels = Vec::new();
        for token in tokens {
            if token.tag == TokenTag::Placeholder {
                labels.push(token.content.clone());
            }
            labels.extend(placeholders(&token.children));
        }
        labels
    }

    #[test]
    fn inline_placeholders_are_recognized() {
        let tokens = recognize_placeholders(tokenize(
            "Name: <placeholder>first</placeholder> <placeholder>last</placeholder>",
        ))
        .unwrap();
        assert_eq!(placeholders(&tokens), vec!["first", "last"]);
        let run = &tokens[1].children;
        assert!(run.iter().all(|t| t.tag != TokenTag::HtmlInline));
    }

    #[test]
    fn label_whitespace_is_collapsed() {
        let tokens =
            recognize_placeholders(tokenize("<placeholder>  first   name </placeholder> x")).unwrap();
        assert_eq!(placeholders(&tokens), vec!["first name"]);
    }

    #[test]
    fn missing_close_is_error() {
        let err = recognize_placeholders(tokenize("Name: <placeholder>first")).unwrap_err();
        match err {
            FormatError::ParseError { context, .. } => {
                assert!(context.contains("<placeholder>first"))
            }
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn stray_close_is_error() {
        let err = recognize_placeholders(tokenize("x </placeholder>")).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn formatted_interior_is_error() {
        let err =
            recognize_placeholders(tokenize("<placeholder>*a*</placeholder> x")).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn empty_interior_is_error() {
        let err = recognize_placeholders(tokenize("x <placeholder></placeholder>")).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn block_placeholder_becomes_leaf() {
        let tokens = recognize_placeholders(tokenize("<placeholder>\nanswer\n</placeholder>\n"))
            .unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].tag, TokenTag::Placeholder);
        assert_eq!(tokens[0].content, "answer");
    }

    #[test]
    fn malformed_block_is_error() {
        let err = recognize_placeholders(tokenize("<placeholder>\nanswer\n")).unwrap_err();
        assert!(err.is_parse_error());
    }
}
