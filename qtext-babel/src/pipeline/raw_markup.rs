//! Raw markup normalization
//!
//! Line-break tags survive as hard breaks. All other raw HTML left after style
//! and placeholder recognition is dropped.

use crate::tokenizer::{Token, TokenTag};
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*<br\s*/?>\s*$").expect("valid regex"));

pub fn normalize_raw_markup(tokens: Vec<Token>) -> Vec<Token> {
    tokens.into_iter().filter_map(normalize).collect()
}

fn normalize(mut token: Token) -> Option<Token> {
    if token.tag.is_raw_markup() {
        if LINE_BREAK.is_match(&token.content) {
            return Some(Token::leaf(TokenTag::HardBreak));
        }
        let markup = token.content.trim();
        if !markup.is_empty() {
            log::warn!("dropping unsupported raw markup: {markup}");
        }
        return None;
    }

    if token.tag == TokenTag::Inline {
        token.children = normalize_raw_markup(std::mem::take(&mut token.children));
    }
    Some(token)
}
