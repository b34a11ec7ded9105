//! Empty-node pruning
//!
//! Removing an empty leaf can leave its parent empty, so passes repeat until
//! one changes nothing. Each pass drops at least one token when it reports a
//! change, which bounds the loop by the stream length.

use crate::tokenizer::{Nesting, Token, TokenTag};

/// Prune to a fixed point.
pub fn prune_empty(mut tokens: Vec<Token>) -> Vec<Token> {
    let mut passes = 0;
    loop {
        let (next, changed) = prune_pass(tokens);
        tokens = next;
        passes += 1;
        if !changed {
            log::debug!("pruning settled after {passes} passes");
            return tokens;
        }
    }
}

/// One pruning pass. Returns the new stream and whether anything was removed.
pub fn prune_pass(tokens: Vec<Token>) -> (Vec<Token>, bool) {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut changed = false;

    for mut token in tokens {
        if token.tag == TokenTag::Inline {
            let (children, inner_changed) = prune_pass(std::mem::take(&mut token.children));
            changed |= inner_changed;
            if children.is_empty() {
                changed = true;
                continue;
            }
            token.children = children;
        } else if token.nesting == Nesting::Leaf
            && token.tag.is_content()
            && token.content.is_empty()
        {
            changed = true;
            continue;
        }

        if token.nesting == Nesting::Close && !token.tag.is_positional() {
            let opens_same = out
                .last()
                .is_some_and(|prev| prev.tag == token.tag && prev.nesting == Nesting::Open);
            if opens_same {
                out.pop();
                changed = true;
                continue;
            }
        }

        out.push(token);
    }

    (out, changed)
}
