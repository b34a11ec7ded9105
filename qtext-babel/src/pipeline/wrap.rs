//! Root wrapping

use crate::tokenizer::{Token, TokenTag};

/// Wrap a non-empty stream in the synthetic root container.
///
/// A stream that already starts with the root container is returned as is.
pub fn wrap_root(tokens: Vec<Token>) -> Vec<Token> {
    if tokens.is_empty() || is_wrapped(&tokens) {
        return tokens;
    }

    let mut wrapped = Vec::with_capacity(tokens.len() + 2);
    wrapped.push(Token::open(TokenTag::Container).with_attr("root", "true"));
    wrapped.extend(tokens);
    wrapped.push(Token::close(TokenTag::Container));
    wrapped
}

pub(crate) fn is_root(token: &Token) -> bool {
    token.is_open(TokenTag::Container) && token.attr("root") == Some("true")
}

fn is_wrapped(tokens: &[Token]) -> bool {
    tokens.first().is_some_and(is_root)
}
