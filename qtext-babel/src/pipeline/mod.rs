//! Post-processing pipeline
//!
//! Runs between tokenization and AST construction. The steps are order
//! dependent and always run in this sequence:
//!
//! 1. [`wrap_root`]: wrap the stream in the synthetic root container
//! 2. [`extract_styles`]: move `<style>` declarations onto containers
//! 3. [`recognize_placeholders`]: turn `<placeholder>` markup into leaves
//! 4. [`normalize_raw_markup`]: keep `<br>` as hard breaks, drop other HTML
//! 5. [`prune_empty`]: drop empty leaves and pairs until nothing changes
//!
//! Each step consumes the stream and returns a new one. Style extraction must
//! see the root container, and pruning must run last since the earlier steps
//! leave empty runs behind.

pub mod placeholders;
pub mod prune;
pub mod raw_markup;
pub mod styles;
pub mod wrap;

pub use placeholders::recognize_placeholders;
pub use prune::{prune_empty, prune_pass};
pub use raw_markup::normalize_raw_markup;
pub use styles::extract_styles;
pub use wrap::wrap_root;

use crate::error::FormatError;
use crate::tokenizer::Token;

/// Run all five steps.
pub fn postprocess(tokens: Vec<Token>) -> Result<Vec<Token>, FormatError> {
    let tokens = wrap_root(tokens);
    let tokens = extract_styles(tokens)?;
    let tokens = recognize_placeholders(tokens)?;
    let tokens = normalize_raw_markup(tokens);
    let tokens = prune_empty(tokens);
    log::debug!("post-processing produced {} tokens", tokens.len());
    Ok(tokens)
}
