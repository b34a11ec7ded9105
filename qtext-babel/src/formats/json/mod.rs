//! AST as JSON

use crate::ast::Document;
use crate::error::FormatError;

/// Pretty-printed JSON of the whole document, `type`-tagged per node.
pub fn render(document: &Document) -> Result<String, FormatError> {
    serde_json::to_string_pretty(document)
        .map_err(|e| FormatError::SerializationError(format!("AST serialization failed: {e}")))
}
