//! Error types for parse and render operations

use thiserror::Error;

/// Errors that can occur while parsing or rendering a document.
///
/// The variants separate three failure categories so callers can react
/// differently: [`FormatError::ParseError`] means the source itself is
/// malformed, [`FormatError::ResourceError`] means a render could not obtain
/// something it needed (a file, an external tool, a free delimiter), and
/// [`FormatError::NotSupported`] means a renderer has no way to express a node.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Output format name not recognized
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    /// Structural error in the source document
    #[error("Parse error: {message} (in: {context})")]
    ParseError { message: String, context: String },

    /// A resource needed by the current render is unavailable or failed
    #[error("Resource error: {0}")]
    ResourceError(String),

    /// Error while producing the final output bytes
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A renderer cannot express the given node
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

impl FormatError {
    /// Build a structural parse error with the surrounding raw markup as context.
    pub fn parse(message: impl Into<String>, context: impl Into<String>) -> Self {
        FormatError::ParseError {
            message: message.into(),
            context: context.into(),
        }
    }

    /// True for structural errors raised while parsing.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, FormatError::ParseError { .. })
    }

    /// True for render-time resource failures.
    pub fn is_resource_error(&self) -> bool {
        matches!(self, FormatError::ResourceError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display_includes_context() {
        let err = FormatError::parse("unclosed tag", "<placeholder>x");
        assert_eq!(
            err.to_string(),
            "Parse error: unclosed tag (in: <placeholder>x)"
        );
        assert!(err.is_parse_error());
        assert!(!err.is_resource_error());
    }

    #[test]
    fn categories_are_distinct() {
        let resource = FormatError::ResourceError("missing image".to_string());
        let unsupported = FormatError::NotSupported("table in text".to_string());
        assert!(resource.is_resource_error());
        assert!(!unsupported.is_resource_error());
        assert!(!unsupported.is_parse_error());
    }
}
