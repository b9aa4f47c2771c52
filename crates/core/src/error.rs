//! Error types for document decoding and validation.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while turning raw JSON into typed documents.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The JSON could not be parsed into the document model.
    #[error("failed to decode {kind}: {source}")]
    Decode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The document decoded cleanly but holds a different model.
    #[error("expected a {expected} document, found {found}")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },

    /// A validator rejected the document.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result alias for document operations.
pub type Result<T> = std::result::Result<T, CoreError>;
