//! Error types for the `docent-session` crate.

use docent_model::ModelError;
use docent_rag::RagError;
use thiserror::Error;

/// Errors that can occur while driving a study session.
///
/// Retrieval and generation failures pass through transparently so the
/// call site sees the underlying cause unchanged.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A document was loaded with empty or whitespace-only text.
    #[error("Document is empty")]
    EmptyDocument,

    /// The operation needs a loaded document.
    #[error("No document loaded")]
    DocumentNotLoaded,

    /// A retrieval-backed operation ran before the index was built.
    #[error("Index has not been built for the current document")]
    IndexNotBuilt,

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An error propagated from the retrieval layer.
    #[error(transparent)]
    Rag(#[from] RagError),

    /// An error propagated from the generation client.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A convenience result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
