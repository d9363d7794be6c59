//! Error types for the `docent-rag` crate.

use thiserror::Error;

/// Errors that can occur in chunking, embedding, and retrieval.
#[derive(Debug, Error)]
pub enum RagError {
    /// Chunking parameters were rejected: the size must be positive and the
    /// overlap strictly smaller than the size.
    #[error("Invalid chunking parameters: overlap ({overlap}) must be less than size ({size}), size must be positive")]
    InvalidChunking {
        /// The rejected chunk size, in characters.
        size: usize,
        /// The rejected overlap, in characters.
        overlap: usize,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// An index build was attempted over an empty chunk sequence.
    #[error("Cannot build an index over an empty chunk set")]
    EmptyInput,
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
