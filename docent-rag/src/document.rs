//! Data types for documents, chunks, and retrieval hits.

use serde::{Deserialize, Serialize};

/// A source document: a display name plus its extracted plain text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Display name, usually the source file name.
    pub name: String,
    /// The full extracted text content.
    pub text: String,
}

impl Document {
    /// Create a document from a name and its extracted text.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }
}

/// A contiguous window of a [`Document`]'s text.
///
/// `start..end` is the byte range of this window in the source text,
/// always aligned to character boundaries, so `&document.text[start..end]`
/// reproduces `text` exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Zero-based position of this chunk in the chunk sequence.
    pub ordinal: usize,
    /// The text content of the window.
    pub text: String,
    /// Byte offset of the window start in the source text.
    pub start: usize,
    /// Byte offset one past the window end in the source text.
    pub end: usize,
}

/// A retrieved [`Chunk`] paired with its cosine similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Cosine similarity to the query (higher is more relevant).
    pub score: f32,
}
