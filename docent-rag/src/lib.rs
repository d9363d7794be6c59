//! Retrieval layer for docent study sessions.
//!
//! This crate covers the offline half of the pipeline: splitting a document
//! into overlapping [`Chunk`]s, embedding them with a local [`Embedder`],
//! and serving top-k cosine retrieval from an immutable [`ChunkIndex`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docent_rag::{Chunker, ChunkIndex, HashEmbedder};
//!
//! let chunks = Chunker::new(500, 100)?.chunk(&document.text);
//! let index = ChunkIndex::build(Arc::new(HashEmbedder::default()), chunks).await?;
//! let hits = index.query("what does the document say?", 3).await?;
//! ```

pub mod chunker;
pub mod document;
pub mod embedder;
pub mod error;
pub mod index;

pub use chunker::Chunker;
pub use document::{Chunk, Document, ScoredChunk};
pub use embedder::{Embedder, HashEmbedder};
pub use error::{RagError, Result};
pub use index::{ChunkIndex, cosine_similarity};
