//! Immutable in-memory cosine index over one document's chunks.

use std::sync::Arc;

use tracing::{debug, info};

use crate::document::{Chunk, ScoredChunk};
use crate::embedder::Embedder;
use crate::error::{RagError, Result};

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// An immutable vector index over exactly one document's full chunk sequence.
///
/// The index owns the [`Embedder`] it was built with, so queries are
/// guaranteed to use the same model that embedded the chunks. Once built it
/// is read-only; loading a new document means building a new index.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use docent_rag::{ChunkIndex, Chunker, HashEmbedder};
///
/// let chunks = Chunker::new(500, 100)?.chunk(text);
/// let index = ChunkIndex::build(Arc::new(HashEmbedder::default()), chunks).await?;
/// let hits = index.query("a question about the text", 3).await?;
/// ```
pub struct ChunkIndex {
    embedder: Arc<dyn Embedder>,
    chunks: Vec<Chunk>,
    embeddings: Vec<Vec<f32>>,
}

impl ChunkIndex {
    /// Embed every chunk and build the index.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyInput`] if `chunks` is empty, or any error
    /// the embedder reports.
    pub async fn build(embedder: Arc<dyn Embedder>, chunks: Vec<Chunk>) -> Result<Self> {
        if chunks.is_empty() {
            return Err(RagError::EmptyInput);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        info!(
            chunk_count = chunks.len(),
            dimensions = embedder.dimensions(),
            "built chunk index"
        );

        Ok(Self { embedder, chunks, embeddings })
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks. Always false for a built index.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Embed `text` with the index's own embedder and return the `k` most
    /// similar chunks.
    ///
    /// `k` is clamped to the index size. Results are ordered by descending
    /// cosine similarity; equal scores keep the original chunk order.
    ///
    /// # Errors
    ///
    /// Returns any error the embedder reports for the query text.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let query_embedding = self.embedder.embed(text).await?;

        let mut hits: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .zip(&self.embeddings)
            .map(|(chunk, embedding)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(&query_embedding, embedding),
            })
            .collect();

        // Vec::sort_by is stable: ties keep ascending ordinal order.
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);

        debug!(k, returned = hits.len(), "retrieved chunks");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::Chunker;
    use crate::embedder::HashEmbedder;

    fn embedder() -> Arc<dyn Embedder> {
        Arc::new(HashEmbedder::new(64))
    }

    #[tokio::test]
    async fn build_rejects_empty_chunk_set() {
        let result = ChunkIndex::build(embedder(), Vec::new()).await;
        assert!(matches!(result, Err(RagError::EmptyInput)));
    }

    #[tokio::test]
    async fn query_clamps_k_to_index_size() {
        let chunks = Chunker::new(10, 2).unwrap().chunk("only a little text here");
        let count = chunks.len();
        let index = ChunkIndex::build(embedder(), chunks).await.unwrap();
        let hits = index.query("text", 50).await.unwrap();
        assert_eq!(hits.len(), count);
    }

    #[tokio::test]
    async fn query_returns_at_most_k() {
        let text = "a much longer text that should split into quite a few separate windows of content";
        let chunks = Chunker::new(10, 2).unwrap().chunk(text);
        assert!(chunks.len() > 2);
        let index = ChunkIndex::build(embedder(), chunks).await.unwrap();
        let hits = index.query("windows of content", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn scores_are_non_increasing() {
        let text = "the sky is blue. grass is green. revenue grew four percent in the third quarter.";
        let chunks = Chunker::new(20, 5).unwrap().chunk(text);
        let index = ChunkIndex::build(embedder(), chunks).await.unwrap();
        let hits = index.query("what color is the sky", 10).await.unwrap();
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn tied_scores_keep_chunk_order() {
        // Two identical windows score identically against any query.
        let chunks = vec![
            Chunk { ordinal: 0, text: "same words".into(), start: 0, end: 10 },
            Chunk { ordinal: 1, text: "same words".into(), start: 10, end: 20 },
        ];
        let index = ChunkIndex::build(embedder(), chunks).await.unwrap();
        let hits = index.query("same words", 2).await.unwrap();
        assert_eq!(hits[0].chunk.ordinal, 0);
        assert_eq!(hits[1].chunk.ordinal, 1);
    }

    #[tokio::test]
    async fn most_relevant_chunk_ranks_first() {
        let chunks = vec![
            Chunk { ordinal: 0, text: "the annual budget is under review".into(), start: 0, end: 0 },
            Chunk { ordinal: 1, text: "the sky is blue on clear days".into(), start: 0, end: 0 },
            Chunk { ordinal: 2, text: "migration patterns of arctic birds".into(), start: 0, end: 0 },
        ];
        let index = ChunkIndex::build(embedder(), chunks).await.unwrap();
        let hits = index.query("what color is the sky", 1).await.unwrap();
        assert_eq!(hits[0].chunk.ordinal, 1);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn cosine_of_mismatched_lengths_is_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = [0.6, 0.8];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }
}
