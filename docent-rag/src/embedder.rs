//! Embedding trait and the default local embedder.

use async_trait::async_trait;

use crate::error::Result;

/// Generates vector embeddings from text.
///
/// The default [`embed_batch`](Embedder::embed_batch) implementation calls
/// [`embed`](Embedder::embed) sequentially; implementations with native
/// batching should override it.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this embedder.
    fn dimensions(&self) -> usize;
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// An offline, deterministic embedder based on signed feature hashing.
///
/// Token unigrams and adjacent bigrams are hashed (FNV-1a) into a
/// fixed-dimension vector with a sign bit per feature, then the vector is
/// L2-normalized. This is plain arithmetic, not a learned model: cosine
/// similarity between two embeddings reflects lexical overlap, which is
/// enough to rank chunks of a single document against a question about it.
///
/// Identical text always embeds to the identical vector, and no file,
/// network, or model weights are involved.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// Default embedding width.
    pub const DEFAULT_DIMENSIONS: usize = 384;

    /// Create an embedder producing vectors of the given width.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions: dimensions.max(1) }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> =
            lowered.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()).collect();

        let mut vector = vec![0.0f32; self.dimensions];
        for token in &tokens {
            accumulate(&mut vector, fnv1a(FNV_OFFSET_BASIS, token.as_bytes()));
        }
        for pair in tokens.windows(2) {
            let hash = fnv1a(FNV_OFFSET_BASIS, pair[0].as_bytes());
            let hash = fnv1a(hash, &[0x1f]);
            accumulate(&mut vector, fnv1a(hash, pair[1].as_bytes()));
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIMENSIONS)
    }
}

fn fnv1a(seed: u64, bytes: &[u8]) -> u64 {
    bytes.iter().fold(seed, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME))
}

fn accumulate(vector: &mut [f32], hash: u64) {
    let bucket = (hash % vector.len() as u64) as usize;
    let sign = if hash & (1 << 63) == 0 { 1.0 } else { -1.0 };
    vector[bucket] += sign;
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
