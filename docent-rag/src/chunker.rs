//! Fixed-window document chunking with overlap.

use crate::document::Chunk;
use crate::error::{RagError, Result};

/// Splits text into fixed-size overlapping windows by character count.
///
/// Windows cover the entire input in order: every consecutive pair shares
/// exactly `overlap` characters, and the final window may be shorter than
/// `size` but is never empty and never fully contained in its predecessor.
/// Window boundaries always fall on character boundaries, so multi-byte
/// text is chunked without splitting a character.
///
/// # Example
///
/// ```rust,ignore
/// use docent_rag::Chunker;
///
/// let chunker = Chunker::new(500, 100)?;
/// let chunks = chunker.chunk(&document.text);
/// ```
#[derive(Debug, Clone)]
pub struct Chunker {
    size: usize,
    overlap: usize,
}

impl Chunker {
    /// Create a chunker producing windows of `size` characters that overlap
    /// by `overlap` characters.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidChunking`] if `size` is zero or
    /// `overlap >= size`.
    pub fn new(size: usize, overlap: usize) -> Result<Self> {
        if size == 0 || overlap >= size {
            return Err(RagError::InvalidChunking { size, overlap });
        }
        Ok(Self { size, overlap })
    }

    /// The window size in characters.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The overlap between consecutive windows in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split `text` into overlapping chunks.
    ///
    /// Returns an empty `Vec` for empty input. The result is deterministic:
    /// identical input always yields identical chunks.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every character boundary, including the end of text.
        let mut boundaries: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
        boundaries.push(text.len());
        let char_count = boundaries.len() - 1;

        let mut chunks = Vec::new();
        let mut from = 0;
        loop {
            let to = (from + self.size).min(char_count);
            let (start, end) = (boundaries[from], boundaries[to]);
            chunks.push(Chunk {
                ordinal: chunks.len(),
                text: text[start..end].to_string(),
                start,
                end,
            });
            if to == char_count {
                break;
            }
            // Unclamped `to` equals `from + size`, so the next window starts
            // exactly `overlap` characters before the current one ends.
            from = to - self.overlap;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_size() {
        assert!(matches!(
            Chunker::new(0, 0),
            Err(RagError::InvalidChunking { size: 0, overlap: 0 })
        ));
    }

    #[test]
    fn rejects_overlap_equal_to_size() {
        assert!(matches!(Chunker::new(5, 5), Err(RagError::InvalidChunking { .. })));
    }

    #[test]
    fn rejects_overlap_greater_than_size() {
        assert!(matches!(Chunker::new(5, 8), Err(RagError::InvalidChunking { .. })));
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = Chunker::new(5, 2).unwrap();
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn short_text_yields_single_chunk() {
        let chunker = Chunker::new(100, 20).unwrap();
        let chunks = chunker.chunk("hello");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "hello");
        assert_eq!((chunks[0].start, chunks[0].end), (0, 5));
    }

    #[test]
    fn windows_overlap_by_exactly_the_configured_amount() {
        let chunker = Chunker::new(5, 2).unwrap();
        let chunks = chunker.chunk("abcdefghij");
        assert_eq!(
            chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>(),
            vec!["abcde", "defgh", "ghij"]
        );
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end - pair[1].start, 2);
        }
    }

    #[test]
    fn no_chunk_is_empty() {
        let chunker = Chunker::new(3, 2).unwrap();
        for chunk in chunker.chunk("abcdefg") {
            assert!(!chunk.text.is_empty());
        }
    }

    #[test]
    fn removing_overlapping_prefixes_reconstructs_input() {
        let text = "The quick brown fox jumps over the lazy dog, twice.";
        let chunker = Chunker::new(7, 3).unwrap();
        let chunks = chunker.chunk(text);

        let mut rebuilt = String::new();
        let mut covered = 0;
        for chunk in &chunks {
            rebuilt.push_str(&text[covered.max(chunk.start)..chunk.end]);
            covered = chunk.end;
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn offsets_agree_with_source_text() {
        let text = "héllo wörld, ünïcode draußen";
        let chunker = Chunker::new(4, 1).unwrap();
        for chunk in chunker.chunk(text) {
            assert_eq!(&text[chunk.start..chunk.end], chunk.text);
        }
    }

    #[test]
    fn multibyte_boundaries_never_split_characters() {
        let text = "日本語のテキストを分割するテスト";
        let chunker = Chunker::new(5, 2).unwrap();
        let chunks = chunker.chunk(text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 5);
            assert_eq!(&text[chunk.start..chunk.end], chunk.text);
        }
    }

    #[test]
    fn chunking_is_deterministic() {
        let chunker = Chunker::new(10, 4).unwrap();
        let text = "determinism means the same windows every single time";
        assert_eq!(chunker.chunk(text), chunker.chunk(text));
    }

    #[test]
    fn ordinals_are_sequential() {
        let chunker = Chunker::new(4, 1).unwrap();
        let chunks = chunker.chunk("a longer piece of text to split");
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.ordinal, i);
        }
    }
}
