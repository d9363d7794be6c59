//! Per-document study session orchestration.
//!
//! [`StudySession`] sequences the study workflow for one document:
//! load → summarize → index → answer / challenge. It composes an
//! [`Embedder`] with a [`TextGenerator`] and owns the per-document caches
//! (summary, chunk index, generated questions).
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docent_session::StudySession;
//!
//! let mut session = StudySession::new(Arc::new(client));
//! session.load("notes.txt", text)?;
//! let summary = session.summarize().await?;
//! session.index().await?;
//! let answer = session.answer("What is the main argument?").await?;
//! println!("{}", answer.text);
//! ```

use std::sync::Arc;

use docent_model::TextGenerator;
use docent_rag::{ChunkIndex, Chunker, Document, Embedder, HashEmbedder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, SessionError};
use crate::parse::parse_questions;
use crate::prompt::TaskPrompt;

/// Separator placed between retrieved chunks in the prompt context block.
const CONTEXT_JOINER: &str = "\n---\n";

/// Configuration parameters for a study session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of chunks retrieved as context per question.
    pub top_k: usize,
    /// Number of challenge questions to generate per document.
    pub question_count: usize,
    /// Maximum number of characters of document text placed into the
    /// summary and question-generation prompts.
    pub excerpt_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 100,
            top_k: 3,
            question_count: 3,
            excerpt_limit: 4000,
        }
    }
}

impl SessionConfig {
    /// Create a new builder for constructing a [`SessionConfig`].
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`SessionConfig`].
#[derive(Debug, Clone, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of chunks retrieved as context per question.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the number of challenge questions to generate.
    pub fn question_count(mut self, count: usize) -> Self {
        self.config.question_count = count;
        self
    }

    /// Set the prompt excerpt limit in characters.
    pub fn excerpt_limit(mut self, limit: usize) -> Self {
        self.config.excerpt_limit = limit;
        self
    }

    /// Build the [`SessionConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if:
    /// - `chunk_size == 0` or `chunk_overlap >= chunk_size`
    /// - `top_k == 0`
    /// - `question_count == 0`
    /// - `excerpt_limit == 0`
    pub fn build(self) -> Result<SessionConfig> {
        if self.config.chunk_size == 0 {
            return Err(SessionError::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(SessionError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(SessionError::Config("top_k must be greater than zero".to_string()));
        }
        if self.config.question_count == 0 {
            return Err(SessionError::Config(
                "question_count must be greater than zero".to_string(),
            ));
        }
        if self.config.excerpt_limit == 0 {
            return Err(SessionError::Config(
                "excerpt_limit must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}

/// Lifecycle of a study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No document loaded yet.
    Empty,
    /// Document text is loaded; summarizing and indexing are available.
    TextLoaded,
    /// The chunk index is built; retrieval-backed operations are available.
    Indexed,
    /// At least one retrieval-backed operation has completed. Repeated
    /// answer and challenge flows run without further transitions.
    Ready,
}

/// The outcome of an answer call: the generated text plus the exact
/// context block it was grounded in, for display as references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The generated answer text.
    pub text: String,
    /// The retrieved chunks joined with `\n---\n`, exactly as placed in
    /// the prompt.
    pub context: String,
}

/// A per-document study session.
///
/// Holds the loaded document, the lazily built [`ChunkIndex`], and the
/// cached summary and challenge questions. Sessions share nothing: run
/// one per document, and as many in parallel as needed. Construct one
/// via [`StudySession::new()`] or [`StudySession::builder()`].
pub struct StudySession {
    id: Uuid,
    config: SessionConfig,
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn TextGenerator>,
    document: Option<Document>,
    index: Option<ChunkIndex>,
    summary: Option<String>,
    questions: Option<Vec<String>>,
    state: SessionState,
}

impl StudySession {
    /// Create a session with the default configuration and the built-in
    /// hashing embedder.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            id: Uuid::new_v4(),
            config: SessionConfig::default(),
            embedder: Arc::new(HashEmbedder::default()),
            generator,
            document: None,
            index: None,
            summary: None,
            questions: None,
            state: SessionState::Empty,
        }
    }

    /// Create a new [`StudySessionBuilder`].
    pub fn builder() -> StudySessionBuilder {
        StudySessionBuilder::default()
    }

    /// Session id used for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Return a reference to the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The currently loaded document, if any.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// The cached summary for the current document, if one was produced.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// The cached challenge questions for the current document, if any.
    pub fn questions(&self) -> Option<&[String]> {
        self.questions.as_deref()
    }

    /// Load a document into the session.
    ///
    /// Replaces any previous document and clears every cached artifact
    /// (summary, index, questions) so nothing leaks across documents.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyDocument`] if `text` is empty or
    /// whitespace-only.
    pub fn load(&mut self, name: impl Into<String>, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SessionError::EmptyDocument);
        }

        let document = Document::new(name, text);
        info!(session.id = %self.id, document.name = %document.name, "loaded document");
        self.document = Some(document);
        self.index = None;
        self.summary = None;
        self.questions = None;
        self.state = SessionState::TextLoaded;
        Ok(())
    }

    /// Summarize the loaded document, caching the result.
    ///
    /// The prompt covers the first `excerpt_limit` characters of the
    /// text. Repeated calls return the cached summary without another
    /// model call; loading a new document clears the cache.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DocumentNotLoaded`] if no document is
    /// loaded, or any generation error unchanged. On failure the cache
    /// stays unset, so the call can be retried on its own.
    pub async fn summarize(&mut self) -> Result<String> {
        let document = self.document.as_ref().ok_or(SessionError::DocumentNotLoaded)?;
        if let Some(summary) = &self.summary {
            debug!(session.id = %self.id, "returning cached summary");
            return Ok(summary.clone());
        }

        let prompt = TaskPrompt::Summarize {
            excerpt: excerpt(&document.text, self.config.excerpt_limit),
        };
        let request = prompt.render();
        let options = prompt.options();
        let summary = self.generator.generate(&request, &options).await?;

        info!(session.id = %self.id, "produced summary");
        self.summary = Some(summary.clone());
        Ok(summary)
    }

    /// Chunk the loaded document and build the vector index over it.
    ///
    /// Returns the number of chunks indexed. Moves the session from
    /// `TextLoaded` to `Indexed`; re-indexing later keeps the current
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DocumentNotLoaded`] if no document is
    /// loaded, or a chunking/embedding error unchanged.
    pub async fn index(&mut self) -> Result<usize> {
        let document = self.document.as_ref().ok_or(SessionError::DocumentNotLoaded)?;
        let chunker = Chunker::new(self.config.chunk_size, self.config.chunk_overlap)?;
        let chunks = chunker.chunk(&document.text);
        let index = ChunkIndex::build(Arc::clone(&self.embedder), chunks).await?;
        let chunk_count = index.len();

        info!(session.id = %self.id, chunk_count, "indexed document");
        self.index = Some(index);
        if self.state == SessionState::TextLoaded {
            self.state = SessionState::Indexed;
        }
        Ok(chunk_count)
    }

    /// Answer a question from the indexed document.
    ///
    /// Retrieves the `top_k` most similar chunks, joins them into the
    /// context block, and asks the generator for a grounded answer. The
    /// returned [`Answer`] carries the context block verbatim so callers
    /// can display the supporting references.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IndexNotBuilt`] if [`index()`](Self::index)
    /// has not run for the current document, or any retrieval/generation
    /// error unchanged.
    pub async fn answer(&mut self, question: &str) -> Result<Answer> {
        let context = self.retrieve_context(question).await?;

        let prompt = TaskPrompt::Answer { context: &context, question };
        let request = prompt.render();
        let options = prompt.options();
        let text = self.generator.generate(&request, &options).await?;

        info!(session.id = %self.id, "answered question");
        self.mark_ready();
        Ok(Answer { text, context })
    }

    /// Generate challenge questions for the indexed document.
    ///
    /// Renders the question prompt over the excerpt, parses the response
    /// leniently, and caches the parsed list, replacing any previous one.
    /// Fewer questions than configured is not a failure; a response with
    /// no numbered lines yields the whole trimmed response as one
    /// question.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IndexNotBuilt`] before indexing
    /// ([`SessionError::DocumentNotLoaded`] if there is no document at
    /// all), or any generation error unchanged.
    pub async fn generate_questions(&mut self) -> Result<Vec<String>> {
        let document = self.document.as_ref().ok_or(SessionError::DocumentNotLoaded)?;
        if self.index.is_none() {
            return Err(SessionError::IndexNotBuilt);
        }

        let prompt = TaskPrompt::GenerateQuestions {
            excerpt: excerpt(&document.text, self.config.excerpt_limit),
            count: self.config.question_count,
        };
        let request = prompt.render();
        let options = prompt.options();
        let response = self.generator.generate(&request, &options).await?;

        let questions = parse_questions(&response, self.config.question_count);
        info!(session.id = %self.id, question_count = questions.len(), "generated questions");
        self.questions = Some(questions.clone());
        Ok(questions)
    }

    /// Evaluate a user's answer to a question against the document.
    ///
    /// Retrieves context for the question exactly as [`answer()`](Self::answer)
    /// does, then returns the generator's verdict and feedback text
    /// without further parsing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IndexNotBuilt`] if the index has not been
    /// built, or any retrieval/generation error unchanged.
    pub async fn evaluate(&mut self, question: &str, user_answer: &str) -> Result<String> {
        let context = self.retrieve_context(question).await?;

        let prompt = TaskPrompt::Evaluate { context: &context, question, answer: user_answer };
        let request = prompt.render();
        let options = prompt.options();
        let feedback = self.generator.generate(&request, &options).await?;

        info!(session.id = %self.id, "evaluated answer");
        self.mark_ready();
        Ok(feedback)
    }

    /// Retrieve `top_k` chunks for `question` and join them into the
    /// prompt context block.
    async fn retrieve_context(&self, question: &str) -> Result<String> {
        let index = self.index.as_ref().ok_or(SessionError::IndexNotBuilt)?;
        let hits = index.query(question, self.config.top_k).await?;
        let texts: Vec<&str> = hits.iter().map(|hit| hit.chunk.text.as_str()).collect();
        Ok(texts.join(CONTEXT_JOINER))
    }

    fn mark_ready(&mut self) {
        if self.state == SessionState::Indexed {
            self.state = SessionState::Ready;
        }
    }
}

/// First `limit` characters of `text`, sliced on a character boundary.
fn excerpt(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

/// Builder for constructing a [`StudySession`].
///
/// Only the generator is required; the embedder defaults to
/// [`HashEmbedder`] and the configuration to [`SessionConfig::default()`].
///
/// # Example
///
/// ```rust,ignore
/// let session = StudySession::builder()
///     .config(SessionConfig::builder().top_k(5).build()?)
///     .generator(Arc::new(client))
///     .build()?;
/// ```
#[derive(Default)]
pub struct StudySessionBuilder {
    config: Option<SessionConfig>,
    embedder: Option<Arc<dyn Embedder>>,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl StudySessionBuilder {
    /// Set the session configuration.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedder used to build and query the chunk index.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the text generator backing all prompts.
    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`StudySession`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if no generator was set.
    pub fn build(self) -> Result<StudySession> {
        let generator = self
            .generator
            .ok_or_else(|| SessionError::Config("generator is required".to_string()))?;

        let mut session = StudySession::new(generator);
        if let Some(config) = self.config {
            session.config = config;
        }
        if let Some(embedder) = self.embedder {
            session.embedder = embedder;
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_values() {
        let config = SessionConfig::default();
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.chunk_overlap, 100);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.question_count, 3);
        assert_eq!(config.excerpt_limit, 4000);
    }

    #[test]
    fn builder_accepts_valid_overrides() {
        let config = SessionConfig::builder()
            .chunk_size(200)
            .chunk_overlap(50)
            .top_k(5)
            .question_count(2)
            .excerpt_limit(1000)
            .build()
            .unwrap();
        assert_eq!(config.chunk_size, 200);
        assert_eq!(config.top_k, 5);
    }

    #[test]
    fn builder_rejects_zero_chunk_size() {
        let result = SessionConfig::builder().chunk_size(0).build();
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn builder_rejects_overlap_not_less_than_size() {
        let result = SessionConfig::builder().chunk_size(100).chunk_overlap(100).build();
        assert!(matches!(result, Err(SessionError::Config(_))));

        let result = SessionConfig::builder().chunk_size(100).chunk_overlap(150).build();
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn builder_rejects_zero_top_k() {
        let result = SessionConfig::builder().top_k(0).build();
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn builder_rejects_zero_question_count() {
        let result = SessionConfig::builder().question_count(0).build();
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn builder_rejects_zero_excerpt_limit() {
        let result = SessionConfig::builder().excerpt_limit(0).build();
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn session_builder_requires_generator() {
        let result = StudySession::builder().build();
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn excerpt_keeps_short_text_whole() {
        assert_eq!(excerpt("short", 4000), "short");
        assert_eq!(excerpt("234", 3), "234");
    }

    #[test]
    fn excerpt_cuts_at_char_count_not_bytes() {
        // Four characters, more than four bytes.
        assert_eq!(excerpt("héllo", 4), "héll");
        assert_eq!(excerpt("日本語の文", 3), "日本語");
    }
}
