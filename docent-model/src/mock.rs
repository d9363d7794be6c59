//! Scripted generator for driving orchestration tests.
//!
//! Only available with the `mock` feature.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::{GenerateOptions, TextGenerator};
use crate::error::{ModelError, Result};

/// A [`TextGenerator`] that replays queued responses and records every
/// prompt it receives.
///
/// Clones share the queue, the prompt log, and the failure switch, so a
/// test can keep one handle and hand another to the code under test. When
/// the queue is empty the default response is returned.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    responses: Arc<Mutex<VecDeque<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    default_response: String,
    fail: Arc<AtomicBool>,
}

impl MockGenerator {
    /// A mock that always returns the default response.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            default_response: "mock response".to_string(),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A mock that replays `responses` in order, then falls back to the
    /// default response.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mock = Self::new();
        {
            let mut queue = mock.responses.lock().unwrap();
            queue.extend(responses.into_iter().map(Into::into));
        }
        mock
    }

    /// A mock whose every call fails with an upstream error until
    /// [`set_failing`](Self::set_failing) flips it back.
    pub fn failing() -> Self {
        let mock = Self::new();
        mock.set_failing(true);
        mock
    }

    /// Replace the fallback response returned when the queue is empty.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    /// Toggle failure mode on every clone of this mock.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Every prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str, _options: &GenerateOptions) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(ModelError::Upstream { status: 500, message: "mock failure".into() });
        }
        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.default_response.clone()))
    }
}
