//! Chat-completions client over HTTP.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::config::ModelConfig;
use crate::error::{ModelError, Result};
use crate::retry::RetryPolicy;

/// Sampling parameters for a single generation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Produces text from a prompt.
///
/// The production implementation is [`ChatClient`]; tests drive the
/// orchestration layer with a scripted stand-in instead.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String>;
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── Client ─────────────────────────────────────────────────────────

/// A [`TextGenerator`] speaking the chat-completions wire format.
///
/// Each call is one HTTP POST to `{base_url}/chat/completions` with a
/// single user message, a bearer credential, and the per-call sampling
/// options. Responses are never cached.
///
/// # Example
///
/// ```rust,ignore
/// use docent_model::{ChatClient, GenerateOptions, ModelConfig, TextGenerator};
///
/// let client = ChatClient::new(ModelConfig::from_env()?)?;
/// let text = client.generate(prompt, &options).await?;
/// ```
pub struct ChatClient {
    client: reqwest::Client,
    config: ModelConfig,
    retry: RetryPolicy,
}

impl ChatClient {
    /// Create a client with the default [`RetryPolicy::none()`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: ModelConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config, retry: RetryPolicy::none() })
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    async fn send_once(&self, url: &str, prompt: &str, options: &GenerateOptions) -> Result<String> {
        let request_body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            error!(%status, "credential rejected");
            return Err(ModelError::Auth(format!("service rejected the credential ({status})")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!(%status, "generation request failed");
            return Err(ModelError::Upstream { status: status.as_u16(), message: detail });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| ModelError::Upstream {
            status: status.as_u16(),
            message: format!("failed to parse response body: {e}"),
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ModelError::Upstream {
                status: status.as_u16(),
                message: "response contained no choices".into(),
            })
    }
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            max_tokens = options.max_tokens,
            temperature = options.temperature,
            "sending chat completion"
        );

        let mut attempt = 0;
        loop {
            match self.send_once(&url, prompt, options).await {
                Err(e) if attempt < self.retry.max_retries && e.is_retryable() => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        error = %e,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "generation failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_wire_format() {
        let request = ChatRequest {
            model: "sonar-pro",
            messages: vec![ChatMessage { role: "user", content: "hello" }],
            temperature: 0.5,
            max_tokens: 300,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "sonar-pro");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["max_tokens"], 300);
    }

    #[test]
    fn response_parses_first_choice_content() {
        let body = r#"{"choices":[{"message":{"content":"the answer"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "the answer");
    }

    #[test]
    fn response_tolerates_extra_fields() {
        let body = r#"{
            "id": "abc",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "ok"}, "finish_reason": "stop"}],
            "usage": {"total_tokens": 7}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "ok");
    }

    #[test]
    fn error_body_detail_is_extracted() {
        let body = r#"{"error":{"message":"model overloaded"}}"#;
        let parsed: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "model overloaded");
    }
}
