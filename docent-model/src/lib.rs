//! Generation client for docent study sessions.
//!
//! One trait, [`TextGenerator`], and one production implementation,
//! [`ChatClient`], which speaks the chat-completions wire format over a
//! single HTTP POST per call. Retry behavior is data, not policy baked
//! into the client: see [`RetryPolicy`].
//!
//! # Example
//!
//! ```rust,ignore
//! use docent_model::{ChatClient, GenerateOptions, ModelConfig, TextGenerator};
//!
//! let client = ChatClient::new(ModelConfig::from_env()?)?;
//! let text = client
//!     .generate("Summarize this.", &GenerateOptions { max_tokens: 150, temperature: 0.3 })
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
#[cfg(feature = "mock")]
pub mod mock;
pub mod retry;

pub use client::{ChatClient, GenerateOptions, TextGenerator};
pub use config::ModelConfig;
pub use error::{ModelError, Result};
#[cfg(feature = "mock")]
pub use mock::MockGenerator;
pub use retry::RetryPolicy;
