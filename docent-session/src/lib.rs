//! Study session orchestration for docent.
//!
//! A [`StudySession`] ties the pipeline together for exactly one document:
//! load text, build the retrieval index, then run the summarize, answer,
//! and challenge flows against a generation client. Prompt templates live
//! in [`prompt`], lenient response parsing in [`parse`].
//!
//! # Example
//!
//! ```rust,ignore
//! use docent_session::StudySession;
//!
//! let mut session = StudySession::new(generator);
//! session.load("notes.txt", text)?;
//! let summary = session.summarize().await?;
//! session.index().await?;
//! let answer = session.answer("What does the document claim?").await?;
//! ```

pub mod error;
pub mod parse;
pub mod prompt;
pub mod session;

pub use error::{Result, SessionError};
pub use parse::parse_questions;
pub use prompt::TaskPrompt;
pub use session::{
    Answer, SessionConfig, SessionConfigBuilder, SessionState, StudySession, StudySessionBuilder,
};
