//! Error types for the `docent-extract` crate.

use thiserror::Error;

/// Errors that can occur when turning a source file into plain text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file extension maps to no supported format, or the format's
    /// support was not compiled in.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF parser failed on the file contents.
    #[error("PDF extraction error: {0}")]
    Pdf(String),
}

/// A convenience result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
