//! Plain-text extraction for docent study sessions.
//!
//! Turns a source file into the plain text the rest of the pipeline works
//! on. Two formats are supported: UTF-8 text files and, behind the `pdf`
//! feature (on by default), PDF files via `pdf-extract`. Extraction never
//! judges content; an empty file extracts to an empty string and the
//! caller decides what that means.
//!
//! # Example
//!
//! ```rust,ignore
//! let text = docent_extract::extract_file(Path::new("paper.pdf")).await?;
//! ```

use std::path::Path;

use tracing::debug;

pub mod error;

pub use error::{ExtractError, Result};

/// A supported source format, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// UTF-8 plain text (`.txt`, `.md`).
    Text,
    /// PDF (`.pdf`), available with the `pdf` feature.
    Pdf,
}

/// Detect the source format from a path's extension, case-insensitively.
///
/// # Errors
///
/// Returns [`ExtractError::UnsupportedFormat`] for a missing or unknown
/// extension.
pub fn detect_format(path: &Path) -> Result<SourceFormat> {
    let extension =
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("txt") | Some("md") => Ok(SourceFormat::Text),
        Some("pdf") => Ok(SourceFormat::Pdf),
        Some(other) => Err(ExtractError::UnsupportedFormat(other.to_string())),
        None => Err(ExtractError::UnsupportedFormat("missing file extension".to_string())),
    }
}

/// Detect the format of `path` and extract its plain text.
///
/// # Errors
///
/// Returns [`ExtractError::UnsupportedFormat`] for unknown extensions,
/// [`ExtractError::Io`] if the file cannot be read, and
/// [`ExtractError::Pdf`] if PDF parsing fails.
pub async fn extract_file(path: &Path) -> Result<String> {
    let format = detect_format(path)?;
    extract_as(path, format).await
}

/// Extract plain text from `path`, treating it as `format`.
pub async fn extract_as(path: &Path, format: SourceFormat) -> Result<String> {
    debug!(path = %path.display(), ?format, "extracting document text");
    match format {
        SourceFormat::Text => Ok(tokio::fs::read_to_string(path).await?),
        SourceFormat::Pdf => extract_pdf(path).await,
    }
}

#[cfg(feature = "pdf")]
async fn extract_pdf(path: &Path) -> Result<String> {
    // pdf-extract is synchronous; keep it off the async worker threads.
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text(&path).map_err(|e| ExtractError::Pdf(e.to_string()))
    })
    .await
    .map_err(|e| ExtractError::Io(std::io::Error::other(e)))?
}

#[cfg(not(feature = "pdf"))]
async fn extract_pdf(_path: &Path) -> Result<String> {
    Err(ExtractError::UnsupportedFormat("pdf support was not compiled in".to_string()))
}
