//! Error types for the contact masker.
//!
//! Errors are categorized by the stage that produced them so callers can
//! tell a bad input apart from a failed write.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for masking operations.
pub type MaskerResult<T> = Result<T, MaskerError>;

/// Error type for all masking operations.
#[derive(Debug, Error)]
pub enum MaskerError {
    /// Error occurred while reading or writing files
    #[error("IO error for path '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input could not be opened or parsed as a PDF document
    #[error("Input error for '{}': {reason}", .path.display())]
    InputError { path: PathBuf, reason: String },

    /// Text layout or image placements of a single page could not be read
    #[error("Failed to extract layout of page {page}: {reason}")]
    PageExtraction { page: usize, reason: String },

    /// Redaction regions could not be applied to a page
    #[error("Failed to apply redactions on page {page}: {reason}")]
    Redaction { page: usize, reason: String },

    /// The redacted document could not be written to its destination
    #[error("Failed to write output '{}': {reason}", .path.display())]
    OutputWrite { path: PathBuf, reason: String },

    /// Plain-text extraction failed
    #[error("Text extraction failed for '{}': {reason}", .path.display())]
    TextExtraction { path: PathBuf, reason: String },

    /// Invalid configuration or parameters
    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },

    /// Backend-specific error (MuPDF)
    #[error("{backend} backend error: {message}")]
    Backend { backend: String, message: String },
}

impl MaskerError {
    /// Returns the 1-based page number the error refers to, if any.
    pub fn page(&self) -> Option<usize> {
        match self {
            Self::PageExtraction { page, .. } | Self::Redaction { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Whether processing may continue with the next page.
    pub fn is_page_local(&self) -> bool {
        matches!(self, Self::PageExtraction { .. })
    }

    pub(crate) fn mupdf(message: impl Into<String>) -> Self {
        Self::Backend {
            backend: "MuPDF".to_string(),
            message: message.into(),
        }
    }
}
