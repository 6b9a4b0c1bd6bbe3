//! Error types for PDF parsing and content-stream interpretation.
use thiserror::Error;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Error types for PDF operations.
#[derive(Error, Debug)]
pub enum PdfError {
    /// IO error reading the underlying file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tokenizer/object-layer syntax failure at a given byte offset.
    #[error("parse error at byte {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// A filter, font encoding, or structural feature the interpreter does
    /// not implement (e.g. an unrecognised `/Filter` name).
    #[error("unsupported feature: {0}")]
    Unsupported(String),

    /// An xref or object-stream reference chain revisited a node already seen.
    #[error("cycle detected: {}", .0.join(" -> "))]
    CycleDetected(Vec<String>),
}

impl PdfError {
    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        PdfError::Parse {
            offset,
            message: message.into(),
        }
    }
}
