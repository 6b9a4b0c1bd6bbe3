//! Unified error taxonomy for parchment operations.
//!
//! Every subsystem (container, xml, ooxml, patcher, pdf, layout) defines its
//! own `thiserror`-derived error enum; this type is the root they all convert
//! into at the public API boundary, one variant per error-taxonomy entry.
use thiserror::Error;

/// Main error type for parchment operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed container/format that doesn't fit a more specific variant.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// XML, PDF, or CFB syntax failure.
    #[error("parse error in {path}{byte_offset}: {message}", byte_offset = .byte_offset.map(|o| format!(" at byte {o}")).unwrap_or_default())]
    ParseError {
        path: String,
        byte_offset: Option<u64>,
        message: String,
    },

    /// A required attribute/child is missing or an enum value is illegal in strict mode.
    #[error("schema violation in {path}, element {element}: {rule}")]
    SchemaViolation {
        path: String,
        element: String,
        rule: String,
    },

    /// A relationship target failed to resolve.
    #[error("relationship {r_id} in {source_part} does not resolve to a package part")]
    ResourceNotFound { r_id: String, source_part: String },

    /// A CFB or xref chain revisited a node already seen in the walk.
    #[error("cycle detected: {}", .chain.join(" -> "))]
    CycleDetected { chain: Vec<String> },

    /// A PDF filter or OOXML extension the core does not implement.
    #[error("unsupported feature: {0}")]
    Unsupported(String),

    /// Internal consistency check failure (a bug, not a malformed-input condition).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// File is not a recognized Office/PDF format.
    #[error("not a recognized document file")]
    NotOfficeFile,

    /// Corrupted or malformed file not covered by a more specific variant.
    #[error("corrupted file: {0}")]
    CorruptedFile(String),

    /// Stream or part not found.
    #[error("component not found: {0}")]
    ComponentNotFound(String),

    /// XML parsing error not yet attributed to a path.
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid content type.
    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// A patcher operation failed; the tree returned is the pre-patch input.
    #[error("patch operation {index} failed: {message}")]
    PatchFailed { index: usize, message: String },

    /// Feature disabled at compile time.
    #[error("Feature '{0}' is disabled. Enable it with --features {0}")]
    FeatureDisabled(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

/// Result type for parchment operations.
pub type Result<T> = std::result::Result<T, Error>;
