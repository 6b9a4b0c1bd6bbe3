//! Patcher-local error type. Subsystem errors convert into the crate-wide
//! [`crate::common::error::Error`] at the public API boundary (see
//! `common::error::conversions`), the same pattern `ooxml::error::OoxmlError`
//! and `ooxml::opc::error::OpcError` already use.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatchError>;

#[derive(Error, Debug)]
pub enum PatchError {
    /// A top-level patch operation failed; the caller's prior tree is
    /// untouched and should be re-used.
    #[error("patch operation {index} failed: {source}")]
    OperationFailed { index: usize, source: String },

    /// An internal consistency check failed (e.g. a cxnSp would reference a
    /// nonexistent id after patching) — a bug, not a malformed-input
    /// condition.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The target of a `remove`/`replace`/lookup operation does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}
