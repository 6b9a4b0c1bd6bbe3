//! Layout-local error type. Converts into the crate-wide
//! [`crate::common::error::Error`] at the public API boundary, the same
//! pattern `patcher::PatchError`/`ooxml::error::OoxmlError` use.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Error, Debug)]
pub enum LayoutError {
    /// No algorithm is registered under the requested key.
    #[error("unknown diagram layout algorithm: {0}")]
    UnknownAlgorithm(String),

    /// A diagram tree node referenced a parent/sibling that isn't present in
    /// the input slice, or a required parameter was missing a default.
    #[error("invalid diagram layout input: {0}")]
    InvalidInput(String),

    /// A page-flow paragraph hint combination could not be satisfied (e.g.
    /// `keepTogether` on a paragraph taller than any page).
    #[error("page flow constraint unsatisfiable: {0}")]
    Unsatisfiable(String),
}
