//! File format detection utilities.
//!
//! Fast, safe, signature-based detection for OOXML and PDF documents, reading
//! only the minimal amount of data required for identification.

pub mod detected;
pub mod functions;
pub mod ooxml;
pub mod simd_utils;
pub mod types;
pub mod utils;

pub use detected::{DetectedFormat, detect_format_smart};
pub use functions::{detect_file_format, detect_file_format_from_bytes, detect_format_from_reader};
pub use types::FileFormat;
