//! Layout engines that sit downstream of parsing: diagram (SmartArt)
//! geometry, word-processing page flow, and floating-image placement. All
//! of it is pure and synchronous, per the single-threaded core design.

pub mod diagram;
pub mod floating;
pub mod pageflow;

mod error;

pub use error::{LayoutError, Result};
