//! parchment - an OOXML/PDF/CFB document object model, structural patcher, and
//! presentation layout/animation engine.
//!
//! This library reads `.docx`/`.xlsx`/`.pptx` packages and PDF files into an
//! in-memory object graph, lets callers apply structural edits without
//! discarding unknown markup, and reconstructs diagram layout and slide
//! transition/animation timing the way the respective renderers would.
//!
//! # Example - Reading a DOCX file
//!
//! ```no_run
//! use parchment::ooxml::docx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = Package::open("document.docx")?;
//! let doc = pkg.document()?;
//! println!("Document text: {}", doc.text()?);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Low-level CFB access
//!
//! ```no_run
//! use std::fs::File;
//! use parchment::ole::OleFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("embedded.bin")?;
//! let mut ole = OleFile::open(file)?;
//! for stream in ole.list_streams() {
//!     println!("Stream: {:?}", stream);
//! }
//! # Ok(())
//! # }
//! ```

/// CFB (Compound File Binary / OLE2) structured storage reader and writer.
///
/// Used both for legacy embedded-object streams referenced from an OOXML
/// package's relationships and as a standalone container.
pub mod ole;

/// OOXML (Office Open XML) package, part, and domain-model parser.
#[cfg(feature = "ooxml")]
pub mod ooxml;

/// Immutable XML tree with positional mutator primitives.
///
/// The structural editing surface (`patcher`) never edits XML in place; it
/// builds replacement subtrees from this module's `Node` type and threads
/// them back through `replaceChildAt`/`insertChildAt`/`removeChildAt`.
#[cfg(feature = "ooxml")]
pub mod xml;

/// Structural patcher: shape-tree and property-group edits that preserve
/// unknown markup and apply transactionally.
#[cfg(feature = "ooxml")]
pub mod patcher;

/// PDF object/content-stream interpreter.
#[cfg(feature = "pdf")]
pub mod pdf;

/// Diagram layout algorithms and page-flow text layout.
#[cfg(feature = "ooxml")]
pub mod layout;

/// Slide transition catalogue and animation timing tree.
#[cfg(feature = "ooxml")]
pub mod animation;

pub mod common;

/// Word processing document facade built on the OOXML domain model.
#[cfg(feature = "ooxml")]
pub mod document;

/// Presentation facade built on the OOXML domain model.
#[cfg(feature = "ooxml")]
pub mod presentation;

/// Spreadsheet facade built on the OOXML domain model.
#[cfg(feature = "ooxml")]
pub mod sheet;

pub use common::error::{Error, Result};
