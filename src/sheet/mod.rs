//! Spreadsheet facade over the SpreadsheetML (.xlsx) domain model.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use parchment::sheet::Workbook;
//!
//! let workbook = Workbook::open("data.xlsx")?;
//!
//! let names = workbook.worksheet_names()?;
//! println!("Worksheets: {:?}", names);
//!
//! let text = workbook.text()?;
//! println!("{}", text);
//!
//! let metadata = workbook.metadata()?;
//! if let Some(title) = metadata.title {
//!     println!("Title: {}", title);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! The module provides both:
//! - **Unified API**: `Workbook` struct for high-level operations
//! - **Trait-based API**: `Workbook`, `Worksheet`, `Cell` traits for advanced use

// Submodule declarations
pub mod functions;
pub mod traits;
pub mod types;
mod workbook;
mod workbook_types;

// Re-exports
pub use functions::*;
pub use traits::{Cell, CellIterator, RowIterator, WorkbookTrait, Worksheet, WorksheetIterator};
pub use types::{CellValue, Result};
pub use workbook::Workbook;
