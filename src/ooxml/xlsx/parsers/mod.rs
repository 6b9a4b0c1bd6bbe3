//! XML parsing modules for Excel files.
//!
//! This module contains specialized parsers for different XML files
//! within an Excel workbook (.xlsx).

pub mod workbook_parser;
pub mod worksheet_parser;
pub mod styles_parser;
