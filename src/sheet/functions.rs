//! Functions for opening workbooks.

use super::traits::WorkbookTrait;
use super::types::Result;

/// Open a workbook from a file path.
pub fn open_workbook<P: AsRef<std::path::Path>>(path: P) -> Result<Box<dyn WorkbookTrait>> {
    let package = crate::ooxml::opc::OpcPackage::open(path)?;
    let workbook = crate::ooxml::xlsx::Workbook::new(package)?;
    Ok(Box::new(workbook))
}

/// Open a workbook from bytes.
pub fn open_workbook_from_bytes(bytes: &[u8]) -> Result<Box<dyn WorkbookTrait>> {
    use std::io::Cursor;
    let cursor = Cursor::new(bytes);
    let package = crate::ooxml::opc::OpcPackage::from_reader(cursor)?;
    let workbook = crate::ooxml::xlsx::Workbook::new(package)?;
    Ok(Box::new(workbook))
}
