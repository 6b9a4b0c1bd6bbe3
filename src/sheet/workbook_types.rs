//! Unified workbook types and format detection.

use crate::common::Error;
use std::io::{Read, Seek, SeekFrom};

type Result<T> = std::result::Result<T, Error>;

/// Internal representation of the workbook implementation.
///
/// This enum wraps the format-specific workbook type; today that is only
/// the OOXML SpreadsheetML implementation, but it keeps the unified
/// `Workbook` facade consistent with `document::Document` and
/// `presentation::Presentation`, which wrap a format enum the same way.
pub(super) enum WorkbookImpl {
    Xlsx(crate::ooxml::xlsx::Workbook),
}

/// Format of the workbook file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WorkbookFormat {
    /// Office Open XML Workbook (.xlsx)
    Xlsx,
}

/// Detect workbook format from file signature.
pub(super) fn detect_workbook_format_from_signature<R: Read + Seek>(
    reader: &mut R,
) -> Result<WorkbookFormat> {
    let mut header = [0u8; 4];
    reader.seek(SeekFrom::Start(0))?;
    reader.read_exact(&mut header)?;
    reader.seek(SeekFrom::Start(0))?;

    if &header[0..4] == b"PK\x03\x04" {
        return Ok(WorkbookFormat::Xlsx);
    }

    Err(Error::NotOfficeFile)
}
