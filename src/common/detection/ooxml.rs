//! OOXML format detection (modern Office documents).

use std::io::{Read, Seek};
use crate::common::detection::FileFormat;

/// Detect ZIP-based OOXML formats from byte content.
/// Uses OpcPackage to properly validate and identify OOXML format.
pub fn detect_zip_format(bytes: &[u8]) -> Option<FileFormat> {
    if bytes.len() < 4 || &bytes[0..4] != crate::common::detection::utils::ZIP_SIGNATURE {
        return None;
    }
    let mut cursor = std::io::Cursor::new(bytes);
    detect_zip_format_from_reader(&mut cursor)
}

/// Detect ZIP-based formats from a reader.
/// Uses OpcPackage to properly parse and identify OOXML format.
pub fn detect_zip_format_from_reader<R: Read + Seek>(
    reader: &mut R
) -> Option<FileFormat> {
    let package = crate::ooxml::opc::OpcPackage::from_reader(reader).ok()?;
    detect_ooxml_format_from_package(&package)
}

/// Detect specific OOXML format from OpcPackage.
/// Analyzes the package structure to determine the document type.
pub fn detect_ooxml_format_from_package(package: &crate::ooxml::opc::OpcPackage) -> Option<FileFormat> {
    if package.iter_parts().any(|part| {
        part.content_type().contains("wordprocessingml") ||
        part.content_type().contains("document.main")
    }) {
        return Some(FileFormat::Docx);
    }

    if package.iter_parts().any(|part| {
        part.content_type().contains("presentationml") ||
        part.content_type().contains("presentation.main")
    }) {
        return Some(FileFormat::Pptx);
    }

    if package.iter_parts().any(|part| {
        part.content_type().contains("spreadsheetml") ||
        part.content_type().contains("worksheet") ||
        part.content_type().contains("workbook")
    }) {
        return Some(FileFormat::Xlsx);
    }

    None
}
