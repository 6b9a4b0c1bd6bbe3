//! Core file format detection functions.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use super::types::FileFormat;
use super::{ooxml, utils};

/// Detect file format from a file path.
///
/// This function opens the file and reads only the necessary bytes
/// to determine the format, making it very efficient.
pub fn detect_file_format<P: AsRef<Path>>(path: P) -> Option<FileFormat> {
    let mut file = File::open(path).ok()?;
    detect_format_from_reader(&mut file)
}

/// Detect file format from a byte slice.
///
/// This function analyzes the byte signature in memory without
/// requiring file I/O, making it ideal for network data or
/// in-memory processing.
pub fn detect_file_format_from_bytes(bytes: &[u8]) -> Option<FileFormat> {
    if bytes.len() < 4 {
        return None;
    }

    if bytes.starts_with(utils::PDF_SIGNATURE) {
        return Some(FileFormat::Pdf);
    }

    if bytes.len() >= 8 && &bytes[0..8] == utils::OLE2_SIGNATURE {
        return Some(FileFormat::Cfb);
    }

    if &bytes[0..4] == utils::ZIP_SIGNATURE {
        return ooxml::detect_zip_format(bytes);
    }

    None
}

/// Detect file format from any reader that implements Read + Seek.
///
/// This is the core detection function used by both file path and
/// byte slice detection methods.
pub fn detect_format_from_reader<R: Read + Seek>(reader: &mut R) -> Option<FileFormat> {
    let mut header = [0u8; 8];
    if reader.read_exact(&mut header).is_err() {
        return None;
    }
    let _ = reader.seek(std::io::SeekFrom::Start(0));

    if header.starts_with(utils::PDF_SIGNATURE) {
        return Some(FileFormat::Pdf);
    }

    if header == utils::OLE2_SIGNATURE {
        return Some(FileFormat::Cfb);
    }

    if header[0..4] == *utils::ZIP_SIGNATURE {
        let result = ooxml::detect_zip_format_from_reader(reader);
        let _ = reader.seek(std::io::SeekFrom::Start(0));
        return result;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf_from_bytes() {
        let data = b"%PDF-1.7\n%...".to_vec();
        assert_eq!(detect_file_format_from_bytes(&data), Some(FileFormat::Pdf));
    }

    #[test]
    fn test_detect_cfb_from_bytes() {
        let data = utils::OLE2_SIGNATURE.to_vec();
        assert_eq!(detect_file_format_from_bytes(&data), Some(FileFormat::Cfb));
    }

    #[test]
    fn test_too_short_is_none() {
        assert_eq!(detect_file_format_from_bytes(&[0x50, 0x4b]), None);
    }
}
