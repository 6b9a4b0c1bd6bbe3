//! Smart single-pass format detection with pre-parsed structures.
//!
//! Detects the file format while parsing it only once, so callers that go
//! on to build a domain model don't pay for a second parse pass.

/// Detected format with pre-parsed data structures.
#[derive(Debug)]
pub enum DetectedFormat {
    #[cfg(feature = "ooxml")]
    Docx(crate::ooxml::opc::OpcPackage),
    #[cfg(feature = "ooxml")]
    Pptx(crate::ooxml::opc::OpcPackage),
    #[cfg(feature = "ooxml")]
    Xlsx(crate::ooxml::opc::OpcPackage),
    #[cfg(feature = "pdf")]
    Pdf(Vec<u8>),
    /// A CFB container that wasn't resolved to a more specific format.
    Cfb(Vec<u8>),
}

/// Smart single-pass format detection with pre-parsed data structures.
pub fn detect_format_smart(bytes: Vec<u8>) -> Option<DetectedFormat> {
    use crate::common::detection::FileFormat;
    use crate::common::detection::simd_utils::check_office_signatures;

    if bytes.len() < 8 {
        return None;
    }

    let mask = check_office_signatures(&bytes);

    #[cfg(feature = "pdf")]
    if mask.is_pdf() {
        return Some(DetectedFormat::Pdf(bytes));
    }

    if mask.is_ole2() {
        return Some(DetectedFormat::Cfb(bytes));
    }

    #[cfg(feature = "ooxml")]
    if mask.is_zip() {
        if let Ok(package) = crate::ooxml::opc::OpcPackage::from_bytes(&bytes) {
            if let Some(format) =
                crate::common::detection::ooxml::detect_ooxml_format_from_package(&package)
            {
                return match format {
                    FileFormat::Docx => Some(DetectedFormat::Docx(package)),
                    FileFormat::Pptx => Some(DetectedFormat::Pptx(package)),
                    FileFormat::Xlsx => Some(DetectedFormat::Xlsx(package)),
                    _ => None,
                };
            }
        }
    }

    None
}
