//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;

impl From<crate::ole::OleError> for Error {
    fn from(err: crate::ole::OleError) -> Self {
        match err {
            crate::ole::OleError::Io(e) => Error::Io(e),
            crate::ole::OleError::InvalidFormat(s) => Error::InvalidFormat(s),
            crate::ole::OleError::InvalidData(s) => Error::InvalidFormat(s),
            crate::ole::OleError::NotOleFile => Error::NotOfficeFile,
            crate::ole::OleError::CorruptedFile(s) => Error::CorruptedFile(s),
            crate::ole::OleError::StreamNotFound => {
                Error::ComponentNotFound("Stream not found".to_string())
            },
            crate::ole::OleError::CfbCycle { chain, revisited } => Error::CycleDetected {
                chain: vec![chain, format!("sector {revisited}")],
            },
            crate::ole::OleError::CfbBadSector(s) => {
                Error::CorruptedFile(format!("reserved sector value {s} used as a chain successor"))
            },
            crate::ole::OleError::CfbOOR(s) => {
                Error::CorruptedFile(format!("sector index {s} exceeds MAXREGSECT"))
            },
            crate::ole::OleError::CfbTruncated { wanted, available } => Error::ParseError {
                path: "<cfb>".to_string(),
                byte_offset: Some(available),
                message: format!("wanted {wanted} bytes, container has {available}"),
            },
        }
    }
}

#[cfg(feature = "ooxml")]
impl From<crate::ooxml::opc::error::OpcError> for Error {
    fn from(err: crate::ooxml::opc::error::OpcError) -> Self {
        Error::from_opc_error(err)
    }
}

#[cfg(feature = "ooxml")]
impl From<crate::ooxml::error::OoxmlError> for Error {
    fn from(err: crate::ooxml::error::OoxmlError) -> Self {
        match err {
            crate::ooxml::error::OoxmlError::IoError(e) => Error::Io(e),
            crate::ooxml::error::OoxmlError::Xml(s) => Error::XmlError(s),
            crate::ooxml::error::OoxmlError::PartNotFound(s) => Error::ComponentNotFound(s),
            crate::ooxml::error::OoxmlError::InvalidContentType { expected, got } => {
                Error::InvalidContentType { expected, got }
            },
            crate::ooxml::error::OoxmlError::InvalidRelationship(s) => Error::Other(s),
            crate::ooxml::error::OoxmlError::InvalidFormat(s) => Error::InvalidFormat(s),
            crate::ooxml::error::OoxmlError::Opc(e) => Error::from_opc_error(e),
            crate::ooxml::error::OoxmlError::InvalidUri(s) => Error::Other(s),
            crate::ooxml::error::OoxmlError::Other(s) => Error::Other(s),
        }
    }
}

#[cfg(feature = "ooxml")]
impl Error {
    pub(crate) fn from_opc_error(err: crate::ooxml::opc::error::OpcError) -> Self {
        match err {
            crate::ooxml::opc::error::OpcError::IoError(e) => Error::Io(e),
            crate::ooxml::opc::error::OpcError::ZipError(e) => Error::ZipError(e.to_string()),
            crate::ooxml::opc::error::OpcError::XmlError(s) => Error::XmlError(s),
            crate::ooxml::opc::error::OpcError::PartNotFound(s) => Error::ComponentNotFound(s),
            _ => Error::Other(err.to_string()),
        }
    }
}

#[cfg(feature = "ooxml")]
impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}

#[cfg(feature = "ooxml")]
impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipError(err.to_string())
    }
}

impl From<crate::patcher::PatchError> for Error {
    fn from(err: crate::patcher::PatchError) -> Self {
        match err {
            crate::patcher::PatchError::OperationFailed { index, source } => Error::PatchFailed {
                index,
                message: source.to_string(),
            },
            crate::patcher::PatchError::InvariantViolation(s) => Error::InvariantViolation(s),
            crate::patcher::PatchError::NotFound(s) => Error::ComponentNotFound(s),
        }
    }
}

#[cfg(feature = "ooxml")]
impl From<crate::layout::LayoutError> for Error {
    fn from(err: crate::layout::LayoutError) -> Self {
        match err {
            crate::layout::LayoutError::UnknownAlgorithm(s) => Error::Unsupported(s),
            crate::layout::LayoutError::InvalidInput(s) => Error::InvariantViolation(s),
            crate::layout::LayoutError::Unsatisfiable(s) => Error::InvariantViolation(s),
        }
    }
}

#[cfg(feature = "pdf")]
impl From<crate::pdf::PdfError> for Error {
    fn from(err: crate::pdf::PdfError) -> Self {
        match err {
            crate::pdf::PdfError::Io(e) => Error::Io(e),
            crate::pdf::PdfError::Parse { offset, message } => Error::ParseError {
                path: "<pdf>".to_string(),
                byte_offset: Some(offset as u64),
                message,
            },
            crate::pdf::PdfError::Unsupported(s) => Error::Unsupported(s),
            crate::pdf::PdfError::CycleDetected(chain) => Error::CycleDetected { chain },
        }
    }
}
