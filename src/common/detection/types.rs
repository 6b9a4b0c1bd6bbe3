//! File format type enumeration.

/// Supported file formats that can be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Microsoft Word Document (OOXML format, .docx)
    Docx,
    /// Microsoft PowerPoint Presentation (OOXML format, .pptx)
    Pptx,
    /// Microsoft Excel Spreadsheet (OOXML format, .xlsx)
    Xlsx,
    /// Portable Document Format (.pdf)
    Pdf,
    /// A bare CFB (OLE compound file binary) container, not further classified.
    ///
    /// Top-level legacy `.doc`/`.ppt`/`.xls` parsing is out of scope; this variant
    /// exists only because a package's `oleObject` relationship target resolves to
    /// a CFB stream that callers may want to recognize before handing it to
    /// [`crate::container::cfb::CfbReader`].
    Cfb,
}
