//! Unified workbook facade over the SpreadsheetML (.xlsx) domain model.

use super::types::Result;
use super::workbook_types::{WorkbookFormat, WorkbookImpl, detect_workbook_format_from_signature};
use crate::common::Metadata;
#[allow(unused_imports)] // used via the `WorkbookTrait` methods below
use crate::sheet::WorkbookTrait;
use std::io::Cursor;
use std::path::Path;

/// A unified workbook interface, following the same shape as the unified
/// `Document` and `Presentation` facades.
///
/// # Examples
///
/// ```rust,no_run
/// use parchment::sheet::Workbook;
///
/// let workbook = Workbook::open("data.xlsx")?;
///
/// let names = workbook.worksheet_names()?;
/// println!("Worksheets: {:?}", names);
///
/// let text = workbook.text()?;
/// println!("{}", text);
///
/// let metadata = workbook.metadata()?;
/// if let Some(title) = metadata.title {
///     println!("Title: {}", title);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Workbook {
    inner: WorkbookImpl,
    cached_metadata: Metadata,
}

impl Workbook {
    /// Open a workbook from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Create a workbook from bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut cursor = Cursor::new(&bytes);
        let format = detect_workbook_format_from_signature(&mut cursor)?;

        match format {
            WorkbookFormat::Xlsx => {
                let package = crate::ooxml::opc::OpcPackage::from_reader(Cursor::new(bytes))?;
                let metadata =
                    crate::ooxml::metadata::extract_metadata(&package).unwrap_or_default();
                let xlsx = crate::ooxml::xlsx::Workbook::new(package)?;
                Ok(Self {
                    inner: WorkbookImpl::Xlsx(xlsx),
                    cached_metadata: metadata,
                })
            },
        }
    }

    /// Get all worksheet names.
    pub fn worksheet_names(&self) -> Result<Vec<String>> {
        let WorkbookImpl::Xlsx(xlsx) = &self.inner;
        Ok(xlsx.worksheet_names().to_vec())
    }

    /// Get the number of worksheets.
    pub fn worksheet_count(&self) -> Result<usize> {
        let WorkbookImpl::Xlsx(xlsx) = &self.inner;
        Ok(xlsx.worksheet_count())
    }

    /// Extract all text from all worksheets, tab-separated within a row and
    /// newline-separated between rows.
    pub fn text(&self) -> Result<String> {
        let WorkbookImpl::Xlsx(xlsx) = &self.inner;
        let mut out = String::new();
        for i in 0..xlsx.worksheet_count() {
            let ws = xlsx.worksheet_by_index(i)?;
            let mut rows = ws.rows();
            while let Some(row) = rows.next() {
                let row = row?;
                for (idx, cell) in row.iter().enumerate() {
                    if idx > 0 {
                        out.push('\t');
                    }
                    push_cell_text(&mut out, cell);
                }
                out.push('\n');
            }
        }
        Ok(out)
    }

    /// Get metadata extracted during workbook initialization.
    pub fn metadata(&self) -> Result<Metadata> {
        Ok(self.cached_metadata.clone())
    }
}

fn push_cell_text(out: &mut String, cell: &crate::sheet::CellValue) {
    use crate::sheet::CellValue;
    match cell {
        CellValue::Empty => {},
        CellValue::Bool(b) => out.push_str(if *b { "TRUE" } else { "FALSE" }),
        CellValue::Int(n) => out.push_str(&n.to_string()),
        CellValue::Float(f) => out.push_str(&f.to_string()),
        CellValue::String(s) => out.push_str(s),
        CellValue::DateTime(dt) => out.push_str(&dt.to_string()),
        CellValue::Error(e) => out.push_str(e),
        CellValue::Formula {
            formula,
            cached_value,
            ..
        } => match cached_value.as_deref() {
            Some(CellValue::String(s)) => out.push_str(s),
            Some(CellValue::Int(n)) => out.push_str(&n.to_string()),
            Some(CellValue::Float(f)) => out.push_str(&f.to_string()),
            Some(CellValue::Bool(b)) => out.push_str(if *b { "TRUE" } else { "FALSE" }),
            _ => out.push_str(&format!("={formula}")),
        },
    }
}
