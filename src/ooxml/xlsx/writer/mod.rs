//! Mutable worksheet and workbook writer components for XLSX.

pub mod sheet;
pub mod strings;
pub mod styles;
pub mod table;
pub mod workbook;

// Re-export main types
pub use sheet::{
    AutoFilter, CellComment, ConditionalFormat, ConditionalFormatType, FreezePanes, HeaderFooter,
    Hyperlink, Image, MutableWorksheet, NamedRange, PageBreak, PageSetup, RichTextRun,
    SheetProtection,
};
pub use strings::MutableSharedStrings;
pub use styles::StylesBuilder;
pub use workbook::{MutableWorkbookData, WorkbookProtection};
