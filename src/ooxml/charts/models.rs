//! Shared value types for chart data sources and rich text.
//!
//! A `c:numRef`/`c:strRef` pairs a source worksheet formula with a cached
//! value cache (`c:numCache`/`c:strCache`) so a chart still renders when the
//! host application hasn't recalculated since the workbook changed; these
//! types keep both sides together the way the ECMA-376 schema does.

/// A cell-range formula backing a chart data series (`c:f`).
#[derive(Debug, Clone, PartialEq)]
pub struct DataSourceRef {
    /// The formula text, e.g. `"Sheet1!$B$2:$B$10"`.
    pub formula: String,
}

/// A numeric data source: a formula reference plus its cached values
/// (`c:numRef`/`c:numCache`, or a literal `c:numLit`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericData {
    /// The backing formula, `None` for a literal (`c:numLit`) series.
    pub source_ref: Option<DataSourceRef>,
    /// Cached point values, in point order.
    pub values: Vec<f64>,
    /// Number format code applied to the cached values (`c:formatCode`).
    pub format_code: Option<String>,
}

/// A string data source: a formula reference plus its cached values
/// (`c:strRef`/`c:strCache`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringData {
    pub source_ref: Option<DataSourceRef>,
    pub values: Vec<String>,
}

/// Minimal rich text content (`c:tx/c:rich`), enough for a single titled
/// run; does not model per-run character properties.
#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    pub text: String,
}

impl RichText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// `c:title/c:tx` — either a literal rich-text title or a reference to a
/// worksheet cell (`c:strRef`).
#[derive(Debug, Clone, PartialEq)]
pub enum TitleText {
    Literal(RichText),
    Reference(DataSourceRef),
}
