/// Chart parts for PowerPoint presentations.
///
/// This module provides types for working with charts in PPTX files.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use quick_xml::Reader;
use quick_xml::events::Event;

/// Chart type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    /// Bar chart
    Bar,
    /// Column chart (vertical bars)
    Column,
    /// Line chart
    Line,
    /// Pie chart
    Pie,
    /// Area chart
    Area,
    /// Scatter (XY) chart
    Scatter,
    /// Bubble chart
    Bubble,
    /// Doughnut chart
    Doughnut,
    /// Radar chart
    Radar,
    /// Surface chart
    Surface,
    /// Stock chart
    Stock,
    /// Unknown or unsupported chart type
    Unknown,
}

/// Basic chart information extracted from a chart part.
#[derive(Debug, Clone)]
pub struct ChartInfo {
    /// Chart type
    pub chart_type: ChartType,
    /// Chart title if available
    pub title: Option<String>,
    /// Whether the chart has a legend
    pub has_legend: bool,
}

/// Chart part - contains chart data and visualization.
///
/// Corresponds to `/ppt/charts/chartN.xml` in the package.
pub struct ChartPart<'a> {
    /// The underlying OPC part
    part: &'a dyn Part,
}

impl<'a> ChartPart<'a> {
    /// Create a ChartPart from an OPC Part.
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    /// Get the XML bytes of the chart.
    #[inline]
    fn xml_bytes(&self) -> &[u8] {
        self.part.blob()
    }

    /// Parse and return basic chart information.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let chart_part = ChartPart::from_part(part)?;
    /// let info = chart_part.chart_info()?;
    /// println!("Chart type: {:?}", info.chart_type);
    /// ```
    pub fn chart_info(&self) -> Result<ChartInfo> {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);

        let mut chart_type = ChartType::Unknown;
        let mut title: Option<String> = None;
        let mut has_legend = false;

        let mut buf = Vec::new();
        let mut in_title = false;
        let mut in_title_text = false;

        loop {
            buf.clear();
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let tag_name = e.local_name();

                    // Detect chart type from plot area elements
                    chart_type = match tag_name.as_ref() {
                        b"barChart" => ChartType::Bar,
                        b"bar3DChart" => ChartType::Bar,
                        b"lineChart" => ChartType::Line,
                        b"line3DChart" => ChartType::Line,
                        b"pieChart" => ChartType::Pie,
                        b"pie3DChart" => ChartType::Pie,
                        b"areaChart" => ChartType::Area,
                        b"area3DChart" => ChartType::Area,
                        b"scatterChart" => ChartType::Scatter,
                        b"bubbleChart" => ChartType::Bubble,
                        b"doughnutChart" => ChartType::Doughnut,
                        b"radarChart" => ChartType::Radar,
                        b"surfaceChart" => ChartType::Surface,
                        b"surface3DChart" => ChartType::Surface,
                        b"stockChart" => ChartType::Stock,
                        b"title" => {
                            in_title = true;
                            chart_type
                        },
                        b"legend" => {
                            has_legend = true;
                            chart_type
                        },
                        b"t" if in_title => {
                            in_title_text = true;
                            chart_type
                        },
                        _ => chart_type,
                    };
                },
                Ok(Event::Text(e)) if in_title_text => {
                    let text = std::str::from_utf8(e.as_ref())
                        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    match &mut title {
                        Some(t) => t.push_str(text),
                        None => title = Some(text.to_string()),
                    }
                },
                Ok(Event::End(e)) => {
                    let tag_name = e.local_name();
                    match tag_name.as_ref() {
                        b"title" => in_title = false,
                        b"t" => in_title_text = false,
                        _ => {},
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(ChartInfo {
            chart_type,
            title,
            has_legend,
        })
    }

    /// Get the underlying OPC part.
    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

/// A single data series of a chart (one line, one set of bars, …).
#[derive(Debug, Clone, Default)]
pub struct ChartSeries {
    /// Series name, shown in the legend.
    pub name: String,
    /// Category labels, one per data point.
    pub categories: Vec<String>,
    /// Numeric values, one per data point.
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Create a new, empty series with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Set the category labels.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Set the numeric values.
    pub fn with_values(mut self, values: Vec<f64>) -> Self {
        self.values = values;
        self
    }
}

/// Chart data to embed in a presentation: chart type, position, title, and
/// one or more data series. This is the write-side counterpart to
/// [`ChartInfo`] (which is read-side, parsed from an existing chart part).
#[derive(Debug, Clone)]
pub struct ChartData {
    /// Chart type (bar, line, pie, …).
    pub chart_type: ChartType,
    /// X position in EMUs.
    pub x: i64,
    /// Y position in EMUs.
    pub y: i64,
    /// Width in EMUs.
    pub width: i64,
    /// Height in EMUs.
    pub height: i64,
    /// Optional chart title.
    pub title: Option<String>,
    /// Data series, in display order.
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    /// Create a new chart with no series and no title.
    pub fn new(chart_type: ChartType, x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            chart_type,
            x,
            y,
            width,
            height,
            title: None,
            series: Vec::new(),
        }
    }

    /// Set the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a data series.
    pub fn add_series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }
}

/// The DrawingML chart-type element name (`c:barChart`, `c:lineChart`, …) for
/// a given [`ChartType`], mirroring the tag vocabulary [`ChartPart::chart_info`]
/// reads back.
fn chart_type_element(chart_type: ChartType) -> &'static str {
    match chart_type {
        ChartType::Bar | ChartType::Column => "barChart",
        ChartType::Line => "lineChart",
        ChartType::Pie => "pieChart",
        ChartType::Area => "areaChart",
        ChartType::Scatter => "scatterChart",
        ChartType::Bubble => "bubbleChart",
        ChartType::Doughnut => "doughnutChart",
        ChartType::Radar => "radarChart",
        ChartType::Surface => "surfaceChart",
        ChartType::Stock => "stockChart",
        ChartType::Unknown => "barChart",
    }
}

/// Generate the `/ppt/charts/chartN.xml` content for a registered chart.
///
/// The series' numeric values reference the embedded Excel workbook produced
/// by [`super::super::writer::excel_embed::generate_chart_excel_data`] via
/// `c:numRef`/`c:strRef` formulas into `Sheet1`.
pub fn generate_chart_xml(chart: &ChartData) -> String {
    use crate::common::xml::escape_xml;
    use std::fmt::Write as _;

    let element = chart_type_element(chart.chart_type);
    let bar_dir = matches!(chart.chart_type, ChartType::Bar | ChartType::Column);

    let mut xml = String::with_capacity(2048);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    xml.push_str("<c:chart>");

    if let Some(title) = &chart.title {
        let _ = write!(
            xml,
            r#"<c:title><c:tx><c:rich><a:bodyPr/><a:p><a:r><a:t>{}</a:t></a:r></a:p></c:rich></c:tx><c:overlay val="0"/></c:title>"#,
            escape_xml(title)
        );
    }

    xml.push_str("<c:plotArea><c:layout/>");
    let _ = write!(xml, "<c:{element}>");
    if bar_dir {
        xml.push_str(r#"<c:barDir val="col"/>"#);
    }

    for (idx, series) in chart.series.iter().enumerate() {
        let _ = write!(xml, r#"<c:ser><c:idx val="{idx}"/><c:order val="{idx}"/>"#);
        let _ = write!(
            xml,
            r#"<c:tx><c:strRef><c:f>Sheet1!${}$1</c:f><c:strCache><c:ptCount val="1"/><c:pt idx="0"><c:v>{}</c:v></c:pt></c:strCache></c:strRef></c:tx>"#,
            column_letter(idx + 1),
            escape_xml(&series.name)
        );

        if !series.categories.is_empty() {
            xml.push_str("<c:cat><c:strRef><c:f>Sheet1!$A$2:$A$");
            let _ = write!(xml, "{}</c:f><c:strCache>", series.categories.len() + 1);
            let _ = write!(xml, r#"<c:ptCount val="{}"/>"#, series.categories.len());
            for (i, cat) in series.categories.iter().enumerate() {
                let _ = write!(
                    xml,
                    r#"<c:pt idx="{i}"><c:v>{}</c:v></c:pt>"#,
                    escape_xml(cat)
                );
            }
            xml.push_str("</c:strCache></c:strRef></c:cat>");
        }

        xml.push_str("<c:val><c:numRef><c:f>Sheet1!$");
        xml.push_str(&column_letter(idx + 1));
        let _ = write!(xml, "$2:${}$", column_letter(idx + 1));
        let _ = write!(xml, "{}</c:f><c:numCache>", series.values.len() + 1);
        let _ = write!(xml, r#"<c:ptCount val="{}"/>"#, series.values.len());
        for (i, value) in series.values.iter().enumerate() {
            let _ = write!(xml, r#"<c:pt idx="{i}"><c:v>{value}</c:v></c:pt>"#);
        }
        xml.push_str("</c:numCache></c:numRef></c:val>");

        xml.push_str("</c:ser>");
    }

    let _ = write!(xml, "</c:{element}>");
    xml.push_str("</c:plotArea>");
    xml.push_str(r#"<c:legend><c:legendPos val="b"/></c:legend>"#);
    xml.push_str("</c:chart>");
    xml.push_str("</c:chartSpace>");

    xml
}

fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    index += 1;
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        index = (index - 1) / 26;
    }
    letters.iter().rev().collect()
}
