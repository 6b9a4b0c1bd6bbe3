//! DrawingML chart parts (`c:chartSpace`) shared by PowerPoint graphic
//! frames and Excel worksheet charts.
//!
//! The model mirrors the ECMA-376 chart schema's own split: [`chart`] holds
//! the top-level document, [`plot_area`] the per-family type groups, [`series`]
//! the per-series data, [`axis`]/[`legend`] the supporting furniture, and
//! [`models`]/[`types`] the value types and enumerations shared across all of
//! them. [`reader`] and [`writer`] convert a [`chart::Chart`] to and from
//! `c:chartSpace` markup.

pub mod axis;
pub mod chart;
pub mod legend;
pub mod models;
pub mod plot_area;
pub mod reader;
pub mod series;
pub mod types;
pub mod writer;

pub use axis::{Axis, CategoryAxis, ValueAxis};
pub use chart::Chart;
pub use legend::Legend;
pub use models::{DataSourceRef, NumericData, RichText, StringData, TitleText};
pub use plot_area::{PlotArea, TypeGroup};
pub use reader::parse_chart;
pub use series::Series;
pub use types::{AxisPosition, BarDirection, BarGrouping, ChartType, LegendPosition, ScatterStyle};
pub use writer::write_chart;
