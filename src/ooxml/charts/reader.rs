//! Parse `c:chartSpace` markup into a [`Chart`], following the same
//! parse-via-`quick_xml`-event-loop idiom as
//! [`crate::animation::timing::TimeNode::parse_timing_xml`].

use super::axis::{Axis, CategoryAxis, ValueAxis};
use super::chart::Chart;
use super::legend::Legend;
use super::models::{DataSourceRef, NumericData, RichText, StringData, TitleText};
use super::plot_area::{
    Area3DTypeGroup, AreaTypeGroup, Bar3DTypeGroup, BarTypeGroup, BubbleTypeGroup,
    CommonSeriesData, DoughnutTypeGroup, Line3DTypeGroup, LineTypeGroup, Pie3DTypeGroup,
    PieTypeGroup, RadarTypeGroup, ScatterTypeGroup, StockTypeGroup, Surface3DTypeGroup,
    SurfaceTypeGroup, TypeGroup,
};
use super::series::Series;
use super::types::{AxisPosition, BarDirection, BarGrouping, LegendPosition, ScatterStyle};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Which `c:ser` child the parser is currently accumulating point data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeriesField {
    Name,
    Categories,
    Values,
    XValues,
    YValues,
    BubbleSizes,
}

/// A `c:numRef`/`c:strRef`/`c:numLit`/`c:strLit` reference being accumulated:
/// its backing formula (`c:f`), cached/literal point values (`c:pt/c:v`), and
/// number format (`c:formatCode`).
#[derive(Debug, Default)]
struct RefBuilder {
    formula: Option<String>,
    format_code: Option<String>,
    num_values: Vec<f64>,
    str_values: Vec<String>,
}

/// Axis fields common to both `c:catAx` and `c:valAx`, accumulated before the
/// concrete variant is known to matter (only `c:valAx` carries min/max).
#[derive(Debug, Default)]
struct AxisBuilder {
    id: u32,
    position: AxisPosition,
    cross_axis_id: u32,
    deleted: bool,
    min: Option<f64>,
    max: Option<f64>,
}

impl Default for AxisPosition {
    fn default() -> Self {
        AxisPosition::Bottom
    }
}

/// Parse a complete `c:chartSpace` document into a [`Chart`].
pub fn parse_chart(xml: &[u8]) -> Result<Chart> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut chart = Chart::new();
    let mut stack: Vec<String> = Vec::new();
    let mut text_buffer = String::new();

    // Title accumulation.
    let mut in_title = false;
    let mut title_rich_text: Option<String> = None;
    let mut title_formula: Option<String> = None;

    // Current type group (by tag, so we know which variant to build on close).
    let mut group_tag: Option<String> = None;
    let mut group_series: Vec<Series> = Vec::new();
    let mut group_vary_colors = false;
    let mut group_direction = BarDirection::Column;
    let mut group_grouping = BarGrouping::Standard;
    let mut group_scatter_style = ScatterStyle::LineMarker;
    let mut group_hole_size: u8 = 50;

    // Current series.
    let mut series: Option<Series> = None;
    let mut series_field: Option<SeriesField> = None;
    let mut field_ref: RefBuilder = RefBuilder::default();

    // Current axis.
    let mut axis_tag: Option<String> = None;
    let mut axis: AxisBuilder = AxisBuilder::default();

    // Legend.
    let mut legend_position = LegendPosition::Right;
    let mut legend_overlay = false;
    let mut in_legend = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = local_name(&e);

                match name.as_str() {
                    "title" => {
                        in_title = true;
                        title_rich_text = None;
                        title_formula = None;
                    },
                    "autoTitleDeleted" => {
                        chart.auto_title_deleted = attr_bool(&e, b"val");
                    },
                    "legend" => in_legend = true,
                    "legendPos" => {
                        legend_position = LegendPosition::from_xml(&attr_str(&e, b"val"));
                    },
                    "overlay" if in_legend => {
                        legend_overlay = attr_bool(&e, b"val");
                    },
                    "plotVisOnly" => {
                        chart.plot_visible_only = attr_bool(&e, b"val");
                    },
                    "varyColors" => group_vary_colors = attr_bool(&e, b"val"),
                    "barDir" => group_direction = BarDirection::from_xml(&attr_str(&e, b"val")),
                    "grouping" => group_grouping = BarGrouping::from_xml(&attr_str(&e, b"val")),
                    "scatterStyle" => {
                        group_scatter_style = ScatterStyle::from_xml(&attr_str(&e, b"val"))
                    },
                    "holeSize" => {
                        group_hole_size = attr_str(&e, b"val").parse().unwrap_or(50)
                    },
                    "barChart" | "bar3DChart" | "lineChart" | "line3DChart" | "areaChart"
                    | "area3DChart" | "pieChart" | "pie3DChart" | "doughnutChart"
                    | "scatterChart" | "bubbleChart" | "radarChart" | "stockChart"
                    | "surfaceChart" | "surface3DChart" => {
                        group_tag = Some(name.clone());
                        group_series.clear();
                        group_vary_colors = false;
                    },
                    "ser" => {
                        series = Some(Series::new(group_series.len() as u32));
                    },
                    "idx" => {
                        if let Some(s) = series.as_mut() {
                            s.index = attr_str(&e, b"val").parse().unwrap_or(s.index);
                        }
                    },
                    "order" => {
                        if let Some(s) = series.as_mut() {
                            s.order = attr_str(&e, b"val").parse().unwrap_or(s.order);
                        }
                    },
                    "tx" if series.is_some() => {
                        series_field = Some(SeriesField::Name);
                        field_ref = RefBuilder::default();
                    },
                    "cat" => {
                        series_field = Some(SeriesField::Categories);
                        field_ref = RefBuilder::default();
                    },
                    "val" => {
                        series_field = Some(SeriesField::Values);
                        field_ref = RefBuilder::default();
                    },
                    "xVal" => {
                        series_field = Some(SeriesField::XValues);
                        field_ref = RefBuilder::default();
                    },
                    "yVal" => {
                        series_field = Some(SeriesField::YValues);
                        field_ref = RefBuilder::default();
                    },
                    "bubbleSize" => {
                        series_field = Some(SeriesField::BubbleSizes);
                        field_ref = RefBuilder::default();
                    },
                    "f" => text_buffer.clear(),
                    "pt" => text_buffer.clear(),
                    "formatCode" => text_buffer.clear(),
                    "t" => text_buffer.clear(),
                    "catAx" | "valAx" | "dateAx" => {
                        axis_tag = Some(name.clone());
                        axis = AxisBuilder::default();
                    },
                    "axId" if axis_tag.is_some() => {
                        axis.id = attr_str(&e, b"val").parse().unwrap_or(0);
                    },
                    "axPos" if axis_tag.is_some() => {
                        axis.position = AxisPosition::from_xml(&attr_str(&e, b"val"));
                    },
                    "crossAx" if axis_tag.is_some() => {
                        axis.cross_axis_id = attr_str(&e, b"val").parse().unwrap_or(0);
                    },
                    "delete" if axis_tag.is_some() => {
                        axis.deleted = attr_bool(&e, b"val");
                    },
                    "min" if axis_tag.is_some() => {
                        axis.min = attr_str(&e, b"val").parse().ok();
                    },
                    "max" if axis_tag.is_some() => {
                        axis.max = attr_str(&e, b"val").parse().ok();
                    },
                    _ => {},
                }

                stack.push(name);
            },
            Ok(Event::Text(t)) => {
                if let Ok(text) = t.unescape() {
                    text_buffer.push_str(&text);
                }
            },
            Ok(Event::End(e)) => {
                let name = local_name_end(&e);
                match name.as_str() {
                    "t" if in_title => {
                        title_rich_text.get_or_insert_with(String::new).push_str(&text_buffer);
                    },
                    "f" => {
                        if in_title && series_field.is_none() {
                            title_formula = Some(text_buffer.clone());
                        } else {
                            field_ref.formula = Some(text_buffer.clone());
                        }
                    },
                    "formatCode" => field_ref.format_code = Some(text_buffer.clone()),
                    "v" => {
                        if series_field.is_some() {
                            if let Ok(n) = text_buffer.parse::<f64>() {
                                field_ref.num_values.push(n);
                            } else {
                                field_ref.str_values.push(text_buffer.clone());
                            }
                        }
                    },
                    "title" => {
                        chart.title = if let Some(text) = title_rich_text.take() {
                            Some(TitleText::Literal(RichText::new(text)))
                        } else {
                            title_formula
                                .take()
                                .map(|f| TitleText::Reference(DataSourceRef { formula: f }))
                        };
                        in_title = false;
                    },
                    "legend" => {
                        chart.legend = Some(Legend {
                            position: legend_position,
                            overlay: legend_overlay,
                        });
                        in_legend = false;
                    },
                    "tx" | "cat" | "val" | "xVal" | "yVal" | "bubbleSize" => {
                        if let (Some(field), Some(s)) = (series_field.take(), series.as_mut()) {
                            apply_series_field(s, field, std::mem::take(&mut field_ref));
                        }
                    },
                    "ser" => {
                        if let Some(s) = series.take() {
                            group_series.push(s);
                        }
                    },
                    "barChart" | "bar3DChart" | "lineChart" | "line3DChart" | "areaChart"
                    | "area3DChart" | "pieChart" | "pie3DChart" | "doughnutChart"
                    | "scatterChart" | "bubbleChart" | "radarChart" | "stockChart"
                    | "surfaceChart" | "surface3DChart" => {
                        if let Some(tag) = group_tag.take() {
                            let common = CommonSeriesData {
                                series: std::mem::take(&mut group_series),
                                vary_colors: group_vary_colors,
                            };
                            chart.plot_area.type_groups.push(build_type_group(
                                &tag,
                                common,
                                group_direction,
                                group_grouping,
                                group_scatter_style,
                                group_hole_size,
                            ));
                        }
                    },
                    "catAx" | "valAx" | "dateAx" => {
                        if let Some(tag) = axis_tag.take() {
                            chart.plot_area.axes.push(build_axis(&tag, &axis));
                        }
                    },
                    _ => {},
                }
                stack.pop();
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
    }

    Ok(chart)
}

fn apply_series_field(series: &mut Series, field: SeriesField, data: RefBuilder) {
    let source_ref = data.formula.map(|formula| DataSourceRef { formula });
    match field {
        SeriesField::Name => {
            series.name = if !data.str_values.is_empty() {
                Some(TitleText::Literal(RichText::new(data.str_values[0].clone())))
            } else {
                source_ref.map(TitleText::Reference)
            };
        },
        SeriesField::Categories => {
            series.categories = Some(StringData {
                source_ref,
                values: data.str_values,
            });
        },
        SeriesField::Values => {
            series.values = Some(NumericData {
                source_ref,
                values: data.num_values,
                format_code: data.format_code,
            });
        },
        SeriesField::XValues => {
            series.x_values = Some(NumericData {
                source_ref,
                values: data.num_values,
                format_code: data.format_code,
            });
        },
        SeriesField::YValues => {
            series.y_values = Some(NumericData {
                source_ref,
                values: data.num_values,
                format_code: data.format_code,
            });
        },
        SeriesField::BubbleSizes => {
            series.bubble_sizes = Some(NumericData {
                source_ref,
                values: data.num_values,
                format_code: data.format_code,
            });
        },
    }
}

fn build_type_group(
    tag: &str,
    common: CommonSeriesData,
    direction: BarDirection,
    grouping: BarGrouping,
    scatter_style: ScatterStyle,
    hole_size: u8,
) -> TypeGroup {
    match tag {
        "barChart" => TypeGroup::Bar(BarTypeGroup { common, direction, grouping }),
        "bar3DChart" => TypeGroup::Bar3D(Bar3DTypeGroup { common, direction, grouping }),
        "lineChart" => TypeGroup::Line(LineTypeGroup { common, grouping }),
        "line3DChart" => TypeGroup::Line3D(Line3DTypeGroup { common, grouping }),
        "areaChart" => TypeGroup::Area(AreaTypeGroup { common, grouping }),
        "area3DChart" => TypeGroup::Area3D(Area3DTypeGroup { common, grouping }),
        "pieChart" => TypeGroup::Pie(PieTypeGroup { common }),
        "pie3DChart" => TypeGroup::Pie3D(Pie3DTypeGroup { common }),
        "doughnutChart" => TypeGroup::Doughnut(DoughnutTypeGroup { common, hole_size_pct: hole_size }),
        "scatterChart" => TypeGroup::Scatter(ScatterTypeGroup { common, style: scatter_style }),
        "bubbleChart" => TypeGroup::Bubble(BubbleTypeGroup { common }),
        "radarChart" => TypeGroup::Radar(RadarTypeGroup { common }),
        "stockChart" => TypeGroup::Stock(StockTypeGroup { common }),
        "surfaceChart" => TypeGroup::Surface(SurfaceTypeGroup { common }),
        _ => TypeGroup::Surface3D(Surface3DTypeGroup { common }),
    }
}

fn build_axis(tag: &str, axis: &AxisBuilder) -> Axis {
    match tag {
        "valAx" => Axis::Value(ValueAxis {
            id: axis.id,
            position: axis.position,
            cross_axis_id: axis.cross_axis_id,
            deleted: axis.deleted,
            min: axis.min,
            max: axis.max,
        }),
        _ => Axis::Category(CategoryAxis {
            id: axis.id,
            position: axis.position,
            cross_axis_id: axis.cross_axis_id,
            deleted: axis.deleted,
        }),
    }
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn local_name_end(e: &quick_xml::events::BytesEnd<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attr_str(e: &BytesStart<'_>, key: &[u8]) -> String {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| std::str::from_utf8(&a.value).ok().map(str::to_string))
        .unwrap_or_default()
}

fn attr_bool(e: &BytesStart<'_>, key: &[u8]) -> bool {
    match attr_str(e, key).as_str() {
        "0" | "false" => false,
        "" => true,
        _ => true,
    }
}
