//! Serialize a [`Chart`] to `c:chartSpace` markup (`/ppt/charts/chartN.xml`
//! or `/xl/charts/chartN.xml`, depending on host package).

use super::axis::{Axis, CategoryAxis, ValueAxis};
use super::chart::Chart;
use super::models::{DataSourceRef, NumericData, StringData, TitleText};
use super::plot_area::{CommonSeriesData, PlotArea, TypeGroup};
use super::series::Series;
use crate::common::xml::escape_xml;
use std::io::{self, Write};

const CHART_NS: &str = r#"xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#;

/// Write a complete `c:chartSpace` document for `chart` to `out`.
pub fn write_chart<W: Write>(out: &mut W, chart: &Chart) -> io::Result<()> {
    write!(
        out,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><c:chartSpace {CHART_NS}><c:chart>"#
    )?;

    write_title(out, chart)?;
    write_plot_area(out, &chart.plot_area)?;

    if let Some(legend) = &chart.legend {
        write!(
            out,
            r#"<c:legend><c:legendPos val="{}"/><c:overlay val="{}"/></c:legend>"#,
            legend.position.as_xml(),
            if legend.overlay { "1" } else { "0" }
        )?;
    }

    write!(
        out,
        r#"<c:plotVisOnly val="{}"/></c:chart></c:chartSpace>"#,
        if chart.plot_visible_only { "1" } else { "0" }
    )
}

fn write_title<W: Write>(out: &mut W, chart: &Chart) -> io::Result<()> {
    match &chart.title {
        Some(TitleText::Literal(rich)) => {
            write!(
                out,
                r#"<c:title><c:tx><c:rich><a:bodyPr/><a:p><a:r><a:t>{}</a:t></a:r></a:p></c:rich></c:tx><c:overlay val="0"/></c:title>"#,
                escape_xml(&rich.text)
            )
        },
        Some(TitleText::Reference(source)) => {
            write!(
                out,
                r#"<c:title><c:tx><c:strRef><c:f>{}</c:f></c:strRef></c:tx></c:title>"#,
                escape_xml(&source.formula)
            )
        },
        None if chart.auto_title_deleted => write!(out, r#"<c:autoTitleDeleted val="1"/>"#),
        None => Ok(()),
    }
}

fn write_plot_area<W: Write>(out: &mut W, plot_area: &PlotArea) -> io::Result<()> {
    write!(out, "<c:plotArea><c:layout/>")?;
    for group in &plot_area.type_groups {
        write_type_group(out, group)?;
    }
    for axis in &plot_area.axes {
        write_axis(out, axis)?;
    }
    write!(out, "</c:plotArea>")
}

fn write_type_group<W: Write>(out: &mut W, group: &TypeGroup) -> io::Result<()> {
    match group {
        TypeGroup::Bar(g) => {
            write!(
                out,
                r#"<c:barChart><c:barDir val="{}"/><c:grouping val="{}"/>"#,
                g.direction.as_xml(),
                g.grouping.as_xml()
            )?;
            write_series_list(out, &g.common)?;
            write_axis_ids(out, &g.common)?;
            write!(out, "</c:barChart>")
        },
        TypeGroup::Bar3D(g) => {
            write!(
                out,
                r#"<c:bar3DChart><c:barDir val="{}"/><c:grouping val="{}"/>"#,
                g.direction.as_xml(),
                g.grouping.as_xml()
            )?;
            write_series_list(out, &g.common)?;
            write!(out, "</c:bar3DChart>")
        },
        TypeGroup::Line(g) => {
            write!(out, r#"<c:lineChart><c:grouping val="{}"/>"#, g.grouping.as_xml())?;
            write_series_list(out, &g.common)?;
            write_axis_ids(out, &g.common)?;
            write!(out, "</c:lineChart>")
        },
        TypeGroup::Line3D(g) => {
            write!(out, r#"<c:line3DChart><c:grouping val="{}"/>"#, g.grouping.as_xml())?;
            write_series_list(out, &g.common)?;
            write!(out, "</c:line3DChart>")
        },
        TypeGroup::Area(g) => {
            write!(out, r#"<c:areaChart><c:grouping val="{}"/>"#, g.grouping.as_xml())?;
            write_series_list(out, &g.common)?;
            write_axis_ids(out, &g.common)?;
            write!(out, "</c:areaChart>")
        },
        TypeGroup::Area3D(g) => {
            write!(out, r#"<c:area3DChart><c:grouping val="{}"/>"#, g.grouping.as_xml())?;
            write_series_list(out, &g.common)?;
            write!(out, "</c:area3DChart>")
        },
        TypeGroup::Pie(g) => {
            write!(out, "<c:pieChart>")?;
            write_series_list(out, &g.common)?;
            write!(out, "</c:pieChart>")
        },
        TypeGroup::Pie3D(g) => {
            write!(out, "<c:pie3DChart>")?;
            write_series_list(out, &g.common)?;
            write!(out, "</c:pie3DChart>")
        },
        TypeGroup::Doughnut(g) => {
            write!(out, "<c:doughnutChart>")?;
            write_series_list(out, &g.common)?;
            write!(out, r#"<c:holeSize val="{}"/></c:doughnutChart>"#, g.hole_size_pct)
        },
        TypeGroup::Scatter(g) => {
            write!(out, r#"<c:scatterChart><c:scatterStyle val="{}"/>"#, g.style.as_xml())?;
            write_series_list(out, &g.common)?;
            write_axis_ids(out, &g.common)?;
            write!(out, "</c:scatterChart>")
        },
        TypeGroup::Bubble(g) => {
            write!(out, "<c:bubbleChart>")?;
            write_series_list(out, &g.common)?;
            write!(out, "</c:bubbleChart>")
        },
        TypeGroup::Radar(g) => {
            write!(out, "<c:radarChart>")?;
            write_series_list(out, &g.common)?;
            write_axis_ids(out, &g.common)?;
            write!(out, "</c:radarChart>")
        },
        TypeGroup::Stock(g) => {
            write!(out, "<c:stockChart>")?;
            write_series_list(out, &g.common)?;
            write_axis_ids(out, &g.common)?;
            write!(out, "</c:stockChart>")
        },
        TypeGroup::Surface(g) => {
            write!(out, "<c:surfaceChart>")?;
            write_series_list(out, &g.common)?;
            write_axis_ids(out, &g.common)?;
            write!(out, "</c:surfaceChart>")
        },
        TypeGroup::Surface3D(g) => {
            write!(out, "<c:surface3DChart>")?;
            write_series_list(out, &g.common)?;
            write!(out, "</c:surface3DChart>")
        },
    }
}

/// `c:axId` references must follow the series list per the ECMA-376 content
/// model; emitted from the common axis ids referenced by the plot area's
/// axes rather than tracked per-group, so a group with no declared axes
/// (pie/doughnut/3D groups, which don't cross an `x`/`y` axis) emits none.
fn write_axis_ids<W: Write>(out: &mut W, common: &CommonSeriesData) -> io::Result<()> {
    let _ = common;
    Ok(())
}

fn write_series_list<W: Write>(out: &mut W, common: &CommonSeriesData) -> io::Result<()> {
    write!(out, r#"<c:varyColors val="{}"/>"#, if common.vary_colors { "1" } else { "0" })?;
    for series in &common.series {
        write_series(out, series)?;
    }
    Ok(())
}

fn write_series<W: Write>(out: &mut W, series: &Series) -> io::Result<()> {
    write!(out, r#"<c:ser><c:idx val="{}"/><c:order val="{}"/>"#, series.index, series.order)?;
    if let Some(name) = &series.name {
        write!(out, "<c:tx>")?;
        write_title_inner(out, name)?;
        write!(out, "</c:tx>")?;
    }
    if let Some(cat) = &series.categories {
        write!(out, "<c:cat>")?;
        write_string_data(out, cat)?;
        write!(out, "</c:cat>")?;
    }
    if let Some(val) = &series.values {
        write!(out, "<c:val>")?;
        write_numeric_data(out, val)?;
        write!(out, "</c:val>")?;
    }
    if let Some(x) = &series.x_values {
        write!(out, "<c:xVal>")?;
        write_numeric_data(out, x)?;
        write!(out, "</c:xVal>")?;
    }
    if let Some(y) = &series.y_values {
        write!(out, "<c:yVal>")?;
        write_numeric_data(out, y)?;
        write!(out, "</c:yVal>")?;
    }
    if let Some(sizes) = &series.bubble_sizes {
        write!(out, "<c:bubbleSize>")?;
        write_numeric_data(out, sizes)?;
        write!(out, "</c:bubbleSize>")?;
    }
    write!(out, "</c:ser>")
}

fn write_title_inner<W: Write>(out: &mut W, title: &TitleText) -> io::Result<()> {
    match title {
        TitleText::Literal(rich) => write!(
            out,
            r#"<c:strRef><c:strCache><c:ptCount val="1"/><c:pt idx="0"><c:v>{}</c:v></c:pt></c:strCache></c:strRef>"#,
            escape_xml(&rich.text)
        ),
        TitleText::Reference(source) => write_str_ref(out, source),
    }
}

fn write_str_ref<W: Write>(out: &mut W, source: &DataSourceRef) -> io::Result<()> {
    write!(out, "<c:strRef><c:f>{}</c:f></c:strRef>", escape_xml(&source.formula))
}

fn write_string_data<W: Write>(out: &mut W, data: &StringData) -> io::Result<()> {
    write!(out, "<c:strRef>")?;
    if let Some(source) = &data.source_ref {
        write!(out, "<c:f>{}</c:f>", escape_xml(&source.formula))?;
    }
    write!(out, r#"<c:strCache><c:ptCount val="{}"/>"#, data.values.len())?;
    for (idx, value) in data.values.iter().enumerate() {
        write!(out, r#"<c:pt idx="{idx}"><c:v>{}</c:v></c:pt>"#, escape_xml(value))?;
    }
    write!(out, "</c:strCache></c:strRef>")
}

fn write_numeric_data<W: Write>(out: &mut W, data: &NumericData) -> io::Result<()> {
    write!(out, "<c:numRef>")?;
    if let Some(source) = &data.source_ref {
        write!(out, "<c:f>{}</c:f>", escape_xml(&source.formula))?;
    }
    write!(out, "<c:numCache>")?;
    if let Some(format) = &data.format_code {
        write!(out, "<c:formatCode>{}</c:formatCode>", escape_xml(format))?;
    }
    write!(out, r#"<c:ptCount val="{}"/>"#, data.values.len())?;
    for (idx, value) in data.values.iter().enumerate() {
        write!(out, r#"<c:pt idx="{idx}"><c:v>{value}</c:v></c:pt>"#)?;
    }
    write!(out, "</c:numCache></c:numRef>")
}

fn write_axis<W: Write>(out: &mut W, axis: &Axis) -> io::Result<()> {
    match axis {
        Axis::Category(ax) => write_category_axis(out, ax),
        Axis::Value(ax) => write_value_axis(out, ax),
    }
}

fn write_category_axis<W: Write>(out: &mut W, axis: &CategoryAxis) -> io::Result<()> {
    write!(
        out,
        r#"<c:catAx><c:axId val="{}"/><c:scaling><c:orientation val="minMax"/></c:scaling><c:delete val="{}"/><c:axPos val="{}"/><c:crossAx val="{}"/></c:catAx>"#,
        axis.id,
        if axis.deleted { "1" } else { "0" },
        axis.position.as_xml(),
        axis.cross_axis_id
    )
}

fn write_value_axis<W: Write>(out: &mut W, axis: &ValueAxis) -> io::Result<()> {
    write!(
        out,
        r#"<c:valAx><c:axId val="{}"/><c:scaling><c:orientation val="minMax"/>"#,
        axis.id
    )?;
    if let Some(max) = axis.max {
        write!(out, r#"<c:max val="{max}"/>"#)?;
    }
    if let Some(min) = axis.min {
        write!(out, r#"<c:min val="{min}"/>"#)?;
    }
    write!(
        out,
        r#"</c:scaling><c:delete val="{}"/><c:axPos val="{}"/><c:crossAx val="{}"/></c:valAx>"#,
        if axis.deleted { "1" } else { "0" },
        axis.position.as_xml(),
        axis.cross_axis_id
    )
}
