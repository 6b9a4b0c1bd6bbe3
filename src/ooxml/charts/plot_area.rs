//! `c:plotArea` — the chart's type groups (`c:barChart`, `c:lineChart`, …)
//! and axes.

use super::axis::Axis;
use super::series::Series;
use super::types::{BarDirection, BarGrouping, ScatterStyle};

/// Fields every type group shares: its series list. Kept as a separate
/// struct (rather than duplicated fields on each `*TypeGroup`) so
/// `group.common.series` reads the same way regardless of chart family —
/// see `WorksheetChart::add_series`/`series_count` in
/// `crate::ooxml::xlsx::chart`, which matches over all variants uniformly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonSeriesData {
    pub series: Vec<Series>,
    /// `c:varyColors` — vary point colors within a single series.
    pub vary_colors: bool,
}

macro_rules! type_group {
    ($name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            pub common: CommonSeriesData,
            $(pub $field: $ty,)*
        }
    };
}

type_group!(AreaTypeGroup { grouping: BarGrouping });
type_group!(Area3DTypeGroup { grouping: BarGrouping });
type_group!(BubbleTypeGroup {});
type_group!(DoughnutTypeGroup { hole_size_pct: u8 });
type_group!(LineTypeGroup { grouping: BarGrouping });
type_group!(Line3DTypeGroup { grouping: BarGrouping });
type_group!(PieTypeGroup {});
type_group!(Pie3DTypeGroup {});
type_group!(RadarTypeGroup {});
type_group!(ScatterTypeGroup { style: ScatterStyle });
type_group!(StockTypeGroup {});
type_group!(SurfaceTypeGroup {});
type_group!(Surface3DTypeGroup {});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarTypeGroup {
    pub common: CommonSeriesData,
    pub direction: BarDirection,
    pub grouping: BarGrouping,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bar3DTypeGroup {
    pub common: CommonSeriesData,
    pub direction: BarDirection,
    pub grouping: BarGrouping,
}

impl Default for BarDirection {
    fn default() -> Self {
        BarDirection::Column
    }
}

impl Default for BarGrouping {
    fn default() -> Self {
        BarGrouping::Standard
    }
}

impl Default for ScatterStyle {
    fn default() -> Self {
        ScatterStyle::LineMarker
    }
}

impl AreaTypeGroup {
    pub fn new(grouping: BarGrouping) -> Self {
        Self {
            common: CommonSeriesData::default(),
            grouping,
        }
    }
}

impl LineTypeGroup {
    pub fn new(grouping: BarGrouping) -> Self {
        Self {
            common: CommonSeriesData::default(),
            grouping,
        }
    }
}

impl PieTypeGroup {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScatterTypeGroup {
    pub fn new(style: ScatterStyle) -> Self {
        Self {
            common: CommonSeriesData::default(),
            style,
        }
    }
}

impl BarTypeGroup {
    pub fn new(direction: BarDirection, grouping: BarGrouping) -> Self {
        Self {
            common: CommonSeriesData::default(),
            direction,
            grouping,
        }
    }
}

/// One `c:plotArea` child type-group element, tagged by the ECMA-376
/// element name it corresponds to.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeGroup {
    Area(AreaTypeGroup),
    Area3D(Area3DTypeGroup),
    Bar(BarTypeGroup),
    Bar3D(Bar3DTypeGroup),
    Bubble(BubbleTypeGroup),
    Doughnut(DoughnutTypeGroup),
    Line(LineTypeGroup),
    Line3D(Line3DTypeGroup),
    Pie(PieTypeGroup),
    Pie3D(Pie3DTypeGroup),
    Radar(RadarTypeGroup),
    Scatter(ScatterTypeGroup),
    Stock(StockTypeGroup),
    Surface(SurfaceTypeGroup),
    Surface3D(Surface3DTypeGroup),
}

/// `c:plotArea` — the type groups and axes a chart plots against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotArea {
    pub type_groups: Vec<TypeGroup>,
    pub axes: Vec<Axis>,
}

impl PlotArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type_group(mut self, group: TypeGroup) -> Self {
        self.type_groups.push(group);
        self
    }

    pub fn add_axis(mut self, axis: Axis) -> Self {
        self.axes.push(axis);
        self
    }
}
