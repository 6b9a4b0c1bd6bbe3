//! `c:catAx`/`c:valAx`/`c:dateAx` — plot-area axes.

use super::types::AxisPosition;

/// An axis belonging to a chart's plot area. Category and value axes carry
/// different child elements in the schema (`c:catAx` vs `c:valAx`), so they
/// stay as distinct structs behind one enum rather than a single type with
/// optional fields for both.
#[derive(Debug, Clone, PartialEq)]
pub enum Axis {
    Category(CategoryAxis),
    Value(ValueAxis),
}

/// `c:catAx` — a category (text/date) axis.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAxis {
    /// `c:axId` — unique id, referenced by a type group's `c:axId` and by
    /// the other axis's `c:crossAx`.
    pub id: u32,
    pub position: AxisPosition,
    /// `c:crossAx` — the id of the axis this one crosses.
    pub cross_axis_id: u32,
    /// `c:delete` — whether the axis is hidden.
    pub deleted: bool,
}

impl CategoryAxis {
    pub fn new(id: u32, position: AxisPosition, cross_axis_id: u32) -> Self {
        Self {
            id,
            position,
            cross_axis_id,
            deleted: false,
        }
    }
}

/// `c:valAx` — a numeric value axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    pub id: u32,
    pub position: AxisPosition,
    pub cross_axis_id: u32,
    pub deleted: bool,
    /// `c:min`/`c:max` in `c:scaling` — `None` means auto-scaled.
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ValueAxis {
    pub fn new(id: u32, position: AxisPosition, cross_axis_id: u32) -> Self {
        Self {
            id,
            position,
            cross_axis_id,
            deleted: false,
            min: None,
            max: None,
        }
    }
}
