//! `c:ser` — one data series within a type group.

use super::models::{NumericData, StringData, TitleText};

/// One plotted series. Category/value chart groups (bar/line/area/pie) use
/// `categories`/`values`; scatter/bubble groups use `x_values`/`y_values`
/// instead, matching the two disjoint shapes `c:ser` takes in the schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    /// `c:idx` — series index within the chart (stable identity).
    pub index: u32,
    /// `c:order` — plot order; usually equal to `index`.
    pub order: u32,
    /// `c:tx` — the series name/legend entry.
    pub name: Option<TitleText>,
    /// `c:cat` — category labels (bar/line/area/pie series).
    pub categories: Option<StringData>,
    /// `c:val` — plotted values (bar/line/area/pie series).
    pub values: Option<NumericData>,
    /// `c:xVal` — X coordinates (scatter/bubble series).
    pub x_values: Option<NumericData>,
    /// `c:yVal` — Y coordinates (scatter/bubble series).
    pub y_values: Option<NumericData>,
    /// `c:bubbleSize` — bubble radii (bubble series only).
    pub bubble_sizes: Option<NumericData>,
}

impl Series {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            order: index,
            ..Default::default()
        }
    }

    pub fn with_categories(mut self, categories: StringData) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn with_values(mut self, values: NumericData) -> Self {
        self.values = Some(values);
        self
    }

    pub fn with_name(mut self, name: TitleText) -> Self {
        self.name = Some(name);
        self
    }
}
