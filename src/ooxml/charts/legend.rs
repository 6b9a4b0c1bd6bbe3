//! `c:legend` — the chart legend.

use super::types::LegendPosition;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Legend {
    pub position: LegendPosition,
    /// `c:overlay` — whether the legend is allowed to overlap the plot area.
    pub overlay: bool,
}

impl Legend {
    pub fn new(position: LegendPosition) -> Self {
        Self {
            position,
            overlay: false,
        }
    }
}
