//! `c:chartSpace/c:chart` — the top-level chart document.

use super::legend::Legend;
use super::models::TitleText;
use super::plot_area::PlotArea;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chart {
    pub title: Option<TitleText>,
    /// `c:autoTitleDeleted` — suppress the auto-generated title even when
    /// `title` is `None`.
    pub auto_title_deleted: bool,
    pub plot_area: PlotArea,
    pub legend: Option<Legend>,
    /// `c:plotVisOnly` — plot only visible (non-filtered) cells.
    pub plot_visible_only: bool,
}

impl Chart {
    pub fn new() -> Self {
        Self {
            plot_visible_only: true,
            ..Default::default()
        }
    }
}
