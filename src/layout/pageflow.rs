//! Word-processing page flow: splits already line-broken paragraphs across
//! pages, honouring widow/orphan control, keep-with-next, keep-together,
//! hard page breaks, section breaks, multi-column flow, and vertical
//! writing modes.
//!
//! Shaped after the diagram layout registry's "pure function over an
//! explicit context struct" convention: [`PageFlowContext::param`]/
//! [`PageFlowContext::constraint`] play the same role as `getParam`/
//! `getConstraint` do for [`crate::layout::diagram`].

use crate::layout::error::{LayoutError, Result};

/// How a section restarts page flow relative to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionBreakType {
    #[default]
    NextPage,
    EvenPage,
    OddPage,
    Continuous,
    NextColumn,
}

/// `vertical-rl`/`vertical-lr`/unset writing direction for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritingMode {
    #[default]
    Horizontal,
    VerticalRl,
    VerticalLr,
}

/// Per-paragraph flow hints (`w:pPr` break/keep properties).
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphFlowHints {
    pub break_before: bool,
    pub keep_with_next: bool,
    pub keep_together: bool,
    /// Whether the widow/orphan minimum (`ctx`'s `widowOrphanMinimum`,
    /// default 2) applies when splitting this paragraph across pages.
    /// `w:widowControl` defaults to on in WordprocessingML.
    pub widow_control: bool,
    pub section_break_after: Option<SectionBreakType>,
}

impl Default for ParagraphFlowHints {
    fn default() -> Self {
        Self {
            break_before: false,
            keep_with_next: false,
            keep_together: false,
            widow_control: true,
            section_break_after: None,
        }
    }
}

/// One already line-broken paragraph: a list of line heights plus whether a
/// hard page break (`w:br type="page"`) interrupts one of those lines.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowParagraph {
    pub line_heights: Vec<f64>,
    /// Index of the line a hard page break falls within, if any.
    pub hard_break_after_line: Option<usize>,
    pub hints: ParagraphFlowHints,
}

impl FlowParagraph {
    pub fn total_height(&self) -> f64 {
        self.line_heights.iter().sum()
    }

    pub fn line_count(&self) -> usize {
        self.line_heights.len()
    }
}

/// A contiguous slice of one paragraph's lines placed on a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedParagraph {
    pub paragraph_index: usize,
    pub first_line: usize,
    pub line_count: usize,
    pub page_index: usize,
    pub column_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowPage {
    pub paragraphs: Vec<PlacedParagraph>,
    pub writing_mode: WritingMode,
    pub width: f64,
    pub height: f64,
}

/// Tuning knobs for a page-flow pass, mirroring the diagram registry's
/// `getParam`/`getConstraint` contract.
#[derive(Debug, Clone)]
pub struct PageFlowContext {
    pub page_width: f64,
    pub page_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub column_count: usize,
    pub column_gap: f64,
    pub writing_mode: WritingMode,
    params: std::collections::HashMap<String, f64>,
}

impl PageFlowContext {
    pub fn new(page_width: f64, page_height: f64) -> Self {
        Self {
            page_width,
            page_height,
            margin_top: 0.0,
            margin_bottom: 0.0,
            column_count: 1,
            column_gap: 0.0,
            writing_mode: WritingMode::Horizontal,
            params: std::collections::HashMap::new(),
        }
    }

    pub fn with_constraint(mut self, key: &str, value: f64) -> Self {
        self.params.insert(key.to_string(), value);
        self
    }

    pub fn constraint(&self, key: &str, default: f64) -> f64 {
        self.params.get(key).copied().unwrap_or(default)
    }

    fn widow_orphan_minimum(&self) -> usize {
        self.constraint("widowOrphanMinimum", 2.0) as usize
    }

    fn content_height(&self) -> f64 {
        (self.page_height - self.margin_top - self.margin_bottom).max(0.0)
    }
}

/// Split `paragraphs` across pages and (within a page) columns.
pub fn flow(paragraphs: &[FlowParagraph], ctx: &PageFlowContext) -> Result<Vec<FlowPage>> {
    let content_height = ctx.content_height();
    let min_lines = ctx.widow_orphan_minimum();

    let mut pages: Vec<FlowPage> = vec![new_page(ctx)];
    let mut column = 0usize;
    let mut cursor = 0.0;

    for (para_idx, para) in paragraphs.iter().enumerate() {
        if para.hints.break_before {
            (column, cursor) = advance(&mut pages, ctx, column);
        }

        let remaining = content_height - cursor;
        let fits_whole = para.total_height() <= remaining;

        if para.hints.keep_together && !fits_whole {
            (column, cursor) = advance(&mut pages, ctx, column);
            place_whole(&mut pages, para_idx, para, column, cursor)?;
            cursor += para.total_height();
            continue;
        }

        if fits_whole {
            let keep_next_ok = match paragraphs.get(para_idx + 1) {
                Some(_) if para.hints.keep_with_next => {
                    next_fits_with(para, &paragraphs[para_idx + 1], remaining)
                }
                _ => true,
            };

            if keep_next_ok {
                place_whole(&mut pages, para_idx, para, column, cursor)?;
                cursor += para.total_height();
            } else {
                (column, cursor) = advance(&mut pages, ctx, column);
                place_whole(&mut pages, para_idx, para, column, cursor)?;
                cursor += para.total_height();
            }
        } else {
            let para_min_lines = if para.hints.widow_control { min_lines } else { 1 };
            let split = split_point(para, remaining, para_min_lines);
            match split {
                Some(first_lines) => {
                    pages.last_mut().unwrap().paragraphs.push(PlacedParagraph {
                        paragraph_index: para_idx,
                        first_line: 0,
                        line_count: first_lines,
                        page_index: pages.len() - 1,
                        column_index: column,
                    });
                    (column, cursor) = advance(&mut pages, ctx, column);
                    let rest = para.line_count() - first_lines;
                    pages.last_mut().unwrap().paragraphs.push(PlacedParagraph {
                        paragraph_index: para_idx,
                        first_line: first_lines,
                        line_count: rest,
                        page_index: pages.len() - 1,
                        column_index: column,
                    });
                    let rest_height: f64 = para.line_heights[first_lines..].iter().sum();
                    cursor += rest_height;
                }
                None => {
                    // Can't satisfy both widow/orphan minima here: move the
                    // whole paragraph to the next column/page instead.
                    (column, cursor) = advance(&mut pages, ctx, column);
                    place_whole(&mut pages, para_idx, para, column, cursor)?;
                    cursor += para.total_height();
                }
            }
        }

        if let Some(line) = para.hard_break_after_line {
            if line + 1 == para.line_count() {
                (column, cursor) = advance(&mut pages, ctx, column);
            }
        }

        if let Some(break_type) = para.hints.section_break_after {
            apply_section_break(&mut pages, ctx, break_type, &mut column, &mut cursor);
        }
    }

    if let Some(last) = pages.last() {
        if last.paragraphs.is_empty() && pages.len() > 1 {
            pages.pop();
        }
    }

    Ok(apply_writing_mode(pages, ctx))
}

fn new_page(ctx: &PageFlowContext) -> FlowPage {
    FlowPage {
        paragraphs: Vec::new(),
        writing_mode: ctx.writing_mode,
        width: ctx.page_width,
        height: ctx.page_height,
    }
}

fn advance(pages: &mut Vec<FlowPage>, ctx: &PageFlowContext, column: usize) -> (usize, f64) {
    if column + 1 < ctx.column_count {
        (column + 1, 0.0)
    } else {
        pages.push(new_page(ctx));
        (0, 0.0)
    }
}

fn place_whole(
    pages: &mut [FlowPage],
    para_idx: usize,
    para: &FlowParagraph,
    column: usize,
    _cursor: f64,
) -> Result<()> {
    let page = pages.last_mut().ok_or_else(|| LayoutError::Unsatisfiable("no page to place into".into()))?;
    page.paragraphs.push(PlacedParagraph {
        paragraph_index: para_idx,
        first_line: 0,
        line_count: para.line_count(),
        page_index: pages.len() - 1,
        column_index: column,
    });
    Ok(())
}

fn next_fits_with(first: &FlowParagraph, second: &FlowParagraph, remaining: f64) -> bool {
    let combined = first.total_height() + second.line_heights.first().copied().unwrap_or(0.0);
    combined <= remaining
}

/// Choose a split point in `para` that leaves at least `min_lines` lines
/// before and after the break, if the remaining space admits one at all.
fn split_point(para: &FlowParagraph, remaining: f64, min_lines: usize) -> Option<usize> {
    if para.line_count() < 2 * min_lines {
        return None;
    }

    let mut height = 0.0;
    let mut fit_lines = 0;
    for h in &para.line_heights {
        if height + h > remaining {
            break;
        }
        height += h;
        fit_lines += 1;
    }

    let max_first = fit_lines.min(para.line_count() - min_lines);
    if max_first < min_lines {
        None
    } else {
        Some(max_first)
    }
}

fn apply_section_break(
    pages: &mut Vec<FlowPage>,
    ctx: &PageFlowContext,
    break_type: SectionBreakType,
    column: &mut usize,
    cursor: &mut f64,
) {
    match break_type {
        SectionBreakType::Continuous => {}
        SectionBreakType::NextColumn => {
            (*column, *cursor) = advance(pages, ctx, *column);
        }
        SectionBreakType::NextPage => {
            pages.push(new_page(ctx));
            *column = 0;
            *cursor = 0.0;
        }
        SectionBreakType::EvenPage | SectionBreakType::OddPage => {
            pages.push(new_page(ctx));
            let want_even = break_type == SectionBreakType::EvenPage;
            let page_number = pages.len();
            if (page_number % 2 == 0) != want_even {
                pages.push(new_page(ctx));
            }
            *column = 0;
            *cursor = 0.0;
        }
    }
}

/// Post-flow coordinate convention: in vertical modes the inline axis (lines
/// flowing down the page) becomes the layout y-axis's logical analogue (x in
/// physical terms) and block axis becomes y; page dimensions swap.
fn apply_writing_mode(pages: Vec<FlowPage>, ctx: &PageFlowContext) -> Vec<FlowPage> {
    if ctx.writing_mode == WritingMode::Horizontal {
        return pages;
    }

    pages
        .into_iter()
        .map(|mut page| {
            std::mem::swap(&mut page.width, &mut page.height);
            page.writing_mode = ctx.writing_mode;
            page
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(lines: usize) -> FlowParagraph {
        FlowParagraph {
            line_heights: vec![10.0; lines],
            hard_break_after_line: None,
            hints: ParagraphFlowHints::default(),
        }
    }

    #[test]
    fn paragraph_that_cannot_satisfy_orphans_moves_whole() {
        // 3 lines, only 10pt (1 line) fits: widow/orphan min=2 forbids a
        // 1/2 split, so the whole paragraph moves to the next page.
        let ctx = PageFlowContext::new(100.0, 20.0).with_constraint("widowOrphanMinimum", 2.0);
        let paragraphs = vec![para(3)];
        let pages = flow(&paragraphs, &ctx).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].paragraphs.len(), 0);
        assert_eq!(pages[1].paragraphs[0].line_count, 3);
    }

    #[test]
    fn widow_control_false_allows_split_that_widow_control_true_forbids() {
        // Same 3-line paragraph and page as
        // `paragraph_that_cannot_satisfy_orphans_moves_whole`, but with
        // widowControl off: the widow/orphan minimum no longer applies, so
        // a 2/1 split becomes possible instead of moving the whole
        // paragraph to the next page.
        let ctx = PageFlowContext::new(100.0, 20.0).with_constraint("widowOrphanMinimum", 2.0);
        let mut p = para(3);
        p.hints.widow_control = false;
        let pages = flow(&[p], &ctx).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].paragraphs[0].line_count, 2);
        assert_eq!(pages[1].paragraphs[0].line_count, 1);
    }

    #[test]
    fn five_line_paragraph_splits_three_two_when_three_fit() {
        let ctx = PageFlowContext::new(100.0, 30.0);
        let paragraphs = vec![para(5)];
        let pages = flow(&paragraphs, &ctx).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].paragraphs[0].line_count, 3);
        assert_eq!(pages[1].paragraphs[0].line_count, 2);
    }

    #[test]
    fn keep_together_paragraph_never_splits() {
        let ctx = PageFlowContext::new(100.0, 15.0);
        let mut p = para(5);
        p.hints.keep_together = true;
        let pages = flow(&[p], &ctx).unwrap();
        let total_lines: usize = pages.iter().flat_map(|pg| pg.paragraphs.iter()).map(|pp| pp.line_count).sum();
        assert_eq!(total_lines, 5);
        assert!(pages.iter().any(|pg| pg.paragraphs.iter().any(|pp| pp.line_count == 5)));
    }

    #[test]
    fn vertical_writing_mode_swaps_page_dimensions() {
        let mut ctx = PageFlowContext::new(200.0, 400.0);
        ctx.writing_mode = WritingMode::VerticalRl;
        let pages = flow(&[para(1)], &ctx).unwrap();
        assert_eq!(pages[0].width, 400.0);
        assert_eq!(pages[0].height, 200.0);
    }
}
