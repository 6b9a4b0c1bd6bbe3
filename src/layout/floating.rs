//! Floating image anchoring: positions an anchored drawing relative to its
//! reference frame once the surrounding text has already been flowed, then
//! buckets the results into behind-text/in-front-of-text draw order.

use crate::layout::diagram::Bounds;

/// `wp:anchor`'s horizontal/vertical reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorFrame {
    Page,
    Margin,
    Column,
    Paragraph,
    Character,
    LeftMargin,
    RightMargin,
    InsideMargin,
    OutsideMargin,
}

/// Either a named alignment or an explicit signed offset from the frame's
/// origin, matching `wp:align` vs. `wp:posOffset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Align(Alignment),
    Offset(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Center,
    Inside,
    Outside,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingImage {
    pub id: String,
    pub anchor_page: usize,
    pub horizontal_frame: AnchorFrame,
    pub vertical_frame: AnchorFrame,
    pub horizontal: Placement,
    pub vertical: Placement,
    pub width: f64,
    pub height: f64,
    /// `wp:anchor/@relativeHeight` — draw order within its behind/in-front
    /// bucket; higher values draw later (on top).
    pub relative_height: i64,
    pub behind_text: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedImage {
    pub id: String,
    pub page_index: usize,
    pub bounds: Bounds,
}

/// The reference rectangle a given frame resolves to for a page. Column and
/// paragraph/character frames narrow to the relevant sub-rectangle; page and
/// margin frames cover progressively less of the physical page.
#[derive(Debug, Clone, Copy)]
pub struct FrameRects {
    pub page: Bounds,
    pub margin: Bounds,
    pub column: Bounds,
    pub paragraph: Bounds,
}

fn resolve_frame(frame: AnchorFrame, rects: &FrameRects) -> Bounds {
    match frame {
        AnchorFrame::Page => rects.page,
        AnchorFrame::Margin | AnchorFrame::LeftMargin | AnchorFrame::RightMargin => rects.margin,
        AnchorFrame::InsideMargin | AnchorFrame::OutsideMargin => rects.margin,
        AnchorFrame::Column => rects.column,
        AnchorFrame::Paragraph | AnchorFrame::Character => rects.paragraph,
    }
}

fn resolve_placement(placement: Placement, available: f64, size: f64) -> f64 {
    match placement {
        Placement::Offset(offset) => offset,
        Placement::Align(Alignment::Left) | Placement::Align(Alignment::Inside) => 0.0,
        Placement::Align(Alignment::Right) | Placement::Align(Alignment::Outside) => available - size,
        Placement::Align(Alignment::Center) => (available - size) / 2.0,
    }
}

/// Position one floating image against its already-resolved frame rects.
pub fn position(image: &FloatingImage, rects: &FrameRects) -> PositionedImage {
    let h_frame = resolve_frame(image.horizontal_frame, rects);
    let v_frame = resolve_frame(image.vertical_frame, rects);

    let x = h_frame.x + resolve_placement(image.horizontal, h_frame.w, image.width);
    let y = v_frame.y + resolve_placement(image.vertical, v_frame.h, image.height);

    PositionedImage {
        id: image.id.clone(),
        page_index: image.anchor_page,
        bounds: Bounds::new(x, y, image.width, image.height),
    }
}

/// Position every image and split the results into behind-text and
/// in-front-of-text draw lists, each ordered by ascending `relativeHeight`.
pub fn position_all(
    images: &[FloatingImage],
    rects_by_page: &[FrameRects],
) -> (Vec<PositionedImage>, Vec<PositionedImage>) {
    let mut behind: Vec<(&FloatingImage, PositionedImage)> = Vec::new();
    let mut in_front: Vec<(&FloatingImage, PositionedImage)> = Vec::new();

    for image in images {
        let Some(rects) = rects_by_page.get(image.anchor_page) else { continue };
        let positioned = position(image, rects);
        if image.behind_text {
            behind.push((image, positioned));
        } else {
            in_front.push((image, positioned));
        }
    }

    behind.sort_by_key(|(img, _)| img.relative_height);
    in_front.sort_by_key(|(img, _)| img.relative_height);

    (
        behind.into_iter().map(|(_, p)| p).collect(),
        in_front.into_iter().map(|(_, p)| p).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects() -> FrameRects {
        FrameRects {
            page: Bounds::new(0.0, 0.0, 600.0, 800.0),
            margin: Bounds::new(50.0, 50.0, 500.0, 700.0),
            column: Bounds::new(50.0, 50.0, 240.0, 700.0),
            paragraph: Bounds::new(50.0, 300.0, 500.0, 40.0),
        }
    }

    fn image(id: &str, relative_height: i64, behind_text: bool) -> FloatingImage {
        FloatingImage {
            id: id.to_string(),
            anchor_page: 0,
            horizontal_frame: AnchorFrame::Margin,
            vertical_frame: AnchorFrame::Margin,
            horizontal: Placement::Align(Alignment::Right),
            vertical: Placement::Align(Alignment::Center),
            width: 100.0,
            height: 100.0,
            relative_height,
            behind_text,
        }
    }

    #[test]
    fn right_aligned_image_sits_at_the_margin_frames_right_edge() {
        let positioned = position(&image("a", 0, false), &rects());
        assert_eq!(positioned.bounds.x, 450.0);
    }

    #[test]
    fn explicit_offset_overrides_alignment() {
        let mut img = image("a", 0, false);
        img.horizontal = Placement::Offset(12.0);
        let positioned = position(&img, &rects());
        assert_eq!(positioned.bounds.x, 62.0);
    }

    #[test]
    fn images_split_into_behind_and_in_front_buckets_ordered_by_height() {
        let images = vec![image("back2", 2, true), image("back1", 1, true), image("front1", 3, false)];
        let (behind, in_front) = position_all(&images, &[rects()]);
        assert_eq!(behind.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec!["back1", "back2"]);
        assert_eq!(in_front.len(), 1);
        assert_eq!(in_front[0].id, "front1");
    }
}
