// Layout module
// Fixed banner geometry, slot placement and pointer hit-testing

use crate::carousel::Direction;

/// Size of the center page
pub const PAGE_WIDTH: i32 = 500;
pub const PAGE_HEIGHT: i32 = 200;

/// How far the side pages stick out from behind the center page
pub const SIDE_OFFSET_X: i32 = 130;
/// How much lower (and shorter) the side pages are
pub const SIDE_OFFSET_Y: i32 = 12;

pub const ARROW_WIDTH: i32 = 12;
pub const ARROW_HEIGHT: i32 = 20;
/// Distance between an arrow and the outer edge of its side page
const ARROW_INSET: i32 = 8;

pub const MARKER_WIDTH: i32 = 18;
pub const MARKER_HEIGHT: i32 = 3;
const MARKER_SPACING: i32 = 5;
/// Gap between the pages and the indicator strip
const MARKER_GAP: i32 = 10;
/// Extra vertical reach of a marker's hit area, markers being 3 px tall
const MARKER_HIT_SLOP: i32 = 3;

/// Padding around the banner inside the window
const MARGIN: i32 = 10;

/// Narrowest view that fits all three slots
pub const VIEW_MIN_WIDTH: i32 = PAGE_WIDTH + SIDE_OFFSET_X * 2 + 10;

/// Window size that fits the banner and its indicator strip
pub fn preferred_size() -> (u32, u32) {
    let width = VIEW_MIN_WIDTH + MARGIN * 2;
    let height = PAGE_HEIGHT + MARKER_GAP + MARKER_HEIGHT + MARGIN * 2;
    (width as u32, height as u32)
}

/// Axis-aligned rectangle in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x as f64 && x < self.right() as f64 && y >= self.y as f64 && y < self.bottom() as f64
    }

    /// Linear interpolation towards `to`, `t` in [0, 1]
    pub fn lerp(&self, to: &Rect, t: f32) -> Rect {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: i32, b: i32| (a as f32 + (b - a) as f32 * t).round() as i32;
        Rect::new(
            mix(self.x, to.x),
            mix(self.y, to.y),
            mix(self.width, to.width),
            mix(self.height, to.height),
        )
    }
}

/// What the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    LeftArrow,
    RightArrow,
    Marker(usize),
    LeftPage,
    CenterPage,
    RightPage,
    None,
}

impl Hit {
    /// Navigation triggered by clicking this region
    pub fn direction(self) -> Option<Direction> {
        match self {
            Hit::LeftArrow | Hit::LeftPage => Some(Direction::Previous),
            Hit::RightArrow | Hit::RightPage => Some(Direction::Next),
            Hit::CenterPage => Some(Direction::Stay),
            Hit::Marker(_) | Hit::None => None,
        }
    }
}

/// Docked geometry of every banner element for one window size
#[derive(Debug, Clone, PartialEq)]
pub struct BannerLayout {
    pub left: Rect,
    pub center: Rect,
    pub right: Rect,
    pub left_arrow: Rect,
    pub right_arrow: Rect,
    pub markers: Vec<Rect>,
}

impl BannerLayout {
    pub fn new(width: u32, height: u32, marker_count: usize) -> Self {
        let content_height = PAGE_HEIGHT + MARKER_GAP + MARKER_HEIGHT;
        let top = ((height as i32 - content_height) / 2).max(0);
        let center_x = width as i32 / 2;

        let page_x = center_x - PAGE_WIDTH / 2;
        let side_height = PAGE_HEIGHT - SIDE_OFFSET_Y;

        let center = Rect::new(page_x, top, PAGE_WIDTH, PAGE_HEIGHT);
        let left = Rect::new(page_x - SIDE_OFFSET_X, top + SIDE_OFFSET_Y, PAGE_WIDTH, side_height);
        let right = Rect::new(page_x + SIDE_OFFSET_X, top + SIDE_OFFSET_Y, PAGE_WIDTH, side_height);

        let arrow_y = left.y + (left.height - ARROW_HEIGHT) / 2;
        let left_arrow = Rect::new(left.x + ARROW_INSET, arrow_y, ARROW_WIDTH, ARROW_HEIGHT);
        let right_arrow = Rect::new(
            right.right() - ARROW_WIDTH - ARROW_INSET,
            arrow_y,
            ARROW_WIDTH,
            ARROW_HEIGHT,
        );

        let count = marker_count as i32;
        let strip_width = (count * MARKER_WIDTH + (count - 1).max(0) * MARKER_SPACING).max(0);
        let strip_x = center_x - strip_width / 2;
        let strip_y = top + PAGE_HEIGHT + MARKER_GAP;
        let markers = (0..count)
            .map(|i| {
                Rect::new(
                    strip_x + i * (MARKER_WIDTH + MARKER_SPACING),
                    strip_y,
                    MARKER_WIDTH,
                    MARKER_HEIGHT,
                )
            })
            .collect();

        Self {
            left,
            center,
            right,
            left_arrow,
            right_arrow,
            markers,
        }
    }

    /// Where a side page sits before sliding out: behind the center page
    pub fn tucked(&self) -> Rect {
        Rect::new(
            self.center.x,
            self.center.y + SIDE_OFFSET_Y,
            self.center.width,
            self.center.height - SIDE_OFFSET_Y,
        )
    }

    /// Region whose hover reveals the arrows
    pub fn view(&self) -> Rect {
        Rect::new(
            self.left.x,
            self.center.y,
            self.right.right() - self.left.x,
            self.center.height,
        )
    }

    /// Clickable strip of the left page not covered by the center page
    fn left_strip(&self) -> Rect {
        Rect::new(
            self.left.x,
            self.left.y,
            SIDE_OFFSET_X,
            self.left.height - SIDE_OFFSET_Y,
        )
    }

    fn right_strip(&self) -> Rect {
        Rect::new(
            self.right.right() - SIDE_OFFSET_X,
            self.right.y,
            SIDE_OFFSET_X,
            self.right.height - SIDE_OFFSET_Y,
        )
    }

    pub fn hit_test(&self, x: f64, y: f64, arrows_visible: bool) -> Hit {
        if arrows_visible {
            if self.left_arrow.contains(x, y) {
                return Hit::LeftArrow;
            }
            if self.right_arrow.contains(x, y) {
                return Hit::RightArrow;
            }
        }

        let marker = self.markers.iter().position(|m| {
            Rect::new(m.x, m.y - MARKER_HIT_SLOP, m.width, m.height + MARKER_HIT_SLOP * 2).contains(x, y)
        });
        if let Some(index) = marker {
            return Hit::Marker(index);
        }

        if self.center.contains(x, y) {
            Hit::CenterPage
        } else if self.left_strip().contains(x, y) {
            Hit::LeftPage
        } else if self.right_strip().contains(x, y) {
            Hit::RightPage
        } else {
            Hit::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(markers: usize) -> BannerLayout {
        let (width, height) = preferred_size();
        BannerLayout::new(width, height, markers)
    }

    #[test]
    fn slots_are_centered_and_offset() {
        let layout = layout(3);
        let (width, _) = preferred_size();

        assert_eq!(layout.center.x * 2 + PAGE_WIDTH, width as i32);
        assert_eq!(layout.left.x, layout.center.x - SIDE_OFFSET_X);
        assert_eq!(layout.right.x, layout.center.x + SIDE_OFFSET_X);
        assert_eq!(layout.left.y, layout.center.y + SIDE_OFFSET_Y);
        assert_eq!(layout.right.height, PAGE_HEIGHT - SIDE_OFFSET_Y);
        assert_eq!(layout.tucked().y, layout.left.y);
    }

    #[test]
    fn markers_are_spaced_and_below_pages() {
        let layout = layout(4);
        assert_eq!(layout.markers.len(), 4);
        for pair in layout.markers.windows(2) {
            assert_eq!(pair[1].x - pair[0].x, MARKER_WIDTH + MARKER_SPACING);
        }
        assert!(layout.markers[0].y >= layout.center.bottom());
        assert!(layout_fits_window(&layout));
    }

    fn layout_fits_window(layout: &BannerLayout) -> bool {
        let (width, height) = preferred_size();
        layout.left.x >= 0
            && layout.right.right() <= width as i32
            && layout.markers.iter().all(|m| m.bottom() <= height as i32)
    }

    #[test]
    fn empty_strip_has_no_markers() {
        assert!(layout(0).markers.is_empty());
    }

    #[test]
    fn hit_test_maps_regions_to_navigation() {
        let layout = layout(2);
        let mid_y = (layout.left.y + 20) as f64;

        let left_page = layout.hit_test(layout.left.x as f64 + 60.0, mid_y, false);
        assert_eq!(left_page, Hit::LeftPage);
        assert_eq!(left_page.direction(), Some(Direction::Previous));

        let right_page = layout.hit_test(layout.right.right() as f64 - 60.0, mid_y, false);
        assert_eq!(right_page.direction(), Some(Direction::Next));

        let center = layout.hit_test(layout.center.x as f64 + 250.0, mid_y, true);
        assert_eq!(center, Hit::CenterPage);
        assert_eq!(center.direction(), Some(Direction::Stay));
    }

    #[test]
    fn arrows_only_hit_when_visible() {
        let layout = layout(2);
        let x = layout.left_arrow.x as f64 + 2.0;
        let y = layout.left_arrow.y as f64 + 2.0;

        assert_eq!(layout.hit_test(x, y, true), Hit::LeftArrow);
        assert_eq!(layout.hit_test(x, y, false), Hit::LeftPage);

        let x = layout.right_arrow.x as f64 + 2.0;
        let y = layout.right_arrow.y as f64 + 2.0;
        assert_eq!(layout.hit_test(x, y, true), Hit::RightArrow);
    }

    #[test]
    fn markers_hit_with_slop() {
        let layout = layout(3);
        let marker = layout.markers[2];
        assert_eq!(
            layout.hit_test(marker.x as f64 + 1.0, marker.y as f64 - 2.0, true),
            Hit::Marker(2)
        );
        assert_eq!(layout.hit_test(marker.x as f64 - 2.0, marker.y as f64, true), Hit::None);
    }

    #[test]
    fn bottom_of_side_page_is_not_clickable() {
        let layout = layout(1);
        let y = layout.left.bottom() as f64 - 2.0;
        assert_eq!(layout.hit_test(layout.left.x as f64 + 5.0, y, false), Hit::None);
    }

    #[test]
    fn lerp_interpolates_and_clamps() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(100, 20, 30, 10);
        assert_eq!(a.lerp(&b, 0.5), Rect::new(50, 10, 20, 10));
        assert_eq!(a.lerp(&b, 2.0), b);
        assert_eq!(a.lerp(&b, -1.0), a);
    }
}
