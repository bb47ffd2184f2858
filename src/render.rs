// Rendering module
// CPU painting of the banner into a premultiplied BGRA canvas

use crate::animation::{Slot, SlotFrame};
use crate::image_loader::PageImage;
use crate::layout::{BannerLayout, Hit, Rect};
use crate::style::{BannerStyle, Color};

/// Arrow stroke width in pixels
const ARROW_STROKE: f32 = 3.0;
/// Distance between the arrow tips and the arrow box edges
const ARROW_MARGIN: f32 = 2.0;

/// Sampling used when scaling pages into their slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    /// Nearest neighbor, used while a transition is running
    Fast,
    /// Bilinear interpolation
    Smooth,
}

/// A mutable view over a Wayland shm buffer (ARGB8888, little-endian BGRA)
pub struct Canvas<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub fn new(data: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Fill with transparent black
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        (idx + 3 < self.data.len()).then_some(idx)
    }

    /// Composite a straight-alpha BGRA color over the pixel at (x, y)
    fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 4], coverage: f32) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let alpha = color[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let keep = 1.0 - alpha;
        for c in 0..3 {
            let v = color[c] as f32 * alpha + self.data[idx + c] as f32 * keep;
            self.data[idx + c] = v.round().clamp(0.0, 255.0) as u8;
        }
        let a = 255.0 * alpha + self.data[idx + 3] as f32 * keep;
        self.data[idx + 3] = a.round().clamp(0.0, 255.0) as u8;
    }

    pub fn fill_rect(&mut self, rect: Rect, color: [u8; 4]) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width as i32);
        let y1 = rect.bottom().min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color, 1.0);
            }
        }
    }

    /// Scale `page` into `rect`, ignoring aspect ratio
    pub fn draw_page(&mut self, page: &PageImage, rect: Rect, quality: Quality) {
        if rect.width <= 0 || rect.height <= 0 || page.width == 0 || page.height == 0 {
            return;
        }

        let scale_x = page.width as f32 / rect.width as f32;
        let scale_y = page.height as f32 / rect.height as f32;

        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width as i32);
        let y1 = rect.bottom().min(self.height as i32);

        for y in y0..y1 {
            let local_y = (y - rect.y) as f32;
            for x in x0..x1 {
                let local_x = (x - rect.x) as f32;
                let pixel = match quality {
                    Quality::Fast => page.pixel((local_x * scale_x) as u32, (local_y * scale_y) as u32),
                    Quality::Smooth => sample_bilinear(
                        page,
                        ((local_x + 0.5) * scale_x - 0.5).max(0.0),
                        ((local_y + 0.5) * scale_y - 0.5).max(0.0),
                    ),
                };
                self.blend_pixel(x, y, pixel, 1.0);
            }
        }
    }

    /// Antialiased stroke from `from` to `to`
    pub fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: [u8; 4]) {
        let half = width / 2.0;
        let min_x = (from.0.min(to.0) - half - 1.0).floor() as i32;
        let max_x = (from.0.max(to.0) + half + 1.0).ceil() as i32;
        let min_y = (from.1.min(to.1) - half - 1.0).floor() as i32;
        let max_y = (from.1.max(to.1) + half + 1.0).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dist = distance_to_segment((x as f32 + 0.5, y as f32 + 0.5), from, to);
                let coverage = half + 0.5 - dist;
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    /// Chevron pointing left or right inside `rect`
    pub fn draw_arrow(&mut self, rect: Rect, pointing_right: bool, color: [u8; 4]) {
        let left = rect.x as f32 + ARROW_MARGIN;
        let right = rect.right() as f32 - ARROW_MARGIN;
        let top = rect.y as f32 + ARROW_MARGIN;
        let bottom = rect.bottom() as f32 - ARROW_MARGIN;
        let mid = rect.y as f32 + rect.height as f32 / 2.0;

        let (base, tip) = if pointing_right { (left, right) } else { (right, left) };
        self.draw_line((base, top), (tip, mid), ARROW_STROKE, color);
        self.draw_line((base, bottom), (tip, mid), ARROW_STROKE, color);
    }

    /// Scale every channel, the canvas being premultiplied
    pub fn apply_opacity(&mut self, opacity: f32) {
        if opacity >= 1.0 {
            return;
        }
        let opacity = opacity.max(0.0);
        for value in self.data.iter_mut() {
            *value = (*value as f32 * opacity).round() as u8;
        }
    }
}

fn sample_bilinear(page: &PageImage, src_x: f32, src_y: f32) -> [u8; 4] {
    let x0 = src_x.floor() as u32;
    let y0 = src_y.floor() as u32;
    let fx = src_x - x0 as f32;
    let fy = src_y - y0 as f32;

    let p00 = page.pixel(x0, y0);
    let p10 = page.pixel(x0 + 1, y0);
    let p01 = page.pixel(x0, y0 + 1);
    let p11 = page.pixel(x0 + 1, y0 + 1);

    let interpolate = |c: usize| -> u8 {
        let v0 = p00[c] as f32 * (1.0 - fx) + p10[c] as f32 * fx;
        let v1 = p01[c] as f32 * (1.0 - fx) + p11[c] as f32 * fx;
        (v0 * (1.0 - fy) + v1 * fy).round().clamp(0.0, 255.0) as u8
    };

    [interpolate(0), interpolate(1), interpolate(2), interpolate(3)]
}

fn distance_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

/// Everything needed to paint one banner frame
pub struct Scene<'a> {
    pub layout: &'a BannerLayout,
    pub frame: SlotFrame,
    pub left: Option<&'a PageImage>,
    pub center: Option<&'a PageImage>,
    pub right: Option<&'a PageImage>,
    /// Selection state of each indicator marker
    pub markers: &'a [bool],
    pub arrows_visible: bool,
    /// Region under the pointer, for arrow highlighting
    pub hovered: Hit,
    pub style: &'a BannerStyle,
    pub opacity: f32,
    pub quality: Quality,
}

impl Scene<'_> {
    fn page(&self, slot: Slot) -> Option<&PageImage> {
        match slot {
            Slot::Left => self.left,
            Slot::Center => self.center,
            Slot::Right => self.right,
        }
    }
}

/// Paint pages, arrows and indicators
pub fn render_banner(canvas: &mut Canvas, scene: &Scene) {
    canvas.clear();

    let dim = Color::rgb(0, 0, 0).to_bgra(scene.style.dim_alpha);
    for slot in scene.frame.order {
        let rect = scene.frame.rect(slot);
        if let Some(page) = scene.page(slot) {
            canvas.draw_page(page, rect, scene.quality);
            if slot != Slot::Center {
                canvas.fill_rect(rect, dim);
            }
        }
    }

    if scene.arrows_visible {
        let style = scene.style;
        let left = style.arrow_color(scene.hovered == Hit::LeftArrow).to_bgra(255);
        let right = style.arrow_color(scene.hovered == Hit::RightArrow).to_bgra(255);
        canvas.draw_arrow(scene.layout.left_arrow, false, left);
        canvas.draw_arrow(scene.layout.right_arrow, true, right);
    }

    for (rect, &selected) in scene.layout.markers.iter().zip(scene.markers) {
        canvas.fill_rect(*rect, scene.style.marker_color(selected).to_bgra(255));
    }

    canvas.apply_opacity(scene.opacity);
}
