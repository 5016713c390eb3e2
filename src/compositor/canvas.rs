use egui::{Color32, Pos2, Rect};
use image::RgbaImage;

use crate::font::FontHandle;

/// Drawing surface handed to overlay elements during compositing.
pub struct Canvas<'a> {
    pixels: &'a mut RgbaImage,
    font: &'a FontHandle,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(pixels: &'a mut RgbaImage, font: &'a FontHandle) -> Self {
        Self { pixels, font }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn font(&self) -> &'a FontHandle {
        self.font
    }

    /// Source-over blend of `color` at (x, y), scaled by `coverage` in 0..=1.
    /// Out-of-bounds writes are ignored.
    pub fn blend(&mut self, x: i64, y: i64, color: Color32, coverage: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }

        let [r, g, b, a] = color.to_srgba_unmultiplied();
        let src_a = a as f32 / 255.0 * coverage.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }

        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            dst.0 = [0, 0, 0, 0];
            return;
        }

        let mix = |src: u8, dst: u8| {
            let value = (src as f32 * src_a + dst as f32 * dst_a * (1.0 - src_a)) / out_a;
            value.round().clamp(0.0, 255.0) as u8
        };
        dst.0 = [
            mix(r, dst[0]),
            mix(g, dst[1]),
            mix(b, dst[2]),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        ];
    }

    /// Fills every pixel whose centre lies inside `rect`
    pub fn fill_rect(&mut self, rect: Rect, color: Color32) {
        let Some((x0, y0, x1, y1)) = self.pixel_span(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let center_x = x as f32 + 0.5;
                let center_y = y as f32 + 0.5;
                if center_x >= rect.min.x
                    && center_x < rect.max.x
                    && center_y >= rect.min.y
                    && center_y < rect.max.y
                {
                    self.blend(x, y, color, 1.0);
                }
            }
        }
    }

    /// Fills a disc with a one pixel anti-aliased rim
    pub fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        if radius <= 0.0 {
            return;
        }
        let bounds = Rect::from_center_size(center, egui::vec2(radius * 2.0 + 2.0, radius * 2.0 + 2.0));
        let Some((x0, y0, x1, y1)) = self.pixel_span(bounds) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let coverage = radius + 0.5 - (dx * dx + dy * dy).sqrt();
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage.min(1.0));
                }
            }
        }
    }

    /// Integer pixel range covering `rect`, clipped to the canvas
    fn pixel_span(&self, rect: Rect) -> Option<(i64, i64, i64, i64)> {
        if !(rect.min.x.is_finite() && rect.min.y.is_finite() && rect.max.x.is_finite() && rect.max.y.is_finite()) {
            return None;
        }
        let x0 = (rect.min.x.floor() as i64).max(0);
        let y0 = (rect.min.y.floor() as i64).max(0);
        let x1 = (rect.max.x.ceil() as i64).min(i64::from(self.width()));
        let y1 = (rect.max.y.ceil() as i64).min(i64::from(self.height()));
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}
