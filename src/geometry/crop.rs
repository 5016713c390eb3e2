use egui::{Pos2, Rect, pos2, vec2};

use crate::error::{EditorError, EditorResult};

/// Corner coordinates are clamped to this magnitude so extents fit a `u32`
const COORD_LIMIT: f32 = (1u32 << 30) as f32;

/// Axis-aligned crop region in whole native pixels. The origin may lie
/// outside the raster; uncovered pixels come out transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Builds the rectangle spanned by two corners, independent of drag
    /// direction. Corners are snapped to the nearest pixel boundary.
    pub fn from_corners(a: Pos2, b: Pos2) -> EditorResult<Self> {
        if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
            return Err(EditorError::InvalidGeometry(
                "crop corners must be finite".to_owned(),
            ));
        }

        let [a, b] = [a, b].map(|p| p.clamp(pos2(-COORD_LIMIT, -COORD_LIMIT), pos2(COORD_LIMIT, COORD_LIMIT)));

        let min_x = a.x.min(b.x).round();
        let min_y = a.y.min(b.y).round();
        let width = (a.x - b.x).abs().round();
        let height = (a.y - b.y).abs().round();

        if width < 1.0 || height < 1.0 {
            return Err(EditorError::InvalidGeometry(format!(
                "crop rectangle is degenerate ({width}x{height})"
            )));
        }

        Ok(Self {
            x: min_x as i64,
            y: min_y as i64,
            width: width as u32,
            height: height as u32,
        })
    }

    /// Intersects the rectangle with a `width` x `height` raster.
    ///
    /// Fails with `InvalidGeometry` when nothing of the raster is selected.
    pub fn clip_to(&self, width: u32, height: u32) -> EditorResult<Self> {
        let x0 = self.x.clamp(0, i64::from(width));
        let y0 = self.y.clamp(0, i64::from(height));
        let x1 = self.x.saturating_add(i64::from(self.width)).clamp(0, i64::from(width));
        let y1 = self.y.saturating_add(i64::from(self.height)).clamp(0, i64::from(height));

        if x1 <= x0 || y1 <= y0 {
            return Err(EditorError::InvalidGeometry(format!(
                "crop rectangle lies outside the {width}x{height} image"
            )));
        }

        Ok(Self {
            x: x0,
            y: y0,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    pub fn to_rect(&self) -> Rect {
        Rect::from_min_size(
            pos2(self.x as f32, self.y as f32),
            vec2(self.width as f32, self.height as f32),
        )
    }
}
