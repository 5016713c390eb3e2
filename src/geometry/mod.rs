//! Coordinate spaces and rectangle helpers.
//!
//! Pointer positions arrive in *display* space (the on-screen canvas, which
//! may be scaled down to fit). Everything the session stores - crop anchors,
//! overlay positions - is kept in *native* space, the pixel grid of the
//! committed raster. Conversion happens once, when the point is captured.

mod crop;
mod mapping;

pub use crop::CropRect;
pub use mapping::DisplayMapping;

use egui::Vec2;

/// Height that keeps `native`'s aspect ratio at the given width.
pub fn height_for_width(native: Vec2, width: u32) -> u32 {
    if native.x <= 0.0 {
        return width;
    }
    ((width as f32 * native.y / native.x).round() as u32).max(1)
}

/// Width that keeps `native`'s aspect ratio at the given height.
pub fn width_for_height(native: Vec2, height: u32) -> u32 {
    if native.y <= 0.0 {
        return height;
    }
    ((height as f32 * native.x / native.y).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_aspect_helpers() {
        assert_eq!(height_for_width(vec2(800.0, 600.0), 400), 300);
        assert_eq!(width_for_height(vec2(800.0, 600.0), 300), 400);
        assert_eq!(height_for_width(vec2(0.0, 600.0), 40), 40);
        assert_eq!(height_for_width(vec2(1000.0, 1.0), 10), 1);
    }
}
