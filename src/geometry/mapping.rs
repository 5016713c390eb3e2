use egui::{Pos2, Vec2, pos2};
use serde::{Deserialize, Serialize};

/// Maps between the displayed canvas and the native raster resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayMapping {
    native: Vec2,
    displayed: Vec2,
}

impl DisplayMapping {
    /// A mapping where the raster is shown at its native size
    pub fn identity(native: Vec2) -> Self {
        Self {
            native,
            displayed: native,
        }
    }

    pub fn new(native: Vec2, displayed: Vec2) -> Self {
        Self { native, displayed }
    }

    pub fn native(&self) -> Vec2 {
        self.native
    }

    pub fn displayed(&self) -> Vec2 {
        self.displayed
    }

    pub fn set_displayed(&mut self, displayed: Vec2) {
        self.displayed = displayed;
    }

    /// Native pixels per displayed pixel, per axis. A degenerate display
    /// size falls back to 1:1.
    pub fn scale(&self) -> Vec2 {
        let axis = |native: f32, displayed: f32| {
            if displayed > 0.0 && displayed.is_finite() && native > 0.0 {
                native / displayed
            } else {
                1.0
            }
        };
        Vec2::new(
            axis(self.native.x, self.displayed.x),
            axis(self.native.y, self.displayed.y),
        )
    }

    pub fn to_native(&self, point: Pos2) -> Pos2 {
        let scale = self.scale();
        pos2(point.x * scale.x, point.y * scale.y)
    }

    pub fn to_display(&self, point: Pos2) -> Pos2 {
        let scale = self.scale();
        pos2(point.x / scale.x, point.y / scale.y)
    }
}
