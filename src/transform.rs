use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Upper bound of the rotation slider, in degrees
pub const ROTATION_MAX: f32 = 360.0;
/// Upper bound of brightness, contrast and saturation, in percent
pub const FILTER_MAX: f32 = 200.0;
/// Upper bound of grayscale, in percent
pub const GRAYSCALE_MAX: f32 = 100.0;

/// Live, non-destructive rendering parameters applied on top of the
/// committed raster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Transform {
    /// Clockwise rotation in degrees
    pub rotation: f32,
    /// Percent, 100 = unchanged
    pub brightness: f32,
    /// Percent, 100 = unchanged
    pub contrast: f32,
    /// Percent, 100 = unchanged
    pub saturation: f32,
    /// Percent, 0 = unchanged
    pub grayscale: f32,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

impl Default for Transform {
    fn default() -> Self {
        const IDENTITY: Transform = Transform {
            rotation: 0.0,
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            grayscale: 0.0,
            flip_horizontal: false,
            flip_vertical: false,
        };
        IDENTITY
    }
}

/// A single adjustable field of a [`Transform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformField {
    Rotation,
    Brightness,
    Contrast,
    Saturation,
    Grayscale,
    FlipHorizontal,
    FlipVertical,
}

impl TransformField {
    pub const ALL: [TransformField; 7] = [
        TransformField::Rotation,
        TransformField::Brightness,
        TransformField::Contrast,
        TransformField::Saturation,
        TransformField::Grayscale,
        TransformField::FlipHorizontal,
        TransformField::FlipVertical,
    ];

    /// The documented domain of the field. Flags use 0 (off) and 1 (on).
    pub fn domain(self) -> RangeInclusive<f32> {
        match self {
            TransformField::Rotation => 0.0..=ROTATION_MAX,
            TransformField::Brightness
            | TransformField::Contrast
            | TransformField::Saturation => 0.0..=FILTER_MAX,
            TransformField::Grayscale => 0.0..=GRAYSCALE_MAX,
            TransformField::FlipHorizontal | TransformField::FlipVertical => 0.0..=1.0,
        }
    }

    /// The value at which the field has no visible effect
    pub fn identity_value(self) -> f32 {
        match self {
            TransformField::Brightness
            | TransformField::Contrast
            | TransformField::Saturation => 100.0,
            _ => 0.0,
        }
    }

    /// Brings `value` into the field's domain. Rotation wraps, percentages
    /// clamp, flags collapse to 0 or 1. Non-finite input maps to identity.
    pub fn clamp(self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.identity_value();
        }
        match self {
            TransformField::Rotation => wrap_rotation(value),
            TransformField::FlipHorizontal | TransformField::FlipVertical => {
                if value != 0.0 { 1.0 } else { 0.0 }
            }
            _ => {
                let domain = self.domain();
                value.clamp(*domain.start(), *domain.end())
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TransformField::Rotation => "rotation",
            TransformField::Brightness => "brightness",
            TransformField::Contrast => "contrast",
            TransformField::Saturation => "saturation",
            TransformField::Grayscale => "grayscale",
            TransformField::FlipHorizontal => "flip_horizontal",
            TransformField::FlipVertical => "flip_vertical",
        }
    }
}

fn wrap_rotation(degrees: f32) -> f32 {
    if (0.0..=ROTATION_MAX).contains(&degrees) {
        degrees
    } else {
        degrees.rem_euclid(ROTATION_MAX)
    }
}

impl Transform {
    /// Creates a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn get(&self, field: TransformField) -> f32 {
        match field {
            TransformField::Rotation => self.rotation,
            TransformField::Brightness => self.brightness,
            TransformField::Contrast => self.contrast,
            TransformField::Saturation => self.saturation,
            TransformField::Grayscale => self.grayscale,
            TransformField::FlipHorizontal => flag(self.flip_horizontal),
            TransformField::FlipVertical => flag(self.flip_vertical),
        }
    }

    /// Clamps `value` into the field's domain and stores it. Returns the
    /// value actually stored.
    pub fn set(&mut self, field: TransformField, value: f32) -> f32 {
        let value = field.clamp(value);
        match field {
            TransformField::Rotation => self.rotation = value,
            TransformField::Brightness => self.brightness = value,
            TransformField::Contrast => self.contrast = value,
            TransformField::Saturation => self.saturation = value,
            TransformField::Grayscale => self.grayscale = value,
            TransformField::FlipHorizontal => self.flip_horizontal = value != 0.0,
            TransformField::FlipVertical => self.flip_vertical = value != 0.0,
        }
        value
    }

    /// Returns a copy with every field inside its domain
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for field in TransformField::ALL {
            out.set(field, self.get(field));
        }
        out
    }

    pub fn is_identity(&self) -> bool {
        self.is_geometric_identity() && !self.has_color_filter()
    }

    /// No rotation (modulo a full turn) and no flips
    pub fn is_geometric_identity(&self) -> bool {
        self.rotation.rem_euclid(ROTATION_MAX) == 0.0
            && !self.flip_horizontal
            && !self.flip_vertical
    }

    pub fn has_color_filter(&self) -> bool {
        self.brightness != 100.0
            || self.contrast != 100.0
            || self.saturation != 100.0
            || self.grayscale != 0.0
    }
}

fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}
