use egui::{Vec2, vec2};

// Common constants for overlay elements
pub const MIN_TEXT_SIZE: f32 = 1.0;
pub const MAX_TEXT_SIZE: f32 = 1024.0;
pub const DEFAULT_TEXT_SIZE: f32 = 20.0;
pub const DEFAULT_SHAPE_SIZE: Vec2 = vec2(50.0, 50.0);

/// Sanitizes a text size: clamped to [`MIN_TEXT_SIZE`, `MAX_TEXT_SIZE`],
/// non-finite becomes the default
pub(crate) fn validate_text_size(size: f32) -> f32 {
    if size.is_finite() {
        size.clamp(MIN_TEXT_SIZE, MAX_TEXT_SIZE)
    } else {
        DEFAULT_TEXT_SIZE
    }
}

/// Sanitizes a shape size; each axis must be positive and finite
pub(crate) fn validate_shape_size(size: Vec2) -> Vec2 {
    let axis = |value: f32, fallback: f32| {
        if value.is_finite() && value > 0.0 { value } else { fallback }
    };
    vec2(
        axis(size.x, DEFAULT_SHAPE_SIZE.x),
        axis(size.y, DEFAULT_SHAPE_SIZE.y),
    )
}
