use image::RgbaImage;

use crate::transform::Transform;

/// One stage of the colour filter chain, with its amount as a fraction
/// (100% = 1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
enum FilterStep {
    Brightness(f32),
    Contrast(f32),
    Saturate(f32),
    Grayscale(f32),
}

impl FilterStep {
    /// Applies the step to normalized RGB, clamping the result like a
    /// filter primitive would.
    fn apply(self, [r, g, b]: [f32; 3]) -> [f32; 3] {
        let out = match self {
            FilterStep::Brightness(amount) => [r * amount, g * amount, b * amount],
            FilterStep::Contrast(amount) => {
                let adjust = |c: f32| (c - 0.5) * amount + 0.5;
                [adjust(r), adjust(g), adjust(b)]
            }
            FilterStep::Saturate(s) => [
                (0.213 + 0.787 * s) * r + (0.715 - 0.715 * s) * g + (0.072 - 0.072 * s) * b,
                (0.213 - 0.213 * s) * r + (0.715 + 0.285 * s) * g + (0.072 - 0.072 * s) * b,
                (0.213 - 0.213 * s) * r + (0.715 - 0.715 * s) * g + (0.072 + 0.928 * s) * b,
            ],
            FilterStep::Grayscale(amount) => {
                let s = 1.0 - amount;
                [
                    (0.2126 + 0.7874 * s) * r + (0.7152 - 0.7152 * s) * g + (0.0722 - 0.0722 * s) * b,
                    (0.2126 - 0.2126 * s) * r + (0.7152 + 0.2848 * s) * g + (0.0722 - 0.0722 * s) * b,
                    (0.2126 - 0.2126 * s) * r + (0.7152 - 0.7152 * s) * g + (0.0722 + 0.9278 * s) * b,
                ]
            }
        };
        out.map(|c| c.clamp(0.0, 1.0))
    }
}

/// Builds the brightness -> contrast -> saturate -> grayscale chain, skipping
/// stages sitting at their identity value.
fn filter_chain(transform: &Transform) -> Vec<FilterStep> {
    let mut steps = Vec::with_capacity(4);
    if transform.brightness != 100.0 {
        steps.push(FilterStep::Brightness(transform.brightness / 100.0));
    }
    if transform.contrast != 100.0 {
        steps.push(FilterStep::Contrast(transform.contrast / 100.0));
    }
    if transform.saturation != 100.0 {
        steps.push(FilterStep::Saturate(transform.saturation / 100.0));
    }
    if transform.grayscale != 0.0 {
        steps.push(FilterStep::Grayscale(transform.grayscale / 100.0));
    }
    steps
}

/// Applies the transform's colour filters in place. Alpha is untouched and
/// fully transparent pixels keep their colour channels.
pub(crate) fn apply_color_filter(pixels: &mut RgbaImage, transform: &Transform) {
    let steps = filter_chain(transform);
    if steps.is_empty() {
        return;
    }

    for pixel in pixels.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }
        let mut rgb = [r, g, b].map(|c| c as f32 / 255.0);
        for step in &steps {
            rgb = step.apply(rgb);
        }
        let [r, g, b] = rgb.map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8);
        pixel.0 = [r, g, b, a];
    }
}
