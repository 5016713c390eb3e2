use ab_glyph::{Font, ScaleFont, point};
use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use super::{Element, ElementId};
use crate::compositor::Canvas;
use crate::element::common;

/// Text label layered over the raster.
///
/// `position` is the left end of the alphabetic baseline, in native pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    id: ElementId,
    text: String,
    position: Pos2,
    size: f32,
    #[serde(with = "crate::color::hex")]
    color: Color32,
}

impl TextElement {
    pub fn new(text: impl Into<String>, position: Pos2, size: f32, color: Color32) -> Self {
        Self {
            id: ElementId::new(),
            text: text.into(),
            position,
            size: common::validate_text_size(size),
            color,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> Color32 {
        self.color
    }
}

impl Element for TextElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "text"
    }

    fn draw(&self, canvas: &mut Canvas<'_>) {
        if self.text.is_empty() {
            return;
        }

        let handle = canvas.font();
        let font = handle.font();
        // deserialized elements skip the constructor's clamp
        let scale = handle.px_scale(common::validate_text_size(self.size));
        let scaled = font.as_scaled(scale);

        let mut caret = self.position.x;
        let mut previous = None;
        for ch in self.text.chars() {
            let glyph_id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, glyph_id);
            }
            let glyph = glyph_id.with_scale_and_position(scale, point(caret, self.position.y));
            caret += scaled.h_advance(glyph_id);
            previous = Some(glyph_id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                // Whitespace has no outline
                continue;
            };
            let bounds = outlined.px_bounds();
            if bounds.max.x < 0.0
                || bounds.max.y < 0.0
                || bounds.min.x > canvas.width() as f32
                || bounds.min.y > canvas.height() as f32
            {
                continue;
            }
            outlined.draw(|x, y, coverage| {
                canvas.blend(
                    bounds.min.x as i64 + i64::from(x),
                    bounds.min.y as i64 + i64::from(y),
                    self.color,
                    coverage,
                );
            });
        }
    }
}
