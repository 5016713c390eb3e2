use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Element, ElementId};
use crate::compositor::Canvas;
use crate::element::common;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
        }
    }
}

/// Filled shape layered over the raster.
///
/// `position` is the top-left corner of the bounding box, in native pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeElement {
    id: ElementId,
    kind: ShapeKind,
    position: Pos2,
    size: Vec2,
    #[serde(with = "crate::color::hex")]
    color: Color32,
}

impl ShapeElement {
    pub fn new(kind: ShapeKind, position: Pos2, size: Vec2, color: Color32) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            position,
            size: common::validate_shape_size(size),
            color,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Bounding box of the shape
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }
}

impl Element for ShapeElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        self.kind.name()
    }

    fn draw(&self, canvas: &mut Canvas<'_>) {
        match self.kind {
            ShapeKind::Rectangle => canvas.fill_rect(self.rect(), self.color),
            // Circles use the box width as diameter, centred in the box
            ShapeKind::Circle => canvas.fill_circle(self.rect().center(), self.size.x / 2.0, self.color),
        }
    }
}
