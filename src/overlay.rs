use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId, ShapeElement, TextElement};

/// Ordered text and shape overlays drawn on top of the committed raster.
///
/// Elements are append-only; they are never edited in place and leave only
/// through [`OverlayStore::clear`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayStore {
    texts: Vec<TextElement>,
    shapes: Vec<ShapeElement>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text(&mut self, element: TextElement) -> ElementId {
        let id = element.id();
        self.texts.push(element);
        id
    }

    pub fn add_shape(&mut self, element: ShapeElement) -> ElementId {
        let id = element.id();
        self.shapes.push(element);
        id
    }

    pub fn clear(&mut self) {
        self.texts.clear();
        self.shapes.clear();
    }

    /// Text elements in insertion order
    pub fn texts(&self) -> &[TextElement] {
        &self.texts
    }

    /// Shape elements in insertion order
    pub fn shapes(&self) -> &[ShapeElement] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.texts.len() + self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.shapes.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.texts.iter().any(|t| t.id() == id) || self.shapes.iter().any(|s| s.id() == id)
    }
}
