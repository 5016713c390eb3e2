use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compositor::Canvas;

mod common;
pub(crate) mod shape;
pub(crate) mod text;

pub use common::{DEFAULT_SHAPE_SIZE, DEFAULT_TEXT_SIZE, MAX_TEXT_SIZE, MIN_TEXT_SIZE};
pub use shape::{ShapeElement, ShapeKind};
pub use text::TextElement;

/// Stable identity of an overlay element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Common trait that all overlay elements implement
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> ElementId;

    /// Get the element type as a string
    fn element_type(&self) -> &'static str;

    /// Paint the element onto the canvas, in native pixel space
    fn draw(&self, canvas: &mut Canvas<'_>);
}
