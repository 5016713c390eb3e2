//! Pointer interaction modes of an editing session.
//!
//! At most one of crop selection, text placement or shape placement can be
//! active; each variant carries only the data its mode needs.
//!
//! ```text
//!                ┌──────────────────┐
//!          ┌────►  CropSelecting   ├────┐
//!          │     └──────────────────┘    │
//! ┌────────┴─┐   ┌──────────────────┐    │
//! │  Normal  ├──►│   TextPlacing    ├────┤
//! │          │◄──┴──────────────────┘    │
//! └────────┬─┘   ┌──────────────────┐    │
//!          └────►│  ShapePlacing    ├────┘
//!                └──────────────────┘
//! ```
//!
//! Entering a placing/selecting mode from another one replaces it; toggling
//! the active mode again returns to `Normal`. A committed crop also returns
//! to `Normal`.
use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::element::ShapeKind;

/// Corners of an in-progress crop drag, in native pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropDrag {
    pub anchor: Pos2,
    pub live: Pos2,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// No pointer tool armed
    #[default]
    Normal,
    /// Dragging out a crop rectangle; `drag` is set once the pointer went down
    CropSelecting { drag: Option<CropDrag> },
    /// Clicks place the pending text
    TextPlacing,
    /// Clicks place a shape of the given kind
    ShapePlacing(ShapeKind),
}

impl InteractionMode {
    /// A crop selection that has not started dragging yet
    pub fn crop() -> Self {
        InteractionMode::CropSelecting { drag: None }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionMode::Normal => "normal",
            InteractionMode::CropSelecting { .. } => "crop",
            InteractionMode::TextPlacing => "text",
            InteractionMode::ShapePlacing(_) => "shape",
        }
    }

    /// Returns the mode after the user toggles `target`: the same mode
    /// (same shape kind for shapes) switches off, anything else switches over.
    pub fn toggled(&self, target: InteractionMode) -> InteractionMode {
        if self.same_kind(&target) {
            InteractionMode::Normal
        } else {
            target
        }
    }

    fn same_kind(&self, other: &InteractionMode) -> bool {
        match (self, other) {
            (InteractionMode::Normal, InteractionMode::Normal) => true,
            (InteractionMode::CropSelecting { .. }, InteractionMode::CropSelecting { .. }) => true,
            (InteractionMode::TextPlacing, InteractionMode::TextPlacing) => true,
            (InteractionMode::ShapePlacing(a), InteractionMode::ShapePlacing(b)) => a == b,
            _ => false,
        }
    }

    /// Returns true if no pointer tool is armed
    pub fn is_normal(&self) -> bool {
        matches!(self, InteractionMode::Normal)
    }

    pub fn is_crop_selecting(&self) -> bool {
        matches!(self, InteractionMode::CropSelecting { .. })
    }

    pub fn is_text_placing(&self) -> bool {
        matches!(self, InteractionMode::TextPlacing)
    }

    /// Returns the armed shape kind if in shape placing mode
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            InteractionMode::ShapePlacing(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns the crop drag if one is in progress
    pub fn crop_drag(&self) -> Option<CropDrag> {
        match self {
            InteractionMode::CropSelecting { drag } => *drag,
            _ => None,
        }
    }
}
