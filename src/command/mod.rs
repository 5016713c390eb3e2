//! Serializable editing intents and the undo/redo history they commit into.

mod history;

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::element::ShapeKind;
use crate::raster::{ExportFormat, RasterRef};
use crate::transform::TransformField;

pub use history::History;

/// Commands that can be executed against an editing session.
///
/// Every point is in display space; the session converts it to native
/// pixels with its current display mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Set one live transform parameter (clamped to its domain)
    SetTransformField { field: TransformField, value: f32 },

    /// Report the size the composite is shown at
    SetDisplaySize { size: Vec2 },

    SetPendingText { text: String },
    SetTextSize { size: f32 },
    SetTextColor {
        #[serde(with = "crate::color::hex")]
        color: egui::Color32,
    },
    SetShapeColor {
        #[serde(with = "crate::color::hex")]
        color: egui::Color32,
    },

    ToggleCropMode,
    ToggleTextMode,
    ToggleShapeMode { kind: ShapeKind },
    ExitMode,

    /// Pointer down while selecting a crop
    BeginCrop { point: Pos2 },
    /// Pointer moved while selecting a crop
    UpdateCrop { point: Pos2 },
    CommitCrop,

    Resize { width: u32, height: u32 },

    AddTextAt { point: Pos2 },
    AddShapeAt { point: Pos2 },
    ClearOverlays,

    Undo,
    Redo,
    Reset,

    /// Encode the composite; the configured format when `format` is absent
    Export {
        #[serde(default)]
        format: Option<ExportFormat>,
    },
}

impl Command {
    /// Returns true for commands that commit a new raster to history
    pub fn is_destructive(&self) -> bool {
        matches!(self, Command::CommitCrop | Command::Resize { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::SetTransformField { .. } => "set_transform_field",
            Command::SetDisplaySize { .. } => "set_display_size",
            Command::SetPendingText { .. } => "set_pending_text",
            Command::SetTextSize { .. } => "set_text_size",
            Command::SetTextColor { .. } => "set_text_color",
            Command::SetShapeColor { .. } => "set_shape_color",
            Command::ToggleCropMode => "toggle_crop_mode",
            Command::ToggleTextMode => "toggle_text_mode",
            Command::ToggleShapeMode { .. } => "toggle_shape_mode",
            Command::ExitMode => "exit_mode",
            Command::BeginCrop { .. } => "begin_crop",
            Command::UpdateCrop { .. } => "update_crop",
            Command::CommitCrop => "commit_crop",
            Command::Resize { .. } => "resize",
            Command::AddTextAt { .. } => "add_text_at",
            Command::AddShapeAt { .. } => "add_shape_at",
            Command::ClearOverlays => "clear_overlays",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::Reset => "reset",
            Command::Export { .. } => "export",
        }
    }
}

/// What executing a [`Command`] did to the session
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing observable changed (boundary undo, placement outside its mode...)
    Unchanged,
    /// Live state changed; the composite must be redrawn
    Rendered,
    /// A destructive edit appended this raster to history
    Committed(RasterRef),
    /// Encoded composite bytes
    Exported(Vec<u8>),
}

impl Outcome {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Outcome::Unchanged)
    }
}
