use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::element::{DEFAULT_SHAPE_SIZE, DEFAULT_TEXT_SIZE, MAX_TEXT_SIZE, MIN_TEXT_SIZE};
use crate::error::{EditorError, EditorResult};
use crate::font::FontHandle;
use crate::raster::{ExportFormat, ResizeFilter};

/// Editor configuration. Every section and field has a default, so any
/// subset of the JSON document is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub text: TextConfig,
    pub shape: ShapeConfig,
    pub resize: ResizeConfig,
    pub history: HistoryConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub default_size: f32,
    pub min_size: f32,
    pub max_size: f32,
    #[serde(with = "crate::color::hex")]
    pub default_color: Color32,
    /// TTF/OTF file for text overlays; egui's bundled font when unset
    pub font_path: Option<PathBuf>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_TEXT_SIZE,
            min_size: 10.0,
            max_size: 100.0,
            default_color: Color32::BLACK,
            font_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    #[serde(with = "crate::color::hex")]
    pub default_color: Color32,
    pub width: f32,
    pub height: f32,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            default_color: Color32::BLACK,
            width: DEFAULT_SHAPE_SIZE.x,
            height: DEFAULT_SHAPE_SIZE.y,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub filter: ResizeFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Reset the live transform and clear overlays on undo/redo
    pub undo_restores_live_state: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            file_name: "edited-image.png".to_owned(),
        }
    }
}

impl EditorConfig {
    /// Parses and validates a JSON configuration document
    pub fn from_json_str(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file
    pub fn load(path: &Path) -> EditorResult<Self> {
        log::info!("Loading editor configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> EditorResult<()> {
        let text = &self.text;
        let sizes = [text.min_size, text.default_size, text.max_size];
        if sizes
            .iter()
            .any(|size| !(MIN_TEXT_SIZE..=MAX_TEXT_SIZE).contains(size))
        {
            return Err(EditorError::Config(format!(
                "text sizes must lie within {MIN_TEXT_SIZE}..={MAX_TEXT_SIZE}px"
            )));
        }
        if !(text.min_size <= text.default_size && text.default_size <= text.max_size) {
            return Err(EditorError::Config(format!(
                "text size range is inconsistent: min {} default {} max {}",
                text.min_size, text.default_size, text.max_size
            )));
        }

        let shape = &self.shape;
        if !(shape.width.is_finite() && shape.height.is_finite() && shape.width > 0.0 && shape.height > 0.0) {
            return Err(EditorError::Config(format!(
                "shape size must be positive, got {}x{}",
                shape.width, shape.height
            )));
        }

        if self.export.file_name.trim().is_empty() {
            return Err(EditorError::Config("export file name is empty".to_owned()));
        }
        Ok(())
    }

    /// Loads the configured overlay font, or the bundled one
    pub fn load_font(&self) -> EditorResult<FontHandle> {
        match &self.text.font_path {
            Some(path) => FontHandle::load(path),
            None => FontHandle::bundled(),
        }
    }

    /// Clamps a text size into the configured slider range
    pub fn clamp_text_size(&self, size: f32) -> f32 {
        if size.is_finite() {
            size.clamp(self.text.min_size, self.text.max_size)
        } else {
            self.text.default_size
        }
    }
}
