use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;

/// Current values of the text and shape tool controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Text placed by the next click in text mode
    pub pending_text: String,
    pub text_size: f32,
    #[serde(with = "crate::color::hex")]
    pub text_color: Color32,
    #[serde(with = "crate::color::hex")]
    pub shape_color: Color32,
}

impl ToolSettings {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            pending_text: String::new(),
            text_size: config.text.default_size,
            text_color: config.text.default_color,
            shape_color: config.shape.default_color,
        }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}
