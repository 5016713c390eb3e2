use ab_glyph::{Font, FontArc, PxScale};
use std::path::Path;

use crate::error::{EditorError, EditorResult};

/// Font used to rasterize text overlays.
#[derive(Clone)]
pub struct FontHandle {
    font: FontArc,
}

// FontArc has no useful Debug output
impl std::fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontHandle")
            .field("glyph_count", &self.font.glyph_count())
            .finish()
    }
}

impl FontHandle {
    /// The proportional font egui ships with
    pub fn bundled() -> EditorResult<Self> {
        let definitions = egui::FontDefinitions::default();
        let name = definitions
            .families
            .get(&egui::FontFamily::Proportional)
            .and_then(|names| names.first())
            .ok_or_else(|| EditorError::Font("no bundled proportional font".to_owned()))?;
        let data = definitions
            .font_data
            .get(name)
            .ok_or_else(|| EditorError::Font(format!("bundled font {name:?} has no data")))?;
        Self::from_bytes(data.font.to_vec())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> EditorResult<Self> {
        FontArc::try_from_vec(bytes)
            .map(|font| Self { font })
            .map_err(|err| EditorError::Font(err.to_string()))
    }

    /// Loads a TTF/OTF file from disk
    pub fn load(path: &Path) -> EditorResult<Self> {
        log::info!("Loading overlay font from {}", path.display());
        Self::from_bytes(std::fs::read(path)?)
    }

    pub(crate) fn font(&self) -> &FontArc {
        &self.font
    }

    /// Scale for a CSS-style pixel size, which is an em size rather than
    /// ab_glyph's ascent-to-descent height.
    pub(crate) fn px_scale(&self, size: f32) -> PxScale {
        let units_per_em = self.font.units_per_em().unwrap_or(1.0);
        PxScale::from(size * self.font.height_unscaled() / units_per_em)
    }
}
