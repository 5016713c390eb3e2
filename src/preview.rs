use egui::{Context, TextureHandle, TextureId, TextureOptions};

use crate::session::EditorSession;

/// Keeps the session composite uploaded as an egui texture.
///
/// The texture is re-uploaded only when the session revision moves on.
#[derive(Default)]
pub struct PreviewCache {
    texture: Option<(u64, TextureHandle)>,
    uploads: u64,
}

impl std::fmt::Debug for PreviewCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewCache")
            .field("revision", &self.revision())
            .field("uploads", &self.uploads)
            .finish()
    }
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the texture for the current composite, rendering and
    /// uploading it if the cached one is stale.
    pub fn texture_for(&mut self, ctx: &Context, session: &EditorSession) -> TextureId {
        let revision = session.revision();
        if let Some((cached, handle)) = &self.texture {
            if *cached == revision {
                return handle.id();
            }
        }

        let image = session.render().to_color_image();
        let handle = match self.texture.take() {
            Some((_, mut handle)) => {
                handle.set(image, TextureOptions::LINEAR);
                handle
            }
            None => ctx.load_texture("pixelgate_preview", image, TextureOptions::LINEAR),
        };
        log::debug!("Uploaded preview for revision {revision}");
        let id = handle.id();
        self.texture = Some((revision, handle));
        self.uploads += 1;
        id
    }

    /// Revision the cached texture was rendered at
    pub fn revision(&self) -> Option<u64> {
        self.texture.as_ref().map(|(revision, _)| *revision)
    }

    /// Number of uploads performed so far
    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    pub fn clear(&mut self) {
        self.texture = None;
    }
}
