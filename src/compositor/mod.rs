//! Deterministic composition of a committed raster, the live transform and
//! the overlay elements.
//!
//! Rendering order is fixed:
//!
//! 1. a canvas the size of the base raster (native resolution)
//! 2. rotation and flips about the centre
//! 3. brightness -> contrast -> saturation -> grayscale
//! 4. the transformed base drawn at the origin
//! 5. every text element, in insertion order
//! 6. every shape element, in insertion order
//!
//! Shapes always end up above text, whatever order they were added in.

mod canvas;
mod filter;
mod warp;

pub use canvas::Canvas;

use crate::element::{Element, ShapeElement, TextElement};
use crate::font::FontHandle;
use crate::overlay::OverlayStore;
use crate::raster::Raster;
use crate::transform::Transform;

#[derive(Debug, Clone)]
pub struct Compositor {
    font: FontHandle,
}

impl Compositor {
    pub fn new(font: FontHandle) -> Self {
        Self { font }
    }

    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    /// Renders `base` with `transform` and both overlay passes applied.
    pub fn render(
        &self,
        base: &Raster,
        transform: &Transform,
        texts: &[TextElement],
        shapes: &[ShapeElement],
    ) -> Raster {
        let transform = transform.clamped();
        log::debug!(
            "Compositing {}x{} base with {} text and {} shape overlays",
            base.width(),
            base.height(),
            texts.len(),
            shapes.len()
        );

        let mut pixels = if transform.is_geometric_identity() {
            base.as_image().clone()
        } else {
            warp::warp(base.as_image(), &transform)
        };
        filter::apply_color_filter(&mut pixels, &transform);

        {
            let mut canvas = Canvas::new(&mut pixels, &self.font);
            for text in texts {
                text.draw(&mut canvas);
            }
            for shape in shapes {
                shape.draw(&mut canvas);
            }
        }

        Raster::from(pixels)
    }

    /// Convenience wrapper taking both overlay lists from a store
    pub fn render_store(&self, base: &Raster, transform: &Transform, overlays: &OverlayStore) -> Raster {
        self.render(base, transform, overlays.texts(), overlays.shapes())
    }
}
