#![warn(clippy::all, rust_2018_idioms)]

pub mod color;
pub mod command;
pub mod compositor;
pub mod config;
pub mod element;
pub mod error;
pub mod event;
pub mod font;
pub mod gate;
pub mod geometry;
pub mod overlay;
pub mod preview;
pub mod raster;
pub mod session;
pub mod shared;
pub mod state;
pub mod transform;
pub mod util;

pub use command::{Command, History, Outcome};
pub use compositor::Compositor;
pub use config::EditorConfig;
pub use element::{Element, ElementId, ShapeElement, ShapeKind, TextElement};
pub use error::{EditorError, EditorResult};
pub use event::{EditorEvent, EventBus, EventHandler};
pub use font::FontHandle;
pub use gate::{AuthenticatedSession, SessionGate};
pub use geometry::{CropRect, DisplayMapping};
pub use overlay::OverlayStore;
pub use preview::PreviewCache;
pub use raster::{ExportFormat, Raster, RasterRef, ResizeFilter};
pub use session::EditorSession;
pub use shared::{Reservation, SharedSession};
pub use state::{InteractionMode, ToolSettings};
pub use transform::{Transform, TransformField};
