//! The editing session: one committed-raster history plus the live transform,
//! overlays and interaction mode layered on top of it.
//!
//! Live parameters (transform fields, overlays, tool settings) only affect
//! rendering. Destructive operations (crop, resize) bake the current
//! composite into a new history entry, after which the live transform is
//! back at identity, the overlays are empty and the mode is `Normal`.
//!
//! Points handed to the session are in display space and are converted to
//! native pixels with the current [`DisplayMapping`] when they are captured.
//!
//! # Example
//!
//! ```rust,no_run
//! use pixelgate::{EditorConfig, EditorSession, TransformField};
//!
//! # fn run(bytes: &[u8]) -> pixelgate::EditorResult<()> {
//! let mut session = EditorSession::open(&true, bytes, EditorConfig::default())?;
//! session.set_transform_field(TransformField::Rotation, 90.0);
//! session.toggle_crop_mode();
//! session.begin_crop(egui::pos2(10.0, 10.0))?;
//! session.update_crop(egui::pos2(60.0, 60.0))?;
//! session.commit_crop()?;
//! let _png = session.export()?;
//! # Ok(())
//! # }
//! ```

use egui::{Color32, Pos2, Vec2, vec2};
use image::RgbaImage;
use std::sync::Arc;

use crate::command::{Command, History, Outcome};
use crate::compositor::Compositor;
use crate::config::EditorConfig;
use crate::element::{ElementId, ShapeElement, ShapeKind, TextElement};
use crate::error::{EditorError, EditorResult};
use crate::event::{EditorEvent, EventBus};
use crate::gate::SessionGate;
use crate::geometry::{CropRect, DisplayMapping};
use crate::overlay::OverlayStore;
use crate::raster::{ExportFormat, Raster, RasterRef};
use crate::state::{CropDrag, InteractionMode, ToolSettings};
use crate::transform::{Transform, TransformField};

#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    compositor: Compositor,
    history: History,
    transform: Transform,
    overlays: OverlayStore,
    mode: InteractionMode,
    tools: ToolSettings,
    mapping: DisplayMapping,
    /// Bumped whenever the composite may have changed
    revision: u64,
    events: EventBus,
}

impl EditorSession {
    /// Decodes `bytes` and opens a session on it.
    ///
    /// Fails with `Unauthenticated` before touching the input when the gate
    /// denies access.
    pub fn open<G>(gate: &G, bytes: &[u8], config: EditorConfig) -> EditorResult<Self>
    where
        G: SessionGate + ?Sized,
    {
        ensure_authenticated(gate)?;
        Self::with_raster(gate, Raster::decode(bytes)?, config)
    }

    /// Opens a session on a `data:image/...;base64,` URI
    pub fn open_data_uri<G>(gate: &G, uri: &str, config: EditorConfig) -> EditorResult<Self>
    where
        G: SessionGate + ?Sized,
    {
        ensure_authenticated(gate)?;
        Self::with_raster(gate, Raster::decode_data_uri(uri)?, config)
    }

    /// Opens a session on an already decoded raster
    pub fn with_raster<G>(gate: &G, original: Raster, config: EditorConfig) -> EditorResult<Self>
    where
        G: SessionGate + ?Sized,
    {
        ensure_authenticated(gate)?;
        config.validate()?;
        if original.width() == 0 || original.height() == 0 {
            return Err(EditorError::InvalidGeometry("image has no pixels".to_owned()));
        }

        let compositor = Compositor::new(config.load_font()?);
        let tools = ToolSettings::from_config(&config);
        let mapping = DisplayMapping::identity(original.size());
        log::info!(
            "Opened editing session on {}x{} image",
            original.width(),
            original.height()
        );

        Ok(Self {
            config,
            compositor,
            history: History::new(original.into_ref()),
            transform: Transform::identity(),
            overlays: OverlayStore::new(),
            mode: InteractionMode::Normal,
            tools,
            mapping,
            revision: 0,
            events: EventBus::new(),
        })
    }

    /// Replaces the image being edited and starts over with a fresh history.
    /// A decode failure leaves the session untouched.
    pub fn load_image(&mut self, bytes: &[u8]) -> EditorResult<()> {
        let original = Raster::decode(bytes)?;
        log::info!("Loaded new {}x{} image", original.width(), original.height());
        self.history.reset(original.into_ref());
        self.restart();
        Ok(())
    }

    // --- display mapping ---

    /// Records the size the composite is currently displayed at
    pub fn set_display_size(&mut self, size: Vec2) {
        self.mapping.set_displayed(size);
    }

    pub fn mapping(&self) -> &DisplayMapping {
        &self.mapping
    }

    // --- live transform ---

    /// Sets one transform parameter, clamped to its domain. Returns the
    /// value actually stored.
    pub fn set_transform_field(&mut self, field: TransformField, value: f32) -> f32 {
        let previous = self.transform.get(field);
        let stored = self.transform.set(field, value);
        if stored != previous {
            self.invalidate();
        }
        stored
    }

    /// Replaces the whole live transform (clamped)
    pub fn set_transform(&mut self, transform: Transform) {
        let transform = transform.clamped();
        if transform != self.transform {
            self.transform = transform;
            self.invalidate();
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    // --- tool settings ---

    pub fn set_pending_text(&mut self, text: impl Into<String>) {
        self.tools.pending_text = text.into();
    }

    /// Sets the size for the next text placement, clamped to the configured range
    pub fn set_text_size(&mut self, size: f32) -> f32 {
        self.tools.text_size = self.config.clamp_text_size(size);
        self.tools.text_size
    }

    pub fn set_text_color(&mut self, color: Color32) {
        self.tools.text_color = color;
    }

    pub fn set_shape_color(&mut self, color: Color32) {
        self.tools.shape_color = color;
    }

    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    // --- interaction mode ---

    pub fn toggle_crop_mode(&mut self) -> InteractionMode {
        self.toggle_mode(InteractionMode::crop())
    }

    pub fn toggle_text_mode(&mut self) -> InteractionMode {
        self.toggle_mode(InteractionMode::TextPlacing)
    }

    pub fn toggle_shape_mode(&mut self, kind: ShapeKind) -> InteractionMode {
        self.toggle_mode(InteractionMode::ShapePlacing(kind))
    }

    /// Leaves whatever mode is active
    pub fn exit_mode(&mut self) {
        self.set_mode(InteractionMode::Normal);
    }

    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    fn toggle_mode(&mut self, target: InteractionMode) -> InteractionMode {
        let next = self.mode.toggled(target);
        self.set_mode(next);
        next
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        if mode == self.mode {
            return;
        }
        let old = std::mem::replace(&mut self.mode, mode);
        log::debug!("Interaction mode {} -> {}", old.name(), mode.name());
        self.events.emit(EditorEvent::ModeChanged { old, new: mode });
    }

    // --- crop ---

    /// Anchors a crop selection at `point` (display space)
    pub fn begin_crop(&mut self, point: Pos2) -> EditorResult<()> {
        self.require_crop_mode()?;
        let native = self.mapping.to_native(point);
        self.mode = InteractionMode::CropSelecting {
            drag: Some(CropDrag {
                anchor: native,
                live: native,
            }),
        };
        Ok(())
    }

    /// Moves the live corner of the crop selection. Starts a selection if
    /// none is anchored yet.
    pub fn update_crop(&mut self, point: Pos2) -> EditorResult<()> {
        self.require_crop_mode()?;
        let native = self.mapping.to_native(point);
        let anchor = self.mode.crop_drag().map_or(native, |drag| drag.anchor);
        self.mode = InteractionMode::CropSelecting {
            drag: Some(CropDrag {
                anchor,
                live: native,
            }),
        };
        Ok(())
    }

    /// The current selection in native pixels, clipped to the image, if
    /// anything of the image is selected
    pub fn crop_rect(&self) -> Option<CropRect> {
        let drag = self.mode.crop_drag()?;
        self.selection(drag).ok()
    }

    /// Crops the current composite to the selection and commits the result.
    ///
    /// The selection is clipped to the image first. A degenerate selection,
    /// or one lying entirely off the image, fails with `InvalidGeometry` and
    /// leaves the history and the selection untouched.
    pub fn commit_crop(&mut self) -> EditorResult<RasterRef> {
        self.require_crop_mode()?;
        let drag = self
            .mode
            .crop_drag()
            .ok_or_else(|| EditorError::InvalidGeometry("no crop selection".to_owned()))?;
        let rect = self.selection(drag).inspect_err(|err| {
            log::warn!("Rejected crop: {err}");
        })?;

        let cropped = self.render().crop(rect);
        Ok(self.commit(cropped, "crop"))
    }

    /// The composite has the size of the committed raster
    fn selection(&self, drag: CropDrag) -> EditorResult<CropRect> {
        let (width, height) = self.history.current().dimensions();
        CropRect::from_corners(drag.anchor, drag.live)?.clip_to(width, height)
    }

    fn require_crop_mode(&self) -> EditorResult<()> {
        if self.mode.is_crop_selecting() {
            Ok(())
        } else {
            Err(EditorError::InvalidMode {
                expected: "crop",
                actual: self.mode.name(),
            })
        }
    }

    // --- resize ---

    /// Resizes the current composite to `width` x `height` and commits it.
    /// Aspect ratio is not enforced here; see [`crate::geometry::height_for_width`].
    pub fn apply_resize(&mut self, width: u32, height: u32) -> EditorResult<RasterRef> {
        let resized = self
            .render()
            .resize(width, height, self.config.resize.filter)
            .inspect_err(|err| log::warn!("Rejected resize: {err}"))?;
        Ok(self.commit(resized, "resize"))
    }

    // --- overlays ---

    /// Places the pending text at `point` (display space) when text mode is
    /// active and there is text to place. The pending text is cleared after
    /// a placement.
    pub fn add_text_at(&mut self, point: Pos2) -> Option<ElementId> {
        if !self.mode.is_text_placing() || self.tools.pending_text.is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.tools.pending_text);
        let element = TextElement::new(
            text,
            self.mapping.to_native(point),
            self.tools.text_size,
            self.tools.text_color,
        );
        let id = self.overlays.add_text(element);
        self.overlay_added(id);
        Some(id)
    }

    /// Places a shape of the armed kind with its top-left corner at `point`
    pub fn add_shape_at(&mut self, point: Pos2) -> Option<ElementId> {
        let kind = self.mode.shape_kind()?;
        let element = ShapeElement::new(
            kind,
            self.mapping.to_native(point),
            vec2(self.config.shape.width, self.config.shape.height),
            self.tools.shape_color,
        );
        let id = self.overlays.add_shape(element);
        self.overlay_added(id);
        Some(id)
    }

    pub fn clear_overlays(&mut self) {
        if self.overlays.is_empty() {
            return;
        }
        self.overlays.clear();
        self.events.emit(EditorEvent::OverlaysCleared);
        self.invalidate();
    }

    pub fn overlays(&self) -> &OverlayStore {
        &self.overlays
    }

    fn overlay_added(&mut self, id: ElementId) {
        log::debug!("Added overlay {id}");
        self.events.emit(EditorEvent::OverlayAdded { id });
        self.invalidate();
    }

    // --- history ---

    /// Steps back one committed raster. A no-op at the original.
    pub fn undo(&mut self) -> RasterRef {
        if self.history.can_undo() {
            self.history.undo();
            self.history_moved();
        }
        Arc::clone(self.history.current())
    }

    /// Steps forward one committed raster. A no-op at the newest entry.
    pub fn redo(&mut self) -> RasterRef {
        if self.history.can_redo() {
            self.history.redo();
            self.history_moved();
        }
        Arc::clone(self.history.current())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Back to the uploaded image: history, transform, overlays and mode
    pub fn reset(&mut self) {
        let original = Arc::clone(self.history.original());
        self.history.reset(original);
        log::info!("Session reset to original image");
        self.restart();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The committed raster the live state is rendered on
    pub fn current(&self) -> &RasterRef {
        self.history.current()
    }

    pub fn original(&self) -> &RasterRef {
        self.history.original()
    }

    fn history_moved(&mut self) {
        if self.config.history.undo_restores_live_state {
            self.transform = Transform::identity();
            if !self.overlays.is_empty() {
                self.overlays.clear();
                self.events.emit(EditorEvent::OverlaysCleared);
            }
        }
        self.sync_to_baseline();
        let index = self.history.cursor();
        log::debug!("History moved to entry {index} of {}", self.history.len());
        self.events.emit(EditorEvent::HistoryMoved { index });
        self.invalidate();
    }

    /// Appends `raster` to history and drops the live state baked into it
    fn commit(&mut self, raster: Raster, operation: &str) -> RasterRef {
        let committed = Arc::clone(self.history.commit(raster.into_ref()));
        self.transform = Transform::identity();
        if !self.overlays.is_empty() {
            self.overlays.clear();
            self.events.emit(EditorEvent::OverlaysCleared);
        }
        self.set_mode(InteractionMode::Normal);
        self.sync_to_baseline();

        let index = self.history.cursor();
        let len = self.history.len();
        log::info!(
            "Committed {operation}: {}x{} (entry {index} of {len})",
            committed.width(),
            committed.height()
        );
        self.events.emit(EditorEvent::Committed { index, len });
        self.invalidate();
        committed
    }

    /// Re-bases the display mapping and any crop anchor on the current raster
    fn sync_to_baseline(&mut self) {
        self.mapping = DisplayMapping::identity(self.history.current().size());
        if self.mode.crop_drag().is_some() {
            self.mode = InteractionMode::crop();
        }
    }

    fn restart(&mut self) {
        self.transform = Transform::identity();
        self.overlays.clear();
        self.tools.pending_text.clear();
        self.set_mode(InteractionMode::Normal);
        self.sync_to_baseline();
        self.events.emit(EditorEvent::SessionReset);
        self.invalidate();
    }

    // --- output ---

    /// Renders the current composite
    pub fn render(&self) -> Raster {
        self.compositor
            .render_store(self.history.current(), &self.transform, &self.overlays)
    }

    /// The current composite encoded in the configured export format
    pub fn export(&self) -> EditorResult<Vec<u8>> {
        self.export_as(self.config.export.format)
    }

    pub fn export_as(&self, format: ExportFormat) -> EditorResult<Vec<u8>> {
        let bytes = self.render().encode(format)?;
        log::info!("Exported {} bytes as {}", bytes.len(), format.mime_type());
        self.events.emit(EditorEvent::Exported { bytes: bytes.len() });
        Ok(bytes)
    }

    /// Suggested download name
    pub fn export_file_name(&self) -> &str {
        &self.config.export.file_name
    }

    /// Before/after reveal: columns left of `split` (fraction of the width)
    /// show the original upload, the rest the current composite.
    pub fn comparison(&self, split: f32) -> EditorResult<Raster> {
        let after = self.render();
        let (width, height) = after.dimensions();
        let before = self
            .history
            .original()
            .resize(width, height, self.config.resize.filter)?;

        let split = if split.is_nan() { 0.5 } else { split.clamp(0.0, 1.0) };
        let split_x = (split * width as f32).round() as u32;
        let before = before.as_image();
        let after = after.as_image();
        Ok(Raster::from(RgbaImage::from_fn(width, height, |x, y| {
            if x < split_x {
                *before.get_pixel(x, y)
            } else {
                *after.get_pixel(x, y)
            }
        })))
    }

    // --- commands ---

    /// Applies a host command and reports what changed
    pub fn execute(&mut self, command: Command) -> EditorResult<Outcome> {
        log::trace!("Executing {}", command.name());
        let revision = self.revision;
        let outcome = match command {
            Command::SetTransformField { field, value } => {
                self.set_transform_field(field, value);
                self.outcome_since(revision)
            }
            Command::SetDisplaySize { size } => {
                self.set_display_size(size);
                Outcome::Unchanged
            }
            Command::SetPendingText { text } => {
                self.set_pending_text(text);
                Outcome::Unchanged
            }
            Command::SetTextSize { size } => {
                self.set_text_size(size);
                Outcome::Unchanged
            }
            Command::SetTextColor { color } => {
                self.set_text_color(color);
                Outcome::Unchanged
            }
            Command::SetShapeColor { color } => {
                self.set_shape_color(color);
                Outcome::Unchanged
            }
            Command::ToggleCropMode => {
                self.toggle_crop_mode();
                Outcome::Unchanged
            }
            Command::ToggleTextMode => {
                self.toggle_text_mode();
                Outcome::Unchanged
            }
            Command::ToggleShapeMode { kind } => {
                self.toggle_shape_mode(kind);
                Outcome::Unchanged
            }
            Command::ExitMode => {
                self.exit_mode();
                Outcome::Unchanged
            }
            Command::BeginCrop { point } => {
                self.begin_crop(point)?;
                Outcome::Unchanged
            }
            Command::UpdateCrop { point } => {
                self.update_crop(point)?;
                Outcome::Unchanged
            }
            Command::CommitCrop => Outcome::Committed(self.commit_crop()?),
            Command::Resize { width, height } => Outcome::Committed(self.apply_resize(width, height)?),
            Command::AddTextAt { point } => {
                self.add_text_at(point);
                self.outcome_since(revision)
            }
            Command::AddShapeAt { point } => {
                self.add_shape_at(point);
                self.outcome_since(revision)
            }
            Command::ClearOverlays => {
                self.clear_overlays();
                self.outcome_since(revision)
            }
            Command::Undo => {
                self.undo();
                self.outcome_since(revision)
            }
            Command::Redo => {
                self.redo();
                self.outcome_since(revision)
            }
            Command::Reset => {
                self.reset();
                Outcome::Rendered
            }
            Command::Export { format } => {
                let format = format.unwrap_or(self.config.export.format);
                Outcome::Exported(self.export_as(format)?)
            }
        };
        Ok(outcome)
    }

    fn outcome_since(&self, revision: u64) -> Outcome {
        if self.revision == revision {
            Outcome::Unchanged
        } else {
            Outcome::Rendered
        }
    }

    // --- bookkeeping ---

    fn invalidate(&mut self) {
        self.revision += 1;
        self.events.emit(EditorEvent::RenderInvalidated);
    }

    /// Changes whenever the composite may have changed
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }
}

fn ensure_authenticated<G: SessionGate + ?Sized>(gate: &G) -> EditorResult<()> {
    if gate.is_authenticated() {
        Ok(())
    } else {
        log::warn!("Refused to open an editing session without authentication");
        Err(EditorError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use std::sync::Mutex;

    fn solid(width: u32, height: u32) -> Raster {
        Raster::from_color(width, height, Color32::from_rgb(200, 100, 50))
    }

    fn session(width: u32, height: u32) -> EditorSession {
        EditorSession::with_raster(&true, solid(width, height), EditorConfig::default()).unwrap()
    }

    #[test]
    fn test_crop_requires_crop_mode() {
        let mut session = session(20, 20);
        let err = session.begin_crop(pos2(1.0, 1.0)).unwrap_err();
        assert!(matches!(
            err,
            EditorError::InvalidMode {
                expected: "crop",
                actual: "normal"
            }
        ));
        assert!(session.commit_crop().is_err());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_crop_without_selection_is_invalid_geometry() {
        let mut session = session(20, 20);
        session.toggle_crop_mode();
        assert!(matches!(session.commit_crop(), Err(EditorError::InvalidGeometry(_))));
        assert!(session.mode().is_crop_selecting());
    }

    #[test]
    fn test_crop_points_use_display_mapping() {
        let mut session = session(200, 100);
        session.set_display_size(vec2(100.0, 50.0));
        session.toggle_crop_mode();
        session.begin_crop(pos2(10.0, 10.0)).unwrap();
        session.update_crop(pos2(20.0, 30.0)).unwrap();
        let rect = session.crop_rect().unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (20, 20, 20, 40));

        let committed = session.commit_crop().unwrap();
        assert_eq!(committed.dimensions(), (20, 40));
        assert!(session.mode().is_normal());
        assert_eq!(session.mapping().native(), vec2(20.0, 40.0));
    }

    #[test]
    fn test_text_placement_needs_mode_and_text() {
        let mut session = session(50, 50);
        session.set_pending_text("hi");
        assert!(session.add_text_at(pos2(5.0, 20.0)).is_none());

        session.toggle_text_mode();
        assert!(session.add_text_at(pos2(5.0, 20.0)).is_some());
        assert!(session.tools().pending_text.is_empty());
        // nothing left to place
        assert!(session.add_text_at(pos2(5.0, 40.0)).is_none());
        assert_eq!(session.overlays().texts().len(), 1);
    }

    #[test]
    fn test_text_size_clamped_to_config() {
        let mut session = session(10, 10);
        assert_eq!(session.set_text_size(2.0), 10.0);
        assert_eq!(session.set_text_size(48.0), 48.0);
        assert_eq!(session.set_text_size(1000.0), 100.0);
    }

    #[test]
    fn test_commit_clears_live_state() {
        let mut session = session(40, 40);
        session.set_transform_field(TransformField::Brightness, 150.0);
        session.toggle_shape_mode(ShapeKind::Rectangle);
        session.add_shape_at(pos2(0.0, 0.0)).unwrap();

        session.apply_resize(20, 20).unwrap();
        assert!(session.transform().is_identity());
        assert!(session.overlays().is_empty());
        assert!(session.mode().is_normal());
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_failed_resize_keeps_state() {
        let mut session = session(40, 40);
        session.set_transform_field(TransformField::Grayscale, 100.0);
        let revision = session.revision();
        assert!(matches!(
            session.apply_resize(0, 10),
            Err(EditorError::InvalidGeometry(_))
        ));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.transform().grayscale, 100.0);
        assert_eq!(session.revision(), revision);
    }

    #[test]
    fn test_events_for_mode_and_commit() {
        let mut session = session(30, 30);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        session.events().subscribe(Box::new(move |event: &EditorEvent| {
            sink.lock().unwrap().push(event.clone());
        }));

        session.toggle_crop_mode();
        session.begin_crop(pos2(0.0, 0.0)).unwrap();
        session.update_crop(pos2(10.0, 10.0)).unwrap();
        session.commit_crop().unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen[0],
            EditorEvent::ModeChanged {
                old: InteractionMode::Normal,
                new: InteractionMode::crop()
            }
        );
        assert!(seen.contains(&EditorEvent::Committed { index: 1, len: 2 }));
        assert_eq!(seen.last(), Some(&EditorEvent::RenderInvalidated));
    }

    #[test]
    fn test_commit_reports_cleared_overlays() {
        let mut session = session(30, 30);
        session.toggle_shape_mode(ShapeKind::Circle);
        session.add_shape_at(pos2(10.0, 10.0)).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        session.events().subscribe(Box::new(move |event: &EditorEvent| {
            sink.lock().unwrap().push(event.clone());
        }));

        session.apply_resize(15, 15).unwrap();
        assert!(session.overlays().is_empty());
        assert!(seen.lock().unwrap().contains(&EditorEvent::OverlaysCleared));

        // nothing left to clear on the next commit
        seen.lock().unwrap().clear();
        session.apply_resize(10, 10).unwrap();
        assert!(!seen.lock().unwrap().contains(&EditorEvent::OverlaysCleared));
    }

    #[test]
    fn test_boundary_undo_keeps_revision() {
        let mut session = session(10, 10);
        let revision = session.revision();
        let current = session.undo();
        assert_eq!(session.revision(), revision);
        assert!(Arc::ptr_eq(&current, session.original()));
        assert_eq!(session.execute(Command::Redo).unwrap(), Outcome::Unchanged);
    }

    #[test]
    fn test_comparison_split() {
        let mut session = session(10, 4);
        session.set_transform_field(TransformField::Grayscale, 100.0);
        let after = session.render();

        let reveal = session.comparison(0.5).unwrap();
        assert_eq!(reveal.pixel(0, 0), session.original().pixel(0, 0));
        assert_eq!(reveal.pixel(4, 3), session.original().pixel(4, 3));
        assert_eq!(reveal.pixel(5, 0), after.pixel(5, 0));
        assert_eq!(session.comparison(0.0).unwrap(), after);
    }

    #[test]
    fn test_load_image_failure_keeps_session() {
        let mut session = session(10, 10);
        session.toggle_crop_mode();
        session.begin_crop(pos2(0.0, 0.0)).unwrap();
        session.update_crop(pos2(5.0, 5.0)).unwrap();
        session.commit_crop().unwrap();

        assert!(matches!(session.load_image(b"garbage"), Err(EditorError::Decode(_))));
        assert_eq!(session.history().len(), 2);
    }
}
