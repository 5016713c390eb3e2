use base64::Engine;
use egui::pos2;
use pixelgate::{
    AuthenticatedSession, CropRect, EditorConfig, EditorError, EditorEvent, EditorSession, ExportFormat,
    Raster, ShapeKind, Transform, TransformField,
};
use std::sync::{Arc, Mutex};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Asymmetric test image so rotations and crops are distinguishable
fn photo(width: u32, height: u32) -> Raster {
    Raster::from(image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, ((x * y) % 251) as u8, 255])
    }))
}

fn open(width: u32, height: u32) -> EditorSession {
    init();
    let bytes = photo(width, height).encode_png().unwrap();
    EditorSession::open(&true, &bytes, EditorConfig::default()).unwrap()
}

fn crop(session: &mut EditorSession, from: (f32, f32), to: (f32, f32)) -> Result<pixelgate::RasterRef, EditorError> {
    if !session.mode().is_crop_selecting() {
        session.toggle_crop_mode();
    }
    session.begin_crop(pos2(from.0, from.1))?;
    session.update_crop(pos2(to.0, to.1))?;
    session.commit_crop()
}

#[test]
fn test_crop_applies_to_rotated_render() {
    let mut session = open(100, 100);
    session.set_transform_field(TransformField::Rotation, 90.0);
    let rotated = session.render();

    let committed = crop(&mut session, (10.0, 10.0), (60.0, 60.0)).unwrap();
    let rect = CropRect { x: 10, y: 10, width: 50, height: 50 };

    assert_eq!(committed.dimensions(), (50, 50));
    assert_eq!(*committed, rotated.crop(rect));
    assert_ne!(*committed, session.original().crop(rect));

    // rotation is baked in, so the live transform is back at identity
    assert!(session.transform().is_identity());
    assert_eq!(session.render(), *committed);
}

#[test]
fn test_crop_direction_does_not_matter() {
    let mut a = open(40, 40);
    let mut b = open(40, 40);
    let first = crop(&mut a, (30.0, 5.0), (10.0, 25.0)).unwrap();
    let second = crop(&mut b, (10.0, 25.0), (30.0, 5.0)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.dimensions(), (20, 20));
}

#[test]
fn test_degenerate_crop_is_rejected() {
    let mut session = open(50, 50);
    let result = crop(&mut session, (20.0, 20.0), (20.0, 20.0));
    assert!(matches!(result, Err(EditorError::InvalidGeometry(_))));
    assert_eq!(session.history().len(), 1);

    // a zero-height sliver is just as degenerate
    let result = crop(&mut session, (5.0, 20.0), (45.0, 20.0));
    assert!(matches!(result, Err(EditorError::InvalidGeometry(_))));
    assert_eq!(session.history().len(), 1);
    assert!(session.mode().is_crop_selecting());
}

#[test]
fn test_far_corner_is_clipped_to_image() {
    let mut session = open(100, 100);
    let before = session.render();

    let committed = crop(&mut session, (10.0, 10.0), (1e10, 1e10)).unwrap();
    assert_eq!(committed.dimensions(), (90, 90));
    assert_eq!(*committed, before.crop(CropRect { x: 10, y: 10, width: 90, height: 90 }));
    assert_eq!(session.history().len(), 2);

    // both corners far out on opposite sides select the whole image
    let committed = crop(&mut session, (-1e12, -1e12), (1e12, 1e12)).unwrap();
    assert_eq!(committed.dimensions(), (90, 90));
}

#[test]
fn test_off_canvas_selection_is_rejected() {
    let mut session = open(100, 100);
    let result = crop(&mut session, (200.0, 200.0), (300.0, 300.0));
    assert!(matches!(result, Err(EditorError::InvalidGeometry(_))));
    assert_eq!(session.crop_rect(), None);

    let result = crop(&mut session, (-50.0, 10.0), (0.0, 90.0));
    assert!(matches!(result, Err(EditorError::InvalidGeometry(_))));
    assert_eq!(session.history().len(), 1);
    assert!(session.mode().is_crop_selecting());
}

#[test]
fn test_resize_round_trip_dimensions() {
    let mut session = open(120, 90);
    session.apply_resize(800, 600).unwrap();
    assert_eq!(session.current().dimensions(), (800, 600));

    let back = session.apply_resize(120, 90).unwrap();
    assert_eq!(back.dimensions(), session.original().dimensions());
    assert_eq!(session.history().len(), 3);
}

#[test]
fn test_resize_ignores_aspect_ratio() {
    let mut session = open(100, 50);
    let height = pixelgate::geometry::height_for_width(session.current().size(), 40);
    assert_eq!(height, 20);

    let stretched = session.apply_resize(40, 40).unwrap();
    assert_eq!(stretched.dimensions(), (40, 40));
}

#[test]
fn test_reset_from_any_state() {
    let mut session = open(60, 40);
    crop(&mut session, (0.0, 0.0), (30.0, 30.0)).unwrap();
    session.apply_resize(10, 10).unwrap();
    session.undo();
    session.set_transform_field(TransformField::Contrast, 180.0);
    session.toggle_shape_mode(ShapeKind::Circle);
    session.add_shape_at(pos2(1.0, 1.0)).unwrap();

    session.reset();
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().cursor(), 0);
    assert!(session.overlays().is_empty());
    assert_eq!(*session.transform(), Transform::identity());
    assert!(session.mode().is_normal());
    assert_eq!(session.render(), **session.original());
}

#[test]
fn test_undo_keeps_live_state_by_default() {
    let mut session = open(40, 40);
    crop(&mut session, (0.0, 0.0), (20.0, 20.0)).unwrap();
    session.toggle_shape_mode(ShapeKind::Rectangle);
    session.add_shape_at(pos2(2.0, 2.0)).unwrap();
    session.set_transform_field(TransformField::Saturation, 0.0);

    let current = session.undo();
    assert_eq!(current.dimensions(), (40, 40));
    assert_eq!(session.overlays().len(), 1);
    assert_eq!(session.transform().saturation, 0.0);

    let current = session.redo();
    assert_eq!(current.dimensions(), (20, 20));
    assert_eq!(session.overlays().len(), 1);
}

#[test]
fn test_undo_can_restore_live_state() {
    init();
    let config = EditorConfig::from_json_str(r#"{ "history": { "undo_restores_live_state": true } }"#).unwrap();
    let mut session = EditorSession::with_raster(&true, photo(40, 40), config).unwrap();
    crop(&mut session, (0.0, 0.0), (20.0, 20.0)).unwrap();
    session.toggle_shape_mode(ShapeKind::Rectangle);
    session.add_shape_at(pos2(2.0, 2.0)).unwrap();
    session.set_transform_field(TransformField::Saturation, 0.0);

    session.undo();
    assert!(session.overlays().is_empty());
    assert!(session.transform().is_identity());
    assert!(session.can_redo());
}

#[test]
fn test_export_is_lossless() {
    let mut session = open(32, 32);
    session.set_transform_field(TransformField::Brightness, 120.0);
    session.toggle_text_mode();
    session.set_pending_text("ok");
    session.add_text_at(pos2(2.0, 20.0)).unwrap();

    let png = session.export().unwrap();
    assert_eq!(Raster::decode(&png).unwrap(), session.render());
    assert_eq!(session.export_file_name(), "edited-image.png");

    let bmp = session.export_as(ExportFormat::Bmp).unwrap();
    assert_eq!(Raster::decode(&bmp).unwrap().dimensions(), (32, 32));
}

#[test]
fn test_events_follow_the_edit() {
    let mut session = open(20, 20);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    session.events().subscribe(Box::new(move |event: &EditorEvent| {
        sink.lock().unwrap().push(event.clone());
    }));

    session.apply_resize(10, 10).unwrap();
    session.undo();
    session.reset();
    let bytes = session.export().unwrap();

    let seen = seen.lock().unwrap();
    assert!(seen.contains(&EditorEvent::Committed { index: 1, len: 2 }));
    assert!(seen.contains(&EditorEvent::HistoryMoved { index: 0 }));
    assert!(seen.contains(&EditorEvent::SessionReset));
    assert_eq!(seen.last(), Some(&EditorEvent::Exported { bytes: bytes.len() }));
}

#[test]
fn test_gate_is_required() {
    init();
    let bytes = photo(8, 8).encode_png().unwrap();
    assert!(matches!(
        EditorSession::open(&false, &bytes, EditorConfig::default()),
        Err(EditorError::Unauthenticated)
    ));

    let expired = AuthenticatedSession::new("user@example.com", "token", 1);
    assert!(matches!(
        EditorSession::open(&expired, &bytes, EditorConfig::default()),
        Err(EditorError::Unauthenticated)
    ));

    let fresh = AuthenticatedSession::issued_now("user@example.com", "token");
    assert!(EditorSession::open(&fresh, &bytes, EditorConfig::default()).is_ok());
}

#[test]
fn test_bad_uploads() {
    init();
    assert!(matches!(
        EditorSession::open(&true, b"definitely not an image", EditorConfig::default()),
        Err(EditorError::Decode(_))
    ));
    assert!(matches!(
        EditorSession::open(&true, &[], EditorConfig::default()),
        Err(EditorError::Decode(_))
    ));
    assert!(matches!(
        EditorSession::open_data_uri(&true, "data:text/plain;base64,aGVsbG8=", EditorConfig::default()),
        Err(EditorError::Decode(_))
    ));
}

#[test]
fn test_open_data_uri() {
    init();
    let source = photo(12, 9);
    let payload = base64::engine::general_purpose::STANDARD.encode(source.encode_png().unwrap());
    let uri = format!("data:image/png;base64,{payload}");

    let session = EditorSession::open_data_uri(&true, &uri, EditorConfig::default()).unwrap();
    assert_eq!(**session.original(), source);
}

#[test]
fn test_load_image_starts_over() {
    let mut session = open(30, 30);
    session.apply_resize(15, 15).unwrap();
    session.set_transform_field(TransformField::Rotation, 45.0);

    let next = photo(7, 5).encode_png().unwrap();
    session.load_image(&next).unwrap();
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.current().dimensions(), (7, 5));
    assert!(session.transform().is_identity());
}

#[test]
fn test_comparison_reveals_original() {
    let mut session = open(40, 20);
    session.set_transform_field(TransformField::Grayscale, 100.0);
    session.apply_resize(20, 10).unwrap();

    let after = session.render();
    let reveal = session.comparison(0.25).unwrap();
    assert_eq!(reveal.dimensions(), (20, 10));

    let before = session
        .original()
        .resize(20, 10, session.config().resize.filter)
        .unwrap();
    assert_eq!(reveal.pixel(0, 5), before.pixel(0, 5));
    assert_eq!(reveal.pixel(19, 5), after.pixel(19, 5));

    // split is clamped
    assert_eq!(session.comparison(7.0).unwrap(), before);
    assert_eq!(session.comparison(-3.0).unwrap(), after);
}
