use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use egui::{Color32, ColorImage, Vec2, vec2};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::sync::Arc;

use crate::error::{EditorError, EditorResult};
use crate::geometry::CropRect;

/// Shared handle to an immutable raster
pub type RasterRef = Arc<Raster>;

/// An immutable RGBA8 pixel grid (unmultiplied alpha, row-major).
///
/// Rasters compare by content, so two independently produced rasters with the
/// same pixels are equal.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    pixels: RgbaImage,
}

// Custom Debug implementation so test failures don't dump the pixel buffer
impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("data_len", &self.pixels.as_raw().len())
            .finish()
    }
}

impl From<RgbaImage> for Raster {
    fn from(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}

/// Resampling filter used by resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResizeFilter {
    fn to_filter(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Lossless formats offered for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Bmp,
    Tiff,
}

impl ExportFormat {
    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Bmp => ImageFormat::Bmp,
            ExportFormat::Tiff => ImageFormat::Tiff,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Bmp => "image/bmp",
            ExportFormat::Tiff => "image/tiff",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Bmp => "bmp",
            ExportFormat::Tiff => "tiff",
        }
    }
}

impl Raster {
    /// A fully transparent raster
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// A raster filled with a single colour
    pub fn from_color(width: u32, height: u32, color: Color32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(color.to_srgba_unmultiplied())),
        }
    }

    /// Wraps raw RGBA8 bytes, checking the buffer length
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> EditorResult<Self> {
        let expected = width as usize * height as usize * 4;
        let actual = data.len();
        RgbaImage::from_raw(width, height, data)
            .map(Self::from)
            .ok_or_else(|| {
                EditorError::InvalidGeometry(format!(
                    "pixel data size mismatch: expected {expected} bytes, got {actual} bytes"
                ))
            })
    }

    /// Decodes any format the `image` crate understands into RGBA8.
    pub fn decode(bytes: &[u8]) -> EditorResult<Self> {
        if bytes.is_empty() {
            return Err(EditorError::Decode("no image data".to_owned()));
        }

        let decoded = image::load_from_memory(bytes).map_err(|err| {
            log::warn!("Failed to decode image: {err}");
            EditorError::Decode(err.to_string())
        })?;

        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(EditorError::Decode("image has no pixels".to_owned()));
        }

        log::debug!("Decoded image: {}x{}", decoded.width(), decoded.height());
        Ok(Self::from(decoded.to_rgba8()))
    }

    /// Decodes a `data:image/...;base64,` URI as produced by a browser file reader.
    pub fn decode_data_uri(uri: &str) -> EditorResult<Self> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| EditorError::Decode("not a data URI".to_owned()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| EditorError::Decode("data URI has no payload".to_owned()))?;

        let mime = header.split(';').next().unwrap_or_default();
        if !mime.starts_with("image/") {
            return Err(EditorError::Decode(format!("unsupported media type {mime:?}")));
        }
        if !header.split(';').any(|param| param == "base64") {
            return Err(EditorError::Decode("data URI is not base64 encoded".to_owned()));
        }

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|err| EditorError::Decode(err.to_string()))?;
        Self::decode(&bytes)
    }

    pub fn encode(&self, format: ExportFormat) -> EditorResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.pixels
            .write_to(&mut cursor, format.image_format())
            .map_err(|err| EditorError::Encode(err.to_string()))?;
        Ok(cursor.into_inner())
    }

    pub fn encode_png(&self) -> EditorResult<Vec<u8>> {
        self.encode(ExportFormat::Png)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Width and height as a vector, for coordinate mapping
    pub fn size(&self) -> Vec2 {
        vec2(self.width() as f32, self.height() as f32)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixels.get_pixel_checked(x, y).map(|px| {
            let [r, g, b, a] = px.0;
            Color32::from_rgba_unmultiplied(r, g, b, a)
        })
    }

    /// Raw RGBA8 samples of the pixel at (x, y)
    pub fn rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|px| px.0)
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    pub fn into_ref(self) -> RasterRef {
        Arc::new(self)
    }

    /// Copies `rect` out of this raster. Parts of the rectangle outside the
    /// raster are left transparent.
    pub fn crop(&self, rect: CropRect) -> Self {
        let mut out = RgbaImage::new(rect.width, rect.height);

        let src_w = i64::from(self.width());
        let src_h = i64::from(self.height());
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.x.saturating_add(i64::from(rect.width)).min(src_w);
        let y1 = rect.y.saturating_add(i64::from(rect.height)).min(src_h);

        if x0 < x1 && y0 < y1 {
            let region = imageops::crop_imm(
                &self.pixels,
                x0 as u32,
                y0 as u32,
                (x1 - x0) as u32,
                (y1 - y0) as u32,
            )
            .to_image();
            imageops::replace(&mut out, &region, x0 - rect.x, y0 - rect.y);
        }

        Self::from(out)
    }

    pub fn resize(&self, width: u32, height: u32, filter: ResizeFilter) -> EditorResult<Self> {
        if width == 0 || height == 0 {
            return Err(EditorError::InvalidGeometry(format!(
                "resize target must be positive, got {width}x{height}"
            )));
        }
        if (width, height) == self.dimensions() {
            return Ok(self.clone());
        }
        Ok(Self::from(imageops::resize(
            &self.pixels,
            width,
            height,
            filter.to_filter(),
        )))
    }

    /// Converts to an egui image for uploading as a texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }
}
