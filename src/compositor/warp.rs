use image::RgbaImage;

use crate::transform::Transform;

// Source coordinates this close to a pixel centre are snapped onto it, so
// quarter turns and flips resample without blur.
const SNAP_EPSILON: f64 = 1e-6;

/// Rotates and flips `src` about its centre into a canvas of the same size.
///
/// Matches a 2D canvas `translate(c) rotate(r) scale(fx, fy) translate(-c)`:
/// rotation is clockwise on screen, corners that leave the canvas are
/// clipped, and uncovered pixels stay transparent.
pub(crate) fn warp(src: &RgbaImage, transform: &Transform) -> RgbaImage {
    let (width, height) = src.dimensions();
    let mut dst = RgbaImage::new(width, height);

    let cx = f64::from(width) * 0.5;
    let cy = f64::from(height) * 0.5;
    let (sin, cos) = f64::from(transform.rotation).to_radians().sin_cos();
    let flip_x = if transform.flip_horizontal { -1.0 } else { 1.0 };
    let flip_y = if transform.flip_vertical { -1.0 } else { 1.0 };

    // Inverse mapping: for each destination pixel centre, undo the rotation
    // and then the flip to find where it samples from.
    for (dx, dy, pixel) in dst.enumerate_pixels_mut() {
        let u = f64::from(dx) + 0.5 - cx;
        let v = f64::from(dy) + 0.5 - cy;
        let ru = cos * u + sin * v;
        let rv = -sin * u + cos * v;
        let src_x = snap(ru * flip_x + cx - 0.5);
        let src_y = snap(rv * flip_y + cy - 0.5);
        pixel.0 = bilinear_sample(src, src_x, src_y);
    }

    dst
}

fn snap(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < SNAP_EPSILON {
        rounded
    } else {
        value
    }
}

/// Bilinear interpolation; samples outside the image are transparent.
fn bilinear_sample(img: &RgbaImage, x: f64, y: f64) -> [u8; 4] {
    let w = i64::from(img.width());
    let h = i64::from(img.height());
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    if x0 < -1 || y0 < -1 || x0 >= w || y0 >= h {
        return [0; 4];
    }
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let sample = |sx: i64, sy: i64| -> [f64; 4] {
        if sx < 0 || sy < 0 || sx >= w || sy >= h {
            [0.0; 4]
        } else {
            let p = img.get_pixel(sx as u32, sy as u32).0;
            [f64::from(p[0]), f64::from(p[1]), f64::from(p[2]), f64::from(p[3])]
        }
    };

    let tl = sample(x0, y0);
    let tr = sample(x0 + 1, y0);
    let bl = sample(x0, y0 + 1);
    let br = sample(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = tl[c] + (tr[c] - tl[c]) * fx;
        let bottom = bl[c] + (br[c] - bl[c]) * fx;
        out[c] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, imageops};

    fn numbered(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, (x * 7 + y) as u8, 255]))
    }

    fn rotated(degrees: f32) -> Transform {
        Transform {
            rotation: degrees,
            ..Transform::identity()
        }
    }

    #[test]
    fn test_zero_rotation_is_copy() {
        let src = numbered(9, 6);
        assert_eq!(warp(&src, &Transform::identity()), src);
    }

    #[test]
    fn test_quarter_turns_match_imageops() {
        let src = numbered(12, 12);
        assert_eq!(warp(&src, &rotated(90.0)), imageops::rotate90(&src));
        assert_eq!(warp(&src, &rotated(180.0)), imageops::rotate180(&src));
        assert_eq!(warp(&src, &rotated(270.0)), imageops::rotate270(&src));
    }

    #[test]
    fn test_flips_match_imageops() {
        let src = numbered(8, 5);
        let horizontal = Transform {
            flip_horizontal: true,
            ..Transform::identity()
        };
        let vertical = Transform {
            flip_vertical: true,
            ..Transform::identity()
        };
        assert_eq!(warp(&src, &horizontal), imageops::flip_horizontal(&src));
        assert_eq!(warp(&src, &vertical), imageops::flip_vertical(&src));
    }

    #[test]
    fn test_rotating_non_square_clips_to_canvas() {
        let src = RgbaImage::from_pixel(20, 4, Rgba([255, 0, 0, 255]));
        let out = warp(&src, &rotated(90.0));
        assert_eq!(out.dimensions(), (20, 4));
        // The far left column is no longer covered by the rotated strip
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.get_pixel(10, 2).0, [255, 0, 0, 255]);
    }
}
