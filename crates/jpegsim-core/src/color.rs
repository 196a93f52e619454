//! RGB ↔ YCbCr conversion (ITU-R BT.601, JFIF full-range convention).
//!
//! The forward transform keeps full `f32` precision so that the only loss in
//! a round trip is the final rounding back to 8-bit samples.

use crate::error::{CompressError, Result};
use crate::raster::{Plane, Raster, CHANNELS};

/// Luma weight of the red channel.
pub const Y_R: f32 = 0.299;
/// Luma weight of the green channel.
pub const Y_G: f32 = 0.587;
/// Luma weight of the blue channel.
pub const Y_B: f32 = 0.114;

/// Offset applied to both chroma channels.
pub const CHROMA_OFFSET: f32 = 128.0;

/// Convert one RGB sample to (Y, Cb, Cr).
#[inline]
pub fn rgb_to_ycbcr(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let y = Y_R * r + Y_G * g + Y_B * b;
    let cb = -0.1687 * r - 0.3313 * g + 0.5 * b + CHROMA_OFFSET;
    let cr = 0.5 * r - 0.4187 * g - 0.0813 * b + CHROMA_OFFSET;
    (y, cb, cr)
}

/// Convert one (Y, Cb, Cr) sample back to clamped, rounded RGB.
#[inline]
pub fn ycbcr_to_rgb(y: f32, cb: f32, cr: f32) -> [u8; 3] {
    let cb = cb - CHROMA_OFFSET;
    let cr = cr - CHROMA_OFFSET;
    let r = y + 1.402 * cr;
    let g = y - 0.344_136 * cb - 0.714_136 * cr;
    let b = y + 1.772 * cb;
    [to_u8(r), to_u8(g), to_u8(b)]
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// Split an RGB raster into Y, Cb and Cr planes.
///
/// # Errors
///
/// Returns `CompressError::InvalidInput` if the raster has a zero dimension
/// or its buffer does not hold exactly three channels per pixel.
pub fn to_ycbcr(raster: &Raster) -> Result<(Plane, Plane, Plane)> {
    raster.validate()?;

    let (w, h) = (raster.width as usize, raster.height as usize);
    let mut y_plane = Plane::new(w, h);
    let mut cb_plane = Plane::new(w, h);
    let mut cr_plane = Plane::new(w, h);

    for (i, chunk) in raster.pixels.chunks_exact(CHANNELS).enumerate() {
        let (y, cb, cr) = rgb_to_ycbcr(chunk[0] as f32, chunk[1] as f32, chunk[2] as f32);
        y_plane.as_mut_slice()[i] = y;
        cb_plane.as_mut_slice()[i] = cb;
        cr_plane.as_mut_slice()[i] = cr;
    }

    Ok((y_plane, cb_plane, cr_plane))
}

/// Recombine Y, Cb and Cr planes into an RGB raster.
///
/// # Errors
///
/// Returns `CompressError::InvalidInput` if the planes are empty or do not
/// share the same dimensions.
pub fn to_rgb(y: &Plane, cb: &Plane, cr: &Plane) -> Result<Raster> {
    let (w, h) = y.dimensions();
    if w == 0 || h == 0 {
        return Err(CompressError::InvalidInput(format!(
            "plane dimensions must be non-zero, got {}x{}",
            w, h
        )));
    }
    if cb.dimensions() != (w, h) || cr.dimensions() != (w, h) {
        return Err(CompressError::InvalidInput(format!(
            "plane dimensions differ: Y {:?}, Cb {:?}, Cr {:?}",
            y.dimensions(),
            cb.dimensions(),
            cr.dimensions()
        )));
    }

    let mut pixels = Vec::with_capacity(w * h * CHANNELS);
    for ((&yv, &cbv), &crv) in y
        .as_slice()
        .iter()
        .zip(cb.as_slice())
        .zip(cr.as_slice())
    {
        pixels.extend_from_slice(&ycbcr_to_rgb(yv, cbv, crv));
    }

    Ok(Raster::new(w as u32, h as u32, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_weights_sum_to_one() {
        assert!((Y_R + Y_G + Y_B - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_gray_maps_to_neutral_chroma() {
        for v in [0.0f32, 64.0, 128.0, 255.0] {
            let (y, cb, cr) = rgb_to_ycbcr(v, v, v);
            assert!((y - v).abs() < 1e-3, "Y for gray {} was {}", v, y);
            assert!((cb - 128.0).abs() < 1e-3);
            assert!((cr - 128.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_primaries() {
        let (y, cb, cr) = rgb_to_ycbcr(255.0, 0.0, 0.0);
        assert!((y - 76.245).abs() < 1e-2);
        assert!((cb - 84.981).abs() < 1e-2);
        assert!((cr - 255.5).abs() < 1e-2);

        assert_eq!(ycbcr_to_rgb(y, cb, cr), [255, 0, 0]);
    }

    #[test]
    fn test_inverse_clamps_out_of_gamut() {
        assert_eq!(ycbcr_to_rgb(255.0, 255.0, 255.0)[0], 255);
        assert_eq!(ycbcr_to_rgb(0.0, 0.0, 0.0)[0], 0);
    }

    #[test]
    fn test_to_ycbcr_plane_shapes() {
        let raster = Raster::filled(7, 3, [10, 200, 30]);
        let (y, cb, cr) = to_ycbcr(&raster).unwrap();
        assert_eq!(y.dimensions(), (7, 3));
        assert_eq!(cb.dimensions(), (7, 3));
        assert_eq!(cr.dimensions(), (7, 3));
    }

    #[test]
    fn test_to_ycbcr_rejects_empty() {
        let raster = Raster::new(0, 0, vec![]);
        assert!(matches!(to_ycbcr(&raster), Err(CompressError::InvalidInput(_))));
    }

    #[test]
    fn test_to_rgb_rejects_mismatched_planes() {
        let y = Plane::new(4, 4);
        let cb = Plane::new(4, 4);
        let cr = Plane::new(2, 2);
        assert!(matches!(to_rgb(&y, &cb, &cr), Err(CompressError::InvalidInput(_))));
    }

    #[test]
    fn test_round_trip_every_corner_of_cube() {
        let mut pixels = Vec::new();
        for r in [0u8, 255] {
            for g in [0u8, 255] {
                for b in [0u8, 255] {
                    pixels.extend_from_slice(&[r, g, b]);
                }
            }
        }
        let raster = Raster::new(8, 1, pixels);
        let (y, cb, cr) = to_ycbcr(&raster).unwrap();
        let back = to_rgb(&y, &cb, &cr).unwrap();
        for (a, b) in raster.pixels.iter().zip(&back.pixels) {
            assert!((*a as i32 - *b as i32).abs() <= 1, "{} vs {}", a, b);
        }
    }
}
