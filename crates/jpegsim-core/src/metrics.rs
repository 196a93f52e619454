//! Distortion measures for comparing a compressed raster with its source.
//!
//! Typical PSNR values for 8-bit content:
//! - Excellent: > 40 dB
//! - Good: 30-40 dB
//! - Acceptable: 20-30 dB
//! - Poor: < 20 dB

use crate::block::BLOCK_SIZE;
use crate::color::rgb_to_ycbcr;
use crate::error::{CompressError, Result};
use crate::raster::Raster;

fn check_same_shape(a: &Raster, b: &Raster) -> Result<()> {
    a.validate()?;
    b.validate()?;
    if (a.width, a.height) != (b.width, b.height) {
        return Err(CompressError::InvalidInput(format!(
            "raster dimensions differ: {}x{} vs {}x{}",
            a.width, a.height, b.width, b.height
        )));
    }
    Ok(())
}

/// Mean absolute difference over every sample of both rasters.
pub fn mean_absolute_error(a: &Raster, b: &Raster) -> Result<f64> {
    check_same_shape(a, b)?;
    let sum: u64 = a
        .pixels
        .iter()
        .zip(&b.pixels)
        .map(|(&x, &y)| (x as i32 - y as i32).unsigned_abs() as u64)
        .sum();
    Ok(sum as f64 / a.pixels.len() as f64)
}

/// Peak signal-to-noise ratio in dB. Identical rasters give infinity.
pub fn psnr(a: &Raster, b: &Raster) -> Result<f64> {
    check_same_shape(a, b)?;
    let sse: f64 = a
        .pixels
        .iter()
        .zip(&b.pixels)
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum();
    let mse = sse / a.pixels.len() as f64;
    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (255.0 * 255.0 / mse).log10())
}

/// Blocking artifact score of a raster.
///
/// Mean absolute luma step between neighbours that straddle an 8-pixel block
/// boundary minus the mean step between neighbours inside a block. Natural
/// images score close to zero; flattened blocks with visible seams score
/// high. Images with no block boundary score 0.
pub fn blockiness(raster: &Raster) -> Result<f64> {
    raster.validate()?;
    let (w, h) = (raster.width as usize, raster.height as usize);

    let luma: Vec<f64> = raster
        .pixels
        .chunks_exact(3)
        .map(|p| rgb_to_ycbcr(p[0] as f32, p[1] as f32, p[2] as f32).0 as f64)
        .collect();

    let mut boundary = (0.0f64, 0usize);
    let mut interior = (0.0f64, 0usize);
    let mut record = |diff: f64, at_edge: bool| {
        let acc = if at_edge { &mut boundary } else { &mut interior };
        acc.0 += diff;
        acc.1 += 1;
    };

    for y in 0..h {
        for x in 0..w {
            let here = luma[y * w + x];
            if x + 1 < w {
                record((luma[y * w + x + 1] - here).abs(), (x + 1) % BLOCK_SIZE == 0);
            }
            if y + 1 < h {
                record((luma[(y + 1) * w + x] - here).abs(), (y + 1) % BLOCK_SIZE == 0);
            }
        }
    }

    if boundary.1 == 0 {
        return Ok(0.0);
    }
    let boundary_mean = boundary.0 / boundary.1 as f64;
    let interior_mean = if interior.1 == 0 {
        0.0
    } else {
        interior.0 / interior.1 as f64
    };
    Ok(boundary_mean - interior_mean)
}
