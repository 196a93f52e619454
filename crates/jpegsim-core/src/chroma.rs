//! Chroma subsampling emulation.
//!
//! A chroma plane is shrunk to half resolution and stretched back with
//! bilinear interpolation. The output keeps the input's dimensions, but the
//! detail above the half-resolution Nyquist limit is gone, which is what a
//! 4:2:0 encoder loses.
//!
//! # Sampling
//!
//! Destination sample `d` maps to source position `(d + 0.5) * scale - 0.5`,
//! so pixel centres line up between the two grids. Positions outside the
//! plane are clamped to the edge. For an exact 2× reduction this averages
//! each 2×2 neighbourhood.

use crate::raster::Plane;

/// Size of the half-resolution plane for a `width × height` chroma plane.
///
/// Dimensions of 1 stay at 1.
pub fn subsampled_dimensions(width: usize, height: usize) -> (usize, usize) {
    ((width / 2).max(1), (height / 2).max(1))
}

/// Downsample a plane by 2 in both dimensions.
pub fn downsample(plane: &Plane) -> Plane {
    let (w, h) = subsampled_dimensions(plane.width(), plane.height());
    resize_bilinear(plane, w, h)
}

/// Upsample a plane back to `width × height`.
pub fn upsample(plane: &Plane, width: usize, height: usize) -> Plane {
    resize_bilinear(plane, width, height)
}

/// Downsample then upsample, returning a plane of the original size.
pub fn resample(plane: &Plane) -> Plane {
    let small = downsample(plane);
    upsample(&small, plane.width(), plane.height())
}

/// Resize a plane with bilinear interpolation.
///
/// Returns an empty plane if either target dimension or the source is empty.
pub fn resize_bilinear(plane: &Plane, width: usize, height: usize) -> Plane {
    let (src_w, src_h) = plane.dimensions();
    if width == 0 || height == 0 || src_w == 0 || src_h == 0 {
        return Plane::new(width, height);
    }

    // Fast path: nothing to interpolate
    if (src_w, src_h) == (width, height) {
        return plane.clone();
    }

    let cols = axis_taps(src_w, width);
    let rows = axis_taps(src_h, height);

    let mut out = Plane::new(width, height);
    for (dy, &(y0, y1, fy)) in rows.iter().enumerate() {
        for (dx, &(x0, x1, fx)) in cols.iter().enumerate() {
            let p00 = plane.get(x0, y0);
            let p10 = plane.get(x1, y0);
            let p01 = plane.get(x0, y1);
            let p11 = plane.get(x1, y1);

            let v = p00 * (1.0 - fx) * (1.0 - fy)
                + p10 * fx * (1.0 - fy)
                + p01 * (1.0 - fx) * fy
                + p11 * fx * fy;
            out.set(dx, dy, v);
        }
    }
    out
}

/// For each destination index, the two source indices and the weight of the
/// second one.
fn axis_taps(src_len: usize, dst_len: usize) -> Vec<(usize, usize, f32)> {
    let scale = src_len as f64 / dst_len as f64;
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let pos = ((d as f64 + 0.5) * scale - 0.5).max(0.0);
            let i0 = (pos.floor() as usize).min(last);
            let i1 = (i0 + 1).min(last);
            let frac = if i0 == last { 0.0 } else { (pos - i0 as f64) as f32 };
            (i0, i1, frac)
        })
        .collect()
}
