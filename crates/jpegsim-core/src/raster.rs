//! Image containers: interleaved RGB rasters and single-channel planes.

use crate::error::{CompressError, Result};

/// Number of interleaved channels in a [`Raster`].
pub const CHANNELS: usize = 3;

/// An 8-bit RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a new Raster with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a Raster from a decoded buffer with an explicit channel count.
    ///
    /// Only 3-channel RGB data is accepted; the shape is validated before the
    /// raster is returned.
    pub fn from_samples(
        width: u32,
        height: u32,
        channels: usize,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        if channels != CHANNELS {
            return Err(CompressError::InvalidInput(format!(
                "expected {} channels, got {}",
                CHANNELS, channels
            )));
        }
        let raster = Self {
            width,
            height,
            pixels,
        };
        raster.validate()?;
        Ok(raster)
    }

    /// Create a raster filled with a single color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgb);
        }
        Self::new(width, height, pixels)
    }

    /// Create a Raster from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for display or encoding by the caller.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Check that the raster has non-zero dimensions and a matching buffer.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CompressError::InvalidInput(format!(
                "raster dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        let expected = self.pixel_count() * CHANNELS;
        if self.pixels.len() != expected {
            return Err(CompressError::InvalidInput(format!(
                "expected {} bytes (width * height * 3), got {}",
                expected,
                self.pixels.len()
            )));
        }
        Ok(())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the RGB triple at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }
}

/// A single-channel grid of `f32` samples.
///
/// Values may leave the 8-bit range while a plane moves through the
/// transform stages; [`Plane::clamp_round`] brings them back.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Plane {
    /// Create a zero-filled plane.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Create a plane where every sample holds `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != width * height {
            return Err(CompressError::InvalidInput(format!(
                "plane buffer holds {} samples, expected {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns (width, height).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.data[y * self.width + x] = value;
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Clamp every sample to [0, 255] and round to the nearest integer.
    pub fn clamp_round(&mut self) {
        for v in &mut self.data {
            *v = v.clamp(0.0, 255.0).round();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let img = Raster::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixel_count(), 5000);
        assert!(img.validate().is_ok());
    }

    #[test]
    fn test_raster_zero_dimensions_invalid() {
        let img = Raster::new(0, 10, vec![]);
        assert!(matches!(img.validate(), Err(CompressError::InvalidInput(_))));

        let img = Raster::new(10, 0, vec![]);
        assert!(matches!(img.validate(), Err(CompressError::InvalidInput(_))));
    }

    #[test]
    fn test_raster_buffer_mismatch_invalid() {
        let img = Raster {
            width: 4,
            height: 4,
            pixels: vec![0u8; 4 * 4 * 3 - 1],
        };
        assert!(matches!(img.validate(), Err(CompressError::InvalidInput(_))));
    }

    #[test]
    fn test_from_samples_rejects_wrong_channel_count() {
        let rgba = vec![0u8; 4 * 4 * 4];
        let result = Raster::from_samples(4, 4, 4, rgba);
        assert!(matches!(result, Err(CompressError::InvalidInput(_))));

        let gray = vec![0u8; 4 * 4];
        assert!(Raster::from_samples(4, 4, 1, gray).is_err());

        let rgb = vec![0u8; 4 * 4 * 3];
        assert!(Raster::from_samples(4, 4, 3, rgb).is_ok());
    }

    #[test]
    fn test_filled_and_pixel() {
        let img = Raster::filled(3, 2, [10, 20, 30]);
        assert_eq!(img.pixels.len(), 18);
        assert_eq!(img.pixel(2, 1), [10, 20, 30]);
    }

    #[test]
    fn test_rgb_image_round_trip() {
        let img = Raster::filled(5, 4, [1, 2, 3]);
        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(rgb.dimensions(), (5, 4));
        let back = Raster::from_rgb_image(rgb);
        assert_eq!(back, img);
    }

    #[test]
    fn test_plane_from_vec_length_checked() {
        assert!(Plane::from_vec(2, 2, vec![0.0; 4]).is_ok());
        assert!(Plane::from_vec(2, 2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn test_plane_clamp_round() {
        let mut plane = Plane::from_vec(4, 1, vec![-3.2, 12.49, 12.5, 300.0]).unwrap();
        plane.clamp_round();
        assert_eq!(plane.as_slice(), &[0.0, 12.0, 13.0, 255.0]);
    }
}
