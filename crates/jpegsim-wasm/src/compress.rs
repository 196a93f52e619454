//! Compression WASM bindings.
//!
//! This module exposes the jpegsim-core pipeline to JavaScript. Decoding the
//! source file and displaying or saving the result stay on the JS side.
//!
//! # Functions
//!
//! - [`compress_image`] - Compress a JsRaster at a given quality
//! - [`compress_image_with_config`] - Compress using a settings object
//! - [`compress_pixels`] - Compress raw RGB pixel data
//! - [`quantization_table`] - Inspect the luma table for a quality
//!
//! # Example
//!
//! ```typescript
//! import { JsRaster, compress_image } from '@jpegsim/wasm';
//!
//! const source = new JsRaster(width, height, rgbPixels);
//! const compressed = compress_image(source, 25);
//! ctx.putImageData(toImageData(compressed.pixels(), width, height), 0, 0);
//! ```

use crate::config::JsCompressionConfig;
use crate::types::JsRaster;
use jpegsim_core::quant::validate_quality;
use jpegsim_core::{CompressionConfig, Compressor, QuantizationTable, Raster};
use wasm_bindgen::prelude::*;

fn to_js_error(e: jpegsim_core::CompressError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Range-check a JS quality before narrowing it.
fn config_for(quality: u32) -> jpegsim_core::Result<CompressionConfig> {
    validate_quality(quality).map(CompressionConfig::new)
}

/// Compress an image at the given quality.
///
/// # Arguments
///
/// * `image` - Source image (RGB, 3 bytes per pixel)
/// * `quality` - Quality factor (1-100, lower is lossier); any other number is rejected
///
/// # Returns
///
/// A new `JsRaster` with the same dimensions as the input.
///
/// # Errors
///
/// Returns an error if:
/// - Quality is outside 1-100
/// - Width or height is zero
/// - The pixel data length doesn't match width * height * 3
#[wasm_bindgen]
pub fn compress_image(image: &JsRaster, quality: u32) -> Result<JsRaster, JsValue> {
    let config = config_for(quality).map_err(to_js_error)?;
    let out = jpegsim_core::compress(&image.to_raster(), &config).map_err(to_js_error)?;
    Ok(JsRaster::from_raster(out))
}

/// Compress an image using a `JsCompressionConfig`.
#[wasm_bindgen]
pub fn compress_image_with_config(
    image: &JsRaster,
    config: &JsCompressionConfig,
) -> Result<JsRaster, JsValue> {
    let compressor = config
        .to_config()
        .and_then(Compressor::new)
        .map_err(to_js_error)?;
    let out = compressor
        .compress(&image.to_raster())
        .map_err(to_js_error)?;
    Ok(JsRaster::from_raster(out))
}

/// Compress raw RGB pixel data and return the reconstructed pixels.
///
/// # Example
///
/// ```typescript
/// const pixels = new Uint8Array(64 * 64 * 3).fill(128);
/// const out = compress_pixels(pixels, 64, 64, 50);
/// ```
#[wasm_bindgen]
pub fn compress_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u32,
) -> Result<Vec<u8>, JsValue> {
    let config = config_for(quality).map_err(to_js_error)?;
    let raster = Raster::from_samples(width, height, 3, pixels.to_vec()).map_err(to_js_error)?;
    let out = jpegsim_core::compress(&raster, &config).map_err(to_js_error)?;
    Ok(out.pixels)
}

/// Return the 64 luma step sizes (row-major) used at `quality`.
#[wasm_bindgen]
pub fn quantization_table(quality: u32) -> Result<Vec<u16>, JsValue> {
    let table = QuantizationTable::generate(quality).map_err(to_js_error)?;
    Ok(table.steps().to_vec())
}

/// Tests for compress bindings.
///
/// Note: Most binding functions return `Result<T, JsValue>`, which only works
/// on wasm32 targets. For comprehensive pipeline testing, see the tests in
/// `jpegsim_core::pipeline`.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_through_wrapper_types() {
        let img = JsRaster::new(16, 16, vec![128u8; 16 * 16 * 3]);
        let config = JsCompressionConfig::new(50);

        let out = Compressor::new(config.to_config().unwrap())
            .unwrap()
            .compress(&img.to_raster())
            .unwrap();
        let js = JsRaster::from_raster(out);

        assert_eq!(js.width(), 16);
        assert_eq!(js.height(), 16);
        assert!(js.pixels().iter().all(|&v| (v as i32 - 128).abs() <= 2));
    }

    #[test]
    fn test_config_for_rejects_values_past_u8() {
        for quality in [0, 101, 256, 300] {
            assert_eq!(
                config_for(quality),
                Err(jpegsim_core::CompressError::Config { quality })
            );
        }
        assert_eq!(config_for(100).unwrap().quality, 100);
    }
}
