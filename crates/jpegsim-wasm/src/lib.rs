//! jpegsim WASM - WebAssembly bindings for jpegsim
//!
//! This crate exposes the jpegsim-core compression pipeline to
//! JavaScript/TypeScript applications. The host decodes the source image to
//! RGB, passes it in, and displays or saves the returned pixels.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `config` - Compression settings
//! - `compress` - Compression bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsRaster, compress_image } from '@jpegsim/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = new JsRaster(width, height, rgbPixels);
//! const compressed = compress_image(image, 30);
//! console.log(`Compressed ${compressed.width}x${compressed.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod config;
mod logger;
mod types;

// Re-export public types
pub use compress::{compress_image, compress_image_with_config, compress_pixels, quantization_table};
pub use config::JsCompressionConfig;
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Enable debug-level pipeline logging in the browser console
#[wasm_bindgen]
pub fn enable_debug_logging() {
    log::set_max_level(log::LevelFilter::Debug);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
