//! jpegsim Core - JPEG-style lossy compression simulator
//!
//! This crate reproduces the lossy stages of a baseline JPEG encoder on an
//! in-memory RGB raster and returns the reconstructed raster: luma is
//! quantized block by block in the DCT domain and chroma is subsampled.
//! No entropy coding or file format is involved; decoding inputs and
//! persisting outputs are left to the caller.
//!
//! # Module Structure
//!
//! - `raster` - RGB rasters and single-channel planes
//! - `color` - RGB ↔ YCbCr conversion
//! - `block` - 8×8 block partitioning
//! - `dct` - forward/inverse block transform
//! - `quant` - quantization tables and coefficient quantization
//! - `chroma` - chroma subsampling emulation
//! - `pipeline` - end-to-end compression
//! - `metrics` - distortion measures for evaluating output

pub mod block;
pub mod chroma;
pub mod color;
pub mod config;
pub mod dct;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod quant;
pub mod raster;

pub use config::CompressionConfig;
pub use error::{CompressError, Result};
pub use pipeline::{compress, compress_with_stats, CompressionStats, Compressor};
pub use quant::QuantizationTable;
pub use raster::{Plane, Raster};
