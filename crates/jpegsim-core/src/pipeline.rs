//! The compression pipeline.
//!
//! ## Stage Order
//! 1. RGB → YCbCr
//! 2. Quantization table (built once per call)
//! 3. Luma: per 8×8 block forward DCT, quantize, inverse DCT
//! 4. Chroma: downsample and upsample Cb and Cr
//! 5. Clamp and round all planes to 8-bit values
//! 6. YCbCr → RGB
//!
//! The input raster is never modified; every call builds a new output.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::block::{block_regions, Block, BlockRegion};
use crate::chroma;
use crate::color;
use crate::config::CompressionConfig;
use crate::dct;
use crate::error::Result;
use crate::quant::{self, QuantizationTable};
use crate::raster::{Plane, Raster};

/// Counters describing how much information survived quantization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionStats {
    /// Number of luma blocks processed (including truncated edge blocks).
    pub blocks: usize,
    /// Total number of luma coefficients (equal to the luma sample count).
    pub coefficients: usize,
    /// Luma coefficients that are non-zero after quantization.
    pub retained_coefficients: usize,
}

impl CompressionStats {
    /// Fraction of luma coefficients that survived (0.0 to 1.0).
    pub fn retention_ratio(&self) -> f64 {
        if self.coefficients == 0 {
            return 0.0;
        }
        self.retained_coefficients as f64 / self.coefficients as f64
    }
}

/// A validated configuration together with its quantization table.
///
/// Building a `Compressor` once and reusing it avoids regenerating the table
/// for every image. The table is shared read-only by all blocks.
#[derive(Debug, Clone)]
pub struct Compressor {
    config: CompressionConfig,
    table: QuantizationTable,
}

impl Compressor {
    /// Validate `config` and build its quantization table.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::Config` if the quality is outside `[1, 100]`.
    pub fn new(config: CompressionConfig) -> Result<Self> {
        config.validate()?;
        let table = QuantizationTable::generate(config.quality as u32)?;
        Ok(Self { config, table })
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    pub fn table(&self) -> &QuantizationTable {
        &self.table
    }

    /// Compress a raster, returning a new raster of the same size.
    pub fn compress(&self, raster: &Raster) -> Result<Raster> {
        self.compress_with_stats(raster).map(|(out, _)| out)
    }

    /// Compress a raster and report coefficient retention.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::InvalidInput` for an empty or malformed raster
    /// and `CompressError::ThreadPool` if a worker pool was requested but
    /// could not be created.
    pub fn compress_with_stats(&self, raster: &Raster) -> Result<(Raster, CompressionStats)> {
        debug!(
            "compressing {}x{} raster at quality {} with {} worker(s)",
            raster.width,
            raster.height,
            self.config.quality,
            self.config.effective_workers()
        );

        let (y, cb, cr) = color::to_ycbcr(raster)?;

        let (mut y, stats) = compress_luma(&y, &self.table, self.config.effective_workers())?;
        let mut cb = chroma::resample(&cb);
        let mut cr = chroma::resample(&cr);

        y.clamp_round();
        cb.clamp_round();
        cr.clamp_round();

        let out = color::to_rgb(&y, &cb, &cr)?;

        debug!(
            "compressed {} blocks, retained {}/{} luma coefficients",
            stats.blocks, stats.retained_coefficients, stats.coefficients
        );
        Ok((out, stats))
    }
}

/// Compress `raster` with `config`.
///
/// # Example
///
/// ```ignore
/// use jpegsim_core::{compress, CompressionConfig, Raster};
///
/// let raster = Raster::filled(16, 16, [128, 128, 128]);
/// let out = compress(&raster, &CompressionConfig::new(50)).unwrap();
/// assert_eq!((out.width, out.height), (16, 16));
/// ```
pub fn compress(raster: &Raster, config: &CompressionConfig) -> Result<Raster> {
    Compressor::new(*config)?.compress(raster)
}

/// Compress `raster` with `config` and return retention statistics.
pub fn compress_with_stats(
    raster: &Raster,
    config: &CompressionConfig,
) -> Result<(Raster, CompressionStats)> {
    Compressor::new(*config)?.compress_with_stats(raster)
}

/// Run transform, quantization and inverse transform over one block.
fn process_block(plane: &Plane, region: BlockRegion, table: &QuantizationTable) -> (Block, usize) {
    let block = Block::extract(plane, region);
    let coefficients = quant::quantize(&dct::forward(&block), table);
    let retained = quant::retained_coefficients(&coefficients);
    (dct::inverse(&coefficients), retained)
}

/// Quantize every block of the luma plane into a new plane.
fn compress_luma(
    y: &Plane,
    table: &QuantizationTable,
    workers: usize,
) -> Result<(Plane, CompressionStats)> {
    let regions = block_regions(y.width(), y.height());
    let processed = process_blocks(y, &regions, table, workers)?;

    let mut out = Plane::new(y.width(), y.height());
    let mut stats = CompressionStats {
        blocks: regions.len(),
        coefficients: y.width() * y.height(),
        retained_coefficients: 0,
    };
    for (region, (block, retained)) in regions.iter().zip(processed) {
        block.write_to(&mut out, *region);
        stats.retained_coefficients += retained;
    }
    Ok((out, stats))
}

#[cfg(feature = "parallel")]
fn process_blocks(
    y: &Plane,
    regions: &[BlockRegion],
    table: &QuantizationTable,
    workers: usize,
) -> Result<Vec<(Block, usize)>> {
    use rayon::prelude::*;

    if workers <= 1 {
        return Ok(process_blocks_sequential(y, regions, table));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| crate::error::CompressError::ThreadPool(e.to_string()))?;

    // Collect preserves block order, so the gather is identical to the
    // sequential path.
    Ok(pool.install(|| {
        regions
            .par_iter()
            .map(|&region| process_block(y, region, table))
            .collect()
    }))
}

#[cfg(not(feature = "parallel"))]
fn process_blocks(
    y: &Plane,
    regions: &[BlockRegion],
    table: &QuantizationTable,
    _workers: usize,
) -> Result<Vec<(Block, usize)>> {
    Ok(process_blocks_sequential(y, regions, table))
}

fn process_blocks_sequential(
    y: &Plane,
    regions: &[BlockRegion],
    table: &QuantizationTable,
) -> Vec<(Block, usize)> {
    regions
        .iter()
        .map(|&region| process_block(y, region, table))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn raster_strategy() -> impl Strategy<Value = Raster> {
        (1u32..=20, 1u32..=20).prop_flat_map(|(w, h)| {
            let size = (w * h * 3) as usize;
            prop::collection::vec(any::<u8>(), size..=size)
                .prop_map(move |pixels| Raster::new(w, h, pixels))
        })
    }

    proptest! {
        /// Property: output always has the input's dimensions.
        #[test]
        fn prop_dimensions_preserved(raster in raster_strategy(), quality in 1u8..=100) {
            let out = compress(&raster, &CompressionConfig::new(quality)).unwrap();
            prop_assert_eq!(out.width, raster.width);
            prop_assert_eq!(out.height, raster.height);
            prop_assert_eq!(out.pixels.len(), raster.pixels.len());
        }

        /// Property: same input always produces same output.
        #[test]
        fn prop_deterministic(raster in raster_strategy(), quality in 1u8..=100) {
            let config = CompressionConfig::new(quality);
            let a = compress(&raster, &config).unwrap();
            let b = compress(&raster, &config).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Property: flat gray images tiled by full blocks come back (almost)
        /// untouched at quality 50 and above.
        #[test]
        fn prop_flat_gray_stable(
            (bw, bh) in (1u32..=3, 1u32..=3),
            level in any::<u8>(),
            quality in 50u8..=100,
        ) {
            let raster = Raster::filled(bw * 8, bh * 8, [level, level, level]);
            let out = compress(&raster, &CompressionConfig::new(quality)).unwrap();
            for &v in &out.pixels {
                prop_assert!((v as i32 - level as i32).abs() <= 2);
            }
        }
    }
}
