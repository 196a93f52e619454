//! Quality-driven quantization tables and coefficient quantization.
//!
//! The table is the JPEG baseline luminance matrix (ITU-T T.81 Annex K)
//! scaled by the IJG quality formula:
//!
//! ```text
//! scale = 5000 / q        if q < 50
//!       = 200 - 2q        otherwise
//! step  = clamp(round((base * scale + 50) / 100), 1, 255)
//! ```
//!
//! `round` resolves exact halves to the even neighbour, so at quality 50 the
//! odd baseline entries move up by one while the even ones stay put.

use serde::{Deserialize, Serialize};

use crate::block::{CoefficientBlock, BLOCK_LEN, BLOCK_SIZE};
use crate::error::{CompressError, Result};

/// Lowest accepted quality.
pub const MIN_QUALITY: u8 = 1;
/// Highest accepted quality.
pub const MAX_QUALITY: u8 = 100;

/// Standard JPEG luminance quantization table (quality 50), row-major.
pub static BASELINE_LUMINANCE: [u16; BLOCK_LEN] = [
    16, 11, 10, 16, 24, 40, 51, 61,
    12, 12, 14, 19, 26, 58, 60, 55,
    14, 13, 16, 24, 40, 57, 69, 56,
    14, 17, 22, 29, 51, 87, 80, 62,
    18, 22, 37, 56, 68, 109, 103, 77,
    24, 35, 55, 64, 81, 104, 113, 92,
    49, 64, 78, 87, 103, 121, 120, 101,
    72, 92, 95, 98, 112, 100, 103, 99,
];

/// Reject a quality value outside `[1, 100]`.
pub fn validate_quality(quality: u32) -> Result<u8> {
    if quality < MIN_QUALITY as u32 || quality > MAX_QUALITY as u32 {
        return Err(CompressError::Config { quality });
    }
    Ok(quality as u8)
}

/// An 8×8 matrix of quantization step sizes in [1, 255].
///
/// Tables are immutable once generated and can be shared freely between
/// blocks and threads. Deserialized tables are checked against the same
/// shape and range as generated ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr", into = "TableRepr")]
pub struct QuantizationTable {
    quality: u8,
    steps: [u16; BLOCK_LEN],
}

/// Serialized form; serde has no impls for 64-element arrays.
#[derive(Serialize, Deserialize)]
struct TableRepr {
    quality: u32,
    steps: Vec<u16>,
}

impl TryFrom<TableRepr> for QuantizationTable {
    type Error = CompressError;

    fn try_from(repr: TableRepr) -> Result<Self> {
        let quality = validate_quality(repr.quality)?;
        let steps: [u16; BLOCK_LEN] = repr.steps.as_slice().try_into().map_err(|_| {
            CompressError::InvalidInput(format!(
                "quantization table has {} steps, expected {}",
                repr.steps.len(),
                BLOCK_LEN
            ))
        })?;
        if let Some(bad) = steps.iter().find(|&&s| !(1..=255).contains(&s)) {
            return Err(CompressError::InvalidInput(format!(
                "quantization step {bad} outside [1, 255]"
            )));
        }
        Ok(Self { quality, steps })
    }
}

impl From<QuantizationTable> for TableRepr {
    fn from(table: QuantizationTable) -> Self {
        Self {
            quality: table.quality as u32,
            steps: table.steps.to_vec(),
        }
    }
}

impl QuantizationTable {
    /// Build the table for a quality factor.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::Config` if `quality` is outside `[1, 100]`.
    pub fn generate(quality: u32) -> Result<Self> {
        let quality = validate_quality(quality)?;

        let q = quality as f64;
        let scale = if quality < 50 { 5000.0 / q } else { 200.0 - 2.0 * q };

        let steps = BASELINE_LUMINANCE.map(|base| {
            let step = ((base as f64 * scale + 50.0) / 100.0).round_ties_even();
            step.clamp(1.0, 255.0) as u16
        });

        Ok(Self { quality, steps })
    }

    /// Quality the table was generated for.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Step size at (row, col).
    #[inline]
    pub fn step(&self, row: usize, col: usize) -> u16 {
        self.steps[row * BLOCK_SIZE + col]
    }

    /// All 64 step sizes in row-major order.
    pub fn steps(&self) -> &[u16] {
        &self.steps
    }

    /// Mean step size, a rough measure of how coarse the table is.
    pub fn mean_step(&self) -> f64 {
        self.steps.iter().map(|&s| s as f64).sum::<f64>() / BLOCK_LEN as f64
    }
}

/// Snap each coefficient to the nearest multiple of its step size (ties to even).
///
/// Truncated blocks use the top-left `height × width` corner of the table.
/// The result is already "dequantized": it holds `round(c / step) * step`
/// and is fed straight to the inverse transform.
pub fn quantize(coefficients: &CoefficientBlock, table: &QuantizationTable) -> CoefficientBlock {
    let mut out = *coefficients;
    for row in 0..coefficients.height() {
        for col in 0..coefficients.width() {
            let step = table.step(row, col) as f32;
            let snapped = (coefficients.get(row, col) / step).round_ties_even() * step;
            out.set(row, col, snapped);
        }
    }
    out
}

/// Count coefficients that survived quantization (non-zero entries).
pub fn retained_coefficients(coefficients: &CoefficientBlock) -> usize {
    coefficients.values().iter().filter(|c| **c != 0.0).count()
}
