//! Partitioning of planes into 8×8 blocks.
//!
//! Blocks tile a plane left-to-right, top-to-bottom without overlap. When a
//! dimension is not a multiple of 8, the last row and column of blocks are
//! truncated to the remaining samples instead of being padded.

use crate::raster::Plane;

/// Side length of a full block.
pub const BLOCK_SIZE: usize = 8;

/// Number of samples in a full block.
pub const BLOCK_LEN: usize = BLOCK_SIZE * BLOCK_SIZE;

/// Location and extent of a block inside a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRegion {
    /// Left column of the block.
    pub x: usize,
    /// Top row of the block.
    pub y: usize,
    /// Number of columns (1 to 8).
    pub width: usize,
    /// Number of rows (1 to 8).
    pub height: usize,
}

impl BlockRegion {
    /// True if the block covers a full 8×8 area.
    pub fn is_full(&self) -> bool {
        self.width == BLOCK_SIZE && self.height == BLOCK_SIZE
    }
}

/// Number of blocks along a dimension of `len` samples.
#[inline]
pub fn blocks_along(len: usize) -> usize {
    len.div_ceil(BLOCK_SIZE)
}

/// Compute the block grid for a `width × height` plane in row-major order.
pub fn block_regions(width: usize, height: usize) -> Vec<BlockRegion> {
    let mut regions = Vec::with_capacity(blocks_along(width) * blocks_along(height));
    for y in (0..height).step_by(BLOCK_SIZE) {
        for x in (0..width).step_by(BLOCK_SIZE) {
            regions.push(BlockRegion {
                x,
                y,
                width: BLOCK_SIZE.min(width - x),
                height: BLOCK_SIZE.min(height - y),
            });
        }
    }
    regions
}

/// Samples of one block, stored row-major with a stride equal to its width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    width: usize,
    height: usize,
    values: [f32; BLOCK_LEN],
}

/// Frequency-domain counterpart of a [`Block`]; same shape and ordering.
pub type CoefficientBlock = Block;

impl Block {
    /// Create a zero-filled block of the given extent.
    ///
    /// Extents are clamped to 1..=8, so a zero extent yields a single
    /// row or column. Use [`Block::from_values`] to reject bad extents.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.clamp(1, BLOCK_SIZE),
            height: height.clamp(1, BLOCK_SIZE),
            values: [0.0; BLOCK_LEN],
        }
    }

    /// Create a block from row-major values; `values.len()` must equal
    /// `width * height`.
    pub fn from_values(width: usize, height: usize, values: &[f32]) -> Option<Self> {
        if width == 0 || height == 0 || width > BLOCK_SIZE || height > BLOCK_SIZE {
            return None;
        }
        if values.len() != width * height {
            return None;
        }
        let mut block = Self::new(width, height);
        block.values[..values.len()].copy_from_slice(values);
        Some(block)
    }

    /// Copy the samples covered by `region` out of `plane`.
    pub fn extract(plane: &Plane, region: BlockRegion) -> Self {
        let mut block = Self::new(region.width, region.height);
        for row in 0..region.height {
            for col in 0..region.width {
                block.set(row, col, plane.get(region.x + col, region.y + row));
            }
        }
        block
    }

    /// Write this block back into `plane` at `region`.
    pub fn write_to(&self, plane: &mut Plane, region: BlockRegion) {
        debug_assert_eq!((self.width, self.height), (region.width, region.height));
        for row in 0..self.height {
            for col in 0..self.width {
                plane.set(region.x + col, region.y + row, self.get(row, col));
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.values[row * self.width + col] = value;
    }

    /// Row-major values (`width * height` entries).
    pub fn values(&self) -> &[f32] {
        &self.values[..self.width * self.height]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_exact_multiple() {
        let regions = block_regions(16, 8);
        assert_eq!(regions.len(), 2);
        assert!(regions.iter().all(|r| r.is_full()));
        assert_eq!((regions[1].x, regions[1].y), (8, 0));
    }

    #[test]
    fn test_regions_truncated_edges() {
        let regions = block_regions(10, 10);
        let extents: Vec<(usize, usize)> = regions.iter().map(|r| (r.width, r.height)).collect();
        assert_eq!(extents, vec![(8, 8), (2, 8), (8, 2), (2, 2)]);
    }

    #[test]
    fn test_regions_cover_every_sample_once() {
        for (w, h) in [(1, 1), (7, 9), (10, 10), (17, 3), (24, 16)] {
            let mut hits = vec![0u32; w * h];
            for r in block_regions(w, h) {
                for y in r.y..r.y + r.height {
                    for x in r.x..r.x + r.width {
                        hits[y * w + x] += 1;
                    }
                }
            }
            assert!(hits.iter().all(|&n| n == 1), "{}x{} not tiled exactly", w, h);
        }
    }

    #[test]
    fn test_extract_and_write_back() {
        let data: Vec<f32> = (0..100).map(|v| v as f32).collect();
        let plane = Plane::from_vec(10, 10, data).unwrap();

        let region = block_regions(10, 10)[1];
        let block = Block::extract(&plane, region);
        assert_eq!((block.width(), block.height()), (2, 8));
        assert_eq!(block.get(0, 0), 8.0);
        assert_eq!(block.get(7, 1), 79.0);

        let mut out = Plane::new(10, 10);
        block.write_to(&mut out, region);
        assert_eq!(out.get(9, 7), 79.0);
        assert_eq!(out.get(0, 0), 0.0);
    }

    #[test]
    fn test_from_values_checks_shape() {
        assert!(Block::from_values(2, 2, &[1.0, 2.0, 3.0, 4.0]).is_some());
        assert!(Block::from_values(2, 2, &[1.0, 2.0, 3.0]).is_none());
        assert!(Block::from_values(9, 1, &[0.0; 9]).is_none());
        assert!(Block::from_values(0, 1, &[]).is_none());
    }

    #[test]
    fn test_new_clamps_extent() {
        let block = Block::new(0, 12);
        assert_eq!((block.width(), block.height()), (1, BLOCK_SIZE));
        assert_eq!(block.values().len(), BLOCK_SIZE);
    }
}
