//! Forward and inverse 2-D discrete cosine transform with level shift.
//!
//! Both directions use the orthonormal DCT-II / DCT-III pair, so the inverse
//! is the transpose of the forward basis and a round trip is exact up to
//! floating-point rounding. For a full 8×8 block the orthonormal scaling is
//! identical to the JPEG convention (`C(0) = 1/√8`, `C(u>0) = 1/2`).
//!
//! Truncated boundary blocks are transformed at their true extent: a 2×8
//! block uses a 2-point transform along its rows and an 8-point transform
//! along its columns.

use std::sync::OnceLock;

use crate::block::{Block, CoefficientBlock, BLOCK_SIZE};

/// Value subtracted from every sample before the forward transform.
pub const LEVEL_SHIFT: f32 = 128.0;

/// `BASIS[n - 1][k][x]` is the orthonormal N-point DCT-II basis value
/// `α(k) · cos(π (2x + 1) k / 2N)`.
type Basis = [[[f64; BLOCK_SIZE]; BLOCK_SIZE]; BLOCK_SIZE];

static BASIS: OnceLock<Basis> = OnceLock::new();

fn basis() -> &'static Basis {
    BASIS.get_or_init(|| {
        let mut table = [[[0.0f64; BLOCK_SIZE]; BLOCK_SIZE]; BLOCK_SIZE];
        for n in 1..=BLOCK_SIZE {
            let nf = n as f64;
            for k in 0..n {
                let alpha = if k == 0 {
                    (1.0 / nf).sqrt()
                } else {
                    (2.0 / nf).sqrt()
                };
                for x in 0..n {
                    let angle = std::f64::consts::PI * (2 * x + 1) as f64 * k as f64 / (2.0 * nf);
                    table[n - 1][k][x] = alpha * angle.cos();
                }
            }
        }
        table
    })
}

/// Level-shift a spatial block and transform it into frequency coefficients.
///
/// Coefficients are returned in the same row-major shape as the input; entry
/// `(0, 0)` is the DC term.
pub fn forward(block: &Block) -> CoefficientBlock {
    let (w, h) = (block.width(), block.height());
    let row_basis = &basis()[w - 1];
    let col_basis = &basis()[h - 1];

    // Rows: temp[r][u] = Σx (s[r][x] - 128) · C_w[u][x]
    let mut temp = [[0.0f64; BLOCK_SIZE]; BLOCK_SIZE];
    for r in 0..h {
        for u in 0..w {
            let mut sum = 0.0;
            for x in 0..w {
                sum += (block.get(r, x) - LEVEL_SHIFT) as f64 * row_basis[u][x];
            }
            temp[r][u] = sum;
        }
    }

    // Columns: out[v][u] = Σy temp[y][u] · C_h[v][y]
    let mut out = Block::new(w, h);
    for u in 0..w {
        for v in 0..h {
            let mut sum = 0.0;
            for y in 0..h {
                sum += temp[y][u] * col_basis[v][y];
            }
            out.set(v, u, sum as f32);
        }
    }
    out
}

/// Transform coefficients back to spatial samples and undo the level shift.
pub fn inverse(coefficients: &CoefficientBlock) -> Block {
    let (w, h) = (coefficients.width(), coefficients.height());
    let row_basis = &basis()[w - 1];
    let col_basis = &basis()[h - 1];

    // Columns: temp[y][u] = Σv F[v][u] · C_h[v][y]
    let mut temp = [[0.0f64; BLOCK_SIZE]; BLOCK_SIZE];
    for u in 0..w {
        for y in 0..h {
            let mut sum = 0.0;
            for v in 0..h {
                sum += coefficients.get(v, u) as f64 * col_basis[v][y];
            }
            temp[y][u] = sum;
        }
    }

    // Rows: s[y][x] = Σu temp[y][u] · C_w[u][x] + 128
    let mut out = Block::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            for u in 0..w {
                sum += temp[y][u] * row_basis[u][x];
            }
            out.set(y, x, sum as f32 + LEVEL_SHIFT);
        }
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn block_strategy() -> impl Strategy<Value = Block> {
        (1usize..=8, 1usize..=8).prop_flat_map(|(w, h)| {
            prop::collection::vec(0.0f32..=255.0, w * h)
                .prop_map(move |values| Block::from_values(w, h, &values).unwrap())
        })
    }

    proptest! {
        /// Property: inverse(forward(B)) reproduces B for every block extent.
        #[test]
        fn prop_transform_pair_is_identity(block in block_strategy()) {
            let back = inverse(&forward(&block));
            for (a, b) in block.values().iter().zip(back.values()) {
                prop_assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
            }
        }
    }
}
