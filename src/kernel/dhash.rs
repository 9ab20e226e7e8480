//! Perceptual difference-hash kernel.

use crate::image::Channels;
use crate::kernel::Kernel;
use crate::ImageView;

const GRID_W: usize = 9;
const GRID_H: usize = 8;

/// Hamming similarity of 64-bit difference hashes.
///
/// Each region is reduced to a 9x8 luma grid by box averaging; bit
/// `row * 8 + col` is set when cell `col` is brighter than cell `col + 1`.
/// The score is `1 - hamming / 64`. Insensitive to uniform brightness
/// changes and to mild blur, but blind to flat regions (all flat regions
/// hash to zero).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DHash;

/// Precomputed template hash.
pub struct DHashPlan {
    hash: u64,
}

impl DHashPlan {
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

fn luma(px: &[u8], channels: Channels) -> u32 {
    match channels {
        Channels::Gray => u32::from(px[0]),
        Channels::Rgb | Channels::Rgba => {
            (u32::from(px[0]) * 299 + u32::from(px[1]) * 587 + u32::from(px[2]) * 114) / 1000
        }
    }
}

/// Cell `i` of `n` over `len` pixels; never empty, even when `len < n`.
fn cell_span(i: usize, n: usize, len: usize) -> (usize, usize) {
    let start = (i * len / n).min(len - 1);
    let end = ((i + 1) * len / n).max(start + 1);
    (start, end)
}

/// Computes the 64-bit difference hash of a region.
pub fn difference_hash(view: ImageView<'_>) -> u64 {
    let channels = view.channels();
    let c = channels.count();
    let mut sums = [[0u64; GRID_W]; GRID_H];
    let mut counts = [[0u64; GRID_W]; GRID_H];

    for (gy, (sum_row, count_row)) in sums.iter_mut().zip(counts.iter_mut()).enumerate() {
        let (y0, y1) = cell_span(gy, GRID_H, view.height());
        for y in y0..y1 {
            let row = view.row_unchecked(y);
            for gx in 0..GRID_W {
                let (x0, x1) = cell_span(gx, GRID_W, view.width());
                for x in x0..x1 {
                    sum_row[gx] += u64::from(luma(&row[x * c..(x + 1) * c], channels));
                }
                count_row[gx] += (x1 - x0) as u64;
            }
        }
    }

    let mut hash = 0u64;
    for gy in 0..GRID_H {
        for gx in 0..GRID_W - 1 {
            // mean(left) > mean(right) without division.
            let left = sums[gy][gx] * counts[gy][gx + 1];
            let right = sums[gy][gx + 1] * counts[gy][gx];
            if left > right {
                hash |= 1u64 << (gy * (GRID_W - 1) + gx);
            }
        }
    }
    hash
}

impl Kernel for DHash {
    type Plan = DHashPlan;

    fn name(&self) -> &'static str {
        "dhash"
    }

    fn plan(&self, template: ImageView<'_>) -> DHashPlan {
        DHashPlan {
            hash: difference_hash(template),
        }
    }

    fn score_planned(
        &self,
        plan: &DHashPlan,
        _template: ImageView<'_>,
        window: ImageView<'_>,
    ) -> f32 {
        let distance = (plan.hash ^ difference_hash(window)).count_ones();
        1.0 - distance as f32 / 64.0
    }
}
