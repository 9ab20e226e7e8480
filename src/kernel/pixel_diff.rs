//! Pixel-difference ratio kernel.

use crate::kernel::Kernel;
use crate::ImageView;

/// Default tolerance on the summed per-channel absolute difference.
///
/// Roughly eight intensity levels per RGB channel; enough for compression
/// noise on device captures.
pub const DEFAULT_PIXEL_TOLERANCE: u32 = 24;

/// Fraction of pixels whose summed channel difference is `<= tolerance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelDiff {
    pub tolerance: u32,
}

impl Default for PixelDiff {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_PIXEL_TOLERANCE,
        }
    }
}

impl PixelDiff {
    fn matching_pixels(&self, a: ImageView<'_>, b: ImageView<'_>) -> usize {
        let c = a.channels().count();
        let mut matching = 0usize;
        for y in 0..a.height() {
            let row_a = a.row_unchecked(y);
            let row_b = b.row_unchecked(y);
            if c == 1 {
                matching += row_a
                    .iter()
                    .zip(row_b)
                    .filter(|&(&pa, &pb)| u32::from(pa.abs_diff(pb)) <= self.tolerance)
                    .count();
                continue;
            }
            for (pa, pb) in row_a.chunks_exact(c).zip(row_b.chunks_exact(c)) {
                let diff: u32 = pa
                    .iter()
                    .zip(pb)
                    .map(|(&va, &vb)| u32::from(va.abs_diff(vb)))
                    .sum();
                if diff <= self.tolerance {
                    matching += 1;
                }
            }
        }
        matching
    }
}

impl Kernel for PixelDiff {
    type Plan = ();

    fn name(&self) -> &'static str {
        "pixel_diff"
    }

    fn plan(&self, _template: ImageView<'_>) {}

    fn score_planned(&self, _plan: &(), template: ImageView<'_>, window: ImageView<'_>) -> f32 {
        let total = template.area();
        self.matching_pixels(template, window) as f32 / total as f32
    }
}
