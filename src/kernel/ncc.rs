//! Normalized cross-correlation kernel.
//!
//! Each channel is mean-subtracted independently; covariance and variances
//! are accumulated over all channels and combined as
//! `cov / sqrt(var_a * var_b)`. Sums are kept in exact integer arithmetic
//! (`n * sum_ab - sum_a * sum_b` and friends), so the score is symmetric
//! bit for bit and the planned path agrees with the unplanned one.
//!
//! Negative correlation is clamped to 0. Flat inputs have no defined
//! correlation: two flat regions score `1 - |mean_a - mean_b| / 255`, and
//! a flat region against a textured one scores 0.

use crate::kernel::Kernel;
use crate::ImageView;

const MAX_CHANNELS: usize = 4;

/// Normalized cross-correlation, clamped to `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ncc;

/// Per-channel template sums.
pub struct NccPlan {
    sum: [u64; MAX_CHANNELS],
    sum_sq: [u64; MAX_CHANNELS],
}

#[derive(Default)]
struct Moments {
    sum: [u64; MAX_CHANNELS],
    sum_sq: [u64; MAX_CHANNELS],
}

impl Moments {
    fn of(view: ImageView<'_>) -> Self {
        let c = view.channels().count();
        let mut m = Moments::default();
        for y in 0..view.height() {
            for px in view.row_unchecked(y).chunks_exact(c) {
                for (ch, &v) in px.iter().enumerate() {
                    let v = u64::from(v);
                    m.sum[ch] += v;
                    m.sum_sq[ch] += v * v;
                }
            }
        }
        m
    }
}

fn cross_sum(a: ImageView<'_>, b: ImageView<'_>) -> [u64; MAX_CHANNELS] {
    let c = a.channels().count();
    let mut sum_ab = [0u64; MAX_CHANNELS];
    for y in 0..a.height() {
        let row_a = a.row_unchecked(y);
        let row_b = b.row_unchecked(y);
        for (pa, pb) in row_a.chunks_exact(c).zip(row_b.chunks_exact(c)) {
            for ch in 0..c {
                sum_ab[ch] += u64::from(pa[ch]) * u64::from(pb[ch]);
            }
        }
    }
    sum_ab
}

/// Combines raw moments into a clamped correlation score.
fn correlate(
    channels: usize,
    n: u64,
    a_sum: &[u64; MAX_CHANNELS],
    a_sq: &[u64; MAX_CHANNELS],
    b_sum: &[u64; MAX_CHANNELS],
    b_sq: &[u64; MAX_CHANNELS],
    ab: &[u64; MAX_CHANNELS],
) -> f32 {
    let n_i = i128::from(n);
    let mut cov = 0i128;
    let mut var_a = 0i128;
    let mut var_b = 0i128;
    let mut total_a = 0u64;
    let mut total_b = 0u64;
    for ch in 0..channels {
        let sa = i128::from(a_sum[ch]);
        let sb = i128::from(b_sum[ch]);
        // All three are n^2 times the centered moment; the factor cancels.
        cov += n_i * i128::from(ab[ch]) - sa * sb;
        var_a += n_i * i128::from(a_sq[ch]) - sa * sa;
        var_b += n_i * i128::from(b_sq[ch]) - sb * sb;
        total_a += a_sum[ch];
        total_b += b_sum[ch];
    }

    match (var_a == 0, var_b == 0) {
        (true, true) => {
            let samples = (n * channels as u64) as f64;
            let mean_a = total_a as f64 / samples;
            let mean_b = total_b as f64 / samples;
            (1.0 - (mean_a - mean_b).abs() / 255.0) as f32
        }
        (true, false) | (false, true) => 0.0,
        (false, false) => {
            let denom = (var_a as f64 * var_b as f64).sqrt();
            let r = cov as f64 / denom;
            r.clamp(0.0, 1.0) as f32
        }
    }
}

impl Kernel for Ncc {
    type Plan = NccPlan;

    fn name(&self) -> &'static str {
        "ncc"
    }

    fn plan(&self, template: ImageView<'_>) -> NccPlan {
        let m = Moments::of(template);
        NccPlan {
            sum: m.sum,
            sum_sq: m.sum_sq,
        }
    }

    fn score_planned(
        &self,
        plan: &NccPlan,
        template: ImageView<'_>,
        window: ImageView<'_>,
    ) -> f32 {
        let c = template.channels().count();
        let w = Moments::of(window);
        let ab = cross_sum(template, window);
        correlate(
            c,
            template.area() as u64,
            &plan.sum,
            &plan.sum_sq,
            &w.sum,
            &w.sum_sq,
            &ab,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Ncc;
    use crate::kernel::Kernel;
    use crate::Image;

    #[test]
    fn brightness_shift_keeps_full_correlation() {
        let a = Image::gray(vec![10, 20, 30, 40, 50, 60], 3, 2).unwrap();
        let b = Image::gray(vec![60, 70, 80, 90, 100, 110], 3, 2).unwrap();
        let score = Ncc.score_pair(a.view(), b.view());
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn inverted_pattern_clamps_to_zero() {
        let a = Image::gray(vec![0, 255, 0, 255], 2, 2).unwrap();
        let b = Image::gray(vec![255, 0, 255, 0], 2, 2).unwrap();
        assert_eq!(Ncc.score_pair(a.view(), b.view()), 0.0);
    }

    #[test]
    fn flat_regions_compare_by_mean() {
        let a = Image::gray(vec![100; 4], 2, 2).unwrap();
        let b = Image::gray(vec![100; 4], 2, 2).unwrap();
        let c = Image::gray(vec![0, 50, 100, 150], 2, 2).unwrap();
        assert_eq!(Ncc.score_pair(a.view(), b.view()), 1.0);
        assert_eq!(Ncc.score_pair(a.view(), c.view()), 0.0);
    }
}
