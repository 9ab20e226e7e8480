//! Similarity kernels.
//!
//! A [`Kernel`] scores two equally sized regions with the same channel
//! layout and returns a similarity in `[0, 1]` (higher is more similar).
//! Kernels split the work into a per-template [`Kernel::Plan`], built once,
//! and a per-window evaluation, so scan loops stay metric-agnostic.
//!
//! [`Metric`] is the closed set of built-in kernels used by configuration.

use crate::ImageView;

mod dhash;
mod ncc;
mod pixel_diff;

pub use dhash::{difference_hash, DHash, DHashPlan};
pub use ncc::{Ncc, NccPlan};
pub use pixel_diff::{PixelDiff, DEFAULT_PIXEL_TOLERANCE};

/// Scoring strategy over two same-sized regions.
///
/// Callers guarantee that `template` and `window` share width, height and
/// channel layout; the checked entry points in
/// [`crate::score`](mod@crate::score) enforce this.
pub trait Kernel: Sync {
    type Plan: Send + Sync;

    /// Short metric identifier reported in match results.
    fn name(&self) -> &'static str;

    /// Precomputes template-side data reused across windows.
    fn plan(&self, template: ImageView<'_>) -> Self::Plan;

    /// Scores one window against a planned template.
    fn score_planned(
        &self,
        plan: &Self::Plan,
        template: ImageView<'_>,
        window: ImageView<'_>,
    ) -> f32;

    /// Scores two regions without a prepared plan.
    fn score_pair(&self, a: ImageView<'_>, b: ImageView<'_>) -> f32 {
        let plan = self.plan(a);
        self.score_planned(&plan, a, b)
    }
}

/// Built-in similarity metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Metric {
    /// Fraction of pixels whose summed channel difference is within
    /// `tolerance`.
    PixelDiff { tolerance: u32 },
    /// Normalized cross-correlation over mean-subtracted channels.
    Ncc,
    /// Hamming similarity of 64-bit difference hashes.
    DHash,
}

impl Metric {
    /// Pixel-difference metric with [`DEFAULT_PIXEL_TOLERANCE`].
    pub const fn pixel_diff() -> Self {
        Metric::PixelDiff {
            tolerance: DEFAULT_PIXEL_TOLERANCE,
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Self::pixel_diff()
    }
}

/// Plan produced by [`Metric`].
pub enum MetricPlan {
    PixelDiff,
    Ncc(NccPlan),
    DHash(DHashPlan),
}

impl Kernel for Metric {
    type Plan = MetricPlan;

    fn name(&self) -> &'static str {
        match self {
            Metric::PixelDiff { .. } => PixelDiff::default().name(),
            Metric::Ncc => Ncc.name(),
            Metric::DHash => DHash.name(),
        }
    }

    fn plan(&self, template: ImageView<'_>) -> MetricPlan {
        match self {
            Metric::PixelDiff { .. } => MetricPlan::PixelDiff,
            Metric::Ncc => MetricPlan::Ncc(Ncc.plan(template)),
            Metric::DHash => MetricPlan::DHash(DHash.plan(template)),
        }
    }

    fn score_planned(
        &self,
        plan: &MetricPlan,
        template: ImageView<'_>,
        window: ImageView<'_>,
    ) -> f32 {
        match (self, plan) {
            (Metric::PixelDiff { tolerance }, MetricPlan::PixelDiff) => PixelDiff {
                tolerance: *tolerance,
            }
            .score_planned(&(), template, window),
            (Metric::Ncc, MetricPlan::Ncc(p)) => Ncc.score_planned(p, template, window),
            (Metric::DHash, MetricPlan::DHash(p)) => DHash.score_planned(p, template, window),
            // A plan built for another metric: fall back to an unplanned score.
            _ => self.score_pair(template, window),
        }
    }

    fn score_pair(&self, a: ImageView<'_>, b: ImageView<'_>) -> f32 {
        match self {
            Metric::PixelDiff { tolerance } => PixelDiff {
                tolerance: *tolerance,
            }
            .score_pair(a, b),
            Metric::Ncc => Ncc.score_pair(a, b),
            Metric::DHash => DHash.score_pair(a, b),
        }
    }
}
