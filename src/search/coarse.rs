//! Coarse-to-fine search for one template scale.
//!
//! The coarse pass scores placements on a `stride` grid (including the
//! last row and column) and keeps every window at or above the pre-filter
//! score. Each of those seeds a dense refinement over the
//! `(2 * stride - 1)^2` neighbourhood, which covers every placement closer
//! to the seed than to any other grid point.
//!
//! Unless an accepted window already has the maximum score of 1.0, every
//! placement the first two passes skipped is then scored, so the best
//! reported score always equals that of a dense scan. Each placement is
//! scored at most once, so a strided search never costs more comparisons
//! than a dense one.

use crate::kernel::Kernel;
#[cfg(feature = "rayon")]
use crate::search::scan::scan_positions_par;
use crate::search::refine::{refine_hits, sweep_unvisited, Visited};
use crate::search::scan::{scan_positions, strided_positions, Scan, ScanParams};
use crate::trace::trace_event;
use crate::ImageView;

/// No window can score higher than this.
const PERFECT_SCORE: f32 = 1.0;

/// Knobs for one coarse-to-fine scan.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CoarseParams {
    pub(crate) stride: usize,
    pub(crate) prefilter: f32,
    pub(crate) threshold: f32,
    pub(crate) stop_at: Option<f32>,
    pub(crate) parallel: bool,
}

#[allow(clippy::too_many_arguments)]
fn grid_scan<K: Kernel + ?Sized>(
    image: ImageView<'_>,
    template: ImageView<'_>,
    kernel: &K,
    plan: &K::Plan,
    xs: &[usize],
    ys: &[usize],
    params: ScanParams,
    parallel: bool,
) -> Scan {
    #[cfg(feature = "rayon")]
    if parallel && params.stop_at.is_none() {
        return scan_positions_par(image, template, kernel, plan, xs, ys, params.min_score);
    }
    #[cfg(not(feature = "rayon"))]
    let _ = parallel;
    scan_positions(image, template, kernel, plan, xs, ys, params)
}

/// Scans one template scale; `template` must fit inside `image`.
pub(crate) fn search_scale<K: Kernel + ?Sized>(
    image: ImageView<'_>,
    template: ImageView<'_>,
    kernel: &K,
    plan: &K::Plan,
    params: CoarseParams,
) -> Scan {
    let max_x = image.width() - template.width();
    let max_y = image.height() - template.height();
    let stride = params.stride.max(1);
    let xs = strided_positions(max_x, stride);
    let ys = strided_positions(max_y, stride);

    if stride == 1 {
        let dense = ScanParams {
            min_score: params.threshold,
            stop_at: params.stop_at,
        };
        return grid_scan(image, template, kernel, plan, &xs, &ys, dense, params.parallel);
    }

    let coarse_params = ScanParams {
        min_score: params.prefilter.min(params.threshold),
        stop_at: params.stop_at,
    };
    let coarse = grid_scan(
        image,
        template,
        kernel,
        plan,
        &xs,
        &ys,
        coarse_params,
        params.parallel,
    );
    trace_event!(
        "coarse_pass",
        comparisons = coarse.comparisons,
        seeds = coarse.hits.len()
    );

    let mut out = Scan {
        hits: coarse
            .hits
            .iter()
            .copied()
            .filter(|hit| hit.score >= params.threshold)
            .collect(),
        comparisons: coarse.comparisons,
        stopped: coarse.stopped,
    };
    if coarse.stopped {
        return out;
    }

    let mut visited = Visited::new(max_x, max_y);
    visited.mark_grid(&xs, &ys);
    let fine_params = ScanParams {
        min_score: params.threshold,
        stop_at: params.stop_at,
    };
    if !coarse.hits.is_empty() {
        let refined = refine_hits(
            image,
            template,
            kernel,
            plan,
            &coarse.hits,
            stride - 1,
            &mut visited,
            fine_params,
        );
        trace_event!(
            "refine_pass",
            comparisons = refined.comparisons,
            hits = refined.hits.len()
        );
        out.absorb(refined);
    }
    if out.stopped || out.hits.iter().any(|hit| hit.score >= PERFECT_SCORE) {
        return out;
    }

    let swept = sweep_unvisited(image, template, kernel, plan, &mut visited, fine_params);
    trace_event!(
        "sweep_pass",
        comparisons = swept.comparisons,
        hits = swept.hits.len()
    );
    out.absorb(swept);
    out
}
