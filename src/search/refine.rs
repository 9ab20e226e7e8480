//! Dense refinement around coarse hits.
//!
//! Each coarse hit is expanded into a square neighbourhood of placements,
//! clamped to the valid placement range. A visited map guarantees that no
//! placement is scored twice, even when neighbourhoods overlap or include
//! windows already scored by the coarse pass.

use crate::kernel::Kernel;
use crate::search::scan::{Scan, ScanHit, ScanParams};
use crate::ImageView;

/// Tracks which placements of one scan have been scored.
pub(crate) struct Visited {
    cols: usize,
    seen: Vec<bool>,
}

impl Visited {
    pub(crate) fn new(max_x: usize, max_y: usize) -> Self {
        let cols = max_x + 1;
        Self {
            cols,
            seen: vec![false; cols * (max_y + 1)],
        }
    }

    /// Marks a placement, returning `true` if it was not seen before.
    pub(crate) fn insert(&mut self, x: usize, y: usize) -> bool {
        let slot = &mut self.seen[y * self.cols + x];
        !std::mem::replace(slot, true)
    }

    pub(crate) fn mark_grid(&mut self, xs: &[usize], ys: &[usize]) {
        for &y in ys {
            for &x in xs {
                self.insert(x, y);
            }
        }
    }
}

fn roi_bounds(
    x: usize,
    y: usize,
    radius: usize,
    max_x: usize,
    max_y: usize,
) -> (usize, usize, usize, usize) {
    let x0 = x.saturating_sub(radius);
    let y0 = y.saturating_sub(radius);
    let x1 = x.saturating_add(radius).min(max_x);
    let y1 = y.saturating_add(radius).min(max_y);
    (x0, y0, x1, y1)
}

/// Scores all unvisited placements within `radius` of each seed.
#[allow(clippy::too_many_arguments)]
pub(crate) fn refine_hits<K: Kernel + ?Sized>(
    image: ImageView<'_>,
    template: ImageView<'_>,
    kernel: &K,
    plan: &K::Plan,
    seeds: &[ScanHit],
    radius: usize,
    visited: &mut Visited,
    params: ScanParams,
) -> Scan {
    let max_x = image.width() - template.width();
    let max_y = image.height() - template.height();
    let (tw, th) = (template.width(), template.height());
    let mut scan = Scan::default();

    for seed in seeds {
        let (x0, y0, x1, y1) = roi_bounds(seed.x, seed.y, radius, max_x, max_y);
        for y in y0..=y1 {
            for x in x0..=x1 {
                if !visited.insert(x, y) {
                    continue;
                }
                let window = image.window(x, y, tw, th);
                let score = kernel.score_planned(plan, template, window);
                scan.comparisons += 1;
                if score >= params.min_score {
                    scan.hits.push(ScanHit { x, y, score });
                    if params.stop_at.is_some_and(|bound| score >= bound) {
                        scan.stopped = true;
                        return scan;
                    }
                }
            }
        }
    }
    scan
}

/// Scores every placement not yet visited, in scan order.
pub(crate) fn sweep_unvisited<K: Kernel + ?Sized>(
    image: ImageView<'_>,
    template: ImageView<'_>,
    kernel: &K,
    plan: &K::Plan,
    visited: &mut Visited,
    params: ScanParams,
) -> Scan {
    let max_x = image.width() - template.width();
    let max_y = image.height() - template.height();
    let (tw, th) = (template.width(), template.height());
    let mut scan = Scan::default();

    for y in 0..=max_y {
        for x in 0..=max_x {
            if !visited.insert(x, y) {
                continue;
            }
            let window = image.window(x, y, tw, th);
            let score = kernel.score_planned(plan, template, window);
            scan.comparisons += 1;
            if score >= params.min_score {
                scan.hits.push(ScanHit { x, y, score });
                if params.stop_at.is_some_and(|bound| score >= bound) {
                    scan.stopped = true;
                    return scan;
                }
            }
        }
    }
    scan
}

#[cfg(test)]
mod tests {
    use super::{roi_bounds, sweep_unvisited, Visited};
    use crate::kernel::{Kernel, PixelDiff};
    use crate::search::scan::ScanParams;
    use crate::Image;

    #[test]
    fn roi_is_clamped_to_placement_range() {
        assert_eq!(roi_bounds(1, 9, 3, 10, 10), (0, 6, 4, 10));
        assert_eq!(roi_bounds(5, 5, 0, 10, 10), (5, 5, 5, 5));
    }

    #[test]
    fn visited_reports_first_insert_only() {
        let mut visited = Visited::new(3, 3);
        assert!(visited.insert(2, 1));
        assert!(!visited.insert(2, 1));
        visited.mark_grid(&[0, 3], &[0, 3]);
        assert!(!visited.insert(3, 3));
        assert!(visited.insert(1, 3));
    }

    #[test]
    fn sweep_skips_visited_placements() {
        let image = Image::gray((0u8..36).collect(), 6, 6).unwrap();
        let template = Image::from_view(image.view().roi(4, 4, 2, 2).unwrap());
        let kernel = PixelDiff { tolerance: 0 };
        let plan = kernel.plan(template.view());
        let mut visited = Visited::new(4, 4);
        visited.mark_grid(&[0, 2, 4], &[0, 2]);
        let params = ScanParams {
            min_score: 1.0,
            stop_at: None,
        };

        let scan = sweep_unvisited(
            image.view(),
            template.view(),
            &kernel,
            &plan,
            &mut visited,
            params,
        );
        assert_eq!(scan.comparisons, 25 - 6);
        assert_eq!(scan.hits.len(), 1);
        assert_eq!((scan.hits[0].x, scan.hits[0].y), (4, 4));
        assert!(!visited.insert(3, 1));
    }
}
