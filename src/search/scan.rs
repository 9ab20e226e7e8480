//! Window scans over placement grids.
//!
//! A placement `(x, y)` is the top-left corner of a template-sized window
//! inside the base image. Scans visit rows in ascending `y` and columns in
//! ascending `x`, so hits come out in scan order.

use crate::kernel::Kernel;
use crate::ImageView;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Score filter and early-exit bound for a scan.
#[derive(Clone, Copy, Debug)]
pub struct ScanParams {
    /// Windows scoring below this are dropped.
    pub min_score: f32,
    /// Stop the scan once a window reaches this score.
    pub stop_at: Option<f32>,
}

/// A window that passed the score filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanHit {
    pub x: usize,
    pub y: usize,
    pub score: f32,
}

/// Hits plus bookkeeping for one scan.
#[derive(Debug, Default)]
pub struct Scan {
    pub hits: Vec<ScanHit>,
    /// Number of windows scored.
    pub comparisons: u64,
    /// Set when `stop_at` cut the scan short.
    pub stopped: bool,
}

impl Scan {
    pub(crate) fn absorb(&mut self, other: Scan) {
        self.hits.extend(other.hits);
        self.comparisons += other.comparisons;
        self.stopped |= other.stopped;
    }
}

/// Placements `0, stride, 2 * stride, ...`, always ending at `max`.
pub fn strided_positions(max: usize, stride: usize) -> Vec<usize> {
    let stride = stride.max(1);
    let mut out: Vec<usize> = (0..=max).step_by(stride).collect();
    if out.last() != Some(&max) {
        out.push(max);
    }
    out
}

/// Scores every placement in `ys x xs`.
pub fn scan_positions<K: Kernel + ?Sized>(
    image: ImageView<'_>,
    template: ImageView<'_>,
    kernel: &K,
    plan: &K::Plan,
    xs: &[usize],
    ys: &[usize],
    params: ScanParams,
) -> Scan {
    let (tw, th) = (template.width(), template.height());
    let mut scan = Scan::default();
    for &y in ys {
        for &x in xs {
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

/// Row-parallel variant of [`scan_positions`] (no early exit).
///
/// Each row is scored independently and rows are concatenated in
/// ascending `y`, so the output equals the sequential scan.
#[cfg(feature = "rayon")]
pub fn scan_positions_par<K: Kernel + ?Sized>(
    image: ImageView<'_>,
    template: ImageView<'_>,
    kernel: &K,
    plan: &K::Plan,
    xs: &[usize],
    ys: &[usize],
    min_score: f32,
) -> Scan {
    let (tw, th) = (template.width(), template.height());
    let rows: Vec<Vec<ScanHit>> = ys
        .par_iter()
        .map(|&y| {
            let mut row_hits = Vec::new();
            for &x in xs {
                let window = image.window(x, y, tw, th);
                let score = kernel.score_planned(plan, template, window);
                if score >= min_score {
                    row_hits.push(ScanHit { x, y, score });
                }
            }
            row_hits
        })
        .collect();

    Scan {
        hits: rows.into_iter().flatten().collect(),
        comparisons: (xs.len() * ys.len()) as u64,
        stopped: false,
    }
}
