//! Overlap suppression for match candidates.

use crate::candidate::{sort_candidates_desc, MatchCandidate};

/// IoU above which two candidates are considered the same detection.
pub const OVERLAP_IOU_THRESHOLD: f32 = 0.5;

/// Greedy IoU-based non-maximum suppression.
///
/// Candidates are sorted best-first; each is kept unless its region
/// overlaps an already kept region with IoU above `iou_threshold`.
/// Template identity is ignored, so duplicates across templates merge into
/// the best-scoring entry.
pub fn nms_iou(candidates: &mut [MatchCandidate], iou_threshold: f32) -> Vec<MatchCandidate> {
    sort_candidates_desc(candidates);
    let mut kept: Vec<MatchCandidate> = Vec::new();

    'outer: for cand in candidates.iter() {
        for kept_cand in kept.iter() {
            if cand.region.iou(&kept_cand.region) > iou_threshold {
                continue 'outer;
            }
        }
        kept.push(cand.clone());
    }

    kept
}
