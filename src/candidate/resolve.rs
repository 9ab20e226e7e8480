//! Final decision over raw candidates.

use crate::candidate::nms::{nms_iou, OVERLAP_IOU_THRESHOLD};
use crate::candidate::{candidate_cmp_desc, sort_candidates_desc, MatchCandidate};
use crate::template::TemplateId;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Orders candidates best-first and optionally merges overlapping ones.
///
/// With `overlap_suppression`, candidates whose regions overlap with IoU
/// above [`OVERLAP_IOU_THRESHOLD`] collapse into the highest-scoring one,
/// regardless of template.
pub fn resolve(
    mut candidates: Vec<MatchCandidate>,
    overlap_suppression: bool,
) -> Vec<MatchCandidate> {
    if overlap_suppression {
        return nms_iou(&mut candidates, OVERLAP_IOU_THRESHOLD);
    }
    sort_candidates_desc(&mut candidates);
    candidates
}

/// Keeps the best candidate of each template.
pub fn best_for_each_template(
    candidates: &[MatchCandidate],
) -> BTreeMap<TemplateId, MatchCandidate> {
    let mut best: BTreeMap<TemplateId, MatchCandidate> = BTreeMap::new();
    for cand in candidates {
        match best.get_mut(&cand.template) {
            Some(current) => {
                if candidate_cmp_desc(cand, current) == Ordering::Less {
                    *current = cand.clone();
                }
            }
            None => {
                best.insert(cand.template.clone(), cand.clone());
            }
        }
    }
    best
}
