//! Match candidates and their resolution.
//!
//! Candidates are ordered by descending score with a deterministic
//! tie-break: earlier scan order (smaller `y`, then smaller `x`) wins, then
//! template id, then scale.

use crate::image::Region;
use crate::template::TemplateId;
use std::cmp::Ordering;

pub(crate) mod nms;
pub(crate) mod resolve;

/// A scored placement of a template inside a base image.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchCandidate {
    /// Window in base-image coordinates, sized to the scaled template.
    pub region: Region,
    /// Similarity in `[0, 1]`.
    pub score: f32,
    /// Template the window was scored against.
    pub template: TemplateId,
    /// Scale factor applied to the template (1.0 for native size).
    pub scale: f32,
}

pub(crate) fn candidate_cmp_desc(a: &MatchCandidate, b: &MatchCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.region.y.cmp(&b.region.y))
        .then_with(|| a.region.x.cmp(&b.region.x))
        .then_with(|| a.template.cmp(&b.template))
        .then_with(|| a.scale.total_cmp(&b.scale))
}

/// Sorts candidates best-first with deterministic tie-breaking.
pub(crate) fn sort_candidates_desc(candidates: &mut [MatchCandidate]) {
    candidates.sort_by(candidate_cmp_desc);
}
