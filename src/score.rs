//! Region-to-region similarity scoring.
//!
//! These are the checked entry points over [`Kernel`]: both regions must
//! have identical dimensions and channel layout. Regions are never resized
//! implicitly; multi-scale search in [`crate::Matcher`] handles scaling
//! explicitly.

use crate::kernel::Kernel;
use crate::util::{check_threshold, MatchError, ScreenMatchResult};
use crate::ImageView;

/// Verifies that two regions can be compared.
pub(crate) fn check_comparable(a: ImageView<'_>, b: ImageView<'_>) -> ScreenMatchResult<()> {
    if !a.same_size(&b) {
        return Err(MatchError::DimensionMismatch {
            left_width: a.width(),
            left_height: a.height(),
            right_width: b.width(),
            right_height: b.height(),
        });
    }
    if a.channels() != b.channels() {
        return Err(MatchError::InvalidImage {
            reason: "channel layout mismatch",
        });
    }
    Ok(())
}

/// Scores two equally sized regions with `kernel`; the result lies in
/// `[0, 1]`.
pub fn score<K: Kernel + ?Sized>(
    a: ImageView<'_>,
    b: ImageView<'_>,
    kernel: &K,
) -> ScreenMatchResult<f32> {
    check_comparable(a, b)?;
    Ok(kernel.score_pair(a, b))
}

/// Returns `true` iff `score(a, b) >= threshold`.
pub fn is_similar<K: Kernel + ?Sized>(
    a: ImageView<'_>,
    b: ImageView<'_>,
    threshold: f32,
    kernel: &K,
) -> ScreenMatchResult<bool> {
    let threshold = check_threshold(threshold)?;
    Ok(score(a, b, kernel)? >= threshold)
}
