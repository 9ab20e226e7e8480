//! Shared utility helpers.

pub mod error;

pub use error::{MatchError, ScreenMatchResult};

/// Rejects thresholds outside `[0, 1]`, including NaN.
pub(crate) fn check_threshold(threshold: f32) -> ScreenMatchResult<f32> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(MatchError::InvalidThreshold(threshold))
    }
}
