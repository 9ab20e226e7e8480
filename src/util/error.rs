//! Error types for screenmatch.

use thiserror::Error;

/// Result alias for screenmatch operations.
pub type ScreenMatchResult<T> = std::result::Result<T, MatchError>;

/// Errors reported by the matching engine.
///
/// Every variant is a local, recoverable condition: the engine is
/// deterministic, so retrying with the same inputs yields the same error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    /// Two images or regions that must share dimensions do not.
    #[error(
        "dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}"
    )]
    DimensionMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },
    /// The image is unusable (zero area, bad buffer, incompatible channels).
    #[error("invalid image: {reason}")]
    InvalidImage { reason: &'static str },
    /// A similarity threshold outside `[0, 1]` (or NaN).
    #[error("invalid threshold {0}: must lie in [0, 1]")]
    InvalidThreshold(f32),
    /// A region does not fit inside its parent image.
    #[error(
        "region ({x}, {y}, {width}x{height}) out of bounds for {img_width}x{img_height} image"
    )]
    RegionOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A scale range that is empty or non-positive.
    #[error("invalid scale range: min {min}, max {max}, step {step}")]
    InvalidScaleRange { min: f32, max: f32, step: f32 },
    /// A matcher configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Image decoding failed (`image-io` feature).
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}
