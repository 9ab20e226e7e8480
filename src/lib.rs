//! screenmatch locates reference images ("templates") inside screen
//! captures.
//!
//! The engine is CPU-only and stateless: every call takes immutable images
//! and plain parameters and returns fresh results. Scoring metrics are
//! pluggable [`Kernel`]s (pixel-difference ratio, normalized
//! cross-correlation, difference hash); [`Matcher`] searches at native
//! scale or over a [`ScaleRange`], optionally coarse-to-fine and, with the
//! `rayon` feature, in parallel; [`resolve`] and [`best_for_each_template`]
//! turn raw candidates into a final decision.

mod candidate;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod score;
pub mod search;
pub mod template;
mod trace;
pub mod util;

pub use crate::image::{Channels, Image, ImageView, Region};
#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use candidate::nms::OVERLAP_IOU_THRESHOLD;
pub use candidate::resolve::{best_for_each_template, resolve};
pub use candidate::MatchCandidate;
pub use kernel::{Kernel, Metric, DEFAULT_PIXEL_TOLERANCE};
pub use score::{is_similar, score};
pub use search::{MatchConfig, MatchResult, Matcher};
pub use template::{ScaleRange, Template, TemplateId};
pub use util::{MatchError, ScreenMatchResult};
