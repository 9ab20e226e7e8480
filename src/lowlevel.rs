//! Building blocks for custom matching pipelines.
//!
//! Concrete kernels, the raw placement scans and the resampling helpers
//! behind [`crate::Matcher`]. Most users should stay with `Matcher`,
//! [`crate::score::score`] and [`crate::resolve`].

pub use crate::candidate::nms::nms_iou;
pub use crate::image::resample::{resize_bilinear, resize_by, scaled_size};
pub use crate::kernel::{difference_hash, DHash, DHashPlan, MetricPlan, Ncc, NccPlan, PixelDiff};
#[cfg(feature = "rayon")]
pub use crate::search::scan::scan_positions_par;
pub use crate::search::scan::{scan_positions, strided_positions, Scan, ScanHit, ScanParams};
pub use crate::template::ScaledTemplate;
