//! Template search over a base image.
//!
//! [`Matcher`] slides a template (optionally resampled over a
//! [`ScaleRange`]) across a base image and reports every window whose
//! similarity reaches the caller's threshold. Thresholds and scale ranges
//! are per-call parameters; [`MatchConfig`] holds the engine knobs.

use crate::candidate::resolve::resolve;
use crate::candidate::{sort_candidates_desc, MatchCandidate};
use crate::image::Region;
use crate::kernel::{Kernel, Metric};
use crate::score::is_similar;
use crate::template::{scaled_variants, ScaleRange, Template};
use crate::trace::{trace_event, trace_span};
use crate::util::{check_threshold, MatchError, ScreenMatchResult};
use crate::ImageView;

pub(crate) mod coarse;
pub(crate) mod refine;
pub mod scan;

use coarse::{search_scale, CoarseParams};

/// Engine configuration for [`Matcher`].
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Placement stride of the first pass; 1 scans every placement.
    pub stride: usize,
    /// Pre-filter as a fraction of the threshold: coarse windows scoring
    /// at least `threshold * prefilter_ratio` are refined.
    pub prefilter_ratio: f32,
    /// Score at which [`Matcher::find_best`] stops scanning early.
    pub good_enough: Option<f32>,
    /// Score rows in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            stride: 1,
            prefilter_ratio: 0.8,
            good_enough: None,
            parallel: false,
        }
    }
}

impl MatchConfig {
    fn validate(&self) -> ScreenMatchResult<()> {
        if self.stride == 0 {
            return Err(MatchError::InvalidConfig("stride must be at least 1"));
        }
        if !(self.prefilter_ratio > 0.0 && self.prefilter_ratio <= 1.0) {
            return Err(MatchError::InvalidConfig(
                "prefilter_ratio must lie in (0, 1]",
            ));
        }
        if let Some(bound) = self.good_enough {
            check_threshold(bound)?;
        }
        Ok(())
    }
}

/// Accepted candidates of one matching call.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    /// Candidates ordered best-first.
    pub candidates: Vec<MatchCandidate>,
    /// Number of windows scored.
    pub comparisons: u64,
    /// Name of the metric used for scoring.
    pub metric: &'static str,
}

impl MatchResult {
    pub fn best(&self) -> Option<&MatchCandidate> {
        self.candidates.first()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Hands the candidates to [`resolve`].
    pub fn resolve(self, overlap_suppression: bool) -> Vec<MatchCandidate> {
        resolve(self.candidates, overlap_suppression)
    }
}

/// Template matcher parameterized by its scoring kernel.
pub struct Matcher<K = Metric> {
    kernel: K,
    cfg: MatchConfig,
}

impl Default for Matcher<Metric> {
    fn default() -> Self {
        Self::new(Metric::default())
    }
}

impl<K: Kernel> Matcher<K> {
    /// Creates a matcher with the default configuration.
    pub fn new(kernel: K) -> Self {
        Self {
            kernel,
            cfg: MatchConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Finds every window scoring at least `threshold`, best first.
    ///
    /// Without `scales` only the native template size is searched. A
    /// template larger than the base image yields an empty result.
    pub fn find_all(
        &self,
        base: ImageView<'_>,
        template: &Template,
        threshold: f32,
        scales: Option<&ScaleRange>,
    ) -> ScreenMatchResult<MatchResult> {
        self.run(base, template, threshold, scales, None)
    }

    /// Returns the best window scoring at least `threshold`, if any.
    ///
    /// When [`MatchConfig::good_enough`] is set, sequential scans stop at
    /// the first window reaching both it and `threshold`.
    pub fn find_best(
        &self,
        base: ImageView<'_>,
        template: &Template,
        threshold: f32,
        scales: Option<&ScaleRange>,
    ) -> ScreenMatchResult<Option<MatchCandidate>> {
        let result = self.run(base, template, threshold, scales, self.cfg.good_enough)?;
        Ok(result.candidates.into_iter().next())
    }

    /// Runs [`Matcher::find_all`] for each template and merges the
    /// candidates best first.
    pub fn find_all_templates(
        &self,
        base: ImageView<'_>,
        templates: &[Template],
        threshold: f32,
        scales: Option<&ScaleRange>,
    ) -> ScreenMatchResult<MatchResult> {
        let mut merged = MatchResult {
            candidates: Vec::new(),
            comparisons: 0,
            metric: self.kernel.name(),
        };
        for template in templates {
            let result = self.find_all(base, template, threshold, scales)?;
            merged.candidates.extend(result.candidates);
            merged.comparisons += result.comparisons;
        }
        sort_candidates_desc(&mut merged.candidates);
        Ok(merged)
    }

    /// Whole-image comparison; both images must share dimensions.
    pub fn similar_image(
        &self,
        a: ImageView<'_>,
        b: ImageView<'_>,
        threshold: f32,
    ) -> ScreenMatchResult<bool> {
        is_similar(a, b, threshold, &self.kernel)
    }

    fn run(
        &self,
        base: ImageView<'_>,
        template: &Template,
        threshold: f32,
        scales: Option<&ScaleRange>,
        stop_at: Option<f32>,
    ) -> ScreenMatchResult<MatchResult> {
        let threshold = check_threshold(threshold)?;
        self.cfg.validate()?;
        if base.channels() != template.image().channels() {
            return Err(MatchError::InvalidImage {
                reason: "channel layout mismatch between base and template",
            });
        }

        let _span = trace_span!(
            "find_all",
            template = template.id().as_str(),
            metric = self.kernel.name()
        )
        .entered();

        // Only an accepted window may end the scan.
        let stop_at = stop_at.map(|bound| bound.max(threshold));
        let params = CoarseParams {
            stride: self.cfg.stride,
            prefilter: threshold * self.cfg.prefilter_ratio,
            threshold,
            stop_at,
            parallel: self.cfg.parallel,
        };

        let mut result = MatchResult {
            candidates: Vec::new(),
            comparisons: 0,
            metric: self.kernel.name(),
        };
        for variant in scaled_variants(template, scales, (base.width(), base.height()))? {
            let tpl = variant.view();
            let plan = self.kernel.plan(tpl);
            let scan = search_scale(base, tpl, &self.kernel, &plan, params);
            trace_event!(
                "scale_scanned",
                scale = variant.scale,
                comparisons = scan.comparisons,
                hits = scan.hits.len()
            );

            result.comparisons += scan.comparisons;
            result
                .candidates
                .extend(scan.hits.into_iter().map(|hit| MatchCandidate {
                    region: Region::new(hit.x, hit.y, tpl.width(), tpl.height()),
                    score: hit.score,
                    template: template.id().clone(),
                    scale: variant.scale,
                }));
            if scan.stopped {
                break;
            }
        }

        sort_candidates_desc(&mut result.candidates);
        Ok(result)
    }
}
