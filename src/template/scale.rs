//! Scale ranges and resampled template variants.
//!
//! A scale range expands to `min, min + step, ...` up to `max` (inclusive,
//! with a small tolerance for accumulated float error). Scales that round
//! to the same template size are searched once, at the first such scale.

use crate::image::resample::{resize_bilinear, scaled_size};
use crate::image::{Image, ImageView};
use crate::template::Template;
use crate::util::{MatchError, ScreenMatchResult};
use std::borrow::Cow;

const MAX_SCALE_STEPS: usize = 1024;

/// Inclusive range of template scale factors searched in fixed steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleRange {
    min: f32,
    max: f32,
    step: f32,
}

impl ScaleRange {
    /// Creates a range; all values must be finite and positive with
    /// `min <= max`.
    pub fn new(min: f32, max: f32, step: f32) -> ScreenMatchResult<Self> {
        let invalid = MatchError::InvalidScaleRange { min, max, step };
        let valid = [min, max, step].iter().all(|v| v.is_finite() && *v > 0.0) && min <= max;
        if !valid {
            return Err(invalid);
        }
        if ((max - min) / step) as usize >= MAX_SCALE_STEPS {
            return Err(invalid);
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Expands the range into its scale factors, ascending.
    pub fn scales(&self) -> Vec<f32> {
        let steps = ((self.max - self.min) / self.step + 1e-3).floor() as usize;
        (0..=steps)
            .map(|i| self.min + i as f32 * self.step)
            .collect()
    }
}

/// A template resampled to one scale of a search.
pub struct ScaledTemplate<'a> {
    pub scale: f32,
    image: Cow<'a, Image>,
}

impl ScaledTemplate<'_> {
    pub fn view(&self) -> ImageView<'_> {
        self.image.view()
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn height(&self) -> usize {
        self.image.height()
    }
}

/// Builds the template variants for a search, native scale when `scales`
/// is `None`.
///
/// Variants larger than `bounds` (the base image size) cannot be placed
/// and are skipped before resampling.
pub(crate) fn scaled_variants<'a>(
    template: &'a Template,
    scales: Option<&ScaleRange>,
    bounds: (usize, usize),
) -> ScreenMatchResult<Vec<ScaledTemplate<'a>>> {
    let native = template.image();
    let fits = |(w, h): (usize, usize)| w <= bounds.0 && h <= bounds.1;
    let Some(range) = scales else {
        if !fits((native.width(), native.height())) {
            return Ok(Vec::new());
        }
        return Ok(vec![ScaledTemplate {
            scale: 1.0,
            image: Cow::Borrowed(native),
        }]);
    };

    let mut seen: Vec<(usize, usize)> = Vec::new();
    let mut out = Vec::new();
    for scale in range.scales() {
        let Some(size) = scaled_size(native.width(), native.height(), scale) else {
            continue;
        };
        if !fits(size) || seen.contains(&size) {
            continue;
        }
        seen.push(size);
        let image = if size == (native.width(), native.height()) {
            Cow::Borrowed(native)
        } else {
            Cow::Owned(resize_bilinear(native.view(), size.0, size.1)?)
        };
        out.push(ScaledTemplate { scale, image });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{scaled_variants, ScaleRange};
    use crate::template::Template;
    use crate::util::MatchError;
    use crate::Image;

    #[test]
    fn scales_include_both_ends() {
        let range = ScaleRange::new(0.8, 1.3, 0.1).unwrap();
        let scales = range.scales();
        assert_eq!(scales.len(), 6);
        assert!((scales[0] - 0.8).abs() < 1e-6);
        assert!((scales[5] - 1.3).abs() < 1e-5);
    }

    #[test]
    fn rejects_inverted_or_non_positive_ranges() {
        assert_eq!(
            ScaleRange::new(1.2, 0.8, 0.1),
            Err(MatchError::InvalidScaleRange {
                min: 1.2,
                max: 0.8,
                step: 0.1,
            })
        );
        assert!(ScaleRange::new(0.0, 1.0, 0.1).is_err());
        assert!(ScaleRange::new(0.5, 1.0, 0.0).is_err());
        assert!(ScaleRange::new(0.5, 1.0, 1e-6).is_err());
    }

    #[test]
    fn duplicate_sizes_are_searched_once() {
        let tpl = Template::new("t", Image::gray(vec![0; 16], 4, 4).unwrap());
        // 4 * {0.95, 1.0, 1.05} all round to 4.
        let range = ScaleRange::new(0.95, 1.05, 0.05).unwrap();
        let variants = scaled_variants(&tpl, Some(&range), (100, 100)).unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].width(), 4);
    }

    #[test]
    fn variants_larger_than_base_are_skipped() {
        let tpl = Template::new("t", Image::gray(vec![0; 100], 10, 10).unwrap());
        let range = ScaleRange::new(0.5, 2.0, 0.5).unwrap();
        let variants = scaled_variants(&tpl, Some(&range), (12, 30)).unwrap();
        let widths: Vec<usize> = variants.iter().map(|v| v.width()).collect();
        assert_eq!(widths, vec![5, 10]);

        assert!(scaled_variants(&tpl, None, (9, 30)).unwrap().is_empty());
        assert_eq!(scaled_variants(&tpl, None, (10, 10)).unwrap().len(), 1);
    }
}
