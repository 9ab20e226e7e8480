//! Bilinear resampling for multi-scale template search.
//!
//! Destination pixel centers map to source coordinates with
//! `src = (dst + 0.5) * (src_len / dst_len) - 0.5`, clamped to the valid
//! source range. The mapping depends only on the source and destination
//! sizes, so resizing the same template to the same size is reproducible
//! bit for bit. Each channel is interpolated independently and rounded to
//! the nearest integer.

use crate::image::{Image, ImageView};
use crate::util::{MatchError, ScreenMatchResult};

/// Size of a `width x height` image scaled by `scale`, rounded to the
/// nearest pixel.
///
/// Returns `None` when the scaled size collapses to zero.
pub fn scaled_size(width: usize, height: usize, scale: f32) -> Option<(usize, usize)> {
    if !scale.is_finite() || scale <= 0.0 {
        return None;
    }
    let w = (width as f32 * scale).round() as usize;
    let h = (height as f32 * scale).round() as usize;
    if w == 0 || h == 0 {
        None
    } else {
        Some((w, h))
    }
}

/// Resizes `src` to `dst_width x dst_height` with bilinear interpolation.
pub fn resize_bilinear(
    src: ImageView<'_>,
    dst_width: usize,
    dst_height: usize,
) -> ScreenMatchResult<Image> {
    if dst_width == 0 || dst_height == 0 {
        return Err(MatchError::InvalidImage {
            reason: "zero-area resample target",
        });
    }
    if dst_width == src.width() && dst_height == src.height() {
        return Ok(Image::from_view(src));
    }

    let c = src.channels().count();
    let src_w = src.width();
    let src_h = src.height();
    let ratio_x = src_w as f32 / dst_width as f32;
    let ratio_y = src_h as f32 / dst_height as f32;
    let max_x = (src_w - 1) as f32;
    let max_y = (src_h - 1) as f32;

    // Horizontal taps are shared by every row.
    let taps: Vec<(usize, usize, f32)> = (0..dst_width)
        .map(|x| {
            let sx = ((x as f32 + 0.5) * ratio_x - 0.5).clamp(0.0, max_x);
            let x0 = sx.floor() as usize;
            let x1 = (x0 + 1).min(src_w - 1);
            (x0, x1, sx - x0 as f32)
        })
        .collect();

    let mut out = Vec::with_capacity(dst_width * dst_height * c);
    for y in 0..dst_height {
        let sy = ((y as f32 + 0.5) * ratio_y - 0.5).clamp(0.0, max_y);
        let y0 = sy.floor() as usize;
        let y1 = (y0 + 1).min(src_h - 1);
        let fy = sy - y0 as f32;
        let row0 = src.row_unchecked(y0);
        let row1 = src.row_unchecked(y1);

        for &(x0, x1, fx) in &taps {
            for ch in 0..c {
                let a = row0[x0 * c + ch] as f32;
                let b = row0[x1 * c + ch] as f32;
                let d = row1[x0 * c + ch] as f32;
                let e = row1[x1 * c + ch] as f32;
                let top = a + (b - a) * fx;
                let bottom = d + (e - d) * fx;
                let value = top + (bottom - top) * fy;
                out.push(value.round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    Image::new(out, dst_width, dst_height, src.channels())
}

/// Resizes `src` by a uniform scale factor.
pub fn resize_by(src: ImageView<'_>, scale: f32) -> ScreenMatchResult<Image> {
    let (w, h) = scaled_size(src.width(), src.height(), scale).ok_or(MatchError::InvalidImage {
        reason: "scale collapses image to zero area",
    })?;
    resize_bilinear(src, w, h)
}
