//! Image loading via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Grayscale, RGB and RGBA
//! sources keep their layout; every other color type is converted to RGBA8.

use crate::image::{Channels, Image};
use crate::util::{MatchError, ScreenMatchResult};
use image::DynamicImage;
use std::path::Path;

/// Converts a decoded `DynamicImage` into an engine image.
pub fn image_from_dynamic(img: DynamicImage) -> ScreenMatchResult<Image> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    match img {
        DynamicImage::ImageLuma8(buf) => Image::new(buf.into_raw(), width, height, Channels::Gray),
        DynamicImage::ImageRgb8(buf) => Image::new(buf.into_raw(), width, height, Channels::Rgb),
        DynamicImage::ImageRgba8(buf) => Image::new(buf.into_raw(), width, height, Channels::Rgba),
        other => Image::new(other.to_rgba8().into_raw(), width, height, Channels::Rgba),
    }
}

/// Loads and decodes an image file.
pub fn load_image<P: AsRef<Path>>(path: P) -> ScreenMatchResult<Image> {
    let img = image::open(path.as_ref()).map_err(|err| MatchError::ImageIo {
        reason: format!("{}: {err}", path.as_ref().display()),
    })?;
    image_from_dynamic(img)
}

/// Loads an image file converted to a fixed channel layout.
///
/// Useful when templates and captures come from sources with different
/// color types (e.g. RGBA PNG templates against RGB screen captures).
pub fn load_image_as<P: AsRef<Path>>(path: P, channels: Channels) -> ScreenMatchResult<Image> {
    let img = image::open(path.as_ref()).map_err(|err| MatchError::ImageIo {
        reason: format!("{}: {err}", path.as_ref().display()),
    })?;
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = match channels {
        Channels::Gray => img.to_luma8().into_raw(),
        Channels::Rgb => img.to_rgb8().into_raw(),
        Channels::Rgba => img.to_rgba8().into_raw(),
    };
    Image::new(data, width, height, channels)
}
