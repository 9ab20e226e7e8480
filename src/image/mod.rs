//! Images, borrowed views and regions.
//!
//! `Image` owns a tightly packed, row-major `u8` buffer. `ImageView` is a
//! borrowed 2D view with an explicit stride counted in bytes between the
//! starts of consecutive rows, so a window into a larger image is a
//! zero-copy view that keeps the parent stride. Pixels are interleaved:
//! a row holds `width * channels` bytes.

use crate::util::{MatchError, ScreenMatchResult};

#[cfg(feature = "image-io")]
pub mod io;
mod region;
pub mod resample;

pub use region::Region;

/// Channel layout of an 8-bit image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channels {
    Gray,
    Rgb,
    Rgba,
}

impl Channels {
    /// Number of interleaved bytes per pixel.
    pub fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }
}

/// Owned, immutable 8-bit image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: Channels,
}

impl Image {
    /// Wraps a decoded pixel buffer, e.g. a raw screen capture.
    ///
    /// The buffer length must equal `width * height * channels` exactly.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: Channels,
    ) -> ScreenMatchResult<Self> {
        let needed = required_len(width, height, packed_stride(width, channels), channels)?;
        if data.len() != needed {
            return Err(MatchError::InvalidImage {
                reason: "buffer length does not match width * height * channels",
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates a single-channel image.
    pub fn gray(data: Vec<u8>, width: usize, height: usize) -> ScreenMatchResult<Self> {
        Self::new(data, width, height, Channels::Gray)
    }

    /// Creates a packed RGB image.
    pub fn rgb(data: Vec<u8>, width: usize, height: usize) -> ScreenMatchResult<Self> {
        Self::new(data, width, height, Channels::Rgb)
    }

    /// Creates a packed RGBA image.
    pub fn rgba(data: Vec<u8>, width: usize, height: usize) -> ScreenMatchResult<Self> {
        Self::new(data, width, height, Channels::Rgba)
    }

    /// Copies a view into a new packed image.
    pub fn from_view(view: ImageView<'_>) -> Self {
        let mut data = Vec::with_capacity(view.width * view.height * view.channels.count());
        for y in 0..view.height {
            data.extend_from_slice(view.row_unchecked(y));
        }
        Self {
            data,
            width: view.width,
            height: view.height,
            channels: view.channels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Returns the packed pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a view of the whole image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width * self.channels.count(),
            channels: self.channels,
        }
    }

    /// Returns a view of `region`, which must lie inside the image.
    pub fn region(&self, region: Region) -> ScreenMatchResult<ImageView<'_>> {
        self.view()
            .roi(region.x, region.y, region.width, region.height)
    }

    /// Returns the region covering the whole image.
    pub fn bounds(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }
}

/// Borrowed 2D view over interleaved 8-bit pixels.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    channels: Channels,
}

impl<'a> ImageView<'a> {
    /// Creates a contiguous view with `stride == width * channels`.
    pub fn from_slice(
        data: &'a [u8],
        width: usize,
        height: usize,
        channels: Channels,
    ) -> ScreenMatchResult<Self> {
        Self::new(data, width, height, packed_stride(width, channels), channels)
    }

    /// Creates a view with an explicit stride in bytes.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        channels: Channels,
    ) -> ScreenMatchResult<Self> {
        let needed = required_len(width, height, stride, channels)?;
        if data.len() < needed {
            return Err(MatchError::InvalidImage {
                reason: "buffer too small for view",
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            channels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Number of pixels covered by the view.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Returns `true` when both views cover the same width and height.
    pub fn same_size(&self, other: &ImageView<'_>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Returns the interleaved bytes of row `y` (`width * channels` long).
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.channels.count())?;
        self.data.get(start..end)
    }

    /// Returns the channel bytes of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [u8]> {
        if x >= self.width {
            return None;
        }
        let c = self.channels.count();
        self.row(y).map(|row| &row[x * c..(x + 1) * c])
    }

    /// Row access for kernels whose callers already bounds-checked `y`.
    #[inline]
    pub(crate) fn row_unchecked(&self, y: usize) -> &'a [u8] {
        debug_assert!(y < self.height);
        let start = y * self.stride;
        &self.data[start..start + self.width * self.channels.count()]
    }

    /// Returns a zero-copy view of a sub-rectangle.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> ScreenMatchResult<ImageView<'a>> {
        if width == 0 || height == 0 {
            return Err(MatchError::InvalidImage {
                reason: "zero-area region",
            });
        }
        let out_of_bounds = MatchError::RegionOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or(out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or(out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y * self.stride + x * self.channels.count();
        Ok(ImageView {
            data: &self.data[start..],
            width,
            height,
            stride: self.stride,
            channels: self.channels,
        })
    }

    /// Window lookup for the scan loops, which only ask for in-bounds
    /// placements.
    #[inline]
    pub(crate) fn window(&self, x: usize, y: usize, width: usize, height: usize) -> ImageView<'a> {
        debug_assert!(x + width <= self.width && y + height <= self.height);
        let start = y * self.stride + x * self.channels.count();
        ImageView {
            data: &self.data[start..],
            width,
            height,
            stride: self.stride,
            channels: self.channels,
        }
    }
}

/// Row length in bytes of a packed buffer; saturates so that
/// `required_len` reports the overflow.
fn packed_stride(width: usize, channels: Channels) -> usize {
    width.saturating_mul(channels.count())
}

fn required_len(
    width: usize,
    height: usize,
    stride: usize,
    channels: Channels,
) -> ScreenMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(MatchError::InvalidImage {
            reason: "zero width or height",
        });
    }
    let row_len = width
        .checked_mul(channels.count())
        .ok_or(MatchError::InvalidImage {
            reason: "dimensions overflow",
        })?;
    if stride < row_len {
        return Err(MatchError::InvalidImage {
            reason: "stride smaller than row length",
        });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(MatchError::InvalidImage {
            reason: "dimensions overflow",
        })
}
