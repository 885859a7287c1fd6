//! Strided pixel buffers and bounds-checked row bands.
//!
//! This module provides the memory types every downscaler works on:
//! - [`PixelLayout`] - Geometry of a buffer, the only place offsets are computed
//! - [`PixelBuffer`] - Owned row-major pixel memory with explicit stride
//! - [`RowBand`] - Mutable view over a contiguous range of rows
//!
//! # Memory Layout
//!
//! Rows are stored top-to-bottom. Each row holds `width * bytes_per_pixel`
//! pixel bytes followed by optional padding up to `stride`:
//!
//! ```text
//! Memory: [P0 P1 P2 .. Pw-1 | pad]  <- Row 0 (stride bytes)
//!         [P0 P1 P2 .. Pw-1 | pad]  <- Row 1
//!         ...
//! ```
//!
//! Padding is never read as pixel data. Buffers allocated here zero it, so
//! equal pixel content produces equal raw bytes.
//!
//! # Usage
//!
//! ```rust
//! use downsizer_core::{PixelBuffer, PixelFormat};
//!
//! let mut buf = PixelBuffer::new(4, 2, PixelFormat::Rgb8).unwrap();
//! buf.write_pixel(3, 1, &[255, 128, 0]).unwrap();
//! assert_eq!(buf.read_pixel(3, 1).unwrap(), &[255, 128, 0]);
//! assert!(buf.read_pixel(4, 1).is_err());
//! ```
//!
//! # Disjoint Writes
//!
//! [`PixelBuffer::split_rows_mut`] hands out one [`RowBand`] per row range.
//! Each band owns a separate slice of the buffer, so bands can be moved to
//! different threads and written without locks:
//!
//! ```rust
//! use downsizer_core::{PixelBuffer, PixelFormat};
//!
//! let mut buf = PixelBuffer::new(2, 4, PixelFormat::Gray8).unwrap();
//! let bands = buf.split_rows_mut(&[0..2, 2..4]).unwrap();
//! assert_eq!(bands.len(), 2);
//! assert_eq!(bands[1].rows(), 2..4);
//! ```

use std::num::NonZeroUsize;
use std::ops::Range;

use crate::{Error, PixelFormat, Result};

/// Geometry of a strided pixel buffer.
///
/// Holds `(width, height, stride, bytes_per_pixel)` and computes byte
/// offsets. No other code in the workspace computes `y * stride + x * bpp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelLayout {
    width: usize,
    height: usize,
    stride: usize,
    bytes_per_pixel: usize,
}

impl PixelLayout {
    /// Creates a layout with an explicit stride.
    ///
    /// Zero width or height is allowed (degenerate buffers).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidStride`] if `stride < width * bytes_per_pixel`
    /// - [`Error::InvalidBuffer`] if the total size overflows `usize`
    pub fn new(width: usize, height: usize, stride: usize, format: PixelFormat) -> Result<Self> {
        let bytes_per_pixel = format.bytes_per_pixel();
        let min_stride = width
            .checked_mul(bytes_per_pixel)
            .ok_or_else(|| Error::invalid_buffer(width, height, "row size overflows"))?;
        if stride < min_stride {
            return Err(Error::InvalidStride {
                stride,
                min_stride,
                width,
            });
        }
        stride
            .checked_mul(height)
            .ok_or_else(|| Error::invalid_buffer(width, height, "buffer size overflows"))?;
        Ok(Self {
            width,
            height,
            stride,
            bytes_per_pixel,
        })
    }

    /// Creates a layout with tightly packed rows.
    pub fn packed(width: usize, height: usize, format: PixelFormat) -> Result<Self> {
        let stride = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or_else(|| Error::invalid_buffer(width, height, "row size overflows"))?;
        Self::new(width, height, stride, format)
    }

    /// Creates a layout whose stride is rounded up to a multiple of `align`.
    ///
    /// ```rust
    /// use std::num::NonZeroUsize;
    /// use downsizer_core::{PixelFormat, PixelLayout};
    ///
    /// let align = NonZeroUsize::new(4).unwrap();
    /// let layout = PixelLayout::aligned(5, 2, PixelFormat::Rgb8, align).unwrap();
    /// assert_eq!(layout.stride(), 16);
    /// ```
    pub fn aligned(
        width: usize,
        height: usize,
        format: PixelFormat,
        align: NonZeroUsize,
    ) -> Result<Self> {
        let row = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or_else(|| Error::invalid_buffer(width, height, "row size overflows"))?;
        let stride = row
            .checked_next_multiple_of(align.get())
            .ok_or_else(|| Error::invalid_buffer(width, height, "aligned row size overflows"))?;
        Self::new(width, height, stride, format)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row, padding included.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes per pixel.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// Pixel bytes per row, padding excluded.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width * self.bytes_per_pixel
    }

    /// Total byte length: `stride * height`.
    #[inline]
    pub fn len(&self) -> usize {
        self.stride * self.height
    }

    /// Returns `true` if the layout covers zero pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Byte range of pixel `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel_range(&self, x: usize, y: usize) -> Result<Range<usize>> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let start = y * self.stride + x * self.bytes_per_pixel;
        Ok(start..start + self.bytes_per_pixel)
    }

    /// Byte range of the pixel bytes of row `y` (padding excluded).
    #[inline]
    pub fn row_range(&self, y: usize) -> Result<Range<usize>> {
        if y >= self.height {
            return Err(Error::out_of_bounds(0, y, self.width, self.height));
        }
        Ok(self.row_span(y))
    }

    #[inline]
    fn row_span(&self, y: usize) -> Range<usize> {
        let start = y * self.stride;
        start..start + self.row_bytes()
    }

    /// Layout of `rows` rows starting anywhere in this buffer.
    #[inline]
    fn with_height(&self, rows: usize) -> Self {
        Self {
            height: rows,
            ..*self
        }
    }
}

/// Owned pixel memory with explicit stride.
///
/// `data.len()` is always exactly `stride * height`. The pixel format is
/// carried verbatim; no operation on this type looks inside a pixel.
///
/// Equality compares dimensions, format and pixel bytes. Row padding is
/// ignored.
#[derive(Clone)]
pub struct PixelBuffer {
    layout: PixelLayout,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a zeroed buffer with tightly packed rows.
    ///
    /// ```rust
    /// use downsizer_core::{PixelBuffer, PixelFormat};
    ///
    /// let buf = PixelBuffer::new(1920, 1080, PixelFormat::Rgba8).unwrap();
    /// assert_eq!(buf.stride(), 1920 * 4);
    /// assert_eq!(buf.as_bytes().len(), 1920 * 1080 * 4);
    /// ```
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Result<Self> {
        Ok(Self::zeroed(PixelLayout::packed(width, height, format)?, format))
    }

    /// Creates a zeroed buffer whose stride is a multiple of `align` bytes.
    pub fn with_row_alignment(
        width: usize,
        height: usize,
        format: PixelFormat,
        align: NonZeroUsize,
    ) -> Result<Self> {
        Ok(Self::zeroed(
            PixelLayout::aligned(width, height, format, align)?,
            format,
        ))
    }

    /// Wraps decoded bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidStride`] if `stride` cannot hold a row
    /// - [`Error::InvalidBuffer`] if `data.len() != stride * height`
    pub fn from_raw(
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self> {
        let layout = PixelLayout::new(width, height, stride, format)?;
        if data.len() != layout.len() {
            return Err(Error::invalid_buffer(
                width,
                height,
                format!("expected {} bytes, got {}", layout.len(), data.len()),
            ));
        }
        Ok(Self {
            layout,
            format,
            data,
        })
    }

    /// Wraps tightly packed decoded bytes.
    pub fn from_packed(
        width: usize,
        height: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self> {
        let layout = PixelLayout::packed(width, height, format)?;
        Self::from_raw(width, height, layout.stride(), format, data)
    }

    fn zeroed(layout: PixelLayout, format: PixelFormat) -> Self {
        Self {
            layout,
            format,
            data: vec![0; layout.len()],
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.layout.width
    }

    /// Height in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.layout.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.layout.width, self.layout.height)
    }

    /// Bytes per row, padding included.
    #[inline]
    pub fn stride(&self) -> usize {
        self.layout.stride
    }

    /// Pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per pixel.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.layout.bytes_per_pixel
    }

    /// Buffer geometry.
    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Returns `true` if the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Raw bytes, padding included.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns its raw bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Reads the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if the coordinates are outside the buffer.
    #[inline]
    pub fn read_pixel(&self, x: usize, y: usize) -> Result<&[u8]> {
        let range = self.layout.pixel_range(x, y)?;
        Ok(&self.data[range])
    }

    /// Overwrites the pixel at `(x, y)`. Only those bytes are touched.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] if the coordinates are outside the buffer
    /// - [`Error::PixelSizeMismatch`] if `pixel` is not `bytes_per_pixel` long
    #[inline]
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &[u8]) -> Result<()> {
        check_pixel_len(&self.layout, pixel)?;
        let range = self.layout.pixel_range(x, y)?;
        self.data[range].copy_from_slice(pixel);
        Ok(())
    }

    /// Pixel bytes of row `y`, padding excluded.
    #[inline]
    pub fn row(&self, y: usize) -> Result<&[u8]> {
        let range = self.layout.row_range(y)?;
        Ok(&self.data[range])
    }

    /// Iterates over the pixel bytes of every row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let layout = self.layout;
        (0..layout.height).map(move |y| &self.data[layout.row_span(y)])
    }

    /// Copies the pixel bytes into a new vector without row padding.
    pub fn to_packed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.layout.row_bytes() * self.layout.height);
        for row in self.rows() {
            out.extend_from_slice(row);
        }
        out
    }

    /// Mutable band over every row.
    pub fn band_mut(&mut self) -> RowBand<'_> {
        RowBand {
            layout: self.layout,
            rows: 0..self.layout.height,
            data: &mut self.data,
        }
    }

    /// Splits the buffer into one mutable band per row range.
    ///
    /// Ranges must be non-empty, ascending, non-overlapping and within the
    /// buffer height. Gaps between ranges are allowed; rows in a gap are
    /// simply not handed out.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRowRange`] naming the first offending range.
    pub fn split_rows_mut(&mut self, ranges: &[Range<usize>]) -> Result<Vec<RowBand<'_>>> {
        let height = self.layout.height;
        let mut cursor = 0;
        for range in ranges {
            if range.start >= range.end {
                return Err(Error::invalid_row_range(range, height, "empty range"));
            }
            if range.start < cursor {
                return Err(Error::invalid_row_range(
                    range,
                    height,
                    "overlaps or precedes previous range",
                ));
            }
            if range.end > height {
                return Err(Error::invalid_row_range(range, height, "exceeds buffer height"));
            }
            cursor = range.end;
        }

        let layout = self.layout;
        let stride = layout.stride;
        let mut bands = Vec::with_capacity(ranges.len());
        let mut rest: &mut [u8] = &mut self.data;
        let mut consumed = 0;
        for range in ranges {
            let tail = std::mem::take(&mut rest);
            let (_, tail) = tail.split_at_mut((range.start - consumed) * stride);
            let (band, tail) = tail.split_at_mut((range.end - range.start) * stride);
            rest = tail;
            consumed = range.end;
            bands.push(RowBand {
                layout,
                rows: range.clone(),
                data: band,
            });
        }
        Ok(bands)
    }
}

impl PartialEq for PixelBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format
            && self.dimensions() == other.dimensions()
            && self.rows().eq(other.rows())
    }
}

impl Eq for PixelBuffer {}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.layout.width)
            .field("height", &self.layout.height)
            .field("stride", &self.layout.stride)
            .field("format", &self.format)
            .finish()
    }
}

/// Mutable view over a contiguous range of rows of a [`PixelBuffer`].
///
/// Coordinates passed to a band are absolute buffer coordinates. Writes to
/// rows outside the band fail with [`Error::OutOfBounds`] instead of
/// touching a neighbour's rows.
pub struct RowBand<'a> {
    layout: PixelLayout,
    rows: Range<usize>,
    data: &'a mut [u8],
}

impl RowBand<'_> {
    /// Absolute row range covered by this band.
    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.layout.width
    }

    /// Bytes per pixel.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.layout.bytes_per_pixel
    }

    /// Overwrites pixel `(x, y)`, where `y` is an absolute row index.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] if `x >= width` or `y` is not in [`rows`](Self::rows)
    /// - [`Error::PixelSizeMismatch`] if `pixel` is not `bytes_per_pixel` long
    #[inline]
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &[u8]) -> Result<()> {
        check_pixel_len(&self.layout, pixel)?;
        if y < self.rows.start || y >= self.rows.end {
            return Err(Error::out_of_bounds(x, y, self.layout.width, self.rows.end));
        }
        let local = self.layout.with_height(self.rows.len());
        let range = local
            .pixel_range(x, y - self.rows.start)
            .map_err(|_| Error::out_of_bounds(x, y, self.layout.width, self.rows.end))?;
        self.data[range].copy_from_slice(pixel);
        Ok(())
    }
}

impl std::fmt::Debug for RowBand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowBand")
            .field("rows", &self.rows)
            .field("width", &self.layout.width)
            .field("stride", &self.layout.stride)
            .finish()
    }
}

#[inline]
fn check_pixel_len(layout: &PixelLayout, pixel: &[u8]) -> Result<()> {
    if pixel.len() != layout.bytes_per_pixel {
        return Err(Error::PixelSizeMismatch {
            expected: layout.bytes_per_pixel,
            got: pixel.len(),
        });
    }
    Ok(())
}
