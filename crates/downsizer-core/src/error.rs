//! Error types for downsizer-core operations.
//!
//! The [`Error`] enum covers everything that can go wrong while describing
//! or addressing a pixel buffer:
//! - Buffer construction (dimensions, stride, data length)
//! - Pixel addressing (bounds, pixel size)
//! - Row band splitting
//! - Scale factor validation
//!
//! # Usage
//!
//! ```rust
//! use downsizer_core::{Error, Result};
//!
//! fn check(x: usize, y: usize, width: usize, height: usize) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//! assert!(check(3, 0, 2, 2).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by pixel buffers and scale factors.
///
/// # Categories
///
/// - **Input errors**: [`InvalidScale`](Error::InvalidScale), [`InvalidBuffer`](Error::InvalidBuffer), [`InvalidStride`](Error::InvalidStride)
/// - **Addressing errors**: [`OutOfBounds`](Error::OutOfBounds), [`PixelSizeMismatch`](Error::PixelSizeMismatch), [`InvalidRowRange`](Error::InvalidRowRange)
#[derive(Debug, Error)]
pub enum Error {
    /// Scale factor is not a finite number in (0, 1].
    ///
    /// Also returned for percentages outside (0, 100]; `value` then holds the
    /// percentage as given.
    #[error("invalid scale {value}: {reason}")]
    InvalidScale {
        /// Rejected value
        value: f64,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Buffer cannot be used as a downscale source.
    ///
    /// Returned for zero width or height, or when the byte length does not
    /// match `stride * height`.
    #[error("invalid buffer {width}x{height}: {reason}")]
    InvalidBuffer {
        /// Buffer width
        width: usize,
        /// Buffer height
        height: usize,
        /// Reason why the buffer is invalid
        reason: String,
    },

    /// Stride is too small for the given width and pixel size.
    #[error("stride {stride} is less than minimum {min_stride} for width {width}")]
    InvalidStride {
        /// Provided stride
        stride: usize,
        /// Minimum required stride
        min_stride: usize,
        /// Buffer width
        width: usize,
    },

    /// Pixel coordinates are outside the addressable area.
    ///
    /// For a row band, `height` is the end of the band and rows before the
    /// band start are reported the same way.
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: usize,
        /// Y coordinate that was out of bounds
        y: usize,
        /// Addressable width
        width: usize,
        /// Addressable height
        height: usize,
    },

    /// Pixel byte slice has the wrong length for the buffer format.
    #[error("pixel size mismatch: expected {expected} bytes, got {got}")]
    PixelSizeMismatch {
        /// Bytes per pixel of the buffer
        expected: usize,
        /// Length of the slice supplied
        got: usize,
    },

    /// Row ranges passed to a band split are unordered, overlapping,
    /// empty or outside the buffer.
    #[error("invalid row range {start}..{end} for height {height}: {reason}")]
    InvalidRowRange {
        /// Range start
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Buffer height
        height: usize,
        /// Reason why the range is invalid
        reason: &'static str,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidBuffer`] error.
    #[inline]
    pub fn invalid_buffer(width: usize, height: usize, reason: impl Into<String>) -> Self {
        Self::InvalidBuffer {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidScale`] error.
    #[inline]
    pub fn invalid_scale(value: f64, reason: &'static str) -> Self {
        Self::InvalidScale { value, reason }
    }

    /// Creates an [`Error::InvalidRowRange`] error.
    #[inline]
    pub fn invalid_row_range(
        range: &std::ops::Range<usize>,
        height: usize,
        reason: &'static str,
    ) -> Self {
        Self::InvalidRowRange {
            start: range.start,
            end: range.end,
            height,
            reason,
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::InvalidRowRange { .. })
    }

    /// Returns `true` if the error rejects the caller's input rather than
    /// signalling an addressing bug.
    #[inline]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidScale { .. } | Self::InvalidBuffer { .. } | Self::InvalidStride { .. }
        )
    }
}
